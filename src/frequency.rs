//! Byte frequency tables and their on-disk header form.
//!
//! The header is 256 little-endian `u32` counts, byte value 0 first.

use crate::bitreader::BitReader;
use crate::bitwriter::BitWriter;
use crate::error::{CodecError, Result};
use std::io::{self, Read, Write};

/// Size of the persisted header in bytes.
pub const HEADER_LEN: usize = 256 * 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable([u32; 256]);

impl Default for FrequencyTable {
    fn default() -> Self {
        Self([0; 256])
    }
}

impl FrequencyTable {
    pub fn from_counts(counts: [u32; 256]) -> Self {
        Self(counts)
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut table = Self::default();
        table.add(data)?;
        Ok(table)
    }

    /// Tally every byte of `source`, failing once more than `max_input`
    /// bytes have been seen.
    pub fn tally_reader<R: Read>(mut source: R, max_input: u64) -> Result<Self> {
        let mut table = Self::default();
        let mut buf = [0u8; 8192];
        let mut seen = 0u64;
        loop {
            let n = match source.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            seen += n as u64;
            if seen > max_input {
                return Err(CodecError::InputTooLarge {
                    size: seen,
                    max: max_input,
                });
            }
            table.add(&buf[..n])?;
        }
        Ok(table)
    }

    fn add(&mut self, data: &[u8]) -> Result<()> {
        for &b in data {
            let slot = &mut self.0[b as usize];
            *slot = slot
                .checked_add(1)
                .ok_or(CodecError::CountOverflow { symbol: b })?;
        }
        Ok(())
    }

    pub fn count(&self, symbol: u8) -> u32 {
        self.0[symbol as usize]
    }

    pub fn counts(&self) -> &[u32; 256] {
        &self.0
    }

    /// Message length in bytes.
    pub fn total(&self) -> u64 {
        self.0.iter().map(|&c| u64::from(c)).sum()
    }

    /// Number of byte values that occur at least once.
    pub fn distinct(&self) -> usize {
        self.0.iter().filter(|&&c| c > 0).count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|&c| c == 0)
    }

    /// Non-zero `(byte, count)` pairs in byte order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u32)> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter(|(_, &c)| c > 0)
            .map(|(i, &c)| (i as u8, c))
    }

    /// Shannon entropy in bits per byte.
    pub fn entropy_bits(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let len = total as f64;
        let mut entropy = 0.0;
        for (_, count) in self.iter() {
            let p = f64::from(count) / len;
            entropy -= p * p.log2();
        }
        entropy
    }

    pub fn write_header<W: Write>(&self, writer: &mut BitWriter<W>) -> Result<()> {
        for &count in &self.0 {
            writer.write_raw_u32(count)?;
        }
        Ok(())
    }

    /// Read the 256 header counts. Must run before any bit-level read.
    pub fn read_header<R: Read>(reader: &mut BitReader<R>) -> Result<Self> {
        let mut counts = [0u32; 256];
        for (entries, slot) in counts.iter_mut().enumerate() {
            *slot = match reader.read_raw_u32() {
                Ok(v) => v,
                Err(CodecError::Io(e)) if e.kind() == io::ErrorKind::UnexpectedEof => {
                    return Err(CodecError::TruncatedHeader { entries });
                }
                Err(e) => return Err(e),
            };
        }
        Ok(Self(counts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_and_total() {
        let table = FrequencyTable::from_bytes(b"AAABBC").unwrap();
        assert_eq!(table.count(b'A'), 3);
        assert_eq!(table.count(b'B'), 2);
        assert_eq!(table.count(b'C'), 1);
        assert_eq!(table.count(b'D'), 0);
        assert_eq!(table.total(), 6);
        assert_eq!(table.distinct(), 3);
        assert_eq!(
            table.iter().collect::<Vec<_>>(),
            vec![(b'A', 3), (b'B', 2), (b'C', 1)]
        );
    }

    #[test]
    fn test_empty_table() {
        let table = FrequencyTable::from_bytes(b"").unwrap();
        assert!(table.is_empty());
        assert_eq!(table.total(), 0);
        assert_eq!(table.entropy_bits(), 0.0);
    }

    #[test]
    fn test_header_roundtrip() {
        let mut counts = [0u32; 256];
        for (i, c) in counts.iter_mut().enumerate() {
            *c = (i as u32).wrapping_mul(2_654_435_761);
        }
        let table = FrequencyTable::from_counts(counts);

        let mut writer = BitWriter::new(Vec::new());
        table.write_header(&mut writer).unwrap();
        let bytes = writer.into_inner();
        assert_eq!(bytes.len(), HEADER_LEN);
        assert_eq!(&bytes[4..8], &counts[1].to_le_bytes());

        let mut reader = BitReader::new(bytes.as_slice());
        let back = FrequencyTable::read_header(&mut reader).unwrap();
        assert_eq!(back, table);
    }

    #[test]
    fn test_truncated_header() {
        let bytes = vec![0u8; 10 * 4 + 2];
        let mut reader = BitReader::new(bytes.as_slice());
        assert!(matches!(
            FrequencyTable::read_header(&mut reader),
            Err(CodecError::TruncatedHeader { entries: 10 })
        ));
    }

    #[test]
    fn test_tally_reader_limit() {
        let data = vec![7u8; 100];
        let table = FrequencyTable::tally_reader(data.as_slice(), 100).unwrap();
        assert_eq!(table.count(7), 100);

        assert!(matches!(
            FrequencyTable::tally_reader(data.as_slice(), 99),
            Err(CodecError::InputTooLarge { size: 100, max: 99 })
        ));
    }

    #[test]
    fn test_entropy_uniform_two_symbols() {
        let table = FrequencyTable::from_bytes(b"abababab").unwrap();
        assert!((table.entropy_bits() - 1.0).abs() < 1e-9);
    }
}
