//! Bit-granular reads from a byte source.
//!
//! Bits come out most-significant first. Header integers are read with
//! [`BitReader::read_raw_u32`], which only works on a byte boundary; the
//! whole header must be read before the first [`BitReader::read_bit`].

use crate::error::{CodecError, Result};
use bitstream_io::{BigEndian, BitRead};
use std::io::{self, Read};

pub struct BitReader<R: Read> {
    inner: bitstream_io::BitReader<R, BigEndian>,
    consumed: u64,
}

impl<R: Read> BitReader<R> {
    pub fn new(source: R) -> Self {
        Self {
            inner: bitstream_io::BitReader::endian(source, BigEndian),
            consumed: 0,
        }
    }

    /// Read the next bit, or `None` once the source is exhausted.
    pub fn read_bit(&mut self) -> Result<Option<bool>> {
        match self.inner.read_bit() {
            Ok(bit) => {
                self.consumed += 1;
                Ok(Some(bit))
            }
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Read a 4-byte little-endian integer straight from the source.
    pub fn read_raw_u32(&mut self) -> Result<u32> {
        let pending_bits = self.pending_bits();
        if pending_bits != 0 {
            return Err(CodecError::Misaligned { pending_bits });
        }
        let mut buf = [0u8; 4];
        self.inner.read_bytes(&mut buf)?;
        self.consumed += 32;
        Ok(u32::from_le_bytes(buf))
    }

    /// Bits left in the current byte that have not been handed out yet.
    pub fn pending_bits(&self) -> u32 {
        match (self.consumed % 8) as u32 {
            0 => 0,
            used => 8 - used,
        }
    }
}
