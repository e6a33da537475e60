//! huffcode: lossless byte-stream compression with a Huffman code.
//!
//! A compressed stream is a 1024-byte header holding the 256 byte
//! frequencies (little-endian `u32`, byte value 0 first) followed by the
//! coded payload, packed most-significant bit first and zero-padded to a
//! whole byte. The decoder rebuilds the same tree from the header and
//! decodes exactly as many symbols as the counts sum to.
//!
//! Empty input compresses to empty output and back.

pub mod bitreader;
pub mod bitwriter;
pub mod cli;
pub mod config;
pub mod error;
pub mod frequency;
pub mod huffman;
pub mod node;

use crate::bitreader::BitReader;
use crate::bitwriter::BitWriter;
use crate::config::CodecConfig;
use crate::error::{CodecError, Result};
use crate::frequency::{FrequencyTable, HEADER_LEN};
use crate::huffman::HuffmanCodec;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::info;

/// Summary of one compress or decompress run
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CompressionReport {
    pub original_size: u64,
    pub compressed_size: u64,
    pub distinct_symbols: usize,
    pub max_code_len: usize,
    pub ratio: f64,
    pub entropy_bits: f64,
}

impl CompressionReport {
    fn new(table: &FrequencyTable, codec: Option<&HuffmanCodec>, compressed_size: u64) -> Self {
        let original_size = table.total();
        let ratio = if original_size == 0 {
            1.0
        } else {
            compressed_size as f64 / original_size as f64
        };
        Self {
            original_size,
            compressed_size,
            distinct_symbols: table.distinct(),
            max_code_len: codec.map_or(0, HuffmanCodec::max_code_len),
            ratio,
            entropy_bits: table.entropy_bits(),
        }
    }
}

/// Compress `data` into header + payload.
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    if data.is_empty() {
        return Ok(Vec::new());
    }
    let table = FrequencyTable::from_bytes(data)?;
    let codec = HuffmanCodec::build(&table)?;

    let estimate = HEADER_LEN + (codec.encoded_bits(&table) / 8) as usize + 1;
    let mut writer = BitWriter::new(Vec::with_capacity(estimate));
    table.write_header(&mut writer)?;
    for &b in data {
        codec.encode_symbol(b, &mut writer)?;
    }
    writer.finish()?;
    Ok(writer.into_inner())
}

/// Decompress the output of [`compress`].
///
/// Headers claiming more than the default `max_input_size` are rejected.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    if data.is_empty() {
        return Ok(Vec::new());
    }
    let mut reader = BitReader::new(data);
    let table = FrequencyTable::read_header(&mut reader)?;
    check_size(&table, CodecConfig::default().max_input_size)?;
    if table.is_empty() {
        return Ok(Vec::new());
    }
    let codec = HuffmanCodec::build(&table)?;
    codec.decode_symbols(&mut reader, table.total())
}

fn check_size(table: &FrequencyTable, max: u64) -> Result<()> {
    let size = table.total();
    if size > max {
        return Err(CodecError::InputTooLarge { size, max });
    }
    Ok(())
}

/// Scratch file next to `output`, renamed over it only on success.
fn staging_file(output: &Path) -> Result<NamedTempFile> {
    let dir = match output.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    Ok(NamedTempFile::new_in(dir)?)
}

fn commit(staged: NamedTempFile, output: &Path) -> Result<u64> {
    let file = staged.persist(output).map_err(|e| e.error)?;
    Ok(file.metadata()?.len())
}

/// File-level compressor driving the two-pass encode.
pub struct Compressor {
    config: CodecConfig,
}

impl Default for Compressor {
    fn default() -> Self {
        Self::new(CodecConfig::default())
    }
}

impl Compressor {
    /// Create a new compressor with the given configuration
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Compress `input` into `output`: one pass to count, one to encode.
    pub fn compress_file(&self, input: &Path, output: &Path) -> Result<CompressionReport> {
        let table = {
            let source = BufReader::with_capacity(self.config.io_buffer_size, File::open(input)?);
            FrequencyTable::tally_reader(source, self.config.max_input_size)?
        };

        if table.is_empty() {
            File::create(output)?;
            info!(input = %input.display(), "empty input, wrote empty output");
            return Ok(CompressionReport::new(&table, None, 0));
        }

        let codec = HuffmanCodec::build(&table)?;
        let staged = staging_file(output)?;
        let sink = BufWriter::with_capacity(self.config.io_buffer_size, staged.as_file());
        let mut writer = BitWriter::new(sink);
        table.write_header(&mut writer)?;

        let mut source = BufReader::with_capacity(self.config.io_buffer_size, File::open(input)?);
        let mut buf = vec![0u8; self.config.io_buffer_size];
        let mut encoded = 0u64;
        loop {
            let n = match source.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            for &b in &buf[..n] {
                codec.encode_symbol(b, &mut writer)?;
            }
            encoded += n as u64;
        }
        if encoded != table.total() {
            return Err(CodecError::Io(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "input changed between passes: counted {} bytes, encoded {}",
                    table.total(),
                    encoded
                ),
            )));
        }
        writer.finish()?;
        drop(writer);

        let compressed_size = commit(staged, output)?;
        let report = CompressionReport::new(&table, Some(&codec), compressed_size);
        info!(
            input = %input.display(),
            original = report.original_size,
            compressed = report.compressed_size,
            ratio = report.ratio,
            "compressed"
        );
        Ok(report)
    }

    /// Decompress `input` into `output`.
    pub fn decompress_file(&self, input: &Path, output: &Path) -> Result<CompressionReport> {
        let file = File::open(input)?;
        let compressed_size = file.metadata()?.len();

        if compressed_size == 0 {
            File::create(output)?;
            info!(input = %input.display(), "empty input, wrote empty output");
            return Ok(CompressionReport::new(&FrequencyTable::default(), None, 0));
        }

        let mut reader = BitReader::new(BufReader::with_capacity(self.config.io_buffer_size, file));
        let table = FrequencyTable::read_header(&mut reader)?;
        check_size(&table, self.config.max_input_size)?;

        let staged = staging_file(output)?;
        let mut sink = BufWriter::with_capacity(self.config.io_buffer_size, staged.as_file());
        let codec = if table.is_empty() {
            None
        } else {
            let codec = HuffmanCodec::build(&table)?;
            codec.decode_stream(&mut reader, table.total(), &mut sink)?;
            Some(codec)
        };
        sink.flush()?;
        drop(sink);
        commit(staged, output)?;

        let report = CompressionReport::new(&table, codec.as_ref(), compressed_size);
        info!(
            input = %input.display(),
            original = report.original_size,
            compressed = report.compressed_size,
            "decompressed"
        );
        Ok(report)
    }
}
