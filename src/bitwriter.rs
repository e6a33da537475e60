//! Bit-granular writes to a byte sink.
//!
//! Bits are packed most-significant first. A completed byte goes to the
//! sink as soon as its eighth bit arrives; the trailing partial byte is
//! zero-padded in its low-order bits by [`BitWriter::finish`] or
//! [`BitWriter::flush`].

use crate::error::{CodecError, Result};
use bitstream_io::{BigEndian, BitWrite};
use std::io::Write;

pub struct BitWriter<W: Write> {
    inner: bitstream_io::BitWriter<W, BigEndian>,
    pending: u32,
}

impl<W: Write> BitWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            inner: bitstream_io::BitWriter::endian(sink, BigEndian),
            pending: 0,
        }
    }

    pub fn write_bit(&mut self, bit: bool) -> Result<()> {
        self.inner.write_bit(bit)?;
        self.pending = (self.pending + 1) % 8;
        Ok(())
    }

    /// Write a 4-byte little-endian integer. Only legal on a byte boundary.
    pub fn write_raw_u32(&mut self, value: u32) -> Result<()> {
        if self.pending != 0 {
            return Err(CodecError::Misaligned {
                pending_bits: self.pending,
            });
        }
        self.inner.write_bytes(&value.to_le_bytes())?;
        Ok(())
    }

    /// Bits written since the last byte boundary (0..=7).
    pub fn pending_bits(&self) -> u32 {
        self.pending
    }

    /// Emit the held bits as one zero-padded byte and flush the sink.
    ///
    /// Always writes exactly one byte, even when nothing is held, so it
    /// must only be called at the true end of output. Encoders should
    /// prefer [`BitWriter::finish`].
    pub fn flush(&mut self) -> Result<()> {
        if self.pending == 0 {
            self.inner.write_bytes(&[0])?;
        } else {
            self.inner.byte_align()?;
        }
        self.pending = 0;
        self.flush_sink()
    }

    /// Pad a partial trailing byte, if any, and flush the sink.
    pub fn finish(&mut self) -> Result<()> {
        if self.pending != 0 {
            self.inner.byte_align()?;
            self.pending = 0;
        }
        self.flush_sink()
    }

    pub fn into_inner(self) -> W {
        self.inner.into_writer()
    }

    fn flush_sink(&mut self) -> Result<()> {
        if let Some(sink) = self.inner.writer() {
            sink.flush()?;
        }
        Ok(())
    }
}
