//! Error types for huffcode

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("cannot build a coding tree from an all-zero frequency table")]
    EmptyFrequencyTable,

    #[error("bitstream ended in the middle of a symbol")]
    EndOfStream,

    #[error("bitstream ended after {decoded} of {expected} symbols")]
    UnexpectedEndOfStream { decoded: u64, expected: u64 },

    #[error("truncated header: {entries} of 256 entries present")]
    TruncatedHeader { entries: usize },

    #[error("byte-aligned access with {pending_bits} bits pending")]
    Misaligned { pending_bits: u32 },

    #[error("bitstream selects a branch absent from the coding tree")]
    InvalidCode,

    #[error("symbol {0:#04x} has no code in this tree")]
    UnknownSymbol(u8),

    #[error("frequency of symbol {symbol:#04x} does not fit in 32 bits")]
    CountOverflow { symbol: u8 },

    #[error("input too large: {size} bytes exceeds limit of {max}")]
    InputTooLarge { size: u64, max: u64 },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CodecError>;
