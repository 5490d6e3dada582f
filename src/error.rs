//! Error types for huffpack

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodecError {
    /// The leading 32-bit marker is not `HUFF_TREE`.
    #[error("invalid magic number {found:#010x}")]
    MalformedHeader { found: u32 },

    /// The bit source ran dry while a header or payload bit was expected.
    #[error("bad input, stream exhausted while reading {context}")]
    Truncated { context: &'static str },

    #[error("invalid tree header: {0}")]
    InvalidTree(String),

    /// The second pass saw a byte the first pass never counted.
    #[error("symbol {0} has no code, input changed between passes")]
    UncodedSymbol(u16),

    #[error("input exceeds configured limit of {limit} bytes")]
    InputTooLarge { limit: u64 },

    #[error("config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CodecError>;
