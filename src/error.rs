//! Error types for huffzip

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompressError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("truncated header: expected {expected} bytes, got {actual}")]
    TruncatedHeader { expected: usize, actual: usize },

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("corrupt stream: {0}")]
    CorruptStream(String),

    #[error("no code for symbol 0x{0:02x}")]
    MissingCode(u8),

    #[error("symbol 0x{0:02x} occurs more often than the header can record")]
    FrequencyOverflow(u8),

    #[error("input too large: {size} bytes exceeds limit of {limit}")]
    InputTooLarge { size: u64, limit: u64 },

    #[error("size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: u64, actual: u64 },

    #[error("verification failed: {0}")]
    VerifyFailed(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl CompressError {
    /// True for errors caused by malformed compressed data rather than I/O.
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            CompressError::TruncatedHeader { .. }
                | CompressError::InvalidHeader(_)
                | CompressError::CorruptStream(_)
        )
    }
}
