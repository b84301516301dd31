//! Stream error types

use thiserror::Error;

/// Errors raised by byte sources, cursors and the processing transforms.
///
/// A [`BitCursor`](crate::BitCursor) that has returned any of these is
/// permanently failed; every later call on it answers [`InvalidState`]
/// (see [`StreamError::InvalidState`]).
#[derive(Debug, Error)]
pub enum StreamError {
    /// Source exhausted in the middle of a field
    #[error("unexpected end of stream: needed {needed} bytes, {have} available")]
    UnexpectedEof { needed: usize, have: usize },

    /// Explicit seek beyond the end of the source
    #[error("seek out of bounds: position {pos} beyond length {len}")]
    OutOfBounds { pos: u64, len: u64 },

    /// Byte-granular operation attempted with residual bits buffered
    #[error("unaligned read: {bits_left} residual bits in the bit buffer")]
    UnalignedRead { bits_left: u32 },

    /// Caller passed an argument outside the operation's domain
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// Unknown character set, or input the transcoder rejected
    #[error("encoding error: {0}")]
    Encoding(String),

    /// zlib stream was malformed
    #[error("decompression failed: {0}")]
    Decompression(String),

    /// Euclidean modulus with a zero divisor
    #[error("division by zero")]
    DivisionByZero,

    /// Call on a cursor that has already failed
    #[error("cursor is in the failed state")]
    InvalidState,

    /// Variable-width integer ran past its 10-byte maximum
    #[error("varint exceeds 10 bytes")]
    VarintTooLong,

    /// Underlying stream I/O failure (stream-backed sources only)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for runtime operations
pub type Result<T> = std::result::Result<T, StreamError>;
