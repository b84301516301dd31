//! Runtime support for parsers generated from bfdl format declarations
//!
//! A bfdl declaration describes a binary format; the compiler turns it into
//! a parser module ahead of time, and that generated code calls into this
//! crate at runtime to consume bytes and reconstruct typed values. Nothing
//! here knows about any particular format.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │              Generated parser modules (not here)         │
//! ├──────────────────────────────────────────────────────────┤
//! │  BitCursor          │  process            │  strings     │
//! │  - fixed-width ints │  - xor_one/xor_many │  bytes_to_str│
//! │  - floats, varints  │  - rotate_left      │  helpers     │
//! │  - bit-level reads  │  - zlib_inflate     │  - modulo    │
//! │  - byte arrays      │                     │  - radix fmt │
//! ├──────────────────────────────────────────────────────────┤
//! │  ByteSource: InMemorySource │ StreamSource<Read + Seek>  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! # Key concepts
//!
//! - **ByteSource**: finite seekable read-only byte stream backing a cursor
//! - **BitCursor**: stateful reader adding a residual bit buffer and the
//!   typed decoders; byte-granular reads demand bit alignment
//! - **Bit endianness**: whether sub-byte fields are drawn MSB-first
//!   (`read_bits_int_be`) or LSB-first (`read_bits_int_le`) from each byte
//! - **Failure latch**: the first error poisons a cursor permanently; a
//!   parser must discard it and abort
//!
//! # Example
//!
//! ```
//! use bfdl_runtime::{BitCursor, Result};
//!
//! fn main() -> Result<()> {
//!     let mut cursor = BitCursor::from_bytes(vec![0x02, 0x01, 0x48, 0x69, 0x00]);
//!     let version = cursor.read_u2le()?;
//!     assert_eq!(version, 0x0102);
//!
//!     let name = cursor.read_bytes_term(0x00, false, true, true)?;
//!     assert_eq!(bfdl_runtime::strings::bytes_to_str(&name, "UTF-8")?, "Hi");
//!     assert!(cursor.is_eof());
//!     Ok(())
//! }
//! ```
//!
//! # Character sets
//!
//! With the default `encodings` feature, [`strings::bytes_to_str`] accepts
//! any label `encoding_rs` knows. Without it, only ASCII and UTF-8 decode
//! and every other label fails with [`StreamError::Encoding`].

mod bits;
mod cursor;
mod error;
pub mod helpers;
mod primitives;
pub mod process;
mod source;
pub mod strings;
mod varint;

pub use cursor::BitCursor;
pub use error::{Result, StreamError};
pub use source::{ByteSource, InMemorySource, StreamSource};

/// Re-export bytes for convenience
pub use bytes::Bytes;
