//! Binary stream cursor
//!
//! [`BitCursor`] is the object generated parsers drive. It overlays a
//! [`ByteSource`] with a residual bit buffer so byte-granular and sub-byte
//! reads can interleave, and it carries the failure latch: the first error
//! poisons the cursor and every later call answers
//! [`StreamError::InvalidState`]. A parser that sees any error discards the
//! cursor and aborts.
//!
//! Cursor state:
//!
//! | Field       | Meaning                                                  |
//! |-------------|----------------------------------------------------------|
//! | `bits`      | up to 64 buffered bits pulled from the source            |
//! | `bits_left` | number of valid bits in `bits` (0 means byte-aligned)    |
//! | `bit_order` | which packing convention filled the buffer               |
//!
//! Byte-granular reads require `bits_left == 0` and fail with
//! [`StreamError::UnalignedRead`] otherwise; [`BitCursor::align_to_byte`]
//! discards the residue explicitly.

use bytes::Bytes;

use crate::error::{Result, StreamError};
use crate::source::{ByteSource, InMemorySource};

/// Residual-bit packing convention, meaningful while `bits_left > 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BitOrder {
    /// Bit 7 of each source byte is yielded first
    MsbFirst,
    /// Bit 0 of each source byte is yielded first
    LsbFirst,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CursorState {
    Healthy,
    Failed,
}

/// Stateful reader combining a [`ByteSource`] with a residual bit buffer
/// and the typed decoders generated parsers call.
#[derive(Debug)]
pub struct BitCursor<S> {
    pub(crate) source: S,
    pub(crate) bits: u64,
    pub(crate) bits_left: u32,
    pub(crate) bit_order: BitOrder,
    state: CursorState,
}

impl BitCursor<InMemorySource> {
    /// Cursor over an in-memory buffer.
    pub fn from_bytes(data: impl Into<Bytes>) -> Self {
        Self::new(InMemorySource::new(data))
    }
}

impl<S: ByteSource> BitCursor<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            bits: 0,
            bits_left: 0,
            bit_order: BitOrder::MsbFirst,
            state: CursorState::Healthy,
        }
    }

    /// Consume the cursor, returning the underlying source.
    pub fn into_source(self) -> S {
        self.source
    }

    /// Total length of the underlying source, in bytes.
    pub fn size(&self) -> u64 {
        self.source.len()
    }

    /// Current byte position in the underlying source. Buffered bits do not
    /// move this; they were consumed from the source when buffered.
    pub fn pos(&self) -> u64 {
        self.source.pos()
    }

    /// True when both the source and the bit buffer are exhausted.
    pub fn is_eof(&self) -> bool {
        self.bits_left == 0 && self.source.is_eof()
    }

    /// Move the byte position. Discards any residual bits.
    pub fn seek(&mut self, pos: u64) -> Result<()> {
        self.ensure_live()?;
        self.bits = 0;
        self.bits_left = 0;
        match self.source.seek(pos) {
            Ok(()) => Ok(()),
            Err(err) => self.fail(err),
        }
    }

    /// Discard any residual bits, returning the cursor to byte alignment.
    pub fn align_to_byte(&mut self) -> Result<()> {
        self.ensure_live()?;
        self.bits = 0;
        self.bits_left = 0;
        Ok(())
    }

    /// Read exactly `n` bytes. Requires byte alignment.
    pub fn read_bytes(&mut self, n: usize) -> Result<Bytes> {
        self.ensure_live()?;
        self.ensure_aligned()?;
        match self.source.read_bytes(n) {
            Ok(bytes) => Ok(bytes),
            Err(err) => self.fail(err),
        }
    }

    /// Read from the current position to the end of the source. Requires
    /// byte alignment; succeeds with an empty result at end of stream.
    pub fn read_bytes_full(&mut self) -> Result<Bytes> {
        self.ensure_live()?;
        self.ensure_aligned()?;
        match self.source.read_bytes_full() {
            Ok(bytes) => Ok(bytes),
            Err(err) => self.fail(err),
        }
    }

    /// Scan forward to the first byte equal to `term`.
    ///
    /// Returns the bytes before the terminator; with `include` the
    /// terminator is appended to the result; with `consume` the cursor ends
    /// up one past the terminator, otherwise on it. Hitting end of stream
    /// first fails with [`StreamError::UnexpectedEof`] when `eos_error`, and
    /// otherwise returns everything up to the end.
    pub fn read_bytes_term(
        &mut self,
        term: u8,
        include: bool,
        consume: bool,
        eos_error: bool,
    ) -> Result<Bytes> {
        self.ensure_live()?;
        self.ensure_aligned()?;
        let mut out = Vec::new();
        loop {
            if self.source.is_eof() {
                if eos_error {
                    return self.fail(StreamError::UnexpectedEof { needed: 1, have: 0 });
                }
                return Ok(Bytes::from(out));
            }
            let byte = match self.source.read_byte() {
                Ok(byte) => byte,
                Err(err) => return self.fail(err),
            };
            if byte == term {
                if include {
                    out.push(byte);
                }
                if !consume {
                    let back = self.source.pos() - 1;
                    if let Err(err) = self.source.seek(back) {
                        return self.fail(err);
                    }
                }
                return Ok(Bytes::from(out));
            }
            out.push(byte);
        }
    }

    /// Fixed-width read used by the primitive decoders.
    pub(crate) fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        self.ensure_live()?;
        self.ensure_aligned()?;
        let raw = match self.source.read_bytes(N) {
            Ok(bytes) => bytes,
            Err(err) => return self.fail(err),
        };
        let mut out = [0u8; N];
        out.copy_from_slice(&raw);
        Ok(out)
    }

    /// Single-byte read for the bit filler and varint decoder. Does not
    /// check alignment; callers manage the bit buffer themselves.
    pub(crate) fn next_byte(&mut self) -> Result<u8> {
        match self.source.read_byte() {
            Ok(byte) => Ok(byte),
            Err(err) => self.fail(err),
        }
    }

    pub(crate) fn ensure_live(&self) -> Result<()> {
        match self.state {
            CursorState::Healthy => Ok(()),
            CursorState::Failed => Err(StreamError::InvalidState),
        }
    }

    pub(crate) fn ensure_aligned(&mut self) -> Result<()> {
        if self.bits_left > 0 {
            let bits_left = self.bits_left;
            return self.fail(StreamError::UnalignedRead { bits_left });
        }
        Ok(())
    }

    /// Latch the failed state and propagate `err`. There is no way back.
    pub(crate) fn fail<T>(&mut self, err: StreamError) -> Result<T> {
        self.state = CursorState::Failed;
        Err(err)
    }
}
