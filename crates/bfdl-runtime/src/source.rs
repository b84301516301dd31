//! Byte source abstractions
//!
//! A [`ByteSource`] is a finite, seekable, read-only view over a byte
//! sequence. The cursor layer is generic over this trait so the same decoding
//! logic works against an in-memory buffer or a seekable stream such as a
//! [`File`](std::fs::File).
//!
//! Position is measured in whole bytes, starts at 0 and only moves through
//! explicit seeks or successful reads. `pos == len` is a legal state meaning
//! end of stream.

use std::io::{Read, Seek, SeekFrom};

use bytes::Bytes;
use tracing::trace;

use crate::error::{Result, StreamError};

/// A finite, seekable, read-only byte stream.
pub trait ByteSource {
    /// Total byte count. Constant over the lifetime of the source.
    fn len(&self) -> u64;

    /// Current read position, in bytes from the start.
    fn pos(&self) -> u64;

    /// Move the read position. `pos == len` is legal and means end of
    /// stream; anything beyond that is [`StreamError::OutOfBounds`].
    fn seek(&mut self, pos: u64) -> Result<()>;

    /// Read a single byte, advancing the position.
    fn read_byte(&mut self) -> Result<u8> {
        let bytes = self.read_bytes(1)?;
        Ok(bytes[0])
    }

    /// Read exactly `n` bytes, advancing the position. Fails with
    /// [`StreamError::UnexpectedEof`] if fewer than `n` bytes remain, in
    /// which case the position is unchanged.
    fn read_bytes(&mut self, n: usize) -> Result<Bytes>;

    /// Read everything from the current position to the end. Always
    /// succeeds; the result is empty at end of stream.
    fn read_bytes_full(&mut self) -> Result<Bytes>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn is_eof(&self) -> bool {
        self.pos() >= self.len()
    }
}

/// Whole-buffer source backed by [`Bytes`].
///
/// Reads are zero-copy slices of the backing buffer. This is the simplest
/// correct implementation and the default choice for generated parsers.
#[derive(Debug, Clone)]
pub struct InMemorySource {
    data: Bytes,
    pos: usize,
}

impl InMemorySource {
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self {
            data: data.into(),
            pos: 0,
        }
    }

    /// The full backing buffer, independent of the current position.
    pub fn data(&self) -> &Bytes {
        &self.data
    }
}

impl From<Vec<u8>> for InMemorySource {
    fn from(data: Vec<u8>) -> Self {
        Self::new(data)
    }
}

impl From<&[u8]> for InMemorySource {
    fn from(data: &[u8]) -> Self {
        Self::new(Bytes::copy_from_slice(data))
    }
}

impl From<Bytes> for InMemorySource {
    fn from(data: Bytes) -> Self {
        Self::new(data)
    }
}

impl ByteSource for InMemorySource {
    fn len(&self) -> u64 {
        self.data.len() as u64
    }

    fn pos(&self) -> u64 {
        self.pos as u64
    }

    fn seek(&mut self, pos: u64) -> Result<()> {
        if pos > self.data.len() as u64 {
            return Err(StreamError::OutOfBounds {
                pos,
                len: self.data.len() as u64,
            });
        }
        self.pos = pos as usize;
        Ok(())
    }

    fn read_byte(&mut self) -> Result<u8> {
        match self.data.get(self.pos) {
            Some(&byte) => {
                self.pos += 1;
                Ok(byte)
            }
            None => Err(StreamError::UnexpectedEof { needed: 1, have: 0 }),
        }
    }

    fn read_bytes(&mut self, n: usize) -> Result<Bytes> {
        let have = self.data.len() - self.pos;
        if n > have {
            return Err(StreamError::UnexpectedEof { needed: n, have });
        }
        let out = self.data.slice(self.pos..self.pos + n);
        self.pos += n;
        Ok(out)
    }

    fn read_bytes_full(&mut self) -> Result<Bytes> {
        let out = self.data.slice(self.pos..);
        self.pos = self.data.len();
        Ok(out)
    }
}

/// Source over an arbitrary seekable stream.
///
/// The length is probed once at construction by seeking to the end. Backward
/// seeks are delegated to the underlying stream, so any `Read + Seek`
/// implementation works, files included. I/O failures surface as
/// [`StreamError::Io`]; running out of bytes the length said were there
/// surfaces as [`StreamError::UnexpectedEof`].
#[derive(Debug)]
pub struct StreamSource<R> {
    inner: R,
    len: u64,
    pos: u64,
}

impl<R: Read + Seek> StreamSource<R> {
    pub fn new(mut inner: R) -> Result<Self> {
        let pos = inner.stream_position()?;
        let len = inner.seek(SeekFrom::End(0))?;
        inner.seek(SeekFrom::Start(pos))?;
        trace!(len, pos, "stream source opened");
        Ok(Self { inner, len, pos })
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    fn remaining(&self) -> usize {
        (self.len - self.pos) as usize
    }
}

impl<R: Read + Seek> ByteSource for StreamSource<R> {
    fn len(&self) -> u64 {
        self.len
    }

    fn pos(&self) -> u64 {
        self.pos
    }

    fn seek(&mut self, pos: u64) -> Result<()> {
        if pos > self.len {
            return Err(StreamError::OutOfBounds { pos, len: self.len });
        }
        self.inner.seek(SeekFrom::Start(pos))?;
        self.pos = pos;
        Ok(())
    }

    fn read_byte(&mut self) -> Result<u8> {
        if self.pos >= self.len {
            return Err(StreamError::UnexpectedEof { needed: 1, have: 0 });
        }
        let mut byte = [0u8; 1];
        self.inner.read_exact(&mut byte)?;
        self.pos += 1;
        Ok(byte[0])
    }

    fn read_bytes(&mut self, n: usize) -> Result<Bytes> {
        let have = self.remaining();
        if n > have {
            return Err(StreamError::UnexpectedEof { needed: n, have });
        }
        let mut buf = vec![0u8; n];
        self.inner.read_exact(&mut buf)?;
        self.pos += n as u64;
        Ok(Bytes::from(buf))
    }

    fn read_bytes_full(&mut self) -> Result<Bytes> {
        let n = self.remaining();
        self.read_bytes(n)
    }
}
