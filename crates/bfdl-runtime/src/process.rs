//! Byte-array processing transforms
//!
//! Pure functions applied to raw bytes after reading and before field
//! interpretation, matching the `process:` attribute of a format
//! declaration. Each returns a fresh buffer; inputs are never mutated.

use std::io::Read;

use flate2::read::ZlibDecoder;
use tracing::trace;

use crate::error::{Result, StreamError};

/// XOR every byte with a single-byte key. Applying the same key twice
/// returns the original data.
pub fn xor_one(data: &[u8], key: u8) -> Vec<u8> {
    data.iter().map(|byte| byte ^ key).collect()
}

/// XOR with a repeating multi-byte key: output byte `i` is
/// `data[i] ^ key[i % key.len()]`.
pub fn xor_many(data: &[u8], key: &[u8]) -> Result<Vec<u8>> {
    if key.is_empty() {
        return Err(StreamError::InvalidArgument("XOR key must not be empty"));
    }
    Ok(data
        .iter()
        .enumerate()
        .map(|(i, byte)| byte ^ key[i % key.len()])
        .collect())
}

/// Rotate each byte left by `amount` bits. `amount` is taken mod 8, so
/// negative amounts rotate right and `amount == 0` returns an exact copy.
///
/// Only `group_size == 1` is supported; byte order within larger groups is
/// ambiguous, so they are rejected with [`StreamError::InvalidArgument`].
pub fn rotate_left(data: &[u8], amount: i32, group_size: usize) -> Result<Vec<u8>> {
    if group_size != 1 {
        return Err(StreamError::InvalidArgument(
            "rotate group_size must be 1",
        ));
    }
    let amount = amount.rem_euclid(8) as u32;
    Ok(data.iter().map(|byte| byte.rotate_left(amount)).collect())
}

/// Inflate a zlib/deflate stream.
pub fn zlib_inflate(data: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    ZlibDecoder::new(data)
        .read_to_end(&mut out)
        .map_err(|err| StreamError::Decompression(err.to_string()))?;
    trace!(compressed = data.len(), inflated = out.len(), "zlib inflate");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xor_one_involution() {
        let data = vec![0x00, 0x55, 0xAA, 0xFF];
        let once = xor_one(&data, 0x5C);
        assert_ne!(once, data);
        assert_eq!(xor_one(&once, 0x5C), data);
    }

    #[test]
    fn test_xor_many_known_vector() {
        let out = xor_many(&[0x10, 0x20, 0x30, 0x40], &[0xAA, 0xBB]).unwrap();
        assert_eq!(out, vec![0xBA, 0x9B, 0x9A, 0xFB]);
        // Same key applied again restores the input
        assert_eq!(
            xor_many(&out, &[0xAA, 0xBB]).unwrap(),
            vec![0x10, 0x20, 0x30, 0x40]
        );
    }

    #[test]
    fn test_xor_many_empty_key() {
        assert!(matches!(
            xor_many(&[1, 2, 3], &[]),
            Err(StreamError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_rotate_round_trip() {
        let data = vec![0x01, 0x80, 0x96, 0xFF];
        for amount in 0..=8 {
            let rotated = rotate_left(&data, amount, 1).unwrap();
            let restored = rotate_left(&rotated, 8 - amount, 1).unwrap();
            assert_eq!(restored, data, "amount {amount}");
        }
    }

    #[test]
    fn test_rotate_known_values() {
        assert_eq!(rotate_left(&[0b1000_0001], 1, 1).unwrap(), vec![0b0000_0011]);
        assert_eq!(rotate_left(&[0x0F], 4, 1).unwrap(), vec![0xF0]);
        // amount 0 and amount 8 are both the identity
        assert_eq!(rotate_left(&[0x42], 0, 1).unwrap(), vec![0x42]);
        assert_eq!(rotate_left(&[0x42], 8, 1).unwrap(), vec![0x42]);
        // negative amounts rotate right
        assert_eq!(rotate_left(&[0b0000_0011], -1, 1).unwrap(), vec![0b1000_0001]);
    }

    #[test]
    fn test_rotate_rejects_multi_byte_groups() {
        assert!(matches!(
            rotate_left(&[1, 2, 3, 4], 3, 2),
            Err(StreamError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_zlib_round_trip() {
        use flate2::write::ZlibEncoder;
        use flate2::Compression;
        use std::io::Write;

        let plain = b"the quick brown fox jumps over the lazy dog".repeat(10);
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&plain).unwrap();
        let compressed = encoder.finish().unwrap();

        assert_eq!(zlib_inflate(&compressed).unwrap(), plain);
    }

    #[test]
    fn test_zlib_malformed() {
        assert!(matches!(
            zlib_inflate(&[0x12, 0x34, 0x56]),
            Err(StreamError::Decompression(_))
        ));
    }
}
