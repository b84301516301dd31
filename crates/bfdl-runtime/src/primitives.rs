//! Primitive numeric decoders
//!
//! Byte-granular decoders for the fixed-width types a format declaration can
//! name:
//!
//! | Operation               | Width | Byte order   | Host type  |
//! |-------------------------|-------|--------------|------------|
//! | `read_u1` / `read_s1`   | 1     | n/a          | u8 / i8    |
//! | `read_u2le`..`read_s2be`| 2     | little / big | u16 / i16  |
//! | `read_u4le`..`read_s4be`| 4     | little / big | u32 / i32  |
//! | `read_u8le`..`read_s8be`| 8     | little / big | u64 / i64  |
//! | `read_f4le` / `read_f4be`| 4    | little / big | f32        |
//! | `read_f8le` / `read_f8be`| 8    | little / big | f64        |
//!
//! Signed integers are two's complement, floats IEEE 754 binary32/binary64
//! with the same byte order as integers of the same width. Each read
//! consumes exactly its width and requires byte alignment.

use crate::cursor::BitCursor;
use crate::error::Result;
use crate::source::ByteSource;

// Macro to generate the fixed-width decoders from a (name, type, width,
// conversion) table
macro_rules! impl_read_primitive {
    ($($(#[$meta:meta])* $name:ident => $ty:ty, $size:expr, $conv:ident;)*) => {
        $(
            $(#[$meta])*
            pub fn $name(&mut self) -> Result<$ty> {
                let raw = self.read_array::<$size>()?;
                Ok(<$ty>::$conv(raw))
            }
        )*
    };
}

impl<S: ByteSource> BitCursor<S> {
    impl_read_primitive! {
        /// Read one unsigned byte.
        read_u1 => u8, 1, from_le_bytes;
        /// Read one signed byte.
        read_s1 => i8, 1, from_le_bytes;

        /// Read an unsigned 16-bit integer, little-endian.
        read_u2le => u16, 2, from_le_bytes;
        /// Read an unsigned 16-bit integer, big-endian.
        read_u2be => u16, 2, from_be_bytes;
        /// Read a signed 16-bit integer, little-endian.
        read_s2le => i16, 2, from_le_bytes;
        /// Read a signed 16-bit integer, big-endian.
        read_s2be => i16, 2, from_be_bytes;

        /// Read an unsigned 32-bit integer, little-endian.
        read_u4le => u32, 4, from_le_bytes;
        /// Read an unsigned 32-bit integer, big-endian.
        read_u4be => u32, 4, from_be_bytes;
        /// Read a signed 32-bit integer, little-endian.
        read_s4le => i32, 4, from_le_bytes;
        /// Read a signed 32-bit integer, big-endian.
        read_s4be => i32, 4, from_be_bytes;

        /// Read an unsigned 64-bit integer, little-endian.
        read_u8le => u64, 8, from_le_bytes;
        /// Read an unsigned 64-bit integer, big-endian.
        read_u8be => u64, 8, from_be_bytes;
        /// Read a signed 64-bit integer, little-endian.
        read_s8le => i64, 8, from_le_bytes;
        /// Read a signed 64-bit integer, big-endian.
        read_s8be => i64, 8, from_be_bytes;

        /// Read an IEEE 754 single, little-endian.
        read_f4le => f32, 4, from_le_bytes;
        /// Read an IEEE 754 single, big-endian.
        read_f4be => f32, 4, from_be_bytes;
        /// Read an IEEE 754 double, little-endian.
        read_f8le => f64, 8, from_le_bytes;
        /// Read an IEEE 754 double, big-endian.
        read_f8be => f64, 8, from_be_bytes;
    }
}

#[cfg(test)]
mod tests {
    use crate::{BitCursor, StreamError};

    #[test]
    fn test_widths_advance_position_exactly() {
        let mut cursor = BitCursor::from_bytes(vec![0u8; 15]);
        cursor.read_u1().unwrap();
        assert_eq!(cursor.pos(), 1);
        cursor.read_u2be().unwrap();
        assert_eq!(cursor.pos(), 3);
        cursor.read_u4le().unwrap();
        assert_eq!(cursor.pos(), 7);
        cursor.read_u8be().unwrap();
        assert_eq!(cursor.pos(), 15);
        assert!(cursor.is_eof());
    }

    #[test]
    fn test_endianness_pairs() {
        let mut cursor = BitCursor::from_bytes(vec![0x01, 0x02, 0x01, 0x02]);
        assert_eq!(cursor.read_u2le().unwrap(), 0x0201);
        assert_eq!(cursor.read_u2be().unwrap(), 0x0102);

        let mut cursor = BitCursor::from_bytes(vec![0x01, 0x02, 0x03, 0x04]);
        assert_eq!(cursor.read_u4le().unwrap(), 0x0403_0201);
        cursor.seek(0).unwrap();
        assert_eq!(cursor.read_u4be().unwrap(), 0x0102_0304);

        let data = vec![0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08];
        let mut cursor = BitCursor::from_bytes(data);
        assert_eq!(cursor.read_u8le().unwrap(), 0x0807_0605_0403_0201);
        cursor.seek(0).unwrap();
        assert_eq!(cursor.read_u8be().unwrap(), 0x0102_0304_0506_0708);
    }

    #[test]
    fn test_signed_twos_complement() {
        let mut cursor = BitCursor::from_bytes(vec![0xFF]);
        assert_eq!(cursor.read_s1().unwrap(), -1);

        let mut cursor = BitCursor::from_bytes(vec![0xFE, 0xFF]);
        assert_eq!(cursor.read_s2le().unwrap(), -2);

        let mut cursor = BitCursor::from_bytes(vec![0xFF, 0xFF, 0xFF, 0xFD]);
        assert_eq!(cursor.read_s4be().unwrap(), -3);

        let mut cursor =
            BitCursor::from_bytes(vec![0xFC, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF]);
        assert_eq!(cursor.read_s8le().unwrap(), -4);
    }

    #[test]
    fn test_floats() {
        // 1.5f32 = 0x3FC00000
        let mut cursor = BitCursor::from_bytes(vec![0x3F, 0xC0, 0x00, 0x00]);
        assert_eq!(cursor.read_f4be().unwrap(), 1.5);

        let mut cursor = BitCursor::from_bytes(vec![0x00, 0x00, 0xC0, 0x3F]);
        assert_eq!(cursor.read_f4le().unwrap(), 1.5);

        // -2.25f64 = 0xC002000000000000
        let mut cursor =
            BitCursor::from_bytes(vec![0xC0, 0x02, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]);
        assert_eq!(cursor.read_f8be().unwrap(), -2.25);

        let mut cursor =
            BitCursor::from_bytes(vec![0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x02, 0xC0]);
        assert_eq!(cursor.read_f8le().unwrap(), -2.25);
    }

    #[test]
    fn test_roundtrip_all_widths() {
        let value: u64 = 0xDEAD_BEEF_1234_5678;
        let mut cursor = BitCursor::from_bytes(value.to_le_bytes().to_vec());
        assert_eq!(cursor.read_u8le().unwrap(), value);
        let mut cursor = BitCursor::from_bytes(value.to_be_bytes().to_vec());
        assert_eq!(cursor.read_u8be().unwrap(), value);

        let value: i32 = -123_456;
        let mut cursor = BitCursor::from_bytes(value.to_le_bytes().to_vec());
        assert_eq!(cursor.read_s4le().unwrap(), value);

        let value: f64 = 2.718281828;
        let mut cursor = BitCursor::from_bytes(value.to_be_bytes().to_vec());
        assert_eq!(cursor.read_f8be().unwrap(), value);
    }

    #[test]
    fn test_eof_mid_field() {
        let mut cursor = BitCursor::from_bytes(vec![0x01, 0x02, 0x03]);
        let err = cursor.read_u4le().unwrap_err();
        assert!(matches!(
            err,
            StreamError::UnexpectedEof { needed: 4, have: 3 }
        ));
    }

    #[test]
    fn test_unaligned_read_rejected() {
        let mut cursor = BitCursor::from_bytes(vec![0xB1, 0xE2]);
        cursor.read_bits_int_be(3).unwrap();
        let err = cursor.read_u1().unwrap_err();
        assert!(matches!(err, StreamError::UnalignedRead { bits_left: 5 }));
        // The bit read consumed one byte; the failing byte read consumed none
        assert_eq!(cursor.pos(), 1);
    }
}
