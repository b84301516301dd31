//! String decoding
//!
//! [`bytes_to_str`] converts bytes already read from the stream into text
//! under a named character set. ASCII and UTF-8 are always available; every
//! other label needs the `encodings` cargo feature (on by default), which
//! routes through `encoding_rs` and accepts any of its canonical labels
//! (`UTF-16LE`, `Shift_JIS`, `windows-1252`, ...).
//!
//! Unknown labels and input the transcoder rejects both fail with
//! [`StreamError::Encoding`]; nothing is ever replaced or dropped silently.

use crate::error::{Result, StreamError};

/// Transcode `bytes` under the character set named by `encoding`.
///
/// Labels are matched case-insensitively. Called by generated parsers as a
/// post-step on bytes obtained from one of the byte-array reads.
pub fn bytes_to_str(bytes: &[u8], encoding: &str) -> Result<String> {
    let label = encoding.trim();
    if is_passthrough_label(label) {
        return String::from_utf8(bytes.to_vec())
            .map_err(|err| StreamError::Encoding(format!("invalid {label} input: {err}")));
    }
    decode_extended(bytes, label)
}

// ASCII is a strict subset of UTF-8, so both share the validating
// passthrough.
fn is_passthrough_label(label: &str) -> bool {
    label.eq_ignore_ascii_case("utf-8")
        || label.eq_ignore_ascii_case("utf8")
        || label.eq_ignore_ascii_case("ascii")
        || label.eq_ignore_ascii_case("us-ascii")
}

#[cfg(feature = "encodings")]
fn decode_extended(bytes: &[u8], label: &str) -> Result<String> {
    let encoding = encoding_rs::Encoding::for_label(label.as_bytes())
        .ok_or_else(|| StreamError::Encoding(format!("unknown encoding: {label}")))?;
    let (text, had_errors) = encoding.decode_without_bom_handling(bytes);
    if had_errors {
        return Err(StreamError::Encoding(format!("malformed {label} input")));
    }
    Ok(text.into_owned())
}

#[cfg(not(feature = "encodings"))]
fn decode_extended(_bytes: &[u8], label: &str) -> Result<String> {
    Err(StreamError::Encoding(format!(
        "unknown encoding: {label} (built without the encodings feature)"
    )))
}
