//! Base64URL encoding/decoding per RFC 4648
//!
//! Unpadded, URL-safe alphabet. Thin wrapper around the `base64` crate that
//! bounds the decoded size before anything downstream touches the bytes.

use crate::error::{Error, Result};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

/// Encode bytes to Base64URL string
pub fn encode_bytes(input: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(input)
}

/// Encode string to Base64URL
pub fn encode(input: &str) -> String {
    encode_bytes(input.as_bytes())
}

/// Decode Base64URL string to bytes with maximum size limit
pub fn decode_bytes(input: &str, max_size: usize) -> Result<Vec<u8>> {
    // Base64URL decodes 4 chars to 3 bytes; reject oversized input up front
    let upper_bound = input.len() / 4 * 3 + 3;
    if upper_bound > max_size.saturating_add(3) {
        return Err(Error::InvalidBase64(format!(
            "Encoded size exceeds limit: {} characters (max decoded: {} bytes)",
            input.len(),
            max_size
        )));
    }

    let result = URL_SAFE_NO_PAD.decode(input)?;

    if result.len() > max_size {
        return Err(Error::InvalidBase64(format!(
            "Decoded size exceeds limit: {} bytes (max: {})",
            result.len(),
            max_size
        )));
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_bytes() {
        assert_eq!(encode_bytes(b""), "");
        assert_eq!(encode_bytes(b"f"), "Zg");
        assert_eq!(encode_bytes(b"fo"), "Zm8");
        assert_eq!(encode_bytes(b"foo"), "Zm9v");
        assert_eq!(encode_bytes(b"foob"), "Zm9vYg");
        assert_eq!(encode_bytes(b"foobar"), "Zm9vYmFy");
    }

    #[test]
    fn test_decode_valid() {
        let result = decode_bytes("SGVsbG8", 1000).unwrap();
        assert_eq!(result, b"Hello");
    }

    #[test]
    fn test_decode_invalid() {
        assert!(matches!(
            decode_bytes("!!!", 1000),
            Err(Error::InvalidBase64(_))
        ));
        // Padded standard Base64 is not accepted
        assert!(decode_bytes("SGVsbG8=", 1000).is_err());
    }

    #[test]
    fn test_decode_with_limit() {
        assert_eq!(decode_bytes("SGVsbG8", 5).unwrap(), b"Hello");
        assert!(decode_bytes("SGVsbG8", 3).is_err());
        assert!(decode_bytes(&"A".repeat(4096), 16).is_err());
    }

    #[test]
    fn test_url_safe_characters() {
        let encoded = encode_bytes(&[0xfb, 0xff]);
        assert!(encoded.contains('-') || encoded.contains('_'));
        assert!(!encoded.contains('+'));
        assert!(!encoded.contains('/'));
        assert!(!encoded.contains('='));
    }
}
