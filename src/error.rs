//! Errors for mactoken
//!
//! A flat taxonomy: structural errors (shape, Base64URL, JSON), factory
//! misconfiguration, signature mismatch, and the semantic "not valid" versus
//! "missing data" errors raised by the scope accessors. None of them are
//! retryable with the same input.

use thiserror::Error;

/// mactoken errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Token too large: {size} bytes (maximum: {max} bytes)")]
    TokenTooLarge { size: usize, max: usize },

    // ============================================================================
    // Format Errors
    // ============================================================================
    #[error("Bad token: expected three non-empty parts separated by '.'")]
    BadToken,

    #[error("Base64URL decoding failed: {0}")]
    InvalidBase64(String),

    #[error("JSON processing failed: {0}")]
    InvalidJson(String),

    // ============================================================================
    // Algorithm Errors
    // ============================================================================
    #[error("Algorithm '{0}' is not supported")]
    AlgorithmUnsupported(String),

    #[error("The 'none' algorithm is rejected for security reasons (RFC 8725)")]
    AlgorithmNoneRejected,

    #[error("Signing failed: {0}")]
    SigningFailed(String),

    // ============================================================================
    // Factory Errors
    // ============================================================================
    #[error("Bad factory: a key id and a signer are required")]
    BadFactory,

    #[error("Invalid configuration: {0}")]
    ConfigurationInvalid(String),

    // ============================================================================
    // Token Errors
    // ============================================================================
    /// Signature mismatch. Corrupted and forged tokens are not told apart.
    #[error("Unauthorized")]
    Unauthorized,

    /// The token was consulted before it was verified and current.
    #[error("Invalid token")]
    Invalid,

    #[error("Missing scope")]
    MissingScope,

    #[error("Missing claim")]
    MissingClaim,

    #[error("Integer overflow in timestamp arithmetic")]
    TimestampOverflow,
}

impl From<base64::DecodeError> for Error {
    fn from(err: base64::DecodeError) -> Self {
        Error::InvalidBase64(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::InvalidJson(err.to_string())
    }
}

/// Result type alias for mactoken operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_error_conversion() {
        let err = serde_json::from_str::<u32>("not json").unwrap_err();
        assert!(matches!(Error::from(err), Error::InvalidJson(_)));
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(Error::Unauthorized.to_string(), "Unauthorized");
        assert_eq!(
            Error::TokenTooLarge { size: 10, max: 5 }.to_string(),
            "Token too large: 10 bytes (maximum: 5 bytes)"
        );
    }
}
