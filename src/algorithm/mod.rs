mod traits;

pub mod hmac;

pub use traits::{SharedSigner, Signer};

use crate::error::{Error, Result};
use crate::limits::MAX_ALG_LENGTH;

/// Algorithm identifier for the `alg` header field
///
/// Only MAC algorithms ship with the crate. Other algorithms plug in as new
/// [`Signer`] implementations and name themselves freely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlgorithmId {
    /// HMAC with SHA-256
    HS256,

    /// HMAC with SHA-384
    HS384,

    /// HMAC with SHA-512
    HS512,
}

impl AlgorithmId {
    /// Parse algorithm string from a token header
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self> {
        screen_name(s)?;

        match s {
            "HS256" => Ok(AlgorithmId::HS256),
            "HS384" => Ok(AlgorithmId::HS384),
            "HS512" => Ok(AlgorithmId::HS512),
            _ => Err(Error::AlgorithmUnsupported(s.to_string())),
        }
    }

    /// Convert to string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            AlgorithmId::HS256 => "HS256",
            AlgorithmId::HS384 => "HS384",
            AlgorithmId::HS512 => "HS512",
        }
    }
}

/// Reject names no signer may carry, built-in or custom: overlong names and `none`
pub(crate) fn screen_name(name: &str) -> Result<()> {
    if name.len() > MAX_ALG_LENGTH {
        return Err(Error::AlgorithmUnsupported(format!(
            "Algorithm string too long: {} bytes (maximum: {} bytes)",
            name.len(),
            MAX_ALG_LENGTH
        )));
    }
    if name == "none" {
        return Err(Error::AlgorithmNoneRejected);
    }
    Ok(())
}

impl std::fmt::Display for AlgorithmId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl AsRef<str> for AlgorithmId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_algorithm_from_str() {
        assert_eq!(AlgorithmId::from_str("HS256").unwrap(), AlgorithmId::HS256);
        assert_eq!(AlgorithmId::from_str("HS384").unwrap(), AlgorithmId::HS384);
        assert_eq!(AlgorithmId::from_str("HS512").unwrap(), AlgorithmId::HS512);

        assert!(matches!(
            AlgorithmId::from_str("none"),
            Err(Error::AlgorithmNoneRejected)
        ));
        assert!(matches!(
            AlgorithmId::from_str("None"),
            Err(Error::AlgorithmUnsupported(_))
        ));
        assert!(matches!(
            AlgorithmId::from_str("hs256"),
            Err(Error::AlgorithmUnsupported(_))
        ));
        assert!(matches!(
            AlgorithmId::from_str(&"H".repeat(64)),
            Err(Error::AlgorithmUnsupported(_))
        ));
    }

    #[test]
    fn test_screen_name() {
        assert!(screen_name("HS256").is_ok());
        assert!(screen_name("X-SHA256").is_ok());
        assert!(screen_name("").is_ok());

        assert!(matches!(
            screen_name("none"),
            Err(Error::AlgorithmNoneRejected)
        ));
        assert!(matches!(
            screen_name(&"A".repeat(MAX_ALG_LENGTH + 1)),
            Err(Error::AlgorithmUnsupported(_))
        ));
    }

    #[test]
    fn test_algorithm_display() {
        assert_eq!(AlgorithmId::HS512.to_string(), "HS512");
        assert_eq!(AlgorithmId::HS384.as_ref(), "HS384");
    }
}
