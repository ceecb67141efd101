use crate::algorithm::{AlgorithmId, Signer};
use crate::error::{Error, Result};
use crate::keys::SecretKey;

use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha384, Sha512};

/// HS256 signer (HMAC with SHA-256)
#[derive(Debug, Clone)]
pub struct HS256 {
    key: SecretKey,
}

/// HS384 signer (HMAC with SHA-384)
#[derive(Debug, Clone)]
pub struct HS384 {
    key: SecretKey,
}

/// HS512 signer (HMAC with SHA-512)
#[derive(Debug, Clone)]
pub struct HS512 {
    key: SecretKey,
}

impl HS256 {
    /// Create a signer from a secret; the bytes are copied
    pub fn new(secret: impl Into<SecretKey>) -> Self {
        Self { key: secret.into() }
    }
}

impl HS384 {
    /// Create a signer from a secret; the bytes are copied
    pub fn new(secret: impl Into<SecretKey>) -> Self {
        Self { key: secret.into() }
    }
}

impl HS512 {
    /// Create a signer from a secret; the bytes are copied
    pub fn new(secret: impl Into<SecretKey>) -> Self {
        Self { key: secret.into() }
    }
}

impl Signer for HS256 {
    fn algorithm(&self) -> &str {
        AlgorithmId::HS256.as_str()
    }

    fn sign(&self, message: &[u8]) -> Result<Vec<u8>> {
        mac::<Hmac<Sha256>>(self.key.as_bytes(), message)
    }
}

impl Signer for HS384 {
    fn algorithm(&self) -> &str {
        AlgorithmId::HS384.as_str()
    }

    fn sign(&self, message: &[u8]) -> Result<Vec<u8>> {
        mac::<Hmac<Sha384>>(self.key.as_bytes(), message)
    }
}

impl Signer for HS512 {
    fn algorithm(&self) -> &str {
        AlgorithmId::HS512.as_str()
    }

    fn sign(&self, message: &[u8]) -> Result<Vec<u8>> {
        mac::<Hmac<Sha512>>(self.key.as_bytes(), message)
    }
}

/// Build a signer for an HMAC algorithm identifier
pub fn signer_for(algorithm: &AlgorithmId, secret: impl Into<SecretKey>) -> Box<dyn Signer> {
    match algorithm {
        AlgorithmId::HS256 => Box::new(HS256::new(secret)),
        AlgorithmId::HS384 => Box::new(HS384::new(secret)),
        AlgorithmId::HS512 => Box::new(HS512::new(secret)),
    }
}

fn mac<M: Mac + hmac::digest::KeyInit>(secret: &[u8], message: &[u8]) -> Result<Vec<u8>> {
    let mut mac = <M as Mac>::new_from_slice(secret)
        .map_err(|e| Error::SigningFailed(format!("HMAC key rejected: {e}")))?;
    mac.update(message);
    Ok(mac.finalize().into_bytes().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::base64url;

    const SIGNING_INPUT: &str = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.eyJzdWIiOiIxMjM0NTY3ODkwIn0";

    #[test]
    fn test_hs256_known_vector() {
        // RFC 4231 test case 2
        let signer = HS256::new("Jefe");
        let mac = signer.sign(b"what do ya want for nothing?").unwrap();
        let hex: String = mac.iter().map(|b| format!("{b:02x}")).collect();
        assert_eq!(
            hex,
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }

    #[test]
    fn test_hs256_deterministic() {
        let a = HS256::new(b"your-256-bit-secret");
        let b = HS256::new(b"your-256-bit-secret".to_vec());

        assert_eq!(
            a.sign(SIGNING_INPUT.as_bytes()).unwrap(),
            b.sign(SIGNING_INPUT.as_bytes()).unwrap()
        );
    }

    #[test]
    fn test_hs256_wrong_secret_differs() {
        let a = HS256::new(b"your-256-bit-secret");
        let b = HS256::new(b"wrong-secret");

        assert_ne!(
            a.sign(SIGNING_INPUT.as_bytes()).unwrap(),
            b.sign(SIGNING_INPUT.as_bytes()).unwrap()
        );
    }

    #[test]
    fn test_digest_lengths() {
        let secret = b"your-512-bit-secret-needs-to-be-even-longer-than-384-bit";
        assert_eq!(HS256::new(secret).sign(b"m").unwrap().len(), 32);
        assert_eq!(HS384::new(secret).sign(b"m").unwrap().len(), 48);
        assert_eq!(HS512::new(secret).sign(b"m").unwrap().len(), 64);
    }

    #[test]
    fn test_algorithm_names() {
        assert_eq!(HS256::new("k").algorithm(), "HS256");
        assert_eq!(HS384::new("k").algorithm(), "HS384");
        assert_eq!(HS512::new("k").algorithm(), "HS512");
    }

    #[test]
    fn test_matches_raw_hmac() {
        let secret = b"secret";
        let mut mac = Hmac::<Sha256>::new_from_slice(secret).unwrap();
        mac.update(SIGNING_INPUT.as_bytes());
        let expected = base64url::encode_bytes(&mac.finalize().into_bytes());

        let signature = HS256::new(secret).sign(SIGNING_INPUT.as_bytes()).unwrap();
        assert_eq!(base64url::encode_bytes(&signature), expected);
    }

    #[test]
    fn test_signer_for() {
        let signer = signer_for(&AlgorithmId::HS384, "k");
        assert_eq!(signer.algorithm(), "HS384");
    }
}
