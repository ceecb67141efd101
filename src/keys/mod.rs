//! Key material for MAC signers
//!
//! Secrets are copied on construction, so the caller may reuse or wipe its own
//! buffer, and the copy is zeroed when the key is dropped.

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Symmetric secret for HMAC signers
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretKey {
    secret: Vec<u8>,
}

impl SecretKey {
    /// Create a new secret key, taking ownership of the bytes
    pub fn new(secret: Vec<u8>) -> Self {
        Self { secret }
    }

    /// Get the secret bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.secret
    }

    /// Length of the secret in bytes
    pub fn len(&self) -> usize {
        self.secret.len()
    }

    /// Whether the secret is empty
    pub fn is_empty(&self) -> bool {
        self.secret.is_empty()
    }
}

impl std::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretKey")
            .field("len", &self.secret.len())
            .finish_non_exhaustive()
    }
}

impl From<Vec<u8>> for SecretKey {
    fn from(secret: Vec<u8>) -> Self {
        Self::new(secret)
    }
}

impl From<&[u8]> for SecretKey {
    fn from(secret: &[u8]) -> Self {
        Self::new(secret.to_vec())
    }
}

impl<const N: usize> From<&[u8; N]> for SecretKey {
    fn from(secret: &[u8; N]) -> Self {
        Self::new(secret.to_vec())
    }
}

impl From<String> for SecretKey {
    fn from(secret: String) -> Self {
        Self::new(secret.into_bytes())
    }
}

impl From<&str> for SecretKey {
    fn from(secret: &str) -> Self {
        Self::new(secret.as_bytes().to_vec())
    }
}
