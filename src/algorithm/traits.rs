use crate::error::Result;

/// Message authentication capability used to sign and verify tokens
///
/// Implementations must be deterministic: two signers holding the same key
/// for the same algorithm return identical output for identical input. Key
/// material is read-only after construction, so a signer can be shared
/// across threads and called concurrently.
pub trait Signer: Send + Sync {
    /// The algorithm name placed in the token header (e.g., "HS256")
    fn algorithm(&self) -> &str;

    /// Compute the MAC over `message`
    ///
    /// # Arguments
    /// * `message` - The signing input (`encoded_header.encoded_payload`)
    fn sign(&self, message: &[u8]) -> Result<Vec<u8>>;
}

/// Shared, type-erased signer held by a factory
pub type SharedSigner = std::sync::Arc<dyn Signer>;
