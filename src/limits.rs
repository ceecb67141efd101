//! Size limit constants for input validation

/// Maximum length for a wire token string (64KB)
pub(crate) const MAX_TOKEN_LENGTH: usize = 64 * 1024;

/// Maximum size for decoded header JSON (8KB)
/// Headers carry a handful of short fields, so this leaves a wide margin
pub(crate) const MAX_DECODED_HEADER_SIZE: usize = 8 * 1024;

/// Maximum size for decoded payload JSON (64KB)
pub(crate) const MAX_DECODED_PAYLOAD_SIZE: usize = 64 * 1024;

/// Maximum size for a decoded scope value (48KB)
/// The scope is nested inside the payload, so it can never exceed it
pub(crate) const MAX_DECODED_SCOPE_SIZE: usize = 48 * 1024;

/// Maximum length for algorithm (alg) names (16 bytes)
pub(crate) const MAX_ALG_LENGTH: usize = 16;

/// Maximum size for a decoded signature (512 bytes)
/// Far above any MAC output; anything larger is rejected before comparison
pub(crate) const MAX_DECODED_SIGNATURE_SIZE: usize = 512;
