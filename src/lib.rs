//! # mactoken - Compact, MAC-Signed Credential Tokens
//!
//! > Issue and verify self-contained tokens in the JWT wire format.
//!
//! **mactoken** issues short-lived credentials that carry their own expiry and an
//! opaque, application-defined scope, bound together by a message
//! authentication code. A [`Factory`] holds one key id and one [`Signer`]; it
//! issues tokens and checks the ones presented back to it.
//!
//! ## Quick Start
//!
//! ```ignore
//! use mactoken::*;
//!
//! let factory = Factory::new("2024-01", HS256::new(b"your-256-bit-secret"));
//!
//! // Issue
//! let token = factory.token(3600, Some(&vec!["orders:read"]))?;
//! let wire = token.to_string();
//!
//! // Verify
//! let mut presented = Token::decode(&wire)?;
//! factory.validate(&mut presented)?;
//! if presented.is_valid() {
//!     let scopes: Vec<String> = presented.scope()?;
//! }
//! ```
//!
//! ## Wire Format
//!
//! ```text
//! base64url(header_json) . base64url(payload_json) . base64url(mac)
//! ```
//!
//! No padding. The header carries `ver`, `alg`, `typ`, `kid` and `cty`; the
//! payload carries `iss`, `sub`, `aud`, `exp`, `nbf`, `iat`, `jti` and the
//! Base64URL-encoded JSON `scope`. Empty fields are omitted.
//!
//! ## Token Lifecycle
//!
//! ```text
//! Token::new / Factory::token        Token::decode
//!        │ (constructed)                   │ (decoded, unverified)
//!        ▼                                 ▼
//!   Factory::sign ──────────────► Factory::validate
//!                   verified
//!        │ any setter
//!        ▼
//!   unverified again
//! ```
//!
//! Signing and validation always operate on the cached encoded header and
//! payload, never on a re-serialization of the parsed fields, so a verifier
//! checks exactly the bytes a signer signed. A token becomes *valid* when it is
//! verified, issued in the past, not expired and past its not-before time.
//! A token without an expiration is never valid.
//!
//! ## Security
//!
//! - Signatures are compared in constant time via
//!   [`constant_time_eq`](https://crates.io/crates/constant_time_eq).
//! - A factory only accepts tokens whose `alg` names its own signer; the header
//!   never selects an algorithm.
//! - A signature mismatch is always [`Error::Unauthorized`], whether the token
//!   was corrupted or forged.
//! - Secrets are copied on construction and zeroed on drop.
//!
//! ## Logging
//!
//! The crate emits `tracing` events at `debug` and `trace` level (rejections,
//! signing) and never installs a subscriber. Events carry key ids and algorithm
//! names only.

// Core modules
pub mod error;
mod limits;
pub mod utils;

// Signing
pub mod algorithm;
pub mod keys;

// Token model and scope access
mod claims;
pub mod token;

// Issuance and validation
pub mod config;
pub mod factory;

// ============================================================================
// PUBLIC API
// ============================================================================

pub use algorithm::hmac::{HS256, HS384, HS512};
pub use algorithm::{AlgorithmId, SharedSigner, Signer};
pub use config::FactoryConfig;
pub use error::{Error, Result};
pub use factory::Factory;
pub use keys::SecretKey;
pub use token::{Token, TokenHeader};
