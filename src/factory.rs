//! Token factory: issuance and validation
//!
//! A factory binds one key identifier to one [`Signer`]. It is immutable after
//! construction and cheap to build, so rotating keys means building a new
//! factory. Factories are `Send + Sync` and can issue and validate tokens from
//! many threads at once.
//!
//! Signatures are always computed over the token's cached
//! `encoded_header.encoded_payload` string. Validation never re-serializes the
//! parsed fields, so a token is checked against exactly the bytes that were
//! signed.

use crate::algorithm::{self, hmac::signer_for, AlgorithmId, SharedSigner, Signer};
use crate::config::FactoryConfig;
use crate::error::{Error, Result};
use crate::keys::SecretKey;
use crate::limits::{
    MAX_DECODED_HEADER_SIZE, MAX_DECODED_PAYLOAD_SIZE, MAX_DECODED_SIGNATURE_SIZE,
    MAX_TOKEN_LENGTH,
};
use crate::token::Token;
use crate::utils::base64url;

use constant_time_eq::constant_time_eq;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, trace};

/// Issuer and verifier bound to one key id and one signer
#[derive(Clone)]
pub struct Factory {
    kid: String,
    signer: SharedSigner,
    config: FactoryConfig,
}

impl Factory {
    /// Create a factory with default issuance settings
    ///
    /// An empty key id is accepted here but every operation on the factory
    /// then fails with [`Error::BadFactory`].
    ///
    /// # Example
    /// ```ignore
    /// let factory = Factory::new("2024-01", HS256::new(secret));
    /// ```
    pub fn new(kid: impl Into<String>, signer: impl Signer + 'static) -> Self {
        Self::from_shared(kid, Arc::new(signer))
    }

    /// Create a factory around a signer that is already shared
    pub fn from_shared(kid: impl Into<String>, signer: SharedSigner) -> Self {
        Self {
            kid: kid.into(),
            signer,
            config: FactoryConfig::default(),
        }
    }

    /// Create a factory with one of the built-in HMAC signers
    ///
    /// # Example
    /// ```ignore
    /// let alg = AlgorithmId::from_str(&settings.algorithm)?;
    /// let factory = Factory::with_algorithm("2024-01", alg, secret);
    /// ```
    pub fn with_algorithm(
        kid: impl Into<String>,
        algorithm: AlgorithmId,
        secret: impl Into<SecretKey>,
    ) -> Self {
        Self::from_shared(kid, SharedSigner::from(signer_for(&algorithm, secret)))
    }

    /// Create a factory that stamps `config` claims onto every issued token
    ///
    /// # Errors
    /// * [`Error::ConfigurationInvalid`] - see [`FactoryConfig::validate`]
    pub fn with_config(
        kid: impl Into<String>,
        signer: impl Signer + 'static,
        config: FactoryConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::new(kid, signer)
        })
    }

    /// Get the key id of this factory
    pub fn id(&self) -> &str {
        &self.kid
    }

    /// Get the algorithm name of the bound signer
    pub fn algorithm(&self) -> &str {
        self.signer.algorithm()
    }

    /// Get the issuance configuration
    pub fn config(&self) -> &FactoryConfig {
        &self.config
    }

    /// Issue a new, signed token
    ///
    /// # Arguments
    /// * `ttl_secs` - Time-to-live in seconds. Zero or negative values are
    ///   accepted and yield a token that is already expired.
    /// * `scope` - Optional private payload for the application. `None`
    ///   omits the scope field entirely.
    ///
    /// # Example
    /// ```ignore
    /// let token = factory.token(900, Some(&json!({"role": "admin"})))?;
    /// let unscoped = factory.token(900, None::<&()>)?;
    /// ```
    pub fn token<S>(&self, ttl_secs: i64, scope: Option<&S>) -> Result<Token>
    where
        S: Serialize + ?Sized,
    {
        self.ensure_complete()?;

        let mut token = Token::new(ttl_secs, scope)?;
        self.config.apply(&mut token)?;
        self.sign(&mut token)?;
        Ok(token)
    }

    /// Sign a token with the current header and payload values
    ///
    /// Overwrites the header's algorithm and key id with the factory's, then
    /// refreshes the cached encodings. Calling it again on an unchanged token
    /// yields an identical wire string. On error the token is left unverified
    /// and must not be trusted.
    ///
    /// # Errors
    /// * [`Error::BadFactory`] - the factory has no key id
    /// * [`Error::TokenTooLarge`] - the signed token would exceed the limits
    ///   [`Token::decode`] enforces, so it could never be presented back
    /// * [`Error::SigningFailed`] - the signer failed
    pub fn sign(&self, token: &mut Token) -> Result<()> {
        token.reset_verification();
        self.ensure_complete()?;

        let header = token.header_mut();
        header.algorithm = self.signer.algorithm().to_string();
        header.key_id = self.kid.clone();

        let header_json = serde_json::to_vec(token.header())?;
        ensure_fits(header_json.len(), MAX_DECODED_HEADER_SIZE)?;
        token.set_encoded_header(base64url::encode_bytes(&header_json));

        let payload_json = serde_json::to_vec(token.payload())?;
        ensure_fits(payload_json.len(), MAX_DECODED_PAYLOAD_SIZE)?;
        token.set_encoded_payload(base64url::encode_bytes(&payload_json));

        let signing_input = token.signing_input();
        let signature = base64url::encode_bytes(&self.signer.sign(signing_input.as_bytes())?);
        ensure_fits(signing_input.len() + 1 + signature.len(), MAX_TOKEN_LENGTH)?;
        token.set_encoded_signature(signature);

        token.mark_verified();
        trace!(kid = %self.kid, alg = self.signer.algorithm(), "token signed");
        Ok(())
    }

    /// Check a token's signature
    ///
    /// Recomputes the MAC over the token's cached encodings and compares it
    /// with the decoded presented one in constant time. Marks the token
    /// verified only on an exact match.
    ///
    /// # Errors
    /// * [`Error::BadFactory`] - the factory has no key id
    /// * [`Error::Unauthorized`] - the header names `none`, an overlong or a
    ///   different algorithm, or the signature does not decode or match
    pub fn validate(&self, token: &mut Token) -> Result<()> {
        token.reset_verification();
        self.ensure_complete()?;

        if let Err(err) = algorithm::screen_name(token.algorithm()) {
            debug!(kid = %self.kid, error = %err, "token algorithm rejected");
            return Err(Error::Unauthorized);
        }

        // The header's alg only ever selects this factory's own signer
        if token.algorithm() != self.signer.algorithm() {
            debug!(
                kid = %self.kid,
                expected = self.signer.algorithm(),
                found = token.algorithm(),
                "token algorithm does not match signer"
            );
            return Err(Error::Unauthorized);
        }

        let Ok(presented) = base64url::decode_bytes(token.signature(), MAX_DECODED_SIGNATURE_SIZE)
        else {
            debug!(kid = %self.kid, "token signature is not valid Base64URL");
            return Err(Error::Unauthorized);
        };
        let expected = self.signer.sign(token.signing_input().as_bytes())?;

        if presented.len() != expected.len() || !constant_time_eq(&expected, &presented) {
            debug!(kid = %self.kid, "token signature mismatch");
            return Err(Error::Unauthorized);
        }

        token.mark_verified();
        trace!(kid = %self.kid, "token signature verified");
        Ok(())
    }

    /// Decode a wire token and check its signature in one step
    ///
    /// The returned token is verified; callers still consult
    /// [`Token::is_valid`] for the temporal claims.
    pub fn verify(&self, wire: &str) -> Result<Token> {
        let mut token = Token::decode(wire).map_err(|err| {
            debug!(kid = %self.kid, error = %err, "token rejected while decoding");
            err
        })?;
        self.validate(&mut token)?;
        Ok(token)
    }

    fn ensure_complete(&self) -> Result<()> {
        let algorithm = self.signer.algorithm();
        if self.kid.is_empty() || algorithm.is_empty() || algorithm::screen_name(algorithm).is_err()
        {
            debug!("factory is missing a key id or its signer algorithm is unusable");
            return Err(Error::BadFactory);
        }
        Ok(())
    }
}

fn ensure_fits(size: usize, max: usize) -> Result<()> {
    if size > max {
        debug!(size, max, "signed token would exceed decode limits");
        return Err(Error::TokenTooLarge { size, max });
    }
    Ok(())
}

impl std::fmt::Debug for Factory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Factory")
            .field("kid", &self.kid)
            .field("algorithm", &self.signer.algorithm())
            .field("config", &self.config)
            .finish()
    }
}
