//! The `Token` data model
//!
//! A token is either *constructed* (built by [`Token::new`], unsigned, fields
//! mutable) or *decoded* (parsed from its wire form by [`Token::decode`],
//! signature present but unchecked). Only a [`Factory`](crate::Factory) can
//! move it into the verified state, and any mutation moves it back out.

use crate::error::{Error, Result};
use crate::limits::{MAX_DECODED_HEADER_SIZE, MAX_DECODED_PAYLOAD_SIZE, MAX_TOKEN_LENGTH};
use crate::token::header::non_empty;
use crate::token::{Payload, TokenHeader};
use crate::utils::{base64url, clock};

use serde::Serialize;
use std::time::SystemTime;

/// Whether the signature has been checked since the last change
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum Verification {
    #[default]
    Unverified,
    Verified,
}

/// A signed, self-contained credential
///
/// The wire form is `base64url(header).base64url(payload).base64url(signature)`.
/// The encoded header and payload are cached exactly as they were signed or
/// received, and signatures are always computed over those cached strings,
/// never over a re-serialization of the parsed fields.
///
/// # Examples
///
/// ```ignore
/// use mactoken::*;
///
/// let factory = Factory::new("key-1", HS256::new(b"secret"));
/// let token = factory.token(3600, Some(&vec!["read", "write"]))?;
///
/// let mut presented = Token::decode(&token.to_string())?;
/// factory.validate(&mut presented)?;
///
/// let scope: Vec<String> = presented.scope()?;
/// ```
#[derive(Debug, Clone)]
pub struct Token {
    header: TokenHeader,
    payload: Payload,
    header_b64: String,
    payload_b64: String,
    signature_b64: String,
    state: Verification,
}

impl Token {
    /// Build an unsigned token
    ///
    /// The caller must sign it with a [`Factory`](crate::Factory) before use.
    ///
    /// # Arguments
    /// * `ttl_secs` - Time-to-live in seconds. Zero or negative values are
    ///   accepted and produce a token that is already expired.
    /// * `scope` - Optional private payload for the application. It is
    ///   serialized to JSON, then Base64URL encoded.
    pub fn new<S>(ttl_secs: i64, scope: Option<&S>) -> Result<Self>
    where
        S: Serialize + ?Sized,
    {
        Self::new_at(SystemTime::now(), ttl_secs, scope)
    }

    pub(crate) fn new_at<S>(now: SystemTime, ttl_secs: i64, scope: Option<&S>) -> Result<Self>
    where
        S: Serialize + ?Sized,
    {
        let issued_at = clock::unix_seconds(now);
        let expiration = clock::offset(issued_at, ttl_secs)?;

        let mut payload = Payload {
            issued_at,
            expiration,
            ..Payload::default()
        };
        if let Some(scope) = scope {
            payload.scope = encode_scope(scope)?;
        }

        Ok(Self {
            header: TokenHeader::unsigned(),
            payload,
            header_b64: String::new(),
            payload_b64: String::new(),
            signature_b64: String::new(),
            state: Verification::Unverified,
        })
    }

    /// Parse a token from its wire form
    ///
    /// The result is unverified; pass it to
    /// [`Factory::validate`](crate::Factory::validate) before trusting it.
    ///
    /// # Errors
    /// * [`Error::TokenTooLarge`] - the string exceeds 64KB
    /// * [`Error::BadToken`] - not exactly three non-empty `.`-separated parts
    /// * [`Error::InvalidBase64`] / [`Error::InvalidJson`] - a header or
    ///   payload segment does not decode
    pub fn decode(wire: &str) -> Result<Self> {
        if wire.len() > MAX_TOKEN_LENGTH {
            return Err(Error::TokenTooLarge {
                size: wire.len(),
                max: MAX_TOKEN_LENGTH,
            });
        }

        let mut parts = wire.split('.');
        let (Some(header_b64), Some(payload_b64), Some(signature_b64), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(Error::BadToken);
        };
        if header_b64.is_empty() || payload_b64.is_empty() || signature_b64.is_empty() {
            return Err(Error::BadToken);
        }

        let header: TokenHeader = serde_json::from_slice(&base64url::decode_bytes(
            header_b64,
            MAX_DECODED_HEADER_SIZE,
        )?)?;
        let payload: Payload = serde_json::from_slice(&base64url::decode_bytes(
            payload_b64,
            MAX_DECODED_PAYLOAD_SIZE,
        )?)?;

        Ok(Self {
            header,
            payload,
            header_b64: header_b64.to_string(),
            payload_b64: payload_b64.to_string(),
            signature_b64: signature_b64.to_string(),
            state: Verification::Unverified,
        })
    }

    /// Whether the token is verified, issued in the past, unexpired and
    /// active, judged against the system clock
    pub fn is_valid(&self) -> bool {
        self.is_valid_at(SystemTime::now())
    }

    /// Whether the token is verified, issued before `now`, unexpired at `now`
    /// and active at `now`
    ///
    /// A token without an expiration is never valid.
    pub fn is_valid_at(&self, now: SystemTime) -> bool {
        if !self.is_verified() {
            return false;
        }

        let payload = &self.payload;
        if payload.issued_at == 0 || payload.expiration == 0 {
            return false;
        }

        let (Some(issued_at), Some(expiration)) = (
            clock::from_unix_seconds(payload.issued_at),
            clock::from_unix_seconds(payload.expiration),
        ) else {
            return false;
        };
        if now <= issued_at || expiration <= now {
            return false;
        }

        if payload.not_before != 0 {
            match clock::from_unix_seconds(payload.not_before) {
                Some(not_before) if now >= not_before => {}
                _ => return false,
            }
        }

        true
    }

    /// Whether the signature was checked and nothing changed since
    ///
    /// This says nothing about the temporal claims; use [`Token::is_valid`].
    pub fn is_verified(&self) -> bool {
        self.state == Verification::Verified
    }

    /// Get the token header
    pub fn header(&self) -> &TokenHeader {
        &self.header
    }

    /// Get the algorithm named in the header
    pub fn algorithm(&self) -> &str {
        self.header.algorithm()
    }

    /// Get the key ID named in the header
    pub fn key_id(&self) -> Option<&str> {
        self.header.key_id()
    }

    /// Get the issuer (iss claim)
    pub fn issuer(&self) -> Option<&str> {
        non_empty(&self.payload.issuer)
    }

    /// Get the subject (sub claim)
    pub fn subject(&self) -> Option<&str> {
        non_empty(&self.payload.subject)
    }

    /// Get the audience (aud claim)
    pub fn audience(&self) -> &[String] {
        &self.payload.audience
    }

    /// Get the expiration time (exp claim) as Unix timestamp
    pub fn expiration(&self) -> Option<i64> {
        non_zero(self.payload.expiration)
    }

    /// Get the not-before time (nbf claim) as Unix timestamp
    pub fn not_before(&self) -> Option<i64> {
        non_zero(self.payload.not_before)
    }

    /// Get the issued-at time (iat claim) as Unix timestamp
    pub fn issued_at(&self) -> Option<i64> {
        non_zero(self.payload.issued_at)
    }

    /// Get the token ID (jti claim)
    pub fn jwt_id(&self) -> Option<&str> {
        non_empty(&self.payload.jwt_id)
    }

    // ------------------------------------------------------------------------
    // Mutation. Every setter drops the cached encodings and the verified
    // state; the token must be signed again before it means anything.
    // ------------------------------------------------------------------------

    /// Set the issuer (iss claim)
    pub fn set_issuer(&mut self, issuer: impl Into<String>) -> &mut Self {
        self.payload.issuer = issuer.into();
        self.invalidate()
    }

    /// Set the subject (sub claim)
    pub fn set_subject(&mut self, subject: impl Into<String>) -> &mut Self {
        self.payload.subject = subject.into();
        self.invalidate()
    }

    /// Replace the audience (aud claim)
    pub fn set_audience<I, A>(&mut self, audience: I) -> &mut Self
    where
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        self.payload.audience = audience.into_iter().map(Into::into).collect();
        self.invalidate()
    }

    /// Set the expiration time (exp claim); zero makes the token never valid
    pub fn set_expiration(&mut self, expiration: i64) -> &mut Self {
        self.payload.expiration = expiration;
        self.invalidate()
    }

    /// Set the not-before time (nbf claim); zero clears it
    pub fn set_not_before(&mut self, not_before: i64) -> &mut Self {
        self.payload.not_before = not_before;
        self.invalidate()
    }

    /// Set the issued-at time (iat claim)
    pub fn set_issued_at(&mut self, issued_at: i64) -> &mut Self {
        self.payload.issued_at = issued_at;
        self.invalidate()
    }

    /// Set the token ID (jti claim)
    pub fn set_jwt_id(&mut self, jwt_id: impl Into<String>) -> &mut Self {
        self.payload.jwt_id = jwt_id.into();
        self.invalidate()
    }

    /// Set the content type (cty header)
    pub fn set_content_type(&mut self, content_type: impl Into<String>) -> &mut Self {
        self.header.content_type = content_type.into();
        self.invalidate()
    }

    /// Replace the application scope; `None` removes it
    pub fn set_scope<S>(&mut self, scope: Option<&S>) -> Result<&mut Self>
    where
        S: Serialize + ?Sized,
    {
        self.payload.scope = match scope {
            Some(scope) => encode_scope(scope)?,
            None => String::new(),
        };
        Ok(self.invalidate())
    }

    fn invalidate(&mut self) -> &mut Self {
        self.state = Verification::Unverified;
        self.header_b64.clear();
        self.payload_b64.clear();
        self.signature_b64.clear();
        self
    }

    // ------------------------------------------------------------------------
    // Factory access
    // ------------------------------------------------------------------------

    pub(crate) fn header_mut(&mut self) -> &mut TokenHeader {
        &mut self.header
    }

    pub(crate) fn payload(&self) -> &Payload {
        &self.payload
    }

    #[cfg(test)]
    pub(crate) fn payload_mut(&mut self) -> &mut Payload {
        &mut self.payload
    }

    pub(crate) fn reset_verification(&mut self) {
        self.state = Verification::Unverified;
    }

    pub(crate) fn mark_verified(&mut self) {
        self.state = Verification::Verified;
    }

    pub(crate) fn set_encoded_header(&mut self, header_b64: String) {
        self.header_b64 = header_b64;
    }

    pub(crate) fn set_encoded_payload(&mut self, payload_b64: String) {
        self.payload_b64 = payload_b64;
    }

    pub(crate) fn set_encoded_signature(&mut self, signature_b64: String) {
        self.signature_b64 = signature_b64;
    }

    /// Get the signing input (header.payload) from the cached encodings
    pub(crate) fn signing_input(&self) -> String {
        format!("{}.{}", self.header_b64, self.payload_b64)
    }

    /// Get the encoded signature
    pub(crate) fn signature(&self) -> &str {
        &self.signature_b64
    }
}

/// Wire form. Before the token is signed or decoded this is an incomplete
/// string such as `".."`.
impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}.{}.{}",
            self.header_b64, self.payload_b64, self.signature_b64
        )
    }
}

impl std::str::FromStr for Token {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Token::decode(s)
    }
}

fn encode_scope<S>(scope: &S) -> Result<String>
where
    S: Serialize + ?Sized,
{
    let json = serde_json::to_vec(scope)?;
    Ok(base64url::encode_bytes(&json))
}

fn non_zero(value: i64) -> Option<i64> {
    (value != 0).then_some(value)
}
