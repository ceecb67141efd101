//! Issuance defaults for a [`Factory`](crate::Factory)
//!
//! A factory stamps these claims on every token it issues. They are applied
//! before signing, so they are covered by the signature like any other claim.

use crate::error::{Error, Result};
use crate::token::Token;
use crate::utils::clock;

/// Configuration for token issuance
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FactoryConfig {
    issuer: Option<String>,
    subject: Option<String>,
    audience: Vec<String>,
    generate_jwt_id: bool,
    not_before_offset_secs: Option<i64>,
}

impl FactoryConfig {
    /// Create a new config with defaults (no extra claims)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the issuer (iss) of every issued token
    pub fn issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    /// Set the subject (sub) of every issued token
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Add an audience (aud) entry to every issued token
    pub fn audience(mut self, audience: impl Into<String>) -> Self {
        self.audience.push(audience.into());
        self
    }

    /// Give every issued token a random token ID (jti)
    pub fn generate_jwt_id(mut self) -> Self {
        self.generate_jwt_id = true;
        self
    }

    /// Make issued tokens active `seconds` after issuance (nbf)
    ///
    /// Zero yields `nbf == iat`.
    pub fn not_before_offset(mut self, seconds: i64) -> Self {
        self.not_before_offset_secs = Some(seconds);
        self
    }

    /// Check the configuration for values that would produce malformed claims
    pub fn validate(&self) -> Result<()> {
        if matches!(self.issuer.as_deref(), Some("")) {
            return Err(Error::ConfigurationInvalid(
                "issuer must not be empty".to_string(),
            ));
        }
        if matches!(self.subject.as_deref(), Some("")) {
            return Err(Error::ConfigurationInvalid(
                "subject must not be empty".to_string(),
            ));
        }
        if self.audience.iter().any(String::is_empty) {
            return Err(Error::ConfigurationInvalid(
                "audience entries must not be empty".to_string(),
            ));
        }
        if matches!(self.not_before_offset_secs, Some(offset) if offset < 0) {
            return Err(Error::ConfigurationInvalid(
                "not-before offset must not be negative".to_string(),
            ));
        }
        Ok(())
    }

    /// Stamp the configured claims onto an unsigned token
    pub(crate) fn apply(&self, token: &mut Token) -> Result<()> {
        if let Some(issuer) = &self.issuer {
            token.set_issuer(issuer.as_str());
        }
        if let Some(subject) = &self.subject {
            token.set_subject(subject.as_str());
        }
        if !self.audience.is_empty() {
            token.set_audience(self.audience.iter().map(String::as_str));
        }
        if self.generate_jwt_id {
            token.set_jwt_id(uuid::Uuid::new_v4().to_string());
        }
        if let Some(offset) = self.not_before_offset_secs {
            let issued_at = token.issued_at().unwrap_or_default();
            token.set_not_before(clock::offset(issued_at, offset)?);
        }
        Ok(())
    }
}
