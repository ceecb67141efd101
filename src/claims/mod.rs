//! Access to the application scope carried in a token
//!
//! The scope is an opaque JSON value, Base64URL encoded into the payload's
//! `scope` field. It is only handed out once the token is valid: verified by
//! a factory, issued in the past, unexpired and active.

use crate::error::{Error, Result};
use crate::limits::MAX_DECODED_SCOPE_SIZE;
use crate::token::Token;
use crate::utils::base64url;

use serde::de::DeserializeOwned;

impl Token {
    /// Deserialize the application scope
    ///
    /// # Errors
    /// * [`Error::Invalid`] - the token is not valid (see [`Token::is_valid`])
    /// * [`Error::MissingScope`] - the token carries no scope
    /// * [`Error::InvalidBase64`] / [`Error::InvalidJson`] - the scope does
    ///   not decode into `T`
    ///
    /// # Example
    /// ```ignore
    /// #[derive(serde::Deserialize)]
    /// struct Roles { admin: bool }
    ///
    /// let roles: Roles = token.scope()?;
    /// ```
    pub fn scope<T: DeserializeOwned>(&self) -> Result<T> {
        self.decode_scope(Error::MissingScope)
    }

    /// Deserialize the application claim
    ///
    /// Same as [`Token::scope`], but reports an absent value as
    /// [`Error::MissingClaim`].
    pub fn claim<T: DeserializeOwned>(&self) -> Result<T> {
        self.decode_scope(Error::MissingClaim)
    }

    /// Whether the payload carries a scope
    ///
    /// The scope may still be unreadable if the token is not valid.
    pub fn has_scope(&self) -> bool {
        !self.payload().scope.is_empty()
    }

    /// Whether the payload carries a claim; alias of [`Token::has_scope`]
    pub fn has_claim(&self) -> bool {
        self.has_scope()
    }

    fn decode_scope<T: DeserializeOwned>(&self, missing: Error) -> Result<T> {
        if !self.is_valid() {
            return Err(Error::Invalid);
        }

        let scope = &self.payload().scope;
        if scope.is_empty() {
            return Err(missing);
        }

        let json = base64url::decode_bytes(scope, MAX_DECODED_SCOPE_SIZE)?;
        Ok(serde_json::from_slice(&json)?)
    }
}

#[cfg(test)]
mod tests {
    use crate::algorithm::hmac::HS256;
    use crate::error::Error;
    use crate::factory::Factory;
    use crate::token::Token;

    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Roles {
        user: String,
        admin: bool,
    }

    fn factory() -> Factory {
        Factory::new("key-1", HS256::new(b"claims-secret"))
    }

    #[test]
    fn test_scope_round_trip() {
        let roles = Roles {
            user: "alice".to_string(),
            admin: true,
        };
        let token = factory().token(3600, Some(&roles)).unwrap();

        assert!(token.has_scope());
        assert!(token.has_claim());
        assert_eq!(token.scope::<Roles>().unwrap(), roles);
        assert_eq!(token.claim::<Roles>().unwrap(), roles);
    }

    #[test]
    fn test_missing_scope() {
        let token = factory().token(3600, None::<&()>).unwrap();

        assert!(!token.has_scope());
        assert!(matches!(token.scope::<Roles>(), Err(Error::MissingScope)));
        assert!(matches!(token.claim::<Roles>(), Err(Error::MissingClaim)));
    }

    #[test]
    fn test_scope_requires_valid_token() {
        let token = Token::new(3600, Some(&true)).unwrap();
        assert!(matches!(token.scope::<bool>(), Err(Error::Invalid)));

        let expired = factory().token(-1, Some(&true)).unwrap();
        assert!(matches!(expired.scope::<bool>(), Err(Error::Invalid)));
    }

    #[test]
    fn test_scope_wrong_type() {
        let token = factory().token(3600, Some(&"not roles")).unwrap();
        assert!(matches!(
            token.scope::<Roles>(),
            Err(Error::InvalidJson(_))
        ));
    }
}
