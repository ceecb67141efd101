use crate::algorithm::AlgorithmId;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Protocol version stamped on every token this crate issues
pub(crate) const PROTOCOL_VERSION: i64 = 1;

/// Token type tag stamped on every token this crate issues
pub(crate) const TOKEN_TYPE: &str = "JWT";

/// Token header structure
///
/// `alg` and `typ` are always serialized; the remaining fields are omitted
/// when empty. Missing fields decode to their empty value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenHeader {
    /// Protocol version
    #[serde(rename = "ver", skip_serializing_if = "is_zero")]
    pub(crate) version: i64,

    /// Algorithm used for signing
    #[serde(rename = "alg")]
    pub(crate) algorithm: String,

    /// Token type (always "JWT" when issued here)
    #[serde(rename = "typ")]
    pub(crate) token_type: String,

    /// Identifier of the key that signed the token
    #[serde(rename = "kid", skip_serializing_if = "String::is_empty")]
    pub(crate) key_id: String,

    /// Content type of the payload
    #[serde(rename = "cty", skip_serializing_if = "String::is_empty")]
    pub(crate) content_type: String,
}

impl TokenHeader {
    /// Header for a freshly constructed token; algorithm and key id are
    /// filled in at signing time
    pub(crate) fn unsigned() -> Self {
        Self {
            version: PROTOCOL_VERSION,
            token_type: TOKEN_TYPE.to_string(),
            ..Self::default()
        }
    }

    /// Parse algorithm from header
    pub fn parse_algorithm(&self) -> Result<AlgorithmId> {
        AlgorithmId::from_str(&self.algorithm)
    }

    /// Get algorithm as string
    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    /// Get the protocol version
    pub fn version(&self) -> i64 {
        self.version
    }

    /// Get the token type tag
    pub fn token_type(&self) -> &str {
        &self.token_type
    }

    /// Get key ID if present
    pub fn key_id(&self) -> Option<&str> {
        non_empty(&self.key_id)
    }

    /// Get content type if present
    pub fn content_type(&self) -> Option<&str> {
        non_empty(&self.content_type)
    }
}

fn is_zero(value: &i64) -> bool {
    *value == 0
}

pub(crate) fn non_empty(value: &str) -> Option<&str> {
    (!value.is_empty()).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsigned_header_json() {
        let json = serde_json::to_string(&TokenHeader::unsigned()).unwrap();
        assert_eq!(json, r#"{"ver":1,"alg":"","typ":"JWT"}"#);
    }

    #[test]
    fn test_signed_header_json() {
        let header = TokenHeader {
            algorithm: "HS256".to_string(),
            key_id: "key-1".to_string(),
            ..TokenHeader::unsigned()
        };
        let json = serde_json::to_string(&header).unwrap();
        assert_eq!(json, r#"{"ver":1,"alg":"HS256","typ":"JWT","kid":"key-1"}"#);
    }

    #[test]
    fn test_parse_minimal_header() {
        let header: TokenHeader = serde_json::from_str(r#"{"alg":"HS256"}"#).unwrap();
        assert_eq!(header.algorithm(), "HS256");
        assert_eq!(header.version(), 0);
        assert_eq!(header.token_type(), "");
        assert_eq!(header.key_id(), None);
        assert_eq!(header.parse_algorithm().unwrap(), AlgorithmId::HS256);
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let header: TokenHeader =
            serde_json::from_str(r#"{"alg":"HS256","typ":"JWT","x5u":"https://x"}"#).unwrap();
        assert_eq!(header.token_type(), "JWT");
    }
}
