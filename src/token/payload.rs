use serde::{Deserialize, Serialize};

/// Token payload: the registered claims plus the application scope
///
/// Every field is omitted from the JSON when empty or zero. Timestamps are
/// seconds since the Unix epoch, zero meaning unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Payload {
    /// Issuer (iss) - the principal that issued the token
    #[serde(rename = "iss", skip_serializing_if = "String::is_empty")]
    pub issuer: String,

    /// Subject (sub) - the principal the token is about
    #[serde(rename = "sub", skip_serializing_if = "String::is_empty")]
    pub subject: String,

    /// Audience (aud) - the recipients the token is intended for
    #[serde(rename = "aud", skip_serializing_if = "Vec::is_empty")]
    pub audience: Vec<String>,

    /// Expiration Time (exp) - on and after this instant the token is rejected
    #[serde(rename = "exp", skip_serializing_if = "is_zero")]
    pub expiration: i64,

    /// Not Before (nbf) - before this instant the token is rejected
    #[serde(rename = "nbf", skip_serializing_if = "is_zero")]
    pub not_before: i64,

    /// Issued At (iat)
    #[serde(rename = "iat", skip_serializing_if = "is_zero")]
    pub issued_at: i64,

    /// Token ID (jti) - unique identifier of the token
    #[serde(rename = "jti", skip_serializing_if = "String::is_empty")]
    pub jwt_id: String,

    /// Base64URL-encoded JSON value private to the application
    #[serde(rename = "scope", skip_serializing_if = "String::is_empty")]
    pub scope: String,
}

fn is_zero(value: &i64) -> bool {
    *value == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_payload_json() {
        let json = serde_json::to_string(&Payload::default()).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn test_payload_field_order() {
        let payload = Payload {
            issuer: "issuer".to_string(),
            audience: vec!["api".to_string(), "web".to_string()],
            expiration: 200,
            issued_at: 100,
            scope: "e30".to_string(),
            ..Payload::default()
        };
        let json = serde_json::to_string(&payload).unwrap();
        assert_eq!(
            json,
            r#"{"iss":"issuer","aud":["api","web"],"exp":200,"iat":100,"scope":"e30"}"#
        );
    }

    #[test]
    fn test_parse_payload() {
        let payload: Payload =
            serde_json::from_str(r#"{"sub":"user","nbf":5,"jti":"id-1","extra":true}"#).unwrap();
        assert_eq!(payload.subject, "user");
        assert_eq!(payload.not_before, 5);
        assert_eq!(payload.jwt_id, "id-1");
        assert_eq!(payload.expiration, 0);
    }
}
