//! Authentication models

use std::fmt;

use serde::{Deserialize, Serialize};

/// Token issued by the authentication endpoint.
///
/// Tokens are short-lived and never persisted; a fresh one is obtained for
/// every client instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthToken {
    /// The opaque token string
    pub token: String,
}

impl AuthToken {
    /// Value for the `Authorization` header of authenticated requests.
    pub fn authorization_header(&self) -> String {
        format!("CBX-SIMPLE-TOKEN Token={}", self.token)
    }
}

/// Credentials for the `userpasshmac` authentication flow.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    pub api_key: String,
    pub secret: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("api_key", &self.api_key)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// JSON body sent to the authentication endpoint.
#[derive(Debug, Serialize)]
pub(crate) struct AuthRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
    pub key: &'a str,
    pub ts: i64,
    pub hmac: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorization_header_format() {
        let token = AuthToken {
            token: "abc123".to_string(),
        };
        assert_eq!(token.authorization_header(), "CBX-SIMPLE-TOKEN Token=abc123");
    }

    #[test]
    fn test_credentials_debug_redacts_secrets() {
        let creds = Credentials {
            username: "editor".to_string(),
            password: "hunter2".to_string(),
            api_key: "key".to_string(),
            secret: "shh".to_string(),
        };
        let debug = format!("{:?}", creds);
        assert!(debug.contains("editor"));
        assert!(!debug.contains("hunter2"));
        assert!(!debug.contains("shh"));
    }

    #[test]
    fn test_auth_request_wire_shape() {
        let body = AuthRequest {
            username: "u",
            password: "p",
            key: "k",
            ts: 42,
            hmac: "sig".to_string(),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"username": "u", "password": "p", "key": "k", "ts": 42, "hmac": "sig"})
        );
    }
}
