//! Request signing for the `userpasshmac` authentication endpoint

use hmac::{Hmac, Mac};
use sha1::Sha1;

type HmacSha1 = Hmac<Sha1>;

/// Sign `"<api_key>:<timestamp>"` with the shared secret.
///
/// Returns the lowercase hex HMAC-SHA1 digest expected in the `hmac` field
/// of the authentication request.
pub fn sign(api_key: &str, secret: &str, timestamp: i64) -> String {
    let mut mac =
        HmacSha1::new_from_slice(secret.as_bytes()).expect("HMAC accepts keys of any length");
    mac.update(api_key.as_bytes());
    mac.update(b":");
    mac.update(timestamp.to_string().as_bytes());

    format!("{:x}", mac.finalize().into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_known_vector() {
        assert_eq!(
            sign("key", "secret", 1_700_000_000),
            "d670e8fa32f6c9aca7f09a4fef465f3db855ae4d"
        );
    }

    #[test]
    fn test_sign_changes_with_timestamp() {
        assert_ne!(sign("key", "secret", 1), sign("key", "secret", 2));
    }

    #[test]
    fn test_sign_is_lowercase_hex() {
        let signature = sign("api-key", "shared-secret", 1_234_567_890);
        assert_eq!(signature.len(), 40);
        assert!(
            signature
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
        );
    }
}
