//! Opaque token generation and hashing.

use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Generate a fresh opaque token and its storable hash.
///
/// The plaintext goes to the client (or into the sign-in email) and is
/// never persisted; the hash is what the database rows carry.
pub fn new_token() -> (String, String) {
    let token = Uuid::new_v4().to_string();
    let hash = hash_token(&token);
    (token, hash)
}

/// SHA-256 hex digest of a token, matching the stored `token_hash` columns.
pub fn hash_token(token: &str) -> String {
    let digest = Sha256::digest(token.as_bytes());
    format!("{digest:x}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_deterministic_and_hex() {
        let (token, hash) = new_token();
        assert_eq!(hash, hash_token(&token));
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn tokens_are_unique() {
        let (a, _) = new_token();
        let (b, _) = new_token();
        assert_ne!(a, b);
    }

    #[test]
    fn known_digest() {
        // sha256("hello") -- fixed vector to pin the encoding.
        assert_eq!(
            hash_token("hello"),
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
    }
}
