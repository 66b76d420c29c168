//! Password hashing and bearer token minting.
//!
//! Tokens have the form `<session uuid>.<secret>`; only an argon2 hash of the
//! secret is persisted.

use argon2::Argon2;
use argon2::password_hash::{
    Error as PasswordHashError, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
};
use once_cell::sync::Lazy;
use rand::Rng;
use rand::distr::Alphanumeric;
use rand_core::OsRng;
use uuid::Uuid;

use crate::http::constants::TOKEN_SECRET_LEN;

pub(crate) fn hash_secret(input: &str) -> Result<String, PasswordHashError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(input.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// A mismatch is `Ok(false)`; only malformed hashes or hasher failures are errors.
pub(crate) fn verify_secret(expected_hash: &str, candidate: &str) -> Result<bool, PasswordHashError> {
    let parsed = PasswordHash::new(expected_hash)?;
    match Argon2::default().verify_password(candidate.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(PasswordHashError::Password) => Ok(false),
        Err(err) => Err(err),
    }
}

static ABSENT_USER_HASH: Lazy<Option<String>> =
    Lazy::new(|| hash_secret("argip-absent-user").ok());

/// Run one full verification against a fixed hash and report failure.
///
/// Login calls this when the username is unknown so that path costs the same
/// argon2 work as a wrong password.
pub(crate) fn reject_unknown_user(candidate: &str) -> bool {
    if let Some(hash) = ABSENT_USER_HASH.as_deref() {
        let _ = verify_secret(hash, candidate);
    }
    false
}

pub(crate) fn generate_token(length: usize) -> String {
    let mut rng = rand::rng();
    std::iter::repeat_with(|| rng.sample(Alphanumeric) as char)
        .take(length)
        .collect()
}

/// Freshly minted bearer credential.
pub(crate) struct IssuedToken {
    pub(crate) session_id: Uuid,
    pub(crate) secret: String,
}

impl IssuedToken {
    pub(crate) fn mint() -> Self {
        Self {
            session_id: Uuid::new_v4(),
            secret: generate_token(TOKEN_SECRET_LEN),
        }
    }

    pub(crate) fn encode(&self) -> String {
        format!("{}.{}", self.session_id, self.secret)
    }
}

/// Split a presented token into its session id and secret.
pub(crate) fn parse_token(token: &str) -> Option<(Uuid, &str)> {
    let (id, secret) = token.split_once('.')?;
    if secret.is_empty() {
        return None;
    }
    let id = Uuid::parse_str(id).ok()?;
    Some((id, secret))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashed_secret_verifies_only_the_original() -> Result<(), PasswordHashError> {
        let hash = hash_secret("tajne123")?;
        assert!(verify_secret(&hash, "tajne123")?);
        assert!(!verify_secret(&hash, "tajne124")?);
        Ok(())
    }

    #[test]
    fn unknown_user_is_rejected_after_a_real_verification() {
        let hash = ABSENT_USER_HASH.as_deref().expect("fixed hash builds");
        assert!(PasswordHash::new(hash).is_ok());
        assert!(!reject_unknown_user("argip-absent-user"));
        assert!(!reject_unknown_user("anything"));
    }

    #[test]
    fn malformed_hash_is_an_error() {
        assert!(verify_secret("not-a-phc-string", "x").is_err());
    }

    #[test]
    fn minted_tokens_round_trip_through_parse() {
        let token = IssuedToken::mint();
        assert_eq!(token.secret.len(), TOKEN_SECRET_LEN);
        assert!(token.secret.chars().all(|c| c.is_ascii_alphanumeric()));

        let encoded = token.encode();
        let (id, secret) = parse_token(&encoded).expect("token should parse");
        assert_eq!(id, token.session_id);
        assert_eq!(secret, token.secret);
    }

    #[test]
    fn malformed_tokens_are_rejected() {
        assert!(parse_token("no-dot-here").is_none());
        assert!(parse_token("not-a-uuid.secret").is_none());
        assert!(parse_token(&format!("{}.", Uuid::new_v4())).is_none());
    }
}
