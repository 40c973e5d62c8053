//! Argon2id credential hashing and verification against a [`Principal`].
//!
//! Identity records store PHC-formatted Argon2id strings, so the algorithm
//! parameters and salt travel with the hash.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use tokenforge_core::principal::{AccountStatus, Principal};

/// Hash a plaintext password using Argon2id with a random salt.
///
/// Returns the PHC-formatted hash string (includes algorithm, params, salt, and hash).
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored PHC-formatted hash.
///
/// Returns `Ok(true)` if the password matches, `Ok(false)` if it does not.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed_hash = PasswordHash::new(hash)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(e),
    }
}

/// Check a login attempt against a principal.
///
/// Principals that are not [`AccountStatus::Active`] or have no storage id
/// are refused without touching the hash. A malformed stored hash counts as
/// a mismatch and is logged.
pub fn verify_principal(principal: &Principal, password: &str) -> bool {
    if principal.is_transient() || principal.status() != AccountStatus::Active {
        tracing::debug!(
            user_id = ?principal.user_id(),
            status = ?principal.status(),
            "Principal is not eligible for login"
        );
        return false;
    }

    match verify_password(password, principal.password_hash()) {
        Ok(matches) => matches,
        Err(e) => {
            tracing::warn!(user_id = ?principal.user_id(), error = %e, "Stored credential hash is malformed");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use tokenforge_core::identity::IdentityRecord;

    use super::*;

    fn principal_with(id: Option<i64>, password: &str) -> Principal {
        let hash = hash_password(password).expect("hashing should succeed");
        let record = match id {
            Some(id) => IdentityRecord::new(id, "Ana Silva", "ana@example.com", hash),
            None => IdentityRecord::transient("Ana Silva", "ana@example.com", hash),
        };
        Principal::adapt(&record).expect("adapt should succeed")
    }

    #[test]
    fn test_hash_and_verify() {
        let password = "correct-horse-battery-staple";
        let hash = hash_password(password).expect("hashing should succeed");

        assert!(
            hash.starts_with("$argon2id$"),
            "expected argon2id PHC prefix"
        );

        let verified = verify_password(password, &hash).expect("verify should succeed");
        assert!(verified, "correct password should verify as true");
    }

    #[test]
    fn test_wrong_password_fails() {
        let hash = hash_password("real-password").expect("hashing should succeed");
        let verified = verify_password("wrong-password", &hash).expect("verify should succeed");
        assert!(!verified, "wrong password should verify as false");
    }

    #[test]
    fn test_verify_principal() {
        let principal = principal_with(Some(7), "s3cret-passphrase");
        assert!(verify_principal(&principal, "s3cret-passphrase"));
        assert!(!verify_principal(&principal, "guess"));
    }

    #[test]
    fn test_transient_principal_is_refused() {
        let principal = principal_with(None, "s3cret-passphrase");
        assert!(!verify_principal(&principal, "s3cret-passphrase"));
    }

    #[test]
    fn test_malformed_hash_is_a_mismatch() {
        let record = IdentityRecord::new(3, "Bob", "bob@example.com", "not-a-phc-string");
        let principal = Principal::adapt(&record).expect("adapt should succeed");
        assert!(!verify_principal(&principal, "anything"));
    }
}
