//! Password hashing and credential verification.
//!
//! Hashed credentials use Argon2id with a random salt in PHC string format.
//! Legacy bootstrap accounts still store plaintext (`password_is_hashed`
//! unset); those compare constant-time and are only migrated to a hash
//! through an explicit password change, never automatically.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use subtle::ConstantTimeEq;

/// Hash a plaintext password using Argon2id with a random salt.
///
/// Returns the PHC-formatted hash string (includes algorithm, params, salt, and hash).
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default(); // Argon2id with default params
    let hash = argon2.hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored PHC-formatted Argon2id hash.
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

/// Check a presented password against a stored credential, honoring the
/// legacy plaintext state.
pub fn verify_credential(
    presented: &str,
    stored: &str,
    is_hashed: bool,
) -> Result<bool, argon2::password_hash::Error> {
    if is_hashed {
        verify_password(presented, stored)
    } else {
        Ok(constant_time_compare(presented, stored))
    }
}

/// Perform constant-time string comparison to mitigate timing attacks.
fn constant_time_compare(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn test_plaintext_credential_compare() {
        assert!(verify_credential("admin123", "admin123", false).unwrap());
        assert!(!verify_credential("admin124", "admin123", false).unwrap());
        assert!(!verify_credential("", "admin123", false).unwrap());
    }

    #[test]
    fn test_hashed_credential_compare() {
        let hash = hash_password("user123").expect("hashing should succeed");
        assert!(verify_credential("user123", &hash, true).unwrap());
        assert!(!verify_credential("user124", &hash, true).unwrap());
    }

    #[test]
    fn test_constant_time_compare_different_lengths() {
        assert!(!constant_time_compare("short", "much-longer-key"));
        assert!(constant_time_compare("", ""));
    }
}
