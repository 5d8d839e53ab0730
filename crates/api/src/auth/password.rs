//! Argon2id password hashing, verification, and strength validation.
//!
//! Hashes are stored in PHC string format in `accounts.password_hash`, so the
//! algorithm parameters and salt travel with the hash.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

/// Minimum password length for invited users and password changes.
pub const MIN_PASSWORD_LENGTH: usize = 12;

/// Upper bound so a huge body cannot make hashing arbitrarily expensive.
pub const MAX_PASSWORD_LENGTH: usize = 256;

/// Hash a plaintext password using Argon2id with a random salt.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored PHC-formatted hash.
///
/// Returns `Ok(false)` on mismatch; `Err` only for a malformed stored hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed_hash = PasswordHash::new(hash)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(e),
    }
}

/// Validate that a password meets the length requirements.
///
/// Length is counted in characters, not bytes.
pub fn validate_password_strength(password: &str, min_length: usize) -> Result<(), String> {
    let length = password.chars().count();
    if length < min_length {
        return Err(format!(
            "Password must be at least {min_length} characters long"
        ));
    }
    if length > MAX_PASSWORD_LENGTH {
        return Err(format!(
            "Password must be at most {MAX_PASSWORD_LENGTH} characters long"
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify() {
        let hash = hash_password("fairway-bunker-green").expect("hashing should succeed");
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("fairway-bunker-green", &hash).unwrap());
        assert!(!verify_password("fairway-bunker-rough", &hash).unwrap());
    }

    #[test]
    fn malformed_hash_is_an_error() {
        assert!(verify_password("anything", "not-a-phc-string").is_err());
    }

    #[test]
    fn password_length_bounds() {
        let msg = validate_password_strength("short", MIN_PASSWORD_LENGTH).unwrap_err();
        assert!(msg.contains("at least 12 characters"));

        assert!(validate_password_strength("twelve_chars", MIN_PASSWORD_LENGTH).is_ok());
        assert!(validate_password_strength(&"x".repeat(257), MIN_PASSWORD_LENGTH).is_err());
    }

    #[test]
    fn length_counts_characters() {
        // 12 characters, more than 12 bytes.
        assert!(validate_password_strength("åäöåäöåäöåäö", MIN_PASSWORD_LENGTH).is_ok());
        assert!(validate_password_strength("åäöåäöåäöåä", MIN_PASSWORD_LENGTH).is_err());
    }
}
