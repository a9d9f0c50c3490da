//! Password hashing and verification
//!
//! Hashes are Argon2id PHC strings with a per-password random salt.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::AppError;

const MIN_PASSWORD_LEN: usize = 8;
const MAX_PASSWORD_LEN: usize = 128;

/// Hash a password using Argon2id
///
/// # Errors
/// Returns an error if hashing fails
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::internal(anyhow::anyhow!("Password hashing failed: {e}")))
}

/// Verify a password against a stored hash
///
/// # Errors
/// Returns an error if the stored hash is not a valid PHC string
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AppError::internal(anyhow::anyhow!("Invalid password hash format: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Check a new password against the signup policy
///
/// At least 8 (and at most 128) characters, with an uppercase letter, a
/// lowercase letter and a digit.
///
/// # Errors
/// `AppError::Validation` naming the first rule that failed
pub fn validate_password_strength(password: &str) -> Result<(), AppError> {
    let len = password.chars().count();
    if len < MIN_PASSWORD_LEN {
        return Err(AppError::validation(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters long"
        )));
    }
    if len > MAX_PASSWORD_LEN {
        return Err(AppError::validation(format!(
            "Password must be at most {MAX_PASSWORD_LEN} characters long"
        )));
    }

    let rules: [(fn(char) -> bool, &str); 3] = [
        (char::is_uppercase, "an uppercase letter"),
        (char::is_lowercase, "a lowercase letter"),
        (|c: char| c.is_ascii_digit(), "a digit"),
    ];
    for (check, what) in rules {
        if !password.chars().any(check) {
            return Err(AppError::validation(format!(
                "Password must contain at least {what}"
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validation_message(password: &str) -> String {
        match validate_password_strength(password) {
            Err(AppError::Validation(msg)) => msg,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("SecurePassword123").unwrap();
        assert!(hash.starts_with("$argon2id"));
        assert!(verify_password("SecurePassword123", &hash).unwrap());
        assert!(!verify_password("WrongPassword123", &hash).unwrap());
    }

    #[test]
    fn test_salts_differ() {
        let first = hash_password("SecurePassword123").unwrap();
        let second = hash_password("SecurePassword123").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_verify_rejects_garbage_hash() {
        assert!(verify_password("whatever", "not-a-phc-string").is_err());
    }

    #[test]
    fn test_password_policy() {
        assert!(validate_password_strength("SecurePass1").is_ok());
        assert!(validation_message("Short1").contains("8 characters"));
        assert!(validation_message("lowercase123").contains("uppercase"));
        assert!(validation_message("UPPERCASE123").contains("lowercase"));
        assert!(validation_message("NoDigitsHere").contains("digit"));
        assert!(validation_message(&format!("Aa1{}", "x".repeat(200))).contains("at most"));
    }
}
