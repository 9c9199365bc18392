//! Password hashing and verification utilities
//!
//! Uses Argon2id for password hashing.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::AppError;

/// Accepted password length, in characters
pub const PASSWORD_LENGTH: std::ops::RangeInclusive<usize> = 6..=128;

/// Hash a password using Argon2id
///
/// # Errors
/// Returns an error if hashing fails
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {e}")))
}

/// Verify a password against a hash
///
/// # Errors
/// Returns an error if the stored hash is malformed
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid password hash format: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Validate password length (6 to 128 characters)
///
/// # Errors
/// Returns a validation error if the password is too short or too long
pub fn validate_password_strength(password: &str) -> Result<(), AppError> {
    let length = password.chars().count();

    if length < *PASSWORD_LENGTH.start() {
        return Err(AppError::Validation(format!(
            "Password must be at least {} characters long",
            PASSWORD_LENGTH.start()
        )));
    }

    if length > *PASSWORD_LENGTH.end() {
        return Err(AppError::Validation(format!(
            "Password must be at most {} characters long",
            PASSWORD_LENGTH.end()
        )));
    }

    Ok(())
}
