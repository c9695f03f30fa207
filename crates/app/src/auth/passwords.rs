//! Password hashing with Argon2id.

use std::{fmt, sync::LazyLock};

use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version,
    password_hash::{SaltString, rand_core::OsRng},
};
use thiserror::Error;
use tokio::task::{self, JoinError};
use zeroize::Zeroize;

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_CHARS: usize = 6;

/// OWASP-recommended Argon2id cost: 19 MiB memory, 2 iterations, 1 lane.
const ARGON2_MEMORY_KIB: u32 = 19_456;
const ARGON2_ITERATIONS: u32 = 2;
const ARGON2_PARALLELISM: u32 = 1;

/// Verified against when no account matches, so a miss costs one Argon2 run
/// like a wrong password does.
static DUMMY_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| hash_password(&Password::new("unmatched-account")).ok());

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("password hashing failed: {0}")]
    Hash(String),

    #[error("stored password hash is malformed: {0}")]
    MalformedHash(String),

    #[error("password hashing task failed")]
    Task(#[source] JoinError),
}

/// A plaintext password, wiped from memory on drop.
#[derive(Clone)]
pub struct Password(String);

impl Password {
    #[must_use]
    pub fn new(plaintext: impl Into<String>) -> Self {
        Self(plaintext.into())
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(**redacted**)")
    }
}

impl Drop for Password {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

fn hasher() -> Result<Argon2<'static>, PasswordError> {
    let params = Params::new(
        ARGON2_MEMORY_KIB,
        ARGON2_ITERATIONS,
        ARGON2_PARALLELISM,
        None,
    )
    .map_err(|error| PasswordError::Hash(format!("invalid argon2 params: {error}")))?;

    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Hash `password` into a PHC string with a fresh random salt.
///
/// # Errors
///
/// Returns [`PasswordError::Hash`] if Argon2 rejects the input.
pub fn hash_password(password: &Password) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    hasher()?
        .hash_password(password.expose().as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|error| PasswordError::Hash(error.to_string()))
}

/// Check `password` against a stored PHC string.
///
/// Returns `Ok(false)` on mismatch. Parameters are read from the hash itself.
///
/// # Errors
///
/// Returns [`PasswordError::MalformedHash`] when the stored hash cannot be parsed.
pub fn verify_password(password: &Password, hash: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(hash)
        .map_err(|error| PasswordError::MalformedHash(error.to_string()))?;

    match Argon2::default().verify_password(password.expose().as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(error) => Err(PasswordError::Hash(error.to_string())),
    }
}

/// [`hash_password`] on the blocking pool.
///
/// # Errors
///
/// See [`hash_password`]; also fails if the blocking task is cancelled.
pub async fn hash_password_blocking(password: Password) -> Result<String, PasswordError> {
    task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(PasswordError::Task)?
}

/// [`verify_password`] on the blocking pool.
///
/// # Errors
///
/// See [`verify_password`]; also fails if the blocking task is cancelled.
pub async fn verify_password_blocking(
    password: Password,
    hash: String,
) -> Result<bool, PasswordError> {
    task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(PasswordError::Task)?
}

/// Run a verification against a throwaway hash on the blocking pool.
///
/// Used on sign-in paths that found no stored hash.
///
/// # Errors
///
/// Fails if Argon2 errors or the blocking task is cancelled.
pub async fn verify_dummy_blocking(password: Password) -> Result<(), PasswordError> {
    task::spawn_blocking(move || {
        if let Some(hash) = DUMMY_HASH.as_deref() {
            verify_password(&password, hash)?;
        }

        Ok(())
    })
    .await
    .map_err(PasswordError::Task)?
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn correct_password_matches() -> TestResult {
        let password = Password::new("hunter22");
        let hash = hash_password(&password)?;

        assert!(verify_password(&password, &hash)?, "password should verify");

        Ok(())
    }

    #[test]
    fn wrong_password_does_not_match() -> TestResult {
        let hash = hash_password(&Password::new("hunter22"))?;

        assert!(!verify_password(&Password::new("hunter23"), &hash)?);

        Ok(())
    }

    #[test]
    fn hashes_are_salted_argon2id_phc_strings() -> TestResult {
        let password = Password::new("hunter22");

        let first = hash_password(&password)?;
        let second = hash_password(&password)?;

        assert!(first.starts_with("$argon2id$"), "unexpected hash format: {first}");
        assert_ne!(first, second, "each hash should use a fresh salt");
        assert!(!first.contains("hunter22"), "hash must not embed the plaintext");

        Ok(())
    }

    #[test]
    fn malformed_hash_is_an_error() {
        let result = verify_password(&Password::new("hunter22"), "not-a-phc-string");

        assert!(
            matches!(result, Err(PasswordError::MalformedHash(_))),
            "expected MalformedHash, got {result:?}"
        );
    }

    #[test]
    fn debug_output_is_redacted() {
        let rendered = format!("{:?}", Password::new("hunter22"));

        assert_eq!(rendered, "Password(**redacted**)");
    }

    #[tokio::test]
    async fn dummy_verification_checks_a_real_argon2id_hash() -> TestResult {
        verify_dummy_blocking(Password::new("anything")).await?;

        let hash = DUMMY_HASH.as_deref().expect("dummy hash should be available");

        assert!(hash.starts_with("$argon2id$"), "unexpected hash format: {hash}");
        assert!(
            !verify_password(&Password::new("anything"), hash)?,
            "the throwaway password should not match"
        );

        Ok(())
    }

    #[tokio::test]
    async fn blocking_helpers_round_trip() -> TestResult {
        let hash = hash_password_blocking(Password::new("s3cret!")).await?;

        assert!(verify_password_blocking(Password::new("s3cret!"), hash).await?);

        Ok(())
    }
}
