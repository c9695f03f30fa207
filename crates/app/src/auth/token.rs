//! Signed bearer tokens.
//!
//! Tokens are HS256 JWTs carrying only `sub` (the tenant UUID), `iat` and
//! `exp`. Nothing is stored server-side: a token is valid until it expires.

use std::fmt;

use jiff::{SignedDuration, Timestamp};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;
use zeroize::Zeroize;

use crate::domain::tenants::records::TenantUuid;

/// Shortest signing secret the service accepts, in bytes.
pub const MIN_TOKEN_SECRET_BYTES: usize = 32;

/// How long an issued token stays valid.
pub const TOKEN_LIFETIME: SignedDuration = SignedDuration::from_hours(7 * 24);

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token signing secret must be at least {MIN_TOKEN_SECRET_BYTES} bytes")]
    WeakSecret,

    #[error("token is invalid")]
    Invalid,

    #[error("token has expired")]
    Expired,

    #[error("token expiry is out of range")]
    ExpiryOutOfRange(#[source] jiff::Error),

    #[error("failed to sign token")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

/// The process-wide HMAC signing secret.
#[derive(Clone)]
pub struct TokenSecret(Vec<u8>);

impl TokenSecret {
    /// Wrap a configured secret, rejecting short ones.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::WeakSecret`] when `secret` is shorter than
    /// [`MIN_TOKEN_SECRET_BYTES`].
    pub fn new(secret: impl Into<Vec<u8>>) -> Result<Self, TokenError> {
        let mut bytes = secret.into();

        if bytes.len() < MIN_TOKEN_SECRET_BYTES {
            bytes.zeroize();

            return Err(TokenError::WeakSecret);
        }

        Ok(Self(bytes))
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for TokenSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TokenSecret(**redacted**)")
    }
}

impl Drop for TokenSecret {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct TokenClaims {
    sub: String,
    iat: i64,
    exp: i64,
}

/// A freshly signed token and the instant it stops being accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: Timestamp,
}

/// Issues and verifies bearer tokens with a fixed secret.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    lifetime: SignedDuration,
}

impl TokenService {
    #[must_use]
    pub fn new(secret: &TokenSecret) -> Self {
        Self::with_lifetime(secret, TOKEN_LIFETIME)
    }

    fn with_lifetime(secret: &TokenSecret, lifetime: SignedDuration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);

        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            lifetime,
        }
    }

    /// Issue a token for `tenant` starting now.
    ///
    /// # Errors
    ///
    /// Returns an error if signing fails.
    pub fn issue(&self, tenant: TenantUuid) -> Result<IssuedToken, TokenError> {
        self.issue_at(tenant, Timestamp::now())
    }

    /// Issue a token for `tenant` as if it were `issued_at`.
    ///
    /// # Errors
    ///
    /// Returns an error if the expiry overflows or signing fails.
    pub fn issue_at(
        &self,
        tenant: TenantUuid,
        issued_at: Timestamp,
    ) -> Result<IssuedToken, TokenError> {
        let expires_at = issued_at
            .checked_add(self.lifetime)
            .map_err(TokenError::ExpiryOutOfRange)?;

        let claims = TokenClaims {
            sub: tenant.to_string(),
            iat: issued_at.as_second(),
            exp: expires_at.as_second(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(TokenError::Signing)?;

        Ok(IssuedToken { token, expires_at })
    }

    /// Check the signature and expiry of `token` and return its tenant.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Expired`] once `exp` has passed, otherwise
    /// [`TokenError::Invalid`] for any signature, structure or claim failure.
    pub fn verify(&self, token: &str) -> Result<TenantUuid, TokenError> {
        let data = decode::<TokenClaims>(token, &self.decoding, &self.validation).map_err(
            |error| match error.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            },
        )?;

        Uuid::try_parse(&data.claims.sub)
            .map(TenantUuid::from_uuid)
            .map_err(|_invalid_sub| TokenError::Invalid)
    }
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("lifetime", &self.lifetime)
            .finish_non_exhaustive()
    }
}
