//! Auth Config

use std::fmt;

use clap::Args;

/// Bearer token settings.
#[derive(Args)]
pub struct AuthConfig {
    /// HMAC secret for signing bearer tokens, at least 32 bytes
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: String,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"**redacted**")
            .finish()
    }
}
