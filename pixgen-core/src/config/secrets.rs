//! Secrets configuration loaded from environment variables only.
//!
//! The Stability API key never lives in the settings file; it is read from
//! the process environment (or a development `.env` file).

use std::env;

/// Environment variable holding the Stability AI API key.
pub const STABILITY_API_KEY_ENV: &str = "STABILITY_API_KEY";

/// Secrets loaded exclusively from environment variables.
#[derive(Clone, Default)]
pub struct Secrets {
    /// Stability AI API key (env: STABILITY_API_KEY)
    pub stability_api_key: Option<String>,
}

impl std::fmt::Debug for Secrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secrets")
            .field(
                "stability_api_key",
                &self.stability_api_key.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

/// Errors that can occur when loading secrets
#[derive(Debug, thiserror::Error)]
pub enum SecretsError {
    #[error("Missing required secret: {0}")]
    MissingSecret(String),
}

impl Secrets {
    /// Load secrets from environment variables.
    ///
    /// Also loads a `.env` file if present (development convenience).
    pub fn from_env() -> Result<Self, SecretsError> {
        let _ = dotenvy::dotenv();

        Self::from_env_inner()
    }

    /// Internal method to load from environment without loading .env
    pub(crate) fn from_env_inner() -> Result<Self, SecretsError> {
        let stability_api_key = env::var(STABILITY_API_KEY_ENV)
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or_else(|| SecretsError::MissingSecret(STABILITY_API_KEY_ENV.to_string()))?;

        Ok(Self {
            stability_api_key: Some(stability_api_key),
        })
    }

    /// The Stability API key, if configured.
    pub fn stability_api_key(&self) -> Option<&str> {
        self.stability_api_key.as_deref()
    }
}
