//! Configuration management for pixgen.
//!
//! Secrets come from environment variables, settings from a TOML file.
//!
//! # Configuration Sources
//!
//! ## Secrets (Environment Variables)
//! - `STABILITY_API_KEY` - Stability AI API key
//!
//! ## Settings (TOML File)
//! Located at `~/.config/pixgen/config.toml` (or `$PIXGEN_CONFIG_DIR/config.toml`):
//! ```toml
//! [api]
//! engine = "stable-diffusion-xl-1024-v1-0"
//!
//! [generation]
//! cfg_scale = 7.0
//! height = 1024
//! width = 1024
//! samples = 1
//! steps = 30
//!
//! [output]
//! dir = "generated"
//!
//! [logging]
//! level = "info"
//! ```

mod secrets;
mod settings;

pub use secrets::{STABILITY_API_KEY_ENV, Secrets, SecretsError};
pub use settings::{
    ApiSettings, CONFIG_DIR_ENV, GenerationSettings, LoggingSettings, OutputSettings, Settings,
    SettingsError,
};

/// Combined configuration containing both secrets and settings.
#[derive(Debug, Clone)]
pub struct Config {
    /// Secrets loaded from environment variables
    pub secrets: Secrets,
    /// Settings loaded from TOML configuration file
    pub settings: Settings,
}

/// Errors that can occur when loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Secrets error: {0}")]
    Secrets(#[from] SecretsError),

    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `STABILITY_API_KEY` is not set
    /// - The TOML file cannot be read or parsed
    /// - A setting is outside the range the API accepts
    pub fn load() -> Result<Self, ConfigError> {
        let secrets = Secrets::from_env()?;
        let settings = Settings::load()?;
        Self::from_parts(secrets, settings)
    }

    /// Combine already-loaded parts, validating the settings.
    pub fn from_parts(secrets: Secrets, settings: Settings) -> Result<Self, ConfigError> {
        settings.validate()?;
        Ok(Self { secrets, settings })
    }

    /// Get the Stability API key (if configured).
    pub fn stability_api_key(&self) -> Option<&str> {
        self.secrets.stability_api_key()
    }

    /// Get the configured engine identifier.
    pub fn engine(&self) -> &str {
        &self.settings.api.engine
    }
}

/// Load .env file if it exists (for development convenience).
pub fn load_dotenv() {
    let _ = dotenvy::dotenv();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secrets::tests::{ENV_MUTEX, clear_env};

    #[test]
    fn test_load_reads_env_and_config_dir() {
        let _lock = ENV_MUTEX.lock().unwrap();
        clear_env();
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("config.toml"),
            "[api]\nengine = \"stable-diffusion-v1-6\"\n\n[generation]\nsteps = 20\n",
        )
        .unwrap();

        // SAFETY: test-scoped env mutation, serialized by ENV_MUTEX.
        unsafe {
            std::env::set_var(STABILITY_API_KEY_ENV, "sk-load");
            std::env::set_var(CONFIG_DIR_ENV, dir.path());
        }
        let loaded = Config::load();

        std::fs::write(dir.path().join("config.toml"), "[api]\ntimeout_seconds = 0\n").unwrap();
        let rejected = Config::load();

        // SAFETY: test-scoped env mutation cleanup.
        unsafe { std::env::remove_var(CONFIG_DIR_ENV) };
        clear_env();

        let config = loaded.unwrap();
        assert_eq!(config.stability_api_key(), Some("sk-load"));
        assert_eq!(config.engine(), "stable-diffusion-v1-6");
        assert_eq!(config.settings.generation.steps, 20);

        assert!(matches!(
            rejected.unwrap_err(),
            ConfigError::Settings(SettingsError::Invalid {
                field: "api.timeout_seconds",
                ..
            })
        ));
    }

    #[test]
    fn test_from_parts_validates_settings() {
        let secrets = Secrets {
            stability_api_key: Some("sk-test".to_string()),
        };

        let config = Config::from_parts(secrets.clone(), Settings::default()).unwrap();
        assert_eq!(config.stability_api_key(), Some("sk-test"));
        assert_eq!(config.engine(), "stable-diffusion-xl-1024-v1-0");

        let mut settings = Settings::default();
        settings.generation.height = 100;
        let err = Config::from_parts(secrets, settings).unwrap_err();
        assert!(matches!(err, ConfigError::Settings(SettingsError::Invalid { .. })));
    }
}
