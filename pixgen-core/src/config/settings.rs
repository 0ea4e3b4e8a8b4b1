//! Settings configuration loaded from TOML files.
//!
//! This module handles non-sensitive configuration stored in TOML format
//! in the XDG config directory (~/.config/pixgen/config.toml).

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Environment variable overriding the configuration directory.
pub const CONFIG_DIR_ENV: &str = "PIXGEN_CONFIG_DIR";

/// Default TOML configuration file content
const DEFAULT_CONFIG_TOML: &str = r#"# pixgen configuration file
# Located at: ~/.config/pixgen/config.toml
#
# This file contains non-sensitive configuration.
# The Stability AI API key is loaded from the environment:
#   - STABILITY_API_KEY

[api]
base_url = "https://api.stability.ai"
engine = "stable-diffusion-xl-1024-v1-0"
timeout_seconds = 120

[generation]
cfg_scale = 7.0
height = 1024
width = 1024
samples = 1
steps = 30

[output]
dir = "generated"
save = true

[logging]
level = "info"
file_enabled = false
# file_path = "/tmp/pixgen.log"
# dump_queries = true
"#;

/// Settings loaded from TOML configuration file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    /// Image API endpoint configuration
    #[serde(default)]
    pub api: ApiSettings,

    /// Parameters sent with every generation request
    #[serde(default)]
    pub generation: GenerationSettings,

    /// Where generated images go
    #[serde(default)]
    pub output: OutputSettings,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Image API endpoint settings
#[derive(Debug, Clone, Deserialize)]
pub struct ApiSettings {
    /// Base URL of the Stability REST API
    #[serde(default = "default_api_base_url")]
    pub base_url: String,

    /// Engine (model) identifier used in the request path
    #[serde(default = "default_api_engine")]
    pub engine: String,

    /// Whole-request timeout
    #[serde(default = "default_api_timeout_seconds")]
    pub timeout_seconds: u64,
}

/// Text-to-image generation parameters
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GenerationSettings {
    /// How strictly the diffusion process follows the prompt
    #[serde(default = "default_cfg_scale")]
    pub cfg_scale: f32,

    /// Image height in pixels (multiple of 64)
    #[serde(default = "default_image_side")]
    pub height: u32,

    /// Image width in pixels (multiple of 64)
    #[serde(default = "default_image_side")]
    pub width: u32,

    /// Number of images requested; only the first is used
    #[serde(default = "default_samples")]
    pub samples: u32,

    /// Number of diffusion steps
    #[serde(default = "default_steps")]
    pub steps: u32,
}

/// Output settings
#[derive(Debug, Clone, Deserialize)]
pub struct OutputSettings {
    /// Directory generated images are written to
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,

    /// Whether each successful generation is saved
    #[serde(default = "default_true")]
    pub save: bool,
}

/// Logging settings
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to log to file
    #[serde(default)]
    pub file_enabled: bool,

    /// Log file path (if file_enabled is true)
    pub file_path: Option<String>,

    /// Dump raw request/response JSON to ./logs/queries/
    #[serde(default)]
    pub dump_queries: bool,
}

fn default_api_base_url() -> String {
    "https://api.stability.ai".to_string()
}

fn default_api_engine() -> String {
    "stable-diffusion-xl-1024-v1-0".to_string()
}

fn default_api_timeout_seconds() -> u64 {
    120
}

fn default_cfg_scale() -> f32 {
    7.0
}

fn default_image_side() -> u32 {
    1024
}

fn default_samples() -> u32 {
    1
}

fn default_steps() -> u32 {
    30
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("generated")
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_api_base_url(),
            engine: default_api_engine(),
            timeout_seconds: default_api_timeout_seconds(),
        }
    }
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            cfg_scale: default_cfg_scale(),
            height: default_image_side(),
            width: default_image_side(),
            samples: default_samples(),
            steps: default_steps(),
        }
    }
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            save: true,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file_enabled: false,
            file_path: None,
            dump_queries: false,
        }
    }
}

/// Errors that can occur when loading settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config directory not found")]
    ConfigDirNotFound,

    #[error("Invalid setting {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl GenerationSettings {
    /// Check the parameters against the ranges the text-to-image API accepts.
    pub fn validate(&self) -> Result<(), SettingsError> {
        for (field, side) in [("generation.height", self.height), ("generation.width", self.width)] {
            if side < 128 || side % 64 != 0 {
                return Err(SettingsError::Invalid {
                    field,
                    reason: format!("{} must be a multiple of 64 and at least 128", side),
                });
            }
        }

        if !(10..=50).contains(&self.steps) {
            return Err(SettingsError::Invalid {
                field: "generation.steps",
                reason: format!("{} is outside 10..=50", self.steps),
            });
        }

        if !(0.0..=35.0).contains(&self.cfg_scale) {
            return Err(SettingsError::Invalid {
                field: "generation.cfg_scale",
                reason: format!("{} is outside 0..=35", self.cfg_scale),
            });
        }

        if !(1..=10).contains(&self.samples) {
            return Err(SettingsError::Invalid {
                field: "generation.samples",
                reason: format!("{} is outside 1..=10", self.samples),
            });
        }

        Ok(())
    }
}

impl Settings {
    /// Load settings from the TOML configuration file.
    ///
    /// If the config file doesn't exist, creates it with default values.
    pub fn load() -> Result<Self, SettingsError> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            tracing::info!("Creating default configuration at {:?}", config_path);
            Self::create_default_config(&config_path)?;
        }

        let content = fs::read_to_string(&config_path)?;
        Self::from_toml(&content)
    }

    /// Parse settings from TOML content.
    pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
        let settings: Self = toml::from_str(content)?;
        Ok(settings)
    }

    /// Get the configuration file path.
    ///
    /// Uses `$PIXGEN_CONFIG_DIR/config.toml` when set, otherwise
    /// `~/.config/pixgen/config.toml`.
    pub fn config_path() -> Result<PathBuf, SettingsError> {
        if let Ok(override_dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(override_dir).join("config.toml"));
        }

        let config_dir = dirs::config_dir()
            .ok_or(SettingsError::ConfigDirNotFound)?
            .join("pixgen");

        Ok(config_dir.join("config.toml"))
    }

    fn create_default_config(path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, DEFAULT_CONFIG_TOML)?;

        Ok(())
    }

    /// Validate every section that has constraints.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.api.base_url.trim().is_empty() {
            return Err(SettingsError::Invalid {
                field: "api.base_url",
                reason: "must not be empty".to_string(),
            });
        }
        if self.api.engine.trim().is_empty() {
            return Err(SettingsError::Invalid {
                field: "api.engine",
                reason: "must not be empty".to_string(),
            });
        }
        if self.api.timeout_seconds == 0 {
            return Err(SettingsError::Invalid {
                field: "api.timeout_seconds",
                reason: "must be at least 1".to_string(),
            });
        }
        self.generation.validate()
    }
}
