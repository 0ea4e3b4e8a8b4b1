pub mod config;
pub mod history;

// Config re-exports
pub use config::{
    ApiSettings, CONFIG_DIR_ENV, Config, ConfigError, GenerationSettings, LoggingSettings,
    OutputSettings, STABILITY_API_KEY_ENV, Secrets, SecretsError, Settings, SettingsError,
    load_dotenv,
};

// History re-exports
pub use history::{HISTORY_LIMIT, LABEL_MAX_CHARS, PromptHistory, history_label, record_prompt};
