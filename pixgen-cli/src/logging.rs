//! Tracing setup for the binary.
//!
//! The TUI owns the terminal, so interactive sessions never write log lines to
//! stderr: they go to the configured file, or nowhere.

use std::{fs::OpenOptions, io, path::PathBuf, sync::Mutex};

use pixgen_core::LoggingSettings;
use tracing_subscriber::EnvFilter;

/// Where formatted log lines end up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    File(PathBuf),
    Stderr,
    Sink,
}

pub fn log_target(settings: &LoggingSettings, interactive: bool) -> LogTarget {
    if settings.file_enabled
        && let Some(path) = settings.file_path.as_deref().filter(|p| !p.trim().is_empty())
    {
        return LogTarget::File(PathBuf::from(path));
    }

    if interactive {
        LogTarget::Sink
    } else {
        LogTarget::Stderr
    }
}

/// `RUST_LOG` wins over the configured level.
fn env_filter(settings: &LoggingSettings) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

pub fn init(settings: &LoggingSettings, interactive: bool) -> io::Result<()> {
    let builder = tracing_subscriber::fmt().with_env_filter(env_filter(settings));

    match log_target(settings, interactive) {
        LogTarget::File(path) => {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(&path)?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        LogTarget::Stderr => builder.with_writer(io::stderr).init(),
        LogTarget::Sink => builder.with_writer(io::sink).init(),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(file_enabled: bool, file_path: Option<&str>) -> LoggingSettings {
        LoggingSettings {
            level: "info".to_string(),
            file_enabled,
            file_path: file_path.map(str::to_string),
            dump_queries: false,
        }
    }

    #[test]
    fn test_file_target_when_enabled_with_path() {
        let target = log_target(&settings(true, Some("logs/pixgen.log")), true);
        assert_eq!(target, LogTarget::File(PathBuf::from("logs/pixgen.log")));
    }

    #[test]
    fn test_file_enabled_without_path_falls_back() {
        assert_eq!(log_target(&settings(true, None), false), LogTarget::Stderr);
        assert_eq!(log_target(&settings(true, Some("  ")), true), LogTarget::Sink);
    }

    #[test]
    fn test_interactive_sessions_stay_off_the_terminal() {
        assert_eq!(log_target(&settings(false, Some("x.log")), true), LogTarget::Sink);
        assert_eq!(log_target(&settings(false, None), false), LogTarget::Stderr);
    }
}
