//! Debug query logging for image provider requests and responses.
//!
//! When enabled via `dump_queries = true` in `[logging]`, writes raw JSON to
//! `./logs/queries/{timestamp}-{provider}-{engine}.{phase}.json`. Artifact
//! payloads are replaced by a size marker before writing. Failures are
//! logged as warnings and never block the request.

use std::path::{Path, PathBuf};

use chrono::Utc;
use serde_json::Value;
use tracing::warn;

const QUERY_DIR: &str = "./logs/queries";

/// Paired request/response dump files sharing one base name.
pub struct QueryDump {
    base: PathBuf,
}

impl QueryDump {
    /// Dump the request JSON and return a handle for the paired response.
    pub async fn request(provider: &str, engine: &str, value: &Value) -> Option<Self> {
        Self::request_in(Path::new(QUERY_DIR), provider, engine, value).await
    }

    pub(crate) async fn request_in(
        dir: &Path,
        provider: &str,
        engine: &str,
        value: &Value,
    ) -> Option<Self> {
        let timestamp = Utc::now().format("%Y%m%d-%H%M%S%.3f");
        let base = dir.join(format!("{}-{}-{}", timestamp, provider, sanitize_name(engine)));

        if let Err(e) = tokio::fs::create_dir_all(dir).await {
            warn!("dump_queries: failed to create dir: {}", e);
            return None;
        }

        write_json(&phase_path(&base, "request"), value).await;

        Some(Self { base })
    }

    /// Dump the response JSON with artifact payloads redacted.
    pub async fn response(&self, value: &Value) {
        let mut value = value.clone();
        redact_artifacts(&mut value);
        write_json(&phase_path(&self.base, "response"), &value).await;
    }
}

/// `{base}.{phase}.json`; the base may itself contain dots.
fn phase_path(base: &Path, phase: &str) -> PathBuf {
    let mut path = base.as_os_str().to_owned();
    path.push(format!(".{}.json", phase));
    PathBuf::from(path)
}

/// Replace every `artifacts[*].base64` string with a length marker.
fn redact_artifacts(value: &mut Value) {
    let Some(artifacts) = value.get_mut("artifacts").and_then(Value::as_array_mut) else {
        return;
    };

    for artifact in artifacts {
        if let Some(slot) = artifact.get_mut("base64")
            && let Some(len) = slot.as_str().map(str::len)
        {
            *slot = Value::String(format!("<{} base64 chars>", len));
        }
    }
}

fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

async fn write_json(path: &Path, value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(json_str) => {
            if let Err(e) = tokio::fs::write(path, json_str).await {
                warn!("dump_queries: failed to write {}: {}", path.display(), e);
            }
        }
        Err(e) => {
            warn!("dump_queries: failed to serialize: {}", e);
        }
    }
}
