//! Stability AI REST client (v1 text-to-image).

use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use pixgen_core::{Config, STABILITY_API_KEY_ENV};

use crate::artifact::GeneratedImage;
use crate::providers::provider::{GenerationRequest, ImageProvider, ProviderError};
use crate::providers::query_dump::QueryDump;

const DEFAULT_BASE_URL: &str = "https://api.stability.ai";
const FILTERED_FINISH_REASON: &str = "CONTENT_FILTERED";

/// Stability AI API client
#[derive(Clone)]
pub struct StabilityClient {
    http_client: reqwest::Client,
    api_key: String,
    engine: String,
    base_url: String,
    dump_queries: bool,
}

/// Successful text-to-image response body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TextToImageResponse {
    #[serde(default)]
    pub artifacts: Vec<Artifact>,
}

/// One generated image in a response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    #[serde(default)]
    pub base64: Option<String>,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Error body returned with non-2xx statuses
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl StabilityClient {
    /// Create a new Stability client
    pub fn new(
        api_key: impl Into<String>,
        engine: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http_client,
            api_key: api_key.into(),
            engine: engine.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            dump_queries: false,
        })
    }

    /// Create a client from loaded configuration.
    pub fn from_config(config: &Config) -> Result<Self, ProviderError> {
        let api_key = config
            .stability_api_key()
            .ok_or(ProviderError::MissingApiKey(STABILITY_API_KEY_ENV))?;
        let api = &config.settings.api;

        Ok(
            Self::new(api_key, &api.engine, Duration::from_secs(api.timeout_seconds))?
                .with_base_url(&api.base_url)
                .with_dump_queries(config.settings.logging.dump_queries),
        )
    }

    /// Point the client at another API host (tests, proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Enable or disable debug query logging
    pub fn with_dump_queries(mut self, enabled: bool) -> Self {
        self.dump_queries = enabled;
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1/generation/{}/text-to-image",
            self.base_url, self.engine
        )
    }

    /// Send the request and return the parsed body with the raw text.
    pub async fn text_to_image(
        &self,
        request: &GenerationRequest,
    ) -> Result<(TextToImageResponse, String), ProviderError> {
        let url = self.endpoint();

        let dump_handle = if self.dump_queries {
            let request_value: Value = serde_json::to_value(request)?;
            QueryDump::request("stability", &self.engine, &request_value).await
        } else {
            None
        };

        debug!("POST {} (steps={}, {}x{})", url, request.steps, request.width, request.height);

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let response_text = response.text().await?;

        if let Some(handle) = dump_handle
            && let Ok(response_value) = serde_json::from_str::<Value>(&response_text)
        {
            handle.response(&response_value).await;
        }

        if !status.is_success() {
            return Err(ProviderError::ApiError {
                status: status.as_u16(),
                message: api_error_message(&response_text),
            });
        }

        let parsed: TextToImageResponse = serde_json::from_str(&response_text)?;

        Ok((parsed, response_text))
    }
}

/// Human-readable message from an API error body, falling back to the raw text.
fn api_error_message(body: &str) -> String {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(ApiErrorBody {
            name,
            message: Some(message),
        }) => match name {
            Some(name) => format!("{}: {}", name, message),
            None => message,
        },
        _ => body.to_string(),
    }
}

#[async_trait::async_trait]
impl ImageProvider for StabilityClient {
    fn name(&self) -> &str {
        "stability"
    }

    fn engine(&self) -> &str {
        &self.engine
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedImage, ProviderError> {
        let (response, raw_json) = self.text_to_image(request).await?;

        let Some(artifact) = response.artifacts.into_iter().next() else {
            debug!("Response without artifacts: {}", raw_json);
            return Err(ProviderError::NoImage);
        };

        let payload = artifact
            .base64
            .filter(|payload| !payload.is_empty())
            .ok_or(ProviderError::NoImage)?;

        if artifact.finish_reason.as_deref() == Some(FILTERED_FINISH_REASON) {
            warn!("Artifact for '{}' was content filtered", request.prompt());
        }

        let image = GeneratedImage::from_base64(&payload)?
            .with_metadata(artifact.seed, artifact.finish_reason);

        info!(
            "Stability returned {}x{} image (seed: {:?})",
            image.width(),
            image.height(),
            image.seed()
        );

        Ok(image)
    }
}
