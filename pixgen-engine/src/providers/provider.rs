//! Provider trait for abstracting image-generation backends.

use serde::Serialize;

use pixgen_core::GenerationSettings;

use crate::artifact::GeneratedImage;

/// One weighted text prompt in a generation request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextPrompt {
    pub text: String,
}

/// Text-to-image request body
///
/// Serializes to `{text_prompts, cfg_scale, height, width, samples, steps}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationRequest {
    pub text_prompts: Vec<TextPrompt>,
    pub cfg_scale: f32,
    pub height: u32,
    pub width: u32,
    pub samples: u32,
    pub steps: u32,
}

impl GenerationRequest {
    /// Build a request for `prompt` using the configured parameters.
    pub fn new(prompt: impl Into<String>, settings: &GenerationSettings) -> Self {
        Self {
            text_prompts: vec![TextPrompt {
                text: prompt.into(),
            }],
            cfg_scale: settings.cfg_scale,
            height: settings.height,
            width: settings.width,
            samples: settings.samples,
            steps: settings.steps,
        }
    }

    /// The primary prompt text.
    pub fn prompt(&self) -> &str {
        self.text_prompts
            .first()
            .map(|p| p.text.as_str())
            .unwrap_or_default()
    }
}

/// Provider error types
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("API error ({status}): {message}")]
    ApiError { status: u16, message: String },
    #[error("No image in response")]
    NoImage,
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Invalid image payload: {0}")]
    InvalidImage(String),
    #[error("No API key configured (set {0})")]
    MissingApiKey(&'static str),
}

/// Provider trait for image-generation backends
#[async_trait::async_trait]
pub trait ImageProvider: Send + Sync {
    /// Provider name
    fn name(&self) -> &str;

    /// Engine (model) the provider generates with
    fn engine(&self) -> &str;

    /// Run one text-to-image generation and return the first image.
    async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedImage, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let request = GenerationRequest::new("a lighthouse in a storm", &GenerationSettings::default());

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "text_prompts": [{"text": "a lighthouse in a storm"}],
                "cfg_scale": 7.0,
                "height": 1024,
                "width": 1024,
                "samples": 1,
                "steps": 30
            })
        );
        assert_eq!(request.prompt(), "a lighthouse in a storm");
    }

    #[test]
    fn test_request_uses_custom_settings() {
        let settings = GenerationSettings {
            cfg_scale: 12.0,
            height: 512,
            width: 768,
            samples: 3,
            steps: 45,
        };
        let request = GenerationRequest::new("x", &settings);

        assert_eq!(request.cfg_scale, 12.0);
        assert_eq!(request.height, 512);
        assert_eq!(request.width, 768);
        assert_eq!(request.samples, 3);
        assert_eq!(request.steps, 45);
    }
}
