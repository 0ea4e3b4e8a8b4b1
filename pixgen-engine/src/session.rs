use std::sync::Arc;

use tracing::{error, info};

use pixgen_core::{GenerationSettings, PromptHistory};

use crate::artifact::GeneratedImage;
use crate::providers::provider::{GenerationRequest, ImageProvider, ProviderError};

/// Errors surfaced to the user by a generation session
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Prompt is empty")]
    EmptyPrompt,

    #[error("A generation is already running")]
    Busy,

    #[error("Image generation failed: {0}")]
    Generation(#[from] ProviderError),
}

impl SessionError {
    /// Notification text shown to the user.
    ///
    /// Generation failures stay generic; the detail goes to the log.
    pub fn notice(&self) -> &'static str {
        match self {
            Self::EmptyPrompt => "Please enter a prompt!",
            Self::Busy => "A generation is already in progress.",
            Self::Generation(_) => "Failed to generate image. Check the logs for details.",
        }
    }
}

/// Everything the UI shows for one session
#[derive(Debug, Default)]
pub struct SessionState {
    prompt: String,
    image: Option<GeneratedImage>,
    loading: bool,
    history: PromptHistory,
}

impl SessionState {
    /// Text currently in the prompt field
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Last successfully generated image
    pub fn image(&self) -> Option<&GeneratedImage> {
        self.image.as_ref()
    }

    /// Whether a request is in flight
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn history(&self) -> &PromptHistory {
        &self.history
    }
}

/// One user's generation session: the state plus the request flow.
///
/// Requests are serialized: while one is in flight, `begin` refuses to start
/// another, whatever the UI does.
pub struct GenerationSession {
    provider: Arc<dyn ImageProvider>,
    generation: GenerationSettings,
    state: SessionState,
}

impl GenerationSession {
    pub fn new(provider: Arc<dyn ImageProvider>, generation: GenerationSettings) -> Self {
        Self {
            provider,
            generation,
            state: SessionState::default(),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Shared handle to the provider, for running a request off the UI loop.
    pub fn provider(&self) -> Arc<dyn ImageProvider> {
        Arc::clone(&self.provider)
    }

    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.state.prompt = prompt.into();
    }

    pub fn prompt_mut(&mut self) -> &mut String {
        &mut self.state.prompt
    }

    /// Start a generation.
    ///
    /// `prompt_override` (a history entry) takes precedence over the prompt
    /// field when non-empty. Returns the prompt to generate and marks the
    /// session as loading. Nothing changes on error.
    pub fn begin(&mut self, prompt_override: Option<&str>) -> Result<String, SessionError> {
        let prompt = prompt_override
            .filter(|p| !p.trim().is_empty())
            .unwrap_or(&self.state.prompt)
            .to_string();

        if prompt.trim().is_empty() {
            return Err(SessionError::EmptyPrompt);
        }
        if self.state.loading {
            return Err(SessionError::Busy);
        }

        self.state.loading = true;
        info!(
            "Generating with {}/{}: {}",
            self.provider.name(),
            self.provider.engine(),
            prompt
        );
        Ok(prompt)
    }

    /// Request body for `prompt` with this session's parameters.
    pub fn request_for(&self, prompt: &str) -> GenerationRequest {
        GenerationRequest::new(prompt, &self.generation)
    }

    /// Apply the outcome of a request started with [`begin`](Self::begin).
    ///
    /// Success replaces the image and records the prompt in the history;
    /// failure leaves both as they were.
    pub fn complete(
        &mut self,
        prompt: &str,
        result: Result<GeneratedImage, ProviderError>,
    ) -> Result<&GeneratedImage, SessionError> {
        self.state.loading = false;

        match result {
            Ok(image) => {
                self.state.history.record(prompt);
                let image: &GeneratedImage = self.state.image.insert(image);
                Ok(image)
            }
            Err(e) => {
                error!("Error generating image for '{}': {}", prompt, e);
                Err(SessionError::Generation(e))
            }
        }
    }

    /// Run a whole generation: `begin`, the provider call, `complete`.
    pub async fn generate(
        &mut self,
        prompt_override: Option<&str>,
    ) -> Result<&GeneratedImage, SessionError> {
        let prompt = self.begin(prompt_override)?;
        let request = self.request_for(&prompt);
        let provider = self.provider();

        let result = provider.generate(&request).await;
        self.complete(&prompt, result)
    }
}
