pub mod artifact;
pub mod providers;
pub mod session;

pub use artifact::GeneratedImage;
pub use providers::provider::{GenerationRequest, ImageProvider, ProviderError, TextPrompt};
pub use providers::stability::StabilityClient;
pub use session::{GenerationSession, SessionError, SessionState};
