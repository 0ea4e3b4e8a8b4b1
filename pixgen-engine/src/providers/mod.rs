pub mod provider;
pub mod query_dump;
pub mod stability;

pub use provider::{GenerationRequest, ImageProvider, ProviderError, TextPrompt};
pub use stability::StabilityClient;
