//! Stability AI text-to-image provider.

pub mod client;

pub use client::{Artifact, StabilityClient, TextToImageResponse};
