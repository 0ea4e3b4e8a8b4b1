//! Generated image payloads.

use std::io::{self, Cursor};
use std::path::{Path, PathBuf};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use chrono::Utc;
use image::{DynamicImage, ImageFormat, ImageReader};

use crate::providers::ProviderError;

const MAX_SLUG_CHARS: usize = 40;

/// A decoded image returned by a provider.
///
/// The bytes are checked to be a readable image when the value is built, so
/// holders can rely on `width`/`height` and on `decode` succeeding.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedImage {
    bytes: Vec<u8>,
    format: ImageFormat,
    width: u32,
    height: u32,
    seed: Option<u64>,
    finish_reason: Option<String>,
}

impl GeneratedImage {
    /// Build from raw encoded image bytes (PNG, JPEG or WebP).
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, ProviderError> {
        let reader = ImageReader::new(Cursor::new(bytes.as_slice()))
            .with_guessed_format()
            .map_err(|e| ProviderError::InvalidImage(e.to_string()))?;
        let format = reader
            .format()
            .ok_or_else(|| ProviderError::InvalidImage("unrecognized image format".to_string()))?;
        let (width, height) = reader
            .into_dimensions()
            .map_err(|e| ProviderError::InvalidImage(e.to_string()))?;

        Ok(Self {
            bytes,
            format,
            width,
            height,
            seed: None,
            finish_reason: None,
        })
    }

    /// Build from a base64 artifact payload.
    pub fn from_base64(payload: &str) -> Result<Self, ProviderError> {
        let bytes = STANDARD
            .decode(payload.trim())
            .map_err(|e| ProviderError::InvalidImage(format!("bad base64: {}", e)))?;
        Self::from_bytes(bytes)
    }

    /// Attach the artifact metadata reported by the API.
    pub fn with_metadata(mut self, seed: Option<u64>, finish_reason: Option<String>) -> Self {
        self.seed = seed;
        self.finish_reason = finish_reason;
        self
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn finish_reason(&self) -> Option<&str> {
        self.finish_reason.as_deref()
    }

    /// `data:` URL embedding the image, e.g. `data:image/png;base64,...`.
    pub fn data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.format.to_mime_type(),
            STANDARD.encode(&self.bytes)
        )
    }

    /// Decode the pixels.
    pub fn decode(&self) -> Result<DynamicImage, image::ImageError> {
        image::load_from_memory_with_format(&self.bytes, self.format)
    }

    /// Write the image into `dir`, named after the time and the prompt.
    ///
    /// Returns the path written. The directory is created if needed.
    pub fn save_to_dir(&self, dir: &Path, prompt: &str) -> io::Result<PathBuf> {
        std::fs::create_dir_all(dir)?;

        let timestamp = Utc::now().format("%Y%m%d-%H%M%S%.3f");
        let extension = self.format.extensions_str().first().copied().unwrap_or("img");
        let path = dir.join(format!("{}-{}.{}", timestamp, prompt_slug(prompt), extension));

        std::fs::write(&path, &self.bytes)?;
        Ok(path)
    }
}

/// Lowercase, filename-safe rendition of a prompt.
fn prompt_slug(prompt: &str) -> String {
    let mut slug = String::new();
    for c in prompt.chars() {
        if slug.chars().count() >= MAX_SLUG_CHARS {
            break;
        }
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }

    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        "image".to_string()
    } else {
        slug.to_string()
    }
}
