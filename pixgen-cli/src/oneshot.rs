//! Non-interactive mode: one prompt, one image, then exit.

use std::path::PathBuf;

use tracing::{info, warn};

use pixgen_core::OutputSettings;
use pixgen_engine::{GenerationSession, SessionError};

#[derive(Debug, thiserror::Error)]
pub enum OneShotError {
    #[error("{}", .0.notice())]
    Session(#[from] SessionError),
}

/// What a one-shot run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OneShotReport {
    pub width: u32,
    pub height: u32,
    pub seed: Option<u64>,
    pub saved_to: Option<PathBuf>,
    /// Set when saving was requested but failed; the image is still reported.
    pub save_error: Option<String>,
}

impl std::fmt::Display for OneShotReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Generated {}x{} image", self.width, self.height)?;
        if let Some(seed) = self.seed {
            write!(f, " (seed {})", seed)?;
        }
        if let Some(path) = &self.saved_to {
            write!(f, "\nSaved to {}", path.display())?;
        }
        if let Some(err) = &self.save_error {
            write!(f, "\nNot saved: {}", err)?;
        }
        Ok(())
    }
}

pub async fn run(
    session: &mut GenerationSession,
    prompt: &str,
    output: &OutputSettings,
) -> Result<OneShotReport, OneShotError> {
    session.set_prompt(prompt);
    let image = session.generate(None).await?;

    let mut report = OneShotReport {
        width: image.width(),
        height: image.height(),
        seed: image.seed(),
        saved_to: None,
        save_error: None,
    };

    if output.save {
        match image.save_to_dir(&output.dir, prompt) {
            Ok(path) => {
                info!("Saved image to {}", path.display());
                report.saved_to = Some(path);
            }
            Err(e) => {
                warn!("Failed to save image: {}", e);
                report.save_error = Some(e.to_string());
            }
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pixgen_core::GenerationSettings;
    use pixgen_engine::{GeneratedImage, GenerationRequest, ImageProvider, ProviderError};

    use super::*;

    struct Fixed(Option<GeneratedImage>);

    #[async_trait::async_trait]
    impl ImageProvider for Fixed {
        fn name(&self) -> &str {
            "fixed"
        }

        fn engine(&self) -> &str {
            "fixed-engine"
        }

        async fn generate(
            &self,
            _request: &GenerationRequest,
        ) -> Result<GeneratedImage, ProviderError> {
            self.0.clone().ok_or(ProviderError::NoImage)
        }
    }

    fn png() -> GeneratedImage {
        let img = image::RgbImage::from_pixel(3, 2, image::Rgb([40, 80, 120]));
        let mut out = std::io::Cursor::new(Vec::new());
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut out, image::ImageFormat::Png)
            .unwrap();
        GeneratedImage::from_bytes(out.into_inner())
            .unwrap()
            .with_metadata(Some(42), Some("SUCCESS".to_string()))
    }

    fn session(image: Option<GeneratedImage>) -> GenerationSession {
        GenerationSession::new(Arc::new(Fixed(image)), GenerationSettings::default())
    }

    #[tokio::test]
    async fn test_saves_image_into_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let output = OutputSettings {
            dir: dir.path().join("out"),
            save: true,
        };
        let mut session = session(Some(png()));

        let report = run(&mut session, "red fox", &output).await.unwrap();

        assert_eq!((report.width, report.height), (3, 2));
        assert_eq!(report.seed, Some(42));
        let saved = report.saved_to.expect("saved path");
        assert!(saved.starts_with(dir.path().join("out")));
        assert!(saved.to_string_lossy().ends_with("red-fox.png"));
        assert_eq!(std::fs::read(&saved).unwrap(), png().bytes());
        assert_eq!(session.state().history().get(0), Some("red fox"));
    }

    #[tokio::test]
    async fn test_no_save_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let output = OutputSettings {
            dir: dir.path().join("out"),
            save: false,
        };
        let mut session = session(Some(png()));

        let report = run(&mut session, "red fox", &output).await.unwrap();

        assert!(report.saved_to.is_none());
        assert!(report.save_error.is_none());
        assert!(!dir.path().join("out").exists());
        assert_eq!(report.to_string(), "Generated 3x2 image (seed 42)");
    }

    #[tokio::test]
    async fn test_save_failure_still_reports_image() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("taken");
        std::fs::write(&blocker, b"not a directory").unwrap();
        let output = OutputSettings {
            dir: blocker,
            save: true,
        };
        let mut session = session(Some(png()));

        let report = run(&mut session, "red fox", &output).await.unwrap();

        assert_eq!((report.width, report.height), (3, 2));
        assert!(report.saved_to.is_none());
        assert!(report.save_error.is_some());
        assert!(report.to_string().contains("\nNot saved: "));
        assert_eq!(session.state().history().get(0), Some("red fox"));
    }

    #[tokio::test]
    async fn test_failures_surface_the_notice() {
        let output = OutputSettings {
            dir: PathBuf::new(),
            save: false,
        };

        let err = run(&mut session(Some(png())), "   ", &output)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Please enter a prompt!");

        let err = run(&mut session(None), "red fox", &output)
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to generate image. Check the logs for details."
        );
    }
}
