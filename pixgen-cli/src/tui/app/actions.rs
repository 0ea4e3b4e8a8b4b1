use tracing::{info, warn};

use pixgen_engine::SessionError;

use crate::tui::{preview::Preview, state::step_selection};

use super::{GenerationOutcome, TuiApp};

impl TuiApp {
    /// Start a generation from the prompt field, or from a history entry.
    pub(super) fn start_generation(&mut self, history_entry: Option<usize>) {
        let chosen = history_entry
            .and_then(|idx| self.session.state().history().get(idx))
            .map(str::to_string);

        let prompt = match self.session.begin(chosen.as_deref()) {
            Ok(prompt) => prompt,
            Err(SessionError::Busy) => {
                self.status = SessionError::Busy.notice().to_string();
                return;
            }
            Err(e) => {
                self.notice = Some(e.notice().to_string());
                return;
            }
        };

        let request = self.session.request_for(&prompt);
        let provider = self.session.provider();
        let tx = self.outcome_tx.clone();
        self.status = format!("Generating \"{}\"", prompt);

        tokio::spawn(async move {
            let result = provider.generate(&request).await;
            let _ = tx.send(GenerationOutcome { prompt, result });
        });
    }

    /// Fold a finished request back into the session and the view.
    pub(super) fn apply_outcome(&mut self, outcome: GenerationOutcome) {
        let GenerationOutcome { prompt, result } = outcome;

        match self.session.complete(&prompt, result) {
            Ok(image) => {
                self.preview = match image.decode() {
                    Ok(decoded) => Some(Preview::new(decoded)),
                    Err(e) => {
                        warn!("Failed to decode image for preview: {}", e);
                        None
                    }
                };

                self.status = format!("Generated {}x{}", image.width(), image.height());

                if self.output.save {
                    match image.save_to_dir(&self.output.dir, &prompt) {
                        Ok(path) => {
                            info!("Saved image to {}", path.display());
                            self.last_saved = Some(path);
                        }
                        Err(e) => {
                            warn!("Failed to save image: {}", e);
                            self.status = format!("Generated, but saving failed: {}", e);
                        }
                    }
                }

                self.history_idx = 0;
            }
            Err(e) => {
                self.notice = Some(e.notice().to_string());
                self.status = "Generation failed".to_string();
            }
        }

        let len = self.session.state().history().len();
        self.history_idx = step_selection(self.history_idx, 0, len);
    }
}
