mod actions;
mod input;
mod render;
mod util;

use std::{path::PathBuf, time::Duration};

use crossterm::event::{self, Event, KeyEventKind};
use ratatui::prelude::*;
use tokio::sync::mpsc;

use pixgen_core::OutputSettings;
use pixgen_engine::{GeneratedImage, GenerationSession, ProviderError};

use crate::tui::{preview::Preview, state::FocusPane};

/// Result of a request running off the UI loop
#[derive(Debug)]
pub(super) struct GenerationOutcome {
    pub(super) prompt: String,
    pub(super) result: Result<GeneratedImage, ProviderError>,
}

pub struct TuiApp {
    session: GenerationSession,
    output: OutputSettings,
    engine: String,

    focus: FocusPane,
    history_idx: usize,
    should_exit: bool,
    status: String,
    notice: Option<String>,

    preview: Option<Preview>,
    last_saved: Option<PathBuf>,

    outcome_tx: mpsc::UnboundedSender<GenerationOutcome>,
    outcome_rx: mpsc::UnboundedReceiver<GenerationOutcome>,

    anim_tick: usize,
}

impl TuiApp {
    pub fn new(session: GenerationSession, output: OutputSettings) -> Self {
        let engine = session.provider().engine().to_string();
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();

        Self {
            session,
            output,
            engine,

            focus: FocusPane::Prompt,
            history_idx: 0,
            should_exit: false,
            status: "Ready".to_string(),
            notice: None,

            preview: None,
            last_saved: None,

            outcome_tx,
            outcome_rx,

            anim_tick: 0,
        }
    }

    pub async fn run(
        &mut self,
        terminal: &mut Terminal<impl Backend>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        while !self.should_exit {
            terminal.draw(|f| self.draw(f))?;
            self.tick();
        }

        Ok(())
    }

    fn tick(&mut self) {
        self.anim_tick = self.anim_tick.wrapping_add(1);

        while let Ok(outcome) = self.outcome_rx.try_recv() {
            self.apply_outcome(outcome);
        }

        if event::poll(Duration::from_millis(50)).unwrap_or(false)
            && let Ok(Event::Key(key)) = event::read()
            && key.kind == KeyEventKind::Press
        {
            self.handle_key(key);
        }
    }
}
