use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::state::{FocusPane, step_selection};

use super::TuiApp;

impl TuiApp {
    pub(super) fn handle_key(&mut self, key: KeyEvent) {
        if self.notice.is_some() {
            self.handle_notice_key(key);
            return;
        }

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_exit = true
            }
            KeyCode::Esc => self.should_exit = true,
            KeyCode::Tab => {
                self.focus = self.focus.next(!self.session.state().history().is_empty())
            }
            KeyCode::Char(c @ '1'..='3') if key.modifiers.contains(KeyModifiers::ALT) => {
                let idx = (c as u8 - b'1') as usize;
                if idx < self.session.state().history().len() {
                    self.history_idx = idx;
                    self.start_generation(Some(idx));
                }
            }
            _ => match self.focus {
                FocusPane::Prompt => self.handle_prompt_key(key),
                FocusPane::History => self.handle_history_key(key),
            },
        }
    }

    fn handle_notice_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_exit = true
            }
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => self.notice = None,
            _ => {}
        }
    }

    fn handle_prompt_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.start_generation(None),
            KeyCode::Backspace => {
                self.session.prompt_mut().pop();
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.session.prompt_mut().clear();
            }
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.session.prompt_mut().push(c);
            }
            _ => {}
        }
    }

    fn handle_history_key(&mut self, key: KeyEvent) {
        let len = self.session.state().history().len();
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => {
                self.history_idx = step_selection(self.history_idx, -1, len)
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.history_idx = step_selection(self.history_idx, 1, len)
            }
            KeyCode::Enter if len > 0 => self.start_generation(Some(self.history_idx)),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crossterm::event::KeyEventKind;
    use pixgen_core::{GenerationSettings, OutputSettings};
    use pixgen_engine::{
        GeneratedImage, GenerationRequest, GenerationSession, ImageProvider, ProviderError,
    };

    use super::*;

    struct Unreachable;

    #[async_trait::async_trait]
    impl ImageProvider for Unreachable {
        fn name(&self) -> &str {
            "unreachable"
        }

        fn engine(&self) -> &str {
            "unreachable-engine"
        }

        async fn generate(
            &self,
            _request: &GenerationRequest,
        ) -> Result<GeneratedImage, ProviderError> {
            Err(ProviderError::NoImage)
        }
    }

    fn app() -> TuiApp {
        let session = GenerationSession::new(Arc::new(Unreachable), GenerationSettings::default());
        TuiApp::new(
            session,
            OutputSettings {
                dir: Default::default(),
                save: false,
            },
        )
    }

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: crossterm::event::KeyEventState::NONE,
        }
    }

    fn type_text(app: &mut TuiApp, text: &str) {
        for c in text.chars() {
            app.handle_key(press(KeyCode::Char(c), KeyModifiers::NONE));
        }
    }

    #[test]
    fn test_typing_edits_prompt() {
        let mut app = app();
        type_text(&mut app, "a cat");
        app.handle_key(press(KeyCode::Backspace, KeyModifiers::NONE));
        assert_eq!(app.session.state().prompt(), "a ca");

        app.handle_key(press(KeyCode::Char('u'), KeyModifiers::CONTROL));
        assert_eq!(app.session.state().prompt(), "");
    }

    #[test]
    fn test_enter_on_empty_prompt_shows_notice_then_dismisses() {
        let mut app = app();
        app.handle_key(press(KeyCode::Enter, KeyModifiers::NONE));
        assert_eq!(app.notice.as_deref(), Some("Please enter a prompt!"));

        // Typing while the notice is up does not reach the prompt.
        type_text(&mut app, "x");
        assert_eq!(app.session.state().prompt(), "");

        app.handle_key(press(KeyCode::Esc, KeyModifiers::NONE));
        assert!(app.notice.is_none());
        assert!(!app.should_exit);
    }

    #[test]
    fn test_tab_stays_on_prompt_without_history() {
        let mut app = app();
        app.handle_key(press(KeyCode::Tab, KeyModifiers::NONE));
        assert_eq!(app.focus, FocusPane::Prompt);
    }

    #[test]
    fn test_escape_and_ctrl_c_exit() {
        let mut escaped = app();
        escaped.handle_key(press(KeyCode::Esc, KeyModifiers::NONE));
        assert!(escaped.should_exit);

        let mut interrupted = app();
        interrupted.handle_key(press(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(interrupted.should_exit);
        assert_eq!(interrupted.session.state().prompt(), "");
    }

    #[test]
    fn test_alt_digit_without_history_is_ignored() {
        let mut app = app();
        app.handle_key(press(KeyCode::Char('1'), KeyModifiers::ALT));
        assert!(app.notice.is_none());
        assert!(!app.session.state().is_loading());
        assert_eq!(app.session.state().prompt(), "");
    }
}
