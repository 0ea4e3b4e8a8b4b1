use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use pixgen_core::history_label;

use crate::tui::{state::FocusPane, theme};

use super::super::TuiApp;

impl TuiApp {
    pub(super) fn draw_history(&self, frame: &mut Frame, area: Rect) {
        let focused = self.focus == FocusPane::History && self.notice.is_none();
        let block = Block::default()
            .title(" Recent ")
            .borders(Borders::ALL)
            .border_style(theme::border(focused));

        let history = self.session.state().history();
        let line = if history.is_empty() {
            Line::from(Span::styled("No history yet", theme::placeholder()))
        } else {
            let mut spans = Vec::new();
            for (idx, prompt) in history.iter().enumerate() {
                if idx > 0 {
                    spans.push(Span::raw(" "));
                }
                let style = if focused && idx == self.history_idx {
                    theme::selected()
                } else {
                    theme::chip()
                };
                spans.push(Span::styled(
                    format!(" {} {} ", idx + 1, history_label(prompt)),
                    style,
                ));
            }
            Line::from(spans)
        };

        frame.render_widget(Paragraph::new(line).block(block), area);
    }
}
