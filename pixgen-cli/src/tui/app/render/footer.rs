use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::tui::state::FocusPane;

use super::super::TuiApp;

impl TuiApp {
    pub(super) fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let mut spans: Vec<Span> = Vec::new();

        for (idx, (key, desc)) in self.current_hints().iter().enumerate() {
            if idx > 0 {
                spans.push(Span::styled(" ", Style::default().fg(Color::DarkGray)));
            }
            spans.push(Span::styled(
                format!(" {} ", key),
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Rgb(60, 80, 90))
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled(
                format!(" {}", desc),
                Style::default().fg(Color::DarkGray),
            ));
        }

        spans.push(Span::styled(
            format!("  {}", self.status),
            Style::default().fg(Color::Rgb(80, 100, 110)),
        ));

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn current_hints(&self) -> Vec<(&'static str, &'static str)> {
        if self.notice.is_some() {
            return vec![("Enter", "Dismiss")];
        }

        let has_history = !self.session.state().history().is_empty();
        let mut hints = match self.focus {
            FocusPane::Prompt => vec![("Enter", "Generate")],
            FocusPane::History => vec![("←/→", "Pick"), ("Enter", "Reuse")],
        };
        if has_history {
            hints.push(("Tab", "Pane"));
            hints.push(("Alt+1-3", "Recent"));
        }
        hints.push(("Esc", "Quit"));
        hints
    }
}
