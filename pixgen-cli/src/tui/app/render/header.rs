use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::tui::theme;

use super::super::{TuiApp, util::spinner_frame};

impl TuiApp {
    pub(super) fn draw_header(&self, frame: &mut Frame, area: Rect) {
        let activity = if self.session.state().is_loading() {
            Span::styled(
                format!("{} generating", spinner_frame(self.anim_tick)),
                Style::default().fg(Color::Yellow),
            )
        } else {
            Span::styled("idle", theme::status_ok())
        };

        let line = Line::from(vec![
            Span::styled("TEXT TO IMAGE", theme::header_title()),
            Span::raw(" | "),
            Span::styled(
                format!("engine {}", self.engine),
                Style::default().fg(Color::Cyan),
            ),
            Span::raw(" | "),
            activity,
        ]);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme::border(false));
        frame.render_widget(Paragraph::new(line).block(block), area);
    }
}
