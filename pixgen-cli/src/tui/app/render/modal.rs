use ratatui::{
    Frame,
    layout::Alignment,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::tui::theme;

use super::super::{TuiApp, util::centered_fixed};

impl TuiApp {
    pub(super) fn draw_notice(&self, frame: &mut Frame) {
        let Some(notice) = &self.notice else {
            return;
        };

        let width = (notice.chars().count() as u16 + 6).clamp(30, 60);
        let area = centered_fixed(width, 5, frame.area());
        frame.render_widget(Clear, area);

        let block = Block::default()
            .title(" Notice ")
            .title_bottom(" Enter to dismiss ")
            .borders(Borders::ALL)
            .border_style(theme::status_err());

        frame.render_widget(
            Paragraph::new(notice.as_str())
                .block(block)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            area,
        );
    }
}
