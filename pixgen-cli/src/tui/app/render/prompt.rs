use ratatui::{
    Frame,
    layout::{Position, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::tui::{state::FocusPane, theme};

use super::super::TuiApp;

const PLACEHOLDER: &str = "Enter your prompt...";

/// Horizontal scroll and cursor column for a prompt `text_width` columns wide
/// in a box `inner_width` columns wide. The tail of a long prompt stays in view.
fn prompt_view(text_width: usize, inner_width: u16) -> (u16, u16) {
    let width = u16::try_from(text_width).unwrap_or(u16::MAX);
    let last_col = inner_width.saturating_sub(1);
    let scroll = width.saturating_sub(last_col);
    (scroll, (width - scroll).min(last_col))
}

impl TuiApp {
    pub(super) fn draw_prompt(&self, frame: &mut Frame, area: Rect) {
        let focused = self.focus == FocusPane::Prompt && self.notice.is_none();
        let block = Block::default()
            .title(" Prompt ")
            .borders(Borders::ALL)
            .border_style(theme::border(focused));
        let inner = block.inner(area);

        let text = self.session.state().prompt();
        let line = if text.is_empty() {
            Line::from(Span::styled(PLACEHOLDER, theme::placeholder()))
        } else {
            Line::from(text.to_string())
        };

        let text_width = if text.is_empty() { 0 } else { line.width() };
        let (scroll, cursor) = prompt_view(text_width, inner.width);
        frame.render_widget(Paragraph::new(line).block(block).scroll((0, scroll)), area);

        if focused {
            frame.set_cursor_position(Position::new(inner.x + cursor, inner.y));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_prompt_does_not_scroll() {
        assert_eq!(prompt_view(0, 20), (0, 0));
        assert_eq!(prompt_view(5, 20), (0, 5));
    }

    #[test]
    fn test_long_prompt_keeps_cursor_on_last_column() {
        assert_eq!(prompt_view(30, 20), (11, 19));
        assert_eq!(prompt_view(100_000, 20), (u16::MAX - 19, 19));
    }

    #[test]
    fn test_wide_characters_use_display_columns() {
        let line = Line::from("猫が好き");
        assert_eq!(line.width(), 8);
        assert_eq!(prompt_view(line.width(), 20), (0, 8));
    }
}
