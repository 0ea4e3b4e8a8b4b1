use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Screen areas, top to bottom.
pub struct MainAreas {
    pub header: Rect,
    pub prompt: Rect,
    pub history: Rect,
    pub image: Rect,
    pub footer: Rect,
}

pub fn main_layout(area: Rect) -> MainAreas {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(1),
        ])
        .split(area);

    MainAreas {
        header: chunks[0],
        prompt: chunks[1],
        history: chunks[2],
        image: chunks[3],
        footer: chunks[4],
    }
}
