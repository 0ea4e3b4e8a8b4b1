use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Color,
};

const SPINNER: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

pub(super) fn spinner_frame(tick: usize) -> char {
    SPINNER[(tick / 2) % SPINNER.len()]
}

pub(super) fn glow_color(tick: usize) -> Color {
    let phase = tick % 200;
    let up = if phase <= 100 { phase } else { 200 - phase } as u8;
    let boost = (up as u16 * 90 / 100) as u8;
    Color::Rgb(30 + boost / 2, 90 + boost, 200 + boost / 4)
}

pub(super) fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    let h_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(v_chunks[1]);

    h_chunks[1]
}
