mod canvas;
mod footer;
mod header;
mod history;
mod modal;
mod prompt;

use ratatui::{
    Frame,
    style::{Modifier, Style},
    widgets::{Block, Borders},
};

use crate::tui::layout::main_layout;

use super::{TuiApp, util::glow_color};

impl TuiApp {
    pub(super) fn draw(&self, frame: &mut Frame) {
        let pulse = glow_color(self.anim_tick);
        let outer = Block::default()
            .title("╼ PIXGEN ╾")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(pulse).add_modifier(Modifier::BOLD));
        let inner_area = outer.inner(frame.area());
        frame.render_widget(outer, frame.area());

        let areas = main_layout(inner_area);
        self.draw_header(frame, areas.header);
        self.draw_prompt(frame, areas.prompt);
        self.draw_history(frame, areas.history);
        self.draw_image(frame, areas.image);
        self.draw_footer(frame, areas.footer);

        if self.notice.is_some() {
            self.draw_notice(frame);
        }
    }
}
