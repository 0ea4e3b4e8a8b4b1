use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};

use crate::tui::theme;

use super::super::{TuiApp, util::spinner_frame};

impl TuiApp {
    pub(super) fn draw_image(&self, frame: &mut Frame, area: Rect) {
        let mut block = Block::default()
            .title(" Image ")
            .borders(Borders::ALL)
            .border_style(theme::border(false));

        if let Some(image) = self.session.state().image() {
            let mut info = format!("{}x{}", image.width(), image.height());
            if let Some(seed) = image.seed() {
                info.push_str(&format!(" seed {}", seed));
            }
            if let Some(path) = &self.last_saved {
                info.push_str(&format!(" saved {}", path.display()));
            }
            block = block.title_bottom(Line::from(format!(" {} ", info)).right_aligned());
        }

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let loading = self.session.state().is_loading();
        match &self.preview {
            Some(preview) => {
                let lines = preview.lines(inner.width, inner.height);
                frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
            }
            None if loading => {
                let text = format!("{} Generating...", spinner_frame(self.anim_tick));
                frame.render_widget(
                    Paragraph::new(text)
                        .style(Style::default().fg(Color::Yellow))
                        .alignment(Alignment::Center),
                    inner,
                );
            }
            None => {
                frame.render_widget(
                    Paragraph::new("Your image will appear here")
                        .style(theme::placeholder())
                        .alignment(Alignment::Center),
                    inner,
                );
            }
        }
    }
}
