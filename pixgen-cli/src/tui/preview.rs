//! Terminal rendering of generated images.
//!
//! Each cell shows two vertically stacked pixels with the upper half block
//! character: the foreground colors the top pixel, the background the bottom.

use std::cell::RefCell;

use image::{DynamicImage, Rgb, imageops::FilterType};
use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};

const UPPER_HALF: &str = "\u{2580}";

/// Fit `image` into `width` x `height` cells, keeping its aspect ratio.
pub fn half_block_lines(image: &DynamicImage, width: u16, height: u16) -> Vec<Line<'static>> {
    if width == 0 || height == 0 {
        return Vec::new();
    }

    let resized = image
        .resize(width as u32, height as u32 * 2, FilterType::Triangle)
        .to_rgb8();
    let (w, h) = resized.dimensions();

    (0..h)
        .step_by(2)
        .map(|y| {
            let spans: Vec<Span<'static>> = (0..w)
                .map(|x| {
                    let top = rgb(resized.get_pixel(x, y));
                    let bottom = if y + 1 < h {
                        rgb(resized.get_pixel(x, y + 1))
                    } else {
                        Color::Reset
                    };
                    Span::styled(UPPER_HALF, Style::default().fg(top).bg(bottom))
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

fn rgb(pixel: &Rgb<u8>) -> Color {
    let [r, g, b] = pixel.0;
    Color::Rgb(r, g, b)
}

/// Decoded image plus the lines rendered for the last area size.
pub struct Preview {
    image: DynamicImage,
    cache: RefCell<Option<((u16, u16), Vec<Line<'static>>)>>,
}

impl Preview {
    pub fn new(image: DynamicImage) -> Self {
        Self {
            image,
            cache: RefCell::new(None),
        }
    }

    /// Lines for an area of `width` x `height` cells.
    pub fn lines(&self, width: u16, height: u16) -> Vec<Line<'static>> {
        if let Some((size, lines)) = &*self.cache.borrow()
            && *size == (width, height)
        {
            return lines.clone();
        }

        let lines = half_block_lines(&self.image, width, height);
        *self.cache.borrow_mut() = Some(((width, height), lines.clone()));
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    fn solid(width: u32, height: u32, color: [u8; 3]) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb(color)))
    }

    #[test]
    fn test_square_image_fills_width() {
        let lines = half_block_lines(&solid(4, 4, [10, 20, 30]), 10, 10);

        assert_eq!(lines.len(), 5);
        for line in &lines {
            assert_eq!(line.spans.len(), 10);
            assert_eq!(line.spans[0].content, UPPER_HALF);
            assert_eq!(line.spans[0].style.fg, Some(Color::Rgb(10, 20, 30)));
            assert_eq!(line.spans[0].style.bg, Some(Color::Rgb(10, 20, 30)));
        }
    }

    #[test]
    fn test_odd_height_leaves_bottom_blank() {
        let lines = half_block_lines(&solid(3, 3, [200, 0, 0]), 3, 10);

        assert_eq!(lines.len(), 2);
        let last = lines.last().unwrap();
        assert_eq!(last.spans[0].style.bg, Some(Color::Reset));
    }

    #[test]
    fn test_empty_area_renders_nothing() {
        assert!(half_block_lines(&solid(2, 2, [0, 0, 0]), 0, 5).is_empty());
        assert!(half_block_lines(&solid(2, 2, [0, 0, 0]), 5, 0).is_empty());
    }

    #[test]
    fn test_preview_cache_follows_area_size() {
        let preview = Preview::new(solid(8, 8, [1, 2, 3]));

        let first = preview.lines(8, 4);
        assert_eq!(first, preview.lines(8, 4));

        let wider = preview.lines(4, 2);
        assert_eq!(wider.len(), 2);
        assert_eq!(wider[0].spans.len(), 4);
    }
}
