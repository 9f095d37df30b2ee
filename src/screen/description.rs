use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Block, Padding, Paragraph, Widget, Wrap};

use crate::Theme;

pub const DESCRIPTION: &str = "Since all the information provided through this online service is instantly updated and published, there is no need to visit any Revenue Department office in person to get this information. Patta change applications can be submitted through any Common Service Center in the state. The fee for this is Rs. 60/- at the Common Service Center.";

const PADDING_X: u16 = 2;
const PADDING_Y: u16 = 1;

/// Static introduction shown above the service cards.
pub struct DescriptionBlock;

impl DescriptionBlock {
    fn paragraph(theme: &Theme) -> Paragraph<'static> {
        Paragraph::new(DESCRIPTION)
            .style(Style::default().fg(theme.text))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
    }

    /// Rows needed to show the whole text at `width`, padding included.
    pub fn height(width: u16) -> u16 {
        let inner = width.saturating_sub(2 * PADDING_X).max(1);
        let lines = Self::paragraph(&Theme::default()).line_count(inner);
        u16::try_from(lines)
            .unwrap_or(u16::MAX)
            .saturating_add(2 * PADDING_Y)
    }

    pub fn render(buf: &mut Buffer, area: Rect, theme: &Theme) {
        let block = Block::default()
            .padding(Padding::new(PADDING_X, PADDING_X, PADDING_Y, PADDING_Y))
            .style(Style::default().bg(theme.description_bg));
        let inner = block.inner(area);
        block.render(area, buf);
        Self::paragraph(theme).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_height_grows_as_width_shrinks() {
        assert!(DescriptionBlock::height(40) > DescriptionBlock::height(120));
        assert!(DescriptionBlock::height(120) >= 3);
    }

    #[test]
    fn test_renders_text_verbatim() {
        let width = 50;
        let area = Rect::new(0, 0, width, DescriptionBlock::height(width));
        let mut buf = Buffer::empty(area);
        DescriptionBlock::render(&mut buf, area, &Theme::default());

        let rendered: Vec<String> = (0..area.height)
            .map(|y| (0..width).map(|x| buf[(x, y)].symbol().to_string()).collect())
            .collect();
        let words: Vec<&str> = rendered.iter().flat_map(|row| row.split_whitespace()).collect();
        assert_eq!(words.join(" "), DESCRIPTION);

        // padding rows stay blank
        assert!(rendered[0].trim().is_empty());
        assert!(rendered[rendered.len() - 1].trim().is_empty());
    }
}
