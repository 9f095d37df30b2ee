use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Widget;

use crate::Theme;
use crate::catalog;

pub const TITLE: &str = "E-sevai";
pub const HEIGHT: u16 = 3;

/// Header with the menu toggle on the left and the title centered.
#[derive(Debug, Default)]
pub struct NavBar {
    toggle_area: Rect,
}

impl NavBar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `position` hits the menu toggle as of the last render.
    pub fn is_toggle_at(&self, position: Position) -> bool {
        self.toggle_area.contains(position)
    }

    pub fn render(&mut self, buf: &mut Buffer, area: Rect, theme: &Theme, menu_open: bool) {
        buf.set_style(
            area,
            Style::default().bg(theme.navbar_bg).fg(theme.navbar_fg),
        );
        if area.height == 0 {
            self.toggle_area = Rect::default();
            return;
        }

        let middle = Rect::new(area.x, area.y + area.height / 2, area.width, 1);
        Line::from(TITLE)
            .style(Style::default().add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .render(middle, buf);

        let mut toggle_style = Style::default();
        if menu_open {
            toggle_style = toggle_style.add_modifier(Modifier::REVERSED);
        }
        let glyph_area = Rect::new(area.x + 2, middle.y, 3, 1).intersection(area);
        Line::styled(format!(" {} ", catalog::glyph("menu")), toggle_style).render(glyph_area, buf);

        self.toggle_area = Rect::new(area.x, area.y, 7, area.height).intersection(area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_title_and_toggle() {
        let area = Rect::new(0, 0, 30, HEIGHT);
        let mut buf = Buffer::empty(area);
        let mut nav = NavBar::new();
        nav.render(&mut buf, area, &Theme::default(), false);

        let middle: String = (0..30).map(|x| buf[(x, 1)].symbol().to_string()).collect();
        assert!(middle.contains(TITLE));
        assert_eq!(buf[(3, 1)].symbol(), "☰");
        assert_eq!(buf[(0, 0)].bg, Theme::default().navbar_bg);

        assert!(nav.is_toggle_at(Position::new(3, 1)));
        assert!(!nav.is_toggle_at(Position::new(20, 1)));
    }
}
