use std::time::{Duration, Instant};

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Widget};
use tracing::{debug, info};

use crate::Theme;
use crate::animation::{AnimatedValue, SpringConfig};
use crate::catalog::ServiceDescriptor;
use crate::config::AnimationConfig;
use crate::screen::ScreenEvent;

pub const LINK_LABEL: &str = "Learn More";

/// Rows taken by one card, borders included.
pub const CARD_HEIGHT: u16 = 7;

/// Share of the available width a card at rest takes up.
const WIDTH_RATIO: f64 = 0.9;

const REST_SCALE: f64 = 1.0;

// Rows inside the border
const ICON_ROW: u16 = 0;
const TITLE_ROW: u16 = 2;
const LINK_ROW: u16 = 4;

/// View-model of one service card: its descriptor plus press feedback.
#[derive(Debug, Clone)]
pub struct ServiceCard {
    index: usize,
    descriptor: &'static ServiceDescriptor,
    scale: AnimatedValue,
    pressed: bool,
    release_at: Option<Instant>,
    press_scale: f64,
    spring: SpringConfig,
}

impl ServiceCard {
    pub fn new(index: usize, descriptor: &'static ServiceDescriptor, config: &AnimationConfig) -> Self {
        Self {
            index,
            descriptor,
            scale: AnimatedValue::new(REST_SCALE),
            pressed: false,
            release_at: None,
            press_scale: config.press_scale.clamp(0.0, REST_SCALE),
            spring: config.spring(),
        }
    }

    pub const fn index(&self) -> usize {
        self.index
    }

    pub const fn descriptor(&self) -> &'static ServiceDescriptor {
        self.descriptor
    }

    pub const fn title(&self) -> &'static str {
        self.descriptor.title
    }

    pub const fn scale(&self) -> f64 {
        self.scale.value()
    }

    pub const fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub const fn is_animating(&self) -> bool {
        self.scale.is_animating()
    }

    pub fn on_press_start(&mut self, now: Instant) {
        debug!(card = self.descriptor.title, "Press start");
        self.pressed = true;
        self.release_at = None;
        self.scale.start_spring(self.press_scale, self.spring, now);
    }

    pub fn on_press_end(&mut self, now: Instant) {
        debug!(card = self.descriptor.title, "Press end");
        self.pressed = false;
        self.release_at = None;
        self.scale.start_spring(REST_SCALE, self.spring, now);
    }

    /// Report a completed tap on the link. Independent of the press feedback.
    pub fn on_activate(&self) -> ScreenEvent {
        info!("{} link clicked", self.descriptor.title);
        ScreenEvent::ServiceActivated {
            index: self.index,
            title: self.descriptor.title,
        }
    }

    /// Press, activate, and schedule the release `hold` later.
    pub fn tap(&mut self, now: Instant, hold: Duration) -> ScreenEvent {
        self.on_press_start(now);
        self.release_at = Some(now + hold);
        self.on_activate()
    }

    pub fn advance(&mut self, now: Instant) {
        if let Some(release_at) = self.release_at
            && release_at <= now
        {
            self.on_press_end(release_at);
        }
        self.scale.advance(now);
    }

    /// Card outline inside `slot` at the current scale, centered horizontally.
    pub fn outline(&self, slot: Rect) -> Rect {
        outline_at(slot, self.scale.value())
    }

    /// Where the link is drawn when the card occupies `slot`.
    pub fn link_area(slot: Rect) -> Rect {
        let inner = Block::default()
            .borders(Borders::ALL)
            .inner(outline_at(slot, REST_SCALE));
        let width = u16::try_from(LINK_LABEL.len())
            .unwrap_or(u16::MAX)
            .min(inner.width);
        Rect::new(
            inner.x + (inner.width - width) / 2,
            inner.y + LINK_ROW,
            width,
            1,
        )
        .intersection(slot)
    }
}

fn outline_at(slot: Rect, scale: f64) -> Rect {
    let width = (f64::from(slot.width) * WIDTH_RATIO * scale).round();
    let width = (width.max(0.0) as u16).min(slot.width);
    Rect::new(
        slot.x + (slot.width - width) / 2,
        slot.y,
        width,
        CARD_HEIGHT.min(slot.height),
    )
}

/// Renders a [`ServiceCard`] into the slot it occupies in the list.
pub struct CardView<'a> {
    pub card: &'a ServiceCard,
    pub theme: &'a Theme,
    pub focused: bool,
}

impl Widget for CardView<'_> {
    fn render(self, slot: Rect, buf: &mut Buffer) {
        let theme = self.theme;
        let area = self.card.outline(slot);
        let border_color = if self.focused {
            theme.focus
        } else {
            theme.card_border
        };

        Clear.render(area, buf);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(border_color))
            .style(Style::default().bg(theme.card_bg));
        let inner = block.inner(area);
        block.render(area, buf);

        let row = |offset: u16| Rect::new(inner.x, inner.y + offset, inner.width, 1).intersection(inner);

        Line::from(self.card.descriptor().glyph())
            .style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .render(row(ICON_ROW), buf);

        Line::from(self.card.title())
            .style(Style::default().fg(theme.text).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .render(row(TITLE_ROW), buf);

        let mut link_style = Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::UNDERLINED);
        if self.card.is_pressed() {
            link_style = link_style.add_modifier(Modifier::DIM);
        }
        Line::from(LINK_LABEL)
            .style(link_style)
            .alignment(Alignment::Center)
            .render(row(LINK_ROW), buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SERVICES;

    const MS: Duration = Duration::from_millis(1);

    fn card(index: usize) -> ServiceCard {
        ServiceCard::new(index, &SERVICES[index], &AnimationConfig::default())
    }

    #[test]
    fn test_press_and_release_return_to_rest() {
        let start = Instant::now();
        let mut card = card(0);

        card.on_press_start(start);
        card.advance(start + 50 * MS);
        assert!(card.is_pressed());
        assert!(card.scale() < 1.0);

        card.advance(start + 2000 * MS);
        assert!((card.scale() - 0.95).abs() < 1e-9);

        card.on_press_end(start + 2000 * MS);
        card.advance(start + 4000 * MS);
        assert!(!card.is_pressed());
        assert_eq!(card.scale(), 1.0);
        assert!(!card.is_animating());
    }

    #[test]
    fn test_release_before_spring_settles() {
        let start = Instant::now();
        let mut card = card(3);
        card.on_press_start(start);
        card.advance(start + 20 * MS);
        card.on_press_end(start + 20 * MS);
        card.advance(start + 3000 * MS);
        assert_eq!(card.scale(), 1.0);
    }

    #[test]
    fn test_activation_reports_own_title() {
        let card = card(7);
        assert_eq!(
            card.on_activate(),
            ScreenEvent::ServiceActivated {
                index: 7,
                title: "Nagara Nila",
            }
        );
    }

    #[test]
    fn test_tap_releases_after_hold() {
        let start = Instant::now();
        let mut card = card(1);
        let event = card.tap(start, 120 * MS);
        assert!(matches!(event, ScreenEvent::ServiceActivated { index: 1, .. }));
        assert!(card.is_pressed());

        card.advance(start + 100 * MS);
        assert!(card.is_pressed());
        card.advance(start + 130 * MS);
        assert!(!card.is_pressed());

        card.advance(start + 3000 * MS);
        assert_eq!(card.scale(), 1.0);
    }

    #[test]
    fn test_outline_shrinks_with_scale() {
        let start = Instant::now();
        let slot = Rect::new(0, 0, 200, CARD_HEIGHT);
        let mut card = card(0);
        assert_eq!(card.outline(slot), Rect::new(10, 0, 180, CARD_HEIGHT));

        card.on_press_start(start);
        card.advance(start + 2000 * MS);
        let pressed = card.outline(slot);
        assert_eq!(pressed.width, 171);
        assert_eq!(pressed.x, 14);
    }

    #[test]
    fn test_renders_icon_title_and_link() {
        let slot = Rect::new(0, 0, 40, CARD_HEIGHT);
        let mut buf = Buffer::empty(slot);
        let card = card(0);
        CardView {
            card: &card,
            theme: &Theme::default(),
            focused: false,
        }
        .render(slot, &mut buf);

        let row = |y: u16| -> String { (0..40).map(|x| buf[(x, y)].symbol().to_string()).collect() };
        assert!(row(1).contains(SERVICES[0].glyph()));
        assert!(row(3).contains("Patta Maarudhal"));
        assert!(row(5).contains(LINK_LABEL));

        let link = ServiceCard::link_area(slot);
        let under_link: String = (link.x..link.right()).map(|x| buf[(x, link.y)].symbol().to_string()).collect();
        assert_eq!(under_link, LINK_LABEL);
    }
}
