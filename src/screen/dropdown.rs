use std::time::{Duration, Instant};

use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Widget;
use tracing::{debug, info};

use crate::Theme;
use crate::animation::{AnimatedValue, Easing};
use crate::config::AnimationConfig;
use crate::ui::viewport;

pub const ITEM_LABEL: &str = "E-services";

/// Rows occupied by the fully expanded panel: padding, entry, divider.
pub const MAX_ROWS: u16 = 3;

/// Where the panel is in its open/close cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropdownPhase {
    Closed,
    Opening,
    Open,
    Closing,
}

/// Menu panel under the navigation bar, revealed by animating its height.
///
/// The panel is visible from the moment it starts opening until its height
/// has collapsed back to zero.
#[derive(Debug, Clone)]
pub struct DropdownPanel {
    phase: DropdownPhase,
    visible: bool,
    height: AnimatedValue,
    expanded_height: f64,
    duration: Duration,
    easing: Easing,
}

impl DropdownPanel {
    pub fn new(config: &AnimationConfig) -> Self {
        Self {
            phase: DropdownPhase::Closed,
            visible: false,
            height: AnimatedValue::new(0.0),
            expanded_height: config.dropdown_height.max(0.0),
            duration: config.dropdown_duration(),
            easing: Easing::Ease,
        }
    }

    pub const fn phase(&self) -> DropdownPhase {
        self.phase
    }

    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    pub const fn height(&self) -> f64 {
        self.height.value()
    }

    pub const fn expanded_height(&self) -> f64 {
        self.expanded_height
    }

    /// Whether the next toggle will close the panel.
    pub const fn is_opening_or_open(&self) -> bool {
        matches!(self.phase, DropdownPhase::Opening | DropdownPhase::Open)
    }

    pub fn toggle(&mut self, now: Instant) {
        let (phase, target) = if self.is_opening_or_open() {
            (DropdownPhase::Closing, 0.0)
        } else {
            self.visible = true;
            (DropdownPhase::Opening, self.expanded_height)
        };
        debug!(from = ?self.phase, to = ?phase, height = self.height.value(), "Dropdown toggled");
        self.phase = phase;
        self.height.start_timing(target, self.duration, self.easing, now);
    }

    pub fn advance(&mut self, now: Instant) {
        if !self.height.advance(now).is_finished() {
            return;
        }
        match self.phase {
            DropdownPhase::Opening => self.phase = DropdownPhase::Open,
            DropdownPhase::Closing => {
                self.phase = DropdownPhase::Closed;
                self.visible = false;
            }
            DropdownPhase::Open | DropdownPhase::Closed => {}
        }
        debug!(phase = ?self.phase, "Dropdown settled");
    }

    /// Activate the menu entry. Does nothing while the panel is hidden.
    pub fn activate(&self) -> bool {
        if !self.visible {
            return false;
        }
        info!("{ITEM_LABEL} clicked");
        true
    }

    /// Rows the panel currently covers, out of `MAX_ROWS`.
    pub fn visible_rows(&self) -> u16 {
        if !self.visible || self.expanded_height <= 0.0 {
            return 0;
        }
        let fraction = (self.height.value() / self.expanded_height).clamp(0.0, 1.0);
        (fraction * f64::from(MAX_ROWS)).round() as u16
    }

    /// Screen area of the menu entry when the panel is drawn at `area`.
    pub fn item_area(&self, area: Rect) -> Option<Rect> {
        (self.visible_rows() >= 2 && area.height >= 2)
            .then(|| Rect::new(area.x, area.y + 1, area.width, 1))
    }

    pub fn is_item_at(&self, area: Rect, position: Position) -> bool {
        self.item_area(area).is_some_and(|item| item.contains(position))
    }

    /// Draw the panel over whatever is already at `area`, revealing it from
    /// the top down.
    pub fn render(&self, buf: &mut Buffer, area: Rect, theme: &Theme, focused: bool) {
        let rows = self.visible_rows().min(area.height);
        if rows == 0 {
            return;
        }

        let full = Rect::new(0, 0, area.width, MAX_ROWS);
        let mut panel = Buffer::empty(full);
        panel.set_style(full, Style::default().bg(theme.dropdown_bg));

        let mut label = Style::default().fg(theme.text);
        if focused {
            label = label.fg(theme.focus).add_modifier(Modifier::BOLD);
        }
        Line::from(vec![
            Span::raw(if focused { " ▶ " } else { "   " }),
            Span::styled(ITEM_LABEL, label),
        ])
        .render(Rect::new(0, 1, area.width, 1), &mut panel);
        Line::styled(
            "─".repeat(usize::from(area.width)),
            Style::default().fg(theme.divider),
        )
        .render(Rect::new(0, 2, area.width, 1), &mut panel);

        viewport::blit(&panel, 0, buf, Rect { height: rows, ..area });
    }
}
