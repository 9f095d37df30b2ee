use std::collections::VecDeque;
use std::time::{Duration, Instant};

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use super::Component;
use crate::Theme;

const TOAST_DURATION: Duration = Duration::from_secs(3);
const MAX_VISIBLE: usize = 3;

pub struct Toast {
    message: String,
    created_at: Instant,
}

impl Toast {
    pub fn new(message: impl Into<String>, now: Instant) -> Self {
        Self {
            message: message.into(),
            created_at: now,
        }
    }

    fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.created_at) >= TOAST_DURATION
    }
}

/// Short-lived notices stacked in the bottom-right corner.
#[derive(Default)]
pub struct ToastManager {
    toasts: VecDeque<Toast>,
}

impl ToastManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, toast: Toast) {
        self.toasts.push_back(toast);
        while self.toasts.len() > MAX_VISIBLE {
            self.toasts.pop_front();
        }
    }

    pub fn expire(&mut self, now: Instant) {
        self.toasts.retain(|t| !t.is_expired(now));
    }

    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.toasts.iter().map(|t| t.message.as_str())
    }
}

impl Component for ToastManager {
    type Output = ();

    fn handle_tick(&mut self) {
        self.expire(Instant::now());
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let toast_height = 3u16;
        let toast_width = 40u16.min(area.width.saturating_sub(4));
        let spacing = 1u16;

        // Newest at the bottom, older ones stacked upward
        for (i, toast) in self.toasts.iter().rev().enumerate() {
            let y_offset = u16::try_from(i).unwrap_or(u16::MAX).saturating_mul(toast_height + spacing);
            let Some(y) = area
                .bottom()
                .checked_sub(toast_height + y_offset + 1)
                .filter(|y| *y >= area.y)
            else {
                break;
            };
            let x = area.x + area.width.saturating_sub(toast_width + 2);
            let toast_area = Rect::new(x, y, toast_width, toast_height);

            frame.render_widget(Clear, toast_area);

            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(theme.border_type)
                .border_style(Style::default().fg(theme.toast_border))
                .style(Style::default().bg(theme.toast_bg));

            let paragraph = Paragraph::new(format!("ℹ {}", toast.message))
                .block(block)
                .style(
                    Style::default()
                        .fg(theme.navbar_fg)
                        .add_modifier(Modifier::BOLD),
                )
                .alignment(Alignment::Center);

            frame.render_widget(paragraph, toast_area);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_newest_three() {
        let now = Instant::now();
        let mut toasts = ToastManager::new();
        for i in 0..5 {
            toasts.show(Toast::new(format!("toast {i}"), now));
        }
        let messages: Vec<_> = toasts.messages().collect();
        assert_eq!(messages, vec!["toast 2", "toast 3", "toast 4"]);
    }

    #[test]
    fn test_expires_after_duration() {
        let now = Instant::now();
        let mut toasts = ToastManager::new();
        toasts.show(Toast::new("old", now));
        toasts.show(Toast::new("new", now + Duration::from_secs(2)));

        toasts.expire(now + Duration::from_secs(3));
        assert_eq!(toasts.messages().collect::<Vec<_>>(), vec!["new"]);
    }
}
