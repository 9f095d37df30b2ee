use std::sync::Arc;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::Theme;
use crate::config::{GlobalAction, KeyResolver};
use crate::ui::Keybinding;

/// Single line of key hints along the bottom edge.
pub struct HintBar {
    resolver: Arc<KeyResolver>,
}

impl HintBar {
    pub const fn new(resolver: Arc<KeyResolver>) -> Self {
        Self { resolver }
    }

    /// Get the global keybindings for use in the help overlay.
    pub fn global_keybindings(&self) -> Vec<Keybinding> {
        vec![
            Keybinding::hint(self.resolver.display_global(GlobalAction::Help), "Help"),
            Keybinding::hint(self.resolver.display_global(GlobalAction::Quit), "Quit"),
        ]
    }

    pub fn line(&self, local_keybindings: &[Keybinding], theme: &Theme) -> Line<'static> {
        let global = self.global_keybindings();
        let mut spans = Vec::new();
        for kb in local_keybindings.iter().chain(global.iter()).filter(|kb| kb.hint) {
            if !spans.is_empty() {
                spans.push(Span::styled("  ", Style::default()));
            }
            spans.push(Span::styled(kb.key.clone(), Style::default().fg(theme.key_hint)));
            spans.push(Span::styled(
                format!(" {}", kb.description),
                Style::default().fg(theme.muted),
            ));
        }
        Line::from(spans)
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        theme: &Theme,
        local_keybindings: &[Keybinding],
    ) {
        let paragraph = Paragraph::new(self.line(local_keybindings, theme))
            .style(Style::default().bg(theme.background));
        frame.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hints_only() {
        let bar = HintBar::new(Arc::new(KeyResolver::default()));
        let local = vec![Keybinding::hint("m", "Menu"), Keybinding::new("g", "Top")];
        let line = bar.line(&local, &Theme::default());
        assert_eq!(line.to_string(), "m Menu  ? Help  q Quit");
    }
}
