use std::sync::Arc;
use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Block;
use tracing::{debug, error, info};

use crate::Theme;
use crate::config::{AppConfig, GlobalAction, KeyResolver};
use crate::screen::{ITEM_LABEL, ScreenEvent, ScreenView};
use crate::tui::{Event, Tui};
use crate::ui::{
    Component, EventResult, HelpEvent, HelpOverlay, HintBar, KeybindingSection, Result, Screen,
    Toast, ToastManager,
};

pub struct App {
    config: Arc<AppConfig>,
    resolver: Arc<KeyResolver>,
    theme: Theme,
    screen: ScreenView,
    hint_bar: HintBar,
    toasts: ToastManager,
    help: Option<HelpOverlay>,
    should_quit: bool,
    should_suspend: bool,
}

impl App {
    pub fn new(config: Arc<AppConfig>, resolver: Arc<KeyResolver>, theme: Theme) -> Self {
        Self {
            screen: ScreenView::new(&config.animation, Arc::clone(&resolver)),
            hint_bar: HintBar::new(Arc::clone(&resolver)),
            toasts: ToastManager::new(),
            help: None,
            should_quit: false,
            should_suspend: false,
            config,
            resolver,
            theme,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let animation = &self.config.animation;
        let mut tui = Tui::new(animation.frame_rate, animation.tick_rate)?;
        tui.enter()?;

        loop {
            let Some(event) = tui.next_event().await else {
                break;
            };
            self.handle_event(&mut tui, event)?;

            if self.should_suspend {
                tui.suspend()?;
                self.should_suspend = false;
                tui.enter()?;
                tui.clear()?;
            } else if self.should_quit {
                break;
            }
        }

        tui.exit()?;
        Ok(())
    }

    fn handle_event(&mut self, tui: &mut Tui, event: Event) -> Result<()> {
        match event {
            Event::Init => debug!("Event loop started"),
            Event::Quit => self.should_quit = true,
            Event::Error(message) => error!("Terminal event error: {message}"),
            Event::Tick => self.toasts.handle_tick(),
            Event::Render => self.render(tui)?,
            Event::Resize(width, height) => {
                tui.resize(Rect::new(0, 0, width, height))?;
                self.render(tui)?;
            }
            Event::Key(key) => self.handle_key(key, Instant::now())?,
            Event::Mouse(mouse) => self.handle_mouse(mouse, Instant::now())?,
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent, now: Instant) -> Result<()> {
        if let Some(help) = &mut self.help {
            if let EventResult::Event(HelpEvent::Close) = help.handle_key(key)? {
                self.help = None;
            }
            return Ok(());
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('z') {
            self.should_suspend = true;
            return Ok(());
        }

        let result = self.screen.handle_key_at(key, now);
        if result.is_consumed() {
            self.handle_screen_result(result, now);
            return Ok(());
        }

        if self.resolver.matches_global(&key, GlobalAction::Quit) {
            self.should_quit = true;
        } else if self.resolver.matches_global(&key, GlobalAction::Help) {
            self.help = Some(HelpOverlay::new(
                self.help_sections(),
                Arc::clone(&self.resolver),
            ));
        }
        Ok(())
    }

    fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant) -> Result<()> {
        if self.help.is_some() {
            return Ok(());
        }
        let result = self.screen.handle_mouse_at(mouse, now);
        self.handle_screen_result(result, now);
        Ok(())
    }

    fn handle_screen_result(&mut self, result: EventResult<ScreenEvent>, now: Instant) {
        let EventResult::Event(event) = result else {
            return;
        };
        info!(?event, "Screen event");
        let message = match event {
            ScreenEvent::DropdownItemActivated => format!("{ITEM_LABEL} clicked"),
            ScreenEvent::ServiceActivated { title, .. } => format!("{title} link clicked"),
        };
        self.toasts.show(Toast::new(message, now));
    }

    fn help_sections(&self) -> Vec<KeybindingSection> {
        vec![
            KeybindingSection::new("Services", self.screen.keybindings()),
            KeybindingSection::new("Global", self.hint_bar.global_keybindings()),
        ]
    }

    fn render(&mut self, tui: &mut Tui) -> Result<()> {
        self.screen.handle_frame();
        tui.draw(|frame| {
            let area = frame.area();
            frame.render_widget(
                Block::default().style(Style::default().bg(self.theme.background)),
                area,
            );

            let hint_height = u16::from(area.height > 1);
            let main_area = Rect {
                height: area.height - hint_height,
                ..area
            };
            let hint_area = Rect::new(area.x, main_area.bottom(), area.width, hint_height);

            self.screen.render(frame, main_area, &self.theme);
            let local = self.screen.keybindings();
            self.hint_bar.render(frame, hint_area, &self.theme, &local);
            self.toasts.render(frame, main_area, &self.theme);
            if let Some(help) = &mut self.help {
                help.render(frame, area, &self.theme);
            }
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crossterm::event::{MouseButton, MouseEventKind};

    use super::*;

    fn app() -> App {
        let config = Arc::new(AppConfig::default());
        let resolver = Arc::new(KeyResolver::new(Arc::new(config.keybindings.clone())));
        App::new(config, resolver, Theme::default())
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_quit_key() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('q')), Instant::now()).unwrap();
        assert!(app.should_quit);
    }

    #[test]
    fn test_help_overlay_swallows_keys() {
        let mut app = app();
        let now = Instant::now();
        app.handle_key(key(KeyCode::Char('?')), now).unwrap();
        assert!(app.help.is_some());

        app.handle_key(key(KeyCode::Char('m')), now).unwrap();
        assert!(!app.screen.dropdown().is_visible());

        app.handle_key(key(KeyCode::Esc), now).unwrap();
        assert!(app.help.is_none());
        assert!(!app.should_quit);
    }

    #[test]
    fn test_card_activation_shows_toast() {
        let mut app = app();
        let now = Instant::now();
        app.handle_key(key(KeyCode::Enter), now).unwrap();

        let messages: Vec<&str> = app.toasts.messages().collect();
        assert_eq!(messages, ["Patta Maarudhal link clicked"]);
    }

    #[test]
    fn test_menu_activation_shows_toast() {
        let mut app = app();
        let now = Instant::now();
        app.handle_key(key(KeyCode::Char('m')), now).unwrap();
        app.screen.advance(now + Duration::from_millis(300));
        app.handle_key(key(KeyCode::Enter), now + Duration::from_millis(300))
            .unwrap();

        let messages: Vec<&str> = app.toasts.messages().collect();
        assert_eq!(messages, ["E-services clicked"]);
    }

    #[test]
    fn test_mouse_ignored_under_help() {
        let mut app = app();
        let now = Instant::now();
        app.handle_key(key(KeyCode::Char('?')), now).unwrap();
        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 3,
            row: 1,
            modifiers: KeyModifiers::NONE,
        };
        app.handle_mouse(click, now).unwrap();
        assert!(!app.screen.dropdown().is_visible());
    }
}
