//! The services screen.
//!
//! [`ScreenView`] is the composition root: it owns the navigation bar, the
//! dropdown panel and the card list, and turns terminal input into the press
//! and activation operations of those parts.

mod description;
mod dropdown;
mod nav_bar;
mod service_card;
mod service_list;

use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};
use ratatui::style::Style;

use description::DescriptionBlock;
pub use dropdown::ITEM_LABEL;
use dropdown::DropdownPanel;
use nav_bar::NavBar;
use service_list::ServiceCardList;

use crate::Theme;
use crate::catalog::{SERVICES, ServiceDescriptor};
use crate::config::{AnimationConfig, GlobalAction, KeyResolver, NavAction};
use crate::ui::{EventResult, Keybinding, Screen, viewport};

/// Rows between the description and the first card.
const DESCRIPTION_GAP: u16 = 1;
const BOTTOM_PADDING: u16 = 1;
const SCROLL_STEP: u16 = 3;
const PAGE_STEP: usize = 5;

/// Activations surfaced to the embedding application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenEvent {
    /// The dropdown's single menu entry was activated.
    DropdownItemActivated,
    /// A card's link was tapped.
    ServiceActivated { index: usize, title: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    MenuItem,
    Card(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Press {
    Toggle,
    MenuItem,
    Card(usize),
}

/// Vertical layout of the scrollable content for one width.
#[derive(Debug, Clone, Copy, Default)]
struct ContentLayout {
    description_height: u16,
    list_top: u16,
    height: u16,
}

impl ContentLayout {
    fn new(width: u16, list_height: u16) -> Self {
        let description_height = DescriptionBlock::height(width);
        let list_top = description_height + DESCRIPTION_GAP;
        Self {
            description_height,
            list_top,
            height: list_top + list_height + BOTTOM_PADDING,
        }
    }
}

pub struct ScreenView {
    resolver: Arc<KeyResolver>,
    nav_bar: NavBar,
    dropdown: DropdownPanel,
    cards: ServiceCardList,
    focus: Focus,
    last_card: usize,
    press: Option<Press>,
    press_hold: Duration,
    scroll: u16,
    // As of the last render
    content_area: Rect,
    dropdown_area: Rect,
    layout: ContentLayout,
}

impl ScreenView {
    pub fn new(config: &AnimationConfig, resolver: Arc<KeyResolver>) -> Self {
        Self::with_services(SERVICES, config, resolver)
    }

    pub fn with_services(
        services: &'static [ServiceDescriptor],
        config: &AnimationConfig,
        resolver: Arc<KeyResolver>,
    ) -> Self {
        Self {
            resolver,
            nav_bar: NavBar::new(),
            dropdown: DropdownPanel::new(config),
            cards: ServiceCardList::new(services, config),
            focus: Focus::Card(0),
            last_card: 0,
            press: None,
            press_hold: config.press_hold(),
            scroll: 0,
            content_area: Rect::default(),
            dropdown_area: Rect::default(),
            layout: ContentLayout::default(),
        }
    }

    pub const fn dropdown(&self) -> &DropdownPanel {
        &self.dropdown
    }

    pub const fn cards(&self) -> &ServiceCardList {
        &self.cards
    }

    pub const fn focus(&self) -> Focus {
        self.focus
    }

    pub const fn scroll(&self) -> u16 {
        self.scroll
    }

    pub fn toggle_dropdown(&mut self, now: Instant) {
        self.dropdown.toggle(now);
        if self.dropdown.is_opening_or_open() {
            self.focus = Focus::MenuItem;
        } else if self.focus == Focus::MenuItem {
            self.focus_card(self.last_card);
        }
    }

    /// Advance every animation on the screen to `now`.
    pub fn advance(&mut self, now: Instant) {
        self.dropdown.advance(now);
        if !self.dropdown.is_visible() && self.focus == Focus::MenuItem {
            self.focus_card(self.last_card);
        }
        self.cards.advance(now);
    }

    fn activate_menu_item(&self) -> EventResult<ScreenEvent> {
        if self.dropdown.activate() {
            ScreenEvent::DropdownItemActivated.into()
        } else {
            EventResult::Consumed
        }
    }

    fn focus_card(&mut self, index: usize) {
        if let Some(index) = self.select_card(index) {
            self.scroll_to_card(index);
        }
    }

    /// Move focus to a card without scrolling.
    fn select_card(&mut self, index: usize) -> Option<usize> {
        if self.cards.is_empty() {
            return None;
        }
        let index = index.min(self.cards.len() - 1);
        self.focus = Focus::Card(index);
        self.last_card = index;
        Some(index)
    }

    /// Content rows at the top of the window hidden under the dropdown.
    fn covered_rows(&self) -> u16 {
        if self.dropdown.is_visible() {
            dropdown::MAX_ROWS.min(self.content_area.height)
        } else {
            0
        }
    }

    fn scroll_to_card(&mut self, index: usize) {
        let covered = self.covered_rows();
        if self.content_area.height <= covered {
            return;
        }
        let (top, height) = ServiceCardList::span(index);
        let window_top = viewport::scroll_into_view(
            self.scroll + covered,
            self.layout.list_top + top,
            height,
            self.content_area.height - covered,
        );
        self.scroll = window_top.saturating_sub(covered);
        self.clamp_scroll();
    }

    fn scroll_by(&mut self, delta: i32) {
        let scroll = i32::from(self.scroll).saturating_add(delta).max(0);
        self.scroll = u16::try_from(scroll).unwrap_or(u16::MAX);
        self.clamp_scroll();
    }

    fn clamp_scroll(&mut self) {
        self.scroll = self
            .scroll
            .min(viewport::max_offset(self.layout.height, self.content_area.height));
    }

    /// Card whose link is under `position`, if that part of the content is
    /// visible and not covered by the dropdown.
    fn card_link_at(&self, position: Position) -> Option<usize> {
        if !self.content_area.contains(position) || self.dropdown_covers(position) {
            return None;
        }
        // Work in content coordinates so cards scrolled above the window
        // still map correctly.
        let content = Position::new(
            position.x - self.content_area.x,
            position.y - self.content_area.y + self.scroll,
        );
        let list = Rect::new(0, self.layout.list_top, self.content_area.width, self.cards.height());
        self.cards.link_at(list, content)
    }

    fn dropdown_covers(&self, position: Position) -> bool {
        let rows = self.dropdown.visible_rows().min(self.dropdown_area.height);
        Rect {
            height: rows,
            ..self.dropdown_area
        }
        .contains(position)
    }

    pub fn handle_key_at(&mut self, key: KeyEvent, now: Instant) -> EventResult<ScreenEvent> {
        let resolver = Arc::clone(&self.resolver);

        if resolver.matches_global(&key, GlobalAction::Menu) {
            self.toggle_dropdown(now);
            return EventResult::Consumed;
        }

        let hold = self.press_hold;
        let last = self.cards.len().saturating_sub(1);
        let target = match self.focus {
            Focus::MenuItem => {
                if resolver.matches_nav(&key, NavAction::Select) {
                    return self.activate_menu_item();
                }
                if resolver.matches_nav(&key, NavAction::Down)
                    || resolver.matches_nav(&key, NavAction::PageDown)
                {
                    Some(0)
                } else if resolver.matches_nav(&key, NavAction::End) {
                    Some(last)
                } else if resolver.matches_nav(&key, NavAction::Up)
                    || resolver.matches_nav(&key, NavAction::PageUp)
                    || resolver.matches_nav(&key, NavAction::Home)
                {
                    return EventResult::Consumed;
                } else {
                    None
                }
            }
            Focus::Card(index) => {
                if resolver.matches_nav(&key, NavAction::Select) {
                    return self
                        .cards
                        .get_mut(index)
                        .map_or(EventResult::Consumed, |card| card.tap(now, hold).into());
                }
                if resolver.matches_nav(&key, NavAction::Up) {
                    if index == 0 && self.dropdown.is_visible() {
                        self.focus = Focus::MenuItem;
                        return EventResult::Consumed;
                    }
                    Some(index.saturating_sub(1))
                } else if resolver.matches_nav(&key, NavAction::Down) {
                    Some((index + 1).min(last))
                } else if resolver.matches_nav(&key, NavAction::PageUp) {
                    Some(index.saturating_sub(PAGE_STEP))
                } else if resolver.matches_nav(&key, NavAction::PageDown) {
                    Some((index + PAGE_STEP).min(last))
                } else if resolver.matches_nav(&key, NavAction::Home) {
                    Some(0)
                } else if resolver.matches_nav(&key, NavAction::End) {
                    Some(last)
                } else {
                    None
                }
            }
        };

        match target {
            Some(index) => {
                self.focus_card(index);
                EventResult::Consumed
            }
            None => EventResult::Ignored,
        }
    }

    pub fn handle_mouse_at(&mut self, mouse: MouseEvent, now: Instant) -> EventResult<ScreenEvent> {
        let position = Position::new(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if self.nav_bar.is_toggle_at(position) {
                    self.press = Some(Press::Toggle);
                    return EventResult::Consumed;
                }
                if self.dropdown.is_item_at(self.dropdown_area, position) {
                    self.press = Some(Press::MenuItem);
                    self.focus = Focus::MenuItem;
                    return EventResult::Consumed;
                }
                if let Some(index) = self.card_link_at(position)
                    && let Some(card) = self.cards.get_mut(index)
                {
                    card.on_press_start(now);
                    self.press = Some(Press::Card(index));
                    // Scrolling here would move the link away from the pointer
                    self.select_card(index);
                    return EventResult::Consumed;
                }
                EventResult::Ignored
            }
            MouseEventKind::Up(MouseButton::Left) => match self.press.take() {
                Some(Press::Toggle) => {
                    if self.nav_bar.is_toggle_at(position) {
                        self.toggle_dropdown(now);
                    }
                    EventResult::Consumed
                }
                Some(Press::Card(index)) => {
                    let over_link = self.card_link_at(position) == Some(index);
                    let Some(card) = self.cards.get_mut(index) else {
                        return EventResult::Consumed;
                    };
                    card.on_press_end(now);
                    if over_link {
                        card.on_activate().into()
                    } else {
                        EventResult::Consumed
                    }
                }
                Some(Press::MenuItem) => {
                    if self.dropdown.is_item_at(self.dropdown_area, position) {
                        self.activate_menu_item()
                    } else {
                        EventResult::Consumed
                    }
                }
                None => EventResult::Ignored,
            },
            MouseEventKind::ScrollDown => {
                self.scroll_by(i32::from(SCROLL_STEP));
                EventResult::Consumed
            }
            MouseEventKind::ScrollUp => {
                self.scroll_by(-i32::from(SCROLL_STEP));
                EventResult::Consumed
            }
            _ => EventResult::Ignored,
        }
    }

    fn render_content(&self, width: u16, theme: &Theme) -> Buffer {
        let area = Rect::new(0, 0, width, self.layout.height);
        let mut content = Buffer::empty(area);
        content.set_style(area, Style::default().bg(theme.background).fg(theme.text));

        DescriptionBlock::render(
            &mut content,
            Rect::new(0, 0, width, self.layout.description_height),
            theme,
        );

        let focused = match self.focus {
            Focus::Card(index) => Some(index),
            Focus::MenuItem => None,
        };
        let list = Rect::new(0, self.layout.list_top, width, self.cards.height());
        self.cards.render(&mut content, list, theme, focused);
        content
    }
}

impl Screen for ScreenView {
    fn handle_frame(&mut self) {
        self.advance(Instant::now());
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let nav_height = nav_bar::HEIGHT.min(area.height);
        let nav_area = Rect { height: nav_height, ..area };
        let content_area = Rect::new(
            area.x,
            area.y + nav_height,
            area.width,
            area.height - nav_height,
        );

        let layout = ContentLayout::new(content_area.width, self.cards.height());
        let resized = self.content_area != content_area;
        self.layout = layout;
        self.content_area = content_area;
        if resized && let Focus::Card(index) = self.focus {
            self.scroll_to_card(index);
        }
        self.clamp_scroll();

        let content = self.render_content(content_area.width, theme);
        let buf = frame.buffer_mut();
        viewport::blit(&content, self.scroll, buf, content_area);

        self.nav_bar
            .render(buf, nav_area, theme, self.dropdown.is_opening_or_open());

        self.dropdown_area = Rect {
            height: dropdown::MAX_ROWS.min(content_area.height),
            ..content_area
        };
        self.dropdown.render(
            buf,
            self.dropdown_area,
            theme,
            self.focus == Focus::MenuItem,
        );
    }

    fn keybindings(&self) -> Vec<Keybinding> {
        vec![
            Keybinding::hint(self.resolver.display_global(GlobalAction::Menu), "Menu"),
            Keybinding::hint(self.resolver.display_nav(NavAction::Select), "Learn more"),
            Keybinding::new(
                format!(
                    "{}/{}",
                    self.resolver.display_nav(NavAction::Up),
                    self.resolver.display_nav(NavAction::Down)
                ),
                "Navigate",
            ),
            Keybinding::new(
                format!(
                    "{}/{}",
                    self.resolver.display_nav(NavAction::PageUp),
                    self.resolver.display_nav(NavAction::PageDown)
                ),
                "Jump 5 services",
            ),
            Keybinding::new(
                format!(
                    "{}/{}",
                    self.resolver.display_nav(NavAction::Home),
                    self.resolver.display_nav(NavAction::End)
                ),
                "First/last service",
            ),
        ]
    }
}
