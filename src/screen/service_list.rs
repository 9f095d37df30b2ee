use std::time::Instant;

use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};
use ratatui::widgets::Widget;

use crate::Theme;
use crate::catalog::ServiceDescriptor;
use crate::config::AnimationConfig;
use crate::screen::service_card::{CARD_HEIGHT, CardView, ServiceCard};

/// Blank rows below each card.
pub const CARD_GAP: u16 = 1;

/// Cards for a fixed sequence of services, kept in declaration order.
///
/// Cards live in a flat arena indexed by list position. Each owns its own
/// press animation; nothing is shared between entries.
#[derive(Debug, Clone)]
pub struct ServiceCardList {
    cards: Vec<ServiceCard>,
}

impl ServiceCardList {
    pub fn new(services: &'static [ServiceDescriptor], config: &AnimationConfig) -> Self {
        let cards = services
            .iter()
            .enumerate()
            .map(|(index, descriptor)| ServiceCard::new(index, descriptor, config))
            .collect();
        Self { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ServiceCard> {
        self.cards.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut ServiceCard> {
        self.cards.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ServiceCard> {
        self.cards.iter()
    }

    pub fn advance(&mut self, now: Instant) {
        for card in &mut self.cards {
            card.advance(now);
        }
    }

    /// Total rows of the list.
    pub fn height(&self) -> u16 {
        u16::try_from(self.cards.len())
            .unwrap_or(u16::MAX)
            .saturating_mul(CARD_HEIGHT + CARD_GAP)
    }

    /// Row range `(top, height)` of card `index` relative to the list top.
    pub fn span(index: usize) -> (u16, u16) {
        let top = u16::try_from(index)
            .unwrap_or(u16::MAX)
            .saturating_mul(CARD_HEIGHT + CARD_GAP);
        (top, CARD_HEIGHT)
    }

    /// Slot of card `index` when the list is laid out at `area`.
    pub fn slot(area: Rect, index: usize) -> Rect {
        let (top, height) = Self::span(index);
        Rect::new(area.x, area.y.saturating_add(top), area.width, height)
    }

    /// Index of the card whose link is at `position`.
    pub fn link_at(&self, area: Rect, position: Position) -> Option<usize> {
        (0..self.cards.len()).find(|&index| {
            ServiceCard::link_area(Self::slot(area, index)).contains(position)
        })
    }

    pub fn render(&self, buf: &mut Buffer, area: Rect, theme: &Theme, focused: Option<usize>) {
        for card in &self.cards {
            let slot = Self::slot(area, card.index()).intersection(area);
            if slot.is_empty() {
                continue;
            }
            CardView {
                card,
                theme,
                focused: focused == Some(card.index()),
            }
            .render(slot, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::catalog::SERVICES;

    fn list() -> ServiceCardList {
        ServiceCardList::new(SERVICES, &AnimationConfig::default())
    }

    #[test]
    fn test_one_card_per_service_in_order() {
        let list = list();
        assert_eq!(list.len(), SERVICES.len());
        for (index, (card, service)) in list.iter().zip(SERVICES).enumerate() {
            assert_eq!(card.index(), index);
            assert_eq!(card.descriptor(), service);
        }
        assert_eq!(list.get(0).map(ServiceCard::title), Some("Patta Maarudhal"));
    }

    #[test]
    fn test_cards_animate_independently() {
        let start = Instant::now();
        let mut list = list();
        list.get_mut(2).unwrap().on_press_start(start);
        list.advance(start + Duration::from_millis(40));

        assert!(list.get(2).unwrap().scale() < 1.0);
        for index in [0, 1, 3, 9] {
            let card = list.get(index).unwrap();
            assert_eq!(card.scale(), 1.0);
            assert!(!card.is_pressed());
        }
    }

    #[test]
    fn test_link_hit_testing() {
        let list = list();
        let area = Rect::new(0, 10, 60, list.height());
        let link = ServiceCard::link_area(ServiceCardList::slot(area, 4));

        assert_eq!(list.link_at(area, link.as_position()), Some(4));
        assert_eq!(list.link_at(area, Position::new(0, link.y)), None);
        assert_eq!(list.link_at(area, Position::new(link.x, link.y - 1)), None);
    }

    #[test]
    fn test_render_in_declaration_order() {
        let list = list();
        let area = Rect::new(0, 0, 50, list.height());
        let mut buf = Buffer::empty(area);
        list.render(&mut buf, area, &Theme::default(), Some(0));

        let rows: Vec<String> = (0..area.height)
            .map(|y| (0..area.width).map(|x| buf[(x, y)].symbol().to_string()).collect())
            .collect();
        let mut last_row = None;
        for service in SERVICES {
            let row = rows
                .iter()
                .position(|row| row.trim().trim_matches('│').trim() == service.title)
                .unwrap_or_else(|| panic!("{} not rendered", service.title));
            assert!(last_row.is_none_or(|last| row > last));
            assert!(rows[row - 2].contains(service.glyph()));
            last_row = Some(row);
        }
    }
}
