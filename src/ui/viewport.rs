//! Offscreen rendering for content taller than the terminal.
//!
//! Parts are laid out and drawn into a [`Buffer`] covering the whole
//! content, and the visible window is copied into the frame. Clipping at the
//! window edges comes for free, including for bordered blocks.

use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};

/// Copy the rows of `source` starting at content row `offset` into `target`
/// at `area`. Rows past the end of `source` are left untouched.
pub fn blit(source: &Buffer, offset: u16, target: &mut Buffer, area: Rect) {
    let source_area = source.area;
    for row in 0..area.height {
        let Some(source_y) = offset.checked_add(row).map(|y| source_area.y + y) else {
            break;
        };
        if source_y >= source_area.bottom() {
            break;
        }
        for column in 0..area.width.min(source_area.width) {
            let from = Position::new(source_area.x + column, source_y);
            let to = Position::new(area.x + column, area.y + row);
            if let (Some(cell), true) = (source.cell(from), target.area.contains(to)) {
                target[to] = cell.clone();
            }
        }
    }
}

/// Largest scroll offset that still fills the window.
pub const fn max_offset(content_height: u16, window_height: u16) -> u16 {
    content_height.saturating_sub(window_height)
}

/// Smallest change to `offset` that brings the rows `top..top + height`
/// into a window of `window_height` rows.
pub const fn scroll_into_view(offset: u16, top: u16, height: u16, window_height: u16) -> u16 {
    if top < offset {
        top
    } else if top + height > offset + window_height {
        (top + height).saturating_sub(window_height)
    } else {
        offset
    }
}
