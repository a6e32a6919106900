//! Grid widget: draws emitted cells into the terminal buffer.
//!
//! This is the demo shell's cell renderer - the externally supplied drawing
//! function the engine core is agnostic about. One engine pixel maps to one
//! terminal cell, so a `row_height` of 2.0 means two terminal lines per grid
//! row.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::styles::GridStyles;
use crate::grid::driver::RenderDriver;
use crate::grid::state::GridViewState;

/// Ratatui widget rendering the visible window of a grid of strings.
pub struct GridView<'a> {
    state: &'a mut GridViewState,
    data: &'a [String],
    driver: &'a RenderDriver<String>,
    styles: &'a GridStyles,
    header: Option<&'a str>,
}

impl<'a> GridView<'a> {
    /// Create a widget over the given engine state and backing items.
    pub fn new(
        state: &'a mut GridViewState,
        data: &'a [String],
        driver: &'a RenderDriver<String>,
        styles: &'a GridStyles,
    ) -> Self {
        Self {
            state,
            data,
            driver,
            styles,
            header: None,
        }
    }

    /// Show decorative header text in the leading-offset space above the
    /// first row. It scrolls away with the content.
    pub fn with_header(mut self, header: &'a str) -> Self {
        self.header = Some(header);
        self
    }
}

impl Widget for GridView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let GridView {
            state,
            data,
            driver,
            styles,
            header,
        } = self;

        let scroll_top = state.viewport().scroll_top;
        let leading_offset = state.viewport().leading_offset;

        if let Some(text) = header {
            if leading_offset > 0.0 {
                // The header lives at content pixel 0 and scrolls away.
                if let Some(y) = screen_line(0.0, scroll_top, area) {
                    buf.set_stringn(area.x, y, text, area.width as usize, styles.header);
                }
            }
        }

        driver.emit(state, data, |cell| {
            let Some(item) = cell.item() else {
                return; // trailing cell in a partial last row
            };
            let Some(y) = screen_line(cell.rect.top, scroll_top, area) else {
                return; // overscan row outside the viewport
            };

            let x = area.x as i64 + cell.rect.left.round() as i64;
            if x >= i64::from(area.right()) || x < i64::from(area.x) {
                return;
            }
            let x = x as u16;

            // Keep one column of breathing room between grid columns.
            let budget = (cell.rect.width.round() as usize).saturating_sub(1);
            let available = (area.right() - x) as usize;
            let max_width = budget.min(available);
            if max_width == 0 {
                return;
            }

            let style = if !cell.interactive {
                styles.cell_scrolling
            } else if (cell.row.get() + cell.column.get()) % 2 == 0 {
                styles.cell
            } else {
                styles.cell_alt
            };

            let text = fit_to_width(item, max_width);
            buf.set_stringn(x, y, &text, max_width, style);
        });
    }
}

/// Map a content-space pixel to a screen line, if it falls inside `area`.
fn screen_line(content_y: f64, scroll_top: f64, area: Rect) -> Option<u16> {
    let offset = (content_y - scroll_top).round() as i64;
    if offset < 0 || offset >= i64::from(area.height) {
        return None;
    }
    Some(area.y + offset as u16)
}

/// Truncate to the given display width, appending an ellipsis when content
/// was cut.
fn fit_to_width(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    if UnicodeWidthStr::width(text) <= max_width {
        return text.to_string();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > max_width - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}
