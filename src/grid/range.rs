//! Visible and render range calculation

use super::types::{RowIndex, ScrollDirection};

/// Row range produced by the range calculator.
///
/// All bounds are inclusive row indices. The render bounds are the visible
/// bounds expanded by direction-biased overscan.
///
/// # Invariants
/// - `render_start <= visible_start <= visible_end <= render_end`
/// - All four lie in `[0, row_count - 1]` whenever the grid is non-empty
/// - All four are 0 for an empty grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderRange {
    /// First row to materialize (inclusive).
    pub render_start: RowIndex,
    /// Last row to materialize (inclusive).
    pub render_end: RowIndex,
    /// First row with some portion inside the viewport (inclusive).
    pub visible_start: RowIndex,
    /// Last row with some portion inside the viewport (inclusive).
    pub visible_end: RowIndex,
}

impl RenderRange {
    /// Iterate over the rows to materialize, in order.
    pub fn render_rows(&self) -> impl Iterator<Item = RowIndex> {
        (self.render_start.get()..=self.render_end.get()).map(RowIndex::new)
    }

    /// Number of rows to materialize.
    pub fn render_len(&self) -> usize {
        self.render_end.get() - self.render_start.get() + 1
    }

    /// Check whether a row falls inside the render bounds.
    pub fn contains(&self, row: RowIndex) -> bool {
        self.render_start <= row && row <= self.render_end
    }
}

/// Geometry inputs that determine the vertical range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeParams {
    /// Logical size of the backing collection.
    pub item_count: usize,
    /// Number of rows (`ceil(item_count / column_count)`).
    pub row_count: usize,
    /// Fixed pixel height of every row.
    pub row_height: f64,
    /// Fixed pixel height of the scrollable window.
    pub viewport_height: f64,
    /// Vertical space reserved above the windowed content.
    pub leading_offset: f64,
    /// Configured overscan; 0 is promoted to 1.
    pub overscan_row_count: usize,
}

/// Map a scroll offset to the rows to render.
///
/// Overscan is direction-biased: the full resolved count on the side the
/// scroll is heading toward (and on both sides while idle), the minimum of 1
/// on the trailing side during an active scroll.
pub fn compute_render_range(
    params: RangeParams,
    scroll_top: f64,
    is_scrolling: bool,
    direction: ScrollDirection,
) -> RenderRange {
    if params.item_count == 0 || params.row_count == 0 {
        return RenderRange::default();
    }

    let last_row = params.row_count - 1;

    let raw_start = ((scroll_top - params.leading_offset) / params.row_height).floor();
    let visible_start = if raw_start <= 0.0 {
        0
    } else {
        (raw_start as usize).min(last_row)
    };

    let top = visible_start as f64 * params.row_height;
    let num_visible = ((params.viewport_height + scroll_top - top) / params.row_height).ceil();
    let num_visible = if num_visible.is_finite() && num_visible >= 1.0 {
        num_visible as usize
    } else {
        1
    };
    let visible_end = visible_start.saturating_add(num_visible - 1).min(last_row);

    let resolved = params.overscan_row_count.max(1);
    let backward = if !is_scrolling || direction.is_backward() {
        resolved
    } else {
        1
    };
    let forward = if !is_scrolling || direction.is_forward() {
        resolved
    } else {
        1
    };

    RenderRange {
        render_start: RowIndex::new(visible_start.saturating_sub(backward)),
        render_end: RowIndex::new(visible_end.saturating_add(forward).min(last_row)),
        visible_start: RowIndex::new(visible_start),
        visible_end: RowIndex::new(visible_end),
    }
}
