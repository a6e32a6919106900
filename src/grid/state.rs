//! Viewport state management and scroll control.
//!
//! [`GridViewState`] owns the mutable state for a single grid viewport and
//! is the funnel every scroll-offset change goes through, whether it
//! originates from a native scroll event or from the imperative
//! `scroll_to`/`scroll_to_item` operations. State transitions are
//! synchronous and apply defensive clamping instead of surfacing errors.

use tracing::{debug, trace};

use super::config::GridConfig;
use super::layout::{CellRectCache, LayoutParams};
use super::range::{compute_render_range, RangeParams, RenderRange};
use super::types::{CellRect, ColumnIndex, RowIndex, ScrollDirection};
use crate::host::{ScrollSurface, ScrollbarMetrics, ViewportMetrics};

/// Mutable per-viewport scroll and geometry state.
///
/// # Invariants
/// - `0 <= scroll_top <= max(0, leading_offset + estimated_total_height - viewport_height)`
/// - `row_count = ceil(item_count / column_count)`, recomputed on every
///   configuration change, never read from stale values
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportState {
    /// Current scroll offset, clamped to content bounds.
    pub scroll_top: f64,
    /// Direction of the most recent offset change.
    pub direction: ScrollDirection,
    /// True while scroll events are arriving (reset after an idle delay).
    pub is_scrolling: bool,
    /// True when the offset was changed programmatically and has not yet
    /// been pushed to the host scroll surface.
    pub scroll_update_requested: bool,
    /// Host-measured viewport width.
    pub width: f64,
    /// Width of a single column (`width / column_count`).
    pub column_width: f64,
    /// Number of rows (`ceil(item_count / column_count)`).
    pub row_count: usize,
    /// Estimated content height (`row_count * row_height`).
    pub estimated_total_height: f64,
    /// Vertical space reserved above the windowed content for decorative
    /// header content.
    pub leading_offset: f64,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            scroll_top: 0.0,
            direction: ScrollDirection::Forward,
            is_scrolling: false,
            scroll_update_requested: false,
            width: 0.0,
            column_width: 0.0,
            row_count: 0,
            estimated_total_height: 0.0,
            leading_offset: 0.0,
        }
    }
}

/// Windowing engine state for one grid viewport.
///
/// Exclusively owned by the host integration that drives the viewport; all
/// mutation happens on the host's event loop, so no locking is involved.
#[derive(Debug)]
pub struct GridViewState {
    config: GridConfig,
    viewport: ViewportState,
    rects: CellRectCache,
    scrollbar_thickness: f64,
    last_scroll_event_ms: Option<u64>,
    torn_down: bool,
}

impl GridViewState {
    /// Create state for a freshly mounted viewport. Geometry stays zeroed
    /// until [`GridViewState::initialize`] measures the host.
    pub fn new(config: GridConfig) -> Self {
        Self {
            config,
            viewport: ViewportState::default(),
            rects: CellRectCache::default(),
            scrollbar_thickness: 0.0,
            last_scroll_event_ms: None,
            torn_down: false,
        }
    }

    /// Measure the host and compute the initial geometry.
    ///
    /// Probes the scrollbar thickness once, and applies any configured
    /// initial scroll offset directly to both the state and the host surface
    /// (no request/flush cycle: nothing has rendered yet).
    pub fn initialize(
        &mut self,
        metrics: &dyn ViewportMetrics,
        surface: &mut dyn ScrollSurface,
        scrollbar: &dyn ScrollbarMetrics,
    ) {
        self.viewport.width = metrics.viewport_width();
        self.viewport.leading_offset = metrics.leading_offset();
        self.scrollbar_thickness = scrollbar.thickness();
        self.recompute_geometry();

        if let Some(initial) = self.config.initial_scroll_top {
            let clamped = initial.max(0.0).min(self.max_scroll_top());
            self.viewport.scroll_top = clamped;
            surface.set_scroll_top(clamped);
        }

        self.torn_down = false;
        debug!(
            width = self.viewport.width,
            row_count = self.viewport.row_count,
            estimated_total_height = self.viewport.estimated_total_height,
            "viewport initialized"
        );
    }

    /// Apply a configuration change.
    ///
    /// No-ops when item count, column count, and row height are all
    /// unchanged; otherwise recomputes row count, column width, and the
    /// estimated total height, and re-clamps the scroll offset into the new
    /// bounds (flagging a programmatic update if it moved). Returns whether
    /// anything changed.
    pub fn on_configuration_change(
        &mut self,
        item_count: usize,
        column_count: usize,
        row_height: f64,
    ) -> bool {
        if item_count == self.config.item_count
            && column_count == self.config.column_count
            && row_height == self.config.row_height
        {
            return false;
        }

        debug!(item_count, column_count, row_height, "grid configuration changed");
        self.config.item_count = item_count;
        self.config.column_count = column_count.max(1);
        self.config.row_height = row_height;
        self.recompute_geometry();

        let max = self.max_scroll_top();
        if self.viewport.scroll_top > max {
            self.viewport.scroll_top = max;
            self.viewport.scroll_update_requested = true;
        }
        true
    }

    /// Largest valid scroll offset for the current geometry.
    pub fn max_scroll_top(&self) -> f64 {
        (self.viewport.leading_offset + self.viewport.estimated_total_height
            - self.config.viewport_height)
            .max(0.0)
    }

    /// Request a programmatic scroll to `requested`.
    ///
    /// The offset is clamped into `[0, max_scroll_top]`; an already-current
    /// offset is a no-op. The direction is derived from the *unclamped*
    /// request, and the update is flagged for the next
    /// [`GridViewState::flush_requested_scroll`]. Returns whether a state
    /// transition happened.
    pub fn request_scroll_top(&mut self, requested: f64) -> bool {
        let clamped = requested.max(0.0).min(self.max_scroll_top());
        let previous = self.viewport.scroll_top;
        if clamped == previous {
            return false;
        }

        self.viewport.direction = ScrollDirection::from_change(previous, requested);
        self.viewport.scroll_top = clamped;
        self.viewport.scroll_update_requested = true;
        trace!(requested, clamped, "programmatic scroll requested");
        true
    }

    /// Scroll to an absolute offset. A missing target is a no-op, not an
    /// error.
    pub fn scroll_to(&mut self, target: Option<f64>) -> bool {
        match target {
            Some(offset) => self.request_scroll_top(offset),
            None => false,
        }
    }

    /// Scroll the minimal distance that brings `item_index`'s row fully
    /// into view. No scroll happens when the row is already fully visible.
    pub fn scroll_to_item(&mut self, item_index: usize) -> bool {
        if self.config.item_count == 0 || self.viewport.row_count == 0 {
            return false;
        }

        let row = item_index
            .div_ceil(self.config.column_count.max(1))
            .min(self.viewport.row_count - 1);
        let row_height = self.config.row_height;
        let viewport_height = self.config.viewport_height;

        // The scrollbar eats into the viewport only when content overflows.
        let allowance = if self.viewport.estimated_total_height > viewport_height {
            self.scrollbar_thickness
        } else {
            0.0
        };

        let last_row_offset =
            (self.viewport.row_count as f64 * row_height - viewport_height).max(0.0);
        let max_offset = last_row_offset.min(row as f64 * row_height);
        let min_offset =
            (row as f64 * row_height - viewport_height + allowance + row_height).max(0.0);

        let current = self.viewport.scroll_top;
        if current >= min_offset && current <= max_offset {
            false
        } else if min_offset > max_offset || current < min_offset {
            self.request_scroll_top(min_offset)
        } else {
            self.request_scroll_top(max_offset)
        }
    }

    /// Ingest a native scroll event from the host surface.
    ///
    /// The raw offset is clamped into `[0, scroll_height - client_height]`,
    /// the is-scrolling flag is raised, and the update is marked as *not*
    /// programmatically requested — the surface already reflects it, so no
    /// flush is needed. An offset equal to the current state is a no-op.
    pub fn on_native_scroll(
        &mut self,
        client_height: f64,
        scroll_top: f64,
        scroll_height: f64,
        now_ms: u64,
    ) -> bool {
        if self.torn_down {
            return false;
        }
        let previous = self.viewport.scroll_top;
        if scroll_top == previous {
            return false;
        }

        let clamped = scroll_top
            .max(0.0)
            .min((scroll_height - client_height).max(0.0));
        self.viewport.direction = ScrollDirection::from_change(previous, scroll_top);
        self.viewport.scroll_top = clamped;
        self.viewport.is_scrolling = true;
        self.viewport.scroll_update_requested = false;
        self.last_scroll_event_ms = Some(now_ms);
        trace!(scroll_top, clamped, now_ms, "native scroll ingested");
        true
    }

    /// Reset the is-scrolling flag once no scroll event has arrived for the
    /// configured delay. The host polls this from its event loop; time is
    /// injected so the core stays deterministic. Returns whether the flag
    /// was cleared.
    pub fn poll_scroll_idle(&mut self, now_ms: u64) -> bool {
        if self.torn_down || !self.viewport.is_scrolling {
            return false;
        }
        let Some(last) = self.last_scroll_event_ms else {
            return false;
        };
        if now_ms.saturating_sub(last) < self.config.scrolling_reset_delay_ms {
            return false;
        }

        self.viewport.is_scrolling = false;
        self.last_scroll_event_ms = None;
        trace!(now_ms, "scroll idle, is_scrolling reset");
        true
    }

    /// Push a pending programmatic offset to the host surface.
    ///
    /// This is the one synchronization point between internal state and the
    /// real scrollable surface: it runs after every state commit, pushes
    /// `max(0, scroll_top)` exactly once, and clears the requested flag.
    /// Returns whether a push happened.
    pub fn flush_requested_scroll(&mut self, surface: &mut dyn ScrollSurface) -> bool {
        if !self.viewport.scroll_update_requested {
            return false;
        }
        surface.set_scroll_top(self.viewport.scroll_top.max(0.0));
        self.viewport.scroll_update_requested = false;
        true
    }

    /// Tear the viewport down: cancels the pending is-scrolling idle
    /// deadline so no reset fires against destroyed state. Subsequent scroll
    /// events and idle polls are no-ops.
    pub fn teardown(&mut self) {
        self.last_scroll_event_ms = None;
        self.viewport.is_scrolling = false;
        self.torn_down = true;
        debug!("viewport torn down");
    }

    /// Rows to materialize for the current offset and scroll activity.
    pub fn render_range(&self) -> RenderRange {
        compute_render_range(
            RangeParams {
                item_count: self.config.item_count,
                row_count: self.viewport.row_count,
                row_height: self.config.row_height,
                viewport_height: self.config.viewport_height,
                leading_offset: self.viewport.leading_offset,
                overscan_row_count: self.config.overscan_row_count,
            },
            self.viewport.scroll_top,
            self.viewport.is_scrolling,
            self.viewport.direction,
        )
    }

    /// Cached rectangle for a cell under the current layout params.
    pub fn cell_rect(&mut self, row: RowIndex, column: ColumnIndex) -> CellRect {
        let params = self.layout_params();
        self.rects.get(row, column, params)
    }

    /// Current layout params (cache fingerprint).
    pub fn layout_params(&self) -> LayoutParams {
        LayoutParams::new(
            self.viewport.column_width,
            self.config.row_height,
            self.viewport.leading_offset,
        )
    }

    /// Current viewport state snapshot.
    pub fn viewport(&self) -> &ViewportState {
        &self.viewport
    }

    /// Current configuration.
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Scrollbar thickness captured by the one-time probe at initialize.
    pub fn scrollbar_thickness(&self) -> f64 {
        self.scrollbar_thickness
    }

    /// Whether [`GridViewState::teardown`] has run.
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Number of rectangles currently held by the layout cache.
    pub fn cached_rect_count(&self) -> usize {
        self.rects.len()
    }

    fn recompute_geometry(&mut self) {
        let columns = self.config.column_count.max(1);
        self.viewport.column_width = self.viewport.width / columns as f64;
        self.viewport.row_count = self.config.row_count();
        self.viewport.estimated_total_height =
            self.viewport.row_count as f64 * self.config.row_height;
        let params = self.layout_params();
        self.rects.ensure_params(params);
    }
}
