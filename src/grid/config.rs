//! Engine configuration supplied by the host.

use thiserror::Error;

/// Default delay before the is-scrolling flag resets after the last scroll
/// event, in milliseconds.
pub const DEFAULT_SCROLLING_RESET_DELAY_MS: u64 = 150;

/// Default number of extra rows rendered beyond the visible window.
pub const DEFAULT_OVERSCAN_ROW_COUNT: usize = 1;

/// Error returned when constructing a [`GridConfig`] from invalid inputs.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum InvalidGridConfig {
    /// Column count must be at least 1.
    #[error("column count must be >= 1")]
    ZeroColumns,

    /// Row height must be a finite, strictly positive pixel value.
    #[error("row height must be finite and > 0 (got {0})")]
    InvalidRowHeight(f64),

    /// Viewport height must be a finite, non-negative pixel value.
    #[error("viewport height must be finite and >= 0 (got {0})")]
    InvalidViewportHeight(f64),
}

/// Grid configuration, immutable within a render cycle.
///
/// All vertical quantities are pixels; rows are uniform. Fields are public
/// plain data — the smart constructor is the validation boundary, and the
/// engine treats a well-formed configuration as a precondition (it clamps
/// defensively rather than reporting errors at runtime).
#[derive(Debug, Clone, PartialEq)]
pub struct GridConfig {
    /// Fixed pixel height of the scrollable window.
    pub viewport_height: f64,
    /// Fixed pixel height of every row.
    pub row_height: f64,
    /// Number of cells per row. Always >= 1.
    pub column_count: usize,
    /// Logical size of the backing collection.
    pub item_count: usize,
    /// Extra rows rendered beyond the visible window. A value of 0 is
    /// treated as 1 when the range is computed.
    pub overscan_row_count: usize,
    /// Offset applied once at mount, before any scroll event.
    pub initial_scroll_top: Option<f64>,
    /// Idle delay after which the is-scrolling flag resets.
    pub scrolling_reset_delay_ms: u64,
}

impl GridConfig {
    /// Create a validated configuration with default overscan and reset
    /// delay.
    pub fn new(
        viewport_height: f64,
        row_height: f64,
        column_count: usize,
        item_count: usize,
    ) -> Result<Self, InvalidGridConfig> {
        if column_count == 0 {
            return Err(InvalidGridConfig::ZeroColumns);
        }
        if !row_height.is_finite() || row_height <= 0.0 {
            return Err(InvalidGridConfig::InvalidRowHeight(row_height));
        }
        if !viewport_height.is_finite() || viewport_height < 0.0 {
            return Err(InvalidGridConfig::InvalidViewportHeight(viewport_height));
        }
        Ok(Self {
            viewport_height,
            row_height,
            column_count,
            item_count,
            overscan_row_count: DEFAULT_OVERSCAN_ROW_COUNT,
            initial_scroll_top: None,
            scrolling_reset_delay_ms: DEFAULT_SCROLLING_RESET_DELAY_MS,
        })
    }

    /// Set the overscan row count.
    pub fn with_overscan(mut self, overscan_row_count: usize) -> Self {
        self.overscan_row_count = overscan_row_count;
        self
    }

    /// Set the one-shot initial scroll offset.
    pub fn with_initial_scroll_top(mut self, offset: f64) -> Self {
        self.initial_scroll_top = Some(offset);
        self
    }

    /// Set the is-scrolling reset delay.
    pub fn with_scrolling_reset_delay_ms(mut self, delay_ms: u64) -> Self {
        self.scrolling_reset_delay_ms = delay_ms;
        self
    }

    /// Number of rows: `ceil(item_count / column_count)`.
    pub fn row_count(&self) -> usize {
        self.item_count.div_ceil(self.column_count.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> GridConfig {
        GridConfig::new(500.0, 100.0, 3, 30).expect("valid config")
    }

    mod construction {
        use super::*;

        #[test]
        fn new_accepts_valid_inputs() {
            let config = config();
            assert_eq!(config.viewport_height, 500.0);
            assert_eq!(config.row_height, 100.0);
            assert_eq!(config.column_count, 3);
            assert_eq!(config.item_count, 30);
        }

        #[test]
        fn new_defaults_overscan_to_one() {
            assert_eq!(config().overscan_row_count, DEFAULT_OVERSCAN_ROW_COUNT);
        }

        #[test]
        fn new_defaults_reset_delay() {
            assert_eq!(
                config().scrolling_reset_delay_ms,
                DEFAULT_SCROLLING_RESET_DELAY_MS
            );
        }

        #[test]
        fn new_defaults_initial_offset_to_none() {
            assert_eq!(config().initial_scroll_top, None);
        }

        #[test]
        fn new_rejects_zero_columns() {
            let result = GridConfig::new(500.0, 100.0, 0, 30);
            assert_eq!(result.unwrap_err(), InvalidGridConfig::ZeroColumns);
        }

        #[test]
        fn new_rejects_zero_row_height() {
            let result = GridConfig::new(500.0, 0.0, 3, 30);
            assert_eq!(result.unwrap_err(), InvalidGridConfig::InvalidRowHeight(0.0));
        }

        #[test]
        fn new_rejects_negative_row_height() {
            assert!(GridConfig::new(500.0, -1.0, 3, 30).is_err());
        }

        #[test]
        fn new_rejects_nan_row_height() {
            assert!(GridConfig::new(500.0, f64::NAN, 3, 30).is_err());
        }

        #[test]
        fn new_rejects_negative_viewport_height() {
            assert!(GridConfig::new(-10.0, 100.0, 3, 30).is_err());
        }

        #[test]
        fn new_accepts_zero_viewport_height() {
            assert!(GridConfig::new(0.0, 100.0, 3, 30).is_ok());
        }

        #[test]
        fn new_accepts_zero_items() {
            let config = GridConfig::new(500.0, 100.0, 3, 0).expect("valid");
            assert_eq!(config.row_count(), 0);
        }

        #[test]
        fn builder_methods_chain() {
            let config = config()
                .with_overscan(4)
                .with_initial_scroll_top(120.0)
                .with_scrolling_reset_delay_ms(200);
            assert_eq!(config.overscan_row_count, 4);
            assert_eq!(config.initial_scroll_top, Some(120.0));
            assert_eq!(config.scrolling_reset_delay_ms, 200);
        }
    }

    mod row_count {
        use super::*;

        #[test]
        fn exact_division() {
            let config = GridConfig::new(500.0, 100.0, 3, 30).expect("valid");
            assert_eq!(config.row_count(), 10);
        }

        #[test]
        fn remainder_adds_partial_row() {
            let config = GridConfig::new(500.0, 100.0, 3, 31).expect("valid");
            assert_eq!(config.row_count(), 11);
        }

        #[test]
        fn single_item_single_row() {
            let config = GridConfig::new(500.0, 100.0, 3, 1).expect("valid");
            assert_eq!(config.row_count(), 1);
        }

        #[test]
        fn zero_items_zero_rows() {
            let config = GridConfig::new(500.0, 100.0, 3, 0).expect("valid");
            assert_eq!(config.row_count(), 0);
        }
    }

}
