//! Per-cell geometry and the layout cache.

use std::collections::HashMap;

use super::types::{CellRect, ColumnIndex, RowIndex};

/// Geometry parameters every cell rectangle is derived from.
///
/// Used for invalidation: the cache compares the params it was filled under
/// against the current ones by value, and discards itself on any difference.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayoutParams {
    /// Width of a single column (viewport width / column count).
    pub column_width: f64,
    /// Fixed pixel height of every row.
    pub row_height: f64,
    /// Vertical space reserved above the windowed content.
    pub leading_offset: f64,
}

impl LayoutParams {
    /// Create new layout params.
    pub fn new(column_width: f64, row_height: f64, leading_offset: f64) -> Self {
        Self {
            column_width,
            row_height,
            leading_offset,
        }
    }
}

/// Compute the absolute rectangle for a cell.
pub fn cell_rect(row: RowIndex, column: ColumnIndex, params: LayoutParams) -> CellRect {
    CellRect {
        left: params.column_width * column.get() as f64,
        top: params.leading_offset + params.row_height * row.get() as f64,
        width: params.column_width,
        height: params.row_height,
    }
}

/// Memo cache for cell rectangles, keyed by `(row, column)`.
///
/// Keys do not encode the layout params, so the whole map is discarded (not
/// overwritten per key) whenever column width, row height, or leading offset
/// change. A stale rectangle is never observable: every access goes through
/// [`CellRectCache::get`], which re-checks the params first.
#[derive(Debug, Default)]
pub struct CellRectCache {
    params: LayoutParams,
    rects: HashMap<(RowIndex, ColumnIndex), CellRect>,
}

impl CellRectCache {
    /// Create an empty cache filled under `params`.
    pub fn new(params: LayoutParams) -> Self {
        Self {
            params,
            rects: HashMap::new(),
        }
    }

    /// Discard every cached rectangle if `params` differ from the ones the
    /// cache was filled under.
    pub fn ensure_params(&mut self, params: LayoutParams) {
        if self.params != params {
            self.rects.clear();
            self.params = params;
        }
    }

    /// Rectangle for `(row, column)` under `params`, computed on first
    /// access and served from the cache afterwards.
    pub fn get(&mut self, row: RowIndex, column: ColumnIndex, params: LayoutParams) -> CellRect {
        self.ensure_params(params);
        *self
            .rects
            .entry((row, column))
            .or_insert_with(|| cell_rect(row, column, params))
    }

    /// Number of cached rectangles.
    pub fn len(&self) -> usize {
        self.rects.len()
    }

    /// Check if the cache holds no rectangles.
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    /// Drop all cached rectangles, keeping the current params.
    pub fn clear(&mut self) {
        self.rects.clear();
    }
}
