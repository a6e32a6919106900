//! Core grid newtypes

/// Row index within the grid. 0-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RowIndex(usize);

impl RowIndex {
    /// Create a new RowIndex from a raw 0-based value.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Get the raw 0-based index value.
    pub fn get(&self) -> usize {
        self.0
    }

    /// Get the next row index.
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }

    /// Subtract an amount from this index, saturating at 0.
    pub fn saturating_sub(&self, amount: usize) -> Self {
        Self(self.0.saturating_sub(amount))
    }
}

impl From<usize> for RowIndex {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

/// Column index within a row. 0-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ColumnIndex(usize);

impl ColumnIndex {
    /// Create a new ColumnIndex from a raw 0-based value.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Get the raw 0-based index value.
    pub fn get(&self) -> usize {
        self.0
    }
}

impl From<usize> for ColumnIndex {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

/// Vertical scroll direction, derived by comparing a new offset against the
/// previous one. An unchanged offset keeps the previous direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollDirection {
    /// Scrolling toward larger offsets (down).
    #[default]
    Forward,
    /// Scrolling toward smaller offsets (up).
    Backward,
}

impl ScrollDirection {
    /// Direction implied by moving from `previous` to `requested`.
    ///
    /// Mirrors the offset comparison the scroll handlers use: strictly
    /// increasing is forward, anything else is backward. Callers are expected
    /// to have filtered out the no-change case already.
    pub fn from_change(previous: f64, requested: f64) -> Self {
        if previous < requested {
            Self::Forward
        } else {
            Self::Backward
        }
    }

    /// True when scrolling toward larger offsets.
    pub fn is_forward(&self) -> bool {
        matches!(self, Self::Forward)
    }

    /// True when scrolling toward smaller offsets.
    pub fn is_backward(&self) -> bool {
        matches!(self, Self::Backward)
    }
}

/// Absolute position and size of a single cell, in pixels.
///
/// Purely a function of (row, column) and the current layout parameters;
/// cached by [`super::layout::CellRectCache`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CellRect {
    /// Distance from the left edge of the content area.
    pub left: f64,
    /// Distance from the top of the content area (leading offset included).
    pub top: f64,
    /// Cell width (= column width).
    pub width: f64,
    /// Cell height (= row height).
    pub height: f64,
}

impl CellRect {
    /// Right edge of the cell.
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Bottom edge of the cell.
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}
