//! Render driver: fans the render range out to cell descriptors.
//!
//! The driver owns no pixels. It asks the range calculator which rows to
//! materialize, the layout cache for each cell's rectangle, and hands the
//! resulting descriptors to an externally supplied rendering function. The
//! host environment turns descriptors into whatever its display technology
//! needs.

use std::fmt;

use super::state::GridViewState;
use super::types::{CellRect, ColumnIndex, RowIndex};

/// Default cell identity: `"{row}:{column}"`.
pub fn default_cell_key(row: RowIndex, column: ColumnIndex) -> String {
    format!("{}:{}", row.get(), column.get())
}

/// Externally suppliable cell-identity function. Receives the cell
/// coordinates and the whole backing collection.
pub type CellKeyFn<T> = Box<dyn Fn(RowIndex, ColumnIndex, &[T]) -> String + Send + Sync>;

/// Everything the externally supplied cell renderer receives for one cell.
///
/// `data` is the entire backing collection, not a per-cell slice; indexing
/// into it is the renderer's responsibility (trailing cells in a partial
/// last row have no backing item).
#[derive(Debug)]
pub struct CellDescriptor<'a, T> {
    /// Row this cell belongs to.
    pub row: RowIndex,
    /// Column this cell belongs to.
    pub column: ColumnIndex,
    /// Flat index into the backing collection (`row * column_count + column`).
    pub item_index: usize,
    /// Stable identity for reconciliation by the host renderer.
    pub key: String,
    /// Absolute position and size of the cell.
    pub rect: CellRect,
    /// The whole backing collection.
    pub data: &'a [T],
    /// False while the viewport is actively scrolling — a hint that the
    /// host renderer should ignore pointer interaction on this cell.
    pub interactive: bool,
}

impl<'a, T> CellDescriptor<'a, T> {
    /// The backing item for this cell, if the cell maps to one.
    pub fn item(&self) -> Option<&'a T> {
        self.data.get(self.item_index)
    }
}

/// Fans each state change out to cell descriptors.
pub struct RenderDriver<T> {
    key_fn: CellKeyFn<T>,
}

impl<T> fmt::Debug for RenderDriver<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderDriver").finish_non_exhaustive()
    }
}

impl<T> Default for RenderDriver<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RenderDriver<T> {
    /// Driver with the default `"{row}:{column}"` cell identity.
    pub fn new() -> Self {
        Self {
            key_fn: Box::new(|row, column, _| default_cell_key(row, column)),
        }
    }

    /// Driver with an externally supplied cell-identity function.
    pub fn with_key_fn(
        key_fn: impl Fn(RowIndex, ColumnIndex, &[T]) -> String + Send + Sync + 'static,
    ) -> Self {
        Self {
            key_fn: Box::new(key_fn),
        }
    }

    /// Emit a descriptor for every cell in the render range.
    ///
    /// Iterates the rows the range calculator selected and every column in
    /// `[0, column_count)`, in row-major order. An empty collection emits
    /// nothing.
    pub fn emit<'a>(
        &self,
        state: &mut GridViewState,
        data: &'a [T],
        mut render: impl FnMut(CellDescriptor<'a, T>),
    ) {
        if state.config().item_count == 0 {
            return;
        }

        let range = state.render_range();
        let column_count = state.config().column_count;
        let interactive = !state.viewport().is_scrolling;

        for row in range.render_rows() {
            for column in (0..column_count).map(ColumnIndex::new) {
                let rect = state.cell_rect(row, column);
                render(CellDescriptor {
                    row,
                    column,
                    item_index: row.get() * column_count + column.get(),
                    key: (self.key_fn)(row, column, data),
                    rect,
                    data,
                    interactive,
                });
            }
        }
    }
}
