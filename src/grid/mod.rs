//! Windowing engine core - viewport state, ranges, layout, render driving
//!
//! This module implements the windowing engine: it tracks viewport state,
//! maps scroll offsets to the subset of rows worth rendering, caches
//! per-cell geometry, and fans state changes out to an externally supplied
//! cell renderer. Rendering cost is bounded by viewport size, never by the
//! size of the backing collection.
//!
//! # Module Structure
//!
//! - `types`: Core newtypes (RowIndex, ColumnIndex, ScrollDirection, CellRect)
//! - `config`: GridConfig - host-supplied engine configuration
//! - `range`: RenderRange - visible/render row range calculation
//! - `layout`: Cell geometry and the wholesale-invalidated rect cache
//! - `state`: ViewportState/GridViewState - state manager and scroll control
//! - `driver`: RenderDriver - cell descriptor fan-out

pub mod config;
pub mod driver;
pub mod layout;
pub mod range;
pub mod state;
pub mod types;
