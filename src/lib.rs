//! gridwin - windowed rendering for very large fixed-row-height grids
//!
//! Renders only the rows of a logically two-dimensional collection that
//! intersect a fixed-height viewport, plus a scroll-direction-biased
//! overscan margin. The engine core (`grid`) is headless and synchronous;
//! host environments plug in through the `host` traits. A ratatui demo
//! shell (`view`) browses a grid of items in the terminal.

pub mod config;
pub mod grid;
pub mod host;
pub mod logging;
pub mod view;
