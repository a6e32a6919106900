//! Scenario-level tests for the windowing engine.
//!
//! Walks the engine through the documented end-to-end scenarios: mount,
//! scroll, scroll-to-item, configuration change, and teardown, observing
//! only the public surface.

use gridwin::grid::config::GridConfig;
use gridwin::grid::driver::{CellDescriptor, RenderDriver};
use gridwin::grid::state::GridViewState;
use gridwin::host::{ScrollSurface, StaticMetrics};
use gridwin::view::EmulatedSurface;

fn items(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("item-{i}")).collect()
}

fn metrics() -> StaticMetrics {
    StaticMetrics {
        width: 900.0,
        leading_offset: 0.0,
        scrollbar_thickness: 0.0,
    }
}

/// 30 items in 3 columns of 100px rows inside a 500px viewport.
fn mounted() -> (GridViewState, EmulatedSurface) {
    let config = GridConfig::new(500.0, 100.0, 3, 30).expect("valid config");
    let mut state = GridViewState::new(config);
    let mut surface = EmulatedSurface::new(500.0, 1000.0);
    state.initialize(&metrics(), &mut surface, &metrics());
    (state, surface)
}

#[test]
fn mount_derives_row_count_and_total_height() {
    let (state, _) = mounted();
    assert_eq!(state.viewport().row_count, 10);
    assert_eq!(state.viewport().estimated_total_height, 1000.0);
    assert_eq!(state.viewport().column_width, 300.0);
}

#[test]
fn at_rest_five_rows_visible_with_one_row_overscan() {
    let (state, _) = mounted();
    let range = state.render_range();
    assert_eq!(range.visible_start.get(), 0);
    assert_eq!(range.visible_end.get(), 4);
    assert_eq!(range.render_start.get(), 0);
    assert_eq!(range.render_end.get(), 5);
}

#[test]
fn scroll_to_last_item_lands_on_max_offset() {
    let (mut state, mut surface) = mounted();

    let changed = state.scroll_to_item(29);
    state.flush_requested_scroll(&mut surface);

    assert!(changed);
    assert_eq!(state.viewport().scroll_top, 500.0);
    assert_eq!(surface.scroll_top(), 500.0);
}

#[test]
fn negative_scroll_request_clamps_to_zero_and_then_noops() {
    let (mut state, _) = mounted();

    let first = state.scroll_to(Some(-50.0));
    assert!(!first, "already at 0: clamped request is no transition");
    assert_eq!(state.viewport().scroll_top, 0.0);

    state.request_scroll_top(200.0);
    let second = state.scroll_to(Some(-50.0));
    assert!(second, "from 200 a clamped-to-zero request does transition");
    assert_eq!(state.viewport().scroll_top, 0.0);
}

#[test]
fn missing_scroll_target_is_ignored() {
    let (mut state, _) = mounted();
    assert!(!state.scroll_to(None));
    assert_eq!(state.viewport().scroll_top, 0.0);
}

#[test]
fn empty_grid_emits_no_cells_and_a_degenerate_range() {
    let config = GridConfig::new(500.0, 100.0, 3, 0).expect("valid config");
    let mut state = GridViewState::new(config);
    let mut surface = EmulatedSurface::new(500.0, 0.0);
    state.initialize(&metrics(), &mut surface, &metrics());

    let range = state.render_range();
    assert_eq!(
        (
            range.render_start.get(),
            range.render_end.get(),
            range.visible_start.get(),
            range.visible_end.get(),
        ),
        (0, 0, 0, 0)
    );

    let driver = RenderDriver::new();
    let data = items(0);
    let mut emitted = 0;
    driver.emit(&mut state, &data, |_: CellDescriptor<'_, String>| emitted += 1);
    assert_eq!(emitted, 0);
}

#[test]
fn programmatic_scroll_flushes_to_the_surface_exactly_once() {
    let (mut state, mut surface) = mounted();

    state.request_scroll_top(240.0);
    assert_eq!(surface.scroll_top(), 0.0, "nothing pushed before the flush");

    assert!(state.flush_requested_scroll(&mut surface));
    assert_eq!(surface.scroll_top(), 240.0);

    surface.set_scroll_top(0.0);
    assert!(
        !state.flush_requested_scroll(&mut surface),
        "a second flush must not push again"
    );
    assert_eq!(surface.scroll_top(), 0.0);
}

#[test]
fn native_scroll_needs_no_flush() {
    let (mut state, mut surface) = mounted();

    surface.scroll_by(130.0);
    state.on_native_scroll(500.0, surface.scroll_top(), surface.scroll_height(), 0);

    assert_eq!(state.viewport().scroll_top, 130.0);
    assert!(!state.flush_requested_scroll(&mut surface));
}

#[test]
fn initial_offset_is_applied_to_surface_at_mount() {
    let config = GridConfig::new(500.0, 100.0, 3, 30)
        .expect("valid config")
        .with_initial_scroll_top(321.0);
    let mut state = GridViewState::new(config);
    let mut surface = EmulatedSurface::new(500.0, 1000.0);
    state.initialize(&metrics(), &mut surface, &metrics());

    assert_eq!(state.viewport().scroll_top, 321.0);
    assert_eq!(surface.scroll_top(), 321.0);
    assert!(!state.viewport().scroll_update_requested);
}

#[test]
fn growing_the_collection_extends_the_scrollable_range() {
    let (mut state, mut surface) = mounted();

    state.on_configuration_change(60, 3, 100.0);

    assert_eq!(state.viewport().row_count, 20);
    assert_eq!(state.viewport().estimated_total_height, 2000.0);
    assert_eq!(state.max_scroll_top(), 1500.0);

    state.scroll_to(Some(99_999.0));
    state.flush_requested_scroll(&mut surface);
    assert_eq!(state.viewport().scroll_top, 1500.0);
}

#[test]
fn shrinking_the_collection_pulls_the_offset_back_in_bounds() {
    let (mut state, mut surface) = mounted();
    state.request_scroll_top(500.0);
    state.flush_requested_scroll(&mut surface);

    state.on_configuration_change(6, 3, 100.0);

    assert_eq!(state.viewport().scroll_top, 0.0);
    assert!(state.viewport().scroll_update_requested);
    state.flush_requested_scroll(&mut surface);
    assert_eq!(surface.scroll_top(), 0.0);
}

#[test]
fn rects_follow_a_row_height_change_immediately() {
    let (mut state, _) = mounted();
    let before = state.cell_rect(2.into(), 1.into());
    assert_eq!(before.top, 200.0);

    state.on_configuration_change(30, 3, 40.0);

    let after = state.cell_rect(2.into(), 1.into());
    assert_eq!(after.top, 80.0);
    assert_eq!(after.height, 40.0);
}

#[test]
fn direction_bias_trims_the_trailing_overscan_edge() {
    let config = GridConfig::new(500.0, 100.0, 3, 30)
        .expect("valid config")
        .with_overscan(3);
    let mut state = GridViewState::new(config);
    let mut surface = EmulatedSurface::new(500.0, 1000.0);
    state.initialize(&metrics(), &mut surface, &metrics());

    // Scrolling forward: full overscan ahead, minimal behind.
    surface.scroll_by(300.0);
    state.on_native_scroll(500.0, surface.scroll_top(), surface.scroll_height(), 0);
    let range = state.render_range();
    assert_eq!(range.visible_start.get(), 3);
    assert_eq!(range.render_start.get(), 2);
    assert_eq!(range.render_end.get(), 9.min(range.visible_end.get() + 3));

    // Once idle again, both edges get the full overscan.
    state.poll_scroll_idle(1_000);
    let idle_range = state.render_range();
    assert_eq!(idle_range.render_start.get(), 0);
}

#[test]
fn teardown_cancels_the_pending_idle_reset() {
    let (mut state, mut surface) = mounted();
    surface.scroll_by(100.0);
    state.on_native_scroll(500.0, surface.scroll_top(), surface.scroll_height(), 0);
    assert!(state.viewport().is_scrolling);

    state.teardown();

    assert!(!state.poll_scroll_idle(60_000));
    assert!(!state.on_native_scroll(500.0, 400.0, 1000.0, 60_001));
    assert!(state.is_torn_down());
}

#[test]
fn driver_marks_cells_non_interactive_while_scrolling() {
    let (mut state, mut surface) = mounted();
    let data = items(30);
    let driver = RenderDriver::new();

    surface.scroll_by(100.0);
    state.on_native_scroll(500.0, surface.scroll_top(), surface.scroll_height(), 0);
    driver.emit(&mut state, &data, |cell| assert!(!cell.interactive));

    state.poll_scroll_idle(1_000);
    driver.emit(&mut state, &data, |cell| assert!(cell.interactive));
}

#[test]
fn scrollbar_allowance_shifts_the_minimal_scroll_target() {
    let config = GridConfig::new(500.0, 100.0, 3, 30).expect("valid config");
    let mut state = GridViewState::new(config);
    let mut surface = EmulatedSurface::new(500.0, 1000.0);
    let metrics = StaticMetrics {
        width: 900.0,
        leading_offset: 0.0,
        scrollbar_thickness: 15.0,
    };
    state.initialize(&metrics, &mut surface, &metrics);

    // Row 7: min offset = 700 - 500 + 15 + 100 = 315.
    state.scroll_to_item(20);
    assert_eq!(state.viewport().scroll_top, 315.0);
}
