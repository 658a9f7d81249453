mod common;

use std::time::Duration;

use common::Harness;
use scrolltable::{LayoutState, ScrollSetting, TableAttrs};
use tabledom::{Dom, Length};

fn percent_x() -> TableAttrs {
    TableAttrs::new()
        .scrollable(ScrollSetting::X)
        .width(Length::Percent(50.0))
}

// ============================================================================
// Teardown
// ============================================================================

#[test]
fn test_teardown_releases_everything() {
    let mut h = Harness::new(
        TableAttrs::new()
            .scrollable(ScrollSetting::Xy)
            .width(Length::Percent(50.0))
            .height(Length::Px(200.0)),
    );
    // Body, scrollbar, header wheel and viewport resize.
    assert_eq!(h.doc.listener_count(), 4);

    let scroller = h.y_scroller();
    h.doc.set_scroll_top(scroller, 120.0);
    h.doc.resize_viewport(800.0, 600.0);
    h.table.teardown(&mut h.doc);

    assert_eq!(h.doc.listener_count(), 0);
    assert!(!h.table.coordinator().is_bound());
    assert_eq!(h.table.pending_resize(), None);
    // Queued dispatches for removed listeners are never delivered.
    assert!(h.doc.poll_event().is_none());
    assert_eq!(h.doc.scroll_top(h.scrollbar()), 0.0);
}

#[test]
fn test_no_handling_after_teardown() {
    let mut h = Harness::new(
        TableAttrs::new()
            .scrollable(ScrollSetting::Y)
            .height(Length::Px(200.0)),
    );
    let layout = h.table.layout_state();
    h.table.teardown(&mut h.doc);

    h.table.set_height(&mut h.doc, Some("300px")).unwrap();
    assert_eq!(h.table.attrs().height, Some(Length::Px(300.0)));
    assert_eq!(h.table.layout_state(), layout);
    assert_eq!(h.style(h.y_scroller(), "height").as_deref(), Some("170px"));
    assert_eq!(h.doc.listener_count(), 0);
}

// ============================================================================
// Viewport resize
// ============================================================================

#[test]
fn test_percent_width_tracks_viewport() {
    let mut h = Harness::new(percent_x());
    assert_eq!(h.table.layout_state(), LayoutState::SplitX);
    assert_eq!(h.doc.listener_count(), 1);
    // 512px of room for a 196px table.
    assert_eq!(h.style(h.nodes.table, "width").as_deref(), Some("100%"));

    h.doc.resize_viewport(300.0, 768.0);
    assert_eq!(h.pump(), 1);
    assert!(h.table.pending_resize().is_some());

    // Not settled yet.
    h.clock.advance(Duration::from_millis(50));
    h.table.tick(&mut h.doc);
    assert_eq!(h.style(h.nodes.table, "width").as_deref(), Some("100%"));

    h.clock.advance(Duration::from_millis(50));
    h.table.tick(&mut h.doc);
    assert_eq!(h.table.pending_resize(), None);
    assert_eq!(h.style(h.nodes.table, "width").as_deref(), Some("196px"));
}

#[test]
fn test_percent_height_tracks_viewport() {
    let mut h = Harness::new(
        TableAttrs::new()
            .scrollable(ScrollSetting::Y)
            .height(Length::Percent(50.0)),
    );
    assert_eq!(h.style(h.y_scroller(), "height").as_deref(), Some("354px"));
    // Body, scrollbar, header wheel and viewport resize.
    assert_eq!(h.doc.listener_count(), 4);

    h.doc.resize_viewport(1024.0, 400.0);
    assert_eq!(h.pump(), 1);
    h.clock.advance(Duration::from_millis(100));
    h.table.tick(&mut h.doc);

    // Half of 400px, minus the 30px fixed header.
    assert_eq!(h.style(h.y_scroller(), "height").as_deref(), Some("170px"));
}

#[test]
fn test_repeated_resizes_push_back_the_recompute() {
    let mut h = Harness::new(percent_x());

    h.doc.resize_viewport(300.0, 768.0);
    h.pump();
    h.clock.advance(Duration::from_millis(80));
    h.doc.resize_viewport(320.0, 768.0);
    h.pump();
    h.clock.advance(Duration::from_millis(80));
    h.table.tick(&mut h.doc);
    assert!(h.table.pending_resize().is_some());

    h.clock.advance(Duration::from_millis(20));
    h.table.tick(&mut h.doc);
    assert_eq!(h.table.pending_resize(), None);
}

#[test]
fn test_fixed_width_drops_resize_listener() {
    let mut h = Harness::new(percent_x());
    h.doc.resize_viewport(300.0, 768.0);
    h.pump();
    assert!(h.table.pending_resize().is_some());

    h.table.set_width(&mut h.doc, Some("400px")).unwrap();
    assert_eq!(h.doc.listener_count(), 0);
    assert_eq!(h.table.pending_resize(), None);

    h.doc.resize_viewport(1024.0, 768.0);
    assert_eq!(h.pump(), 0);
}

#[test]
fn test_disabling_scroll_drops_resize_listener() {
    let mut h = Harness::new(percent_x());
    h.table.set_scroll_setting(&mut h.doc, ScrollSetting::Off);
    assert_eq!(h.doc.listener_count(), 0);
    assert_eq!(h.table.layout_state(), LayoutState::Unsplit);
}
