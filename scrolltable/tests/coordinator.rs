mod common;

use std::time::{Duration, Instant};

use common::Harness;
use scrolltable::{
    Change, Clock, DataChange, ScrollCoordinator, ScrollSetting, ScrollSource, ScrollTunables,
    TableAttrs,
};
use tabledom::{Document, Dom, Element, EventKind, Length, NodeId, Tag, Target};

fn y_attrs() -> TableAttrs {
    TableAttrs::new()
        .scrollable(ScrollSetting::Y)
        .height(Length::Px(200.0))
}

/// A 100px body over 500px of content, and a matching scrollbar.
fn pair(doc: &mut Document) -> (NodeId, NodeId) {
    let scroller = doc.create(
        Element::div()
            .style("height", "100px")
            .style("overflow-y", "auto")
            .child(Element::div().style("height", "500px")),
    );
    let scrollbar = doc.create(
        Element::div()
            .style("height", "100px")
            .style("overflow-y", "scroll")
            .child(Element::div().style("height", "500px")),
    );
    (scroller, scrollbar)
}

fn deliver(doc: &mut Document, coordinator: &mut ScrollCoordinator, now: Instant) {
    while let Some(dispatch) = doc.poll_event() {
        coordinator.handle(doc, &dispatch, now);
    }
}

// ============================================================================
// Binding
// ============================================================================

#[test]
fn test_bind_is_idempotent_and_unbind_releases() {
    let mut doc = Document::new();
    let (scroller, scrollbar) = pair(&mut doc);
    let mut coordinator = ScrollCoordinator::new(Duration::from_millis(300));

    coordinator.bind(&mut doc, scroller, scrollbar, None);
    assert_eq!(doc.listener_count(), 2);
    coordinator.bind(&mut doc, scroller, scrollbar, None);
    assert_eq!(doc.listener_count(), 2);

    let (other, _) = pair(&mut doc);
    coordinator.bind(&mut doc, other, scrollbar, None);
    assert_eq!(doc.listener_count(), 2);

    coordinator.unbind(&mut doc);
    assert!(!coordinator.is_bound());
    assert_eq!(doc.listener_count(), 0);
}

#[test]
fn test_unbound_coordinator_ignores_events() {
    let mut doc = Document::new();
    let (scroller, _) = pair(&mut doc);
    let listener = doc.listen(Target::Node(scroller), EventKind::Scroll);
    let mut coordinator = ScrollCoordinator::new(Duration::from_millis(300));

    doc.set_scroll_top(scroller, 40.0);
    let dispatch = doc.poll_event().unwrap();
    assert_eq!(dispatch.listener, listener);
    assert!(!coordinator.handle(&mut doc, &dispatch, Instant::now()));
}

// ============================================================================
// Lock
// ============================================================================

#[test]
fn test_native_scroll_mirrors_and_suppresses_echo() {
    let mut doc = Document::new();
    let (scroller, scrollbar) = pair(&mut doc);
    let mut coordinator = ScrollCoordinator::new(Duration::from_millis(300));
    coordinator.bind(&mut doc, scroller, scrollbar, None);
    let start = Instant::now();

    doc.set_scroll_top(scroller, 50.0);
    deliver(&mut doc, &mut coordinator, start);
    assert_eq!(doc.scroll_top(scrollbar), 50.0);
    assert_eq!(
        coordinator.lock(start).map(|lock| lock.source),
        Some(ScrollSource::Native)
    );

    // Scrollbar input during the lock is treated as an echo.
    doc.set_scroll_top(scrollbar, 80.0);
    deliver(&mut doc, &mut coordinator, start + Duration::from_millis(100));
    assert_eq!(doc.scroll_top(scroller), 50.0);

    // After expiry it is honoured again.
    let later = start + Duration::from_millis(301);
    assert_eq!(coordinator.lock(later), None);
    doc.set_scroll_top(scrollbar, 120.0);
    deliver(&mut doc, &mut coordinator, later);
    assert_eq!(doc.scroll_top(scroller), 120.0);
    assert_eq!(
        coordinator.lock(later).map(|lock| lock.source),
        Some(ScrollSource::Virtual)
    );
}

#[test]
fn test_virtual_scroll_mirrors_and_suppresses_echo() {
    let mut doc = Document::new();
    let (scroller, scrollbar) = pair(&mut doc);
    let mut coordinator = ScrollCoordinator::new(Duration::from_millis(300));
    coordinator.bind(&mut doc, scroller, scrollbar, None);
    let now = Instant::now();

    doc.set_scroll_top(scrollbar, 200.0);
    deliver(&mut doc, &mut coordinator, now);
    assert_eq!(doc.scroll_top(scroller), 200.0);

    doc.set_scroll_top(scroller, 10.0);
    deliver(&mut doc, &mut coordinator, now);
    assert_eq!(doc.scroll_top(scrollbar), 200.0);
}

#[test]
fn test_expire_clears_lock() {
    let mut doc = Document::new();
    let (scroller, scrollbar) = pair(&mut doc);
    let mut coordinator = ScrollCoordinator::new(Duration::from_millis(300));
    coordinator.bind(&mut doc, scroller, scrollbar, None);
    let now = Instant::now();

    doc.set_scroll_top(scroller, 30.0);
    deliver(&mut doc, &mut coordinator, now);
    coordinator.expire(now + Duration::from_millis(299));
    assert!(coordinator.lock(now).is_some());

    coordinator.expire(now + Duration::from_millis(300));
    assert_eq!(coordinator.lock(now), None);
}

// ============================================================================
// Through the table
// ============================================================================

#[test]
fn test_body_scroll_reaches_scrollbar() {
    let mut h = Harness::new(y_attrs());
    let scroller = h.y_scroller();
    let scrollbar = h.scrollbar();

    h.doc.set_scroll_top(scroller, 300.0);
    assert_eq!(h.pump(), 2);
    assert_eq!(h.doc.scroll_top(scrollbar), 300.0);

    h.doc.set_scroll_top(scrollbar, 100.0);
    h.pump();
    assert_eq!(h.doc.scroll_top(scroller), 300.0);

    h.clock.advance(Duration::from_millis(301));
    h.table.tick(&mut h.doc);
    assert_eq!(h.table.coordinator().lock(h.clock.now()), None);

    h.doc.set_scroll_top(scrollbar, 150.0);
    h.pump();
    assert_eq!(h.doc.scroll_top(scroller), 150.0);
    assert_eq!(h.doc.scroll_top(scrollbar), 150.0);
}

#[test]
fn test_custom_lock_timeout() {
    let mut h = Harness::initialized(y_attrs(), common::people_table(20, true));
    h.table = scrolltable::ScrollableTable::with_clock(y_attrs(), h.clock.clone())
        .tunables(ScrollTunables::default().lock_timeout(Duration::from_millis(50)));
    h.table.initialize(&h.doc, h.nodes);
    h.table.after_render(&mut h.doc);

    let (scroller, scrollbar) = (h.y_scroller(), h.scrollbar());
    h.doc.set_scroll_top(scroller, 60.0);
    h.pump();
    h.clock.advance(Duration::from_millis(51));

    h.doc.set_scroll_top(scrollbar, 90.0);
    h.pump();
    assert_eq!(h.doc.scroll_top(scroller), 90.0);
}

#[test]
fn test_header_wheel_scrolls_body() {
    let mut h = Harness::new(y_attrs());
    let header = h.fixed_header();
    let cell = h.doc.query_tag(header, Tag::Th)[0];

    h.doc.wheel(cell, 0.0, 90.0);
    h.pump();

    assert_eq!(h.doc.scroll_top(h.y_scroller()), 90.0);
    assert_eq!(h.doc.scroll_top(h.scrollbar()), 90.0);
}

#[test]
fn test_header_wheel_during_scrollbar_drag_stays_in_step() {
    let mut h = Harness::new(y_attrs());
    let (scroller, scrollbar) = (h.y_scroller(), h.scrollbar());
    let header = h.fixed_header();
    let cell = h.doc.query_tag(header, Tag::Th)[0];

    h.doc.set_scroll_top(scrollbar, 100.0);
    h.pump();
    assert_eq!(h.doc.scroll_top(scroller), 100.0);

    // Still inside the scrollbar's lock window.
    h.clock.advance(Duration::from_millis(50));
    h.doc.wheel(cell, 0.0, 200.0);
    h.pump();

    h.clock.advance(Duration::from_millis(1000));
    h.table.tick(&mut h.doc);
    assert_eq!(h.doc.scroll_top(scroller), 300.0);
    assert_eq!(h.doc.scroll_top(scrollbar), 300.0);
}

#[test]
fn test_refresh_follows_body_after_rerender() {
    let mut h = Harness::new(y_attrs());
    let scroller = h.y_scroller();
    h.doc.set_scroll_top(scroller, 240.0);
    h.pump();
    h.clock.advance(Duration::from_millis(400));
    h.table.tick(&mut h.doc);

    // Drop half the rows; the body clamps and the scrollbar follows.
    let rows = h.doc.children(h.tbody());
    for row in &rows[25..] {
        h.doc.destroy(*row);
    }
    h.doc.set_scroll_top(scroller, 1000.0);
    h.table
        .notify(&mut h.doc, Change::Data(DataChange::Remove));
    h.pump();

    // 25 rows plus the header, 170px visible.
    let max = 25.0 * 30.0 + 30.0 - 170.0;
    assert_eq!(h.doc.scroll_top(h.y_scroller()), max);
    assert_eq!(h.doc.scroll_top(h.scrollbar()), max);
}
