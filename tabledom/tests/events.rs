use tabledom::{Dispatch, Document, Dom, DomEvent, Element, EventKind, NodeId, Target};

fn scroller(doc: &mut Document) -> NodeId {
    let rows = (0..10).map(|i| Element::div().id(format!("row-{i}")).style("height", "20px"));
    doc.create(
        Element::div()
            .style("height", "100px")
            .style("overflow-y", "auto")
            .children(rows),
    )
}

fn drain(doc: &mut Document) -> Vec<Dispatch> {
    std::iter::from_fn(|| doc.poll_event()).collect()
}

// ============================================================================
// Scroll position
// ============================================================================

#[test]
fn test_set_scroll_top_clamps_and_notifies() {
    let mut doc = Document::new();
    let node = scroller(&mut doc);
    let listener = doc.listen(Target::Node(node), EventKind::Scroll);

    doc.set_scroll_top(node, 500.0);
    assert_eq!(doc.scroll_top(node), 100.0);

    let events = drain(&mut doc);
    assert_eq!(
        events,
        vec![Dispatch {
            listener,
            event: DomEvent::Scroll { node },
        }]
    );
}

#[test]
fn test_unchanged_scroll_position_is_silent() {
    let mut doc = Document::new();
    let node = scroller(&mut doc);
    doc.listen(Target::Node(node), EventKind::Scroll);

    doc.set_scroll_top(node, 0.0);
    doc.set_scroll_top(node, -20.0);
    assert!(drain(&mut doc).is_empty());
}

#[test]
fn test_unlisten_drops_queued_dispatches() {
    let mut doc = Document::new();
    let node = scroller(&mut doc);
    let listener = doc.listen(Target::Node(node), EventKind::Scroll);

    doc.set_scroll_top(node, 40.0);
    assert_eq!(doc.pending_events(), 1);
    assert!(doc.unlisten(listener));
    assert!(!doc.unlisten(listener));

    assert_eq!(doc.poll_event(), None);
}

#[test]
fn test_scroll_into_view_moves_scroller() {
    let mut doc = Document::new();
    let node = scroller(&mut doc);
    let row = doc.find_by_id(node, "row-7").unwrap();

    doc.scroll_into_view(row);
    // Row 7 spans 140..160 and must end at the bottom of a 100px viewport.
    assert_eq!(doc.scroll_top(node), 60.0);

    let first = doc.find_by_id(node, "row-1").unwrap();
    doc.scroll_into_view(first);
    assert_eq!(doc.scroll_top(node), 20.0);

    // Already visible: nothing moves.
    let visible = doc.find_by_id(node, "row-2").unwrap();
    doc.scroll_into_view(visible);
    assert_eq!(doc.scroll_top(node), 20.0);
}

// ============================================================================
// Wheel and resize
// ============================================================================

#[test]
fn test_wheel_bubbles_and_scrolls_nearest_scroller() {
    let mut doc = Document::new();
    let node = scroller(&mut doc);
    let row = doc.find_by_id(node, "row-0").unwrap();
    let wheel = doc.listen(Target::Node(node), EventKind::Wheel);
    let scroll = doc.listen(Target::Node(node), EventKind::Scroll);

    doc.wheel(row, 0.0, 30.0);
    assert_eq!(doc.scroll_top(node), 30.0);

    let events = drain(&mut doc);
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].listener, wheel);
    assert_eq!(
        events[0].event,
        DomEvent::Wheel {
            node: row,
            delta_x: 0.0,
            delta_y: 30.0
        }
    );
    assert_eq!(events[1].listener, scroll);
}

#[test]
fn test_resize_viewport_notifies_viewport_listeners() {
    let mut doc = Document::new();
    let node = doc.create(Element::div());
    let listener = doc.listen(Target::Viewport, EventKind::Resize);
    doc.listen(Target::Node(node), EventKind::Resize);

    doc.resize_viewport(640.0, 480.0);
    assert_eq!(doc.viewport_size(), (640.0, 480.0));
    assert_eq!(doc.offset_width(node), 640.0);

    let events = drain(&mut doc);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].listener, listener);
    assert_eq!(events[0].event.kind(), EventKind::Resize);
}
