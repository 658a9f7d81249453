//! Box metrics for the in-memory document.
//!
//! A deliberately small model, enough to reason about scrolling tables:
//! - `div` is a block. Auto width fills the containing block (absolutely
//!   positioned blocks shrink to their content), auto height is the sum of
//!   in-flow children. Explicit widths and heights are content-box.
//! - `table` is border-box and lays columns out by index (see [`table`]).
//!   An auto width is the max-content width; a wider declared width spreads
//!   the extra space evenly over the columns.
//! - Rows lay cells out horizontally; every cell in a row takes the row height.
//! - Text never wraps.
//! - Percentage heights behave like `auto`.
//!
//! Scrollbars only appear on `div`s whose overflow is `scroll`, or `auto`
//! with overflowing content, and take the document's scrollbar width.

mod table;

use crate::document::Document;
use crate::element::NodeId;
use crate::types::{Edges, Length, Overflow, Position, Tag};

// -----------------------------------------------------------------------------
// Style helpers
// -----------------------------------------------------------------------------

fn style_value<'a>(doc: &'a Document, id: NodeId, prop: &str) -> Option<&'a str> {
    doc.node(id)
        .and_then(|node| node.style.get(prop))
        .map(String::as_str)
}

pub(crate) fn length_style(doc: &Document, id: NodeId, prop: &str) -> Option<Length> {
    style_value(doc, id, prop).and_then(|value| value.parse().ok())
}

fn px_style(doc: &Document, id: NodeId, prop: &str) -> Option<f32> {
    match length_style(doc, id, prop) {
        Some(Length::Px(value)) => Some(value),
        _ => None,
    }
}

pub(crate) fn padding(doc: &Document, id: NodeId) -> Edges {
    Edges::new(
        px_style(doc, id, "padding-top").unwrap_or(0.0),
        px_style(doc, id, "padding-right").unwrap_or(0.0),
        px_style(doc, id, "padding-bottom").unwrap_or(0.0),
        px_style(doc, id, "padding-left").unwrap_or(0.0),
    )
}

pub(crate) fn border(doc: &Document, id: NodeId) -> Edges {
    Edges::new(
        px_style(doc, id, "border-top-width").unwrap_or(0.0),
        px_style(doc, id, "border-right-width").unwrap_or(0.0),
        px_style(doc, id, "border-bottom-width").unwrap_or(0.0),
        px_style(doc, id, "border-left-width").unwrap_or(0.0),
    )
}

fn frame(doc: &Document, id: NodeId) -> Edges {
    let p = padding(doc, id);
    let b = border(doc, id);
    Edges::new(
        p.top + b.top,
        p.right + b.right,
        p.bottom + b.bottom,
        p.left + b.left,
    )
}

fn overflow(doc: &Document, id: NodeId, axis_prop: &str) -> Overflow {
    if doc.node(id).map(|node| node.tag) != Some(Tag::Div) {
        return Overflow::Visible;
    }
    style_value(doc, id, axis_prop)
        .or_else(|| style_value(doc, id, "overflow"))
        .map(Overflow::parse)
        .unwrap_or_default()
}

pub(crate) fn overflow_x(doc: &Document, id: NodeId) -> Overflow {
    overflow(doc, id, "overflow-x")
}

pub(crate) fn overflow_y(doc: &Document, id: NodeId) -> Overflow {
    overflow(doc, id, "overflow-y")
}

fn position(doc: &Document, id: NodeId) -> Position {
    style_value(doc, id, "position")
        .map(Position::parse)
        .unwrap_or_default()
}

fn displayed(doc: &Document, id: NodeId) -> bool {
    doc.node(id).is_some() && style_value(doc, id, "display") != Some("none")
}

fn in_flow(doc: &Document, id: NodeId) -> bool {
    displayed(doc, id) && position(doc, id) != Position::Absolute
}

fn tag(doc: &Document, id: NodeId) -> Option<Tag> {
    doc.node(id).map(|node| node.tag)
}

fn parent(doc: &Document, id: NodeId) -> Option<NodeId> {
    doc.node(id).and_then(|node| node.parent)
}

fn children(doc: &Document, id: NodeId) -> &[NodeId] {
    doc.node(id)
        .map(|node| node.children.as_slice())
        .unwrap_or(&[])
}

fn flow_children(doc: &Document, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
    children(doc, id)
        .iter()
        .copied()
        .filter(move |child| in_flow(doc, *child))
}

pub(crate) fn computed_px(doc: &Document, id: NodeId, prop: &str) -> f32 {
    match prop {
        "width" => (offset_width(doc, id) - frame(doc, id).horizontal_total()).max(0.0),
        "height" => (offset_height(doc, id) - frame(doc, id).vertical_total()).max(0.0),
        _ => px_style(doc, id, prop).unwrap_or(0.0),
    }
}

// -----------------------------------------------------------------------------
// Widths
// -----------------------------------------------------------------------------

pub(crate) fn offset_width(doc: &Document, id: NodeId) -> f32 {
    if !displayed(doc, id) {
        return 0.0;
    }
    match tag(doc, id) {
        Some(Tag::Text) => text_width(doc, id),
        Some(Tag::Th | Tag::Td) => table::cell_width(doc, id),
        Some(Tag::Tr | Tag::Thead | Tag::Tbody | Tag::Caption) => {
            match table::owning_table(doc, id) {
                Some(owner) => table::content_width(doc, owner),
                None => max_content_width(doc, id),
            }
        }
        Some(Tag::Table) => table::table_width(doc, id),
        Some(Tag::Div) => block_width(doc, id),
        None => 0.0,
    }
}

fn text_width(doc: &Document, id: NodeId) -> f32 {
    doc.node(id)
        .and_then(|node| node.text.as_deref())
        .map(|text| doc.text_metrics().width(text))
        .unwrap_or(0.0)
}

fn block_width(doc: &Document, id: NodeId) -> f32 {
    let frame = frame(doc, id).horizontal_total();
    match length_style(doc, id, "width") {
        Some(Length::Px(width)) => width + frame,
        Some(Length::Percent(pct)) => containing_width(doc, id) * pct / 100.0 + frame,
        None if position(doc, id) == Position::Absolute => max_content_width(doc, id),
        None => containing_width(doc, id).max(frame),
    }
}

/// Width a node would take with unlimited room.
pub(crate) fn max_content_width(doc: &Document, id: NodeId) -> f32 {
    if !displayed(doc, id) {
        return 0.0;
    }
    let frame = frame(doc, id).horizontal_total();
    match tag(doc, id) {
        Some(Tag::Text) => text_width(doc, id),
        Some(Tag::Th | Tag::Td) => table::cell_max_content(doc, id),
        Some(Tag::Table) => table::natural_width(doc, id),
        Some(Tag::Tr) => flow_children(doc, id)
            .map(|cell| max_content_width(doc, cell))
            .sum::<f32>()
            + frame,
        Some(Tag::Div) => match px_style(doc, id, "width") {
            Some(width) => width + frame,
            None => widest_child(doc, id, max_content_width) + frame,
        },
        Some(Tag::Thead | Tag::Tbody | Tag::Caption) => {
            widest_child(doc, id, max_content_width) + frame
        }
        None => 0.0,
    }
}

fn widest_child(doc: &Document, id: NodeId, measure: fn(&Document, NodeId) -> f32) -> f32 {
    flow_children(doc, id)
        .map(|child| measure(doc, child))
        .fold(0.0, f32::max)
}

/// Content width offered to `id` by its parent.
pub(crate) fn containing_width(doc: &Document, id: NodeId) -> f32 {
    let Some(parent) = parent(doc, id) else {
        return doc.viewport_width();
    };
    let inner = match tag(doc, parent) {
        Some(Tag::Div) => client_width(doc, parent) - padding(doc, parent).horizontal_total(),
        Some(Tag::Text) | None => 0.0,
        Some(_) => offset_width(doc, parent) - frame(doc, parent).horizontal_total(),
    };
    inner.max(0.0)
}

pub(crate) fn client_width(doc: &Document, id: NodeId) -> f32 {
    let mut width = offset_width(doc, id) - border(doc, id).horizontal_total();
    if has_vertical_scrollbar(doc, id) {
        width -= doc.scrollbar_width_px();
    }
    width.max(0.0)
}

/// Widest in-flow child, measured in the node's own coordinate space.
fn content_extent_width(doc: &Document, id: NodeId) -> f32 {
    widest_child(doc, id, offset_width)
}

pub(crate) fn scroll_width(doc: &Document, id: NodeId) -> f32 {
    let content = content_extent_width(doc, id) + padding(doc, id).horizontal_total();
    client_width(doc, id).max(content)
}

// -----------------------------------------------------------------------------
// Heights
// -----------------------------------------------------------------------------

pub(crate) fn offset_height(doc: &Document, id: NodeId) -> f32 {
    if !displayed(doc, id) {
        return 0.0;
    }
    let frame = frame(doc, id).vertical_total();
    match tag(doc, id) {
        Some(Tag::Text) => doc
            .node(id)
            .and_then(|node| node.text.as_deref())
            .map(|text| doc.text_metrics().height(text))
            .unwrap_or(0.0),
        Some(Tag::Th | Tag::Td) => match parent(doc, id) {
            Some(row) if tag(doc, row) == Some(Tag::Tr) => row_height(doc, row),
            _ => natural_cell_height(doc, id),
        },
        Some(Tag::Tr) => row_height(doc, id) + frame,
        Some(Tag::Div) => match px_style(doc, id, "height") {
            Some(height) => height + frame,
            None => {
                let scrollbar = if has_horizontal_scrollbar(doc, id) {
                    doc.scrollbar_width_px()
                } else {
                    0.0
                };
                content_height(doc, id) + frame + scrollbar
            }
        },
        Some(Tag::Table | Tag::Thead | Tag::Tbody | Tag::Caption) => {
            content_height(doc, id) + frame
        }
        None => 0.0,
    }
}

fn content_height(doc: &Document, id: NodeId) -> f32 {
    match tag(doc, id) {
        Some(Tag::Tr) => row_height(doc, id),
        _ => flow_children(doc, id)
            .map(|child| offset_height(doc, child))
            .sum(),
    }
}

fn row_height(doc: &Document, row: NodeId) -> f32 {
    flow_children(doc, row)
        .map(|cell| natural_cell_height(doc, cell))
        .fold(0.0, f32::max)
}

fn natural_cell_height(doc: &Document, cell: NodeId) -> f32 {
    let frame = frame(doc, cell).vertical_total();
    match px_style(doc, cell, "height") {
        Some(height) => height + frame,
        None => content_height(doc, cell) + frame,
    }
}

pub(crate) fn client_height(doc: &Document, id: NodeId) -> f32 {
    let mut height = offset_height(doc, id) - border(doc, id).vertical_total();
    if has_horizontal_scrollbar(doc, id) {
        height -= doc.scrollbar_width_px();
    }
    height.max(0.0)
}

pub(crate) fn scroll_height(doc: &Document, id: NodeId) -> f32 {
    let content = content_height(doc, id) + padding(doc, id).vertical_total();
    client_height(doc, id).max(content)
}

// -----------------------------------------------------------------------------
// Scrollbars
// -----------------------------------------------------------------------------

fn has_vertical_scrollbar(doc: &Document, id: NodeId) -> bool {
    match overflow_y(doc, id) {
        Overflow::Scroll => true,
        Overflow::Auto => match px_style(doc, id, "height") {
            // An auto-height block grows with its content and never overflows.
            None => false,
            Some(height) => content_height(doc, id) > height,
        },
        _ => false,
    }
}

fn has_horizontal_scrollbar(doc: &Document, id: NodeId) -> bool {
    match overflow_x(doc, id) {
        Overflow::Scroll => true,
        Overflow::Auto => {
            let mut room = offset_width(doc, id)
                - border(doc, id).horizontal_total()
                - padding(doc, id).horizontal_total();
            if has_vertical_scrollbar(doc, id) {
                room -= doc.scrollbar_width_px();
            }
            content_extent_width(doc, id) > room
        }
        _ => false,
    }
}

// -----------------------------------------------------------------------------
// Positions
// -----------------------------------------------------------------------------

fn offset_top(doc: &Document, id: NodeId) -> f32 {
    let Some(parent) = parent(doc, id) else {
        return 0.0;
    };
    if position(doc, id) == Position::Absolute {
        return px_style(doc, id, "top").unwrap_or(0.0);
    }
    if tag(doc, parent) == Some(Tag::Tr) {
        return 0.0;
    }
    let preceding: f32 = flow_children(doc, parent)
        .take_while(|sibling| *sibling != id)
        .map(|sibling| offset_height(doc, sibling))
        .sum();
    frame(doc, parent).top + preceding
}

fn offset_left(doc: &Document, id: NodeId) -> f32 {
    let Some(parent) = parent(doc, id) else {
        return 0.0;
    };
    if position(doc, id) == Position::Absolute {
        if let Some(left) = px_style(doc, id, "left") {
            return left;
        }
        if let Some(right) = px_style(doc, id, "right") {
            return offset_width(doc, parent)
                - border(doc, parent).right
                - right
                - offset_width(doc, id);
        }
        return 0.0;
    }
    let start = frame(doc, parent).left;
    if tag(doc, parent) == Some(Tag::Tr) {
        let preceding: f32 = flow_children(doc, parent)
            .take_while(|sibling| *sibling != id)
            .map(|sibling| offset_width(doc, sibling))
            .sum();
        return start + preceding;
    }
    start
}

pub(crate) fn offset_within(doc: &Document, id: NodeId, ancestor: NodeId) -> Option<(f32, f32)> {
    let (mut x, mut y) = (0.0, 0.0);
    let mut current = id;
    loop {
        let up = parent(doc, current)?;
        x += offset_left(doc, current);
        y += offset_top(doc, current);
        if up == ancestor {
            return Some((x, y));
        }
        current = up;
    }
}

impl Document {
    fn viewport_width(&self) -> f32 {
        crate::Dom::viewport_size(self).0
    }

    fn scrollbar_width_px(&self) -> f32 {
        crate::Dom::scrollbar_width(self)
    }
}
