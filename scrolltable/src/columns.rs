//! Fixed header cloning and column width mirroring.
//!
//! The fixed header is a deep copy of the live header. Cells are paired with
//! the live header purely by index, which holds because the copy is taken
//! wholesale and re-taken whenever the column structure changes.

use log::{debug, trace};
use tabledom::{px, Dom, Element, NodeId, Tag};

use crate::classes;

/// One width per live header cell, in document order.
///
/// Only valid until the next reflow; recompute on every pass.
pub type ColumnWidthMap = Vec<f32>;

/// The live header section of `table`, if it has one.
pub fn live_header<D: Dom>(dom: &D, table: NodeId) -> Option<NodeId> {
    dom.children(table)
        .into_iter()
        .find(|child| dom.tag(*child) == Some(Tag::Thead))
}

/// Replace the header rows of `fixed_header` with a fresh copy of `live_thead`.
///
/// The copy loses every `id` (no duplicate ids in the document) and every
/// declared cell width, and each cell's content is moved into a liner that
/// will carry the mirrored width.
pub fn clone_header<D: Dom>(dom: &mut D, live_thead: NodeId, fixed_header: NodeId) -> Option<NodeId> {
    for old in dom.children(fixed_header) {
        if dom.tag(old) == Some(Tag::Thead) {
            dom.destroy(old);
        }
    }

    let copy = dom.deep_clone(live_thead)?;
    strip_ids(dom, copy);

    for cell in dom.query_tag(copy, Tag::Th) {
        dom.remove_style(cell, "width");
        let liner = dom.create(Element::div().class(classes::LINER));
        for child in dom.children(cell) {
            dom.append(liner, child);
        }
        dom.append(cell, liner);
    }

    dom.append(fixed_header, copy);
    debug!("cloned header into fixed header {fixed_header}");
    Some(copy)
}

fn strip_ids<D: Dom>(dom: &mut D, node: NodeId) {
    dom.remove_attr(node, "id");
    for child in dom.children(node) {
        strip_ids(dom, child);
    }
}

/// Rendered content width of every live header cell.
pub fn column_widths<D: Dom>(dom: &D, live_thead: NodeId) -> ColumnWidthMap {
    dom.query_tag(live_thead, Tag::Th)
        .into_iter()
        .map(|cell| {
            let padding =
                dom.computed_px(cell, "padding-left") + dom.computed_px(cell, "padding-right");
            (dom.client_width(cell) - padding).max(0.0)
        })
        .collect()
}

/// Mirror live column widths onto the fixed header liners.
pub fn align_column_widths<D: Dom>(dom: &mut D, live_thead: NodeId, fixed_header: NodeId) {
    let widths = column_widths(dom, live_thead);
    let liners = dom.query_class(fixed_header, classes::LINER);
    if liners.len() != widths.len() {
        debug!(
            "fixed header has {} liners for {} columns",
            liners.len(),
            widths.len()
        );
    }

    for (liner, width) in liners.into_iter().zip(widths) {
        trace!("liner {liner} -> {width}px");
        dom.set_style(liner, "width", &px(width));
    }

    reserve_scrollbar_gutter(dom, live_thead, fixed_header);
}

/// Widen the last cell of every fixed header row by the scrollbar width so
/// the header spans the body's native scrollbar too.
fn reserve_scrollbar_gutter<D: Dom>(dom: &mut D, live_thead: NodeId, fixed_header: NodeId) {
    let gutter = dom.scrollbar_width();
    let live_rows = dom.query_tag(live_thead, Tag::Tr);
    let fixed_rows = dom.query_tag(fixed_header, Tag::Tr);

    for (live_row, fixed_row) in live_rows.into_iter().zip(fixed_rows) {
        let (Some(live_last), Some(fixed_last)) =
            (last_header_cell(dom, live_row), last_header_cell(dom, fixed_row))
        else {
            continue;
        };
        let padding = dom.computed_px(live_last, "padding-right") + gutter;
        dom.set_style(fixed_last, "padding-right", &px(padding));
    }
}

fn last_header_cell<D: Dom>(dom: &D, row: NodeId) -> Option<NodeId> {
    dom.children(row)
        .into_iter()
        .rev()
        .find(|cell| dom.tag(*cell).is_some_and(|tag| tag.is_cell()))
}
