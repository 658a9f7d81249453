//! Target resolution for programmatic scrolling.

use tabledom::{Dom, NodeId, Tag};

use crate::structure::{Structure, TableNodes};

/// Attribute carrying a body row's record id.
pub const ROW_ID_ATTR: &str = "data-row-id";

/// What to bring into view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrollTarget {
    /// Body row whose `data-row-id` matches.
    RowId(String),
    /// Body row by position, counting across every body section.
    RowIndex(usize),
    /// Body cell by row and column position.
    Cell { row: usize, column: usize },
    /// Any element with this `id` inside the scrolling regions.
    ElementId(String),
    /// An element handle; must lie inside the scrolling regions.
    Element(NodeId),
}

/// Resolve `target` to a node, or `None` if it does not exist or lies outside
/// the scrolling regions.
pub fn resolve<D: Dom>(
    dom: &D,
    nodes: TableNodes,
    parts: &Structure,
    target: &ScrollTarget,
) -> Option<NodeId> {
    match target {
        ScrollTarget::RowId(id) => body_rows(dom, nodes.table)
            .into_iter()
            .find(|row| dom.attr(*row, ROW_ID_ATTR).as_deref() == Some(id.as_str())),
        ScrollTarget::RowIndex(index) => body_rows(dom, nodes.table).get(*index).copied(),
        ScrollTarget::Cell { row, column } => {
            let row = body_rows(dom, nodes.table).get(*row).copied()?;
            dom.children(row)
                .into_iter()
                .filter(|cell| dom.tag(*cell).is_some_and(|tag| tag.is_cell()))
                .nth(*column)
        }
        ScrollTarget::ElementId(id) => regions(parts)
            .into_iter()
            .find_map(|region| dom.find_by_id(region, id)),
        ScrollTarget::Element(node) => regions(parts)
            .into_iter()
            .any(|region| dom.contains(region, *node))
            .then_some(*node),
    }
}

fn regions(parts: &Structure) -> Vec<NodeId> {
    [parts.y_scroller, parts.x_scroller]
        .into_iter()
        .flatten()
        .collect()
}

fn body_rows<D: Dom>(dom: &D, table: NodeId) -> Vec<NodeId> {
    dom.children(table)
        .into_iter()
        .filter(|section| dom.tag(*section) == Some(Tag::Tbody))
        .flat_map(|section| dom.children(section))
        .filter(|row| dom.tag(*row) == Some(Tag::Tr))
        .collect()
}
