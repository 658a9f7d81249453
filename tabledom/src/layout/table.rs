//! Column layout for `table` elements.
//!
//! Columns are matched purely by index: cell *i* of every row belongs to
//! column *i*. A column is as wide as its widest cell's max-content width.

use super::{
    containing_width, flow_children, frame, length_style, max_content_width, parent, px_style,
    tag,
};
use crate::document::Document;
use crate::element::NodeId;
use crate::types::{Length, Tag};

/// The table a row, row group or caption belongs to.
pub(crate) fn owning_table(doc: &Document, id: NodeId) -> Option<NodeId> {
    let mut current = parent(doc, id)?;
    loop {
        match tag(doc, current)? {
            Tag::Table => return Some(current),
            Tag::Thead | Tag::Tbody | Tag::Tr => current = parent(doc, current)?,
            _ => return None,
        }
    }
}

fn rows(doc: &Document, table: NodeId) -> Vec<NodeId> {
    let mut rows = Vec::new();
    for child in flow_children(doc, table) {
        match tag(doc, child) {
            Some(Tag::Thead | Tag::Tbody) => rows.extend(
                flow_children(doc, child).filter(|row| tag(doc, *row) == Some(Tag::Tr)),
            ),
            Some(Tag::Tr) => rows.push(child),
            _ => {}
        }
    }
    rows
}

fn cells(doc: &Document, row: NodeId) -> impl Iterator<Item = NodeId> + '_ {
    flow_children(doc, row).filter(move |cell| tag(doc, *cell).is_some_and(|t| t.is_cell()))
}

pub(crate) fn cell_max_content(doc: &Document, cell: NodeId) -> f32 {
    let frame = frame(doc, cell).horizontal_total();
    match px_style(doc, cell, "width") {
        Some(width) => width + frame,
        None => {
            flow_children(doc, cell)
                .map(|child| max_content_width(doc, child))
                .fold(0.0, f32::max)
                + frame
        }
    }
}

fn base_columns(doc: &Document, table: NodeId) -> Vec<f32> {
    let mut columns: Vec<f32> = Vec::new();
    for row in rows(doc, table) {
        for (index, cell) in cells(doc, row).enumerate() {
            let width = cell_max_content(doc, cell);
            match columns.get_mut(index) {
                Some(column) => *column = column.max(width),
                None => columns.push(width),
            }
        }
    }
    columns
}

fn caption_width(doc: &Document, table: NodeId) -> f32 {
    flow_children(doc, table)
        .filter(|child| tag(doc, *child) == Some(Tag::Caption))
        .map(|caption| max_content_width(doc, caption))
        .fold(0.0, f32::max)
}

fn natural_content(doc: &Document, table: NodeId) -> f32 {
    let columns: f32 = base_columns(doc, table).iter().sum();
    columns.max(caption_width(doc, table))
}

/// Border-box width with unlimited room, ignoring any declared width.
pub(crate) fn natural_width(doc: &Document, table: NodeId) -> f32 {
    natural_content(doc, table) + frame(doc, table).horizontal_total()
}

/// Width available to rows, after resolving the declared (border-box) width.
pub(crate) fn content_width(doc: &Document, table: NodeId) -> f32 {
    let frame = frame(doc, table).horizontal_total();
    let natural = natural_content(doc, table);
    let declared = match length_style(doc, table, "width") {
        Some(Length::Px(width)) => Some(width - frame),
        Some(Length::Percent(pct)) => Some(containing_width(doc, table) * pct / 100.0 - frame),
        None => None,
    };
    // A table never shrinks below its content.
    declared.map_or(natural, |declared| declared.max(natural))
}

pub(crate) fn table_width(doc: &Document, table: NodeId) -> f32 {
    content_width(doc, table) + frame(doc, table).horizontal_total()
}

/// Used column widths, with any extra declared room spread evenly.
pub(crate) fn column_widths(doc: &Document, table: NodeId) -> Vec<f32> {
    let mut columns = base_columns(doc, table);
    if columns.is_empty() {
        return columns;
    }
    let used: f32 = columns.iter().sum();
    let extra = content_width(doc, table) - used;
    if extra > 0.0 {
        let share = extra / columns.len() as f32;
        for column in &mut columns {
            *column += share;
        }
    }
    columns
}

pub(crate) fn cell_width(doc: &Document, cell: NodeId) -> f32 {
    let Some(row) = parent(doc, cell).filter(|row| tag(doc, *row) == Some(Tag::Tr)) else {
        return cell_max_content(doc, cell);
    };
    let Some(table) = owning_table(doc, row) else {
        return cell_max_content(doc, cell);
    };
    let Some(index) = cells(doc, row).position(|c| c == cell) else {
        return 0.0;
    };
    column_widths(doc, table)
        .get(index)
        .copied()
        .unwrap_or_else(|| cell_max_content(doc, cell))
}
