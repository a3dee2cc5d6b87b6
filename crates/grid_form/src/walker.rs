//! Walks a form's child tree: text flattening, row discovery and label column
//! inference.

use tracing::debug;

use crate::config::Track;
use crate::node::Node;
use crate::row::Row;
use crate::width::WidthTable;

/// Extra width granted to labels showing the required marker.
pub const REQUIRED_MARKER_PX: u32 = 20;
/// Cell padding plus margin added to the widest label.
pub const LABEL_PADDING_PX: u32 = 72;
pub const MIN_LABEL_WIDTH_PX: u32 = 120;
pub const MAX_LABEL_WIDTH_PX: u32 = 400;

/// Concatenate the plain text of `nodes`.
///
/// Text and numbers contribute; fragments are flattened; elements and rows
/// contribute nothing.
pub fn flatten_text(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        push_text(node, &mut out);
    }
    out
}

fn push_text(node: &Node, out: &mut String) {
    match node {
        Node::Text(text) => out.push_str(text),
        Node::Number(n) => out.push_str(&n.to_string()),
        Node::Fragment(children) => children.iter().for_each(|c| push_text(c, out)),
        Node::Empty | Node::Element(_) | Node::Row(_) => {}
    }
}

/// Every row of the tree in document order, including hidden ones.
///
/// Wrappers (fragments and elements) are searched; rows are not descended into.
pub fn collect_rows(nodes: &[Node]) -> Vec<&Row> {
    let mut rows = Vec::new();
    for node in nodes {
        push_rows(node, &mut rows);
    }
    rows
}

fn push_rows<'a>(node: &'a Node, rows: &mut Vec<&'a Row>) {
    match node {
        Node::Row(row) => rows.push(row),
        Node::Fragment(children) => children.iter().for_each(|c| push_rows(c, rows)),
        Node::Element(el) => el.children.iter().for_each(|c| push_rows(c, rows)),
        Node::Empty | Node::Text(_) | Node::Number(_) => {}
    }
}

/// Estimated width of one row's label, including the required marker.
pub fn row_label_width(row: &Row, table: &WidthTable) -> u32 {
    match &row.label {
        Some(label) => {
            let marker = if label.required { REQUIRED_MARKER_PX } else { 0 };
            table.estimate(&label.text()) + marker
        }
        None => 0,
    }
}

/// Label column width for `children` using the default width table.
pub fn infer_label_width(children: &[Node]) -> Track {
    infer_label_width_with(children, &WidthTable::default())
}

/// Widest visible label plus padding, clamped to `[120px, 400px]`.
///
/// A tree without rows yields the floor.
pub fn infer_label_width_with(children: &[Node], table: &WidthTable) -> Track {
    let rows = collect_rows(children);
    let widest = rows
        .iter()
        .filter(|row| row.visible)
        .map(|row| row_label_width(row, table))
        .max()
        .unwrap_or(0);
    let width = widest
        .saturating_add(LABEL_PADDING_PX)
        .clamp(MIN_LABEL_WIDTH_PX, MAX_LABEL_WIDTH_PX);
    debug!(rows = rows.len(), widest, width, "inferred label column width");
    Track::Px(width)
}
