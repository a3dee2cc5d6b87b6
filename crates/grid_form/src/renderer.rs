//! Row rendering strategies.
//!
//! One strategy is picked per form render from the view mode:
//!
//! - [`FlatRowRenderer`] (`default`): each row is one node, a row-local two column
//!   grid `[label, 1fr]` holding the label and content cells. Sequence and rules are
//!   never rendered.
//! - [`GridSiblingRowRenderer`] (`detail`): each row contributes up to four cells
//!   *directly* to the form grid (sequence, label, content, rules or placeholder).
//!   The row owns no grid of its own; column alignment across rows comes from the
//!   form's fixed column template, so the cells must stay siblings.

use tracing::warn;

use crate::cells::{
    SLOT_ROW, content_cell, label_cell, rules_cell, rules_placeholder, sequence_cell,
};
use crate::controller::LayoutController;
use crate::modal::RulesEntry;
use crate::node::{Element, Node};
use crate::row::Row;

/// Where a row sits in the current pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowPosition {
    /// 1-based sequence number handed out by the controller.
    pub sequence: u32,
    /// 0-based index among the rows rendered in this pass.
    pub index: usize,
}

/// What one row contributes to the form.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RowCells {
    /// Nodes spliced into the form grid, in order.
    pub nodes: Vec<Node>,
    /// Rules reachable through the rules modal.
    pub rules: Option<RulesEntry>,
}

pub trait RowRenderer {
    fn name(&self) -> &'static str;

    fn render_row(&self, row: &Row, position: RowPosition, ctl: &LayoutController) -> RowCells;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FlatRowRenderer;

impl RowRenderer for FlatRowRenderer {
    fn name(&self) -> &'static str {
        "flat"
    }

    fn render_row(&self, row: &Row, position: RowPosition, ctl: &LayoutController) -> RowCells {
        if row.is_spacer() {
            return RowCells::default();
        }
        if row.content.is_none() {
            warn!(key = ?row.key, "row has no content; rendering an empty content cell");
        }

        let columns = ctl.page_columns();
        let last_in_line = position.index % columns == columns - 1;

        let mut wrapper = Element::div()
            .class("gf-row")
            .class("gf-row--flat")
            .attr("data-slot", SLOT_ROW)
            .style("display", "grid")
            .style(
                "grid-template-columns",
                format!("{} 1fr", ctl.label_width()),
            )
            .style("align-items", row.align.css())
            .style("border-bottom", "1px solid var(--gf-border)");
        if columns == 1 {
            wrapper = wrapper.style("grid-column", "1 / -1");
        } else if !last_in_line {
            wrapper = wrapper.style("border-right", "1px solid var(--gf-border)");
        }
        if let Some(key) = &row.key {
            wrapper = wrapper.attr("data-key", key.as_str());
        }

        let wrapper = wrapper
            .child(label_cell(ctl, row.label.as_ref(), row.align))
            .child(content_cell(row.content.as_ref(), row.align));

        RowCells {
            nodes: vec![wrapper.into()],
            rules: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GridSiblingRowRenderer;

impl RowRenderer for GridSiblingRowRenderer {
    fn name(&self) -> &'static str {
        "grid-sibling"
    }

    fn render_row(&self, row: &Row, position: RowPosition, ctl: &LayoutController) -> RowCells {
        if row.is_spacer() {
            return RowCells::default();
        }

        let align = row.align;
        let mut nodes: Vec<Node> = vec![
            sequence_cell(ctl, position.sequence, align).into(),
            label_cell(ctl, row.label.as_ref(), align).into(),
            content_cell(row.content.as_ref(), align).into(),
        ];

        let rules = match &row.rules {
            Some(rules) => {
                nodes.push(rules_cell(ctl, rules, position.sequence, align).into());
                let label = row
                    .label
                    .as_ref()
                    .map(|l| l.children.as_slice())
                    .unwrap_or_default();
                Some(RulesEntry::new(
                    position.sequence,
                    row.key.clone(),
                    label,
                    rules.children.clone(),
                ))
            }
            None => {
                nodes.push(rules_placeholder(align).into());
                None
            }
        };

        if let Some(key) = &row.key {
            for node in &mut nodes {
                if let Node::Element(el) = node {
                    el.set_attr("data-key", key.as_str());
                }
            }
        }

        RowCells { nodes, rules }
    }
}

impl Row {
    /// Render this row outside any form, with [`LayoutController::detached`] defaults.
    pub fn render_standalone(&self) -> Node {
        let mut ctl = LayoutController::detached();
        ctl.begin_pass();
        let position = RowPosition {
            sequence: ctl.next_sequence(),
            index: 0,
        };
        Node::Fragment(ctl.renderer().render_row(self, position, &ctl).nodes)
    }
}
