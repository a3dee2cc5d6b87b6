//! The form container: owns the configuration and the child tree, drives one
//! render pass per `render()` call and wraps the emitted rows in the form grid.

use tracing::debug;

use crate::cells::{
    SLOT_CONTENT, SLOT_LABEL, SLOT_ROW, SLOT_RULES, SLOT_RULES_PLACEHOLDER, SLOT_SEQUENCE,
    action_bar, variant_class,
};
use crate::config::{FormConfig, Numbering, Track, ViewMode};
use crate::controller::LayoutController;
use crate::modal::{RulesEntry, RulesModal};
use crate::node::{Element, Node};
use crate::renderer::{RowPosition, RowRenderer};
use crate::row::Row;
use crate::walker::collect_rows;

pub const SLOT_FORM: &str = "form";
pub const SLOT_GRID: &str = "grid";

#[derive(Debug, Clone, Default)]
pub struct FormContainer {
    config: FormConfig,
    children: Vec<Node>,
    top_right_actions: Vec<Node>,
    bottom_left_actions: Vec<Node>,
    bottom_right_actions: Vec<Node>,
}

impl FormContainer {
    pub fn new(config: FormConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn row(self, row: Row) -> Self {
        self.child(row)
    }

    pub fn top_right_actions(mut self, actions: impl IntoIterator<Item = Node>) -> Self {
        self.top_right_actions = actions.into_iter().collect();
        self
    }

    pub fn bottom_left_actions(mut self, actions: impl IntoIterator<Item = Node>) -> Self {
        self.bottom_left_actions = actions.into_iter().collect();
        self
    }

    pub fn bottom_right_actions(mut self, actions: impl IntoIterator<Item = Node>) -> Self {
        self.bottom_right_actions = actions.into_iter().collect();
        self
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    /// Replace the configuration; takes effect on the next `render()`.
    pub fn set_config(&mut self, config: FormConfig) {
        self.config = config;
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.config.view_mode = mode;
    }

    /// Every declared row, hidden ones included, in document order.
    pub fn rows(&self) -> Vec<&Row> {
        collect_rows(&self.children)
    }

    /// Run one render pass.
    pub fn render(&self) -> RenderedForm {
        let mut ctl = LayoutController::new(self.config.clone(), &self.children);
        ctl.begin_pass();
        let renderer = ctl.renderer();

        let mut pass = Pass::default();
        let body: Vec<Node> = self
            .children
            .iter()
            .map(|child| render_node(child, &mut ctl, renderer.as_ref(), &mut pass))
            .collect();

        let view_mode = ctl.view_mode();
        let template = match view_mode {
            ViewMode::Default if ctl.page_columns() > 1 => {
                format!("repeat({}, minmax(0, 1fr))", ctl.page_columns())
            }
            _ => ctl.grid_template_columns(),
        };

        let grid = Element::div()
            .class("gf-grid")
            .attr("data-slot", SLOT_GRID)
            .style("display", "grid")
            .style("grid-template-columns", template.as_str())
            .style("gap", ctl.gap().to_string())
            .children(body);

        let mut root = Element::div()
            .class("gf-form")
            .class(variant_class(ctl.color_variant()))
            .attr("data-slot", SLOT_FORM)
            .attr("data-view-mode", view_mode.to_string());

        if let Some(bar) = action_bar("top-right", &self.top_right_actions) {
            root = root.child(bar);
        }
        root = root.child(grid);

        let bottom: Vec<Node> = [
            action_bar("bottom-left", &self.bottom_left_actions),
            action_bar("bottom-right", &self.bottom_right_actions),
        ]
        .into_iter()
        .flatten()
        .map(Node::from)
        .collect();
        if !bottom.is_empty() {
            root = root.child(
                Element::div()
                    .class("gf-footer")
                    .style("display", "flex")
                    .style("justify-content", "space-between")
                    .children(bottom),
            );
        }

        debug!(
            view_mode = %view_mode,
            rows = pass.sequences.len(),
            issued = ctl.issued(),
            "form rendered"
        );

        RenderedForm {
            root: root.into(),
            view_mode,
            grid_template_columns: template,
            label_width: ctl.label_width().clone(),
            column_count: ctl.column_count(),
            total: ctl.total_count(),
            sequences: pass.sequences,
            cell_rows: pass.cell_rows,
            rules: pass.rules,
        }
    }
}

#[derive(Debug, Default)]
struct Pass {
    sequences: Vec<u32>,
    cell_rows: Vec<u32>,
    rules: Vec<RulesEntry>,
}

fn render_node(
    node: &Node,
    ctl: &mut LayoutController,
    renderer: &dyn RowRenderer,
    pass: &mut Pass,
) -> Node {
    match node {
        Node::Row(row) => {
            if !row.visible {
                if ctl.numbering() == Numbering::DeclaredOrder {
                    ctl.skip_sequence();
                }
                return Node::Empty;
            }
            let position = RowPosition {
                sequence: ctl.next_sequence(),
                index: pass.cell_rows.len(),
            };
            pass.sequences.push(position.sequence);

            let cells = renderer.render_row(row, position, ctl);
            // Spacers keep their number but take no place in the grid.
            if !cells.nodes.is_empty() {
                pass.cell_rows.push(position.sequence);
            }
            pass.rules.extend(cells.rules);
            Node::Fragment(cells.nodes)
        }
        Node::Fragment(children) => Node::Fragment(
            children
                .iter()
                .map(|c| render_node(c, ctl, renderer, pass))
                .collect(),
        ),
        Node::Element(el) => {
            let wraps_rows = !collect_rows(&el.children).is_empty();
            let mut out = Element {
                tag: el.tag.clone(),
                attrs: el.attrs.clone(),
                children: el
                    .children
                    .iter()
                    .map(|c| render_node(c, ctl, renderer, pass))
                    .collect(),
            };
            // Wrapped cells must still be grid items of the form grid.
            if wraps_rows {
                out = out.style("display", "contents");
            }
            Node::Element(out)
        }
        other => other.clone(),
    }
}

/// Output of one render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedForm {
    pub root: Node,
    pub view_mode: ViewMode,
    pub grid_template_columns: String,
    pub label_width: Track,
    pub column_count: usize,
    pub total: usize,
    /// Sequence numbers of the rendered rows, in document order.
    pub sequences: Vec<u32>,
    /// Sequence numbers of the rows that emitted cells; entry `i` belongs to
    /// `visual_rows()[i]`.
    pub cell_rows: Vec<u32>,
    pub rules: Vec<RulesEntry>,
}

impl RenderedForm {
    pub fn grid(&self) -> Option<&Element> {
        self.root.find_slot(SLOT_GRID)
    }

    pub fn row_count(&self) -> usize {
        self.sequences.len()
    }

    /// Sequence number of the `index`-th visual row.
    pub fn visual_sequence(&self, index: usize) -> Option<u32> {
        self.cell_rows.get(index).copied()
    }

    pub fn rules_for(&self, sequence: u32) -> Option<&RulesEntry> {
        self.rules.iter().find(|e| e.sequence == sequence)
    }

    /// Activate the rules cell of row `sequence`: a modal showing the full rules.
    pub fn open_rules(&self, sequence: u32) -> Option<RulesModal> {
        let entry = self.rules_for(sequence)?;
        let mut modal = RulesModal::new();
        modal.open(entry.clone());
        Some(modal)
    }

    /// Emitted cells grouped by visual row, whatever the topology.
    ///
    /// `default` rows come from each row wrapper; `detail` cells are chunked by the
    /// column count of the form grid.
    pub fn visual_rows(&self) -> Vec<Vec<&Element>> {
        let mut rows = Vec::new();
        let mut pending = Vec::new();
        if let Some(grid) = self.grid() {
            for child in &grid.children {
                gather_cells(child, self.column_count, &mut rows, &mut pending);
            }
        }
        if !pending.is_empty() {
            rows.push(pending);
        }
        rows
    }
}

fn is_cell(slot: &str) -> bool {
    matches!(
        slot,
        SLOT_SEQUENCE | SLOT_LABEL | SLOT_CONTENT | SLOT_RULES | SLOT_RULES_PLACEHOLDER
    )
}

fn gather_cells<'a>(
    node: &'a Node,
    columns: usize,
    rows: &mut Vec<Vec<&'a Element>>,
    pending: &mut Vec<&'a Element>,
) {
    match node {
        Node::Element(el) => match el.slot() {
            Some(SLOT_ROW) => rows.push(
                el.children
                    .iter()
                    .filter_map(Node::as_element)
                    .filter(|c| c.slot().is_some_and(is_cell))
                    .collect(),
            ),
            Some(slot) if is_cell(slot) => {
                pending.push(el);
                if pending.len() == columns {
                    rows.push(std::mem::take(pending));
                }
            }
            _ => el
                .children
                .iter()
                .for_each(|c| gather_cells(c, columns, rows, pending)),
        },
        Node::Fragment(children) => children
            .iter()
            .for_each(|c| gather_cells(c, columns, rows, pending)),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TotalCount;
    use crate::row::Label;
    use crate::walker::flatten_text;
    use pretty_assertions::assert_eq;

    fn form(mode: ViewMode) -> FormContainer {
        FormContainer::new(FormConfig::default().view_mode(mode))
            .row(Row::new().key("a").label("Name").content("n").rules("Required field"))
            .row(Row::new().key("b").label("Email").content("e"))
            .row(Row::new().key("c").label("Phone").content("p"))
    }

    fn sequence_texts(rendered: &RenderedForm) -> Vec<String> {
        rendered
            .root
            .find_slots(SLOT_SEQUENCE)
            .iter()
            .map(|el| flatten_text(&el.children))
            .collect()
    }

    #[test]
    fn sequences_are_contiguous_in_declaration_order() {
        let rendered = form(ViewMode::Detail).render();
        assert_eq!(rendered.sequences, vec![1, 2, 3]);
        assert_eq!(sequence_texts(&rendered), vec!["1", "2", "3"]);
    }

    #[test]
    fn sequences_ignore_wrapper_depth() {
        let form = FormContainer::new(FormConfig::default().view_mode(ViewMode::Detail))
            .row(Row::new().label("A").content("a"))
            .child(
                Element::new("section").child(Node::fragment([
                    Node::from(Row::new().label("B").content("b")),
                    Node::from(Element::div().child(Row::new().label("C").content("c"))),
                ])),
            )
            .row(Row::new().label("D").content("d"));
        let rendered = form.render();
        assert_eq!(rendered.sequences, vec![1, 2, 3, 4]);
        assert_eq!(sequence_texts(&rendered), vec!["1", "2", "3", "4"]);

        let section = rendered
            .root
            .elements()
            .into_iter()
            .find(|e| e.tag == "section")
            .unwrap();
        assert_eq!(section.style_value("display"), Some("contents"));
    }

    #[test]
    fn rerender_restarts_numbering() {
        let form = form(ViewMode::Detail);
        let a = form.render();
        let b = form.render();
        assert_eq!(a.sequences, b.sequences);
        assert_eq!(a, b);
    }

    #[test]
    fn switching_view_mode_changes_cells_per_row() {
        let mut form = form(ViewMode::Default);
        let flat = form.render();
        assert!(flat.visual_rows().iter().all(|r| r.len() == 2));
        assert!(flat.root.find_slot(SLOT_SEQUENCE).is_none());
        assert!(flat.root.find_slot(SLOT_RULES).is_none());
        assert_eq!(flat.grid().unwrap().children.len(), 3);

        form.set_view_mode(ViewMode::Detail);
        let detail = form.render();
        assert_eq!(detail.visual_rows().len(), 3);
        assert!(detail.visual_rows().iter().all(|r| r.len() == 4));
        // Detail cells are direct grid items (flattened through fragments).
        let grid = detail.grid().unwrap();
        let direct: usize = grid
            .children
            .iter()
            .map(|n| match n {
                Node::Fragment(cells) => cells.len(),
                _ => 1,
            })
            .sum();
        assert_eq!(direct, 12);
        assert_eq!(detail.sequences, flat.sequences);
    }

    #[test]
    fn grid_template_follows_mode() {
        let flat = form(ViewMode::Default).render();
        assert_eq!(flat.grid_template_columns, "120px 1fr");
        let detail = form(ViewMode::Detail).render();
        assert_eq!(detail.grid_template_columns, "60px 120px 1fr 200px");
        assert_eq!(
            detail.grid().unwrap().style_value("grid-template-columns"),
            Some("60px 120px 1fr 200px")
        );

        let paged = FormContainer::new(FormConfig::default().page_columns(3)).render();
        assert_eq!(paged.grid_template_columns, "repeat(3, minmax(0, 1fr))");
    }

    #[test]
    fn rules_modal_shows_untruncated_rules_and_label_title() {
        let rendered = form(ViewMode::Detail).render();
        let modal = rendered.open_rules(1).unwrap();
        assert_eq!(modal.title(), Some("Name"));
        assert_eq!(modal.entry().unwrap().body_text(), "Required field");
        assert!(rendered.open_rules(2).is_none());

        // Default mode never exposes rules.
        assert!(form(ViewMode::Default).render().open_rules(1).is_none());
    }

    #[test]
    fn hidden_rows_follow_numbering_policy() {
        let build = |numbering| {
            FormContainer::new(
                FormConfig::default()
                    .view_mode(ViewMode::Detail)
                    .numbering(numbering)
                    .total(TotalCount::Auto),
            )
            .row(Row::new().label("A").content("a"))
            .row(Row::new().label("B").content("b").visible(false))
            .row(Row::new().label("C").content("c"))
            .render()
        };

        let rendered = build(Numbering::RenderedOrder);
        assert_eq!(rendered.sequences, vec![1, 2]);
        assert_eq!(sequence_texts(&rendered), vec!["1/2", "2/2"]);

        let declared = build(Numbering::DeclaredOrder);
        assert_eq!(declared.sequences, vec![1, 3]);
        assert_eq!(sequence_texts(&declared), vec!["1/3", "3/3"]);
    }

    #[test]
    fn empty_form_is_valid() {
        let rendered = FormContainer::new(FormConfig::default()).render();
        assert_eq!(rendered.row_count(), 0);
        assert_eq!(rendered.label_width, Track::Px(120));
        assert!(rendered.grid().unwrap().children.is_empty());
        assert!(rendered.visual_rows().is_empty());
    }

    #[test]
    fn action_slots_render_outside_the_grid() {
        let rendered = form(ViewMode::Default)
            .top_right_actions([Element::new("button").child("Edit").into()])
            .bottom_right_actions([Element::new("button").child("Save").into()])
            .render();
        let top = rendered.root.find_slot("actions-top-right").unwrap();
        assert_eq!(top.children.len(), 1);
        assert!(rendered.root.find_slot("actions-bottom-right").is_some());
        assert!(rendered.root.find_slot("actions-bottom-left").is_none());

        let grid = Node::Element(rendered.grid().unwrap().clone());
        assert!(grid.elements().iter().all(|e| !e.has_class("gf-actions")));
    }

    #[test]
    fn button_rows_with_blank_label_keep_their_cells() {
        let rendered = FormContainer::new(FormConfig::default().view_mode(ViewMode::Detail))
            .row(Row::new().label(Label::blank()).content(Element::new("button").child("Go")))
            .render();
        let rows = rendered.visual_rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].len(), 4);
    }

    #[test]
    fn spacer_rows_are_numbered_but_not_visual() {
        for mode in [ViewMode::Default, ViewMode::Detail] {
            let rendered = FormContainer::new(FormConfig::default().view_mode(mode))
                .row(Row::new().label("A").content("a").rules("ra"))
                .row(Row::new())
                .row(Row::new().label("B").content("b").rules("rb"))
                .render();
            assert_eq!(rendered.sequences, vec![1, 2, 3]);
            assert_eq!(rendered.cell_rows, vec![1, 3]);
            assert_eq!(rendered.visual_rows().len(), rendered.cell_rows.len());
            assert_eq!(rendered.visual_sequence(1), Some(3));
            assert_eq!(rendered.visual_sequence(2), None);
        }
    }

    #[test]
    fn spacers_do_not_shift_page_column_borders() {
        let rendered = FormContainer::new(FormConfig::default().page_columns(2))
            .row(Row::new().label("A").content("a"))
            .row(Row::new())
            .row(Row::new().label("B").content("b"))
            .render();
        let wrappers = rendered.root.find_slots(SLOT_ROW);
        assert_eq!(wrappers.len(), 2);
        assert!(wrappers[0].style_value("border-right").is_some());
        assert!(wrappers[1].style_value("border-right").is_none());
    }

    #[test]
    fn form_root_carries_mode_and_variant() {
        let rendered = form(ViewMode::Detail).render();
        let root = rendered.root.as_element().unwrap();
        assert_eq!(root.get_attr("data-view-mode"), Some("detail"));
        assert!(root.has_class("gf-variant-primary"));
    }
}
