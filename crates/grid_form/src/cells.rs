//! Leaf cells emitted by the row renderers.
//!
//! Every cell is a `div` carrying `data-slot` so back-ends can tell the columns
//! apart without parsing class names. Surface treatment uses the design system's
//! utility classes (`neu-raised`, `neu-inset`, `neu-flat`); the color variant is
//! applied through `gf-variant-*`.

use crate::config::ColorVariant;
use crate::controller::LayoutController;
use crate::node::{Element, Node};
use crate::row::{Align, Content, Label, Rules};

pub const SLOT_ROW: &str = "row";
pub const SLOT_SEQUENCE: &str = "sequence";
pub const SLOT_LABEL: &str = "label";
pub const SLOT_CONTENT: &str = "content";
pub const SLOT_RULES: &str = "rules";
pub const SLOT_RULES_PLACEHOLDER: &str = "rules-placeholder";

pub const SURFACE_RAISED: &str = "neu-raised";
pub const SURFACE_INSET: &str = "neu-inset";
pub const SURFACE_FLAT: &str = "neu-flat";

/// Attribute marking a rules cell as the trigger of the rules modal.
pub const RULES_TRIGGER_ATTR: &str = "data-rules-trigger";

pub fn variant_class(variant: ColorVariant) -> &'static str {
    match variant {
        ColorVariant::Primary => "gf-variant-primary",
        ColorVariant::Secondary => "gf-variant-secondary",
    }
}

fn cell(slot: &str, align: Align) -> Element {
    Element::div()
        .class("gf-cell")
        .class(format!("gf-cell--{slot}"))
        .attr("data-slot", slot)
        .style("align-self", align.css())
}

pub fn sequence_cell(ctl: &LayoutController, sequence: u32, align: Align) -> Element {
    cell(SLOT_SEQUENCE, align)
        .class(SURFACE_INSET)
        .style("text-align", "center")
        .child(ctl.sequence_text(sequence))
}

/// Label cell. `None` and blank labels both render an empty cell.
pub fn label_cell(ctl: &LayoutController, label: Option<&Label>, align: Align) -> Element {
    let mut el = cell(SLOT_LABEL, align)
        .class(SURFACE_FLAT)
        .class("gf-label-surface")
        .style("text-align", "left");

    let Some(label) = label else {
        return el;
    };

    let mut text = match &label.html_for {
        Some(target) => Element::new("label").attr("for", target.as_str()),
        None => Element::new("span"),
    }
    .class("gf-label-text")
    .children(label.children.iter().cloned());

    if label.required {
        text = text.child(
            Element::new("span")
                .class("gf-required")
                .class(variant_class(ctl.color_variant()))
                .attr("aria-hidden", "true")
                .child("*"),
        );
        el = el.attr("data-required", "true");
    }
    el.child(text)
}

pub fn content_cell(content: Option<&Content>, align: Align) -> Element {
    let el = cell(SLOT_CONTENT, align);
    match content {
        Some(content) => {
            let mut el = el
                .style("display", "flex")
                .style("flex-direction", content.direction.css());
            if let Some(gap) = &content.gap {
                el = el.style("gap", gap.to_string());
            }
            el.children(content.children.iter().cloned())
        }
        None => el,
    }
}

/// Single-line, ellipsised rules cell that opens the rules modal for `sequence`.
pub fn rules_cell(ctl: &LayoutController, rules: &Rules, sequence: u32, align: Align) -> Element {
    cell(SLOT_RULES, align)
        .class(SURFACE_RAISED)
        .class("gf-truncate")
        .class(variant_class(ctl.color_variant()))
        .style("white-space", "nowrap")
        .style("overflow", "hidden")
        .style("text-overflow", "ellipsis")
        .style("cursor", "pointer")
        .attr("role", "button")
        .attr(RULES_TRIGGER_ATTR, sequence.to_string())
        .children(rules.children.iter().cloned())
}

/// Keeps the rules column aligned for rows without rules.
pub fn rules_placeholder(align: Align) -> Element {
    cell(SLOT_RULES_PLACEHOLDER, align)
}

/// Container for one action slot (`top-right`, `bottom-left`, `bottom-right`);
/// `None` when the slot holds nothing.
pub fn action_bar(position: &str, actions: &[Node]) -> Option<Element> {
    if actions.iter().all(Node::is_empty) {
        return None;
    }
    let justify = if position.ends_with("right") {
        "flex-end"
    } else {
        "flex-start"
    };
    Some(
        Element::div()
            .class("gf-actions")
            .class(format!("gf-actions--{position}"))
            .attr("data-slot", format!("actions-{position}"))
            .style("display", "flex")
            .style("justify-content", justify)
            .children(actions.iter().cloned()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FormConfig, TotalCount, Track};
    use crate::walker::flatten_text;

    #[test]
    fn sequence_cell_shows_total_only_when_known() {
        let ctl = LayoutController::detached();
        let el = sequence_cell(&ctl, 4, Align::Center);
        assert_eq!(flatten_text(&el.children), "4");
        assert_eq!(el.slot(), Some(SLOT_SEQUENCE));

        let ctl = LayoutController::new(FormConfig::default().total(TotalCount::Fixed(10)), &[]);
        let el = sequence_cell(&ctl, 4, Align::Center);
        assert_eq!(flatten_text(&el.children), "4/10");
    }

    #[test]
    fn required_label_gets_marker() {
        let ctl = LayoutController::detached();
        let label = Label::new("Name").required(true).html_for("name-input");
        let el = label_cell(&ctl, Some(&label), Align::Center);
        assert_eq!(el.get_attr("data-required"), Some("true"));
        let node = Node::from(el);
        let text = node
            .elements()
            .into_iter()
            .find(|e| e.tag == "label")
            .expect("label element");
        assert_eq!(text.get_attr("for"), Some("name-input"));
        assert!(node.elements().iter().any(|e| e.has_class("gf-required")));
    }

    #[test]
    fn missing_label_renders_empty_cell() {
        let ctl = LayoutController::detached();
        let el = label_cell(&ctl, None, Align::Start);
        assert!(el.children.is_empty());
        assert_eq!(el.style_value("align-self"), Some("start"));
    }

    #[test]
    fn content_cell_applies_direction_and_gap() {
        let content = Content::new("x")
            .direction(crate::row::Direction::Column)
            .gap(Track::Px(8));
        let el = content_cell(Some(&content), Align::Center);
        assert_eq!(el.style_value("flex-direction"), Some("column"));
        assert_eq!(el.style_value("gap"), Some("8px"));
    }

    #[test]
    fn rules_cell_is_truncated_trigger() {
        let ctl = LayoutController::detached();
        let el = rules_cell(&ctl, &Rules::new("long text"), 3, Align::Center);
        assert_eq!(el.style_value("text-overflow"), Some("ellipsis"));
        assert_eq!(el.style_value("white-space"), Some("nowrap"));
        assert_eq!(el.get_attr(RULES_TRIGGER_ATTR), Some("3"));
    }

    #[test]
    fn empty_action_slots_are_skipped() {
        assert!(action_bar("top-right", &[]).is_none());
        assert!(action_bar("top-right", &[Node::Empty]).is_none());
        let bar = action_bar("bottom-right", &[Node::text("Save")]).unwrap();
        assert_eq!(bar.style_value("justify-content"), Some("flex-end"));
    }
}
