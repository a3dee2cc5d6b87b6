//! Rules modal: the full text behind a truncated rules cell.

use crate::node::{Element, Node};
use crate::walker::flatten_text;

/// Title used when a row's label has no plain text.
pub const DEFAULT_RULES_TITLE: &str = "Rules";

/// Rules of one rendered row, kept so the modal can be opened after the pass.
#[derive(Debug, Clone, PartialEq)]
pub struct RulesEntry {
    pub sequence: u32,
    pub key: Option<String>,
    pub title: String,
    pub body: Vec<Node>,
}

impl RulesEntry {
    pub fn new(sequence: u32, key: Option<String>, label: &[Node], body: Vec<Node>) -> Self {
        let text = flatten_text(label);
        let title = if text.trim().is_empty() {
            DEFAULT_RULES_TITLE.to_string()
        } else {
            text
        };
        Self {
            sequence,
            key,
            title,
            body,
        }
    }

    /// Plain text of the untruncated rules.
    pub fn body_text(&self) -> String {
        flatten_text(&self.body)
    }
}

/// Local open/closed state of the rules modal.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RulesModal {
    open: Option<RulesEntry>,
}

impl RulesModal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, entry: RulesEntry) {
        self.open = Some(entry);
    }

    pub fn close(&mut self) {
        self.open = None;
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn entry(&self) -> Option<&RulesEntry> {
        self.open.as_ref()
    }

    pub fn title(&self) -> Option<&str> {
        self.open.as_ref().map(|e| e.title.as_str())
    }

    /// Host tree of the dialog; empty while closed.
    pub fn render(&self) -> Node {
        let Some(entry) = &self.open else {
            return Node::Empty;
        };
        Element::div()
            .class("gf-modal-backdrop")
            .attr("data-slot", "rules-modal")
            .child(
                Element::div()
                    .class("gf-modal")
                    .class("neu-raised")
                    .attr("role", "dialog")
                    .attr("aria-modal", "true")
                    .child(
                        Element::new("h2")
                            .class("gf-modal-title")
                            .child(entry.title.as_str()),
                    )
                    .child(
                        Element::div()
                            .class("gf-modal-body")
                            .style("white-space", "pre-wrap")
                            .children(entry.body.iter().cloned()),
                    )
                    .child(
                        Element::new("button")
                            .class("gf-modal-close")
                            .attr("type", "button")
                            .child("Close"),
                    ),
            )
            .into()
    }
}
