//! Rows and their slots.
//!
//! A row is built from explicit slots instead of being classified from opaque
//! children:
//!
//! ```
//! use grid_form::{Label, Row};
//!
//! let row = Row::new()
//!     .key("plate")
//!     .label(Label::new("Plate number").required(true))
//!     .content("12가 3456")
//!     .rules("Korean plate format");
//! assert!(row.label.is_some() && row.rules.is_some());
//! ```
//!
//! `Row::from_slots` accepts a slot list; when a kind repeats, the last one wins.

use serde::{Deserialize, Serialize};

use crate::config::Track;
use crate::node::{Element, Node};
use crate::walker::flatten_text;

/// Vertical alignment of the cells of one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Start,
    #[default]
    Center,
    End,
}

impl Align {
    pub fn css(self) -> &'static str {
        match self {
            Align::Start => "start",
            Align::Center => "center",
            Align::End => "end",
        }
    }
}

/// Flow direction of the items inside a content cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Row,
    Column,
}

impl Direction {
    pub fn css(self) -> &'static str {
        match self {
            Direction::Row => "row",
            Direction::Column => "column",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Label {
    pub children: Vec<Node>,
    pub required: bool,
    pub html_for: Option<String>,
}

impl Label {
    pub fn new(content: impl Into<Node>) -> Self {
        Self {
            children: vec![content.into()],
            ..Self::default()
        }
    }

    /// A label cell with no text, used for button and spacer rows.
    pub fn blank() -> Self {
        Self::default()
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn html_for(mut self, id: impl Into<String>) -> Self {
        self.html_for = Some(id.into());
        self
    }

    /// Plain text of the label (non-text children contribute nothing).
    pub fn text(&self) -> String {
        flatten_text(&self.children)
    }
}

impl From<&str> for Label {
    fn from(value: &str) -> Self {
        Label::new(value)
    }
}

impl From<String> for Label {
    fn from(value: String) -> Self {
        Label::new(value)
    }
}

impl From<Node> for Label {
    fn from(value: Node) -> Self {
        Label::new(value)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Content {
    pub children: Vec<Node>,
    pub direction: Direction,
    pub gap: Option<Track>,
}

impl Content {
    pub fn new(content: impl Into<Node>) -> Self {
        Self {
            children: vec![content.into()],
            ..Self::default()
        }
    }

    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn gap(mut self, gap: Track) -> Self {
        self.gap = Some(gap);
        self
    }

    pub fn push(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }
}

impl From<&str> for Content {
    fn from(value: &str) -> Self {
        Content::new(value)
    }
}

impl From<String> for Content {
    fn from(value: String) -> Self {
        Content::new(value)
    }
}

impl From<Node> for Content {
    fn from(value: Node) -> Self {
        Content::new(value)
    }
}

impl From<Element> for Content {
    fn from(value: Element) -> Self {
        Content::new(value)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Rules {
    pub children: Vec<Node>,
}

impl Rules {
    pub fn new(content: impl Into<Node>) -> Self {
        Self {
            children: vec![content.into()],
        }
    }
}

impl From<&str> for Rules {
    fn from(value: &str) -> Self {
        Rules::new(value)
    }
}

impl From<String> for Rules {
    fn from(value: String) -> Self {
        Rules::new(value)
    }
}

impl From<Node> for Rules {
    fn from(value: Node) -> Self {
        Rules::new(value)
    }
}

/// The closed set of things a row can hold.
#[derive(Debug, Clone, PartialEq)]
pub enum RowSlot {
    Label(Label),
    Content(Content),
    Rules(Rules),
}

/// One form row: at most one label, one content and one rules slot.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// Reconciliation key; schema rows use the field id.
    pub key: Option<String>,
    pub align: Align,
    /// Hidden rows are declared but not rendered (see `Numbering`).
    pub visible: bool,
    pub label: Option<Label>,
    pub content: Option<Content>,
    pub rules: Option<Rules>,
}

impl Default for Row {
    fn default() -> Self {
        Self {
            key: None,
            align: Align::default(),
            visible: true,
            label: None,
            content: None,
            rules: None,
        }
    }
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a row from a slot list. Later slots of the same kind replace earlier ones.
    pub fn from_slots(slots: impl IntoIterator<Item = RowSlot>) -> Self {
        slots.into_iter().fold(Self::new(), Row::slot)
    }

    pub fn slot(self, slot: RowSlot) -> Self {
        match slot {
            RowSlot::Label(label) => self.label(label),
            RowSlot::Content(content) => self.content(content),
            RowSlot::Rules(rules) => self.rules(rules),
        }
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn label(mut self, label: impl Into<Label>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn content(mut self, content: impl Into<Content>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn rules(mut self, rules: impl Into<Rules>) -> Self {
        self.rules = Some(rules.into());
        self
    }

    /// A row with neither label nor content renders no cells.
    pub fn is_spacer(&self) -> bool {
        self.label.is_none() && self.content.is_none()
    }

    pub fn is_required(&self) -> bool {
        self.label.as_ref().is_some_and(|l| l.required)
    }
}
