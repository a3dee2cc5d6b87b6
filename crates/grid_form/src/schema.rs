//! Declarative field schema.
//!
//! A flat list of [`FieldSchema`] expands into one keyed [`Row`] per field, so callers
//! can describe a form as data instead of nesting rows by hand:
//!
//! ```
//! use grid_form::{FieldSchema, FormConfig, render_schema};
//!
//! let fields = vec![
//!     FieldSchema::new("name", "Name", "Kim").required(true),
//!     FieldSchema::new("email", "Email", "kim@example.com").rules("Work address only"),
//! ];
//! let rendered = render_schema(&fields, FormConfig::default()).render();
//! assert_eq!(rendered.row_count(), 2);
//! ```

use std::collections::HashSet;

use tracing::warn;

use crate::config::FormConfig;
use crate::error::{GridFormError, Result};
use crate::form::FormContainer;
use crate::node::Node;
use crate::row::{Align, Content, Label, Row, Rules};

/// One field of a schema. Expands into exactly one row.
///
/// `component` is opaque content; it is placed in the content cell as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSchema {
    /// Reconciliation key of the generated row; unique within one schema.
    pub id: String,
    pub label: String,
    pub required: bool,
    pub rules: Option<Node>,
    pub component: Node,
    pub align: Option<Align>,
    pub html_for: Option<String>,
}

impl FieldSchema {
    pub fn new(id: impl Into<String>, label: impl Into<String>, component: impl Into<Node>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            required: false,
            rules: None,
            component: component.into(),
            align: None,
            html_for: None,
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn rules(mut self, rules: impl Into<Node>) -> Self {
        self.rules = Some(rules.into());
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = Some(align);
        self
    }

    pub fn html_for(mut self, id: impl Into<String>) -> Self {
        self.html_for = Some(id.into());
        self
    }

    /// The row this field stands for.
    pub fn to_row(&self) -> Row {
        let mut label = Label::new(self.label.as_str()).required(self.required);
        if let Some(target) = &self.html_for {
            label = label.html_for(target.as_str());
        }
        let mut row = Row::new()
            .key(self.id.as_str())
            .align(self.align.unwrap_or_default())
            .label(label)
            .content(Content::new(self.component.clone()));
        if let Some(rules) = &self.rules {
            row = row.rules(Rules::new(rules.clone()));
        }
        row
    }
}

/// Check that every field id is unique.
pub fn validate_schema(fields: &[FieldSchema]) -> Result<()> {
    let mut seen = HashSet::new();
    for field in fields {
        if !seen.insert(field.id.as_str()) {
            return Err(GridFormError::DuplicateFieldId(field.id.clone()));
        }
    }
    Ok(())
}

/// Expand `fields` into a form container, one row per field in array order.
///
/// Duplicate ids are logged and rendered anyway.
pub fn render_schema(fields: &[FieldSchema], config: FormConfig) -> FormContainer {
    if let Err(GridFormError::DuplicateFieldId(id)) = validate_schema(fields) {
        warn!(%id, "duplicate field id in schema; row identity is ambiguous");
    }
    FormContainer::new(config).children(fields.iter().map(|f| Node::from(f.to_row())))
}
