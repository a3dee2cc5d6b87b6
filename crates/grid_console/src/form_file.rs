//! Form description files.
//!
//! ```toml
//! title = "Vehicle registration"
//!
//! [[fields]]
//! id = "plate"
//! label = "Plate number"
//! required = true
//! rules = "Two digits, one Hangul syllable, four digits"
//! value = "12가 3456"
//!
//! [[actions]]
//! label = "Save"
//! position = "bottom-right"
//! ```

use std::path::Path;

use color_eyre::{Result, eyre::WrapErr};
use grid_form::{
    Align, Element, FieldSchema, FormConfig, FormContainer, Node, render_schema, validate_schema,
};
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct FormFile {
    pub title: String,
    #[serde(default)]
    pub fields: Vec<FieldFile>,
    #[serde(default)]
    pub actions: Vec<ActionFile>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct FieldFile {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub rules: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub align: Option<Align>,
    #[serde(default, alias = "htmlFor", alias = "htmlfor")]
    pub html_for: Option<String>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ActionFile {
    pub label: String,
    #[serde(default)]
    pub position: ActionPosition,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionPosition {
    TopRight,
    BottomLeft,
    #[default]
    BottomRight,
}

impl FormFile {
    /// Load a `.json`, `.json5` or `.toml` description; the format follows the extension.
    pub fn load(path: &Path) -> Result<Self> {
        let form: Self = config::Config::builder()
            .add_source(config::File::from(path).required(true))
            .build()
            .and_then(|c| c.try_deserialize())
            .wrap_err_with(|| format!("reading form description {}", path.display()))?;
        form.validate()?;
        Ok(form)
    }

    pub fn parse(text: &str, format: config::FileFormat) -> Result<Self> {
        let form: Self = config::Config::builder()
            .add_source(config::File::from_str(text, format))
            .build()?
            .try_deserialize()?;
        form.validate()?;
        Ok(form)
    }

    fn validate(&self) -> Result<()> {
        validate_schema(&self.schema()).wrap_err_with(|| format!("form {:?}", self.title))
    }

    pub fn schema(&self) -> Vec<FieldSchema> {
        self.fields.iter().map(FieldFile::to_schema).collect()
    }

    pub fn container(&self, config: FormConfig) -> FormContainer {
        let actions = |position: ActionPosition| -> Vec<Node> {
            self.actions
                .iter()
                .filter(|a| a.position == position)
                .map(|a| {
                    Node::from(
                        Element::new("button")
                            .class("gf-action")
                            .class("neu-raised")
                            .attr("type", "button")
                            .child(a.label.as_str()),
                    )
                })
                .collect()
        };
        render_schema(&self.schema(), config)
            .top_right_actions(actions(ActionPosition::TopRight))
            .bottom_left_actions(actions(ActionPosition::BottomLeft))
            .bottom_right_actions(actions(ActionPosition::BottomRight))
    }
}

impl FieldFile {
    fn input_id(&self) -> String {
        self.html_for.clone().unwrap_or_else(|| format!("field-{}", self.id))
    }

    pub fn to_schema(&self) -> FieldSchema {
        let mut input = Element::new("input")
            .attr("type", "text")
            .attr("id", self.input_id())
            .attr("name", self.id.as_str());
        if let Some(value) = &self.value {
            input = input.attr("value", value.as_str());
        }

        let mut field = FieldSchema::new(self.id.as_str(), self.label.as_str(), input)
            .required(self.required)
            .html_for(self.input_id());
        if let Some(rules) = &self.rules {
            field = field.rules(rules.as_str());
        }
        if let Some(align) = self.align {
            field = field.align(align);
        }
        field
    }
}
