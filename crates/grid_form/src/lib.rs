//! Declarative grid forms: label/content/rules rows laid out in one of two
//! topologies, with label-column auto-sizing and a host-agnostic output tree.

pub mod cells;
pub(crate) mod config;
pub(crate) mod controller;
pub(crate) mod error;
pub(crate) mod form;
pub mod html;
pub(crate) mod modal;
pub(crate) mod node;
pub(crate) mod renderer;
pub(crate) mod row;
pub(crate) mod schema;
pub(crate) mod view_selector;
pub mod walker;
pub(crate) mod width;

pub use config::{
    ColorVariant, DEFAULT_GAP_PX, DEFAULT_LABEL_WIDTH_PX, DEFAULT_RULES_WIDTH_PX,
    DEFAULT_SEQUENCE_WIDTH_PX, FormConfig, Numbering, TotalCount, Track, ViewMode,
};
pub use controller::LayoutController;
pub use error::{GridFormError, Result};
pub use form::{FormContainer, RenderedForm, SLOT_FORM, SLOT_GRID};
pub use modal::{DEFAULT_RULES_TITLE, RulesEntry, RulesModal};
pub use node::{Element, Node};
pub use renderer::{FlatRowRenderer, GridSiblingRowRenderer, RowCells, RowPosition, RowRenderer};
pub use row::{Align, Content, Direction, Label, Row, RowSlot, Rules};
pub use schema::{FieldSchema, render_schema, validate_schema};
pub use view_selector::ViewSelector;
pub use walker::{flatten_text, infer_label_width};
pub use width::{CharClass, WidthTable, estimate_width};
