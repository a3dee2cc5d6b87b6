//! Two-option toggle between the `default` and `detail` view modes.

use std::fmt;

use strum::IntoEnumIterator;
use tracing::debug;

use crate::config::ViewMode;
use crate::node::{Element, Node};

type ChangeCallback = Box<dyn FnMut(ViewMode) + Send>;

/// Holds the selected mode and notifies the owner on change.
///
/// The owner feeds the selected mode back into its `FormConfig` before the next
/// render; the selector never touches a form directly.
pub struct ViewSelector {
    mode: ViewMode,
    on_change: Option<ChangeCallback>,
}

impl ViewSelector {
    pub fn new(mode: ViewMode) -> Self {
        Self {
            mode,
            on_change: None,
        }
    }

    pub fn on_change(mut self, callback: impl FnMut(ViewMode) + Send + 'static) -> Self {
        self.on_change = Some(Box::new(callback));
        self
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// Select `mode`. Returns `false` (and stays silent) when it is already active.
    pub fn select(&mut self, mode: ViewMode) -> bool {
        if mode == self.mode {
            return false;
        }
        debug!(from = %self.mode, to = %mode, "view mode changed");
        self.mode = mode;
        if let Some(callback) = self.on_change.as_mut() {
            callback(mode);
        }
        true
    }

    pub fn toggle(&mut self) -> ViewMode {
        self.select(self.mode.toggled());
        self.mode
    }

    /// Host tree: one button per mode, the active one pressed.
    pub fn render(&self) -> Node {
        let buttons = ViewMode::iter().map(|mode| {
            let active = mode == self.mode;
            let mut button = Element::new("button")
                .class("gf-view-option")
                .class(if active { "neu-inset" } else { "neu-raised" })
                .attr("type", "button")
                .attr("data-view-mode", mode.to_string())
                .attr("aria-pressed", active.to_string())
                .child(mode.label());
            if active {
                button.add_class("gf-view-option--active");
            }
            Node::from(button)
        });
        Element::div()
            .class("gf-view-selector")
            .attr("role", "group")
            .attr("data-slot", "view-selector")
            .children(buttons)
            .into()
    }
}

impl Default for ViewSelector {
    fn default() -> Self {
        Self::new(ViewMode::default())
    }
}

impl fmt::Debug for ViewSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewSelector")
            .field("mode", &self.mode)
            .field("on_change", &self.on_change.is_some())
            .finish()
    }
}
