//! Per-form layout state handed to every row during a render pass.
//!
//! The controller is the single source of truth for one form: resolved column
//! widths, active view mode, color variant, the `/total` count and the live
//! sequence counter. It is passed explicitly to the row renderers; rows rendered
//! without a form use [`LayoutController::detached`].
//!
//! Pass lifecycle:
//! 1. `begin_pass()` resets the counter to zero,
//! 2. each rendered row calls `next_sequence()` once, in document order,
//! 3. with `Numbering::DeclaredOrder` each hidden row calls `skip_sequence()`.

use tracing::{debug, trace};

use crate::config::{
    ColorVariant, DEFAULT_LABEL_WIDTH_PX, FormConfig, Numbering, TotalCount, Track, ViewMode,
};
use crate::node::Node;
use crate::renderer::{FlatRowRenderer, GridSiblingRowRenderer, RowRenderer};
use crate::walker::{collect_rows, infer_label_width};

#[derive(Debug, Clone)]
pub struct LayoutController {
    config: FormConfig,
    label_width: Track,
    total: usize,
    counter: u32,
}

impl LayoutController {
    /// Resolve widths and totals for `config` over the form's `children`.
    pub fn new(config: FormConfig, children: &[Node]) -> Self {
        let label_width = match &config.label_column_width {
            Some(width) => width.clone(),
            None if config.auto_label_width => infer_label_width(children),
            None => Track::Px(DEFAULT_LABEL_WIDTH_PX),
        };

        let total = match config.total {
            TotalCount::None => 0,
            TotalCount::Fixed(n) => n,
            TotalCount::Auto => {
                let rows = collect_rows(children);
                match config.numbering {
                    Numbering::RenderedOrder => rows.iter().filter(|r| r.visible).count(),
                    Numbering::DeclaredOrder => rows.len(),
                }
            }
        };

        Self {
            config,
            label_width,
            total,
            counter: 0,
        }
    }

    /// Safe defaults for rows rendered outside a form: `default` view, no total,
    /// 300px label column.
    pub fn detached() -> Self {
        Self {
            config: FormConfig::default(),
            label_width: Track::Px(DEFAULT_LABEL_WIDTH_PX),
            total: 0,
            counter: 0,
        }
    }

    /// Start a render pass.
    pub fn begin_pass(&mut self) {
        debug!(
            view_mode = %self.config.view_mode,
            label_width = %self.label_width,
            total = self.total,
            "begin layout pass"
        );
        self.counter = 0;
    }

    /// Hand out the next sequence number (1-based).
    pub fn next_sequence(&mut self) -> u32 {
        self.counter += 1;
        trace!(sequence = self.counter, "sequence assigned");
        self.counter
    }

    /// Consume a number without rendering it (hidden rows, declared-order numbering).
    pub fn skip_sequence(&mut self) {
        self.counter += 1;
        trace!(sequence = self.counter, "sequence skipped");
    }

    /// Numbers handed out (or skipped) so far in this pass.
    pub fn issued(&self) -> u32 {
        self.counter
    }

    /// Text for a sequence cell: `"n/total"` when a total is known, else `"n"`.
    pub fn sequence_text(&self, sequence: u32) -> String {
        if self.total > 0 {
            format!("{sequence}/{}", self.total)
        } else {
            sequence.to_string()
        }
    }

    /// Column template of the form grid for the active view mode.
    pub fn grid_template_columns(&self) -> String {
        match self.config.view_mode {
            ViewMode::Default => format!("{} 1fr", self.label_width),
            ViewMode::Detail => format!(
                "{} {} 1fr {}",
                self.config.sequence_column_width, self.label_width, self.config.rules_column_width
            ),
        }
    }

    /// Number of columns in the form grid.
    pub fn column_count(&self) -> usize {
        match self.config.view_mode {
            ViewMode::Default => 2,
            ViewMode::Detail => 4,
        }
    }

    /// The row rendering strategy for the active view mode.
    pub fn renderer(&self) -> Box<dyn RowRenderer> {
        let renderer: Box<dyn RowRenderer> = match self.config.view_mode {
            ViewMode::Default => Box::new(FlatRowRenderer),
            ViewMode::Detail => Box::new(GridSiblingRowRenderer),
        };
        debug!(renderer = renderer.name(), "row renderer selected");
        renderer
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    pub fn view_mode(&self) -> ViewMode {
        self.config.view_mode
    }

    pub fn color_variant(&self) -> ColorVariant {
        self.config.color_variant
    }

    pub fn numbering(&self) -> Numbering {
        self.config.numbering
    }

    pub fn total_count(&self) -> usize {
        self.total
    }

    pub fn label_width(&self) -> &Track {
        &self.label_width
    }

    pub fn sequence_width(&self) -> &Track {
        &self.config.sequence_column_width
    }

    pub fn rules_width(&self) -> &Track {
        &self.config.rules_column_width
    }

    pub fn gap(&self) -> &Track {
        &self.config.gap
    }

    pub fn page_columns(&self) -> usize {
        self.config.page_columns.max(1)
    }
}

impl Default for LayoutController {
    fn default() -> Self {
        Self::detached()
    }
}
