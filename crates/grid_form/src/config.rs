//! Form configuration: column widths, view mode, color variant and the numbering
//! policies.
//!
//! Everything here is plain serde data so front-ends can layer it from files and
//! environment. Keys are snake_case; the camelCase spellings used by design tooling
//! (`labelColumnWidth`, `viewMode`, ...) are accepted as aliases, as are their
//! lowercased forms since layered config sources fold key case.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::error::GridFormError;

pub const DEFAULT_SEQUENCE_WIDTH_PX: u32 = 60;
pub const DEFAULT_LABEL_WIDTH_PX: u32 = 300;
pub const DEFAULT_RULES_WIDTH_PX: u32 = 200;
pub const DEFAULT_GAP_PX: u32 = 20;

/// One grid track in CSS notation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Track {
    /// `"{n}px"`
    Px(u32),
    /// `"{n}fr"`
    Fr(u32),
    /// Any other CSS track expression (`auto`, `20%`, `minmax(…)`), passed through.
    Raw(String),
}

impl Track {
    pub fn px(n: u32) -> Self {
        Track::Px(n)
    }

    pub fn fr(n: u32) -> Self {
        Track::Fr(n)
    }

    /// Pixel size when the track is a fixed pixel width.
    pub fn as_px(&self) -> Option<u32> {
        match self {
            Track::Px(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Track::Px(n) => write!(f, "{n}px"),
            Track::Fr(n) => write!(f, "{n}fr"),
            Track::Raw(raw) => f.write_str(raw),
        }
    }
}

impl FromStr for Track {
    type Err = GridFormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.contains([';', '{', '}', '<', '>', '"']) {
            return Err(GridFormError::InvalidTrack(s.to_string()));
        }
        if let Ok(n) = trimmed.parse::<u32>() {
            return Ok(Track::Px(n));
        }
        if let Some(n) = trimmed.strip_suffix("px").and_then(|n| n.parse().ok()) {
            return Ok(Track::Px(n));
        }
        if let Some(n) = trimmed.strip_suffix("fr").and_then(|n| n.parse().ok()) {
            return Ok(Track::Fr(n));
        }
        Ok(Track::Raw(trimmed.to_string()))
    }
}

impl TryFrom<String> for Track {
    type Error = GridFormError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Track> for String {
    fn from(value: Track) -> Self {
        value.to_string()
    }
}

/// Which of the two grid topologies a form renders with.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Two columns (label, content); each row owns a local grid.
    #[default]
    Default,
    /// Four columns (sequence, label, content, rules); rows contribute cells to the
    /// form grid directly.
    Detail,
}

impl ViewMode {
    pub fn parse(s: &str) -> Result<Self, GridFormError> {
        s.trim()
            .parse()
            .map_err(|_| GridFormError::UnknownViewMode(s.to_string()))
    }

    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Default => ViewMode::Detail,
            ViewMode::Detail => ViewMode::Default,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ViewMode::Default => "Default",
            ViewMode::Detail => "Detail",
        }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum ColorVariant {
    #[default]
    Primary,
    Secondary,
}

impl ColorVariant {
    pub fn parse(s: &str) -> Result<Self, GridFormError> {
        s.trim()
            .parse()
            .map_err(|_| GridFormError::UnknownVariant(s.to_string()))
    }
}

/// What a row's sequence number counts.
///
/// Rows can be declared but hidden (`Row::visible(false)`). With `RenderedOrder` only
/// rendered rows consume numbers, so numbering stays contiguous on screen. With
/// `DeclaredOrder` a hidden row still consumes its number, so a row keeps the same
/// number whether or not its predecessors are shown.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum Numbering {
    #[default]
    RenderedOrder,
    DeclaredOrder,
}

/// Source of the `/total` suffix shown in sequence cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TotalCount {
    /// No suffix (total = 0).
    #[default]
    None,
    /// Count the rows of the form, following the numbering policy.
    Auto,
    /// Caller supplied total.
    Fixed(usize),
}

/// Configuration of one form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    #[serde(alias = "sequenceColumnWidth", alias = "sequencecolumnwidth")]
    pub sequence_column_width: Track,
    /// Fixed label column width; `None` means inferred from the label texts.
    #[serde(alias = "labelColumnWidth", alias = "labelcolumnwidth")]
    pub label_column_width: Option<Track>,
    /// When false and no width is given, the label column falls back to 300px.
    #[serde(alias = "autoLabelWidth", alias = "autolabelwidth")]
    pub auto_label_width: bool,
    #[serde(alias = "rulesColumnWidth", alias = "rulescolumnwidth")]
    pub rules_column_width: Track,
    pub gap: Track,
    #[serde(alias = "colorVariant", alias = "colorvariant")]
    pub color_variant: ColorVariant,
    #[serde(alias = "viewMode", alias = "viewmode")]
    pub view_mode: ViewMode,
    pub total: TotalCount,
    pub numbering: Numbering,
    /// Number of page-level columns rows are laid out in (`default` mode only).
    #[serde(alias = "pageColumns", alias = "pagecolumns")]
    pub page_columns: usize,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            sequence_column_width: Track::Px(DEFAULT_SEQUENCE_WIDTH_PX),
            label_column_width: None,
            auto_label_width: true,
            rules_column_width: Track::Px(DEFAULT_RULES_WIDTH_PX),
            gap: Track::Px(DEFAULT_GAP_PX),
            color_variant: ColorVariant::default(),
            view_mode: ViewMode::default(),
            total: TotalCount::default(),
            numbering: Numbering::default(),
            page_columns: 1,
        }
    }
}

impl FormConfig {
    pub fn view_mode(mut self, mode: ViewMode) -> Self {
        self.view_mode = mode;
        self
    }

    pub fn color_variant(mut self, variant: ColorVariant) -> Self {
        self.color_variant = variant;
        self
    }

    pub fn label_column_width(mut self, width: Track) -> Self {
        self.label_column_width = Some(width);
        self
    }

    pub fn sequence_column_width(mut self, width: Track) -> Self {
        self.sequence_column_width = width;
        self
    }

    pub fn rules_column_width(mut self, width: Track) -> Self {
        self.rules_column_width = width;
        self
    }

    pub fn gap(mut self, gap: Track) -> Self {
        self.gap = gap;
        self
    }

    pub fn total(mut self, total: TotalCount) -> Self {
        self.total = total;
        self
    }

    pub fn numbering(mut self, numbering: Numbering) -> Self {
        self.numbering = numbering;
        self
    }

    pub fn page_columns(mut self, columns: usize) -> Self {
        self.page_columns = columns.max(1);
        self
    }

    pub fn auto_label_width(mut self, enabled: bool) -> Self {
        self.auto_label_width = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use strum::IntoEnumIterator;

    #[test]
    fn tracks_parse_and_print() {
        assert_eq!("120px".parse::<Track>(), Ok(Track::Px(120)));
        assert_eq!(" 1fr ".parse::<Track>(), Ok(Track::Fr(1)));
        assert_eq!("80".parse::<Track>(), Ok(Track::Px(80)));
        assert_eq!(
            "minmax(0, 1fr)".parse::<Track>(),
            Ok(Track::Raw("minmax(0, 1fr)".into()))
        );
        assert_eq!(Track::Px(60).to_string(), "60px");
        assert_eq!(Track::Fr(2).to_string(), "2fr");
    }

    #[test]
    fn tracks_reject_empty_and_injection() {
        assert!(matches!(
            "".parse::<Track>(),
            Err(GridFormError::InvalidTrack(_))
        ));
        assert!("10px; color: red".parse::<Track>().is_err());
        assert!("\"x\"".parse::<Track>().is_err());
    }

    #[test]
    fn view_mode_parses_case_insensitively() {
        assert_eq!(ViewMode::parse("DETAIL"), Ok(ViewMode::Detail));
        assert_eq!(ViewMode::parse("default"), Ok(ViewMode::Default));
        assert_eq!(
            ViewMode::parse("grid"),
            Err(GridFormError::UnknownViewMode("grid".into()))
        );
        assert_eq!(ViewMode::iter().count(), 2);
        assert_eq!(ViewMode::Default.toggled(), ViewMode::Detail);
    }

    #[test]
    fn numbering_uses_kebab_case() {
        assert_eq!(Numbering::DeclaredOrder.to_string(), "declared-order");
        assert_eq!(
            "rendered-order".parse::<Numbering>().ok(),
            Some(Numbering::RenderedOrder)
        );
    }

    #[test]
    fn defaults_match_documented_values() {
        let cfg = FormConfig::default();
        assert_eq!(cfg.sequence_column_width, Track::Px(60));
        assert_eq!(cfg.label_column_width, None);
        assert_eq!(cfg.gap, Track::Px(20));
        assert_eq!(cfg.view_mode, ViewMode::Default);
        assert_eq!(cfg.color_variant, ColorVariant::Primary);
        assert_eq!(cfg.total, TotalCount::None);
        assert_eq!(cfg.page_columns, 1);
    }

    #[test]
    fn config_deserializes_with_aliases_and_defaults() {
        let cfg: FormConfig = serde_json::from_str(
            r#"{ "viewMode": "detail", "labelColumnWidth": "180px", "total": "auto" }"#,
        )
        .unwrap();
        assert_eq!(cfg.view_mode, ViewMode::Detail);
        assert_eq!(cfg.label_column_width, Some(Track::Px(180)));
        assert_eq!(cfg.total, TotalCount::Auto);
        assert_eq!(cfg.rules_column_width, Track::Px(200));

        let fixed: FormConfig = serde_json::from_str(r#"{ "total": { "fixed": 7 } }"#).unwrap();
        assert_eq!(fixed.total, TotalCount::Fixed(7));

        let bad = serde_json::from_str::<FormConfig>(r#"{ "gap": "" }"#);
        assert!(bad.is_err());
    }
}
