//! Text width estimation for the shared label column.
//!
//! Widths are estimated, not measured: every character falls into one of three
//! classes and contributes a fixed pixel weight. The default weights are tuned for a
//! 14px UI font.
//!
//! | class   | members                                          | weight |
//! |---------|--------------------------------------------------|--------|
//! | wide    | CJK ideographs, Hangul, Kana, full-width forms   | 16     |
//! | narrow  | ASCII letters and digits                         | 8      |
//! | other   | punctuation, whitespace, everything else         | 10     |
//!
//! ```
//! use grid_form::estimate_width;
//!
//! assert_eq!(estimate_width("Name"), 32);
//! assert_eq!(estimate_width("이름"), 32);
//! assert_eq!(estimate_width(""), 0);
//! ```

/// Character class used by the estimator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharClass {
    Wide,
    Narrow,
    Other,
}

impl CharClass {
    pub fn of(c: char) -> Self {
        if c.is_ascii_alphanumeric() {
            CharClass::Narrow
        } else if is_wide(c) {
            CharClass::Wide
        } else {
            CharClass::Other
        }
    }
}

/// Unicode blocks rendered at (roughly) double width.
fn is_wide(c: char) -> bool {
    matches!(
        c as u32,
        0x1100..=0x11FF      // Hangul Jamo
        | 0x3040..=0x309F    // Hiragana
        | 0x30A0..=0x30FF    // Katakana
        | 0x3130..=0x318F    // Hangul Compatibility Jamo
        | 0x3400..=0x4DBF    // CJK Extension A
        | 0x4E00..=0x9FFF    // CJK Unified Ideographs
        | 0xAC00..=0xD7A3    // Hangul Syllables
        | 0xF900..=0xFAFF    // CJK Compatibility Ideographs
        | 0xFF01..=0xFF60    // Fullwidth forms
    )
}

/// Per-class pixel weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidthTable {
    pub wide: u32,
    pub narrow: u32,
    pub other: u32,
}

impl Default for WidthTable {
    fn default() -> Self {
        Self {
            wide: 16,
            narrow: 8,
            other: 10,
        }
    }
}

impl WidthTable {
    pub fn weight(&self, class: CharClass) -> u32 {
        match class {
            CharClass::Wide => self.wide,
            CharClass::Narrow => self.narrow,
            CharClass::Other => self.other,
        }
    }

    /// Sum of the class weights of every character in `text`.
    pub fn estimate(&self, text: &str) -> u32 {
        text.chars()
            .map(|c| self.weight(CharClass::of(c)))
            .fold(0u32, u32::saturating_add)
    }
}

/// Estimate the rendered pixel width of `text` with the default weights.
pub fn estimate_width(text: &str) -> u32 {
    WidthTable::default().estimate(text)
}
