//! Parser configuration
//!
//! All rendering-policy knobs are explicit values handed to the parser at
//! construction. There are no ambient lookups: a caller that wants the
//! 500,000-character ceiling passes it in.

use serde::{Deserialize, Serialize};

/// Default maximum number of digits shown for a numeric leaf.
pub const DEFAULT_DISPLAYED_DIGITS: usize = 100;

/// Smallest digit limit the parser will honor; lower values are clamped up.
pub const MIN_DISPLAYED_DIGITS: usize = 10;

/// Tiered ceiling on the total input length of one document.
///
/// Input longer than the active ceiling is never structurally parsed; the
/// parser produces a single forced-break placeholder leaf instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InputCeiling {
    /// 50,000 characters.
    #[default]
    Standard,
    /// 500,000 characters.
    Large,
    /// 5,000,000 characters.
    Huge,
    /// No ceiling; every input is structurally parsed.
    Unlimited,
}

impl InputCeiling {
    /// The ceiling in characters, or `None` for [`InputCeiling::Unlimited`].
    pub fn limit(self) -> Option<usize> {
        match self {
            InputCeiling::Standard => Some(50_000),
            InputCeiling::Large => Some(500_000),
            InputCeiling::Huge => Some(5_000_000),
            InputCeiling::Unlimited => None,
        }
    }

    /// True when `len` is over this ceiling.
    pub fn exceeded_by(self, len: usize) -> bool {
        match self.limit() {
            Some(limit) => len > limit,
            None => false,
        }
    }
}

/// Configuration consumed by [`crate::parsing::Parser`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Maximum displayed digit count for numeric leaves. Values below
    /// [`MIN_DISPLAYED_DIGITS`] are treated as [`MIN_DISPLAYED_DIGITS`].
    pub displayed_digits: usize,
    /// Ceiling on total document input length.
    pub input_ceiling: InputCeiling,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            displayed_digits: DEFAULT_DISPLAYED_DIGITS,
            input_ceiling: InputCeiling::default(),
        }
    }
}

impl ParserConfig {
    /// The digit limit with the floor applied.
    pub fn effective_digits(&self) -> usize {
        self.displayed_digits.max(MIN_DISPLAYED_DIGITS)
    }
}
