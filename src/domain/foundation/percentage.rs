//! Percentage value object (0-100 scale).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// A whole-number value between 0 and 100 inclusive.
///
/// Balance scores, harmony metrics and parent shares are all displayed on this
/// scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Percentage(u8);

impl Percentage {
    /// Zero percent.
    pub const ZERO: Self = Self(0);

    /// Fifty percent, the neutral value used when there is no data.
    pub const NEUTRAL: Self = Self(50);

    /// One hundred percent.
    pub const HUNDRED: Self = Self(100);

    /// Creates a new Percentage, clamping to valid range.
    pub fn new(value: u8) -> Self {
        Self(value.min(100))
    }

    /// Creates a Percentage, returning error if out of range.
    pub fn try_new(value: u8) -> Result<Self, ValidationError> {
        if value > 100 {
            return Err(ValidationError::out_of_range(
                "percentage",
                0.0,
                100.0,
                f64::from(value),
            ));
        }
        Ok(Self(value))
    }

    /// Rounds a real-valued percentage half-up and clamps it into 0..=100.
    ///
    /// NaN maps to the neutral value.
    pub fn from_f64_rounded(value: f64) -> Self {
        if value.is_nan() {
            return Self::NEUTRAL;
        }
        let rounded = (value + 0.5).floor().clamp(0.0, 100.0);
        Self(rounded as u8)
    }

    /// Rounds `numerator / denominator` half-up in exact integer arithmetic
    /// and clamps it into 0..=100. A zero denominator maps to neutral.
    pub fn from_ratio_rounded(numerator: u64, denominator: u64) -> Self {
        if denominator == 0 {
            return Self::NEUTRAL;
        }
        let rounded = (2 * numerator + denominator) / (2 * denominator);
        Self(rounded.min(100) as u8)
    }

    /// Returns the value as u8.
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Returns the value as f64, for use in weighted blends.
    pub fn as_f64(&self) -> f64 {
        f64::from(self.0)
    }

    pub(crate) fn as_u64(&self) -> u64 {
        u64::from(self.0)
    }
}

impl TryFrom<u8> for Percentage {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<Percentage> for u8 {
    fn from(pct: Percentage) -> Self {
        pct.0
    }
}

impl Default for Percentage {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}
