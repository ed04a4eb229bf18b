//! Decision Threshold
//!
//! The scalar cutoff chosen at training time. Fixed for the lifetime of a
//! loaded artifact; the comparison is inclusive, so a probability exactly
//! at the cutoff classifies as severe.

use serde::Serialize;

/// Threshold value outside [0,1] or not finite
#[derive(Debug, Clone, Copy)]
pub struct InvalidThresholdError {
    pub value: f32,
}

impl std::fmt::Display for InvalidThresholdError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Invalid decision threshold {}: must be a finite value in [0, 1]",
            self.value
        )
    }
}

impl std::error::Error for InvalidThresholdError {}

/// Validated decision threshold
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DecisionThreshold(f32);

impl DecisionThreshold {
    pub fn new(value: f32) -> Result<Self, InvalidThresholdError> {
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            return Err(InvalidThresholdError { value });
        }
        Ok(Self(value))
    }

    pub fn value(self) -> f32 {
        self.0
    }

    /// Inclusive comparison: probability == threshold counts as severe
    pub fn is_severe(self, probability: f32) -> bool {
        probability >= self.0
    }
}
