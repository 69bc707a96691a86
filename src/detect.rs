//! Threshold configuration and the event-trigger predicate.
//!
//! Detection is a pure strict comparison: a sample triggers iff it is
//! finite and greater than the current threshold. All state (the threshold
//! itself) lives in the controller; changing it affects only future ticks.

use crate::error::{Result, TemblorError};

/// A detection threshold, restricted to the accepted range.
///
/// Values outside [`Threshold::MIN`, `Threshold::MAX`] are rejected at
/// construction, never clamped, so a bad command leaves the current
/// configuration untouched.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Threshold(f64);

impl Threshold {
    /// Lowest accepted threshold.
    pub const MIN: f64 = 0.1;
    /// Highest accepted threshold.
    pub const MAX: f64 = 1.0;
    /// Starting threshold, comfortably above the synthetic noise floor.
    pub const DEFAULT: f64 = 0.4;
    /// Adjustment step used by the control surface.
    pub const STEP: f64 = 0.05;

    /// Validates and wraps a threshold value.
    ///
    /// # Errors
    ///
    /// Returns [`TemblorError::ThresholdOutOfRange`] for non-finite values
    /// or values outside [`Self::MIN`, `Self::MAX`].
    pub fn try_new(value: f64) -> Result<Self> {
        if value.is_finite() && (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(TemblorError::ThresholdOutOfRange { value })
        }
    }

    /// Returns the inner value.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Returns the threshold one step up, saturating at [`Self::MAX`].
    #[must_use]
    pub fn step_up(self) -> Self {
        Self((self.0 + Self::STEP).min(Self::MAX))
    }

    /// Returns the threshold one step down, saturating at [`Self::MIN`].
    #[must_use]
    pub fn step_down(self) -> Self {
        Self((self.0 - Self::STEP).max(Self::MIN))
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl std::fmt::Display for Threshold {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Returns true iff `sample` triggers an event at `threshold`.
///
/// Strict comparison: a sample exactly equal to the threshold does not
/// trigger. Non-finite samples never trigger; NaN already compares false
/// under IEEE rules and infinities are excluded so the rule is uniform.
#[inline]
#[must_use]
pub fn triggers(sample: f64, threshold: Threshold) -> bool {
    sample.is_finite() && sample > threshold.value()
}

// ============================================================================
// Tests
// ============================================================================


// ============================================================================
// Property-based tests with proptest
// ============================================================================
