//! Severity classification of detected events.
//!
//! An amplitude maps to a [`Tier`] through an ordered table of upper-bound
//! bins. The table is validated once at startup and fixed for the process
//! lifetime; a malformed table is a fatal configuration error, never a
//! per-classification failure.

use crate::error::{Result, TemblorError};

/// Discrete severity of a detected event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    /// Barely above threshold; routine microseismicity.
    Low,
    /// Noticeable event worth review.
    Medium,
    /// Strong event; the top, unbounded bin.
    High,
}

impl Tier {
    /// All tiers in ascending severity order.
    pub const ALL: [Tier; 3] = [Tier::Low, Tier::Medium, Tier::High];

    /// Returns the tier label as a static string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Low => "Low",
            Tier::Medium => "Medium",
            Tier::High => "High",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered upper-bound bins mapping amplitudes to tiers.
///
/// The first bin whose upper bound strictly exceeds the amplitude wins.
/// The final bin must be unbounded (`f64::INFINITY`) so classification is
/// total over every finite amplitude.
#[derive(Debug, Clone)]
pub struct ClassificationBins {
    bins: Vec<(f64, Tier)>,
}

impl ClassificationBins {
    /// Upper bound of the default Low bin.
    pub const DEFAULT_LOW_CEILING: f64 = 0.5;
    /// Upper bound of the default Medium bin.
    pub const DEFAULT_MEDIUM_CEILING: f64 = 0.9;

    /// Validates and builds a bin table.
    ///
    /// # Errors
    ///
    /// Returns [`TemblorError::InvalidBins`] when the table is empty, the
    /// upper bounds are not strictly ascending, or the final bin is not
    /// unbounded. Callers construct bins once at startup, so this failure
    /// is fatal before any tick runs.
    pub fn new(bins: Vec<(f64, Tier)>) -> Result<Self> {
        let Some(&(last_bound, _)) = bins.last() else {
            return Err(TemblorError::InvalidBins {
                message: "bin table is empty".to_string(),
            });
        };
        if last_bound != f64::INFINITY {
            return Err(TemblorError::InvalidBins {
                message: format!("final bin must be unbounded, found {last_bound}"),
            });
        }
        for pair in bins.windows(2) {
            let (lower, upper) = (pair[0].0, pair[1].0);
            if !(lower < upper) {
                return Err(TemblorError::InvalidBins {
                    message: format!("upper bounds must be strictly ascending, found {lower} before {upper}"),
                });
            }
        }
        Ok(Self { bins })
    }

    /// Maps an amplitude to its tier.
    ///
    /// Total and deterministic: every finite amplitude lands in exactly one
    /// bin. NaN compares false against every bound and falls through to the
    /// terminal bin, keeping the function total there as well.
    #[must_use]
    pub fn classify(&self, amplitude: f64) -> Tier {
        for &(bound, tier) in &self.bins {
            if amplitude < bound {
                return tier;
            }
        }
        self.bins[self.bins.len() - 1].1
    }

    /// Returns the bin table, ascending by upper bound.
    #[must_use]
    pub fn bins(&self) -> &[(f64, Tier)] {
        &self.bins
    }
}

impl Default for ClassificationBins {
    /// The stock severity table: Low below 0.5, Medium below 0.9, High above.
    fn default() -> Self {
        Self {
            bins: vec![
                (Self::DEFAULT_LOW_CEILING, Tier::Low),
                (Self::DEFAULT_MEDIUM_CEILING, Tier::Medium),
                (f64::INFINITY, Tier::High),
            ],
        }
    }
}

// ============================================================================
// Tests
// ============================================================================


// ============================================================================
// Property-based tests with proptest
// ============================================================================
