//! The append-only event ledger.
//!
//! Every detected threshold crossing becomes a [`SeismicEvent`] stamped with
//! the tick at which it fired. The ledger is the system of record: counts,
//! classification, and CSV export all read from here. It only ever grows,
//! except for an explicit reset.

use crate::classify::{ClassificationBins, Tier};

/// A detected threshold-crossing occurrence.
///
/// Immutable once appended, except for `tier`, which transitions from
/// `None` to `Some` exactly once during a classification pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeismicEvent {
    /// Absolute tick index (0-based, counted from start or the last reset)
    /// at which detection occurred. Strictly increasing across the ledger;
    /// window positions are ephemeral, this stamp is the stable identity.
    pub time_step: u64,
    /// The triggering sample's amplitude.
    pub amplitude: f64,
    /// Severity tier; `None` until a classification pass runs.
    pub tier: Option<Tier>,
}

/// Ordered, append-only sequence of every event since the last reset.
///
/// Insertion order equals detection order equals ascending `time_step`.
#[derive(Debug, Clone, Default)]
pub struct EventLedger {
    events: Vec<SeismicEvent>,
}

impl EventLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a detection at the given tick, unclassified.
    ///
    /// The controller stamps events with its tick counter; stamps must be
    /// strictly increasing within a run (at most one event per tick).
    pub fn append(&mut self, time_step: u64, amplitude: f64) -> &SeismicEvent {
        if let Some(last) = self.events.last() {
            debug_assert!(
                time_step > last.time_step,
                "event stamps must be strictly monotonic: {} after {}",
                time_step,
                last.time_step
            );
        }
        self.events.push(SeismicEvent { time_step, amplitude, tier: None });
        // Just pushed, so the vec is non-empty.
        &self.events[self.events.len() - 1]
    }

    /// Classifies every event that does not have a tier yet.
    ///
    /// Already-assigned tiers are never overwritten, even by a later pass
    /// with a different table: the first classification is the one kept.
    /// Calling this repeatedly is idempotent.
    pub fn classify_all(&mut self, bins: &ClassificationBins) {
        for event in &mut self.events {
            if event.tier.is_none() {
                event.tier = Some(bins.classify(event.amplitude));
            }
        }
    }

    /// Empties the ledger. Stamp monotonicity restarts with the caller's
    /// tick counter, which the controller zeroes in the same reset.
    pub fn reset(&mut self) {
        self.events.clear();
    }

    /// Returns the number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns true if no events have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Returns all events in detection order.
    #[must_use]
    pub fn events(&self) -> &[SeismicEvent] {
        &self.events
    }

    /// Iterates over events in detection order.
    pub fn iter(&self) -> impl Iterator<Item = &SeismicEvent> {
        self.events.iter()
    }

    /// Returns the most recent event, if any.
    #[must_use]
    pub fn latest(&self) -> Option<&SeismicEvent> {
        self.events.last()
    }

    /// Returns how many events carry a tier.
    #[must_use]
    pub fn classified_count(&self) -> usize {
        self.events.iter().filter(|e| e.tier.is_some()).count()
    }

    /// Returns classified-event counts as [low, medium, high].
    #[must_use]
    pub fn tier_counts(&self) -> [usize; 3] {
        let mut counts = [0usize; 3];
        for event in &self.events {
            match event.tier {
                Some(Tier::Low) => counts[0] += 1,
                Some(Tier::Medium) => counts[1] += 1,
                Some(Tier::High) => counts[2] += 1,
                None => {}
            }
        }
        counts
    }

    /// Lazy, restartable projection of the ledger for export encoders.
    ///
    /// Yields `(time_step, amplitude, tier)` in ascending stamp order.
    /// Read-only; safe to call any number of times.
    pub fn export_rows(&self) -> impl Iterator<Item = (u64, f64, Option<Tier>)> + '_ {
        self.events.iter().map(|e| (e.time_step, e.amplitude, e.tier))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_ledger_is_empty() {
        let ledger = EventLedger::new();

        assert!(ledger.is_empty());
        assert_eq!(ledger.len(), 0);
        assert_eq!(ledger.latest(), None);
    }

    #[test]
    fn test_append_records_stamp_and_amplitude() {
        let mut ledger = EventLedger::new();

        let event = ledger.append(2, 0.6);
        assert_eq!(event.time_step, 2);
        assert_eq!(event.amplitude, 0.6);
        assert_eq!(event.tier, None);

        ledger.append(4, 0.95);
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.latest().map(|e| e.time_step), Some(4));
    }

    #[test]
    fn test_stamps_preserved_in_order() {
        let mut ledger = EventLedger::new();

        for step in [0, 3, 7, 8, 100] {
            ledger.append(step, 0.5);
        }

        let stamps: Vec<u64> = ledger.iter().map(|e| e.time_step).collect();
        assert_eq!(stamps, vec![0, 3, 7, 8, 100]);
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "strictly monotonic")]
    fn test_append_rejects_non_monotonic_stamp() {
        let mut ledger = EventLedger::new();
        ledger.append(5, 0.6);
        ledger.append(5, 0.7);
    }

    #[test]
    fn test_classify_all_fills_missing_tiers() {
        let mut ledger = EventLedger::new();
        ledger.append(2, 0.6);
        ledger.append(4, 0.95);

        ledger.classify_all(&ClassificationBins::default());

        let tiers: Vec<Option<Tier>> = ledger.iter().map(|e| e.tier).collect();
        assert_eq!(tiers, vec![Some(Tier::Medium), Some(Tier::High)]);
        assert_eq!(ledger.classified_count(), 2);
    }

    #[test]
    fn test_classify_all_is_idempotent() {
        let mut ledger = EventLedger::new();
        ledger.append(0, 0.45);

        let bins = ClassificationBins::default();
        ledger.classify_all(&bins);
        let first: Vec<Option<Tier>> = ledger.iter().map(|e| e.tier).collect();

        ledger.classify_all(&bins);
        let second: Vec<Option<Tier>> = ledger.iter().map(|e| e.tier).collect();

        assert_eq!(first, second);
    }

    #[test]
    fn test_classify_all_never_overwrites_existing_tiers() {
        let mut ledger = EventLedger::new();
        ledger.append(0, 0.6);
        ledger.classify_all(&ClassificationBins::default());
        assert_eq!(ledger.events()[0].tier, Some(Tier::Medium));

        // A second pass with a different table classifies only the new event.
        let coarse = ClassificationBins::new(vec![(f64::INFINITY, Tier::High)]).unwrap();
        ledger.append(1, 0.6);
        ledger.classify_all(&coarse);

        assert_eq!(ledger.events()[0].tier, Some(Tier::Medium), "first tier must survive");
        assert_eq!(ledger.events()[1].tier, Some(Tier::High));
    }

    #[test]
    fn test_partial_classification_counts() {
        let mut ledger = EventLedger::new();
        ledger.append(0, 0.3);
        ledger.classify_all(&ClassificationBins::default());
        ledger.append(1, 0.6);

        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.classified_count(), 1);
    }

    #[test]
    fn test_tier_counts() {
        let mut ledger = EventLedger::new();
        ledger.append(0, 0.45);
        ledger.append(1, 0.6);
        ledger.append(2, 0.7);
        ledger.append(3, 1.1);
        ledger.classify_all(&ClassificationBins::default());

        assert_eq!(ledger.tier_counts(), [1, 2, 1]);
    }

    #[test]
    fn test_tier_counts_skip_unclassified() {
        let mut ledger = EventLedger::new();
        ledger.append(0, 0.45);

        assert_eq!(ledger.tier_counts(), [0, 0, 0]);
    }

    #[test]
    fn test_reset_empties_ledger() {
        let mut ledger = EventLedger::new();
        ledger.append(0, 0.6);
        ledger.append(1, 0.7);

        ledger.reset();

        assert!(ledger.is_empty());
        assert_eq!(ledger.export_rows().count(), 0);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut ledger = EventLedger::new();
        ledger.append(0, 0.6);

        ledger.reset();
        ledger.reset();

        assert!(ledger.is_empty());
        // A fresh run may legally reuse stamp 0.
        ledger.append(0, 0.8);
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_export_rows_projection() {
        let mut ledger = EventLedger::new();
        ledger.append(2, 0.6);
        ledger.append(4, 0.95);
        ledger.classify_all(&ClassificationBins::default());

        let rows: Vec<_> = ledger.export_rows().collect();
        assert_eq!(
            rows,
            vec![(2, 0.6, Some(Tier::Medium)), (4, 0.95, Some(Tier::High))]
        );
    }

    #[test]
    fn test_export_rows_is_restartable() {
        let mut ledger = EventLedger::new();
        ledger.append(0, 0.5);

        let first: Vec<_> = ledger.export_rows().collect();
        let second: Vec<_> = ledger.export_rows().collect();
        assert_eq!(first, second);
    }
}

// ============================================================================
// Property-based tests with proptest
// ============================================================================
