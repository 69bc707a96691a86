//! Tick orchestration: the single mutator of the detection pipeline.
//!
//! The [`Controller`] owns the source, window, ledger, and threshold, and
//! advances them one tick at a time. It is plain owned state driven by one
//! host loop; commands and ticks execute on the same thread, so no two
//! ticks can ever interleave. Renderers get owned [`TraceSnapshot`]s,
//! never references into live state.

use std::time::Duration;

use crate::classify::ClassificationBins;
use crate::detect::{self, Threshold};
use crate::error::{Result, TemblorError};
use crate::ledger::{EventLedger, SeismicEvent};
use crate::source::BoxedSource;
use crate::window::SlidingWindow;

/// Whether the tick cadence is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// No ticks fire; commands are still accepted.
    Idle,
    /// The host loop drives one tick per cadence interval.
    Running,
}

impl RunState {
    /// Returns the state label as a static string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            RunState::Idle => "IDLE",
            RunState::Running => "RUNNING",
        }
    }
}

impl std::fmt::Display for RunState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Construction parameters for a [`Controller`].
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    /// Sliding-window capacity in samples.
    pub window_capacity: usize,
    /// Starting detection threshold; must lie in the accepted range.
    pub threshold: f64,
    /// Cadence period the host loop should tick at.
    pub tick_interval: Duration,
    /// Severity table used by classification passes.
    pub bins: ClassificationBins,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            window_capacity: SlidingWindow::<f64>::DEFAULT_CAPACITY,
            threshold: Threshold::DEFAULT,
            tick_interval: Duration::from_millis(30),
            bins: ClassificationBins::default(),
        }
    }
}

/// What one tick did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    /// The tick index this report describes.
    pub time_step: u64,
    /// The sample pulled from the source.
    pub sample: f64,
    /// The event appended this tick, if the sample triggered.
    pub event: Option<SeismicEvent>,
}

/// Owned, consistent view of the pipeline for rendering and export.
///
/// Taken between ticks; later mutation cannot show through it.
#[derive(Debug, Clone)]
pub struct TraceSnapshot {
    /// Window contents, oldest first.
    pub window_samples: Vec<f64>,
    /// All ledger events in detection order.
    pub events: Vec<SeismicEvent>,
    /// The window's fixed capacity (for horizontal scaling).
    pub window_capacity: usize,
    /// Threshold in effect when the snapshot was taken.
    pub threshold: f64,
    /// Cadence state when the snapshot was taken.
    pub state: RunState,
    /// Ticks elapsed since start or the last reset.
    pub ticks: u64,
}

/// Orchestrates the per-tick pull, push, detect, append flow.
pub struct Controller {
    source: BoxedSource,
    window: SlidingWindow<f64>,
    ledger: EventLedger,
    threshold: Threshold,
    bins: ClassificationBins,
    state: RunState,
    ticks: u64,
    interval: Duration,
}

impl Controller {
    /// Builds a controller with an empty window and ledger, in `Idle`.
    ///
    /// The severity table in `settings` is already validated by
    /// construction; the starting threshold is checked here so a bad
    /// configuration fails before any tick can run.
    ///
    /// # Errors
    ///
    /// Returns [`TemblorError::ThresholdOutOfRange`] when the starting
    /// threshold lies outside the accepted range.
    ///
    /// # Panics
    ///
    /// Panics if `settings.window_capacity` is 0.
    pub fn new(source: BoxedSource, settings: PipelineSettings) -> Result<Self> {
        let threshold = Threshold::try_new(settings.threshold)?;
        crate::info!("controller", "pipeline constructed");
        Ok(Self {
            source,
            window: SlidingWindow::new(settings.window_capacity),
            ledger: EventLedger::new(),
            threshold,
            bins: settings.bins,
            state: RunState::Idle,
            ticks: 0,
            interval: settings.tick_interval,
        })
    }

    /// Starts the tick cadence. No-op when already running.
    pub fn start(&mut self) {
        if self.state == RunState::Idle {
            self.state = RunState::Running;
            crate::info!("controller", "cadence started");
        }
    }

    /// Halts the tick cadence. No-op when already idle.
    ///
    /// The host loop checks [`Self::is_running`] before every tick, so no
    /// further ticks fire after this returns; a tick already executing on
    /// this thread has necessarily finished first.
    pub fn stop(&mut self) {
        if self.state == RunState::Running {
            self.state = RunState::Idle;
            crate::info!("controller", "cadence stopped");
        }
    }

    /// Clears window, ledger, and tick counter, halting the cadence.
    ///
    /// Legal in any state. The halt and the clear happen in this one
    /// synchronous call, so no tick can observe half-reset state. The
    /// source rewinds too; a deterministic source then replays its trace.
    pub fn reset(&mut self) {
        self.state = RunState::Idle;
        self.window.clear();
        self.ledger.reset();
        self.ticks = 0;
        self.source.reset();
        crate::info!("controller", "pipeline reset");
    }

    /// Replaces the detection threshold, effective from the next tick.
    ///
    /// Legal in any state. Past ledger entries are never re-evaluated.
    ///
    /// # Errors
    ///
    /// Returns [`TemblorError::ThresholdOutOfRange`] for values outside the
    /// accepted range; the current threshold then stays in effect.
    pub fn set_threshold(&mut self, value: f64) -> Result<()> {
        self.threshold = Threshold::try_new(value)?;
        crate::debug!("controller", "threshold set to {value:.2}");
        Ok(())
    }

    /// Raises the threshold by one step, saturating at the upper bound.
    pub fn step_threshold_up(&mut self) {
        self.threshold = self.threshold.step_up();
    }

    /// Lowers the threshold by one step, saturating at the lower bound.
    pub fn step_threshold_down(&mut self) {
        self.threshold = self.threshold.step_down();
    }

    /// Runs one classification pass over the ledger.
    ///
    /// Events already carrying a tier keep it; see
    /// [`EventLedger::classify_all`].
    pub fn classify_all(&mut self) {
        self.ledger.classify_all(&self.bins);
        crate::debug!(
            "controller",
            "classification pass: {}/{} events classified",
            self.ledger.classified_count(),
            self.ledger.len()
        );
    }

    /// Executes exactly one tick: pull, push, detect, append.
    ///
    /// The sample is pulled before any state mutates, so a source failure
    /// leaves window and ledger exactly as they were; the controller then
    /// drops to `Idle` and surfaces the error. The tick counter advances on
    /// every successful tick, event or not.
    ///
    /// # Errors
    ///
    /// Returns [`TemblorError::NotRunning`] when called while idle, or the
    /// source's error after a failed pull (with the cadence halted).
    pub fn tick(&mut self) -> Result<TickReport> {
        if self.state != RunState::Running {
            return Err(TemblorError::NotRunning);
        }

        let sample = match self.source.next_sample() {
            Ok(sample) => sample,
            Err(err) => {
                self.state = RunState::Idle;
                crate::warn!("controller", "source failed, halting: {err}");
                return Err(err);
            }
        };

        let time_step = self.ticks;
        crate::trace!("controller", "tick {time_step}: sample {sample:.3}");
        self.window.push(sample);
        let event = if detect::triggers(sample, self.threshold) {
            let event = *self.ledger.append(time_step, sample);
            crate::debug!("controller", "event at tick {time_step}: amplitude {:.3}", sample);
            Some(event)
        } else {
            None
        };
        self.ticks += 1;

        Ok(TickReport { time_step, sample, event })
    }

    /// Takes an owned, consistent snapshot for rendering or export.
    #[must_use]
    pub fn snapshot(&self) -> TraceSnapshot {
        TraceSnapshot {
            window_samples: self.window.snapshot(),
            events: self.ledger.events().to_vec(),
            window_capacity: self.window.capacity(),
            threshold: self.threshold.value(),
            state: self.state,
            ticks: self.ticks,
        }
    }

    /// Current cadence state.
    #[must_use]
    pub fn state(&self) -> RunState {
        self.state
    }

    /// True while the cadence is active.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    /// Threshold currently in effect.
    #[must_use]
    pub fn threshold(&self) -> Threshold {
        self.threshold
    }

    /// Ticks elapsed since start or the last reset.
    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Cadence period the host loop should honor.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Read access to the ledger.
    #[must_use]
    pub fn ledger(&self) -> &EventLedger {
        &self.ledger
    }

    /// Read access to the window.
    #[must_use]
    pub fn window(&self) -> &SlidingWindow<f64> {
        &self.window
    }

    /// Display name of the attached source.
    #[must_use]
    pub fn source_name(&self) -> &'static str {
        self.source.display_name()
    }
}

impl std::fmt::Debug for Controller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Controller")
            .field("source", &self.source.id())
            .field("state", &self.state)
            .field("ticks", &self.ticks)
            .field("threshold", &self.threshold)
            .field("window_len", &self.window.len())
            .field("events", &self.ledger.len())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================


// ============================================================================
// Property-based tests with proptest
// ============================================================================
