//! # Temblor
//!
//! Streaming microseismic event detection: a bounded waveform window, a
//! strict threshold detector, severity-tier classification, and an
//! append-only event ledger, driven one tick at a time by a single
//! controller.
//!
//! The detection core is UI-free and fully deterministic given a
//! deterministic source. A feature-gated terminal monitor (`monitor`)
//! renders the live waveform and event table on top of it.
//!
//! ## Quick Start
//!
//! ```rust
//! use temblor::{Controller, PipelineSettings, ReplaySource};
//!
//! let trace = [0.05, 0.05, 0.6, 0.05, 0.95];
//! let mut controller = Controller::new(
//!     Box::new(ReplaySource::from_slice(&trace)),
//!     PipelineSettings::default(),
//! )?;
//!
//! controller.start();
//! for _ in 0..trace.len() {
//!     controller.tick()?;
//! }
//! controller.classify_all();
//!
//! assert_eq!(controller.ledger().len(), 2); // 0.6 and 0.95 crossed 0.4
//! # Ok::<(), temblor::TemblorError>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `monitor`: ratatui/crossterm terminal monitor with YAML configuration
//!   and the `temblor-monitor` binary

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code (Cloudflare incident 2025-11-18)
#![cfg_attr(test, allow(clippy::unwrap_used))]
// Allow common patterns in terminal scaling math
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::module_name_repetitions)]

// ============================================================================
// Detection Core
// ============================================================================

/// Bounded sliding window of recent samples.
pub mod window;

/// Sample sources: the acquisition trait, the synthetic generator, replay.
pub mod source;

/// Threshold configuration and the trigger predicate.
pub mod detect;

/// Severity tiers and classification bins.
pub mod classify;

/// The append-only event ledger.
pub mod ledger;

/// Tick orchestration and snapshots.
pub mod controller;

/// CSV export of the event ledger.
pub mod export;

// ============================================================================
// Ambient Modules
// ============================================================================

/// Error types for temblor operations.
pub mod error;

/// Env-gated stderr diagnostics.
pub mod debug;

// ============================================================================
// Terminal Monitor (Feature-Gated)
// ============================================================================

/// YAML configuration for the monitor.
#[cfg(feature = "monitor")]
#[cfg_attr(docsrs, doc(cfg(feature = "monitor")))]
pub mod config;

/// Tier palette and waveform gradient.
#[cfg(feature = "monitor")]
#[cfg_attr(docsrs, doc(cfg(feature = "monitor")))]
pub mod theme;

/// Key to command mapping.
#[cfg(feature = "monitor")]
#[cfg_attr(docsrs, doc(cfg(feature = "monitor")))]
pub mod input;

/// Ratatui widgets for the waveform display.
#[cfg(feature = "monitor")]
#[cfg_attr(docsrs, doc(cfg(feature = "monitor")))]
pub mod widgets;

/// The terminal event loop.
#[cfg(feature = "monitor")]
#[cfg_attr(docsrs, doc(cfg(feature = "monitor")))]
pub mod app;

// ============================================================================
// Re-exports
// ============================================================================

pub use classify::{ClassificationBins, Tier};
pub use controller::{Controller, PipelineSettings, RunState, TickReport, TraceSnapshot};
pub use detect::{triggers, Threshold};
pub use error::{Result, TemblorError};
pub use export::{export_csv, write_csv, DEFAULT_EXPORT_PATH};
pub use ledger::{EventLedger, SeismicEvent};
pub use source::{BoxedSource, ReplaySource, SampleSource, SyntheticSource};
pub use window::SlidingWindow;

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types for convenient imports.
///
/// ```rust,ignore
/// use temblor::prelude::*;
/// ```
pub mod prelude {
    pub use crate::classify::{ClassificationBins, Tier};
    pub use crate::controller::{Controller, PipelineSettings, RunState, TraceSnapshot};
    pub use crate::detect::Threshold;
    pub use crate::error::{Result, TemblorError};
    pub use crate::export::export_csv;
    pub use crate::ledger::{EventLedger, SeismicEvent};
    pub use crate::source::{BoxedSource, ReplaySource, SampleSource, SyntheticSource};
    pub use crate::window::SlidingWindow;
}

// ============================================================================
// Tests
// ============================================================================
