//! Ratatui widgets for the terminal monitor.
//!
//! - [`Waveform`]: the live amplitude trace with threshold ruler and
//!   above-threshold highlighting
//!
//! All widgets implement the ratatui `Widget` trait for rendering.

pub mod waveform;

pub use waveform::Waveform;
