//! Live waveform widget.
//!
//! Renders the sliding window as one column per sample using the 8-level
//! Unicode block ramp (▁▂▃▄▅▆▇█), right-aligned so the latest sample sits
//! at the right edge. A dashed ruler marks the detection threshold, and
//! columns strictly above it render in the spike color.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::Widget;

/// Amplitude mapped to the top of the panel.
///
/// Matches the synthetic source's ceiling (noise floor + spike), so a
/// maximal spike exactly fills the column.
pub const AMPLITUDE_CEILING: f64 = 1.2;

/// The live amplitude trace.
#[derive(Debug, Clone)]
pub struct Waveform<'a> {
    /// Window samples, oldest first.
    samples: &'a [f64],
    /// Detection threshold to draw the ruler at, if any.
    threshold: Option<f64>,
    /// Amplitude mapped to full column height.
    max_amplitude: f64,
    /// Color for columns at or below the threshold.
    color: Color,
    /// Color for columns strictly above the threshold.
    spike_color: Color,
    /// Color of the threshold ruler.
    threshold_color: Color,
}

impl<'a> Waveform<'a> {
    /// Creates a waveform over the given window snapshot.
    #[must_use]
    pub fn new(samples: &'a [f64]) -> Self {
        Self {
            samples,
            threshold: None,
            max_amplitude: AMPLITUDE_CEILING,
            color: Color::Cyan,
            spike_color: Color::Red,
            threshold_color: Color::Yellow,
        }
    }

    /// Draws a dashed ruler at the given threshold amplitude.
    #[must_use]
    pub fn threshold(mut self, threshold: f64) -> Self {
        self.threshold = Some(threshold);
        self
    }

    /// Sets the amplitude mapped to full column height.
    #[must_use]
    pub fn max_amplitude(mut self, max: f64) -> Self {
        if max > 0.0 {
            self.max_amplitude = max;
        }
        self
    }

    /// Sets the base trace color.
    #[must_use]
    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Sets the color for above-threshold columns.
    #[must_use]
    pub fn spike_color(mut self, color: Color) -> Self {
        self.spike_color = color;
        self
    }

    /// Sets the threshold ruler color.
    #[must_use]
    pub fn threshold_color(mut self, color: Color) -> Self {
        self.threshold_color = color;
        self
    }

    /// Maps an amplitude to [0, 1] of the panel height.
    fn normalize(&self, amplitude: f64) -> f64 {
        if amplitude.is_finite() {
            (amplitude / self.max_amplitude).clamp(0.0, 1.0)
        } else {
            // Non-finite samples pass through the window but draw flat.
            0.0
        }
    }
}

/// 8-level block ramp, shortest first. Index 0 is an empty cell.
const BLOCKS: [char; 9] = [' ', '▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

impl Widget for Waveform<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let height = area.height as usize;

        // Threshold ruler first so columns draw over it.
        if let Some(threshold) = self.threshold {
            let level = self.normalize(threshold);
            let row_from_bottom = ((level * height as f64) as usize).min(height - 1);
            let y = area.y + (height - 1 - row_from_bottom) as u16;
            for x in area.left()..area.right() {
                buf.set_string(x, y, "┄", Style::default().fg(self.threshold_color));
            }
        }

        // Right-align: the last `width` samples, latest at the right edge.
        let width = area.width as usize;
        let visible = if self.samples.len() > width {
            &self.samples[self.samples.len() - width..]
        } else {
            self.samples
        };
        let offset = width - visible.len();

        for (i, &sample) in visible.iter().enumerate() {
            let x = area.x + (offset + i) as u16;
            let above = self
                .threshold
                .is_some_and(|t| sample.is_finite() && sample > t);
            let style = Style::default().fg(if above { self.spike_color } else { self.color });

            // Total fill in eighths of a cell, stacked from the bottom row.
            let eighths = (self.normalize(sample) * (height * 8) as f64).round() as usize;
            let full_rows = eighths / 8;
            let remainder = eighths % 8;

            for row in 0..full_rows.min(height) {
                let y = area.y + (height - 1 - row) as u16;
                buf.set_string(x, y, BLOCKS[8].to_string(), style);
            }
            if remainder > 0 && full_rows < height {
                let y = area.y + (height - 1 - full_rows) as u16;
                buf.set_string(x, y, BLOCKS[remainder].to_string(), style);
            }
        }
    }
}
