//! Theme system for the terminal monitor.
//!
//! Colors for the waveform, the threshold ruler, and the three severity
//! tiers. Tier colors are stable identities (green/orange/red) so an event's
//! severity reads the same in the waveform markers and the event table.

use crate::classify::Tier;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// A color gradient with 2-3 stops.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gradient {
    /// Gradient color stops as hex strings.
    pub stops: Vec<String>,
}

impl Gradient {
    /// Creates a two-color gradient.
    #[must_use]
    pub fn two(start: &str, end: &str) -> Self {
        Self { stops: vec![start.to_string(), end.to_string()] }
    }

    /// Creates a three-color gradient.
    #[must_use]
    pub fn three(start: &str, mid: &str, end: &str) -> Self {
        Self {
            stops: vec![start.to_string(), mid.to_string(), end.to_string()],
        }
    }

    /// Samples the gradient at position t (0.0 - 1.0).
    #[must_use]
    pub fn sample(&self, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);

        if self.stops.is_empty() {
            return Color::White;
        }

        if self.stops.len() == 1 {
            return parse_color(&self.stops[0]);
        }

        let segment_count = self.stops.len() - 1;
        let segment_size = 1.0 / segment_count as f64;
        let segment = ((t / segment_size) as usize).min(segment_count - 1);
        let local_t = (t - segment as f64 * segment_size) / segment_size;

        let start = parse_color(&self.stops[segment]);
        let end = parse_color(&self.stops[segment + 1]);

        interpolate_color(start, end, local_t)
    }
}

impl Default for Gradient {
    /// Quiet teal through amber to alarm red, matching the tier ordering.
    fn default() -> Self {
        Self::three("#2ac3de", "#e0af68", "#f7768e")
    }
}

/// Theme configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    /// Theme name.
    #[serde(default = "default_name")]
    pub name: String,

    /// Background color.
    #[serde(default = "default_background")]
    pub background: String,

    /// Foreground color.
    #[serde(default = "default_foreground")]
    pub foreground: String,

    /// Waveform amplitude gradient (quiet to loud).
    #[serde(default)]
    pub waveform: Gradient,

    /// Threshold ruler color.
    #[serde(default = "default_threshold_color")]
    pub threshold: String,

    /// Low-tier color.
    #[serde(default = "default_tier_low")]
    pub tier_low: String,

    /// Medium-tier color.
    #[serde(default = "default_tier_medium")]
    pub tier_medium: String,

    /// High-tier color.
    #[serde(default = "default_tier_high")]
    pub tier_high: String,
}

fn default_name() -> String {
    "default".to_string()
}
fn default_background() -> String {
    "#1a1b26".to_string()
}
fn default_foreground() -> String {
    "#c0caf5".to_string()
}
fn default_threshold_color() -> String {
    "#e0af68".to_string()
}
fn default_tier_low() -> String {
    "#9ece6a".to_string()
}
fn default_tier_medium() -> String {
    "#ff9e64".to_string()
}
fn default_tier_high() -> String {
    "#f7768e".to_string()
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            name: default_name(),
            background: default_background(),
            foreground: default_foreground(),
            waveform: Gradient::default(),
            threshold: default_threshold_color(),
            tier_low: default_tier_low(),
            tier_medium: default_tier_medium(),
            tier_high: default_tier_high(),
        }
    }
}

impl Theme {
    /// Creates a new default theme.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a built-in palette by name.
    ///
    /// Unknown names fall back to the default palette so a stale config
    /// file never blocks startup.
    #[must_use]
    pub fn named(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            _ => Self::default(),
        }
    }

    /// Light palette for bright terminals. Tier identities stay
    /// green/orange/red, darkened for contrast on a pale background.
    #[must_use]
    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            background: "#e1e2e7".to_string(),
            foreground: "#3760bf".to_string(),
            waveform: Gradient::three("#007197", "#8c6c3e", "#f52a65"),
            threshold: "#8c6c3e".to_string(),
            tier_low: "#587539".to_string(),
            tier_medium: "#b15c00".to_string(),
            tier_high: "#f52a65".to_string(),
        }
    }

    /// Returns the background color.
    #[must_use]
    pub fn bg(&self) -> Color {
        parse_color(&self.background)
    }

    /// Returns the foreground color.
    #[must_use]
    pub fn fg(&self) -> Color {
        parse_color(&self.foreground)
    }

    /// Returns the threshold ruler color.
    #[must_use]
    pub fn threshold_color(&self) -> Color {
        parse_color(&self.threshold)
    }

    /// Returns the stable color of a severity tier.
    #[must_use]
    pub fn tier_color(&self, tier: Tier) -> Color {
        match tier {
            Tier::Low => parse_color(&self.tier_low),
            Tier::Medium => parse_color(&self.tier_medium),
            Tier::High => parse_color(&self.tier_high),
        }
    }
}

/// Parses a hex color string to a ratatui Color.
fn parse_color(hex: &str) -> Color {
    let hex = hex.trim_start_matches('#');

    if hex.len() != 6 {
        return Color::White;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
    let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
    let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

    Color::Rgb(r, g, b)
}

/// Interpolates between two colors.
fn interpolate_color(start: Color, end: Color, t: f64) -> Color {
    let (r1, g1, b1) = color_to_rgb(start);
    let (r2, g2, b2) = color_to_rgb(end);

    let r = ((1.0 - t) * f64::from(r1) + t * f64::from(r2)) as u8;
    let g = ((1.0 - t) * f64::from(g1) + t * f64::from(g2)) as u8;
    let b = ((1.0 - t) * f64::from(b1) + t * f64::from(b2)) as u8;

    Color::Rgb(r, g, b)
}

/// Extracts RGB values from a Color.
fn color_to_rgb(color: Color) -> (u8, u8, u8) {
    match color {
        Color::Rgb(r, g, b) => (r, g, b),
        _ => (255, 255, 255),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("#FF0000"), Color::Rgb(255, 0, 0));
        assert_eq!(parse_color("#00FF00"), Color::Rgb(0, 255, 0));
        assert_eq!(parse_color("#0000FF"), Color::Rgb(0, 0, 255));
    }

    #[test]
    fn test_parse_color_malformed_falls_back_to_white() {
        assert_eq!(parse_color("#FFF"), Color::White);
        assert_eq!(parse_color("not-a-color"), Color::White);
    }

    #[test]
    fn test_gradient_sample() {
        let gradient = Gradient::two("#000000", "#FFFFFF");

        assert_eq!(gradient.sample(0.0), Color::Rgb(0, 0, 0));
        assert_eq!(gradient.sample(1.0), Color::Rgb(255, 255, 255));

        if let Color::Rgb(r, _, _) = gradient.sample(0.5) {
            assert!((i32::from(r) - 127).abs() <= 1);
        }
    }

    #[test]
    fn test_gradient_three_stops() {
        let gradient = Gradient::three("#FF0000", "#00FF00", "#0000FF");

        assert_eq!(gradient.sample(0.0), Color::Rgb(255, 0, 0));
        assert_eq!(gradient.sample(0.5), Color::Rgb(0, 255, 0));
        assert_eq!(gradient.sample(1.0), Color::Rgb(0, 0, 255));
    }

    #[test]
    fn test_gradient_sample_clamps() {
        let gradient = Gradient::two("#000000", "#FFFFFF");

        assert_eq!(gradient.sample(-1.0), gradient.sample(0.0));
        assert_eq!(gradient.sample(2.0), gradient.sample(1.0));
    }

    #[test]
    fn test_theme_default() {
        let theme = Theme::new();
        assert_eq!(theme.name, "default");
    }

    #[test]
    fn test_theme_colors() {
        let theme = Theme::new();

        assert!(matches!(theme.bg(), Color::Rgb(_, _, _)));
        assert!(matches!(theme.fg(), Color::Rgb(_, _, _)));
        assert!(matches!(theme.threshold_color(), Color::Rgb(_, _, _)));
    }

    #[test]
    fn test_named_lookup() {
        assert_eq!(Theme::named("default").name, "default");
        assert_eq!(Theme::named("light").name, "light");
    }

    #[test]
    fn test_named_unknown_falls_back_to_default() {
        let theme = Theme::named("no-such-palette");
        assert_eq!(theme.name, "default");
    }

    #[test]
    fn test_light_palette_keeps_tier_identities_distinct() {
        let theme = Theme::light();

        assert_ne!(theme.tier_color(Tier::Low), theme.tier_color(Tier::Medium));
        assert_ne!(theme.tier_color(Tier::Medium), theme.tier_color(Tier::High));
    }

    #[test]
    fn test_tier_colors_are_distinct() {
        let theme = Theme::new();

        let low = theme.tier_color(Tier::Low);
        let medium = theme.tier_color(Tier::Medium);
        let high = theme.tier_color(Tier::High);

        assert_ne!(low, medium);
        assert_ne!(medium, high);
        assert_ne!(low, high);
    }

    #[test]
    fn test_theme_round_trips_through_yaml() {
        let theme = Theme::new();
        let yaml = serde_yaml_ng::to_string(&theme).unwrap();
        let parsed: Theme = serde_yaml_ng::from_str(&yaml).unwrap();

        assert_eq!(parsed.name, theme.name);
        assert_eq!(parsed.tier_high, theme.tier_high);
    }
}
