//! Error types for the detection pipeline and monitor.
//!
//! One taxonomy covers the whole crate: fatal configuration errors caught
//! before the first tick, recoverable source failures that halt the cadence,
//! and rejected commands that leave state untouched.

use std::io;
use thiserror::Error;

/// Error type for all temblor operations.
#[derive(Debug, Error)]
pub enum TemblorError {
    /// Classification bins failed startup validation.
    ///
    /// Fatal: the controller refuses to construct, so no tick ever runs
    /// against a broken tier table.
    #[error("invalid classification bins: {message}")]
    InvalidBins {
        /// What the validation pass found wrong.
        message: String,
    },

    /// The sample source has no more samples to produce.
    ///
    /// The field is `name`, not `source`: thiserror wires a field named
    /// `source` into `Error::source()`, which expects a nested error.
    #[error("sample source '{name}' is exhausted")]
    SourceExhausted {
        /// The source that ran dry.
        name: &'static str,
    },

    /// The sample source failed to produce a sample.
    #[error("sample source '{name}' failed: {message}")]
    SourceFailed {
        /// The source that failed.
        name: &'static str,
        /// Error message describing the failure.
        message: String,
    },

    /// A threshold command carried a value outside the accepted range.
    ///
    /// Rejected, never clamped; the current threshold stays in effect.
    #[error("threshold {value} is outside the accepted range [0.1, 1.0]")]
    ThresholdOutOfRange {
        /// The rejected value.
        value: f64,
    },

    /// A tick was requested while the controller is idle.
    #[error("controller is idle: no tick cadence is running")]
    NotRunning,

    /// Configuration parsing error with line number.
    #[cfg(feature = "monitor")]
    #[error("configuration error at line {line}: {message}")]
    ConfigParse {
        /// Line number where the error occurred (1-indexed).
        line: usize,
        /// Error message describing the issue.
        message: String,
    },

    /// Invalid configuration value.
    #[cfg(feature = "monitor")]
    #[error("invalid configuration value for '{key}': {message}")]
    ConfigInvalid {
        /// The configuration key with invalid value.
        key: String,
        /// Error message describing why the value is invalid.
        message: String,
    },

    /// Configuration file not found or unreadable.
    #[cfg(feature = "monitor")]
    #[error("configuration file not found: {path}")]
    ConfigNotFound {
        /// Path that could not be read.
        path: String,
    },

    /// CSV export or terminal I/O error.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}

/// Result type alias for temblor operations.
pub type Result<T> = std::result::Result<T, TemblorError>;

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_bins_includes_message() {
        let err = TemblorError::InvalidBins {
            message: "upper bounds must be strictly ascending".to_string(),
        };
        let display = err.to_string();

        assert!(
            display.contains("strictly ascending"),
            "Error should include validation detail: {}",
            display
        );
    }

    #[test]
    fn test_source_exhausted_includes_source_name() {
        let err = TemblorError::SourceExhausted { name: "replay" };
        let display = err.to_string();

        assert!(
            display.contains("replay"),
            "Error should include source name: {}",
            display
        );
    }

    #[test]
    fn test_source_failed_includes_details() {
        let err = TemblorError::SourceFailed {
            name: "synthetic",
            message: "generator state corrupt".to_string(),
        };
        let display = err.to_string();

        assert!(display.contains("synthetic"), "Error should include source: {}", display);
        assert!(
            display.contains("generator state corrupt"),
            "Error should include message: {}",
            display
        );
    }

    #[test]
    fn test_threshold_out_of_range_includes_value_and_bounds() {
        let err = TemblorError::ThresholdOutOfRange { value: 1.5 };
        let display = err.to_string();

        assert!(display.contains("1.5"), "Error should include rejected value: {}", display);
        assert!(display.contains("[0.1, 1.0]"), "Error should include bounds: {}", display);
    }

    #[cfg(feature = "monitor")]
    #[test]
    fn test_config_parse_error_includes_line_number() {
        let err = TemblorError::ConfigParse {
            line: 7,
            message: "invalid value".to_string(),
        };
        let display = err.to_string();

        assert!(display.contains("7"), "Error should include line number: {}", display);
        assert!(display.contains("invalid value"), "Error should include message: {}", display);
    }

    #[cfg(feature = "monitor")]
    #[test]
    fn test_config_invalid_includes_key() {
        let err = TemblorError::ConfigInvalid {
            key: "update_ms".to_string(),
            message: "must be positive".to_string(),
        };
        let display = err.to_string();

        assert!(display.contains("update_ms"), "Error should include key: {}", display);
    }

    #[cfg(feature = "monitor")]
    #[test]
    fn test_config_not_found_includes_path() {
        let err = TemblorError::ConfigNotFound {
            path: "/etc/temblor/config.yaml".to_string(),
        };

        assert!(err.to_string().contains("/etc/temblor/config.yaml"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "no such file");
        let err: TemblorError = io_err.into();

        assert!(matches!(err, TemblorError::Io(_)), "Should convert to Io");
        assert!(err.to_string().contains("no such file"));
    }

    #[test]
    fn test_source_errors_carry_no_cause() {
        use std::error::Error;

        // The source name is display data; it must never be mistaken for a
        // nested error cause.
        let exhausted = TemblorError::SourceExhausted { name: "replay" };
        assert!(exhausted.source().is_none());

        let failed = TemblorError::SourceFailed {
            name: "synthetic",
            message: "generator state corrupt".to_string(),
        };
        assert!(failed.source().is_none());
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TemblorError>();
    }

    #[test]
    fn test_error_debug_format() {
        let err = TemblorError::NotRunning;
        let debug = format!("{:?}", err);
        assert!(debug.contains("NotRunning"));
    }
}
