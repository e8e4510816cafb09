//! Error types for hexgrid.
//!
//! The layout engine clamps out-of-range positions silently (a shrinking
//! document or a resize mid-scroll are ordinary events), so the only engine
//! error is a rejected configuration. Everything else here belongs to the
//! impure shell: reading input, loading config, driving the terminal.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level application error wrapping all failures
//!   - [`LayoutError`] - Invalid engine configuration (bytes per row, code type, ...)
//!   - [`InputError`] - File/stdin reading failures
//!   - [`crate::config::ConfigError`] - Config file read/parse failures
//!   - `std::io::Error` - Terminal failures

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error.
///
/// Domain-specific errors convert via `From`, so `main` can use `?` throughout.
#[derive(Debug, Error)]
pub enum AppError {
    /// Failed to read input from file or stdin.
    #[error("Failed to read input: {0}")]
    InputRead(#[from] InputError),

    /// Configuration was rejected by the layout engine.
    #[error("Invalid layout configuration: {0}")]
    Layout(#[from] LayoutError),

    /// Configuration file could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Terminal or TUI rendering error.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Configuration rejected before it could reach derived layout state.
///
/// Raised at configuration time only. Steady-state operations (scrolling,
/// caret movement, resizing) clamp instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// A configuration value is outside its valid domain.
    ///
    /// # Examples
    ///
    /// ```
    /// use hexgrid::model::error::LayoutError;
    ///
    /// let err = LayoutError::invalid("bytes_per_row", "must be at least 1");
    /// assert!(err.to_string().contains("bytes_per_row"));
    /// ```
    #[error("invalid configuration for {field}: {reason}")]
    InvalidConfiguration {
        /// Name of the offending setting.
        field: &'static str,
        /// Human-readable explanation.
        reason: String,
    },
}

impl LayoutError {
    /// Shorthand for [`LayoutError::InvalidConfiguration`].
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        LayoutError::InvalidConfiguration {
            field,
            reason: reason.into(),
        }
    }
}

/// Errors encountered when reading the document from files or stdin.
#[derive(Debug, Error)]
pub enum InputError {
    /// The specified file does not exist at the given path.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use hexgrid::model::error::InputError;
    ///
    /// let err = InputError::FileNotFound {
    ///     path: PathBuf::from("/tmp/missing.bin")
    /// };
    /// assert!(err.to_string().contains("/tmp/missing.bin"));
    /// ```
    #[error("File not found: {path}")]
    FileNotFound {
        /// The filesystem path that was not found.
        path: PathBuf,
    },

    /// No input source was provided: stdin is a terminal and no file was given.
    #[error("No input source: provide a file path or pipe data to stdin")]
    NoInput,

    /// Generic I/O error reading from the input source.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_error_converts_into_app_error() {
        fn configure() -> Result<(), AppError> {
            Err(LayoutError::invalid("code_type", "unknown"))?;
            Ok(())
        }

        let err = configure().unwrap_err();
        assert!(matches!(err, AppError::Layout(_)));
        assert!(err.to_string().contains("code_type"));
    }

    #[test]
    fn input_error_io_wraps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: InputError = io.into();
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn no_input_message_mentions_stdin() {
        assert!(InputError::NoInput.to_string().contains("stdin"));
    }
}
