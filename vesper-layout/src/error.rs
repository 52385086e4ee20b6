//! Layout error types.

use thiserror::Error;

/// Result type for layout operations.
pub type LayoutResult<T> = Result<T, LayoutError>;

/// Errors that can occur while setting up layout backends.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// Font data could not be parsed.
    #[error("Failed to load font '{family}': {reason}")]
    FontLoad {
        /// Font family the data was registered under.
        family: String,
        /// Parser message.
        reason: String,
    },

    /// No font has been registered with a glyph measurer.
    #[error("No fonts registered")]
    NoFonts,

    /// I/O error while reading font files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
