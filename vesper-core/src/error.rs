//! Error types for slide model operations.

use thiserror::Error;

/// Result type for slide operations.
pub type SlideResult<T> = Result<T, SlideError>;

/// Errors that can occur while building, generating, or rendering slides.
#[derive(Debug, Error)]
pub enum SlideError {
    /// Template id is not registered.
    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    /// Theme id is not registered.
    #[error("Theme not found: {0}")]
    ThemeNotFound(String),

    /// A template with the same id is already registered.
    #[error("Template already registered: {0}")]
    DuplicateTemplate(String),

    /// Slide content does not satisfy the template it targets.
    #[error("Invalid content: {0}")]
    InvalidContent(String),

    /// Template declaration is inconsistent.
    #[error("Invalid template: {0}")]
    InvalidTemplate(String),

    /// A render pipeline stage failed.
    #[error("Stage '{stage}' failed: {message}")]
    Stage {
        /// Name of the failing stage.
        stage: String,
        /// Failure description.
        message: String,
    },

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error while loading templates or configuration.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SlideError {
    /// Build a stage failure error.
    pub fn stage(stage: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Stage {
            stage: stage.into(),
            message: message.into(),
        }
    }
}
