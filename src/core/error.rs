use thiserror::Error;

/// Errors that can occur while building, rendering, or persisting records.
///
/// `Store` failures happen after computation succeeded and are reported
/// separately from `Validation`/`Builder` failures so callers can tell
/// "your input was wrong" apart from "your data wasn't saved".
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FactureError {
    /// One or more validation rules failed.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Builder encountered invalid or missing configuration.
    #[error("builder error: {0}")]
    Builder(String),

    /// Invoice number sequencing error.
    #[error("numbering error: {0}")]
    Numbering(String),

    /// Document rendering or layout error.
    #[error("render error: {0}")]
    Render(String),

    /// Persistence gateway failure (I/O or encoding).
    #[error("store error: {0}")]
    Store(String),
}

/// A single validation error with field path and message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dot-separated path to the invalid field (e.g. "items[2].unit_price").
    pub field: String,
    /// Human-readable error description.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Join a list of validation errors into a single [`FactureError::Validation`].
pub(crate) fn validation_failure(errors: &[ValidationError]) -> FactureError {
    let msg = errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ");
    FactureError::Validation(msg)
}
