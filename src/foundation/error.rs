use std::path::PathBuf;

/// Convenience result type used across depthwire.
pub type DepthwireResult<T> = Result<T, DepthwireError>;

/// Top-level error taxonomy used by pipeline APIs.
#[derive(thiserror::Error, Debug)]
pub enum DepthwireError {
    /// A required input file does not exist.
    #[error("missing input: {what} not found at '{}'", path.display())]
    MissingInput {
        /// Human-readable description of the missing resource.
        what: String,
        /// Path that was probed.
        path: PathBuf,
    },

    /// Input metadata that cannot be used as-is (for example a zero-height image).
    #[error("degenerate input: {0}")]
    DegenerateInput(String),

    /// An operation was invoked before the step it depends on.
    #[error("precursor missing: {0}")]
    PrecursorMissing(String),

    /// Invalid user-provided parameters.
    #[error("validation error: {0}")]
    Validation(String),

    /// Failures inside a render backend.
    #[error("render error: {0}")]
    Render(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DepthwireError {
    /// Build a [`DepthwireError::MissingInput`] value.
    pub fn missing_input(what: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::MissingInput {
            what: what.into(),
            path: path.into(),
        }
    }

    /// Build a [`DepthwireError::DegenerateInput`] value.
    pub fn degenerate_input(msg: impl Into<String>) -> Self {
        Self::DegenerateInput(msg.into())
    }

    /// Build a [`DepthwireError::PrecursorMissing`] value.
    pub fn precursor_missing(msg: impl Into<String>) -> Self {
        Self::PrecursorMissing(msg.into())
    }

    /// Build a [`DepthwireError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`DepthwireError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
