/// Convenience result type used across the crate.
pub type CoverResult<T> = Result<T, CoverError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Only [`CoverError::Asset`] is expected to reach end users (a missing or
/// undecodable background image). Every other anomaly in the rendering path
/// degrades to a documented default instead of erroring.
#[derive(thiserror::Error, Debug)]
pub enum CoverError {
    /// Invalid user-provided parameter or geometry data.
    #[error("validation error: {0}")]
    Validation(String),

    /// A background asset could not be loaded or decoded.
    #[error("asset error: {0}")]
    Asset(String),

    /// Errors while rasterizing a cover.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing persisted records.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CoverError {
    /// Build a [`CoverError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CoverError::Asset`] value.
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`CoverError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`CoverError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
