/// Result alias used across the crate.
pub type HeroResult<T> = Result<T, HeroError>;

/// Error type for mounting, settings and rendering failures.
///
/// Nothing here is fatal to a page: the lifecycle coordinator turns these into
/// warnings and skips the affected feature.
#[derive(thiserror::Error, Debug)]
pub enum HeroError {
    /// Invalid input value.
    #[error("validation error: {0}")]
    Validation(String),

    /// A required element of the host tree is absent.
    #[error("missing host element: {0}")]
    MissingContract(String),

    /// Media playback was rejected by the host.
    #[error("playback error: {0}")]
    Playback(String),

    /// Overlay construction or rasterization failed.
    #[error("overlay error: {0}")]
    Overlay(String),

    /// Settings payload could not be (de)serialized.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped upstream error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl HeroError {
    /// Build a [`HeroError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`HeroError::MissingContract`].
    pub fn missing_contract(msg: impl Into<String>) -> Self {
        Self::MissingContract(msg.into())
    }

    /// Build a [`HeroError::Playback`].
    pub fn playback(msg: impl Into<String>) -> Self {
        Self::Playback(msg.into())
    }

    /// Build a [`HeroError::Overlay`].
    pub fn overlay(msg: impl Into<String>) -> Self {
        Self::Overlay(msg.into())
    }

    /// Build a [`HeroError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
