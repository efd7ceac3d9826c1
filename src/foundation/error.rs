/// Convenience result type used across collatz-weave.
pub type WeaveResult<T> = Result<T, WeaveError>;

/// Top-level error taxonomy used by the sketch APIs.
#[derive(thiserror::Error, Debug)]
pub enum WeaveError {
    /// Invalid user-provided configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Invalid seed or arithmetic failure while generating a sequence.
    #[error("sequence error: {0}")]
    Sequence(String),

    /// Errors while issuing or rasterizing draw commands.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl WeaveError {
    /// Build a [`WeaveError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`WeaveError::Sequence`] value.
    pub fn sequence(msg: impl Into<String>) -> Self {
        Self::Sequence(msg.into())
    }

    /// Build a [`WeaveError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`WeaveError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for WeaveError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
