/// Crate-wide result alias.
pub type GlyphfieldResult<T> = Result<T, GlyphfieldError>;

/// Errors surfaced at the crate edges (configuration, surfaces, storage, output).
///
/// Runtime animation paths never return these: missing pages, empty text and
/// dropped transitions degrade to "do nothing".
#[derive(thiserror::Error, Debug)]
pub enum GlyphfieldError {
    /// Invalid configuration or argument.
    #[error("validation error: {0}")]
    Validation(String),

    /// Drawing surface could not be created or read back.
    #[error("render error: {0}")]
    Render(String),

    /// Text layout or rasterization failure that is not "empty text".
    #[error("text error: {0}")]
    Text(String),

    /// Preference storage failure.
    #[error("storage error: {0}")]
    Storage(String),

    /// JSON (de)serialization failure.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Anything else, with its source preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GlyphfieldError {
    /// Build a [`GlyphfieldError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`GlyphfieldError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`GlyphfieldError::Text`].
    pub fn text(msg: impl Into<String>) -> Self {
        Self::Text(msg.into())
    }

    /// Build a [`GlyphfieldError::Storage`].
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Build a [`GlyphfieldError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
