/// Convenience result type used across the photobooth crate.
pub type BoothResult<T> = Result<T, BoothError>;

/// Top-level error taxonomy used by library APIs.
#[derive(thiserror::Error, Debug)]
pub enum BoothError {
    /// Invalid layout geometry or compositor configuration. Fatal to the call that raised it.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A photo's raster data could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// The caption collaborator failed or timed out.
    #[error("caption provider error: {0}")]
    CaptionProvider(String),

    /// A composite could not be serialized to a raster encoding.
    #[error("encode error: {0}")]
    Encode(String),

    /// Invalid user-provided data outside of layout geometry (ids, session transitions).
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BoothError {
    /// Build a [`BoothError::Configuration`] value.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build a [`BoothError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`BoothError::CaptionProvider`] value.
    pub fn caption_provider(msg: impl Into<String>) -> Self {
        Self::CaptionProvider(msg.into())
    }

    /// Build a [`BoothError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`BoothError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
