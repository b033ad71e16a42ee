use crate::surface::image::PixelFormat;

/// Convenience result type used across the shadow pipeline.
pub type ShadowResult<T> = Result<T, ShadowError>;

/// Top-level error taxonomy used by pipeline APIs.
#[derive(thiserror::Error, Debug)]
pub enum ShadowError {
    /// Pixel density must be finite and strictly positive.
    #[error("invalid pixel density: {0} (must be finite and > 0)")]
    InvalidDensity(f32),

    /// The pipeline only operates on premultiplied RGBA8 buffers.
    #[error("unsupported pixel format: {0:?} (expected Rgba8Premul)")]
    UnsupportedPixelFormat(PixelFormat),

    /// Malformed buffers or out-of-range values.
    #[error("validation error: {0}")]
    Validation(String),

    /// The filtering backend could not be constructed.
    #[error("backend error: {0}")]
    Backend(String),

    /// Configuration could not be parsed or failed validation.
    #[error("config error: {0}")]
    Config(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ShadowError {
    /// Build a [`ShadowError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ShadowError::Backend`] value.
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }

    /// Build a [`ShadowError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
