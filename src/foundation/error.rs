/// Convenience result type used across greenkey.
pub type GreenkeyResult<T> = Result<T, GreenkeyError>;

/// Top-level error taxonomy used by compositor APIs.
///
/// Errors raised inside a render cycle never reach the host: the render loop logs them and
/// skips the cycle. They surface only from constructors, configuration and media decoding.
#[derive(thiserror::Error, Debug)]
pub enum GreenkeyError {
    /// Invalid caller-provided data (buffer sizes, dimensions, options).
    #[error("validation error: {0}")]
    Validation(String),

    /// The video's current frame could not be read (not decoded yet, source error, access
    /// restriction).
    #[error("frame access error: {0}")]
    FrameAccess(String),

    /// Pixel read-back or write-back on a surface failed.
    #[error("surface access error: {0}")]
    SurfaceAccess(String),

    /// Media probing or decoding failed.
    #[error("decode error: {0}")]
    Decode(String),

    /// Configuration could not be loaded or parsed.
    #[error("config error: {0}")]
    Config(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GreenkeyError {
    /// Build a [`GreenkeyError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`GreenkeyError::FrameAccess`] value.
    pub fn frame_access(msg: impl Into<String>) -> Self {
        Self::FrameAccess(msg.into())
    }

    /// Build a [`GreenkeyError::SurfaceAccess`] value.
    pub fn surface_access(msg: impl Into<String>) -> Self {
        Self::SurfaceAccess(msg.into())
    }

    /// Build a [`GreenkeyError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`GreenkeyError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// `true` for the errors a render cycle recovers from locally.
    pub fn is_cycle_recoverable(&self) -> bool {
        matches!(self, Self::FrameAccess(_) | Self::SurfaceAccess(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
