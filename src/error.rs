//! Error types for color extraction

use thiserror::Error;

/// Result type for extraction operations
pub type Result<T> = std::result::Result<T, ExtractError>;

/// Errors that can occur while extracting colors from an image
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The input could not be read or decoded as an image
    #[error("unable to decode image: {0}")]
    Decode(#[from] image::ImageError),

    /// The image decoded but holds no pixels
    #[error("image has no pixels ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },

    /// A caller-supplied argument is out of range
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl ExtractError {
    /// True for failures caused by the image data itself rather than by arguments.
    pub fn is_decode(&self) -> bool {
        matches!(self, ExtractError::Decode(_) | ExtractError::EmptyImage { .. })
    }

    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        ExtractError::InvalidArgument(message.into())
    }
}
