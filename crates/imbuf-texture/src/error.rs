//! Error types for texture operations.

use imbuf_transform::TransformError;
use thiserror::Error;

/// Error type for texture operations.
#[derive(Error, Debug)]
pub enum TextureError {
    /// The buffer has neither float nor byte storage.
    #[error("image has no pixel storage")]
    NoStorage,

    /// A destination buffer has the wrong layout.
    #[error("destination must be a 4-channel float buffer, got {channels} channels (float: {has_float})")]
    InvalidDestination {
        /// Destination float channel count
        channels: usize,
        /// Whether float storage is present
        has_float: bool,
    },

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Level 0 conversion failed.
    #[error(transparent)]
    Transform(#[from] TransformError),

    /// Image buffer error.
    #[error(transparent)]
    Core(#[from] imbuf_core::Error),
}

/// Result type for texture operations.
pub type TextureResult<T> = Result<T, TextureError>;
