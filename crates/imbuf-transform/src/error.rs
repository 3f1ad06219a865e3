//! Error types for transform operations.

use crate::TransformMode;
use imbuf_core::StorageKind;
use thiserror::Error;

/// Error type for transform operations.
#[derive(Error, Debug)]
pub enum TransformError {
    /// `CropSource` mode was requested without a crop rectangle.
    #[error("crop-source mode requires a source crop rectangle")]
    MissingCropRect,

    /// A crop rectangle was passed for a mode that does not crop.
    #[error("source crop rectangle given for {mode} mode")]
    UnexpectedCropRect {
        /// The requested mode
        mode: TransformMode,
    },

    /// The source/destination channel pairing has no converter.
    #[error("unsupported {storage} channel conversion: {src} -> {dst}")]
    UnsupportedChannelConversion {
        /// Storage the transform would run on
        storage: StorageKind,
        /// Source channels per pixel
        src: usize,
        /// Destination channels per pixel
        dst: usize,
    },

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Image buffer error.
    #[error(transparent)]
    Core(#[from] imbuf_core::Error),
}

/// Result type for transform operations.
pub type TransformResult<T> = Result<T, TransformError>;
