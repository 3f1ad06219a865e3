//! Error types for imbuf-core operations.
//!
//! Covers the failure modes of constructing and accessing an
//! [`ImageBuffer`](crate::ImageBuffer):
//! - dimension validation (zero sizes, overflowing buffer sizes)
//! - channel-count validation for float and byte storage
//! - data length mismatches when wrapping caller-provided pixels
//! - requests for a storage representation the buffer does not carry
//!
//! # Usage
//!
//! ```rust
//! use imbuf_core::{Error, Result};
//!
//! fn check(x: u32, y: u32, width: u32, height: u32) -> Result<()> {
//!     if x >= width || y >= height {
//!         return Err(Error::out_of_bounds(x, y, width, height));
//!     }
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or accessing image buffers.
#[derive(Debug, Error)]
pub enum Error {
    /// Pixel coordinates are outside image bounds.
    #[error("pixel ({x}, {y}) out of bounds for image {width}x{height}")]
    OutOfBounds {
        /// X coordinate that was out of bounds
        x: u32,
        /// Y coordinate that was out of bounds
        y: u32,
        /// Image width
        width: u32,
        /// Image height
        height: u32,
    },

    /// Invalid image dimensions.
    ///
    /// Returned when width or height is zero, or dimensions would cause
    /// integer overflow in buffer size calculations.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Reason why dimensions are invalid
        reason: String,
    },

    /// Channel count is not valid for the storage it was requested with.
    ///
    /// Float storage accepts 1 to 4 channels, byte storage exactly 4.
    #[error("unsupported channel count {channels} for {storage} storage")]
    InvalidChannels {
        /// Requested channel count
        channels: usize,
        /// Storage name (`float` or `byte`)
        storage: &'static str,
    },

    /// Provided pixel data does not match the declared layout.
    #[error("data length mismatch: expected {expected} elements, got {got}")]
    DataLength {
        /// Expected element count
        expected: usize,
        /// Actual element count
        got: usize,
    },

    /// The buffer does not carry the requested storage representation.
    #[error("image has no {0} storage")]
    MissingStorage(&'static str),

    /// Generic error with custom message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Creates an [`Error::OutOfBounds`] error.
    #[inline]
    pub fn out_of_bounds(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self::OutOfBounds {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::InvalidChannels`] error.
    #[inline]
    pub fn invalid_channels(channels: usize, storage: &'static str) -> Self {
        Self::InvalidChannels { channels, storage }
    }

    /// Creates an [`Error::DataLength`] error.
    #[inline]
    pub fn data_length(expected: usize, got: usize) -> Self {
        Self::DataLength { expected, got }
    }

    /// Creates an [`Error::Other`] error.
    #[inline]
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    /// Returns `true` if this is a bounds-related error.
    #[inline]
    pub fn is_bounds_error(&self) -> bool {
        matches!(self, Self::OutOfBounds { .. })
    }
}
