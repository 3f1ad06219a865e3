//! Transform and filter mode selection.
//!
//! Both enums are fixed for the duration of one transform call; the
//! dispatcher resolves them once into a concrete scanline pipeline.
//!
//! # Example
//!
//! ```rust
//! use imbuf_transform::{Filter, TransformMode};
//!
//! let mode: TransformMode = "wrap-repeat".parse().unwrap();
//! assert_eq!(mode, TransformMode::WrapRepeat);
//! assert_eq!(Filter::Bilinear.to_string(), "bilinear");
//! ```

use crate::TransformError;
use std::fmt;
use std::str::FromStr;

/// Discard and wrap policy of a transform call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TransformMode {
    /// Every destination pixel is written; samples outside the source are
    /// transparent black.
    #[default]
    Regular,
    /// Destination pixels whose source coordinate falls outside the crop
    /// rectangle are left untouched.
    CropSource,
    /// Source coordinates tile the source image in both directions.
    WrapRepeat,
}

impl TransformMode {
    /// All modes, in declaration order.
    pub const ALL: [TransformMode; 3] = [
        TransformMode::Regular,
        TransformMode::CropSource,
        TransformMode::WrapRepeat,
    ];

    /// Canonical lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            TransformMode::Regular => "regular",
            TransformMode::CropSource => "crop-source",
            TransformMode::WrapRepeat => "wrap-repeat",
        }
    }

    /// Returns `true` if the mode needs a source crop rectangle.
    #[inline]
    pub fn needs_crop(&self) -> bool {
        matches!(self, TransformMode::CropSource)
    }
}

impl fmt::Display for TransformMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TransformMode {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "regular" | "none" => Ok(TransformMode::Regular),
            "crop-source" | "crop_source" | "crop" => Ok(TransformMode::CropSource),
            "wrap-repeat" | "wrap_repeat" | "repeat" | "wrap" => Ok(TransformMode::WrapRepeat),
            other => Err(TransformError::InvalidParameter(format!(
                "unknown transform mode '{}'",
                other
            ))),
        }
    }
}

/// Interpolation filter of a transform call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Filter {
    /// Nearest-neighbor (no interpolation).
    #[default]
    Nearest,
    /// Bilinear interpolation of the four surrounding pixel centers.
    Bilinear,
}

impl Filter {
    /// All filters, in declaration order.
    pub const ALL: [Filter; 2] = [Filter::Nearest, Filter::Bilinear];

    /// Canonical lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            Filter::Nearest => "nearest",
            Filter::Bilinear => "bilinear",
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Filter {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nearest" | "point" => Ok(Filter::Nearest),
            "bilinear" | "linear" => Ok(Filter::Bilinear),
            other => Err(TransformError::InvalidParameter(format!(
                "unknown filter '{}'",
                other
            ))),
        }
    }
}
