//! # imbuf-core
//!
//! Core types for the imbuf image transform engine.
//!
//! - [`ImageBuffer`] - raster with float and/or RGBA byte storage
//! - [`StorageKind`] - which representation an operation runs on
//! - [`CropRect`] - fractional source crop rectangle
//! - [`Error`], [`Result`] - construction and access failures
//!
//! ## Crate Structure
//!
//! ```text
//! imbuf-core (this crate)
//!    ^
//!    |
//!    +-- imbuf-math (vectors, 4x4 matrices)
//!    +-- imbuf-transform (scanline transform engine)
//!    +-- imbuf-texture (mipmaps, texture sampling)
//!    +-- imbuf-cli
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod image;
pub mod rect;

pub use error::{Error, Result};
pub use image::{
    byte_to_unit_float, unit_float_to_byte, widen_to_rgba, ImageBuffer, StorageKind,
    BYTE_CHANNELS, MAX_FLOAT_CHANNELS,
};
pub use rect::CropRect;
