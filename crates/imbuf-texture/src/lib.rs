//! # imbuf-texture
//!
//! Mipmapped texture sampling on top of the imbuf transform engine.
//!
//! - [`MipmapChain`] - box-filtered level chain built from any [`ImageBuffer`](imbuf_core::ImageBuffer)
//! - [`TextureSampler`] - box, trilinear mipmap and anisotropic lookups
//!   with repeat, clip or extend behaviour outside the unit square
//! - [`sample_image`] - texture a whole destination buffer through a matrix
//!
//! Level lookups reuse the bilinear sampler and row fan-out of
//! [`imbuf_transform`].

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod image;
mod mipmap;
mod sampler;

pub use error::{TextureError, TextureResult};
pub use image::sample_image;
pub use mipmap::MipmapChain;
pub use sampler::{Extend, TextureFilter, TextureSampler};
