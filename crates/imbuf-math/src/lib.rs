//! # imbuf-math
//!
//! Math utilities for the imbuf transform engine.
//!
//! - [`Mat4`] - 4x4 matrices mapping destination pixels to source pixels
//! - [`Vec2`], [`Vec3`] - coordinate vectors
//! - Interpolation and wrapping helpers ([`lerp`], [`fract`], [`wrap_repeat`])
//!
//! # Design
//!
//! Matrices are stored **row-major** and multiply **column vectors**.
//! [`glam`] provides the heavy lifting (inverse); the wrapper
//! types keep the row-major convention at the API boundary.
//!
//! ```rust
//! use imbuf_math::{Mat4, Vec3};
//!
//! let m = Mat4::translation(0.5, 0.5, 0.0);
//! assert_eq!(m.transform_point(Vec3::ZERO).xy(), imbuf_math::Vec2::new(0.5, 0.5));
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod interp;
mod mat4;
mod vec;

pub use interp::*;
pub use mat4::*;
pub use vec::*;
