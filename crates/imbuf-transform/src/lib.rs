//! # imbuf-transform
//!
//! Scanline image transform engine.
//!
//! A 4x4 matrix maps destination pixels to source pixels. Each destination
//! row is produced by one pass of a pipeline assembled from:
//!
//! - a [discard policy](discard) (no discard, or crop to a source rectangle)
//! - a [UV wrap](wrap) (pass-through or repeat; mirrored and edge-clamped wraps serve texture lookups)
//! - a [sampler](sampler) (nearest or bilinear, float or byte storage)
//! - a [channel converter](channels) (1-4 source channels into RGBA)
//!
//! [`transform`] picks one concrete pipeline per call and distributes rows
//! over the rayon pool (feature `parallel`, on by default).
//!
//! ```rust
//! use imbuf_core::ImageBuffer;
//! use imbuf_math::Mat4;
//! use imbuf_transform::{transform, Filter, TransformMode};
//!
//! let src = ImageBuffer::filled_byte(16, 16, [255, 128, 0, 255]).unwrap();
//! let mut dst = ImageBuffer::new_byte(8, 8).unwrap();
//!
//! // Downscale by 2: destination pixel (x, y) reads source (2x, 2y).
//! let m = Mat4::scale(2.0, 2.0, 1.0);
//! transform(&src, &mut dst, TransformMode::Regular, Filter::Bilinear, &m, None).unwrap();
//! assert_eq!(dst.byte_pixel(3, 3), Some(&[255, 128, 0, 255][..]));
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod channels;
pub mod descriptor;
pub mod discard;
pub mod dispatch;
pub mod error;
pub mod mode;
pub mod parallel;
pub mod pixel;
pub mod sampler;
pub mod scanline;
pub mod wrap;

pub use channels::{check_conversion, ChannelConvert, DST_CHANNELS};
pub use descriptor::TransformDescriptor;
pub use discard::{CropSource, Discard, NoDiscard};
pub use dispatch::transform;
pub use error::{TransformError, TransformResult};
pub use mode::{Filter, TransformMode};
pub use parallel::for_each_row;
pub use pixel::{SourceView, Storage};
pub use sampler::{BilinearSampler, NearestSampler, Sampler};
pub use scanline::process_scanline;
pub use wrap::{ClampEdgeUv, MirrorRepeatUv, PassThroughUv, UvWrap, WrapRepeatUv};
