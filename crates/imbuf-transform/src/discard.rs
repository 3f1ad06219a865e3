//! Discard policies.
//!
//! A discard policy is asked once per destination pixel, before sampling.
//! When it answers `true` the destination pixel keeps its previous value.

use imbuf_core::CropRect;
use imbuf_math::Vec2;

/// Decides whether a destination pixel is left untouched.
pub trait Discard: Sync {
    /// Returns `true` if the pixel mapped to source coordinate `uv` must not
    /// be written.
    fn should_discard(&self, uv: Vec2) -> bool;
}

/// Never discards.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDiscard;

impl Discard for NoDiscard {
    #[inline(always)]
    fn should_discard(&self, _uv: Vec2) -> bool {
        false
    }
}

/// Discards pixels whose source coordinate lies outside a crop rectangle.
///
/// The rectangle is in source pixel coordinates and half-open:
/// `[xmin, xmax) x [ymin, ymax)`.
#[derive(Debug, Clone, Copy)]
pub struct CropSource {
    crop: CropRect,
}

impl CropSource {
    /// Creates a crop discard for the given source rectangle.
    pub fn new(crop: CropRect) -> Self {
        Self { crop }
    }
}

impl Discard for CropSource {
    #[inline]
    fn should_discard(&self, uv: Vec2) -> bool {
        !self.crop.contains(uv.x, uv.y)
    }
}
