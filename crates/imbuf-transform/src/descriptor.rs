//! Per-call transform descriptor.
//!
//! The descriptor turns a destination→source matrix into three vectors so
//! the scanline loop only ever adds: `start_uv` (where destination pixel
//! space origin lands in the source), `add_x` and `add_y` (source
//! displacement per destination pixel step along X and Y).
//!
//! Destination pixels are sampled at their centers. Row `y` starts at
//! `start_uv + 0.5 * add_x + (y + 0.5) * add_y`.
//!
//! # Example
//!
//! ```rust
//! use imbuf_math::{Mat4, Vec2};
//! use imbuf_transform::TransformDescriptor;
//!
//! let m = Mat4::translation(2.0, 1.0, 0.0) * Mat4::scale(0.5, 0.5, 1.0);
//! let desc = TransformDescriptor::new(&m, 16, 16);
//! assert_eq!(desc.start_uv, Vec2::new(2.0, 1.0));
//! assert_eq!(desc.add_x, Vec2::new(0.5, 0.0));
//! assert_eq!(desc.add_y, Vec2::new(0.0, 0.5));
//! ```

use imbuf_core::CropRect;
use imbuf_math::{Mat4, Vec2, Vec3};

/// Immutable UV stepping data for one transform call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformDescriptor {
    /// Source coordinate of destination pixel-space origin.
    pub start_uv: Vec2,
    /// Source displacement per destination pixel along X.
    pub add_x: Vec2,
    /// Source displacement per destination pixel along Y.
    pub add_y: Vec2,
    /// Source-space crop rectangle (crop-source mode only).
    pub src_crop: Option<CropRect>,
}

impl TransformDescriptor {
    /// Builds the descriptor from a destination→source matrix.
    ///
    /// The matrix is applied to the origin and to the `(src_width, 0, 0)` and
    /// `(0, src_height, 0)` corners; the corner offsets divided by the extent
    /// give the per-pixel steps.
    pub fn new(matrix: &Mat4, src_width: u32, src_height: u32) -> Self {
        let width = src_width.max(1) as f32;
        let height = src_height.max(1) as f32;

        let start_uv = matrix.transform_point(Vec3::ZERO).xy();
        let corner_x = matrix.transform_point(Vec3::new(width, 0.0, 0.0)).xy();
        let corner_y = matrix.transform_point(Vec3::new(0.0, height, 0.0)).xy();

        Self {
            start_uv,
            add_x: (corner_x - start_uv) / width,
            add_y: (corner_y - start_uv) / height,
            src_crop: None,
        }
    }

    /// Attaches a source crop rectangle.
    pub fn with_crop(mut self, crop: CropRect) -> Self {
        self.src_crop = Some(crop);
        self
    }

    /// Source coordinate of the first pixel center of destination row `y`.
    #[inline]
    pub fn row_start(&self, y: usize) -> Vec2 {
        self.start_uv + self.add_x * 0.5 + self.add_y * (y as f32 + 0.5)
    }

    /// Source coordinate of destination pixel center (x, y), computed directly.
    #[inline]
    pub fn uv_at(&self, x: usize, y: usize) -> Vec2 {
        self.start_uv + self.add_x * (x as f32 + 0.5) + self.add_y * (y as f32 + 0.5)
    }
}
