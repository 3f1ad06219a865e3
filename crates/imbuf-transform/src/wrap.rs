//! UV wrapping applied before sampling.
//!
//! Coordinates are in source pixel space. Each axis is wrapped
//! independently against the source extent on that axis. After the
//! coordinate is wrapped, samplers pass the texel indices they read
//! through [`UvWrap::wrap_texel`], so neighbours across a tile seam land
//! on the right pixel.

use imbuf_math::{clamp, fract, wrap_index, wrap_repeat, Vec2};

/// Maps a source coordinate before it reaches a sampler.
pub trait UvWrap: Copy + Default + Send + Sync {
    /// Wraps a coordinate against a `width x height` raster.
    fn wrap_uv(&self, uv: Vec2, width: usize, height: usize) -> Vec2;

    /// Maps the indices of a texel read around a wrapped coordinate.
    ///
    /// Indices left outside the raster read transparent black.
    #[inline]
    fn wrap_texel(&self, x: i32, y: i32, _width: i32, _height: i32) -> (i32, i32) {
        (x, y)
    }
}

/// Identity wrap.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThroughUv;

impl UvWrap for PassThroughUv {
    #[inline(always)]
    fn wrap_uv(&self, uv: Vec2, _width: usize, _height: usize) -> Vec2 {
        uv
    }
}

/// Floor-mod into `[0, extent)`; the source tiles in both directions.
#[derive(Debug, Clone, Copy, Default)]
pub struct WrapRepeatUv;

impl UvWrap for WrapRepeatUv {
    #[inline]
    fn wrap_uv(&self, uv: Vec2, width: usize, height: usize) -> Vec2 {
        Vec2::new(repeat_axis(uv.x, width), repeat_axis(uv.y, height))
    }

    #[inline]
    fn wrap_texel(&self, x: i32, y: i32, width: i32, height: i32) -> (i32, i32) {
        (wrap_index(x, width), wrap_index(y, height))
    }
}

/// Tiling with optional mirroring per axis.
///
/// A mirrored axis alternates normal and flipped copies of the source, so
/// its period is twice the extent and the edge pixels meet their own
/// reflection. An axis without mirroring repeats like [`WrapRepeatUv`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MirrorRepeatUv {
    /// Mirror every other tile along X.
    pub x: bool,
    /// Mirror every other tile along Y.
    pub y: bool,
}

impl MirrorRepeatUv {
    /// Creates a wrap with the given per-axis mirroring.
    pub fn new(x: bool, y: bool) -> Self {
        Self { x, y }
    }
}

impl UvWrap for MirrorRepeatUv {
    #[inline]
    fn wrap_uv(&self, uv: Vec2, width: usize, height: usize) -> Vec2 {
        let u = if self.x { mirror_axis(uv.x, width) } else { repeat_axis(uv.x, width) };
        let v = if self.y { mirror_axis(uv.y, height) } else { repeat_axis(uv.y, height) };
        Vec2::new(u, v)
    }

    #[inline]
    fn wrap_texel(&self, x: i32, y: i32, width: i32, height: i32) -> (i32, i32) {
        let x = if self.x { x.clamp(0, width - 1) } else { wrap_index(x, width) };
        let y = if self.y { y.clamp(0, height - 1) } else { wrap_index(y, height) };
        (x, y)
    }
}

/// Clamps onto the outermost pixel centers, `[0.5, extent - 0.5]`.
///
/// Samples beyond the edge repeat the edge pixel.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClampEdgeUv;

impl UvWrap for ClampEdgeUv {
    #[inline]
    fn wrap_uv(&self, uv: Vec2, width: usize, height: usize) -> Vec2 {
        Vec2::new(clamp_axis(uv.x, width), clamp_axis(uv.y, height))
    }
}

#[inline]
fn repeat_axis(coord: f32, extent: usize) -> f32 {
    wrap_repeat(coord, extent as f32)
}

/// Folds `coord` into `[0, extent]` with period `2 * extent`.
#[inline]
fn mirror_axis(coord: f32, extent: usize) -> f32 {
    let extent = extent as f32;
    let t = 2.0 * fract(0.5 * coord / extent);
    let t = if t > 1.0 { 2.0 - t } else { t };
    t * extent
}

#[inline]
fn clamp_axis(coord: f32, extent: usize) -> f32 {
    if coord.is_nan() {
        return 0.5;
    }
    clamp(coord, 0.5, (extent as f32 - 0.5).max(0.5))
}
