//! Nearest and bilinear samplers.
//!
//! A sampler reads one pixel, in the source's native channel count, at a
//! fractional source coordinate. Coordinates address pixel space: pixel
//! (x, y) covers `[x, x + 1) x [y, y + 1)` and its center is at
//! `(x + 0.5, y + 0.5)`.
//!
//! Both samplers run the coordinate through a [`UvWrap`] first and map the
//! texel indices they read through it. Without a tiling wrap, reads outside
//! the raster yield transparent black.

use crate::pixel::{SourceView, Storage};
use crate::wrap::UvWrap;
use imbuf_math::{lerp, Vec2};

/// Reads a pixel from a source view at a fractional coordinate.
pub trait Sampler<S: Storage, const N: usize>: Sync {
    /// Samples `src` at source pixel coordinate `uv`.
    fn sample(&self, src: &SourceView<'_, S, N>, uv: Vec2) -> [S; N];
}

/// Nearest-neighbor sampler.
#[derive(Debug, Clone, Copy, Default)]
pub struct NearestSampler<W> {
    wrap: W,
}

impl<W: UvWrap> NearestSampler<W> {
    /// Creates a nearest sampler with the given wrap.
    pub fn new(wrap: W) -> Self {
        Self { wrap }
    }
}

impl<S: Storage, W: UvWrap, const N: usize> Sampler<S, N> for NearestSampler<W> {
    #[inline]
    fn sample(&self, src: &SourceView<'_, S, N>, uv: Vec2) -> [S; N] {
        let uv = self.wrap.wrap_uv(uv, src.width(), src.height());
        // Negative coordinates must not truncate onto column/row 0.
        if !(uv.x >= 0.0 && uv.y >= 0.0) {
            return [S::ZERO; N];
        }
        let (x, y) = self.wrap.wrap_texel(
            uv.x as i32,
            uv.y as i32,
            src.width() as i32,
            src.height() as i32,
        );
        src.texel(x, y)
    }
}

/// Bilinear sampler.
///
/// The four pixel centers around the coordinate are blended with weights
/// `(1-a)(1-b), a(1-b), (1-a)b, ab`, where `a`/`b` are the fractional
/// offsets from the upper-left center. The blend is evaluated as two
/// horizontal lerps and one vertical lerp, which returns equal neighbours
/// unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct BilinearSampler<W> {
    wrap: W,
}

impl<W: UvWrap> BilinearSampler<W> {
    /// Creates a bilinear sampler with the given wrap.
    pub fn new(wrap: W) -> Self {
        Self { wrap }
    }
}

impl<S: Storage, W: UvWrap, const N: usize> Sampler<S, N> for BilinearSampler<W> {
    #[inline]
    fn sample(&self, src: &SourceView<'_, S, N>, uv: Vec2) -> [S; N] {
        let width = src.width() as i32;
        let height = src.height() as i32;
        let uv = self.wrap.wrap_uv(uv, src.width(), src.height());
        if !uv.is_finite() {
            return [S::ZERO; N];
        }

        let u = uv.x - 0.5;
        let v = uv.y - 0.5;
        let uf = u.floor();
        let vf = v.floor();
        let a = u - uf;
        let b = v - vf;

        let x1 = uf as i32;
        let y1 = vf as i32;
        let x2 = x1.saturating_add(1);
        let y2 = y1.saturating_add(1);
        if x2 < 0 || x1 >= width || y2 < 0 || y1 >= height {
            return [S::ZERO; N];
        }
        let (x1, y1) = self.wrap.wrap_texel(x1, y1, width, height);
        let (x2, y2) = self.wrap.wrap_texel(x2, y2, width, height);

        let p11 = src.texel(x1, y1);
        let p21 = src.texel(x2, y1);
        let p12 = src.texel(x1, y2);
        let p22 = src.texel(x2, y2);

        let mut out = [S::ZERO; N];
        for c in 0..N {
            let top = lerp(p11[c].to_blend(), p21[c].to_blend(), a);
            let bottom = lerp(p12[c].to_blend(), p22[c].to_blend(), a);
            out[c] = S::from_blend(lerp(top, bottom, b));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wrap::{MirrorRepeatUv, PassThroughUv, WrapRepeatUv};
    use approx::assert_relative_eq;

    fn ramp() -> Vec<f32> {
        // 4x2, one channel, value = x + 10 * y
        vec![0.0, 1.0, 2.0, 3.0, 10.0, 11.0, 12.0, 13.0]
    }

    #[test]
    fn test_nearest_truncates() {
        let data = ramp();
        let view = SourceView::<f32, 1>::new(&data, 4, 2);
        let s = NearestSampler::new(PassThroughUv);
        assert_eq!(s.sample(&view, Vec2::new(2.9, 1.1)), [12.0]);
        assert_eq!(s.sample(&view, Vec2::new(0.0, 0.0)), [0.0]);
    }

    #[test]
    fn test_nearest_outside_is_zero() {
        let data = vec![5.0f32; 8];
        let view = SourceView::<f32, 1>::new(&data, 4, 2);
        let s = NearestSampler::new(PassThroughUv);
        assert_eq!(s.sample(&view, Vec2::new(-0.25, 0.5)), [0.0]);
        assert_eq!(s.sample(&view, Vec2::new(4.0, 0.5)), [0.0]);
        assert_eq!(s.sample(&view, Vec2::new(1.0, 2.0)), [0.0]);
        assert_eq!(s.sample(&view, Vec2::new(f32::NAN, 0.5)), [0.0]);
    }

    #[test]
    fn test_nearest_repeat() {
        let data = ramp();
        let view = SourceView::<f32, 1>::new(&data, 4, 2);
        let s = NearestSampler::new(WrapRepeatUv);
        assert_eq!(s.sample(&view, Vec2::new(-0.5, -0.5)), [13.0]);
        assert_eq!(s.sample(&view, Vec2::new(5.5, 2.5)), [1.0]);
    }

    #[test]
    fn test_bilinear_centers_exact() {
        let data = ramp();
        let view = SourceView::<f32, 1>::new(&data, 4, 2);
        let s = BilinearSampler::new(PassThroughUv);
        for y in 0..2 {
            for x in 0..4 {
                let uv = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                assert_eq!(s.sample(&view, uv), view.pixel(x, y));
            }
        }
    }

    #[test]
    fn test_bilinear_midpoint() {
        let data = ramp();
        let view = SourceView::<f32, 1>::new(&data, 4, 2);
        let s = BilinearSampler::new(PassThroughUv);
        let v = s.sample(&view, Vec2::new(1.0, 1.0));
        assert_relative_eq!(v[0], (0.0 + 1.0 + 10.0 + 11.0) / 4.0);
    }

    #[test]
    fn test_bilinear_edge_fades_to_zero() {
        let data = vec![1.0f32; 4];
        let view = SourceView::<f32, 1>::new(&data, 2, 2);
        let s = BilinearSampler::new(PassThroughUv);
        // Half a pixel left of the first center: half weight on the empty column.
        let v = s.sample(&view, Vec2::new(0.0, 0.5));
        assert_relative_eq!(v[0], 0.5);
        assert_eq!(s.sample(&view, Vec2::new(-1.0, 0.5)), [0.0]);
        assert_eq!(s.sample(&view, Vec2::new(3.0, 1.0)), [0.0]);
    }

    #[test]
    fn test_bilinear_repeat_wraps_neighbours() {
        let data = ramp();
        let view = SourceView::<f32, 1>::new(&data, 4, 2);
        let s = BilinearSampler::new(WrapRepeatUv);
        // Between column 3 and column 0 of row 0.
        let v = s.sample(&view, Vec2::new(4.0, 0.5));
        assert_relative_eq!(v[0], 1.5);
    }

    #[test]
    fn test_bilinear_bytes_round() {
        let data = [0u8, 0, 0, 255, 255, 255, 255, 255];
        let view = SourceView::<u8, 4>::new(&data, 2, 1);
        let s = BilinearSampler::new(PassThroughUv);
        let v = s.sample(&view, Vec2::new(1.0, 0.5));
        assert_eq!(v, [128, 128, 128, 255]);
    }

    #[test]
    fn test_bilinear_equal_neighbours_exact() {
        let data = [0.2f32, 0.4, 0.6, 1.0];
        let view = SourceView::<f32, 4>::new(&data, 1, 1);
        let s = BilinearSampler::new(WrapRepeatUv);
        for uv in [Vec2::new(0.3, 0.7), Vec2::new(-5.1, 2.25), Vec2::new(0.999, 0.001)] {
            assert_eq!(s.sample(&view, uv), data);
        }
    }

    #[test]
    fn test_mirror_edge_reads_edge_pixel() {
        let data = ramp();
        let view = SourceView::<f32, 1>::new(&data, 4, 2);
        let nearest = NearestSampler::new(MirrorRepeatUv::new(true, true));
        // Exactly on the fold reads the last column, not a zero texel.
        assert_eq!(nearest.sample(&view, Vec2::new(4.0, 0.5)), [3.0]);
        assert_eq!(nearest.sample(&view, Vec2::new(4.5, 0.5)), [3.0]);
        assert_eq!(nearest.sample(&view, Vec2::new(-0.5, 2.5)), [10.0]);

        let bilinear = BilinearSampler::new(MirrorRepeatUv::new(true, false));
        // Across the fold both neighbours are the edge column.
        assert_eq!(bilinear.sample(&view, Vec2::new(4.0, 0.5)), [3.0]);
    }
}
