//! Pixel storage types and read-only source views.

/// Per-channel storage of a pipeline (`f32` or `u8`).
///
/// Blending always happens in `f32`; `from_blend` converts a blended value
/// back to storage.
pub trait Storage: Copy + Default + PartialEq + Send + Sync + 'static {
    /// Transparent black.
    const ZERO: Self;

    /// Converts a blended value back to storage.
    fn from_blend(v: f32) -> Self;

    /// Converts a stored value to the blend domain.
    fn to_blend(self) -> f32;
}

impl Storage for f32 {
    const ZERO: Self = 0.0;

    #[inline(always)]
    fn from_blend(v: f32) -> Self {
        v
    }

    #[inline(always)]
    fn to_blend(self) -> f32 {
        self
    }
}

impl Storage for u8 {
    const ZERO: Self = 0;

    /// Rounds to nearest; `as` saturates out-of-range values.
    #[inline]
    fn from_blend(v: f32) -> Self {
        (v + 0.5) as u8
    }

    #[inline(always)]
    fn to_blend(self) -> f32 {
        self as f32
    }
}

/// Read-only view of interleaved source pixels with `N` channels.
#[derive(Debug, Clone, Copy)]
pub struct SourceView<'a, S, const N: usize> {
    data: &'a [S],
    width: usize,
    height: usize,
}

impl<'a, S: Storage, const N: usize> SourceView<'a, S, N> {
    /// Wraps `data` as a `width x height` raster.
    ///
    /// `data` must hold at least `width * height * N` values.
    pub fn new(data: &'a [S], width: usize, height: usize) -> Self {
        debug_assert!(data.len() >= width * height * N);
        Self { data, width, height }
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Pixel at (x, y). Callers guarantee the coordinate is in bounds.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> [S; N] {
        let idx = (y * self.width + x) * N;
        let mut out = [S::ZERO; N];
        out.copy_from_slice(&self.data[idx..idx + N]);
        out
    }

    /// Pixel at a signed coordinate; transparent black outside the raster.
    #[inline]
    pub fn texel(&self, x: i32, y: i32) -> [S; N] {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return [S::ZERO; N];
        }
        self.pixel(x as usize, y as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_rounding() {
        assert_eq!(u8::from_blend(127.49), 127);
        assert_eq!(u8::from_blend(127.5), 128);
        assert_eq!(u8::from_blend(-3.0), 0);
        assert_eq!(u8::from_blend(300.0), 255);
        assert_eq!(200u8.to_blend(), 200.0);
    }

    #[test]
    fn test_view_texel() {
        let data: Vec<f32> = (0..12).map(|v| v as f32).collect();
        let view = SourceView::<f32, 2>::new(&data, 3, 2);
        assert_eq!(view.pixel(1, 1), [8.0, 9.0]);
        assert_eq!(view.texel(2, 0), [4.0, 5.0]);
        assert_eq!(view.texel(-1, 0), [0.0, 0.0]);
        assert_eq!(view.texel(3, 0), [0.0, 0.0]);
        assert_eq!(view.texel(0, 2), [0.0, 0.0]);
    }
}
