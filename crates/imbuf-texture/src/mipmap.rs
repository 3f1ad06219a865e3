//! Mipmap chain construction.
//!
//! Level 0 is the source converted to 4-channel float. Every further level
//! halves both dimensions (rounding down, minimum 1) with a box filter. An
//! odd trailing row or column is folded into the last output pixel, so every
//! source pixel contributes to the next level.

use crate::{TextureError, TextureResult};
use imbuf_core::ImageBuffer;
use imbuf_math::Mat4;
use imbuf_transform::{for_each_row, transform, Filter, TransformMode};
use tracing::{debug, trace};

/// A chain of progressively halved 4-channel float images.
#[derive(Debug, Clone)]
pub struct MipmapChain {
    levels: Vec<ImageBuffer>,
}

impl MipmapChain {
    /// Builds a chain from `image`.
    ///
    /// Byte-only images are converted to float first. Generation stops at
    /// 1x1 or after `max_levels` levels (level 0 included).
    ///
    /// # Errors
    ///
    /// - [`TextureError::InvalidParameter`] if `max_levels` is `Some(0)`
    /// - [`TextureError::NoStorage`] if the image carries no pixel data
    ///
    /// # Example
    ///
    /// ```rust
    /// use imbuf_core::ImageBuffer;
    /// use imbuf_texture::MipmapChain;
    ///
    /// let img = ImageBuffer::filled_float(8, 4, &[0.5]).unwrap();
    /// let chain = MipmapChain::build(&img, None).unwrap();
    /// let sizes: Vec<_> = chain.levels().iter().map(|l| l.dimensions()).collect();
    /// assert_eq!(sizes, vec![(8, 4), (4, 2), (2, 1), (1, 1)]);
    /// ```
    pub fn build(image: &ImageBuffer, max_levels: Option<usize>) -> TextureResult<Self> {
        trace!(
            width = image.width(),
            height = image.height(),
            channels = image.channels(),
            ?max_levels,
            "MipmapChain::build"
        );

        let max_levels = match max_levels {
            Some(0) => {
                return Err(TextureError::InvalidParameter(
                    "max_levels must be at least 1".into(),
                ));
            }
            Some(n) => n,
            None => usize::MAX,
        };

        let base = base_level(image)?;
        let mut levels = vec![base];
        while levels.len() < max_levels {
            let Some(last) = levels.last() else { break };
            if last.width() == 1 && last.height() == 1 {
                break;
            }
            let next = downsample(last)?;
            levels.push(next);
        }

        debug!(levels = levels.len(), "mipmap chain built");
        Ok(Self { levels })
    }

    /// Level `i`, where 0 is full resolution.
    pub fn level(&self, i: usize) -> Option<&ImageBuffer> {
        self.levels.get(i)
    }

    /// All levels, full resolution first.
    pub fn levels(&self) -> &[ImageBuffer] {
        &self.levels
    }

    /// Number of levels.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Always `false`; a chain holds at least level 0.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Full resolution level.
    pub fn base(&self) -> &ImageBuffer {
        &self.levels[0]
    }

    /// Dimensions of level 0.
    pub fn dimensions(&self) -> (u32, u32) {
        self.base().dimensions()
    }
}

/// Converts `image` to a 4-channel float buffer of the same size.
fn base_level(image: &ImageBuffer) -> TextureResult<ImageBuffer> {
    let mut src = image.clone();
    src.ensure_float();
    if !src.has_float() {
        return Err(TextureError::NoStorage);
    }

    let mut base = ImageBuffer::new_float(src.width(), src.height(), 4)?;
    transform(
        &src,
        &mut base,
        TransformMode::Regular,
        Filter::Nearest,
        &Mat4::IDENTITY,
        None,
    )?;
    Ok(base)
}

/// Box-filters `level` down to half size.
fn downsample(level: &ImageBuffer) -> TextureResult<ImageBuffer> {
    let (w, h) = (level.width() as usize, level.height() as usize);
    let nw = (w / 2).max(1);
    let nh = (h / 2).max(1);
    let mut out = ImageBuffer::new_float(nw as u32, nh as u32, 4)?;

    let src = level.float_data().ok_or(TextureError::NoStorage)?;
    let dst = out.float_data_mut().ok_or(TextureError::NoStorage)?;

    for_each_row(dst, nw * 4, |y, row| {
        let y0 = y * h / nh;
        let y1 = (y + 1) * h / nh;
        for (x, px) in row.chunks_exact_mut(4).enumerate() {
            let x0 = x * w / nw;
            let x1 = (x + 1) * w / nw;
            let mut sum = [0.0f32; 4];
            for sy in y0..y1 {
                for sx in x0..x1 {
                    let i = (sy * w + sx) * 4;
                    for c in 0..4 {
                        sum[c] += src[i + c];
                    }
                }
            }
            let inv = 1.0 / ((x1 - x0) * (y1 - y0)) as f32;
            for c in 0..4 {
                px[c] = sum[c] * inv;
            }
        }
    });

    Ok(out)
}
