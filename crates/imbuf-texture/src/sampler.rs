//! Filtered texture lookups on a [`MipmapChain`].
//!
//! Coordinates are normalized: `(0, 0)` is the top-left corner of the
//! texture and `(1, 1)` the bottom-right. Derivatives `dx`/`dy` are the UV
//! change per destination pixel step and drive level selection.

use crate::MipmapChain;
use imbuf_core::ImageBuffer;
use imbuf_math::{lerp, Vec2};
use imbuf_transform::{
    BilinearSampler, ClampEdgeUv, MirrorRepeatUv, Sampler, SourceView, UvWrap, WrapRepeatUv,
};
use std::fmt;
use std::str::FromStr;

/// Behaviour outside the `[0, 1)` texture square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Extend {
    /// Tile the texture.
    #[default]
    Repeat,
    /// Transparent black outside.
    Clip,
    /// Repeat the edge pixels.
    Extend,
    /// Tile the texture, flipping every other tile on the flagged axes.
    MirrorRepeat {
        /// Mirror along U.
        x: bool,
        /// Mirror along V.
        y: bool,
    },
}

impl Extend {
    /// Canonical lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            Extend::Repeat => "repeat",
            Extend::Clip => "clip",
            Extend::Extend => "extend",
            Extend::MirrorRepeat { x: true, y: true } => "mirror",
            Extend::MirrorRepeat { x: true, y: false } => "mirror-x",
            Extend::MirrorRepeat { x: false, y: true } => "mirror-y",
            Extend::MirrorRepeat { x: false, y: false } => "repeat",
        }
    }
}

impl fmt::Display for Extend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Extend {
    type Err = crate::TextureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "repeat" => Ok(Extend::Repeat),
            "clip" => Ok(Extend::Clip),
            "extend" | "clamp" => Ok(Extend::Extend),
            "mirror" | "mirror-xy" => Ok(Extend::MirrorRepeat { x: true, y: true }),
            "mirror-x" => Ok(Extend::MirrorRepeat { x: true, y: false }),
            "mirror-y" => Ok(Extend::MirrorRepeat { x: false, y: true }),
            other => Err(crate::TextureError::InvalidParameter(format!(
                "unknown extend mode '{}'",
                other
            ))),
        }
    }
}

/// Texture filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextureFilter {
    /// Bilinear lookup of level 0, derivatives ignored.
    Box,
    /// Trilinear lookup at the level matching the footprint.
    #[default]
    Mipmap,
    /// Several trilinear probes along the major footprint axis.
    Anisotropic {
        /// Upper bound on probes per lookup.
        max_probes: u32,
    },
}

/// Filter and extend settings for texture lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextureSampler {
    /// Filter applied to each lookup.
    pub filter: TextureFilter,
    /// Behaviour outside the unit square.
    pub extend: Extend,
}

impl TextureSampler {
    /// Creates a sampler.
    pub fn new(filter: TextureFilter, extend: Extend) -> Self {
        Self { filter, extend }
    }

    /// Samples `chain` at normalized `uv` with screen-space derivatives.
    ///
    /// # Example
    ///
    /// ```rust
    /// use imbuf_core::ImageBuffer;
    /// use imbuf_math::Vec2;
    /// use imbuf_texture::{Extend, MipmapChain, TextureFilter, TextureSampler};
    ///
    /// let img = ImageBuffer::filled_float(16, 16, &[0.5, 0.25, 0.0, 1.0]).unwrap();
    /// let chain = MipmapChain::build(&img, None).unwrap();
    /// let sampler = TextureSampler::new(TextureFilter::Mipmap, Extend::Repeat);
    /// // A 4-texel footprint reads the 4x4 level; (0.375, 0.625) is one of its texel centers.
    /// let px = sampler.sample(&chain, Vec2::new(0.375, 0.625), Vec2::new(0.25, 0.0), Vec2::new(0.0, 0.25));
    /// assert_eq!(px, [0.5, 0.25, 0.0, 1.0]);
    /// ```
    pub fn sample(&self, chain: &MipmapChain, uv: Vec2, dx: Vec2, dy: Vec2) -> [f32; 4] {
        if self.extend == Extend::Clip && !in_unit_square(uv) {
            return [0.0; 4];
        }
        match self.filter {
            TextureFilter::Box => self.sample_level(chain, 0, uv),
            TextureFilter::Mipmap => {
                let (w, h) = chain.dimensions();
                let rho = texel_length(dx, w, h).max(texel_length(dy, w, h));
                self.sample_trilinear(chain, lod_for(rho, chain.len()), uv)
            }
            TextureFilter::Anisotropic { max_probes } => {
                self.sample_anisotropic(chain, uv, dx, dy, max_probes)
            }
        }
    }

    fn sample_anisotropic(
        &self,
        chain: &MipmapChain,
        uv: Vec2,
        dx: Vec2,
        dy: Vec2,
        max_probes: u32,
    ) -> [f32; 4] {
        let (w, h) = chain.dimensions();
        let len_x = texel_length(dx, w, h);
        let len_y = texel_length(dy, w, h);
        let (major, minor, axis) = if len_x >= len_y {
            (len_x, len_y, dx)
        } else {
            (len_y, len_x, dy)
        };

        let max_probes = max_probes.max(1);
        let probes = if minor > 0.0 {
            let ratio = (major / minor).ceil();
            if ratio.is_finite() {
                (ratio as u32).clamp(1, max_probes)
            } else {
                max_probes
            }
        } else if major > 0.0 {
            max_probes
        } else {
            1
        };
        // Blur along the minor axis enough that the probes cover the major axis.
        let lod = lod_for(minor.max(major / probes as f32), chain.len());

        let mut accum = [0.0f32; 4];
        let mut taken = 0u32;
        for i in 0..probes {
            let offset = (i as f32 + 0.5) / probes as f32 - 0.5;
            let p = uv + axis * offset;
            if self.extend == Extend::Clip && !in_unit_square(p) {
                continue;
            }
            let s = self.sample_trilinear(chain, lod, p);
            for c in 0..4 {
                accum[c] += s[c];
            }
            taken += 1;
        }
        if taken == 0 {
            return self.sample_trilinear(chain, lod, uv);
        }
        let inv = 1.0 / taken as f32;
        accum.map(|v| v * inv)
    }

    fn sample_trilinear(&self, chain: &MipmapChain, lod: f32, uv: Vec2) -> [f32; 4] {
        let last = chain.len().saturating_sub(1);
        let l0 = (lod.floor() as usize).min(last);
        let l1 = (l0 + 1).min(last);
        let t = lod - l0 as f32;
        if l0 == l1 || t <= 0.0 {
            return self.sample_level(chain, l0, uv);
        }
        let a = self.sample_level(chain, l0, uv);
        let b = self.sample_level(chain, l1, uv);
        std::array::from_fn(|c| lerp(a[c], b[c], t))
    }

    fn sample_level(&self, chain: &MipmapChain, level: usize, uv: Vec2) -> [f32; 4] {
        let Some(image) = chain.level(level) else {
            return [0.0; 4];
        };
        match self.extend {
            Extend::Repeat => bilinear(image, uv, WrapRepeatUv),
            Extend::MirrorRepeat { x, y } => bilinear(image, uv, MirrorRepeatUv::new(x, y)),
            // Clip is resolved before reaching a level; inside the square it
            // reads like Extend.
            Extend::Clip | Extend::Extend => bilinear(image, uv, ClampEdgeUv),
        }
    }
}

/// Bilinear lookup of one level at normalized `uv`.
fn bilinear<W: UvWrap>(image: &ImageBuffer, uv: Vec2, wrap: W) -> [f32; 4] {
    let Some(data) = image.float_data() else {
        return [0.0; 4];
    };
    let (w, h) = (image.width() as usize, image.height() as usize);
    let view = SourceView::<f32, 4>::new(data, w, h);
    let px = Vec2::new(uv.x * w as f32, uv.y * h as f32);
    BilinearSampler::new(wrap).sample(&view, px)
}

#[inline]
fn in_unit_square(uv: Vec2) -> bool {
    uv.x >= 0.0 && uv.x < 1.0 && uv.y >= 0.0 && uv.y < 1.0
}

/// Length of a UV derivative measured in level-0 texels.
#[inline]
fn texel_length(d: Vec2, width: u32, height: u32) -> f32 {
    Vec2::new(d.x * width as f32, d.y * height as f32).length()
}

/// Level of detail for a footprint of `rho` texels, clamped to the chain.
fn lod_for(rho: f32, levels: usize) -> f32 {
    let max_lod = levels.saturating_sub(1) as f32;
    if !(rho > 1.0) || !rho.is_finite() {
        return if rho.is_infinite() { max_lod } else { 0.0 };
    }
    rho.log2().clamp(0.0, max_lod)
}
