//! Whole-image texture mapping.

use crate::{MipmapChain, TextureError, TextureResult, TextureSampler};
use imbuf_core::ImageBuffer;
use imbuf_math::Mat4;
use imbuf_transform::{for_each_row, TransformDescriptor};
use tracing::trace;

/// Fills `dst` by texturing every pixel from `chain`.
///
/// `matrix` maps destination pixel coordinates to normalized texture
/// coordinates. Pixels are sampled at their centers; the per-pixel UV steps
/// of the matrix are the lookup derivatives.
///
/// # Errors
///
/// - [`TextureError::InvalidDestination`] unless `dst` is 4-channel float
/// - [`TextureError::InvalidParameter`] for a non-finite matrix
///
/// # Example
///
/// ```rust
/// use imbuf_core::ImageBuffer;
/// use imbuf_math::Mat4;
/// use imbuf_texture::{sample_image, MipmapChain, TextureSampler};
///
/// let tex = ImageBuffer::filled_float(32, 32, &[0.0, 0.5, 1.0, 1.0]).unwrap();
/// let chain = MipmapChain::build(&tex, None).unwrap();
/// let mut dst = ImageBuffer::new_float(4, 4, 4).unwrap();
///
/// // Map the 4x4 destination onto the unit square.
/// let m = Mat4::scale(0.25, 0.25, 1.0);
/// sample_image(&chain, &mut dst, &TextureSampler::default(), &m).unwrap();
/// assert_eq!(dst.float_pixel(2, 1), Some(&[0.0, 0.5, 1.0, 1.0][..]));
/// ```
pub fn sample_image(
    chain: &MipmapChain,
    dst: &mut ImageBuffer,
    sampler: &TextureSampler,
    matrix: &Mat4,
) -> TextureResult<()> {
    trace!(
        dst_width = dst.width(),
        dst_height = dst.height(),
        levels = chain.len(),
        filter = ?sampler.filter,
        extend = %sampler.extend,
        "sample_image"
    );

    if dst.channels() != 4 || !dst.has_float() {
        return Err(TextureError::InvalidDestination {
            channels: dst.channels(),
            has_float: dst.has_float(),
        });
    }
    if !matrix.is_finite() {
        return Err(TextureError::InvalidParameter(
            "texture matrix has non-finite elements".into(),
        ));
    }

    // Unit extent: the steps are UV per destination pixel.
    let desc = TransformDescriptor::new(matrix, 1, 1);
    let row_len = dst.width() as usize * 4;
    let data = dst
        .float_data_mut()
        .ok_or(TextureError::InvalidDestination { channels: 4, has_float: false })?;

    for_each_row(data, row_len, |y, row| {
        let mut uv = desc.row_start(y);
        for px in row.chunks_exact_mut(4) {
            px.copy_from_slice(&sampler.sample(chain, uv, desc.add_x, desc.add_y));
            uv += desc.add_x;
        }
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_byte_destination() {
        let tex = ImageBuffer::filled_float(2, 2, &[1.0, 1.0, 1.0, 1.0]).unwrap();
        let chain = MipmapChain::build(&tex, None).unwrap();
        let mut dst = ImageBuffer::new_byte(2, 2).unwrap();
        let err = sample_image(&chain, &mut dst, &TextureSampler::default(), &Mat4::IDENTITY);
        assert!(matches!(err, Err(TextureError::InvalidDestination { has_float: false, .. })));
    }

    #[test]
    fn test_rejects_non_finite_matrix() {
        let tex = ImageBuffer::filled_float(2, 2, &[1.0, 1.0, 1.0, 1.0]).unwrap();
        let chain = MipmapChain::build(&tex, None).unwrap();
        let mut dst = ImageBuffer::new_float(2, 2, 4).unwrap();
        let m = Mat4::scale(f32::INFINITY, 1.0, 1.0);
        let err = sample_image(&chain, &mut dst, &TextureSampler::default(), &m);
        assert!(matches!(err, Err(TextureError::InvalidParameter(_))));
    }
}
