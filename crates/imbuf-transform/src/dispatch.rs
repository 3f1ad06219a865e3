//! Public transform entry point.
//!
//! [`transform`] resolves storage, channel count, filter and mode once per
//! call into a single monomorphized scanline pipeline, then fans the
//! destination rows out over the thread pool.
//!
//! # Example
//!
//! ```rust
//! use imbuf_core::ImageBuffer;
//! use imbuf_math::Mat4;
//! use imbuf_transform::{transform, Filter, TransformMode};
//!
//! let src = ImageBuffer::filled_float(4, 4, &[1.0, 0.0, 0.0, 1.0]).unwrap();
//! let mut dst = ImageBuffer::new_float(8, 8, 4).unwrap();
//! transform(&src, &mut dst, TransformMode::WrapRepeat, Filter::Nearest, &Mat4::IDENTITY, None)
//!     .unwrap();
//! assert_eq!(dst.float_pixel(7, 7), Some(&[1.0, 0.0, 0.0, 1.0][..]));
//! ```

use crate::channels::{check_conversion, ChannelConvert, DST_CHANNELS};
use crate::descriptor::TransformDescriptor;
use crate::discard::{CropSource, Discard, NoDiscard};
use crate::parallel::for_each_row;
use crate::pixel::SourceView;
use crate::sampler::{BilinearSampler, NearestSampler, Sampler};
use crate::scanline::process_scanline;
use crate::wrap::{PassThroughUv, WrapRepeatUv};
use crate::{Filter, TransformError, TransformMode, TransformResult};
use imbuf_core::{CropRect, ImageBuffer, StorageKind};
use imbuf_math::Mat4;
use tracing::{debug, trace};

/// Transforms `src` into `dst` in place.
///
/// `matrix` maps destination pixel space to source pixel space. `src_crop`
/// is required for [`TransformMode::CropSource`] and must be `None`
/// otherwise.
///
/// The float pipeline runs when both buffers hold float data, otherwise the
/// byte pipeline runs when both hold byte data. Any other storage
/// combination performs no work and returns `Ok(())`.
///
/// # Errors
///
/// - [`TransformError::MissingCropRect`] / [`TransformError::UnexpectedCropRect`]
///   for a crop rectangle that does not match the mode
/// - [`TransformError::InvalidParameter`] if the matrix is not finite
/// - [`TransformError::UnsupportedChannelConversion`] for channel counts
///   outside the supported table
///
/// Errors are reported before the destination is touched.
pub fn transform(
    src: &ImageBuffer,
    dst: &mut ImageBuffer,
    mode: TransformMode,
    filter: Filter,
    matrix: &Mat4,
    src_crop: Option<&CropRect>,
) -> TransformResult<()> {
    trace!(
        src_width = src.width(),
        src_height = src.height(),
        dst_width = dst.width(),
        dst_height = dst.height(),
        %mode,
        %filter,
        "transform"
    );

    let crop = validate_crop(mode, src_crop)?;
    if !matrix.is_finite() {
        return Err(TransformError::InvalidParameter(
            "transform matrix has non-finite elements".into(),
        ));
    }

    let mut desc = TransformDescriptor::new(matrix, src.width(), src.height());
    if let Some(crop) = crop {
        trace!(%crop, "source crop");
        desc = desc.with_crop(crop);
    }

    let src_width = src.width() as usize;
    let src_height = src.height() as usize;
    let dst_width = dst.width() as usize;
    let src_channels = src.channels();
    let dst_channels = dst.channels();

    if src.has_float() && dst.has_float() {
        check_conversion(StorageKind::Float, src_channels, dst_channels)?;
        let (Some(src_data), Some(dst_data)) = (src.float_data(), dst.float_data_mut()) else {
            return Ok(());
        };
        debug!(storage = "float", src_channels, "transform pipeline selected");
        match src_channels {
            1 => run::<f32, 1>(src_data, src_width, src_height, dst_data, dst_width, &desc, mode, filter),
            2 => run::<f32, 2>(src_data, src_width, src_height, dst_data, dst_width, &desc, mode, filter),
            3 => run::<f32, 3>(src_data, src_width, src_height, dst_data, dst_width, &desc, mode, filter),
            4 => run::<f32, 4>(src_data, src_width, src_height, dst_data, dst_width, &desc, mode, filter),
            n => Err(TransformError::UnsupportedChannelConversion {
                storage: StorageKind::Float,
                src: n,
                dst: dst_channels,
            }),
        }
    } else if src.has_byte() && dst.has_byte() {
        let (Some(src_data), Some(dst_data)) = (src.byte_data(), dst.byte_data_mut()) else {
            return Ok(());
        };
        debug!(storage = "byte", "transform pipeline selected");
        run::<u8, 4>(src_data, src_width, src_height, dst_data, dst_width, &desc, mode, filter)
    } else {
        debug!(
            src_float = src.has_float(),
            src_byte = src.has_byte(),
            dst_float = dst.has_float(),
            dst_byte = dst.has_byte(),
            "no shared storage between source and destination, nothing to do"
        );
        Ok(())
    }
}

/// Checks that a crop rectangle is given exactly when the mode needs one.
fn validate_crop(mode: TransformMode, src_crop: Option<&CropRect>) -> TransformResult<Option<CropRect>> {
    match (mode.needs_crop(), src_crop) {
        (true, Some(crop)) => Ok(Some(*crop)),
        (true, None) => Err(TransformError::MissingCropRect),
        (false, Some(_)) => Err(TransformError::UnexpectedCropRect { mode }),
        (false, None) => Ok(None),
    }
}

#[allow(clippy::too_many_arguments)]
fn run<S, const N: usize>(
    src: &[S],
    src_width: usize,
    src_height: usize,
    dst: &mut [S],
    dst_width: usize,
    desc: &TransformDescriptor,
    mode: TransformMode,
    filter: Filter,
) -> TransformResult<()>
where
    S: ChannelConvert<N>,
{
    let view = SourceView::<S, N>::new(src, src_width, src_height);
    let row_len = dst_width * DST_CHANNELS;

    match (mode, filter) {
        (TransformMode::Regular, Filter::Nearest) => {
            apply(&view, dst, row_len, desc, &NoDiscard, &NearestSampler::new(PassThroughUv))
        }
        (TransformMode::Regular, Filter::Bilinear) => {
            apply(&view, dst, row_len, desc, &NoDiscard, &BilinearSampler::new(PassThroughUv))
        }
        (TransformMode::CropSource, filter) => {
            let crop = desc.src_crop.ok_or(TransformError::MissingCropRect)?;
            let discard = CropSource::new(crop);
            match filter {
                Filter::Nearest => {
                    apply(&view, dst, row_len, desc, &discard, &NearestSampler::new(PassThroughUv))
                }
                Filter::Bilinear => {
                    apply(&view, dst, row_len, desc, &discard, &BilinearSampler::new(PassThroughUv))
                }
            }
        }
        (TransformMode::WrapRepeat, Filter::Nearest) => {
            apply(&view, dst, row_len, desc, &NoDiscard, &NearestSampler::new(WrapRepeatUv))
        }
        (TransformMode::WrapRepeat, Filter::Bilinear) => {
            apply(&view, dst, row_len, desc, &NoDiscard, &BilinearSampler::new(WrapRepeatUv))
        }
    }
    Ok(())
}

fn apply<S, D, P, const N: usize>(
    src: &SourceView<'_, S, N>,
    dst: &mut [S],
    row_len: usize,
    desc: &TransformDescriptor,
    discard: &D,
    sampler: &P,
) where
    S: ChannelConvert<N>,
    D: Discard,
    P: Sampler<S, N>,
{
    for_each_row(dst, row_len, |y, row| {
        process_scanline(desc, discard, sampler, src, y, row);
    });
}
