//! Per-scanline inner loop.

use crate::channels::{ChannelConvert, DST_CHANNELS};
use crate::descriptor::TransformDescriptor;
use crate::discard::Discard;
use crate::pixel::SourceView;
use crate::sampler::Sampler;

/// Processes destination row `y`.
///
/// Walks the row left to right, advancing the source coordinate by
/// `add_x` per pixel. Each pixel is discarded, or sampled and converted into
/// place. Discarded pixels keep their previous value.
#[inline]
pub fn process_scanline<S, D, P, const N: usize>(
    desc: &TransformDescriptor,
    discard: &D,
    sampler: &P,
    src: &SourceView<'_, S, N>,
    y: usize,
    row: &mut [S],
) where
    S: ChannelConvert<N>,
    D: Discard,
    P: Sampler<S, N>,
{
    let mut uv = desc.row_start(y);
    for out in row.chunks_exact_mut(DST_CHANNELS) {
        if !discard.should_discard(uv) {
            let sample = sampler.sample(src, uv);
            S::convert(&sample, out);
        }
        uv += desc.add_x;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discard::{CropSource, NoDiscard};
    use crate::sampler::NearestSampler;
    use crate::wrap::PassThroughUv;
    use imbuf_core::CropRect;
    use imbuf_math::Mat4;

    #[test]
    fn test_row_copy() {
        let src: Vec<f32> = (0..3).map(|v| v as f32).collect();
        let view = SourceView::<f32, 1>::new(&src, 3, 1);
        let desc = TransformDescriptor::new(&Mat4::IDENTITY, 3, 1);
        let mut row = vec![0.0f32; 12];
        process_scanline(&desc, &NoDiscard, &NearestSampler::new(PassThroughUv), &view, 0, &mut row);
        assert_eq!(
            row,
            vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0, 1.0, 2.0, 2.0, 2.0, 1.0]
        );
    }

    #[test]
    fn test_row_discard_keeps_values() {
        let src = vec![7u8; 3 * 4];
        let view = SourceView::<u8, 4>::new(&src, 3, 1);
        let desc = TransformDescriptor::new(&Mat4::IDENTITY, 3, 1);
        let discard = CropSource::new(CropRect::new(1.0, 2.0, 0.0, 1.0));
        let mut row = vec![42u8; 12];
        process_scanline(&desc, &discard, &NearestSampler::new(PassThroughUv), &view, 0, &mut row);
        assert_eq!(&row[0..4], &[42; 4]);
        assert_eq!(&row[4..8], &[7; 4]);
        assert_eq!(&row[8..12], &[42; 4]);
    }
}
