//! Channel conversion into the 4-channel destination layout.
//!
//! | storage | source | destination                         |
//! |---------|--------|-------------------------------------|
//! | byte    | 4      | copy                                |
//! | float   | 4      | copy                                |
//! | float   | 3      | `(r, g, b, 1)`                      |
//! | float   | 2      | `(r, g, 0, 1)`                      |
//! | float   | 1      | `(v, v, v, 1)`                      |
//!
//! Every other pairing is rejected by [`check_conversion`] before any pixel
//! is touched.

use crate::pixel::Storage;
use crate::{TransformError, TransformResult};
use imbuf_core::StorageKind;

/// Channels per destination pixel.
pub const DST_CHANNELS: usize = 4;

/// Writes an `N`-channel sample into a 4-channel destination pixel.
pub trait ChannelConvert<const N: usize>: Storage {
    /// Converts `sample` into `out` (`out.len() == DST_CHANNELS`).
    fn convert(sample: &[Self; N], out: &mut [Self]);
}

impl ChannelConvert<4> for u8 {
    #[inline(always)]
    fn convert(sample: &[u8; 4], out: &mut [u8]) {
        out.copy_from_slice(sample);
    }
}

impl ChannelConvert<4> for f32 {
    #[inline(always)]
    fn convert(sample: &[f32; 4], out: &mut [f32]) {
        out.copy_from_slice(sample);
    }
}

impl ChannelConvert<3> for f32 {
    #[inline(always)]
    fn convert(sample: &[f32; 3], out: &mut [f32]) {
        out[..3].copy_from_slice(sample);
        out[3] = 1.0;
    }
}

impl ChannelConvert<2> for f32 {
    #[inline(always)]
    fn convert(sample: &[f32; 2], out: &mut [f32]) {
        out[0] = sample[0];
        out[1] = sample[1];
        out[2] = 0.0;
        out[3] = 1.0;
    }
}

impl ChannelConvert<1> for f32 {
    #[inline(always)]
    fn convert(sample: &[f32; 1], out: &mut [f32]) {
        out[0] = sample[0];
        out[1] = sample[0];
        out[2] = sample[0];
        out[3] = 1.0;
    }
}

/// Validates a source/destination channel pairing for a storage kind.
pub fn check_conversion(storage: StorageKind, src: usize, dst: usize) -> TransformResult<()> {
    let supported = match storage {
        StorageKind::Float => dst == DST_CHANNELS && (1..=4).contains(&src),
        StorageKind::Byte => dst == DST_CHANNELS && src == 4,
    };
    if supported {
        Ok(())
    } else {
        Err(TransformError::UnsupportedChannelConversion { storage, src, dst })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_widening() {
        let mut out = [9.0f32; 4];
        <f32 as ChannelConvert<1>>::convert(&[0.25], &mut out);
        assert_eq!(out, [0.25, 0.25, 0.25, 1.0]);
        <f32 as ChannelConvert<2>>::convert(&[0.1, 0.2], &mut out);
        assert_eq!(out, [0.1, 0.2, 0.0, 1.0]);
        <f32 as ChannelConvert<3>>::convert(&[0.1, 0.2, 0.3], &mut out);
        assert_eq!(out, [0.1, 0.2, 0.3, 1.0]);
        <f32 as ChannelConvert<4>>::convert(&[0.1, 0.2, 0.3, 0.4], &mut out);
        assert_eq!(out, [0.1, 0.2, 0.3, 0.4]);
    }

    #[test]
    fn test_byte_copy() {
        let mut out = [0u8; 4];
        <u8 as ChannelConvert<4>>::convert(&[1, 2, 3, 4], &mut out);
        assert_eq!(out, [1, 2, 3, 4]);
    }

    #[test]
    fn test_check_conversion() {
        for src in 1..=4 {
            assert!(check_conversion(StorageKind::Float, src, 4).is_ok());
        }
        assert!(check_conversion(StorageKind::Byte, 4, 4).is_ok());

        assert!(matches!(
            check_conversion(StorageKind::Float, 4, 3),
            Err(TransformError::UnsupportedChannelConversion { src: 4, dst: 3, .. })
        ));
        assert!(check_conversion(StorageKind::Float, 5, 4).is_err());
        assert!(check_conversion(StorageKind::Float, 0, 4).is_err());
        assert!(check_conversion(StorageKind::Byte, 3, 4).is_err());
    }
}
