//! Behavioural properties of the transform engine.

use approx::assert_relative_eq;
use imbuf_core::{CropRect, ImageBuffer};
use imbuf_math::Mat4;
use imbuf_transform::{transform, Filter, TransformDescriptor, TransformError, TransformMode};

/// Deterministic float pattern in [0, 1).
fn pattern_float(width: u32, height: u32, channels: usize) -> ImageBuffer {
    let len = width as usize * height as usize * channels;
    let data = (0..len)
        .map(|i| ((i * 37 + 11) % 97) as f32 / 97.0)
        .collect();
    ImageBuffer::from_float(width, height, channels, data).unwrap()
}

fn pattern_byte(width: u32, height: u32) -> ImageBuffer {
    let len = width as usize * height as usize * 4;
    let data = (0..len).map(|i| ((i * 53 + 7) % 256) as u8).collect();
    ImageBuffer::from_bytes(width, height, data).unwrap()
}

fn run(
    src: &ImageBuffer,
    dst: &mut ImageBuffer,
    mode: TransformMode,
    filter: Filter,
    m: &Mat4,
    crop: Option<&CropRect>,
) {
    transform(src, dst, mode, filter, m, crop).unwrap();
}

// ============================================================================
// Identity and filter agreement
// ============================================================================

#[test]
fn identity_nearest_reproduces_float_source() {
    let src = pattern_float(7, 5, 4);
    let mut dst = ImageBuffer::new_float(7, 5, 4).unwrap();
    run(&src, &mut dst, TransformMode::Regular, Filter::Nearest, &Mat4::IDENTITY, None);
    assert_eq!(dst.float_data(), src.float_data());
}

#[test]
fn identity_nearest_reproduces_byte_source() {
    let src = pattern_byte(9, 4);
    let mut dst = ImageBuffer::new_byte(9, 4).unwrap();
    run(&src, &mut dst, TransformMode::Regular, Filter::Nearest, &Mat4::IDENTITY, None);
    assert_eq!(dst.byte_data(), src.byte_data());
}

#[test]
fn bilinear_matches_nearest_on_pixel_centers() {
    let matrices = [
        Mat4::IDENTITY,
        Mat4::translation(2.0, -1.0, 0.0),
        Mat4::translation(-3.0, 4.0, 0.0),
    ];
    for mode in [TransformMode::Regular, TransformMode::WrapRepeat] {
        for m in &matrices {
            for channels in 1..=4 {
                let src = pattern_float(6, 6, channels);
                let mut nearest = ImageBuffer::new_float(6, 6, 4).unwrap();
                let mut bilinear = ImageBuffer::new_float(6, 6, 4).unwrap();
                run(&src, &mut nearest, mode, Filter::Nearest, m, None);
                run(&src, &mut bilinear, mode, Filter::Bilinear, m, None);
                assert_eq!(nearest, bilinear, "{mode} {channels}ch {m:?}");
            }

            let src = pattern_byte(6, 6);
            let mut nearest = ImageBuffer::new_byte(6, 6).unwrap();
            let mut bilinear = ImageBuffer::new_byte(6, 6).unwrap();
            run(&src, &mut nearest, mode, Filter::Nearest, m, None);
            run(&src, &mut bilinear, mode, Filter::Bilinear, m, None);
            assert_eq!(nearest, bilinear, "{mode} bytes {m:?}");
        }
    }
}

#[test]
fn regular_mode_outside_source_is_transparent() {
    let src = ImageBuffer::filled_float(4, 4, &[1.0, 1.0, 1.0, 1.0]).unwrap();
    let mut dst = ImageBuffer::filled_float(4, 4, &[0.5, 0.5, 0.5, 0.5]).unwrap();
    let m = Mat4::translation(10.0, 0.0, 0.0);
    run(&src, &mut dst, TransformMode::Regular, Filter::Nearest, &m, None);
    assert!(dst.float_data().unwrap().iter().all(|&v| v == 0.0));
}

// ============================================================================
// Crop-source
// ============================================================================

#[test]
fn crop_source_leaves_outside_pixels_untouched() {
    let sentinel = [0.25, 0.5, 0.75, 0.125];
    let crop = CropRect::new(1.0, 5.0, 2.0, 6.0);
    let m = Mat4::translation(-1.5, 0.5, 0.0) * Mat4::scale(0.75, 0.75, 1.0);

    for filter in Filter::ALL {
        let src = pattern_float(8, 8, 4);
        let mut dst = ImageBuffer::filled_float(10, 10, &sentinel).unwrap();
        run(&src, &mut dst, TransformMode::CropSource, filter, &m, Some(&crop));

        let desc = TransformDescriptor::new(&m, 8, 8);
        let mut kept = 0;
        for y in 0..10u32 {
            for x in 0..10u32 {
                let uv = desc.uv_at(x as usize, y as usize);
                let px = dst.float_pixel(x, y).unwrap();
                if crop.contains(uv.x, uv.y) {
                    kept += 1;
                } else {
                    assert_eq!(px, &sentinel[..], "{filter} ({x}, {y})");
                }
            }
        }
        assert!(kept > 0);
    }
}

#[test]
fn crop_source_bytes_untouched() {
    let crop = CropRect::new(0.0, 2.0, 0.0, 2.0);
    let src = pattern_byte(4, 4);
    let mut dst = ImageBuffer::filled_byte(4, 4, [1, 2, 3, 4]).unwrap();
    run(
        &src,
        &mut dst,
        TransformMode::CropSource,
        Filter::Nearest,
        &Mat4::IDENTITY,
        Some(&crop),
    );
    for y in 0..4 {
        for x in 0..4 {
            let px = dst.byte_pixel(x, y).unwrap();
            if x < 2 && y < 2 {
                assert_eq!(px, src.byte_pixel(x, y).unwrap());
            } else {
                assert_eq!(px, &[1, 2, 3, 4]);
            }
        }
    }
}

// ============================================================================
// Wrap-repeat
// ============================================================================

#[test]
fn wrap_repeat_is_periodic() {
    let (w, h) = (5.0f32, 3.0f32);
    let base = Mat4::translation(0.25, -0.75, 0.0) * Mat4::scale(0.5, 1.5, 1.0);
    for filter in Filter::ALL {
        let src = pattern_float(5, 3, 3);
        let mut reference = ImageBuffer::new_float(12, 9, 4).unwrap();
        run(&src, &mut reference, TransformMode::WrapRepeat, filter, &base, None);

        for (k, m) in [(1, 0), (-2, 1), (3, -4), (-1, -1)] {
            let shifted =
                Mat4::translation(k as f32 * w, m as f32 * h, 0.0) * base;
            let mut dst = ImageBuffer::new_float(12, 9, 4).unwrap();
            run(&src, &mut dst, TransformMode::WrapRepeat, filter, &shifted, None);
            assert_eq!(dst, reference, "{filter} k={k} m={m}");
        }
    }
}

#[test]
fn wrap_repeat_bytes_periodic() {
    let src = pattern_byte(4, 4);
    let mut reference = ImageBuffer::new_byte(6, 6).unwrap();
    let base = Mat4::translation(0.5, 0.25, 0.0);
    run(&src, &mut reference, TransformMode::WrapRepeat, Filter::Bilinear, &base, None);

    let shifted = Mat4::translation(-8.0, 12.0, 0.0) * base;
    let mut dst = ImageBuffer::new_byte(6, 6).unwrap();
    run(&src, &mut dst, TransformMode::WrapRepeat, Filter::Bilinear, &shifted, None);
    assert_eq!(dst, reference);
}

// ============================================================================
// Channel conversion
// ============================================================================

#[test]
fn single_channel_broadcasts_to_rgb() {
    let src = pattern_float(4, 4, 1);
    let m = Mat4::translation(0.3, 0.6, 0.0) * Mat4::rotation_z(0.4);
    for filter in Filter::ALL {
        let mut dst = ImageBuffer::new_float(5, 5, 4).unwrap();
        run(&src, &mut dst, TransformMode::WrapRepeat, filter, &m, None);
        for px in dst.float_data().unwrap().chunks_exact(4) {
            assert_eq!(px[0], px[1]);
            assert_eq!(px[1], px[2]);
            assert_eq!(px[3], 1.0);
        }
    }
}

#[test]
fn two_and_three_channel_sources_widen() {
    let src2 = ImageBuffer::filled_float(2, 2, &[0.1, 0.2]).unwrap();
    let src3 = ImageBuffer::filled_float(2, 2, &[0.1, 0.2, 0.3]).unwrap();
    let mut dst = ImageBuffer::new_float(2, 2, 4).unwrap();

    run(&src2, &mut dst, TransformMode::Regular, Filter::Nearest, &Mat4::IDENTITY, None);
    assert_eq!(dst.float_pixel(1, 1), Some(&[0.1, 0.2, 0.0, 1.0][..]));

    run(&src3, &mut dst, TransformMode::Regular, Filter::Nearest, &Mat4::IDENTITY, None);
    assert_eq!(dst.float_pixel(0, 1), Some(&[0.1, 0.2, 0.3, 1.0][..]));
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn scenario_uniform_red() {
    let red = [1.0, 0.0, 0.0, 1.0];
    let src = ImageBuffer::filled_float(4, 4, &red).unwrap();
    for (w, h) in [(4, 4), (1, 1), (3, 2)] {
        let mut dst = ImageBuffer::new_float(w, h, 4).unwrap();
        run(&src, &mut dst, TransformMode::Regular, Filter::Nearest, &Mat4::IDENTITY, None);
        for px in dst.float_data().unwrap().chunks_exact(4) {
            assert_eq!(px, &red[..]);
        }
    }
}

#[test]
fn scenario_bilinear_center_average() {
    let colors = [
        [1.0, 0.0, 0.0, 1.0],
        [0.0, 1.0, 0.0, 1.0],
        [0.0, 0.0, 1.0, 1.0],
        [1.0, 1.0, 1.0, 0.0],
    ];
    let data: Vec<f32> = colors.iter().flatten().copied().collect();
    let src = ImageBuffer::from_float(2, 2, 4, data).unwrap();

    // The single destination pixel center lands on the shared corner of the
    // four source pixels.
    let mut dst = ImageBuffer::new_float(1, 1, 4).unwrap();
    let m = Mat4::translation(0.5, 0.5, 0.0);
    run(&src, &mut dst, TransformMode::Regular, Filter::Bilinear, &m, None);

    let px = dst.float_pixel(0, 0).unwrap();
    for c in 0..4 {
        let avg = colors.iter().map(|p| p[c]).sum::<f32>() / 4.0;
        assert_relative_eq!(px[c], avg, epsilon = 1e-6);
    }
}

#[test]
fn scenario_crop_top_left_quadrant() {
    let sentinel = [-1.0, -1.0, -1.0, -1.0];
    let src = pattern_float(8, 8, 4);
    let mut dst = ImageBuffer::filled_float(8, 8, &sentinel).unwrap();
    let crop = CropRect::new(0.0, 4.0, 0.0, 4.0);
    run(
        &src,
        &mut dst,
        TransformMode::CropSource,
        Filter::Nearest,
        &Mat4::IDENTITY,
        Some(&crop),
    );
    for y in 0..8 {
        for x in 0..8 {
            let px = dst.float_pixel(x, y).unwrap();
            if x < 4 && y < 4 {
                assert_eq!(px, src.float_pixel(x, y).unwrap());
            } else {
                assert_eq!(px, &sentinel[..]);
            }
        }
    }
}

#[test]
fn scenario_single_pixel_tiling() {
    let value = [0.2, 0.4, 0.6, 1.0];
    let src = ImageBuffer::filled_float(1, 1, &value).unwrap();
    let matrices = [
        Mat4::IDENTITY,
        Mat4::translation(-13.7, 4.2, 0.0),
        Mat4::rotation_z(1.1) * Mat4::scale(3.5, 0.2, 1.0),
        Mat4::scale(-2.0, 7.0, 1.0),
        Mat4::translation(0.37, 0.91, 0.0) * Mat4::rotation_z(-0.4),
    ];
    for m in &matrices {
        let mut dst = ImageBuffer::new_float(6, 3, 4).unwrap();
        run(&src, &mut dst, TransformMode::WrapRepeat, Filter::Nearest, m, None);
        for px in dst.float_data().unwrap().chunks_exact(4) {
            assert_eq!(px, &value[..]);
        }

        // Every bilinear neighbour is the same pixel, so the blend is exact.
        run(&src, &mut dst, TransformMode::WrapRepeat, Filter::Bilinear, m, None);
        for px in dst.float_data().unwrap().chunks_exact(4) {
            assert_eq!(px, &value[..], "{m:?}");
        }
    }
}

// ============================================================================
// Storage selection and errors
// ============================================================================

#[test]
fn byte_pipeline_used_when_float_missing_on_one_side() {
    let mut src = pattern_float(3, 3, 3);
    src.ensure_byte();
    let mut dst = ImageBuffer::new_byte(3, 3).unwrap();
    run(&src, &mut dst, TransformMode::Regular, Filter::Nearest, &Mat4::IDENTITY, None);
    assert_eq!(dst.byte_data(), src.byte_data());
}

#[test]
fn missing_storage_is_noop() {
    let mut src = ImageBuffer::filled_byte(2, 2, [10, 20, 30, 40]).unwrap();
    src.free_byte();
    let mut dst = ImageBuffer::filled_byte(2, 2, [1, 1, 1, 1]).unwrap();
    let before = dst.clone();
    run(&src, &mut dst, TransformMode::WrapRepeat, Filter::Nearest, &Mat4::IDENTITY, None);
    assert_eq!(dst, before);
}

#[test]
fn crop_rectangle_must_match_mode() {
    let src = pattern_float(2, 2, 4);
    let mut dst = ImageBuffer::new_float(2, 2, 4).unwrap();
    let crop = CropRect::new(0.0, 1.0, 0.0, 1.0);

    let err = transform(
        &src,
        &mut dst,
        TransformMode::CropSource,
        Filter::Nearest,
        &Mat4::IDENTITY,
        None,
    );
    assert!(matches!(err, Err(TransformError::MissingCropRect)));

    for mode in [TransformMode::Regular, TransformMode::WrapRepeat] {
        let err = transform(&src, &mut dst, mode, Filter::Bilinear, &Mat4::IDENTITY, Some(&crop));
        assert!(matches!(err, Err(TransformError::UnexpectedCropRect { .. })));
    }
}
