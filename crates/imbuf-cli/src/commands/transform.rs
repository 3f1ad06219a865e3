//! Transform command - affine resampling through the transform engine

use crate::TransformArgs;
use crate::io::{read_png, write_png};
use anyhow::{Context, Result, anyhow};
use imbuf_core::ImageBuffer;
use imbuf_math::{Mat4, Vec2};
use imbuf_transform::transform;

/// Forward transform parameters, in pixels and degrees.
#[derive(Debug, Clone, Copy)]
pub struct Placement {
    pub translate: Vec2,
    pub rotate_deg: f32,
    pub scale: Vec2,
    /// Pivot in source pixels.
    pub pivot: Vec2,
    pub src_size: (u32, u32),
    pub dst_size: (u32, u32),
}

impl Placement {
    /// Builds the destination→source matrix.
    ///
    /// The forward transform scales and rotates about the pivot, moves the
    /// pivot by the size difference between the images (so a centered pivot
    /// stays centered), then translates. The engine needs its inverse.
    pub fn matrix(&self) -> Result<Mat4> {
        let offset = Vec2::new(
            (self.dst_size.0 as f32 - self.src_size.0 as f32) * 0.5,
            (self.dst_size.1 as f32 - self.src_size.1 as f32) * 0.5,
        );
        let target = self.pivot + offset + self.translate;

        let forward = Mat4::translation(target.x, target.y, 0.0)
            * Mat4::rotation_z(self.rotate_deg.to_radians())
            * Mat4::scale(self.scale.x, self.scale.y, 1.0)
            * Mat4::translation(-self.pivot.x, -self.pivot.y, 0.0);

        forward
            .inverse()
            .ok_or_else(|| anyhow!("Transform is not invertible (scale {:?})", self.scale))
    }
}

pub fn run(args: TransformArgs, verbose: u8) -> Result<()> {
    if verbose > 0 {
        println!("Loading: {}", args.input.display());
    }
    let mut src = read_png(&args.input)?.image;
    let (src_w, src_h) = src.dimensions();
    let (dst_w, dst_h) = args.size.unwrap_or((src_w, src_h));

    let placement = Placement {
        translate: args.translate.unwrap_or(Vec2::ZERO),
        rotate_deg: args.rotate,
        scale: args.scale.unwrap_or(Vec2::ONE),
        pivot: args
            .pivot
            .unwrap_or(Vec2::new(src_w as f32 * 0.5, src_h as f32 * 0.5)),
        src_size: (src_w, src_h),
        dst_size: (dst_w, dst_h),
    };
    let matrix = placement.matrix()?;

    let mut dst = if args.float {
        src.ensure_float();
        src.free_byte();
        ImageBuffer::new_float(dst_w, dst_h, 4)?
    } else {
        ImageBuffer::new_byte(dst_w, dst_h)?
    };

    if verbose > 0 {
        println!(
            "Transform: {}x{} -> {}x{} ({}, {}, {})",
            src_w,
            src_h,
            dst_w,
            dst_h,
            args.mode,
            args.filter,
            if args.float { "float" } else { "byte" }
        );
    }

    transform(&src, &mut dst, args.mode, args.filter, &matrix, args.crop.as_ref())
        .with_context(|| format!("Failed to transform {}", args.input.display()))?;

    write_png(&args.output, &dst)?;
    if verbose > 0 {
        println!("Saved: {}", args.output.display());
    }
    Ok(())
}
