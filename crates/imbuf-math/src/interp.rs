//! Scalar interpolation and wrapping helpers.
//!
//! - Linear interpolation ([`lerp`])
//! - Fractional part ([`fract`])
//! - Clamping ([`clamp`])
//! - Periodic wrapping of coordinates and indices ([`wrap_repeat`], [`wrap_index`])
//!
//! # Usage
//!
//! ```rust
//! use imbuf_math::{lerp, wrap_repeat};
//!
//! assert_eq!(lerp(0.0, 10.0, 0.5), 5.0);
//! assert_eq!(wrap_repeat(-0.5, 4.0), 3.5);
//! ```

/// Linear interpolation between two values.
///
/// Returns `a` when `t = 0.0`, and `b` when `t = 1.0`.
///
/// # Example
///
/// ```rust
/// use imbuf_math::lerp;
///
/// assert_eq!(lerp(0.0, 10.0, 0.0), 0.0);
/// assert_eq!(lerp(0.0, 10.0, 1.0), 10.0);
/// ```
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Returns the fractional part of a value, always in [0, 1).
///
/// # Example
///
/// ```rust
/// use imbuf_math::fract;
///
/// assert!((fract(1.75) - 0.75).abs() < 1e-6);
/// assert!((fract(-0.25) - 0.75).abs() < 1e-6);
/// ```
#[inline]
pub fn fract(x: f32) -> f32 {
    x - x.floor()
}

/// Clamps a value to the range [min, max].
#[inline]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    value.max(min).min(max)
}

/// Floor-modulo of `x` into `[0, period)`.
///
/// Negative remainders are normalized by adding the period once. When that
/// addition rounds up to exactly `period` (tiny negative remainders) the
/// result snaps to 0 so the half-open range holds.
///
/// # Example
///
/// ```rust
/// use imbuf_math::wrap_repeat;
///
/// assert_eq!(wrap_repeat(5.25, 4.0), 1.25);
/// assert_eq!(wrap_repeat(-1.0, 4.0), 3.0);
/// assert_eq!(wrap_repeat(8.0, 4.0), 0.0);
/// ```
#[inline]
pub fn wrap_repeat(x: f32, period: f32) -> f32 {
    let mut r = x % period;
    if r < 0.0 {
        r += period;
    }
    if r >= period { 0.0 } else { r }
}

/// Floor-modulo of an integer index into `[0, len)`.
///
/// # Example
///
/// ```rust
/// use imbuf_math::wrap_index;
///
/// assert_eq!(wrap_index(-1, 4), 3);
/// assert_eq!(wrap_index(9, 4), 1);
/// ```
#[inline]
pub fn wrap_index(i: i32, len: i32) -> i32 {
    i.rem_euclid(len)
}
