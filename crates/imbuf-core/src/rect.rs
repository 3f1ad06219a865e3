//! Source crop rectangle.
//!
//! Coordinates follow the image convention: origin (0, 0) at the
//! **top-left** corner, X to the right, Y downward, measured in source
//! pixels.
//!
//! ```text
//! (0,0) ────────► X
//!   │
//!   │   ┌──────────┐
//!   │   │   Crop   │
//!   │   │  Region  │
//!   │   └──────────┘
//!   ▼
//!   Y
//! ```

/// Fractional rectangle in source pixel space, stored as min/max edges.
///
/// A point is inside when `xmin <= x < xmax` and `ymin <= y < ymax`, so
/// adjacent crop rectangles never both claim the same coordinate.
///
/// # Example
///
/// ```rust
/// use imbuf_core::CropRect;
///
/// let crop = CropRect::new(0.0, 4.0, 0.0, 4.0);
/// assert!(crop.contains(0.0, 0.0));
/// assert!(crop.contains(3.5, 3.5));
/// assert!(!crop.contains(4.0, 2.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CropRect {
    /// Left edge (inclusive)
    pub xmin: f32,
    /// Right edge (exclusive)
    pub xmax: f32,
    /// Top edge (inclusive)
    pub ymin: f32,
    /// Bottom edge (exclusive)
    pub ymax: f32,
}

impl CropRect {
    /// Creates a crop rectangle from its edges.
    #[inline]
    pub const fn new(xmin: f32, xmax: f32, ymin: f32, ymax: f32) -> Self {
        Self {
            xmin,
            xmax,
            ymin,
            ymax,
        }
    }

    /// Returns `true` if (x, y) lies inside the half-open rectangle.
    ///
    /// NaN coordinates are never inside.
    #[inline]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.xmin && x < self.xmax && y >= self.ymin && y < self.ymax
    }
}

impl std::fmt::Display for CropRect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "CropRect(x: {}..{}, y: {}..{})",
            self.xmin, self.xmax, self.ymin, self.ymax
        )
    }
}
