//! Image buffer with float and/or byte pixel storage.
//!
//! [`ImageBuffer`] is the raster type the transform engine reads from and
//! writes into. A buffer carries up to two storage representations:
//!
//! - **float**: `f32` per channel, 1 to 4 channels per pixel
//! - **byte**: `u8` per channel, always 4 channels (RGBA)
//!
//! Operations pick the representation both sides share; the conversion
//! helpers ([`ensure_float`](ImageBuffer::ensure_float),
//! [`ensure_byte`](ImageBuffer::ensure_byte)) and the release helpers
//! ([`free_float`](ImageBuffer::free_float),
//! [`free_byte`](ImageBuffer::free_byte)) let a caller decide which one.
//!
//! # Memory Layout
//!
//! Pixels are stored **row-major**, top-to-bottom, channels interleaved:
//!
//! ```text
//! Memory: [R G B A R G B A ...]  ← Row 0
//!         [R G B A R G B A ...]  ← Row 1
//!         ...
//! ```
//!
//! # Usage
//!
//! ```rust
//! use imbuf_core::ImageBuffer;
//!
//! let mut img = ImageBuffer::new_float(64, 32, 4).unwrap();
//! img.set_float_pixel(3, 2, &[1.0, 0.5, 0.25, 1.0]).unwrap();
//! assert_eq!(img.float_pixel(3, 2), Some(&[1.0, 0.5, 0.25, 1.0][..]));
//!
//! // Derive 8-bit storage from the float pixels
//! img.ensure_byte();
//! assert_eq!(img.byte_pixel(3, 2), Some(&[255, 128, 64, 255][..]));
//! ```

use crate::{Error, Result};
use tracing::trace;

/// Channel count of byte storage.
pub const BYTE_CHANNELS: usize = 4;

/// Maximum channel count of float storage.
pub const MAX_FLOAT_CHANNELS: usize = 4;

/// Pixel storage representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKind {
    /// 32-bit float per channel.
    Float,
    /// 8-bit unsigned per channel.
    Byte,
}

impl std::fmt::Display for StorageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageKind::Float => f.write_str("float"),
            StorageKind::Byte => f.write_str("byte"),
        }
    }
}

/// Widens a 1 to 4 channel float pixel to RGBA.
///
/// - 1 channel: broadcast to RGB, alpha 1
/// - 2 channels: copied to R, G; B = 0, alpha 1
/// - 3 channels: RGB copied, alpha 1
/// - 4 channels: copied
///
/// Returns `None` for any other length.
///
/// # Example
///
/// ```rust
/// use imbuf_core::widen_to_rgba;
///
/// assert_eq!(widen_to_rgba(&[0.5]), Some([0.5, 0.5, 0.5, 1.0]));
/// assert_eq!(widen_to_rgba(&[0.1, 0.2]), Some([0.1, 0.2, 0.0, 1.0]));
/// assert_eq!(widen_to_rgba(&[]), None);
/// ```
#[inline]
pub fn widen_to_rgba(px: &[f32]) -> Option<[f32; 4]> {
    match *px {
        [v] => Some([v, v, v, 1.0]),
        [r, g] => Some([r, g, 0.0, 1.0]),
        [r, g, b] => Some([r, g, b, 1.0]),
        [r, g, b, a] => Some([r, g, b, a]),
        _ => None,
    }
}

/// Converts a float channel value to 8 bits, clamping to [0, 1].
#[inline]
pub fn unit_float_to_byte(v: f32) -> u8 {
    if v.is_nan() || v <= 0.0 {
        0
    } else if v >= 1.0 {
        255
    } else {
        (v * 255.0 + 0.5) as u8
    }
}

/// Converts an 8-bit channel value to float in [0, 1].
#[inline]
pub fn byte_to_unit_float(v: u8) -> f32 {
    v as f32 * (1.0 / 255.0)
}

/// 2D raster with optional float and byte pixel storage.
///
/// # Invariants
///
/// - `width` and `height` are positive
/// - float storage, when present, holds `width * height * channels` values
///   with `channels` in 1..=4
/// - byte storage, when present, holds `width * height * 4` values
///
/// # Example
///
/// ```rust
/// use imbuf_core::ImageBuffer;
///
/// let img = ImageBuffer::new_byte(16, 16).unwrap();
/// assert!(img.has_byte());
/// assert!(!img.has_float());
/// assert_eq!(img.channels(), 4);
/// ```
#[derive(Clone, PartialEq)]
pub struct ImageBuffer {
    width: u32,
    height: u32,
    /// Channels per pixel of the float storage (4 when only bytes exist).
    channels: usize,
    float_data: Option<Vec<f32>>,
    byte_data: Option<Vec<u8>>,
}

/// Validates dimensions and returns `width * height * channels`.
fn element_count(width: u32, height: u32, channels: usize) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(Error::invalid_dimensions(
            width,
            height,
            "width and height must be > 0",
        ));
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(channels))
        .ok_or_else(|| Error::invalid_dimensions(width, height, "buffer size overflows"))
}

fn check_float_channels(channels: usize) -> Result<()> {
    if channels == 0 || channels > MAX_FLOAT_CHANNELS {
        return Err(Error::invalid_channels(channels, "float"));
    }
    Ok(())
}

impl ImageBuffer {
    /// Creates a zero-filled float buffer with `channels` channels per pixel.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidDimensions`] for zero or overflowing sizes,
    /// [`Error::InvalidChannels`] unless `channels` is 1..=4.
    pub fn new_float(width: u32, height: u32, channels: usize) -> Result<Self> {
        check_float_channels(channels)?;
        let len = element_count(width, height, channels)?;
        Ok(Self {
            width,
            height,
            channels,
            float_data: Some(vec![0.0; len]),
            byte_data: None,
        })
    }

    /// Creates a zero-filled 4-channel byte buffer.
    pub fn new_byte(width: u32, height: u32) -> Result<Self> {
        let len = element_count(width, height, BYTE_CHANNELS)?;
        Ok(Self {
            width,
            height,
            channels: BYTE_CHANNELS,
            float_data: None,
            byte_data: Some(vec![0; len]),
        })
    }

    /// Wraps existing float pixel data.
    ///
    /// # Example
    ///
    /// ```rust
    /// use imbuf_core::ImageBuffer;
    ///
    /// let img = ImageBuffer::from_float(2, 1, 1, vec![0.25, 0.75]).unwrap();
    /// assert_eq!(img.float_pixel(1, 0), Some(&[0.75][..]));
    ///
    /// assert!(ImageBuffer::from_float(2, 2, 1, vec![0.0; 3]).is_err());
    /// ```
    pub fn from_float(width: u32, height: u32, channels: usize, data: Vec<f32>) -> Result<Self> {
        check_float_channels(channels)?;
        let len = element_count(width, height, channels)?;
        if data.len() != len {
            return Err(Error::data_length(len, data.len()));
        }
        Ok(Self {
            width,
            height,
            channels,
            float_data: Some(data),
            byte_data: None,
        })
    }

    /// Wraps existing RGBA byte pixel data.
    pub fn from_bytes(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let len = element_count(width, height, BYTE_CHANNELS)?;
        if data.len() != len {
            return Err(Error::data_length(len, data.len()));
        }
        Ok(Self {
            width,
            height,
            channels: BYTE_CHANNELS,
            float_data: None,
            byte_data: Some(data),
        })
    }

    /// Creates a float buffer with every pixel set to `pixel`.
    ///
    /// The channel count is `pixel.len()`.
    pub fn filled_float(width: u32, height: u32, pixel: &[f32]) -> Result<Self> {
        let mut img = Self::new_float(width, height, pixel.len())?;
        img.fill_float(pixel)?;
        Ok(img)
    }

    /// Creates a byte buffer with every pixel set to `pixel`.
    pub fn filled_byte(width: u32, height: u32, pixel: [u8; 4]) -> Result<Self> {
        let mut img = Self::new_byte(width, height)?;
        img.fill_byte(pixel)?;
        Ok(img)
    }

    /// Returns the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the image dimensions as (width, height).
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Channels per pixel of the float storage.
    ///
    /// Byte storage is always [`BYTE_CHANNELS`] wide regardless.
    #[inline]
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Returns the total number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Returns `true` if the buffer carries float storage.
    #[inline]
    pub fn has_float(&self) -> bool {
        self.float_data.is_some()
    }

    /// Returns `true` if the buffer carries byte storage.
    #[inline]
    pub fn has_byte(&self) -> bool {
        self.byte_data.is_some()
    }

    /// Float pixel data, if present.
    #[inline]
    pub fn float_data(&self) -> Option<&[f32]> {
        self.float_data.as_deref()
    }

    /// Mutable float pixel data, if present.
    #[inline]
    pub fn float_data_mut(&mut self) -> Option<&mut [f32]> {
        self.float_data.as_deref_mut()
    }

    /// Byte pixel data, if present.
    #[inline]
    pub fn byte_data(&self) -> Option<&[u8]> {
        self.byte_data.as_deref()
    }

    /// Mutable byte pixel data, if present.
    #[inline]
    pub fn byte_data_mut(&mut self) -> Option<&mut [u8]> {
        self.byte_data.as_deref_mut()
    }

    #[inline]
    fn pixel_index(&self, x: u32, y: u32, channels: usize) -> Option<usize> {
        if x < self.width && y < self.height {
            Some((y as usize * self.width as usize + x as usize) * channels)
        } else {
            None
        }
    }

    /// Returns the float pixel at (x, y), or `None` if out of bounds or
    /// float storage is absent.
    pub fn float_pixel(&self, x: u32, y: u32) -> Option<&[f32]> {
        let data = self.float_data.as_deref()?;
        let i = self.pixel_index(x, y, self.channels)?;
        Some(&data[i..i + self.channels])
    }

    /// Returns the byte pixel at (x, y), or `None` if out of bounds or
    /// byte storage is absent.
    pub fn byte_pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        let data = self.byte_data.as_deref()?;
        let i = self.pixel_index(x, y, BYTE_CHANNELS)?;
        Some(&data[i..i + BYTE_CHANNELS])
    }

    /// Sets the float pixel at (x, y).
    ///
    /// # Errors
    ///
    /// [`Error::MissingStorage`], [`Error::OutOfBounds`], or
    /// [`Error::DataLength`] when `pixel.len()` differs from the channel count.
    pub fn set_float_pixel(&mut self, x: u32, y: u32, pixel: &[f32]) -> Result<()> {
        if pixel.len() != self.channels {
            return Err(Error::data_length(self.channels, pixel.len()));
        }
        let i = self
            .pixel_index(x, y, self.channels)
            .ok_or_else(|| Error::out_of_bounds(x, y, self.width, self.height))?;
        let data = self
            .float_data
            .as_deref_mut()
            .ok_or(Error::MissingStorage("float"))?;
        data[i..i + pixel.len()].copy_from_slice(pixel);
        Ok(())
    }

    /// Sets the byte pixel at (x, y).
    pub fn set_byte_pixel(&mut self, x: u32, y: u32, pixel: [u8; 4]) -> Result<()> {
        let i = self
            .pixel_index(x, y, BYTE_CHANNELS)
            .ok_or_else(|| Error::out_of_bounds(x, y, self.width, self.height))?;
        let data = self
            .byte_data
            .as_deref_mut()
            .ok_or(Error::MissingStorage("byte"))?;
        data[i..i + BYTE_CHANNELS].copy_from_slice(&pixel);
        Ok(())
    }

    /// Fills the float storage with a pixel value.
    pub fn fill_float(&mut self, pixel: &[f32]) -> Result<()> {
        if pixel.len() != self.channels {
            return Err(Error::data_length(self.channels, pixel.len()));
        }
        let data = self
            .float_data
            .as_deref_mut()
            .ok_or(Error::MissingStorage("float"))?;
        for chunk in data.chunks_exact_mut(pixel.len()) {
            chunk.copy_from_slice(pixel);
        }
        Ok(())
    }

    /// Fills the byte storage with a pixel value.
    pub fn fill_byte(&mut self, pixel: [u8; 4]) -> Result<()> {
        let data = self
            .byte_data
            .as_deref_mut()
            .ok_or(Error::MissingStorage("byte"))?;
        for chunk in data.chunks_exact_mut(BYTE_CHANNELS) {
            chunk.copy_from_slice(&pixel);
        }
        Ok(())
    }

    /// Creates float storage from the byte storage if it is missing.
    ///
    /// The new float storage has 4 channels with values `byte / 255`.
    /// Does nothing when float storage already exists or there are no bytes.
    pub fn ensure_float(&mut self) {
        if self.float_data.is_some() {
            return;
        }
        let Some(bytes) = self.byte_data.as_deref() else {
            return;
        };
        trace!(width = self.width, height = self.height, "ensure_float");
        self.float_data = Some(bytes.iter().map(|&b| byte_to_unit_float(b)).collect());
        self.channels = BYTE_CHANNELS;
    }

    /// Creates RGBA byte storage from the float storage if it is missing.
    ///
    /// Float pixels are widened to RGBA, clamped to [0, 1] and rounded.
    /// Does nothing when byte storage already exists or there are no floats.
    pub fn ensure_byte(&mut self) {
        if self.byte_data.is_some() {
            return;
        }
        let Some(floats) = self.float_data.as_deref() else {
            return;
        };
        trace!(width = self.width, height = self.height, channels = self.channels, "ensure_byte");
        let mut bytes = Vec::with_capacity(self.pixel_count() * BYTE_CHANNELS);
        for px in floats.chunks_exact(self.channels) {
            // channel count is validated on construction
            let rgba = widen_to_rgba(px).unwrap_or([0.0; 4]);
            bytes.extend(rgba.iter().map(|&v| unit_float_to_byte(v)));
        }
        self.byte_data = Some(bytes);
    }

    /// Drops the float storage.
    pub fn free_float(&mut self) {
        self.float_data = None;
        self.channels = BYTE_CHANNELS;
    }

    /// Drops the byte storage.
    pub fn free_byte(&mut self) {
        self.byte_data = None;
    }
}

impl std::fmt::Debug for ImageBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("channels", &self.channels)
            .field("float", &self.float_data.is_some())
            .field("byte", &self.byte_data.is_some())
            .finish()
    }
}
