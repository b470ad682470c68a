//! Caps on what the decoder will allocate for.
//!
//! Dimensions come from untrusted input, so they are checked against
//! [`Limits`] before the pixel buffer is reserved.

use crate::{error::DecodeError, model::QoiHeader};

/// Largest image [`Limits::default`] accepts.
pub const DEFAULT_MAX_PIXELS: u64 = 400_000_000;

/// Decode resource limits. `None` means no limit for that dimension.
///
/// ```
/// use qoi_codec::Limits;
///
/// let limits = Limits::none().with_max_width(4096).with_max_pixels(16_000_000);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Limits {
    pub max_width: Option<u32>,
    pub max_height: Option<u32>,
    pub max_pixels: Option<u64>,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_width: None,
            max_height: None,
            max_pixels: Some(DEFAULT_MAX_PIXELS),
        }
    }
}

impl Limits {
    /// No limits at all.
    pub fn none() -> Self {
        Self {
            max_width: None,
            max_height: None,
            max_pixels: None,
        }
    }

    pub fn with_max_width(mut self, width: u32) -> Self {
        self.max_width = Some(width);
        self
    }

    pub fn with_max_height(mut self, height: u32) -> Self {
        self.max_height = Some(height);
        self
    }

    pub fn with_max_pixels(mut self, pixels: u64) -> Self {
        self.max_pixels = Some(pixels);
        self
    }

    pub fn check(&self, header: &QoiHeader) -> Result<(), DecodeError> {
        let within = self.max_width.map_or(true, |max| header.width <= max)
            && self.max_height.map_or(true, |max| header.height <= max)
            && self.max_pixels.map_or(true, |max| header.pixel_count() <= max);

        if within {
            Ok(())
        } else {
            Err(DecodeError::LimitExceeded {
                width: header.width,
                height: header.height,
            })
        }
    }
}
