use core::fmt;

use crate::constants::SEEN_PIXELS_LENGTH;

/// A single RGBA8 pixel.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pixel {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl Pixel {
    /// The pixel both encoder and decoder treat as "previous" before the first
    /// pixel: opaque black.
    pub const START: Pixel = Pixel::new(0, 0, 0, 255);

    pub const fn new(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    pub const fn from_array([red, green, blue, alpha]: [u8; 4]) -> Self {
        Self::new(red, green, blue, alpha)
    }

    pub const fn to_array(self) -> [u8; 4] {
        [self.red, self.green, self.blue, self.alpha]
    }

    /// Applies signed channel deltas to `previous_pixel` with 8-bit wraparound.
    /// Alpha is carried over unchanged.
    pub fn from_diffs(previous_pixel: &Self, dr: i8, dg: i8, db: i8) -> Self {
        Self {
            red: (previous_pixel.red as i8).wrapping_add(dr) as u8,
            green: (previous_pixel.green as i8).wrapping_add(dg) as u8,
            blue: (previous_pixel.blue as i8).wrapping_add(db) as u8,
            alpha: previous_pixel.alpha,
        }
    }

    /// Signed `(dr, dg, db)` from `previous_pixel` to `self`.
    ///
    /// Channels are reinterpreted as two's-complement `i8` and subtracted with
    /// wraparound, so `255 -> 0` is a delta of `+1` and `0 -> 255` is `-1`.
    #[inline]
    pub fn diff(&self, previous_pixel: &Self) -> (i8, i8, i8) {
        (
            (self.red as i8).wrapping_sub(previous_pixel.red as i8),
            (self.green as i8).wrapping_sub(previous_pixel.green as i8),
            (self.blue as i8).wrapping_sub(previous_pixel.blue as i8),
        )
    }

    /// Slot this pixel occupies in the seen-pixel cache.
    #[inline]
    pub fn index_position(&self) -> usize {
        ((self.red as u16 * 3
            + self.green as u16 * 5
            + self.blue as u16 * 7
            + self.alpha as u16 * 11)
            % SEEN_PIXELS_LENGTH as u16) as usize
    }
}

impl From<[u8; 4]> for Pixel {
    fn from(channels: [u8; 4]) -> Self {
        Self::from_array(channels)
    }
}

impl From<Pixel> for [u8; 4] {
    fn from(pixel: Pixel) -> Self {
        pixel.to_array()
    }
}

/// The 64-slot table of recently seen pixels. Slots start as transparent
/// black and are overwritten without probing.
#[derive(Debug)]
pub(crate) struct SeenPixels {
    inner: [Pixel; SEEN_PIXELS_LENGTH],
}

impl SeenPixels {
    pub(crate) fn new() -> Self {
        Self {
            inner: [Pixel::default(); SEEN_PIXELS_LENGTH],
        }
    }

    pub(crate) fn get(&self, idx: usize) -> Pixel {
        self.inner[idx]
    }

    pub(crate) fn insert(&mut self, pixel: Pixel) {
        self.inner[pixel.index_position()] = pixel;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QoiHeader {
    pub width: u32,
    pub height: u32,
    pub channels: ColourChannels,
    pub colourspace: Colourspace,
}

impl QoiHeader {
    pub fn new(width: u32, height: u32, channels: ColourChannels, colourspace: Colourspace) -> Self {
        Self {
            width,
            height,
            channels,
            colourspace,
        }
    }

    /// `width * height`, widened so it cannot overflow.
    pub fn pixel_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColourChannels {
    Rgb,
    Rgba,
}

impl ColourChannels {
    pub const fn count(self) -> u8 {
        match self {
            ColourChannels::Rgb => 3,
            ColourChannels::Rgba => 4,
        }
    }

    pub const fn from_count(count: u8) -> Option<Self> {
        match count {
            3 => Some(ColourChannels::Rgb),
            4 => Some(ColourChannels::Rgba),
            _ => None,
        }
    }
}

/// The header's colourspace byte. It is carried through encode and decode
/// untouched; the codec never interprets it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Colourspace(pub u8);

impl Colourspace {
    /// sRGB with linear alpha.
    pub const SRGB: Colourspace = Colourspace(0);
    /// All channels linear.
    pub const LINEAR: Colourspace = Colourspace(1);
}

impl fmt::Display for ColourChannels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColourChannels::Rgb => f.write_str("RGB"),
            ColourChannels::Rgba => f.write_str("RGBA"),
        }
    }
}
