use core::fmt;

use thiserror::Error;

/// Part of the input that ended early.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Header,
    ChunkStream,
    Trailer,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Section::Header => f.write_str("header"),
            Section::ChunkStream => f.write_str("chunk stream"),
            Section::Trailer => f.write_str("end marker"),
        }
    }
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid magic bytes (expected {expected:?}, found {found:?})")]
    InvalidMagicBytes { expected: [u8; 4], found: [u8; 4] },
    #[error("invalid end marker (expected {expected:?}, found {found:?})")]
    InvalidTrailer { expected: [u8; 8], found: [u8; 8] },
    #[error("unsupported colour channels (expected 3 (RGB) or 4 (RGBA), found {0})")]
    UnsupportedChannels(u8),
    #[error("input ended inside the {section} at byte {offset}")]
    Truncated { section: Section, offset: usize },
    #[error("run of {run} pixels after pixel {decoded} overflows an image of {expected} pixels")]
    RunOverflow {
        decoded: usize,
        run: usize,
        expected: usize,
    },
    #[error("image of {width}x{height} exceeds decode limits")]
    LimitExceeded { width: u32, height: u32 },
    #[cfg(feature = "std")]
    #[error("{0}")]
    IoError(#[from] std::io::Error),
}

impl DecodeError {
    /// Whether the input simply ran out before the image was complete.
    pub fn is_truncated(&self) -> bool {
        matches!(self, DecodeError::Truncated { .. })
    }
}

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("unsupported colour channels (expected 3 (RGB) or 4 (RGBA), found {0})")]
    UnsupportedChannels(u8),
    #[error("pixel buffer has {found} bytes, {width}x{height} with {channels} channels needs {expected:?}")]
    BufferSize {
        width: u32,
        height: u32,
        channels: u8,
        /// `None` when the required size does not fit in memory.
        expected: Option<usize>,
        found: usize,
    },
    #[cfg(feature = "std")]
    #[error("{0}")]
    IoError(#[from] std::io::Error),
}
