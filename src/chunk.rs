use alloc::vec::Vec;

use crate::{
    constants::{
        COMPRESSION_TAG_MASK, DIFF_TAG, INDEX_TAG, LUMA_TAG, MAX_RUN, REMAINING_DATA_MASK,
        RGBA_BYTE, RGB_BYTE, RUN_TAG,
    },
    model::Pixel,
};

/// One unit of the chunk stream.
///
/// Deltas are held unbiased; the tag bits and biases only exist on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Chunk {
    Rgb { red: u8, green: u8, blue: u8 },
    Rgba(Pixel),
    Index(u8),
    /// Each delta in `-2..=1`.
    Diff { dr: i8, dg: i8, db: i8 },
    /// `dg` in `-32..=31`, the other two in `-8..=7`.
    Luma { dg: i8, dr_dg: i8, db_dg: i8 },
    /// Number of repeats of the previous pixel, `1..=MAX_RUN`.
    Run(u8),
}

impl Chunk {
    pub(crate) fn write(self, out: &mut Vec<u8>) {
        match self {
            Chunk::Rgb { red, green, blue } => out.extend_from_slice(&[RGB_BYTE, red, green, blue]),
            Chunk::Rgba(pixel) => {
                out.extend_from_slice(&[RGBA_BYTE, pixel.red, pixel.green, pixel.blue, pixel.alpha])
            }
            Chunk::Index(idx) => {
                debug_assert!(idx <= REMAINING_DATA_MASK);
                out.push(INDEX_TAG | idx);
            }
            Chunk::Diff { dr, dg, db } => out.push(
                DIFF_TAG | ((dr + 2) as u8) << 4 | ((dg + 2) as u8) << 2 | (db + 2) as u8,
            ),
            Chunk::Luma { dg, dr_dg, db_dg } => out.extend_from_slice(&[
                LUMA_TAG | (dg + 32) as u8,
                ((dr_dg + 8) as u8) << 4 | (db_dg + 8) as u8,
            ]),
            Chunk::Run(length) => {
                debug_assert!((1..=MAX_RUN).contains(&length));
                out.push(RUN_TAG | (length - 1));
            }
        }
    }

    /// Reads the chunk at the front of `data`, returning it with the number of
    /// bytes it spans. `None` if `data` ends before the chunk does.
    pub(crate) fn read(data: &[u8]) -> Option<(Chunk, usize)> {
        let (&byte, rest) = data.split_first()?;

        // The sentinels share the RUN prefix, so they must be matched whole first.
        match byte {
            byte if byte == RGB_BYTE => match *rest {
                [red, green, blue, ..] => Some((Chunk::Rgb { red, green, blue }, 4)),
                _ => None,
            },
            byte if byte == RGBA_BYTE => match *rest {
                [red, green, blue, alpha, ..] => {
                    Some((Chunk::Rgba(Pixel::new(red, green, blue, alpha)), 5))
                }
                _ => None,
            },
            byte => match byte & COMPRESSION_TAG_MASK {
                tag if tag == RUN_TAG => Some((Chunk::Run((byte & REMAINING_DATA_MASK) + 1), 1)),
                tag if tag == INDEX_TAG => Some((Chunk::Index(byte & REMAINING_DATA_MASK), 1)),
                tag if tag == DIFF_TAG => {
                    let dr = ((byte & 0b00110000) >> 4) as i8 - 2;
                    let dg = ((byte & 0b00001100) >> 2) as i8 - 2;
                    let db = (byte & 0b00000011) as i8 - 2;
                    Some((Chunk::Diff { dr, dg, db }, 1))
                }
                _ => {
                    let &next_byte = rest.first()?;
                    let dg = (byte & REMAINING_DATA_MASK) as i8 - 32;
                    let dr_dg = ((next_byte & 0b11110000) >> 4) as i8 - 8;
                    let db_dg = (next_byte & 0b00001111) as i8 - 8;
                    Some((Chunk::Luma { dg, dr_dg, db_dg }, 2))
                }
            },
        }
    }
}
