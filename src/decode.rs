use alloc::vec::Vec;

use log::{debug, trace};

use crate::{
    chunk::Chunk,
    constants::{ENDING_QOI_MAGIC_BYTES, HEADER_LENGTH, MAX_RUN},
    error::{DecodeError, Section},
    header::decode_header,
    image::Image,
    limits::Limits,
    model::{Pixel, SeenPixels},
};

/// Decodes a complete QOI stream of any size the encoder can produce.
///
/// Reservation is still bounded by what `data` could expand to. For
/// untrusted input, [`decode_with_limits`] with [`Limits::default`] rejects
/// oversized headers up front.
pub fn decode(data: &[u8]) -> Result<Image, DecodeError> {
    decode_with_limits(data, &Limits::none())
}

/// Decodes `data`, failing with [`DecodeError::LimitExceeded`] before any
/// pixel work if the header breaks `limits`.
pub fn decode_with_limits(data: &[u8], limits: &Limits) -> Result<Image, DecodeError> {
    let header = decode_header(data)?;
    limits.check(&header)?;

    let expected = usize::try_from(header.pixel_count()).map_err(|_| DecodeError::LimitExceeded {
        width: header.width,
        height: header.height,
    })?;

    // A lying header can't make us reserve more than the input could expand to.
    let max_from_input = (data.len() - HEADER_LENGTH).saturating_mul(MAX_RUN as usize);
    let mut output_buf: Vec<Pixel> = Vec::with_capacity(expected.min(max_from_input));

    let mut seen = SeenPixels::new();
    let mut previous_pixel = Pixel::START;
    let mut cursor = HEADER_LENGTH;

    while output_buf.len() < expected {
        let Some((chunk, consumed)) = Chunk::read(&data[cursor..]) else {
            trace!(
                "stream ended after {} of {} pixels",
                output_buf.len(),
                expected
            );
            return Err(DecodeError::Truncated {
                section: Section::ChunkStream,
                offset: data.len(),
            });
        };
        cursor += consumed;

        let pixel = match chunk {
            Chunk::Run(count) => {
                let count = count as usize;
                if count > expected - output_buf.len() {
                    return Err(DecodeError::RunOverflow {
                        decoded: output_buf.len(),
                        run: count,
                        expected,
                    });
                }
                output_buf.extend(core::iter::repeat(previous_pixel).take(count));
                continue;
            }
            Chunk::Index(idx) => seen.get(idx as usize),
            Chunk::Diff { dr, dg, db } => Pixel::from_diffs(&previous_pixel, dr, dg, db),
            Chunk::Luma { dg, dr_dg, db_dg } => Pixel::from_diffs(
                &previous_pixel,
                dg.wrapping_add(dr_dg),
                dg,
                dg.wrapping_add(db_dg),
            ),
            Chunk::Rgb { red, green, blue } => Pixel {
                red,
                green,
                blue,
                alpha: previous_pixel.alpha,
            },
            Chunk::Rgba(pixel) => pixel,
        };

        seen.insert(pixel);
        previous_pixel = pixel;
        output_buf.push(pixel);
    }

    let trailer_end = cursor + ENDING_QOI_MAGIC_BYTES.len();
    let Some(trailer) = data.get(cursor..trailer_end) else {
        return Err(DecodeError::Truncated {
            section: Section::Trailer,
            offset: data.len(),
        });
    };
    if trailer != ENDING_QOI_MAGIC_BYTES {
        let mut found = [0; 8];
        found.copy_from_slice(trailer);
        return Err(DecodeError::InvalidTrailer {
            expected: ENDING_QOI_MAGIC_BYTES,
            found,
        });
    }
    if trailer_end < data.len() {
        trace!("ignoring {} bytes after end marker", data.len() - trailer_end);
    }

    debug!(
        "decoded {}x{} {} image from {} bytes",
        header.width,
        header.height,
        header.channels,
        data.len()
    );
    Ok(Image::new(header, output_buf))
}

/// Reads `reader` to the end and decodes what it produced.
#[cfg(feature = "std")]
pub fn decode_from_reader<R: std::io::Read>(
    mut reader: R,
    limits: &Limits,
) -> Result<Image, DecodeError> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    decode_with_limits(&data, limits)
}
