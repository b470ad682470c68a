use alloc::vec::Vec;

use log::debug;

use crate::{
    chunk::Chunk,
    constants::{ENDING_QOI_MAGIC_BYTES, HEADER_LENGTH, MAX_RUN},
    error::EncodeError,
    header::encode_header,
    image::{ImageView, RawImage},
    model::{ColourChannels, Colourspace, Pixel, QoiHeader, SeenPixels},
};

/// Running state for a single encode pass.
struct Encoder<'a> {
    out: &'a mut Vec<u8>,
    seen: SeenPixels,
    previous_pixel: Pixel,
    run_length: u8,
}

impl<'a> Encoder<'a> {
    fn new(out: &'a mut Vec<u8>) -> Self {
        Self {
            out,
            seen: SeenPixels::new(),
            previous_pixel: Pixel::START,
            run_length: 0,
        }
    }

    fn push(&mut self, pixel: Pixel, is_last: bool) {
        if pixel == self.previous_pixel {
            self.run_length += 1;
            if self.run_length == MAX_RUN || is_last {
                self.flush_run();
            }
            return;
        }
        self.flush_run();

        let idx = pixel.index_position();
        if self.seen.get(idx) == pixel {
            Chunk::Index(idx as u8).write(self.out);
            self.previous_pixel = pixel;
            return;
        }
        self.seen.insert(pixel);

        let chunk = if pixel.alpha == self.previous_pixel.alpha {
            let (dr, dg, db) = pixel.diff(&self.previous_pixel);
            let dr_dg = dr.wrapping_sub(dg);
            let db_dg = db.wrapping_sub(dg);

            if (-2..=1).contains(&dr) && (-2..=1).contains(&dg) && (-2..=1).contains(&db) {
                Chunk::Diff { dr, dg, db }
            } else if (-32..=31).contains(&dg)
                && (-8..=7).contains(&dr_dg)
                && (-8..=7).contains(&db_dg)
            {
                Chunk::Luma { dg, dr_dg, db_dg }
            } else {
                Chunk::Rgb {
                    red: pixel.red,
                    green: pixel.green,
                    blue: pixel.blue,
                }
            }
        } else {
            Chunk::Rgba(pixel)
        };

        chunk.write(self.out);
        self.previous_pixel = pixel;
    }

    fn flush_run(&mut self) {
        if self.run_length > 0 {
            Chunk::Run(self.run_length).write(self.out);
            self.run_length = 0;
        }
    }
}

/// Encodes `image` into a complete QOI byte stream.
///
/// With [`ColourChannels::Rgb`] every pixel's alpha is taken as 255,
/// whatever the view reports.
pub fn encode<I>(image: &I, channels: ColourChannels, colourspace: Colourspace) -> Vec<u8>
where
    I: ImageView + ?Sized,
{
    let header = QoiHeader::new(image.width(), image.height(), channels, colourspace);
    // Capacity is only a hint.
    let pixel_count = usize::try_from(header.pixel_count()).unwrap_or(usize::MAX);

    let mut out = Vec::with_capacity(
        HEADER_LENGTH + ENDING_QOI_MAGIC_BYTES.len() + pixel_count.min(1 << 20),
    );
    out.extend_from_slice(&encode_header(&header));

    let mut encoder = Encoder::new(&mut out);
    for index in 0..pixel_count {
        let mut pixel = Pixel::from(image.pixel(index));
        if channels == ColourChannels::Rgb {
            pixel.alpha = 255;
        }
        encoder.push(pixel, index + 1 == pixel_count);
    }
    encoder.flush_run();

    out.extend_from_slice(&ENDING_QOI_MAGIC_BYTES);

    debug!(
        "encoded {}x{} {} image into {} bytes",
        header.width,
        header.height,
        channels,
        out.len()
    );
    out
}

/// Encodes a channel-packed buffer of `width * height` pixels.
pub fn encode_raw(
    data: &[u8],
    width: u32,
    height: u32,
    channels: u8,
    colourspace: u8,
) -> Result<Vec<u8>, EncodeError> {
    let channels =
        ColourChannels::from_count(channels).ok_or(EncodeError::UnsupportedChannels(channels))?;
    let image = RawImage::new(data, width, height, channels)?;
    Ok(encode(&image, channels, Colourspace(colourspace)))
}

/// Encodes `image` and writes the stream to `writer`.
#[cfg(feature = "std")]
pub fn encode_to_writer<W, I>(
    mut writer: W,
    image: &I,
    channels: ColourChannels,
    colourspace: Colourspace,
) -> Result<(), EncodeError>
where
    W: std::io::Write,
    I: ImageView + ?Sized,
{
    let bytes = encode(image, channels, colourspace);
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use alloc::vec;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::constants::INDEX_TAG;

    /// Encodes RGBA pixels as a `len x 1` image and returns only the chunk stream.
    fn chunks_of(pixels: &[[u8; 4]]) -> Vec<u8> {
        let data: Vec<u8> = pixels.iter().flatten().copied().collect();
        let encoded = encode_raw(&data, pixels.len() as u32, 1, 4, 0).unwrap();
        assert_eq!(&encoded[encoded.len() - 8..], &ENDING_QOI_MAGIC_BYTES);
        encoded[HEADER_LENGTH..encoded.len() - 8].to_vec()
    }

    #[test]
    fn lone_start_pixel_is_a_run() {
        assert_eq!(chunks_of(&[[0, 0, 0, 255]]), vec![0xC0]);
    }

    #[test]
    fn red_wraps_into_diff() {
        assert_eq!(chunks_of(&[[255, 0, 0, 255]]), vec![0x5A]);
    }

    #[test]
    fn full_run_is_one_chunk() {
        assert_eq!(chunks_of(&[[0, 0, 0, 255]; 62]), vec![0xFD]);
    }

    #[test]
    fn run_of_63_splits() {
        assert_eq!(chunks_of(&[[0, 0, 0, 255]; 63]), vec![0xFD, 0xC0]);
    }

    #[test]
    fn white_run_after_diff() {
        assert_eq!(chunks_of(&[[255, 255, 255, 255]; 62]), vec![0x55, 0xFC]);
        assert_eq!(chunks_of(&[[255, 255, 255, 255]; 63]), vec![0x55, 0xFD]);
    }

    #[test]
    fn pending_run_flushes_before_new_pixel() {
        assert_eq!(
            chunks_of(&[[0, 0, 0, 255], [0, 0, 0, 255], [1, 1, 1, 255]]),
            vec![0xC1, 0x7F]
        );
    }

    #[test]
    fn index_hit_on_exact_match() {
        assert_eq!(
            chunks_of(&[[10, 20, 30, 255], [41, 210, 234, 255], [10, 20, 30, 255]]),
            vec![0xFE, 10, 20, 30, 0xFE, 41, 210, 234, INDEX_TAG | 9]
        );
    }

    #[test]
    fn hash_collision_is_not_an_index_hit() {
        let first = [64, 0, 0, 255];
        let second = [0, 64, 0, 255];
        assert_eq!(
            Pixel::from(first).index_position(),
            Pixel::from(second).index_position()
        );

        assert_eq!(
            chunks_of(&[first, second, first]),
            vec![0xFE, 64, 0, 0, 0xFE, 0, 64, 0, 0xFE, 64, 0, 0]
        );
    }

    #[test]
    fn small_deltas_use_diff() {
        assert_eq!(chunks_of(&[[10, 20, 30, 255], [11, 18, 31, 255]]), vec![0xFE, 10, 20, 30, 0x73]);
    }

    #[test]
    fn medium_deltas_use_luma() {
        assert_eq!(
            chunks_of(&[[10, 20, 30, 255], [42, 50, 57, 255]]),
            vec![0xFE, 10, 20, 30, 0xBE, 0xA5]
        );
    }

    /// One pixel after the opaque black start, so its deltas are its channels.
    macro_rules! picks {
        ($name:ident, $pixel:expr, $expected:expr) => {
            paste::paste! {
                #[test]
                fn [<picks_ $name>]() {
                    let expected: &[u8] = &$expected;
                    assert_eq!(chunks_of(&[$pixel]), expected);
                }
            }
        };
    }

    picks!(diff_at_lower_edge, [254, 254, 254, 255], [0x40]);
    picks!(luma_just_above_diff, [2, 0, 0, 255], [0xA0, 0xA8]);
    picks!(luma_just_below_diff, [253, 0, 0, 255], [0xA0, 0x58]);
    picks!(luma_at_upper_edges, [38, 31, 23, 255], [0xBF, 0xF0]);
    picks!(luma_at_lower_green_edge, [224, 224, 224, 255], [0x80, 0x88]);
    picks!(rgb_above_green_range, [32, 32, 32, 255], [0xFE, 32, 32, 32]);
    picks!(rgb_below_green_range, [223, 223, 223, 255], [0xFE, 223, 223, 223]);
    picks!(rgb_above_red_green_range, [8, 0, 0, 255], [0xFE, 8, 0, 0]);
    picks!(rgb_below_blue_green_range, [0, 0, 247, 255], [0xFE, 0, 0, 247]);

    #[test]
    fn alpha_change_uses_rgba() {
        assert_eq!(chunks_of(&[[1, 2, 3, 4]]), vec![0xFF, 1, 2, 3, 4]);
    }

    #[test]
    fn rgb_source_is_opaque() {
        let encoded = encode_raw(&[255, 0, 0], 1, 1, 3, 0).unwrap();
        assert_eq!(encoded[12], 3);
        assert_eq!(&encoded[HEADER_LENGTH..encoded.len() - 8], &[0x5A]);
    }

    #[test]
    fn empty_image_is_header_and_trailer() {
        let encoded = encode_raw(&[], 0, 0, 4, 1).unwrap();
        assert_eq!(encoded.len(), HEADER_LENGTH + 8);
        assert_eq!(encoded[13], 1);
    }

    #[test]
    fn rejects_unsupported_channels() {
        assert!(matches!(
            encode_raw(&[0; 5], 1, 1, 5, 0),
            Err(EncodeError::UnsupportedChannels(5))
        ));
    }

    #[test]
    fn rejects_short_buffer() {
        assert!(matches!(
            encode_raw(&[0; 7], 2, 1, 4, 0),
            Err(EncodeError::BufferSize { .. })
        ));
    }

    #[cfg(feature = "std")]
    #[test]
    fn writer_receives_the_whole_stream() {
        let data = [9u8; 12];
        let image = RawImage::new(&data, 2, 2, ColourChannels::Rgb).unwrap();
        let mut sink = Vec::new();
        encode_to_writer(&mut sink, &image, ColourChannels::Rgb, Colourspace::SRGB).unwrap();
        assert_eq!(sink, encode(&image, ColourChannels::Rgb, Colourspace::SRGB));
    }
}
