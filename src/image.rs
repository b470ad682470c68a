use alloc::vec::Vec;

use crate::{
    error::EncodeError,
    model::{ColourChannels, Pixel, QoiHeader},
};

/// Row-major read access to an image, four channel bytes per pixel.
///
/// This is what the encoder consumes. Implement it for your own buffer type
/// to encode without copying into an intermediate `Vec`.
pub trait ImageView {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    /// RGBA of the pixel at row-major position `index`
    /// (`y * width + x`). Callers stay below `width * height`.
    fn pixel(&self, index: usize) -> [u8; 4];
}

/// A decoded image: its header plus every pixel as RGBA.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    header: QoiHeader,
    pixels: Vec<Pixel>,
}

impl Image {
    pub(crate) fn new(header: QoiHeader, pixels: Vec<Pixel>) -> Self {
        debug_assert_eq!(header.pixel_count(), pixels.len() as u64);
        Self { header, pixels }
    }

    pub fn header(&self) -> &QoiHeader {
        &self.header
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<Pixel> {
        self.pixels
    }

    /// Channel-packed bytes, three or four per pixel as the header declares.
    pub fn to_raw(&self) -> Vec<u8> {
        match self.header.channels {
            ColourChannels::Rgba => self.pixels.iter().flat_map(|p| p.to_array()).collect(),
            ColourChannels::Rgb => self
                .pixels
                .iter()
                .flat_map(|p| [p.red, p.green, p.blue])
                .collect(),
        }
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.to_raw()
    }
}

impl ImageView for Image {
    fn width(&self) -> u32 {
        self.header.width
    }

    fn height(&self) -> u32 {
        self.header.height
    }

    fn pixel(&self, index: usize) -> [u8; 4] {
        self.pixels[index].to_array()
    }
}

/// A borrowed, channel-packed pixel buffer. Three-channel buffers read back
/// with alpha 255.
#[derive(Debug, Clone, Copy)]
pub struct RawImage<'a> {
    data: &'a [u8],
    width: u32,
    height: u32,
    channels: ColourChannels,
}

impl<'a> RawImage<'a> {
    /// Wraps `data`, checking it holds exactly `width * height` pixels.
    pub fn new(
        data: &'a [u8],
        width: u32,
        height: u32,
        channels: ColourChannels,
    ) -> Result<Self, EncodeError> {
        let expected = usize::try_from(width)
            .ok()
            .zip(usize::try_from(height).ok())
            .and_then(|(w, h)| w.checked_mul(h))
            .and_then(|count| count.checked_mul(channels.count() as usize));

        if expected != Some(data.len()) {
            return Err(EncodeError::BufferSize {
                width,
                height,
                channels: channels.count(),
                expected,
                found: data.len(),
            });
        }

        Ok(Self {
            data,
            width,
            height,
            channels,
        })
    }

    pub fn channels(&self) -> ColourChannels {
        self.channels
    }
}

impl ImageView for RawImage<'_> {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn pixel(&self, index: usize) -> [u8; 4] {
        match self.channels {
            ColourChannels::Rgba => {
                let p = &self.data[index * 4..index * 4 + 4];
                [p[0], p[1], p[2], p[3]]
            }
            ColourChannels::Rgb => {
                let p = &self.data[index * 3..index * 3 + 3];
                [p[0], p[1], p[2], 255]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use alloc::vec;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::Colourspace;

    #[test]
    fn raw_rgb_reads_opaque() {
        let data = [1, 2, 3, 4, 5, 6];
        let raw = RawImage::new(&data, 2, 1, ColourChannels::Rgb).unwrap();
        assert_eq!(raw.channels(), ColourChannels::Rgb);
        assert_eq!(raw.pixel(0), [1, 2, 3, 255]);
        assert_eq!(raw.pixel(1), [4, 5, 6, 255]);
    }

    #[test]
    fn raw_rejects_wrong_length() {
        let data = [0; 15];
        let err = RawImage::new(&data, 2, 2, ColourChannels::Rgba).unwrap_err();
        assert!(matches!(
            err,
            EncodeError::BufferSize {
                expected: Some(16),
                found: 15,
                ..
            }
        ));
    }

    #[test]
    fn raw_rejects_overflowing_dimensions() {
        let err = RawImage::new(&[], u32::MAX, u32::MAX, ColourChannels::Rgba).unwrap_err();
        assert!(matches!(err, EncodeError::BufferSize { found: 0, .. }));
    }

    #[test]
    fn to_raw_follows_header_channels() {
        let pixels = vec![Pixel::new(1, 2, 3, 255), Pixel::new(4, 5, 6, 255)];
        let rgb = Image::new(
            QoiHeader::new(2, 1, ColourChannels::Rgb, Colourspace::SRGB),
            pixels.clone(),
        );
        assert_eq!(rgb.to_raw(), vec![1, 2, 3, 4, 5, 6]);

        let rgba = Image::new(
            QoiHeader::new(1, 2, ColourChannels::Rgba, Colourspace::SRGB),
            pixels,
        );
        assert_eq!(rgba.into_raw(), vec![1, 2, 3, 255, 4, 5, 6, 255]);
    }

    #[test]
    fn into_pixels_hands_back_the_buffer() {
        let pixels = vec![Pixel::new(9, 8, 7, 6); 6];
        let image = Image::new(
            QoiHeader::new(3, 2, ColourChannels::Rgba, Colourspace::LINEAR),
            pixels.clone(),
        );
        assert_eq!(image.width(), 3);
        assert_eq!(image.pixel(5), [9, 8, 7, 6]);
        assert_eq!(image.into_pixels(), pixels);
    }
}
