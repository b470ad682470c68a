use crate::{
    constants::{HEADER_LENGTH, QOI_MAGIC_BYTES},
    error::{DecodeError, Section},
    model::{ColourChannels, Colourspace, QoiHeader},
};

/// Serializes the 14-byte preamble: magic, big-endian width and height, then
/// the channel and colourspace bytes.
pub fn encode_header(header: &QoiHeader) -> [u8; HEADER_LENGTH] {
    let mut bytes = [0; HEADER_LENGTH];
    bytes[0..4].copy_from_slice(&QOI_MAGIC_BYTES);
    bytes[4..8].copy_from_slice(&header.width.to_be_bytes());
    bytes[8..12].copy_from_slice(&header.height.to_be_bytes());
    bytes[12] = header.channels.count();
    bytes[13] = header.colourspace.0;
    bytes
}

/// Parses the preamble at the start of `data`. Anything after the first 14
/// bytes is ignored.
pub fn decode_header(data: &[u8]) -> Result<QoiHeader, DecodeError> {
    let Some(bytes) = data.get(..HEADER_LENGTH) else {
        return Err(DecodeError::Truncated {
            section: Section::Header,
            offset: data.len(),
        });
    };

    let mut magic = [0; 4];
    magic.copy_from_slice(&bytes[0..4]);
    if magic != QOI_MAGIC_BYTES {
        return Err(DecodeError::InvalidMagicBytes {
            expected: QOI_MAGIC_BYTES,
            found: magic,
        });
    }

    let channels = ColourChannels::from_count(bytes[12])
        .ok_or(DecodeError::UnsupportedChannels(bytes[12]))?;

    Ok(QoiHeader {
        width: u32::from_be_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]),
        height: u32::from_be_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]),
        channels,
        colourspace: Colourspace(bytes[13]),
    })
}
