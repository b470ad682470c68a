#![no_main]

use libfuzzer_sys::fuzz_target;
use qoi_codec::{decode, encode_raw};

fuzz_target!(|data: &[u8]| {
    let Some((&shape, pixels)) = data.split_first() else {
        return;
    };
    let channels = if shape & 0x80 == 0 { 4 } else { 3 };
    let width = u32::from(shape & 0x7F).max(1);
    let row = width as usize * channels as usize;
    let height = (pixels.len() / row) as u32;
    let pixels = &pixels[..row * height as usize];

    let encoded = encode_raw(pixels, width, height, channels, 0).unwrap();
    let decoded = decode(&encoded).unwrap();
    assert_eq!(decoded.into_raw(), pixels);
});
