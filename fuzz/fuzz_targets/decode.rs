#![no_main]

use libfuzzer_sys::fuzz_target;
use qoi_codec::{decode_with_limits, Limits};

fuzz_target!(|data: &[u8]| {
    let limits = Limits::none().with_max_pixels(1 << 22);
    if let Ok(image) = decode_with_limits(data, &limits) {
        assert_eq!(image.pixels().len() as u64, image.header().pixel_count());
    }
});
