#![no_main]

use libfuzzer_sys::fuzz_target;
use zune_in3::{compress, decompress, Raster};

fuzz_target!(|data: &[u8]| {
    if data.len() > 5
    {
        let width = usize::from(data[0] % 64) + 1;
        let height = usize::from(data[1] % 64) + 1;
        let pixels: Vec<u8> = data[2..]
            .iter()
            .cycle()
            .take(width * height * 3)
            .copied()
            .collect();

        let raster = Raster::from_rgb(width, height, pixels).unwrap();
        let compressed = compress(&raster).expect("Failed to encode a valid raster!");
        let decoded = decompress(&compressed).expect("Failed to decode a valid container!");

        assert_eq!(decoded.dimensions(), raster.dimensions());

        for (a, b) in raster.as_rgb().iter().zip(decoded.as_rgb()) {
            assert!(a.abs_diff(*b) <= 2, "Pixel drifted from {a} to {b}");
        }
    }
});
