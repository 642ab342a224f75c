/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use nanorand::{Rng, WyRand};
use zune_core::bit_depth::BitDepth;
use zune_core::colorspace::ColorSpace;
use zune_in3::{compress, decompress, probe_in3, In3Decoder, Raster, IN3_HEADER_SIZE};

/// Largest difference a channel may show after one trip through the codec
const MAX_DRIFT: u8 = 2;

fn random_raster(rng: &mut WyRand, width: usize, height: usize) -> Raster {
    let pixels = (0..width * height * 3)
        .map(|_| rng.generate::<u8>())
        .collect();

    Raster::from_rgb(width, height, pixels).unwrap()
}

fn assert_close(original: &Raster, decoded: &Raster) {
    assert_eq!(original.dimensions(), decoded.dimensions());

    for (position, (a, b)) in original
        .as_rgb()
        .iter()
        .zip(decoded.as_rgb())
        .enumerate()
    {
        assert!(
            a.abs_diff(*b) <= MAX_DRIFT,
            "byte {position} drifted from {a} to {b}"
        );
    }
}

#[test]
fn random_images_survive_roundtrip() {
    let mut rng = WyRand::new_seed(0x1b3);

    for _ in 0..20 {
        let width = rng.generate_range(1_usize..=48);
        let height = rng.generate_range(1_usize..=48);
        let raster = random_raster(&mut rng, width, height);

        let container = compress(&raster).unwrap();
        assert!(probe_in3(&container));

        assert_close(&raster, &decompress(&container).unwrap());
    }
}

#[test]
fn white_pair_has_minimal_body() {
    let raster = Raster::from_rgb(2, 1, vec![255; 6]).unwrap();
    let container = compress(&raster).unwrap();

    // every channel is constant, two one bit codes fit into a byte
    assert_eq!(container.len(), IN3_HEADER_SIZE + 3);
    assert_close(&raster, &decompress(&container).unwrap());
}

#[test]
fn black_pixel_is_exact() {
    let raster = Raster::new(1, 1);
    let decoded = decompress(&compress(&raster).unwrap()).unwrap();

    assert_eq!(decoded.get_pixel(0, 0).unwrap(), [0, 0, 0]);
}

#[test]
fn white_pixel_loses_one_green_level() {
    let raster = Raster::from_rgb(1, 1, vec![255; 3]).unwrap();
    let decoded = decompress(&compress(&raster).unwrap()).unwrap();

    // quantization applies to single pixels as well
    assert_eq!(decoded.get_pixel(0, 0).unwrap(), [255, 254, 255]);
}

#[test]
fn trailing_bytes_are_ignored() {
    let raster = Raster::from_rgb(2, 2, vec![90; 12]).unwrap();
    let mut container = compress(&raster).unwrap();
    let expected = decompress(&container).unwrap();

    container.extend_from_slice(&[0xff; 5]);
    assert_eq!(decompress(&container).unwrap(), expected);
}

#[test]
fn gray_ramp_roundtrips() {
    let mut raster = Raster::new(256, 2);

    for x in 0..256 {
        let level = x as u8;
        raster.set_pixel(x, 0, [level; 3]).unwrap();
        raster.set_pixel(x, 1, [255 - level; 3]).unwrap();
    }
    assert_close(&raster, &decompress(&compress(&raster).unwrap()).unwrap());
}

#[test]
fn wide_and_tall_images_roundtrip() {
    let mut rng = WyRand::new_seed(7);

    for (width, height) in [(1000, 1), (1, 1000)] {
        let raster = random_raster(&mut rng, width, height);
        assert_close(&raster, &decompress(&compress(&raster).unwrap()).unwrap());
    }
}

#[test]
fn encoding_is_deterministic() {
    let mut rng = WyRand::new_seed(99);
    let raster = random_raster(&mut rng, 17, 9);

    assert_eq!(compress(&raster).unwrap(), compress(&raster).unwrap());
}

#[test]
fn decoder_reports_image_details() {
    let raster = Raster::new(5, 4);
    let container = compress(&raster).unwrap();
    let mut decoder = In3Decoder::new(&container);

    decoder.decode_headers().unwrap();

    assert_eq!(decoder.dimensions(), Some((5, 4)));
    assert_eq!(decoder.colorspace(), Some(ColorSpace::RGB));
    assert_eq!(decoder.bit_depth(), BitDepth::Eight);
    assert_eq!(decoder.output_buffer_size(), Some(60));

    let mut pixels = vec![1; 64];
    decoder.decode_into(&mut pixels).unwrap();

    assert!(pixels[..60].iter().all(|p| *p == 0));
    // bytes past the image are left alone
    assert_eq!(&pixels[60..], &[1; 4]);
}
