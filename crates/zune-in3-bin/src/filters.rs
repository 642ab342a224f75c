/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Per pixel filters run on a raster before encoding or after decoding
//!
//! Every filter is a map `(pixel, x, y) -> pixel`, no pixel sees its
//! neighbours.

use zune_in3::{Pixel, Raster};

const DITHER_SIZE: usize = 4;

/// 4x4 Bayer matrix, indexed `[y % 4][x % 4]`
const DITHER_MATRIX: [[u8; DITHER_SIZE]; DITHER_SIZE] = [
    [0, 8, 2, 10],
    [12, 4, 14, 6],
    [3, 11, 1, 9],
    [15, 7, 13, 5]
];

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PixelFilter {
    /// Multiply the HSV value of every pixel by a factor
    Brighten(f64),
    /// Replace every pixel by its luma
    Grayscale,
    /// Threshold gray pixels against a Bayer matrix
    OrderedDither
}

impl PixelFilter {
    pub const fn name(&self) -> &'static str {
        match self {
            PixelFilter::Brighten(_) => "brighten",
            PixelFilter::Grayscale => "grayscale",
            PixelFilter::OrderedDither => "ordered dither"
        }
    }

    pub fn on_pixel(&self, pixel: Pixel, x: usize, y: usize) -> Pixel {
        match self {
            PixelFilter::Brighten(factor) => brighten(pixel, *factor),
            PixelFilter::Grayscale => grayscale(pixel),
            PixelFilter::OrderedDither => ordered_dither(pixel, x, y)
        }
    }

    /// Run the filter over every pixel of `raster`
    pub fn apply(&self, raster: &mut Raster) {
        let width = raster.width();

        for (i, chunk) in raster.as_rgb_mut().chunks_exact_mut(3).enumerate() {
            let pixel = self.on_pixel([chunk[0], chunk[1], chunk[2]], i % width, i / width);
            chunk.copy_from_slice(&pixel);
        }
    }
}

/// Scale the HSV value of `pixel` by `factor`, clamping it to `[0,1]`
///
/// Hue and saturation stay fixed, so every channel scales by the same
/// amount. Once the largest channel would pass 255 it is pinned there.
pub fn brighten(pixel: Pixel, factor: f64) -> Pixel {
    let max = pixel.iter().copied().max().unwrap_or(0);

    if max == 0 {
        return pixel;
    }
    let max = f64::from(max);

    if max * factor >= 255.0 {
        pixel.map(|c| (f64::from(c) * 255.0 / max) as u8)
    } else {
        // `as` saturates, negative factors give black
        pixel.map(|c| (f64::from(c) * factor) as u8)
    }
}

/// Replace `pixel` by its luma, `0.299R + 0.587G + 0.114B` rounded
pub fn grayscale(pixel: Pixel) -> Pixel {
    let [r, g, b] = pixel.map(u32::from);
    let luma = (299 * r + 587 * g + 114 * b + 500) / 1000;

    // weights sum to 1000, luma never exceeds 255
    [luma as u8; 3]
}

/// Black or white depending on the red channel and the position
///
/// Input is expected to be gray.
pub fn ordered_dither(pixel: Pixel, x: usize, y: usize) -> Pixel {
    let levels = (DITHER_SIZE * DITHER_SIZE + 1) as u32;
    let level = u32::from(pixel[0]) * levels / 256;

    if level < u32::from(DITHER_MATRIX[y % DITHER_SIZE][x % DITHER_SIZE]) {
        [0; 3]
    } else {
        [255; 3]
    }
}

#[cfg(test)]
mod tests {
    use zune_in3::Raster;

    use super::*;

    #[test]
    fn brighten_scales_value() {
        assert_eq!(brighten([100, 50, 0], 2.0), [200, 100, 0]);
        assert_eq!(brighten([100, 100, 100], 0.5), [50, 50, 50]);
        assert_eq!(brighten([200, 100, 51], 1.0), [200, 100, 51]);
        assert_eq!(brighten([0, 0, 0], 4.0), [0, 0, 0]);
        assert_eq!(brighten([10, 20, 30], -1.0), [0, 0, 0]);
    }

    #[test]
    fn brighten_pins_brightest_channel() {
        // value clamps at one, hue is kept
        assert_eq!(brighten([200, 100, 50], 2.0), [255, 127, 63]);
        assert_eq!(brighten([255, 255, 255], 3.0), [255, 255, 255]);
    }

    #[test]
    fn grayscale_uses_luma_weights() {
        assert_eq!(grayscale([255, 0, 0]), [76; 3]);
        assert_eq!(grayscale([0, 255, 0]), [150; 3]);
        assert_eq!(grayscale([0, 0, 255]), [29; 3]);
        assert_eq!(grayscale([200, 100, 50]), [124; 3]);
    }

    #[test]
    fn grayscale_keeps_gray() {
        for level in 0..=255_u8 {
            assert_eq!(grayscale([level; 3]), [level; 3]);
        }
    }

    #[test]
    fn dither_follows_matrix() {
        // mid gray maps to level 8
        let row: Vec<Pixel> = (0..4).map(|x| ordered_dither([128; 3], x, 0)).collect();
        assert_eq!(row, [[255; 3], [255; 3], [255; 3], [0; 3]]);

        // the matrix repeats every four pixels
        assert_eq!(ordered_dither([128; 3], 7, 4), [0; 3]);
    }

    #[test]
    fn dither_extremes() {
        let positions = (0..4).flat_map(|y| (0..4).map(move |x| (x, y)));

        let black = positions
            .clone()
            .filter(|(x, y)| ordered_dither([0; 3], *x, *y) == [0; 3])
            .count();
        // only the zero entry lets a black pixel through as white
        assert_eq!(black, 15);
        assert!(positions.clone().all(|(x, y)| ordered_dither([255; 3], x, y) == [255; 3]));
    }

    #[test]
    fn apply_passes_coordinates() {
        let mut raster = Raster::new(4, 2);
        raster.as_rgb_mut().fill(128);

        PixelFilter::OrderedDither.apply(&mut raster);

        assert_eq!(raster.get_pixel(3, 0).unwrap(), [0; 3]);
        assert_eq!(raster.get_pixel(0, 0).unwrap(), [255; 3]);
        // row one, matrix entry 12
        assert_eq!(raster.get_pixel(0, 1).unwrap(), [0; 3]);
        assert_eq!(raster.get_pixel(1, 1).unwrap(), [255; 3]);
    }
}
