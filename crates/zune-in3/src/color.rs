/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! RGB <-> YUV conversion and the mapping between channel values and symbols
//!
//! All values are normalized to `[0,1]`, chroma channels are centered at `0.5`.

use crate::raster::Pixel;

/// Red, green and blue normalized to `[0,1]`
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct NormalizedRgb {
    pub r: f64,
    pub g: f64,
    pub b: f64
}

/// Luma and two chroma channels normalized to `[0,1]`
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Yuv {
    pub y: f64,
    pub u: f64,
    pub v: f64
}

impl NormalizedRgb {
    pub fn from_pixel(pixel: Pixel) -> NormalizedRgb {
        NormalizedRgb {
            r: f64::from(pixel[0]) / 255.0,
            g: f64::from(pixel[1]) / 255.0,
            b: f64::from(pixel[2]) / 255.0
        }
    }

    /// Clamp each channel to `[0,1]` and truncate to a byte
    pub fn to_pixel(self) -> Pixel {
        [
            (self.r.clamp(0.0, 1.0) * 255.0) as u8,
            (self.g.clamp(0.0, 1.0) * 255.0) as u8,
            (self.b.clamp(0.0, 1.0) * 255.0) as u8
        ]
    }
}

#[inline]
pub fn rgb_to_yuv(rgb: NormalizedRgb) -> Yuv {
    let NormalizedRgb { r, g, b } = rgb;

    Yuv {
        y: 0.299 * r + 0.587 * g + 0.114 * b,
        u: 0.5 - 0.168736 * r - 0.331264 * g + 0.5 * b,
        v: 0.5 + 0.5 * r - 0.418688 * g - 0.081312 * b
    }
}

/// Inverse of [`rgb_to_yuv`], output is clamped to `[0,1]`
#[inline]
pub fn yuv_to_rgb(yuv: Yuv) -> NormalizedRgb {
    let Yuv { y, u, v } = yuv;

    let r = y + 1.402 * (v - 0.5);
    let g = y - 0.344136 * (u - 0.5) - 0.714136 * (v - 0.5);
    let b = y + 1.772 * (u - 0.5);

    NormalizedRgb {
        r: r.clamp(0.0, 1.0),
        g: g.clamp(0.0, 1.0),
        b: b.clamp(0.0, 1.0)
    }
}

/// Map a normalized channel value to a signed symbol
///
/// `round(value*255) - 128`, saturating at the alphabet edges
#[inline]
pub fn value_to_symbol(value: f64) -> i8 {
    let scaled = (value * 255.0).round().clamp(0.0, 255.0) as i16;

    (scaled - 128) as i8
}

/// Inverse of [`value_to_symbol`]
#[inline]
pub fn symbol_to_value(symbol: i8) -> f64 {
    f64::from(i16::from(symbol) + 128) / 255.0
}

/// Convert a pixel into its Y, U and V symbols
pub fn pixel_to_symbols(pixel: Pixel) -> [i8; 3] {
    let yuv = rgb_to_yuv(NormalizedRgb::from_pixel(pixel));

    [
        value_to_symbol(yuv.y),
        value_to_symbol(yuv.u),
        value_to_symbol(yuv.v)
    ]
}

/// Convert Y, U and V symbols back into a pixel
pub fn symbols_to_pixel(symbols: [i8; 3]) -> Pixel {
    let yuv = Yuv {
        y: symbol_to_value(symbols[0]),
        u: symbol_to_value(symbols[1]),
        v: symbol_to_value(symbols[2])
    };
    yuv_to_rgb(yuv).to_pixel()
}
