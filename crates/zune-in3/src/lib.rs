/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Decoding and encoding the IN3 lossy image container
//!
//! An IN3 image stores an RGB raster as three Huffman coded channels.
//! Pixels are converted to YUV, each channel value is quantized to one of
//! 256 signed symbols and every channel gets its own canonical prefix code.
//!
//! # Features
//! - Decoding and encoding
//! - Code words of up to 255 bits
//! - Fuzz tested
//!
//! # Example
//! ```
//! use zune_in3::{compress, decompress, Raster};
//!
//! let mut raster = Raster::new(2, 1);
//! raster.set_pixel(0, 0, [255, 255, 255]).unwrap();
//! raster.set_pixel(1, 0, [255, 255, 255]).unwrap();
//!
//! let container = compress(&raster).unwrap();
//! let decoded = decompress(&container).unwrap();
//!
//! assert_eq!(decoded.dimensions(), (2, 1));
//! ```

pub use decoder::*;
pub use encoder::*;
pub use errors::*;
pub use headers::{probe_in3, Channel, In3Header};
pub use raster::{Pixel, Raster};
pub use zune_core;
use zune_core::options::DecoderOptions;

pub mod bitstream;
pub mod canonical;
pub mod color;
mod constants;
mod decoder;
mod encoder;
mod errors;
mod headers;
pub mod huffman;
mod raster;

pub use constants::{IN3_HEADER_SIZE, IN3_MAGIC};

/// Encode `raster` into an IN3 container
///
/// # Errors
/// See [`In3EncodeErrors`]
pub fn compress(raster: &Raster) -> Result<Vec<u8>, In3EncodeErrors> {
    In3Encoder::from_raster(raster).encode()
}

/// Decode an IN3 container into a raster
///
/// Any dimension the header can express is accepted and trailing
/// bytes are ignored, use [`In3Decoder::new_with_options`] to impose
/// limits or strict parsing.
///
/// # Errors
/// See [`In3Errors`], [`In3Errors::kind`] groups them into
/// format, truncation and invariant failures
pub fn decompress(bytes: &[u8]) -> Result<Raster, In3Errors> {
    let options = DecoderOptions::default()
        .set_max_width(usize::from(u16::MAX))
        .set_max_height(usize::from(u16::MAX))
        .set_strict_mode(false);

    In3Decoder::new_with_options(bytes, options).decode_raster()
}
