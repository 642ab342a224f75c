/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! BMP reading and writing
//!
//! Reading goes through `zune-bmp`, so any BMP it understands can be
//! encoded. Its output is reduced to the RGB raster the codec works on.
//!
//! Writing produces the subset the IN3 tool exchanges: a 14 byte file
//! header, a 40 byte info header, one plane, 24 bits per pixel, no
//! compression and no palette. Rows are stored bottom-up, each padded
//! to a multiple of four bytes, pixels laid out as blue, green, red.

use log::trace;
use zune_bmp::BmpDecoder;
use zune_core::colorspace::ColorSpace;
use zune_core::options::DecoderOptions;
use zune_in3::Raster;

use crate::errors::CliErrors;

const FILE_HEADER_SIZE: usize = 14;
const INFO_HEADER_SIZE: usize = 40;
const HEADER_SIZE: usize = FILE_HEADER_SIZE + INFO_HEADER_SIZE;
/// 72 DPI
const PIXELS_PER_METER: i32 = 2835;

/// Bytes a row occupies in the file, pixels plus padding
const fn scan_line_bytes(width: usize) -> usize {
    (width * 3 + 3) & !3
}

/// Decode a BMP into a raster
///
/// Limits in `options` are checked by the decoder before pixel memory
/// is allocated
pub fn read_bmp(bytes: &[u8], options: DecoderOptions) -> Result<Raster, CliErrors> {
    let mut decoder = BmpDecoder::new_with_options(bytes, options);

    decoder.decode_headers()?;

    let (width, height) = decoder
        .get_dimensions()
        .ok_or(CliErrors::GenericStatic("BMP headers not decoded"))?;
    let colorspace = decoder
        .get_colorspace()
        .ok_or(CliErrors::GenericStatic("BMP headers not decoded"))?;

    trace!("BMP width: {width}");
    trace!("BMP height: {height}");
    trace!("BMP colorspace: {colorspace:?}");

    let pixels = decoder.decode()?;
    let rgb = to_rgb(pixels, colorspace)?;

    Ok(Raster::from_rgb(width, height, rgb)?)
}

/// Reduce decoded BMP pixels to interleaved RGB
fn to_rgb(pixels: Vec<u8>, colorspace: ColorSpace) -> Result<Vec<u8>, CliErrors> {
    match colorspace {
        ColorSpace::RGB => Ok(pixels),
        ColorSpace::RGBA => Ok(pixels
            .chunks_exact(4)
            .flat_map(|rgba| [rgba[0], rgba[1], rgba[2]])
            .collect()),
        ColorSpace::Luma => Ok(pixels.iter().flat_map(|luma| [*luma; 3]).collect()),
        ColorSpace::LumaA => Ok(pixels
            .chunks_exact(2)
            .flat_map(|luma_a| [luma_a[0]; 3])
            .collect()),
        other => Err(CliErrors::GenericString(format!(
            "Cannot convert BMP pixels in colorspace {other:?} to RGB"
        )))
    }
}

/// Encode a raster as a bottom-up 24 bit BMP
pub fn write_bmp(raster: &Raster) -> Result<Vec<u8>, CliErrors> {
    let (width, height) = raster.dimensions();

    if width == 0 || height == 0 {
        return Err(CliErrors::GenericStatic("Cannot write an empty image"));
    }
    let row_bytes = width * 3;
    let stride = scan_line_bytes(width);
    let image_size = stride * height;
    let file_size = HEADER_SIZE + image_size;

    let file_size_u32 = u32::try_from(file_size)
        .map_err(|_| CliErrors::GenericStatic("Image too large to be stored as a BMP"))?;
    let width_i32 = i32::try_from(width)
        .map_err(|_| CliErrors::GenericStatic("Width does not fit a BMP header"))?;
    let height_i32 = i32::try_from(height)
        .map_err(|_| CliErrors::GenericStatic("Height does not fit a BMP header"))?;

    let mut out = Vec::with_capacity(file_size);

    // file header
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&file_size_u32.to_le_bytes());
    out.extend_from_slice(&[0; 4]);
    out.extend_from_slice(&(HEADER_SIZE as u32).to_le_bytes());
    // info header
    out.extend_from_slice(&(INFO_HEADER_SIZE as u32).to_le_bytes());
    out.extend_from_slice(&width_i32.to_le_bytes());
    out.extend_from_slice(&height_i32.to_le_bytes());
    out.extend_from_slice(&1_u16.to_le_bytes());
    out.extend_from_slice(&24_u16.to_le_bytes());
    out.extend_from_slice(&0_u32.to_le_bytes());
    // fits, it's smaller than the file size
    out.extend_from_slice(&(image_size as u32).to_le_bytes());
    out.extend_from_slice(&PIXELS_PER_METER.to_le_bytes());
    out.extend_from_slice(&PIXELS_PER_METER.to_le_bytes());
    out.extend_from_slice(&0_u32.to_le_bytes());
    out.extend_from_slice(&0_u32.to_le_bytes());

    let padding = [0_u8; 3];

    for row in raster.as_rgb().chunks_exact(row_bytes).rev() {
        for rgb in row.chunks_exact(3) {
            out.extend_from_slice(&[rgb[2], rgb[1], rgb[0]]);
        }
        out.extend_from_slice(&padding[..stride - row_bytes]);
    }
    debug_assert_eq!(out.len(), file_size);

    Ok(out)
}

#[cfg(test)]
mod tests {
    use zune_bmp::probe_bmp;
    use zune_in3::Raster;

    use super::*;

    fn sample() -> Raster {
        let mut raster = Raster::new(3, 2);
        raster.set_pixel(0, 0, [255, 0, 0]).unwrap();
        raster.set_pixel(2, 0, [0, 255, 0]).unwrap();
        raster.set_pixel(1, 1, [0, 0, 255]).unwrap();
        raster
    }

    fn limits(width: usize, height: usize) -> DecoderOptions {
        DecoderOptions::default()
            .set_max_width(width)
            .set_max_height(height)
    }

    #[test]
    fn rows_are_padded_and_bottom_up() {
        let bytes = write_bmp(&sample()).unwrap();

        assert!(probe_bmp(&bytes));
        // 9 bytes per row padded to 12
        assert_eq!(bytes.len(), HEADER_SIZE + 24);
        // first stored row is the bottom one, its middle pixel is blue
        assert_eq!(&bytes[HEADER_SIZE + 3..HEADER_SIZE + 6], &[255, 0, 0]);
        assert_eq!(&bytes[HEADER_SIZE + 9..HEADER_SIZE + 12], &[0, 0, 0]);
    }

    #[test]
    fn written_files_read_back() {
        let raster = sample();
        let bytes = write_bmp(&raster).unwrap();

        assert_eq!(read_bmp(&bytes, limits(100, 100)).unwrap(), raster);
    }

    #[test]
    fn top_down_files_are_supported() {
        let raster = sample();
        let mut bytes = write_bmp(&raster).unwrap();

        // flip the stored rows and negate the height
        let stride = scan_line_bytes(3);
        let (bottom, top) = bytes[HEADER_SIZE..].split_at(stride);
        let flipped = [top, bottom].concat();
        bytes[HEADER_SIZE..].copy_from_slice(&flipped);
        bytes[22..26].copy_from_slice(&(-2_i32).to_le_bytes());

        assert_eq!(read_bmp(&bytes, limits(100, 100)).unwrap(), raster);
    }

    #[test]
    fn gray_and_alpha_pixels_become_rgb() {
        assert_eq!(
            to_rgb(vec![7, 9], ColorSpace::Luma).unwrap(),
            [7, 7, 7, 9, 9, 9]
        );
        assert_eq!(
            to_rgb(vec![1, 2, 3, 255, 4, 5, 6, 0], ColorSpace::RGBA).unwrap(),
            [1, 2, 3, 4, 5, 6]
        );
        assert!(to_rgb(vec![0; 4], ColorSpace::CMYK).is_err());
    }

    #[test]
    fn bad_files_are_rejected() {
        let bytes = write_bmp(&sample()).unwrap();

        assert!(read_bmp(b"PNG image", limits(10, 10)).is_err());
        assert!(read_bmp(&bytes, limits(2, 10)).is_err());
        assert!(read_bmp(&bytes, limits(10, 1)).is_err());
    }

    #[test]
    fn empty_rasters_are_not_written() {
        assert!(write_bmp(&Raster::new(0, 3)).is_err());
    }
}
