/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! An owned, interleaved RGB raster

use crate::errors::RasterErrors;

/// A single pixel, red, green and blue in that order
pub type Pixel = [u8; 3];

/// An RGB raster stored as one contiguous buffer in scan order
///
/// Row 0 comes first, pixels inside a row go left to right.
/// Cloning makes a deep copy of the pixel buffer.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Raster {
    width:  usize,
    height: usize,
    data:   Vec<u8>
}

impl Raster {
    /// Create a black raster of the given dimensions
    pub fn new(width: usize, height: usize) -> Raster {
        Raster {
            width,
            height,
            data: vec![0; width * height * 3]
        }
    }

    /// Wrap an interleaved RGB buffer
    ///
    /// # Errors
    /// If `data.len()` isn't `width*height*3`
    pub fn from_rgb(width: usize, height: usize, data: Vec<u8>) -> Result<Raster, RasterErrors> {
        let expected = width * height * 3;

        if data.len() != expected {
            return Err(RasterErrors::WrongBufferSize(expected, data.len()));
        }
        Ok(Raster {
            width,
            height,
            data
        })
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn height(&self) -> usize {
        self.height
    }

    /// Return `(width, height)`
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn offset(&self, x: usize, y: usize) -> Result<usize, RasterErrors> {
        if x >= self.width || y >= self.height {
            return Err(RasterErrors::OutOfBounds(
                (x, y),
                (self.width, self.height)
            ));
        }
        Ok((y * self.width + x) * 3)
    }

    /// Return the pixel at column `x` of row `y`
    pub fn get_pixel(&self, x: usize, y: usize) -> Result<Pixel, RasterErrors> {
        let start = self.offset(x, y)?;

        Ok([
            self.data[start],
            self.data[start + 1],
            self.data[start + 2]
        ])
    }

    /// Overwrite the pixel at column `x` of row `y`
    pub fn set_pixel(&mut self, x: usize, y: usize, pixel: Pixel) -> Result<(), RasterErrors> {
        let start = self.offset(x, y)?;

        self.data[start..start + 3].copy_from_slice(&pixel);
        Ok(())
    }

    /// Iterate over all pixels in scan order
    pub fn pixels(&self) -> impl ExactSizeIterator<Item = Pixel> + '_ {
        self.data
            .chunks_exact(3)
            .map(|chunk| [chunk[0], chunk[1], chunk[2]])
    }

    /// The underlying interleaved buffer
    pub fn as_rgb(&self) -> &[u8] {
        &self.data
    }

    pub fn as_rgb_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_rgb(self) -> Vec<u8> {
        self.data
    }
}
