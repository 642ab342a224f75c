/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use log::{trace, warn};
use zune_core::bit_depth::BitDepth;
use zune_core::colorspace::ColorSpace;
use zune_core::options::DecoderOptions;

use crate::bitstream::BitReader;
use crate::canonical::{CanonicalCodes, MatchError};
use crate::color::symbols_to_pixel;
use crate::errors::In3Errors;
use crate::headers::{Channel, In3Header};
use crate::raster::Raster;

/// An IN3 decoder
///
/// The decoder is initialized by calling `new`
/// and either of [`decode_headers`] to decode headers
/// or [`decode`] to return uncompressed pixels
///
/// Image details like width and height are accessible
/// after decoding headers
///
/// [`decode_headers`]:In3Decoder::decode_headers
/// [`decode`]:In3Decoder::decode
pub struct In3Decoder<'a> {
    data:    &'a [u8],
    header:  Option<In3Header>,
    options: DecoderOptions
}

impl<'a> In3Decoder<'a> {
    /// Create a new decoder with the default limits
    ///
    /// The decoder is lenient, trailing bytes are logged and ignored.
    /// Use [`new_with_options`](Self::new_with_options) with
    /// `set_strict_mode(true)` to reject them.
    ///
    /// # Example
    ///
    /// ```no_run
    /// let mut decoder = zune_in3::In3Decoder::new(&[]);
    /// // additional code
    /// ```
    pub fn new(data: &'a [u8]) -> In3Decoder<'a> {
        let options = DecoderOptions::default().set_strict_mode(false);

        In3Decoder::new_with_options(data, options)
    }

    /// Create a new decoder that obeys specified restrictions
    ///
    /// E.g can be used to set width and height limits to prevent OOM attacks
    ///
    /// # Example
    /// ```
    /// use zune_core::options::DecoderOptions;
    /// use zune_in3::In3Decoder;
    /// // only decode images less than 10 in both width and height
    ///
    /// let options = DecoderOptions::default().set_max_width(10).set_max_height(10);
    ///
    /// let mut decoder = In3Decoder::new_with_options(&[], options);
    /// ```
    #[allow(clippy::redundant_field_names)]
    pub fn new_with_options(data: &'a [u8], options: DecoderOptions) -> In3Decoder<'a> {
        In3Decoder {
            data:    data,
            header:  None,
            options: options
        }
    }

    /// Decode the container header storing it in the decoder instance
    ///
    /// Nothing is allocated for pixels until the header is known to be
    /// consistent and the input long enough to hold every channel.
    ///
    /// # Returns
    /// - On success: Nothing
    /// - On error: The error encountered when decoding headers
    pub fn decode_headers(&mut self) -> Result<(), In3Errors> {
        if self.header.is_some() {
            return Ok(());
        }
        let header = In3Header::parse(self.data)?;

        header.validate(&self.options)?;

        let expected = header.container_size();

        if self.data.len() < expected {
            return Err(In3Errors::InsufficientData(expected, self.data.len()));
        }
        if self.data.len() > expected {
            let extra = self.data.len() - expected;

            if self.options.get_strict_mode() {
                return Err(In3Errors::InconsistentHeader(format!(
                    "{extra} trailing bytes after the last channel"
                )));
            }
            warn!("Ignoring {extra} trailing bytes after the last channel");
        }
        self.header = Some(header);

        Ok(())
    }

    /// Return the parsed header, or `None` if headers weren't decoded
    pub const fn header(&self) -> Option<&In3Header> {
        self.header.as_ref()
    }

    /// Return the width and height of the image
    ///
    /// Or none if the headers haven't been decoded
    ///
    /// # Example
    ///
    /// ```no_run
    /// use zune_in3::In3Decoder;
    /// let mut decoder = In3Decoder::new(&[]);
    ///
    /// decoder.decode_headers().unwrap();
    /// // get dimensions now.
    /// let (w,h)=decoder.dimensions().unwrap();
    /// ```
    pub fn dimensions(&self) -> Option<(usize, usize)> {
        self.header
            .as_ref()
            .map(|header| (usize::from(header.width), usize::from(header.height)))
    }

    /// Return the colorspace of the decoded pixels
    ///
    /// This is always [`ColorSpace::RGB`] once headers are decoded,
    /// `None` before that
    pub fn colorspace(&self) -> Option<ColorSpace> {
        self.header.as_ref().map(|_| ColorSpace::RGB)
    }

    /// Return the bit depth of the decoded pixels
    ///
    /// This is always 8
    pub const fn bit_depth(&self) -> BitDepth {
        BitDepth::Eight
    }

    /// Return the number of bytes required to hold the decoded image
    ///
    /// # Returns
    ///  - `Some(usize)`: Minimum size for a buffer needed to decode the image
    ///  - `None`: Indicates the headers were not decoded.
    pub fn output_buffer_size(&self) -> Option<usize> {
        self.header.as_ref().map(|header| header.num_symbols() * 3)
    }

    /// Decode the container, returning interleaved RGB pixels
    ///
    /// # Returns
    /// - On success: The decoded pixels, `width*height*3` bytes
    /// - On error: An instance of [In3Errors] which gives a reason why the image could not
    /// be decoded
    pub fn decode(&mut self) -> Result<Vec<u8>, In3Errors> {
        self.decode_headers()?;

        let size = self
            .output_buffer_size()
            .ok_or(In3Errors::GenericStatic("Headers not decoded"))?;

        let mut output = vec![0; size];

        self.decode_into(&mut output)?;

        Ok(output)
    }

    /// Decode the container into a [`Raster`]
    pub fn decode_raster(&mut self) -> Result<Raster, In3Errors> {
        let pixels = self.decode()?;
        let (width, height) = self
            .dimensions()
            .ok_or(In3Errors::GenericStatic("Headers not decoded"))?;

        Raster::from_rgb(width, height, pixels).map_err(|e| In3Errors::Generic(format!("{e:?}")))
    }

    /// Decode the container and store the pixels into `pixels`
    ///
    /// Returns an error if the buffer cannot hold the image
    pub fn decode_into(&mut self, pixels: &mut [u8]) -> Result<(), In3Errors> {
        self.decode_headers()?;

        let header = self
            .header
            .as_ref()
            .ok_or(In3Errors::GenericStatic("Headers not decoded"))?;

        let expected = header.num_symbols() * 3;

        if pixels.len() < expected {
            return Err(In3Errors::TooSmallOutput(expected, pixels.len()));
        }

        let mut planes = [vec![], vec![], vec![]];

        for channel in Channel::ALL {
            planes[channel.index()] = self.decode_channel(header, channel)?;
        }

        for (i, pixel) in pixels[..expected].chunks_exact_mut(3).enumerate() {
            let rgb = symbols_to_pixel([planes[0][i], planes[1][i], planes[2][i]]);
            pixel.copy_from_slice(&rgb);
        }
        Ok(())
    }

    fn decode_channel(&self, header: &In3Header, channel: Channel) -> Result<Vec<i8>, In3Errors> {
        let codes = CanonicalCodes::new(header.table(channel))
            .map_err(|reason| In3Errors::InvalidLengthTable(channel, reason))?;

        let range = header.channel_range(channel);
        let stream = &self.data[range];
        let expected = header.num_symbols();

        trace!(
            "Decoding channel {channel}: {} bytes, longest code {} bits",
            stream.len(),
            codes.max_length()
        );

        let mut reader = BitReader::new(stream);
        let mut symbols = Vec::with_capacity(expected);

        for _ in 0..expected {
            match codes.decode_symbol(&mut reader) {
                Ok(symbol) => symbols.push(symbol),
                Err(MatchError::OutOfBits) => {
                    return Err(In3Errors::TruncatedChannel(
                        channel,
                        expected,
                        symbols.len()
                    ));
                }
                Err(MatchError::NoMatch) => return Err(In3Errors::UnmatchedCode(channel))
            }
        }

        let unused = stream.len() - reader.aligned_position();

        if unused != 0 {
            if self.options.get_strict_mode() {
                return Err(In3Errors::InconsistentHeader(format!(
                    "channel {channel} has {unused} unused bytes"
                )));
            }
            warn!("Channel {channel} has {unused} unused bytes");
        }
        Ok(symbols)
    }
}
