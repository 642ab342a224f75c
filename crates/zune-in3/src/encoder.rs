/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use log::{debug, trace};
use zune_core::bit_depth::BitDepth;
use zune_core::colorspace::ColorSpace;
use zune_core::options::EncoderOptions;

use crate::bitstream::BitWriter;
use crate::canonical::CanonicalCodes;
use crate::color::pixel_to_symbols;
use crate::constants::{ALPHABET_SIZE, IN3_HEADER_SIZE, NUM_CHANNELS};
use crate::errors::In3EncodeErrors;
use crate::headers::{Channel, In3Header};
use crate::huffman::{build_lengths, count_symbols, encoded_bits, symbol_index, LengthTable};
use crate::raster::Raster;

const SUPPORTED_COLORSPACES: [ColorSpace; 1] = [ColorSpace::RGB];

/// A channel after entropy coding
struct CodedChannel {
    lengths: LengthTable,
    bytes:   Vec<u8>
}

/// IN3 image encoder
///
/// # Example
/// - Encode a 100 by 100 RGB image
///
/// ```
/// use zune_core::bit_depth::BitDepth;
/// use zune_core::colorspace::ColorSpace;
/// use zune_core::options::EncoderOptions;
/// use zune_in3::In3Encoder;
/// use zune_in3::In3EncodeErrors;
///
/// const W: usize = 100;
/// const H: usize = 100;
///
/// fn main() -> Result<(), In3EncodeErrors> {
///     let pixels = std::array::from_fn::<u8, { W * H * 3 }, _>(|i| (i % 256) as u8);
///     let encoder = In3Encoder::new(&pixels, EncoderOptions::new(W, H, ColorSpace::RGB, BitDepth::Eight));
///     let container = encoder.encode()?;
///     assert_eq!(&container[..2], b"IN");
///     Ok(())
/// }
/// ```
pub struct In3Encoder<'a> {
    pixel_data: &'a [u8],
    options:    EncoderOptions
}

impl<'a> In3Encoder<'a> {
    /// Create a new encoder which will encode the pixels
    ///
    /// # Arguments
    /// - data: Interleaved RGB pixels, size must be `width*height*3`
    /// - options: Width, height, colorspace and depth of `data`
    #[allow(clippy::redundant_field_names)]
    pub const fn new(data: &'a [u8], options: EncoderOptions) -> In3Encoder<'a> {
        In3Encoder {
            pixel_data: data,
            options:    options
        }
    }

    /// Create an encoder for the pixels of `raster`
    pub fn from_raster(raster: &'a Raster) -> In3Encoder<'a> {
        let options = EncoderOptions::new(
            raster.width(),
            raster.height(),
            ColorSpace::RGB,
            BitDepth::Eight
        );
        In3Encoder::new(raster.as_rgb(), options)
    }

    fn check_options(&self) -> Result<(u16, u16), In3EncodeErrors> {
        let options = &self.options;

        if options.get_colorspace() != ColorSpace::RGB {
            return Err(In3EncodeErrors::UnsupportedColorspace(
                options.get_colorspace(),
                &SUPPORTED_COLORSPACES
            ));
        }
        if options.get_depth() != BitDepth::Eight {
            return Err(In3EncodeErrors::UnsupportedBitDepth(options.get_depth()));
        }
        if options.get_width() == 0 || options.get_height() == 0 {
            return Err(In3EncodeErrors::ZeroDimensions);
        }
        let width = u16::try_from(options.get_width())
            .map_err(|_| In3EncodeErrors::TooLargeDimensions(options.get_width()))?;
        let height = u16::try_from(options.get_height())
            .map_err(|_| In3EncodeErrors::TooLargeDimensions(options.get_height()))?;

        let expected_len = usize::from(width) * usize::from(height) * 3;

        if self.pixel_data.len() != expected_len {
            return Err(In3EncodeErrors::WrongInputSize(
                expected_len,
                self.pixel_data.len()
            ));
        }
        Ok((width, height))
    }

    /// Split the pixels into Y, U and V symbol planes
    fn to_symbol_planes(&self) -> [Vec<i8>; NUM_CHANNELS] {
        let count = self.pixel_data.len() / 3;
        let mut planes = [
            Vec::with_capacity(count),
            Vec::with_capacity(count),
            Vec::with_capacity(count)
        ];

        for pixel in self.pixel_data.chunks_exact(3) {
            let symbols = pixel_to_symbols([pixel[0], pixel[1], pixel[2]]);

            for (plane, symbol) in planes.iter_mut().zip(symbols) {
                plane.push(symbol);
            }
        }
        planes
    }

    /// Encode the image returning the complete container
    ///
    /// # Returns
    /// - Ok(bytes): The IN3 container
    /// - Err: The error encountered during encoding
    pub fn encode(&self) -> Result<Vec<u8>, In3EncodeErrors> {
        let (width, height) = self.check_options()?;

        trace!("Image width: {width}");
        trace!("Image height: {height}");

        let planes = self.to_symbol_planes();

        let mut coded = Vec::with_capacity(NUM_CHANNELS);

        for (channel, plane) in Channel::ALL.into_iter().zip(planes.iter()) {
            coded.push(encode_channel(channel, plane)?);
        }

        let mut sizes = [0_u32; NUM_CHANNELS];
        let mut tables = [[0_u8; ALPHABET_SIZE]; NUM_CHANNELS];

        for (i, channel) in coded.iter().enumerate() {
            // checked in encode_channel
            sizes[i] = channel.bytes.len() as u32;
            tables[i] = channel.lengths;
        }

        let header = In3Header {
            width,
            height,
            sizes,
            tables
        };

        let mut out = Vec::with_capacity(header.container_size());
        header.write(&mut out);

        debug_assert_eq!(out.len(), IN3_HEADER_SIZE);

        for channel in &coded {
            out.extend_from_slice(&channel.bytes);
        }
        debug!(
            "Encoded {}x{} image into {} bytes",
            width,
            height,
            out.len()
        );
        Ok(out)
    }
}

fn encode_channel(channel: Channel, symbols: &[i8]) -> Result<CodedChannel, In3EncodeErrors> {
    let frequencies = count_symbols(symbols);
    let lengths = build_lengths(&frequencies);
    let codes = CanonicalCodes::new(&lengths).map_err(In3EncodeErrors::Generic)?;

    let total_bits = encoded_bits(&frequencies, &lengths);
    let total_bytes = total_bits.div_ceil(8);

    if total_bytes > u64::from(u32::MAX) {
        return Err(In3EncodeErrors::ChannelTooLarge(
            channel,
            usize::try_from(total_bytes).unwrap_or(usize::MAX)
        ));
    }
    debug!(
        "Channel {channel}: longest code {} bits, {total_bits} bits total",
        codes.max_length()
    );

    // reverse every code once instead of once per symbol
    let mut reversed = [([0_u64; 4], 0_u8); ALPHABET_SIZE];

    for (entry, code) in reversed.iter_mut().zip(codes.codes()) {
        *entry = (code.lsb_first(), code.len());
    }

    let mut writer = BitWriter::with_capacity(total_bytes as usize);

    for symbol in symbols {
        let (bits, length) = &reversed[symbol_index(*symbol)];
        writer.put_code(bits, *length);
    }
    let bytes = writer.finish();

    debug_assert_eq!(bytes.len() as u64, total_bytes);

    Ok(CodedChannel { lengths, bytes })
}
