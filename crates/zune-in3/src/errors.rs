/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Errors possible during decoding and encoding
use std::fmt::{Debug, Display, Formatter};

use zune_core::bit_depth::BitDepth;
use zune_core::colorspace::ColorSpace;

use crate::headers::Channel;

/// Broad classes of decoding failures
///
/// Every [`In3Errors`] variant belongs to exactly one of these,
/// see [`In3Errors::kind`]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum In3ErrorKind {
    /// Magic bytes are wrong or the header contradicts itself
    Format,
    /// The container ends before all declared data could be read
    TruncatedData,
    /// A code word could not be matched against a valid table.
    ///
    /// Indicates corrupted channel data
    InvariantViolation,
    /// Anything else, e.g caller supplied buffers being too small
    Other
}

/// Possible errors that may occur during decoding
pub enum In3Errors {
    /// The image does not start with the magic bytes `IN`
    ///
    /// Indicates that the data is not an IN3 container
    WrongMagicBytes([u8; 2]),
    /// The input buffer doesn't have enough bytes to hold
    /// what the header declares
    ///
    /// # Arguments
    /// - 1st argument is the number of bytes we expected
    /// - 2nd argument is number of bytes actually left
    InsufficientData(usize, usize),
    /// A channel ran out of bits before all symbols were decoded
    ///
    /// # Arguments
    /// - The channel being decoded
    /// - Number of symbols expected
    /// - Number of symbols decoded before the bits ran out
    TruncatedChannel(Channel, usize, usize),
    /// Header fields do not agree with each other
    InconsistentHeader(String),
    /// A stored length table cannot describe a prefix code
    InvalidLengthTable(Channel, &'static str),
    /// No code word matches the bits read from a channel
    UnmatchedCode(Channel),
    /// Too small output size
    TooSmallOutput(usize, usize),
    /// Generic message
    Generic(String),
    /// Generic message does not need heap allocation
    GenericStatic(&'static str)
}

impl In3Errors {
    /// Return the class this error belongs to
    pub const fn kind(&self) -> In3ErrorKind {
        match self {
            In3Errors::WrongMagicBytes(_)
            | In3Errors::InconsistentHeader(_)
            | In3Errors::InvalidLengthTable(_, _) => In3ErrorKind::Format,
            In3Errors::InsufficientData(_, _) | In3Errors::TruncatedChannel(_, _, _) => {
                In3ErrorKind::TruncatedData
            }
            In3Errors::UnmatchedCode(_) => In3ErrorKind::InvariantViolation,
            In3Errors::TooSmallOutput(_, _)
            | In3Errors::Generic(_)
            | In3Errors::GenericStatic(_) => In3ErrorKind::Other
        }
    }
}

impl Debug for In3Errors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            In3Errors::WrongMagicBytes(found) => {
                writeln!(
                    f,
                    "Wrong magic bytes, expected `IN` as image start but found {found:?}"
                )
            }
            In3Errors::InsufficientData(expected, found) => {
                writeln!(
                    f,
                    "Insufficient data required {expected} but remaining stream has {found}"
                )
            }
            In3Errors::TruncatedChannel(channel, expected, decoded) => {
                writeln!(
                    f,
                    "Channel {channel} ran out of bits, expected {expected} symbols but decoded {decoded}"
                )
            }
            In3Errors::InconsistentHeader(reason) => {
                writeln!(f, "Inconsistent header: {reason}")
            }
            In3Errors::InvalidLengthTable(channel, reason) => {
                writeln!(f, "Invalid length table for channel {channel}: {reason}")
            }
            In3Errors::UnmatchedCode(channel) => {
                writeln!(
                    f,
                    "No code word in channel {channel} matches the stream, data is corrupt"
                )
            }
            In3Errors::TooSmallOutput(expected, found) => {
                writeln!(
                    f,
                    "Too small output size, expected {expected}, but found {found}"
                )
            }
            In3Errors::Generic(val) => {
                writeln!(f, "{val}")
            }
            In3Errors::GenericStatic(val) => {
                writeln!(f, "{val}")
            }
        }
    }
}

impl Display for In3Errors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{:?}", self)
    }
}

impl From<&'static str> for In3Errors {
    fn from(r: &'static str) -> Self {
        Self::GenericStatic(r)
    }
}

impl std::error::Error for In3Errors {}

/// Errors encountered during encoding
pub enum In3EncodeErrors {
    /// Unsupported colorspace
    ///
    /// The first argument is the colorspace encountered
    /// The second argument is list of supported colorspaces
    UnsupportedColorspace(ColorSpace, &'static [ColorSpace]),
    /// Only eight bit images can be encoded
    UnsupportedBitDepth(BitDepth),
    /// Too large dimensions
    /// The dimension cannot be stored in the 16 bit header field
    TooLargeDimensions(usize),
    /// Width or height is zero
    ZeroDimensions,
    /// Pixel buffer length doesn't match `width*height*3`
    ///
    /// # Arguments
    /// - expected length
    /// - found length
    WrongInputSize(usize, usize),
    /// The packed channel doesn't fit into the 32 bit byte count
    ChannelTooLarge(Channel, usize),
    /// Generic message
    Generic(&'static str)
}

impl Debug for In3EncodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            In3EncodeErrors::UnsupportedColorspace(found, supported) => {
                writeln!(f, "Cannot encode image with colorspace {found:?} into IN3, supported ones are {supported:?}")
            }
            In3EncodeErrors::UnsupportedBitDepth(depth) => {
                writeln!(
                    f,
                    "Cannot encode image with depth {depth:?}, only 8 bit images are supported"
                )
            }
            In3EncodeErrors::TooLargeDimensions(found) => {
                writeln!(
                    f,
                    "Too large image dimensions {found}, IN3 can only encode images less than {}",
                    u16::MAX
                )
            }
            In3EncodeErrors::ZeroDimensions => {
                writeln!(f, "Cannot encode an image with a zero width or height")
            }
            In3EncodeErrors::WrongInputSize(expected, found) => {
                writeln!(
                    f,
                    "Expected pixel buffer of length {expected} but found {found}"
                )
            }
            In3EncodeErrors::ChannelTooLarge(channel, size) => {
                writeln!(
                    f,
                    "Channel {channel} needs {size} bytes which cannot be stored in the header"
                )
            }
            In3EncodeErrors::Generic(val) => {
                writeln!(f, "{val}")
            }
        }
    }
}

impl Display for In3EncodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{:?}", self)
    }
}

impl std::error::Error for In3EncodeErrors {}

/// Errors from accessing pixels of a [`Raster`](crate::Raster)
pub enum RasterErrors {
    /// Coordinates lie outside the raster
    ///
    /// # Arguments
    /// - requested (x, y)
    /// - raster (width, height)
    OutOfBounds((usize, usize), (usize, usize)),
    /// Buffer length doesn't match `width*height*3`
    WrongBufferSize(usize, usize)
}

impl Debug for RasterErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RasterErrors::OutOfBounds((x, y), (w, h)) => {
                writeln!(f, "Pixel ({x},{y}) is outside a {w}x{h} raster")
            }
            RasterErrors::WrongBufferSize(expected, found) => {
                writeln!(f, "Expected a buffer of {expected} bytes but found {found}")
            }
        }
    }
}

impl Display for RasterErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{:?}", self)
    }
}

impl std::error::Error for RasterErrors {}
