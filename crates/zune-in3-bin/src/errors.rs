/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::fmt::{Debug, Display, Formatter};

use zune_bmp::BmpDecoderErrors;
use zune_in3::{In3EncodeErrors, In3Errors, RasterErrors};

/// Everything that can stop the command line tool
pub enum CliErrors {
    Io(std::io::Error),
    Bmp(BmpDecoderErrors),
    Decode(In3Errors),
    Encode(In3EncodeErrors),
    Raster(RasterErrors),
    GenericStatic(&'static str),
    GenericString(String)
}

impl Debug for CliErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CliErrors::Io(err) => writeln!(f, "I/O error: {err}"),
            CliErrors::Bmp(err) => writeln!(f, "Could not decode BMP image: {err:?}"),
            CliErrors::Decode(err) => writeln!(f, "Could not decode IN3 image: {err:?}"),
            CliErrors::Encode(err) => writeln!(f, "Could not encode IN3 image: {err:?}"),
            CliErrors::Raster(err) => writeln!(f, "{err:?}"),
            CliErrors::GenericStatic(val) => writeln!(f, "{val}"),
            CliErrors::GenericString(val) => writeln!(f, "{val}")
        }
    }
}

impl Display for CliErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{:?}", self)
    }
}

impl std::error::Error for CliErrors {}

impl From<std::io::Error> for CliErrors {
    fn from(value: std::io::Error) -> Self {
        CliErrors::Io(value)
    }
}

impl From<BmpDecoderErrors> for CliErrors {
    fn from(value: BmpDecoderErrors) -> Self {
        CliErrors::Bmp(value)
    }
}

impl From<In3Errors> for CliErrors {
    fn from(value: In3Errors) -> Self {
        CliErrors::Decode(value)
    }
}

impl From<In3EncodeErrors> for CliErrors {
    fn from(value: In3EncodeErrors) -> Self {
        CliErrors::Encode(value)
    }
}

impl From<RasterErrors> for CliErrors {
    fn from(value: RasterErrors) -> Self {
        CliErrors::Raster(value)
    }
}
