/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use clap::ArgMatches;
use log::debug;

use crate::filters::PixelFilter;

/// Collect the filters requested on the command line
///
/// They always run as brighten, grayscale then dither. Dithering
/// thresholds the red channel, so it pulls in grayscale when that
/// wasn't asked for.
pub fn parse_filters(args: &ArgMatches) -> Vec<PixelFilter> {
    let mut filters = vec![];

    if let Some(factor) = args.get_one::<f64>("brighten") {
        debug!("Added brighten filter with factor {factor}");
        filters.push(PixelFilter::Brighten(*factor));
    }

    let dither = args.get_flag("dither");

    if args.get_flag("grayscale") || dither {
        debug!("Added grayscale filter");
        filters.push(PixelFilter::Grayscale);
    }
    if dither {
        debug!("Added ordered dither filter");
        filters.push(PixelFilter::OrderedDither);
    }
    filters
}
