/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use clap::{value_parser, Arg, ArgAction, Command};

#[rustfmt::skip]
pub fn create_cmd_args() -> Command {
    Command::new("in3")
        .about("Convert BMP images to and from the IN3 lossy format")
        .long_about("Convert BMP images to and from the IN3 lossy format.\nInputs starting with the IN3 magic are decoded to a 24-bit BMP, BMP inputs are encoded to IN3.\nFilters run on the decoded pixels in either direction.")
        .arg(Arg::new("in")
            .short('i')
            .help("Input file to read data from")
            .long("input")
            .action(ArgAction::Append)
            .required(true))
        .arg(Arg::new("out")
            .short('o')
            .long("output")
            .help("Output to write the data to")
            .action(ArgAction::Append)
            .required(true))
        .arg(Arg::new("all-yes")
            .short('y')
            .long("yes")
            .action(ArgAction::SetTrue)
            .help("Overwrite existing output files without asking"))
        .arg(Arg::new("max-width")
            .long("max-width")
            .help_heading("ADVANCED")
            .help("Maximum width of images allowed")
            .default_value("65535")
            .value_parser(value_parser!(usize)))
        .arg(Arg::new("max-height")
            .long("max-height")
            .help_heading("ADVANCED")
            .help("Maximum height of images allowed")
            .default_value("65535")
            .value_parser(value_parser!(usize)))
        .arg(Arg::new("strict")
            .long("strict")
            .help_heading("ADVANCED")
            .action(ArgAction::SetTrue)
            .help("Treat recoverable anomalies as errors")
            .long_help("Treat recoverable anomalies as errors.\nE.g trailing bytes after the last IN3 channel are rejected instead of ignored"))
        .arg(Arg::new("brighten")
            .long("brighten")
            .help_heading("OPERATIONS")
            .help("Scale the brightness of every pixel by a factor")
            .long_help("Scale the brightness of every pixel by a factor.\nThe HSV value is multiplied and clamped, hue and saturation are kept")
            .value_parser(value_parser!(f64)))
        .arg(Arg::new("grayscale")
            .long("grayscale")
            .help_heading("OPERATIONS")
            .action(ArgAction::SetTrue)
            .help("Convert the image to grayscale"))
        .arg(Arg::new("dither")
            .long("dither")
            .help_heading("OPERATIONS")
            .action(ArgAction::SetTrue)
            .help("Ordered dither the image to black and white, implies --grayscale"))
        .arg(Arg::new("debug")
            .long("debug")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display debug information and higher"))
        .arg(Arg::new("trace")
            .long("trace")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display very verbose information"))
        .arg(Arg::new("warn")
            .long("warn")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display warnings and errors"))
        .arg(Arg::new("info")
            .long("info")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display information about the decoding options"))
}

#[cfg(test)]
mod tests {
    use super::create_cmd_args;

    #[test]
    fn command_is_well_formed() {
        create_cmd_args().debug_assert();
    }

    #[test]
    fn defaults_are_applied() {
        let matches = create_cmd_args()
            .try_get_matches_from(["in3", "-i", "a.bmp", "-o", "a.in3"])
            .unwrap();

        assert_eq!(matches.get_one::<usize>("max-width"), Some(&65535));
        assert!(!matches.get_flag("strict"));
        assert!(!matches.get_flag("all-yes"));
        assert!(!matches.get_flag("dither"));
        assert_eq!(matches.get_one::<f64>("brighten"), None);
    }

    #[test]
    fn brighten_needs_a_number() {
        let result = create_cmd_args().try_get_matches_from([
            "in3",
            "-i",
            "a.bmp",
            "-o",
            "a.in3",
            "--brighten",
            "much"
        ]);
        assert!(result.is_err());
    }
}
