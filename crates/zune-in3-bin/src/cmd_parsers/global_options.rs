/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use clap::parser::ValueSource;
use clap::ArgMatches;
use log::{info, Level};
use zune_core::options::DecoderOptions;

#[derive(Debug, Copy, Clone)]
pub struct CmdOptions {
    pub max_width:      usize,
    pub max_height:     usize,
    pub strict_mode:    bool,
    pub override_files: bool
}

impl CmdOptions {
    pub fn new() -> CmdOptions {
        CmdOptions {
            max_width:      usize::from(u16::MAX),
            max_height:     usize::from(u16::MAX),
            strict_mode:    false,
            override_files: false
        }
    }

    /// Limits and strictness handed to the IN3 decoder
    pub fn decoder_options(&self) -> DecoderOptions {
        DecoderOptions::default()
            .set_max_width(self.max_width)
            .set_max_height(self.max_height)
            .set_strict_mode(self.strict_mode)
    }
}

pub fn parse_options(options: &ArgMatches) -> CmdOptions {
    let mut cmd_options = CmdOptions::new();

    if let Some(width) = options.get_one::<usize>("max-width") {
        cmd_options.max_width = *width;
    }
    if let Some(height) = options.get_one::<usize>("max-height") {
        cmd_options.max_height = *height;
    }

    if options.value_source("strict") == Some(ValueSource::CommandLine) {
        info!("Enabling strict mode");
        cmd_options.strict_mode = true;
    }

    if options.value_source("all-yes") == Some(ValueSource::CommandLine) {
        info!("Setting all commands to yes");
        cmd_options.override_files = true;
    }
    cmd_options
}

/// Set up logging options
pub fn setup_logger(options: &ArgMatches) {
    let log_level;

    if options.get_flag("debug") {
        log_level = Level::Debug;
    } else if options.get_flag("trace") {
        log_level = Level::Trace;
    } else if options.get_flag("warn") {
        log_level = Level::Warn
    } else if options.get_flag("info") {
        log_level = Level::Info;
    } else {
        log_level = Level::Warn;
    }

    if let Err(e) = simple_logger::init_with_level(log_level) {
        eprintln!("Could not initialize logger: {e}");
        return;
    }

    info!("Initialized logger");
    info!("Log level :{}", log_level);
}

#[cfg(test)]
mod tests {
    use super::parse_options;
    use crate::cmd_args::create_cmd_args;

    #[test]
    fn flags_reach_options() {
        let matches = create_cmd_args()
            .try_get_matches_from([
                "in3",
                "-i",
                "a.in3",
                "-o",
                "a.bmp",
                "--strict",
                "-y",
                "--max-width",
                "100"
            ])
            .unwrap();

        let options = parse_options(&matches);

        assert!(options.strict_mode);
        assert!(options.override_files);
        assert_eq!(options.max_width, 100);
        assert_eq!(options.max_height, 65535);

        let decoder_options = options.decoder_options();
        assert_eq!(decoder_options.get_max_width(), 100);
        assert!(decoder_options.get_strict_mode());
    }
}
