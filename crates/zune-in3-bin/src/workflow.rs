/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::ffi::OsStr;
use std::fs::{File, OpenOptions};
use std::io::{stdin, BufRead, BufWriter, Read, Write};
use std::path::Path;

use clap::ArgMatches;
use log::{debug, info};
use zune_bmp::probe_bmp;
use zune_in3::{compress, probe_in3, In3Decoder, Raster};

use crate::bmp::{read_bmp, write_bmp};
use crate::cmd_parsers::filters::parse_filters;
use crate::cmd_parsers::global_options::CmdOptions;
use crate::errors::CliErrors;
use crate::filters::PixelFilter;

/// What to do with an input file
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Direction {
    /// IN3 container to BMP
    Decode,
    /// BMP to IN3 container
    Encode
}

fn direction_of(data: &[u8]) -> Option<Direction> {
    if probe_in3(data) {
        Some(Direction::Decode)
    } else if probe_bmp(data) {
        Some(Direction::Encode)
    } else {
        None
    }
}

pub(crate) fn create_and_exec_workflow_from_cmd(
    args: &ArgMatches, cmd_opts: &CmdOptions
) -> Result<(), CliErrors> {
    info!("Creating workflows from input");

    let inputs = args
        .get_raw("in")
        .ok_or_else(|| CliErrors::GenericString("No input files".to_string()))?;
    let outputs = args
        .get_raw("out")
        .ok_or_else(|| CliErrors::GenericString("No output files".to_string()))?;

    if inputs.len() != outputs.len() {
        return Err(CliErrors::GenericString(format!(
            "Got {} inputs but {} outputs",
            inputs.len(),
            outputs.len()
        )));
    }

    let filters = parse_filters(args);
    let mut buf = Vec::with_capacity(1 << 20);

    for (in_file, out_file) in inputs.zip(outputs) {
        verify_file_paths(in_file, out_file, cmd_opts)?;

        buf.clear();
        File::open(in_file)?.read_to_end(&mut buf)?;

        let converted = convert(&buf, cmd_opts, &filters).map_err(|err| {
            debug!("Failed converting {:?}", in_file);
            err
        })?;

        let file = OpenOptions::new()
            .write(true)
            .truncate(true)
            .create(true)
            .open(out_file)?;

        let mut writer = BufWriter::new(file);
        writer.write_all(&converted)?;
        writer.flush()?;

        info!("Wrote {} bytes to {:?}", converted.len(), out_file);
    }

    Ok(())
}

fn run_filters(raster: &mut Raster, filters: &[PixelFilter]) {
    for filter in filters {
        debug!("Running {} filter", filter.name());
        filter.apply(raster);
    }
}

/// Convert the contents of one input file
fn convert(
    data: &[u8], cmd_opts: &CmdOptions, filters: &[PixelFilter]
) -> Result<Vec<u8>, CliErrors> {
    match direction_of(data) {
        Some(Direction::Decode) => {
            debug!("Treating input as an IN3 file");

            let mut decoder = In3Decoder::new_with_options(data, cmd_opts.decoder_options());
            let mut raster = decoder.decode_raster()?;

            run_filters(&mut raster, filters);

            write_bmp(&raster)
        }
        Some(Direction::Encode) => {
            debug!("Treating input as a BMP file");

            let mut raster = read_bmp(data, cmd_opts.decoder_options())?;

            run_filters(&mut raster, filters);

            Ok(compress(&raster)?)
        }
        None => Err(CliErrors::GenericString(
            "Input is neither an IN3 nor a BMP image".to_string()
        ))
    }
}

fn verify_file_paths(p0: &OsStr, p1: &OsStr, cmd_opts: &CmdOptions) -> Result<(), CliErrors> {
    if p0 == p1 {
        return Err(CliErrors::GenericString(format!(
            "Cannot use {:?} as both input and output",
            p0
        )));
    }
    let in_path = Path::new(p0);
    let out_path = Path::new(p1);

    if !in_path.exists() {
        return Err(CliErrors::GenericString(format!(
            "Path {:?}, does not exist",
            in_path
        )));
    }

    if !in_path.is_file() {
        return Err(CliErrors::GenericString(format!(
            "Path {:?} is not a file",
            in_path
        )));
    }

    if out_path.exists() {
        if cmd_opts.override_files {
            info!("Overwriting path {:?} ", p1);
        } else {
            println!("File {:?} exists, overwrite [y/N]", out_path);
            let mut result = String::new();

            stdin().lock().read_line(&mut result)?;

            if result.trim() != "y" {
                return Err(CliErrors::GenericString(format!(
                    "Not overwriting file {:?}",
                    out_path
                )));
            }
        }
    }
    Ok(())
}
