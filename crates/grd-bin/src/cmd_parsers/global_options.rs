/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::path::PathBuf;

use clap::parser::ValueSource;
use clap::ArgMatches;
use grd_core::options::DecoderOptions;
use log::{debug, info, Level};

use crate::errors::GrdToolErrors;

/// What the tool was asked to do
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Mode {
    /// Write sidecars (and optionally PNGs) for containers
    Extract,
    /// Build containers from PNGs
    Create
}

#[derive(Debug, Clone)]
pub struct CmdOptions {
    pub mode:        Mode,
    /// A single file or a folder to process
    pub path:        PathBuf,
    /// Decode extracted containers to PNG
    pub decode:      bool,
    pub max_width:   usize,
    pub max_height:  usize,
    pub strict_mode: bool
}

impl CmdOptions {
    pub fn new(mode: Mode, path: PathBuf) -> CmdOptions {
        let defaults = DecoderOptions::default();

        CmdOptions {
            mode,
            path,
            decode: false,
            max_width: defaults.get_max_width(),
            max_height: defaults.get_max_height(),
            strict_mode: defaults.get_strict_mode()
        }
    }
}

pub fn parse_options(options: &ArgMatches) -> Result<CmdOptions, GrdToolErrors> {
    let (mode, path) = if let Some(path) = options.get_one::<PathBuf>("extract") {
        (Mode::Extract, path)
    } else if let Some(path) = options.get_one::<PathBuf>("create") {
        (Mode::Create, path)
    } else {
        return Err(GrdToolErrors::Generic(
            "Either --extract or --create must be given".to_string()
        ));
    };
    info!("{:?} mode on {:?}", mode, path);

    let mut cmd_options = CmdOptions::new(mode, path.clone());

    cmd_options.decode = options.get_flag("decode");

    if let Some(width) = options.get_one::<usize>("max-width") {
        cmd_options.max_width = *width;
    }
    if let Some(height) = options.get_one::<usize>("max-height") {
        cmd_options.max_height = *height;
    }

    if options.value_source("strict") == Some(ValueSource::CommandLine) {
        info!("Strict mode enabled");
        cmd_options.strict_mode = true;
    }
    debug!("Options: {:?}", cmd_options);

    Ok(cmd_options)
}

/// The log level the LOGGING flags ask for, `--info` when none is given
pub fn log_level(options: &ArgMatches) -> Level {
    if options.get_flag("trace") {
        Level::Trace
    } else if options.get_flag("debug") {
        Level::Debug
    } else if options.get_flag("info") {
        Level::Info
    } else if options.get_flag("warn") {
        Level::Warn
    } else {
        Level::Info
    }
}

/// Set up logging options
pub fn setup_logger(options: &ArgMatches) {
    let log_level = log_level(options);

    if let Err(e) = simple_logger::init_with_level(log_level) {
        eprintln!("Could not initialize logger: {e}");
        return;
    }

    debug!("Initialized logger");
    debug!("Log level :{}", log_level);
}
