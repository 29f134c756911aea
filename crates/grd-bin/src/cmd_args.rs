/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::path::PathBuf;

use clap::{value_parser, Arg, ArgAction, ArgGroup, Command};

static EXTRACT_HELP: &str = "Extract the header of GRD containers

For every container a sidecar <stem>.metadata.json holding the
screen size, bit depth and crop box is written next to it.

Accepts a single file or a folder, in which case every *.grd
file in the folder is processed.";

static CREATE_HELP: &str = "Create GRD containers from PNG images

For every image <stem>.new.grd is written next to it. The geometry
is read from <stem>.metadata.json when present, otherwise the crop
box covers the whole image.

Only 8 bit RGB and RGBA images are accepted, palette and low bit
depth images are expanded first.";

#[rustfmt::skip]
pub fn create_cmd_args() -> Command {
    Command::new("grdtool")
        .about("Convert between PNG images and GRD planar RLE containers")
        .arg_required_else_help(true)
        .arg(Arg::new("extract")
            .short('e')
            .long("extract")
            .value_name("PATH")
            .help("Extract metadata from a .grd file or a folder of them")
            .long_help(EXTRACT_HELP)
            .value_parser(value_parser!(PathBuf)))
        .arg(Arg::new("create")
            .short('c')
            .long("create")
            .value_name("PATH")
            .help("Create .grd files from a .png file or a folder of them")
            .long_help(CREATE_HELP)
            .value_parser(value_parser!(PathBuf)))
        .group(ArgGroup::new("mode")
            .args(["extract", "create"])
            .required(true))
        .arg(Arg::new("decode")
            .long("decode")
            .action(ArgAction::SetTrue)
            .requires("extract")
            .help("Also decode extracted containers to <stem>.png"))
        .arg(Arg::new("strict")
            .long("strict")
            .action(ArgAction::SetTrue)
            .requires("extract")
            .help_heading("ADVANCED")
            .help("Treat recoverable container problems as errors"))
        .arg(Arg::new("max-width")
            .long("max-width")
            .requires("extract")
            .help_heading("ADVANCED")
            .help("Maximum width of a container to decode")
            .value_parser(value_parser!(usize))
            .default_value("16384"))
        .arg(Arg::new("max-height")
            .long("max-height")
            .requires("extract")
            .help_heading("ADVANCED")
            .help("Maximum height of a container to decode")
            .value_parser(value_parser!(usize))
            .default_value("16384"))
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
            .help("Display progress for every file, the default"))
}
