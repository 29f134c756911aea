/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! The `grdtool` command line
//!
//! - `grdtool -e <file.grd|folder>` writes the header of every container
//!   to a `<stem>.metadata.json` sidecar, and with `--decode` the image to `<stem>.png`
//! - `grdtool -c <file.png|folder>` builds `<stem>.new.grd` from every PNG,
//!   placing it with the geometry in `<stem>.metadata.json` when present
use std::process::exit;

use log::error;

use crate::workflow::run_workflow;

mod cmd_args;
pub mod cmd_parsers;
pub mod errors;
pub mod file_io;
pub mod serde;
pub mod workflow;

pub fn main() {
    let cmd = cmd_args::create_cmd_args();
    let options = cmd.get_matches();

    cmd_parsers::global_options::setup_logger(&options);

    let result = cmd_parsers::global_options::parse_options(&options)
        .and_then(|parsed_opts| run_workflow(&parsed_opts));

    if let Err(reason) = result {
        println!();
        error!(" Could not complete workflow, reason {:?}", reason);
        println!();
        exit(-1);
    }
}
