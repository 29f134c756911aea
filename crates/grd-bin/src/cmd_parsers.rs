/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use grd_core::options::DecoderOptions;

use crate::cmd_parsers::global_options::CmdOptions;

pub mod global_options;

/// Decoder options configured from the command line
pub fn get_decoder_options(options: &CmdOptions) -> DecoderOptions {
    DecoderOptions::default()
        .set_max_width(options.max_width)
        .set_max_height(options.max_height)
        .set_strict_mode(options.strict_mode)
}
