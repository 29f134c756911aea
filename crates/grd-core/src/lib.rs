/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Core routines shared by the GRD codec and its tools
//!
//! It currently contains
//!
//! - A bytestream reader and writer with endian aware reads and writes
//! - Colorspace information for interleaved pixel buffers
//! - Decoder and encoder options
//! - Logging shims that forward to the `log` crate when enabled
//!
//! This library is `#[no_std]` with `alloc` needed for `Vec`.
//!
//! # Features
//!  - `std`: Enables writing to anything implementing [`std::io::Write`]
//!
//!  - `log`: Forwards the logging macros in [`log`] to the `log` crate
#![cfg_attr(not(feature = "std"), no_std)]
#![macro_use]
extern crate alloc;

pub mod bytestream;
pub mod colorspace;
pub mod log;
pub mod options;
