/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Decoding and encoding of planar run length encoded GRD images.
//!
//! A GRD file is a fixed header followed by up to four independently
//! compressed channel blocks:
//! ```text
//! ╔════════╤═══════════════════════════════════════════════════════════╗
//! ║ Bytes  │ Description                                               ║
//! ╠════════╪═══════════════════════════════════════════════════════════╣
//! ║ 2      │ pack type, always 0x0101                                  ║
//! ╟────────┼───────────────────────────────────────────────────────────╢
//! ║ 2 + 2  │ screen width, screen height                               ║
//! ╟────────┼───────────────────────────────────────────────────────────╢
//! ║ 2      │ bits per pixel, 24 or 32                                  ║
//! ╟────────┼───────────────────────────────────────────────────────────╢
//! ║ 4 x 2  │ left, right, top, bottom of the image on the screen       ║
//! ╟────────┼───────────────────────────────────────────────────────────╢
//! ║ 4 x 4  │ compressed length of the A, R, G and B blocks             ║
//! ╟────────┼───────────────────────────────────────────────────────────╢
//! ║ [....] │ A block (32 bpp only), R block, G block, B block          ║
//! ╚════════╧═══════════════════════════════════════════════════════════╝
//! ```
//! All integers are little endian. Rows are stored bottom to top and
//! each block holds one byte per pixel, compressed with a byte oriented
//! run length scheme (see [`rle`]).
//!
//! # Features
//! - `std`: Write containers to anything implementing `std::io::Write`
//! - `log`: Log header details and recoverable problems via the `log` crate
//! - `serde`: Serialize and deserialize the [`GrdMetadata`] sidecar
#![cfg_attr(not(feature = "std"), no_std)]
#![macro_use]
extern crate alloc;
extern crate core;

pub use constants::{GRD_HEADER_SIZE, GRD_PACK_TYPE};
pub use container::*;
pub use decoder::*;
pub use encoder::*;
pub use errors::*;
pub use grd_core;
pub use header::*;
pub use metadata::*;
pub use planar::ChannelPlanes;

mod constants;
mod container;
mod decoder;
mod encoder;
mod errors;
mod header;
mod metadata;
pub mod planar;
pub mod rle;
