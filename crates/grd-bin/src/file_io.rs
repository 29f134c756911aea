/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! PNG reading and writing
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use grd_core::colorspace::ColorSpace;
use log::debug;
use png::{BitDepth, ColorType, Transformations};

use crate::errors::GrdToolErrors;

/// Decoded 8 bit pixels, top to bottom
pub struct PngImage {
    pub pixels:     Vec<u8>,
    pub width:      usize,
    pub height:     usize,
    pub colorspace: ColorSpace
}

/// Read a PNG as 8 bit RGB or RGBA pixels
///
/// Palette and sub byte images are expanded, a `tRNS` chunk
/// turns into an alpha channel.
pub fn read_png(path: &Path) -> Result<PngImage, GrdToolErrors> {
    let mut decoder = png::Decoder::new(BufReader::new(File::open(path)?));
    decoder.set_transformations(Transformations::EXPAND);

    let mut reader = decoder.read_info()?;
    let mut pixels = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut pixels)?;
    pixels.truncate(info.buffer_size());

    let colorspace = match (info.color_type, info.bit_depth) {
        (ColorType::Rgb, BitDepth::Eight) => ColorSpace::RGB,
        (ColorType::Rgba, BitDepth::Eight) => ColorSpace::RGBA,
        (color, depth) => return Err(GrdToolErrors::UnsupportedPixelFormat(color, depth))
    };
    debug!(
        "Read {:?}: {}x{} {:?}",
        path, info.width, info.height, colorspace
    );

    Ok(PngImage {
        pixels,
        width: info.width as usize,
        height: info.height as usize,
        colorspace
    })
}

/// Write 8 bit RGB or RGBA pixels as a PNG
pub fn write_png(
    path: &Path, pixels: &[u8], width: usize, height: usize, colorspace: ColorSpace
) -> Result<(), GrdToolErrors> {
    let color = match colorspace {
        ColorSpace::RGB => ColorType::Rgb,
        ColorSpace::RGBA => ColorType::Rgba,
        _ => {
            return Err(GrdToolErrors::Generic(format!(
                "Cannot write {colorspace:?} pixels to PNG"
            )))
        }
    };
    let width = u32::try_from(width)
        .map_err(|_| GrdToolErrors::Generic(format!("Width {width} too large for PNG")))?;
    let height = u32::try_from(height)
        .map_err(|_| GrdToolErrors::Generic(format!("Height {height} too large for PNG")))?;

    let mut encoder = png::Encoder::new(BufWriter::new(File::create(path)?), width, height);
    encoder.set_color(color);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder.write_header()?;
    writer.write_image_data(pixels)?;
    writer.finish()?;

    debug!("Wrote {:?}", path);
    Ok(())
}
