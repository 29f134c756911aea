/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Per file conversions and folder batches
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use grd::grd_core::bytestream::ByteReader;
use grd::grd_core::colorspace::ColorSpace;
use grd::grd_core::options::EncoderOptions;
use grd::planar::interleave;
use grd::{GrdDecoder, GrdEncoder, GrdHeader, GrdMetadata, PixelDepth};
use log::{error, info, warn};

use crate::cmd_parsers::get_decoder_options;
use crate::cmd_parsers::global_options::{CmdOptions, Mode};
use crate::errors::GrdToolErrors;
use crate::file_io::{read_png, write_png};
use crate::serde::{load_metadata, save_metadata};

const METADATA_SUFFIX: &str = ".metadata.json";
const CREATED_SUFFIX: &str = ".new.grd";

/// Run the conversion `options` describe
///
/// A folder is processed file by file, a failure is logged and the
/// remaining files are still converted. The result is an error if
/// any file failed.
pub fn run_workflow(options: &CmdOptions) -> Result<(), GrdToolErrors> {
    let extension = match options.mode {
        Mode::Extract => "grd",
        Mode::Create => "png"
    };

    if options.path.is_file() {
        return convert_file(&options.path, options).map(|_| ());
    }
    if !options.path.is_dir() {
        return Err(GrdToolErrors::InvalidPath(options.path.clone()));
    }

    let files = collect_files(&options.path, extension)?;

    if files.is_empty() {
        warn!("No .{} files in {:?}", extension, options.path);
        return Ok(());
    }
    info!("Processing {} files in {:?}", files.len(), options.path);

    let mut failed = 0;

    for file in &files {
        if let Err(reason) = convert_file(file, options) {
            error!("Could not convert {:?}, reason {:?}", file, reason);
            failed += 1;
        }
    }

    if failed > 0 {
        return Err(GrdToolErrors::BatchFailures(failed, files.len()));
    }
    Ok(())
}

fn convert_file(path: &Path, options: &CmdOptions) -> Result<PathBuf, GrdToolErrors> {
    match options.mode {
        Mode::Extract => extract_file(path, options),
        Mode::Create => create_file(path)
    }
}

/// Files directly inside `folder` whose extension matches `extension`
/// in any case, sorted by name
pub fn collect_files(folder: &Path, extension: &str) -> Result<Vec<PathBuf>, GrdToolErrors> {
    let mut files = Vec::new();

    for entry in fs::read_dir(folder)? {
        let path = entry?.path();

        let matches = path
            .extension()
            .and_then(OsStr::to_str)
            .map_or(false, |ext| ext.eq_ignore_ascii_case(extension));

        if matches && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// `path` with its extension replaced by `suffix`
fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let stem = path.file_stem().unwrap_or_default().to_string_lossy();
    path.with_file_name(format!("{stem}{suffix}"))
}

/// Write the sidecar of the container at `path`, and with
/// `--decode` its pixels as a PNG
///
/// The sidecar only needs a readable header, the crop box and the
/// configured limits are checked when decoding.
///
/// Returns the path of the sidecar
pub fn extract_file(path: &Path, options: &CmdOptions) -> Result<PathBuf, GrdToolErrors> {
    let data = fs::read(path)?;

    let header = GrdHeader::read(&mut ByteReader::new(&data), options.strict_mode)?;
    let metadata = GrdMetadata::from_header(&header);

    let metadata_path = sibling_path(path, METADATA_SUFFIX);
    save_metadata(&metadata_path, &metadata)?;

    info!("Extracted {:?} to {:?}", path, metadata_path);

    if options.decode {
        let mut decoder = GrdDecoder::new_with_options(&data, get_decoder_options(options));
        decoder.decode_headers()?;

        let (width, height) = decoder
            .dimensions()
            .ok_or(GrdToolErrors::Generic("Headers not decoded".to_string()))?;

        let colorspace = match header.depth {
            PixelDepth::Rgb24 => ColorSpace::RGB,
            PixelDepth::Argb32 => ColorSpace::RGBA
        };
        let planes = decoder.decode_planes()?;
        let pixels = interleave(&planes, width, height, colorspace)?;

        let png_path = sibling_path(path, ".png");
        write_png(&png_path, &pixels, width, height, colorspace)?;

        info!("Decoded {:?} to {:?}", path, png_path);
    }
    Ok(metadata_path)
}

/// Build `<stem>.new.grd` from the PNG at `path`
///
/// The geometry comes from `<stem>.metadata.json`, falling back to
/// a crop box covering the whole image when it cannot be used.
///
/// Returns the path of the new container
pub fn create_file(path: &Path) -> Result<PathBuf, GrdToolErrors> {
    let image = read_png(path)?;

    let metadata = load_metadata(&sibling_path(path, METADATA_SUFFIX));
    let geometry = metadata.resolve(image.width, image.height)?;

    let encoder_options = EncoderOptions::new(image.width, image.height, image.colorspace);
    let mut encoder = GrdEncoder::new(&image.pixels, encoder_options);
    encoder.set_geometry(geometry);

    // assemble in memory so a failure never leaves a partial file
    let mut container: Vec<u8> = Vec::new();
    encoder.encode(&mut container)?;

    let grd_path = sibling_path(path, CREATED_SUFFIX);
    fs::write(&grd_path, &container)?;

    info!("Created {:?} ({} bytes)", grd_path, container.len());

    Ok(grd_path)
}
