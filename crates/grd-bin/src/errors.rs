/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Errors that stop a single file from being converted
use std::fmt::{Debug, Display, Formatter};
use std::path::PathBuf;

use grd::{GrdEncodeErrors, GrdErrors};

pub enum GrdToolErrors {
    IoErrors(std::io::Error),
    /// The source image could not be read as a PNG
    PngDecodeErrors(png::DecodingError),
    PngEncodeErrors(png::EncodingError),
    /// The source image is not 8 bit RGB or RGBA after expansion
    UnsupportedPixelFormat(png::ColorType, png::BitDepth),
    GrdDecodeErrors(GrdErrors),
    GrdEncodeErrors(GrdEncodeErrors),
    JsonErrors(serde_json::Error),
    /// The path is neither a file nor a folder
    InvalidPath(PathBuf),
    /// Some files in a folder failed
    ///
    /// # Arguments
    /// - 1st argument is the number of files that failed
    /// - 2nd argument is the number of files processed
    BatchFailures(usize, usize),
    Generic(String)
}

impl Debug for GrdToolErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IoErrors(ref error) => {
                writeln!(f, "I/O error: {error}")
            }
            Self::PngDecodeErrors(ref error) => {
                writeln!(f, "Could not read PNG: {error}")
            }
            Self::PngEncodeErrors(ref error) => {
                writeln!(f, "Could not write PNG: {error}")
            }
            Self::UnsupportedPixelFormat(color, depth) => {
                writeln!(
                    f,
                    "Unsupported image format {color:?} at {depth:?}, only 8 bit RGB and RGBA images can be converted"
                )
            }
            Self::GrdDecodeErrors(ref error) => {
                writeln!(f, "Could not decode GRD: {error:?}")
            }
            Self::GrdEncodeErrors(ref error) => {
                writeln!(f, "Could not encode GRD: {error:?}")
            }
            Self::JsonErrors(ref error) => {
                writeln!(f, "JSON error: {error}")
            }
            Self::InvalidPath(ref path) => {
                writeln!(f, "Path {path:?} is neither a file nor a folder")
            }
            Self::BatchFailures(failed, total) => {
                writeln!(f, "{failed} of {total} files could not be converted")
            }
            Self::Generic(ref message) => {
                writeln!(f, "{message}")
            }
        }
    }
}

impl Display for GrdToolErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{:?}", self)
    }
}

impl std::error::Error for GrdToolErrors {}

impl From<std::io::Error> for GrdToolErrors {
    fn from(from: std::io::Error) -> Self {
        GrdToolErrors::IoErrors(from)
    }
}

impl From<png::DecodingError> for GrdToolErrors {
    fn from(from: png::DecodingError) -> Self {
        GrdToolErrors::PngDecodeErrors(from)
    }
}

impl From<png::EncodingError> for GrdToolErrors {
    fn from(from: png::EncodingError) -> Self {
        GrdToolErrors::PngEncodeErrors(from)
    }
}

impl From<GrdErrors> for GrdToolErrors {
    fn from(from: GrdErrors) -> Self {
        GrdToolErrors::GrdDecodeErrors(from)
    }
}

impl From<GrdEncodeErrors> for GrdToolErrors {
    fn from(from: GrdEncodeErrors) -> Self {
        GrdToolErrors::GrdEncodeErrors(from)
    }
}

impl From<serde_json::Error> for GrdToolErrors {
    fn from(from: serde_json::Error) -> Self {
        GrdToolErrors::JsonErrors(from)
    }
}
