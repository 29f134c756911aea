/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Errors possible during decoding and encoding.
use alloc::string::String;
use core::fmt::{Debug, Display, Formatter};

use grd_core::bytestream::ByteIoError;
use grd_core::colorspace::ColorSpace;

use crate::header::Channel;

/// Possible Errors that may occur during decoding
pub enum GrdErrors {
    /// The pack type field is not a variant we understand
    ///
    /// Only `0x0101` (planar RLE) is supported
    UnsupportedPackType(u16),
    /// The header declares a bit depth other than 24 or 32
    UnsupportedPixelFormat(u16),
    /// The file is shorter than the header and declared
    /// block lengths require
    ///
    /// # Arguments
    /// - 1st argument is the number of bytes we expected
    /// - 2nd argument is number of bytes actually present
    TruncatedFile(u64, usize),
    /// A run in a compressed block reads past the end of
    /// the block, or declares a length of zero
    MalformedStream {
        channel:  Channel,
        position: usize,
        reason:   &'static str
    },
    /// The crop box is inverted, `right < left` or `bottom < top`
    InvalidGeometry {
        left:   u16,
        right:  u16,
        top:    u16,
        bottom: u16
    },
    /// A 24 bit container declares a non zero alpha block length
    ///
    /// Only raised in strict mode, otherwise the field is ignored
    UnexpectedAlphaBlock(u32),
    /// A channel decompressed to a different number of pixels
    /// than the crop box describes
    ///
    /// Only raised in strict mode, otherwise the plane is padded or cut
    PlaneSizeMismatch {
        channel:  Channel,
        expected: usize,
        found:    usize
    },
    /// Pixels cannot be returned in the requested layout
    UnsupportedColorspace(ColorSpace),
    /// Generic message
    Generic(String),
    /// Generic message does not need heap allocation
    GenericStatic(&'static str),
    IoErrors(ByteIoError)
}

impl Debug for GrdErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            GrdErrors::UnsupportedPackType(pack) => {
                writeln!(
                    f,
                    "Unsupported pack type {pack:#06x}, only 0x0101 files are supported"
                )
            }
            GrdErrors::UnsupportedPixelFormat(bpp) => {
                writeln!(f, "Unsupported bit depth {bpp}, expected either 24 or 32")
            }
            GrdErrors::TruncatedFile(expected, found) => {
                writeln!(
                    f,
                    "Truncated file, header declares {expected} bytes but file has {found}"
                )
            }
            GrdErrors::MalformedStream {
                channel,
                position,
                reason
            } => {
                writeln!(
                    f,
                    "Malformed {channel:?} block at offset {position}: {reason}"
                )
            }
            GrdErrors::InvalidGeometry {
                left,
                right,
                top,
                bottom
            } => {
                writeln!(
                    f,
                    "Invalid crop box left={left} right={right} top={top} bottom={bottom}"
                )
            }
            GrdErrors::UnexpectedAlphaBlock(length) => {
                writeln!(
                    f,
                    "24 bit image declares an alpha block of {length} bytes, expected none"
                )
            }
            GrdErrors::PlaneSizeMismatch {
                channel,
                expected,
                found
            } => {
                writeln!(
                    f,
                    "{channel:?} plane has {found} pixels but the image needs {expected}"
                )
            }
            GrdErrors::UnsupportedColorspace(colorspace) => {
                writeln!(
                    f,
                    "Cannot output pixels as {colorspace:?}, supported ones are RGB, RGBA and ARGB"
                )
            }
            GrdErrors::Generic(val) => {
                writeln!(f, "{val}")
            }
            GrdErrors::GenericStatic(val) => {
                writeln!(f, "{val}")
            }
            GrdErrors::IoErrors(value) => {
                writeln!(f, "I/O error {:?}", value)
            }
        }
    }
}

impl Display for GrdErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{:?}", self)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for GrdErrors {}

impl From<&'static str> for GrdErrors {
    fn from(r: &'static str) -> Self {
        Self::GenericStatic(r)
    }
}

impl From<ByteIoError> for GrdErrors {
    fn from(value: ByteIoError) -> Self {
        GrdErrors::IoErrors(value)
    }
}

/// Errors encountered during encoding
pub enum GrdEncodeErrors {
    /// The pixels are in a layout that does not map to a
    /// 24 or 32 bit container
    ///
    /// The first argument is the colorspace encountered
    /// The second argument is list of supported colorspaces
    UnsupportedPixelFormat(ColorSpace, &'static [ColorSpace]),
    /// The pixel buffer length does not match the dimensions
    ///
    /// # Arguments
    /// - 1st argument is the number of bytes we expected
    /// - 2nd argument is number of bytes we got
    TooShortInput(usize, usize),
    /// Too large dimensions
    ///
    /// The default crop box stores width and height in 16 bits
    TooLargeDimensions(usize),
    /// A compressed channel does not fit in the 32 bit length field
    TooLargeChannel(usize),
    Generic(&'static str),
    IoErrors(ByteIoError)
}

impl Debug for GrdEncodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            GrdEncodeErrors::UnsupportedPixelFormat(found, supported) => {
                writeln!(f, "Cannot encode image with colorspace {found:?} into GRD, supported ones are {supported:?}")
            }
            GrdEncodeErrors::TooShortInput(expected, found) => {
                writeln!(
                    f,
                    "Pixel buffer length mismatch, expected {expected} bytes, found {found}"
                )
            }
            GrdEncodeErrors::TooLargeDimensions(found) => {
                writeln!(
                    f,
                    "Too large image dimensions {found}, GRD can only encode images up to {}",
                    u16::MAX
                )
            }
            GrdEncodeErrors::TooLargeChannel(found) => {
                writeln!(
                    f,
                    "Compressed channel of {found} bytes does not fit a 32 bit length"
                )
            }
            GrdEncodeErrors::Generic(val) => {
                writeln!(f, "{}", val)
            }
            GrdEncodeErrors::IoErrors(v) => {
                writeln!(f, "I/O error {:?}", v)
            }
        }
    }
}

impl Display for GrdEncodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{:?}", self)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for GrdEncodeErrors {}

impl From<ByteIoError> for GrdEncodeErrors {
    fn from(value: ByteIoError) -> Self {
        Self::IoErrors(value)
    }
}
