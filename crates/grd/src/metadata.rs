/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Geometry that cannot be recovered from pixels
//!
//! The screen size and crop box of a GRD image live in a sidecar
//! descriptor next to the editable image. On extraction the descriptor
//! is built from the header, on creation it is merged back in, falling
//! back to a crop box covering the whole image when it is unavailable.
use alloc::string::String;
use core::fmt::{Debug, Display, Formatter};

use grd_core::log::warn;

use crate::errors::GrdEncodeErrors;
use crate::header::GrdHeader;

/// Placement of an image on the engine's screen
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct GrdGeometry {
    /// Canvas size, not necessarily the image size
    pub screen_width:  u16,
    pub screen_height: u16,
    pub left:          u16,
    pub right:         u16,
    pub top:           u16,
    pub bottom:        u16
}

impl GrdGeometry {
    /// A crop box covering a whole `width` x `height` image on
    /// an unspecified screen
    ///
    /// ```
    /// use grd::GrdGeometry;
    /// let geometry = GrdGeometry::full_image(640, 480).unwrap();
    /// assert_eq!((geometry.right, geometry.bottom), (640, 480));
    /// assert_eq!(geometry.screen_width, 0);
    /// ```
    pub fn full_image(width: usize, height: usize) -> Result<GrdGeometry, GrdEncodeErrors> {
        let right = u16::try_from(width).map_err(|_| GrdEncodeErrors::TooLargeDimensions(width))?;
        let bottom =
            u16::try_from(height).map_err(|_| GrdEncodeErrors::TooLargeDimensions(height))?;

        Ok(GrdGeometry {
            screen_width: 0,
            screen_height: 0,
            left: 0,
            right,
            top: 0,
            bottom
        })
    }

    /// Image width described by the crop box, `None` if it is inverted
    pub const fn width(&self) -> Option<u16> {
        self.right.checked_sub(self.left)
    }

    /// Image height described by the crop box, `None` if it is inverted
    pub const fn height(&self) -> Option<u16> {
        self.bottom.checked_sub(self.top)
    }
}

/// The sidecar descriptor
///
/// With the `serde` feature this (de)serializes with the field names the
/// engine tooling uses, `ScreenWidth`, `ScreenHeight`, `Bpp`, `Left`,
/// `Right`, `Top` and `Bottom`. Missing fields default to zero.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "PascalCase", default))]
pub struct GrdMetadata {
    pub screen_width:  u16,
    pub screen_height: u16,
    /// Informational, always replaced by the source image depth
    pub bpp:           u16,
    pub left:          u16,
    pub right:         u16,
    pub top:           u16,
    pub bottom:        u16
}

impl GrdMetadata {
    pub const fn from_header(header: &GrdHeader) -> GrdMetadata {
        let geometry = header.geometry;

        GrdMetadata {
            screen_width:  geometry.screen_width,
            screen_height: geometry.screen_height,
            bpp:           header.depth.bits(),
            left:          geometry.left,
            right:         geometry.right,
            top:           geometry.top,
            bottom:        geometry.bottom
        }
    }

    pub const fn geometry(&self) -> GrdGeometry {
        GrdGeometry {
            screen_width:  self.screen_width,
            screen_height: self.screen_height,
            left:          self.left,
            right:         self.right,
            top:           self.top,
            bottom:        self.bottom
        }
    }
}

/// Why a sidecar descriptor could not be used
pub enum MetadataUnavailable {
    /// No descriptor exists for the image
    Missing,
    /// The descriptor exists but could not be read or parsed
    Malformed(String)
}

impl Debug for MetadataUnavailable {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            MetadataUnavailable::Missing => write!(f, "metadata file not found"),
            MetadataUnavailable::Malformed(reason) => {
                write!(f, "metadata file is malformed: {reason}")
            }
        }
    }
}

impl Display for MetadataUnavailable {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Outcome of looking up a sidecar descriptor
///
/// An unavailable descriptor is not an error, it resolves to the
/// default geometry.
#[derive(Debug)]
pub enum MetadataSource {
    Descriptor(GrdMetadata),
    Unavailable(MetadataUnavailable)
}

impl MetadataSource {
    /// Geometry to write for a `width` x `height` image
    ///
    /// A descriptor is used verbatim. Otherwise the crop box covers the
    /// whole image and the screen size is left at zero.
    pub fn resolve(&self, width: usize, height: usize) -> Result<GrdGeometry, GrdEncodeErrors> {
        match self {
            MetadataSource::Descriptor(metadata) => Ok(metadata.geometry()),
            MetadataSource::Unavailable(reason) => {
                warn!("Metadata failed to load ({reason}), using default geometry");
                GrdGeometry::full_image(width, height)
            }
        }
    }

    pub const fn is_available(&self) -> bool {
        matches!(self, MetadataSource::Descriptor(_))
    }
}
