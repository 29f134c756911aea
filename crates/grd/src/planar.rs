/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Splitting interleaved pixels into channel planes and back
//!
//! Planes hold one byte per pixel with rows bottom to top, which is
//! the order the engine stores them in. Interleaved buffers are always
//! top to bottom.
use alloc::vec;
use alloc::vec::Vec;

use grd_core::colorspace::ColorSpace;

use crate::errors::{GrdEncodeErrors, GrdErrors};
use crate::header::{Channel, PixelDepth};

const SUPPORTED_COLORSPACES: [ColorSpace; 3] = [ColorSpace::RGB, ColorSpace::RGBA, ColorSpace::ARGB];

/// The channel planes of one image
///
/// Planes are indexed by [`Channel::index`], a plane for a channel
/// the depth does not carry is always empty.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ChannelPlanes {
    depth:  PixelDepth,
    planes: [Vec<u8>; 4]
}

impl ChannelPlanes {
    /// Create planes for `depth`
    ///
    /// The alpha plane is discarded when `depth` has no alpha
    pub fn new(depth: PixelDepth, mut planes: [Vec<u8>; 4]) -> ChannelPlanes {
        if !depth.has_alpha() {
            planes[Channel::A.index()] = Vec::new();
        }
        ChannelPlanes { depth, planes }
    }

    pub const fn depth(&self) -> PixelDepth {
        self.depth
    }

    /// The plane of `channel`, empty if the depth does not carry it
    pub fn plane(&self, channel: Channel) -> &[u8] {
        &self.planes[channel.index()]
    }
}

/// Split `pixels` into channel planes
///
/// The rows are flipped so that the planes run bottom to top.
/// RGB pixels produce a 24 bit set of planes, RGBA and ARGB a 32 bit one,
/// channels are read from wherever the layout keeps them.
pub fn planarize(
    pixels: &[u8], width: usize, height: usize, colorspace: ColorSpace
) -> Result<ChannelPlanes, GrdEncodeErrors> {
    let depth = PixelDepth::from_colorspace(colorspace).ok_or(
        GrdEncodeErrors::UnsupportedPixelFormat(colorspace, &SUPPORTED_COLORSPACES)
    )?;
    let components = colorspace.num_components();

    let plane_size = width
        .checked_mul(height)
        .ok_or(GrdEncodeErrors::TooLargeDimensions(width.max(height)))?;
    let expected = plane_size
        .checked_mul(components)
        .ok_or(GrdEncodeErrors::TooLargeDimensions(width.max(height)))?;

    if pixels.len() != expected {
        return Err(GrdEncodeErrors::TooShortInput(expected, pixels.len()));
    }

    let mut planes: [Vec<u8>; 4] = Default::default();

    if plane_size == 0 {
        return Ok(ChannelPlanes::new(depth, planes));
    }

    for channel in depth.channels() {
        let position = channel
            .position_in(colorspace)
            .ok_or(GrdEncodeErrors::Generic("Channel missing from pixel layout"))?;

        let plane = &mut planes[channel.index()];
        plane.reserve_exact(plane_size);

        for row in pixels.chunks_exact(width * components).rev() {
            plane.extend(row.chunks_exact(components).map(|pixel| pixel[position]));
        }
    }
    Ok(ChannelPlanes::new(depth, planes))
}

/// Interleave channel planes into top to bottom pixels laid out as `colorspace`
///
/// A missing alpha plane is filled with opaque pixels, alpha is dropped
/// when `colorspace` has no alpha.
pub fn interleave(
    planes: &ChannelPlanes, width: usize, height: usize, colorspace: ColorSpace
) -> Result<Vec<u8>, GrdErrors> {
    if !SUPPORTED_COLORSPACES.contains(&colorspace) {
        return Err(GrdErrors::UnsupportedColorspace(colorspace));
    }
    let components = colorspace.num_components();

    let plane_size = width
        .checked_mul(height)
        .ok_or(GrdErrors::GenericStatic("Image dimensions overflow"))?;
    let out_size = plane_size
        .checked_mul(components)
        .ok_or(GrdErrors::GenericStatic("Image dimensions overflow"))?;

    for channel in planes.depth().channels() {
        let found = planes.plane(*channel).len();

        if found != plane_size {
            return Err(GrdErrors::PlaneSizeMismatch {
                channel: *channel,
                expected: plane_size,
                found
            });
        }
    }

    let mut out = vec![0_u8; out_size];

    if plane_size == 0 {
        return Ok(out);
    }

    if let Some(alpha_position) = colorspace.alpha_position() {
        if !planes.depth().has_alpha() {
            out.chunks_exact_mut(components)
                .for_each(|pixel| pixel[alpha_position] = 255);
        }
    }

    for channel in planes.depth().channels() {
        let Some(position) = channel.position_in(colorspace) else {
            continue;
        };
        let plane = planes.plane(*channel);

        // planes run bottom to top
        for (out_row, in_row) in out
            .chunks_exact_mut(width * components)
            .zip(plane.chunks_exact(width).rev())
        {
            for (pixel, value) in out_row.chunks_exact_mut(components).zip(in_row) {
                pixel[position] = *value;
            }
        }
    }
    Ok(out)
}
