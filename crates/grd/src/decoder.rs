/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::format;
use alloc::vec::Vec;

use grd_core::bytestream::ByteReader;
use grd_core::colorspace::ColorSpace;
use grd_core::log::{trace, warn};
use grd_core::options::DecoderOptions;

use crate::container::GrdContainer;
use crate::errors::GrdErrors;
use crate::header::{Channel, GrdHeader, PixelDepth};
use crate::planar::{interleave, ChannelPlanes};
use crate::rle;

/// A GRD decoder
///
/// Image dimensions come from the crop box in the header,
/// `right - left` by `bottom - top`.
///
/// # Example
/// ```no_run
/// use grd::GrdDecoder;
/// let data = std::fs::read("image.grd").unwrap();
/// let mut decoder = GrdDecoder::new(&data);
///
/// decoder.decode_headers().unwrap();
/// let (width, height) = decoder.dimensions().unwrap();
/// let pixels = decoder.decode().unwrap();
///
/// assert_eq!(pixels.len(), width * height * 4);
/// ```
pub struct GrdDecoder<'a> {
    data:            &'a [u8],
    header:          Option<GrdHeader>,
    width:           usize,
    height:          usize,
    options:         DecoderOptions,
    decoded_headers: bool
}

impl<'a> GrdDecoder<'a> {
    /// Create a new decoder with the default options
    pub fn new(data: &'a [u8]) -> GrdDecoder<'a> {
        GrdDecoder::new_with_options(data, DecoderOptions::default())
    }

    /// Create a new decoder that obeys `options`
    ///
    /// # Example
    /// ```
    /// use grd::grd_core::options::DecoderOptions;
    /// use grd::GrdDecoder;
    ///
    /// let options = DecoderOptions::default().set_max_width(512).set_strict_mode(true);
    /// let decoder = GrdDecoder::new_with_options(&[], options);
    /// ```
    #[allow(clippy::redundant_field_names)]
    pub fn new_with_options(data: &'a [u8], options: DecoderOptions) -> GrdDecoder<'a> {
        GrdDecoder {
            data:            data,
            header:          None,
            width:           0,
            height:          0,
            options:         options,
            decoded_headers: false
        }
    }

    /// Decode and validate the header
    ///
    /// Only the first 32 bytes are looked at, a file whose blocks are
    /// truncated still has its header decoded.
    pub fn decode_headers(&mut self) -> Result<(), GrdErrors> {
        if self.decoded_headers {
            return Ok(());
        }
        let mut stream = ByteReader::new(self.data);
        let header = GrdHeader::read(&mut stream, self.options.get_strict_mode())?;

        let geometry = header.geometry;

        let (Some(width), Some(height)) = (geometry.width(), geometry.height()) else {
            return Err(GrdErrors::InvalidGeometry {
                left:   geometry.left,
                right:  geometry.right,
                top:    geometry.top,
                bottom: geometry.bottom
            });
        };
        let (width, height) = (usize::from(width), usize::from(height));

        if width > self.options.get_max_width() {
            let msg = format!(
                "Width {} greater than max configured width {}",
                width,
                self.options.get_max_width()
            );
            return Err(GrdErrors::Generic(msg));
        }

        if height > self.options.get_max_height() {
            let msg = format!(
                "Height {} greater than max configured height {}",
                height,
                self.options.get_max_height()
            );
            return Err(GrdErrors::Generic(msg));
        }

        trace!("Image width: {}", width);
        trace!("Image height: {}", height);

        self.width = width;
        self.height = height;
        self.header = Some(header);
        self.decoded_headers = true;

        Ok(())
    }

    /// The decoded header or `None` if headers were not decoded
    pub const fn header(&self) -> Option<&GrdHeader> {
        self.header.as_ref()
    }

    /// Image width and height or `None` if headers were not decoded
    pub const fn dimensions(&self) -> Option<(usize, usize)> {
        if self.decoded_headers {
            Some((self.width, self.height))
        } else {
            None
        }
    }

    /// The stored pixel depth or `None` if headers were not decoded
    pub fn depth(&self) -> Option<PixelDepth> {
        self.header.map(|header| header.depth)
    }

    /// Colorspace of the pixels [`decode`](Self::decode) returns
    pub const fn colorspace(&self) -> ColorSpace {
        self.options.get_out_colorspace()
    }

    /// Number of bytes [`decode`](Self::decode) returns, `None`
    /// if headers were not decoded
    pub fn output_buffer_size(&self) -> Option<usize> {
        if self.decoded_headers {
            self.width
                .checked_mul(self.height)?
                .checked_mul(self.colorspace().num_components())
        } else {
            None
        }
    }

    /// Decompress every channel block into a plane
    ///
    /// Planes keep the stored bottom to top row order.
    ///
    /// A plane that does not hold exactly `width * height` pixels is an error
    /// in strict mode, otherwise it is cut or padded with zeroes (opaque
    /// pixels for alpha).
    pub fn decode_planes(&mut self) -> Result<ChannelPlanes, GrdErrors> {
        self.decode_headers()?;

        let container = GrdContainer::parse(self.data, self.options.get_strict_mode())?;
        let depth = container.header().depth;

        let plane_size = self
            .width
            .checked_mul(self.height)
            .ok_or(GrdErrors::GenericStatic("Image dimensions overflow"))?;

        let mut planes: [Vec<u8>; 4] = Default::default();

        for channel in depth.channels() {
            let block = container.block(*channel);

            let mut plane =
                rle::decompress(block, plane_size).map_err(|e| e.in_channel(*channel))?;

            trace!(
                "{:?} block: {} bytes into {} pixels",
                channel,
                block.len(),
                plane.len()
            );

            if plane.len() != plane_size {
                if self.options.get_strict_mode() {
                    return Err(GrdErrors::PlaneSizeMismatch {
                        channel:  *channel,
                        expected: plane_size,
                        found:    plane.len()
                    });
                }
                warn!(
                    "{:?} plane has {} pixels, expected {}, resizing it",
                    channel,
                    plane.len(),
                    plane_size
                );
                let fill = if *channel == Channel::A { 255 } else { 0 };
                plane.resize(plane_size, fill);
            }
            planes[channel.index()] = plane;
        }
        Ok(ChannelPlanes::new(depth, planes))
    }

    /// Decode the image into interleaved top to bottom pixels
    /// in the configured output colorspace
    pub fn decode(&mut self) -> Result<Vec<u8>, GrdErrors> {
        let planes = self.decode_planes()?;
        interleave(&planes, self.width, self.height, self.colorspace())
    }
}
