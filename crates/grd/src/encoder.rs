/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::vec::Vec;

use grd_core::bytestream::ByteWriterTrait;
use grd_core::log::{trace, warn};
use grd_core::options::EncoderOptions;

use crate::container::GrdContainer;
use crate::errors::GrdEncodeErrors;
use crate::header::Channel;
use crate::metadata::GrdGeometry;
use crate::planar::planarize;
use crate::rle;

/// A GRD encoder
///
/// RGB pixels are stored as a 24 bit container, RGBA and ARGB pixels
/// as a 32 bit one.
///
/// # Example
/// - Encode a 100 by 100 RGBA image placed at the top left of an 800x600 screen
///
/// ```
/// use grd::grd_core::colorspace::ColorSpace;
/// use grd::grd_core::options::EncoderOptions;
/// use grd::{GrdEncodeErrors, GrdEncoder, GrdGeometry};
///
/// const W: usize = 100;
/// const H: usize = 100;
///
/// fn main() -> Result<(), GrdEncodeErrors> {
///     let pixels = std::array::from_fn::<u8, { W * H * 4 }, _>(|i| (i % 256) as u8);
///     let mut geometry = GrdGeometry::full_image(W, H)?;
///     geometry.screen_width = 800;
///     geometry.screen_height = 600;
///
///     let mut encoder = GrdEncoder::new(&pixels, EncoderOptions::new(W, H, ColorSpace::RGBA));
///     encoder.set_geometry(geometry);
///
///     let mut sink: Vec<u8> = vec![];
///     encoder.encode(&mut sink)?;
///     Ok(())
/// }
/// ```
pub struct GrdEncoder<'a> {
    data:     &'a [u8],
    options:  EncoderOptions,
    geometry: Option<GrdGeometry>
}

impl<'a> GrdEncoder<'a> {
    /// Create a new encoder
    ///
    /// # Arguments
    /// - data: Pixel data, top to bottom, size must be equal to `width*height*colorspace channels`
    /// - options: Width, height and layout of `data`
    #[allow(clippy::redundant_field_names)]
    pub const fn new(data: &'a [u8], options: EncoderOptions) -> GrdEncoder<'a> {
        GrdEncoder {
            data:     data,
            options:  options,
            geometry: None
        }
    }

    /// Set the screen size and crop box written to the header
    ///
    /// Without this the crop box covers the whole image and
    /// the screen size is zero.
    pub fn set_geometry(&mut self, geometry: GrdGeometry) {
        self.geometry = Some(geometry);
    }

    /// The geometry that will be written to the header
    pub fn geometry(&self) -> Result<GrdGeometry, GrdEncodeErrors> {
        match self.geometry {
            Some(geometry) => Ok(geometry),
            None => GrdGeometry::full_image(self.options.width(), self.options.height())
        }
    }

    /// Encode the image and write the container to `sink`
    ///
    /// Every block is compressed before anything is written,
    /// an error never leaves a partial container in the sink.
    ///
    /// # Returns
    /// - Ok(size): Bytes written
    /// - Err: The error encountered during encoding
    pub fn encode<T: ByteWriterTrait>(&self, sink: T) -> Result<usize, GrdEncodeErrors> {
        let (width, height) = (self.options.width(), self.options.height());
        let geometry = self.geometry()?;

        let crop = (geometry.width(), geometry.height());

        if crop != (u16::try_from(width).ok(), u16::try_from(height).ok()) {
            warn!(
                "Crop box left={} right={} top={} bottom={} does not match the {}x{} image",
                geometry.left, geometry.right, geometry.top, geometry.bottom, width, height
            );
        }

        let planes = planarize(self.data, width, height, self.options.colorspace())?;
        let depth = planes.depth();

        let mut compressed: [Vec<u8>; 4] = Default::default();

        for channel in depth.channels() {
            let block = rle::compress(planes.plane(*channel));
            trace!(
                "{:?} plane: {} pixels into {} bytes",
                channel,
                planes.plane(*channel).len(),
                block.len()
            );
            compressed[channel.index()] = block;
        }

        let blocks = Channel::ALL.map(|channel| compressed[channel.index()].as_slice());
        let container = GrdContainer::from_blocks(geometry, depth, blocks)?;

        Ok(container.write(sink)?)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use grd_core::colorspace::ColorSpace;
    use grd_core::options::EncoderOptions;

    use crate::header::{Channel, PixelDepth};
    use crate::{GrdContainer, GrdEncodeErrors, GrdEncoder, GrdGeometry, GRD_HEADER_SIZE};

    #[test]
    fn two_pixel_argb_image() {
        // opaque red next to opaque blue
        let pixels = [255, 255, 0, 0, /**/ 255, 0, 0, 255];
        let encoder = GrdEncoder::new(&pixels, EncoderOptions::new(2, 1, ColorSpace::ARGB));

        let mut sink: Vec<u8> = Vec::new();
        let written = encoder.encode(&mut sink).unwrap();
        assert_eq!(written, sink.len());

        let container = GrdContainer::parse(&sink, true).unwrap();
        let header = container.header();

        assert_eq!(header.depth, PixelDepth::Argb32);
        assert_eq!(header.channel_lengths, [2, 3, 2, 3]);
        assert_eq!(container.block(Channel::A), [0x82, 255]);
        assert_eq!(container.block(Channel::R), [0x02, 255, 0]);
        assert_eq!(container.block(Channel::G), [0x82, 0]);
        assert_eq!(container.block(Channel::B), [0x02, 0, 255]);
        assert_eq!(
            header.geometry,
            GrdGeometry {
                screen_width:  0,
                screen_height: 0,
                left:          0,
                right:         2,
                top:           0,
                bottom:        1
            }
        );
    }

    #[test]
    fn rgb_image_has_no_alpha_block() {
        let pixels = [7_u8; 3 * 4 * 4];
        let options = EncoderOptions::default()
            .set_width(4)
            .set_height(4)
            .set_colorspace(ColorSpace::RGB);
        let encoder = GrdEncoder::new(&pixels, options);

        let mut sink: Vec<u8> = Vec::new();
        encoder.encode(&mut sink).unwrap();

        assert_eq!(&sink[6..8], &24_u16.to_le_bytes());
        assert_eq!(&sink[16..20], &[0, 0, 0, 0]);
        assert_eq!(sink.len(), GRD_HEADER_SIZE + 3 * 2);
    }

    #[test]
    fn supplied_geometry_is_written_verbatim() {
        let geometry = GrdGeometry {
            screen_width:  800,
            screen_height: 600,
            left:          100,
            right:         102,
            top:           50,
            bottom:        52
        };
        let pixels = [0_u8; 2 * 2 * 4];
        let mut encoder = GrdEncoder::new(&pixels, EncoderOptions::new(2, 2, ColorSpace::RGBA));
        encoder.set_geometry(geometry);

        let mut sink: Vec<u8> = Vec::new();
        encoder.encode(&mut sink).unwrap();

        let container = GrdContainer::parse(&sink, true).unwrap();
        assert_eq!(container.header().geometry, geometry);
    }

    #[test]
    fn rejects_bad_input() {
        let pixels = vec![0_u8; 10];

        let encoder = GrdEncoder::new(&pixels, EncoderOptions::new(2, 2, ColorSpace::RGB));
        assert!(matches!(
            encoder.encode(Vec::<u8>::new()),
            Err(GrdEncodeErrors::TooShortInput(12, 10))
        ));

        let encoder = GrdEncoder::new(&pixels, EncoderOptions::new(10, 1, ColorSpace::Luma));
        assert!(matches!(
            encoder.encode(Vec::<u8>::new()),
            Err(GrdEncodeErrors::UnsupportedPixelFormat(ColorSpace::Luma, _))
        ));

        let encoder = GrdEncoder::new(&[], EncoderOptions::new(70_000, 0, ColorSpace::RGB));
        assert!(matches!(
            encoder.encode(Vec::<u8>::new()),
            Err(GrdEncodeErrors::TooLargeDimensions(70_000))
        ));
    }

    #[test]
    fn failed_encode_writes_nothing() {
        let pixels = [0_u8; 5];
        let encoder = GrdEncoder::new(&pixels, EncoderOptions::new(2, 1, ColorSpace::RGB));

        let mut sink: Vec<u8> = Vec::new();
        assert!(encoder.encode(&mut sink).is_err());
        assert!(sink.is_empty());
    }
}
