/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! The fixed size GRD header

use grd_core::bytestream::{ByteIoError, ByteReader, ByteWriter, ByteWriterTrait};
use grd_core::colorspace::ColorSpace;
use grd_core::log::{trace, warn};

use crate::constants::{GRD_HEADER_SIZE, GRD_PACK_TYPE};
use crate::errors::GrdErrors;
use crate::metadata::GrdGeometry;

/// A single channel plane of a GRD image.
///
/// Blocks are stored, and their lengths declared, in the
/// order the variants are listed here.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Channel {
    A,
    R,
    G,
    B
}

impl Channel {
    /// All channels in storage order
    pub const ALL: [Channel; 4] = [Channel::A, Channel::R, Channel::G, Channel::B];

    /// Position of this channel in storage order
    pub const fn index(self) -> usize {
        match self {
            Channel::A => 0,
            Channel::R => 1,
            Channel::G => 2,
            Channel::B => 3
        }
    }

    /// Byte offset of this channel inside a pixel laid out as `colorspace`,
    /// `None` if the layout does not carry the channel.
    pub const fn position_in(self, colorspace: ColorSpace) -> Option<usize> {
        match self {
            Channel::A => colorspace.alpha_position(),
            _ => match colorspace.rgb_positions() {
                Some(positions) => Some(positions[self.index() - 1]),
                None => None
            }
        }
    }
}

/// Pixel depth of a GRD image, which decides which
/// channel blocks are present
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PixelDepth {
    /// 24 bits per pixel, R, G and B blocks
    Rgb24,
    /// 32 bits per pixel, A, R, G and B blocks
    Argb32
}

impl PixelDepth {
    /// The `bpp` value stored in the header
    pub const fn bits(self) -> u16 {
        match self {
            PixelDepth::Rgb24 => 24,
            PixelDepth::Argb32 => 32
        }
    }

    pub const fn from_bits(bits: u16) -> Option<PixelDepth> {
        match bits {
            24 => Some(PixelDepth::Rgb24),
            32 => Some(PixelDepth::Argb32),
            _ => None
        }
    }

    /// Depth of a container built from pixels laid out as `colorspace`
    pub const fn from_colorspace(colorspace: ColorSpace) -> Option<PixelDepth> {
        match colorspace {
            ColorSpace::RGB => Some(PixelDepth::Rgb24),
            ColorSpace::RGBA | ColorSpace::ARGB => Some(PixelDepth::Argb32),
            _ => None
        }
    }

    /// Channels present in the container, in storage order
    pub const fn channels(self) -> &'static [Channel] {
        match self {
            PixelDepth::Rgb24 => &[Channel::R, Channel::G, Channel::B],
            PixelDepth::Argb32 => &Channel::ALL
        }
    }

    pub const fn has_alpha(self) -> bool {
        matches!(self, PixelDepth::Argb32)
    }

    pub const fn has_channel(self, channel: Channel) -> bool {
        self.has_alpha() || !matches!(channel, Channel::A)
    }
}

/// A decoded GRD header
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct GrdHeader {
    /// Screen size and crop box
    pub geometry:        GrdGeometry,
    pub depth:           PixelDepth,
    /// Compressed block lengths, indexed by [`Channel::index`]
    pub channel_lengths: [u32; 4]
}

impl GrdHeader {
    /// Length of the block for `channel`, always zero for a channel the
    /// depth does not carry
    pub const fn channel_length(&self, channel: Channel) -> u32 {
        if self.depth.has_channel(channel) {
            self.channel_lengths[channel.index()]
        } else {
            0
        }
    }

    /// Total number of bytes the channel blocks occupy after the header
    pub fn compressed_size(&self) -> u64 {
        self.depth
            .channels()
            .iter()
            .map(|c| u64::from(self.channel_length(*c)))
            .sum()
    }

    /// Total size of a container with this header
    pub fn file_size(&self) -> u64 {
        GRD_HEADER_SIZE as u64 + self.compressed_size()
    }

    /// Read a header from the start of `stream`
    ///
    /// In strict mode a 24 bit header declaring an alpha block is an error,
    /// otherwise that length is dropped with a warning.
    pub fn read(stream: &mut ByteReader, strict_mode: bool) -> Result<GrdHeader, GrdErrors> {
        if !stream.has(GRD_HEADER_SIZE) {
            return Err(GrdErrors::TruncatedFile(
                GRD_HEADER_SIZE as u64,
                stream.remaining()
            ));
        }
        // these were confirmed to be inbounds by has so use the non failing
        // routines
        let pack_type = stream.get_u16_le();

        if pack_type != GRD_PACK_TYPE {
            return Err(GrdErrors::UnsupportedPackType(pack_type));
        }
        let screen_width = stream.get_u16_le();
        let screen_height = stream.get_u16_le();
        let bpp = stream.get_u16_le();
        let left = stream.get_u16_le();
        let right = stream.get_u16_le();
        let top = stream.get_u16_le();
        let bottom = stream.get_u16_le();

        let mut channel_lengths = [0_u32; 4];

        for length in channel_lengths.iter_mut() {
            *length = stream.get_u32_le();
        }

        let depth = PixelDepth::from_bits(bpp).ok_or(GrdErrors::UnsupportedPixelFormat(bpp))?;

        let alpha_length = channel_lengths[Channel::A.index()];

        if !depth.has_alpha() && alpha_length != 0 {
            if strict_mode {
                return Err(GrdErrors::UnexpectedAlphaBlock(alpha_length));
            }
            warn!("24 bit image declares an alpha block of {alpha_length} bytes, ignoring it");
            channel_lengths[Channel::A.index()] = 0;
        }

        let geometry = GrdGeometry {
            screen_width,
            screen_height,
            left,
            right,
            top,
            bottom
        };

        trace!("Screen size: {}x{}", screen_width, screen_height);
        trace!("Bits per pixel: {}", bpp);
        trace!("Crop box: left={left} right={right} top={top} bottom={bottom}");
        trace!("Block lengths (A,R,G,B): {:?}", channel_lengths);

        Ok(GrdHeader {
            geometry,
            depth,
            channel_lengths
        })
    }

    /// Write the header in its fixed little endian layout
    pub fn write<T: ByteWriterTrait>(&self, writer: &mut ByteWriter<T>) -> Result<(), ByteIoError> {
        let geometry = &self.geometry;

        writer.write_u16_le_err(GRD_PACK_TYPE)?;
        writer.write_u16_le_err(geometry.screen_width)?;
        writer.write_u16_le_err(geometry.screen_height)?;
        writer.write_u16_le_err(self.depth.bits())?;
        writer.write_u16_le_err(geometry.left)?;
        writer.write_u16_le_err(geometry.right)?;
        writer.write_u16_le_err(geometry.top)?;
        writer.write_u16_le_err(geometry.bottom)?;

        for channel in Channel::ALL {
            writer.write_u32_le_err(self.channel_length(channel))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use grd_core::bytestream::{ByteReader, ByteWriter};
    use grd_core::colorspace::ColorSpace;
    use nanorand::Rng;

    use crate::header::{Channel, GrdHeader, PixelDepth};
    use crate::metadata::GrdGeometry;
    use crate::{GrdErrors, GRD_HEADER_SIZE};

    fn write_header(header: &GrdHeader) -> Vec<u8> {
        let mut sink = Vec::new();
        let mut writer = ByteWriter::new(&mut sink);
        header.write(&mut writer).unwrap();
        sink
    }

    #[test]
    fn header_layout_is_little_endian() {
        let header = GrdHeader {
            geometry:        GrdGeometry {
                screen_width:  800,
                screen_height: 600,
                left:          16,
                right:         272,
                top:           8,
                bottom:        264
            },
            depth:           PixelDepth::Argb32,
            channel_lengths: [1, 0x0102, 0x0001_0000, 4]
        };
        let bytes = write_header(&header);

        assert_eq!(bytes.len(), GRD_HEADER_SIZE);
        assert_eq!(
            bytes,
            [
                0x01, 0x01, 0x20, 0x03, 0x58, 0x02, 0x20, 0x00, 0x10, 0x00, 0x10, 0x01, 0x08,
                0x00, 0x08, 0x01, 0x01, 0x00, 0x00, 0x00, 0x02, 0x01, 0x00, 0x00, 0x00, 0x00,
                0x01, 0x00, 0x04, 0x00, 0x00, 0x00
            ]
        );
    }

    #[test]
    fn header_roundtrip_random() {
        let mut rand = nanorand::WyRand::new_seed(0x6772_6421);

        for _ in 0..500 {
            let depth = if rand.generate::<bool>() {
                PixelDepth::Argb32
            } else {
                PixelDepth::Rgb24
            };
            let mut channel_lengths = [0_u32; 4];

            for channel in depth.channels() {
                channel_lengths[channel.index()] = rand.generate();
            }
            let header = GrdHeader {
                geometry: GrdGeometry {
                    screen_width:  rand.generate(),
                    screen_height: rand.generate(),
                    left:          rand.generate(),
                    right:         rand.generate(),
                    top:           rand.generate(),
                    bottom:        rand.generate()
                },
                depth,
                channel_lengths
            };
            let bytes = write_header(&header);
            let decoded = GrdHeader::read(&mut ByteReader::new(&bytes), true).unwrap();

            assert_eq!(header, decoded);
        }
    }

    #[test]
    fn rgb24_never_writes_alpha_length() {
        let header = GrdHeader {
            geometry:        GrdGeometry::default(),
            depth:           PixelDepth::Rgb24,
            channel_lengths: [99, 1, 2, 3]
        };
        let bytes = write_header(&header);

        assert_eq!(&bytes[16..20], &[0, 0, 0, 0]);
        assert_eq!(header.channel_length(Channel::A), 0);
        assert_eq!(header.compressed_size(), 6);
    }

    #[test]
    fn rejects_unknown_pack_type_and_depth() {
        let mut bytes = write_header(&GrdHeader {
            geometry:        GrdGeometry::default(),
            depth:           PixelDepth::Rgb24,
            channel_lengths: [0; 4]
        });
        bytes[0] = 0x02;
        assert!(matches!(
            GrdHeader::read(&mut ByteReader::new(&bytes), false),
            Err(GrdErrors::UnsupportedPackType(0x0102))
        ));

        bytes[0] = 0x01;
        bytes[6] = 16;
        assert!(matches!(
            GrdHeader::read(&mut ByteReader::new(&bytes), false),
            Err(GrdErrors::UnsupportedPixelFormat(16))
        ));

        assert!(matches!(
            GrdHeader::read(&mut ByteReader::new(&bytes[..10]), false),
            Err(GrdErrors::TruncatedFile(32, 10))
        ));
    }

    #[test]
    fn alpha_length_on_24_bit_header() {
        let mut bytes = write_header(&GrdHeader {
            geometry:        GrdGeometry::default(),
            depth:           PixelDepth::Rgb24,
            channel_lengths: [0, 1, 1, 1]
        });
        bytes[16] = 5;

        assert!(matches!(
            GrdHeader::read(&mut ByteReader::new(&bytes), true),
            Err(GrdErrors::UnexpectedAlphaBlock(5))
        ));
        let lenient = GrdHeader::read(&mut ByteReader::new(&bytes), false).unwrap();
        assert_eq!(lenient.channel_lengths, [0, 1, 1, 1]);
    }

    #[test]
    fn channel_positions_follow_layout() {
        assert_eq!(Channel::A.position_in(ColorSpace::ARGB), Some(0));
        assert_eq!(Channel::B.position_in(ColorSpace::ARGB), Some(3));
        assert_eq!(Channel::A.position_in(ColorSpace::RGBA), Some(3));
        assert_eq!(Channel::R.position_in(ColorSpace::RGBA), Some(0));
        assert_eq!(Channel::A.position_in(ColorSpace::RGB), None);
        assert_eq!(Channel::G.position_in(ColorSpace::RGB), Some(1));
    }
}
