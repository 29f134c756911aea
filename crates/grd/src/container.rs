/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Splitting a GRD file into its header and compressed blocks, and joining them back
use grd_core::bytestream::{ByteIoError, ByteReader, ByteWriter, ByteWriterTrait};
use grd_core::log::{trace, warn};

use crate::constants::GRD_HEADER_SIZE;
use crate::errors::{GrdEncodeErrors, GrdErrors};
use crate::header::{Channel, GrdHeader, PixelDepth};
use crate::metadata::GrdGeometry;

/// A header and the still compressed channel blocks it describes
///
/// Blocks borrow from the file or from the encoder, nothing is
/// decompressed here.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct GrdContainer<'a> {
    header: GrdHeader,
    blocks: [&'a [u8]; 4]
}

impl<'a> GrdContainer<'a> {
    /// Parse a complete GRD file
    ///
    /// Blocks are sliced out in storage order using the lengths
    /// in the header. Bytes after the last block are ignored.
    ///
    /// # Errors
    /// - Header errors, see [`GrdHeader::read`]
    /// - [`GrdErrors::TruncatedFile`] if the declared blocks do not fit in `data`
    pub fn parse(data: &'a [u8], strict_mode: bool) -> Result<GrdContainer<'a>, GrdErrors> {
        let mut stream = ByteReader::new(data);
        let header = GrdHeader::read(&mut stream, strict_mode)?;

        let file_size = header.file_size();

        if (data.len() as u64) < file_size {
            return Err(GrdErrors::TruncatedFile(file_size, data.len()));
        }

        let mut blocks: [&'a [u8]; 4] = Default::default();

        for channel in header.depth.channels() {
            let length = header.channel_length(*channel) as usize;
            blocks[channel.index()] = stream.get_slice(length)?;
        }

        if !stream.eof() {
            warn!(
                "{} trailing bytes after the last channel block, ignoring them",
                stream.remaining()
            );
        }
        Ok(GrdContainer { header, blocks })
    }

    /// Assemble a container from compressed blocks
    ///
    /// `blocks` are indexed by [`Channel::index`], the alpha block is
    /// ignored for a 24 bit depth.
    ///
    /// # Errors
    /// [`GrdEncodeErrors::TooLargeChannel`] if a block does not fit in its 32 bit length field
    pub fn from_blocks(
        geometry: GrdGeometry, depth: PixelDepth, mut blocks: [&'a [u8]; 4]
    ) -> Result<GrdContainer<'a>, GrdEncodeErrors> {
        if !depth.has_alpha() {
            blocks[Channel::A.index()] = &[];
        }
        let mut channel_lengths = [0_u32; 4];

        for (length, block) in channel_lengths.iter_mut().zip(blocks.iter()) {
            *length =
                u32::try_from(block.len()).map_err(|_| GrdEncodeErrors::TooLargeChannel(block.len()))?;
        }
        let header = GrdHeader {
            geometry,
            depth,
            channel_lengths
        };
        Ok(GrdContainer { header, blocks })
    }

    pub const fn header(&self) -> &GrdHeader {
        &self.header
    }

    /// The compressed block of `channel`, empty if the depth does not carry it
    pub const fn block(&self, channel: Channel) -> &'a [u8] {
        self.blocks[channel.index()]
    }

    /// Write the header followed by every present block to `sink`
    ///
    /// Returns the number of bytes written
    pub fn write<T: ByteWriterTrait>(&self, sink: T) -> Result<usize, ByteIoError> {
        let mut writer = ByteWriter::new(sink);

        let size = usize::try_from(self.header.file_size())
            .map_err(|_| ByteIoError::Generic("Container too large for this platform"))?;
        writer.reserve(size)?;

        self.header.write(&mut writer)?;

        for channel in self.header.depth.channels() {
            writer.write_all(self.block(*channel))?;
        }
        writer.flush()?;

        trace!("Wrote {} bytes", writer.bytes_written());
        debug_assert_eq!(writer.bytes_written(), size);

        Ok(writer.bytes_written())
    }
}
