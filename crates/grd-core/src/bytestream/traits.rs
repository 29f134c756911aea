/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! The sink trait containers are written through

use crate::bytestream::reader::ByteIoError;

/// A destination for encoded bytes
///
/// With the `std` feature every [`std::io::Write`] is a sink, without
/// it `&mut Vec<u8>` is.
pub trait ByteWriterTrait {
    /// Write some of `buf`, returning how many bytes were taken
    fn write_bytes(&mut self, buf: &[u8]) -> Result<usize, ByteIoError>;
    /// Write all of `buf` or fail
    fn write_all_bytes(&mut self, buf: &[u8]) -> Result<(), ByteIoError>;
    /// Write a fixed size array, lets small writes be const folded
    fn write_const_bytes<const N: usize>(&mut self, buf: &[u8; N]) -> Result<(), ByteIoError>;
    fn flush_bytes(&mut self) -> Result<(), ByteIoError>;
    /// Hint that `size` more bytes are coming
    ///
    /// Sinks that cannot make use of it return `Ok(())`
    fn reserve_capacity(&mut self, size: usize) -> Result<(), ByteIoError>;
}
