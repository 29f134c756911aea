/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use core::fmt::{Debug, Display, Formatter};

/// Errors raised by the byte reader and writer
pub enum ByteIoError {
    #[cfg(feature = "std")]
    StdIoError(std::io::Error),
    // requested, available
    NotEnoughBytes(usize, usize),
    // requested, available
    NotEnoughBuffer(usize, usize),
    Generic(&'static str)
}

impl Debug for ByteIoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            #[cfg(feature = "std")]
            ByteIoError::StdIoError(err) => {
                writeln!(f, "Underlying I/O error {}", err)
            }
            ByteIoError::NotEnoughBytes(expected, found) => {
                writeln!(f, "Not enough bytes, expected {expected} but found {found}")
            }
            ByteIoError::NotEnoughBuffer(expected, found) => {
                writeln!(
                    f,
                    "Not enough buffer to write {expected} bytes, buffer size is {found}"
                )
            }
            ByteIoError::Generic(err) => {
                writeln!(f, "Generic I/O error: {err}")
            }
        }
    }
}

impl Display for ByteIoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{:?}", self)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ByteIoError {}

#[cfg(feature = "std")]
impl From<std::io::Error> for ByteIoError {
    fn from(value: std::io::Error) -> Self {
        ByteIoError::StdIoError(value)
    }
}

impl From<&'static str> for ByteIoError {
    fn from(value: &'static str) -> Self {
        ByteIoError::Generic(value)
    }
}

/// An encapsulation of a byte stream reader
///
/// This provides an interface similar to [std::io::Cursor] but
/// with the exception of returning integers in either endian
/// and zero copy access to sub-slices of the stream
pub struct ByteReader<'a> {
    /// Data stream
    stream:   &'a [u8],
    position: usize
}

enum Mode {
    // Big endian
    BE,
    // Little Endian
    LE
}

impl<'a> ByteReader<'a> {
    /// Create a new instance of the byte stream
    ///
    /// Bytes will be read from the start of `buf`.
    pub const fn new(buf: &'a [u8]) -> ByteReader<'a> {
        ByteReader {
            stream:   buf,
            position: 0
        }
    }

    /// Return true if the stream can satisfy a read of `num` bytes
    ///
    /// ```
    /// use grd_core::bytestream::ByteReader;
    /// let stream = ByteReader::new(&[1, 2, 3]);
    /// assert!(stream.has(3));
    /// assert!(!stream.has(4));
    /// ```
    #[inline(always)]
    pub const fn has(&self, num: usize) -> bool {
        self.position.saturating_add(num) <= self.stream.len()
    }

    /// Number of bytes left in the stream
    #[inline(always)]
    pub const fn remaining(&self) -> usize {
        self.stream.len().saturating_sub(self.position)
    }

    /// Current read position, from the start of the stream
    #[inline(always)]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Total length of the underlying stream
    #[inline(always)]
    pub const fn len(&self) -> usize {
        self.stream.len()
    }

    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.stream.is_empty()
    }

    /// Return true if all bytes have been consumed
    #[inline(always)]
    pub const fn eof(&self) -> bool {
        self.position >= self.stream.len()
    }

    /// Skip `num` bytes ahead of the stream, or error out
    /// if that would go past the end
    pub fn skip(&mut self, num: usize) -> Result<(), ByteIoError> {
        if !self.has(num) {
            return Err(ByteIoError::NotEnoughBytes(num, self.remaining()));
        }
        self.position += num;
        Ok(())
    }

    /// Read a single byte returning `0` if the stream
    /// is exhausted
    #[inline(always)]
    pub fn get_u8(&mut self) -> u8 {
        match self.stream.get(self.position) {
            Some(byte) => {
                self.position += 1;
                *byte
            }
            None => 0
        }
    }

    /// Read a single byte or error out if the stream
    /// is exhausted
    #[inline(always)]
    pub fn get_u8_err(&mut self) -> Result<u8, ByteIoError> {
        match self.stream.get(self.position) {
            Some(byte) => {
                self.position += 1;
                Ok(*byte)
            }
            None => Err(ByteIoError::NotEnoughBytes(1, 0))
        }
    }

    /// Read exactly `N` bytes or error out
    #[inline(always)]
    pub fn read_fixed_bytes_or_error<const N: usize>(&mut self) -> Result<[u8; N], ByteIoError> {
        let mut byte_store: [u8; N] = [0; N];

        match self.stream.get(self.position..self.position.saturating_add(N)) {
            Some(bytes) => {
                byte_store.copy_from_slice(bytes);
                self.position += N;
                Ok(byte_store)
            }
            None => Err(ByteIoError::NotEnoughBytes(N, self.remaining()))
        }
    }

    /// Return the next `num` bytes of the stream without copying,
    /// advancing the position past them.
    ///
    /// ```
    /// use grd_core::bytestream::ByteReader;
    /// let mut stream = ByteReader::new(&[1, 2, 3, 4]);
    /// assert_eq!(stream.get_slice(3).unwrap(), &[1, 2, 3]);
    /// assert!(stream.get_slice(2).is_err());
    /// ```
    pub fn get_slice(&mut self, num: usize) -> Result<&'a [u8], ByteIoError> {
        let end = self.position.saturating_add(num);

        match self.stream.get(self.position..end) {
            Some(bytes) => {
                self.position = end;
                Ok(bytes)
            }
            None => Err(ByteIoError::NotEnoughBytes(num, self.remaining()))
        }
    }
}

macro_rules! get_single_type {
    ($name:tt,$name2:tt,$name3:tt,$name4:tt,$name5:tt,$name6:tt,$int_type:tt) => {
        impl<'a> ByteReader<'a>
        {
            #[inline(always)]
            fn $name(&mut self, mode: Mode) -> $int_type
            {
                const SIZE_OF_VAL: usize = core::mem::size_of::<$int_type>();

                let mut space = [0; SIZE_OF_VAL];

                if let Some(position) = self.stream.get(self.position..self.position.saturating_add(SIZE_OF_VAL))
                {
                    space.copy_from_slice(position);
                    self.position += SIZE_OF_VAL;
                }

                match mode {
                    Mode::BE => $int_type::from_be_bytes(space),
                    Mode::LE => $int_type::from_le_bytes(space)
                }
            }

            #[inline(always)]
            fn $name2(&mut self, mode: Mode) -> Result<$int_type, ByteIoError>
            {
                const SIZE_OF_VAL: usize = core::mem::size_of::<$int_type>();

                match self.read_fixed_bytes_or_error::<SIZE_OF_VAL>()
                {
                    Ok(space) => match mode {
                        Mode::BE => Ok($int_type::from_be_bytes(space)),
                        Mode::LE => Ok($int_type::from_le_bytes(space))
                    },
                    Err(e) => Err(e)
                }
            }
            #[doc=concat!("Read ",stringify!($int_type)," as a big endian integer")]
            #[doc=concat!("Returning an error if the underlying buffer cannot support a ",stringify!($int_type)," read.")]
            #[inline]
            pub fn $name3(&mut self) -> Result<$int_type, ByteIoError>
            {
                self.$name2(Mode::BE)
            }

            #[doc=concat!("Read ",stringify!($int_type)," as a little endian integer")]
            #[doc=concat!("Returning an error if the underlying buffer cannot support a ",stringify!($int_type)," read.")]
            #[inline]
            pub fn $name4(&mut self) -> Result<$int_type, ByteIoError>
            {
                self.$name2(Mode::LE)
            }
            #[doc=concat!("Read ",stringify!($int_type)," as a big endian integer")]
            #[doc=concat!("Returning 0 if the underlying  buffer does not have enough bytes for a ",stringify!($int_type)," read.")]
            #[inline(always)]
            pub fn $name5(&mut self) -> $int_type
            {
                self.$name(Mode::BE)
            }
            #[doc=concat!("Read ",stringify!($int_type)," as a little endian integer")]
            #[doc=concat!("Returning 0 if the underlying buffer does not have enough bytes for a ",stringify!($int_type)," read.")]
            #[inline(always)]
            pub fn $name6(&mut self) -> $int_type
            {
                self.$name(Mode::LE)
            }
        }
    };
}

get_single_type!(
    get_u16_inner_or_default,
    get_u16_inner_or_die,
    get_u16_be_err,
    get_u16_le_err,
    get_u16_be,
    get_u16_le,
    u16
);
get_single_type!(
    get_u32_inner_or_default,
    get_u32_inner_or_die,
    get_u32_be_err,
    get_u32_le_err,
    get_u32_be,
    get_u32_le,
    u32
);

#[cfg(test)]
mod tests {
    use crate::bytestream::ByteReader;

    #[test]
    fn little_endian_reads() {
        let mut stream = ByteReader::new(&[0x01, 0x01, 0x78, 0x56, 0x34, 0x12]);

        assert_eq!(stream.get_u16_le_err().unwrap(), 0x0101);
        assert_eq!(stream.get_u32_le_err().unwrap(), 0x1234_5678);
        assert!(stream.eof());
    }

    #[test]
    fn failed_read_does_not_advance() {
        let mut stream = ByteReader::new(&[0xAA, 0xBB, 0xCC]);

        assert_eq!(stream.get_u8(), 0xAA);
        assert!(stream.get_u32_le_err().is_err());
        assert_eq!(stream.position(), 1);
        assert_eq!(stream.get_u16_be_err().unwrap(), 0xBBCC);
        // defaulting reads return zero at the end
        assert_eq!(stream.get_u16_le(), 0);
        assert_eq!(stream.get_u8(), 0);
    }
}
