/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use core::mem::size_of;

use crate::bytestream::{ByteIoError, ByteWriterTrait};

mod no_std_writer;
mod std_writer;

enum Mode {
    // Big endian
    BE,
    // Little Endian
    LE
}

/// Encapsulates a simple Byte writer with
/// support for Endian aware writes
pub struct ByteWriter<T: ByteWriterTrait> {
    buffer:        T,
    bytes_written: usize
}

impl<T: ByteWriterTrait> ByteWriter<T> {
    /// Create a new writer for the sink
    pub fn new(data: T) -> ByteWriter<T> {
        ByteWriter {
            buffer:        data,
            bytes_written: 0
        }
    }

    /// Return the number of bytes the writer has written
    ///
    /// ```
    /// use grd_core::bytestream::ByteWriter;
    /// let mut sink: Vec<u8> = vec![];
    /// let mut stream = ByteWriter::new(&mut sink);
    /// stream.write_u16_le_err(0x0101).unwrap();
    /// assert_eq!(stream.bytes_written(), 2);
    /// ```
    pub const fn bytes_written(&self) -> usize {
        self.bytes_written
    }

    /// Hint the sink about how many bytes are about to be written
    pub fn reserve(&mut self, additional: usize) -> Result<(), ByteIoError> {
        self.buffer.reserve_capacity(additional)
    }

    /// Write all of `buf` or error out
    pub fn write_all(&mut self, buf: &[u8]) -> Result<(), ByteIoError> {
        self.buffer.write_all_bytes(buf)?;
        self.bytes_written += buf.len();
        Ok(())
    }

    /// Write a fixed size array of bytes or error out
    pub fn write_const_bytes<const N: usize>(&mut self, buf: &[u8; N]) -> Result<(), ByteIoError> {
        self.buffer.write_const_bytes(buf)?;
        self.bytes_written += N;
        Ok(())
    }

    /// Write a single byte into the sink or error out
    pub fn write_u8_err(&mut self, byte: u8) -> Result<(), ByteIoError> {
        self.write_const_bytes(&[byte])
    }

    /// Flush the underlying sink
    pub fn flush(&mut self) -> Result<(), ByteIoError> {
        self.buffer.flush_bytes()
    }
}

macro_rules! write_single_type {
    ($name:tt,$name2:tt,$name3:tt,$int_type:tt) => {
        impl<T: ByteWriterTrait> ByteWriter<T> {
            #[inline(always)]
            fn $name(&mut self, byte: $int_type, mode: Mode) -> Result<(), ByteIoError> {
                const SIZE: usize = size_of::<$int_type>();

                // get bits, depending on mode.
                // This should be inlined and not visible in
                // the generated binary since mode is a compile
                // time constant.
                let bytes: [u8; SIZE] = match mode {
                    Mode::BE => byte.to_be_bytes(),
                    Mode::LE => byte.to_le_bytes()
                };

                self.write_const_bytes(&bytes)
            }

            #[doc=concat!("Write ",stringify!($int_type)," as a big endian integer")]
            #[doc=concat!("Returning an error if the underlying sink cannot support a ",stringify!($int_type)," write.")]
            #[inline]
            pub fn $name2(&mut self, byte: $int_type) -> Result<(), ByteIoError> {
                self.$name(byte, Mode::BE)
            }

            #[doc=concat!("Write ",stringify!($int_type)," as a little endian integer")]
            #[doc=concat!("Returning an error if the underlying sink cannot support a ",stringify!($int_type)," write.")]
            #[inline]
            pub fn $name3(&mut self, byte: $int_type) -> Result<(), ByteIoError> {
                self.$name(byte, Mode::LE)
            }
        }
    };
}

write_single_type!(
    write_u32_inner_or_die,
    write_u32_be_err,
    write_u32_le_err,
    u32
);

write_single_type!(
    write_u16_inner_or_die,
    write_u16_be_err,
    write_u16_le_err,
    u16
);
