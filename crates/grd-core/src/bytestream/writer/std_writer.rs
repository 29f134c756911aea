#![cfg(feature = "std")]
use std::io::Write;

use crate::bytestream::{ByteIoError, ByteWriterTrait};

impl<T: Write> ByteWriterTrait for T {
    fn write_bytes(&mut self, buf: &[u8]) -> Result<usize, ByteIoError> {
        self.write(buf).map_err(ByteIoError::StdIoError)
    }

    fn write_all_bytes(&mut self, buf: &[u8]) -> Result<(), ByteIoError> {
        self.write_all(buf).map_err(ByteIoError::StdIoError)
    }

    fn write_const_bytes<const N: usize>(&mut self, buf: &[u8; N]) -> Result<(), ByteIoError> {
        self.write_all_bytes(buf)
    }

    fn flush_bytes(&mut self) -> Result<(), ByteIoError> {
        self.flush().map_err(ByteIoError::StdIoError)
    }

    fn reserve_capacity(&mut self, _: usize) -> Result<(), ByteIoError> {
        Ok(())
    }
}
