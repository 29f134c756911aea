// Without std the blanket `Write` impl is gone, so the in memory sink
// the codecs write containers into is implemented directly.
#![cfg(not(feature = "std"))]
use crate::bytestream::{ByteIoError, ByteWriterTrait};

impl ByteWriterTrait for &mut alloc::vec::Vec<u8> {
    fn write_bytes(&mut self, buf: &[u8]) -> Result<usize, ByteIoError> {
        self.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn write_all_bytes(&mut self, buf: &[u8]) -> Result<(), ByteIoError> {
        self.extend_from_slice(buf);
        Ok(())
    }

    fn write_const_bytes<const N: usize>(&mut self, buf: &[u8; N]) -> Result<(), ByteIoError> {
        self.extend_from_slice(buf);
        Ok(())
    }

    fn flush_bytes(&mut self) -> Result<(), ByteIoError> {
        Ok(())
    }

    fn reserve_capacity(&mut self, size: usize) -> Result<(), ByteIoError> {
        self.reserve(size);
        Ok(())
    }
}
