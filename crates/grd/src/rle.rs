/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Run length coding of a single channel plane
//!
//! The stream is a sequence of runs, each starting with a count byte:
//!
//! - `0x80 | n` followed by one value byte: the value repeated `n` times
//! - `n` followed by `n` literal bytes
//!
//! with `n` in `1..=127`.
//!
//! The encoder output must match the engine's own tooling byte for byte,
//! so its scan rules are fixed:
//!
//! - A repeat run starts when the next byte equals the current one, and
//!   grows while following bytes equal the *first* byte of the run.
//! - A literal run grows while each byte differs from the byte *before*
//!   it. The first byte of an equal pair therefore ends a literal run
//!   and the pair itself is only folded into a repeat run if it starts
//!   the next run.
use alloc::vec::Vec;
use core::fmt::{Debug, Formatter};

use grd_core::bytestream::ByteReader;

use crate::constants::{RLE_COUNT_MASK, RLE_MAX_RUN, RLE_REPEAT_FLAG};
use crate::errors::GrdErrors;
use crate::header::Channel;

/// A run that cannot be decoded
pub struct MalformedRun {
    /// Offset of the count byte of the offending run
    pub position: usize,
    pub reason:   &'static str
}

impl MalformedRun {
    /// Attach the channel the run was found in
    pub fn in_channel(self, channel: Channel) -> GrdErrors {
        GrdErrors::MalformedStream {
            channel,
            position: self.position,
            reason: self.reason
        }
    }
}

impl Debug for MalformedRun {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "Malformed run at offset {}: {}", self.position, self.reason)
    }
}

/// Compress one channel plane
///
/// # Example
/// ```
/// let compressed = grd::rle::compress(&[5, 5, 5, 5, 9]);
/// assert_eq!(compressed, [0x84, 5, 0x01, 9]);
/// ```
pub fn compress(plane: &[u8]) -> Vec<u8> {
    // worst case is a literal run every 127 bytes
    let mut out = Vec::with_capacity(plane.len() + plane.len() / RLE_MAX_RUN + 1);
    compress_into(plane, &mut out);
    out
}

/// Compress one channel plane, appending the runs to `out`
pub fn compress_into(plane: &[u8], out: &mut Vec<u8>) {
    let end = plane.len();
    let mut start = 0;

    while start < end {
        let current = plane[start];
        let mut count = 1;

        if start + 1 < end && plane[start + 1] == current {
            while start + count < end && plane[start + count] == current && count < RLE_MAX_RUN {
                count += 1;
            }
            out.push(RLE_REPEAT_FLAG | count as u8);
            out.push(current);
        } else {
            while start + count < end
                && plane[start + count] != plane[start + count - 1]
                && count < RLE_MAX_RUN
            {
                count += 1;
            }
            out.push(count as u8);
            out.extend_from_slice(&plane[start..start + count]);
        }
        start += count;
    }
}

/// Decompress one channel block
///
/// `size_hint` is the expected plane size, used to size the output
/// up front. The output is not truncated or padded to it.
///
/// # Errors
/// A run that declares a count of zero, or needs more bytes than the
/// block has left.
///
/// # Example
/// ```
/// let plane = grd::rle::decompress(&[0x84, 5, 0x01, 9], 5).unwrap();
/// assert_eq!(plane, [5, 5, 5, 5, 9]);
/// ```
pub fn decompress(input: &[u8], size_hint: usize) -> Result<Vec<u8>, MalformedRun> {
    let mut out = Vec::with_capacity(size_hint);
    decompress_into(input, &mut out)?;
    Ok(out)
}

/// Decompress one channel block, appending the pixels to `out`
pub fn decompress_into(input: &[u8], out: &mut Vec<u8>) -> Result<(), MalformedRun> {
    let mut stream = ByteReader::new(input);

    while !stream.eof() {
        let position = stream.position();
        let marker = stream.get_u8();
        let count = usize::from(marker & RLE_COUNT_MASK);

        if count == 0 {
            return Err(MalformedRun {
                position,
                reason: "run with a count of zero"
            });
        }

        if marker & RLE_REPEAT_FLAG != 0 {
            let value = stream.get_u8_err().map_err(|_| MalformedRun {
                position,
                reason: "repeat run is missing its value"
            })?;
            out.resize(out.len() + count, value);
        } else {
            let literal = stream.get_slice(count).map_err(|_| MalformedRun {
                position,
                reason: "literal run is longer than the remaining block"
            })?;
            out.extend_from_slice(literal);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use nanorand::Rng;

    use crate::rle::{compress, decompress};

    /// Walk the runs of a compressed block returning their counts
    fn run_counts(compressed: &[u8]) -> Vec<u8> {
        let mut counts = vec![];
        let mut position = 0;

        while position < compressed.len() {
            let marker = compressed[position];
            counts.push(marker);

            if marker & 0x80 != 0 {
                position += 2;
            } else {
                position += 1 + usize::from(marker);
            }
        }
        counts
    }

    #[test]
    fn repeat_then_literal() {
        assert_eq!(compress(&[5, 5, 5, 5, 9]), [0x84, 5, 0x01, 9]);
    }

    #[test]
    fn distinct_bytes_are_one_literal() {
        assert_eq!(compress(&[1, 2, 3, 4]), [0x04, 1, 2, 3, 4]);
    }

    #[test]
    fn empty_and_single() {
        assert!(compress(&[]).is_empty());
        assert_eq!(compress(&[7]), [0x01, 7]);
        assert_eq!(decompress(&[], 0).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn equal_pair_is_a_repeat_run() {
        assert_eq!(compress(&[3, 3]), [0x82, 3]);
    }

    #[test]
    fn literal_run_swallows_first_of_equal_pair() {
        // the literal run stops at the second 2, the first 2 stays in it
        assert_eq!(compress(&[1, 2, 2, 3]), [0x02, 1, 2, 0x02, 2, 3]);
        assert_eq!(compress(&[1, 2, 2, 2, 3]), [0x02, 1, 2, 0x82, 2, 0x01, 3]);
    }

    #[test]
    fn literal_compares_with_previous_not_first() {
        // 1 reappears but never next to another 1
        assert_eq!(compress(&[1, 2, 1, 2, 1]), [0x05, 1, 2, 1, 2, 1]);
    }

    #[test]
    fn long_runs_are_capped() {
        let plane = vec![0xAB; 300];
        assert_eq!(compress(&plane), [0xFF, 0xAB, 0xFF, 0xAB, 0xAE, 0xAB]);

        let alternating: Vec<u8> = (0..300).map(|x| (x % 2) as u8).collect();
        let compressed = compress(&alternating);
        assert_eq!(run_counts(&compressed), [127, 127, 46]);
        assert_eq!(decompress(&compressed, 300).unwrap(), alternating);
    }

    #[test]
    fn repeat_run_of_128_leaves_single_literal() {
        let plane = vec![4; 128];
        assert_eq!(compress(&plane), [0xFF, 4, 0x01, 4]);
    }

    #[test]
    fn malformed_streams() {
        // literal run wants 3 bytes, only 2 present
        let err = decompress(&[0x01, 9, 0x03, 1, 2], 0).unwrap_err();
        assert_eq!(err.position, 2);
        // repeat run without value
        assert_eq!(decompress(&[0x85], 0).unwrap_err().position, 0);
        // zero counts are never produced by the encoder
        assert!(decompress(&[0x80, 1], 0).is_err());
        assert!(decompress(&[0x00], 0).is_err());
    }

    #[test]
    fn roundtrip_random() {
        let mut rand = nanorand::WyRand::new_seed(0x5eed_1234);

        for _ in 0..400 {
            let length = rand.generate_range(0_usize..1200);
            // a small alphabet produces plenty of runs
            let alphabet = rand.generate_range(1_u8..=255);
            let plane: Vec<u8> = (0..length)
                .map(|_| rand.generate_range(0..alphabet))
                .collect();

            let compressed = compress(&plane);

            for count in run_counts(&compressed) {
                let low = count & 0x7F;
                assert!((1..=127).contains(&low));
            }
            assert_eq!(decompress(&compressed, length).unwrap(), plane);
        }
    }
}
