/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

/// Pack type discriminator of the planar RLE variant
pub const GRD_PACK_TYPE: u16 = 0x0101;

/// 8 x u16 fields followed by 4 x u32 block lengths
pub const GRD_HEADER_SIZE: usize = 8 * 2 + 4 * 4;

/// Longest run a single count byte can describe
pub const RLE_MAX_RUN: usize = 127;

/// Set on the count byte of a repeat run
pub const RLE_REPEAT_FLAG: u8 = 0x80;

pub const RLE_COUNT_MASK: u8 = 0x7F;
