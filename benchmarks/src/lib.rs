/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use nanorand::Rng;

/// Pixels resembling engine artwork, flat areas broken by noisy ones
///
/// Every 16 pixel span is either a single color or random bytes.
pub fn sample_image(width: usize, height: usize, components: usize) -> Vec<u8> {
    let mut rand = nanorand::WyRand::new_seed(0x6772_6421);
    let mut pixels = vec![0_u8; width * height * components];

    for span in pixels.chunks_mut(16 * components) {
        if rand.generate_range(0_u8..3) == 0 {
            rand.fill(span);
        } else {
            let mut color = [0_u8; 4];
            rand.fill(&mut color);

            for pixel in span.chunks_mut(components) {
                pixel.copy_from_slice(&color[..pixel.len()]);
            }
        }
    }
    pixels
}
