/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Decoder and encoder options
//!
//! All options are put into one struct per direction to allow for
//! global configuration, i.e the same `DecoderOptions` can be reused
//! for every container in a batch.

use crate::colorspace::ColorSpace;

/// Decoder options
#[derive(Debug, Copy, Clone)]
pub struct DecoderOptions {
    /// Maximum width for which decoders will
    /// not try to decode images larger than
    /// the specified width.
    ///
    /// - Default value: 16384
    max_width:      usize,
    /// Maximum height for which decoders will not
    /// try to decode images larger than the
    /// specified height
    ///
    /// - Default value: 16384
    max_height:     usize,
    /// Treat recoverable inconsistencies as errors
    ///
    /// When set to false, these are logged and worked around.
    ///
    /// - Default value: false
    strict_mode:    bool,
    /// Layout of the returned pixels
    ///
    /// - Default value: `ColorSpace::RGBA`
    out_colorspace: ColorSpace
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self {
            max_width:      1 << 14,
            max_height:     1 << 14,
            strict_mode:    false,
            out_colorspace: ColorSpace::RGBA
        }
    }
}

impl DecoderOptions {
    /// Get maximum width configured for which the decoder
    /// should not try to decode images greater than this width
    pub const fn get_max_width(&self) -> usize {
        self.max_width
    }

    /// Get maximum height configured for which the decoder should
    /// not try to decode images greater than this height
    pub const fn get_max_height(&self) -> usize {
        self.max_height
    }

    /// Return true whether the decoder should be in strict mode
    /// And reject most errors
    pub const fn get_strict_mode(&self) -> bool {
        self.strict_mode
    }

    /// Get the layout the decoder will return pixels in
    pub const fn get_out_colorspace(&self) -> ColorSpace {
        self.out_colorspace
    }

    /// Set maximum width for which the decoder should not try
    /// decoding images greater than that width
    ///
    /// # Arguments
    ///
    /// * `width`:  The maximum width allowed
    pub fn set_max_width(mut self, width: usize) -> Self {
        self.max_width = width;
        self
    }

    /// Set maximum height for which the decoder should not try
    /// decoding images greater than that height
    ///
    /// # Arguments
    ///
    /// * `height`: The maximum height allowed
    pub fn set_max_height(mut self, height: usize) -> Self {
        self.max_height = height;
        self
    }

    /// Set whether the decoder should be in strict mode
    ///
    /// This reduces the error tolerance level for the decoders and
    /// inconsistent files will be rejected instead of repaired
    pub fn set_strict_mode(mut self, yes: bool) -> Self {
        self.strict_mode = yes;
        self
    }

    /// Set the layout of the pixels returned by the decoder
    pub fn set_out_colorspace(mut self, colorspace: ColorSpace) -> Self {
        self.out_colorspace = colorspace;
        self
    }
}

/// Encoder options
///
/// Describes the pixels handed to an encoder
#[derive(Debug, Copy, Clone)]
pub struct EncoderOptions {
    width:      usize,
    height:     usize,
    colorspace: ColorSpace
}

impl Default for EncoderOptions {
    fn default() -> Self {
        Self {
            width:      0,
            height:     0,
            colorspace: ColorSpace::RGB
        }
    }
}

impl EncoderOptions {
    /// Create new encode options
    ///
    /// # Arguments
    ///
    /// * `width`: Image width
    /// * `height`: Image height
    /// * `colorspace`: Image colorspaces
    pub const fn new(width: usize, height: usize, colorspace: ColorSpace) -> EncoderOptions {
        EncoderOptions {
            width,
            height,
            colorspace
        }
    }

    /// Get the width for which the image will be encoded in
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Get height for which the image will be encoded in
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Get the colorspace for which the image will be encoded in
    pub const fn colorspace(&self) -> ColorSpace {
        self.colorspace
    }

    pub fn set_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    pub fn set_height(mut self, height: usize) -> Self {
        self.height = height;
        self
    }

    pub fn set_colorspace(mut self, colorspace: ColorSpace) -> Self {
        self.colorspace = colorspace;
        self
    }
}
