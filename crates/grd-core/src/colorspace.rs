/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Image Colorspace information and manipulation utilities.

/// Layouts of an interleaved 8-bit pixel buffer
#[allow(clippy::upper_case_acronyms)]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum ColorSpace {
    /// Red, Green , Blue
    RGB,
    /// Red, Green, Blue, Alpha
    RGBA,
    /// Alpha Red Green Blue
    ///
    /// This is the byte order the legacy engine packs its
    /// 32-bit pixel words in.
    ARGB,
    /// Grayscale colorspace
    Luma,
    /// Grayscale with alpha colorspace
    LumaA,
    /// The colorspace is unknown
    Unknown
}

impl ColorSpace {
    /// Number of color channels present for a certain colorspace
    ///
    /// E.g. RGB returns 3 since it contains R,G and B colors to make up a pixel
    pub const fn num_components(&self) -> usize {
        match self {
            Self::RGB => 3,
            Self::RGBA | Self::ARGB => 4,
            Self::Luma => 1,
            Self::LumaA => 2,
            Self::Unknown => 0
        }
    }

    pub const fn has_alpha(&self) -> bool {
        matches!(self, Self::RGBA | Self::LumaA | Self::ARGB)
    }

    /// Returns the position of the alpha pixel in a pixel
    ///
    /// That is for an array of color components say `[0,1,2,3]` if the image has an alpha channel
    /// and is in RGBA format, this will return `Some(3)`, indicating alpha is found in the third index
    /// but if the image is in `ARGB` format, it will return `Some(0)` indicating alpha is found in
    /// index 0
    ///
    /// If an image doesn't have an alpha channel returns `None`
    pub const fn alpha_position(&self) -> Option<usize> {
        match self {
            ColorSpace::RGBA => Some(3),
            ColorSpace::LumaA => Some(1),
            ColorSpace::ARGB => Some(0),
            _ => None
        }
    }

    /// Returns the positions of the red, green and blue components
    /// within a single pixel, or `None` for colorspaces without them.
    ///
    /// ```
    /// use grd_core::colorspace::ColorSpace;
    /// assert_eq!(ColorSpace::ARGB.rgb_positions(), Some([1, 2, 3]));
    /// assert_eq!(ColorSpace::Luma.rgb_positions(), None);
    /// ```
    pub const fn rgb_positions(&self) -> Option<[usize; 3]> {
        match self {
            ColorSpace::RGB | ColorSpace::RGBA => Some([0, 1, 2]),
            ColorSpace::ARGB => Some([1, 2, 3]),
            _ => None
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::colorspace::ColorSpace;

    #[test]
    fn alpha_and_rgb_positions_do_not_overlap() {
        for colorspace in [ColorSpace::RGB, ColorSpace::RGBA, ColorSpace::ARGB] {
            let rgb = colorspace.rgb_positions().unwrap();

            if let Some(alpha) = colorspace.alpha_position() {
                assert!(!rgb.contains(&alpha));
            }
            assert!(rgb.iter().all(|x| *x < colorspace.num_components()));
        }
    }
}
