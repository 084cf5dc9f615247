/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Image Colorspace information

/// Colorspaces a pixel grid can hold
///
/// Only 8-bit samples are modelled, one byte per channel.
#[allow(clippy::upper_case_acronyms)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ColorSpace {
    /// Grayscale colorspace
    Luma,
    /// Red, Green , Blue
    RGB,
    /// Red, Green, Blue, Alpha
    RGBA
}

impl ColorSpace {
    /// Number of color channels present for a certain colorspace
    ///
    /// E.g. RGB returns 3 since it contains R,G and B colors to make up a pixel
    pub const fn num_components(&self) -> usize {
        match self {
            Self::Luma => 1,
            Self::RGB => 3,
            Self::RGBA => 4
        }
    }

    pub const fn has_alpha(&self) -> bool {
        matches!(self, Self::RGBA)
    }

    pub const fn is_grayscale(&self) -> bool {
        matches!(self, Self::Luma)
    }

    /// Map a channel count back to its colorspace
    ///
    /// Returns `None` for counts no colorspace here has,
    /// e.g 2 (luma + alpha) is not modelled.
    pub const fn from_components(components: usize) -> Option<ColorSpace> {
        match components {
            1 => Some(Self::Luma),
            3 => Some(Self::RGB),
            4 => Some(Self::RGBA),
            _ => None
        }
    }
}

#[test]
fn test_components_roundtrip() {
    for color in [ColorSpace::Luma, ColorSpace::RGB, ColorSpace::RGBA] {
        assert_eq!(
            ColorSpace::from_components(color.num_components()),
            Some(color)
        );
    }
    assert_eq!(ColorSpace::from_components(2), None);
    assert_eq!(ColorSpace::from_components(0), None);
}
