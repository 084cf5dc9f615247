/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Decoder and encoder options
//!
//! All supported options are put into one `DecoderOptions` to allow for global configurations
//! options i.e the same  `DecoderOptions` can be reused for all other decoders
//!
use crate::colorspace::ColorSpace;

/// Decoder options
///
/// Not all options are respected by decoders
/// Each option specifies decoders that respect it
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DecoderOptions {
    /// Maximum width for which decoders will
    /// not try to decode images larger than
    /// the specified width.
    ///
    /// - Default value: 16384
    /// - Respected by: `all decoders`
    max_width:      usize,
    /// Maximum height for which decoders will not
    /// try to decode images larger than the
    /// specified height
    ///
    /// - Default value: 16384
    /// - Respected by: `all decoders`
    max_height:     usize,
    /// Whether the PNG decoder should confirm chunk crc
    ///
    /// - Default value: true
    /// - Respected by: `png`
    confirm_crc:    bool,
    /// Whether the decoder should confirm and report adler mismatch
    ///
    /// - Default value: true
    /// - Respected by: `inflate`, `png`
    confirm_adler:  bool,
    /// Maximum size for deflate.
    /// Respected by all decoders that use inflate/deflate
    deflate_limit:  usize
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self {
            max_width:     1 << 14,
            max_height:    1 << 14,
            confirm_crc:   true,
            confirm_adler: true,
            deflate_limit: 1 << 30
        }
    }
}

/// Initializers
impl DecoderOptions {
    /// Create the decoder with options  setting most configurable
    /// options to be their safe counterparts
    ///
    /// This is the same as `default`, every checksum is confirmed.
    pub fn new_safe() -> DecoderOptions {
        DecoderOptions::default()
    }

    /// Create the decoder options skipping integrity checks
    ///
    /// Disables png crc and inflate adler checking.
    pub fn new_fast() -> DecoderOptions {
        DecoderOptions::default()
            .set_confirm_crc(false)
            .set_confirm_adler(false)
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

    /// Set maximum width for which the decoder should not try
    /// decoding images greater than that width
    pub fn set_max_width(mut self, width: usize) -> Self {
        self.max_width = width;
        self
    }

    /// Set maximum height for which the decoder should not try
    /// decoding images greater than that height
    pub fn set_max_height(mut self, height: usize) -> Self {
        self.max_height = height;
        self
    }

    /// Whether chunk CRCs are confirmed
    pub const fn get_confirm_crc(&self) -> bool {
        self.confirm_crc
    }

    pub fn set_confirm_crc(mut self, yes: bool) -> Self {
        self.confirm_crc = yes;
        self
    }

    /// Whether the adler-32 trailer of zlib streams is confirmed
    pub const fn get_confirm_adler(&self) -> bool {
        self.confirm_adler
    }

    pub fn set_confirm_adler(mut self, yes: bool) -> Self {
        self.confirm_adler = yes;
        self
    }

    /// Maximum number of bytes an inflate call may produce
    pub const fn get_deflate_limit(&self) -> usize {
        self.deflate_limit
    }

    pub fn set_deflate_limit(mut self, limit: usize) -> Self {
        self.deflate_limit = limit;
        self
    }
}

/// Options encoders need to know about the raw pixels they are given
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
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
    /// Create options for a `width` x `height` image in `colorspace`
    pub fn new(width: usize, height: usize, colorspace: ColorSpace) -> EncoderOptions {
        EncoderOptions {
            width,
            height,
            colorspace
        }
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn height(&self) -> usize {
        self.height
    }

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
