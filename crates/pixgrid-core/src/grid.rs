/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Pixel grids decoders write into
//!
//! Decoders don't own image storage, they write through [`PixelSink`],
//! which exposes exactly what a decoder needs: the number of channels the
//! caller wants, a way to (re)allocate the grid once dimensions are known
//! and per-sample writes.
//!
//! Two grids are provided
//! - [`Grid2D`]: a typed grid, one [`Pixel`] per cell, the channel count comes from the
//!   pixel type.
//! - [`PixelGrid`]: an untyped grid of interleaved bytes whose channel count
//!   is chosen at runtime.
use std::ops::{Index, IndexMut};

use crate::colorspace::ColorSpace;

/// A single pixel made of 8-bit channels
pub trait Pixel: Copy + Default {
    /// The colorspace this pixel stores
    const COLORSPACE: ColorSpace;

    /// Channel count, derived from the colorspace
    const CHANNELS: usize = Self::COLORSPACE.num_components();

    /// Read channel `c`, `c` must be below [`Self::CHANNELS`]
    fn component(&self, c: usize) -> u8;

    /// Write channel `c`, `c` must be below [`Self::CHANNELS`]
    fn set_component(&mut self, c: usize, value: u8);
}

impl Pixel for u8 {
    const COLORSPACE: ColorSpace = ColorSpace::Luma;

    #[inline]
    fn component(&self, c: usize) -> u8 {
        debug_assert_eq!(c, 0);
        *self
    }
    #[inline]
    fn set_component(&mut self, c: usize, value: u8) {
        debug_assert_eq!(c, 0);
        *self = value;
    }
}

impl Pixel for [u8; 3] {
    const COLORSPACE: ColorSpace = ColorSpace::RGB;

    #[inline]
    fn component(&self, c: usize) -> u8 {
        self[c]
    }
    #[inline]
    fn set_component(&mut self, c: usize, value: u8) {
        self[c] = value;
    }
}

impl Pixel for [u8; 4] {
    const COLORSPACE: ColorSpace = ColorSpace::RGBA;

    #[inline]
    fn component(&self, c: usize) -> u8 {
        self[c]
    }
    #[inline]
    fn set_component(&mut self, c: usize, value: u8) {
        self[c] = value;
    }
}

/// Something a decoder can write samples into
pub trait PixelSink {
    /// Number of channels per pixel this sink stores
    fn channels(&self) -> usize;

    /// Reallocate the sink for an image of `width` x `height`
    ///
    /// Every sample reads as zero afterwards.
    fn resize(&mut self, width: usize, height: usize);

    /// Write one sample at column `x`, row `y`, channel `c`
    fn set_sample(&mut self, x: usize, y: usize, c: usize, value: u8);

    /// Write a whole row of interleaved samples
    ///
    /// `row.len()` must be `width * channels`, the default
    /// goes through [`PixelSink::set_sample`].
    fn write_row(&mut self, y: usize, row: &[u8]) {
        let channels = self.channels();

        for (x, pixel) in row.chunks_exact(channels).enumerate() {
            for (c, value) in pixel.iter().enumerate() {
                self.set_sample(x, y, c, *value);
            }
        }
    }
}

/// A row-major grid of typed pixels
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid2D<P: Pixel> {
    width:  usize,
    height: usize,
    repeat: bool,
    pixels: Vec<P>
}

impl<P: Pixel> Grid2D<P> {
    /// Create a `width` x `height` grid filled with `value`
    pub fn new(width: usize, height: usize, value: P) -> Grid2D<P> {
        Grid2D {
            width,
            height,
            repeat: true,
            pixels: vec![value; width * height]
        }
    }

    /// Whether out of range indices given to [`Grid2D::get`] wrap around
    ///
    /// When true (the default) indices wrap and negative ones count
    /// from the end, so `get(-1, 0)` is the last pixel of the first row.
    /// When false out of range indices return `None`.
    pub fn set_repeat(&mut self, repeat: bool) {
        self.repeat = repeat;
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn height(&self) -> usize {
        self.height
    }

    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// All pixels, row after row
    pub fn pixels(&self) -> &[P] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [P] {
        &mut self.pixels
    }

    pub fn fill(&mut self, value: P) {
        self.pixels.fill(value);
    }

    fn resolve(&self, x: isize, y: isize) -> Option<usize> {
        if self.width == 0 || self.height == 0 {
            return None;
        }
        let (w, h) = (self.width as isize, self.height as isize);

        if !self.repeat && (x < 0 || y < 0 || x >= w || y >= h) {
            return None;
        }
        let x = x.rem_euclid(w) as usize;
        let y = y.rem_euclid(h) as usize;

        Some(y * self.width + x)
    }

    /// Pixel at column `x`, row `y`, see [`Grid2D::set_repeat`] for
    /// how out of range indices behave
    pub fn get(&self, x: isize, y: isize) -> Option<&P> {
        self.resolve(x, y).map(|pos| &self.pixels[pos])
    }

    pub fn get_mut(&mut self, x: isize, y: isize) -> Option<&mut P> {
        self.resolve(x, y).map(|pos| &mut self.pixels[pos])
    }

    /// Apply `func` to every pixel producing a new grid of the same size
    pub fn map<Q: Pixel, F: Fn(&P) -> Q>(&self, func: F) -> Grid2D<Q> {
        Grid2D {
            width:  self.width,
            height: self.height,
            repeat: self.repeat,
            pixels: self.pixels.iter().map(func).collect()
        }
    }

    /// Fold every pixel, in row-major order, into `initial`
    pub fn reduce<T, F: Fn(T, &P) -> T>(&self, initial: T, func: F) -> T {
        self.pixels.iter().fold(initial, func)
    }
}

impl<P: Pixel> Default for Grid2D<P> {
    fn default() -> Self {
        Grid2D::new(0, 0, P::default())
    }
}

impl<P: Pixel> Index<(usize, usize)> for Grid2D<P> {
    type Output = P;

    fn index(&self, (x, y): (usize, usize)) -> &Self::Output {
        assert!(x < self.width && y < self.height, "Invalid index ({x}, {y})");
        &self.pixels[y * self.width + x]
    }
}

impl<P: Pixel> IndexMut<(usize, usize)> for Grid2D<P> {
    fn index_mut(&mut self, (x, y): (usize, usize)) -> &mut Self::Output {
        assert!(x < self.width && y < self.height, "Invalid index ({x}, {y})");
        &mut self.pixels[y * self.width + x]
    }
}

impl<P: Pixel> PixelSink for Grid2D<P> {
    fn channels(&self) -> usize {
        P::CHANNELS
    }

    fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels.resize(width * height, P::default());
    }

    #[inline]
    fn set_sample(&mut self, x: usize, y: usize, c: usize, value: u8) {
        self.pixels[y * self.width + x].set_component(c, value);
    }

    fn write_row(&mut self, y: usize, row: &[u8]) {
        let start = y * self.width;
        let out = &mut self.pixels[start..start + self.width];

        for (pixel, samples) in out.iter_mut().zip(row.chunks_exact(P::CHANNELS)) {
            for (c, value) in samples.iter().enumerate() {
                pixel.set_component(c, *value);
            }
        }
    }
}

/// A row-major grid of interleaved 8-bit samples whose
/// colorspace is picked at runtime
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelGrid {
    width:      usize,
    height:     usize,
    colorspace: ColorSpace,
    data:       Vec<u8>
}

impl PixelGrid {
    /// Create an empty grid that will hold `colorspace` pixels
    pub fn new(colorspace: ColorSpace) -> PixelGrid {
        PixelGrid {
            width: 0,
            height: 0,
            colorspace,
            data: Vec::new()
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

    pub const fn channels(&self) -> usize {
        self.colorspace.num_components()
    }

    /// Sample at column `x`, row `y`, channel `c`
    pub fn sample(&self, x: usize, y: usize, c: usize) -> Option<u8> {
        if x >= self.width || y >= self.height || c >= self.channels() {
            return None;
        }
        Some(self.data[(y * self.width + x) * self.channels() + c])
    }

    /// Channels of the pixel at column `x`, row `y`
    pub fn pixel(&self, x: usize, y: usize) -> Option<&[u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let n = self.channels();
        let start = (y * self.width + x) * n;

        Some(&self.data[start..start + n])
    }

    /// The raw interleaved samples
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }
}

impl PixelSink for PixelGrid {
    fn channels(&self) -> usize {
        self.colorspace.num_components()
    }

    fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.data.clear();
        self.data.resize(width * height * self.channels(), 0);
    }

    #[inline]
    fn set_sample(&mut self, x: usize, y: usize, c: usize, value: u8) {
        let pos = (y * self.width + x) * self.channels() + c;
        self.data[pos] = value;
    }

    fn write_row(&mut self, y: usize, row: &[u8]) {
        let stride = self.width * self.channels();
        self.data[y * stride..(y + 1) * stride].copy_from_slice(row);
    }
}
