/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Errors possible during png decoding and encoding
use std::fmt::{Debug, Display, Formatter};

use pixgrid_core::bytestream::ByteIoError;
use pixgrid_inflate::errors::InflateDecodeErrors;

/// Features of the format this decoder knows about
/// but does not handle
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Unimplemented {
    /// Adam7 interlaced images
    Adam7
}

pub enum PngDecodeErrors {
    /// Stream does not start with the png magic bytes
    BadSignature,
    /// First chunk of the stream is not an IHDR chunk
    MissingIhdr,
    /// Chunk checksum did not match,
    /// chunk type, expected, found
    BadCrc([u8; 4], u32, u32),
    /// Stream ended in the middle of a chunk
    UnexpectedEof,
    /// Number of bytes found after the IEND chunk
    TrailingData(u64),
    /// A critical chunk this decoder does not understand
    UnsupportedCriticalChunk([u8; 4]),
    UnsupportedBitDepth(u8),
    UnsupportedColorType(u8),
    UnsupportedCompressionMethod(u8),
    UnsupportedFilterMethod(u8),
    UnsupportedInterlaceMethod(u8),
    NotImplemented(Unimplemented),
    /// Channels the caller asked for, channels the image has
    ChannelMismatch(usize, usize),
    /// Filter type byte of a scanline is not one of 0..=4
    UnsupportedFilterType(u8),
    /// The underlying reader failed
    IoError(std::io::Error),
    /// Errors from the zlib/deflate layer
    ZlibDecodeErrors(InflateDecodeErrors),
    GenericStatic(&'static str),
    Generic(String)
}

impl Debug for PngDecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BadSignature => writeln!(f, "Bad PNG signature, not a png"),
            Self::MissingIhdr => writeln!(f, "First chunk not IHDR, corrupt PNG"),
            Self::BadCrc(chunk, expected, found) => writeln!(
                f,
                "CRC does not match for chunk {}, expected {expected} but found {found}",
                String::from_utf8_lossy(chunk)
            ),
            Self::UnexpectedEof => writeln!(f, "Unexpected end of stream inside a chunk"),
            Self::TrailingData(count) => {
                writeln!(f, "Found {count} bytes after the IEND chunk")
            }
            Self::UnsupportedCriticalChunk(chunk) => writeln!(
                f,
                "Chunk {} unknown but deemed necessary",
                String::from_utf8_lossy(chunk)
            ),
            Self::UnsupportedBitDepth(depth) => {
                writeln!(f, "Unsupported bit depth {depth}, only 8 bit images are supported")
            }
            Self::UnsupportedColorType(color) => {
                writeln!(
                    f,
                    "Unsupported color type {color}, only greyscale(0), RGB(2) and RGBA(6) are supported"
                )
            }
            Self::UnsupportedCompressionMethod(method) => {
                writeln!(f, "Unknown compression method {method}")
            }
            Self::UnsupportedFilterMethod(method) => {
                writeln!(f, "Unknown filter method {method}")
            }
            Self::UnsupportedInterlaceMethod(method) => {
                writeln!(f, "Unknown interlace method {method}")
            }
            Self::NotImplemented(feature) => {
                writeln!(f, "Not implemented: {feature:?}")
            }
            Self::ChannelMismatch(requested, found) => writeln!(
                f,
                "Channel mismatch, requested {requested} channels but image has {found}"
            ),
            Self::UnsupportedFilterType(filter) => {
                writeln!(f, "Unknown scanline filter type {filter}")
            }
            Self::IoError(err) => writeln!(f, "I/O error {err}"),
            Self::ZlibDecodeErrors(err) => {
                writeln!(f, "Error decoding idat chunks {err:?}")
            }
            Self::GenericStatic(val) => writeln!(f, "{val}"),
            Self::Generic(val) => writeln!(f, "{val}")
        }
    }
}

impl Display for PngDecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{:?}", self)
    }
}

impl std::error::Error for PngDecodeErrors {}

impl From<&'static str> for PngDecodeErrors {
    fn from(val: &'static str) -> Self {
        Self::GenericStatic(val)
    }
}

impl From<String> for PngDecodeErrors {
    fn from(val: String) -> Self {
        Self::Generic(val)
    }
}

impl From<InflateDecodeErrors> for PngDecodeErrors {
    fn from(val: InflateDecodeErrors) -> Self {
        Self::ZlibDecodeErrors(val)
    }
}

impl From<ByteIoError> for PngDecodeErrors {
    fn from(val: ByteIoError) -> Self {
        match val {
            ByteIoError::StdIoError(err) => Self::IoError(err),
            // short reads only happen at the end of the source
            ByteIoError::NotEnoughBytes(_, _) => Self::UnexpectedEof
        }
    }
}

/// Errors possible when encoding
pub enum PngEncodeErrors {
    /// Input length does not match the dimensions,
    /// expected, found
    WrongInputSize(usize, usize),
    /// Width or height is zero
    ZeroDimensions,
    /// A dimension does not fit the 31 bits png allows
    TooLargeDimensions(usize)
}

impl Debug for PngEncodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WrongInputSize(expected, found) => writeln!(
                f,
                "Input size mismatch, expected {expected} bytes but found {found}"
            ),
            Self::ZeroDimensions => writeln!(f, "Width or height cannot be zero"),
            Self::TooLargeDimensions(dim) => {
                writeln!(f, "Dimension {dim} too large for png, maximum is 2^31-1")
            }
        }
    }
}

impl Display for PngEncodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{:?}", self)
    }
}

impl std::error::Error for PngEncodeErrors {}
