/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Errors possible when decoding deflate/zlib streams
use std::fmt::{Debug, Display, Formatter};

/// A struct returned when decompression fails
pub struct InflateDecodeErrors {
    /// reason why decompression fails
    pub error: DecodeErrorStatus,
    /// Data up until that decompression stage
    pub data:  Vec<u8>
}

impl InflateDecodeErrors {
    /// Create a new decode wrapper with data being
    /// how many bytes we actually decoded before hitting an error
    pub fn new(error: DecodeErrorStatus, data: Vec<u8>) -> InflateDecodeErrors {
        InflateDecodeErrors { error, data }
    }
    /// Create a new decode wrapper with an empty vector
    pub fn new_with_error(error: DecodeErrorStatus) -> InflateDecodeErrors {
        InflateDecodeErrors::new(error, vec![])
    }
}

impl Debug for InflateDecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{:?}", self.error)
    }
}

impl Display for InflateDecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{:?}", self)
    }
}

impl std::error::Error for InflateDecodeErrors {}

pub enum DecodeErrorStatus {
    /// Input data is not enough to construct
    /// a full output
    InsufficientData,
    /// Anything that isn't significant
    Generic(&'static str),
    /// The zlib CM field is not 8 (deflate)
    UnsupportedCompressionMethod(u8),
    /// The zlib CINFO field is above 7 (window larger than 32K)
    UnsupportedWindowSize(u8),
    /// `CMF*256 + FLG` is not a multiple of 31
    BadHeaderCheck(u16),
    /// The FDICT bit is set, preset dictionaries are not supported
    UnsupportedPresetDictionary,
    /// A block type other than stored, fixed and dynamic huffman blocks
    /// included, the value is the BTYPE read
    UnsupportedBlockType(u8),
    /// LEN and NLEN of a stored block are not one's complements
    LenNlenMismatch(u16, u16),
    /// Output length is not the one the caller said to expect,
    /// expected, found
    LengthMismatch(usize, usize),
    /// Output limit exceeded, set limit was too small
    OutputLimitExceeded(usize, usize),
    /// Output Adler does not match stored adler
    ///
    /// Only present for zlib
    MismatchedAdler(u32, u32)
}

impl Debug for DecodeErrorStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InsufficientData => writeln!(f, "Insufficient data"),
            Self::Generic(reason) => writeln!(f, "{reason}"),
            Self::UnsupportedCompressionMethod(cm) => {
                writeln!(f, "Unknown zlib compression method {cm}")
            }
            Self::UnsupportedWindowSize(cinfo) => {
                writeln!(f, "Unknown cinfo `{cinfo}` greater than 7, not allowed")
            }
            Self::BadHeaderCheck(check) => {
                writeln!(f, "FCHECK integrity not preserved, {check} is not a multiple of 31")
            }
            Self::UnsupportedPresetDictionary => {
                writeln!(f, "Zlib streams with a preset dictionary are not supported")
            }
            Self::UnsupportedBlockType(btype) => {
                writeln!(
                    f,
                    "Not implemented: deflate block type {btype}, only stored blocks are supported"
                )
            }
            Self::LenNlenMismatch(len, nlen) => {
                writeln!(f, "Len and nlen do not match, len={len}, nlen={nlen}")
            }
            Self::LengthMismatch(expected, found) => {
                writeln!(
                    f,
                    "Stored length mismatch, expected {expected} bytes but stream holds {found}"
                )
            }
            Self::OutputLimitExceeded(limit, current) => writeln!(
                f,
                "Output limit exceeded, set limit was {limit} and output size is {current}"
            ),
            Self::MismatchedAdler(expected, found) => {
                writeln!(f, "Mismatched Adler, expected {expected} but found {found}")
            }
        }
    }
}
