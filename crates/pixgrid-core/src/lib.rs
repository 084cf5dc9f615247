/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Core routines shared by all pixgrid libraries
//!
//! This crate provides the pieces the codecs under the `pixgrid` umbrella
//! agree on but do not own themselves.
//!
//! It currently contains
//!
//! - A byte stream reader with big endian reads over any [`std::io::Read`]
//! - Colorspace information shared by images
//! - The pixel grid types decoders write into ([`grid::Grid2D`], [`grid::PixelGrid`])
//!   and the [`grid::PixelSink`] contract they write through
//! - Image decoder and encoder options
//!
//! # Features
//!  - `serde`: Enables serializing of some of the data structures
//!     present in the crate
//!
pub mod bytestream;
pub mod colorspace;
pub mod grid;
pub mod options;
mod serde;
