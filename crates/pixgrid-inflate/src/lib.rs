//! A small zlib/deflate codec for stored streams.
//!
//! This crate reads and writes deflate streams made of stored
//! (uncompressed, `BTYPE=00`) blocks wrapped in a zlib container,
//! the form PNG encoders produce at compression level 0.
//!
//! Compressed blocks (fixed and dynamic huffman) are recognised and
//! rejected with [`DecodeErrorStatus::UnsupportedBlockType`](errors::DecodeErrorStatus::UnsupportedBlockType).
//!
//! # Usage
//!
//! Decoding zlib data
//! ```no_run
//! use pixgrid_inflate::DeflateDecoder;
//! let totally_valid_data = [0;23];
//! let mut decoder = DeflateDecoder::new(&totally_valid_data);
//!
//! let decompressed =decoder.decode_zlib();
//! ```
//!
//! Decoding zlib data that must decompress to an exact size,
//! without confirming the adler32 checksum
//! ```no_run
//! use pixgrid_inflate::DeflateDecoder;
//! use pixgrid_inflate::DeflateOptions;
//! let totally_valid_data=[0;23];
//! let options = DeflateOptions::default()
//!                     .set_expected_size(Some(42))
//!                     .set_confirm_checksum(false);
//! let mut decoder =  DeflateDecoder::new_with_options(&totally_valid_data,options);
//!
//! let decompressed = decoder.decode_zlib();
//! ```
//!
//! Round tripping through the encoder
//! ```
//! use pixgrid_inflate::{DeflateDecoder, DeflateEncoder};
//! let data = b"hello world";
//! let encoded = DeflateEncoder::new(data).encode_zlib();
//! let decoded = DeflateDecoder::new(&encoded).decode_zlib().unwrap();
//! assert_eq!(&decoded, data);
//! ```
//!
//! # Features
//! - `zlib` (default): compute adler32 with `simd-adler32`, without it a
//!   scalar loop is used. Output is the same either way.
pub use crate::decoder::{DeflateDecoder, DeflateOptions, StoredBlock, ZlibContainer};
pub use crate::encoder::DeflateEncoder;
pub use crate::utils::{calc_adler_hash, update_adler_hash};

mod constants;
mod decoder;
mod encoder;
pub mod errors;
mod utils;
