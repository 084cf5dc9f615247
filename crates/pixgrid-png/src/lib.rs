//! A png decoder
//!
//! This features a small, strict PNG reader in Rust for a subset of
//! ISO/IEC 15948:2003 (E) images:
//!
//! - 8 bit greyscale, RGB and RGBA images
//! - non interlaced
//! - image data stored in uncompressed (stored) deflate blocks
//!
//! Every layer is verified, chunk CRCs, the zlib header, the
//! stored block lengths and the adler32 checksum, and the decoder
//! refuses anything it cannot decode exactly instead of guessing.
//!
//! # Usage
//! Add the library to `Cargo.toml`
//!
//! ```toml
//! pixgrid_png="0.1"
//! ```
//!
//! #### Decode to raw bytes.
//!
//! This is a simple decode operation which returns raw
//! bytes of the image in the image's own colorspace
//!
//!```no_run
//! use pixgrid_png::PngDecoder;
//! let mut decoder = PngDecoder::new(&[][..]);
//!
//! let pixels = decoder.decode_raw();
//! ```
//!
//! #### Decode into a grid with a fixed channel count
//!
//! The caller states how many channels it wants, a mismatching image is an
//! error.
//!
//!```no_run
//! use pixgrid_png::PngDecoder;
//! use pixgrid_png::pixgrid_core::colorspace::ColorSpace;
//! let mut decoder = PngDecoder::new(&[][..]);
//!
//! let grid = decoder.decode(ColorSpace::RGB).unwrap();
//! let (r, g, b) = (grid.sample(0, 0, 0), grid.sample(0, 0, 1), grid.sample(0, 0, 2));
//! ```
//!
//! or a typed grid
//!
//!```no_run
//! use pixgrid_png::PngDecoder;
//! let mut decoder = PngDecoder::new(&[][..]);
//!
//! let grid = decoder.decode_grid::<[u8; 4]>().unwrap();
//! let pixel = grid[(0, 0)];
//! ```
//!
//! # Extracting metadata
//!
//! Once headers have been decoded, image metadata can be accessed via [`get_info()`](PngDecoder::get_info) method
//!
//! # Encoding
//!
//! [`PngEncoder`] writes images this decoder can read back.
//!
//! # Alternatives
//! - [png](https://crates.io/crates/png) crate
//!

pub use decoder::{decode, is_png, PngDecoder, PngInfo};
pub use encoder::PngEncoder;
pub use enums::{FilterMethod, InterlaceMethod, PngColor};
pub use options::{default_chunk_handler, UnknownChunkHandler};
pub use pixgrid_core;
pub use pixgrid_inflate;

mod constants;
pub mod crc;
mod decoder;
mod encoder;
mod enums;
pub mod error;
mod filters;
mod headers;
mod options;
