//! Scanline filter functions
//!
//! `de_filter` reverses the filters while decoding, `filter`
//! applies them while encoding.
pub use de_filter::{handle_avg, handle_paeth, handle_sub, handle_up};
pub use filter::{choose_compression_filter, filter_scanline};

mod de_filter;
mod filter;
