use log::trace;

use crate::enums::is_ancillary;
use crate::error::PngDecodeErrors;

/// A function called for every chunk that is not IHDR, IDAT or IEND
///
/// It receives the chunk type and its CRC-checked data, returning an
/// error aborts decoding.
pub type UnknownChunkHandler =
    fn(chunk_type: [u8; 4], data: &[u8]) -> Result<(), PngDecodeErrors>;

/// Skip ancillary chunks, reject critical ones
pub fn default_chunk_handler(chunk_type: [u8; 4], data: &[u8]) -> Result<(), PngDecodeErrors> {
    if !is_ancillary(chunk_type) {
        return Err(PngDecodeErrors::UnsupportedCriticalChunk(chunk_type));
    }
    let chunk_name = std::str::from_utf8(&chunk_type).unwrap_or("XXXX");

    trace!("Encountered unknown chunk {:?}", chunk_name);
    trace!("Skipping {} bytes", data.len());

    Ok(())
}
