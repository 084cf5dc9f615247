/// The 8 byte magic every png stream starts with, `\x89PNG\r\n\x1a\n`
pub const PNG_SIGNATURE: u64 = 0x89504E470D0A1A0A;

/// Exact length of the IHDR chunk data
pub const IHDR_LENGTH: usize = 13;

/// Chunk lengths and image dimensions are limited to 2^31-1
pub const PNG_MAX_U31: usize = (1 << 31) - 1;

/// Size of the IDAT chunks the encoder writes
pub const IDAT_CHUNK_SIZE: usize = 8192;
