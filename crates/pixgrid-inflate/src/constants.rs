/// Valid block types for a deflate stream
pub const DEFLATE_BLOCKTYPE_UNCOMPRESSED: u8 = 0;
pub const DEFLATE_BLOCKTYPE_STATIC: u8 = 1;
pub const DEFLATE_BLOCKTYPE_DYNAMIC_HUFFMAN: u8 = 2;

/// Largest payload a single stored block can carry,
/// LEN is a 16 bit field
pub const DEFLATE_MAX_STORED_BLOCK: usize = 65535;

/// CM value for deflate in a zlib header
pub const ZLIB_CM_DEFLATE: u8 = 8;

/// Largest CINFO allowed, a 32K window
pub const ZLIB_CINFO_32K_WINDOW: u8 = 7;

/// FDICT bit of the zlib FLG byte
pub const ZLIB_FDICT_FLAG: u8 = 1 << 5;
