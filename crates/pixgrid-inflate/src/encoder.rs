/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use crate::constants::{
    DEFLATE_BLOCKTYPE_UNCOMPRESSED, DEFLATE_MAX_STORED_BLOCK, ZLIB_CINFO_32K_WINDOW,
    ZLIB_CM_DEFLATE
};
use crate::utils::calc_adler_hash;

/// A deflate encoder that emits stored (uncompressed) blocks
///
/// Output is a valid zlib/deflate stream any inflater can read,
/// it is just never smaller than the input.
pub struct DeflateEncoder<'a> {
    data:   &'a [u8],
    output: Vec<u8>
}

impl<'a> DeflateEncoder<'a> {
    /// Create a new deflate encoder that will encode `data`
    pub fn new(data: &'a [u8]) -> DeflateEncoder<'a> {
        DeflateEncoder {
            data,
            output: Vec::new()
        }
    }

    /// Upper bound on the encoded size of `len` bytes
    /// wrapped in zlib
    pub const fn max_zlib_size(len: usize) -> usize {
        let blocks = if len == 0 {
            1
        } else {
            (len + DEFLATE_MAX_STORED_BLOCK - 1) / DEFLATE_MAX_STORED_BLOCK
        };
        // header + per block overhead + data + adler
        2 + blocks * 5 + len + 4
    }

    fn write_zlib_header(&mut self) {
        // level hint 0, fastest
        let level_hint: u16 = 0;

        let mut hdr = (u16::from(ZLIB_CM_DEFLATE) << 8) | (u16::from(ZLIB_CINFO_32K_WINDOW) << 12);

        hdr |= level_hint << 6;
        hdr += (31 - (hdr % 31)) % 31;

        self.output.extend_from_slice(&hdr.to_be_bytes());
    }

    /// Encode data as stored deflate blocks
    fn encode_no_compression(&mut self) {
        /*
         * If the input is zero-length, we still must output a block in order
         * for the output to be a valid DEFLATE stream.
         */
        if self.data.is_empty() {
            // BFINAL and BTYPE
            self.output.push(1 | (DEFLATE_BLOCKTYPE_UNCOMPRESSED << 1));
            // LEN and NLEN
            self.output.extend_from_slice(&0xFFFF_0000_u32.to_le_bytes());
            return;
        }
        let mut chunks = self.data.chunks(DEFLATE_MAX_STORED_BLOCK).peekable();

        while let Some(chunk) = chunks.next() {
            let bfinal = u8::from(chunks.peek().is_none());
            /*
             * Output BFINAL and BTYPE.  The stream is already byte-aligned
             * here, so this step always requires outputting exactly 1 byte.
             */
            self.output
                .push(bfinal | (DEFLATE_BLOCKTYPE_UNCOMPRESSED << 1));

            // chunks() never yields more than a u16 worth of bytes
            let len = chunk.len() as u16;

            self.output.extend_from_slice(&len.to_le_bytes());
            self.output.extend_from_slice(&(!len).to_le_bytes());
            self.output.extend_from_slice(chunk);
        }
    }

    /// Encode the data as a raw deflate stream
    pub fn encode_deflate(&mut self) -> Vec<u8> {
        self.output = Vec::with_capacity(Self::max_zlib_size(self.data.len()));
        self.encode_no_compression();

        core::mem::take(&mut self.output)
    }

    /// Encode the data as a zlib stream, header, stored blocks
    /// then the big endian adler-32 of the input
    pub fn encode_zlib(&mut self) -> Vec<u8> {
        self.output = Vec::with_capacity(Self::max_zlib_size(self.data.len()));

        self.write_zlib_header();
        self.encode_no_compression();

        // add adler hash
        let hash = calc_adler_hash(self.data);
        self.output.extend_from_slice(&hash.to_be_bytes());

        core::mem::take(&mut self.output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::{DeflateDecoder, DeflateOptions};

    #[test]
    fn test_empty_input() {
        let out = DeflateEncoder::new(&[]).encode_zlib();

        assert_eq!(out, [0x78, 0x01, 0x01, 0x00, 0x00, 0xFF, 0xFF, 0, 0, 0, 1]);
        assert_eq!(out.len(), DeflateEncoder::max_zlib_size(0));
    }

    #[test]
    fn test_small_input_layout() {
        let out = DeflateEncoder::new(b"abc").encode_zlib();

        assert_eq!(&out[..7], &[0x78, 0x01, 0x01, 0x03, 0x00, 0xFC, 0xFF]);
        assert_eq!(&out[7..10], b"abc");
        assert_eq!(&out[10..], &calc_adler_hash(b"abc").to_be_bytes());
    }

    #[test]
    fn test_block_split() {
        let data: Vec<u8> = (0..DEFLATE_MAX_STORED_BLOCK * 2 + 10)
            .map(|x| (x % 251) as u8)
            .collect();

        let encoded = DeflateEncoder::new(&data).encode_deflate();

        // first block is full and not final
        assert_eq!(encoded[0], 0x00);
        assert_eq!(&encoded[1..5], &[0xFF, 0xFF, 0x00, 0x00]);
        // three blocks of overhead
        assert_eq!(encoded.len(), data.len() + 3 * 5);

        let options = DeflateOptions::default().set_expected_size(Some(data.len()));
        let decoded = DeflateDecoder::new_with_options(&encoded, options)
            .decode_deflate()
            .unwrap();

        assert_eq!(decoded, data);
    }

    #[test]
    fn test_exact_block_boundary() {
        let data = vec![9_u8; DEFLATE_MAX_STORED_BLOCK];
        let encoded = DeflateEncoder::new(&data).encode_zlib();

        // a single final block, no empty trailer block
        assert_eq!(encoded[2], 0x01);
        assert_eq!(encoded.len(), DeflateEncoder::max_zlib_size(data.len()));

        let decoded = DeflateDecoder::new(&encoded).decode_zlib().unwrap();
        assert_eq!(decoded, data);
    }
}
