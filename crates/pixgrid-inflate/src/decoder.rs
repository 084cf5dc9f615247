/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use crate::constants::{
    DEFLATE_BLOCKTYPE_DYNAMIC_HUFFMAN, DEFLATE_BLOCKTYPE_STATIC, DEFLATE_BLOCKTYPE_UNCOMPRESSED,
    ZLIB_CINFO_32K_WINDOW, ZLIB_CM_DEFLATE, ZLIB_FDICT_FLAG
};
use crate::errors::{DecodeErrorStatus, InflateDecodeErrors};
use crate::utils::calc_adler_hash;

/// Options that can influence decompression
/// in Deflate/Zlib
///
/// Not all options are respected by every stream type,
/// e.g `confirm_checksum` only applies to zlib streams
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DeflateOptions {
    limit:            usize,
    confirm_checksum: bool,
    size_hint:        usize,
    expected_size:    Option<usize>
}

impl Default for DeflateOptions {
    fn default() -> Self {
        DeflateOptions {
            limit:            1 << 30,
            confirm_checksum: true,
            size_hint:        37000,
            expected_size:    None
        }
    }
}

impl DeflateOptions {
    /// Get deflate/zlib limit option
    ///
    /// The decoder won't extend the inbuilt limit and will
    /// return an error if the limit is exceeded
    pub const fn get_limit(&self) -> usize {
        self.limit
    }
    /// Set a limit to the internal vector
    /// used to store decoded zlib/deflate output.
    ///
    /// # Arguments
    /// limit: The new decompressor limit
    /// # Returns
    /// A modified version of DeflateDecoder
    ///
    /// # Note
    /// This is a soft limit, you can extend it further by
    /// giving a bigger value
    #[must_use]
    pub fn set_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Get whether the decoder will confirm a checksum
    /// after decoding
    pub const fn get_confirm_checksum(&self) -> bool {
        self.confirm_checksum
    }
    /// Set whether the decoder should confirm a checksum
    /// after decoding, a mismatch returns
    /// [`DecodeErrorStatus::MismatchedAdler`]
    #[must_use]
    pub fn set_confirm_checksum(mut self, yes: bool) -> Self {
        self.confirm_checksum = yes;
        self
    }

    /// Get the default size hint for the decompressor
    pub const fn get_size_hint(&self) -> usize {
        self.size_hint
    }
    /// Set the size hint for the decompressor
    ///
    /// This can be used to prevent multiple re-allocations
    #[must_use]
    pub const fn set_size_hint(mut self, hint: usize) -> Self {
        self.size_hint = hint;
        self
    }

    /// Get the exact output size the decoder is told to expect
    pub const fn get_expected_size(&self) -> Option<usize> {
        self.expected_size
    }
    /// Tell the decoder exactly how many bytes the stream must decode to
    ///
    /// When set, stored blocks whose lengths don't add up to this
    /// value are rejected with [`DecodeErrorStatus::LengthMismatch`]
    /// before any of their data is copied.
    #[must_use]
    pub const fn set_expected_size(mut self, size: Option<usize>) -> Self {
        self.expected_size = size;
        self
    }
}

/// The zlib wrapper around a deflate stream
///
/// See [RFC 1950](https://www.ietf.org/rfc/rfc1950.txt)
#[derive(Copy, Clone, Debug)]
pub struct ZlibContainer<'a> {
    /// Compression method and info byte
    pub cmf:     u8,
    /// Flags byte
    pub flg:     u8,
    /// The raw deflate stream between the header and trailer
    pub payload: &'a [u8],
    /// Adler-32 of the decompressed data, stored big endian
    pub adler32: u32
}

impl<'a> ZlibContainer<'a> {
    /// Split a zlib stream into header, deflate payload and adler trailer,
    /// validating the two header bytes
    pub fn parse(data: &'a [u8]) -> Result<ZlibContainer<'a>, DecodeErrorStatus> {
        let cmf = *data.first().ok_or(DecodeErrorStatus::InsufficientData)?;

        let cm = cmf & 0xF;
        let cinfo = cmf >> 4;

        // confirm we have the right deflate methods
        if cm != ZLIB_CM_DEFLATE {
            return Err(DecodeErrorStatus::UnsupportedCompressionMethod(cm));
        }
        if cinfo > ZLIB_CINFO_32K_WINDOW {
            return Err(DecodeErrorStatus::UnsupportedWindowSize(cinfo));
        }

        let flg = *data.get(1).ok_or(DecodeErrorStatus::InsufficientData)?;

        let flag_checks = (u16::from(cmf) * 256) + u16::from(flg);

        if flag_checks % 31 != 0 {
            return Err(DecodeErrorStatus::BadHeaderCheck(flag_checks));
        }
        if flg & ZLIB_FDICT_FLAG != 0 {
            return Err(DecodeErrorStatus::UnsupportedPresetDictionary);
        }

        if data.len() < 2 + 4 {
            return Err(DecodeErrorStatus::InsufficientData);
        }
        let (payload, trailer) = data[2..].split_at(data.len() - 2 - 4);
        let adler32 = u32::from_be_bytes([trailer[0], trailer[1], trailer[2], trailer[3]]);

        Ok(ZlibContainer {
            cmf,
            flg,
            payload,
            adler32
        })
    }

    /// LZ77 window size the encoder declared
    pub const fn window_size(&self) -> usize {
        1 << (8 + (self.cmf >> 4) as usize)
    }

    /// The FLEVEL hint, 0 means fastest/no compression
    pub const fn compression_level(&self) -> u8 {
        self.flg >> 6
    }
}

/// One stored (BTYPE=00) deflate block
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StoredBlock<'a> {
    /// BFINAL bit
    pub is_final: bool,
    /// The LEN bytes copied verbatim
    pub data:     &'a [u8]
}

/// A deflate decoder for streams made of stored blocks
///
/// Fixed and dynamic huffman blocks are recognised and reported as
/// [`DecodeErrorStatus::UnsupportedBlockType`].
pub struct DeflateDecoder<'a> {
    data:     &'a [u8],
    position: usize,
    options:  DeflateOptions
}

impl<'a> DeflateDecoder<'a> {
    /// Create a new decompressor that will read compressed
    /// data from `data` and return a new vector containing new data
    ///
    /// # Arguments
    /// - `data`: The compressed data, either zlib wrapped or raw deflate.
    ///
    /// # Returns
    /// A decoder that decodes data
    ///
    /// # Notes
    /// This uses the default [`DeflateOptions`] to configure the decoder
    pub fn new(data: &'a [u8]) -> DeflateDecoder<'a> {
        let options = DeflateOptions::default();

        Self::new_with_options(data, options)
    }
    /// Create new decoder with specified options
    ///
    /// This can be used to fine tune the decoder to the user's
    /// needs.
    pub fn new_with_options(data: &'a [u8], options: DeflateOptions) -> DeflateDecoder<'a> {
        DeflateDecoder {
            data,
            position: 0,
            options
        }
    }

    /// Bytes of the deflate stream left unread after the final block
    pub fn trailing_bytes(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    /// Decode zlib-encoded data returning the uncompressed in a `Vec<u8>`
    /// or an error if something went wrong.
    ///
    /// The adler-32 trailer is confirmed against the output unless
    /// disabled in options
    pub fn decode_zlib(&mut self) -> Result<Vec<u8>, InflateDecodeErrors> {
        let container =
            ZlibContainer::parse(self.data).map_err(InflateDecodeErrors::new_with_error)?;

        // the rest of the decoder only sees the deflate stream
        self.data = container.payload;
        self.position = 0;

        let out = self.decode_deflate()?;

        if self.options.confirm_checksum {
            let adler = calc_adler_hash(&out);

            if adler != container.adler32 {
                return Err(InflateDecodeErrors::new(
                    DecodeErrorStatus::MismatchedAdler(container.adler32, adler),
                    out
                ));
            }
        }

        Ok(out)
    }

    /// Decode a raw deflate stream
    ///
    /// Blocks are read until one with BFINAL set, or, when an expected
    /// size is set, until a block completes it with no stream left after it
    pub fn decode_deflate(&mut self) -> Result<Vec<u8>, InflateDecodeErrors> {
        let capacity = self
            .options
            .expected_size
            .unwrap_or(self.options.size_hint)
            .min(self.options.limit);

        let mut out = Vec::with_capacity(capacity);

        loop {
            let block = match self.read_stored_block(out.len()) {
                Ok(block) => block,
                Err(error) => return Err(InflateDecodeErrors::new(error, out))
            };
            out.extend_from_slice(block.data);

            if block.is_final {
                break;
            }
            // a stream may end on a non final block once the
            // expected size is met
            if self.options.expected_size == Some(out.len()) && self.trailing_bytes() == 0 {
                break;
            }
        }
        Ok(out)
    }

    /// Read the next block header and, if it is a stored block,
    /// its payload
    ///
    /// `produced` is how many bytes earlier blocks decoded to, used to
    /// confirm the expected size and limit
    fn read_stored_block(&mut self, produced: usize) -> Result<StoredBlock<'a>, DecodeErrorStatus> {
        let stream: &'a [u8] = self.data;

        let header = *stream
            .get(self.position)
            .ok_or(DecodeErrorStatus::InsufficientData)?;

        let is_final = (header & 1) == 1;
        let block_type = (header >> 1) & 0b11;

        match block_type {
            DEFLATE_BLOCKTYPE_UNCOMPRESSED => (),
            DEFLATE_BLOCKTYPE_STATIC | DEFLATE_BLOCKTYPE_DYNAMIC_HUFFMAN => {
                return Err(DecodeErrorStatus::UnsupportedBlockType(block_type));
            }
            _ => return Err(DecodeErrorStatus::Generic("Reserved block type 3 encountered"))
        }
        /*
         * Uncompressed block, the RFC says
         *   skip any remaining bits in current partially
         *       processed byte
         *     read LEN and NLEN (see next section)
         *     copy LEN bytes of data to output
         *
         * Since the header is always the first three bits of a byte here
         * skipping the rest of the byte lands us on LEN.
         */
        self.position += 1;

        let len_bytes = stream
            .get(self.position..self.position + 4)
            .ok_or(DecodeErrorStatus::InsufficientData)?;

        let len = u16::from_le_bytes([len_bytes[0], len_bytes[1]]);
        let nlen = u16::from_le_bytes([len_bytes[2], len_bytes[3]]);

        if len != !nlen {
            return Err(DecodeErrorStatus::LenNlenMismatch(len, nlen));
        }
        self.position += 4;

        let total = produced + usize::from(len);

        if let Some(expected) = self.options.expected_size {
            if total > expected || (is_final && total != expected) {
                return Err(DecodeErrorStatus::LengthMismatch(expected, total));
            }
        }
        if total > self.options.limit {
            return Err(DecodeErrorStatus::OutputLimitExceeded(
                self.options.limit,
                total
            ));
        }

        let data = stream
            .get(self.position..self.position + usize::from(len))
            .ok_or(DecodeErrorStatus::InsufficientData)?;

        self.position += usize::from(len);

        Ok(StoredBlock { is_final, data })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored_zlib(payload: &[u8], adler: u32) -> Vec<u8> {
        let mut out = vec![0x78, 0x01, 0x01];
        let len = payload.len() as u16;
        out.extend_from_slice(&len.to_le_bytes());
        out.extend_from_slice(&(!len).to_le_bytes());
        out.extend_from_slice(payload);
        out.extend_from_slice(&adler.to_be_bytes());
        out
    }

    fn status(data: &[u8], options: DeflateOptions) -> DecodeErrorStatus {
        DeflateDecoder::new_with_options(data, options)
            .decode_zlib()
            .unwrap_err()
            .error
    }

    #[test]
    fn test_single_stored_block() {
        let payload = [0_u8, 255, 0, 0];
        let data = stored_zlib(&payload, calc_adler_hash(&payload));

        let options = DeflateOptions::default().set_expected_size(Some(4));
        let out = DeflateDecoder::new_with_options(&data, options)
            .decode_zlib()
            .unwrap();

        assert_eq!(out, payload);
    }

    #[test]
    fn test_header_checks() {
        // CM = 7
        assert!(matches!(
            ZlibContainer::parse(&[0x77, 0x01, 0, 0, 0, 0]),
            Err(DecodeErrorStatus::UnsupportedCompressionMethod(7))
        ));
        // CINFO = 8
        assert!(matches!(
            ZlibContainer::parse(&[0x88, 0x01, 0, 0, 0, 0]),
            Err(DecodeErrorStatus::UnsupportedWindowSize(8))
        ));
        // 0x7800 % 31 = 30
        assert!(matches!(
            ZlibContainer::parse(&[0x78, 0x00, 0, 0, 0, 0]),
            Err(DecodeErrorStatus::BadHeaderCheck(0x7800))
        ));
        // 0x78BB passes FCHECK but has FDICT set
        assert!(matches!(
            ZlibContainer::parse(&[0x78, 0xBB, 0, 0, 0, 0]),
            Err(DecodeErrorStatus::UnsupportedPresetDictionary)
        ));
        assert!(matches!(
            ZlibContainer::parse(&[0x78, 0x01, 0, 0]),
            Err(DecodeErrorStatus::InsufficientData)
        ));
        assert!(matches!(
            ZlibContainer::parse(&[]),
            Err(DecodeErrorStatus::InsufficientData)
        ));

        let container = ZlibContainer::parse(&[0x78, 0x01, 0xAA, 0, 0, 0, 1]).unwrap();
        assert_eq!(container.payload, &[0xAA]);
        assert_eq!(container.adler32, 1);
        assert_eq!(container.window_size(), 32768);
        assert_eq!(container.compression_level(), 0);
    }

    #[test]
    fn test_compressed_block_types_rejected() {
        // fixed huffman, BFINAL=1 BTYPE=01
        let data = [0x78, 0x01, 0b011, 0, 0, 0, 0, 0, 0];
        assert!(matches!(
            status(&data, DeflateOptions::default()),
            DecodeErrorStatus::UnsupportedBlockType(1)
        ));
        // dynamic huffman, BFINAL=1 BTYPE=10
        let data = [0x78, 0x01, 0b101, 0, 0, 0, 0, 0, 0];
        assert!(matches!(
            status(&data, DeflateOptions::default()),
            DecodeErrorStatus::UnsupportedBlockType(2)
        ));
    }

    #[test]
    fn test_len_nlen_mismatch() {
        let data = [0x78, 0x01, 0x01, 0x04, 0x00, 0xFB, 0xFE, 1, 2, 3, 4, 0, 0, 0, 0];
        assert!(matches!(
            status(&data, DeflateOptions::default()),
            DecodeErrorStatus::LenNlenMismatch(4, 0xFEFB)
        ));
    }

    #[test]
    fn test_length_mismatch() {
        let payload = [1_u8, 2, 3];
        let data = stored_zlib(&payload, calc_adler_hash(&payload));
        let options = DeflateOptions::default().set_expected_size(Some(4));

        assert!(matches!(
            status(&data, options),
            DecodeErrorStatus::LengthMismatch(4, 3)
        ));
    }

    #[test]
    fn test_adler_mismatch_keeps_data() {
        let payload = [1_u8, 2, 3];
        let data = stored_zlib(&payload, calc_adler_hash(&payload) ^ 1);

        let err = DeflateDecoder::new(&data).decode_zlib().unwrap_err();

        assert!(matches!(err.error, DecodeErrorStatus::MismatchedAdler(_, _)));
        assert_eq!(err.data, payload);

        // and passes when checks are off
        let options = DeflateOptions::default().set_confirm_checksum(false);
        let out = DeflateDecoder::new_with_options(&data, options)
            .decode_zlib()
            .unwrap();
        assert_eq!(out, payload);
    }

    #[test]
    fn test_truncated_block() {
        let payload = [1_u8, 2, 3, 4, 5];
        let mut data = stored_zlib(&payload, calc_adler_hash(&payload));
        // drop two payload bytes but keep a 4 byte trailer
        data.drain(8..10);

        assert!(matches!(
            status(&data, DeflateOptions::default()),
            DecodeErrorStatus::InsufficientData
        ));
    }

    #[test]
    fn test_exact_size_without_bfinal() {
        // BFINAL=0 on the only block
        let payload = [0_u8, 255, 0, 0];
        let mut data = stored_zlib(&payload, calc_adler_hash(&payload));
        data[2] = 0x00;

        let options = DeflateOptions::default().set_expected_size(Some(4));
        let mut decoder = DeflateDecoder::new_with_options(&data, options);

        assert_eq!(decoder.decode_zlib().unwrap(), payload);
        assert_eq!(decoder.trailing_bytes(), 0);

        // an empty final block after it is still consumed
        let deflate = [0x00, 2, 0, 0xFD, 0xFF, 7, 8, 0x01, 0, 0, 0xFF, 0xFF];
        let options = DeflateOptions::default().set_expected_size(Some(2));
        let mut decoder = DeflateDecoder::new_with_options(&deflate, options);

        assert_eq!(decoder.decode_deflate().unwrap(), [7, 8]);
        assert_eq!(decoder.trailing_bytes(), 0);

        // without an expected size the stream is cut short
        let err = DeflateDecoder::new(&data).decode_zlib().unwrap_err();
        assert!(matches!(err.error, DecodeErrorStatus::InsufficientData));
    }

    #[test]
    fn test_multiple_blocks_and_limit() {
        // non final block of 2 bytes followed by a final block of 1 byte
        let deflate = [0x00, 2, 0, 0xFD, 0xFF, 7, 8, 0x01, 1, 0, 0xFE, 0xFF, 9];
        let out = DeflateDecoder::new(&deflate).decode_deflate().unwrap();
        assert_eq!(out, [7, 8, 9]);

        // the first block already overshoots an expected size of 1
        let options = DeflateOptions::default().set_expected_size(Some(1));
        let err = DeflateDecoder::new_with_options(&deflate, options)
            .decode_deflate()
            .unwrap_err();
        assert!(matches!(err.error, DecodeErrorStatus::LengthMismatch(1, 2)));

        let options = DeflateOptions::default().set_limit(2);
        let err = DeflateDecoder::new_with_options(&deflate, options)
            .decode_deflate()
            .unwrap_err();
        assert!(matches!(
            err.error,
            DecodeErrorStatus::OutputLimitExceeded(2, 3)
        ));
        assert_eq!(err.data, [7, 8]);
    }
}
