/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::io::Read;

use log::{debug, trace, warn};
use pixgrid_core::bytestream::{ByteIoError, ByteReader};
use pixgrid_core::colorspace::ColorSpace;
use pixgrid_core::grid::{Grid2D, Pixel, PixelGrid, PixelSink};
use pixgrid_core::options::DecoderOptions;
use pixgrid_inflate::{DeflateDecoder, DeflateOptions, ZlibContainer};

use crate::constants::{PNG_MAX_U31, PNG_SIGNATURE};
use crate::crc::calc_crc_with_bytes;
use crate::enums::{FilterMethod, InterlaceMethod, PngChunkType, PngColor};
use crate::error::PngDecodeErrors;
use crate::filters::{handle_avg, handle_paeth, handle_sub, handle_up};
use crate::options::{default_chunk_handler, UnknownChunkHandler};

/// One chunk, already checked against its CRC
pub(crate) struct PngChunk {
    pub length:     usize,
    pub chunk_type: PngChunkType,
    pub chunk:      [u8; 4],
    pub data:       Vec<u8>
}

/// Image information carried by the IHDR chunk
#[derive(Default, Debug, Copy, Clone)]
pub struct PngInfo {
    pub width:              usize,
    pub height:             usize,
    pub depth:              u8,
    pub color:              PngColor,
    pub component:          usize,
    pub compression_method: u8,
    pub filter_method:      u8,
    pub interlace_method:   InterlaceMethod
}

/// Return true if `bytes` start with the png signature
///
/// This is cheap and meant for picking a decoder before decoding
/// begins.
pub fn is_png(bytes: &[u8]) -> bool {
    match bytes.get(0..8) {
        Some(magic) => magic == PNG_SIGNATURE.to_be_bytes(),
        None => false
    }
}

/// Decode a png from `source` into a grid of `requested_channels`
/// channels, 1 for greyscale, 3 for RGB or 4 for RGBA
///
/// The image's color type must have exactly that many channels,
/// no conversion is done.
pub fn decode<R: Read>(source: R, requested_channels: usize) -> Result<PixelGrid, PngDecodeErrors> {
    let colorspace = ColorSpace::from_components(requested_channels).ok_or_else(|| {
        PngDecodeErrors::Generic(format!(
            "Cannot decode into {requested_channels} channels, expected 1, 3 or 4"
        ))
    })?;

    PngDecoder::new(source).decode(colorspace)
}

/// A png decoder
///
/// The decoder reads from anything implementing [`Read`], bytes are
/// consumed strictly in order and nothing is read past the end of
/// the IEND chunk except to confirm the stream ends there.
pub struct PngDecoder<R: Read> {
    pub(crate) seen_hdr:      bool,
    pub(crate) seen_iend:     bool,
    pub(crate) stream:        ByteReader<R>,
    pub(crate) options:       DecoderOptions,
    pub(crate) chunk_handler: UnknownChunkHandler,
    pub(crate) png_info:      PngInfo,
    pub(crate) idat_chunks:   Vec<u8>
}

impl<R: Read> PngDecoder<R> {
    pub fn new(source: R) -> PngDecoder<R> {
        let default_opt = DecoderOptions::default();

        PngDecoder::new_with_options(source, default_opt)
    }

    pub fn new_with_options(source: R, options: DecoderOptions) -> PngDecoder<R> {
        PngDecoder {
            seen_hdr: false,
            seen_iend: false,
            stream: ByteReader::new(source),
            options,
            chunk_handler: default_chunk_handler,
            png_info: PngInfo::default(),
            idat_chunks: Vec::new()
        }
    }

    /// Replace the function called for chunks other than
    /// IHDR, IDAT and IEND
    pub fn set_chunk_handler(&mut self, handler: UnknownChunkHandler) {
        self.chunk_handler = handler;
    }

    pub const fn get_options(&self) -> &DecoderOptions {
        &self.options
    }

    /// Get image dimensions as `(width, height)`
    ///
    /// Returns `None` if headers haven't been decoded
    pub const fn get_dimensions(&self) -> Option<(usize, usize)> {
        if !self.seen_hdr {
            return None;
        }
        Some((self.png_info.width, self.png_info.height))
    }

    /// Get the colorspace pixels will be decoded in
    ///
    /// Returns `None` if headers haven't been decoded
    pub const fn get_colorspace(&self) -> Option<ColorSpace> {
        if !self.seen_hdr {
            return None;
        }
        match self.png_info.color {
            PngColor::Luma => Some(ColorSpace::Luma),
            PngColor::RGB => Some(ColorSpace::RGB),
            PngColor::RGBA => Some(ColorSpace::RGBA),
            _ => None
        }
    }

    /// Get the header information of the image
    ///
    /// Returns `None` if headers haven't been decoded
    pub const fn get_info(&self) -> Option<&PngInfo> {
        if !self.seen_hdr {
            return None;
        }
        Some(&self.png_info)
    }

    /// Read the signature and the IHDR chunk
    ///
    /// Calling this more than once does nothing, decode functions
    /// call it themselves.
    pub fn decode_headers(&mut self) -> Result<(), PngDecodeErrors> {
        if self.seen_hdr {
            return Ok(());
        }
        // a stream too short for the signature isn't a png either
        let signature = match self.stream.get_u64_be_err() {
            Ok(signature) => signature,
            Err(ByteIoError::NotEnoughBytes(_, _)) => return Err(PngDecodeErrors::BadSignature),
            Err(err) => return Err(err.into())
        };

        if signature != PNG_SIGNATURE {
            return Err(PngDecodeErrors::BadSignature);
        }
        // read_chunk refuses anything but IHDR here
        let header = self.read_chunk()?;

        self.parse_ihdr(header)
    }

    fn read_chunk(&mut self) -> Result<PngChunk, PngDecodeErrors> {
        // Format is length - chunk type - [data] -  crc chunk
        let length = self.stream.get_u32_be_err()? as usize;
        let chunk = self.stream.read_fixed_bytes_or_error::<4>()?;

        let chunk_type = PngChunkType::from_tag(chunk);

        if !self.seen_hdr && chunk_type != PngChunkType::IHDR {
            return Err(PngDecodeErrors::MissingIhdr);
        }
        if length > PNG_MAX_U31 {
            return Err(PngDecodeErrors::Generic(format!(
                "Chunk length {length} larger than 2^31-1, corrupt PNG"
            )));
        }
        trace!(
            "Chunk {:?}, length {}, data at offset {}",
            String::from_utf8_lossy(&chunk),
            length,
            self.stream.position()
        );

        let mut data = Vec::new();
        self.stream.read_into_vec(&mut data, length)?;

        let crc = self.stream.get_u32_be_err()?;

        if self.options.get_confirm_crc() {
            // crc covers the chunk type and data, not the length
            let calc_crc = !calc_crc_with_bytes(&data, calc_crc_with_bytes(&chunk, u32::MAX));

            if crc != calc_crc {
                return Err(PngDecodeErrors::BadCrc(chunk, crc, calc_crc));
            }
        }

        Ok(PngChunk {
            length,
            chunk_type,
            chunk,
            data
        })
    }

    /// Read every chunk after IHDR up to and including IEND
    /// then confirm nothing follows
    fn read_remaining_chunks(&mut self) -> Result<(), PngDecodeErrors> {
        loop {
            let chunk = self.read_chunk()?;

            match chunk.chunk_type {
                PngChunkType::IHDR => {
                    self.parse_ihdr(chunk)?;
                }
                PngChunkType::IDAT => {
                    self.parse_idat(chunk);
                }
                PngChunkType::IEND => {
                    self.parse_iend(chunk)?;
                    break;
                }
                PngChunkType::unkn => (self.chunk_handler)(chunk.chunk, &chunk.data)?
            }
        }
        let trailing = self.stream.drain()?;

        if trailing != 0 {
            return Err(PngDecodeErrors::TrailingData(trailing));
        }
        Ok(())
    }

    /// Decode the image into a caller supplied grid
    ///
    /// The sink must hold as many channels as the image has, it is
    /// resized to the image dimensions once the header is read.
    /// On error the sink may hold part of the image.
    pub fn decode_into<S: PixelSink + ?Sized>(&mut self, sink: &mut S) -> Result<(), PngDecodeErrors> {
        if self.seen_iend {
            return Err(PngDecodeErrors::GenericStatic("Image already decoded"));
        }
        self.decode_headers()?;

        let info = self.png_info;

        if sink.channels() != info.component {
            return Err(PngDecodeErrors::ChannelMismatch(
                sink.channels(),
                info.component
            ));
        }
        sink.resize(info.width, info.height);

        self.read_remaining_chunks()?;

        // go parse IDAT chunks returning the inflate
        let deflate_data = self.inflate()?;
        // remove idat chunks from memory
        // we are already done with them.
        self.idat_chunks = Vec::new();

        self.create_png_image_raw(&deflate_data, sink)
    }

    /// Decode the image into a grid of `colorspace` pixels
    ///
    /// `colorspace` must match the image, i.e `ColorSpace::RGB` for an
    /// RGB png, otherwise this returns [`PngDecodeErrors::ChannelMismatch`].
    pub fn decode(&mut self, colorspace: ColorSpace) -> Result<PixelGrid, PngDecodeErrors> {
        let mut grid = PixelGrid::new(colorspace);

        self.decode_into(&mut grid)?;

        Ok(grid)
    }

    /// Decode the image into a typed grid, e.g `Grid2D<[u8; 3]>`
    /// for RGB images
    pub fn decode_grid<P: Pixel>(&mut self) -> Result<Grid2D<P>, PngDecodeErrors> {
        let mut grid = Grid2D::default();

        self.decode_into(&mut grid)?;

        Ok(grid)
    }

    /// Decode the image returning interleaved samples in the
    /// image's own colorspace
    pub fn decode_raw(&mut self) -> Result<Vec<u8>, PngDecodeErrors> {
        self.decode_headers()?;

        let colorspace = self
            .get_colorspace()
            .ok_or(PngDecodeErrors::GenericStatic("Unknown colorspace"))?;

        Ok(self.decode(colorspace)?.into_vec())
    }

    /// Undo deflate decoding
    fn inflate(&self) -> Result<Vec<u8>, PngDecodeErrors> {
        let info = &self.png_info;

        // each row is a filter byte followed by width * components bytes
        let expected = info
            .width
            .checked_mul(info.component)
            .and_then(|x| x.checked_add(1))
            .and_then(|x| x.checked_mul(info.height))
            .ok_or(PngDecodeErrors::GenericStatic("Image dimensions overflow"))?;

        debug!("IDAT bytes: {}", self.idat_chunks.len());
        debug!("Expected inflated size: {}", expected);

        if let Ok(container) = ZlibContainer::parse(&self.idat_chunks) {
            debug!("Zlib window size: {}", container.window_size());
            debug!("Zlib level hint: {}", container.compression_level());
        }

        let option = DeflateOptions::default()
            .set_expected_size(Some(expected))
            .set_limit(self.options.get_deflate_limit())
            .set_confirm_checksum(self.options.get_confirm_adler());

        let mut decoder = DeflateDecoder::new_with_options(&self.idat_chunks, option);

        let data = decoder.decode_zlib()?;

        let trailing = decoder.trailing_bytes();

        if trailing != 0 {
            warn!("{trailing} bytes after the final deflate block, ignoring them");
        }
        Ok(data)
    }

    /// Reverse scanline filters writing each row to `sink`
    ///
    /// Only the row above and the current row are kept.
    fn create_png_image_raw<S: PixelSink + ?Sized>(
        &self, deflate_data: &[u8], sink: &mut S
    ) -> Result<(), PngDecodeErrors> {
        let info = &self.png_info;
        let components = info.component;

        let width_stride = info.width * components;

        if deflate_data.len() != (width_stride + 1) * info.height {
            let msg = format!(
                "Not enough pixels, expected {} but found {}",
                (width_stride + 1) * info.height,
                deflate_data.len()
            );
            return Err(PngDecodeErrors::Generic(msg));
        }
        // the row above the first row reads as zero
        let mut prev_row = vec![0_u8; width_stride];
        let mut current = vec![0_u8; width_stride];

        for (y, in_stride) in deflate_data.chunks_exact(width_stride + 1).enumerate() {
            // take filter
            let filter_byte = in_stride[0];
            // raw image bytes
            let raw = &in_stride[1..];

            let filter = FilterMethod::from_int(filter_byte)
                .ok_or(PngDecodeErrors::UnsupportedFilterType(filter_byte))?;

            match filter {
                FilterMethod::None => current.copy_from_slice(raw),

                FilterMethod::Sub => handle_sub(raw, &mut current, components),

                FilterMethod::Up => handle_up(&prev_row, raw, &mut current),

                FilterMethod::Average => handle_avg(&prev_row, raw, &mut current, components),

                FilterMethod::Paeth => handle_paeth(&prev_row, raw, &mut current, components)
            }
            sink.write_row(y, &current);

            std::mem::swap(&mut prev_row, &mut current);
        }
        Ok(())
    }
}
