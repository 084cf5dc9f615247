/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::io::Read;

use log::info;

use crate::constants::{IHDR_LENGTH, PNG_MAX_U31};
use crate::decoder::PngChunk;
use crate::enums::{InterlaceMethod, PngColor};
use crate::error::{PngDecodeErrors, Unimplemented};
use crate::PngDecoder;

pub(crate) mod writers;

impl<R: Read> PngDecoder<R> {
    pub(crate) fn parse_ihdr(&mut self, chunk: PngChunk) -> Result<(), PngDecodeErrors> {
        if self.seen_hdr {
            return Err(PngDecodeErrors::GenericStatic("Multiple IHDR, corrupt PNG"));
        }

        if chunk.length != IHDR_LENGTH {
            return Err(PngDecodeErrors::Generic(format!(
                "Bad IHDR length {}, expected {IHDR_LENGTH}",
                chunk.length
            )));
        }
        let data = &chunk.data;

        let width = u32::from_be_bytes([data[0], data[1], data[2], data[3]]) as usize;
        let height = u32::from_be_bytes([data[4], data[5], data[6], data[7]]) as usize;

        if width == 0 || height == 0 {
            return Err(PngDecodeErrors::GenericStatic(
                "Width or height cannot be zero"
            ));
        }
        if width > PNG_MAX_U31 || height > PNG_MAX_U31 {
            return Err(PngDecodeErrors::GenericStatic(
                "Width or height larger than 2^31-1, corrupt PNG"
            ));
        }
        if width > self.options.get_max_width() {
            return Err(PngDecodeErrors::Generic(format!(
                "Image width {}, larger than maximum configured width {}, aborting",
                width,
                self.options.get_max_width()
            )));
        }
        if height > self.options.get_max_height() {
            return Err(PngDecodeErrors::Generic(format!(
                "Image height {}, larger than maximum configured height {}, aborting",
                height,
                self.options.get_max_height()
            )));
        }

        let depth = data[8];
        let color = data[9];
        let compression_method = data[10];
        let filter_method = data[11];
        let interlace_method = data[12];

        if depth != 8 {
            return Err(PngDecodeErrors::UnsupportedBitDepth(depth));
        }

        let img_color = match PngColor::from_int(color) {
            Some(img_color @ (PngColor::Luma | PngColor::RGB | PngColor::RGBA)) => img_color,
            // palette and grey-alpha are valid png but not handled
            _ => return Err(PngDecodeErrors::UnsupportedColorType(color))
        };

        if compression_method != 0 {
            return Err(PngDecodeErrors::UnsupportedCompressionMethod(
                compression_method
            ));
        }
        if filter_method != 0 {
            return Err(PngDecodeErrors::UnsupportedFilterMethod(filter_method));
        }

        let interlace = match InterlaceMethod::from_int(interlace_method) {
            Some(InterlaceMethod::Standard) => InterlaceMethod::Standard,
            Some(InterlaceMethod::Adam7) => {
                return Err(PngDecodeErrors::NotImplemented(Unimplemented::Adam7))
            }
            None => {
                return Err(PngDecodeErrors::UnsupportedInterlaceMethod(
                    interlace_method
                ))
            }
        };

        self.png_info.width = width;
        self.png_info.height = height;
        self.png_info.depth = depth;
        self.png_info.color = img_color;
        self.png_info.component = img_color.num_components();
        self.png_info.compression_method = compression_method;
        self.png_info.filter_method = filter_method;
        self.png_info.interlace_method = interlace;

        info!("Width: {}", self.png_info.width);
        info!("Height: {}", self.png_info.height);
        info!("Color type: {:?}", self.png_info.color);
        info!("Filter method: {}", self.png_info.filter_method);
        info!("Depth: {}", self.png_info.depth);
        info!("Interlace: {:?}", self.png_info.interlace_method);

        self.seen_hdr = true;

        Ok(())
    }

    pub(crate) fn parse_idat(&mut self, png_chunk: PngChunk) {
        // IDAT payloads form one zlib stream, join them
        // and inflate once IEND is seen
        if self.idat_chunks.is_empty() {
            self.idat_chunks = png_chunk.data;
        } else {
            self.idat_chunks.extend_from_slice(&png_chunk.data);
        }
    }

    pub(crate) fn parse_iend(&mut self, chunk: PngChunk) -> Result<(), PngDecodeErrors> {
        if chunk.length != 0 {
            return Err(PngDecodeErrors::Generic(format!(
                "IEND chunk with length {}, expected 0",
                chunk.length
            )));
        }
        self.seen_iend = true;

        Ok(())
    }
}
