/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use pixgrid_core::options::EncoderOptions;
use pixgrid_inflate::DeflateEncoder;

use crate::constants::{IDAT_CHUNK_SIZE, PNG_MAX_U31, PNG_SIGNATURE};
use crate::enums::FilterMethod;
use crate::error::PngEncodeErrors;
use crate::filters::{choose_compression_filter, filter_scanline};
use crate::headers::writers::{write_chunk, write_header_fn, write_iend, write_ihdr};

/// A png encoder
///
/// Output is 8 bit, non interlaced and stored uncompressed inside
/// the zlib stream, so any png decoder including this crate's
/// can read it back.
#[derive(Default)]
pub struct PngEncoder<'a> {
    pub(crate) options:         EncoderOptions,
    pub(crate) data:            &'a [u8],
    pub(crate) row_filter:      Option<FilterMethod>,
    pub(crate) encoded_chunks:  Vec<u8>,
    pub(crate) filter_scanline: Vec<u8>
}

impl<'a> PngEncoder<'a> {
    /// Create a new encoder that can encode an image into a PNG chunk
    ///
    /// `data` holds interleaved 8 bit samples laid out as described
    /// by `options`.
    pub fn new(data: &'a [u8], options: EncoderOptions) -> PngEncoder<'a> {
        PngEncoder {
            options,
            data,
            row_filter: None,
            ..Default::default()
        }
    }

    /// Use `filter` for every row, or `None` to pick the
    /// cheapest filter per row (the default)
    pub fn set_row_filter(&mut self, filter: Option<FilterMethod>) {
        self.row_filter = filter;
    }

    /// Encode the image returning the png bytes
    pub fn encode(&mut self) -> Result<Vec<u8>, PngEncodeErrors> {
        let width = self.options.width();
        let height = self.options.height();

        if width == 0 || height == 0 {
            return Err(PngEncodeErrors::ZeroDimensions);
        }
        for dimension in [width, height] {
            if dimension > PNG_MAX_U31 {
                return Err(PngEncodeErrors::TooLargeDimensions(dimension));
            }
        }
        let expected_data_size = width
            .checked_mul(height)
            .and_then(|x| x.checked_mul(self.options.colorspace().num_components()))
            .ok_or(PngEncodeErrors::TooLargeDimensions(width.max(height)))?;

        if self.data.len() != expected_data_size {
            return Err(PngEncodeErrors::WrongInputSize(
                expected_data_size,
                self.data.len()
            ));
        }
        // encode filters
        self.add_filters();

        let mut writer = Vec::with_capacity(self.encoded_chunks.len() + 64);

        // write signature
        writer.extend_from_slice(&PNG_SIGNATURE.to_be_bytes());
        // write ihdr
        write_header_fn(self, &mut writer, b"IHDR", write_ihdr);

        self.write_idat_chunks(&mut writer);

        write_header_fn(self, &mut writer, b"IEND", write_iend);

        Ok(writer)
    }

    const fn calculate_scanline_size(&self) -> usize {
        self.options.width() * self.options.colorspace().num_components()
    }

    fn add_filters(&mut self) {
        let scanline_size = self.calculate_scanline_size();
        let components = self.options.colorspace().num_components();
        let data = self.data;
        let row_filter = self.row_filter;

        // allocate space for filtered scanline
        self.filter_scanline
            .resize((scanline_size + 1) * self.options.height(), 0);

        // one row above the current processing row
        let mut previous_scanline: &[u8] = &[];

        for (filter_s, current_scanline) in self
            .filter_scanline
            .chunks_exact_mut(scanline_size + 1)
            .zip(data.chunks_exact(scanline_size))
        {
            let filter = row_filter.unwrap_or_else(|| {
                choose_compression_filter(previous_scanline, current_scanline, components)
            });

            filter_scanline(
                current_scanline,
                previous_scanline,
                filter_s,
                filter,
                components
            );
            // previous row now becomes defined
            previous_scanline = current_scanline;
        }
        // encode filtered scanline
        self.encoded_chunks = DeflateEncoder::new(&self.filter_scanline).encode_zlib();
    }

    fn write_idat_chunks(&self, writer: &mut Vec<u8>) {
        // Most decoders love data in 8KB chunks, since
        // probably libpng does that by default
        // so let's try emulating that
        for chunk in self.encoded_chunks.chunks(IDAT_CHUNK_SIZE) {
            write_chunk(*b"IDAT", chunk, writer);
        }
    }
}

#[test]
fn test_simple_write() {
    use pixgrid_core::colorspace::ColorSpace;

    use crate::PngDecoder;

    let width = 40;
    let height = 10;
    let data = vec![100; width * height];

    let options = EncoderOptions::default()
        .set_colorspace(ColorSpace::Luma)
        .set_width(40)
        .set_height(10);

    let mut encoder = PngEncoder::new(&data, options);

    let sink = encoder.encode().unwrap();
    let mut hello = PngDecoder::new(sink.as_slice());
    let bytes = hello.decode_raw().unwrap();
    assert_eq!(&data, &bytes);
}

#[test]
fn test_every_fixed_filter() {
    use pixgrid_core::colorspace::ColorSpace;

    use crate::PngDecoder;

    let (width, height) = (7, 5);
    let data: Vec<u8> = (0..width * height * 4).map(|x| (x * 13 % 256) as u8).collect();
    let options = EncoderOptions::new(width, height, ColorSpace::RGBA);

    for filter in FilterMethod::ALL {
        let mut encoder = PngEncoder::new(&data, options);
        encoder.set_row_filter(Some(filter));

        let png = encoder.encode().unwrap();
        let decoded = PngDecoder::new(png.as_slice())
            .decode(ColorSpace::RGBA)
            .unwrap();

        assert_eq!(decoded.as_slice(), data.as_slice(), "{filter:?}");
    }
}

#[test]
fn test_bad_inputs() {
    use pixgrid_core::colorspace::ColorSpace;

    let data = [0_u8; 12];

    let options = EncoderOptions::new(2, 2, ColorSpace::RGB);
    assert!(PngEncoder::new(&data, options).encode().is_ok());

    let options = EncoderOptions::new(2, 2, ColorSpace::RGBA);
    assert!(matches!(
        PngEncoder::new(&data, options).encode(),
        Err(PngEncodeErrors::WrongInputSize(16, 12))
    ));

    let options = EncoderOptions::new(0, 2, ColorSpace::RGB);
    assert!(matches!(
        PngEncoder::new(&[], options).encode(),
        Err(PngEncodeErrors::ZeroDimensions)
    ));
}
