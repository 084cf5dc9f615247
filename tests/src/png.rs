/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::fs::read;
use std::path::PathBuf;

use pixgrid_core::options::DecoderOptions;
use pixgrid_png::PngDecoder;

use crate::{check_manifest, read_manifest, sample_path};

pub fn png_path() -> PathBuf {
    sample_path().join("test-images/png")
}

#[test]
fn test_png() {
    check_manifest("png.json", &png_path(), |entry, contents| {
        let mut decoder = PngDecoder::new_with_options(contents, DecoderOptions::new_safe());

        match entry.colorspace {
            Some(colorspace) => decoder
                .decode(colorspace.to_colorspace())
                .unwrap()
                .into_vec(),
            None => decoder.decode_raw().unwrap()
        }
    });
}

#[test]
fn test_png_headers() {
    for entry in read_manifest("png.json") {
        let contents = read(png_path().join(&entry.name)).unwrap();
        let reference = read(png_path().join(&entry.reference)).unwrap();

        let mut decoder = PngDecoder::new(contents.as_slice());
        decoder.decode_headers().unwrap();

        let (width, height) = decoder.get_dimensions().unwrap();
        let colorspace = decoder.get_colorspace().unwrap();

        if let Some(expected) = entry.colorspace {
            assert_eq!(colorspace, expected.to_colorspace(), "{}", entry.name);
        }
        assert_eq!(
            width * height * colorspace.num_components(),
            reference.len(),
            "{}",
            entry.name
        );
    }
}
