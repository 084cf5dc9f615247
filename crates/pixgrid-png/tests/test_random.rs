/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Random images encoded by us and decoded by both us and the
//! png crate

use nanorand::{Rng, WyRand};
use pixgrid_core::colorspace::ColorSpace;
use pixgrid_core::options::EncoderOptions;
use pixgrid_png::{FilterMethod, PngDecoder, PngEncoder};
use png::Transformations;

fn decode_ref(data: &[u8]) -> Vec<u8> {
    let mut decoder = png::Decoder::new(data);
    let expand = Transformations::EXPAND;
    decoder.set_transformations(expand);

    let mut reader = decoder.read_info().unwrap();

    let mut buf = vec![0; reader.output_buffer_size()];
    let _ = reader.next_frame(&mut buf).unwrap();

    buf
}

fn decode_pixgrid(data: &[u8], colorspace: ColorSpace) -> Vec<u8> {
    PngDecoder::new(data).decode(colorspace).unwrap().into_vec()
}

fn random_image(rand: &mut WyRand, width: usize, height: usize, colorspace: ColorSpace) -> Vec<u8> {
    let mut pixels = vec![0_u8; width * height * colorspace.num_components()];
    rand.fill(&mut pixels);
    pixels
}

const COLORSPACES: [ColorSpace; 3] = [ColorSpace::Luma, ColorSpace::RGB, ColorSpace::RGBA];

#[test]
fn test_random_images() {
    let mut rand = WyRand::new_seed(0x5EED);

    for _ in 0..40 {
        let width = rand.generate_range(1_usize..=64);
        let height = rand.generate_range(1_usize..=64);
        let colorspace = COLORSPACES[rand.generate_range(0_usize..3)];

        let pixels = random_image(&mut rand, width, height, colorspace);
        let options = EncoderOptions::new(width, height, colorspace);

        let png = PngEncoder::new(&pixels, options).encode().unwrap();

        let ours = decode_pixgrid(&png, colorspace);
        let reference = decode_ref(&png);

        assert_eq!(ours, pixels, "{width}x{height} {colorspace:?}");
        assert_eq!(ours, reference, "{width}x{height} {colorspace:?}");
    }
}

#[test]
fn test_random_fixed_filters() {
    let mut rand = WyRand::new_seed(42);

    for filter in FilterMethod::ALL {
        for colorspace in COLORSPACES {
            let width = rand.generate_range(1_usize..=33);
            let height = rand.generate_range(1_usize..=17);

            let pixels = random_image(&mut rand, width, height, colorspace);
            let options = EncoderOptions::new(width, height, colorspace);

            let mut encoder = PngEncoder::new(&pixels, options);
            encoder.set_row_filter(Some(filter));
            let png = encoder.encode().unwrap();

            assert_eq!(decode_pixgrid(&png, colorspace), pixels, "{filter:?}");
            assert_eq!(decode_ref(&png), pixels, "{filter:?}");
        }
    }
}

#[test]
fn test_large_image_spans_blocks() {
    // 300 * 300 * 4 is well above the 65535 bytes a stored block holds
    let (width, height) = (300, 300);
    let mut rand = WyRand::new_seed(7);

    let pixels = random_image(&mut rand, width, height, ColorSpace::RGBA);
    let options = EncoderOptions::new(width, height, ColorSpace::RGBA);

    let png = PngEncoder::new(&pixels, options).encode().unwrap();

    assert_eq!(decode_pixgrid(&png, ColorSpace::RGBA), pixels);
    assert_eq!(decode_ref(&png), pixels);
}
