/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use pixgrid_core::colorspace::ColorSpace;

use crate::crc::calc_crc_with_bytes;
use crate::encoder::PngEncoder;

pub(crate) fn write_ihdr(ctx: &PngEncoder, output: &mut Vec<u8>) {
    // dimensions were checked to fit in 31 bits
    output.extend_from_slice(&(ctx.options.width() as u32).to_be_bytes());
    output.extend_from_slice(&(ctx.options.height() as u32).to_be_bytes());
    // depth
    output.push(8);

    let color_int = match ctx.options.colorspace() {
        ColorSpace::Luma => 0,
        ColorSpace::RGB => 2,
        ColorSpace::RGBA => 6
    };
    output.push(color_int);
    // compression method
    output.push(0);
    // filter method, the only one defined, per row types come with each row
    output.push(0);
    // interlace method, always Standard
    output.push(0);
}

// iend is a no-op
pub(crate) fn write_iend(_: &PngEncoder, _: &mut Vec<u8>) {}

/// Write a chunk whose data is produced by `func`
///
/// `func` writes the chunk data to a scratch buffer so the length
/// is known before anything lands in `writer`.
pub(crate) fn write_header_fn<F: Fn(&PngEncoder, &mut Vec<u8>)>(
    v: &PngEncoder, writer: &mut Vec<u8>, name: &[u8; 4], func: F
) {
    let mut temp_space = Vec::with_capacity(16);

    (func)(v, &mut temp_space);

    write_chunk(*name, &temp_space, writer);
}

/// Write length, chunk type, data and crc
pub(crate) fn write_chunk(chunk: [u8; 4], data: &[u8], writer: &mut Vec<u8>) {
    // write length
    writer.extend_from_slice(&(data.len() as u32).to_be_bytes());
    // write chunk name
    writer.extend_from_slice(&chunk);
    // write chunk data
    writer.extend_from_slice(data);
    // crc is a continuous function, so first crc the chunk name
    // and then crc that with the chunk bytes passing in the previous crc

    // equal to crc((chunk.chunk + data) ,u32::MAX))
    let crc = calc_crc_with_bytes(&chunk, u32::MAX);
    let crc = !calc_crc_with_bytes(data, crc);

    writer.extend_from_slice(&crc.to_be_bytes());
}

#[test]
fn test_empty_iend() {
    let mut out = vec![];
    write_chunk(*b"IEND", &[], &mut out);

    assert_eq!(
        out,
        [0, 0, 0, 0, b'I', b'E', b'N', b'D', 0xAE, 0x42, 0x60, 0x82]
    );
}
