/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::fs::read;
use std::path::PathBuf;

use pixgrid_inflate::{DeflateDecoder, DeflateEncoder};

use crate::{check_manifest, read_manifest, sample_path};

pub fn inflate_path() -> PathBuf {
    sample_path().join("test-images/inflate")
}

#[test]
fn test_inflate() {
    check_manifest("inflate.json", &inflate_path(), |_, contents| {
        DeflateDecoder::new(contents).decode_zlib().unwrap()
    });
}

#[test]
fn test_inflate_reencode() {
    // our encoder splits blocks differently, the decoded bytes must not change
    check_manifest("inflate.json", &inflate_path(), |entry, _| {
        let reference = read(inflate_path().join(&entry.reference)).unwrap();

        let encoded = DeflateEncoder::new(&reference).encode_zlib();
        DeflateDecoder::new(&encoded).decode_zlib().unwrap()
    });
}
