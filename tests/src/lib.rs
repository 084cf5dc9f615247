/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Decode every file listed in a json manifest and compare its
//! hash against the hash of a raw dump stored next to it

#![allow(unused)]

use std::fs::read;
use std::path::{Path, PathBuf};

use pixgrid_core::colorspace::ColorSpace;
use serde::Deserialize;
use xxhash_rust::xxh3::xxh3_128;

mod inflate;
mod png;

#[derive(Copy, Clone, Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonColorspace {
    RGB,
    RGBA,
    Luma
}

impl JsonColorspace {
    pub fn to_colorspace(self) -> ColorSpace {
        match self {
            Self::Luma => ColorSpace::Luma,
            Self::RGB => ColorSpace::RGB,
            Self::RGBA => ColorSpace::RGBA
        }
    }
}

#[derive(Clone, Deserialize, Debug)]
pub struct TestEntry {
    /// File to decode, relative to the fixture directory
    pub name:       String,
    /// File holding the bytes `name` should decode to
    pub reference:  String,
    pub colorspace: Option<JsonColorspace>,
    pub comment:    Option<String>
}

/// Root of the workspace, fixtures live under `test-images/`
pub fn sample_path() -> PathBuf {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"));
    path.parent().unwrap().to_owned()
}

pub fn read_manifest(name: &str) -> Vec<TestEntry> {
    let file = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join(name);

    serde_json::from_slice(&read(file).unwrap()).unwrap()
}

/// Decode each entry of `manifest` with `decode`, comparing output hashes
/// against the reference dumps
///
/// Every entry is tried before panicking so one run reports all mismatches.
pub fn check_manifest<F>(manifest: &str, fixtures: &Path, decode: F)
where
    F: Fn(&TestEntry, &[u8]) -> Vec<u8>
{
    let mut mismatches = Vec::new();

    for entry in read_manifest(manifest) {
        let file_name = fixtures.join(&entry.name);

        let expected = hash(&read(fixtures.join(&entry.reference)).unwrap());
        let found = hash(&decode(&entry, &read(&file_name).unwrap()));

        if found != expected {
            eprintln!(
                "Hash mismatch for file {file_name:?}\nExpected {expected} but found {found}\nConfig:{entry:#?}\n"
            );
            mismatches.push(entry.name);
        }
    }
    assert!(
        mismatches.is_empty(),
        "Errors found during test decoding\n {mismatches:#?}"
    );
}

fn hash(contents: &[u8]) -> u128 {
    xxh3_128(contents)
}
