/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

/// Largest prime below 2^16
#[cfg_attr(feature = "zlib", allow(dead_code))]
const ADLER_MOD: u32 = 65521;

/// Number of bytes that can be summed before `s2` may overflow a u32
/// and a reduction is due, see zlib's `NMAX`
#[cfg_attr(feature = "zlib", allow(dead_code))]
const ADLER_NMAX: usize = 5552;

/// Calculate the adler-32 hash of `data`
///
/// `s1` starts at 1 and accumulates bytes, `s2` starts at 0 and accumulates `s1`,
/// both modulo 65521, the result is `(s2 << 16) | s1`.
pub fn calc_adler_hash(data: &[u8]) -> u32 {
    update_adler_hash(1, data)
}

/// Continue an adler-32 computation from a previous `adler` value
#[cfg(feature = "zlib")]
pub fn update_adler_hash(adler: u32, data: &[u8]) -> u32 {
    let mut hasher = simd_adler32::Adler32::from_checksum(adler);

    hasher.write(data);
    hasher.finish()
}

/// Continue an adler-32 computation from a previous `adler` value
#[cfg(not(feature = "zlib"))]
pub fn update_adler_hash(adler: u32, data: &[u8]) -> u32 {
    let mut s1 = adler & 0xFFFF;
    let mut s2 = adler >> 16;

    // reduce once per NMAX bytes instead of once per byte,
    // same result since neither sum can overflow in between
    for chunk in data.chunks(ADLER_NMAX) {
        for byte in chunk {
            s1 += u32::from(*byte);
            s2 += s1;
        }
        s1 %= ADLER_MOD;
        s2 %= ADLER_MOD;
    }

    (s2 << 16) | s1
}
