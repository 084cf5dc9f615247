/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! CRC-32 as used by png chunks
//!
//! Reflected polynomial `0xEDB88320`, initial value and final xor
//! of `0xFFFF_FFFF`, see ISO 3309.

/// Table of CRCs of all 8-bit messages, built at compile time
/// and never written to afterwards
static CRC_TABLE: [u32; 256] = make_crc_table();

const fn make_crc_table() -> [u32; 256] {
    let mut table = [0_u32; 256];
    let mut n = 0;

    while n < 256 {
        let mut c = n as u32;
        let mut k = 0;

        while k < 8 {
            if c & 1 == 1 {
                c = 0xEDB8_8320 ^ (c >> 1);
            } else {
                c >>= 1;
            }
            k += 1;
        }
        table[n] = c;
        n += 1;
    }
    table
}

/// Update a running crc with the bytes in `data`
///
/// The crc is neither pre nor post conditioned, start with `u32::MAX`
/// and invert the final result, or use [`calc_crc`] for a single buffer.
pub fn calc_crc_with_bytes(data: &[u8], crc: u32) -> u32 {
    data.iter().fold(crc, |crc, byte| {
        CRC_TABLE[((crc ^ u32::from(*byte)) & 0xFF) as usize] ^ (crc >> 8)
    })
}

/// Calculate the CRC-32 of `data`
pub fn calc_crc(data: &[u8]) -> u32 {
    !calc_crc_with_bytes(data, u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_values() {
        assert_eq!(calc_crc(b""), 0);
        assert_eq!(calc_crc(b"123456789"), 0xCBF4_3926);
        // crc stored in every empty IEND chunk
        assert_eq!(calc_crc(b"IEND"), 0xAE42_6082);
    }

    #[test]
    fn test_chained_matches_single() {
        let tag = b"IDAT";
        let data = [0x78, 0x01, 0x01, 0x00, 0x00, 0xFF, 0xFF];

        let mut joined = tag.to_vec();
        joined.extend_from_slice(&data);

        let chained = !calc_crc_with_bytes(&data, calc_crc_with_bytes(tag, u32::MAX));

        assert_eq!(chained, calc_crc(&joined));
    }
}
