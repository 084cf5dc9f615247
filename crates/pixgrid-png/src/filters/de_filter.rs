/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Inverse filters
//!
//! Every function reconstructs one row into `current` from the filtered
//! bytes in `raw`. `prev_row` is the reconstructed row above, all zeroes
//! for the first row, and `components` is the distance in bytes to the
//! pixel on the left.

#[allow(clippy::manual_memcpy)]
pub fn handle_avg(prev_row: &[u8], raw: &[u8], current: &mut [u8], components: usize) {
    if raw.len() < components || current.len() < components || prev_row.len() < components {
        return;
    }

    // handle leftmost byte explicitly
    for i in 0..components {
        current[i] = raw[i].wrapping_add(prev_row[i] >> 1);
    }
    // raw length is one row,so always keep it in check
    let end = current.len().min(raw.len()).min(prev_row.len());

    for i in components..end {
        let a = current[i - components];
        let b = prev_row[i];

        // floor((a + b) / 2) without leaving 8 bits
        let c = (a & b) + ((a ^ b) >> 1);

        current[i] = raw[i].wrapping_add(c);
    }
}

#[allow(clippy::manual_memcpy)]
pub fn handle_sub(raw: &[u8], current: &mut [u8], components: usize) {
    if current.len() < components || raw.len() < components {
        return;
    }
    // handle leftmost byte explicitly
    for i in 0..components {
        current[i] = raw[i];
    }
    // raw length is one row,so always keep it in check
    let end = current.len().min(raw.len());

    for i in components..end {
        let a = current[i - components];
        current[i] = raw[i].wrapping_add(a);
    }
}

#[allow(clippy::manual_memcpy)]
pub fn handle_paeth(prev_row: &[u8], raw: &[u8], current: &mut [u8], components: usize) {
    if raw.len() < components || current.len() < components || prev_row.len() < components {
        return;
    }

    // handle leftmost byte explicitly, left and upper left are zero
    for i in 0..components {
        current[i] = raw[i].wrapping_add(paeth(0, prev_row[i], 0));
    }
    // raw length is one row,so always keep it in check
    let end = current.len().min(raw.len()).min(prev_row.len());

    for i in components..end {
        let paeth_res = paeth(
            current[i - components],
            prev_row[i],
            prev_row[i - components]
        );
        current[i] = raw[i].wrapping_add(paeth_res)
    }
}

pub fn handle_up(prev_row: &[u8], raw: &[u8], current: &mut [u8]) {
    for ((filt, recon), up) in raw.iter().zip(current).zip(prev_row) {
        *recon = (*filt).wrapping_add(*up)
    }
}

/// The paeth predictor
///
/// Picks whichever of `a` (left), `b` (up) and `c` (upper left) is
/// closest to `a + b - c`, ties go to `a`, then `b`.
#[inline(always)]
pub fn paeth(a: u8, b: u8, c: u8) -> u8 {
    let a_i = i16::from(a);
    let b_i = i16::from(b);
    let c_i = i16::from(c);

    let p = a_i + b_i - c_i;

    let pa = (p - a_i).abs();
    let pb = (p - b_i).abs();
    let pc = (p - c_i).abs();

    if pa <= pb && pa <= pc {
        a
    } else if pb <= pc {
        b
    } else {
        c
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paeth_tie_break() {
        assert_eq!(paeth(10, 10, 10), 10);
        // pa == pb, left wins
        assert_eq!(paeth(5, 5, 100), 5);
        // pb == pc, up wins over upper left
        assert_eq!(paeth(5, 2, 4), 2);
        assert_eq!(paeth(200, 10, 250), 10);
        assert_eq!(paeth(10, 200, 250), 10);
        assert_eq!(paeth(100, 50, 60), 100);
    }

    #[test]
    fn test_first_column_has_no_left() {
        let prev = [0_u8; 6];
        let raw = [7, 8, 9, 1, 1, 1];
        let mut current = [0_u8; 6];

        handle_sub(&raw, &mut current, 3);
        assert_eq!(current, [7, 8, 9, 8, 9, 10]);

        handle_avg(&prev, &raw, &mut current, 3);
        assert_eq!(current, [7, 8, 9, 4, 5, 5]);

        handle_paeth(&prev, &raw, &mut current, 3);
        assert_eq!(current, [7, 8, 9, 8, 9, 10]);
    }

    #[test]
    fn test_wrapping() {
        let prev = [250_u8, 255];
        let raw = [10_u8, 255];
        let mut current = [0; 2];

        handle_up(&prev, &raw, &mut current);
        assert_eq!(current, [4, 254]);

        // (135 + 255) / 2 = 195, 255 + 195 wraps to 194
        handle_avg(&prev, &raw, &mut current, 1);
        assert_eq!(current, [135, 194]);
    }
}
