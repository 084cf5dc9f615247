/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Forward filters, the exact inverses of `de_filter`
use crate::enums::FilterMethod;
use crate::filters::de_filter::paeth;

/// Filter one scanline
///
/// `output` receives the filter type byte followed by the filtered
/// bytes, so it must be one byte longer than `input`. An empty `previous`
/// means this is the first row and the row above reads as zero.
pub fn filter_scanline(
    input: &[u8], previous: &[u8], output: &mut [u8], filter: FilterMethod, components: usize
) {
    let (filter_byte, out) = output.split_at_mut(1);

    filter_byte[0] = filter.to_int();

    let up = |i: usize| previous.get(i).copied().unwrap_or(0);

    for (i, (out_px, current)) in out.iter_mut().zip(input).enumerate() {
        let (left, upper_left) = if i >= components {
            (input[i - components], up(i - components))
        } else {
            (0, 0)
        };

        let predictor = match filter {
            FilterMethod::None => 0,
            FilterMethod::Sub => left,
            FilterMethod::Up => up(i),
            FilterMethod::Average => ((u16::from(left) + u16::from(up(i))) >> 1) as u8,
            FilterMethod::Paeth => paeth(left, up(i), upper_left)
        };
        *out_px = current.wrapping_sub(predictor);
    }
}

/// Pick the filter whose output has the smallest sum of
/// absolute values when bytes are read as signed
///
/// Ties go to the filter with the lower type number.
pub fn choose_compression_filter(
    previous: &[u8], current: &[u8], components: usize
) -> FilterMethod {
    let mut scratch = vec![0; current.len() + 1];

    let mut best_filter = FilterMethod::None;
    let mut best_cost = u64::MAX;

    for filter in FilterMethod::ALL {
        filter_scanline(current, previous, &mut scratch, filter, components);

        let cost: u64 = scratch[1..]
            .iter()
            .map(|x| u64::from((*x as i8).unsigned_abs()))
            .sum();

        if cost < best_cost {
            best_cost = cost;
            best_filter = filter;
        }
    }
    best_filter
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::de_filter::{handle_avg, handle_paeth, handle_sub, handle_up};

    fn unfilter(filtered: &[u8], prev: &[u8], components: usize) -> Vec<u8> {
        let raw = &filtered[1..];
        let mut current = vec![0; raw.len()];

        match FilterMethod::from_int(filtered[0]).unwrap() {
            FilterMethod::None => current.copy_from_slice(raw),
            FilterMethod::Sub => handle_sub(raw, &mut current, components),
            FilterMethod::Up => handle_up(prev, raw, &mut current),
            FilterMethod::Average => handle_avg(prev, raw, &mut current, components),
            FilterMethod::Paeth => handle_paeth(prev, raw, &mut current, components)
        }
        current
    }

    #[test]
    fn test_filters_invert() {
        let prev: Vec<u8> = (0..24_u32).map(|x| (x * 37 + 11) as u8).collect();
        let row: Vec<u8> = (0..24_u32).map(|x| (x * 91 + 200) as u8).collect();
        let mut filtered = vec![0; row.len() + 1];

        for filter in FilterMethod::ALL {
            for components in [1, 3, 4] {
                filter_scanline(&row, &prev, &mut filtered, filter, components);
                assert_eq!(filtered[0], filter.to_int());
                assert_eq!(unfilter(&filtered, &prev, components), row, "{filter:?}");

                // first row, nothing above
                filter_scanline(&row, &[], &mut filtered, filter, components);
                assert_eq!(unfilter(&filtered, &[0; 24], components), row, "{filter:?}");
            }
        }
    }

    #[test]
    fn test_adaptive_choice() {
        let first = [100_u8; 12];

        // sub and paeth tie on the first row, the lower type wins
        assert_eq!(choose_compression_filter(&[], &first, 3), FilterMethod::Sub);
        // identical rows filter to zero with up
        assert_eq!(choose_compression_filter(&first, &first, 3), FilterMethod::Up);
    }
}
