/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Symbol statistics and Huffman code length construction
//!
//! Tables are indexed by symbol value in ascending order,
//! i.e index 0 holds symbol `-128` and index 255 holds `127`.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::constants::ALPHABET_SIZE;

/// Occurrence count of every symbol in a channel
pub type FrequencyTable = [u32; ALPHABET_SIZE];

/// Code length in bits of every symbol in a channel
pub type LengthTable = [u8; ALPHABET_SIZE];

/// Position of `symbol` inside a frequency or length table
#[inline(always)]
pub const fn symbol_index(symbol: i8) -> usize {
    ((symbol as u8) ^ 0x80) as usize
}

/// Symbol stored at table position `index`
#[inline(always)]
pub const fn index_symbol(index: usize) -> i8 {
    ((index as u8) ^ 0x80) as i8
}

/// Count how often each symbol occurs in `symbols`
pub fn count_symbols(symbols: &[i8]) -> FrequencyTable {
    let mut table = [0_u32; ALPHABET_SIZE];

    for symbol in symbols {
        table[symbol_index(*symbol)] += 1;
    }
    table
}

const NO_PARENT: u16 = u16::MAX;

/// Build a Huffman tree over all symbols and return each symbol's depth
///
/// Every symbol takes part, including those with a zero count.
/// The two lowest nodes are merged until one remains, with ties
/// decided by node id: leaves use their table index and merged
/// nodes are numbered from 256 upward in creation order, the lower
/// id is extracted first.
///
/// Depths are clamped to a minimum of one bit.
pub fn build_lengths(frequencies: &FrequencyTable) -> LengthTable {
    // leaves followed by ALPHABET_SIZE-1 internal nodes
    let mut parents = [NO_PARENT; 2 * ALPHABET_SIZE - 1];

    let mut heap: BinaryHeap<Reverse<(u64, u16)>> = frequencies
        .iter()
        .enumerate()
        .map(|(index, count)| Reverse((u64::from(*count), index as u16)))
        .collect();

    let mut next_id = ALPHABET_SIZE as u16;

    while let Some(Reverse((left_count, left))) = heap.pop() {
        // the last node standing is the root
        let Some(Reverse((right_count, right))) = heap.pop() else {
            break;
        };

        parents[usize::from(left)] = next_id;
        parents[usize::from(right)] = next_id;

        heap.push(Reverse((left_count + right_count, next_id)));
        next_id += 1;
    }

    let mut lengths = [0_u8; ALPHABET_SIZE];

    for (leaf, length) in lengths.iter_mut().enumerate() {
        let mut depth = 0_usize;
        let mut node = parents[leaf];

        while node != NO_PARENT {
            depth += 1;
            node = parents[usize::from(node)];
        }
        // a lone leaf is its own root, it still needs a bit on the wire
        *length = depth.clamp(1, usize::from(u8::MAX)) as u8;
    }
    lengths
}

/// Shortest code length present in a table
pub fn min_length(lengths: &LengthTable) -> u8 {
    lengths.iter().copied().min().unwrap_or(0)
}

/// Total number of bits needed to encode a channel with these lengths
pub fn encoded_bits(frequencies: &FrequencyTable, lengths: &LengthTable) -> u64 {
    frequencies
        .iter()
        .zip(lengths.iter())
        .map(|(count, length)| u64::from(*count) * u64::from(*length))
        .sum()
}
