/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Canonical prefix codes derived from a length table
//!
//! Symbols are ordered by `(length, symbol)`. The first one gets the
//! all zero code of its length, every following code is the previous one
//! plus one, with zero bits appended on the right whenever the length grows.
//!
//! The encoder and the decoder both go through [`CanonicalCodes::new`], so
//! the only thing that has to be stored is the length table.

use std::fmt::{Display, Formatter};

use crate::bitstream::BitReader;
use crate::constants::{ALPHABET_SIZE, MAX_CODE_LENGTH};
use crate::huffman::{index_symbol, symbol_index, LengthTable};

const LIMBS: usize = 4;

/// A code word of up to 255 bits
///
/// The value is kept as a 256 bit integer, least significant limb first,
/// whose most significant `len` bits are sent first.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct CodeWord {
    limbs: [u64; LIMBS],
    len:   u8
}

impl CodeWord {
    /// The all zero code of `len` bits
    pub const fn zeros(len: u8) -> CodeWord {
        CodeWord {
            limbs: [0; LIMBS],
            len
        }
    }

    /// Build a code from its bits in transmission order
    ///
    /// Returns `None` for more than 255 bits
    pub fn from_bits(bits: &[bool]) -> Option<CodeWord> {
        if bits.len() > MAX_CODE_LENGTH {
            return None;
        }
        let mut code = CodeWord::zeros(bits.len() as u8);

        for (i, bit) in bits.iter().enumerate() {
            if *bit {
                let position = bits.len() - 1 - i;
                code.limbs[position / 64] |= 1 << (position % 64);
            }
        }
        Some(code)
    }

    pub const fn len(&self) -> u8 {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    fn value_bit(&self, position: usize) -> bool {
        (self.limbs[position / 64] >> (position % 64)) & 1 == 1
    }

    /// Bit `i` in transmission order, `i` must be below `len`
    #[inline]
    fn sent_bit(&self, i: usize) -> bool {
        self.value_bit(usize::from(self.len) - 1 - i)
    }

    /// Return bit `i` in transmission order, 0 being the first bit sent
    ///
    /// Returns `None` if `i` is past the end of the code
    pub fn bit(&self, i: usize) -> Option<bool> {
        (i < usize::from(self.len)).then(|| self.sent_bit(i))
    }

    /// Bits in transmission order
    pub fn to_bits(&self) -> Vec<bool> {
        (0..usize::from(self.len)).map(|i| self.sent_bit(i)).collect()
    }

    /// Bits reversed so the first bit sent sits at position 0 of limb 0,
    /// the layout expected by [`BitWriter::put_code`]
    ///
    /// [`BitWriter::put_code`]: crate::bitstream::BitWriter::put_code
    pub fn lsb_first(&self) -> [u64; LIMBS] {
        let mut out = [0; LIMBS];

        for i in 0..usize::from(self.len) {
            if self.sent_bit(i) {
                out[i / 64] |= 1 << (i % 64);
            }
        }
        out
    }

    /// Add one to the code, keeping its length
    ///
    /// Returns `false` if every bit was already set, the code has no successor
    fn increment(&mut self) -> bool {
        let len = usize::from(self.len);

        if (0..len).all(|position| self.value_bit(position)) {
            return false;
        }
        for limb in self.limbs.iter_mut() {
            let (value, carry) = limb.overflowing_add(1);
            *limb = value;

            if !carry {
                break;
            }
        }
        true
    }

    /// Append zero bits on the right until the code is `len` bits long
    fn extend_to(&mut self, len: u8) {
        debug_assert!(len >= self.len);

        let amount = usize::from(len - self.len);
        let words = amount / 64;
        let bits = amount % 64;
        let mut out = [0_u64; LIMBS];

        for i in words..LIMBS {
            let source = i - words;
            out[i] = self.limbs[source] << bits;

            if bits != 0 && source > 0 {
                out[i] |= self.limbs[source - 1] >> (64 - bits);
            }
        }
        self.limbs = out;
        self.len = len;
    }
}

impl Display for CodeWord {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for bit in self.to_bits() {
            write!(f, "{}", u8::from(bit))?;
        }
        Ok(())
    }
}

/// Reasons a bit sequence can't be matched to a symbol
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum MatchError {
    /// The reader ran out of bits in the middle of a code word
    OutOfBits,
    /// The bits read are not a prefix of any code word
    NoMatch
}

/// Canonical codes for every symbol of a channel
#[derive(Clone)]
pub struct CanonicalCodes {
    /// code words, indexed like the length table
    codes:      [CodeWord; ALPHABET_SIZE],
    /// table indices sorted by `(length, symbol)`
    sorted:     [u8; ALPHABET_SIZE],
    /// number of code words of each length
    counts:     [u16; MAX_CODE_LENGTH + 1],
    max_length: u8
}

impl CanonicalCodes {
    /// Derive the canonical code of every symbol from its length
    ///
    /// # Errors
    /// - A symbol has a zero length
    /// - The lengths are over-subscribed, i.e no prefix code can have them
    pub fn new(lengths: &LengthTable) -> Result<CanonicalCodes, &'static str> {
        if lengths.iter().any(|length| *length == 0) {
            return Err("zero code length");
        }

        let mut sorted = [0_u8; ALPHABET_SIZE];
        for (index, entry) in sorted.iter_mut().enumerate() {
            *entry = index as u8;
        }
        // stable, so equal lengths stay in ascending symbol order
        sorted.sort_by_key(|index| lengths[usize::from(*index)]);

        let mut counts = [0_u16; MAX_CODE_LENGTH + 1];
        for length in lengths {
            counts[usize::from(*length)] += 1;
        }

        let mut codes = [CodeWord::default(); ALPHABET_SIZE];

        let first = usize::from(sorted[0]);
        let mut code = CodeWord::zeros(lengths[first]);
        codes[first] = code;

        for index in sorted[1..].iter().map(|index| usize::from(*index)) {
            if !code.increment() {
                return Err("over-subscribed code lengths");
            }
            code.extend_to(lengths[index]);
            codes[index] = code;
        }

        Ok(CanonicalCodes {
            codes,
            sorted,
            counts,
            max_length: lengths[usize::from(sorted[ALPHABET_SIZE - 1])]
        })
    }

    /// Return the code word for `symbol`
    pub fn code(&self, symbol: i8) -> &CodeWord {
        &self.codes[symbol_index(symbol)]
    }

    /// Code words for all symbols in ascending symbol order
    pub fn codes(&self) -> &[CodeWord; ALPHABET_SIZE] {
        &self.codes
    }

    /// Longest code word in the table
    pub const fn max_length(&self) -> u8 {
        self.max_length
    }

    /// Read bits one at a time until they spell a complete code word
    ///
    /// Codes of one length are consecutive integers, so instead of comparing
    /// against every entry we track how far the bits read so far lie past the
    /// first code of the current length. Once that offset is smaller than the
    /// number of codes of that length, it names the symbol.
    pub fn decode_symbol(&self, reader: &mut BitReader) -> Result<i8, MatchError> {
        let mut offset = 0_usize;
        let mut first_index = 0_usize;

        for length in 1..=usize::from(self.max_length) {
            let bit = reader.get_bit().ok_or(MatchError::OutOfBits)?;

            offset = (offset << 1) | usize::from(bit);

            let count = usize::from(self.counts[length]);

            if offset < count {
                let index = self.sorted[first_index + offset];
                return Ok(index_symbol(usize::from(index)));
            }
            offset -= count;
            first_index += count;

            // prefixes of longer codes occupy offsets below the number of
            // codes left, anything past that can never complete
            if offset >= ALPHABET_SIZE - first_index {
                return Err(MatchError::NoMatch);
            }
        }
        Err(MatchError::NoMatch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitstream::BitWriter;
    use crate::huffman::{build_lengths, count_symbols};

    fn lengths_from_pairs(default: u8, pairs: &[(i8, u8)]) -> LengthTable {
        let mut lengths = [default; ALPHABET_SIZE];
        for (symbol, length) in pairs {
            lengths[symbol_index(*symbol)] = *length;
        }
        lengths
    }

    #[test]
    fn increments_follow_canonical_order() {
        // -128 gets 1 bit, -127 gets 2 bits, everything else 10 bits
        let lengths = lengths_from_pairs(10, &[(-128, 1), (-127, 2)]);
        let codes = CanonicalCodes::new(&lengths).unwrap();

        assert_eq!(codes.code(-128).to_string(), "0");
        assert_eq!(codes.code(-127).to_string(), "10");
        assert_eq!(codes.code(-126).to_string(), "1100000000");
        assert_eq!(codes.code(-125).to_string(), "1100000001");
        // 254 ten bit codes follow 1100000000 consecutively
        assert_eq!(codes.code(127).to_string(), "1111111101");
    }

    #[test]
    fn equal_lengths_are_ordered_by_symbol() {
        let lengths = [8; ALPHABET_SIZE];
        let codes = CanonicalCodes::new(&lengths).unwrap();

        for symbol in i8::MIN..=i8::MAX {
            let expected = CodeWord::from_bits(
                &(0..8)
                    .map(|i| (symbol_index(symbol) >> (7 - i)) & 1 == 1)
                    .collect::<Vec<bool>>()
            );
            assert_eq!(Some(*codes.code(symbol)), expected);
        }
    }

    #[test]
    fn derivation_is_deterministic() {
        let symbols: Vec<i8> = (0..4096_i32).map(|i| ((i * i) % 251) as i8).collect();
        let lengths = build_lengths(&count_symbols(&symbols));

        let first = CanonicalCodes::new(&lengths).unwrap();
        let second = CanonicalCodes::new(&lengths).unwrap();

        assert_eq!(first.codes(), second.codes());
    }

    #[test]
    fn codes_are_prefix_free() {
        let symbols: Vec<i8> = (0..3000_i32).map(|i| ((i * 37) % 200 - 100) as i8).collect();
        let lengths = build_lengths(&count_symbols(&symbols));
        let codes = CanonicalCodes::new(&lengths).unwrap();

        let all: Vec<Vec<bool>> = codes.codes().iter().map(|c| c.to_bits()).collect();

        for (i, a) in all.iter().enumerate() {
            assert_eq!(a.len(), usize::from(lengths[i]));
            for (j, b) in all.iter().enumerate() {
                if i != j && a.len() <= b.len() {
                    assert_ne!(&b[..a.len()], &a[..], "{i} is a prefix of {j}");
                }
            }
        }
    }

    #[test]
    fn maximal_length_codes_are_supported() {
        // lengths 1..=255 plus a second 255, a complete but degenerate code
        let mut lengths = [0_u8; ALPHABET_SIZE];
        for (index, length) in lengths.iter_mut().enumerate() {
            *length = (index + 1).min(255) as u8;
        }
        let codes = CanonicalCodes::new(&lengths).unwrap();

        assert_eq!(codes.max_length(), 255);
        // 254 ones followed by a zero, then 255 ones
        let second_last = codes.code(index_symbol(254));
        let last = codes.code(127);
        assert_eq!(second_last.len(), 255);
        assert!((0..254).all(|i| second_last.bit(i) == Some(true)));
        assert_eq!(second_last.bit(254), Some(false));
        assert!((0..255).all(|i| last.bit(i) == Some(true)));
        assert_eq!(last.bit(255), None);

        let mut writer = BitWriter::new();
        for symbol in [127_i8, -128, index_symbol(254), 0] {
            let code = codes.code(symbol);
            writer.put_code(&code.lsb_first(), code.len());
        }
        let bytes = writer.finish();
        let mut reader = BitReader::new(&bytes);

        for symbol in [127_i8, -128, index_symbol(254), 0] {
            assert_eq!(codes.decode_symbol(&mut reader), Ok(symbol));
        }
    }

    #[test]
    fn overlong_bit_strings_are_not_code_words() {
        assert!(CodeWord::from_bits(&[true; 255]).is_some());
        assert!(CodeWord::from_bits(&[true; 256]).is_none());
    }

    #[test]
    fn zero_lengths_are_rejected() {
        let lengths = lengths_from_pairs(8, &[(3, 0)]);
        assert!(CanonicalCodes::new(&lengths).is_err());
    }

    #[test]
    fn oversubscribed_lengths_are_rejected() {
        // three one bit codes can't exist
        let lengths = lengths_from_pairs(9, &[(0, 1), (1, 1), (2, 1)]);
        assert!(CanonicalCodes::new(&lengths).is_err());

        // 256 seven bit codes need 2x the space a 7 bit tree has
        assert!(CanonicalCodes::new(&[7; ALPHABET_SIZE]).is_err());
    }

    #[test]
    fn decoding_matches_explicit_codes() {
        let symbols: Vec<i8> = (0..2000_i32).map(|i| ((i * 13) % 64) as i8).collect();
        let lengths = build_lengths(&count_symbols(&symbols));
        let codes = CanonicalCodes::new(&lengths).unwrap();

        let mut writer = BitWriter::new();
        for symbol in i8::MIN..=i8::MAX {
            let code = codes.code(symbol);
            writer.put_code(&code.lsb_first(), code.len());
        }
        let bytes = writer.finish();
        let mut reader = BitReader::new(&bytes);

        for symbol in i8::MIN..=i8::MAX {
            assert_eq!(codes.decode_symbol(&mut reader), Ok(symbol));
        }
    }

    #[test]
    fn unused_prefix_is_reported() {
        // a single one bit code and 255 codes of 9 bits leave
        // nine one bits unused
        let lengths = lengths_from_pairs(9, &[(-128, 1)]);
        let codes = CanonicalCodes::new(&lengths).unwrap();

        let bytes = [0xff_u8; 4];
        let mut reader = BitReader::new(&bytes);

        assert_eq!(codes.decode_symbol(&mut reader), Err(MatchError::NoMatch));
    }

    #[test]
    fn running_out_of_bits_is_reported() {
        let codes = CanonicalCodes::new(&[8; ALPHABET_SIZE]).unwrap();
        let bytes = [0xab_u8];
        let mut reader = BitReader::new(&bytes);

        assert!(codes.decode_symbol(&mut reader).is_ok());
        assert_eq!(
            codes.decode_symbol(&mut reader),
            Err(MatchError::OutOfBits)
        );
    }
}
