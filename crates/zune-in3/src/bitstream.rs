/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Bit I/O functionalities
//!
//! Bits are packed least significant first, stream bit `k` lives
//! in byte `k/8` at bit position `k%8`.

/// Largest number of bits accepted by a single [`BitWriter::put_bits`] call
const MAX_PUT_BITS: u8 = 32;

/// A bit writer that owns its output
#[derive(Clone, Debug, Default)]
pub struct BitWriter {
    bits_in_buffer: u8,
    buffer:         u64,
    dest:           Vec<u8>
}

impl BitWriter {
    pub fn new() -> BitWriter {
        BitWriter::default()
    }

    /// Create a writer whose output can hold `bytes` without reallocating
    pub fn with_capacity(bytes: usize) -> BitWriter {
        BitWriter {
            bits_in_buffer: 0,
            buffer:         0,
            dest:           Vec::with_capacity(bytes)
        }
    }

    /// Move whole bytes from the bit buffer to the output
    ///
    /// This may leave between 0-7 bits remaining in the bit buffer
    fn flush(&mut self) {
        let bytes_written = usize::from(self.bits_in_buffer >> 3);

        self.dest
            .extend_from_slice(&self.buffer.to_le_bytes()[..bytes_written]);
        // at most 56 bits are buffered so the shift can't overflow
        self.buffer >>= bytes_written * 8;
        self.bits_in_buffer &= 7;
    }

    /// Append the low `nbits` of `bits` to the stream
    pub fn put_bits(&mut self, nbits: u8, bits: u64) {
        debug_assert!(nbits <= MAX_PUT_BITS);

        if self.bits_in_buffer + nbits > 56 {
            self.flush();
        }
        let mask = (1_u64 << nbits) - 1;

        self.buffer |= (mask & bits) << self.bits_in_buffer;
        self.bits_in_buffer += nbits;
    }

    /// Append a code word of `length` bits
    ///
    /// `bits` holds the code with its first bit at position 0 of `bits[0]`
    pub fn put_code(&mut self, bits: &[u64; 4], length: u8) {
        let mut remaining = usize::from(length);
        let mut offset = 0;

        while remaining > 0 {
            let take = remaining.min(usize::from(MAX_PUT_BITS));
            // offset is a multiple of 32 so a chunk never straddles two limbs
            let chunk = bits[offset / 64] >> (offset % 64);

            self.put_bits(take as u8, chunk);

            offset += take;
            remaining -= take;
        }
    }

    /// Number of bits written so far
    pub fn bits_written(&self) -> usize {
        self.dest.len() * 8 + usize::from(self.bits_in_buffer)
    }

    /// Pad with zero bits to the next byte boundary and return the bytes
    pub fn finish(mut self) -> Vec<u8> {
        self.flush();

        if self.bits_in_buffer != 0 {
            self.dest.push(self.buffer as u8);
        }
        self.dest
    }
}

/// A bit reader over a byte slice
pub struct BitReader<'src> {
    src:       &'src [u8],
    position:  usize,
    bits_left: u8,
    buffer:    u64
}

impl<'src> BitReader<'src> {
    pub fn new(src: &'src [u8]) -> BitReader<'src> {
        BitReader {
            src,
            position: 0,
            bits_left: 0,
            buffer: 0
        }
    }

    /// Load up to 64 bits into an empty bit buffer
    fn refill(&mut self) {
        debug_assert_eq!(self.bits_left, 0);

        match self.src.get(self.position..self.position + 8) {
            Some(bytes) => {
                let mut buf = [0; 8];
                buf.copy_from_slice(bytes);

                self.buffer = u64::from_le_bytes(buf);
                self.position += 8;
                self.bits_left = 64;
            }
            None => self.refill_slow()
        }
    }

    #[inline(never)]
    fn refill_slow(&mut self) {
        for byte in &self.src[self.position..] {
            self.buffer |= u64::from(*byte) << self.bits_left;
            self.bits_left += 8;
            self.position += 1;
        }
    }

    /// Read the next bit, or `None` when the input is exhausted
    #[inline(always)]
    pub fn get_bit(&mut self) -> Option<bool> {
        if self.bits_left == 0 {
            self.refill();

            if self.bits_left == 0 {
                return None;
            }
        }
        let bit = self.buffer & 1;

        self.buffer >>= 1;
        self.bits_left -= 1;

        Some(bit == 1)
    }

    /// Number of bits consumed from the input
    pub const fn bits_consumed(&self) -> usize {
        self.position * 8 - self.bits_left as usize
    }

    /// Number of whole bytes touched so far, i.e the read cursor
    /// rounded up to the next byte boundary
    pub const fn aligned_position(&self) -> usize {
        (self.bits_consumed() + 7) / 8
    }
}

#[cfg(test)]
mod tests {
    use super::{BitReader, BitWriter};

    #[test]
    fn bits_are_packed_lsb_first() {
        let mut writer = BitWriter::new();

        writer.put_bits(1, 1);
        writer.put_bits(2, 0b10);
        writer.put_bits(5, 0b11111);
        writer.put_bits(1, 1);

        assert_eq!(writer.bits_written(), 9);
        // trailing bits are zero padded
        assert_eq!(writer.finish(), vec![0b1111_1101, 0b0000_0001]);
    }

    #[test]
    fn reader_returns_written_bits() {
        let pattern: Vec<bool> = (0..1000).map(|i| (i * 31 + i / 7) % 3 == 0).collect();
        let mut writer = BitWriter::new();

        for bit in &pattern {
            writer.put_bits(1, u64::from(*bit));
        }
        let bytes = writer.finish();
        assert_eq!(bytes.len(), 125);

        let mut reader = BitReader::new(&bytes);

        for bit in &pattern {
            assert_eq!(reader.get_bit(), Some(*bit));
        }
        assert_eq!(reader.get_bit(), None);
    }

    #[test]
    fn long_codes_span_limbs() {
        // 100 bit code, alternating runs
        let mut code = [0_u64; 4];
        code[0] = 0xF0F0_F0F0_F0F0_F0F0;
        code[1] = 0x0000_000A_AAAA_AAAA;

        let mut writer = BitWriter::new();
        writer.put_code(&code, 100);
        let bytes = writer.finish();
        assert_eq!(bytes.len(), 13);

        let mut reader = BitReader::new(&bytes);

        for position in 0..100 {
            let expected = (code[position / 64] >> (position % 64)) & 1 == 1;
            assert_eq!(reader.get_bit(), Some(expected));
        }
        // the pad bits are zero
        for _ in 100..104 {
            assert_eq!(reader.get_bit(), Some(false));
        }
        assert_eq!(reader.get_bit(), None);
    }

    #[test]
    fn cursor_rounds_to_byte_boundary() {
        let bytes = [0xff_u8; 3];
        let mut reader = BitReader::new(&bytes);

        assert_eq!(reader.aligned_position(), 0);
        reader.get_bit();
        assert_eq!(reader.bits_consumed(), 1);
        assert_eq!(reader.aligned_position(), 1);

        for _ in 0..8 {
            reader.get_bit();
        }
        assert_eq!(reader.aligned_position(), 2);
    }

    #[test]
    fn empty_input_has_no_bits() {
        let mut reader = BitReader::new(&[]);
        assert_eq!(reader.get_bit(), None);
    }
}
