/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Container header layout
//!
//! | offset | size | field                          |
//! |--------|------|--------------------------------|
//! | 0      | 2    | magic, `IN`                    |
//! | 2      | 2    | width, u16 little endian       |
//! | 4      | 2    | height, u16 little endian      |
//! | 6      | 12   | Y, U, V byte counts, u32 LE    |
//! | 18     | 768  | Y, U, V length tables          |
//!
//! The Y, U and V bit streams follow the header back to back.

use std::fmt::{Display, Formatter};
use std::ops::Range;

use log::trace;
use zune_core::options::DecoderOptions;

use crate::constants::{ALPHABET_SIZE, IN3_HEADER_SIZE, IN3_MAGIC, NUM_CHANNELS};
use crate::errors::In3Errors;
use crate::huffman::{min_length, LengthTable};

/// One of the three coded channels
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Channel {
    /// Luma
    Y,
    /// Blue difference chroma
    U,
    /// Red difference chroma
    V
}

impl Channel {
    /// Channels in the order they are stored
    pub const ALL: [Channel; NUM_CHANNELS] = [Channel::Y, Channel::U, Channel::V];

    pub const fn index(self) -> usize {
        match self {
            Channel::Y => 0,
            Channel::U => 1,
            Channel::V => 2
        }
    }
}

impl Display for Channel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Channel::Y => "Y",
            Channel::U => "U",
            Channel::V => "V"
        };
        write!(f, "{name}")
    }
}

/// Return true if `bytes` starts with the IN3 magic
pub fn probe_in3(bytes: &[u8]) -> bool {
    bytes.starts_with(&IN3_MAGIC)
}

/// Everything stored before the channel bit streams
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct In3Header {
    pub width:  u16,
    pub height: u16,
    /// Packed byte length of the Y, U and V streams
    pub sizes:  [u32; NUM_CHANNELS],
    /// Code length of every symbol of the Y, U and V channels
    pub tables: [LengthTable; NUM_CHANNELS]
}

impl In3Header {
    /// Number of symbols each channel holds
    pub const fn num_symbols(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Sum of the three stream sizes
    pub fn body_size(&self) -> usize {
        self.sizes.iter().map(|size| *size as usize).sum()
    }

    /// Size of the whole container this header describes
    pub fn container_size(&self) -> usize {
        IN3_HEADER_SIZE + self.body_size()
    }

    /// Byte range of a channel's stream inside the container
    pub fn channel_range(&self, channel: Channel) -> Range<usize> {
        let start = IN3_HEADER_SIZE
            + self.sizes[..channel.index()]
                .iter()
                .map(|size| *size as usize)
                .sum::<usize>();

        start..start + self.sizes[channel.index()] as usize
    }

    pub fn table(&self, channel: Channel) -> &LengthTable {
        &self.tables[channel.index()]
    }

    /// Serialize the header
    pub fn write(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&IN3_MAGIC);
        out.extend_from_slice(&self.width.to_le_bytes());
        out.extend_from_slice(&self.height.to_le_bytes());

        for size in self.sizes {
            out.extend_from_slice(&size.to_le_bytes());
        }
        for table in &self.tables {
            out.extend_from_slice(table);
        }
    }

    /// Read a header from the start of `data`
    ///
    /// Only the layout is checked here, see [`validate`](Self::validate)
    /// for consistency checks
    pub fn parse(data: &[u8]) -> Result<In3Header, In3Errors> {
        let mut magic = [0_u8; 2];
        let present = data.len().min(2);
        magic[..present].copy_from_slice(&data[..present]);

        if magic != IN3_MAGIC {
            return Err(In3Errors::WrongMagicBytes(magic));
        }
        if data.len() < IN3_HEADER_SIZE {
            return Err(In3Errors::InsufficientData(IN3_HEADER_SIZE, data.len()));
        }

        let u16_at = |pos: usize| u16::from_le_bytes([data[pos], data[pos + 1]]);
        let u32_at = |pos: usize| {
            u32::from_le_bytes([data[pos], data[pos + 1], data[pos + 2], data[pos + 3]])
        };

        let width = u16_at(2);
        let height = u16_at(4);
        let sizes = [u32_at(6), u32_at(10), u32_at(14)];

        let mut tables = [[0_u8; ALPHABET_SIZE]; NUM_CHANNELS];

        for (i, table) in tables.iter_mut().enumerate() {
            let start = 18 + i * ALPHABET_SIZE;
            table.copy_from_slice(&data[start..start + ALPHABET_SIZE]);
        }

        trace!("Image width: {width}");
        trace!("Image height: {height}");
        trace!("Channel sizes: Y={} U={} V={}", sizes[0], sizes[1], sizes[2]);

        Ok(In3Header {
            width,
            height,
            sizes,
            tables
        })
    }

    /// Check that the header fields agree with each other and with `options`
    pub fn validate(&self, options: &DecoderOptions) -> Result<(), In3Errors> {
        if self.width == 0 || self.height == 0 {
            return Err(In3Errors::InconsistentHeader(format!(
                "zero image dimension {}x{}",
                self.width, self.height
            )));
        }
        if usize::from(self.width) > options.get_max_width() {
            return Err(In3Errors::Generic(format!(
                "Width {} greater than max configured width {}",
                self.width,
                options.get_max_width()
            )));
        }
        if usize::from(self.height) > options.get_max_height() {
            return Err(In3Errors::Generic(format!(
                "Height {} greater than max configured height {}",
                self.height,
                options.get_max_height()
            )));
        }

        let symbols = self.num_symbols() as u64;

        for channel in Channel::ALL {
            let shortest = min_length(self.table(channel));

            if shortest == 0 {
                return Err(In3Errors::InvalidLengthTable(channel, "zero code length"));
            }
            // every symbol needs at least `shortest` bits
            let needed_bits = symbols * u64::from(shortest);
            let stored_bits = u64::from(self.sizes[channel.index()]) * 8;

            if stored_bits < needed_bits {
                return Err(In3Errors::InconsistentHeader(format!(
                    "channel {channel} declares {} bytes but {symbols} symbols need at least {needed_bits} bits",
                    self.sizes[channel.index()]
                )));
            }
        }
        Ok(())
    }
}
