/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

/// `IN`, the first two bytes of every container
pub const IN3_MAGIC: [u8; 2] = *b"IN";

/// Number of distinct symbols a channel can carry
pub const ALPHABET_SIZE: usize = 256;

/// Number of coded channels, Y, U and V
pub const NUM_CHANNELS: usize = 3;

/// magic + width + height + three byte counts + three length tables
pub const IN3_HEADER_SIZE: usize = 2 + 2 + 2 + 4 * NUM_CHANNELS + ALPHABET_SIZE * NUM_CHANNELS;

/// Longest code word a length table can describe
pub const MAX_CODE_LENGTH: usize = 255;
