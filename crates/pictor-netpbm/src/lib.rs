/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! A Netpbm (PBM/PGM/PPM) decoder and encoder
//!
//! The netpbm family is three formats behind six magic codes, each
//! format existing in an ASCII and a binary variant
//!
//! | magic | format                 | raster |
//! |-------|------------------------|--------|
//! | P1    | bitmap, 1 bit          | ASCII  |
//! | P2    | graymap, 8/16 bit      | ASCII  |
//! | P3    | pixmap, 24 bit RGB     | ASCII  |
//! | P4    | bitmap, 1 bit          | binary |
//! | P5    | graymap, 8/16 bit      | binary |
//! | P6    | pixmap, 24 bit RGB     | binary |
//!
//! One parameterized implementation serves all six, both for decoding
//! and encoding.
//!
//! A word on bitmaps: the formats encode black as a set bit (or an
//! ASCII `1`), while the in-memory representation stores the logical
//! complement. Both the decoder and the encoder apply the inversion, so
//! files round trip unchanged.
//!
//! # Example
//! - Decode an ASCII graymap
//! ```
//! use pictor_core::bytestream::PCursor;
//! use pictor_core::pixel::PixelStorage;
//! use pictor_netpbm::NetpbmDecoder;
//!
//! let mut decoder = NetpbmDecoder::new(PCursor::new(b"P2\n2 1\n255\n7 200\n"));
//! let pixels = decoder.decode().unwrap();
//! assert!(matches!(pixels, PixelStorage::Grayscale8(v) if v == [7, 200]));
//! ```
#![no_std]
extern crate alloc;

pub use crate::common::PnmKind;
pub use crate::decoder::{probe_netpbm, NetpbmDecoder};
pub use crate::encoder::NetpbmEncoder;
pub use crate::errors::{NetpbmDecoderErrors, NetpbmEncoderErrors};

mod common;
mod decoder;
mod encoder;
mod errors;
