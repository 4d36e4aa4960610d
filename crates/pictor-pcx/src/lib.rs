/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! A PC Paintbrush (PCX) decoder
//!
//! PCX is a planar, run-length compressed raster format from the DOS era.
//! The decoder understands version 0 to 5 files with the following pixel
//! layouts
//!
//! | planes | bits per plane | decoded as        |
//! |--------|----------------|-------------------|
//! | 1      | 1              | 1-bit palette     |
//! | 1      | 4              | 4-bit palette     |
//! | 1      | 8              | 8-bit palette     |
//! | 3      | 8              | 24-bit RGB        |
//!
//! 1 and 4 bit images resolve their colors from the 16 entry palette
//! embedded in the header, 8 bit images from the 256 entry VGA palette
//! appended after the pixel data.
//!
//! The format is decode only, there is no encoder.
//!
//! # Example
//! ```no_run
//! use pictor_pcx::PcxDecoder;
//! use pictor_core::bytestream::PCursor;
//!
//! fn main() -> Result<(), pictor_pcx::PcxDecoderErrors> {
//!     let source = PCursor::new(b"NOT A REAL PCX");
//!     let mut decoder = PcxDecoder::new(source);
//!     let pixels = decoder.decode()?;
//!     println!("Decoded {} pixels", pixels.len());
//!     Ok(())
//! }
//! ```
#![no_std]
extern crate alloc;

pub use crate::decoder::{probe_pcx, PcxDecoder};
pub use crate::errors::PcxDecoderErrors;

mod decoder;
mod errors;
mod rle;
