/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Core routines shared by all pictor codecs
//!
//! This crate provides a set of core routines shared
//! by the decoders and encoders under the `pictor` umbrella
//!
//! It currently contains
//!
//! - A bytestream reader and writer with endian aware reads and writes
//! - MSB-first bit level readers and writers
//! - The pixel format and pixel storage model codecs decode into
//! - Image decoder and encoder options
//!
//! This library is `#[no_std]` with the `alloc` crate needed for defining `Vec`
//! which we need for storing decoded bytes.
//!
//! # Features
//!  - `std`: Enables reading from `BufReader` and writing to `BufWriter` sinks.
//!
//!  - `log`: Forwards the logging statements of the codecs to the `log` crate,
//!     without it they compile to nothing
//!
//!  - `serde`: Enables serializing of some of the data structures
//!     present in the crate
//!
#![cfg_attr(not(feature = "std"), no_std)]
extern crate alloc;

pub mod bytestream;
pub mod log;
pub mod options;
pub mod pixel;
mod serde;
