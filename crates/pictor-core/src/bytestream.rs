/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Byte and bit level input/output routines
//!
//! This module exposes the readers and writers used by the
//! pictor decoders and encoders.
//!
//! Readers are anything that implements [`PByteReaderTrait`], the
//! library provides [`PCursor`] for in-memory sources and, with the
//! `std` feature, an implementation for [`BufReader`](std::io::BufReader)
//! which allows decoding directly from files.
//!
//! Writers are anything that implements [`PByteWriterTrait`], with
//! implementations provided for `&mut Vec<u8>`, `&mut [u8]` and, with the
//! `std` feature, [`BufWriter`](std::io::BufWriter).
mod bits;
mod cursor;
mod reader;
mod traits;
mod writer;

pub use bits::{BitReader, BitWriter};
pub use cursor::PCursor;
pub use reader::{PByteIoError, PReader, PSeekFrom};
pub use traits::{PByteReaderTrait, PByteWriterTrait};
pub use writer::PWriter;
