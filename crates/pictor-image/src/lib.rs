/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! The image facade over the pictor codec crates
//!
//! This crate wires the individual format crates together: it sniffs
//! magic bytes, routes a stream to the right decoder and exposes the
//! result as a single [`Image`] type. Encoding is available for the
//! formats that have encoders (the netpbm family), the read-only
//! formats report [`ImageEncoderNotImplemented`](errors::ImageErrors).
//!
//! # Example
//! ```
//! use pictor_core::bytestream::PCursor;
//! use pictor_image::Image;
//!
//! let image = Image::read(PCursor::new(b"P2\n1 1\n255\n42\n")).unwrap();
//! assert_eq!(image.dimensions(), (1, 1));
//! ```
pub mod codecs;
pub mod errors;
pub mod image;

pub use crate::codecs::{guess_format, ImageFormat};
pub use crate::errors::ImageErrors;
pub use crate::image::Image;
