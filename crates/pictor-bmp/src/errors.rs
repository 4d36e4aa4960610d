/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::string::String;
use core::fmt::{Debug, Formatter};

use pictor_core::bytestream::PByteIoError;
use pictor_core::pixel::PixelAllocErrors;

use crate::common::BmpCompression;

/// BMP errors that can occur during decoding
#[non_exhaustive]
pub enum BmpDecoderErrors {
    /// The file/bytes do not start with `BM`
    InvalidMagicBytes,
    /// An info header size this decoder does not know about,
    /// e.g the OS/2 sizes
    UnknownInfoHeaderSize(u32),
    /// A structurally valid header describing a bit depth and
    /// compression pairing this decoder does not implement
    UnsupportedPixelFormat(u16, BmpCompression),
    /// Too large dimensions for a given width or
    /// height
    TooLargeDimensions(&'static str, usize, usize),
    /// Generic message
    GenericStatic(&'static str),
    /// Generic allocated message
    Generic(String),
    /// A calculation overflowed
    OverFlowOccurred,
    /// Pixel storage could not be allocated
    AllocationErrors(PixelAllocErrors),
    IoErrors(PByteIoError)
}

impl Debug for BmpDecoderErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidMagicBytes => {
                writeln!(f, "Invalid magic bytes, file does not start with BM")
            }
            Self::UnknownInfoHeaderSize(size) => {
                writeln!(f, "Unknown info header size {size}")
            }
            Self::UnsupportedPixelFormat(depth, compression) => {
                writeln!(
                    f,
                    "Unsupported pixel layout, depth {depth} with {compression:?} compression"
                )
            }
            Self::TooLargeDimensions(dimension, expected, found) => {
                writeln!(
                    f,
                    "Too large dimensions for {dimension} , {found} exceeds {expected}"
                )
            }
            Self::GenericStatic(message) => {
                writeln!(f, "{}", message)
            }
            Self::Generic(message) => {
                writeln!(f, "{}", message)
            }
            Self::OverFlowOccurred => {
                writeln!(f, "Overflow occurred")
            }
            Self::AllocationErrors(err) => {
                writeln!(f, "{:?}", err)
            }
            Self::IoErrors(err) => {
                writeln!(f, "{:?}", err)
            }
        }
    }
}

impl From<PByteIoError> for BmpDecoderErrors {
    fn from(value: PByteIoError) -> Self {
        BmpDecoderErrors::IoErrors(value)
    }
}

impl From<PixelAllocErrors> for BmpDecoderErrors {
    fn from(value: PixelAllocErrors) -> Self {
        BmpDecoderErrors::AllocationErrors(value)
    }
}
