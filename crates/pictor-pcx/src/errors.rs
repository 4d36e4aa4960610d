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

/// PCX errors that can occur during decoding
#[non_exhaustive]
pub enum PcxDecoderErrors {
    /// The file/bytes do not start with `0x0A`
    InvalidMagicBytes,
    /// A structurally valid header describing a plane/depth
    /// combination this decoder does not implement
    UnsupportedPixelFormat(u8, u8),
    /// Too large dimensions for a given width or
    /// height
    TooLargeDimensions(&'static str, usize, usize),
    /// The compressed stream ended while a run was still
    /// emitting bytes
    PendingRleRun,
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

impl Debug for PcxDecoderErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidMagicBytes => {
                writeln!(f, "Invalid magic bytes, file does not start with 0x0A")
            }
            Self::UnsupportedPixelFormat(planes, bpp) => {
                writeln!(
                    f,
                    "Unsupported pixel layout, {planes} planes at {bpp} bits per plane"
                )
            }
            Self::TooLargeDimensions(dimension, expected, found) => {
                writeln!(
                    f,
                    "Too large dimensions for {dimension} , {found} exceeds {expected}"
                )
            }
            Self::PendingRleRun => {
                writeln!(f, "Run length data overruns the image, a run was still pending at end of decode")
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

impl From<PByteIoError> for PcxDecoderErrors {
    fn from(value: PByteIoError) -> Self {
        PcxDecoderErrors::IoErrors(value)
    }
}

impl From<PixelAllocErrors> for PcxDecoderErrors {
    fn from(value: PixelAllocErrors) -> Self {
        PcxDecoderErrors::AllocationErrors(value)
    }
}
