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
use pictor_core::pixel::{PixelAllocErrors, PixelFormat};

/// Netpbm errors that can occur during decoding
#[non_exhaustive]
pub enum NetpbmDecoderErrors {
    /// The file/bytes do not start with `P` followed by a known
    /// format digit
    InvalidMagicBytes,
    /// A numeric token in the header or an ASCII raster ran past
    /// the fixed token buffer
    TokenTooLong,
    /// A pixmap declaring more than 8 bits per sample, which the
    /// 24-bit storage cannot hold
    UnsupportedMaxValue(usize),
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

impl Debug for NetpbmDecoderErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidMagicBytes => {
                writeln!(f, "Invalid magic bytes, expected P followed by a digit from 1 to 6")
            }
            Self::TokenTooLong => {
                writeln!(f, "Numeric token longer than 16 bytes")
            }
            Self::UnsupportedMaxValue(value) => {
                writeln!(f, "Unsupported max sample value {value} for a pixmap")
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

impl From<PByteIoError> for NetpbmDecoderErrors {
    fn from(value: PByteIoError) -> Self {
        NetpbmDecoderErrors::IoErrors(value)
    }
}

impl From<PixelAllocErrors> for NetpbmDecoderErrors {
    fn from(value: PixelAllocErrors) -> Self {
        NetpbmDecoderErrors::AllocationErrors(value)
    }
}

/// Netpbm errors that can occur during encoding
#[non_exhaustive]
pub enum NetpbmEncoderErrors {
    /// The pixel storage has no netpbm representation,
    /// e.g the BGR layouts or palette images
    UnsupportedPixelFormat(PixelFormat),
    /// The input length does not match the configured dimensions,
    /// expected and found
    WrongInputSize(usize, usize),
    /// Generic message
    Static(&'static str),
    IoErrors(PByteIoError)
}

impl Debug for NetpbmEncoderErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::UnsupportedPixelFormat(format) => {
                writeln!(f, "Pixel format {format:?} cannot be written as netpbm")
            }
            Self::WrongInputSize(expected, found) => {
                writeln!(
                    f,
                    "Wrong input size, expected {expected} pixels but found {found}"
                )
            }
            Self::Static(message) => {
                writeln!(f, "{}", message)
            }
            Self::IoErrors(err) => {
                writeln!(f, "{:?}", err)
            }
        }
    }
}

impl From<PByteIoError> for NetpbmEncoderErrors {
    fn from(value: PByteIoError) -> Self {
        NetpbmEncoderErrors::IoErrors(value)
    }
}
