/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::fmt::{Debug, Formatter};

use pictor_bmp::BmpDecoderErrors;
use pictor_core::bytestream::PByteIoError;
use pictor_netpbm::{NetpbmDecoderErrors, NetpbmEncoderErrors};
use pictor_pcx::PcxDecoderErrors;

use crate::codecs::ImageFormat;

/// All errors the image facade can surface
///
/// Codec errors are wrapped per crate so callers can still tell
/// malformed data apart from unsupported-but-valid data.
#[non_exhaustive]
pub enum ImageErrors {
    /// An error from the BMP decoder
    BmpDecodeErrors(BmpDecoderErrors),
    /// An error from the PCX decoder
    PcxDecodeErrors(PcxDecoderErrors),
    /// An error from the netpbm decoder
    NetpbmDecodeErrors(NetpbmDecoderErrors),
    /// An error from the netpbm encoder
    NetpbmEncodeErrors(NetpbmEncoderErrors),
    /// No decoder exists for the format
    ImageDecoderNotImplemented(ImageFormat),
    /// The format is read only, it has no encoder
    ImageEncoderNotImplemented(ImageFormat),
    /// Generic message
    GenericStatic(&'static str),
    /// Generic allocated message
    Generic(String),
    IoErrors(PByteIoError)
}

impl Debug for ImageErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BmpDecodeErrors(err) => {
                writeln!(f, "Bmp decoding failed: {err:?}")
            }
            Self::PcxDecodeErrors(err) => {
                writeln!(f, "Pcx decoding failed: {err:?}")
            }
            Self::NetpbmDecodeErrors(err) => {
                writeln!(f, "Netpbm decoding failed: {err:?}")
            }
            Self::NetpbmEncodeErrors(err) => {
                writeln!(f, "Netpbm encoding failed: {err:?}")
            }
            Self::ImageDecoderNotImplemented(format) => {
                writeln!(f, "No decoder implemented for format {format:?}")
            }
            Self::ImageEncoderNotImplemented(format) => {
                writeln!(f, "No encoder implemented for format {format:?}")
            }
            Self::GenericStatic(message) => {
                writeln!(f, "{}", message)
            }
            Self::Generic(message) => {
                writeln!(f, "{}", message)
            }
            Self::IoErrors(err) => {
                writeln!(f, "{:?}", err)
            }
        }
    }
}

impl From<BmpDecoderErrors> for ImageErrors {
    fn from(value: BmpDecoderErrors) -> Self {
        ImageErrors::BmpDecodeErrors(value)
    }
}

impl From<PcxDecoderErrors> for ImageErrors {
    fn from(value: PcxDecoderErrors) -> Self {
        ImageErrors::PcxDecodeErrors(value)
    }
}

impl From<NetpbmDecoderErrors> for ImageErrors {
    fn from(value: NetpbmDecoderErrors) -> Self {
        ImageErrors::NetpbmDecodeErrors(value)
    }
}

impl From<NetpbmEncoderErrors> for ImageErrors {
    fn from(value: NetpbmEncoderErrors) -> Self {
        ImageErrors::NetpbmEncodeErrors(value)
    }
}

impl From<PByteIoError> for ImageErrors {
    fn from(value: PByteIoError) -> Self {
        ImageErrors::IoErrors(value)
    }
}
