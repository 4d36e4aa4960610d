/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Entry point for all supported codecs the library understands
//!
//! The set of formats is fixed at build time, dispatch is a plain
//! `match` over [`ImageFormat`] rather than trait objects.

use pictor_bmp::{probe_bmp, BmpDecoder};
use pictor_core::bytestream::{PByteReaderTrait, PByteWriterTrait, PReader};
use pictor_core::options::{DecoderOptions, EncoderOptions};
use pictor_netpbm::{probe_netpbm, NetpbmDecoder, NetpbmEncoder, PnmKind};
use pictor_pcx::{probe_pcx, PcxDecoder};

use crate::errors::ImageErrors;
use crate::image::Image;

/// All supported image formats
///
/// This is the constant identity tag of each codec, attached to every
/// decoded [`Image`] and usable without any I/O.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum ImageFormat {
    /// Windows Bitmap files
    Bmp,
    /// PC Paintbrush files
    Pcx,
    /// Portable Bitmap, 1-bit netpbm
    Pbm,
    /// Portable Graymap, gray netpbm
    Pgm,
    /// Portable Pixmap, color netpbm
    Ppm,
    /// Any unknown format
    Unknown
}

impl ImageFormat {
    /// Return true if the format has a decoder
    pub fn has_decoder(self) -> bool {
        !matches!(self, ImageFormat::Unknown)
    }

    /// Return true if the format has an encoder that can convert an
    /// image into that format
    ///
    /// BMP and PCX are read only in this library
    pub fn has_encoder(self) -> bool {
        matches!(
            self,
            ImageFormat::Pbm | ImageFormat::Pgm | ImageFormat::Ppm
        )
    }

    /// Decode an image of this format from `data`
    pub fn decode<T>(self, data: T) -> Result<Image, ImageErrors>
    where
        T: PByteReaderTrait
    {
        self.decode_with_options(data, DecoderOptions::default())
    }

    /// Decode an image of this format from `data` with custom options
    ///
    /// The stream is expected to be positioned at the start of the
    /// image, decoders re-read their headers from there.
    pub fn decode_with_options<T>(
        self, data: T, options: DecoderOptions
    ) -> Result<Image, ImageErrors>
    where
        T: PByteReaderTrait
    {
        match self {
            ImageFormat::Bmp => {
                let mut decoder = BmpDecoder::new_with_options(data, options);
                let pixels = decoder.decode()?;
                let (width, height) = decoder
                    .dimensions()
                    .ok_or(ImageErrors::GenericStatic("Decoder reported no dimensions"))?;

                Ok(Image::new(pixels, width, height, ImageFormat::Bmp))
            }
            ImageFormat::Pcx => {
                let mut decoder = PcxDecoder::new_with_options(data, options);
                let pixels = decoder.decode()?;
                let (width, height) = decoder
                    .dimensions()
                    .ok_or(ImageErrors::GenericStatic("Decoder reported no dimensions"))?;

                Ok(Image::new(pixels, width, height, ImageFormat::Pcx))
            }
            ImageFormat::Pbm | ImageFormat::Pgm | ImageFormat::Ppm => {
                let mut decoder = NetpbmDecoder::new_with_options(data, options);
                let pixels = decoder.decode()?;
                let (width, height) = decoder
                    .dimensions()
                    .ok_or(ImageErrors::GenericStatic("Decoder reported no dimensions"))?;

                // tag with what the stream actually was, the magic knows
                // better than the caller
                let format = match decoder.kind() {
                    Some(PnmKind::Bitmap) => ImageFormat::Pbm,
                    Some(PnmKind::Graymap) => ImageFormat::Pgm,
                    Some(PnmKind::Pixmap) => ImageFormat::Ppm,
                    None => self
                };

                Ok(Image::new(pixels, width, height, format))
            }
            ImageFormat::Unknown => Err(ImageErrors::ImageDecoderNotImplemented(self))
        }
    }

    /// Encode `image` into this format, writing the bytes to `sink`
    ///
    /// # Returns
    /// - The number of bytes written to the sink, or an error.
    ///   Read only formats return
    ///   [`ImageEncoderNotImplemented`](ImageErrors::ImageEncoderNotImplemented)
    pub(crate) fn encode<T: PByteWriterTrait>(
        self, image: &Image, options: EncoderOptions, sink: T
    ) -> Result<usize, ImageErrors> {
        match self {
            ImageFormat::Pbm | ImageFormat::Pgm | ImageFormat::Ppm => {
                let encoder = NetpbmEncoder::new(image.storage(), options);

                // the storage dictates the sub format, requesting a
                // mismatching one is an error rather than a conversion
                let actual = match encoder.kind() {
                    Some(PnmKind::Bitmap) => ImageFormat::Pbm,
                    Some(PnmKind::Graymap) => ImageFormat::Pgm,
                    Some(PnmKind::Pixmap) => ImageFormat::Ppm,
                    None => {
                        return Err(ImageErrors::Generic(format!(
                            "Pixel format {:?} has no netpbm representation",
                            image.pixel_format()
                        )));
                    }
                };
                if actual != self {
                    return Err(ImageErrors::Generic(format!(
                        "Image encodes as {actual:?}, not {self:?}"
                    )));
                }

                let written = encoder.encode(sink)?;
                Ok(written)
            }
            ImageFormat::Bmp | ImageFormat::Pcx => {
                Err(ImageErrors::ImageEncoderNotImplemented(self))
            }
            ImageFormat::Unknown => Err(ImageErrors::ImageEncoderNotImplemented(self))
        }
    }
}

/// Guess the format of an image based on its magic bytes
///
/// This peeks at the stream without consuming it, the returned source
/// is still positioned at the start of the image.
///
/// # Arguments
/// - `bytes`: The data source containing the image
///
/// # Returns
/// - `Some((format, bytes))`: The image format and the data source
/// - `None`: The format isn't known/understood by the library
pub fn guess_format<T>(bytes: T) -> Option<(ImageFormat, T)>
where
    T: PByteReaderTrait
{
    let mut reader = PReader::new(bytes);

    // two bytes of magic suffice for every codec here
    let magic: [u8; 2] = {
        let peeked = reader.peek_at(0, 2).ok()?;
        [peeked[0], peeked[1]]
    };

    if probe_bmp(&magic) {
        return Some((ImageFormat::Bmp, reader.consume()));
    }
    if probe_pcx(&magic) {
        return Some((ImageFormat::Pcx, reader.consume()));
    }
    if probe_netpbm(&magic) {
        let format = match magic[1] {
            b'1' | b'4' => ImageFormat::Pbm,
            b'2' | b'5' => ImageFormat::Pgm,
            _ => ImageFormat::Ppm
        };
        return Some((format, reader.consume()));
    }

    None
}

/// Merge user provided encoder options with the geometry of the image
/// being encoded
pub(crate) fn create_options_for_encoder(
    options: Option<EncoderOptions>, image: &Image
) -> EncoderOptions {
    // choose if we take options from pre-configured, or we create default options
    let start_options = options.unwrap_or_default();

    let (width, height) = image.dimensions();

    start_options.set_width(width).set_height(height)
}
