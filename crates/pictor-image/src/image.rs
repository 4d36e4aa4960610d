/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use pictor_core::bytestream::{PByteReaderTrait, PByteWriterTrait};
use pictor_core::options::{DecoderOptions, EncoderOptions};
use pictor_core::pixel::{PixelFormat, PixelStorage};

use crate::codecs::{create_options_for_encoder, guess_format, ImageFormat};
use crate::errors::ImageErrors;

/// A decoded image
///
/// Owns the typed pixel storage plus the metadata the decode
/// established, the dimensions and the container the pixels came from.
pub struct Image {
    storage: PixelStorage,
    width:   usize,
    height:  usize,
    format:  ImageFormat
}

impl Image {
    pub(crate) fn new(storage: PixelStorage, width: usize, height: usize, format: ImageFormat) -> Image {
        Image {
            storage,
            width,
            height,
            format
        }
    }

    /// Width and height of the image
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// The container format the image was decoded from
    pub const fn format(&self) -> ImageFormat {
        self.format
    }

    /// The in-memory layout of the pixels
    pub fn pixel_format(&self) -> PixelFormat {
        self.storage.format()
    }

    /// Borrow the pixel storage
    pub const fn storage(&self) -> &PixelStorage {
        &self.storage
    }

    /// Consume the image returning its pixel storage
    pub fn into_storage(self) -> PixelStorage {
        self.storage
    }

    /// Read an image from a source, guessing its format from the
    /// magic bytes
    ///
    /// # Example
    /// ```
    /// use pictor_core::bytestream::PCursor;
    /// use pictor_image::Image;
    ///
    /// let image = Image::read(PCursor::new(b"P1\n1 1\n1\n")).unwrap();
    /// assert_eq!(image.dimensions(), (1, 1));
    /// ```
    pub fn read<T>(source: T) -> Result<Image, ImageErrors>
    where
        T: PByteReaderTrait
    {
        Image::read_with_options(source, DecoderOptions::default())
    }

    /// Read an image from a source with custom decoder options
    pub fn read_with_options<T>(source: T, options: DecoderOptions) -> Result<Image, ImageErrors>
    where
        T: PByteReaderTrait
    {
        let (format, source) = match guess_format(source) {
            Some(found) => found,
            None => return Err(ImageErrors::ImageDecoderNotImplemented(ImageFormat::Unknown))
        };
        // the guess only peeked, the source is still at the start of
        // the image where the codec expects it
        format.decode_with_options(source, options)
    }

    /// Encode the image into `format`, writing the bytes to `sink`
    ///
    /// # Returns
    /// - The number of bytes written to sink or an error if one occurred
    pub fn encode<T: PByteWriterTrait>(
        &self, format: ImageFormat, sink: T
    ) -> Result<usize, ImageErrors> {
        self.encode_with_options(format, None, sink)
    }

    /// Encode the image into `format` with custom encoder options
    ///
    /// The width and height of the options are overwritten with the
    /// image's own geometry, the remaining choices (e.g the ASCII or
    /// binary netpbm variant) are taken as given.
    pub fn encode_with_options<T: PByteWriterTrait>(
        &self, format: ImageFormat, options: Option<EncoderOptions>, sink: T
    ) -> Result<usize, ImageErrors> {
        let options = create_options_for_encoder(options, self);
        format.encode(self, options, sink)
    }
}
