/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

// The BMP format grew by accretion, the useful references are
//
// - http://www.fileformat.info/format/bmp/egff.htm
// - http://fileformats.archiveteam.org/wiki/BMP
// - https://en.wikipedia.org/wiki/BMP_file_format
//
// The 14 byte file header is constant across all revisions, the info
// header that follows it comes in several sizes of which we understand
// three:
//
// - 40 bytes, the Windows 3.1 shape. Width, height, bit count,
//   compression, palette geometry.
// - 108 bytes, WinBMPv4. Adds RGBA channel bitmasks, a colorspace tag,
//   CIE endpoints and gamma values.
// - 124 bytes, WinBMPv5. Adds a rendering intent and an ICC profile
//   offset and size after the v4 fields.
//
// The revisions share their leading fields, so selecting the shape only
// needs the size field which conveniently comes first.

use pictor_core::bytestream::{PByteReaderTrait, PReader};
use pictor_core::log::{trace, warn};
use pictor_core::options::DecoderOptions;
use pictor_core::pixel::{Bgr, Bgra, PixelFormat, PixelStorage};

use crate::common::{BmpCompression, BmpHeaderKind};
use crate::errors::BmpDecoderErrors;

/// Probe some bytes to see
/// if they consist of a BMP image
pub fn probe_bmp(bytes: &[u8]) -> bool {
    if let Some(magic_bytes) = bytes.get(0..2) {
        return magic_bytes == b"BM";
    }
    false
}

/// A BMP decoder.
///
/// # Usage
/// The decoder can be used to read image information and to get the
/// pixels out of a valid bmp image.
///
/// ## Extracting image metadata
/// - use `decode_headers` + utility functions to get information
/// ```no_run
/// use pictor_bmp::BmpDecoder;
/// use pictor_core::bytestream::PCursor;
///
/// fn main() -> Result<(), pictor_bmp::BmpDecoderErrors> {
///     let source = PCursor::new(b"BMP");
///     let mut decoder = BmpDecoder::new(source);
///     decoder.decode_headers()?;
///     // after decoding headers we can safely access the image metadata,
///     // unwrap won't panic
///     let (w, h) = decoder.dimensions().unwrap();
///     println!("Image width: {}\t Image height: {}", w, h);
///     println!("Pixel format: {:?}", decoder.pixel_format().unwrap());
///
///     Ok(())
/// }
/// ```
///
/// ## Just getting the pixels
///
/// ```no_run
/// use pictor_bmp::BmpDecoder;
/// use pictor_core::bytestream::PCursor;
///
/// fn main() -> Result<(), pictor_bmp::BmpDecoderErrors> {
///     let source = PCursor::new(b"BMP");
///     let mut decoder = BmpDecoder::new(source);
///     let pixels = decoder.decode()?;
///     println!("Pixel count: {}", pixels.len());
///     Ok(())
/// }
/// ```
pub struct BmpDecoder<T>
where
    T: PByteReaderTrait
{
    stream:           PReader<T>,
    options:          DecoderOptions,
    width:            usize,
    height:           usize,
    depth:            u16,
    compression:      BmpCompression,
    kind:             Option<BmpHeaderKind>,
    data_offset:      u32,
    rgb_bitfields:    [u32; 4],
    /// V5 only, byte region of the embedded ICC profile.
    /// Stored, never interpreted.
    icc_profile:      Option<(u32, u32)>,
    rendering_intent: u32,
    pix_fmt:          Option<PixelFormat>,
    decoded_headers:  bool
}

impl<T> BmpDecoder<T>
where
    T: PByteReaderTrait
{
    /// Create a new bmp decoder that reads data from `data`
    ///
    /// # Arguments
    /// - `data`: The source from which we will read bytes
    ///
    /// # Returns
    /// - A BMP decoder instance
    pub fn new(data: T) -> BmpDecoder<T> {
        BmpDecoder::new_with_options(data, DecoderOptions::default())
    }

    /// Create a new decoder instance with specified options
    ///
    /// # Arguments
    ///
    /// * `data`: The source from which we will read data
    /// * `options`: Specialized options for this decoder
    pub fn new_with_options(data: T, options: DecoderOptions) -> BmpDecoder<T> {
        BmpDecoder {
            stream: PReader::new(data),
            options,
            width: 0,
            height: 0,
            depth: 0,
            compression: BmpCompression::RGB,
            kind: None,
            data_offset: 0,
            rgb_bitfields: [0; 4],
            icc_profile: None,
            rendering_intent: 0,
            pix_fmt: None,
            decoded_headers: false
        }
    }

    /// Decode the file and info headers and store the information
    /// in the decode context
    ///
    /// After calling this, most information fields will be filled
    /// except the actual decoded bytes
    pub fn decode_headers(&mut self) -> Result<(), BmpDecoderErrors> {
        if self.decoded_headers {
            return Ok(());
        }

        if self.stream.get_u8_err()? != b'B' || self.stream.get_u8_err()? != b'M' {
            return Err(BmpDecoderErrors::InvalidMagicBytes);
        }
        let file_size = self.stream.get_u32_le_err()?;
        // two reserved shorts
        self.stream.skip(4)?;
        self.data_offset = self.stream.get_u32_le_err()?;

        trace!("File size: {}", file_size);
        trace!("Pixel data offset: {}", self.data_offset);

        // The info header size discriminates between the header
        // revisions. Peek it, pick the shape, then consume the header
        // from its start so every field read below stays positional.
        let size_bytes = self.stream.peek_at(0, 4)?;
        let ihsize = u32::from_le_bytes([size_bytes[0], size_bytes[1], size_bytes[2], size_bytes[3]]);

        let kind = match BmpHeaderKind::from_header_size(ihsize) {
            Some(kind) => kind,
            None => return Err(BmpDecoderErrors::UnknownInfoHeaderSize(ihsize))
        };
        self.kind = Some(kind);

        // consume the size field we peeked at
        self.stream.skip(4)?;

        let width = self.stream.get_u32_le_err()? as i32;
        let height = self.stream.get_u32_le_err()? as i32;

        // color planes, always one
        if self.stream.get_u16_le_err()? != 1 {
            return Err(BmpDecoderErrors::GenericStatic("Invalid BMP header"));
        }
        self.depth = self.stream.get_u16_le_err()?;

        self.compression = match BmpCompression::from_u32(self.stream.get_u32_le_err()?) {
            Some(c) => c,
            None => {
                return Err(BmpDecoderErrors::GenericStatic(
                    "Unknown BMP compression scheme"
                ));
            }
        };
        // image size, resolution and palette geometry, unused
        self.stream.skip(20)?;

        if matches!(kind, BmpHeaderKind::V4 | BmpHeaderKind::V5) {
            self.rgb_bitfields[0] = self.stream.get_u32_le_err()?;
            self.rgb_bitfields[1] = self.stream.get_u32_le_err()?;
            self.rgb_bitfields[2] = self.stream.get_u32_le_err()?;
            self.rgb_bitfields[3] = self.stream.get_u32_le_err()?;

            let colorspace_tag = self.stream.get_u32_le_err()?;
            trace!("Bitfields: {:?}", self.rgb_bitfields);
            trace!("Colorspace tag: {:#x}", colorspace_tag);

            // CIE endpoints and gamma, stored in the file but of no
            // consequence to pixel decoding
            self.stream.skip(36 + 12)?;
        }
        if kind == BmpHeaderKind::V5 {
            self.rendering_intent = self.stream.get_u32_le_err()?;

            let profile_offset = self.stream.get_u32_le_err()?;
            let profile_size = self.stream.get_u32_le_err()?;
            self.icc_profile = Some((profile_offset, profile_size));

            trace!("Rendering intent: {}", self.rendering_intent);
            trace!("ICC profile region: {:?}", self.icc_profile);

            // reserved
            self.stream.skip(4)?;
        }

        // a data offset pointing inside the headers is tolerated
        // unless strict mode asks us to reject it
        if u64::from(self.data_offset) < 14 + u64::from(ihsize) {
            let msg = "Pixel data offset points inside the headers";
            if self.options.strict_mode() {
                return Err(BmpDecoderErrors::GenericStatic(msg));
            }
            warn!("{}", msg);
        }

        if width <= 0 {
            return Err(BmpDecoderErrors::GenericStatic(
                "Width is zero or negative, invalid image"
            ));
        }
        if height <= 0 {
            // top-down files declare a negative height, this decoder only
            // handles the conventional bottom-up layout
            return Err(BmpDecoderErrors::GenericStatic(
                "Height is zero or negative, invalid image"
            ));
        }
        self.width = width as usize;
        self.height = height as usize;

        if self.width > self.options.max_width() {
            return Err(BmpDecoderErrors::TooLargeDimensions(
                "width",
                self.options.max_width(),
                self.width
            ));
        }
        if self.height > self.options.max_height() {
            return Err(BmpDecoderErrors::TooLargeDimensions(
                "height",
                self.options.max_height(),
                self.height
            ));
        }

        trace!("Width: {}", self.width);
        trace!("Height: {}", self.height);
        trace!("Depth: {}", self.depth);
        trace!("Compression: {:?}", self.compression);

        if kind == BmpHeaderKind::Windows31 {
            // the paletted and RLE layouts these headers describe are
            // not implemented, only V4/V5 headers reach pixel decode
            return Err(BmpDecoderErrors::UnsupportedPixelFormat(
                self.depth,
                self.compression
            ));
        }

        self.pix_fmt = Some(match (self.depth, self.compression) {
            (32, BmpCompression::BITFIELDS) => PixelFormat::Bgra32,
            (24, BmpCompression::RGB) => PixelFormat::Bgr24,
            _ => {
                return Err(BmpDecoderErrors::UnsupportedPixelFormat(
                    self.depth,
                    self.compression
                ));
            }
        });

        self.decoded_headers = true;

        Ok(())
    }

    /// Get the dimensions of the image
    ///
    /// This is a tuple of width,height
    ///
    /// # Returns
    /// - `Some((width,height))` - The image dimensions
    /// - `None`: Indicates that the image headers weren't decoded
    ///    or an error occurred when decoding them
    pub const fn dimensions(&self) -> Option<(usize, usize)> {
        if !self.decoded_headers {
            return None;
        }
        Some((self.width, self.height))
    }

    /// Get the pixel format the image decodes into, or `None`
    /// if the headers weren't decoded
    pub const fn pixel_format(&self) -> Option<PixelFormat> {
        self.pix_fmt
    }

    /// Decode an image and return its pixels, or an error if decoding
    /// could not be completed
    pub fn decode(&mut self) -> Result<PixelStorage, BmpDecoderErrors> {
        self.decode_headers()?;

        let pix_fmt = match self.pix_fmt {
            Some(fmt) => fmt,
            None => return Err(BmpDecoderErrors::GenericStatic("Headers not decoded"))
        };

        let pixel_count = self
            .width
            .checked_mul(self.height)
            .ok_or(BmpDecoderErrors::OverFlowOccurred)?;

        let mut storage = PixelStorage::allocate(pix_fmt, pixel_count)?;

        // the file header told us where the pixel array starts
        self.stream.set_position(self.data_offset as usize)?;

        // BMP stores rows bottom to top, the first scanline in the file
        // is the last row of the image
        //   ┌───────────────┐
        //   │               │
        //   │               │
        //   │[x,1]          │
        //   └───────────────┘
        // iterating the output rows in reverse lets us read the input
        // in file order without a flip pass
        match &mut storage {
            PixelStorage::Bgr24(pixels) => {
                for row in pixels.rchunks_exact_mut(self.width) {
                    for pixel in row.iter_mut() {
                        let [b, g, r] = self.stream.read_fixed_bytes_or_error::<3>()?;
                        *pixel = Bgr { b, g, r };
                    }
                }
            }
            PixelStorage::Bgra32(pixels) => {
                for row in pixels.rchunks_exact_mut(self.width) {
                    for pixel in row.iter_mut() {
                        let [b, g, r, a] = self.stream.read_fixed_bytes_or_error::<4>()?;
                        *pixel = Bgra { b, g, r, a };
                    }
                }
            }
            _ => {
                return Err(BmpDecoderErrors::GenericStatic(
                    "Storage does not match a BMP pixel layout"
                ));
            }
        }

        Ok(storage)
    }
}

#[cfg(test)]
mod tests {
    use super::probe_bmp;

    #[test]
    fn probe_checks_magic_only() {
        assert!(probe_bmp(b"BMrest-does-not-matter"));
        assert!(!probe_bmp(b"PM"));
        assert!(!probe_bmp(b"B"));
    }
}
