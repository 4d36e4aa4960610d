/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use pictor_core::bytestream::{PByteReaderTrait, PReader, PSeekFrom};
use pictor_core::log::trace;
use pictor_core::options::DecoderOptions;
use pictor_core::pixel::{PixelFormat, PixelStorage, Rgba};

use crate::errors::PcxDecoderErrors;
use crate::rle::RleDecoder;

/// Padding bytes at the end of the 128 byte header
const PCX_HEADER_PADDING: usize = 54;
/// Size of the appended VGA palette block, marker byte + 256 RGB triples
const VGA_PALETTE_BLOCK: i64 = 769;
/// Marker preceding the appended VGA palette
const VGA_PALETTE_MARKER: u8 = 0x0C;

/// Probe some bytes to see
/// if they consist of a PCX image
pub fn probe_pcx(bytes: &[u8]) -> bool {
    if let Some(magic_bytes) = bytes.get(0..2) {
        // one magic byte plus the version, of which only six exist
        return magic_bytes[0] == 0x0A && magic_bytes[1] <= 5;
    }
    false
}

/// A PCX decoder.
///
/// # Usage
/// Create one per stream, call [`decode_headers`](Self::decode_headers)
/// to get image information or [`decode`](Self::decode) to get pixels.
///
/// ```no_run
/// use pictor_pcx::PcxDecoder;
/// use pictor_core::bytestream::PCursor;
///
/// fn main() -> Result<(), pictor_pcx::PcxDecoderErrors> {
///     let source = PCursor::new(b"PCX");
///     let mut decoder = PcxDecoder::new(source);
///     decoder.decode_headers()?;
///     // after decoding headers the image metadata is known
///     let (w, h) = decoder.dimensions().unwrap();
///     println!("Image width: {}\t Image height: {}", w, h);
///     Ok(())
/// }
/// ```
pub struct PcxDecoder<T>
where
    T: PByteReaderTrait
{
    stream:          PReader<T>,
    options:         DecoderOptions,
    width:           usize,
    height:          usize,
    version:         u8,
    bits_per_plane:  u8,
    planes:          u8,
    stride:          usize,
    ega_palette:     [u8; 48],
    pix_fmt:         Option<PixelFormat>,
    decoded_headers: bool
}

impl<T> PcxDecoder<T>
where
    T: PByteReaderTrait
{
    /// Create a new PCX decoder that reads data from `data`
    pub fn new(data: T) -> PcxDecoder<T> {
        PcxDecoder::new_with_options(data, DecoderOptions::default())
    }

    /// Create a new decoder instance with specified options
    ///
    /// # Arguments
    ///
    /// * `data`: The source from which we will read data
    /// * `options`: Specialized options for this decoder
    pub fn new_with_options(data: T, options: DecoderOptions) -> PcxDecoder<T> {
        PcxDecoder {
            stream: PReader::new(data),
            options,
            width: 0,
            height: 0,
            version: 0,
            bits_per_plane: 0,
            planes: 0,
            stride: 0,
            ega_palette: [0; 48],
            pix_fmt: None,
            decoded_headers: false
        }
    }

    /// Decode the fixed 128 byte header and store the information
    /// in the decode context
    ///
    /// # Returns
    /// - `Ok(())`: Everything was okay during header parsing
    /// - `Err`: The error that occurred when decoding headers
    pub fn decode_headers(&mut self) -> Result<(), PcxDecoderErrors> {
        if self.decoded_headers {
            return Ok(());
        }

        if self.stream.get_u8_err()? != 0x0A {
            return Err(PcxDecoderErrors::InvalidMagicBytes);
        }

        self.version = self.stream.get_u8_err()?;
        if self.version > 5 {
            return Err(PcxDecoderErrors::GenericStatic("Unknown PCX version"));
        }

        let encoding = self.stream.get_u8_err()?;
        self.bits_per_plane = self.stream.get_u8_err()?;

        let xmin = self.stream.get_u16_le_err()?;
        let ymin = self.stream.get_u16_le_err()?;
        let xmax = self.stream.get_u16_le_err()?;
        let ymax = self.stream.get_u16_le_err()?;

        // resolution, unused for decoding
        let _hdpi = self.stream.get_u16_le_err()?;
        let _vdpi = self.stream.get_u16_le_err()?;

        self.ega_palette = self.stream.read_fixed_bytes_or_error::<48>()?;

        // reserved
        self.stream.skip(1)?;

        self.planes = self.stream.get_u8_err()?;
        self.stride = usize::from(self.stream.get_u16_le_err()?);

        // palette interpretation and screen size, unused
        let _palette_info = self.stream.get_u16_le_err()?;
        self.stream.skip(4)?;

        self.stream.skip(PCX_HEADER_PADDING)?;

        if self.planes > 3 {
            return Err(PcxDecoderErrors::UnsupportedPixelFormat(
                self.planes,
                self.bits_per_plane
            ));
        }

        let width = i64::from(xmax) - i64::from(xmin) + 1;
        let height = i64::from(ymax) - i64::from(ymin) + 1;

        if width <= 0 || height <= 0 {
            return Err(PcxDecoderErrors::GenericStatic(
                "Invalid window, max coordinate is smaller than min"
            ));
        }
        self.width = width as usize;
        self.height = height as usize;

        if self.width > self.options.max_width() {
            return Err(PcxDecoderErrors::TooLargeDimensions(
                "width",
                self.options.max_width(),
                self.width
            ));
        }
        if self.height > self.options.max_height() {
            return Err(PcxDecoderErrors::TooLargeDimensions(
                "height",
                self.options.max_height(),
                self.height
            ));
        }

        let pix_fmt = match (self.planes, self.bits_per_plane) {
            (1, 1) => PixelFormat::Indexed1,
            (1, 4) => PixelFormat::Indexed4,
            (1, 8) => PixelFormat::Indexed8,
            (3, 8) => PixelFormat::Rgb24,
            _ => {
                return Err(PcxDecoderErrors::UnsupportedPixelFormat(
                    self.planes,
                    self.bits_per_plane
                ));
            }
        };
        self.pix_fmt = Some(pix_fmt);

        trace!("Width: {}", self.width);
        trace!("Height: {}", self.height);
        trace!("Version: {}", self.version);
        trace!("Encoding: {}", encoding);
        trace!("Pixel format: {:?}", pix_fmt);

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

    /// Decode a PCX encoded image and return its pixels
    ///
    /// The returned storage variant matches
    /// [`pixel_format`](Self::pixel_format), indexed variants carry
    /// their resolved palette.
    pub fn decode(&mut self) -> Result<PixelStorage, PcxDecoderErrors> {
        self.decode_headers()?;

        let pix_fmt = match self.pix_fmt {
            Some(fmt) => fmt,
            None => return Err(PcxDecoderErrors::GenericStatic("Headers not decoded"))
        };

        let pixel_count = self
            .width
            .checked_mul(self.height)
            .ok_or(PcxDecoderErrors::OverFlowOccurred)?;

        let mut storage = PixelStorage::allocate(pix_fmt, pixel_count)?;

        self.decode_scanlines(&mut storage)?;
        self.resolve_palette(&mut storage)?;

        Ok(storage)
    }

    fn decode_scanlines(&mut self, storage: &mut PixelStorage) -> Result<(), PcxDecoderErrors> {
        let width = self.width;
        let planes = usize::from(self.planes);
        // decompressed bytes per scanline, all planes included
        let scanline_bytes = self
            .stride
            .checked_mul(planes)
            .ok_or(PcxDecoderErrors::OverFlowOccurred)?;

        // Some images pad odd widths with one dummy column per plane,
        // detectable from the stride. The dummy column participates in the
        // plane offset arithmetic but produces no pixels.
        let has_dummy_byte = (self.stride as i64) - (width as i64) == 1;
        let actual_width = width + usize::from(has_dummy_byte);

        let mut rle = RleDecoder::new();

        match storage {
            PixelStorage::Indexed1(indexed) => {
                for row in indexed.indices.chunks_exact_mut(width) {
                    let mut x = 0;
                    for _ in 0..scanline_bytes {
                        let byte = rle.read_byte(&mut self.stream)?;
                        // eight pixels per byte, most significant bit first,
                        // trailing bits past the width are dropped
                        for shift in (0..8).rev() {
                            if x < width {
                                row[x] = (byte >> shift) & 1;
                                x += 1;
                            }
                        }
                    }
                }
            }
            PixelStorage::Indexed4(indexed) => {
                for row in indexed.indices.chunks_exact_mut(width) {
                    let mut x = 0;
                    for _ in 0..scanline_bytes {
                        let byte = rle.read_byte(&mut self.stream)?;
                        // two pixels per byte, high nibble first
                        if x < width {
                            row[x] = byte >> 4;
                            x += 1;
                        }
                        if x < width {
                            row[x] = byte & 0x0F;
                            x += 1;
                        }
                    }
                }
            }
            PixelStorage::Indexed8(indexed) => {
                for row in indexed.indices.chunks_exact_mut(width) {
                    let mut x = 0;
                    for _ in 0..scanline_bytes {
                        let byte = rle.read_byte(&mut self.stream)?;
                        if x < width {
                            row[x] = byte;
                            x += 1;
                        }
                    }
                }
            }
            PixelStorage::Rgb24(pixels) => {
                for row in pixels.chunks_exact_mut(width) {
                    // planes are stored as contiguous sub-runs of the
                    // scanline, the offset selects the channel and the
                    // cursor re-walks the row once per plane
                    let mut x = 0;
                    for offset in 0..scanline_bytes {
                        let byte = rle.read_byte(&mut self.stream)?;

                        if has_dummy_byte && byte == 0x00 {
                            // dummy column padding, no pixel cursor advance
                            continue;
                        }
                        let plane = offset / actual_width;

                        match plane {
                            0 => row[x].r = byte,
                            1 => row[x].g = byte,
                            2 => row[x].b = byte,
                            // trailing stride bytes, discarded
                            _ => {}
                        }
                        x += 1;
                        if x >= width {
                            x = 0;
                        }
                    }
                }
            }
            _ => {
                return Err(PcxDecoderErrors::GenericStatic(
                    "Storage does not match a PCX pixel layout"
                ));
            }
        }

        rle.finish()
    }

    /// Resolve the palette of indexed images
    ///
    /// 1 and 4 bit images use the 16 entry palette embedded in the
    /// header. 8 bit images carry a richer 256 entry palette appended
    /// after the pixel data, marked by a leading `0x0C` byte.
    fn resolve_palette(&mut self, storage: &mut PixelStorage) -> Result<(), PcxDecoderErrors> {
        let pix_fmt = storage.format();

        if !pix_fmt.is_indexed() {
            return Ok(());
        }

        if let Some(palette) = storage.palette_mut() {
            let entries = palette.len().min(16);

            for (entry, rgb) in palette
                .iter_mut()
                .zip(self.ega_palette.chunks_exact(3))
                .take(entries)
            {
                *entry = Rgba {
                    r: rgb[0],
                    g: rgb[1],
                    b: rgb[2],
                    a: 255
                };
            }
        }

        if pix_fmt == PixelFormat::Indexed8 {
            // the block sits at the very end of the stream
            if self.stream.seek(PSeekFrom::End(-VGA_PALETTE_BLOCK)).is_err() {
                // stream too short to hold the block, the header palette stands
                trace!("No appended VGA palette, keeping the header palette");
                return Ok(());
            }

            if self.stream.get_u8_err()? != VGA_PALETTE_MARKER {
                return Err(PcxDecoderErrors::GenericStatic(
                    "Missing marker for the appended VGA palette"
                ));
            }

            if let Some(palette) = storage.palette_mut() {
                for entry in palette.iter_mut() {
                    let [r, g, b] = self.stream.read_fixed_bytes_or_error::<3>()?;
                    *entry = Rgba { r, g, b, a: 255 };
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::probe_pcx;

    #[test]
    fn probe_needs_magic_and_known_version() {
        assert!(probe_pcx(&[0x0A, 5, 1, 8]));
        assert!(probe_pcx(&[0x0A, 0]));
        assert!(!probe_pcx(&[0x0A, 6]));
        assert!(!probe_pcx(&[0x0B, 5]));
        assert!(!probe_pcx(&[0x0A]));
    }
}
