/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Encoding support for the netpbm formats
//!
//! The encoder mirrors the decoder variant for variant, ASCII graymaps
//! are written without rescaling and bitmaps re-apply the bit inversion
//! on the way out, so decoding an encoded image reproduces the storage
//! bit for bit.

use alloc::format;
use alloc::string::String;
use core::fmt::Write as _;

use pictor_core::bytestream::{BitWriter, PByteWriterTrait, PWriter};
use pictor_core::options::EncoderOptions;
use pictor_core::pixel::{PixelFormat, PixelStorage};

use crate::common::PnmKind;
use crate::errors::NetpbmEncoderErrors;

/// Comment line embedded in every written header
const CREATOR_COMMENT: &str = "# Created by pictor";

/// A netpbm encoder
///
/// The sub format is chosen by the pixel storage, the ASCII or binary
/// variant by [`EncoderOptions::binary_mode`].
///
/// | storage      | written as |
/// |--------------|------------|
/// | Grayscale1   | P1/P4      |
/// | Grayscale8   | P2/P5      |
/// | Grayscale16  | P2/P5      |
/// | Rgb24        | P3/P6      |
///
/// # Example
/// - Encode a 2x1 graymap as ASCII
/// ```
/// use pictor_core::options::EncoderOptions;
/// use pictor_core::pixel::PixelStorage;
/// use pictor_netpbm::NetpbmEncoder;
///
/// let pixels = PixelStorage::Grayscale8(vec![7, 200]);
/// let options = EncoderOptions::default()
///     .set_width(2)
///     .set_height(1)
///     .set_binary_mode(false);
///
/// let mut sink = vec![];
/// NetpbmEncoder::new(&pixels, options).encode(&mut sink).unwrap();
/// assert_eq!(sink, b"P2\n# Created by pictor\n2 1\n255\n7 200\n");
/// ```
pub struct NetpbmEncoder<'a> {
    pixels:  &'a PixelStorage,
    options: EncoderOptions
}

impl<'a> NetpbmEncoder<'a> {
    /// Create a new encoder which will encode the given pixels,
    /// with geometry and variant choice taken from `options`
    pub fn new(pixels: &'a PixelStorage, options: EncoderOptions) -> NetpbmEncoder<'a> {
        NetpbmEncoder { pixels, options }
    }

    /// The sub format the pixels will be written as, or `None` if the
    /// storage has no netpbm representation
    pub fn kind(&self) -> Option<PnmKind> {
        match self.pixels.format() {
            PixelFormat::Grayscale1 => Some(PnmKind::Bitmap),
            PixelFormat::Grayscale8 | PixelFormat::Grayscale16 => Some(PnmKind::Graymap),
            PixelFormat::Rgb24 => Some(PnmKind::Pixmap),
            _ => None
        }
    }

    /// Encode the pixels into `sink`, returning the number of bytes
    /// written
    pub fn encode<T: PByteWriterTrait>(&self, sink: T) -> Result<usize, NetpbmEncoderErrors> {
        let kind = match self.kind() {
            Some(kind) => kind,
            None => {
                return Err(NetpbmEncoderErrors::UnsupportedPixelFormat(
                    self.pixels.format()
                ));
            }
        };

        let width = self.options.width();
        let height = self.options.height();
        let binary = self.options.binary_mode();

        let expected = width
            .checked_mul(height)
            .ok_or(NetpbmEncoderErrors::Static("Dimensions overflow"))?;

        if expected != self.pixels.len() {
            return Err(NetpbmEncoderErrors::WrongInputSize(
                expected,
                self.pixels.len()
            ));
        }

        let mut stream = PWriter::new(sink);
        stream.reserve(self.output_size_hint(expected))?;

        // header: magic, creator comment, dimensions and, except for
        // bitmaps, the maximum sample value
        let magic = kind.magic(binary) as char;
        let mut header = format!("P{magic}\n{CREATOR_COMMENT}\n{width} {height}\n");

        match self.pixels.format() {
            PixelFormat::Grayscale16 => header.push_str("65535\n"),
            PixelFormat::Grayscale8 | PixelFormat::Rgb24 => header.push_str("255\n"),
            _ => {}
        }
        stream.write_all(header.as_bytes())?;

        if binary {
            self.encode_binary(&mut stream)?;
        } else {
            self.encode_ascii(&mut stream, width)?;
        }

        Ok(stream.bytes_written())
    }

    fn encode_binary<T: PByteWriterTrait>(
        &self, stream: &mut PWriter<T>
    ) -> Result<(), NetpbmEncoderErrors> {
        match self.pixels {
            PixelStorage::Grayscale1(values) => {
                // the file wants black as a set bit, invert on the way out.
                // rows are not realigned, the raster is one continuous
                // bit stream padded once at the end
                let mut bits = BitWriter::new(stream);
                for value in values {
                    bits.write_bit(value ^ 1)?;
                }
                bits.flush()?;
            }
            PixelStorage::Grayscale8(values) => {
                stream.write_all(values)?;
            }
            PixelStorage::Grayscale16(values) => {
                // netpbm stores wide samples in big endian
                for value in values {
                    stream.write_u16_be_err(*value)?;
                }
            }
            PixelStorage::Rgb24(pixels) => {
                for pixel in pixels {
                    stream.write_all(&[pixel.r, pixel.g, pixel.b])?;
                }
            }
            _ => unreachable!("unrepresentable storage rejected above")
        }
        Ok(())
    }

    fn encode_ascii<T: PByteWriterTrait>(
        &self, stream: &mut PWriter<T>, width: usize
    ) -> Result<(), NetpbmEncoderErrors> {
        // one image row per line, samples separated by single spaces
        // with no trailing space
        let mut line = String::new();

        match self.pixels {
            PixelStorage::Grayscale1(values) => {
                for row in values.chunks(width.max(1)) {
                    line.clear();
                    for (i, value) in row.iter().enumerate() {
                        if i > 0 {
                            line.push(' ');
                        }
                        // stored zero means white, written as the
                        // conventional black digit's complement
                        line.push(if *value == 0 { '1' } else { '0' });
                    }
                    line.push('\n');
                    stream.write_all(line.as_bytes())?;
                }
            }
            PixelStorage::Grayscale8(values) => {
                for row in values.chunks(width.max(1)) {
                    line.clear();
                    for (i, value) in row.iter().enumerate() {
                        if i > 0 {
                            line.push(' ');
                        }
                        let _ = write!(line, "{value}");
                    }
                    line.push('\n');
                    stream.write_all(line.as_bytes())?;
                }
            }
            PixelStorage::Grayscale16(values) => {
                for row in values.chunks(width.max(1)) {
                    line.clear();
                    for (i, value) in row.iter().enumerate() {
                        if i > 0 {
                            line.push(' ');
                        }
                        let _ = write!(line, "{value}");
                    }
                    line.push('\n');
                    stream.write_all(line.as_bytes())?;
                }
            }
            PixelStorage::Rgb24(pixels) => {
                for row in pixels.chunks(width.max(1)) {
                    line.clear();
                    for (i, pixel) in row.iter().enumerate() {
                        if i > 0 {
                            line.push(' ');
                        }
                        let _ = write!(line, "{} {} {}", pixel.r, pixel.g, pixel.b);
                    }
                    line.push('\n');
                    stream.write_all(line.as_bytes())?;
                }
            }
            _ => unreachable!("unrepresentable storage rejected above")
        }
        Ok(())
    }

    /// Rough output size, exact for the binary variants
    fn output_size_hint(&self, pixel_count: usize) -> usize {
        const HEADER_HINT: usize = 64;

        let body = if self.options.binary_mode() {
            match self.pixels.format() {
                PixelFormat::Grayscale1 => (pixel_count / 8) + 1,
                PixelFormat::Grayscale16 => pixel_count * 2,
                PixelFormat::Rgb24 => pixel_count * 3,
                _ => pixel_count
            }
        } else {
            // four characters per sample is a generous average
            pixel_count * self.pixels.format().channel_count() * 4
        };
        body + HEADER_HINT
    }
}
