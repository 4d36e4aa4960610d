/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::format;

use pictor_core::bytestream::{BitReader, PByteReaderTrait, PReader};
use pictor_core::log::{trace, warn};
use pictor_core::options::DecoderOptions;
use pictor_core::pixel::{PixelFormat, PixelStorage, Rgb};

use crate::common::PnmKind;
use crate::errors::NetpbmDecoderErrors;

/// Upper bound on the length of a numeric header/raster token
const MAX_TOKEN_LENGTH: usize = 16;

/// The whitespace class of the netpbm grammar
const fn is_pnm_whitespace(byte: u8) -> bool {
    matches!(byte, b'\n' | b'\r' | b' ' | b'\t')
}

/// Probe some bytes to see
/// if they consist of a netpbm image
pub fn probe_netpbm(bytes: &[u8]) -> bool {
    if let Some(magic_bytes) = bytes.get(0..2) {
        return magic_bytes[0] == b'P' && PnmKind::from_magic(magic_bytes[1]).is_some();
    }
    false
}

/// Skip whitespace and comments
/// until we hit a character that is neither, or reach eof
///
/// A `#` begins a comment which runs to the end of its line and is
/// discarded, even between header tokens
fn skip_whitespace<T: PByteReaderTrait>(
    stream: &mut PReader<T>
) -> Result<(), NetpbmDecoderErrors> {
    while !stream.eof()? {
        let byte = stream.get_u8();

        if byte == b'#' {
            // comment, discard the whole line
            while !stream.eof()? {
                let byte = stream.get_u8();
                if byte == b'\n' || byte == b'\r' {
                    break;
                }
            }
        } else if !is_pnm_whitespace(byte) {
            // go back one step, we hit something that is not a space
            stream.rewind(1)?;
            break;
        }
    }
    Ok(())
}

/// Read one whitespace delimited base-10 token
///
/// The trailing delimiter is consumed. Tokens are bounded at
/// [`MAX_TOKEN_LENGTH`] bytes, anything longer or non-numeric is
/// invalid data.
fn read_integer<T: PByteReaderTrait>(
    stream: &mut PReader<T>
) -> Result<usize, NetpbmDecoderErrors> {
    skip_whitespace(stream)?;

    let mut token = [0_u8; MAX_TOKEN_LENGTH];
    let mut length = 0;

    loop {
        if stream.eof()? {
            break;
        }
        let byte = stream.get_u8();

        if is_pnm_whitespace(byte) {
            // the delimiter is consumed with the token
            break;
        }
        if length == MAX_TOKEN_LENGTH {
            return Err(NetpbmDecoderErrors::TokenTooLong);
        }
        token[length] = byte;
        length += 1;
    }

    if length == 0 {
        return Err(NetpbmDecoderErrors::GenericStatic(
            "Expected a numeric token but found none"
        ));
    }

    let mut value = 0_usize;

    for byte in &token[..length] {
        if !byte.is_ascii_digit() {
            return Err(NetpbmDecoderErrors::Generic(format!(
                "Invalid byte '{}' in a numeric token",
                *byte as char
            )));
        }
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(usize::from(byte - b'0')))
            .ok_or(NetpbmDecoderErrors::OverFlowOccurred)?;
    }
    Ok(value)
}

/// Rescale a sample from the declared maximum to the full 0-255 range
///
/// A file declaring `max_value` of 255 round trips samples unchanged
fn linearize(sample: usize, max_value: usize) -> u8 {
    ((255 * sample) / max_value) as u8
}

/// A netpbm decoder serving all six magic codes
///
/// # Usage
/// Create one per stream, call [`decode_headers`](Self::decode_headers)
/// to get image information or [`decode`](Self::decode) to get pixels.
///
/// ```
/// use pictor_core::bytestream::PCursor;
/// use pictor_netpbm::NetpbmDecoder;
///
/// let mut decoder = NetpbmDecoder::new(PCursor::new(b"NOT VALID PNM"));
/// assert!(decoder.decode().is_err());
/// ```
pub struct NetpbmDecoder<T>
where
    T: PByteReaderTrait
{
    stream:          PReader<T>,
    options:         DecoderOptions,
    width:           usize,
    height:          usize,
    max_value:       usize,
    kind:            Option<PnmKind>,
    binary:          bool,
    pix_fmt:         Option<PixelFormat>,
    decoded_headers: bool
}

impl<T> NetpbmDecoder<T>
where
    T: PByteReaderTrait
{
    /// Create a new netpbm decoder that reads data from `data`
    pub fn new(data: T) -> NetpbmDecoder<T> {
        NetpbmDecoder::new_with_options(data, DecoderOptions::default())
    }

    /// Create a new decoder instance with specified options
    ///
    /// # Arguments
    ///
    /// * `data`: The source from which we will read data
    /// * `options`: Specialized options for this decoder
    pub fn new_with_options(data: T, options: DecoderOptions) -> NetpbmDecoder<T> {
        NetpbmDecoder {
            stream: PReader::new(data),
            options,
            width: 0,
            height: 0,
            max_value: 1,
            kind: None,
            binary: false,
            pix_fmt: None,
            decoded_headers: false
        }
    }

    /// Read the header tokens and store them in the decode context
    ///
    /// The header is the magic code followed by width, height and,
    /// except for bitmaps, the maximum sample value. A bitmap's maximum
    /// is implicitly one.
    pub fn decode_headers(&mut self) -> Result<(), NetpbmDecoderErrors> {
        if self.decoded_headers {
            return Ok(());
        }

        if self.stream.get_u8_err()? != b'P' {
            return Err(NetpbmDecoderErrors::InvalidMagicBytes);
        }
        let code = self.stream.get_u8_err()?;

        let (kind, binary) = match PnmKind::from_magic(code) {
            Some(parsed) => parsed,
            None => return Err(NetpbmDecoderErrors::InvalidMagicBytes)
        };
        self.kind = Some(kind);
        self.binary = binary;

        self.width = read_integer(&mut self.stream)?;
        self.height = read_integer(&mut self.stream)?;

        if self.width > self.options.max_width() {
            return Err(NetpbmDecoderErrors::TooLargeDimensions(
                "width",
                self.options.max_width(),
                self.width
            ));
        }
        if self.height > self.options.max_height() {
            return Err(NetpbmDecoderErrors::TooLargeDimensions(
                "height",
                self.options.max_height(),
                self.height
            ));
        }

        if kind != PnmKind::Bitmap {
            self.max_value = read_integer(&mut self.stream)?;
        }

        if self.max_value == 0 || self.max_value > usize::from(u16::MAX) {
            return Err(NetpbmDecoderErrors::Generic(format!(
                "Max sample value {} out of range, must be 1..=65535",
                self.max_value
            )));
        }

        self.pix_fmt = Some(match kind {
            PnmKind::Bitmap => PixelFormat::Grayscale1,
            PnmKind::Graymap => {
                if self.max_value > 255 {
                    PixelFormat::Grayscale16
                } else {
                    PixelFormat::Grayscale8
                }
            }
            PnmKind::Pixmap => {
                if self.max_value > 255 {
                    // the 24-bit storage has no room for wide samples
                    return Err(NetpbmDecoderErrors::UnsupportedMaxValue(self.max_value));
                }
                PixelFormat::Rgb24
            }
        });

        trace!("Width: {}", self.width);
        trace!("Height: {}", self.height);
        trace!("Kind: {:?}, binary: {}", kind, self.binary);
        trace!("Max value: {}", self.max_value);

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

    /// The sub format of the image, or `None` if the headers
    /// weren't decoded
    pub const fn kind(&self) -> Option<PnmKind> {
        self.kind
    }

    /// Get the pixel format the image decodes into, or `None`
    /// if the headers weren't decoded
    pub const fn pixel_format(&self) -> Option<PixelFormat> {
        self.pix_fmt
    }

    /// Decode the image and return its pixels
    pub fn decode(&mut self) -> Result<PixelStorage, NetpbmDecoderErrors> {
        self.decode_headers()?;

        let pix_fmt = match self.pix_fmt {
            Some(fmt) => fmt,
            None => return Err(NetpbmDecoderErrors::GenericStatic("Headers not decoded"))
        };

        let pixel_count = self
            .width
            .checked_mul(self.height)
            .ok_or(NetpbmDecoderErrors::OverFlowOccurred)?;

        let mut storage = PixelStorage::allocate(pix_fmt, pixel_count)?;

        match &mut storage {
            PixelStorage::Grayscale1(values) => {
                if self.binary {
                    // one bit per pixel over the whole raster.
                    // the file stores black as a set bit, memory stores
                    // the logical complement
                    let mut bits = BitReader::new(&mut self.stream);
                    for value in values.iter_mut() {
                        *value = bits.read_bit()? ^ 1;
                    }
                } else {
                    // one non-whitespace character per pixel, same
                    // inversion as the binary path
                    for value in values.iter_mut() {
                        skip_whitespace(&mut self.stream)?;
                        let byte = self.stream.get_u8_err()?;
                        *value = u8::from(byte == b'0');
                    }
                }
            }
            PixelStorage::Grayscale8(values) => {
                if self.binary {
                    for value in values.iter_mut() {
                        let sample = self.stream.get_u8_err()?;
                        *value = linearize(usize::from(sample), self.max_value);
                    }
                } else {
                    // ASCII samples are stored truncated, without the
                    // rescale the binary path applies
                    for value in values.iter_mut() {
                        let sample = read_integer(&mut self.stream)?;
                        self.check_sample_range(sample)?;
                        *value = sample as u8;
                    }
                }
            }
            PixelStorage::Grayscale16(values) => {
                if self.binary {
                    // wide samples are big endian and verbatim
                    for value in values.iter_mut() {
                        *value = self.stream.get_u16_be_err()?;
                    }
                } else {
                    for value in values.iter_mut() {
                        let sample = read_integer(&mut self.stream)?;
                        self.check_sample_range(sample)?;
                        *value = sample as u16;
                    }
                }
            }
            PixelStorage::Rgb24(pixels) => {
                if self.binary {
                    for pixel in pixels.iter_mut() {
                        let [r, g, b] = self.stream.read_fixed_bytes_or_error::<3>()?;
                        *pixel = Rgb {
                            r: linearize(usize::from(r), self.max_value),
                            g: linearize(usize::from(g), self.max_value),
                            b: linearize(usize::from(b), self.max_value)
                        };
                    }
                } else {
                    for pixel in pixels.iter_mut() {
                        let r = read_integer(&mut self.stream)?;
                        let g = read_integer(&mut self.stream)?;
                        let b = read_integer(&mut self.stream)?;

                        self.check_sample_range(r)?;
                        self.check_sample_range(g)?;
                        self.check_sample_range(b)?;

                        *pixel = Rgb {
                            r: linearize(r, self.max_value),
                            g: linearize(g, self.max_value),
                            b: linearize(b, self.max_value)
                        };
                    }
                }
            }
            _ => {
                return Err(NetpbmDecoderErrors::GenericStatic(
                    "Storage does not match a netpbm pixel layout"
                ));
            }
        }

        Ok(storage)
    }

    /// An ASCII sample above the declared maximum is tolerated and
    /// stored as the raster paths define, unless strict mode asks us
    /// to reject it
    fn check_sample_range(&self, sample: usize) -> Result<(), NetpbmDecoderErrors> {
        if sample > self.max_value {
            let msg = format!(
                "Sample value {sample} exceeds the declared maximum {}",
                self.max_value
            );
            if self.options.strict_mode() {
                return Err(NetpbmDecoderErrors::Generic(msg));
            }
            warn!("{}", msg);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::probe_netpbm;

    #[test]
    fn probe_accepts_all_six_codes() {
        for code in b'1'..=b'6' {
            assert!(probe_netpbm(&[b'P', code]));
        }
        assert!(!probe_netpbm(b"P7"));
        assert!(!probe_netpbm(b"P0"));
        assert!(!probe_netpbm(b"Q1"));
    }
}
