/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Decoding tests over synthesized BMP streams

use pictor_bmp::{BmpDecoder, BmpDecoderErrors};
use pictor_core::bytestream::PCursor;
use pictor_core::pixel::{PixelFormat, PixelStorage};

/// Build a BMP with the 14 byte file header, an info header of
/// `info_size` bytes and the given pixel bytes appended
fn synthesize_bmp(info_size: u32, width: i32, height: i32, depth: u16, compression: u32, pixels: &[u8]) -> Vec<u8> {
    let data_offset = 14 + info_size;

    let mut data = Vec::new();
    data.extend_from_slice(b"BM");
    data.extend_from_slice(&(data_offset + pixels.len() as u32).to_le_bytes());
    data.extend_from_slice(&[0; 4]); // reserved
    data.extend_from_slice(&data_offset.to_le_bytes());

    let info_start = data.len();
    data.extend_from_slice(&info_size.to_le_bytes());
    data.extend_from_slice(&width.to_le_bytes());
    data.extend_from_slice(&height.to_le_bytes());
    data.extend_from_slice(&1_u16.to_le_bytes()); // planes
    data.extend_from_slice(&depth.to_le_bytes());
    data.extend_from_slice(&compression.to_le_bytes());
    // pad the rest of the info header with zeros
    data.resize(info_start + info_size as usize, 0);

    data.extend_from_slice(pixels);
    data
}

#[test]
fn v4_24bit_rows_are_stored_bottom_up() {
    // 2x2, three bytes per pixel, first scanline in the file is the
    // bottom row of the image
    #[rustfmt::skip]
    let pixel_bytes = [
        // bottom row, pixels (0,1) and (1,1)
        1, 2, 3,    4, 5, 6,
        // top row, pixels (0,0) and (1,0)
        7, 8, 9,    10, 11, 12,
    ];
    let data = synthesize_bmp(108, 2, 2, 24, 0, &pixel_bytes);

    let mut decoder = BmpDecoder::new(PCursor::new(data));
    let pixels = decoder.decode().unwrap();

    assert_eq!(decoder.dimensions(), Some((2, 2)));
    assert_eq!(decoder.pixel_format(), Some(PixelFormat::Bgr24));

    match pixels {
        PixelStorage::Bgr24(pixels) => {
            assert_eq!(pixels.len(), 4);
            // row major, top row first
            let flat: Vec<(u8, u8, u8)> = pixels.iter().map(|p| (p.b, p.g, p.r)).collect();
            assert_eq!(flat, [(7, 8, 9), (10, 11, 12), (1, 2, 3), (4, 5, 6)]);
        }
        _ => panic!("wrong storage variant")
    }
}

#[test]
fn v5_32bit_bitfields_keeps_file_channel_order() {
    let pixel_bytes = [1, 2, 3, 4];
    let data = synthesize_bmp(124, 1, 1, 32, 3, &pixel_bytes);

    let mut decoder = BmpDecoder::new(PCursor::new(data));
    let pixels = decoder.decode().unwrap();

    assert_eq!(decoder.pixel_format(), Some(PixelFormat::Bgra32));

    match pixels {
        PixelStorage::Bgra32(pixels) => {
            let pixel = pixels[0];
            assert_eq!((pixel.b, pixel.g, pixel.r, pixel.a), (1, 2, 3, 4));
        }
        _ => panic!("wrong storage variant")
    }
}

#[test]
fn windows31_header_is_unsupported() {
    let data = synthesize_bmp(40, 1, 1, 24, 0, &[1, 2, 3]);
    assert!(matches!(
        BmpDecoder::new(PCursor::new(data)).decode(),
        Err(BmpDecoderErrors::UnsupportedPixelFormat(24, _))
    ));
}

#[test]
fn unknown_info_header_size_is_rejected() {
    // the OS/2 64 byte shape
    let data = synthesize_bmp(64, 1, 1, 24, 0, &[1, 2, 3]);
    assert!(matches!(
        BmpDecoder::new(PCursor::new(data)).decode(),
        Err(BmpDecoderErrors::UnknownInfoHeaderSize(64))
    ));
}

#[test]
fn unsupported_depth_compression_pairs() {
    // 24-bit with bitfields is not a thing this decoder does
    let data = synthesize_bmp(108, 1, 1, 24, 3, &[1, 2, 3]);
    assert!(matches!(
        BmpDecoder::new(PCursor::new(data)).decode(),
        Err(BmpDecoderErrors::UnsupportedPixelFormat(24, _))
    ));

    // 8-bit paletted images are not supported either
    let data = synthesize_bmp(108, 1, 1, 8, 0, &[0]);
    assert!(matches!(
        BmpDecoder::new(PCursor::new(data)).decode(),
        Err(BmpDecoderErrors::UnsupportedPixelFormat(8, _))
    ));
}

#[test]
fn bad_magic_is_rejected() {
    let mut data = synthesize_bmp(108, 1, 1, 24, 0, &[1, 2, 3]);
    data[0] = b'b';
    assert!(matches!(
        BmpDecoder::new(PCursor::new(data)).decode(),
        Err(BmpDecoderErrors::InvalidMagicBytes)
    ));
}

#[test]
fn negative_height_is_rejected() {
    let data = synthesize_bmp(108, 2, -2, 24, 0, &[0; 12]);
    assert!(BmpDecoder::new(PCursor::new(data)).decode().is_err());
}

#[test]
fn truncated_pixel_data_is_an_io_error() {
    let data = synthesize_bmp(108, 2, 2, 24, 0, &[1, 2, 3]);
    assert!(matches!(
        BmpDecoder::new(PCursor::new(data)).decode(),
        Err(BmpDecoderErrors::IoErrors(_))
    ));
}
