/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Decoding tests over the six netpbm variants

use pictor_core::bytestream::PCursor;
use pictor_core::options::DecoderOptions;
use pictor_core::pixel::{PixelFormat, PixelStorage};
use pictor_netpbm::{NetpbmDecoder, NetpbmDecoderErrors, PnmKind};

fn decode(data: &[u8]) -> PixelStorage {
    NetpbmDecoder::new(PCursor::new(data)).decode().unwrap()
}

#[test]
fn p1_ascii_bitmap_inverts_digits() {
    // an ASCII one is black, stored as zero
    let pixels = decode(b"P1\n2 2\n0 1\n1 0\n");
    assert!(matches!(pixels, PixelStorage::Grayscale1(v) if v == [1, 0, 0, 1]));
}

#[test]
fn p1_tolerates_dense_digits_and_comments() {
    let pixels = decode(b"P1\n# border pattern\n3 1\n011\n");
    assert!(matches!(pixels, PixelStorage::Grayscale1(v) if v == [1, 0, 0]));
}

#[test]
fn p4_binary_bitmap_is_one_continuous_bit_stream() {
    // 3x2 pixels, six bits packed into one byte with no row padding
    // file bits 1,1,0 0,1,0 -> stored complement 0,0,1 1,0,1
    let pixels = decode(&[b"P4\n3 2\n".as_slice(), &[0b1100_1000]].concat());
    assert!(matches!(pixels, PixelStorage::Grayscale1(v) if v == [0, 0, 1, 1, 0, 1]));
}

#[test]
fn p2_ascii_graymap_does_not_rescale() {
    // a declared maximum of 100 does not stretch ASCII samples
    let pixels = decode(b"P2\n2 1\n100\n50 100\n");
    assert!(matches!(pixels, PixelStorage::Grayscale8(v) if v == [50, 100]));
}

#[test]
fn p5_binary_graymap_rescale_is_identity_at_255() {
    let pixels = decode(&[b"P5\n3 1\n255\n".as_slice(), &[0, 5, 250]].concat());
    assert!(matches!(pixels, PixelStorage::Grayscale8(v) if v == [0, 5, 250]));
}

#[test]
fn p5_binary_graymap_stretches_small_maxima() {
    // max 15: 255*15/15 = 255, 255*8/15 = 136
    let pixels = decode(&[b"P5\n3 1\n15\n".as_slice(), &[0, 8, 15]].concat());
    assert!(matches!(pixels, PixelStorage::Grayscale8(v) if v == [0, 136, 255]));
}

#[test]
fn p5_wide_samples_are_big_endian_verbatim() {
    let pixels = decode(&[b"P5\n2 1\n65535\n".as_slice(), &[0x12, 0x34, 0xAB, 0xCD]].concat());
    assert!(matches!(pixels, PixelStorage::Grayscale16(v) if v == [0x1234, 0xABCD]));
}

#[test]
fn p3_ascii_pixmap_rescales_per_channel() {
    let pixels = decode(b"P3\n1 1\n15\n15 0 7\n");
    match pixels {
        PixelStorage::Rgb24(pixels) => {
            let pixel = pixels[0];
            assert_eq!((pixel.r, pixel.g, pixel.b), (255, 0, 119));
        }
        _ => panic!("wrong storage variant")
    }
}

#[test]
fn p6_binary_pixmap() {
    let pixels = decode(&[b"P6\n2 1\n255\n".as_slice(), &[1, 2, 3, 4, 5, 6]].concat());
    match pixels {
        PixelStorage::Rgb24(pixels) => {
            let flat: Vec<(u8, u8, u8)> = pixels.iter().map(|p| (p.r, p.g, p.b)).collect();
            assert_eq!(flat, [(1, 2, 3), (4, 5, 6)]);
        }
        _ => panic!("wrong storage variant")
    }
}

#[test]
fn header_metadata_is_exposed() {
    let mut decoder = NetpbmDecoder::new(PCursor::new(b"P5\n4 3\n255\n".as_slice()));
    decoder.decode_headers().unwrap();
    assert_eq!(decoder.dimensions(), Some((4, 3)));
    assert_eq!(decoder.kind(), Some(PnmKind::Graymap));
    assert_eq!(decoder.pixel_format(), Some(PixelFormat::Grayscale8));
}

#[test]
fn oversized_tokens_are_invalid() {
    let mut decoder = NetpbmDecoder::new(PCursor::new(b"P2\n22222222222222222 1\n255\n0\n"));
    assert!(matches!(
        decoder.decode(),
        Err(NetpbmDecoderErrors::TokenTooLong)
    ));
}

#[test]
fn non_numeric_tokens_are_invalid() {
    let mut decoder = NetpbmDecoder::new(PCursor::new(b"P2\nab 1\n255\n0\n"));
    assert!(matches!(
        decoder.decode(),
        Err(NetpbmDecoderErrors::Generic(_))
    ));
}

#[test]
fn wide_pixmaps_are_unsupported() {
    let mut decoder = NetpbmDecoder::new(PCursor::new(b"P3\n1 1\n1000\n0 0 0\n"));
    assert!(matches!(
        decoder.decode(),
        Err(NetpbmDecoderErrors::UnsupportedMaxValue(1000))
    ));
}

#[test]
fn zero_max_value_is_invalid() {
    let mut decoder = NetpbmDecoder::new(PCursor::new(b"P2\n1 1\n0\n0\n"));
    assert!(decoder.decode().is_err());
}

#[test]
fn unknown_magic_is_rejected() {
    for bad in [b"P7\n1 1\n255\n".as_slice(), b"Q5\n1 1\n255\n", b"P"] {
        let mut decoder = NetpbmDecoder::new(PCursor::new(bad));
        assert!(decoder.decode().is_err());
    }
}

#[test]
fn truncated_raster_is_an_io_error() {
    let mut decoder = NetpbmDecoder::new(PCursor::new(b"P5\n2 2\n255\n\x01\x02".as_slice()));
    assert!(matches!(
        decoder.decode(),
        Err(NetpbmDecoderErrors::IoErrors(_))
    ));
}

#[test]
fn strict_mode_rejects_samples_above_the_maximum() {
    let data = b"P2\n2 1\n100\n50 200\n";

    // lenient decode stores the value truncated
    let pixels = decode(data);
    assert!(matches!(pixels, PixelStorage::Grayscale8(v) if v == [50, 200]));

    let options = DecoderOptions::default().set_strict_mode(true);
    let mut decoder = NetpbmDecoder::new_with_options(PCursor::new(data), options);
    assert!(decoder.decode().is_err());
}
