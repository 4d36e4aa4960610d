/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Encode and decode each variant and compare the storage

use pictor_core::bytestream::PCursor;
use pictor_core::options::EncoderOptions;
use pictor_core::pixel::{PixelStorage, Rgb};
use pictor_netpbm::{NetpbmDecoder, NetpbmEncoder, NetpbmEncoderErrors};

fn roundtrip(pixels: &PixelStorage, width: usize, height: usize, binary: bool) -> PixelStorage {
    let options = EncoderOptions::default()
        .set_width(width)
        .set_height(height)
        .set_binary_mode(binary);

    let mut sink = vec![];
    NetpbmEncoder::new(pixels, options).encode(&mut sink).unwrap();

    let mut decoder = NetpbmDecoder::new(PCursor::new(sink));
    let decoded = decoder.decode().unwrap();
    assert_eq!(decoder.dimensions(), Some((width, height)));
    decoded
}

#[test]
fn bitmap_roundtrips_both_variants() {
    let pixels = PixelStorage::Grayscale1(vec![1, 0, 0, 1, 1, 0]);
    for binary in [false, true] {
        assert_eq!(roundtrip(&pixels, 3, 2, binary), pixels);
    }
}

#[test]
fn graymap_roundtrips_both_variants() {
    let pixels = PixelStorage::Grayscale8(vec![0, 1, 127, 128, 254, 255]);
    for binary in [false, true] {
        assert_eq!(roundtrip(&pixels, 2, 3, binary), pixels);
    }
}

#[test]
fn wide_graymap_roundtrips_both_variants() {
    let pixels = PixelStorage::Grayscale16(vec![0, 256, 0x1234, 65535]);
    for binary in [false, true] {
        assert_eq!(roundtrip(&pixels, 4, 1, binary), pixels);
    }
}

#[test]
fn pixmap_roundtrips_both_variants() {
    let pixels = PixelStorage::Rgb24(vec![
        Rgb { r: 1, g: 2, b: 3 },
        Rgb {
            r: 250,
            g: 128,
            b: 0
        },
    ]);
    for binary in [false, true] {
        assert_eq!(roundtrip(&pixels, 1, 2, binary), pixels);
    }
}

#[test]
fn ascii_bitmap_reemits_inverted_digits() {
    // stored zero (white) must come back out as the digit 1
    let pixels = PixelStorage::Grayscale1(vec![1, 0, 0, 1]);
    let options = EncoderOptions::default()
        .set_width(2)
        .set_height(2)
        .set_binary_mode(false);

    let mut sink = vec![];
    NetpbmEncoder::new(&pixels, options).encode(&mut sink).unwrap();

    assert_eq!(sink, b"P1\n# Created by pictor\n2 2\n0 1\n1 0\n");
}

#[test]
fn binary_bitmap_pads_the_final_byte_with_zeros() {
    let pixels = PixelStorage::Grayscale1(vec![0, 0, 0]);
    let options = EncoderOptions::default()
        .set_width(3)
        .set_height(1)
        .set_binary_mode(true);

    let mut sink = vec![];
    NetpbmEncoder::new(&pixels, options).encode(&mut sink).unwrap();

    // stored zeros invert to three set bits, the rest of the byte is padding
    assert_eq!(&sink[sink.len() - 1..], &[0b1110_0000]);
}

#[test]
fn encoder_reports_written_bytes() {
    let pixels = PixelStorage::Grayscale8(vec![1, 2]);
    let options = EncoderOptions::default().set_width(2).set_height(1);

    let mut sink = vec![];
    let written = NetpbmEncoder::new(&pixels, options).encode(&mut sink).unwrap();
    assert_eq!(written, sink.len());
}

#[test]
fn encoder_rejects_mismatched_geometry() {
    let pixels = PixelStorage::Grayscale8(vec![1, 2, 3]);
    let options = EncoderOptions::default().set_width(2).set_height(2);

    let mut sink = vec![];
    assert!(matches!(
        NetpbmEncoder::new(&pixels, options).encode(&mut sink),
        Err(NetpbmEncoderErrors::WrongInputSize(4, 3))
    ));
}

#[test]
fn encoder_rejects_unrepresentable_storage() {
    let pixels = PixelStorage::allocate(pictor_core::pixel::PixelFormat::Bgra32, 1).unwrap();
    let options = EncoderOptions::default().set_width(1).set_height(1);

    let mut sink = vec![];
    assert!(matches!(
        NetpbmEncoder::new(&pixels, options).encode(&mut sink),
        Err(NetpbmEncoderErrors::UnsupportedPixelFormat(_))
    ));
}
