/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Format sniffing and dispatch tests

use pictor_core::bytestream::PCursor;
use pictor_core::options::EncoderOptions;
use pictor_core::pixel::{PixelFormat, PixelStorage};
use pictor_image::{guess_format, Image, ImageErrors, ImageFormat};

#[test]
fn magic_bytes_route_to_the_right_codec() {
    let cases: [(&[u8], ImageFormat); 8] = [
        (b"BM\x00\x00", ImageFormat::Bmp),
        (&[0x0A, 0x05, 0x01, 0x08], ImageFormat::Pcx),
        (b"P1\n", ImageFormat::Pbm),
        (b"P4\n", ImageFormat::Pbm),
        (b"P2\n", ImageFormat::Pgm),
        (b"P5\n", ImageFormat::Pgm),
        (b"P3\n", ImageFormat::Ppm),
        (b"P6\n", ImageFormat::Ppm),
    ];
    for (bytes, expected) in cases {
        let (format, _) = guess_format(PCursor::new(bytes)).unwrap();
        assert_eq!(format, expected);
    }

    assert!(guess_format(PCursor::new(b"GIF89a")).is_none());
    assert!(guess_format(PCursor::new(b"P7\n")).is_none());
    assert!(guess_format(PCursor::new(b"")).is_none());
}

#[test]
fn capability_report() {
    assert!(ImageFormat::Bmp.has_decoder());
    assert!(!ImageFormat::Bmp.has_encoder());
    assert!(!ImageFormat::Pcx.has_encoder());
    assert!(ImageFormat::Pgm.has_encoder());
    assert!(!ImageFormat::Unknown.has_decoder());
}

#[test]
fn read_dispatches_on_magic() {
    // a P6 pixmap through the facade
    let data = [b"P6\n1 1\n255\n".as_slice(), &[9, 8, 7]].concat();
    let image = Image::read(PCursor::new(data)).unwrap();

    assert_eq!(image.format(), ImageFormat::Ppm);
    assert_eq!(image.dimensions(), (1, 1));
    assert_eq!(image.pixel_format(), PixelFormat::Rgb24);

    // an unknown container is reported as such
    assert!(matches!(
        Image::read(PCursor::new(b"nonsense".as_slice())),
        Err(ImageErrors::ImageDecoderNotImplemented(ImageFormat::Unknown))
    ));
}

#[test]
fn read_only_formats_report_their_encoder_gap() {
    let image = Image::read(PCursor::new(b"P2\n1 1\n255\n3\n".as_slice())).unwrap();

    let mut sink = vec![];
    assert!(matches!(
        image.encode(ImageFormat::Bmp, &mut sink),
        Err(ImageErrors::ImageEncoderNotImplemented(ImageFormat::Bmp))
    ));
    assert!(matches!(
        image.encode(ImageFormat::Pcx, &mut sink),
        Err(ImageErrors::ImageEncoderNotImplemented(ImageFormat::Pcx))
    ));
}

#[test]
fn encode_roundtrips_through_the_facade() {
    let data = b"P2\n2 2\n255\n1 2\n3 4\n";
    let image = Image::read(PCursor::new(data.as_slice())).unwrap();

    // binary variant by default
    let mut sink = vec![];
    image.encode(ImageFormat::Pgm, &mut sink).unwrap();
    assert_eq!(sink[0..2], *b"P5");

    let again = Image::read(PCursor::new(sink)).unwrap();
    assert_eq!(again.storage(), image.storage());

    // ASCII variant on request
    let options = EncoderOptions::default().set_binary_mode(false);
    let mut sink = vec![];
    image
        .encode_with_options(ImageFormat::Pgm, Some(options), &mut sink)
        .unwrap();
    assert_eq!(sink[0..2], *b"P2");
}

#[test]
fn encode_rejects_mismatched_sub_format() {
    // a graymap cannot be written as a pixmap
    let image = Image::read(PCursor::new(b"P2\n1 1\n255\n3\n".as_slice())).unwrap();

    let mut sink = vec![];
    assert!(matches!(
        image.encode(ImageFormat::Ppm, &mut sink),
        Err(ImageErrors::Generic(_))
    ));
}

#[test]
fn storage_can_be_taken_out_of_the_image() {
    let image = Image::read(PCursor::new(b"P1\n2 1\n1 0\n".as_slice())).unwrap();
    let storage = image.into_storage();
    assert!(matches!(storage, PixelStorage::Grayscale1(v) if v == [0, 1]));
}
