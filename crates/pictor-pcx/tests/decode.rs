/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Decoding tests over synthesized PCX streams

use pictor_core::bytestream::PCursor;
use pictor_core::pixel::{PixelFormat, PixelStorage, Rgba};
use pictor_pcx::{PcxDecoder, PcxDecoderErrors};

/// Build a 128 byte PCX header
fn pcx_header(bpp: u8, xmax: u16, ymax: u16, planes: u8, stride: u16) -> Vec<u8> {
    let mut header = vec![0_u8; 128];
    header[0] = 0x0A; // magic
    header[1] = 5; // version
    header[2] = 1; // RLE encoding
    header[3] = bpp;
    header[8..10].copy_from_slice(&xmax.to_le_bytes());
    header[10..12].copy_from_slice(&ymax.to_le_bytes());
    header[65] = planes;
    header[66..68].copy_from_slice(&stride.to_le_bytes());
    header
}

#[test]
fn indexed8_literal_scanlines() {
    // 2x2, one byte per pixel, two literal scanlines of two bytes each
    let mut data = pcx_header(8, 1, 1, 1, 2);
    // first embedded palette entry
    data[16] = 10;
    data[17] = 20;
    data[18] = 30;
    data.extend_from_slice(&[4, 8, 15, 16]);

    let mut decoder = PcxDecoder::new(PCursor::new(data));
    let pixels = decoder.decode().unwrap();

    assert_eq!(decoder.dimensions(), Some((2, 2)));
    assert_eq!(decoder.pixel_format(), Some(PixelFormat::Indexed8));

    match pixels {
        PixelStorage::Indexed8(indexed) => {
            assert_eq!(indexed.indices, [4, 8, 15, 16]);
            // the file is far too short for an appended VGA block,
            // the 16 embedded entries are the palette
            assert_eq!(indexed.palette.len(), 256);
            assert_eq!(
                indexed.palette[0],
                Rgba {
                    r: 10,
                    g: 20,
                    b: 30,
                    a: 255
                }
            );
        }
        _ => panic!("wrong storage variant")
    }
}

#[test]
fn indexed8_appended_palette_overrides_header() {
    let mut data = pcx_header(8, 1, 0, 1, 2);
    data.extend_from_slice(&[0, 1]);
    // appended VGA palette block
    data.push(0x0C);
    for i in 0..=255_u8 {
        data.extend_from_slice(&[i, i, 255 - i]);
    }
    // pad the front so the block really sits in the last 769 bytes
    // (header + 2 pixel bytes + block is already 899 bytes, nothing to do)
    assert!(data.len() >= 769);

    let mut decoder = PcxDecoder::new(PCursor::new(data));
    let pixels = decoder.decode().unwrap();

    let palette = pixels.palette().unwrap();
    assert_eq!(palette.len(), 256);
    assert_eq!(
        palette[7],
        Rgba {
            r: 7,
            g: 7,
            b: 248,
            a: 255
        }
    );
}

#[test]
fn one_bit_scanline_all_set() {
    // 8x1 image, a single 0xFF byte per scanline, expressible only as a run
    let mut data = pcx_header(1, 7, 0, 1, 1);
    data.extend_from_slice(&[0xC1, 0xFF]);

    let mut decoder = PcxDecoder::new(PCursor::new(data));
    let pixels = decoder.decode().unwrap();

    match pixels {
        PixelStorage::Indexed1(indexed) => {
            assert_eq!(indexed.indices, [1; 8]);
            assert_eq!(indexed.palette.len(), 2);
        }
        _ => panic!("wrong storage variant")
    }
}

#[test]
fn four_bit_nibbles_high_first() {
    // 4x1 image, two bytes per scanline
    let mut data = pcx_header(4, 3, 0, 1, 2);
    data.extend_from_slice(&[0xAB, 0x1C]);

    let mut decoder = PcxDecoder::new(PCursor::new(data));
    let pixels = decoder.decode().unwrap();

    match pixels {
        PixelStorage::Indexed4(indexed) => {
            assert_eq!(indexed.indices, [0xA, 0xB, 0x1, 0xC]);
        }
        _ => panic!("wrong storage variant")
    }
}

#[test]
fn rgb_planes_are_contiguous_per_scanline() {
    // 2x2 true color, planes stored R R G G B B per scanline
    let mut data = pcx_header(8, 1, 1, 3, 2);
    data.extend_from_slice(&[10, 20, 30, 40, 50, 60]);
    data.extend_from_slice(&[70, 80, 90, 100, 110, 120]);

    let mut decoder = PcxDecoder::new(PCursor::new(data));
    let pixels = decoder.decode().unwrap();

    match pixels {
        PixelStorage::Rgb24(pixels) => {
            let flat: Vec<(u8, u8, u8)> = pixels.iter().map(|p| (p.r, p.g, p.b)).collect();
            assert_eq!(
                flat,
                [(10, 30, 50), (20, 40, 60), (70, 90, 110), (80, 100, 120)]
            );
        }
        _ => panic!("wrong storage variant")
    }
}

#[test]
fn rgb_odd_width_dummy_byte() {
    // 3 pixels wide with a stride of 4, each plane ends in a dummy zero
    let mut data = pcx_header(8, 2, 0, 3, 4);
    data.extend_from_slice(&[1, 2, 3, 0x00, 4, 5, 6, 0x00, 7, 8, 9, 0x00]);

    let mut decoder = PcxDecoder::new(PCursor::new(data));
    let pixels = decoder.decode().unwrap();

    match pixels {
        PixelStorage::Rgb24(pixels) => {
            let flat: Vec<(u8, u8, u8)> = pixels.iter().map(|p| (p.r, p.g, p.b)).collect();
            assert_eq!(flat, [(1, 4, 7), (2, 5, 8), (3, 6, 9)]);
        }
        _ => panic!("wrong storage variant")
    }
}

#[test]
fn overlong_run_is_invalid() {
    // a run of three bytes into a two byte scanline leaves the run pending
    let mut data = pcx_header(8, 1, 0, 1, 2);
    data.extend_from_slice(&[0xC3, 0x07]);

    let mut decoder = PcxDecoder::new(PCursor::new(data));
    assert!(matches!(
        decoder.decode(),
        Err(PcxDecoderErrors::PendingRleRun)
    ));
}

#[test]
fn rejects_bad_magic_and_versions() {
    let mut data = pcx_header(8, 1, 0, 1, 2);
    data[0] = 0x0B;
    assert!(matches!(
        PcxDecoder::new(PCursor::new(data)).decode_headers(),
        Err(PcxDecoderErrors::InvalidMagicBytes)
    ));

    let mut data = pcx_header(8, 1, 0, 1, 2);
    data[1] = 9;
    assert!(PcxDecoder::new(PCursor::new(data)).decode_headers().is_err());
}

#[test]
fn rejects_unknown_plane_depth_combination() {
    // two planes is structurally valid but not decodable here
    let data = pcx_header(8, 1, 0, 2, 2);
    assert!(matches!(
        PcxDecoder::new(PCursor::new(data)).decode_headers(),
        Err(PcxDecoderErrors::UnsupportedPixelFormat(2, 8))
    ));
}

#[test]
fn truncated_pixel_data_is_an_io_error() {
    let mut data = pcx_header(8, 1, 1, 1, 2);
    data.extend_from_slice(&[1, 2]); // one scanline missing

    let mut decoder = PcxDecoder::new(PCursor::new(data));
    assert!(matches!(
        decoder.decode(),
        Err(PcxDecoderErrors::IoErrors(_))
    ));
}
