/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! The pixel format and pixel storage model
//!
//! Decoders negotiate a [`PixelFormat`] from the container headers and
//! then allocate a matching [`PixelStorage`] variant once, up front.
//! The storage is never resized or re-tagged after allocation, a decode
//! either fully populates it or fails.

use alloc::vec::Vec;
use core::fmt::{Debug, Formatter};

/// The in-memory layout of decoded pixels
///
/// This is a closed set, every decoder resolves its header fields to
/// exactly one of these and every [`PixelStorage`] variant corresponds
/// to one of them.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum PixelFormat {
    /// 1-bit palette index per pixel
    Indexed1,
    /// 4-bit palette index per pixel
    Indexed4,
    /// 8-bit palette index per pixel
    Indexed8,
    /// Single channel, values restricted to 0 and 1
    Grayscale1,
    /// Single 8-bit channel
    Grayscale8,
    /// Single 16-bit channel
    Grayscale16,
    /// Red, green, blue, 8 bits each
    Rgb24,
    /// Blue, green, red, 8 bits each
    Bgr24,
    /// Blue, green, red, alpha, 8 bits each
    Bgra32
}

impl PixelFormat {
    /// Number of bits a single pixel occupies in its container format
    pub const fn bits_per_pixel(self) -> usize {
        match self {
            Self::Indexed1 | Self::Grayscale1 => 1,
            Self::Indexed4 => 4,
            Self::Indexed8 | Self::Grayscale8 => 8,
            Self::Grayscale16 => 16,
            Self::Rgb24 | Self::Bgr24 => 24,
            Self::Bgra32 => 32
        }
    }

    /// Number of color channels a pixel carries
    ///
    /// Palette indices count as one channel, the palette entries they
    /// resolve to are not considered here
    pub const fn channel_count(self) -> usize {
        match self {
            Self::Indexed1
            | Self::Indexed4
            | Self::Indexed8
            | Self::Grayscale1
            | Self::Grayscale8
            | Self::Grayscale16 => 1,
            Self::Rgb24 | Self::Bgr24 => 3,
            Self::Bgra32 => 4
        }
    }

    pub const fn has_alpha(self) -> bool {
        matches!(self, Self::Bgra32)
    }

    pub const fn is_indexed(self) -> bool {
        matches!(self, Self::Indexed1 | Self::Indexed4 | Self::Indexed8)
    }

    pub const fn is_grayscale(self) -> bool {
        matches!(self, Self::Grayscale1 | Self::Grayscale8 | Self::Grayscale16)
    }

    /// Number of palette entries an indexed format addresses
    ///
    /// Zero for the direct color formats
    pub const fn palette_capacity(self) -> usize {
        match self {
            Self::Indexed1 => 2,
            Self::Indexed4 => 16,
            Self::Indexed8 => 256,
            _ => 0
        }
    }
}

/// A single palette entry with 8-bit channels
///
/// The default entry is opaque black, formats without alpha information
/// leave the alpha channel at full opacity.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8
}

impl Default for Rgba {
    fn default() -> Self {
        Rgba {
            r: 0,
            g: 0,
            b: 0,
            a: 255
        }
    }
}

/// A red, green, blue pixel in file channel order
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8
}

/// A blue, green, red pixel in file channel order
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Bgr {
    pub b: u8,
    pub g: u8,
    pub r: u8
}

/// A blue, green, red, alpha pixel in file channel order
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Bgra {
    pub b: u8,
    pub g: u8,
    pub r: u8,
    pub a: u8
}

/// Index buffer plus palette for the indexed pixel formats
///
/// Indices are stored one per byte even for the sub-byte formats, but
/// their values stay inside the format's range (0–1 for 1-bit, 0–15 for
/// 4-bit). The palette always has the format's full capacity, entries a
/// file does not define stay opaque black.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IndexedStorage {
    pub indices: Vec<u8>,
    pub palette: Vec<Rgba>
}

/// Errors raised when allocating pixel storage
pub enum PixelAllocErrors {
    /// The byte size computation for the requested pixel count
    /// overflowed the platform's address width
    TooLargeDimensions(usize),
    /// The allocator reported exhaustion
    OutOfMemory
}

impl Debug for PixelAllocErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::TooLargeDimensions(pixels) => {
                writeln!(f, "Cannot compute a byte size for {pixels} pixels")
            }
            Self::OutOfMemory => {
                writeln!(f, "Allocator reported exhaustion")
            }
        }
    }
}

fn alloc_vec<E: Clone + Default>(pixel_count: usize) -> Result<Vec<E>, PixelAllocErrors> {
    pixel_count
        .checked_mul(core::mem::size_of::<E>())
        .ok_or(PixelAllocErrors::TooLargeDimensions(pixel_count))?;

    let mut values = Vec::new();
    values
        .try_reserve_exact(pixel_count)
        .map_err(|_| PixelAllocErrors::OutOfMemory)?;
    values.resize(pixel_count, E::default());

    Ok(values)
}

fn alloc_indexed(
    format: PixelFormat, pixel_count: usize
) -> Result<IndexedStorage, PixelAllocErrors> {
    Ok(IndexedStorage {
        indices: alloc_vec(pixel_count)?,
        palette: alloc_vec(format.palette_capacity())?
    })
}

/// The typed container decoded pixels live in
///
/// One variant per [`PixelFormat`], carrying exactly width×height
/// elements once a decode has succeeded.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PixelStorage {
    Indexed1(IndexedStorage),
    Indexed4(IndexedStorage),
    Indexed8(IndexedStorage),
    Grayscale1(Vec<u8>),
    Grayscale8(Vec<u8>),
    Grayscale16(Vec<u16>),
    Rgb24(Vec<Rgb>),
    Bgr24(Vec<Bgr>),
    Bgra32(Vec<Bgra>)
}

impl PixelStorage {
    /// Allocate storage for `pixel_count` pixels of `format`
    ///
    /// This is the single allocation point of the library, decoders
    /// call it once after resolving dimensions and pixel format and then
    /// only write into the returned buffer.
    ///
    /// # Errors
    /// - [`PixelAllocErrors::TooLargeDimensions`]: the size computation
    ///   overflowed
    /// - [`PixelAllocErrors::OutOfMemory`]: the allocator could not
    ///   satisfy the request
    pub fn allocate(
        format: PixelFormat, pixel_count: usize
    ) -> Result<PixelStorage, PixelAllocErrors> {
        let storage = match format {
            PixelFormat::Indexed1 => PixelStorage::Indexed1(alloc_indexed(format, pixel_count)?),
            PixelFormat::Indexed4 => PixelStorage::Indexed4(alloc_indexed(format, pixel_count)?),
            PixelFormat::Indexed8 => PixelStorage::Indexed8(alloc_indexed(format, pixel_count)?),
            PixelFormat::Grayscale1 => PixelStorage::Grayscale1(alloc_vec(pixel_count)?),
            PixelFormat::Grayscale8 => PixelStorage::Grayscale8(alloc_vec(pixel_count)?),
            PixelFormat::Grayscale16 => PixelStorage::Grayscale16(alloc_vec(pixel_count)?),
            PixelFormat::Rgb24 => PixelStorage::Rgb24(alloc_vec(pixel_count)?),
            PixelFormat::Bgr24 => PixelStorage::Bgr24(alloc_vec(pixel_count)?),
            PixelFormat::Bgra32 => PixelStorage::Bgra32(alloc_vec(pixel_count)?)
        };
        Ok(storage)
    }

    /// The pixel format this storage was allocated for
    pub const fn format(&self) -> PixelFormat {
        match self {
            Self::Indexed1(_) => PixelFormat::Indexed1,
            Self::Indexed4(_) => PixelFormat::Indexed4,
            Self::Indexed8(_) => PixelFormat::Indexed8,
            Self::Grayscale1(_) => PixelFormat::Grayscale1,
            Self::Grayscale8(_) => PixelFormat::Grayscale8,
            Self::Grayscale16(_) => PixelFormat::Grayscale16,
            Self::Rgb24(_) => PixelFormat::Rgb24,
            Self::Bgr24(_) => PixelFormat::Bgr24,
            Self::Bgra32(_) => PixelFormat::Bgra32
        }
    }

    /// Number of pixels held
    pub fn len(&self) -> usize {
        match self {
            Self::Indexed1(s) | Self::Indexed4(s) | Self::Indexed8(s) => s.indices.len(),
            Self::Grayscale1(v) | Self::Grayscale8(v) => v.len(),
            Self::Grayscale16(v) => v.len(),
            Self::Rgb24(v) => v.len(),
            Self::Bgr24(v) => v.len(),
            Self::Bgra32(v) => v.len()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The palette of an indexed storage, `None` for direct color formats
    pub fn palette(&self) -> Option<&[Rgba]> {
        match self {
            Self::Indexed1(s) | Self::Indexed4(s) | Self::Indexed8(s) => Some(&s.palette),
            _ => None
        }
    }

    /// Mutable access to the palette of an indexed storage
    pub fn palette_mut(&mut self) -> Option<&mut [Rgba]> {
        match self {
            Self::Indexed1(s) | Self::Indexed4(s) | Self::Indexed8(s) => Some(&mut s.palette),
            _ => None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocate_matches_format_and_count() {
        let storage = PixelStorage::allocate(PixelFormat::Rgb24, 12).unwrap();
        assert_eq!(storage.format(), PixelFormat::Rgb24);
        assert_eq!(storage.len(), 12);
        assert!(storage.palette().is_none());
    }

    #[test]
    fn indexed_palette_capacity() {
        let storage = PixelStorage::allocate(PixelFormat::Indexed4, 4).unwrap();
        let palette = storage.palette().unwrap();
        assert_eq!(palette.len(), 16);
        // undefined entries are opaque black
        assert!(palette.iter().all(|e| *e == Rgba::default()));
    }

    #[test]
    fn allocate_rejects_overflowing_sizes() {
        assert!(PixelStorage::allocate(PixelFormat::Grayscale16, usize::MAX).is_err());
    }
}
