/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
use crate::bytestream::{PByteIoError, PByteWriterTrait};

enum Mode {
    // Big endian
    BE,
    // Little Endian
    LE
}

/// An endian aware writer over anything that implements
/// [`PByteWriterTrait`]
///
/// Used by the encoders as the sink for encoded bytes, it
/// tracks how many bytes have been written so encoders can report
/// output sizes without querying the sink.
pub struct PWriter<T: PByteWriterTrait> {
    inner:         T,
    bytes_written: usize
}

impl<T: PByteWriterTrait> PWriter<T> {
    /// Create a new writer writing into `sink`
    pub fn new(sink: T) -> PWriter<T> {
        PWriter {
            inner:         sink,
            bytes_written: 0
        }
    }

    /// Destroy this writer returning the underlying sink
    #[inline(always)]
    pub fn consume(self) -> T {
        self.inner
    }

    /// Return the number of bytes written by this writer so far
    #[inline(always)]
    pub const fn bytes_written(&self) -> usize {
        self.bytes_written
    }

    /// Hint to the sink how many bytes the encoder expects to write
    #[inline]
    pub fn reserve(&mut self, size: usize) -> Result<(), PByteIoError> {
        self.inner.reserve_capacity(size)
    }

    /// Write all bytes in `buf` to the sink or error out
    #[inline]
    pub fn write_all(&mut self, buf: &[u8]) -> Result<(), PByteIoError> {
        self.inner.write_all_bytes(buf)?;
        self.bytes_written += buf.len();
        Ok(())
    }

    /// Write a single byte to the sink or error out
    #[inline(always)]
    pub fn write_u8_err(&mut self, byte: u8) -> Result<(), PByteIoError> {
        self.inner.write_const_bytes(&[byte])?;
        self.bytes_written += 1;
        Ok(())
    }

    /// Write a single byte to the sink ignoring any error that occurs
    #[inline(always)]
    pub fn write_u8(&mut self, byte: u8) {
        let _ = self.write_u8_err(byte);
    }

    /// Ensure all written bytes reach the underlying sink
    #[inline]
    pub fn flush(&mut self) -> Result<(), PByteIoError> {
        self.inner.flush_bytes()
    }
}

macro_rules! write_single_type {
    ($name:tt,$name3:tt,$name4:tt,$name5:tt,$name6:tt,$int_type:tt) => {
        impl<T: PByteWriterTrait> PWriter<T> {
            #[inline(always)]
            fn $name(&mut self, byte: $int_type, mode: Mode) -> Result<(), PByteIoError> {
                // get bits, depending on mode.
                // This should be inlined and not visible in
                // the generated binary since mode is a compile
                // time constant.
                let bytes = match mode {
                    Mode::BE => byte.to_be_bytes(),
                    Mode::LE => byte.to_le_bytes()
                };
                self.inner.write_const_bytes(&bytes)?;
                self.bytes_written += bytes.len();

                Ok(())
            }

            #[doc=concat!("Write ",stringify!($int_type)," as a big endian integer")]
            #[doc=concat!("Returning an error if the underlying sink cannot support a ",stringify!($int_type)," write.")]
            #[inline]
            pub fn $name3(&mut self, byte: $int_type) -> Result<(), PByteIoError> {
                self.$name(byte, Mode::BE)
            }

            #[doc=concat!("Write ",stringify!($int_type)," as a little endian integer")]
            #[doc=concat!("Returning an error if the underlying sink cannot support a ",stringify!($int_type)," write.")]
            #[inline]
            pub fn $name4(&mut self, byte: $int_type) -> Result<(), PByteIoError> {
                self.$name(byte, Mode::LE)
            }

            #[doc=concat!("Write ",stringify!($int_type)," as a big endian integer")]
            #[doc=concat!("Ignoring any error raised by the underlying sink.")]
            #[inline]
            pub fn $name5(&mut self, byte: $int_type) {
                let _ = self.$name(byte, Mode::BE);
            }
            #[doc=concat!("Write ",stringify!($int_type)," as a little endian integer")]
            #[doc=concat!("Ignoring any error raised by the underlying sink.")]
            #[inline]
            pub fn $name6(&mut self, byte: $int_type) {
                let _ = self.$name(byte, Mode::LE);
            }
        }
    };
}

write_single_type!(
    write_u16_inner_or_die,
    write_u16_be_err,
    write_u16_le_err,
    write_u16_be,
    write_u16_le,
    u16
);

write_single_type!(
    write_u32_inner_or_die,
    write_u32_be_err,
    write_u32_le_err,
    write_u32_be,
    write_u32_le,
    u32
);

write_single_type!(
    write_u64_inner_or_die,
    write_u64_be_err,
    write_u64_le_err,
    write_u64_be,
    write_u64_le,
    u64
);

impl PByteWriterTrait for &mut alloc::vec::Vec<u8> {
    fn write_bytes(&mut self, buf: &[u8]) -> Result<usize, PByteIoError> {
        self.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn write_all_bytes(&mut self, buf: &[u8]) -> Result<(), PByteIoError> {
        self.extend_from_slice(buf);
        Ok(())
    }

    fn write_const_bytes<const N: usize>(&mut self, buf: &[u8; N]) -> Result<(), PByteIoError> {
        self.extend_from_slice(buf);
        Ok(())
    }

    fn flush_bytes(&mut self) -> Result<(), PByteIoError> {
        Ok(())
    }

    fn reserve_capacity(&mut self, size: usize) -> Result<(), PByteIoError> {
        self.reserve(size);
        Ok(())
    }
}

impl PByteWriterTrait for &mut [u8] {
    fn write_bytes(&mut self, buf: &[u8]) -> Result<usize, PByteIoError> {
        // got from the write impl of std
        let amt = core::cmp::min(buf.len(), self.len());
        let (a, b) = core::mem::take(self).split_at_mut(amt);
        a.copy_from_slice(&buf[..amt]);
        *self = b;
        Ok(amt)
    }

    fn write_all_bytes(&mut self, buf: &[u8]) -> Result<(), PByteIoError> {
        if buf.len() > self.len() {
            return Err(PByteIoError::NotEnoughBuffer(buf.len(), self.len()));
        }
        let (a, b) = core::mem::take(self).split_at_mut(buf.len());
        a.copy_from_slice(buf);
        *self = b;

        Ok(())
    }

    fn write_const_bytes<const N: usize>(&mut self, buf: &[u8; N]) -> Result<(), PByteIoError> {
        if N > self.len() {
            return Err(PByteIoError::NotEnoughBuffer(N, self.len()));
        }
        let (a, b) = core::mem::take(self).split_at_mut(N);
        a.copy_from_slice(buf);
        *self = b;
        Ok(())
    }

    fn flush_bytes(&mut self) -> Result<(), PByteIoError> {
        Ok(())
    }

    fn reserve_capacity(&mut self, _: usize) -> Result<(), PByteIoError> {
        // can't really pre-allocate anything here
        Ok(())
    }
}

#[cfg(feature = "std")]
impl<W: std::io::Write> PByteWriterTrait for &mut std::io::BufWriter<W> {
    fn write_bytes(&mut self, buf: &[u8]) -> Result<usize, PByteIoError> {
        use std::io::Write;
        self.write(buf).map_err(PByteIoError::StdIoError)
    }

    fn write_all_bytes(&mut self, buf: &[u8]) -> Result<(), PByteIoError> {
        use std::io::Write;
        self.write_all(buf).map_err(PByteIoError::StdIoError)
    }

    fn write_const_bytes<const N: usize>(&mut self, buf: &[u8; N]) -> Result<(), PByteIoError> {
        self.write_all_bytes(buf)
    }

    fn flush_bytes(&mut self) -> Result<(), PByteIoError> {
        use std::io::Write;
        self.flush().map_err(PByteIoError::StdIoError)
    }

    fn reserve_capacity(&mut self, _: usize) -> Result<(), PByteIoError> {
        Ok(())
    }
}
