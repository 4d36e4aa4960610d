/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! The PCX variant of run length encoding
//!
//! A control byte with both top bits set encodes a run, its low six
//! bits give the run length and the following byte the value. Any other
//! byte is a literal. Values above `0xBF` can therefore only be
//! represented as runs, even runs of length one.

use pictor_core::bytestream::{PByteReaderTrait, PReader};

use crate::errors::PcxDecoderErrors;

/// A run that has emitted its first byte and still owes `remaining` more
struct Run {
    value:     u8,
    remaining: u8
}

/// Byte oriented run length decoder
///
/// The decoder is either idle or in the middle of a pending run, one
/// instance serves exactly one compressed stream.
pub(crate) struct RleDecoder {
    run: Option<Run>
}

impl RleDecoder {
    pub(crate) fn new() -> RleDecoder {
        RleDecoder { run: None }
    }

    /// Produce the next decompressed byte
    pub(crate) fn read_byte<T: PByteReaderTrait>(
        &mut self, stream: &mut PReader<T>
    ) -> Result<u8, PcxDecoderErrors> {
        if let Some(run) = &mut self.run {
            let value = run.value;
            run.remaining -= 1;
            if run.remaining == 0 {
                self.run = None;
            }
            return Ok(value);
        }

        loop {
            let byte = stream.get_u8_err()?;

            if byte == 0xC0 {
                // a zero length run, absorb it and keep scanning
                continue;
            }
            if byte & 0xC0 == 0xC0 {
                let length = byte & 0x3F;
                let value = stream.get_u8_err()?;

                // a length of one never enters the pending state
                if length > 1 {
                    self.run = Some(Run {
                        value,
                        remaining: length - 1
                    });
                }
                return Ok(value);
            }
            // a literal
            return Ok(byte);
        }
    }

    /// Declare decompression complete
    ///
    /// Errors if a run is still owing bytes, which means the stream
    /// declared more data than the image has room for
    pub(crate) fn finish(self) -> Result<(), PcxDecoderErrors> {
        if self.run.is_some() {
            return Err(PcxDecoderErrors::PendingRleRun);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use pictor_core::bytestream::{PCursor, PReader};

    use super::RleDecoder;

    fn decode_all(data: Vec<u8>, count: usize) -> (Vec<u8>, RleDecoder, PReader<PCursor<Vec<u8>>>) {
        let mut stream = PReader::new(PCursor::new(data));
        let mut decoder = RleDecoder::new();
        let mut out = Vec::new();
        for _ in 0..count {
            out.push(decoder.read_byte(&mut stream).unwrap());
        }
        (out, decoder, stream)
    }

    #[test]
    fn literals_pass_through_unchanged() {
        let (out, decoder, _) = decode_all(vec![0x00, 0x3F, 0xBF, 0x01], 4);
        assert_eq!(out, [0x00, 0x3F, 0xBF, 0x01]);
        assert!(decoder.finish().is_ok());
    }

    #[test]
    fn run_emits_exact_count() {
        // run of 5 bytes of 0xAB followed by a literal
        let (out, decoder, _) = decode_all(vec![0xC5, 0xAB, 0x11], 6);
        assert_eq!(out, [0xAB, 0xAB, 0xAB, 0xAB, 0xAB, 0x11]);
        assert!(decoder.finish().is_ok());
    }

    #[test]
    fn single_count_run_never_pends() {
        let (out, decoder, _) = decode_all(vec![0xC1, 0xFF], 1);
        assert_eq!(out, [0xFF]);
        assert!(decoder.finish().is_ok());
    }

    #[test]
    fn zero_length_marker_is_absorbed() {
        // 0xC0 contributes no output bytes at all
        let (out, decoder, _) = decode_all(vec![0xC0, 0xC0, 0x42], 1);
        assert_eq!(out, [0x42]);
        assert!(decoder.finish().is_ok());
    }

    #[test]
    fn finish_rejects_pending_run() {
        let (out, decoder, _) = decode_all(vec![0xC3, 0x07], 2);
        assert_eq!(out, [0x07, 0x07]);
        assert!(decoder.finish().is_err());
    }
}
