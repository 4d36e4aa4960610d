use alloc::vec::Vec;

use crate::bytestream::{PByteIoError, PByteReaderTrait, PSeekFrom};

/// An in-memory byte source, analogous to [`Cursor`](std::io::Cursor).
///
/// This is the preferred source for decoding images already resident in
/// memory, reads are plain slice copies, length queries are free and seeks
/// never fail beyond integer conversion.
///
/// # Example
/// ```
/// use pictor_core::bytestream::PCursor;
/// let cursor = PCursor::new([0x0A, 0x05]);
/// ```
pub struct PCursor<T: AsRef<[u8]>> {
    stream:   T,
    position: usize
}

impl<T: AsRef<[u8]>> PCursor<T> {
    pub fn new(stream: T) -> PCursor<T> {
        PCursor {
            stream,
            position: 0
        }
    }

    /// Return the inner buffer this cursor reads from
    pub fn inner(&self) -> &T {
        &self.stream
    }
}

impl<T: AsRef<[u8]>> PByteReaderTrait for PCursor<T> {
    #[inline(always)]
    fn read_byte_no_error(&mut self) -> u8 {
        match self.stream.as_ref().get(self.position) {
            Some(byte) => {
                self.position += 1;
                *byte
            }
            None => 0
        }
    }

    #[inline(always)]
    fn read_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), PByteIoError> {
        let stream = self.stream.as_ref();
        let remaining = stream.len().saturating_sub(self.position);

        if buf.len() > remaining {
            return Err(PByteIoError::NotEnoughBytes(buf.len(), remaining));
        }
        buf.copy_from_slice(&stream[self.position..self.position + buf.len()]);
        self.position += buf.len();

        Ok(())
    }

    #[inline(always)]
    fn read_const_bytes<const N: usize>(&mut self, buf: &mut [u8; N]) -> Result<(), PByteIoError> {
        self.read_exact_bytes(buf)
    }

    #[inline(always)]
    fn read_const_bytes_no_error<const N: usize>(&mut self, buf: &mut [u8; N]) {
        let _ = self.read_exact_bytes(buf);
    }

    #[inline(always)]
    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<usize, PByteIoError> {
        let stream = self.stream.as_ref();
        let start = core::cmp::min(self.position, stream.len());
        let end = core::cmp::min(self.position + buf.len(), stream.len());

        buf[..end - start].copy_from_slice(&stream[start..end]);
        self.position += end - start;

        Ok(end - start)
    }

    #[inline(always)]
    fn peek_bytes(&mut self, buf: &mut [u8]) -> Result<usize, PByteIoError> {
        let bytes_read = self.read_bytes(buf)?;
        self.position -= bytes_read;

        Ok(bytes_read)
    }

    #[inline(always)]
    fn peek_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), PByteIoError> {
        self.read_exact_bytes(buf)?;
        self.position -= buf.len();
        Ok(())
    }

    #[inline(always)]
    fn p_seek(&mut self, from: PSeekFrom) -> Result<u64, PByteIoError> {
        match from {
            PSeekFrom::Start(position) => {
                self.position = usize::try_from(position).map_err(PByteIoError::from)?;
            }
            PSeekFrom::End(position) => {
                let end = i64::try_from(self.stream.as_ref().len()).map_err(PByteIoError::from)?;
                let new_position = end + position;
                self.position = usize::try_from(new_position).map_err(PByteIoError::from)?;
            }
            PSeekFrom::Current(position) => {
                let current_position = i64::try_from(self.position).map_err(PByteIoError::from)?;
                let new_position = current_position + position;
                self.position = usize::try_from(new_position).map_err(PByteIoError::from)?;
            }
        }
        Ok(self.position as u64)
    }

    #[inline(always)]
    fn is_eof(&mut self) -> Result<bool, PByteIoError> {
        Ok(self.position >= self.stream.as_ref().len())
    }

    #[inline(always)]
    fn p_position(&mut self) -> Result<u64, PByteIoError> {
        Ok(self.position as u64)
    }

    fn read_remaining(&mut self, sink: &mut Vec<u8>) -> Result<usize, PByteIoError> {
        let stream = self.stream.as_ref();
        let start = core::cmp::min(self.position, stream.len());

        sink.extend_from_slice(&stream[start..]);
        self.position = stream.len();

        Ok(stream.len() - start)
    }
}

#[cfg(feature = "std")]
mod std_readers {
    use std::io::{BufRead, BufReader, Read, Seek};

    use crate::bytestream::{PByteIoError, PByteReaderTrait, PSeekFrom};

    impl<T: Read + Seek> PByteReaderTrait for BufReader<T> {
        #[inline(always)]
        fn read_byte_no_error(&mut self) -> u8 {
            let mut buf = [0];
            let _ = self.read(&mut buf);
            buf[0]
        }

        fn read_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), PByteIoError> {
            self.read_exact(buf).map_err(PByteIoError::from)
        }

        fn read_const_bytes<const N: usize>(
            &mut self, buf: &mut [u8; N]
        ) -> Result<(), PByteIoError> {
            self.read_exact(buf).map_err(PByteIoError::from)
        }

        fn read_const_bytes_no_error<const N: usize>(&mut self, buf: &mut [u8; N]) {
            let _ = self.read_exact(buf);
        }

        fn read_bytes(&mut self, buf: &mut [u8]) -> Result<usize, PByteIoError> {
            self.read(buf).map_err(PByteIoError::from)
        }

        fn peek_bytes(&mut self, buf: &mut [u8]) -> Result<usize, PByteIoError> {
            let bytes_read = self.read_bytes(buf)?;
            let converted = -i64::try_from(bytes_read).map_err(PByteIoError::from)?;
            self.seek(std::io::SeekFrom::Current(converted))
                .map_err(PByteIoError::from)?;

            Ok(bytes_read)
        }

        fn peek_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), PByteIoError> {
            self.read_exact_bytes(buf)?;
            let converted = -i64::try_from(buf.len()).map_err(PByteIoError::from)?;
            self.seek(std::io::SeekFrom::Current(converted))
                .map_err(PByteIoError::from)?;

            Ok(())
        }

        fn p_seek(&mut self, from: PSeekFrom) -> Result<u64, PByteIoError> {
            self.seek(from.to_std_seek()).map_err(PByteIoError::from)
        }

        fn is_eof(&mut self) -> Result<bool, PByteIoError> {
            self.fill_buf()
                .map(|b| b.is_empty())
                .map_err(PByteIoError::from)
        }

        fn p_position(&mut self) -> Result<u64, PByteIoError> {
            self.stream_position().map_err(PByteIoError::from)
        }

        fn read_remaining(&mut self, sink: &mut Vec<u8>) -> Result<usize, PByteIoError> {
            self.read_to_end(sink).map_err(PByteIoError::from)
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::bytestream::{PCursor, PReader, PSeekFrom};

    #[test]
    fn cursor_sequential_reads() {
        let mut reader = PReader::new(PCursor::new([1_u8, 2, 3, 4]));
        assert_eq!(reader.get_u8(), 1);
        assert_eq!(reader.get_u16_be_err().unwrap(), 0x0203);
        assert_eq!(reader.get_u8_err().unwrap(), 4);
        assert!(reader.get_u8_err().is_err());
        assert_eq!(reader.get_u8(), 0);
    }

    #[test]
    fn cursor_peek_does_not_advance() {
        let mut reader = PReader::new(PCursor::new([9_u8, 8, 7]));
        assert_eq!(reader.peek_at(1, 2).unwrap(), &[8, 7]);
        assert_eq!(reader.position().unwrap(), 0);
        assert_eq!(reader.get_u8(), 9);
    }

    #[test]
    fn cursor_seek_from_end() {
        let mut reader = PReader::new(PCursor::new([1_u8, 2, 3, 4, 5]));
        reader.seek(PSeekFrom::End(-2)).unwrap();
        assert_eq!(reader.get_u8(), 4);
        // seeking before byte zero is an error
        assert!(reader.seek(PSeekFrom::End(-10)).is_err());
    }
}
