/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! A simple byte reader with endian aware reads
//!
//! The reader wraps anything implementing [`std::io::Read`], that is in-memory
//! slices, files, sockets etc., and consumes it strictly in order.
//! Nothing is read ahead of what callers ask for so a decoder can tell
//! exactly where its input ended.
use std::fmt::{Debug, Display, Formatter};
use std::io::{ErrorKind, Read};

pub enum ByteIoError {
    /// The underlying source failed
    StdIoError(std::io::Error),
    // requested, read
    NotEnoughBytes(usize, usize)
}

impl Debug for ByteIoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ByteIoError::StdIoError(err) => {
                writeln!(f, "Underlying I/O error {}", err)
            }
            ByteIoError::NotEnoughBytes(expected, found) => {
                writeln!(f, "Not enough bytes, expected {expected} but found {found}")
            }
        }
    }
}

impl Display for ByteIoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{:?}", self)
    }
}

impl std::error::Error for ByteIoError {}

impl From<std::io::Error> for ByteIoError {
    fn from(value: std::io::Error) -> Self {
        ByteIoError::StdIoError(value)
    }
}

pub struct ByteReader<R: Read> {
    inner:    R,
    position: u64
}

impl<R: Read> ByteReader<R> {
    pub fn new(source: R) -> ByteReader<R> {
        ByteReader {
            inner:    source,
            position: 0
        }
    }
    /// Number of bytes consumed from the source so far
    pub const fn position(&self) -> u64 {
        self.position
    }

    /// Fill `buf` as far as the source allows, returning
    /// how many bytes were written.
    ///
    /// Interrupted reads are retried, any other error is returned.
    fn fill(&mut self, buf: &mut [u8]) -> Result<usize, ByteIoError> {
        let mut read = 0;

        while read < buf.len() {
            match self.inner.read(&mut buf[read..]) {
                Ok(0) => break,
                Ok(n) => read += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(ByteIoError::StdIoError(e))
            }
        }
        self.position += read as u64;

        Ok(read)
    }

    /// Read exactly `buf.len()` bytes or return
    /// [`ByteIoError::NotEnoughBytes`]
    pub fn read_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), ByteIoError> {
        let read = self.fill(buf)?;

        if read != buf.len() {
            return Err(ByteIoError::NotEnoughBytes(buf.len(), read));
        }
        Ok(())
    }

    #[inline]
    pub fn read_fixed_bytes_or_error<const N: usize>(&mut self) -> Result<[u8; N], ByteIoError> {
        let mut byte_store: [u8; N] = [0; N];
        self.read_exact_bytes(&mut byte_store)?;
        Ok(byte_store)
    }

    /// Append exactly `num` bytes from the source to `out`
    ///
    /// On failure `out` may have been extended with
    /// the bytes that were available.
    pub fn read_into_vec(&mut self, out: &mut Vec<u8>, num: usize) -> Result<(), ByteIoError> {
        let start = out.len();
        // grow in bounded steps so a lying length field cannot
        // make us allocate gigabytes before the source runs dry
        const STEP: usize = 1 << 16;

        let mut remaining = num;

        while remaining > 0 {
            let step = remaining.min(STEP);
            let old_len = out.len();

            out.resize(old_len + step, 0);

            let read = self.fill(&mut out[old_len..])?;

            if read != step {
                out.truncate(old_len + read);
                return Err(ByteIoError::NotEnoughBytes(num, out.len() - start));
            }
            remaining -= step;
        }
        Ok(())
    }

    /// Consume and count every byte left in the source
    pub fn drain(&mut self) -> Result<u64, ByteIoError> {
        let mut sink = [0; 512];
        let mut total = 0;

        loop {
            let read = self.fill(&mut sink)?;

            if read == 0 {
                return Ok(total);
            }
            total += read as u64;
        }
    }
}

macro_rules! get_single_type {
    ($name:tt,$int_type:tt) => {
        impl<R: Read> ByteReader<R> {
            #[doc=concat!("Read ",stringify!($int_type)," as a big endian integer")]
            #[doc=concat!("Returning an error if the underlying buffer cannot support a ",stringify!($int_type)," read.")]
            #[inline]
            pub fn $name(&mut self) -> Result<$int_type, ByteIoError> {
                const SIZE_OF_VAL: usize = core::mem::size_of::<$int_type>();

                let space = self.read_fixed_bytes_or_error::<SIZE_OF_VAL>()?;

                Ok($int_type::from_be_bytes(space))
            }
        }
    };
}

get_single_type!(get_u32_be_err, u32);
get_single_type!(get_u64_be_err, u64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_big_endian_reads_track_position() {
        let data = [0x12, 0x34, 0x56, 0x78, 0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
        let mut reader = ByteReader::new(&data[..]);

        assert_eq!(reader.get_u32_be_err().unwrap(), 0x1234_5678);
        assert_eq!(reader.position(), 4);
        assert_eq!(reader.get_u64_be_err().unwrap(), 0x8950_4E47_0D0A_1A0A);
        assert_eq!(reader.position(), 12);
        assert_eq!(reader.drain().unwrap(), 0);
    }

    #[test]
    fn test_short_read_reports_counts() {
        let data = [1, 2, 3];
        let mut reader = ByteReader::new(&data[..]);

        match reader.get_u32_be_err() {
            Err(ByteIoError::NotEnoughBytes(4, 3)) => (),
            other => panic!("unexpected result {:?}", other)
        }
    }

    #[test]
    fn test_read_into_vec_appends() {
        let data: Vec<u8> = (0..200_000_u32).map(|x| x as u8).collect();
        let mut reader = ByteReader::new(data.as_slice());
        let mut out = vec![9];

        reader.read_into_vec(&mut out, 150_000).unwrap();

        assert_eq!(out.len(), 150_001);
        assert_eq!(out[0], 9);
        assert_eq!(&out[1..], &data[..150_000]);
        assert_eq!(reader.drain().unwrap(), 50_000);
    }

    #[test]
    fn test_read_into_vec_short() {
        let data = [7_u8; 10];
        let mut reader = ByteReader::new(&data[..]);
        let mut out = Vec::new();

        assert!(matches!(
            reader.read_into_vec(&mut out, 11),
            Err(ByteIoError::NotEnoughBytes(11, 10))
        ));
        assert_eq!(out.len(), 10);
    }
}
