//! Chunked input reading and running checksums shared by both encode passes

use std::io::{self, Read, Write};

use crate::error::CompressError;

/// Feed exactly `len` bytes of `source` to `f`, `buffer_size` bytes at a time.
///
/// A source that ends early is reported as a size mismatch.
pub fn for_each_chunk<R, F>(
    source: &mut R,
    len: u64,
    buffer_size: usize,
    mut f: F,
) -> Result<(), CompressError>
where
    R: Read,
    F: FnMut(&[u8]) -> Result<(), CompressError>,
{
    let mut buf = vec![0u8; buffer_size.max(1)];
    let mut limited = source.take(len);
    let mut consumed = 0u64;
    loop {
        let n = match limited.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        f(&buf[..n])?;
        consumed += n as u64;
    }
    if consumed != len {
        return Err(CompressError::SizeMismatch {
            expected: len,
            actual: consumed,
        });
    }
    Ok(())
}

const MOD_ADLER: u32 = 65521;

/// Running Adler-32 over everything passed to `update`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Adler32 {
    s1: u32,
    s2: u32,
}

impl Default for Adler32 {
    fn default() -> Self {
        Self { s1: 1, s2: 0 }
    }
}

impl Adler32 {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.s1 = (self.s1 + byte as u32) % MOD_ADLER;
            self.s2 = (self.s2 + self.s1) % MOD_ADLER;
        }
    }

    pub fn finish(&self) -> u32 {
        (self.s2 << 16) | self.s1
    }
}

/// A sink that only checksums and counts what is written to it.
#[derive(Debug, Default)]
pub struct ChecksumSink {
    pub checksum: Adler32,
    pub written: u64,
}

impl Write for ChecksumSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.checksum.update(buf);
        self.written += buf.len() as u64;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
