//! Integration tests for huffzip

use std::io::{self, Cursor, Read, Seek, SeekFrom, Write};

use huffzip::codec::{self, Encoder};
use huffzip::config::CompressionConfig;
use huffzip::error::CompressError;
use huffzip::frequency::FrequencyTable;
use huffzip::header;
use huffzip::*;
use rand::{Rng, SeedableRng};

fn roundtrip(data: &[u8]) -> Vec<u8> {
    let compressed = compress(data).unwrap();
    let restored = decompress(&compressed).unwrap();
    assert_eq!(restored, data);
    compressed
}

#[test]
fn test_scenario_abcd() {
    let data = b"AAAAAAAABBBCCD";
    let compressed = roundtrip(data);
    assert_eq!(compressed[0] as usize + 1, 4);
    assert_eq!(compressed.len(), 21 + 3);
}

#[test]
fn test_scenario_empty() {
    let compressed = roundtrip(b"");
    assert!(compressed.is_empty());
}

#[test]
fn test_scenario_single_repeated() {
    let compressed = roundtrip(b"ZZZZZ");
    assert_eq!(compressed, vec![0, b'Z', 0, 0, 0, 5]);
}

#[test]
fn test_scenario_equal_weights() {
    let first = roundtrip(b"AABB");
    let second = compress(b"AABB").unwrap();
    assert_eq!(first, second);
    // A=0 B=1: 0011 padded
    assert_eq!(&first[11..], &[0x30]);
}

#[test]
fn test_scenario_corrupted_body() {
    let mut compressed = compress(b"AAAAAAAABBBCCD").unwrap();
    compressed.truncate(compressed.len() - 2);
    let mut out = Vec::new();
    let err = codec::decode(&mut Cursor::new(compressed), &mut out).unwrap_err();
    assert!(matches!(err, CompressError::CorruptStream(_)));
    assert!(err.is_corruption());
    assert!(out.len() < 14);
}

#[test]
fn test_corrupted_header() {
    let err = decompress(&[2, b'a', 0, 0, 0, 1]).unwrap_err();
    assert!(matches!(err, CompressError::TruncatedHeader { .. }));
    let err = decompress(&[0, b'a', 0, 0, 0, 0]).unwrap_err();
    assert!(matches!(err, CompressError::InvalidHeader(_)));
}

#[test]
fn test_random_roundtrip_and_determinism() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(7);
    for len in [1usize, 2, 3, 17, 255, 1000, 4096] {
        let alphabet = rng.gen_range(1..=256u32);
        let data: Vec<u8> = (0..len)
            .map(|_| rng.gen_range(0..alphabet) as u8)
            .collect();
        let first = roundtrip(&data);
        assert_eq!(first, compress(&data).unwrap(), "nondeterministic for len {len}");
    }
}

#[test]
fn test_skewed_distribution_roundtrip() {
    let mut data = Vec::new();
    for (i, b) in (0..=255u8).enumerate() {
        data.extend(std::iter::repeat(b).take(1 + (i * i) % 97));
    }
    roundtrip(&data);
}

#[test]
fn test_prefix_property_and_header_invariants() {
    let data = b"the quick brown fox jumps over the lazy dog".repeat(20);
    let encoder = Encoder::from_table(FrequencyTable::from_bytes(&data), 4096);
    let codes = encoder.codes().unwrap();
    assert!(codes.is_prefix_free());
    assert_eq!(codes.len(), encoder.frequencies().unique_count());

    let compressed = compress(&data).unwrap();
    let table = header::read_header(&mut Cursor::new(&compressed))
        .unwrap()
        .unwrap();
    assert_eq!(compressed[0] as usize + 1, table.unique_count());
    assert_eq!(table.total(), data.len() as u64);
    assert_eq!(&table, encoder.frequencies());
}

#[test]
fn test_file_streaming() {
    let data = b"streaming through real files ".repeat(500);
    let mut input = tempfile::tempfile().unwrap();
    input.write_all(&data).unwrap();
    input.seek(SeekFrom::Start(0)).unwrap();

    let compressor = Compressor::new(CompressionConfig {
        read_buffer_size: 100,
        ..CompressionConfig::default()
    });
    let mut packed = tempfile::tempfile().unwrap();
    let summary = compressor
        .compress_stream(&mut input, data.len() as u64, &mut packed)
        .unwrap();
    assert_eq!(packed.metadata().unwrap().len(), summary.total_bytes());

    packed.seek(SeekFrom::Start(0)).unwrap();
    let mut restored = Vec::new();
    let n = compressor.decompress_stream(&mut packed, &mut restored).unwrap();
    assert_eq!(n, data.len() as u64);
    assert_eq!(restored, data);
}

#[test]
fn test_output_serializes() {
    let output = Compressor::default().compress(b"serde me").unwrap();
    let json = serde_json::to_string(&output).unwrap();
    let back: CompressedOutput = serde_json::from_str(&json).unwrap();
    assert_eq!(back.data, output.data);
    assert_eq!(back.metadata.unique_symbols, 6);
}

/// Yields a different byte sequence after every rewind to the start.
struct ChangingSource {
    passes: Vec<&'static [u8]>,
    current: Cursor<&'static [u8]>,
    pass: usize,
}

impl ChangingSource {
    fn new(passes: Vec<&'static [u8]>) -> Self {
        let current = Cursor::new(passes[0]);
        Self {
            passes,
            current,
            pass: 0,
        }
    }
}

impl Read for ChangingSource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.current.read(buf)
    }
}

impl Seek for ChangingSource {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        if let SeekFrom::Start(_) = pos {
            self.pass = (self.pass + 1).min(self.passes.len() - 1);
            self.current = Cursor::new(self.passes[self.pass]);
        }
        self.current.seek(pos)
    }
}

#[test]
fn test_verify_detects_source_changed_between_passes() {
    let compressor = Compressor::new(CompressionConfig {
        verify: true,
        ..CompressionConfig::default()
    });
    let mut source = ChangingSource::new(vec![&b"AAB"[..], &b"BAA"[..]]);
    let mut packed = Vec::new();
    let err = compressor
        .compress_stream(&mut source, 3, &mut packed)
        .unwrap_err();
    assert!(matches!(err, CompressError::VerifyFailed(_)));
    assert!(packed.is_empty());
}

#[test]
fn test_verify_off_encodes_second_pass() {
    let compressor = Compressor::default();
    let mut source = ChangingSource::new(vec![&b"AAB"[..], &b"BAA"[..]]);
    let mut packed = Vec::new();
    compressor
        .compress_stream(&mut source, 3, &mut packed)
        .unwrap();
    assert_eq!(decompress(&packed).unwrap(), b"BAA");
}

#[test]
fn test_verify_streaming_stable_source() {
    let data = b"verified streaming ".repeat(200);
    let compressor = Compressor::new(CompressionConfig {
        verify: true,
        read_buffer_size: 64,
        ..CompressionConfig::default()
    });
    let mut packed = Vec::new();
    compressor
        .compress_stream(&mut Cursor::new(&data), data.len() as u64, &mut packed)
        .unwrap();
    assert_eq!(packed, compress(&data).unwrap());
}
