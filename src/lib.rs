//! huffzip: lossless byte-stream compression with static Huffman coding.
//!
//! An input is compressed in two phases:
//! - count the occurrences of every byte value
//! - build a Huffman tree from the counts, then write the counts as a header
//!   followed by the bit-packed codes
//!
//! The tree is not stored. Tree construction breaks weight ties by a fixed
//! rule, so the decoder rebuilds the exact same tree from the header.

pub mod bitpack;
pub mod codec;
pub mod codes;
pub mod config;
pub mod error;
pub mod frequency;
pub mod header;
pub mod priority;
pub mod stream;
pub mod tree;

use std::io::{Read, Seek, Write};

use tracing::debug;

use crate::codec::{EncodeSummary, Encoder};
use crate::config::CompressionConfig;
use crate::error::CompressError;
use crate::frequency::FrequencyTable;

/// Compressed output container
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CompressedOutput {
    pub original_size: usize,
    pub compressed_size: usize,
    pub data: Vec<u8>,
    pub ratio: f64,
    pub metadata: CompressionMetadata,
}

/// Metadata about the compression process
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CompressionMetadata {
    pub entropy_bits: f64,
    pub unique_symbols: usize,
    pub header_size: usize,
    pub tree_depth: usize,
}

/// The main compressor engine
#[derive(Debug, Clone, Default)]
pub struct Compressor {
    config: CompressionConfig,
}

impl Compressor {
    /// Create a new compressor with the given configuration
    pub fn new(config: CompressionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CompressionConfig {
        &self.config
    }

    /// Compress an in-memory buffer
    pub fn compress(&self, data: &[u8]) -> Result<CompressedOutput, CompressError> {
        self.config.check_size(data.len() as u64)?;
        let table = FrequencyTable::from_bytes(data);
        let encoder = Encoder::from_table(table, self.config.read_buffer_size);

        let predicted = encoder.predicted_summary().total_bytes() as usize;
        let mut compressed = Vec::with_capacity(predicted);
        let summary = encoder.encode(&mut std::io::Cursor::new(data), &mut compressed)?;

        if self.config.verify {
            self.verify(data, &compressed)?;
        }

        let ratio = summary.ratio(data.len() as u64);
        let table = encoder.frequencies();

        Ok(CompressedOutput {
            original_size: data.len(),
            compressed_size: compressed.len(),
            data: compressed,
            ratio,
            metadata: CompressionMetadata {
                entropy_bits: table.entropy_bits(),
                unique_symbols: table.unique_count(),
                header_size: summary.header_bytes as usize,
                tree_depth: encoder.tree().map_or(0, |t| t.depth()),
            },
        })
    }

    /// Decompress an artifact produced by `compress`
    pub fn decompress(&self, data: &[u8]) -> Result<Vec<u8>, CompressError> {
        codec::decode_bytes(data)
    }

    /// Compress `len` bytes of a seekable source into `sink`
    pub fn compress_stream<R: Read + Seek, W: Write>(
        &self,
        source: &mut R,
        len: u64,
        sink: &mut W,
    ) -> Result<EncodeSummary, CompressError> {
        codec::encode_seekable(source, len, sink, &self.config)
    }

    /// Decompress from `source` into `sink`, returning the number of bytes written
    pub fn decompress_stream<R: Read, W: Write>(
        &self,
        source: &mut R,
        sink: &mut W,
    ) -> Result<u64, CompressError> {
        codec::decode(source, sink)
    }

    fn verify(&self, original: &[u8], compressed: &[u8]) -> Result<(), CompressError> {
        let restored = codec::decode_bytes(compressed)?;
        check_roundtrip(original, &restored)?;
        debug!(bytes = original.len(), "verified roundtrip");
        Ok(())
    }
}

fn check_roundtrip(original: &[u8], restored: &[u8]) -> Result<(), CompressError> {
    if let Some(at) = original.iter().zip(restored).position(|(a, b)| a != b) {
        return Err(CompressError::VerifyFailed(format!(
            "roundtrip mismatch at byte {at}"
        )));
    }
    if original.len() != restored.len() {
        return Err(CompressError::VerifyFailed(format!(
            "roundtrip produced {} bytes, expected {}",
            restored.len(),
            original.len()
        )));
    }
    Ok(())
}

/// Compress with the default configuration
pub fn compress(data: &[u8]) -> Result<Vec<u8>, CompressError> {
    Compressor::default().compress(data).map(|out| out.data)
}

/// Decompress an artifact
pub fn decompress(data: &[u8]) -> Result<Vec<u8>, CompressError> {
    codec::decode_bytes(data)
}
