//! Encode and decode pipelines over `Read` / `Write`
//!
//! Encoding is two passes over the input: `Encoder::analyze` counts symbols
//! and derives the codes, then `Encoder::encode` writes header and body from
//! a second read of the same bytes. Decoding is a single pass.

use std::io::{Cursor, Read, Seek, SeekFrom, Write};

use tracing::{debug, warn};

use crate::bitpack;
use crate::codes::CodeTable;
use crate::config::CompressionConfig;
use crate::error::CompressError;
use crate::frequency::FrequencyTable;
use crate::header;
use crate::stream::ChecksumSink;
use crate::tree::HuffTree;

/// Sizes of one encoded artifact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncodeSummary {
    pub header_bytes: u64,
    pub body_bits: u64,
}

impl EncodeSummary {
    pub fn body_bytes(&self) -> u64 {
        (self.body_bits + 7) / 8
    }

    pub fn total_bytes(&self) -> u64 {
        self.header_bytes + self.body_bytes()
    }

    /// Compressed size over `input_len`; 1.0 for empty input.
    pub fn ratio(&self, input_len: u64) -> f64 {
        if input_len == 0 {
            1.0
        } else {
            self.total_bytes() as f64 / input_len as f64
        }
    }
}

/// Result of analyzing an input: its counts, tree and codes.
#[derive(Debug, Clone)]
pub struct Encoder {
    table: FrequencyTable,
    tree: Option<HuffTree>,
    codes: Option<CodeTable>,
    buffer_size: usize,
    /// Adler-32 of the analysis pass, when the input was read from a source.
    checksum: Option<u32>,
    verify: bool,
}

impl Encoder {
    /// First pass: count `len` bytes of `source` and derive the codes.
    pub fn analyze<R: Read>(
        source: &mut R,
        len: u64,
        config: &CompressionConfig,
    ) -> Result<Self, CompressError> {
        config.check_size(len)?;
        let (table, checksum) =
            FrequencyTable::scan_checksummed(source, len, config.read_buffer_size)?;
        let mut encoder =
            Self::from_table(table, config.read_buffer_size).with_verify(config.verify);
        encoder.checksum = Some(checksum);
        Ok(encoder)
    }

    pub fn from_table(table: FrequencyTable, buffer_size: usize) -> Self {
        let tree = HuffTree::build(&table);
        let codes = tree.as_ref().map(CodeTable::from_tree);
        Self {
            table,
            tree,
            codes,
            buffer_size,
            checksum: None,
            verify: false,
        }
    }

    /// Decode the packed body before writing it and check that it matches
    /// the input, including that both passes read the same bytes.
    pub fn with_verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    pub fn frequencies(&self) -> &FrequencyTable {
        &self.table
    }

    pub fn tree(&self) -> Option<&HuffTree> {
        self.tree.as_ref()
    }

    pub fn codes(&self) -> Option<&CodeTable> {
        self.codes.as_ref()
    }

    /// Size the artifact will have, without encoding anything.
    pub fn predicted_summary(&self) -> EncodeSummary {
        match &self.codes {
            None => EncodeSummary::default(),
            Some(codes) => EncodeSummary {
                header_bytes: header::header_len(self.table.unique_count()) as u64,
                body_bits: codes.encoded_bits(&self.table),
            },
        }
    }

    /// Second pass: write header and body for the bytes counted by `analyze`.
    ///
    /// `source` must yield the same bytes again. Empty input writes nothing.
    /// With verification on, nothing is written unless the check passes.
    pub fn encode<R: Read, W: Write>(
        &self,
        source: &mut R,
        sink: &mut W,
    ) -> Result<EncodeSummary, CompressError> {
        let codes = match &self.codes {
            None => return Ok(EncodeSummary::default()),
            Some(codes) => codes,
        };
        let total = self.table.total();

        let (header_bytes, body_bits) = if self.verify {
            let mut body = Vec::with_capacity(self.predicted_summary().body_bytes() as usize);
            let packed = bitpack::pack_body(source, total, codes, &mut body, self.buffer_size)?;
            self.check_body(&body, packed.checksum)?;
            let header_bytes = header::write_header(&self.table, sink)?;
            sink.write_all(&body)?;
            (header_bytes, packed.bits)
        } else {
            let header_bytes = header::write_header(&self.table, sink)?;
            let packed = bitpack::pack_body(source, total, codes, sink, self.buffer_size)?;
            (header_bytes, packed.bits)
        };

        let summary = EncodeSummary {
            header_bytes: header_bytes as u64,
            body_bits,
        };
        debug!(input = total, output = summary.total_bytes(), "encode finished");
        Ok(summary)
    }

    fn check_body(&self, body: &[u8], packed_checksum: u32) -> Result<(), CompressError> {
        if let Some(analyzed) = self.checksum {
            if analyzed != packed_checksum {
                return Err(CompressError::VerifyFailed(
                    "input changed between analysis and encoding".into(),
                ));
            }
        }
        let tree = match &self.tree {
            None => return Ok(()),
            Some(tree) => tree,
        };
        let mut decoded = ChecksumSink::default();
        bitpack::unpack_body(tree, self.table.total(), &mut Cursor::new(body), &mut decoded)?;
        if decoded.written != self.table.total() || decoded.checksum.finish() != packed_checksum {
            return Err(CompressError::VerifyFailed(
                "decoded body differs from input".into(),
            ));
        }
        debug!(symbols = decoded.written, "verified body");
        Ok(())
    }
}

/// Encode `len` bytes from a seekable source, rewinding between passes.
pub fn encode_seekable<R: Read + Seek, W: Write>(
    source: &mut R,
    len: u64,
    sink: &mut W,
    config: &CompressionConfig,
) -> Result<EncodeSummary, CompressError> {
    let start = source.stream_position()?;
    let encoder = Encoder::analyze(source, len, config)?;
    source.seek(SeekFrom::Start(start))?;
    encoder.encode(source, sink)
}

/// Decode one artifact from `source` into `sink`. Returns the symbols written.
///
/// An empty source is the encoding of empty input and decodes to nothing.
pub fn decode<R: Read, W: Write>(source: &mut R, sink: &mut W) -> Result<u64, CompressError> {
    let table = match header::read_header(source)? {
        None => return Ok(0),
        Some(table) => table,
    };
    let tree = HuffTree::build(&table)
        .ok_or_else(|| CompressError::InvalidHeader("zero total weight".into()))?;
    let decoded = bitpack::unpack_body(&tree, table.total(), source, sink)?;

    let mut trailing = [0u8; 1];
    if matches!(source.read(&mut trailing), Ok(n) if n > 0) {
        warn!("ignoring trailing bytes after compressed body");
    }
    Ok(decoded)
}

/// Encode an in-memory buffer.
pub fn encode_bytes(data: &[u8], config: &CompressionConfig) -> Result<Vec<u8>, CompressError> {
    let mut output = Vec::new();
    encode_seekable(&mut Cursor::new(data), data.len() as u64, &mut output, config)?;
    Ok(output)
}

/// Decode an in-memory artifact.
pub fn decode_bytes(data: &[u8]) -> Result<Vec<u8>, CompressError> {
    let mut output = Vec::new();
    decode(&mut Cursor::new(data), &mut output)?;
    Ok(output)
}
