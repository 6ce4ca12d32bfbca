//! Bit-level packing of codes into the body and tree-walking decode
//!
//! Codes are written MSB-first; the final byte is padded with zero bits. The
//! pad length is not stored: the decoder stops after the expected number of
//! symbols and never looks at the remaining bits.

use std::io::{self, BufWriter, Read, Write};

use bitstream_io::{BigEndian, BitRead, BitReader, BitWrite, BitWriter};
use tracing::debug;

use crate::codes::CodeTable;
use crate::error::CompressError;
use crate::stream::{self, Adler32};
use crate::tree::HuffTree;

/// What `pack_body` consumed and produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackedBody {
    /// Body length in bits, excluding padding.
    pub bits: u64,
    /// Adler-32 of the input bytes that were encoded.
    pub checksum: u32,
}

/// Encode exactly `len` bytes from `source` into `sink`.
pub fn pack_body<R: Read, W: Write>(
    source: &mut R,
    len: u64,
    codes: &CodeTable,
    sink: &mut W,
    buffer_size: usize,
) -> Result<PackedBody, CompressError> {
    let mut buffered = BufWriter::new(sink);
    let mut bits = 0u64;
    let mut checksum = Adler32::new();
    {
        let mut writer = BitWriter::endian(&mut buffered, BigEndian);
        stream::for_each_chunk(source, len, buffer_size, |chunk| {
            checksum.update(chunk);
            for &symbol in chunk {
                let code = codes.get(symbol).ok_or(CompressError::MissingCode(symbol))?;
                for &bit in code {
                    writer.write_bit(bit)?;
                }
                bits += code.len() as u64;
            }
            Ok(())
        })?;
        writer.byte_align()?;
    }
    buffered.flush()?;

    debug!(symbols = len, bits, bytes = (bits + 7) / 8, "body packed");
    Ok(PackedBody {
        bits,
        checksum: checksum.finish(),
    })
}

/// Decode `total` symbols from `source` by walking `tree`.
///
/// A single-leaf tree needs no body: its symbol is emitted `total` times and
/// `source` is not read. Returns the number of symbols written.
pub fn unpack_body<R: Read, W: Write>(
    tree: &HuffTree,
    total: u64,
    source: &mut R,
    sink: &mut W,
) -> Result<u64, CompressError> {
    let mut out = BufWriter::new(sink);

    if let Some(symbol) = tree.single_symbol() {
        let chunk = [symbol; 4096];
        let mut left = total;
        while left > 0 {
            let n = left.min(chunk.len() as u64) as usize;
            out.write_all(&chunk[..n])?;
            left -= n as u64;
        }
        out.flush()?;
        return Ok(total);
    }

    let root = tree.root();
    let mut node = root;
    let mut decoded = 0u64;
    let mut reader = BitReader::endian(&mut *source, BigEndian);
    while decoded < total {
        let bit = match reader.read_bit() {
            Ok(bit) => bit,
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                return Err(CompressError::CorruptStream(format!(
                    "body ended after {decoded} of {total} symbols"
                )));
            }
            Err(e) => return Err(e.into()),
        };
        node = node.child(bit).ok_or_else(|| {
            CompressError::CorruptStream(format!(
                "bit {} requested a missing child after {decoded} symbols",
                bit as u8
            ))
        })?;
        if let Some(symbol) = node.symbol() {
            out.write_all(&[symbol])?;
            decoded += 1;
            node = root;
        }
    }
    out.flush()?;
    debug!(symbols = decoded, "body unpacked");
    Ok(decoded)
}
