//! Frequency header codec
//!
//! Layout, integers big-endian:
//!
//! ```text
//! u8                unique_count - 1
//! unique_count x    (u8 symbol, u32 frequency)
//! ```
//!
//! The tree itself is never stored; the decoder rebuilds it from the counts.

use std::io::{self, Read, Write};

use tracing::debug;

use crate::error::CompressError;
use crate::frequency::FrequencyTable;

const ENTRY_SIZE: usize = 5;

/// Serialized size of a header for `unique` symbols.
pub fn header_len(unique: usize) -> usize {
    1 + unique * ENTRY_SIZE
}

/// Write the header for a non-empty table. Returns the number of bytes written.
pub fn write_header<W: Write>(
    table: &FrequencyTable,
    sink: &mut W,
) -> Result<usize, CompressError> {
    let unique = table.unique_count();
    if unique == 0 {
        return Err(CompressError::InvalidHeader("no symbols to record".into()));
    }

    let mut output = Vec::with_capacity(header_len(unique));
    output.push((unique - 1) as u8);
    for (symbol, count) in table.iter() {
        let count =
            u32::try_from(count).map_err(|_| CompressError::FrequencyOverflow(symbol))?;
        output.push(symbol);
        output.extend_from_slice(&count.to_be_bytes());
    }
    sink.write_all(&output)?;
    debug!(unique, bytes = output.len(), "header written");
    Ok(output.len())
}

/// Read a header and rebuild the frequency table.
///
/// Returns `Ok(None)` if the source is empty, which is how an empty input
/// is represented.
pub fn read_header<R: Read>(source: &mut R) -> Result<Option<FrequencyTable>, CompressError> {
    let mut first = [0u8; 1];
    if read_full(source, &mut first)? == 0 {
        return Ok(None);
    }
    let unique = first[0] as usize + 1;

    let mut entries = vec![0u8; unique * ENTRY_SIZE];
    let got = read_full(source, &mut entries)?;
    if got < entries.len() {
        return Err(CompressError::TruncatedHeader {
            expected: header_len(unique),
            actual: 1 + got,
        });
    }

    let mut table = FrequencyTable::new();
    for entry in entries.chunks_exact(ENTRY_SIZE) {
        let symbol = entry[0];
        let count = u32::from_be_bytes([entry[1], entry[2], entry[3], entry[4]]);
        if count == 0 {
            return Err(CompressError::InvalidHeader(format!(
                "symbol 0x{symbol:02x} has zero frequency"
            )));
        }
        if !table.insert(symbol, count as u64) {
            return Err(CompressError::InvalidHeader(format!(
                "symbol 0x{symbol:02x} listed twice"
            )));
        }
    }
    debug!(unique, total = table.total(), "header read");
    Ok(Some(table))
}

/// Fill `buf` as far as the source allows; returns the bytes read.
fn read_full<R: Read>(source: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match source.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
