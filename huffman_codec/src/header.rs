//! Self-describing stream header: bits-to-trim, symbol count, and the code table itself.
//!
//! Layout (bit-packed, no byte alignment between fields — see SPEC_FULL.md §4.3):
//!
//! ```text
//! byte 0        bits_to_trim (used-bit count in the final payload byte)
//! bytes 1-2     symbol count, little-endian
//! byte 3+       N entries of: 8-bit symbol, 8-bit code length L, L-bit code
//! ```

use crate::bitio::{BitReader, BitWriter};
use common::CodecError;

/// Writes the header (with a placeholder `bits_to_trim` byte, patched in by the caller once the
/// payload length is known) for `table` into `writer`.
pub fn write_header(writer: &mut BitWriter, table: &[(u8, Vec<bool>)]) -> Result<(), CodecError> {
    if table.len() > 65_536 {
        return Err(CodecError::TableOverflow {
            entries: table.len(),
        });
    }

    writer.write_uint(0, 8); // bits_to_trim placeholder, patched after the payload is written
    writer.write_uint(table.len() as u32, 16);

    for (symbol, code) in table {
        writer.write_uint(*symbol as u32, 8);
        if code.is_empty() || code.len() > 255 {
            return Err(CodecError::MalformedStream(format!(
                "code length {} out of range 1..=255",
                code.len()
            )));
        }
        writer.write_uint(code.len() as u32, 8);
        writer.write_bits(code);
    }

    Ok(())
}

/// The result of successfully parsing a stream's header.
pub struct ParsedHeader {
    pub bits_to_trim: u8,
    pub table: Vec<(u8, Vec<bool>)>,
}

/// Parses the header at the front of `reader`, leaving the reader positioned at the first payload
/// bit.
pub fn read_header(reader: &mut BitReader<'_>) -> Result<ParsedHeader, CodecError> {
    let bits_to_trim = reader
        .read_uint(8)
        .ok_or_else(|| CodecError::MalformedStream("stream shorter than the 3-byte header".into()))?
        as u8;
    let symbol_count = reader
        .read_uint(16)
        .ok_or_else(|| CodecError::MalformedStream("stream shorter than the 3-byte header".into()))?;

    let mut table = Vec::with_capacity(symbol_count as usize);
    for _ in 0..symbol_count {
        let symbol = reader
            .read_uint(8)
            .ok_or_else(|| CodecError::MalformedStream("header truncated mid code-table entry".into()))?
            as u8;
        let length = reader
            .read_uint(8)
            .ok_or_else(|| CodecError::MalformedStream("header truncated mid code-table entry".into()))?;
        if length == 0 {
            return Err(CodecError::MalformedStream(
                "code-table entry declares a zero-length code".into(),
            ));
        }
        let mut code = Vec::with_capacity(length as usize);
        for _ in 0..length {
            let bit = reader
                .read_bit()
                .ok_or_else(|| CodecError::MalformedStream("header truncated mid code bits".into()))?;
            code.push(bit != 0);
        }
        table.push((symbol, code));
    }

    Ok(ParsedHeader {
        bits_to_trim,
        table,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_round_trips() {
        let table = vec![(b'A', vec![false]), (b'B', vec![true, false])];
        let mut w = BitWriter::new();
        write_header(&mut w, &table).unwrap();
        let bytes = w.into_bytes();

        let mut r = BitReader::new(&bytes);
        let parsed = read_header(&mut r).unwrap();
        assert_eq!(parsed.table, table);
    }

    #[test]
    fn rejects_truncated_header() {
        let bytes = [0u8];
        let mut r = BitReader::new(&bytes);
        assert!(read_header(&mut r).is_err());
    }
}
