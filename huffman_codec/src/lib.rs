//! A canonical-traversal Huffman codec: symbol-frequency tree construction, a self-describing
//! bit-packed header, and LSB-first bit-level stream encoding/decoding.
//!
//! This is the first concrete implementation of [`common::Codec`]. See SPEC_FULL.md §4.2-4.4 for
//! the wire format this module implements.

mod bitio;
mod header;
mod tree;
mod trie;

use bitio::{BitReader, BitWriter};
use common::{Codec, CodecError};
use std::collections::HashMap;

/// The Huffman codec, selected from the command line via the id `"huf"`.
#[derive(Debug, Default, Clone, Copy)]
pub struct HuffmanCodec;

impl HuffmanCodec {
    pub fn new() -> Self {
        HuffmanCodec
    }
}

impl Codec for HuffmanCodec {
    fn id(&self) -> &'static str {
        "huf"
    }

    fn encode(&self, input: &[u8]) -> Result<Vec<u8>, CodecError> {
        if input.is_empty() {
            return Err(CodecError::MalformedStream(
                "cannot Huffman-encode empty input: there is no header that can declare zero symbols".into(),
            ));
        }

        let table = tree::build_code_table(input)?;
        let lookup: HashMap<u8, &Vec<bool>> =
            table.iter().map(|(symbol, code)| (*symbol, code)).collect();

        let mut writer = BitWriter::new();
        header::write_header(&mut writer, &table)?;

        for &byte in input {
            let code = lookup
                .get(&byte)
                .expect("every input byte was tabulated into the code table");
            writer.write_bits(code);
        }

        let bits_to_trim = writer.bits_used_in_current_byte();
        let mut bytes = writer.into_bytes();
        bytes[0] = bits_to_trim;
        Ok(bytes)
    }

    fn decode(&self, stream: &[u8]) -> Result<Vec<u8>, CodecError> {
        let mut reader = BitReader::new(stream);
        let parsed = header::read_header(&mut reader)?;

        if parsed.table.is_empty() {
            return Err(CodecError::MalformedStream(
                "header declares zero symbols, which the encoder never produces".into(),
            ));
        }

        let trie = trie::DecodeTrie::from_table(&parsed.table);
        let mut cursor = trie.cursor();

        let last_byte_index = stream.len() - 1;
        // bits_to_trim == 0 means the payload ended exactly on a byte boundary, i.e. all 8 bits
        // of the final byte are real payload rather than zero-padding.
        let effective_limit = if parsed.bits_to_trim == 0 {
            8
        } else {
            parsed.bits_to_trim
        };

        let mut output = Vec::new();
        loop {
            let byte_index = reader.byte_pos();
            let bit_index = reader.bit_pos();

            if byte_index == last_byte_index && bit_index >= effective_limit {
                break;
            }
            if byte_index > last_byte_index {
                break;
            }

            let bit = reader.read_bit().ok_or_else(|| {
                CodecError::MalformedStream("payload ended before the declared trim point".into())
            })?;

            if let Some(symbol) = cursor.step(bit)? {
                output.push(symbol);
            }
        }

        if !cursor.at_root() {
            return Err(CodecError::MalformedStream(
                "payload ended mid-code with no matching symbol".into(),
            ));
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec() -> HuffmanCodec {
        HuffmanCodec::new()
    }

    #[test]
    fn rejects_empty_input() {
        assert!(codec().encode(&[]).is_err());
    }

    #[test]
    fn s1_single_symbol_round_trips() {
        let input = b"AAAAA";
        let stream = codec().encode(input).unwrap();
        let decoded = codec().decode(&stream).unwrap();
        assert_eq!(decoded, input);
    }

    #[test]
    fn s2_two_symbol_file() {
        let input = b"ABABAB";
        let stream = codec().encode(input).unwrap();
        // header: 1 (trim) + 2 (count) bytes, then 2 entries of 8+8+1 bits each
        let header_bits = 8 + 16 + 2 * (8 + 8 + 1);
        assert_eq!(header_bits, 58);
        let payload_bits = 6; // two 1-bit codes, six symbols
        let total_bits = header_bits + payload_bits;
        assert_eq!(stream.len(), total_bits.div_ceil(8));

        let decoded = codec().decode(&stream).unwrap();
        assert_eq!(decoded, input);
    }

    #[test]
    fn s3_all_byte_values_round_trip() {
        let input: Vec<u8> = (0..=255u8).collect();
        let stream = codec().encode(&input).unwrap();
        assert!(stream.len() > input.len());
        let decoded = codec().decode(&stream).unwrap();
        assert_eq!(decoded, input);
    }

    #[test]
    fn s6_truncated_artifact_is_malformed() {
        let err = codec().decode(&[0x00]).unwrap_err();
        assert!(matches!(err, CodecError::MalformedStream(_)));
    }

    #[test]
    fn round_trips_arbitrary_text() {
        let input = b"the quick brown fox jumps over the lazy dog, again and again and again.";
        let stream = codec().encode(input).unwrap();
        let decoded = codec().decode(&stream).unwrap();
        assert_eq!(decoded, input);
    }

    #[test]
    fn encode_is_deterministic() {
        let input = b"mississippi river";
        assert_eq!(codec().encode(input).unwrap(), codec().encode(input).unwrap());
    }

    #[test]
    fn decode_rejects_bit_flipped_stream() {
        let input = b"aaaabbbccd";
        let mut stream = codec().encode(input).unwrap();
        // Flip a bit deep in the payload; this should either produce a decode error or, in the
        // worst case, different bytes -- but it must never panic.
        let last = stream.len() - 1;
        stream[last] ^= 0xFF;
        let _ = codec().decode(&stream);
    }
}
