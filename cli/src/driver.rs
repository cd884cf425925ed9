//! Wires parsed arguments to the codec and the folder serializer, and reports run statistics.
//!
//! Mirrors the teacher's module-dispatch-by-id shape (the `-m` flag resolves a [`Codec`] the same
//! way the original plugin loader resolved a compression module), minus the dynamic-library
//! loading -- every codec here is linked in directly (SPEC_FULL.md §4.2 design note).

use crate::args::{Args, Mode};
use common::stats::CompressionStatsBuilder;
use common::{Codec, CodecError};
use huffman_codec::HuffmanCodec;
use std::fs;

fn select_codec(id: &str) -> Result<Box<dyn Codec>, CodecError> {
    match id {
        "huf" => Ok(Box::new(HuffmanCodec::new())),
        other => Err(CodecError::MalformedStream(format!(
            "unknown codec id '{other}'"
        ))),
    }
}

/// Runs one encode or decode operation per `args`. Prints a statistics block to stdout when
/// `args.show_stats` is set.
pub fn run(args: &Args) -> Result<(), CodecError> {
    let input = args.input.clone().ok_or(CodecError::MissingInput)?;
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&input, args.mode));
    let codec = select_codec(&args.codec_id)?;

    let mut timer = common::stats::OptionalStatsTimer::new(args.show_stats);

    let (original_len, processed_len, is_compression) = match (args.mode, args.folder) {
        (Mode::Encode, false) => {
            let t = timer.start_section("read input file");
            let raw = fs::read(&input).map_err(|e| CodecError::io(&input, e))?;
            timer.add_section(t);

            let t = timer.start_section("huffman encode");
            let compressed = codec.encode(&raw)?;
            timer.add_section(t);

            let t = timer.start_section("write output file");
            fs::write(&output, &compressed).map_err(|e| CodecError::io(&output, e))?;
            timer.add_section(t);

            (raw.len(), compressed.len(), true)
        }
        (Mode::Encode, true) => {
            let t = timer.start_section("read directory tree");
            let tree = folder_format::read_tree(&input)?;
            let flattened = folder_format::serialize(&tree);
            timer.add_section(t);

            let t = timer.start_section("huffman encode");
            let compressed = codec.encode(&flattened)?;
            timer.add_section(t);

            let t = timer.start_section("write output file");
            fs::write(&output, &compressed).map_err(|e| CodecError::io(&output, e))?;
            timer.add_section(t);

            (flattened.len(), compressed.len(), true)
        }
        (Mode::Decode, false) => {
            let t = timer.start_section("read compressed artifact");
            let stream = fs::read(&input).map_err(|e| CodecError::io(&input, e))?;
            timer.add_section(t);

            let t = timer.start_section("huffman decode");
            let raw = codec.decode(&stream)?;
            timer.add_section(t);

            let t = timer.start_section("write output file");
            fs::write(&output, &raw).map_err(|e| CodecError::io(&output, e))?;
            timer.add_section(t);

            (stream.len(), raw.len(), false)
        }
        (Mode::Decode, true) => {
            let t = timer.start_section("read compressed artifact");
            let stream = fs::read(&input).map_err(|e| CodecError::io(&input, e))?;
            timer.add_section(t);

            let t = timer.start_section("huffman decode");
            let flattened = codec.decode(&stream)?;
            timer.add_section(t);

            let t = timer.start_section("rebuild directory tree");
            let tree = folder_format::deserialize(&flattened)?;
            folder_format::write_tree(&tree, &output)?;
            timer.add_section(t);

            (stream.len(), flattened.len(), false)
        }
    };

    if args.show_stats {
        let (duration, sections) = timer.end();
        let stats = CompressionStatsBuilder::new()
            .algorithm_name(codec.id())
            .original_len(original_len)
            .processed_len(processed_len)
            .duration(duration)
            .is_compression(is_compression)
            .sections(sections)
            .build()
            .expect("every builder field was set above");
        print!("{stats}");
    }

    Ok(())
}

fn default_output_path(input: &std::path::Path, mode: Mode) -> std::path::PathBuf {
    match mode {
        Mode::Encode => input.with_extension("huf"),
        Mode::Decode => input.with_extension("out"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_codec_id_is_rejected() {
        assert!(select_codec("lzw").is_err());
    }

    #[test]
    fn known_codec_id_resolves() {
        assert!(select_codec("huf").is_ok());
    }
}
