//! Error types shared by every stage of the compressor/decompressor pipeline.
//!
//! Mirrors the hand-rolled `CliError` style the sibling modules in this workspace use: a flat
//! enum of named failure variants with a manual `Display` impl, no derive-macro error crate.

use std::fmt::{self, Display};
use std::io;
use std::path::PathBuf;

/// Every way a compress/decompress operation can fail, abstracted away from any particular
/// transport (file, socket, in-memory buffer).
#[derive(Debug)]
pub enum CodecError {
    /// An input file or directory could not be opened, or an output file could not be created
    /// or written.
    IoUnavailable { path: PathBuf, source: io::Error },
    /// The compressed stream's header could not be parsed, the declared symbol count does not
    /// match the available bytes, or the payload ends mid-code with no matching entry.
    MalformedStream(String),
    /// The folder-serialization buffer is truncated, missing its `*` separator, or declares a
    /// length that runs past the end of the buffer.
    MalformedFolder(String),
    /// A Huffman code table would need more than 65,536 entries to describe the input.
    TableOverflow { entries: usize },
    /// The driver was invoked without an input path.
    MissingInput,
}

impl CodecError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        CodecError::IoUnavailable {
            path: path.into(),
            source,
        }
    }
}

impl Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::IoUnavailable { path, source } => {
                write!(f, "I/O error on {}: {}", path.display(), source)
            }
            CodecError::MalformedStream(msg) => write!(f, "malformed compressed stream: {msg}"),
            CodecError::MalformedFolder(msg) => write!(f, "malformed folder buffer: {msg}"),
            CodecError::TableOverflow { entries } => write!(
                f,
                "code table would need {entries} entries, but the header field only allows 65536"
            ),
            CodecError::MissingInput => write!(f, "no input path given (missing -i)"),
        }
    }
}

impl std::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CodecError::IoUnavailable { source, .. } => Some(source),
            _ => None,
        }
    }
}
