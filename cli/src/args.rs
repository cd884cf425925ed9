//! Hand-rolled parser for the tool's single-dash flag surface.
//!
//! The flag grammar (`-help`, `-man` alongside `-h`, all single-dash) is an explicit external
//! collaborator per SPEC_FULL.md §1/§6 and is not reproducible with a `--long`-oriented derive
//! crate without changing the documented interface, so this mirrors the original argv loop
//! directly instead.

use std::fmt::{self, Display};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Encode,
    Decode,
}

#[derive(Debug, Clone)]
pub struct Args {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub mode: Mode,
    pub folder: bool,
    pub codec_id: String,
    pub show_stats: bool,
    pub help: bool,
}

impl Default for Args {
    fn default() -> Self {
        Args {
            input: None,
            output: None,
            mode: Mode::Encode,
            folder: false,
            codec_id: "huf".to_string(),
            show_stats: false,
            help: false,
        }
    }
}

#[derive(Debug)]
pub enum ArgsError {
    MissingValue(&'static str),
}

impl Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue(flag) => write!(f, "flag '{flag}' requires a value"),
        }
    }
}

impl std::error::Error for ArgsError {}

/// Parses the process argv (excluding argv\[0\]) into [`Args`].
pub fn parse<I: IntoIterator<Item = String>>(argv: I) -> Result<Args, ArgsError> {
    let mut args = Args::default();
    let mut it = argv.into_iter();

    while let Some(flag) = it.next() {
        match flag.as_str() {
            "-i" => {
                args.input = Some(PathBuf::from(
                    it.next().ok_or(ArgsError::MissingValue("-i"))?,
                ))
            }
            "-o" => {
                args.output = Some(PathBuf::from(
                    it.next().ok_or(ArgsError::MissingValue("-o"))?,
                ))
            }
            "-E" => args.mode = Mode::Encode,
            "-D" => args.mode = Mode::Decode,
            "-f" => args.folder = true,
            "-m" => args.codec_id = it.next().ok_or(ArgsError::MissingValue("-m"))?,
            "-stats" => args.show_stats = true,
            "-h" | "-help" | "-man" => args.help = true,
            // Unrecognized flags are silently ignored and parsing continues, matching
            // App.cpp's `default: break;` in the argv loop this grammar is grounded on.
            _ => {}
        }
    }

    Ok(args)
}

pub const HELP_TEXT: &str = "\
usage: foldhuf -i <path> [-o <path>] [-E|-D] [-f] [-m <codec>] [-stats] [-h|-help|-man]

  -i <path>   input path (required)
  -o <path>   output path
  -E          encode (default)
  -D          decode
  -f          treat input/output as a directory tree
  -m <id>     codec identifier (default: huf)
  -stats      print run statistics on completion
  -h, -help, -man   print this message and exit
";

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(s: &[&str]) -> Vec<String> {
        s.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn defaults_to_encode_mode() {
        let args = parse(argv(&["-i", "in.txt"])).unwrap();
        assert_eq!(args.mode, Mode::Encode);
        assert_eq!(args.input, Some(PathBuf::from("in.txt")));
        assert_eq!(args.codec_id, "huf");
        assert!(!args.folder);
        assert!(!args.help);
    }

    #[test]
    fn parses_decode_folder_and_codec() {
        let args = parse(argv(&["-i", "a", "-o", "b", "-D", "-f", "-m", "huf"])).unwrap();
        assert_eq!(args.mode, Mode::Decode);
        assert!(args.folder);
        assert_eq!(args.output, Some(PathBuf::from("b")));
    }

    #[test]
    fn recognizes_all_help_spellings() {
        for spelling in ["-h", "-help", "-man"] {
            let args = parse(argv(&[spelling])).unwrap();
            assert!(args.help);
        }
    }

    #[test]
    fn ignores_unknown_flag_and_keeps_parsing() {
        let args = parse(argv(&["-x", "-i", "in.txt"])).unwrap();
        assert_eq!(args.input, Some(PathBuf::from("in.txt")));
    }

    #[test]
    fn rejects_flag_missing_its_value() {
        assert!(parse(argv(&["-i"])).is_err());
    }
}
