//! Command-line interface definition for wordlist-merge
//!
//! Provides argument parsing and validation for the merge tool.

use crate::error::{MergeError, Result};
use clap::{ArgAction, CommandFactory, Parser};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Default number of worker threads
pub const DEFAULT_THREADS: usize = 4;

/// Fast multi-threaded wordlist merger for penetration testing
///
/// Merges any number of wordlists into a single output file, removing
/// duplicate words. Words are separated by any whitespace.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "wordlist-merge",
    author = "m0h1nd4",
    version,
    about = "Merge multiple word lists into a single output file.",
    disable_help_flag = true,
    long_about = r#"
Merge multiple word lists into a single output file.

Input files are spread round-robin over a fixed number of worker threads.
Every worker collects the words of its files, the results are merged once
all workers are done, and the unique words are appended to the output file
(existing content is kept). Output order is unspecified unless --sort is
given.

EXAMPLES:
    # Merge three lists into output.txt with 4 threads
    wordlist-merge secret.txt list.txt file.txt

    # Custom output file and thread count
    wordlist-merge secret.txt list.txt -o merged.txt -t 8

    # Sorted output with statistics
    wordlist-merge *.txt --sort --stats
"#,
    after_help = "For more information, visit: https://github.com/m0h1nd4/wordlist-merge"
)]
pub struct Args {
    /// Wordlists to merge
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Output file; words are appended to it
    #[arg(short, long, value_name = "FILE", default_value = "output.txt")]
    pub output: PathBuf,

    /// Number of worker threads
    #[arg(
        short = 't',
        long,
        value_name = "NUM",
        default_value_t = DEFAULT_THREADS,
        value_parser = parse_threads,
        allow_negative_numbers = true
    )]
    pub threads: usize,

    /// Write words in ascending byte order
    #[arg(long, default_value_t = false)]
    pub sort: bool,

    /// Show detailed statistics
    #[arg(long, default_value_t = false)]
    pub stats: bool,

    /// Quiet mode - no progress bar or statistics
    #[arg(short, long, default_value_t = false)]
    pub quiet: bool,

    /// Verbose mode - detailed logging
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Buffer size for the output file (e.g. "64KB", "8MB")
    #[arg(long, value_name = "SIZE", default_value = "8MB")]
    pub buffer_size: String,

    /// Display this help message
    #[arg(short = 'h', long, short_alias = '?', action = ArgAction::Help)]
    pub help: Option<bool>,
}

impl Args {
    /// Parse `args` (program name first), accepting input files whose names
    /// start with `-`
    pub fn try_parse_args<I, T>(args: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::try_parse_from(hyphen_files_as_paths(args))
    }

    /// Checks clap cannot express
    pub fn validate(&self) -> Result<()> {
        if self.files.is_empty() {
            return Err(MergeError::invalid_argument("No input files given"));
        }
        Ok(())
    }

    /// Parse buffer size string to bytes
    pub fn parse_buffer_size(&self) -> Result<usize> {
        let size = parse_size(&self.buffer_size)?;
        if size == 0 {
            return Err(MergeError::invalid_argument("Buffer size must be greater than zero"));
        }
        Ok(size)
    }
}

/// One-line usage string
pub fn usage() -> String {
    Args::command().render_usage().to_string()
}

/// Rewrite single-dash tokens that start with no known short flag, such as
/// `-list.txt`, to `./-list.txt` so clap reads them as input files.
///
/// A value following an option that takes one (`-o -out.txt`, `-t -3`) is
/// left alone, as is everything after `--`.
fn hyphen_files_as_paths<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut cmd = Args::command();
    cmd.build();

    let mut rewritten = Vec::new();
    let mut pending_value = false;
    let mut trailing = false;

    for (index, arg) in args.into_iter().map(Into::into).enumerate() {
        if index == 0 || trailing || pending_value {
            pending_value = false;
            rewritten.push(arg);
            continue;
        }

        let Some(text) = arg.to_str() else {
            rewritten.push(arg);
            continue;
        };

        if text == "--" {
            trailing = true;
        } else if let Some(shorts) = text.strip_prefix('-').filter(|s| !s.starts_with('-')) {
            if let Some(first) = shorts.chars().next() {
                let known = cmd.get_arguments().find(|a| {
                    a.get_short() == Some(first)
                        || a
                            .get_all_short_aliases()
                            .is_some_and(|aliases| aliases.contains(&first))
                });
                match known {
                    Some(flag) => {
                        pending_value = shorts.len() == 1 && flag.get_action().takes_values();
                    }
                    None => {
                        rewritten.push(Path::new(".").join(text).into_os_string());
                        continue;
                    }
                }
            }
        } else if let Some(long) = text.strip_prefix("--") {
            pending_value = !long.contains('=')
                && cmd
                    .get_arguments()
                    .any(|a| a.get_long() == Some(long) && a.get_action().takes_values());
        }

        rewritten.push(arg);
    }

    rewritten
}

/// Thread counts must be positive integers
fn parse_threads(value: &str) -> std::result::Result<usize, String> {
    let threads: i64 = value
        .trim()
        .parse()
        .map_err(|_| format!("Invalid number of threads: '{}'", value))?;

    if threads <= 0 {
        return Err(format!("Invalid number of threads: {}", threads));
    }

    usize::try_from(threads).map_err(|_| format!("Invalid number of threads: {}", threads))
}

/// Parse human-readable size string to bytes
fn parse_size(size_str: &str) -> Result<usize> {
    let size_str = size_str.trim().to_uppercase();

    let (num_str, multiplier) = if let Some(num) = size_str.strip_suffix("GB") {
        (num, 1024 * 1024 * 1024)
    } else if let Some(num) = size_str.strip_suffix("MB") {
        (num, 1024 * 1024)
    } else if let Some(num) = size_str.strip_suffix("KB") {
        (num, 1024)
    } else if let Some(num) = size_str.strip_suffix('B') {
        (num, 1)
    } else {
        (size_str.as_str(), 1)
    };

    let num: usize = num_str
        .trim()
        .parse()
        .map_err(|_| MergeError::invalid_argument(format!("Invalid size format: '{}'", size_str)))?;

    num.checked_mul(multiplier)
        .ok_or_else(|| MergeError::invalid_argument(format!("Size too large: '{}'", size_str)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn parse(args: &[&str]) -> std::result::Result<Args, clap::Error> {
        Args::try_parse_args(std::iter::once("wordlist-merge").chain(args.iter().copied()))
    }

    #[test]
    fn test_defaults() {
        let args = parse(&["a.txt", "b.txt"]).unwrap();

        assert_eq!(args.files, vec![PathBuf::from("a.txt"), PathBuf::from("b.txt")]);
        assert_eq!(args.output, PathBuf::from("output.txt"));
        assert_eq!(args.threads, DEFAULT_THREADS);
        assert!(!args.sort);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_flags_between_files() {
        let args = parse(&[
            "secret.txt",
            "-o",
            "merged.txt",
            "list.txt",
            "--threads",
            "8",
            "file.txt",
        ])
        .unwrap();

        assert_eq!(
            args.files,
            vec![PathBuf::from("secret.txt"), PathBuf::from("list.txt"), PathBuf::from("file.txt")]
        );
        assert_eq!(args.output, PathBuf::from("merged.txt"));
        assert_eq!(args.threads, 8);
    }

    #[test]
    fn test_invalid_threads() {
        for bad in ["0", "-3", "four"] {
            let err = parse(&["-t", bad, "a.txt"]).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::ValueValidation, "value {:?}", bad);
        }
    }

    #[test]
    fn test_missing_flag_value() {
        assert!(parse(&["a.txt", "-o"]).is_err());
        assert!(parse(&["a.txt", "-t"]).is_err());
    }

    #[test]
    fn test_help_aliases() {
        for flag in ["-h", "-?", "--help"] {
            let err = parse(&[flag]).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::DisplayHelp, "flag {}", flag);
        }
    }

    #[test]
    fn test_no_files_is_invalid() {
        let args = parse(&["-t", "2"]).unwrap();
        assert!(matches!(args.validate(), Err(MergeError::InvalidArgument(_))));
    }

    #[test]
    fn test_hyphen_prefixed_files() {
        let args = parse(&["-list.txt", "-o", "out.txt", "a.txt", "-0words", "-t", "2"]).unwrap();
        assert_eq!(
            args.files,
            vec![
                PathBuf::from("./-list.txt"),
                PathBuf::from("a.txt"),
                PathBuf::from("./-0words"),
            ]
        );
        assert_eq!(args.output, PathBuf::from("out.txt"));
        assert_eq!(args.threads, 2);

        // Option values and anything after `--` are taken as given
        let args = parse(&["a.txt", "-o", "-out.txt", "--", "-b.txt"]).unwrap();
        assert_eq!(args.output, PathBuf::from("-out.txt"));
        assert_eq!(args.files, vec![PathBuf::from("a.txt"), PathBuf::from("-b.txt")]);

        let err = parse(&["a.txt", "-t", "-3"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);

        // Known flags still parse, unknown long flags are still rejected
        assert!(parse(&["-qv", "a.txt"]).unwrap().quiet);
        let err = parse(&["a.txt", "--threds", "2"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("64MB").unwrap(), 64 * 1024 * 1024);
        assert_eq!(parse_size("8gb").unwrap(), 8 * 1024 * 1024 * 1024);
        assert_eq!(parse_size("1024KB").unwrap(), 1024 * 1024);
        assert_eq!(parse_size("512").unwrap(), 512);
        assert!(parse_size("lots").is_err());
    }

    #[test]
    fn test_usage_mentions_binary() {
        assert!(usage().contains("wordlist-merge"));
    }
}
