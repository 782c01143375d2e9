//! Word tokenizer
//!
//! Splits wordlist files into whitespace-separated tokens. Regular files are
//! memory-mapped; pipes, character devices and procfs entries (which report
//! a size of zero) are read into a buffer instead. Tokens are handed out as
//! borrowed byte strings, so no decoding takes place: a word is exactly the
//! bytes found in the file.

use crate::error::{MergeError, Result};
use bstr::BStr;
use memmap2::Mmap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Bytes treated as separators: space, `\t`, `\n`, `\v`, `\f`, `\r`
#[inline]
pub fn is_separator(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | 0x0B | 0x0C | b'\r')
}

/// Split a buffer into words, skipping empty runs
pub fn split_words(data: &[u8]) -> impl Iterator<Item = &BStr> + '_ {
    data.split(|&b| is_separator(b))
        .filter(|word| !word.is_empty())
        .map(BStr::new)
}

enum Contents {
    Mapped(Mmap),
    Buffered(Vec<u8>),
}

/// Tokenizer over a single file
pub struct Tokenizer {
    contents: Contents,
}

impl Tokenizer {
    /// Open a file for tokenizing
    pub fn open(path: &Path) -> Result<Self> {
        let open_error = |source| MergeError::FileOpen {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).map_err(open_error)?;
        let metadata = file.metadata().map_err(open_error)?;

        let contents = if metadata.is_file() && metadata.len() > 0 {
            // SAFETY: the map is read-only and dropped with the tokenizer.
            Contents::Mapped(unsafe { Mmap::map(&file) }.map_err(open_error)?)
        } else {
            let mut data = Vec::new();
            BufReader::with_capacity(64 * 1024, file)
                .read_to_end(&mut data)
                .map_err(|source| MergeError::Read {
                    path: path.to_path_buf(),
                    source,
                })?;
            Contents::Buffered(data)
        };

        Ok(Self { contents })
    }

    /// Words in file order
    pub fn words(&self) -> impl Iterator<Item = &BStr> + '_ {
        split_words(self.bytes())
    }

    pub fn bytes(&self) -> &[u8] {
        match &self.contents {
            Contents::Mapped(mmap) => &mmap[..],
            Contents::Buffered(data) => data.as_slice(),
        }
    }

    /// Number of bytes read from the file
    pub fn size(&self) -> usize {
        self.bytes().len()
    }

    /// True when the file was memory-mapped rather than read into a buffer
    pub fn is_mapped(&self) -> bool {
        matches!(self.contents, Contents::Mapped(_))
    }
}
