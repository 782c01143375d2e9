//! Output management module
//!
//! Appends merged words to the output file through a buffered writer.

use crate::dedup::WordSet;
use crate::error::{MergeError, Result};

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Default buffer size for file writing (8MB)
pub const DEFAULT_BUFFER_SIZE: usize = 8 * 1024 * 1024;

/// Order in which words are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteOrder {
    /// Hash-set iteration order
    #[default]
    Unordered,
    /// Ascending byte order
    Sorted,
}

/// Buffered writer appending one word per line
pub struct OutputWriter {
    writer: BufWriter<File>,
    path: PathBuf,
    lines_written: u64,
    bytes_written: u64,
}

impl OutputWriter {
    /// Open `path` for appending, creating it if needed
    pub fn append(path: &Path, buffer_size: usize) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| MergeError::OutputOpen {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Self {
            writer: BufWriter::with_capacity(buffer_size, file),
            path: path.to_path_buf(),
            lines_written: 0,
            bytes_written: 0,
        })
    }

    /// Write a word followed by a newline
    pub fn write_word(&mut self, word: &[u8]) -> Result<()> {
        self.writer
            .write_all(word)
            .and_then(|_| self.writer.write_all(b"\n"))
            .map_err(|source| MergeError::Write {
                path: self.path.clone(),
                source,
            })?;
        self.lines_written += 1;
        self.bytes_written += word.len() as u64 + 1; // +1 for newline
        Ok(())
    }

    /// Flush the buffer to disk
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush().map_err(|source| MergeError::Write {
            path: self.path.clone(),
            source,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn lines_written(&self) -> u64 {
        self.lines_written
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }
}

impl Drop for OutputWriter {
    fn drop(&mut self) {
        let _ = self.writer.flush();
    }
}

/// Append every word of `words` to `path`, returning the number of lines
pub fn write_words(
    path: &Path,
    words: &WordSet,
    order: WriteOrder,
    buffer_size: usize,
) -> Result<u64> {
    let mut output = OutputWriter::append(path, buffer_size)?;

    match order {
        WriteOrder::Unordered => {
            for word in words.iter() {
                output.write_word(word)?;
            }
        }
        WriteOrder::Sorted => {
            for word in words.sorted() {
                output.write_word(word)?;
            }
        }
    }

    output.flush()?;
    log::debug!(
        "appended {} lines ({} bytes) to {}",
        output.lines_written(),
        output.bytes_written(),
        output.path().display()
    );

    Ok(output.lines_written())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bstr::BStr;
    use tempfile::TempDir;

    fn set_of(words: &[&str]) -> WordSet {
        words.iter().map(|w| BStr::new(*w)).collect()
    }

    #[test]
    fn test_output_writer() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test.txt");

        let mut writer = OutputWriter::append(&path, 1024).unwrap();
        writer.write_word(b"hello").unwrap();
        writer.write_word(b"world").unwrap();
        writer.flush().unwrap();

        assert_eq!(writer.lines_written(), 2);
        assert_eq!(writer.bytes_written(), 12);

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "hello\nworld\n");
    }

    #[test]
    fn test_append_keeps_existing_content() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.txt");
        std::fs::write(&path, "existing\n").unwrap();

        let written = write_words(&path, &set_of(&["b", "a"]), WriteOrder::Sorted, 1024).unwrap();

        assert_eq!(written, 2);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "existing\na\nb\n");
    }

    #[test]
    fn test_unordered_writes_every_word_once() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.txt");

        write_words(&path, &set_of(&["foo", "bar", "baz"]), WriteOrder::Unordered, 1024).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines: Vec<&str> = content.lines().collect();
        lines.sort();
        assert_eq!(lines, vec!["bar", "baz", "foo"]);
        assert!(content.ends_with('\n'));
    }

    #[test]
    fn test_drop_flushes() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.txt");

        {
            let mut writer = OutputWriter::append(&path, 1024).unwrap();
            writer.write_word(b"\xff\xfe").unwrap();
        }

        assert_eq!(std::fs::read(&path).unwrap(), b"\xff\xfe\n");
    }

    #[test]
    fn test_unopenable_output() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("no/such/dir/out.txt");

        let err = write_words(&path, &WordSet::new(), WriteOrder::Unordered, 1024).unwrap_err();
        assert!(matches!(err, MergeError::OutputOpen { .. }));
    }
}
