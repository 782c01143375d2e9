//! Error types for the merge pipeline
//!
//! Every error is fatal for the run; the variants only decide what gets
//! reported.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, MergeError>;

#[derive(Error, Debug)]
pub enum MergeError {
    /// Bad command-line input (missing value, bad thread count, no files)
    #[error("{0}")]
    InvalidArgument(String),

    /// An input wordlist could not be opened for reading
    #[error("Failed to open file {}", path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An input wordlist was opened but reading it failed
    #[error("Failed to read file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The output file could not be opened for appending
    #[error("Failed to open output file {}", path.display())]
    OutputOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Writing or flushing the output failed after it was opened
    #[error("Failed to write output file {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The worker thread pool could not be started
    #[error("Failed to start worker threads: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// The worker stopped early because another worker failed
    #[error("Worker {worker} cancelled")]
    Cancelled { worker: usize },

    /// The worker exited without sending a result
    #[error("Worker {worker} terminated without a result")]
    WorkerLost { worker: usize },
}

impl MergeError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        1
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_file_open_names_path_and_keeps_source() {
        let err = MergeError::FileOpen {
            path: PathBuf::from("missing.txt"),
            source: io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
        };

        assert_eq!(err.to_string(), "Failed to open file missing.txt");
        assert!(err.source().is_some());
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_cancelled() {
        assert!(MergeError::Cancelled { worker: 2 }.is_cancelled());
        assert!(!MergeError::invalid_argument("no input files").is_cancelled());
    }
}
