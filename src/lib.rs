//! # Wordlist Merge
//!
//! Multi-threaded wordlist merging for penetration testing.
//!
//! ## Features
//!
//! - **Merging**: Combine any number of wordlists into one file
//! - **Deduplication**: Every word appears once per run (exact byte match)
//! - **Parallel reading**: Files are spread round-robin over a fixed pool of workers
//! - **Append mode**: Existing output content is kept, new words are added after it
//! - **Large file support**: Inputs are read through memory maps
//!
//! ## Usage
//!
//! ```bash
//! # Merge three lists into output.txt using 4 threads
//! wordlist-merge secret.txt list.txt file.txt
//!
//! # Custom output file and thread count
//! wordlist-merge secret.txt list.txt -o merged.txt -t 8
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use wordlist_merge::merger::{MergeConfig, Merger};
//! use wordlist_merge::output::WriteOrder;
//! use std::path::PathBuf;
//!
//! let mut config = MergeConfig::new("merged.txt", 8).unwrap();
//! config.order = WriteOrder::Sorted;
//!
//! let files = vec![PathBuf::from("rockyou.txt"), PathBuf::from("common.txt")];
//! let report = Merger::new(config).run(&files).unwrap();
//! println!("{} unique words", report.unique_words);
//! ```

pub mod aggregate;
pub mod cli;
pub mod dedup;
pub mod error;
pub mod merger;
pub mod output;
pub mod partition;
pub mod progress;
pub mod tokenizer;
pub mod worker;

pub use cli::Args;
pub use error::{MergeError, Result};
pub use merger::{merge_files, MergeConfig, MergeReport, Merger};
