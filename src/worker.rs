//! Merge workers
//!
//! A worker reads its share of the input files one after another and
//! collects their words into a private `WordSet`. Progress and the final
//! result travel back to the driver as `WorkerEvent`s.

use crate::dedup::WordSet;
use crate::error::{MergeError, Result};
use crate::tokenizer::Tokenizer;

use crossbeam_channel::Sender;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

/// Per-file counters reported after each file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSummary {
    pub worker: usize,
    pub path: PathBuf,
    pub bytes: u64,
    pub tokens: u64,
    /// Tokens that were not yet in this worker's set
    pub new_words: u64,
}

/// Message from a worker to the driver
#[derive(Debug)]
pub enum WorkerEvent {
    FileRead(FileSummary),
    Finished {
        worker: usize,
        result: Result<WordSet>,
    },
}

pub struct Worker<'a> {
    id: usize,
    files: Vec<&'a Path>,
}

impl<'a> Worker<'a> {
    pub fn new(id: usize, files: Vec<&'a Path>) -> Self {
        Self { id, files }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn files(&self) -> &[&'a Path] {
        &self.files
    }

    /// Read every assigned file into a fresh `WordSet`
    ///
    /// `abort` is checked before each file. A worker that fails to open a
    /// file raises it so the others stop at their next file boundary.
    pub fn run(&self, abort: &AtomicBool, events: &Sender<WorkerEvent>) -> Result<WordSet> {
        let mut words = WordSet::new();

        for path in &self.files {
            if abort.load(Ordering::Acquire) {
                log::debug!("worker {} cancelled before {}", self.id, path.display());
                return Err(MergeError::Cancelled { worker: self.id });
            }

            match self.read_file(path, &mut words) {
                Ok(summary) => {
                    // The driver only hangs up after a panic; nothing to report to then.
                    let _ = events.send(WorkerEvent::FileRead(summary));
                }
                Err(e) => {
                    abort.store(true, Ordering::Release);
                    return Err(e);
                }
            }
        }

        log::debug!(
            "worker {} finished {} files, {} unique words",
            self.id,
            self.files.len(),
            words.len()
        );

        Ok(words)
    }

    /// Run and send the outcome as `WorkerEvent::Finished`
    pub fn run_and_report(&self, abort: &AtomicBool, events: &Sender<WorkerEvent>) {
        let result = self.run(abort, events);
        let _ = events.send(WorkerEvent::Finished {
            worker: self.id,
            result,
        });
    }

    fn read_file(&self, path: &Path, words: &mut WordSet) -> Result<FileSummary> {
        let tokenizer = Tokenizer::open(path)?;

        let mut tokens = 0u64;
        let mut new_words = 0u64;
        for word in tokenizer.words() {
            tokens += 1;
            if words.insert(word) {
                new_words += 1;
            }
        }

        log::debug!(
            "worker {} read {} ({} tokens, {} new)",
            self.id,
            path.display(),
            tokens,
            new_words
        );

        Ok(FileSummary {
            worker: self.id,
            path: path.to_path_buf(),
            bytes: tokenizer.size() as u64,
            tokens,
            new_words,
        })
    }
}
