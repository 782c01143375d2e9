//! Core merge engine
//!
//! Runs the fork-join pipeline: partition the input files, read every
//! partition on its own pool thread, wait for all of them, union the word
//! sets and append the result to the output file.

use crate::aggregate::union_all;
use crate::cli::Args;
use crate::dedup::WordSet;
use crate::error::{MergeError, Result};
use crate::output::{write_words, WriteOrder, DEFAULT_BUFFER_SIZE};
use crate::partition::partition;
use crate::progress::{create_progress_bar, MergeStats};
use crate::worker::{Worker, WorkerEvent};

use colored::*;
use crossbeam_channel::unbounded;
use indicatif::ProgressBar;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::time::{Duration, Instant};

/// Merger configuration
#[derive(Debug, Clone)]
pub struct MergeConfig {
    pub output: PathBuf,
    pub threads: NonZeroUsize,
    pub order: WriteOrder,
    pub buffer_size: usize,
    pub quiet: bool,
}

impl MergeConfig {
    pub fn new(output: impl Into<PathBuf>, threads: usize) -> Result<Self> {
        let threads = NonZeroUsize::new(threads).ok_or_else(|| {
            MergeError::invalid_argument(format!("Invalid number of threads: {}", threads))
        })?;

        Ok(Self {
            output: output.into(),
            threads,
            order: WriteOrder::Unordered,
            buffer_size: DEFAULT_BUFFER_SIZE,
            quiet: true,
        })
    }

    pub fn from_args(args: &Args) -> Result<Self> {
        let mut config = Self::new(args.output.clone(), args.threads)?;
        config.order = if args.sort {
            WriteOrder::Sorted
        } else {
            WriteOrder::Unordered
        };
        config.buffer_size = args.parse_buffer_size()?;
        config.quiet = args.quiet;
        Ok(config)
    }
}

/// Outcome of a successful merge
#[derive(Debug, Clone)]
pub struct MergeReport {
    pub output: PathBuf,
    pub threads: usize,
    pub unique_words: u64,
    pub stats: MergeStats,
    pub elapsed: Duration,
}

/// Main merger
pub struct Merger {
    config: MergeConfig,
}

impl Merger {
    pub fn new(config: MergeConfig) -> Self {
        Self { config }
    }

    /// Merge `files` into the configured output file
    ///
    /// Nothing is written unless every file was read.
    pub fn run(&self, files: &[PathBuf]) -> Result<MergeReport> {
        let started = Instant::now();

        if files.is_empty() {
            return Err(MergeError::invalid_argument("No input files given"));
        }

        let (words, stats) = self.collect(files)?;

        let unique_words = write_words(
            &self.config.output,
            &words,
            self.config.order,
            self.config.buffer_size,
        )?;

        Ok(MergeReport {
            output: self.config.output.clone(),
            threads: self.config.threads.get(),
            unique_words,
            stats,
            elapsed: started.elapsed(),
        })
    }

    /// Read all files in parallel and return the union of their words
    pub fn collect(&self, files: &[PathBuf]) -> Result<(WordSet, MergeStats)> {
        let threads = self.config.threads.get();
        let workers: Vec<Worker<'_>> = partition(files, self.config.threads)
            .into_iter()
            .enumerate()
            .map(|(id, files)| Worker::new(id, files))
            .collect();

        for worker in &workers {
            log::debug!("worker {} assigned {} files", worker.id(), worker.files().len());
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("merge-worker-{}", i))
            .build()?;

        let pb = if self.config.quiet {
            ProgressBar::hidden()
        } else {
            create_progress_bar(files.len() as u64, "Merging...")
        };

        let abort = AtomicBool::new(false);
        let (tx, rx) = unbounded();
        let mut results: Vec<Option<Result<WordSet>>> = (0..threads).map(|_| None).collect();
        let mut stats = MergeStats::new();

        let abort = &abort;
        pool.in_place_scope(|scope| {
            for worker in &workers {
                let tx = tx.clone();
                scope.spawn(move |_| worker.run_and_report(abort, &tx));
            }
            // Only the workers hold senders now; the channel closes once all of them are done.
            drop(tx);

            for event in rx.iter() {
                match event {
                    WorkerEvent::FileRead(summary) => {
                        pb.set_message(format!(
                            "worker {}: {}",
                            summary.worker,
                            summary.path.display()
                        ));
                        stats.record_file(&summary);
                        pb.inc(1);
                    }
                    WorkerEvent::Finished { worker, result } => {
                        results[worker] = Some(result);
                    }
                }
            }
        });

        if results.iter().any(|r| !matches!(r, Some(Ok(_)))) {
            pb.abandon_with_message("Failed".red().to_string());
        } else {
            pb.finish_with_message("Complete".green().to_string());
        }

        let sets = collect_results(results)?;
        Ok((union_all(sets), stats))
    }
}

/// Turn per-worker outcomes into sets, or the error to report
///
/// Real failures win over cancellations; among those the lowest worker id
/// wins so the reported error does not depend on scheduling.
fn collect_results(results: Vec<Option<Result<WordSet>>>) -> Result<Vec<WordSet>> {
    let mut sets = Vec::with_capacity(results.len());
    let mut cancelled = None;
    let mut failure = None;

    for (worker, result) in results.into_iter().enumerate() {
        match result {
            Some(Ok(set)) => sets.push(set),
            Some(Err(e)) if e.is_cancelled() => {
                cancelled.get_or_insert(e);
            }
            Some(Err(e)) => {
                failure.get_or_insert(e);
            }
            None => {
                failure.get_or_insert(MergeError::WorkerLost { worker });
            }
        }
    }

    match failure.or(cancelled) {
        Some(e) => Err(e),
        None => Ok(sets),
    }
}

/// Merge with default settings and no console output
pub fn merge_files(files: &[PathBuf], output: &Path, threads: usize) -> Result<MergeReport> {
    Merger::new(MergeConfig::new(output, threads)?).run(files)
}
