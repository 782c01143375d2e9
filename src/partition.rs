//! Round-robin assignment of input files to workers

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

/// Split `files` into exactly `workers` buckets, file `i` going to bucket
/// `i % workers`.
///
/// Buckets borrow from `files` and keep command-line order. When there are
/// more workers than files the trailing buckets are empty.
pub fn partition(files: &[PathBuf], workers: NonZeroUsize) -> Vec<Vec<&Path>> {
    let workers = workers.get();
    let per_worker = files.len().div_ceil(workers);

    let mut buckets: Vec<Vec<&Path>> = (0..workers)
        .map(|_| Vec::with_capacity(per_worker))
        .collect();

    for (index, file) in files.iter().enumerate() {
        buckets[index % workers].push(file.as_path());
    }

    buckets
}
