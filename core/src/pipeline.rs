//! Target dispatch: one directory, or a directory of directories

use crate::error::{Result, ScrubError};
use crate::scrub::{list_entries, BatchSummary, Scrubber};
use crate::verify::Verifier;
use log::{info, warn};
use std::path::{Path, PathBuf};

/// Every batch processed by one run, in processing order
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct RunSummary {
    pub batches: Vec<BatchSummary>,
}

impl RunSummary {
    /// Total number of files scrubbed
    pub fn file_count(&self) -> usize {
        self.batches.iter().map(|b| b.files.len()).sum()
    }
}

/// Returns the batch directories for `target`
///
/// If any immediate child of `target` is a directory, those children are
/// the batches (sorted by name) and files directly under `target` are
/// ignored. Otherwise `target` itself is the only batch.
pub fn batch_directories(target: &Path) -> Result<Vec<PathBuf>> {
    if !target.is_dir() {
        return Err(ScrubError::NotFound(target.to_path_buf()));
    }

    let entries = list_entries(target)?;
    let subdirs: Vec<PathBuf> = entries.iter().filter(|p| p.is_dir()).cloned().collect();

    if subdirs.is_empty() {
        return Ok(vec![target.to_path_buf()]);
    }

    let skipped = entries.len() - subdirs.len();
    if skipped > 0 {
        warn!(
            "Ignoring {} file(s) directly under {}",
            skipped,
            target.display()
        );
    }
    Ok(subdirs)
}

/// Scrubs then verifies each batch of `target`, one after the other
///
/// A batch is fully scrubbed and verified before the next one starts.
///
/// # Errors
///
/// Stops at the first fault of any batch, verification failures included.
/// Batches already processed stay scrubbed.
pub fn run_target(
    scrubber: &mut Scrubber<'_>,
    verifier: &Verifier<'_>,
    target: &Path,
) -> Result<RunSummary> {
    let directories = batch_directories(target)?;
    if directories.len() > 1 || directories[0].as_path() != target {
        info!(
            "{} contains {} scan directories",
            target.display(),
            directories.len()
        );
    }

    let mut summary = RunSummary::default();
    for directory in directories {
        let mut batch = scrubber.run(&directory)?;
        verifier.verify(&directory)?;
        batch.verified = true;
        summary.batches.push(batch);
    }

    info!(
        "Processed {} file(s) in {} batch(es)",
        summary.file_count(),
        summary.batches.len()
    );
    Ok(summary)
}
