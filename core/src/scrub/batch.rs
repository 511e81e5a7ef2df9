use crate::error::{Result, ScrubError};
use dicom_object::{open_file, DefaultDicomObject};
use indicatif::ProgressBar;
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

/// One DICOM file and its parsed contents
#[derive(Debug, Clone)]
pub struct ScanRecord {
    /// Path the record was read from and is written back to
    pub path: PathBuf,

    /// Parsed file, meta group included
    pub object: DefaultDicomObject,
}

impl ScanRecord {
    /// Reads a record from a DICOM file
    ///
    /// # Errors
    ///
    /// Returns [`ScrubError::Format`] if the entry is not a regular file or
    /// cannot be parsed.
    pub fn open(path: PathBuf) -> Result<Self> {
        if !path.is_file() {
            return Err(ScrubError::format(path, "not a regular file"));
        }
        let object = open_file(&path).map_err(|e| ScrubError::format(&path, e))?;
        Ok(Self { path, object })
    }

    /// Writes the record back to its own path
    ///
    /// The new contents go to a temporary file in the same directory, which
    /// then replaces the original in a single rename.
    pub fn persist(&self) -> Result<()> {
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let staging = tempfile::Builder::new()
            .prefix(".scanscrub-")
            .suffix(".tmp")
            .tempfile_in(dir)?;
        self.object.write_to_file(staging.path())?;
        // Staging files are created owner-only; keep the original mode
        fs::set_permissions(staging.path(), fs::metadata(&self.path)?.permissions())?;
        staging.persist(&self.path)?;

        debug!("Saved {}", self.path.display());
        Ok(())
    }
}

/// Lists the entries of `directory`, sorted by name, without descending
pub fn list_entries(directory: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = fs::read_dir(directory)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort();
    Ok(entries)
}

/// Records loaded from one directory, in file name order
#[derive(Debug, Clone, Default)]
pub struct RecordBatch {
    records: Vec<ScanRecord>,
}

impl RecordBatch {
    /// Loads every entry of `directory` as a record
    ///
    /// All-or-nothing: the first entry that fails to parse aborts the load.
    pub fn load(directory: &Path) -> Result<Self> {
        if !directory.is_dir() {
            return Err(ScrubError::NotFound(directory.to_path_buf()));
        }

        let records = list_entries(directory)?
            .into_iter()
            .map(ScanRecord::open)
            .collect::<Result<Vec<_>>>()?;

        info!(
            "Loaded {} records from {}",
            records.len(),
            directory.display()
        );
        Ok(Self { records })
    }

    /// Writes every record back to its path
    pub fn persist(&self) -> Result<()> {
        let progress = ProgressBar::new(self.records.len() as u64).with_message("Saving");
        for record in &self.records {
            record.persist()?;
            progress.inc(1);
        }
        progress.finish_and_clear();
        Ok(())
    }

    pub fn records(&self) -> &[ScanRecord] {
        &self.records
    }

    pub fn records_mut(&mut self) -> &mut [ScanRecord] {
        &mut self.records
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.records.iter().map(|r| r.path.as_path())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
