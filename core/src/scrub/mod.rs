//! Batch scrubbing of one directory
//!
//! A [`Scrubber`] loads every file of a directory, asks once before removing
//! private tags, applies the redaction policies, writes each file back to
//! its own path, reports the result and optionally converts the directory
//! to NIfTI.

mod batch;
mod confirm;
mod options;

pub use batch::{list_entries, RecordBatch, ScanRecord};
pub use confirm::{ConfirmPrompt, Confirmation, LinePrompt};
pub use options::ScrubOptions;

use crate::convert::{Dcm2Niix, VolumeConverter};
use crate::error::{Result, ScrubError};
use crate::redaction::{redact, RedactionStats};
use crate::registry::TagRegistry;
use crate::report::BatchReport;
use indicatif::ProgressBar;
use log::{debug, error, info, warn};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Question asked before private tags are removed
pub const PRIVATE_TAG_WARNING: &str = "Deleting the private tags is irreversible. Continue";

/// Outcome of the NIfTI conversion step
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
#[cfg_attr(feature = "json", serde(rename_all = "lowercase"))]
pub enum ConversionStatus {
    /// No output directory was configured
    Skipped,
    Converted,
    /// Conversion failed; the scrub itself still succeeded
    Failed(String),
}

/// What one directory run processed
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct BatchSummary {
    pub directory: PathBuf,
    pub files: Vec<PathBuf>,
    pub redaction: RedactionStats,
    /// Set once the verification pass has accepted the directory
    pub verified: bool,
    pub conversion: ConversionStatus,
}

/// Scrubs directories of DICOM files
pub struct Scrubber<'a> {
    registry: &'a TagRegistry,
    options: ScrubOptions,
    prompt: Box<dyn ConfirmPrompt + 'a>,
    converter: Box<dyn VolumeConverter + 'a>,
    report_started: bool,
}

impl<'a> Scrubber<'a> {
    /// Creates a scrubber that prompts on the terminal and converts with `dcm2niix`
    pub fn new(registry: &'a TagRegistry, options: ScrubOptions) -> Self {
        Self {
            registry,
            options,
            prompt: Box::new(LinePrompt::stdio()),
            converter: Box::new(Dcm2Niix::default()),
            report_started: false,
        }
    }

    /// Builder: Use a different confirmation prompt
    pub fn with_prompt(mut self, prompt: impl ConfirmPrompt + 'a) -> Self {
        self.prompt = Box::new(prompt);
        self
    }

    /// Builder: Use a different volume converter
    pub fn with_converter(mut self, converter: impl VolumeConverter + 'a) -> Self {
        self.converter = Box::new(converter);
        self
    }

    pub fn registry(&self) -> &TagRegistry {
        self.registry
    }

    pub fn options(&self) -> &ScrubOptions {
        &self.options
    }

    /// Scrubs every file in `directory`
    ///
    /// # Errors
    ///
    /// - [`ScrubError::NotFound`] if the directory does not exist
    /// - [`ScrubError::Format`] if any entry cannot be parsed (nothing is modified)
    /// - [`ScrubError::Declined`] if the operator refuses private tag removal
    ///   (nothing is modified)
    /// - [`ScrubError::FieldAccess`] if blanking an identifying field fails
    ///
    /// Conversion faults are logged and reported in the summary only.
    pub fn run(&mut self, directory: &Path) -> Result<BatchSummary> {
        if !directory.exists() {
            return Err(ScrubError::NotFound(directory.to_path_buf()));
        }
        info!(
            "Starting program on the items in this folder ({}) ...",
            directory.display()
        );

        let mut batch = RecordBatch::load(directory)?;

        if self.options.remove_private_tags && !self.prompt.confirm(PRIVATE_TAG_WARNING)? {
            warn!("Private tag removal declined; no file was modified");
            return Err(ScrubError::Declined);
        }

        let mut totals = RedactionStats::default();
        let progress = ProgressBar::new(batch.len() as u64).with_message("Anonymizing");
        for record in batch.records_mut() {
            let stats = redact(&mut record.object, self.registry, &self.options)?;
            debug!(
                "{}: {} private removed, {} fields blanked, {} curves removed",
                record.path.display(),
                stats.private_removed,
                stats.fields_blanked,
                stats.curves_removed
            );
            totals += stats;
            progress.inc(1);
        }
        progress.finish_and_clear();

        info!("Finished anonymization. Saving changes ...");
        batch.persist()?;

        self.write_report(&batch)?;
        let conversion = self.convert(directory);

        Ok(BatchSummary {
            directory: directory.to_path_buf(),
            files: batch.paths().map(Path::to_path_buf).collect(),
            redaction: totals,
            verified: false,
            conversion,
        })
    }

    /// Writes the batch report to the configured file or standard output
    ///
    /// The first report of this scrubber truncates the file; later ones append.
    fn write_report(&mut self, batch: &RecordBatch) -> Result<()> {
        let report = BatchReport::new(batch.records());

        match &self.options.report {
            Some(path) => {
                let mut file = OpenOptions::new()
                    .create(true)
                    .write(true)
                    .append(self.report_started)
                    .truncate(!self.report_started)
                    .open(path)?;
                write!(file, "{}", report)?;
                self.report_started = true;
                info!("Output saved to: {}", path.display());
            }
            None => print!("{}", report),
        }

        Ok(())
    }

    fn convert(&self, directory: &Path) -> ConversionStatus {
        let Some(destination) = &self.options.nifti_output else {
            return ConversionStatus::Skipped;
        };

        info!("Converting {} to NIfTI ...", directory.display());
        match self.converter.convert_directory(directory, destination) {
            Ok(()) => ConversionStatus::Converted,
            Err(e) => {
                error!("Conversion of {} failed: {}", directory.display(), e);
                ConversionStatus::Failed(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{write_sample, PRIVATE_DATA};
    use crate::redaction::is_blank;
    use crate::tags::{CURVE_LABEL, OPERATORS_NAME, PATIENT_NAME};
    use std::fs;
    use std::io::{self, Cursor};
    use tempfile::TempDir;

    fn answer(text: &'static str) -> LinePrompt<Cursor<&'static str>, io::Sink> {
        LinePrompt::new(Cursor::new(text), io::sink())
    }

    /// Writes a marker file instead of converting
    struct MarkerConverter;

    impl VolumeConverter for MarkerConverter {
        fn convert_directory(&self, _source: &Path, destination: &Path) -> Result<()> {
            fs::create_dir_all(destination)?;
            fs::write(destination.join("volume.nii.gz"), b"nifti")?;
            Ok(())
        }
    }

    struct FailingConverter;

    impl VolumeConverter for FailingConverter {
        fn convert_directory(&self, _source: &Path, _destination: &Path) -> Result<()> {
            Err(ScrubError::Conversion("converter crashed".to_string()))
        }
    }

    fn scan_dir(files: &[&str]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for name in files {
            write_sample(dir.path(), name, "Doe^Jane");
        }
        dir
    }

    #[test]
    fn test_run_scrubs_and_persists() {
        let dir = scan_dir(&["1.dcm", "2.dcm"]);
        let report = TempDir::new().unwrap();
        let registry = TagRegistry::from_names(["Patient's Name", "Operators' Name"]).unwrap();
        let options = ScrubOptions::default().with_report(report.path().join("report.txt"));

        let summary = Scrubber::new(&registry, options)
            .with_prompt(answer("y\n"))
            .with_converter(MarkerConverter)
            .run(dir.path())
            .unwrap();

        assert_eq!(summary.files.len(), 2);
        assert_eq!(summary.redaction.fields_blanked, 6);
        assert_eq!(summary.conversion, ConversionStatus::Skipped);
        assert!(!summary.verified);

        let batch = RecordBatch::load(dir.path()).unwrap();
        for record in batch.records() {
            assert!(is_blank(record.object.element(PATIENT_NAME).unwrap()));
            assert!(is_blank(record.object.element(OPERATORS_NAME).unwrap()));
            assert!(record.object.element(PRIVATE_DATA).is_err());
            assert!(record.object.element(CURVE_LABEL).is_err());
        }
    }

    #[test]
    fn test_decline_modifies_nothing() {
        let dir = scan_dir(&["1.dcm", "2.dcm"]);
        let before: Vec<Vec<u8>> = list_entries(dir.path())
            .unwrap()
            .iter()
            .map(|p| fs::read(p).unwrap())
            .collect();

        let registry = TagRegistry::default();
        let err = Scrubber::new(&registry, ScrubOptions::default())
            .with_prompt(answer("n\n"))
            .run(dir.path())
            .unwrap_err();
        assert!(matches!(err, ScrubError::Declined));

        let after: Vec<Vec<u8>> = list_entries(dir.path())
            .unwrap()
            .iter()
            .map(|p| fs::read(p).unwrap())
            .collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_no_prompt_when_private_tags_kept() {
        let dir = scan_dir(&["1.dcm"]);
        let registry = TagRegistry::default();
        // Empty input would decline if the prompt were shown
        let summary = Scrubber::new(&registry, ScrubOptions::default().remove_private_tags(false))
            .with_prompt(answer(""))
            .run(dir.path())
            .unwrap();

        assert_eq!(summary.redaction.private_removed, 0);
        let batch = RecordBatch::load(dir.path()).unwrap();
        assert!(batch.records()[0].object.element(PRIVATE_DATA).is_ok());
    }

    #[test]
    fn test_unparseable_entry_aborts_before_prompt() {
        let dir = scan_dir(&["1.dcm"]);
        fs::write(dir.path().join("readme.txt"), b"hello").unwrap();
        let registry = TagRegistry::default();

        let err = Scrubber::new(&registry, ScrubOptions::default())
            .with_prompt(answer(""))
            .run(dir.path())
            .unwrap_err();
        assert!(matches!(err, ScrubError::Format { .. }));
    }

    #[test]
    fn test_missing_directory() {
        let registry = TagRegistry::default();
        let err = Scrubber::new(&registry, ScrubOptions::default())
            .with_prompt(answer("y\n"))
            .run(Path::new("/nonexistent/scan"))
            .unwrap_err();
        assert!(matches!(err, ScrubError::NotFound(_)));
    }

    #[test]
    fn test_conversion_runs_last() {
        let dir = scan_dir(&["1.dcm"]);
        let out = TempDir::new().unwrap();
        let registry = TagRegistry::default();
        let options = ScrubOptions::default().with_nifti_output(out.path().join("nifti"));

        let summary = Scrubber::new(&registry, options)
            .with_prompt(answer("y\n"))
            .with_converter(MarkerConverter)
            .run(dir.path())
            .unwrap();

        assert_eq!(summary.conversion, ConversionStatus::Converted);
        assert!(out.path().join("nifti/volume.nii.gz").exists());
    }

    #[test]
    fn test_conversion_fault_is_not_fatal() {
        let dir = scan_dir(&["1.dcm"]);
        let registry = TagRegistry::default();
        let options = ScrubOptions::default().with_nifti_output(dir.path().join("../nifti"));

        let summary = Scrubber::new(&registry, options)
            .with_prompt(answer("y\n"))
            .with_converter(FailingConverter)
            .run(dir.path())
            .unwrap();

        assert!(matches!(summary.conversion, ConversionStatus::Failed(ref msg) if msg.contains("converter crashed")));
    }

    #[test]
    fn test_report_truncates_then_appends() {
        let first = scan_dir(&["1.dcm"]);
        let second = scan_dir(&["2.dcm", "3.dcm"]);
        let out = TempDir::new().unwrap();
        let report_path = out.path().join("report.txt");
        fs::write(&report_path, "stale contents\n").unwrap();

        let registry = TagRegistry::default();
        let mut scrubber = Scrubber::new(&registry, ScrubOptions::default().with_report(&report_path))
            .with_prompt(answer("y\ny\n"));
        scrubber.run(first.path()).unwrap();
        scrubber.run(second.path()).unwrap();

        let report = fs::read_to_string(&report_path).unwrap();
        assert!(!report.contains("stale contents"));
        assert_eq!(report.matches(crate::report::RECORD_SEPARATOR).count(), 3);
    }
}
