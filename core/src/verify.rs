//! Post-scrub verification
//!
//! Re-reads the files of a directory from disk and fails on the first
//! identifying field that still carries a value.

use crate::error::{Result, ScrubError};
use crate::redaction::is_blank;
use crate::registry::TagRegistry;
use crate::report::render_value;
use crate::scrub::{list_entries, ScanRecord};
use crate::tags::describe;
use crate::walker::{walk, ElementVisitor, VisitAction};
use dicom_object::mem::InMemElement;
use log::info;
use std::fmt;
use std::path::{Path, PathBuf};

/// Files that passed verification
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct VerificationReport {
    pub directory: PathBuf,
    pub files: Vec<PathBuf>,
}

impl fmt::Display for VerificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for file in &self.files {
            writeln!(f, "{} ..... SECURE", file.display())?;
        }
        write!(
            f,
            "{} file(s) in {} verified",
            self.files.len(),
            self.directory.display()
        )
    }
}

/// Checks that no registered field of a record carries a value
pub struct Verifier<'a> {
    registry: &'a TagRegistry,
}

impl<'a> Verifier<'a> {
    pub fn new(registry: &'a TagRegistry) -> Self {
        Self { registry }
    }

    /// Verifies every file in `directory`
    ///
    /// # Errors
    ///
    /// - [`ScrubError::NotFound`] if the directory does not exist
    /// - [`ScrubError::Format`] on the first entry that cannot be parsed
    /// - [`ScrubError::PolicyViolation`] on the first identifying element
    ///   that is not empty
    pub fn verify(&self, directory: &Path) -> Result<VerificationReport> {
        if !directory.is_dir() {
            return Err(ScrubError::NotFound(directory.to_path_buf()));
        }

        let mut files = Vec::new();
        for path in list_entries(directory)? {
            let mut record = ScanRecord::open(path)?;
            let mut check = PolicyCheck {
                registry: self.registry,
                path: &record.path,
            };
            walk(&mut record.object, &mut check)?;
            files.push(record.path);
        }

        info!(
            "Verified {} file(s) in {}",
            files.len(),
            directory.display()
        );
        Ok(VerificationReport {
            directory: directory.to_path_buf(),
            files,
        })
    }
}

struct PolicyCheck<'a> {
    registry: &'a TagRegistry,
    path: &'a Path,
}

impl ElementVisitor for PolicyCheck<'_> {
    fn name(&self) -> &'static str {
        "verify"
    }

    fn visit(&mut self, element: &InMemElement) -> Result<VisitAction> {
        let tag = element.header().tag;
        if self.registry.matches(tag) && !is_blank(element) {
            return Err(ScrubError::PolicyViolation {
                path: self.path.to_path_buf(),
                element: format!("{} {}: {}", describe(tag), element.vr(), render_value(element)),
            });
        }
        Ok(VisitAction::Keep)
    }
}
