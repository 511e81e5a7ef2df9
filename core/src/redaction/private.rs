use crate::error::{Result, ScrubError};
use crate::tags::{describe, is_private};
use crate::walker::{ElementVisitor, VisitAction};
use dicom_core::Tag;
use dicom_object::mem::InMemElement;
use log::warn;

/// Removes every private (vendor-specific) element
///
/// Removal is best-effort: a fault is logged and the walk continues.
#[derive(Debug, Default)]
pub struct PrivateTagStripper {
    removed: usize,
    faults: usize,
}

impl PrivateTagStripper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of private elements removed so far
    pub fn removed(&self) -> usize {
        self.removed
    }

    /// Number of removals that failed and were skipped
    pub fn faults(&self) -> usize {
        self.faults
    }
}

impl ElementVisitor for PrivateTagStripper {
    fn name(&self) -> &'static str {
        "private-tag-stripping"
    }

    fn visit(&mut self, element: &InMemElement) -> Result<VisitAction> {
        if is_private(element.header().tag) {
            self.removed += 1;
            Ok(VisitAction::Remove)
        } else {
            Ok(VisitAction::Keep)
        }
    }

    fn on_fault(&mut self, tag: Tag, err: ScrubError) -> Result<()> {
        if is_private(tag) {
            self.removed = self.removed.saturating_sub(1);
        }
        self.faults += 1;

        let fault = ScrubError::PrivateTagRemoval {
            element: describe(tag),
            message: err.to_string(),
        };
        warn!("{}. Continuing ...", fault);
        Ok(())
    }
}
