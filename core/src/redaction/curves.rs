use crate::error::Result;
use crate::tags::is_curve;
use crate::walker::{ElementVisitor, VisitAction};
use dicom_object::mem::InMemElement;

/// Removes legacy curve data (groups 0x5000-0x50FF)
///
/// Curves can carry free-text annotations, so they are purged as a whole.
#[derive(Debug, Default)]
pub struct CurveStripper {
    removed: usize,
}

impl CurveStripper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn removed(&self) -> usize {
        self.removed
    }
}

impl ElementVisitor for CurveStripper {
    fn name(&self) -> &'static str {
        "curve-stripping"
    }

    fn visit(&mut self, element: &InMemElement) -> Result<VisitAction> {
        if is_curve(element.header().tag) {
            self.removed += 1;
            Ok(VisitAction::Remove)
        } else {
            Ok(VisitAction::Keep)
        }
    }
}
