use crate::error::{Result, ScrubError};
use crate::registry::TagRegistry;
use crate::tags::describe;
use crate::walker::{ElementVisitor, VisitAction};
use dicom_core::{DataElement, Tag};
use dicom_object::mem::InMemElement;
use log::{error, info};

/// Clears the value of every element whose name is in the registry
///
/// The element itself stays in the data set with its tag and VR, so the
/// record keeps its structure for downstream conversion.
///
/// A fault on any element is fatal: it is logged, the element keeps its
/// original value, and the fault is returned as
/// [`ScrubError::FieldAccess`].
pub struct NameBlanker<'a> {
    registry: &'a TagRegistry,
    blanked: usize,
}

impl<'a> NameBlanker<'a> {
    pub fn new(registry: &'a TagRegistry) -> Self {
        Self {
            registry,
            blanked: 0,
        }
    }

    /// Number of elements blanked so far
    pub fn blanked(&self) -> usize {
        self.blanked
    }
}

impl ElementVisitor for NameBlanker<'_> {
    fn name(&self) -> &'static str {
        "name-blanking"
    }

    fn visit(&mut self, element: &InMemElement) -> Result<VisitAction> {
        let tag = element.header().tag;
        if !self.registry.matches(tag) {
            return Ok(VisitAction::Keep);
        }

        self.blanked += 1;
        Ok(VisitAction::Replace(DataElement::empty(tag, element.vr())))
    }

    fn on_fault(&mut self, tag: Tag, err: ScrubError) -> Result<()> {
        let element = describe(tag);
        error!("ERROR in {}: {}", element, err);
        info!("Reverting {} back to its original value", element);
        Err(ScrubError::FieldAccess {
            element,
            message: err.to_string(),
        })
    }
}
