//! Depth-first traversal over a DICOM data set
//!
//! A [`walk`] visits every element of a data set in ascending tag order and
//! then descends into the items of any sequence element that is still
//! present. Visitors never touch the data set directly: they return a
//! [`VisitAction`] which the walker applies, so removing elements during a
//! pass cannot disturb the traversal.

use crate::error::{Result, ScrubError};
use crate::tags::describe;
use dicom_core::value::DataSetSequence;
use dicom_core::{DataElement, Tag};
use dicom_object::mem::InMemElement;
use dicom_object::InMemDicomObject;
use log::trace;

/// What to do with the element that was just visited
#[derive(Debug, Clone, PartialEq)]
pub enum VisitAction {
    /// Leave the element as it is
    Keep,
    /// Replace the element with a new one carrying the same tag
    Replace(InMemElement),
    /// Remove the element from its data set
    Remove,
}

/// A policy applied to every element reached by [`walk`]
pub trait ElementVisitor {
    /// Short name used in log messages
    fn name(&self) -> &'static str;

    /// Decides what happens to `element`
    fn visit(&mut self, element: &InMemElement) -> Result<VisitAction>;

    /// Handles a fault raised while visiting the element at `tag`
    ///
    /// The element is still at its original value when this is called.
    /// Returning `Ok` continues the traversal; the default propagates.
    fn on_fault(&mut self, tag: Tag, error: ScrubError) -> Result<()> {
        let _ = tag;
        Err(error)
    }
}

/// Walks `obj` depth-first, applying `visitor` to every element
///
/// # Errors
///
/// Returns the first fault the visitor chooses not to tolerate.
pub fn walk(obj: &mut InMemDicomObject, visitor: &mut dyn ElementVisitor) -> Result<()> {
    walk_level(obj, visitor, 0)
}

fn walk_level(
    obj: &mut InMemDicomObject,
    visitor: &mut dyn ElementVisitor,
    depth: usize,
) -> Result<()> {
    // Snapshot: the visitor may remove elements from this level
    let tags: Vec<Tag> = obj.iter().map(|elem| elem.header().tag).collect();

    for tag in tags {
        let outcome = match obj.element(tag) {
            Ok(element) => visitor.visit(element),
            // Removed earlier in this pass
            Err(_) => continue,
        };

        if let Err(error) = outcome.and_then(|action| apply(obj, tag, action)) {
            trace!("{} fault at depth {} on {}", visitor.name(), depth, describe(tag));
            visitor.on_fault(tag, error)?;
            continue;
        }

        descend(obj, tag, visitor, depth)?;
    }

    Ok(())
}

/// Commits a visitor action; on error the element is left untouched
fn apply(obj: &mut InMemDicomObject, tag: Tag, action: VisitAction) -> Result<()> {
    match action {
        VisitAction::Keep => Ok(()),
        VisitAction::Replace(element) => {
            let replacement_tag = element.header().tag;
            if replacement_tag != tag {
                return Err(ScrubError::ElementAccess {
                    element: describe(tag),
                    message: format!(
                        "replacement carries a different tag {}",
                        describe(replacement_tag)
                    ),
                });
            }
            obj.put(element);
            Ok(())
        }
        VisitAction::Remove => {
            if obj.remove_element(tag) {
                Ok(())
            } else {
                Err(ScrubError::ElementAccess {
                    element: describe(tag),
                    message: "element is no longer present".to_string(),
                })
            }
        }
    }
}

/// Walks the items of the sequence at `tag`, if there is one
///
/// The sequence is written back with undefined length so that items whose
/// elements changed are re-encoded correctly.
fn descend(
    obj: &mut InMemDicomObject,
    tag: Tag,
    visitor: &mut dyn ElementVisitor,
    depth: usize,
) -> Result<()> {
    let (vr, mut items) = match obj.element(tag) {
        Ok(element) => match element.items() {
            Some(items) => (element.vr(), items.to_vec()),
            None => return Ok(()),
        },
        Err(_) => return Ok(()),
    };

    let outcome = items
        .iter_mut()
        .try_for_each(|item| walk_level(item, visitor, depth + 1));

    // Write back even on failure, keeping the items visited so far
    obj.put(DataElement::new(tag, vr, DataSetSequence::from(items)));
    outcome
}
