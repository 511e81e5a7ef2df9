//! Redaction policies applied to every element of a record
//!
//! - [`NameBlanker`]: clears fields whose names are in the [`TagRegistry`]
//! - [`PrivateTagStripper`]: removes vendor-specific elements
//! - [`CurveStripper`]: removes legacy curve data
//!
//! [`redact`] runs them in the order the scrubber uses.

mod curves;
mod names;
mod private;

pub use curves::CurveStripper;
pub use names::NameBlanker;
pub use private::PrivateTagStripper;

use crate::error::Result;
use crate::registry::TagRegistry;
use crate::scrub::ScrubOptions;
use crate::walker::walk;
use dicom_core::value::Value;
use dicom_core::PrimitiveValue;
use dicom_object::mem::InMemElement;
use dicom_object::InMemDicomObject;
use std::ops::AddAssign;

/// Counts of what [`redact`] changed in one record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct RedactionStats {
    pub private_removed: usize,
    pub fields_blanked: usize,
    pub curves_removed: usize,
}

impl AddAssign for RedactionStats {
    fn add_assign(&mut self, other: Self) {
        self.private_removed += other.private_removed;
        self.fields_blanked += other.fields_blanked;
        self.curves_removed += other.curves_removed;
    }
}

/// Applies the enabled policies to one record
///
/// Order: private tags (if enabled), identifying names, curves (if enabled).
pub fn redact(
    obj: &mut InMemDicomObject,
    registry: &TagRegistry,
    options: &ScrubOptions,
) -> Result<RedactionStats> {
    let mut stats = RedactionStats::default();

    if options.remove_private_tags {
        let mut stripper = PrivateTagStripper::new();
        walk(obj, &mut stripper)?;
        stats.private_removed = stripper.removed();
    }

    let mut blanker = NameBlanker::new(registry);
    walk(obj, &mut blanker)?;
    stats.fields_blanked = blanker.blanked();

    if options.remove_curves {
        let mut stripper = CurveStripper::new();
        walk(obj, &mut stripper)?;
        stats.curves_removed = stripper.removed();
    }

    Ok(stats)
}

/// Checks whether an element carries no value
///
/// Strings count as empty when only DICOM padding (spaces, NUL) remains.
pub fn is_blank(element: &InMemElement) -> bool {
    match element.value() {
        Value::Primitive(PrimitiveValue::Empty) => true,
        Value::Primitive(value @ (PrimitiveValue::Str(_) | PrimitiveValue::Strs(_))) => value
            .to_str()
            .trim_matches(|c: char| c == ' ' || c == '\0')
            .is_empty(),
        Value::Primitive(value) => value.multiplicity() == 0,
        Value::Sequence(_) => element.items().map_or(true, |items| items.is_empty()),
        // Encapsulated pixel data
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{lo, nested_record, pn, PRIVATE_DATA};
    use crate::tags::{CURVE_LABEL, OPERATORS_NAME, PATIENT_NAME};
    use dicom_core::value::DataSetSequence;
    use dicom_core::{DataElement, Tag, VR};
    use rstest::rstest;

    #[rstest]
    #[case(pn(PATIENT_NAME, ""), true)]
    #[case(pn(PATIENT_NAME, "  "), true)]
    #[case(pn(PATIENT_NAME, "Doe^Jane"), false)]
    #[case(DataElement::empty(PATIENT_NAME, VR::PN), true)]
    #[case(DataElement::new(Tag(0x0010, 0x1030), VR::DS, PrimitiveValue::from("72.5")), false)]
    #[case(DataElement::new(Tag(0x0028, 0x0010), VR::US, PrimitiveValue::from(512_u16)), false)]
    fn test_is_blank(#[case] element: InMemElement, #[case] expected: bool) {
        assert_eq!(is_blank(&element), expected);
    }

    #[test]
    fn test_is_blank_sequences() {
        let empty = DataElement::new(
            Tag(0x0008, 0x1110),
            VR::SQ,
            DataSetSequence::from(Vec::<InMemDicomObject>::new()),
        );
        assert!(is_blank(&empty));

        let filled = DataElement::new(
            Tag(0x0008, 0x1110),
            VR::SQ,
            DataSetSequence::from(vec![InMemDicomObject::from_element_iter([lo(
                Tag(0x0008, 0x1150),
                "x",
            )])]),
        );
        assert!(!is_blank(&filled));
    }

    #[rstest]
    #[case(ScrubOptions::default(), RedactionStats { private_removed: 3, fields_blanked: 2, curves_removed: 3 })]
    #[case(ScrubOptions::default().remove_private_tags(false), RedactionStats { private_removed: 0, fields_blanked: 2, curves_removed: 3 })]
    #[case(ScrubOptions::default().remove_curves(false), RedactionStats { private_removed: 3, fields_blanked: 2, curves_removed: 0 })]
    fn test_redact_respects_options(
        #[case] options: ScrubOptions,
        #[case] expected: RedactionStats,
    ) {
        let mut dcm = nested_record("Doe^Jane", "Doe^Nested");
        // Default registry: Operators' Name and Patient's Sex match, the padded Patient's Name does not
        let stats = redact(&mut dcm, &TagRegistry::default(), &options).unwrap();

        assert_eq!(stats, expected);
        assert!(is_blank(dcm.element(OPERATORS_NAME).unwrap()));
        assert!(!is_blank(dcm.element(PATIENT_NAME).unwrap()));
        assert_eq!(
            dcm.element(PRIVATE_DATA).is_ok(),
            !options.remove_private_tags
        );
        assert_eq!(dcm.element(CURVE_LABEL).is_ok(), !options.remove_curves);
    }
}
