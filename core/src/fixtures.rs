//! Synthetic DICOM records shared by the unit tests

use crate::tags::{
    CURVE_DIMENSIONS, CURVE_LABEL, MODALITY, OPERATORS_NAME, PATIENT_ID, PATIENT_NAME,
    PATIENT_SEX, REFERENCED_STUDY_SEQUENCE, SOP_CLASS_UID, SOP_INSTANCE_UID, STUDY_INSTANCE_UID,
};
use dicom_core::value::DataSetSequence;
use dicom_core::{DataElement, PrimitiveValue, Tag, VR};
use dicom_object::mem::InMemElement;
use dicom_object::{FileMetaTableBuilder, InMemDicomObject};
use std::path::Path;

pub const CT_IMAGE_STORAGE: &str = "1.2.840.10008.5.1.4.1.1.2";
pub const EXPLICIT_VR_LITTLE_ENDIAN: &str = "1.2.840.10008.1.2.1";

pub const PRIVATE_CREATOR: Tag = Tag(0x0009, 0x0010);
pub const PRIVATE_DATA: Tag = Tag(0x0009, 0x1001);
pub const CURVE_LABEL_2: Tag = Tag(0x5002, 0x2500);

pub fn pn(tag: Tag, value: &str) -> InMemElement {
    DataElement::new(tag, VR::PN, PrimitiveValue::from(value))
}

pub fn lo(tag: Tag, value: &str) -> InMemElement {
    DataElement::new(tag, VR::LO, PrimitiveValue::from(value))
}

pub fn ui(tag: Tag, value: &str) -> InMemElement {
    DataElement::new(tag, VR::UI, PrimitiveValue::from(value))
}

/// A record with standard, private, curve and nested elements
pub fn nested_record(patient_name: &str, nested_name: &str) -> InMemDicomObject {
    let item = InMemDicomObject::from_element_iter([
        pn(PATIENT_NAME, nested_name),
        lo(PRIVATE_DATA, "nested vendor data"),
        ui(STUDY_INSTANCE_UID, "1.2.826.0.1.3680043.2.1125.1"),
    ]);

    InMemDicomObject::from_element_iter([
        ui(SOP_CLASS_UID, CT_IMAGE_STORAGE),
        ui(SOP_INSTANCE_UID, "1.2.826.0.1.3680043.2.1125.2"),
        DataElement::new(MODALITY, VR::CS, PrimitiveValue::from("CT")),
        pn(OPERATORS_NAME, "Tech^Alex"),
        pn(PATIENT_NAME, patient_name),
        lo(PATIENT_ID, "MRN-0042"),
        DataElement::new(PATIENT_SEX, VR::CS, PrimitiveValue::from("F")),
        lo(PRIVATE_CREATOR, "ACME 1.1"),
        lo(PRIVATE_DATA, "internal id 42"),
        DataElement::new(
            REFERENCED_STUDY_SEQUENCE,
            VR::SQ,
            DataSetSequence::from(vec![item]),
        ),
        DataElement::new(CURVE_DIMENSIONS, VR::US, PrimitiveValue::from(2_u16)),
        lo(CURVE_LABEL, "annotated by Dr. Who"),
        lo(CURVE_LABEL_2, "second curve"),
    ])
}

/// Writes `dcm` as a complete DICOM file at `path`
pub fn write_record(path: &Path, dcm: InMemDicomObject) {
    let instance_uid = crate::tags::get_string_value(&dcm, SOP_INSTANCE_UID)
        .unwrap_or_else(|| "1.2.826.0.1.3680043.2.1125.9".to_string());
    let file = dcm
        .with_meta(
            FileMetaTableBuilder::new()
                .transfer_syntax(EXPLICIT_VR_LITTLE_ENDIAN)
                .media_storage_sop_class_uid(CT_IMAGE_STORAGE)
                .media_storage_sop_instance_uid(instance_uid),
        )
        .unwrap();
    file.write_to_file(path).unwrap();
}

/// Writes a sample record named `file_name` into `dir`
pub fn write_sample(dir: &Path, file_name: &str, patient_name: &str) {
    write_record(
        &dir.join(file_name),
        nested_record(patient_name, "Doe^Nested"),
    );
}
