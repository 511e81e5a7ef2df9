use dicom_core::dictionary::DataDictionary;
use dicom_core::Tag;
use dicom_dictionary_std::StandardDataDictionary;
use dicom_object::InMemDicomObject;

// Physician/Operator Tags
pub const REFERRING_PHYSICIAN_NAME: Tag = Tag(0x0008, 0x0090);
pub const PERFORMING_PHYSICIAN_NAME: Tag = Tag(0x0008, 0x1050);
pub const NAME_OF_PHYSICIANS_READING_STUDY: Tag = Tag(0x0008, 0x1060);
pub const OPERATORS_NAME: Tag = Tag(0x0008, 0x1070);

// Patient Tags
pub const PATIENT_NAME: Tag = Tag(0x0010, 0x0010);
pub const PATIENT_ID: Tag = Tag(0x0010, 0x0020);
pub const PATIENT_BIRTH_DATE: Tag = Tag(0x0010, 0x0030);
pub const PATIENT_BIRTH_TIME: Tag = Tag(0x0010, 0x0032);
pub const PATIENT_SEX: Tag = Tag(0x0010, 0x0040);
pub const OTHER_PATIENT_IDS: Tag = Tag(0x0010, 0x1000);
pub const OTHER_PATIENT_NAMES: Tag = Tag(0x0010, 0x1001);
pub const PATIENT_AGE: Tag = Tag(0x0010, 0x1010);
pub const PATIENT_SIZE: Tag = Tag(0x0010, 0x1020);
pub const PATIENT_WEIGHT: Tag = Tag(0x0010, 0x1030);
pub const PATIENT_ADDRESS: Tag = Tag(0x0010, 0x1040);
pub const ADDITIONAL_PATIENT_HISTORY: Tag = Tag(0x0010, 0x21B0);

// Study/Series Identification Tags
pub const SOP_CLASS_UID: Tag = Tag(0x0008, 0x0016);
pub const SOP_INSTANCE_UID: Tag = Tag(0x0008, 0x0018);
pub const STUDY_DATE: Tag = Tag(0x0008, 0x0020);
pub const STUDY_TIME: Tag = Tag(0x0008, 0x0030);
pub const ACCESSION_NUMBER: Tag = Tag(0x0008, 0x0050);
pub const MODALITY: Tag = Tag(0x0008, 0x0060);
pub const MANUFACTURER: Tag = Tag(0x0008, 0x0070);
pub const STUDY_DESCRIPTION: Tag = Tag(0x0008, 0x1030);
pub const SERIES_DESCRIPTION: Tag = Tag(0x0008, 0x103E);
pub const STUDY_INSTANCE_UID: Tag = Tag(0x0020, 0x000D);
pub const SERIES_INSTANCE_UID: Tag = Tag(0x0020, 0x000E);
pub const STUDY_ID: Tag = Tag(0x0020, 0x0010);

// Institution/Site Tags
pub const INSTITUTION_NAME: Tag = Tag(0x0008, 0x0080);
pub const INSTITUTION_ADDRESS: Tag = Tag(0x0008, 0x0081);
pub const STATION_NAME: Tag = Tag(0x0008, 0x1010);

// Sequence Tags
pub const REFERENCED_STUDY_SEQUENCE: Tag = Tag(0x0008, 0x1110);
pub const REQUEST_ATTRIBUTES_SEQUENCE: Tag = Tag(0x0040, 0x0275);

// Curve Tags (repeating group 50xx)
pub const CURVE_DIMENSIONS: Tag = Tag(0x5000, 0x0005);
pub const CURVE_LABEL: Tag = Tag(0x5000, 0x2500);

// Image Tags
pub const ROWS: Tag = Tag(0x0028, 0x0010);
pub const COLUMNS: Tag = Tag(0x0028, 0x0011);
pub const PIXEL_DATA: Tag = Tag(0x7FE0, 0x0010);

/// Name used for every element in an odd (private) group
pub const PRIVATE_TAG_NAME: &str = "Private tag data";

/// Mask selecting the curve group range 0x5000-0x50FF
pub const CURVE_GROUP_MASK: u16 = 0xFF00;
pub const CURVE_GROUP: u16 = 0x5000;

/// Human-readable field names, as they appear in identifier files
const FIELD_NAMES: &[(Tag, &str)] = &[
    (SOP_CLASS_UID, "SOP Class UID"),
    (SOP_INSTANCE_UID, "SOP Instance UID"),
    (STUDY_DATE, "Study Date"),
    (STUDY_TIME, "Study Time"),
    (ACCESSION_NUMBER, "Accession Number"),
    (MODALITY, "Modality"),
    (MANUFACTURER, "Manufacturer"),
    (INSTITUTION_NAME, "Institution Name"),
    (INSTITUTION_ADDRESS, "Institution Address"),
    (REFERRING_PHYSICIAN_NAME, "Referring Physician's Name"),
    (STATION_NAME, "Station Name"),
    (STUDY_DESCRIPTION, "Study Description"),
    (SERIES_DESCRIPTION, "Series Description"),
    (PERFORMING_PHYSICIAN_NAME, "Performing Physician's Name"),
    (
        NAME_OF_PHYSICIANS_READING_STUDY,
        "Name of Physician(s) Reading Study",
    ),
    (OPERATORS_NAME, "Operators' Name"),
    (REFERENCED_STUDY_SEQUENCE, "Referenced Study Sequence"),
    (PATIENT_NAME, "Patient's Name"),
    (PATIENT_ID, "Patient ID"),
    (PATIENT_BIRTH_DATE, "Patient's Birth Date"),
    (PATIENT_BIRTH_TIME, "Patient's Birth Time"),
    (PATIENT_SEX, "Patient's Sex"),
    (OTHER_PATIENT_IDS, "Other Patient IDs"),
    (OTHER_PATIENT_NAMES, "Other Patient Names"),
    (PATIENT_AGE, "Patient's Age"),
    (PATIENT_SIZE, "Patient's Size"),
    (PATIENT_WEIGHT, "Patient's Weight"),
    (PATIENT_ADDRESS, "Patient's Address"),
    (ADDITIONAL_PATIENT_HISTORY, "Additional Patient History"),
    (STUDY_INSTANCE_UID, "Study Instance UID"),
    (SERIES_INSTANCE_UID, "Series Instance UID"),
    (STUDY_ID, "Study ID"),
    (ROWS, "Rows"),
    (COLUMNS, "Columns"),
    (REQUEST_ATTRIBUTES_SEQUENCE, "Request Attributes Sequence"),
    (PIXEL_DATA, "Pixel Data"),
    // De-identification profile: dates and times
    (Tag(0x0008, 0x0012), "Instance Creation Date"),
    (Tag(0x0008, 0x0013), "Instance Creation Time"),
    (Tag(0x0008, 0x0021), "Series Date"),
    (Tag(0x0008, 0x0022), "Acquisition Date"),
    (Tag(0x0008, 0x0023), "Content Date"),
    (Tag(0x0008, 0x0024), "Overlay Date"),
    (Tag(0x0008, 0x0025), "Curve Date"),
    (Tag(0x0008, 0x002A), "Acquisition DateTime"),
    (Tag(0x0008, 0x0031), "Series Time"),
    (Tag(0x0008, 0x0032), "Acquisition Time"),
    (Tag(0x0008, 0x0033), "Content Time"),
    (Tag(0x0008, 0x0034), "Overlay Time"),
    (Tag(0x0008, 0x0035), "Curve Time"),
    (Tag(0x0010, 0x21D0), "Last Menstrual Date"),
    (Tag(0x0040, 0x0244), "Performed Procedure Step Start Date"),
    (Tag(0x0040, 0x0245), "Performed Procedure Step Start Time"),
    // De-identification profile: persons
    (Tag(0x0008, 0x0092), "Referring Physician's Address"),
    (Tag(0x0008, 0x0094), "Referring Physician's Telephone Numbers"),
    (Tag(0x0008, 0x0096), "Referring Physician Identification Sequence"),
    (Tag(0x0008, 0x1048), "Physician(s) of Record"),
    (Tag(0x0008, 0x1049), "Physician(s) of Record Identification Sequence"),
    (Tag(0x0008, 0x1052), "Performing Physician Identification Sequence"),
    (Tag(0x0008, 0x1062), "Physician(s) Reading Study Identification Sequence"),
    (Tag(0x0008, 0x1072), "Operator Identification Sequence"),
    (Tag(0x0010, 0x1005), "Patient's Birth Name"),
    (Tag(0x0010, 0x1060), "Patient's Mother's Birth Name"),
    (Tag(0x0010, 0x1080), "Military Rank"),
    (Tag(0x0010, 0x1081), "Branch of Service"),
    (Tag(0x0010, 0x2150), "Country of Residence"),
    (Tag(0x0010, 0x2152), "Region of Residence"),
    (Tag(0x0010, 0x2154), "Patient's Telephone Numbers"),
    (Tag(0x0010, 0x2160), "Ethnic Group"),
    (Tag(0x0010, 0x2180), "Occupation"),
    (Tag(0x0010, 0x21F0), "Patient's Religious Preference"),
    (Tag(0x0032, 0x1032), "Requesting Physician"),
    (Tag(0x0032, 0x1033), "Requesting Service"),
    (Tag(0x0040, 0x0006), "Scheduled Performing Physician's Name"),
    (Tag(0x0040, 0xA123), "Person Name"),
    (Tag(0x4008, 0x0114), "Physician Approving Interpretation"),
    // De-identification profile: identifiers and free text
    (Tag(0x0008, 0x0014), "Instance Creator UID"),
    (Tag(0x0008, 0x1040), "Institutional Department Name"),
    (Tag(0x0008, 0x1080), "Admitting Diagnoses Description"),
    (Tag(0x0008, 0x1120), "Referenced Patient Sequence"),
    (Tag(0x0010, 0x0021), "Issuer of Patient ID"),
    (Tag(0x0010, 0x0050), "Patient's Insurance Plan Code Sequence"),
    (Tag(0x0010, 0x1002), "Other Patient IDs Sequence"),
    (Tag(0x0010, 0x1090), "Medical Record Locator"),
    (Tag(0x0010, 0x2000), "Medical Alerts"),
    (Tag(0x0010, 0x2110), "Allergies"),
    (Tag(0x0010, 0x21A0), "Smoking Status"),
    (Tag(0x0010, 0x21C0), "Pregnancy Status"),
    (Tag(0x0010, 0x4000), "Patient Comments"),
    (Tag(0x0018, 0x1000), "Device Serial Number"),
    (Tag(0x0018, 0x1030), "Protocol Name"),
    (Tag(0x0020, 0x4000), "Image Comments"),
    (Tag(0x0032, 0x1060), "Requested Procedure Description"),
    (Tag(0x0032, 0x4000), "Study Comments"),
    (Tag(0x0038, 0x0010), "Admission ID"),
    (Tag(0x0038, 0x0300), "Current Patient Location"),
    (Tag(0x0038, 0x0400), "Patient's Institution Residence"),
    (Tag(0x0038, 0x0500), "Patient State"),
    (Tag(0x0040, 0x0253), "Performed Procedure Step ID"),
    (Tag(0x0040, 0x0254), "Performed Procedure Step Description"),
    (Tag(0x0040, 0x1001), "Requested Procedure ID"),
    (Tag(0x0040, 0x2016), "Placer Order Number / Imaging Service Request"),
    (Tag(0x0040, 0x2017), "Filler Order Number / Imaging Service Request"),
    (Tag(0x0040, 0xA124), "UID"),
];

/// Checks whether a tag belongs to a private (odd-numbered) group
pub fn is_private(tag: Tag) -> bool {
    tag.group() & 1 == 1
}

/// Checks whether a tag belongs to the curve group range 0x5000-0x50FF
pub fn is_curve(tag: Tag) -> bool {
    tag.group() & CURVE_GROUP_MASK == CURVE_GROUP
}

/// Returns the human-readable field name of a tag
///
/// Curve elements share a name across the whole 50xx group range.
/// Private elements are all named [`PRIVATE_TAG_NAME`].
pub fn field_name(tag: Tag) -> Option<&'static str> {
    if is_private(tag) {
        return Some(PRIVATE_TAG_NAME);
    }
    let lookup = if is_curve(tag) {
        Tag(CURVE_GROUP, tag.element())
    } else {
        tag
    };
    if lookup == CURVE_DIMENSIONS {
        Some("Curve Dimensions")
    } else if lookup == CURVE_LABEL {
        Some("Curve Label")
    } else {
        FIELD_NAMES
            .iter()
            .find(|(t, _)| *t == lookup)
            .map(|(_, name)| *name)
    }
}

/// Returns the standard data dictionary keyword of a tag (e.g. `PatientName`)
pub fn keyword(tag: Tag) -> Option<&'static str> {
    if is_private(tag) {
        return None;
    }
    StandardDataDictionary.by_tag(tag).map(|entry| entry.alias)
}

/// Returns every name a tag is known by: its field name, then its keyword
pub fn field_names(tag: Tag) -> impl Iterator<Item = &'static str> {
    field_name(tag).into_iter().chain(keyword(tag))
}

/// Checks whether `name` can match any element
///
/// Known names are the field names above, the curve and private names, and
/// the standard data dictionary keywords.
pub fn is_known_name(name: &str) -> bool {
    name == PRIVATE_TAG_NAME
        || name == "Curve Dimensions"
        || name == "Curve Label"
        || FIELD_NAMES.iter().any(|(_, n)| *n == name)
        || StandardDataDictionary.by_name(name).is_some()
}

/// Formats a tag as `(GGGG,EEEE) Name` for logs and error messages
pub fn describe(tag: Tag) -> String {
    let name = field_name(tag).or_else(|| keyword(tag)).unwrap_or("Unknown");
    format!("({:04X},{:04X}) {}", tag.group(), tag.element(), name)
}

/// Helper to get string value from DICOM tag
///
/// Returns `None` if the tag is not present or cannot be converted to string
pub fn get_string_value(dcm: &InMemDicomObject, tag: Tag) -> Option<String> {
    dcm.element(tag)
        .ok()
        .and_then(|elem| elem.to_str().ok())
        .map(|s| s.trim().to_string())
}
