use crate::scrub::ScanRecord;
use crate::tags::{field_name, keyword};
use dicom_core::value::Value;
use dicom_core::{PrimitiveValue, VR};
use dicom_object::mem::InMemElement;
use dicom_object::InMemDicomObject;
use std::fmt;

/// Line printed before every record of a batch report
pub const RECORD_SEPARATOR: &str = "####################################";

/// Line printed between a record's path and its contents
pub const RECORD_DIVIDER: &str = "-----";

/// Text dump of a data set, one element per line
///
/// Sequence items are numbered and indented under their sequence.
pub struct RecordDump<'a> {
    obj: &'a InMemDicomObject,
    depth: usize,
}

impl<'a> RecordDump<'a> {
    /// Creates a new dump of `obj`
    pub fn new(obj: &'a InMemDicomObject) -> Self {
        Self { obj, depth: 0 }
    }

    fn nested(obj: &'a InMemDicomObject, depth: usize) -> Self {
        Self { obj, depth }
    }
}

impl<'a> fmt::Display for RecordDump<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let indent = "  ".repeat(self.depth);

        for elem in self.obj.iter() {
            let tag = elem.header().tag;
            let name = field_name(tag).or_else(|| keyword(tag)).unwrap_or("Unknown");
            writeln!(
                f,
                "{}({:04X},{:04X}) {:<36} {}: {}",
                indent,
                tag.group(),
                tag.element(),
                name,
                elem.vr(),
                render_value(elem)
            )?;

            if let Some(items) = elem.items() {
                for (i, item) in items.iter().enumerate() {
                    writeln!(f, "{}  Item {}", indent, i + 1)?;
                    write!(f, "{}", RecordDump::nested(item, self.depth + 1))?;
                }
            }
        }

        Ok(())
    }
}

fn is_binary(vr: VR) -> bool {
    matches!(
        vr,
        VR::OB | VR::OD | VR::OF | VR::OL | VR::OW | VR::UN
    )
}

pub(crate) fn render_value(elem: &InMemElement) -> String {
    match elem.value() {
        Value::Primitive(PrimitiveValue::Empty) => String::new(),
        Value::Primitive(_) if is_binary(elem.vr()) => match elem.header().len.get() {
            Some(len) => format!("<{} bytes>", len),
            None => "<binary>".to_string(),
        },
        Value::Primitive(value) => value
            .to_str()
            .trim_end_matches(|c: char| c == ' ' || c == '\0')
            .to_string(),
        Value::Sequence(_) => {
            let count = elem.items().map_or(0, |items| items.len());
            format!("<{} item(s)>", count)
        }
        _ => "<encapsulated pixel data>".to_string(),
    }
}

/// Text report for a processed batch
///
/// Each record is printed as a separator line, its path, a divider and the
/// full dump of its final contents.
pub struct BatchReport<'a> {
    records: &'a [ScanRecord],
}

impl<'a> BatchReport<'a> {
    /// Creates a new batch report
    pub fn new(records: &'a [ScanRecord]) -> Self {
        Self { records }
    }
}

impl<'a> fmt::Display for BatchReport<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for record in self.records {
            writeln!(f, "{}", RECORD_SEPARATOR)?;
            writeln!(f, "{}", record.path.display())?;
            writeln!(f, "{}", RECORD_DIVIDER)?;
            write!(f, "{}", RecordDump::new(&record.object))?;
        }
        Ok(())
    }
}
