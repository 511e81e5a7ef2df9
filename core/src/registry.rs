use crate::error::{Result, ScrubError};
use crate::tags::{field_names, is_known_name};
use dicom_core::Tag;
use log::{debug, warn};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Field names redacted when no identifier file is given
///
/// The trailing space in `"Patient's Name "` is part of the shipped list and
/// is matched verbatim.
pub const DEFAULT_IDENTIFIERS: [&str; 11] = [
    "Referring Physician's Name",
    "Performing Physician's Name",
    "Name of Physician(s) Reading Study",
    "Operators' Name",
    "Patient's Name ",
    "Patient's Birth Date",
    "Patient's Sex",
    "Patient's Age",
    "Additional Patient History",
    "Patient's Size",
    "Patient's Weight",
];

/// Ordered set of field names considered identifying
///
/// Names are matched exactly: case, punctuation and whitespace all count.
/// A registry is never empty.
///
/// # Example
///
/// ```
/// use scanscrub_core::TagRegistry;
/// use dicom_core::Tag;
///
/// let registry = TagRegistry::from_names(["Patient's Name", "Patient's Name"]).unwrap();
/// assert_eq!(registry.len(), 1);
/// assert!(registry.matches(Tag(0x0010, 0x0010)));
/// assert!(!registry.matches(Tag(0x0010, 0x0020)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct TagRegistry {
    names: Vec<String>,
}

impl Default for TagRegistry {
    fn default() -> Self {
        Self {
            names: DEFAULT_IDENTIFIERS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl TagRegistry {
    /// Loads the registry from an identifier file, or the default set
    ///
    /// # Errors
    ///
    /// Returns [`ScrubError::Config`] if the file cannot be read or its
    /// first line is empty.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Reads the first line of `path` as the single identifying field name
    ///
    /// Only the first line is significant. The line terminator is dropped;
    /// every other character is kept as written.
    pub fn from_file(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| {
            ScrubError::Config(format!(
                "cannot open identifier file {}: {}",
                path.display(),
                e
            ))
        })?;
        let mut lines = BufReader::new(file).lines();

        let first = match lines.next() {
            Some(line) => line.map_err(|e| {
                ScrubError::Config(format!(
                    "cannot read identifier file {}: {}",
                    path.display(),
                    e
                ))
            })?,
            None => String::new(),
        };
        let name = first.as_str();

        if lines.map_while(|l| l.ok()).any(|l| !l.trim().is_empty()) {
            warn!(
                "Identifier file {} has more than one line; only the first entry is used",
                path.display()
            );
        }

        debug!("Loaded identifier {:?} from {}", name, path.display());
        Self::from_names([name]).map_err(|_| {
            ScrubError::Config(format!(
                "identifier file {} has an empty first line",
                path.display()
            ))
        })
    }

    /// Builds a registry from field names, dropping duplicates
    ///
    /// # Errors
    ///
    /// Returns [`ScrubError::Config`] if no non-empty name is given.
    pub fn from_names<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for name in names.into_iter().map(Into::into) {
            if !name.is_empty() && !unique.contains(&name) {
                unique.push(name);
            }
        }

        if unique.is_empty() {
            return Err(ScrubError::Config(
                "identifier registry must not be empty".to_string(),
            ));
        }

        let registry = Self { names: unique };
        for name in registry.unresolved() {
            warn!(
                "Identifier {:?} does not name any known DICOM field; nothing will be redacted for it",
                name
            );
        }
        Ok(registry)
    }

    /// Names that match no known field name or dictionary keyword
    pub fn unresolved(&self) -> impl Iterator<Item = &str> {
        self.iter().filter(|name| !is_known_name(name))
    }

    /// Checks whether a field name is registered
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Checks whether any name of `tag` is registered
    pub fn matches(&self, tag: Tag) -> bool {
        field_names(tag).any(|name| self.contains(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Checks whether the registry has no names
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
