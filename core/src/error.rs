use std::path::PathBuf;
use thiserror::Error;

/// Result type for scanscrub operations
pub type Result<T> = std::result::Result<T, ScrubError>;

/// Error types for scanscrub operations
#[derive(Error, Debug)]
pub enum ScrubError {
    /// Bad or missing identifier file
    #[error("Configuration error: {0}")]
    Config(String),

    /// Target directory does not exist
    #[error("The target directory doesn't exist: {}", .0.display())]
    NotFound(PathBuf),

    /// File could not be parsed as DICOM
    #[error("DICOM error in {}: {message}", .path.display())]
    Format { path: PathBuf, message: String },

    /// Blanking an identifying field failed
    #[error("Field access error on {element}: {message}")]
    FieldAccess { element: String, message: String },

    /// Removing a private element failed
    #[error("Removal of private tags failed on {element}: {message}")]
    PrivateTagRemoval { element: String, message: String },

    /// Element value could not be converted
    #[error("Invalid tag value: {0}")]
    InvalidValue(String),

    /// A visitor action could not be applied to an element
    #[error("Element access error on {element}: {message}")]
    ElementAccess { element: String, message: String },

    /// NIfTI conversion failed
    #[error("Conversion error: {0}")]
    Conversion(String),

    /// An identifying field still carries a value
    #[error("{} {element} ..... NOT SECURE", .path.display())]
    PolicyViolation { path: PathBuf, element: String },

    /// Operator declined the irreversible private tag removal
    #[error("Run aborted by operator before any file was modified")]
    Declined,

    /// DICOM data could not be read outside of a batch file
    #[error("DICOM error: {0}")]
    Read(String),

    /// Scrubbed record could not be written back
    #[error("Write error: {0}")]
    Write(String),

    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ScrubError {
    /// Builds a format error for the file at `path`
    pub fn format(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        ScrubError::Format {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

impl From<dicom_object::ReadError> for ScrubError {
    fn from(e: dicom_object::ReadError) -> Self {
        ScrubError::Read(format!("{}", e))
    }
}

impl From<dicom_object::WriteError> for ScrubError {
    fn from(e: dicom_object::WriteError) -> Self {
        ScrubError::Write(format!("{}", e))
    }
}

impl From<dicom_core::value::ConvertValueError> for ScrubError {
    fn from(e: dicom_core::value::ConvertValueError) -> Self {
        ScrubError::InvalidValue(format!("{}", e))
    }
}

impl From<tempfile::PersistError> for ScrubError {
    fn from(e: tempfile::PersistError) -> Self {
        ScrubError::Io(e.error)
    }
}
