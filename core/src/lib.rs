pub mod cli;
pub mod convert;
pub mod error;
pub mod pipeline;
pub mod redaction;
pub mod registry;
pub mod report;
pub mod scrub;
pub mod tags;
pub mod verify;
pub mod walker;

#[cfg(test)]
mod fixtures;

pub use convert::{Dcm2Niix, VolumeConverter};
pub use error::{Result, ScrubError};
pub use pipeline::{run_target, RunSummary};
pub use redaction::{redact, RedactionStats};
pub use registry::TagRegistry;
pub use report::{BatchReport, RecordDump};
pub use scrub::{BatchSummary, ConversionStatus, RecordBatch, ScanRecord, ScrubOptions, Scrubber};
pub use verify::{VerificationReport, Verifier};
