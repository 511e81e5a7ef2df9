use crate::convert::Dcm2Niix;
use crate::scrub::ScrubOptions;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Command-line arguments for scanscrub
#[derive(Parser, Debug)]
#[command(name = "scanscrub")]
#[command(about = "Remove identifying metadata from directories of DICOM files")]
#[command(version)]
pub struct Cli {
    /// Directory of DICOM files, or a directory of such directories
    #[arg(short, long, value_name = "PATH")]
    pub path: PathBuf,

    /// Write the report to this file instead of standard output
    #[arg(long = "print", value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Keep private tags
    #[arg(long = "rpt")]
    pub keep_private_tags: bool,

    /// Keep curve data
    #[arg(long = "rc")]
    pub keep_curves: bool,

    /// File listing the identifying field names (first line only)
    #[arg(long = "ip", value_name = "FILE")]
    pub identifiers: Option<PathBuf>,

    /// Convert each scrubbed directory to NIfTI into this directory
    #[arg(long = "niftipath", value_name = "DIR")]
    pub nifti_output: Option<PathBuf>,

    /// dcm2niix binary used for NIfTI conversion
    #[arg(long = "dcm2niix", value_name = "BIN", default_value = "dcm2niix")]
    pub dcm2niix: PathBuf,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Scrub options selected by the flags
    pub fn scrub_options(&self) -> ScrubOptions {
        let mut options = ScrubOptions::default()
            .remove_private_tags(!self.keep_private_tags)
            .remove_curves(!self.keep_curves);
        if let Some(report) = &self.report {
            options = options.with_report(report);
        }
        if let Some(output) = &self.nifti_output {
            options = options.with_nifti_output(output);
        }
        options
    }

    pub fn converter(&self) -> Dcm2Niix {
        Dcm2Niix::with_binary(&self.dcm2niix)
    }
}

/// Command-line arguments for scancheck
#[derive(Parser, Debug)]
#[command(name = "scancheck")]
#[command(about = "Verify that no identifying DICOM field carries a value")]
#[command(version)]
pub struct CheckCli {
    /// Directory of DICOM files to verify
    #[arg(short, long, value_name = "PATH")]
    pub path: PathBuf,

    /// File listing the identifying field names (first line only)
    #[arg(long = "ip", value_name = "FILE")]
    pub identifiers: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Output format options
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format
    Text,
    /// JSON format
    Json,
}
