use crate::error::{Result, ScrubError};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Converts a directory of DICOM files into another volume format
pub trait VolumeConverter {
    fn convert_directory(&self, source: &Path, destination: &Path) -> Result<()>;
}

/// NIfTI conversion through the external `dcm2niix` tool
///
/// Output is gzip-compressed (`-z y`); 3D acquisitions are cropped and
/// reoriented (`-x y`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dcm2Niix {
    /// Path or name of the converter binary
    pub binary: PathBuf,
    pub compress: bool,
    pub reorient: bool,
}

impl Default for Dcm2Niix {
    fn default() -> Self {
        Self {
            binary: PathBuf::from("dcm2niix"),
            compress: true,
            reorient: true,
        }
    }
}

impl Dcm2Niix {
    /// Uses a specific converter binary
    pub fn with_binary(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            ..Self::default()
        }
    }

    /// Arguments passed to the converter
    pub fn arguments(&self, source: &Path, destination: &Path) -> Vec<String> {
        let flag = |on: bool| (if on { "y" } else { "n" }).to_string();
        vec![
            "-z".to_string(),
            flag(self.compress),
            "-x".to_string(),
            flag(self.reorient),
            "-o".to_string(),
            destination.display().to_string(),
            source.display().to_string(),
        ]
    }
}

impl VolumeConverter for Dcm2Niix {
    fn convert_directory(&self, source: &Path, destination: &Path) -> Result<()> {
        fs::create_dir_all(destination).map_err(|e| {
            ScrubError::Conversion(format!(
                "cannot create output directory {}: {}",
                destination.display(),
                e
            ))
        })?;

        let args = self.arguments(source, destination);
        debug!("Running {} {}", self.binary.display(), args.join(" "));

        let output = Command::new(&self.binary)
            .args(&args)
            .output()
            .map_err(|e| {
                ScrubError::Conversion(format!(
                    "cannot run {}: {}",
                    self.binary.display(),
                    e
                ))
            })?;

        if !output.status.success() {
            return Err(ScrubError::Conversion(format!(
                "{} exited with {}: {}",
                self.binary.display(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        info!(
            "Converted {} to NIfTI in {}",
            source.display(),
            destination.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_arguments() {
        let converter = Dcm2Niix::default();
        let args = converter.arguments(Path::new("scan"), Path::new("out"));
        assert_eq!(args, vec!["-z", "y", "-x", "y", "-o", "out", "scan"]);
    }

    #[test]
    fn test_arguments_without_options() {
        let converter = Dcm2Niix {
            compress: false,
            reorient: false,
            ..Dcm2Niix::default()
        };
        let args = converter.arguments(Path::new("scan"), Path::new("out"));
        assert_eq!(args[1], "n");
        assert_eq!(args[3], "n");
    }

    #[test]
    fn test_missing_binary_is_conversion_error() {
        let dir = TempDir::new().unwrap();
        let converter = Dcm2Niix::with_binary("/nonexistent/dcm2niix");
        let err = converter
            .convert_directory(dir.path(), &dir.path().join("nifti"))
            .unwrap_err();

        assert!(matches!(err, ScrubError::Conversion(_)));
        // Output directory is prepared before the converter runs
        assert!(dir.path().join("nifti").is_dir());
    }
}
