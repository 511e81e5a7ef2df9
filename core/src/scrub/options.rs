use std::path::PathBuf;

/// Configuration for one scrub run
///
/// Defaults match the command line: private tags and curves are removed,
/// the report goes to standard output, no NIfTI conversion.
///
/// # Example
///
/// ```
/// use scanscrub_core::ScrubOptions;
///
/// let options = ScrubOptions::default()
///     .remove_curves(false)
///     .with_report("report.txt");
///
/// assert!(options.remove_private_tags);
/// assert!(!options.remove_curves);
/// assert!(options.nifti_output.is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrubOptions {
    /// Strip private elements (asks for confirmation first)
    pub remove_private_tags: bool,

    /// Strip curve group elements
    pub remove_curves: bool,

    /// Report destination; `None` prints to standard output
    pub report: Option<PathBuf>,

    /// NIfTI output directory; `None` disables conversion
    pub nifti_output: Option<PathBuf>,
}

impl Default for ScrubOptions {
    fn default() -> Self {
        Self {
            remove_private_tags: true,
            remove_curves: true,
            report: None,
            nifti_output: None,
        }
    }
}

impl ScrubOptions {
    /// Builder: Strip private tags
    pub fn remove_private_tags(mut self, remove: bool) -> Self {
        self.remove_private_tags = remove;
        self
    }

    /// Builder: Strip curve data
    pub fn remove_curves(mut self, remove: bool) -> Self {
        self.remove_curves = remove;
        self
    }

    /// Builder: Write the report to a file
    pub fn with_report(mut self, path: impl Into<PathBuf>) -> Self {
        self.report = Some(path.into());
        self
    }

    /// Builder: Convert the scrubbed directory to NIfTI
    pub fn with_nifti_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.nifti_output = Some(path.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = ScrubOptions::default();
        assert!(options.remove_private_tags);
        assert!(options.remove_curves);
        assert!(options.report.is_none());
        assert!(options.nifti_output.is_none());
    }

    #[test]
    fn test_builder_chain() {
        let options = ScrubOptions::default()
            .remove_private_tags(false)
            .with_report("out.txt")
            .with_nifti_output("nifti");

        assert!(!options.remove_private_tags);
        assert!(options.remove_curves);
        assert_eq!(options.report, Some(PathBuf::from("out.txt")));
        assert_eq!(options.nifti_output, Some(PathBuf::from("nifti")));
    }
}
