//! Fatal error taxonomy for report generation.

use std::path::PathBuf;

/// "Report run failed" errors. Every variant aborts the run.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// Input document does not exist.
    #[error("Input file not found: {}", path.display())]
    InputNotFound {
        /// Resolved input path.
        path: PathBuf,
    },
    /// Input document exists but could not be read.
    #[error("Failed to read input file {}: {source}", path.display())]
    InputRead {
        /// Resolved input path.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// Input document is not valid JSON for the document shape.
    #[error("Malformed JSON in {}: {source}", path.display())]
    MalformedJson {
        /// Resolved input path.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },
    /// Fixed dataset could not be materialized.
    #[error("Invalid fixed dataset: {0}")]
    Dataset(String),
    /// Sheet population failed in the workbook kernel.
    #[error("Failed to build sheet {sheet:?}: {message}")]
    Sheet {
        /// Target sheet name.
        sheet: String,
        /// Kernel error text.
        message: String,
    },
    /// Workbook serialization or file write failed.
    #[error("Failed to write output {}: {message}", path.display())]
    OutputWrite {
        /// Resolved output path.
        path: PathBuf,
        /// Kernel or IO error text.
        message: String,
    },
}

impl ReportError {
    /// Adapter for kernel `Result<_, String>` errors raised while building `sheet`.
    pub fn sheet(sheet: &str) -> impl FnOnce(String) -> ReportError + '_ {
        move |message| ReportError::Sheet {
            sheet: sheet.to_string(),
            message,
        }
    }
}

/// Result alias for report operations.
pub type ReportResult<T> = Result<T, ReportError>;
