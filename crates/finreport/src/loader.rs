//! Input document loader.

use std::io::ErrorKind;
use std::path::Path;

use tracing::info;

use crate::error::{ReportError, ReportResult};
use crate::spec::SpecFinancialDocument;

/// Read and parse the input document.
///
/// A missing file and malformed JSON are fatal; missing fields inside the
/// document are defaulted by the models.
pub fn load_financial_document(path_file_in: &Path) -> ReportResult<SpecFinancialDocument> {
    let c_text = std::fs::read_to_string(path_file_in).map_err(|err| {
        if err.kind() == ErrorKind::NotFound {
            ReportError::InputNotFound {
                path: path_file_in.to_path_buf(),
            }
        } else {
            ReportError::InputRead {
                path: path_file_in.to_path_buf(),
                source: err,
            }
        }
    })?;

    let doc = parse_financial_document(&c_text).map_err(|err| ReportError::MalformedJson {
        path: path_file_in.to_path_buf(),
        source: err,
    })?;

    info!(
        path = %path_file_in.display(),
        ledger = doc.ledger.is_some(),
        materiality = doc.materiality.is_some(),
        audit_sampling = doc.audit_sampling.is_some(),
        risk_assessment = doc.risk_assessment.is_some(),
        "input document loaded"
    );
    Ok(doc)
}

/// Parse the input document from JSON text.
pub fn parse_financial_document(c_text: &str) -> Result<SpecFinancialDocument, serde_json::Error> {
    serde_json::from_str(c_text)
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::load_financial_document;
    use crate::error::ReportError;

    struct TestDir {
        path: PathBuf,
    }

    impl TestDir {
        fn new() -> Self {
            let n = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .expect("clock")
                .as_nanos();
            let path = std::env::temp_dir().join(format!("finreport_loader_test_{n}"));
            std::fs::create_dir_all(&path).expect("create test dir");
            Self { path }
        }

        fn path(&self) -> &Path {
            &self.path
        }
    }

    impl Drop for TestDir {
        fn drop(&mut self) {
            let _ = std::fs::remove_dir_all(&self.path);
        }
    }

    #[test]
    fn test_missing_file_is_input_not_found() {
        let dir = TestDir::new();
        let err = load_financial_document(&dir.path().join("LEDGER.json")).unwrap_err();
        assert!(matches!(err, ReportError::InputNotFound { .. }));
    }

    #[test]
    fn test_malformed_json_is_fatal() {
        let dir = TestDir::new();
        let path_in = dir.path().join("LEDGER.json");
        std::fs::write(&path_in, "{\"ledger\": [").expect("write");

        let err = load_financial_document(&path_in).unwrap_err();
        assert!(matches!(err, ReportError::MalformedJson { .. }));
        assert!(err.to_string().starts_with("Malformed JSON in"));
    }

    #[test]
    fn test_directory_is_read_error() {
        let dir = TestDir::new();
        let err = load_financial_document(dir.path()).unwrap_err();
        assert!(matches!(err, ReportError::InputRead { .. }));
    }

    #[test]
    fn test_empty_object_loads_with_no_parts() {
        let dir = TestDir::new();
        let path_in = dir.path().join("LEDGER.json");
        std::fs::write(&path_in, "{}").expect("write");

        let doc = load_financial_document(&path_in).expect("load");
        assert!(doc.ledger.is_none());
        assert!(doc.materiality.is_none());
    }
}
