use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use calamine::{Data, Range, Reader, Xlsx, open_workbook};
use finreport::{
    ReportError, SpecFinancialReportOptions, SpecTransactionReportOptions,
    generate_financial_report, generate_transaction_report,
};

static N_TEST_DIR_SEQ: AtomicUsize = AtomicUsize::new(0);

struct TestDir {
    path: PathBuf,
}

impl TestDir {
    fn new() -> Self {
        let n = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        let n_seq = N_TEST_DIR_SEQ.fetch_add(1, Ordering::Relaxed);
        let path = std::env::temp_dir().join(format!("finreport_generate_test_{n}_{n_seq}"));
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

const C_DOC_FULL: &str = r#"{
  "ledger": {
    "columns": [{"name": "2024", "subColumns": ["DEBIT RM", "KREDIT RM"]}],
    "sections": [{
      "name": "ASSETS",
      "groups": [{
        "code": "1000",
        "name": "Cash",
        "items": [{
          "code": "1001",
          "name": "Petty Cash",
          "values": {"2024": {"debit": "100.00", "kredit": "0.00"}}
        }]
      }]
    }]
  },
  "materiality": {
    "categories": [{"name": "Revenue", "level": "High", "description": "d", "recommendations": ["a", "b"]}],
    "overallLevel": "High"
  },
  "auditSampling": {"categories": [], "overallLevel": "Low"},
  "riskAssessment": {
    "categories": [{"name": "Fraud", "level": "Medium", "status": "Open"}],
    "overallRisk": "Medium"
  }
}"#;

fn options_in(dir: &TestDir, c_doc: &str) -> SpecFinancialReportOptions {
    let path_file_in = dir.path().join("LEDGER.json");
    std::fs::write(&path_file_in, c_doc).expect("write input");
    SpecFinancialReportOptions {
        path_file_in,
        path_file_out: dir.path().join("financial_report.xlsx"),
        ..Default::default()
    }
}

fn assert_is_xlsx(path: &Path) {
    let v_bytes = std::fs::read(path).expect("read output");
    assert!(v_bytes.len() > 4);
    assert_eq!(&v_bytes[..2], b"PK");
}

fn read_sheet(workbook: &mut Xlsx<std::io::BufReader<std::fs::File>>, sheet_name: &str) -> Range<Data> {
    workbook.worksheet_range(sheet_name).expect("sheet range")
}

fn cell(range: &Range<Data>, row_idx: u32, col_idx: u32) -> Data {
    range
        .get_value((row_idx, col_idx))
        .cloned()
        .unwrap_or(Data::Empty)
}

#[test]
fn test_financial_report_writes_all_sheets() {
    let dir = TestDir::new();
    let options = options_in(&dir, C_DOC_FULL);

    let report = generate_financial_report(&options).expect("generate");

    assert_is_xlsx(&options.path_file_out);
    assert_eq!(report.path_file_out, options.path_file_out);
    let l_names: Vec<_> = report.sheets.iter().map(|s| s.sheet_name.as_str()).collect();
    assert_eq!(
        l_names,
        vec!["Ledger", "Materiality", "Audit Sampling", "Risk Assessment"]
    );
    assert!(report.warnings.is_empty());

    let ledger = report.sheet("Ledger").expect("ledger summary");
    assert_eq!(ledger.n_cols, 5);
    assert_eq!(ledger.n_rows, 4);
    assert_eq!(report.sheet("Risk Assessment").map(|s| s.n_cols), Some(5));
    assert_eq!(report.sheet("Materiality").map(|s| s.n_cols), Some(4));
    assert!(!dir.path().join("financial_report.xlsx.tmp").exists());
}

#[test]
fn test_financial_report_skips_missing_assessments() {
    let dir = TestDir::new();
    let options = options_in(&dir, r#"{"ledger": {"columns": [], "sections": []}}"#);

    let report = generate_financial_report(&options).expect("generate");

    assert_is_xlsx(&options.path_file_out);
    assert_eq!(report.sheet_count(), 1);
    assert_eq!(report.warning_count(), 3);
    assert!(report.to_string().starts_with("[REPORT] file="));
}

#[test]
fn test_missing_input_fails_without_output() {
    let dir = TestDir::new();
    let options = SpecFinancialReportOptions {
        path_file_in: dir.path().join("LEDGER.json"),
        path_file_out: dir.path().join("financial_report.xlsx"),
        ..Default::default()
    };

    let err = generate_financial_report(&options).unwrap_err();

    assert!(matches!(err, ReportError::InputNotFound { .. }));
    assert!(!options.path_file_out.exists());
}

#[test]
fn test_malformed_input_fails_without_output() {
    let dir = TestDir::new();
    let options = options_in(&dir, "not json");

    let err = generate_financial_report(&options).unwrap_err();

    assert!(matches!(err, ReportError::MalformedJson { .. }));
    assert!(!options.path_file_out.exists());
}

#[test]
fn test_output_into_missing_directory_is_write_error() {
    let dir = TestDir::new();
    let mut options = options_in(&dir, C_DOC_FULL);
    options.path_file_out = dir.path().join("absent").join("financial_report.xlsx");

    let err = generate_financial_report(&options).unwrap_err();

    assert!(matches!(err, ReportError::OutputWrite { .. }));
    assert!(!options.path_file_out.exists());
}

#[test]
fn test_transaction_report_creates_output_directory() {
    let dir = TestDir::new();
    let options = SpecTransactionReportOptions {
        path_file_out: dir.path().join("output").join("transaction_report.xlsx"),
        ..Default::default()
    };

    let report = generate_transaction_report(&options).expect("generate");

    assert_is_xlsx(&options.path_file_out);
    let sheet = report.sheet("Transactions").expect("summary");
    assert_eq!(sheet.n_rows, 7);
    assert_eq!(sheet.n_cols, 5);
    assert!(report.warnings.is_empty());
}

#[test]
fn test_financial_workbook_reads_back_with_numbers_and_merges() {
    let dir = TestDir::new();
    let options = options_in(&dir, C_DOC_FULL);
    generate_financial_report(&options).expect("generate");

    let mut workbook: Xlsx<_> = open_workbook(&options.path_file_out).expect("open workbook");
    assert_eq!(
        workbook.sheet_names(),
        vec!["Ledger", "Materiality", "Audit Sampling", "Risk Assessment"]
    );

    let ledger = read_sheet(&mut workbook, "Ledger");
    assert_eq!(cell(&ledger, 0, 0), Data::String("JENIS AKAUN".to_string()));
    assert_eq!(cell(&ledger, 0, 3), Data::String("2024".to_string()));
    assert_eq!(cell(&ledger, 1, 3), Data::String("DEBIT RM".to_string()));
    assert_eq!(cell(&ledger, 1, 4), Data::String("KREDIT RM".to_string()));
    assert_eq!(cell(&ledger, 2, 1), Data::String("ASSETS".to_string()));
    assert_eq!(cell(&ledger, 2, 3), Data::Float(0.0));
    assert_eq!(cell(&ledger, 3, 0), Data::String("1001".to_string()));
    assert_eq!(cell(&ledger, 3, 1), Data::String("Petty Cash".to_string()));
    assert_eq!(cell(&ledger, 3, 3), Data::Float(100.0));
    assert_eq!(cell(&ledger, 3, 4), Data::Float(0.0));

    workbook.load_merged_regions().expect("merged regions");
    let l_merges: Vec<_> = workbook
        .merged_regions_by_sheet("Ledger")
        .into_iter()
        .map(|(_, _, dims)| (dims.start, dims.end))
        .collect();
    assert_eq!(l_merges, vec![((0, 3), (0, 4))]);

    let materiality = read_sheet(&mut workbook, "Materiality");
    assert_eq!(cell(&materiality, 1, 3), Data::String("a\nb".to_string()));
    assert_eq!(cell(&materiality, 3, 0), Data::String("Overall Level".to_string()));

    let risk = read_sheet(&mut workbook, "Risk Assessment");
    assert_eq!(cell(&risk, 0, 2), Data::String("Status".to_string()));
    assert_eq!(cell(&risk, 1, 2), Data::String("Open".to_string()));
}

#[test]
fn test_transaction_workbook_reads_back_amounts_as_numbers() {
    let dir = TestDir::new();
    let options = SpecTransactionReportOptions {
        path_file_out: dir.path().join("transaction_report.xlsx"),
        ..Default::default()
    };
    generate_transaction_report(&options).expect("generate");

    let mut workbook: Xlsx<_> = open_workbook(&options.path_file_out).expect("open workbook");
    let range = read_sheet(&mut workbook, "Transactions");
    assert_eq!(
        cell(&range, 0, 0),
        Data::String("LAPORAN TRANSAKSI KEWANGAN".to_string())
    );
    assert_eq!(cell(&range, 2, 0), Data::String("100".to_string()));
    assert_eq!(cell(&range, 2, 3), Data::Float(5373.09));
    assert_eq!(cell(&range, 6, 2), Data::String("Debit".to_string()));
    assert_eq!(cell(&range, 6, 4), Data::String("Tidak".to_string()));

    workbook.load_merged_regions().expect("merged regions");
    let l_merges: Vec<_> = workbook
        .merged_regions_by_sheet("Transactions")
        .into_iter()
        .map(|(_, _, dims)| (dims.start, dims.end))
        .collect();
    assert_eq!(l_merges, vec![((0, 0), (0, 4))]);
}
