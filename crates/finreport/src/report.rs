//! Run report model for one generated workbook.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use finreport_xlsx::{SpecSheetSummary, SpecXlsxReport};

/// Outcome of one generator run.
#[derive(Debug, Default, Clone)]
pub struct ReportGenerate {
    /// Workbook written by the run.
    pub path_file_out: PathBuf,
    /// Sheets in workbook order.
    pub sheets: Vec<SpecSheetSummary>,
    /// Non-fatal warnings (skipped sheets, renamed sheets).
    pub warnings: Vec<String>,
}

impl ReportGenerate {
    /// Combine the output path with the kernel's workbook report.
    pub fn from_xlsx_report(path_file_out: PathBuf, report: SpecXlsxReport) -> Self {
        Self {
            path_file_out,
            sheets: report.sheets,
            warnings: report.warnings,
        }
    }

    /// Number of sheets written.
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// Total populated rows across sheets.
    pub fn row_count(&self) -> usize {
        self.sheets.iter().map(|sheet| sheet.n_rows).sum()
    }

    /// Number of collected warnings.
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// Summary for one sheet by name.
    pub fn sheet(&self, sheet_name: &str) -> Option<&SpecSheetSummary> {
        self.sheets
            .iter()
            .find(|sheet| sheet.sheet_name == sheet_name)
    }

    /// Machine-readable counters.
    pub fn to_dict(&self) -> BTreeMap<String, u64> {
        let mut dict_counts = BTreeMap::new();
        dict_counts.insert("cnt_sheets".to_string(), self.sheet_count() as u64);
        dict_counts.insert("cnt_rows".to_string(), self.row_count() as u64);
        dict_counts.insert("cnt_warnings".to_string(), self.warning_count() as u64);
        dict_counts
    }

    /// Human-readable one-line summary.
    pub fn format(&self, prefix: &str) -> String {
        let dict_counts = self.to_dict();
        format!(
            "{prefix} file={} sheets={} rows={} warnings={}",
            self.path_file_out.display(),
            dict_counts["cnt_sheets"],
            dict_counts["cnt_rows"],
            dict_counts["cnt_warnings"]
        )
    }
}

impl fmt::Display for ReportGenerate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format("[REPORT]"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_generate_to_dict_and_format() {
        let report = ReportGenerate {
            path_file_out: PathBuf::from("out.xlsx"),
            sheets: vec![
                SpecSheetSummary {
                    sheet_name: "Ledger".to_string(),
                    n_rows: 10,
                    n_cols: 5,
                },
                SpecSheetSummary {
                    sheet_name: "Materiality".to_string(),
                    n_rows: 4,
                    n_cols: 4,
                },
            ],
            warnings: vec!["w".to_string()],
        };

        let dict_counts = report.to_dict();
        assert_eq!(dict_counts["cnt_sheets"], 2);
        assert_eq!(dict_counts["cnt_rows"], 14);
        assert_eq!(dict_counts["cnt_warnings"], 1);
        assert_eq!(report.sheet("Materiality").map(|s| s.n_cols), Some(4));

        let txt = report.format("[REPORT]");
        assert_eq!(txt, "[REPORT] file=out.xlsx sheets=2 rows=14 warnings=1");
        assert_eq!(report.to_string(), txt);
    }
}
