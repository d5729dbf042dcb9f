//! XLSX writer kernel that serializes buffered sheets into a workbook file.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook, Worksheet, XlsxError};
use tracing::{debug, info};

use crate::sheet::SheetGrid;
use crate::spec::{EnumCellValue, SpecAutofitCellsPolicy, SpecCellFormat, SpecXlsxReport};
use crate::util::{
    convert_cell_value, derive_horizontal_merge_tracker, derive_unique_sheet_name,
    sanitize_sheet_name,
};

/// Stateful workbook writer.
///
/// Sheets are buffered in memory as [`SheetGrid`]s until [`Self::close`]
/// serializes them in insertion order.
pub struct XlsxWriter {
    path_file_out: PathBuf,
    sheets: Vec<SheetGrid>,
    set_sheet_names_existing: BTreeSet<String>,
    report: SpecXlsxReport,
    if_closed: bool,
}

impl XlsxWriter {
    /// Create writer bound to output path.
    pub fn new(path_file_out: PathBuf) -> Self {
        Self {
            path_file_out,
            sheets: Vec::new(),
            set_sheet_names_existing: BTreeSet::new(),
            report: SpecXlsxReport::default(),
            if_closed: false,
        }
    }

    /// Return output file path.
    pub fn file_out(&self) -> &Path {
        &self.path_file_out
    }

    /// Return snapshot of the workbook report.
    pub fn report(&self) -> SpecXlsxReport {
        self.report.clone()
    }

    /// Record a non-fatal warning in the workbook report.
    pub fn warn(&mut self, msg: impl AsRef<str>) {
        self.report.warn(msg);
    }

    /// Buffered sheets in insertion order.
    pub fn sheets(&self) -> &[SheetGrid] {
        &self.sheets
    }

    /// Append a new empty sheet and return it for population.
    ///
    /// The name is sanitized and suffixed when it collides with an existing sheet.
    pub fn add_sheet(&mut self, sheet_name: &str) -> Result<&mut SheetGrid, String> {
        if self.if_closed {
            return Err("Cannot add sheet after close().".to_string());
        }
        let c_sheet_name = sanitize_sheet_name(sheet_name, "_");
        let sheet_name_unique =
            derive_unique_sheet_name(&mut self.set_sheet_names_existing, &c_sheet_name);
        if sheet_name_unique != sheet_name {
            self.report.warn(format!(
                "Sheet name {sheet_name:?} written as {sheet_name_unique:?}."
            ));
        }

        self.sheets.push(SheetGrid::new(sheet_name_unique));
        let n_idx_last = self.sheets.len() - 1;
        Ok(&mut self.sheets[n_idx_last])
    }

    /// Normalize column widths of every buffered sheet from its content.
    pub fn autofit_columns(&mut self, policy: &SpecAutofitCellsPolicy) -> Result<(), String> {
        for sheet in &mut self.sheets {
            sheet.autofit_columns(policy)?;
        }
        Ok(())
    }

    /// Serialize the workbook and flush it to disk. Idempotent.
    ///
    /// The file is written to a temporary sibling and renamed into place, so
    /// the target is either complete or untouched.
    pub fn close(&mut self) -> Result<(), String> {
        if self.if_closed {
            return Ok(());
        }

        let v_bytes = self.serialize_to_buffer()?;
        write_file_atomic(&self.path_file_out, &v_bytes)?;

        self.report.sheets = self.sheets.iter().map(SheetGrid::summary).collect();
        self.if_closed = true;
        info!(
            path = %self.path_file_out.display(),
            sheets = self.sheets.len(),
            bytes = v_bytes.len(),
            "workbook saved"
        );
        Ok(())
    }

    /// Serialize buffered sheets into XLSX bytes without touching the filesystem.
    pub fn serialize_to_buffer(&self) -> Result<Vec<u8>, String> {
        let mut workbook = Workbook::new();
        for sheet in &self.sheets {
            let worksheet = workbook.add_worksheet();
            worksheet
                .set_name(sheet.sheet_name())
                .map_err(derive_xlsx_error_text)?;
            write_sheet(worksheet, sheet)?;
            debug!(
                sheet = sheet.sheet_name(),
                rows = sheet.n_rows(),
                cols = sheet.n_cols(),
                "sheet serialized"
            );
        }
        workbook.save_to_buffer().map_err(derive_xlsx_error_text)
    }
}

fn write_sheet(worksheet: &mut Worksheet, sheet: &SheetGrid) -> Result<(), String> {
    let set_merged_cells = derive_horizontal_merge_tracker(sheet.merges());

    for ((row_idx, col_idx), cell) in sheet.cells() {
        if set_merged_cells.contains(&(*row_idx, *col_idx)) {
            continue;
        }
        let value = convert_cell_value(&cell.value, cell.format.is_numeric());
        write_cell_with_format(
            worksheet,
            *row_idx,
            *col_idx,
            &value,
            &derive_rust_xlsx_format(&cell.format),
        )?;
    }

    for merge in sheet.merges() {
        let fmt_merge = sheet
            .cell(merge.row_idx_start, merge.col_idx_start)
            .map(|cell| derive_rust_xlsx_format(&cell.format))
            .unwrap_or_else(Format::new);
        worksheet
            .merge_range(
                cast_row_num(merge.row_idx_start)?,
                cast_col_num(merge.col_idx_start)?,
                cast_row_num(merge.row_idx_start)?,
                cast_col_num(merge.col_idx_end)?,
                &merge.text,
                &fmt_merge,
            )
            .map_err(derive_xlsx_error_text)?;
    }

    for (col_idx, width) in sheet.column_widths() {
        worksheet
            .set_column_width(cast_col_num(*col_idx)?, *width)
            .map_err(derive_xlsx_error_text)?;
    }

    Ok(())
}

fn write_file_atomic(path_file_out: &Path, v_bytes: &[u8]) -> Result<(), String> {
    let mut c_file_name_tmp = path_file_out
        .file_name()
        .map(|name| name.to_os_string())
        .ok_or_else(|| format!("Output path has no file name: {}", path_file_out.display()))?;
    c_file_name_tmp.push(".tmp");
    let path_file_tmp = path_file_out.with_file_name(c_file_name_tmp);

    if let Err(err) = std::fs::write(&path_file_tmp, v_bytes) {
        let _ = std::fs::remove_file(&path_file_tmp);
        return Err(format!("Failed to write {}: {err}", path_file_tmp.display()));
    }
    if let Err(err) = std::fs::rename(&path_file_tmp, path_file_out) {
        let _ = std::fs::remove_file(&path_file_tmp);
        return Err(format!(
            "Failed to move workbook into {}: {err}",
            path_file_out.display()
        ));
    }
    Ok(())
}

fn write_cell_with_format(
    worksheet: &mut Worksheet,
    row_idx: usize,
    col_idx: usize,
    value: &EnumCellValue,
    format: &Format,
) -> Result<(), String> {
    match value {
        EnumCellValue::None => {
            worksheet
                .write_blank(cast_row_num(row_idx)?, cast_col_num(col_idx)?, format)
                .map_err(derive_xlsx_error_text)?;
        }
        EnumCellValue::String(val) => {
            worksheet
                .write_string_with_format(
                    cast_row_num(row_idx)?,
                    cast_col_num(col_idx)?,
                    val,
                    format,
                )
                .map_err(derive_xlsx_error_text)?;
        }
        EnumCellValue::Number(val) => {
            worksheet
                .write_number_with_format(
                    cast_row_num(row_idx)?,
                    cast_col_num(col_idx)?,
                    *val,
                    format,
                )
                .map_err(derive_xlsx_error_text)?;
        }
    }
    Ok(())
}

fn derive_rust_xlsx_format(spec: &SpecCellFormat) -> Format {
    let mut format = Format::new();

    if let Some(val) = spec.font_size {
        format = format.set_font_size(val as f64);
    }
    if spec.bold.unwrap_or(false) {
        format = format.set_bold();
    }

    if let Some(val) = &spec.align
        && let Some(align) = derive_format_align(val)
    {
        format = format.set_align(align);
    }
    if let Some(val) = &spec.valign
        && let Some(align) = derive_format_align(val)
    {
        format = format.set_align(align);
    }

    if let Some(val) = &spec.num_format {
        format = format.set_num_format(val.clone());
    }
    if let Some(val) = &spec.bg_color {
        format = format.set_background_color(val.as_str());
    }

    if let Some(val) = spec.border {
        format = format.set_border(derive_format_border(val));
    }

    if spec.text_wrap.unwrap_or(false) {
        format = format.set_text_wrap();
    }

    format
}

fn derive_format_border(border: i64) -> FormatBorder {
    match border {
        0 => FormatBorder::None,
        1 => FormatBorder::Thin,
        2 => FormatBorder::Medium,
        3 => FormatBorder::Dashed,
        4 => FormatBorder::Dotted,
        5 => FormatBorder::Thick,
        6 => FormatBorder::Double,
        7 => FormatBorder::Hair,
        _ => FormatBorder::None,
    }
}

fn derive_format_align(align: &str) -> Option<FormatAlign> {
    let value = align.trim().to_ascii_lowercase();
    match value.as_str() {
        "general" => Some(FormatAlign::General),
        "left" => Some(FormatAlign::Left),
        "center" => Some(FormatAlign::Center),
        "right" => Some(FormatAlign::Right),
        "top" => Some(FormatAlign::Top),
        "bottom" => Some(FormatAlign::Bottom),
        "vcenter" | "vertical_center" => Some(FormatAlign::VerticalCenter),
        _ => None,
    }
}

fn cast_row_num(value: usize) -> Result<u32, String> {
    u32::try_from(value).map_err(|_| format!("row index overflow: {value}"))
}

fn cast_col_num(value: usize) -> Result<u16, String> {
    u16::try_from(value).map_err(|_| format!("column index overflow: {value}"))
}

fn derive_xlsx_error_text(err: XlsxError) -> String {
    format!("xlsx write error: {err}")
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::{XlsxWriter, write_file_atomic};
    use crate::sheet::SheetWriter;
    use crate::spec::{SpecAutofitCellsPolicy, SpecCellFormat};

    struct TestDir {
        path: PathBuf,
    }

    impl TestDir {
        fn new() -> Self {
            let n = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .expect("clock")
                .as_nanos();
            let path = std::env::temp_dir().join(format!("finreport_xlsx_test_{n}"));
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

    fn populate(writer: &mut XlsxWriter) {
        let fmt_money = SpecCellFormat {
            num_format: Some("#,##0.00".to_string()),
            border: Some(1),
            ..Default::default()
        };
        let sheet = writer.add_sheet("Ledger").expect("add sheet");
        sheet
            .merge_range(0, 0, 1, "2024", &SpecCellFormat::default())
            .expect("merge");
        sheet
            .write_cell(1, 0, "100.00".into(), &fmt_money)
            .expect("write");
        sheet
            .write_cell(1, 1, "not a number".into(), &fmt_money)
            .expect("write");
    }

    #[test]
    fn test_close_writes_xlsx_and_is_idempotent() {
        let dir = TestDir::new();
        let path_out = dir.path().join("book.xlsx");
        let mut writer = XlsxWriter::new(path_out.clone());
        populate(&mut writer);
        writer
            .autofit_columns(&SpecAutofitCellsPolicy::default())
            .expect("autofit");

        writer.close().expect("close");
        writer.close().expect("close twice");

        let v_bytes = std::fs::read(&path_out).expect("read output");
        assert_eq!(&v_bytes[..2], b"PK");
        assert!(!dir.path().join("book.xlsx.tmp").exists());

        let report = writer.report();
        assert_eq!(report.sheets.len(), 1);
        assert_eq!(report.sheets[0].sheet_name, "Ledger");
        assert_eq!(report.sheets[0].n_rows, 2);
        assert!(writer.add_sheet("Late").is_err());
    }

    #[test]
    fn test_duplicate_sheet_names_are_suffixed_with_warning() {
        let dir = TestDir::new();
        let mut writer = XlsxWriter::new(dir.path().join("book.xlsx"));
        writer.add_sheet("Risk Assessment").expect("add");
        let c_name = writer
            .add_sheet("Risk Assessment")
            .expect("add")
            .sheet_name()
            .to_string();

        assert_eq!(c_name, "Risk Assessment__2");
        assert_eq!(writer.report().warnings.len(), 1);
    }

    #[test]
    fn test_close_into_missing_directory_fails_without_output() {
        let dir = TestDir::new();
        let path_out = dir.path().join("missing").join("book.xlsx");
        let mut writer = XlsxWriter::new(path_out.clone());
        populate(&mut writer);

        assert!(writer.close().is_err());
        assert!(!path_out.exists());
        assert!(!dir.path().join("missing").join("book.xlsx.tmp").exists());
    }

    #[test]
    fn test_failed_save_leaves_no_temp_sibling() {
        let dir = TestDir::new();
        let path_out = dir.path().join("book.xlsx");
        std::fs::create_dir_all(path_out.join("occupied")).expect("create blocking dir");

        let err = write_file_atomic(&path_out, b"PK").unwrap_err();

        assert!(err.starts_with("Failed to move workbook into"));
        assert!(path_out.is_dir());
        assert!(!dir.path().join("book.xlsx.tmp").exists());
    }
}
