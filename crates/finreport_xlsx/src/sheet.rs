//! In-memory sheet model and the minimal writer seam used by sheet builders.

use std::collections::BTreeMap;

use crate::spec::{
    EnumCellValue, SpecAutofitCellsPolicy, SpecCellFormat, SpecSheetCell,
    SpecSheetHorizontalMerge, SpecSheetSummary,
};
use crate::util::{
    check_merge_overlap, derive_autofit_column_widths, validate_cell_position,
    validate_policy_autofit,
};

/// Operations a sheet builder needs from a worksheet.
///
/// Row and column indices are zero-based.
pub trait SheetWriter {
    /// Write `value` with `format` at one cell, replacing any previous content.
    fn write_cell(
        &mut self,
        row_idx: usize,
        col_idx: usize,
        value: EnumCellValue,
        format: &SpecCellFormat,
    ) -> Result<(), String>;

    /// Merge `col_idx_start..=col_idx_end` on one row and place `text` in the anchor.
    fn merge_range(
        &mut self,
        row_idx: usize,
        col_idx_start: usize,
        col_idx_end: usize,
        text: &str,
        format: &SpecCellFormat,
    ) -> Result<(), String>;

    /// Set one column width in character units.
    fn set_column_width(&mut self, col_idx: usize, width: f64) -> Result<(), String>;

    /// Write a blank cell that carries only a format.
    fn write_blank(
        &mut self,
        row_idx: usize,
        col_idx: usize,
        format: &SpecCellFormat,
    ) -> Result<(), String> {
        self.write_cell(row_idx, col_idx, EnumCellValue::None, format)
    }
}

/// Buffered worksheet: cells, merges and column widths.
#[derive(Debug, Clone, Default)]
pub struct SheetGrid {
    sheet_name: String,
    cells: BTreeMap<(usize, usize), SpecSheetCell>,
    merges: Vec<SpecSheetHorizontalMerge>,
    widths_by_col: BTreeMap<usize, f64>,
}

impl SheetGrid {
    /// Create an empty sheet.
    pub fn new(sheet_name: impl Into<String>) -> Self {
        Self {
            sheet_name: sheet_name.into(),
            ..Default::default()
        }
    }

    pub fn sheet_name(&self) -> &str {
        &self.sheet_name
    }

    /// Cell at a position, if populated.
    pub fn cell(&self, row_idx: usize, col_idx: usize) -> Option<&SpecSheetCell> {
        self.cells.get(&(row_idx, col_idx))
    }

    /// Text of a cell; empty for blank or missing cells.
    pub fn cell_text(&self, row_idx: usize, col_idx: usize) -> String {
        self.cell(row_idx, col_idx)
            .map(|cell| cell.value.to_text())
            .unwrap_or_default()
    }

    /// Texts of one row from column 0 up to the last populated column.
    pub fn row_texts(&self, row_idx: usize) -> Vec<String> {
        (0..self.n_cols())
            .map(|col_idx| self.cell_text(row_idx, col_idx))
            .collect()
    }

    pub fn cells(&self) -> &BTreeMap<(usize, usize), SpecSheetCell> {
        &self.cells
    }

    pub fn merges(&self) -> &[SpecSheetHorizontalMerge] {
        &self.merges
    }

    /// Explicit column width, if one was set.
    pub fn column_width(&self, col_idx: usize) -> Option<f64> {
        self.widths_by_col.get(&col_idx).copied()
    }

    pub fn column_widths(&self) -> &BTreeMap<usize, f64> {
        &self.widths_by_col
    }

    /// Number of rows up to the last populated one.
    pub fn n_rows(&self) -> usize {
        self.cells
            .keys()
            .map(|(row_idx, _)| row_idx + 1)
            .max()
            .unwrap_or(0)
    }

    /// Number of columns up to the last populated one.
    pub fn n_cols(&self) -> usize {
        self.cells
            .keys()
            .map(|(_, col_idx)| col_idx + 1)
            .max()
            .unwrap_or(0)
    }

    pub fn summary(&self) -> SpecSheetSummary {
        SpecSheetSummary {
            sheet_name: self.sheet_name.clone(),
            n_rows: self.n_rows(),
            n_cols: self.n_cols(),
        }
    }

    /// Overwrite every populated column's width from its content.
    pub fn autofit_columns(&mut self, policy: &SpecAutofitCellsPolicy) -> Result<(), String> {
        validate_policy_autofit(policy)?;
        for (col_idx, n_width) in derive_autofit_column_widths(&self.cells, policy) {
            self.widths_by_col.insert(col_idx, n_width as f64);
        }
        Ok(())
    }
}

impl SheetWriter for SheetGrid {
    fn write_cell(
        &mut self,
        row_idx: usize,
        col_idx: usize,
        value: EnumCellValue,
        format: &SpecCellFormat,
    ) -> Result<(), String> {
        validate_cell_position(row_idx, col_idx)?;
        self.cells.insert(
            (row_idx, col_idx),
            SpecSheetCell {
                value,
                format: format.clone(),
            },
        );
        Ok(())
    }

    fn merge_range(
        &mut self,
        row_idx: usize,
        col_idx_start: usize,
        col_idx_end: usize,
        text: &str,
        format: &SpecCellFormat,
    ) -> Result<(), String> {
        if col_idx_end < col_idx_start {
            return Err(format!(
                "Invalid merge on row {row_idx}: end column {col_idx_end} < start column {col_idx_start}."
            ));
        }
        validate_cell_position(row_idx, col_idx_end)?;

        if col_idx_end > col_idx_start {
            let merge = SpecSheetHorizontalMerge {
                row_idx_start: row_idx,
                col_idx_start,
                col_idx_end,
                text: text.to_string(),
            };
            if check_merge_overlap(&self.merges, &merge) {
                return Err(format!(
                    "Merge on row {row_idx} columns {col_idx_start}..={col_idx_end} overlaps an existing merge."
                ));
            }
            self.merges.push(merge);
            for col_idx in (col_idx_start + 1)..=col_idx_end {
                self.write_blank(row_idx, col_idx, format)?;
            }
        }

        self.write_cell(row_idx, col_idx_start, EnumCellValue::from(text), format)
    }

    fn set_column_width(&mut self, col_idx: usize, width: f64) -> Result<(), String> {
        validate_cell_position(0, col_idx)?;
        if !width.is_finite() || width < 0.0 {
            return Err(format!("Invalid width {width} for column {col_idx}."));
        }
        self.widths_by_col.insert(col_idx, width);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_range_places_anchor_and_blank_covered_cells() {
        let mut grid = SheetGrid::new("Ledger");
        let fmt = SpecCellFormat {
            bold: Some(true),
            ..Default::default()
        };

        grid.merge_range(0, 3, 4, "2024", &fmt).unwrap();

        assert_eq!(grid.cell_text(0, 3), "2024");
        assert_eq!(grid.cell(0, 4).unwrap().value, EnumCellValue::None);
        assert_eq!(grid.merges().len(), 1);
        assert_eq!(grid.merges()[0].width(), 2);
        assert!(grid.merge_range(0, 4, 5, "2025", &fmt).is_err());
    }

    #[test]
    fn test_single_column_merge_degrades_to_plain_cell() {
        let mut grid = SheetGrid::new("S");
        grid.merge_range(2, 1, 1, "x", &SpecCellFormat::default())
            .unwrap();
        assert!(grid.merges().is_empty());
        assert_eq!(grid.cell_text(2, 1), "x");
        assert!(
            grid.merge_range(2, 3, 1, "x", &SpecCellFormat::default())
                .is_err()
        );
    }

    #[test]
    fn test_dimensions_and_row_texts() {
        let mut grid = SheetGrid::new("S");
        let fmt = SpecCellFormat::default();
        grid.write_cell(0, 0, "a".into(), &fmt).unwrap();
        grid.write_cell(2, 3, "d".into(), &fmt).unwrap();

        assert_eq!(grid.n_rows(), 3);
        assert_eq!(grid.n_cols(), 4);
        assert_eq!(grid.row_texts(2), vec!["", "", "", "d"]);
        assert!(grid.write_cell(1_048_576, 0, "x".into(), &fmt).is_err());
    }

    #[test]
    fn test_autofit_overrides_fixed_widths_and_is_idempotent() {
        let mut grid = SheetGrid::new("S");
        let fmt = SpecCellFormat::default();
        grid.write_cell(0, 0, "Overall Level".into(), &fmt).unwrap();
        grid.write_cell(1, 0, "High".into(), &fmt).unwrap();
        grid.set_column_width(0, 40.0).unwrap();

        let policy = SpecAutofitCellsPolicy::default();
        grid.autofit_columns(&policy).unwrap();
        let widths_first = grid.column_widths().clone();
        grid.autofit_columns(&policy).unwrap();

        assert_eq!(grid.column_width(0), Some(15.0));
        assert_eq!(grid.column_widths(), &widths_first);
    }
}
