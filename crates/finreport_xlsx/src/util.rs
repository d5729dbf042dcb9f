//! Stateless helper utilities used by the XLSX writer kernel.

use std::collections::{BTreeMap, BTreeSet};

use crate::conf::{
    N_LEN_EXCEL_SHEET_NAME_MAX, N_NCOLS_EXCEL_MAX, N_NROWS_EXCEL_MAX, N_WIDTH_EXCEL_COLUMN_MAX,
    TUP_EXCEL_ILLEGAL,
};
use crate::spec::{EnumCellValue, SpecAutofitCellsPolicy, SpecSheetCell, SpecSheetHorizontalMerge};

////////////////////////////////////////////////////////////////////////////////
// #region CellValueConversion

/// Normalize a model value for serialization.
///
/// Text in a numerically formatted cell becomes a number when it parses as a
/// finite float, so Excel applies the number format to it. Everything else is
/// passed through unchanged.
pub fn convert_cell_value(value: &EnumCellValue, if_is_numeric_cell: bool) -> EnumCellValue {
    if !if_is_numeric_cell {
        return value.clone();
    }

    match value {
        EnumCellValue::String(s) => match s.trim().replace(',', "").parse::<f64>() {
            Ok(v) if v.is_finite() => EnumCellValue::Number(v),
            _ => EnumCellValue::String(s.clone()),
        },
        EnumCellValue::Number(n) if !n.is_finite() => EnumCellValue::String(n.to_string()),
        _ => value.clone(),
    }
}

/// Validate a zero-based cell position against Excel limits.
pub fn validate_cell_position(row_idx: usize, col_idx: usize) -> Result<(), String> {
    if row_idx >= N_NROWS_EXCEL_MAX {
        return Err(format!(
            "Row index {row_idx} exceeds Excel limit of {N_NROWS_EXCEL_MAX} rows."
        ));
    }
    if col_idx >= N_NCOLS_EXCEL_MAX {
        return Err(format!(
            "Column index {col_idx} exceeds Excel limit of {N_NCOLS_EXCEL_MAX} columns."
        ));
    }
    Ok(())
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region SheetNormalization

/// Replace invalid chars and trim to valid Excel sheet name.
pub fn sanitize_sheet_name(name: &str, replace_to: &str) -> String {
    let mut c_name = name.to_string();
    for c_illegal in TUP_EXCEL_ILLEGAL {
        c_name = c_name.replace(c_illegal, replace_to);
    }
    c_name = c_name.trim().to_string();
    if c_name.is_empty() {
        c_name = "Sheet".to_string();
    }

    c_name.chars().take(N_LEN_EXCEL_SHEET_NAME_MAX).collect()
}

/// Derive a name not yet present in `names_existing` and record it.
///
/// Collisions get a `__2`, `__3`, ... suffix within the length cap.
pub fn derive_unique_sheet_name(names_existing: &mut BTreeSet<String>, name: &str) -> String {
    if !names_existing.contains(name) {
        names_existing.insert(name.to_string());
        return name.to_string();
    }

    let base_name: String = name
        .chars()
        .take(usize::max(1, N_LEN_EXCEL_SHEET_NAME_MAX - 3))
        .collect();

    let mut n_idx = 2usize;
    loop {
        let candidate: String = format!("{base_name}__{n_idx}")
            .chars()
            .take(N_LEN_EXCEL_SHEET_NAME_MAX)
            .collect();
        if !names_existing.contains(&candidate) {
            names_existing.insert(candidate.clone());
            return candidate;
        }
        n_idx += 1;
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region HeaderMergeUtils

/// Build lookup set for cells covered by a horizontal merge (excluding anchor).
pub fn derive_horizontal_merge_tracker(
    horizontal_merges: &[SpecSheetHorizontalMerge],
) -> BTreeSet<(usize, usize)> {
    let mut set_merged_cells = BTreeSet::new();

    for merge in horizontal_merges {
        for col_idx in (merge.col_idx_start + 1)..=merge.col_idx_end {
            set_merged_cells.insert((merge.row_idx_start, col_idx));
        }
    }

    set_merged_cells
}

/// Whether `candidate` shares at least one cell with any of `existing`.
pub fn check_merge_overlap(
    existing: &[SpecSheetHorizontalMerge],
    candidate: &SpecSheetHorizontalMerge,
) -> bool {
    existing.iter().any(|merge| {
        merge.row_idx_start == candidate.row_idx_start
            && merge.col_idx_start <= candidate.col_idx_end
            && candidate.col_idx_start <= merge.col_idx_end
    })
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Autofit

/// Width of a stringified cell value: its character count.
pub fn derive_text_width(s: &str) -> usize {
    s.chars().count()
}

/// Infer per-column widths from every populated cell.
///
/// Width is the longest stringified value plus padding, clamped to the
/// policy bounds. Columns without any populated cell are absent from the
/// result.
pub fn derive_autofit_column_widths(
    cells: &BTreeMap<(usize, usize), SpecSheetCell>,
    policy: &SpecAutofitCellsPolicy,
) -> BTreeMap<usize, usize> {
    let mut dict_width_by_col: BTreeMap<usize, usize> = BTreeMap::new();
    for ((_, col_idx), cell) in cells {
        let n_width = derive_text_width(&cell.value.to_text());
        let n_width_recorded = dict_width_by_col.entry(*col_idx).or_default();
        *n_width_recorded = usize::max(*n_width_recorded, n_width);
    }

    let n_min = usize::max(1, policy.width_cell_min);
    let n_max = usize::min(
        N_WIDTH_EXCEL_COLUMN_MAX,
        usize::max(n_min, policy.width_cell_max),
    );
    for n_width in dict_width_by_col.values_mut() {
        *n_width = usize::min(
            n_max,
            usize::max(n_min, *n_width + policy.width_cell_padding),
        );
    }
    dict_width_by_col
}

/// Validate width bounds before use.
pub fn validate_policy_autofit(policy_autofit: &SpecAutofitCellsPolicy) -> Result<(), String> {
    if policy_autofit.width_cell_min == 0 {
        return Err("policy_autofit.width_cell_min must be >= 1.".to_string());
    }
    if policy_autofit.width_cell_max < policy_autofit.width_cell_min {
        return Err(
            "policy_autofit.width_cell_max must be >= policy_autofit.width_cell_min.".to_string(),
        );
    }
    Ok(())
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
