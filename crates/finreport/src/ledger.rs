//! Ledger sheet builder: two-level merged header plus the section/group/item tree.

use finreport_xlsx::{EnumCellValue, SheetWriter, SpecCellFormat};
use tracing::debug;

use crate::conf::{
    C_AMOUNT_ZERO, N_WIDTH_LEDGER_VALUE, SpecLedgerFormats, TUP_LEDGER_LABEL_HEADERS,
    TUP_LEDGER_LABEL_WIDTHS, TUP_LEDGER_SUB_COLUMNS_DEFAULT,
};
use crate::spec::{
    EnumGroupType, SpecLedger, SpecLedgerColumn, SpecLedgerGroup, SpecLedgerItem,
    SpecValuesByColumn,
};

/// Number of fixed label columns before the value columns.
pub const N_COLS_LEDGER_LABEL: usize = TUP_LEDGER_LABEL_HEADERS.len();
/// Number of header rows.
pub const N_ROWS_LEDGER_HEADER: usize = 2;

/// Zero-based physical column of the debit cell of logical column `n_idx_column`.
pub fn derive_value_col_idx(n_idx_column: usize) -> usize {
    N_COLS_LEDGER_LABEL + 2 * n_idx_column
}

/// Populate `sheet` with the ledger and return the number of rows written.
pub fn build_ledger_sheet<W: SheetWriter + ?Sized>(
    sheet: &mut W,
    ledger: &SpecLedger,
    formats: &SpecLedgerFormats,
) -> Result<usize, String> {
    write_ledger_header(sheet, &ledger.columns, formats)?;

    let mut n_row = N_ROWS_LEDGER_HEADER;
    for section in &ledger.sections {
        write_label_cells(
            sheet,
            n_row,
            ["", &section.name, ""],
            [&formats.text, &formats.text_shaded, &formats.text],
        )?;
        write_zero_cells(sheet, n_row, ledger.columns.len(), formats)?;
        n_row += 1;

        for group in &section.groups {
            n_row = write_group_rows(sheet, n_row, &ledger.columns, group, formats)?;
        }
    }

    for (n_idx_col, width) in TUP_LEDGER_LABEL_WIDTHS.iter().enumerate() {
        sheet.set_column_width(n_idx_col, *width)?;
    }
    for n_idx_col in N_COLS_LEDGER_LABEL..derive_value_col_idx(ledger.columns.len()) {
        sheet.set_column_width(n_idx_col, N_WIDTH_LEDGER_VALUE)?;
    }

    debug!(
        columns = ledger.columns.len(),
        sections = ledger.sections.len(),
        rows = n_row,
        "ledger sheet built"
    );
    Ok(n_row)
}

fn write_ledger_header<W: SheetWriter + ?Sized>(
    sheet: &mut W,
    columns: &[SpecLedgerColumn],
    formats: &SpecLedgerFormats,
) -> Result<(), String> {
    for (n_idx_col, label) in TUP_LEDGER_LABEL_HEADERS.iter().enumerate() {
        sheet.write_cell(0, n_idx_col, EnumCellValue::from(*label), &formats.header)?;
        sheet.write_blank(1, n_idx_col, &formats.header)?;
    }

    for (n_idx_column, column) in columns.iter().enumerate() {
        let n_col_debit = derive_value_col_idx(n_idx_column);
        sheet.merge_range(0, n_col_debit, n_col_debit + 1, &column.name, &formats.header)?;

        for (n_offset, c_default) in TUP_LEDGER_SUB_COLUMNS_DEFAULT.iter().enumerate() {
            let c_label = column
                .sub_columns
                .get(n_offset)
                .map(String::as_str)
                .unwrap_or(c_default);
            sheet.write_cell(
                1,
                n_col_debit + n_offset,
                EnumCellValue::from(c_label),
                &formats.header,
            )?;
        }
    }
    Ok(())
}

fn write_group_rows<W: SheetWriter + ?Sized>(
    sheet: &mut W,
    mut n_row: usize,
    columns: &[SpecLedgerColumn],
    group: &SpecLedgerGroup,
    formats: &SpecLedgerFormats,
) -> Result<usize, String> {
    if group.group_type == EnumGroupType::Header {
        write_label_cells(
            sheet,
            n_row,
            [&group.code, &group.name, ""],
            [&formats.text, &formats.text_shaded, &formats.text],
        )?;
        write_zero_cells(sheet, n_row, columns.len(), formats)?;
        n_row += 1;
    }

    for item in &group.items {
        write_item_row(sheet, n_row, columns, item, formats)?;
        n_row += 1;
    }

    if group.group_type == EnumGroupType::GrandTotal {
        write_label_cells(
            sheet,
            n_row,
            [&group.code, &group.name, ""],
            [&formats.text, &formats.text_bold, &formats.text],
        )?;
        write_value_cells(sheet, n_row, columns, &group.values, &formats.money)?;
        n_row += 1;
    }

    Ok(n_row)
}

fn write_item_row<W: SheetWriter + ?Sized>(
    sheet: &mut W,
    n_row: usize,
    columns: &[SpecLedgerColumn],
    item: &SpecLedgerItem,
    formats: &SpecLedgerFormats,
) -> Result<(), String> {
    write_label_cells(
        sheet,
        n_row,
        [&item.code, &item.name, &item.pic],
        [&formats.text, &formats.text, &formats.text],
    )?;
    write_value_cells(sheet, n_row, columns, &item.values, &formats.money)
}

/// Write the three label cells; empty text becomes a bordered blank.
fn write_label_cells<W: SheetWriter + ?Sized>(
    sheet: &mut W,
    n_row: usize,
    labels: [&str; N_COLS_LEDGER_LABEL],
    fmts: [&SpecCellFormat; N_COLS_LEDGER_LABEL],
) -> Result<(), String> {
    for (n_idx_col, (c_label, fmt)) in labels.iter().zip(fmts).enumerate() {
        if c_label.is_empty() {
            sheet.write_blank(n_row, n_idx_col, fmt)?;
        } else {
            sheet.write_cell(n_row, n_idx_col, EnumCellValue::from(*c_label), fmt)?;
        }
    }
    Ok(())
}

/// Zero-fill every value cell of a section or header-group row.
fn write_zero_cells<W: SheetWriter + ?Sized>(
    sheet: &mut W,
    n_row: usize,
    n_columns: usize,
    formats: &SpecLedgerFormats,
) -> Result<(), String> {
    for n_idx_col in N_COLS_LEDGER_LABEL..derive_value_col_idx(n_columns) {
        sheet.write_cell(
            n_row,
            n_idx_col,
            EnumCellValue::from(C_AMOUNT_ZERO),
            &formats.money_placeholder,
        )?;
    }
    Ok(())
}

/// Write debit/kredit pairs in header column order; absent entries are zero.
fn write_value_cells<W: SheetWriter + ?Sized>(
    sheet: &mut W,
    n_row: usize,
    columns: &[SpecLedgerColumn],
    values: &SpecValuesByColumn,
    fmt: &SpecCellFormat,
) -> Result<(), String> {
    for (n_idx_column, column) in columns.iter().enumerate() {
        let n_col_debit = derive_value_col_idx(n_idx_column);
        let entry = values.get(&column.name).cloned().unwrap_or_default();
        sheet.write_cell(
            n_row,
            n_col_debit,
            EnumCellValue::from(entry.debit.as_str()),
            fmt,
        )?;
        sheet.write_cell(
            n_row,
            n_col_debit + 1,
            EnumCellValue::from(entry.kredit.as_str()),
            fmt,
        )?;
    }
    Ok(())
}
