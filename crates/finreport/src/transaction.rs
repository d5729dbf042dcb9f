//! Transaction listing: fixed dataset and its titled sheet.

use chrono::NaiveDate;
use finreport_xlsx::{EnumCellValue, SheetWriter};
use rust_decimal::Decimal;
use tracing::debug;

use crate::conf::{
    C_DATE_FORMAT_TRANSACTION, C_TITLE_TRANSACTIONS, N_IDX_TRANSACTION_AMOUNT,
    SpecTransactionFormats, TUP_TRANSACTION_HEADERS, TUP_TRANSACTION_WIDTHS,
};
use crate::error::{ReportError, ReportResult};
use crate::spec::{EnumTransactionType, SpecTransaction};

/// Rows above the first transaction: title and header.
pub const N_ROWS_TRANSACTION_PREAMBLE: usize = 2;

/// `(number, (year, month, day), type, amount in sen, has issue)`.
type TupTransactionSeed = (&'static str, (i32, u32, u32), EnumTransactionType, i64, bool);

const TUP_TRANSACTION_SEEDS: [TupTransactionSeed; 5] = [
    ("100", (2025, 1, 14), EnumTransactionType::Credit, 537_309, false),
    ("103", (2025, 2, 24), EnumTransactionType::Credit, 635_277, false),
    ("102", (2025, 4, 27), EnumTransactionType::Credit, 406_760, false),
    ("104", (2025, 5, 9), EnumTransactionType::Credit, 792_278, false),
    ("101", (2025, 8, 16), EnumTransactionType::Debit, 850_987, false),
];

/// The fixed transaction dataset, in listing order.
pub fn derive_fixed_transactions() -> ReportResult<Vec<SpecTransaction>> {
    let mut l_transactions = Vec::with_capacity(TUP_TRANSACTION_SEEDS.len());
    for (c_number, (n_year, n_month, n_day), transaction_type, n_sen, if_issue) in
        TUP_TRANSACTION_SEEDS
    {
        let date = NaiveDate::from_ymd_opt(n_year, n_month, n_day).ok_or_else(|| {
            ReportError::Dataset(format!(
                "Invalid date {n_year}-{n_month}-{n_day} for transaction {c_number}."
            ))
        })?;
        l_transactions.push(SpecTransaction {
            transaction_number: c_number.to_string(),
            date,
            transaction_type,
            amount: Decimal::new(n_sen, 2),
            has_issue: if_issue,
        });
    }
    Ok(l_transactions)
}

fn derive_issue_label(if_issue: bool) -> &'static str {
    if if_issue { "Ya" } else { "Tidak" }
}

/// Cell texts of one transaction in header column order.
pub fn derive_transaction_row(transaction: &SpecTransaction) -> [String; 5] {
    [
        transaction.transaction_number.clone(),
        transaction
            .date
            .format(C_DATE_FORMAT_TRANSACTION)
            .to_string(),
        transaction.transaction_type.label().to_string(),
        format!("{:.2}", transaction.amount),
        derive_issue_label(transaction.has_issue).to_string(),
    ]
}

/// Populate `sheet` with the titled listing and return the number of rows written.
pub fn build_transaction_sheet<W: SheetWriter + ?Sized>(
    sheet: &mut W,
    transactions: &[SpecTransaction],
    formats: &SpecTransactionFormats,
) -> Result<usize, String> {
    let n_idx_col_last = TUP_TRANSACTION_HEADERS.len() - 1;
    sheet.merge_range(0, 0, n_idx_col_last, C_TITLE_TRANSACTIONS, &formats.title)?;

    for (n_idx_col, c_header) in TUP_TRANSACTION_HEADERS.iter().enumerate() {
        sheet.write_cell(1, n_idx_col, EnumCellValue::from(*c_header), &formats.header)?;
    }

    for (n_idx_row, transaction) in transactions.iter().enumerate() {
        let n_row = N_ROWS_TRANSACTION_PREAMBLE + n_idx_row;
        for (n_idx_col, c_value) in derive_transaction_row(transaction).into_iter().enumerate() {
            let fmt = if n_idx_col == N_IDX_TRANSACTION_AMOUNT {
                &formats.amount
            } else {
                &formats.cell
            };
            sheet.write_cell(n_row, n_idx_col, EnumCellValue::from(c_value), fmt)?;
        }
    }

    for (n_idx_col, width) in TUP_TRANSACTION_WIDTHS.iter().enumerate() {
        sheet.set_column_width(n_idx_col, *width)?;
    }

    debug!(transactions = transactions.len(), "transaction sheet built");
    Ok(N_ROWS_TRANSACTION_PREAMBLE + transactions.len())
}
