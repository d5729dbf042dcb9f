//! Generator pipelines: load → build sheets → normalize widths → save.

use tracing::{info, warn};

use finreport_xlsx::XlsxWriter;

use crate::assessment::{EnumAssessmentKind, build_assessment_sheet};
use crate::conf::{
    C_SHEET_LEDGER, C_SHEET_TRANSACTIONS, SpecAssessmentFormats, SpecLedgerFormats,
    SpecTransactionFormats,
};
use crate::error::{ReportError, ReportResult};
use crate::ledger::build_ledger_sheet;
use crate::loader::load_financial_document;
use crate::report::ReportGenerate;
use crate::spec::{
    SpecFinancialDocument, SpecFinancialReportOptions, SpecTransactionReportOptions,
};
use crate::transaction::{build_transaction_sheet, derive_fixed_transactions};

/// Build every sheet of the financial workbook into `writer`.
///
/// Absent document parts skip their sheet with a warning.
pub fn populate_financial_workbook(
    writer: &mut XlsxWriter,
    doc: &SpecFinancialDocument,
) -> ReportResult<()> {
    match &doc.ledger {
        Some(ledger) => {
            let sheet = writer
                .add_sheet(C_SHEET_LEDGER)
                .map_err(ReportError::sheet(C_SHEET_LEDGER))?;
            build_ledger_sheet(sheet, ledger, &SpecLedgerFormats::default())
                .map_err(ReportError::sheet(C_SHEET_LEDGER))?;
        }
        None => skip_sheet(writer, C_SHEET_LEDGER, "ledger"),
    }

    let formats = SpecAssessmentFormats::default();
    for kind in EnumAssessmentKind::ALL {
        let Some(assessment) = kind.select(doc) else {
            skip_sheet(writer, kind.sheet_name(), kind.document_key());
            continue;
        };
        let sheet = writer
            .add_sheet(kind.sheet_name())
            .map_err(ReportError::sheet(kind.sheet_name()))?;
        build_assessment_sheet(sheet, kind, assessment, &formats)
            .map_err(ReportError::sheet(kind.sheet_name()))?;
    }
    Ok(())
}

fn skip_sheet(writer: &mut XlsxWriter, sheet_name: &str, document_key: &str) {
    warn!(sheet = sheet_name, key = document_key, "document part missing; sheet skipped");
    writer.warn(format!(
        "Sheet {sheet_name:?} skipped: input has no {document_key:?} object."
    ));
}

/// Run the financial workbook generator.
///
/// Input errors abort before any output is produced.
pub fn generate_financial_report(
    options: &SpecFinancialReportOptions,
) -> ReportResult<ReportGenerate> {
    let doc = load_financial_document(&options.path_file_in)?;
    write_financial_report(&doc, options)
}

/// Build and save the financial workbook from an already parsed document.
pub fn write_financial_report(
    doc: &SpecFinancialDocument,
    options: &SpecFinancialReportOptions,
) -> ReportResult<ReportGenerate> {
    let mut writer = XlsxWriter::new(options.path_file_out.clone());
    populate_financial_workbook(&mut writer, doc)?;

    if let Some(policy) = &options.policy_autofit {
        writer
            .autofit_columns(policy)
            .map_err(|message| ReportError::OutputWrite {
                path: options.path_file_out.clone(),
                message,
            })?;
    }

    close_writer(writer)
}

/// Run the transaction listing generator.
pub fn generate_transaction_report(
    options: &SpecTransactionReportOptions,
) -> ReportResult<ReportGenerate> {
    let transactions = derive_fixed_transactions()?;

    let mut writer = XlsxWriter::new(options.path_file_out.clone());
    let sheet = writer
        .add_sheet(C_SHEET_TRANSACTIONS)
        .map_err(ReportError::sheet(C_SHEET_TRANSACTIONS))?;
    build_transaction_sheet(sheet, &transactions, &SpecTransactionFormats::default())
        .map_err(ReportError::sheet(C_SHEET_TRANSACTIONS))?;

    if options.if_create_parent_dir
        && let Some(path_dir) = options.path_file_out.parent()
        && !path_dir.as_os_str().is_empty()
    {
        std::fs::create_dir_all(path_dir).map_err(|err| ReportError::OutputWrite {
            path: options.path_file_out.clone(),
            message: format!("Failed to create directory {}: {err}", path_dir.display()),
        })?;
    }

    close_writer(writer)
}

fn close_writer(mut writer: XlsxWriter) -> ReportResult<ReportGenerate> {
    let path_file_out = writer.file_out().to_path_buf();
    writer.close().map_err(|message| ReportError::OutputWrite {
        path: path_file_out.clone(),
        message,
    })?;

    let report = ReportGenerate::from_xlsx_report(path_file_out, writer.report());
    info!("{report}");
    Ok(report)
}
