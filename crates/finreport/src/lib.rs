//! `finreport` v1:
//! Audit workbook generators on top of the `finreport_xlsx` kernel.
//!
//! Modules:
//! - `spec`        : input document models and run options
//! - `conf`        : labels, layout constants and format presets
//! - `loader`      : JSON input loading
//! - `ledger`      : ledger sheet builder
//! - `assessment`  : materiality / audit sampling / risk assessment builders
//! - `transaction` : fixed transaction listing
//! - `generate`    : end-to-end pipelines
//! - `report`      : run-time report model
//! - `error`       : fatal error taxonomy

pub mod assessment;
pub mod conf;
pub mod error;
pub mod generate;
pub mod ledger;
pub mod loader;
pub mod report;
pub mod spec;
pub mod transaction;

pub use assessment::{EnumAssessmentKind, build_assessment_sheet, join_recommendations};
pub use error::{ReportError, ReportResult};
pub use generate::{
    generate_financial_report, generate_transaction_report, populate_financial_workbook,
    write_financial_report,
};
pub use ledger::build_ledger_sheet;
pub use loader::{load_financial_document, parse_financial_document};
pub use report::ReportGenerate;
pub use spec::{
    EnumGroupType, EnumTransactionType, SpecAmount, SpecAssessment, SpecAssessmentCategory,
    SpecEntryValues, SpecFinancialDocument, SpecFinancialReportOptions, SpecLedger,
    SpecLedgerColumn, SpecLedgerGroup, SpecLedgerItem, SpecLedgerSection, SpecTransaction,
    SpecTransactionReportOptions,
};
pub use transaction::{build_transaction_sheet, derive_fixed_transactions};
