//! Report labels, layout constants and format presets.

use finreport_xlsx::{
    EnumFmtKey, SpecCellFormat, derive_default_xlsx_format, derive_thin_border_patch,
};

/// Default input document, relative to the working directory.
pub const C_FILE_IN_DEFAULT: &str = "LEDGER.json";
/// Default financial workbook, relative to the working directory.
pub const C_FILE_OUT_FINANCIAL: &str = "financial_report.xlsx";
/// Default directory of the transaction workbook.
pub const C_DIR_OUT_TRANSACTIONS: &str = "output";
/// Default transaction workbook file name.
pub const C_FILE_OUT_TRANSACTIONS: &str = "transaction_report.xlsx";

pub const C_SHEET_LEDGER: &str = "Ledger";
pub const C_SHEET_MATERIALITY: &str = "Materiality";
pub const C_SHEET_AUDIT_SAMPLING: &str = "Audit Sampling";
pub const C_SHEET_RISK_ASSESSMENT: &str = "Risk Assessment";
pub const C_SHEET_TRANSACTIONS: &str = "Transactions";

/// Fixed ledger label columns.
pub const TUP_LEDGER_LABEL_HEADERS: [&str; 3] = ["JENIS AKAUN", "BUTIRAN", "PIC"];
/// Sub-column labels used when a ledger column omits them.
pub const TUP_LEDGER_SUB_COLUMNS_DEFAULT: [&str; 2] = ["DEBIT RM", "KREDIT RM"];
/// Zero-fill text for placeholder and missing amounts.
pub const C_AMOUNT_ZERO: &str = "0.00";
/// Widths of the ledger label columns.
pub const TUP_LEDGER_LABEL_WIDTHS: [f64; 3] = [15.0, 40.0, 15.0];
/// Width of every ledger value column.
pub const N_WIDTH_LEDGER_VALUE: f64 = 15.0;

pub const C_LABEL_CATEGORY: &str = "Category";
pub const C_LABEL_LEVEL: &str = "Level";
pub const C_LABEL_STATUS: &str = "Status";
pub const C_LABEL_DESCRIPTION: &str = "Description";
pub const C_LABEL_RECOMMENDATIONS: &str = "Recommendations";
pub const C_LABEL_OVERALL_LEVEL: &str = "Overall Level";
pub const C_LABEL_OVERALL_RISK: &str = "Overall Risk";

pub const C_TITLE_TRANSACTIONS: &str = "LAPORAN TRANSAKSI KEWANGAN";
pub const TUP_TRANSACTION_HEADERS: [&str; 5] = [
    "NO_TRANSAKSI",
    "TARIKH_TRANSAKSI",
    "JENIS_TRANSAKSI",
    "AMAUN_RM",
    "TERDAPAT_ISU",
];
pub const TUP_TRANSACTION_WIDTHS: [f64; 5] = [15.0, 20.0, 20.0, 15.0, 15.0];
/// Zero-based index of the amount column in the transaction sheet.
pub const N_IDX_TRANSACTION_AMOUNT: usize = 3;
pub const C_DATE_FORMAT_TRANSACTION: &str = "%Y-%m-%d";

/// Light yellow fill of section and header-group rows.
pub const C_COLOR_SHADED: &str = "#FFFFE0";
/// Grey fill of the transaction header row.
pub const C_COLOR_HEADER_FILL: &str = "#D9D9D9";

/// Resolved formats for one ledger sheet.
#[derive(Debug, Clone)]
pub struct SpecLedgerFormats {
    pub header: SpecCellFormat,
    pub text: SpecCellFormat,
    pub text_shaded: SpecCellFormat,
    pub text_bold: SpecCellFormat,
    pub money_placeholder: SpecCellFormat,
    pub money: SpecCellFormat,
}

impl Default for SpecLedgerFormats {
    fn default() -> Self {
        let fmt_border = derive_thin_border_patch();
        let fmt_text = derive_default_xlsx_format(EnumFmtKey::Text).merge(&fmt_border);
        let fmt_money_placeholder =
            derive_default_xlsx_format(EnumFmtKey::Money).merge(&fmt_border);
        Self {
            header: derive_default_xlsx_format(EnumFmtKey::Header)
                .merge(&fmt_border)
                .with_(SpecCellFormat {
                    align: Some("center".to_string()),
                    ..Default::default()
                }),
            text_shaded: fmt_text.with_(SpecCellFormat {
                bg_color: Some(C_COLOR_SHADED.to_string()),
                ..Default::default()
            }),
            text_bold: fmt_text.with_(SpecCellFormat {
                bold: Some(true),
                ..Default::default()
            }),
            text: fmt_text,
            money: fmt_money_placeholder.with_(SpecCellFormat {
                align: Some("right".to_string()),
                ..Default::default()
            }),
            money_placeholder: fmt_money_placeholder,
        }
    }
}

/// Resolved formats for one assessment sheet.
#[derive(Debug, Clone)]
pub struct SpecAssessmentFormats {
    pub header: SpecCellFormat,
    pub text: SpecCellFormat,
    pub text_wrapped: SpecCellFormat,
}

impl Default for SpecAssessmentFormats {
    fn default() -> Self {
        let fmt_text = derive_default_xlsx_format(EnumFmtKey::Text);
        Self {
            header: derive_default_xlsx_format(EnumFmtKey::Header),
            text_wrapped: fmt_text.with_(SpecCellFormat {
                text_wrap: Some(true),
                ..Default::default()
            }),
            text: fmt_text,
        }
    }
}

/// Resolved formats for the transaction sheet.
#[derive(Debug, Clone)]
pub struct SpecTransactionFormats {
    pub title: SpecCellFormat,
    pub header: SpecCellFormat,
    pub cell: SpecCellFormat,
    pub amount: SpecCellFormat,
}

impl Default for SpecTransactionFormats {
    fn default() -> Self {
        let fmt_centered = SpecCellFormat {
            align: Some("center".to_string()),
            valign: Some("vcenter".to_string()),
            ..Default::default()
        };
        let fmt_border = derive_thin_border_patch();
        Self {
            title: derive_default_xlsx_format(EnumFmtKey::Title),
            header: derive_default_xlsx_format(EnumFmtKey::Header)
                .merge(&fmt_border)
                .merge(&fmt_centered)
                .with_(SpecCellFormat {
                    bg_color: Some(C_COLOR_HEADER_FILL.to_string()),
                    ..Default::default()
                }),
            cell: derive_default_xlsx_format(EnumFmtKey::Text)
                .merge(&fmt_border)
                .merge(&fmt_centered),
            amount: derive_default_xlsx_format(EnumFmtKey::Money)
                .merge(&fmt_border)
                .with_(SpecCellFormat {
                    align: Some("right".to_string()),
                    valign: Some("vcenter".to_string()),
                    ..Default::default()
                }),
        }
    }
}
