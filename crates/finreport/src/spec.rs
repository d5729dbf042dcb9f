//! Input document models, fixed records and run options.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::NaiveDate;
use finreport_xlsx::SpecAutofitCellsPolicy;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::conf::{
    C_AMOUNT_ZERO, C_DIR_OUT_TRANSACTIONS, C_FILE_IN_DEFAULT, C_FILE_OUT_FINANCIAL,
    C_FILE_OUT_TRANSACTIONS,
};

////////////////////////////////////////////////////////////////////////////////
// #region ScalarFields

/// Monetary value as display text.
///
/// Accepts JSON strings verbatim and JSON numbers normalized to two decimals.
/// Missing, `null` or non-scalar values fall back to `"0.00"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecAmount(String);

impl SpecAmount {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SpecAmount {
    fn default() -> Self {
        Self(C_AMOUNT_ZERO.to_string())
    }
}

impl From<&str> for SpecAmount {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl<'de> Deserialize<'de> for SpecAmount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(s) => Self(s),
            Value::Number(n) => {
                let c_num = n.to_string();
                match Decimal::from_str(&c_num).or_else(|_| Decimal::from_scientific(&c_num)) {
                    Ok(dec) => Self(format!("{:.2}", dec.round_dp(2))),
                    Err(_) => Self(c_num),
                }
            }
            _ => Self::default(),
        })
    }
}

/// Accept any JSON scalar as text; `null` and containers become empty.
fn deserialize_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}

/// Accept a list of scalars as text lines; anything else becomes empty.
fn deserialize_text_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(values) => values
            .into_iter()
            .filter_map(|value| match value {
                Value::String(s) => Some(s),
                Value::Number(n) => Some(n.to_string()),
                Value::Bool(b) => Some(b.to_string()),
                _ => None,
            })
            .collect(),
        Value::String(s) => vec![s],
        _ => vec![],
    })
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region LedgerDocument

/// Debit/kredit pair for one logical ledger column.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct SpecEntryValues {
    pub debit: SpecAmount,
    #[serde(alias = "credit")]
    pub kredit: SpecAmount,
}

/// Per-column values keyed by logical column name.
pub type SpecValuesByColumn = BTreeMap<String, SpecEntryValues>;

/// One logical ledger column (rendered as two physical columns).
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpecLedgerColumn {
    #[serde(deserialize_with = "deserialize_text")]
    pub name: String,
    #[serde(deserialize_with = "deserialize_text_list")]
    pub sub_columns: Vec<String>,
}

/// Group rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EnumGroupType {
    /// Shaded zero-filled row before the items.
    Header,
    /// Bold totals row after the items, using the group's own values.
    GrandTotal,
    /// Items only. Also taken for unknown type names.
    #[default]
    #[serde(other)]
    Plain,
}

/// Ledger leaf row.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct SpecLedgerItem {
    #[serde(deserialize_with = "deserialize_text")]
    pub code: String,
    #[serde(deserialize_with = "deserialize_text")]
    pub name: String,
    /// Person in charge; blank when absent.
    #[serde(deserialize_with = "deserialize_text")]
    pub pic: String,
    pub values: SpecValuesByColumn,
}

/// Ledger group of items.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct SpecLedgerGroup {
    #[serde(deserialize_with = "deserialize_text")]
    pub code: String,
    #[serde(deserialize_with = "deserialize_text")]
    pub name: String,
    #[serde(rename = "type")]
    pub group_type: EnumGroupType,
    pub items: Vec<SpecLedgerItem>,
    pub values: SpecValuesByColumn,
}

/// Ledger section.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct SpecLedgerSection {
    #[serde(deserialize_with = "deserialize_text")]
    pub name: String,
    pub groups: Vec<SpecLedgerGroup>,
}

/// Ledger tree with its column layout.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct SpecLedger {
    pub columns: Vec<SpecLedgerColumn>,
    pub sections: Vec<SpecLedgerSection>,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region AssessmentDocument

/// One assessment row shared by materiality, audit sampling and risk tables.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct SpecAssessmentCategory {
    #[serde(deserialize_with = "deserialize_text")]
    pub name: String,
    #[serde(deserialize_with = "deserialize_text")]
    pub level: String,
    /// Only rendered by the risk assessment sheet.
    #[serde(deserialize_with = "deserialize_text")]
    pub status: String,
    #[serde(deserialize_with = "deserialize_text")]
    pub description: String,
    #[serde(deserialize_with = "deserialize_text_list")]
    pub recommendations: Vec<String>,
}

/// Assessment table with its summary scalar.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpecAssessment {
    pub categories: Vec<SpecAssessmentCategory>,
    /// `overallLevel`, or `overallRisk` for risk assessment.
    #[serde(alias = "overallRisk", deserialize_with = "deserialize_text")]
    pub overall_level: String,
}

/// Top-level input document. Every part is optional.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpecFinancialDocument {
    pub ledger: Option<SpecLedger>,
    pub materiality: Option<SpecAssessment>,
    pub audit_sampling: Option<SpecAssessment>,
    pub risk_assessment: Option<SpecAssessment>,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Transactions

/// Transaction direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumTransactionType {
    Credit,
    Debit,
}

impl EnumTransactionType {
    /// Report label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Credit => "Kredit",
            Self::Debit => "Debit",
        }
    }
}

/// One row of the transaction listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecTransaction {
    pub transaction_number: String,
    pub date: NaiveDate,
    pub transaction_type: EnumTransactionType,
    pub amount: Decimal,
    pub has_issue: bool,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region RunOptions

/// Options for the financial workbook run.
#[derive(Debug, Clone)]
pub struct SpecFinancialReportOptions {
    /// Input JSON document.
    pub path_file_in: PathBuf,
    /// Output workbook.
    pub path_file_out: PathBuf,
    /// Column width normalizer policy; `None` keeps builder widths.
    pub policy_autofit: Option<SpecAutofitCellsPolicy>,
}

impl Default for SpecFinancialReportOptions {
    fn default() -> Self {
        Self {
            path_file_in: PathBuf::from(C_FILE_IN_DEFAULT),
            path_file_out: PathBuf::from(C_FILE_OUT_FINANCIAL),
            policy_autofit: Some(SpecAutofitCellsPolicy::default()),
        }
    }
}

/// Options for the transaction workbook run.
#[derive(Debug, Clone)]
pub struct SpecTransactionReportOptions {
    /// Output workbook.
    pub path_file_out: PathBuf,
    /// Create the output's parent directory when missing.
    pub if_create_parent_dir: bool,
}

impl Default for SpecTransactionReportOptions {
    fn default() -> Self {
        Self {
            path_file_out: PathBuf::from(C_DIR_OUT_TRANSACTIONS).join(C_FILE_OUT_TRANSACTIONS),
            if_create_parent_dir: true,
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
