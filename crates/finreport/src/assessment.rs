//! Assessment sheet builders: materiality, audit sampling and risk assessment.

use finreport_xlsx::{EnumCellValue, SheetWriter};
use tracing::debug;

use crate::conf::{
    C_LABEL_CATEGORY, C_LABEL_DESCRIPTION, C_LABEL_LEVEL, C_LABEL_OVERALL_LEVEL,
    C_LABEL_OVERALL_RISK, C_LABEL_RECOMMENDATIONS, C_LABEL_STATUS, C_SHEET_AUDIT_SAMPLING,
    C_SHEET_MATERIALITY, C_SHEET_RISK_ASSESSMENT, SpecAssessmentFormats,
};
use crate::spec::{SpecAssessment, SpecAssessmentCategory, SpecFinancialDocument};

/// Assessment table flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumAssessmentKind {
    Materiality,
    AuditSampling,
    RiskAssessment,
}

impl EnumAssessmentKind {
    /// All kinds in workbook order.
    pub const ALL: [EnumAssessmentKind; 3] = [
        EnumAssessmentKind::Materiality,
        EnumAssessmentKind::AuditSampling,
        EnumAssessmentKind::RiskAssessment,
    ];

    pub fn sheet_name(self) -> &'static str {
        match self {
            Self::Materiality => C_SHEET_MATERIALITY,
            Self::AuditSampling => C_SHEET_AUDIT_SAMPLING,
            Self::RiskAssessment => C_SHEET_RISK_ASSESSMENT,
        }
    }

    /// Key of the assessment object in the input document.
    pub fn document_key(self) -> &'static str {
        match self {
            Self::Materiality => "materiality",
            Self::AuditSampling => "auditSampling",
            Self::RiskAssessment => "riskAssessment",
        }
    }

    /// Whether the table carries a status column.
    pub fn has_status(self) -> bool {
        matches!(self, Self::RiskAssessment)
    }

    pub fn headers(self) -> Vec<&'static str> {
        let mut l_headers = vec![C_LABEL_CATEGORY, C_LABEL_LEVEL];
        if self.has_status() {
            l_headers.push(C_LABEL_STATUS);
        }
        l_headers.extend([C_LABEL_DESCRIPTION, C_LABEL_RECOMMENDATIONS]);
        l_headers
    }

    pub fn overall_label(self) -> &'static str {
        match self {
            Self::RiskAssessment => C_LABEL_OVERALL_RISK,
            Self::Materiality | Self::AuditSampling => C_LABEL_OVERALL_LEVEL,
        }
    }

    /// The matching assessment of `doc`, if present.
    pub fn select(self, doc: &SpecFinancialDocument) -> Option<&SpecAssessment> {
        match self {
            Self::Materiality => doc.materiality.as_ref(),
            Self::AuditSampling => doc.audit_sampling.as_ref(),
            Self::RiskAssessment => doc.risk_assessment.as_ref(),
        }
    }
}

/// Join recommendations into one multi-line cell text, order preserved.
pub fn join_recommendations(recommendations: &[String]) -> String {
    recommendations.join("\n")
}

fn derive_category_row(kind: EnumAssessmentKind, category: &SpecAssessmentCategory) -> Vec<String> {
    let mut l_row = vec![category.name.clone(), category.level.clone()];
    if kind.has_status() {
        l_row.push(category.status.clone());
    }
    l_row.extend([
        category.description.clone(),
        join_recommendations(&category.recommendations),
    ]);
    l_row
}

/// Populate `sheet` with one assessment table and return the number of rows written.
///
/// Layout: bold header row, one row per category, a blank row, then the
/// overall label and value.
pub fn build_assessment_sheet<W: SheetWriter + ?Sized>(
    sheet: &mut W,
    kind: EnumAssessmentKind,
    assessment: &SpecAssessment,
    formats: &SpecAssessmentFormats,
) -> Result<usize, String> {
    let l_headers = kind.headers();
    let n_idx_col_recommendations = l_headers.len() - 1;
    for (n_idx_col, c_header) in l_headers.iter().enumerate() {
        sheet.write_cell(0, n_idx_col, EnumCellValue::from(*c_header), &formats.header)?;
    }

    let mut n_row = 1;
    for category in &assessment.categories {
        for (n_idx_col, c_value) in derive_category_row(kind, category).into_iter().enumerate() {
            let fmt = if n_idx_col == n_idx_col_recommendations {
                &formats.text_wrapped
            } else {
                &formats.text
            };
            sheet.write_cell(n_row, n_idx_col, EnumCellValue::from(c_value), fmt)?;
        }
        n_row += 1;
    }

    let n_row_overall = n_row + 1;
    sheet.write_cell(
        n_row_overall,
        0,
        EnumCellValue::from(kind.overall_label()),
        &formats.text,
    )?;
    sheet.write_cell(
        n_row_overall,
        1,
        EnumCellValue::from(assessment.overall_level.as_str()),
        &formats.text,
    )?;

    debug!(
        sheet = kind.sheet_name(),
        categories = assessment.categories.len(),
        "assessment sheet built"
    );
    Ok(n_row_overall + 1)
}
