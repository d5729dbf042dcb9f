//! XLSX constants and default preset factories.

use std::collections::BTreeMap;

use crate::spec::SpecCellFormat;

/// Excel worksheet maximum row count.
pub const N_NROWS_EXCEL_MAX: usize = 1_048_576;
/// Excel worksheet maximum column count.
pub const N_NCOLS_EXCEL_MAX: usize = 16_384;
/// Excel sheet name maximum length.
pub const N_LEN_EXCEL_SHEET_NAME_MAX: usize = 31;
/// Excel maximum column width in character units.
pub const N_WIDTH_EXCEL_COLUMN_MAX: usize = 255;
/// Characters not allowed in sheet names.
pub const TUP_EXCEL_ILLEGAL: [&str; 7] = ["*", ":", "?", "/", "\\", "[", "]"];

/// Two-decimal number format with thousands separators.
pub const C_NUM_FORMAT_MONEY: &str = "#,##0.00";

/// Canonical format preset keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EnumFmtKey {
    /// Plain text cell.
    Text,
    /// Bold centered header cell.
    Header,
    /// Two-decimal monetary cell.
    Money,
    /// Large bold sheet title.
    Title,
}

/// Build default named format presets.
///
/// Presets are borderless; callers overlay a border patch where a sheet
/// needs outlined cells.
pub fn derive_default_xlsx_formats() -> BTreeMap<EnumFmtKey, SpecCellFormat> {
    let cfg_base_fmt_spec = SpecCellFormat::default();

    let mut dict_fmt = BTreeMap::new();
    dict_fmt.insert(EnumFmtKey::Text, cfg_base_fmt_spec.clone());
    dict_fmt.insert(
        EnumFmtKey::Header,
        cfg_base_fmt_spec.with_(SpecCellFormat {
            bold: Some(true),
            ..Default::default()
        }),
    );
    dict_fmt.insert(
        EnumFmtKey::Money,
        cfg_base_fmt_spec.with_(SpecCellFormat {
            num_format: Some(C_NUM_FORMAT_MONEY.to_string()),
            ..Default::default()
        }),
    );
    dict_fmt.insert(
        EnumFmtKey::Title,
        cfg_base_fmt_spec.with_(SpecCellFormat {
            bold: Some(true),
            font_size: Some(14),
            align: Some("center".to_string()),
            valign: Some("vcenter".to_string()),
            ..Default::default()
        }),
    );

    dict_fmt
}

/// Look up one default preset.
pub fn derive_default_xlsx_format(key: EnumFmtKey) -> SpecCellFormat {
    derive_default_xlsx_formats()
        .remove(&key)
        .unwrap_or_default()
}

/// Thin outline on all four sides.
pub fn derive_thin_border_patch() -> SpecCellFormat {
    SpecCellFormat {
        border: Some(1),
        ..Default::default()
    }
}
