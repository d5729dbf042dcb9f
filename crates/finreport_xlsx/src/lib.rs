//! `finreport_xlsx` v1:
//! Workbook kernel for formatted report sheets.
//!
//! Modules:
//! - `conf`   : constants and default presets
//! - `spec`   : cell/format/report models
//! - `sheet`  : in-memory sheet model behind the `SheetWriter` seam
//! - `util`   : pure helper functions
//! - `writer` : workbook serializer on top of `rust_xlsxwriter`
pub mod conf;
pub mod sheet;
pub mod spec;
pub mod util;
pub mod writer;

pub use conf::{
    C_NUM_FORMAT_MONEY, EnumFmtKey, N_LEN_EXCEL_SHEET_NAME_MAX, N_NCOLS_EXCEL_MAX,
    N_NROWS_EXCEL_MAX, derive_default_xlsx_format, derive_default_xlsx_formats,
    derive_thin_border_patch,
};
pub use sheet::{SheetGrid, SheetWriter};
pub use spec::{
    EnumCellValue, SpecAutofitCellsPolicy, SpecCellFormat, SpecSheetCell,
    SpecSheetHorizontalMerge, SpecSheetSummary, SpecXlsxReport,
};
pub use util::{derive_autofit_column_widths, sanitize_sheet_name};
pub use writer::XlsxWriter;
