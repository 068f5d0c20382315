//! Parser Module
//!
//! calamineで読み込んだシートを文字列グリッドに変換し、
//! 各シートの表をヒューリスティックに検出してレコードを抽出します。

mod balance;
mod info;
mod key_figures;
mod matrix;
mod workbook;

pub use balance::{find_balance_header, parse_balansstanden, BalanceHeader};
pub(crate) use info::{extract_contact, extract_metadata};
pub use info::{parse_free_text_date, InfoMap};
pub use key_figures::{
    find_key_figures_header_row, header_to_verslagperiode, kengetal_for_label, parse_kengetallen,
};
pub use matrix::{find_category_header_row, find_task_field_column, parse_matrix};
pub use workbook::WorkbookReader;
