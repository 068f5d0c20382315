//! Balance Parser
//!
//! 貸借残高シート（`7.Balansstanden`）から
//! (貸借コード, 基準時点, 金額) のレコードを抽出します。

use log::debug;
use regex::Regex;
use std::sync::OnceLock;

use crate::api::AmountScale;
use crate::formatter::NumberFormatter;
use crate::grid::CellGrid;
use crate::types::{BalanceRecord, Standper};

/// ヘッダー行を探す範囲（先頭からの行数）
const HEADER_SCAN_ROWS: usize = 10;

/// 貸借コード（英大文字1文字 + 数字3〜4桁）
fn balanscode_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Z]\d{3,4}$").expect("valid regex"))
}

/// 検出された貸借残高シートのヘッダー
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BalanceHeader {
    /// ヘッダー行
    pub row: usize,
    /// `code`列
    pub code_col: usize,
    /// `1 januari`列
    pub een_januari_col: Option<usize>,
    /// `ultimo`列
    pub ultimo_col: Option<usize>,
}

impl BalanceHeader {
    /// 値列を出力順（1 januari → ultimo）に列挙
    fn value_columns(&self) -> impl Iterator<Item = (usize, Standper)> {
        [
            self.een_januari_col.map(|c| (c, Standper::EenJanuari)),
            self.ultimo_col.map(|c| (c, Standper::Ultimo)),
        ]
        .into_iter()
        .flatten()
    }
}

/// ヘッダー行を検出
///
/// 先頭10行を上から走査し、`code`と完全一致（大文字小文字を区別しない）するセルの列を
/// コード列、`1 januari` / `ultimo`を含むセルの列を値列として記録します。
/// 走査中に見つかった列は保持され、コード列と少なくとも1つの値列が揃った行で
/// 走査を終了し、その行をヘッダー行とします。同じ行に複数の候補がある場合は右側が優先されます。
pub fn find_balance_header(grid: &CellGrid) -> Option<BalanceHeader> {
    let mut code_col = None;
    let mut een_januari_col = None;
    let mut ultimo_col = None;

    for row in 0..grid.row_count().min(HEADER_SCAN_ROWS) {
        for (col, cell) in grid.row(row).iter().enumerate() {
            let value = cell.trim().to_lowercase();
            if value == "code" {
                code_col = Some(col);
            }
            if value.contains(Standper::EenJanuari.label()) {
                een_januari_col = Some(col);
            }
            if value.contains(Standper::Ultimo.label()) {
                ultimo_col = Some(col);
            }
        }

        if let Some(code_col) = code_col {
            if een_januari_col.is_some() || ultimo_col.is_some() {
                return Some(BalanceHeader {
                    row,
                    code_col,
                    een_januari_col,
                    ultimo_col,
                });
            }
        }
    }

    None
}

/// 貸借残高シートをパース
///
/// ヘッダー行より下の行のうち、コード列が貸借コードの形式に一致する行について、
/// 値列ごとにレコードを生成します。マトリクスとは異なり、0の残高も出力されます。
/// 数値でないセルや空セルはスキップされます。
pub fn parse_balansstanden(grid: &CellGrid, scale: AmountScale) -> Vec<BalanceRecord> {
    let Some(header) = find_balance_header(grid) else {
        debug!("No balance header row within the first {} rows", HEADER_SCAN_ROWS);
        return Vec::new();
    };
    debug!("Balance header: {:?}", header);

    let factor = scale.factor();
    let mut records = Vec::new();

    for row in (header.row + 1)..grid.row_count() {
        let code = grid.cell(row, header.code_col).trim();
        if !balanscode_pattern().is_match(code) {
            continue;
        }

        for (col, standper) in header.value_columns() {
            if let Some(bedrag) = NumberFormatter::parse_amount(grid.cell(row, col), factor) {
                records.push(BalanceRecord {
                    balanscode: code.to_string(),
                    standper,
                    bedrag,
                });
            }
        }
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::grid_of;

    fn sample_grid() -> CellGrid {
        grid_of(&[
            &["Balansstanden", "", "", ""],
            &["", "Code", "Stand per 1 januari", "Stand ultimo"],
            &["", "A010", "1.000", "1200,4"],
            &["", "a010", "5", "5"],
            &["", "P12345", "5", "5"],
            &["", "P2030", "0", ""],
            &["", "B011", "n.v.t.", "7"],
        ])
    }

    #[test]
    fn test_find_balance_header() {
        assert_eq!(
            find_balance_header(&sample_grid()),
            Some(BalanceHeader {
                row: 1,
                code_col: 1,
                een_januari_col: Some(2),
                ultimo_col: Some(3),
            })
        );
    }

    #[test]
    fn test_header_with_value_column_in_first_column() {
        let grid = grid_of(&[&["Ultimo 2024", "code"], &["12", "A100"]]);
        let header = find_balance_header(&grid).unwrap();
        assert_eq!(header.ultimo_col, Some(0));
        assert_eq!(header.code_col, 1);
    }

    #[test]
    fn test_code_must_match_exactly() {
        let grid = grid_of(&[&["Balanscode", "1 januari"], &["A010", "5"]]);
        assert_eq!(find_balance_header(&grid), None);
        assert!(parse_balansstanden(&grid, AmountScale::Units).is_empty());
    }

    #[test]
    fn test_code_without_value_columns() {
        let grid = grid_of(&[&["code", "bedrag"], &["A010", "5"]]);
        assert_eq!(find_balance_header(&grid), None);
    }

    #[test]
    fn test_parse_balansstanden() {
        let records = parse_balansstanden(&sample_grid(), AmountScale::Units);
        let summary: Vec<(&str, Standper, i64)> = records
            .iter()
            .map(|r| (r.balanscode.as_str(), r.standper, r.bedrag))
            .collect();

        assert_eq!(
            summary,
            vec![
                ("A010", Standper::EenJanuari, 1),
                ("A010", Standper::Ultimo, 1200),
                ("P2030", Standper::EenJanuari, 0),
                ("B011", Standper::Ultimo, 7),
            ]
        );
    }

    #[test]
    fn test_parse_balansstanden_scaled() {
        let records = parse_balansstanden(&sample_grid(), AmountScale::Thousands);
        assert_eq!(records[1].bedrag, 1_200_400);
    }

    #[test]
    fn test_header_outside_scan_window() {
        let filler: &[&str] = &["toelichting"];
        let mut rows = vec![filler; 10];
        rows.push(&["code", "ultimo"]);
        rows.push(&["A010", "1"]);
        assert!(parse_balansstanden(&grid_of(&rows), AmountScale::Units).is_empty());
    }
}
