//! Matrix Parser
//!
//! 配分マトリクス（`5.Verdelingsmatrix lasten` / `6.Verdelingsmatrix baten`）から
//! (タスク分野, カテゴリ, 金額) のレコードを抽出します。
//!
//! 出力ツールによって行・列の位置が異なるため、セル座標は固定せず、
//! カテゴリヘッダー行とタスク分野列をヒューリスティックに検出します。
//! 曖昧な場合は最初に条件を満たした行・列を採用します。

use log::debug;
use regex::Regex;
use std::sync::OnceLock;

use crate::api::AmountScale;
use crate::formatter::NumberFormatter;
use crate::grid::CellGrid;
use crate::types::MatrixRecord;

/// カテゴリヘッダー行を探す範囲（先頭からの行数）
const HEADER_SCAN_ROWS: usize = 10;

/// ヘッダー行・タスク分野列と判定するのに必要なコードセルの数
const MIN_CODE_CELLS: usize = 3;

/// タスク分野列の判定に使う、ヘッダー行直後の行数
const TASK_FIELD_WINDOW: usize = 20;

/// ドット区切りのカテゴリコード（例: `4.3.1`、少なくとも1つのドット）
fn category_code_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\d+(\.\d+)+$").expect("valid regex"))
}

/// タスク分野コード（例: `0.1`、`7`、ドットは任意）
fn task_field_code_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\d+(\.\d+)*$").expect("valid regex"))
}

fn is_category_code(cell: &str) -> bool {
    category_code_pattern().is_match(cell.trim())
}

fn is_task_field_code(cell: &str) -> bool {
    task_field_code_pattern().is_match(cell.trim())
}

/// カテゴリヘッダー行を検出
///
/// 先頭10行のうち、カテゴリコードのセルを3つ以上含む最初の行を返します。
pub fn find_category_header_row(grid: &CellGrid) -> Option<usize> {
    (0..grid.row_count().min(HEADER_SCAN_ROWS)).find(|&row| {
        grid.row(row).iter().filter(|c| is_category_code(c)).count() >= MIN_CODE_CELLS
    })
}

/// タスク分野列を検出
///
/// ヘッダー行に続く20行のうち、タスク分野コードのセルを3つ以上含む最初の列を返します。
pub fn find_task_field_column(grid: &CellGrid, header_row: usize) -> Option<usize> {
    let first = header_row + 1;
    let last = (header_row + TASK_FIELD_WINDOW).min(grid.row_count().saturating_sub(1));

    (0..grid.col_count()).find(|&col| {
        (first..=last)
            .filter(|&row| is_task_field_code(grid.cell(row, col)))
            .count()
            >= MIN_CODE_CELLS
    })
}

/// 配分マトリクスをパース
///
/// # 引数
///
/// * `grid` - マトリクスシートのグリッド
/// * `scale` - 金額のスケール
///
/// # 戻り値
///
/// 丸め後の金額が0でないレコードのリスト（行順、行内はカテゴリ列順）。
/// ヘッダー行またはタスク分野列が見つからない場合は空リスト。
/// 数値でないセルや空セルはスキップされます。
pub fn parse_matrix(grid: &CellGrid, scale: AmountScale) -> Vec<MatrixRecord> {
    let Some(header_row) = find_category_header_row(grid) else {
        debug!("No category header row within the first {} rows", HEADER_SCAN_ROWS);
        return Vec::new();
    };

    // 列インデックス → カテゴリコード
    let categories: Vec<(usize, String)> = grid
        .row(header_row)
        .iter()
        .enumerate()
        .filter(|(_, cell)| is_category_code(cell))
        .map(|(col, cell)| (col, cell.trim().to_string()))
        .collect();

    let Some(task_col) = find_task_field_column(grid, header_row) else {
        debug!("No task field column below header row {}", header_row);
        return Vec::new();
    };

    debug!(
        "Matrix header row {}, task field column {}, {} categories",
        header_row,
        task_col,
        categories.len()
    );

    let factor = scale.factor();
    let mut records = Vec::new();

    for row in (header_row + 1)..grid.row_count() {
        let taakveld = grid.cell(row, task_col).trim();
        if !is_task_field_code(taakveld) {
            continue;
        }

        for (col, categorie) in &categories {
            let Some(bedrag) = NumberFormatter::parse_amount(grid.cell(row, *col), factor) else {
                continue;
            };
            if bedrag == 0 {
                continue;
            }
            records.push(MatrixRecord {
                taakveld: taakveld.to_string(),
                categorie: categorie.clone(),
                bedrag,
            });
        }
    }

    records
}
