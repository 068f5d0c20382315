//! Grid Module
//!
//! シートの内容を保持する2次元の文字列グリッドを提供するモジュール。
//! ヘッダー行や列の検出はすべてこのグリッドに対して行われます。

use crate::types::CellCoord;

/// シート1枚分のセル文字列グリッド
///
/// `[行][列]`でアクセスし、空セルや範囲外のセルは空文字列として扱います。
/// 全行が同じ列数を持つ長方形のグリッドです。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellGrid {
    /// グリッドデータ（行 × 列）
    cells: Vec<Vec<String>>,

    /// 列数
    cols: usize,
}

impl CellGrid {
    /// 空のグリッドを生成
    ///
    /// シートが存在しない場合や読み込みに失敗した場合に使用されます。
    pub fn empty() -> Self {
        Self::default()
    }

    /// 行データからグリッドを生成
    ///
    /// 列数は最も長い行に合わせ、足りないセルは空文字列で埋めます。
    ///
    /// # 使用例
    ///
    /// ```rust
    /// use iv3json::CellGrid;
    ///
    /// let grid = CellGrid::from_rows(vec![
    ///     vec!["".to_string(), "1.1".to_string()],
    ///     vec!["1".to_string()],
    /// ]);
    /// assert_eq!(grid.col_count(), 2);
    /// assert_eq!(grid.cell(1, 1), "");
    /// ```
    pub fn from_rows(mut rows: Vec<Vec<String>>) -> Self {
        let cols = rows.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut rows {
            row.resize(cols, String::new());
        }
        Self { cells: rows, cols }
    }

    /// スパースなセルデータから稠密なグリッドを構築
    ///
    /// 座標は絶対座標（A1 = (0, 0)）として扱います。
    /// 先頭の空行・空列も保持されるため、行番号はシート上の行番号と一致します。
    pub(crate) fn build(cells: Vec<(CellCoord, String)>) -> Self {
        if cells.is_empty() {
            return Self::empty();
        }

        let (rows, cols) = Self::determine_grid_size(&cells);
        let mut grid_cells = vec![vec![String::new(); cols]; rows];

        for (coord, content) in cells {
            grid_cells[coord.row as usize][coord.col as usize] = content;
        }

        Self {
            cells: grid_cells,
            cols,
        }
    }

    /// グリッドサイズを決定（内部ヘルパー）
    fn determine_grid_size(cells: &[(CellCoord, String)]) -> (usize, usize) {
        let mut max_row = 0;
        let mut max_col = 0;

        for (coord, _) in cells {
            max_row = max_row.max(coord.row);
            max_col = max_col.max(coord.col);
        }

        ((max_row + 1) as usize, (max_col + 1) as usize)
    }

    /// グリッドが空かどうか
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// 行数
    pub fn row_count(&self) -> usize {
        self.cells.len()
    }

    /// 列数
    pub fn col_count(&self) -> usize {
        self.cols
    }

    /// セルの文字列を取得（範囲外は空文字列）
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.cells
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// 行を取得（範囲外は空スライス）
    pub fn row(&self, row: usize) -> &[String] {
        self.cells.get(row).map(Vec::as_slice).unwrap_or(&[])
    }

    /// 全行のイテレータ
    pub fn rows(&self) -> impl Iterator<Item = &[String]> {
        self.cells.iter().map(Vec::as_slice)
    }
}

/// テスト用に`&str`の2次元配列からグリッドを生成
#[cfg(test)]
pub(crate) fn grid_of(rows: &[&[&str]]) -> CellGrid {
    CellGrid::from_rows(
        rows.iter()
            .map(|r| r.iter().map(|s| s.to_string()).collect())
            .collect(),
    )
}
