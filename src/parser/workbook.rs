//! Sheet Reader
//!
//! calamineのラッパーとして、シートを文字列グリッドとして読み込む機能を提供します。

use calamine::{open_workbook_auto_from_rs, Reader, Sheets, Xlsx};
use log::{debug, warn};
use std::io::Cursor;

use crate::error::Iv3Error;
use crate::formatter::CellFormatter;
use crate::grid::CellGrid;
use crate::types::CellCoord;

/// ワークブックリーダー
///
/// アップロードされたワークブック1つを保持し、シート名を指定して
/// `CellGrid`を読み出します。
pub struct WorkbookReader {
    /// calamineのワークブック（XLSX形式のみサポート）
    workbook: Xlsx<Cursor<Vec<u8>>>,

    /// セルフォーマッター
    formatter: CellFormatter,
}

impl WorkbookReader {
    /// メモリ上のバイト列からワークブックを開く
    ///
    /// # 戻り値
    ///
    /// * `Ok(WorkbookReader)` - ワークブックの読み込みに成功した場合（XLSX形式のみサポート）
    /// * `Err(Iv3Error::Parse)` - ワークブックとして開けなかった場合
    /// * `Err(Iv3Error::Config)` - XLSX以外の形式だった場合
    pub fn from_bytes(buffer: Vec<u8>) -> Result<Self, Iv3Error> {
        let sheets = open_workbook_auto_from_rs(Cursor::new(buffer)).map_err(Iv3Error::Parse)?;
        match sheets {
            Sheets::Xlsx(workbook) => Ok(Self {
                workbook,
                formatter: CellFormatter::new(),
            }),
            _ => Err(Iv3Error::Config(
                "Only XLSX format is supported".to_string(),
            )),
        }
    }

    /// すべてのシート名を取得
    pub fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names().to_vec()
    }

    /// シートを文字列グリッドとして読み込む
    ///
    /// ヘッダーの解釈は行わず、すべてのセルを文字列に変換します。
    /// シートが存在しない場合や読み込みに失敗した場合はエラーにせず、
    /// 空のグリッドを返します。
    pub fn read_sheet(&mut self, sheet_name: &str) -> CellGrid {
        if !self.workbook.sheet_names().iter().any(|n| n == sheet_name) {
            warn!("Sheet '{}' not found, treating as empty", sheet_name);
            return CellGrid::empty();
        }

        let range = match self.workbook.worksheet_range(sheet_name) {
            Ok(range) => range,
            Err(e) => {
                let e: calamine::Error = e.into();
                warn!("Failed to read sheet '{}': {}", sheet_name, e);
                return CellGrid::empty();
            }
        };

        // 使用範囲の左上を絶対座標に変換するためのオフセット
        let (start_row, start_col) = match range.start() {
            Some(start) => start,
            None => return CellGrid::empty(),
        };

        let mut cells = Vec::new();
        for (row_idx, row) in range.rows().enumerate() {
            for (col_idx, cell) in row.iter().enumerate() {
                let content = self.formatter.format_value(cell);
                if content.is_empty() {
                    continue;
                }
                let coord = CellCoord::new(start_row + row_idx as u32, start_col + col_idx as u32);
                cells.push((coord, content));
            }
        }

        let grid = CellGrid::build(cells);
        debug!(
            "Read sheet '{}': {} rows x {} cols",
            sheet_name,
            grid.row_count(),
            grid.col_count()
        );
        grid
    }
}

// テストは統合テスト（tests/）で実装します。
// 実際のXLSXファイルが必要なため、単体テストではなく統合テストとして実装します。
