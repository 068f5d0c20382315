//! Key-Figures Parser
//!
//! 財務指標シート（`11.Financiële kengetallen`）の「Verloop van de kengetallen」ブロックから
//! (指標コード, 報告期間, 値) のレコードを抽出します。

use log::debug;
use regex::Regex;
use std::sync::OnceLock;

use crate::formatter::NumberFormatter;
use crate::grid::CellGrid;
use crate::types::{Kengetal, KeyFigureRecord};

/// ブロックのタイトル行を探す範囲（先頭からの行数）
const TITLE_SCAN_ROWS: usize = 30;

/// ブロックのタイトル（小文字）
const BLOCK_TITLE: &str = "verloop van de kengetallen";

/// 行ラベルと指標コードの対応（優先順）
///
/// 部分一致で判定するため、「Netto schuldquote gecorrigeerd」は
/// 「Netto schuldquote」より先に評価する必要がある。
const LABEL_PRIORITY: [(&str, Kengetal); 6] = [
    ("netto schuldquote gecorrigeerd", Kengetal::NettoSchuldquoteGecorrigeerd),
    ("netto schuldquote", Kengetal::NettoSchuldquote),
    ("solvabiliteitsratio", Kengetal::Solvabiliteitsratio),
    ("structurele exploitatieruimte", Kengetal::StructureleExploitatieruimte),
    ("grondexploitatie", Kengetal::Grondexploitatie),
    ("belastingcapaciteit", Kengetal::Belastingcapaciteit),
];

fn year_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(\d{4})").expect("valid regex"))
}

/// 行ラベルから指標コードを判定
///
/// 大文字小文字を区別しない部分一致で、優先順の最初に一致したものを返します。
///
/// ```rust
/// use iv3json::{kengetal_for_label, Kengetal};
///
/// assert_eq!(
///     kengetal_for_label("Netto schuldquote gecorrigeerd voor alle verstrekte leningen"),
///     Some(Kengetal::NettoSchuldquoteGecorrigeerd)
/// );
/// assert_eq!(kengetal_for_label("1a. Netto schuldquote"), Some(Kengetal::NettoSchuldquote));
/// ```
pub fn kengetal_for_label(label: &str) -> Option<Kengetal> {
    let label = label.to_lowercase();
    LABEL_PRIORITY
        .iter()
        .find(|(name, _)| label.contains(name))
        .map(|(_, kengetal)| *kengetal)
}

/// 列ヘッダーから報告期間ラベルを生成
///
/// ヘッダー中の最初の4桁の数字を年とし（なければ`boekjaar`）、
/// `rekening` / `rek`を含めば`Rek_{年}`、`begroting` / `beg`を含めば`Beg_{年}`、
/// どちらでもなければ`Rek_{年}`を返します。
///
/// ```rust
/// use iv3json::header_to_verslagperiode;
///
/// assert_eq!(header_to_verslagperiode("Begroting 2025", 2024), "Beg_2025");
/// assert_eq!(header_to_verslagperiode("foo", 2024), "Rek_2024");
/// ```
pub fn header_to_verslagperiode(header: &str, boekjaar: i32) -> String {
    let header = header.to_lowercase();
    let year = year_pattern()
        .captures(&header)
        .and_then(|c| c[1].parse::<i32>().ok())
        .unwrap_or(boekjaar);

    // "rekening"は"rek"を含むため、"rek"の判定で両方を扱える
    if header.contains("rek") {
        format!("Rek_{}", year)
    } else if header.contains("beg") {
        format!("Beg_{}", year)
    } else {
        format!("Rek_{}", year)
    }
}

/// 列ヘッダー行を検出
///
/// 先頭30行のうち、行全体に`Verloop van de kengetallen`（大文字小文字を区別しない）を含む
/// 最初の行の、次の行を返します。
pub fn find_key_figures_header_row(grid: &CellGrid) -> Option<usize> {
    (0..grid.row_count().min(TITLE_SCAN_ROWS))
        .find(|&row| grid.row(row).join("\t").to_lowercase().contains(BLOCK_TITLE))
        .map(|row| row + 1)
        .filter(|&header_row| header_row < grid.row_count())
}

/// 財務指標シートをパース
///
/// # 引数
///
/// * `grid` - 財務指標シートのグリッド
/// * `boekjaar` - 会計年度（列ヘッダーに年が含まれない場合に使用）
///
/// # 戻り値
///
/// 指標行 × 列ヘッダーごとのレコード。空セル（`nan`を含む）はスキップされます。
/// `0`は空セルとして扱いません。
pub fn parse_kengetallen(grid: &CellGrid, boekjaar: i32) -> Vec<KeyFigureRecord> {
    let Some(header_row) = find_key_figures_header_row(grid) else {
        debug!("Key figures block not found within the first {} rows", TITLE_SCAN_ROWS);
        return Vec::new();
    };

    // 列インデックス → 報告期間（列0は行ラベル）
    let periods: Vec<(usize, String)> = grid
        .row(header_row)
        .iter()
        .enumerate()
        .skip(1)
        .filter(|(_, header)| !header.trim().is_empty())
        .map(|(col, header)| (col, header_to_verslagperiode(header.trim(), boekjaar)))
        .collect();

    debug!(
        "Key figures header row {}, {} period columns",
        header_row,
        periods.len()
    );

    let mut records = Vec::new();

    for row in (header_row + 1)..grid.row_count() {
        let label = grid.cell(row, 0).trim();
        if label.is_empty() {
            continue;
        }
        let Some(kengetal) = kengetal_for_label(label) else {
            continue;
        };

        for (col, verslagperiode) in &periods {
            let value = grid.cell(row, *col).trim();
            if value.is_empty() || value.eq_ignore_ascii_case("nan") {
                continue;
            }
            records.push(KeyFigureRecord {
                kengetal,
                verslagperiode: verslagperiode.clone(),
                waarde: NumberFormatter::render_waarde(value),
            });
        }
    }

    records
}
