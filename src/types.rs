//! Types Module
//!
//! クレート全体で使用する共通データ型と、出力ドキュメントを構成するレコード型を定義するモジュール。

use serde::{Deserialize, Serialize};

/// セル座標（0始まり）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct CellCoord {
    pub row: u32,
    pub col: u32,
}

impl CellCoord {
    /// 新しい座標を生成
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

/// 配分マトリクスのレコード（タスク分野 × カテゴリ）
///
/// `bedrag`は常に0以外です（丸め後に0となる金額は出力されません）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixRecord {
    /// タスク分野コード（例: `0.1`）
    pub taakveld: String,
    /// カテゴリコード（例: `4.3.1`）
    pub categorie: String,
    /// 金額（スケール適用・丸め済み）
    pub bedrag: i64,
}

/// 貸借残高の基準時点
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Standper {
    /// 期首（1月1日）
    #[serde(rename = "1 januari")]
    EenJanuari,
    /// 期末
    #[serde(rename = "ultimo")]
    Ultimo,
}

impl Standper {
    /// ヘッダーおよび出力で使用されるラベル
    pub fn label(self) -> &'static str {
        match self {
            Standper::EenJanuari => "1 januari",
            Standper::Ultimo => "ultimo",
        }
    }
}

/// 貸借残高のレコード
///
/// 0の残高も出力されます。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceRecord {
    /// 貸借コード（`^[A-Z]\d{3,4}$`）
    pub balanscode: String,
    /// 基準時点
    pub standper: Standper,
    /// 金額（スケール適用・丸め済み）
    pub bedrag: i64,
}

/// 財務指標コード
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kengetal {
    /// Netto schuldquote
    #[serde(rename = "fk.1")]
    NettoSchuldquote,
    /// Netto schuldquote gecorrigeerd voor alle verstrekte leningen
    #[serde(rename = "fk.2")]
    NettoSchuldquoteGecorrigeerd,
    /// Solvabiliteitsratio
    #[serde(rename = "fk.3")]
    Solvabiliteitsratio,
    /// Structurele exploitatieruimte
    #[serde(rename = "fk.4")]
    StructureleExploitatieruimte,
    /// Grondexploitatie
    #[serde(rename = "fk.5")]
    Grondexploitatie,
    /// Belastingcapaciteit
    #[serde(rename = "fk.6")]
    Belastingcapaciteit,
}

impl Kengetal {
    /// 出力コード（`fk.1`〜`fk.6`）
    pub fn code(self) -> &'static str {
        match self {
            Kengetal::NettoSchuldquote => "fk.1",
            Kengetal::NettoSchuldquoteGecorrigeerd => "fk.2",
            Kengetal::Solvabiliteitsratio => "fk.3",
            Kengetal::StructureleExploitatieruimte => "fk.4",
            Kengetal::Grondexploitatie => "fk.5",
            Kengetal::Belastingcapaciteit => "fk.6",
        }
    }
}

/// 財務指標のレコード
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyFigureRecord {
    /// 指標コード
    pub kengetal: Kengetal,
    /// 報告期間ラベル（`Rek_2024`、`Beg_2025`など）
    pub verslagperiode: String,
    /// 値（整数値は小数点なし、数値でない場合はセルの文字列そのまま）
    pub waarde: String,
}

/// 出力ドキュメントのメタデータ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub overheidslaag: String,
    pub overheidsnummer: String,
    pub overheidsnaam: String,
    pub boekjaar: i32,
    pub periode: i32,
    pub status: String,
    /// ISO 8601形式（時刻は常に`00:00:00`、オフセットは`+02:00`固定）
    pub datum: String,
    pub details_openbaar: bool,
    pub financieel_pakket: String,
    pub export_software: String,
}

/// 連絡先
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub naam: String,
    pub telefoon: String,
    pub email: String,
}
