//! Output Module
//!
//! 抽出したレコードを固定形状の出力ドキュメントに組み立て、JSONとして書き出すモジュール。

use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::error::Iv3Error;
use crate::types::{BalanceRecord, Contact, KeyFigureRecord, MatrixRecord, Metadata};

/// 出力ドキュメントの`data`部
///
/// `balans_lasten`、`balans_baten`、`beleidsindicatoren`は常に空配列です。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataSection {
    pub lasten: Vec<MatrixRecord>,
    pub balans_lasten: Vec<serde_json::Value>,
    pub baten: Vec<MatrixRecord>,
    pub balans_baten: Vec<serde_json::Value>,
    pub balans_standen: Vec<BalanceRecord>,
    pub kengetallen: Vec<KeyFigureRecord>,
    pub beleidsindicatoren: Vec<serde_json::Value>,
}

/// 変換結果の出力ドキュメント
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Iv3Document {
    pub metadata: Metadata,
    pub contact: Contact,
    pub data: DataSection,
}

/// 上流の抽出結果一式
#[derive(Debug, Clone, Default)]
pub(crate) struct ExtractedRecords {
    pub lasten: Vec<MatrixRecord>,
    pub baten: Vec<MatrixRecord>,
    pub balans_standen: Vec<BalanceRecord>,
    pub kengetallen: Vec<KeyFigureRecord>,
}

impl Iv3Document {
    /// 抽出結果からドキュメントを組み立てる
    pub(crate) fn assemble(metadata: Metadata, contact: Contact, records: ExtractedRecords) -> Self {
        Self {
            metadata,
            contact,
            data: DataSection {
                lasten: records.lasten,
                balans_lasten: Vec::new(),
                baten: records.baten,
                balans_baten: Vec::new(),
                balans_standen: records.balans_standen,
                kengetallen: records.kengetallen,
                beleidsindicatoren: Vec::new(),
            },
        }
    }

    /// JSONとして書き出す
    ///
    /// 2スペースのインデントで、非ASCII文字はエスケープしません。
    pub fn write_json<W: Write>(&self, writer: &mut W) -> Result<(), Iv3Error> {
        serde_json::to_writer_pretty(&mut *writer, self)?;
        writer.flush()?;
        Ok(())
    }

    /// JSON文字列に変換
    pub fn to_json_string(&self) -> Result<String, Iv3Error> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
