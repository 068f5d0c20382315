//! Builder Module
//!
//! Fluent Builder APIを提供し、`Converter`インスタンスを段階的に構築する。

use crate::api::{sheets, AmountScale};
use crate::error::Iv3Error;
use crate::output::{ExtractedRecords, Iv3Document};
use crate::parser::{
    extract_contact, extract_metadata, parse_balansstanden, parse_kengetallen, parse_matrix,
    InfoMap, WorkbookReader,
};
use crate::security::SecurityConfig;
use chrono::{Local, NaiveDate};
use log::{debug, info};
use std::io::{Read, Seek, Write};

/// エクスポート名のデフォルト値
const DEFAULT_EXPORT_NAME: &str = "Iv3_export_2026";

/// 変換処理の設定を保持する内部構造体
#[derive(Debug, Clone)]
pub(crate) struct ConversionConfig {
    /// 財務管理パッケージ名（自由入力）
    pub financieel_pakket: String,

    /// エクスポートソフトウェア名（自由入力）
    pub export_software: String,

    /// エクスポートファイル名（拡張子なし）
    pub export_name: String,

    /// 明細を公開するか
    pub details_openbaar: bool,

    /// 金額のスケール
    pub amount_scale: AmountScale,

    /// 基準日（Noneの場合は変換時点のローカル日付）
    pub reference_date: Option<NaiveDate>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            financieel_pakket: String::new(),
            export_software: String::new(),
            export_name: DEFAULT_EXPORT_NAME.to_string(),
            details_openbaar: false,
            amount_scale: AmountScale::Units,
            reference_date: None,
        }
    }
}

/// Fluent Builder APIを提供する構造体
///
/// `Converter`インスタンスを段階的に構築するためのビルダーです。
/// すべての設定項目にデフォルト値が設定されており、必要な設定のみをオーバーライドできます。
///
/// # 使用例
///
/// ```rust,no_run
/// use iv3json::{AmountScale, ConverterBuilder};
///
/// # fn main() -> Result<(), iv3json::Iv3Error> {
/// let converter = ConverterBuilder::new()
///     .with_financieel_pakket("Key2Financiën")
///     .with_export_software("Cognos")
///     .with_amount_scale(AmountScale::Thousands)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ConverterBuilder {
    /// 内部設定（構築中）
    config: ConversionConfig,
}

impl Default for ConverterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ConverterBuilder {
    /// デフォルト設定を持つビルダーインスタンスを生成する
    ///
    /// # デフォルト設定
    ///
    /// - 財務管理パッケージ・エクスポートソフトウェア: 空文字列
    /// - エクスポート名: `Iv3_export_2026`
    /// - 明細公開: しない
    /// - 金額スケール: ×1
    /// - 基準日: 変換時点のローカル日付
    pub fn new() -> Self {
        Self {
            config: ConversionConfig::default(),
        }
    }

    /// 財務管理パッケージ名を指定する（例: `Sap`、`Coda`、`Key2Financiën`）
    pub fn with_financieel_pakket(mut self, name: impl Into<String>) -> Self {
        self.config.financieel_pakket = name.into();
        self
    }

    /// エクスポートソフトウェア名を指定する（例: `Cognos`）
    pub fn with_export_software(mut self, name: impl Into<String>) -> Self {
        self.config.export_software = name.into();
        self
    }

    /// エクスポートファイル名（拡張子なし）を指定する
    ///
    /// 出力ファイル名は`{export_name}.json`になります。
    pub fn with_export_name(mut self, name: impl Into<String>) -> Self {
        self.config.export_name = name.into();
        self
    }

    /// 明細を公開するかを指定する
    pub fn with_details_openbaar(mut self, openbaar: bool) -> Self {
        self.config.details_openbaar = openbaar;
        self
    }

    /// 金額のスケールを指定する
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use iv3json::{AmountScale, ConverterBuilder};
    ///
    /// // 千単位のワークブック
    /// let builder = ConverterBuilder::new()
    ///     .with_amount_scale(AmountScale::Thousands);
    /// ```
    pub fn with_amount_scale(mut self, scale: AmountScale) -> Self {
        self.config.amount_scale = scale;
        self
    }

    /// 基準日を指定する
    ///
    /// 情報シートに年度や日付がない場合のフォールバックに使用されます。
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.config.reference_date = Some(date);
        self
    }

    /// 設定を検証し、`Converter`インスタンスを生成する
    ///
    /// # 発生し得るエラー
    ///
    /// * `Iv3Error::Config(String)`: 設定の検証に失敗した場合
    ///   * エクスポート名が空
    ///   * エクスポート名にパス区切り文字が含まれる
    pub fn build(self) -> Result<Converter, Iv3Error> {
        let name = self.config.export_name.trim();
        if name.is_empty() {
            return Err(Iv3Error::Config(
                "Export name must not be empty".to_string(),
            ));
        }

        if name.contains('/') || name.contains('\\') {
            return Err(Iv3Error::Config(format!(
                "Export name must not contain path separators: '{}'",
                name
            )));
        }

        Ok(Converter::new(self.config))
    }
}

/// 変換処理のファサード
///
/// Iv3ワークブックをJSONドキュメントに変換するためのメインエントリーポイントです。
/// 1回の呼び出しで1つのワークブックを同期的に処理します。
///
/// # 使用例
///
/// ```rust,no_run
/// use iv3json::ConverterBuilder;
/// use std::fs::File;
///
/// # fn main() -> Result<(), iv3json::Iv3Error> {
/// let converter = ConverterBuilder::new().build()?;
/// let input = File::open("iv3.xlsx")?;
/// let output = File::create(converter.output_file_name())?;
/// converter.convert_to_writer(input, output)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Converter {
    /// 変換設定
    config: ConversionConfig,
}

impl Converter {
    pub(crate) fn new(config: ConversionConfig) -> Self {
        Self { config }
    }

    /// 出力ファイル名（`{export_name}.json`）
    pub fn output_file_name(&self) -> String {
        format!("{}.json", self.config.export_name)
    }

    /// ワークブックを出力ドキュメントに変換
    ///
    /// # 処理フロー
    ///
    /// 1. 入力をメモリに読み込み、サイズ制限を検証
    /// 2. ワークブックを開く
    /// 3. 情報シートからメタデータと連絡先を抽出
    /// 4. 配分マトリクス（支出・収入）、貸借残高、財務指標をパース
    /// 5. ドキュメントを組み立てる
    ///
    /// シートの欠落や不正なセルはエラーにならず、該当部分が空になります。
    ///
    /// # 戻り値
    ///
    /// * `Ok(Iv3Document)` - 変換に成功した場合
    /// * `Err(Iv3Error)` - 入力がワークブックとして開けない場合など
    pub fn convert<R: Read + Seek>(&self, input: R) -> Result<Iv3Document, Iv3Error> {
        // 1. 入力データをメモリに読み込む
        let buffer = SecurityConfig::default().read_limited(input)?;

        // 2. ワークブックを開く
        let mut reader = WorkbookReader::from_bytes(buffer)?;
        debug!("Workbook sheets: {:?}", reader.sheet_names());

        // 3. メタデータと連絡先
        let today = self
            .config
            .reference_date
            .unwrap_or_else(|| Local::now().date_naive());
        let info_map = InfoMap::from_grid(&reader.read_sheet(sheets::INFORMATIE));
        let metadata = extract_metadata(&info_map, &self.config, today);
        let contact = extract_contact(&info_map);

        // 4. 各シートのパース
        let scale = self.config.amount_scale;
        let records = ExtractedRecords {
            lasten: parse_matrix(&reader.read_sheet(sheets::MATRIX_LASTEN), scale),
            baten: parse_matrix(&reader.read_sheet(sheets::MATRIX_BATEN), scale),
            balans_standen: parse_balansstanden(&reader.read_sheet(sheets::BALANSSTANDEN), scale),
            kengetallen: parse_kengetallen(
                &reader.read_sheet(sheets::KENGETALLEN),
                metadata.boekjaar,
            ),
        };

        info!(
            "Converted workbook: {} lasten, {} baten, {} balans_standen, {} kengetallen",
            records.lasten.len(),
            records.baten.len(),
            records.balans_standen.len(),
            records.kengetallen.len()
        );

        // 5. ドキュメントの組み立て
        Ok(Iv3Document::assemble(metadata, contact, records))
    }

    /// ワークブックを変換し、JSONを書き出す
    pub fn convert_to_writer<R: Read + Seek, W: Write>(
        &self,
        input: R,
        mut output: W,
    ) -> Result<(), Iv3Error> {
        let document = self.convert(input)?;
        document.write_json(&mut output)
    }

    /// ワークブックをJSON文字列に変換
    pub fn convert_to_string<R: Read + Seek>(&self, input: R) -> Result<String, Iv3Error> {
        self.convert(input)?.to_json_string()
    }
}
