//! Formatter Module
//!
//! セル値の文字列化と、セル文字列からの数値解析を提供するモジュール。
//!
//! パーサーはすべてのセルを文字列として扱うため、calamineのセル値は
//! ここで一度だけ文字列に変換されます。逆方向の数値解析（カンマ小数点の許容、
//! 偶数丸め）もこのモジュールにまとめています。

use calamine::Data;
use chrono::{Duration, NaiveDate, NaiveDateTime};

/// セルフォーマッター
///
/// calamineのセル値を文字列に変換するファサードとして機能します。
#[derive(Debug, Default)]
pub(crate) struct CellFormatter {
    /// 日付フォーマッター
    date_formatter: DateFormatter,
}

impl CellFormatter {
    /// 新しいCellFormatterインスタンスを生成
    pub fn new() -> Self {
        Self {
            date_formatter: DateFormatter,
        }
    }

    /// セル値を文字列に変換
    ///
    /// # 変換規則
    ///
    /// - 文字列: そのまま
    /// - 数値: 整数値は小数点なし（`100.0` → `"100"`）
    /// - 論理値: `TRUE` / `FALSE`
    /// - エラー値: Excelのエラー表記（例: `#DIV/0!`）
    /// - 日付: `YYYY-MM-DD HH:MM:SS`
    /// - 空セル: 空文字列
    pub fn format_value(&self, cell: &Data) -> String {
        match cell {
            Data::Int(i) => i.to_string(),
            Data::Float(f) => NumberFormatter::render(*f),
            Data::String(s) => s.clone(),
            Data::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
            Data::DateTime(dt) => self
                .date_formatter
                .format(dt.as_f64())
                .unwrap_or_else(|| NumberFormatter::render(dt.as_f64())),
            Data::DateTimeIso(s) => s.clone(),
            Data::DurationIso(s) => s.clone(),
            Data::Error(e) => e.to_string(),
            Data::Empty => String::new(),
        }
    }
}

/// 日付フォーマッター
///
/// Excelのシリアル日付値（1900年システム）を日時に変換します。
#[derive(Debug, Default)]
pub(crate) struct DateFormatter;

impl DateFormatter {
    /// シリアル値を日時に変換
    ///
    /// # エポックシステム
    ///
    /// - 1899年12月30日起算（シリアル値61以降）
    /// - Excelの1900年うるう年バグにより、シリアル値60（存在しない1900-02-29）より前は
    ///   1日ずれるため、1899年12月31日起算として扱う
    pub fn to_datetime(&self, serial_value: f64) -> Option<NaiveDateTime> {
        if !serial_value.is_finite() || serial_value < 0.0 {
            return None;
        }

        let epoch = if serial_value < 60.0 {
            NaiveDate::from_ymd_opt(1899, 12, 31)?
        } else {
            NaiveDate::from_ymd_opt(1899, 12, 30)?
        };

        let days = serial_value.floor() as i64;
        let seconds = ((serial_value - serial_value.floor()) * 86_400.0).round() as i64;

        epoch
            .and_hms_opt(0, 0, 0)?
            .checked_add_signed(Duration::days(days))?
            .checked_add_signed(Duration::seconds(seconds))
    }

    /// シリアル値を`YYYY-MM-DD HH:MM:SS`形式の文字列に変換
    pub fn format(&self, serial_value: f64) -> Option<String> {
        self.to_datetime(serial_value)
            .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
    }
}

/// 数値フォーマッター
///
/// セル文字列と数値の相互変換を提供します。
#[derive(Debug)]
pub(crate) struct NumberFormatter;

impl NumberFormatter {
    /// 数値を文字列に変換（整数値は小数点なし）
    pub fn render(value: f64) -> String {
        if value.is_finite() && value.fract() == 0.0 {
            if value == 0.0 {
                // -0.0 も "0"
                return "0".to_string();
            }
            format!("{:.0}", value)
        } else {
            value.to_string()
        }
    }

    /// セル文字列を数値として解析
    ///
    /// 前後の空白を除去し、カンマを小数点として扱います。
    /// 空文字列、数値でない文字列、非有限値（`inf`、`NaN`）は`None`になります。
    pub fn parse_decimal(text: &str) -> Option<f64> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        text.replace(',', ".")
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
    }

    /// 金額を整数に丸める（偶数丸め）
    ///
    /// `i64`の範囲外になる場合は`None`。
    pub fn round_amount(value: f64) -> Option<i64> {
        let rounded = value.round_ties_even();
        if rounded.is_finite() && rounded >= i64::MIN as f64 && rounded < i64::MAX as f64 {
            Some(rounded as i64)
        } else {
            None
        }
    }

    /// セル文字列を金額として解析し、スケールを適用して丸める
    pub fn parse_amount(text: &str, factor: f64) -> Option<i64> {
        Self::parse_decimal(text).and_then(|v| Self::round_amount(v * factor))
    }

    /// 財務指標の値を出力用の文字列に変換
    ///
    /// 数値であれば整数値は小数点なし、それ以外は小数表記。
    /// 数値でなければ前後の空白を除いた文字列をそのまま返します。
    pub fn render_waarde(text: &str) -> String {
        match Self::parse_decimal(text) {
            Some(value) => Self::render(value),
            None => text.trim().to_string(),
        }
    }
}
