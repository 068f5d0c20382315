//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーの自動変換とメッセージフォーマットを実現する。
//!
//! データ上の異常（シートの欠落、数値でないセル、日付の解析失敗など）は
//! エラーにならず、ログ出力のうえスキップまたはデフォルト値で補われます。
//! ここで定義するエラーは、ワークブック自体を開けない場合や設定が不正な場合など、
//! 変換を継続できない場合にのみ使用されます。

use thiserror::Error;

/// iv3jsonクレート全体で使用するエラー型
///
/// # エラーの種類
///
/// - `Io`: I/O操作中に発生したエラー（ファイル読み込み失敗など）
/// - `Parse`: ワークブックを開けなかったエラー（calamine由来）
/// - `Json`: JSONドキュメントの書き出しに失敗したエラー
/// - `Config`: 設定の検証に失敗したエラー（不正なエクスポート名など）
/// - `SecurityViolation`: 入力サイズ制限に違反したエラー
///
/// # 使用例
///
/// ```rust,no_run
/// use iv3json::Iv3Error;
/// use std::fs::File;
///
/// fn open_workbook(path: &str) -> Result<File, Iv3Error> {
///     let file = File::open(path)?;  // Ioエラーが自動的に変換される
///     Ok(file)
/// }
/// ```
#[derive(Error, Debug)]
pub enum Iv3Error {
    /// I/O操作中に発生したエラー
    ///
    /// `#[from]`属性により、`std::io::Error`から自動的に変換されます。
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ワークブックの解析中に発生したエラー
    ///
    /// アップロードされたファイルがワークブックとして開けない場合に発生します。
    /// 個々のシートの読み込み失敗はこのエラーにならず、空のグリッドとして扱われます。
    #[error("Failed to open workbook: {0}")]
    Parse(#[from] calamine::Error),

    /// JSONシリアライズのエラー
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// 設定の検証に失敗したエラー
    ///
    /// `ConverterBuilder::build()`時に設定を検証し、無効な設定が検出された
    /// 場合に発生します。
    ///
    /// # 例
    ///
    /// ```rust,no_run
    /// use iv3json::{ConverterBuilder, Iv3Error};
    ///
    /// let result = ConverterBuilder::new()
    ///     .with_export_name("")
    ///     .build();
    ///
    /// match result {
    ///     Err(Iv3Error::Config(msg)) => {
    ///         println!("設定エラー: {}", msg);
    ///     }
    ///     _ => {}
    /// }
    /// ```
    #[error("Configuration error: {0}")]
    Config(String),

    /// セキュリティ制限に違反したエラー
    ///
    /// 入力ファイルのサイズ上限を超えた場合に発生します。
    #[error("Security violation: {0}")]
    SecurityViolation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_io_error() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error: Iv3Error = io_err.into();

        match error {
            Iv3Error::Io(e) => {
                assert_eq!(e.kind(), io::ErrorKind::NotFound);
                assert_eq!(e.to_string(), "File not found");
            }
            _ => panic!("Expected Io error"),
        }
    }

    #[test]
    fn test_parse_error_display() {
        let parse_err = calamine::Error::Msg("Corrupted file");
        let error: Iv3Error = parse_err.into();

        let error_msg = error.to_string();
        assert!(error_msg.contains("Failed to open workbook"));
        assert!(error_msg.contains("Corrupted file"));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: Iv3Error = json_err.into();
        assert!(matches!(error, Iv3Error::Json(_)));
        assert!(error.to_string().starts_with("JSON serialization error"));
    }

    #[test]
    fn test_config_error_display() {
        let error = Iv3Error::Config("Export name must not be empty".to_string());
        let error_msg = error.to_string();

        assert!(error_msg.contains("Configuration error"));
        assert!(error_msg.contains("Export name must not be empty"));
    }

    // エラー変換のテスト（?演算子の動作確認）
    #[test]
    fn test_error_conversion_with_question_mark() {
        fn io_operation() -> Result<(), Iv3Error> {
            let _file = std::fs::File::open("nonexistent_iv3_workbook.xlsx")?;
            Ok(())
        }

        match io_operation() {
            Err(Iv3Error::Io(_)) => {}
            _ => panic!("Expected Io error from ? operator"),
        }
    }

    #[test]
    fn test_all_error_formats() {
        let io_err: Iv3Error = io::Error::other("test io").into();
        assert!(io_err.to_string().starts_with("IO error"));

        let parse_err: Iv3Error = calamine::Error::Msg("test parse").into();
        assert!(parse_err.to_string().starts_with("Failed to open workbook"));

        let config_err = Iv3Error::Config("test config".to_string());
        assert!(config_err.to_string().starts_with("Configuration error"));

        let security_err = Iv3Error::SecurityViolation("too large".to_string());
        assert!(security_err.to_string().starts_with("Security violation"));
    }
}
