//! Public API Types
//!
//! 公開APIで使用する列挙型と、Iv3ワークブックのシート名を定義するモジュール。

/// 金額のスケール（「Keer 1000?」）
///
/// パースしたすべての金額に掛ける係数を指定します。
/// 千単位で入力されたワークブックには`Thousands`を指定します。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum AmountScale {
    /// そのまま（×1、デフォルト）
    #[default]
    Units,

    /// 千倍（×1000）
    Thousands,
}

impl AmountScale {
    /// 係数を取得
    pub fn factor(self) -> f64 {
        match self {
            AmountScale::Units => 1.0,
            AmountScale::Thousands => 1000.0,
        }
    }

    /// 「Keer 1000」フラグから生成
    pub fn from_keer_duizend(enabled: bool) -> Self {
        if enabled {
            AmountScale::Thousands
        } else {
            AmountScale::Units
        }
    }
}

/// Iv3ワークブックのシート名
pub mod sheets {
    /// 情報シート（メタデータ・連絡先）
    pub const INFORMATIE: &str = "4.Informatie";
    /// 配分マトリクス（支出）
    pub const MATRIX_LASTEN: &str = "5.Verdelingsmatrix lasten";
    /// 配分マトリクス（収入）
    pub const MATRIX_BATEN: &str = "6.Verdelingsmatrix baten";
    /// 貸借残高
    pub const BALANSSTANDEN: &str = "7.Balansstanden";
    /// 財務指標
    pub const KENGETALLEN: &str = "11.Financiële kengetallen";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_scale_factor() {
        assert_eq!(AmountScale::Units.factor(), 1.0);
        assert_eq!(AmountScale::Thousands.factor(), 1000.0);
        assert_eq!(AmountScale::default(), AmountScale::Units);
    }

    #[test]
    fn test_from_keer_duizend() {
        assert_eq!(AmountScale::from_keer_duizend(true), AmountScale::Thousands);
        assert_eq!(AmountScale::from_keer_duizend(false), AmountScale::Units);
    }
}
