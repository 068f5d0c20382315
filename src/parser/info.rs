//! Metadata/Contact Extractor
//!
//! 情報シート（`4.Informatie`）のキー・値の組を読み取り、
//! 出力ドキュメントのメタデータと連絡先を組み立てます。

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime};
use log::{debug, warn};
use std::collections::HashMap;

use crate::builder::ConversionConfig;
use crate::grid::CellGrid;
use crate::types::{Contact, Metadata};

/// キーの列
const KEY_COL: usize = 1;

/// 値の列
const VALUE_COL: usize = 2;

/// `datum`に付与する固定オフセット（+02:00）
const DATUM_OFFSET_SECONDS: i32 = 2 * 3600;

/// 日時として解釈を試みる書式（優先順）
///
/// 日付部分の順序は`DATE_FORMATS`と同じく月→日を先に試す。
const DATETIME_FORMATS: [&str; 9] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m-%d-%Y %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m.%d.%Y %H:%M:%S",
    "%d-%m-%Y %H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
    "%d.%m.%Y %H:%M:%S",
];

/// 日付として解釈を試みる書式（優先順）
///
/// 数字だけの曖昧な日付は月→日の順を先に試し、解釈できなければ日→月の順で解釈する。
const DATE_FORMATS: [&str; 14] = [
    "%Y-%m-%d",
    "%Y%m%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%m-%d-%Y",
    "%m/%d/%Y",
    "%m.%d.%Y",
    "%d-%m-%Y",
    "%d/%m/%Y",
    "%d.%m.%Y",
    "%d %B %Y",
    "%B %d, %Y",
    "%d %b %Y",
    "%b %d, %Y",
];

/// 情報シートのキー・値マップ
///
/// 列1（キー）と列2（値）がどちらも空でない行を取り込みます。
/// 同じキーが複数ある場合は後の行が優先されます。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InfoMap {
    entries: HashMap<String, String>,
}

impl InfoMap {
    /// グリッドからマップを構築
    ///
    /// 列数が3未満のグリッドからは何も取り込みません。
    pub fn from_grid(grid: &CellGrid) -> Self {
        let mut entries = HashMap::new();
        if grid.col_count() <= VALUE_COL {
            return Self { entries };
        }

        for row in grid.rows() {
            let key = row[KEY_COL].trim();
            let value = row[VALUE_COL].trim();
            if !key.is_empty() && !value.is_empty() {
                entries.insert(key.to_string(), value.to_string());
            }
        }

        debug!("Info sheet: {} entries", entries.len());
        Self { entries }
    }

    /// 候補キーを順に調べ、最初に見つかった値を返す
    pub fn get(&self, keys: &[&str]) -> Option<&str> {
        keys.iter()
            .find_map(|key| self.entries.get(*key))
            .map(String::as_str)
    }

    /// 候補キーの値、見つからなければデフォルト値
    pub fn get_or(&self, keys: &[&str], default: &str) -> String {
        self.get(keys).unwrap_or(default).to_string()
    }

    /// 整数として解釈できる値、見つからないか解釈できなければデフォルト値
    fn get_int_or(&self, keys: &[&str], default: i32) -> i32 {
        match self.get(keys) {
            Some(raw) => raw.parse::<i32>().unwrap_or_else(|_| {
                warn!("Value '{}' for {:?} is not an integer, using {}", raw, keys, default);
                default
            }),
            None => default,
        }
    }

    /// エントリ数
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 空かどうか
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// 自由形式の文字列を日付として解釈
///
/// ```rust
/// use chrono::NaiveDate;
/// use iv3json::parse_free_text_date;
///
/// assert_eq!(
///     parse_free_text_date("2024-05-01 00:00:00"),
///     NaiveDate::from_ymd_opt(2024, 5, 1)
/// );
/// assert_eq!(parse_free_text_date("31-12-2024"), NaiveDate::from_ymd_opt(2024, 12, 31));
/// assert_eq!(parse_free_text_date("morgen"), None);
/// ```
pub fn parse_free_text_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.date_naive());
    }

    // 年のみの場合はその年の1月1日
    if text.len() == 4 && text.bytes().all(|b| b.is_ascii_digit()) {
        return text
            .parse::<i32>()
            .ok()
            .and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1));
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .map(|dt| dt.date())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        })
}

/// 日付を`datum`の出力形式（`YYYY-MM-DDT00:00:00+02:00`）に変換
pub(crate) fn format_datum(date: NaiveDate) -> String {
    FixedOffset::east_opt(DATUM_OFFSET_SECONDS)
        .zip(date.and_hms_opt(0, 0, 0))
        .and_then(|(offset, midnight)| midnight.and_local_timezone(offset).single())
        .map(|dt| dt.format("%Y-%m-%dT%H:%M:%S%:z").to_string())
        .unwrap_or_else(|| format!("{}T00:00:00+02:00", date.format("%Y-%m-%d")))
}

/// メタデータを組み立てる
///
/// 情報シートにない項目はデフォルト値で補います。
/// `today`は会計年度と日付のフォールバックに使用されます。
pub(crate) fn extract_metadata(
    info: &InfoMap,
    config: &ConversionConfig,
    today: NaiveDate,
) -> Metadata {
    let datum = match info.get(&["Datum"]) {
        Some(raw) => parse_free_text_date(raw).unwrap_or_else(|| {
            warn!("Could not parse Datum '{}', using {}", raw, today);
            today
        }),
        None => today,
    };

    Metadata {
        overheidslaag: info.get_or(&["Overheidslaag"], "Gemeente"),
        overheidsnummer: info.get_or(&["Nummer"], ""),
        overheidsnaam: info.get_or(&["Naam"], ""),
        boekjaar: info.get_int_or(&["Jaar"], today.year()),
        periode: info.get_int_or(&["Periode"], 5),
        status: info.get_or(&["Status"], "Realisatie"),
        datum: format_datum(datum),
        details_openbaar: config.details_openbaar,
        financieel_pakket: config.financieel_pakket.clone(),
        export_software: config.export_software.clone(),
    }
}

/// 連絡先を組み立てる
pub(crate) fn extract_contact(info: &InfoMap) -> Contact {
    Contact {
        naam: info.get_or(&["Naam:", "Contactpersoon"], ""),
        telefoon: info.get_or(&["Telefoon:", "Telefoon"], ""),
        email: info.get_or(&["E-mail:", "Email"], ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::grid_of;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn sample_info() -> InfoMap {
        InfoMap::from_grid(&grid_of(&[
            &["", "Informatie", "", ""],
            &["", "Naam", "Gemeente Voorbeeld", ""],
            &["", "Nummer", "0999", ""],
            &["", "Jaar", "2024", ""],
            &["", "Periode", "", ""],
            &["", "Datum", "15-04-2025", ""],
            &["", "Naam:", "J. Jansen", ""],
            &["", "Telefoon", "020-1234567", ""],
            &["", "Email", "iv3@voorbeeld.nl", ""],
            &["", "E-mail:", "financien@voorbeeld.nl", ""],
            &["", "Nummer", " 0363 ", ""],
        ]))
    }

    #[test]
    fn test_info_map_from_grid() {
        let info = sample_info();
        assert_eq!(info.get(&["Naam"]), Some("Gemeente Voorbeeld"));
        // 後の行が優先され、値はトリムされる
        assert_eq!(info.get(&["Nummer"]), Some("0363"));
        // 値が空の行は取り込まない
        assert_eq!(info.get(&["Periode"]), None);
        assert_eq!(info.get(&["Informatie"]), None);
        assert_eq!(info.len(), 8);
    }

    #[test]
    fn test_info_map_needs_three_columns() {
        let info = InfoMap::from_grid(&grid_of(&[&["", "Jaar"], &["x", "2024"]]));
        assert!(info.is_empty());
        assert!(InfoMap::from_grid(&CellGrid::empty()).is_empty());
    }

    #[test]
    fn test_get_tries_keys_in_order() {
        let info = sample_info();
        assert_eq!(
            info.get(&["E-mail:", "Email"]),
            Some("financien@voorbeeld.nl")
        );
        assert_eq!(info.get(&["Onbekend", "Email"]), Some("iv3@voorbeeld.nl"));
        assert_eq!(info.get_or(&["Onbekend"], "standaard"), "standaard");
    }

    #[test]
    fn test_metadata_defaults_on_empty_sheet() {
        let config = ConversionConfig::default();
        let metadata = extract_metadata(&InfoMap::default(), &config, today());

        assert_eq!(metadata.boekjaar, 2026);
        assert_eq!(metadata.periode, 5);
        assert_eq!(metadata.status, "Realisatie");
        assert_eq!(metadata.overheidslaag, "Gemeente");
        assert_eq!(metadata.overheidsnaam, "");
        assert_eq!(metadata.datum, "2026-10-19T00:00:00+02:00");
        assert!(!metadata.details_openbaar);
    }

    #[test]
    fn test_metadata_from_info_sheet() {
        let config = ConversionConfig {
            details_openbaar: true,
            financieel_pakket: "Key2Financiën".to_string(),
            export_software: "Cognos".to_string(),
            ..Default::default()
        };
        let metadata = extract_metadata(&sample_info(), &config, today());

        assert_eq!(metadata.overheidsnaam, "Gemeente Voorbeeld");
        assert_eq!(metadata.overheidsnummer, "0363");
        assert_eq!(metadata.boekjaar, 2024);
        assert_eq!(metadata.periode, 5);
        assert_eq!(metadata.datum, "2025-04-15T00:00:00+02:00");
        assert!(metadata.details_openbaar);
        assert_eq!(metadata.financieel_pakket, "Key2Financiën");
        assert_eq!(metadata.export_software, "Cognos");
    }

    #[test]
    fn test_metadata_invalid_numbers_fall_back() {
        let info = InfoMap::from_grid(&grid_of(&[
            &["", "Jaar", "twintig"],
            &["", "Periode", "4,5"],
            &["", "Datum", "gisteren"],
        ]));
        let metadata = extract_metadata(&info, &ConversionConfig::default(), today());
        assert_eq!(metadata.boekjaar, 2026);
        assert_eq!(metadata.periode, 5);
        assert_eq!(metadata.datum, "2026-10-19T00:00:00+02:00");
    }

    #[test]
    fn test_extract_contact() {
        let contact = extract_contact(&sample_info());
        assert_eq!(contact.naam, "J. Jansen");
        assert_eq!(contact.telefoon, "020-1234567");
        assert_eq!(contact.email, "financien@voorbeeld.nl");

        assert_eq!(extract_contact(&InfoMap::default()), Contact::default());
    }

    #[test]
    fn test_parse_free_text_date() {
        let may_first = NaiveDate::from_ymd_opt(2024, 5, 1);
        assert_eq!(parse_free_text_date("2024-05-01"), may_first);
        assert_eq!(parse_free_text_date("2024-05-01 00:00:00"), may_first);
        assert_eq!(parse_free_text_date("2024-05-01T08:30:00+02:00"), may_first);
        assert_eq!(parse_free_text_date("2024/05/01"), may_first);
        assert_eq!(parse_free_text_date("1 May 2024"), may_first);
        assert_eq!(parse_free_text_date("May 1, 2024"), may_first);
        // 曖昧な日付は月→日の順
        assert_eq!(
            parse_free_text_date("01-05-2024"),
            NaiveDate::from_ymd_opt(2024, 1, 5)
        );
        assert_eq!(
            parse_free_text_date("15.04.2025"),
            NaiveDate::from_ymd_opt(2025, 4, 15)
        );
        assert_eq!(parse_free_text_date(""), None);
        assert_eq!(parse_free_text_date("n.v.t."), None);
    }

    #[test]
    fn test_parse_free_text_date_with_time_keeps_order() {
        // 時刻の有無で日・月の順序が変わらない
        let jan_fifth = NaiveDate::from_ymd_opt(2024, 1, 5);
        assert_eq!(parse_free_text_date("01-05-2024"), jan_fifth);
        assert_eq!(parse_free_text_date("01-05-2024 10:00:00"), jan_fifth);
        assert_eq!(parse_free_text_date("01/05/2024 10:00:00"), jan_fifth);
        assert_eq!(
            parse_free_text_date("15-04-2025 08:30:00"),
            NaiveDate::from_ymd_opt(2025, 4, 15)
        );
    }

    #[test]
    fn test_parse_free_text_date_compact_and_year_only() {
        assert_eq!(
            parse_free_text_date("20240501"),
            NaiveDate::from_ymd_opt(2024, 5, 1)
        );
        assert_eq!(parse_free_text_date("2024"), NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(
            extract_metadata(
                &InfoMap::from_grid(&grid_of(&[&["", "Datum", "2023"]])),
                &ConversionConfig::default(),
                today()
            )
            .datum,
            "2023-01-01T00:00:00+02:00"
        );
    }

    #[test]
    fn test_format_datum() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        assert_eq!(format_datum(date), "2025-01-31T00:00:00+02:00");
    }
}
