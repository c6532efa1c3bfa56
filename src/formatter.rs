//! Formatter Module
//!
//! セル値を表示用の文字列へ正規化する処理を提供するモジュール。
//! 欠損値は空文字列に、それ以外の値は自然な文字列表現に変換します。
//! 失敗モードはなく、未知の型も文字列として扱います。

use chrono::{NaiveDateTime, Timelike};

use crate::api::ColumnNames;
use crate::types::{CellValue, Record, TableRow};

/// フィールドサニタイザー
///
/// セル値のフォーマット処理のファサードとして機能します。
#[derive(Debug, Default)]
pub(crate) struct FieldSanitizer {
    /// 日付フォーマッター
    date_formatter: DateFormatter,

    /// 数値フォーマッター
    number_formatter: NumberFormatter,
}

impl FieldSanitizer {
    /// 新しいFieldSanitizerインスタンスを生成
    pub fn new() -> Self {
        Self::default()
    }

    /// セル値を表示用文字列に変換
    ///
    /// # 引数
    ///
    /// * `value` - テーブルから取得したセル値
    ///
    /// # 戻り値
    ///
    /// 正規化済み文字列。欠損値や空白のみの文字列は空文字列になります。
    pub fn sanitize(&self, value: &CellValue) -> String {
        match value {
            CellValue::Missing => String::new(),
            CellValue::Text(s) if s.trim().is_empty() => String::new(),
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => self.number_formatter.format(*n),
            CellValue::Date(dt) => self.date_formatter.format(dt),
        }
    }

    /// テーブルの1行から作品レコードを生成
    ///
    /// # 引数
    ///
    /// * `row` - テーブルの行
    /// * `columns` - 必須列のヘッダー名
    pub fn record_from_row(&self, row: &TableRow<'_>, columns: &ColumnNames) -> Record {
        Record::new(
            self.sanitize(row.get(&columns.title)),
            self.sanitize(row.get(&columns.artist)),
            self.sanitize(row.get(&columns.creation_date)),
            self.sanitize(row.get(&columns.description)),
        )
    }
}

/// 日付フォーマッター
///
/// 時刻が0時ちょうどの場合は`YYYY-MM-DD`、それ以外は`YYYY-MM-DD HH:MM:SS`で出力します。
#[derive(Debug, Default)]
pub(crate) struct DateFormatter;

impl DateFormatter {
    pub fn format(&self, value: &NaiveDateTime) -> String {
        if value.num_seconds_from_midnight() == 0 {
            value.format("%Y-%m-%d").to_string()
        } else {
            value.format("%Y-%m-%d %H:%M:%S").to_string()
        }
    }
}

/// 数値フォーマッター
///
/// 最短の往復可能な10進表現を使用します。整数値は小数部なしで出力します。
#[derive(Debug, Default)]
pub(crate) struct NumberFormatter;

impl NumberFormatter {
    pub fn format(&self, value: f64) -> String {
        // -0 は "0" として扱う
        if value == 0.0 {
            return "0".to_string();
        }
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crate::types::Table;

    fn datetime(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn test_sanitize_missing_and_blank() {
        let sanitizer = FieldSanitizer::new();
        assert_eq!(sanitizer.sanitize(&CellValue::Missing), "");
        assert_eq!(sanitizer.sanitize(&CellValue::Text("   ".to_string())), "");
        assert_eq!(sanitizer.sanitize(&CellValue::Text(String::new())), "");
    }

    #[test]
    fn test_sanitize_text_is_verbatim() {
        let sanitizer = FieldSanitizer::new();
        let text = "  Huile sur toile,\n 65 × 81 cm ";
        assert_eq!(sanitizer.sanitize(&CellValue::Text(text.to_string())), text);
    }

    #[test]
    fn test_sanitize_numbers() {
        let sanitizer = FieldSanitizer::new();
        assert_eq!(sanitizer.sanitize(&CellValue::Number(1889.0)), "1889");
        assert_eq!(sanitizer.sanitize(&CellValue::Number(123.45)), "123.45");
        assert_eq!(sanitizer.sanitize(&CellValue::Number(-0.0)), "0");
        assert_eq!(sanitizer.sanitize(&CellValue::Number(-12.5)), "-12.5");
    }

    #[test]
    fn test_sanitize_dates() {
        let sanitizer = FieldSanitizer::new();
        assert_eq!(
            sanitizer.sanitize(&CellValue::Date(datetime(1872, 11, 13, 0, 0, 0))),
            "1872-11-13"
        );
        assert_eq!(
            sanitizer.sanitize(&CellValue::Date(datetime(2024, 3, 15, 14, 30, 5))),
            "2024-03-15 14:30:05"
        );
    }

    #[test]
    fn test_record_from_row() {
        let table = Table::new(
            vec![
                "Description".to_string(),
                "Title".to_string(),
                "Artist".to_string(),
                "Creation Date".to_string(),
            ],
            vec![vec![
                CellValue::Missing,
                CellValue::Text("Impression, soleil levant".to_string()),
                CellValue::Text("Claude Monet".to_string()),
                CellValue::Number(1872.0),
            ]],
        );
        let row = table.rows().next().unwrap();
        let record = FieldSanitizer::new().record_from_row(&row, &ColumnNames::default());

        assert_eq!(record.title(), "Impression, soleil levant");
        assert_eq!(record.artist(), "Claude Monet");
        assert_eq!(record.creation_date(), "1872");
        assert_eq!(record.description(), "");
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            // 空白でない文字列は一切変更されない
            #[test]
            fn test_non_blank_text_is_preserved(text in ".*[^ \t\r\n].*") {
                let sanitizer = FieldSanitizer::new();
                let value = CellValue::Text(text.clone());
                prop_assume!(!value.is_blank());
                prop_assert_eq!(sanitizer.sanitize(&value), text);
            }
        }
    }
}
