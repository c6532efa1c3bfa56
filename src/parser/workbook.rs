//! Workbook Parser Module
//!
//! calamineを使用してスプレッドシートを読み込み、行指向の`Table`に変換します。

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader, Sheets};
use chrono::{NaiveDate, NaiveDateTime};
use log::debug;
use std::io::{Cursor, Read, Seek};

use crate::api::SheetSelector;
use crate::error::CartelError;
use crate::formatter::FieldSanitizer;
use crate::security::SecurityConfig;
use crate::types::{CellValue, Table};

/// テーブルローダー
///
/// calamineのラッパーとして、アップロードされたペイロードからテーブルを生成します。
/// 副作用はなく、失敗した場合は部分的な結果を返しません。
#[derive(Debug, Default)]
pub(crate) struct TableLoader {
    security: SecurityConfig,
}

impl TableLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// スプレッドシートを読み込み、テーブルを生成する
    ///
    /// # 引数
    ///
    /// * `reader` - スプレッドシートのバイト列を読み込むためのリーダー
    /// * `selector` - 読み込むシートの選択方式
    ///
    /// # 戻り値
    ///
    /// * `Ok(Table)` - ヘッダー行と0行以上のデータ行
    /// * `Err(CartelError::Load)` - スプレッドシートとして解析できない場合、
    ///   シートが見つからない場合、ヘッダー行が存在しない場合
    /// * `Err(CartelError::Io)` - 入力の読み込みに失敗した場合
    pub fn load<R: Read>(
        &self,
        reader: R,
        selector: &SheetSelector,
    ) -> Result<Table, CartelError> {
        // セキュリティ: 上限+1バイトまでしか読み込まない
        let limit = self.security.max_input_file_size;
        let mut buffer = Vec::new();
        let bytes_read = reader
            .take(limit.saturating_add(1))
            .read_to_end(&mut buffer)?;
        self.security.check_input_size(bytes_read)?;

        let mut workbook = open_workbook_auto_from_rs(Cursor::new(buffer))
            .map_err(|e| CartelError::Load(e.to_string()))?;

        let sheet_name = select_sheet(&workbook, selector)?;
        debug!("reading sheet '{}' ({} bytes)", sheet_name, bytes_read);

        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| CartelError::Load(e.to_string()))?;

        parse_range(&range)
    }
}

/// シート選択方式に基づいてシート名を決定
fn select_sheet<R: Read + Seek>(
    workbook: &Sheets<R>,
    selector: &SheetSelector,
) -> Result<String, CartelError> {
    let names = workbook.sheet_names();

    match selector {
        SheetSelector::First => names
            .first()
            .cloned()
            .ok_or_else(|| CartelError::Load("Workbook contains no worksheet".to_string())),

        SheetSelector::Index(index) => names.get(*index).cloned().ok_or_else(|| {
            CartelError::Load(format!(
                "Sheet index {} is out of range (total: {})",
                index,
                names.len()
            ))
        }),

        SheetSelector::Name(name) => {
            if names.contains(name) {
                Ok(name.clone())
            } else {
                Err(CartelError::Load(format!("Sheet '{}' not found", name)))
            }
        }
    }
}

/// セル範囲をテーブルに変換
///
/// 範囲の最初の行をヘッダーとし、すべてのセルが空の行はスキップします。
fn parse_range(range: &Range<Data>) -> Result<Table, CartelError> {
    let mut rows = range.rows();

    let header_cells = rows
        .next()
        .ok_or_else(|| CartelError::Load("No header row found".to_string()))?;

    let sanitizer = FieldSanitizer::new();
    let headers: Vec<String> = header_cells
        .iter()
        .enumerate()
        .map(|(idx, cell)| {
            let name = sanitizer.sanitize(&convert_cell(cell));
            let name = name.trim();
            if name.is_empty() {
                format!("Column{}", idx + 1)
            } else {
                name.to_string()
            }
        })
        .collect();

    let data_rows: Vec<Vec<CellValue>> = rows
        .map(|row| row.iter().map(convert_cell).collect::<Vec<_>>())
        .filter(|cells| !cells.iter().all(CellValue::is_blank))
        .collect();

    debug!(
        "parsed table: {} columns, {} data rows",
        headers.len(),
        data_rows.len()
    );

    Ok(Table::new(headers, data_rows))
}

/// calamineのセル値をタグ付き共用体に変換
///
/// 真偽値、エラー値、経過時間はその表示形式の文字列として扱います。
fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Missing,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        // 1900年・1904年システムの判別はExcelDateTime側で行う
        Data::DateTime(dt) if !dt.is_duration() => match dt.as_datetime() {
            Some(value) => CellValue::Date(value),
            None => CellValue::Number(dt.as_f64()),
        },
        Data::DateTimeIso(s) => match parse_iso_datetime(s) {
            Some(value) => CellValue::Date(value),
            None => CellValue::Text(s.clone()),
        },
        other => CellValue::Text(other.to_string()),
    }
}

/// ISO 8601形式の日時または日付文字列を解析
fn parse_iso_datetime(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}
