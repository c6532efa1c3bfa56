//! Types Module
//!
//! クレート全体で使用する共通データ型を定義するモジュール。

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// セルの値を表す列挙型
///
/// スプレッドシートから読み込んだ型の混在した値を表すタグ付き共用体です。
/// `FieldSanitizer`によって直ちに文字列へ正規化され、以降の処理は文字列のみを扱います。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum CellValue {
    /// 文字列
    Text(String),

    /// 数値（f64）
    Number(f64),

    /// 日付・日時
    Date(NaiveDateTime),

    /// 空セル
    Missing,
}

impl CellValue {
    /// 値が空（欠損、または空白のみの文字列）かどうかを判定
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Missing => true,
            CellValue::Text(s) => s.trim().is_empty(),
            CellValue::Number(_) | CellValue::Date(_) => false,
        }
    }
}

static MISSING: CellValue = CellValue::Missing;

/// 行指向のテーブル
///
/// ヘッダー行で決まる列集合をすべての行が共有します。
/// 各行のセル数は常にヘッダーの列数と一致します。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl Table {
    /// ヘッダーと行から新しいテーブルを生成
    ///
    /// 列数が足りない行は`CellValue::Missing`で埋め、余分なセルは切り捨てます。
    pub fn new(headers: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, CellValue::Missing);
                row
            })
            .collect();
        Self { headers, rows }
    }

    /// ヘッダー名のリスト
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// データ行数
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// データ行が1件もないかどうか
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 列名から列インデックスを取得（同名の列がある場合は最初の列）
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// 列が存在するかどうか
    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// 行を入力順に走査
    pub fn rows(&self) -> impl Iterator<Item = TableRow<'_>> {
        self.rows.iter().map(move |cells| TableRow {
            table: self,
            cells,
        })
    }

    /// 先頭から最大`n`行を返す（プレビュー用）
    pub fn head(&self, n: usize) -> &[Vec<CellValue>] {
        &self.rows[..n.min(self.rows.len())]
    }
}

/// テーブルの1行への参照
#[derive(Debug, Clone, Copy)]
pub struct TableRow<'a> {
    table: &'a Table,
    cells: &'a [CellValue],
}

impl<'a> TableRow<'a> {
    /// 列名でセルを取得
    ///
    /// 列が存在しない場合は`CellValue::Missing`を返します。
    pub fn get(&self, column: &str) -> &'a CellValue {
        self.table
            .column_index(column)
            .and_then(|idx| self.cells.get(idx))
            .unwrap_or(&MISSING)
    }

    /// 行のセルをヘッダー順で返す
    pub fn cells(&self) -> &'a [CellValue] {
        self.cells
    }
}

/// 1件の作品レコード（正規化済み）
///
/// 4つのフィールドはいずれもプレーンな文字列で、空文字列の場合があります。
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Record {
    title: String,
    artist: String,
    creation_date: String,
    description: String,
}

impl Record {
    /// 新しいレコードを生成
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        creation_date: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            creation_date: creation_date.into(),
            description: description.into(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn artist(&self) -> &str {
        &self.artist
    }

    pub fn creation_date(&self) -> &str {
        &self.creation_date
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}
