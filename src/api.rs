//! Public API Types
//!
//! 公開APIで使用する列挙型と設定値を定義するモジュール。

use serde::{Deserialize, Serialize};

/// 読み込むシートの選択方式
///
/// ワークブック内のどのシートを作品一覧として扱うかを指定します。
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum SheetSelector {
    /// 最初のシート（デフォルト）
    #[default]
    First,

    /// インデックス指定（0始まり）
    ///
    /// 例: `SheetSelector::Index(1)` は2番目のシートを選択
    Index(usize),

    /// シート名指定
    ///
    /// 例: `SheetSelector::Name("Expo A".to_string())`
    Name(String),
}

/// 用紙サイズ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum PageSize {
    /// A4（210mm × 297mm、デフォルト）
    #[default]
    A4,

    /// US Letter（8.5in × 11in）
    Letter,
}

impl PageSize {
    /// 用紙の幅と高さをtwip（1/20ポイント）で返す
    pub fn dimensions_twips(&self) -> (u32, u32) {
        match self {
            PageSize::A4 => (11_906, 16_838),
            PageSize::Letter => (12_240, 15_840),
        }
    }
}

/// 必須列のヘッダー名
///
/// 入力スプレッドシートのヘッダー行で探す列名です。データに依存しない
/// 設定値として扱い、既定値は英語のヘッダー名です。
///
/// # 使用例
///
/// ```rust
/// use cartelgen::ColumnNames;
///
/// let columns = ColumnNames::french();
/// assert_eq!(columns.title, "Titre de l'œuvre");
/// assert_eq!(columns.required().len(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    /// 作品名の列
    pub title: String,
    /// 作家名の列
    pub artist: String,
    /// 制作年の列
    pub creation_date: String,
    /// 解説文の列
    pub description: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            title: "Title".to_string(),
            artist: "Artist".to_string(),
            creation_date: "Creation Date".to_string(),
            description: "Description".to_string(),
        }
    }
}

impl ColumnNames {
    /// フランス語のヘッダー名のプリセット
    pub fn french() -> Self {
        Self {
            title: "Titre de l'œuvre".to_string(),
            artist: "Artiste".to_string(),
            creation_date: "Date de création".to_string(),
            description: "Description".to_string(),
        }
    }

    /// 必須列名を検証順に返す
    pub fn required(&self) -> [&str; 4] {
        [
            self.title.as_str(),
            self.artist.as_str(),
            self.creation_date.as_str(),
            self.description.as_str(),
        ]
    }
}
