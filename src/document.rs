//! Document Module
//!
//! 出力ドキュメントの抽象モデルと、レコード列からドキュメントを組み立てる
//! `DocumentAssembler`を提供するモジュール。
//! ブロックモデルは特定の文書フォーマットに依存せず、シリアライザーが一様に消費します。

use log::debug;
use serde::Serialize;

use crate::api::PageSize;
use crate::render::RecordRenderer;
use crate::types::Record;

/// メイン見出しのフォントサイズ（pt）
pub(crate) const MAIN_HEADING_SIZE_PT: f32 = 20.0;

/// 段落の配置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    /// 左揃え（デフォルト）
    #[default]
    Left,
    /// 中央揃え
    Center,
}

/// テキストの書式
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TextStyle {
    /// 太字
    pub bold: bool,
    /// 斜体
    pub italic: bool,
    /// フォントサイズ（pt）
    pub size_pt: f32,
    /// 段落の配置
    pub alignment: Alignment,
}

impl TextStyle {
    /// 指定サイズの標準書式
    pub fn plain(size_pt: f32) -> Self {
        Self {
            bold: false,
            italic: false,
            size_pt,
            alignment: Alignment::Left,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn centered(mut self) -> Self {
        self.alignment = Alignment::Center;
        self
    }

    /// フォントサイズを半ポイント単位で返す
    pub fn size_half_points(&self) -> u32 {
        (self.size_pt * 2.0).round() as u32
    }
}

/// ドキュメントを構成するブロック
///
/// 1つのブロックは、書式付きの1段落または区切り線です。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StyledBlock {
    /// 見出し（メイン見出し、作品名）
    Heading { text: String, style: TextStyle },

    /// 本文（作家・制作年、解説文）
    Body { text: String, style: TextStyle },

    /// 水平線
    Rule,

    /// 空段落
    Spacer,
}

impl StyledBlock {
    /// ブロックのテキスト（区切り線と空段落は`None`）
    pub fn text(&self) -> Option<&str> {
        match self {
            StyledBlock::Heading { text, .. } | StyledBlock::Body { text, .. } => Some(text),
            StyledBlock::Rule | StyledBlock::Spacer => None,
        }
    }

    /// ブロックの書式（区切り線と空段落は`None`）
    pub fn style(&self) -> Option<&TextStyle> {
        match self {
            StyledBlock::Heading { style, .. } | StyledBlock::Body { style, .. } => Some(style),
            StyledBlock::Rule | StyledBlock::Spacer => None,
        }
    }
}

/// 組み立て済みのドキュメント
///
/// ブロックの順序付き列と、ドキュメント全体の設定（タイトル、余白、用紙サイズ）を保持します。
/// 組み立て後は変更されません。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    title: String,
    margin_cm: f64,
    page_size: PageSize,
    blocks: Vec<StyledBlock>,
}

impl Document {
    /// ドキュメントのタイトル（メタデータ）
    pub fn title(&self) -> &str {
        &self.title
    }

    /// 上下左右に一様に適用される余白（cm）
    pub fn margin_cm(&self) -> f64 {
        self.margin_cm
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    pub fn blocks(&self) -> &[StyledBlock] {
        &self.blocks
    }
}

/// ドキュメントアセンブラー
///
/// ドキュメント全体の設定を保持し、各レコードの描画結果を入力順に連結します。
/// 自身の失敗モードはありません。
#[derive(Debug, Clone)]
pub(crate) struct DocumentAssembler {
    title: String,
    margin_cm: f64,
    page_size: PageSize,
    renderer: RecordRenderer,
}

impl DocumentAssembler {
    pub fn new(
        title: impl Into<String>,
        margin_cm: f64,
        page_size: PageSize,
        renderer: RecordRenderer,
    ) -> Self {
        Self {
            title: title.into(),
            margin_cm,
            page_size,
            renderer,
        }
    }

    /// レコード列からドキュメントを組み立てる
    ///
    /// # 処理フロー
    ///
    /// 1. ドキュメントのメタデータ（タイトル、余白、用紙サイズ）を設定
    /// 2. 中央揃え・太字・20ptのメイン見出しと空段落を追加
    /// 3. 各レコードのブロックを入力順に追加
    pub fn assemble(&self, records: &[Record]) -> Document {
        let mut blocks = Vec::with_capacity(2 + records.len() * 6);

        blocks.push(StyledBlock::Heading {
            text: self.title.clone(),
            style: TextStyle::plain(MAIN_HEADING_SIZE_PT).bold().centered(),
        });
        blocks.push(StyledBlock::Spacer);

        for record in records {
            blocks.extend(self.renderer.render(record));
        }

        debug!(
            "assembled document: {} records, {} blocks",
            records.len(),
            blocks.len()
        );

        Document {
            title: self.title.clone(),
            margin_cm: self.margin_cm,
            page_size: self.page_size,
            blocks,
        }
    }
}
