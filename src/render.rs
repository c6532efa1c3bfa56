//! Record Renderer Module
//!
//! 1件の作品レコードを、書式付きブロックの列（作品名、作家・制作年、解説文、区切り）に変換します。

use crate::document::{StyledBlock, TextStyle};
use crate::types::Record;

/// 作品名のフォントサイズ（pt）
pub(crate) const TITLE_SIZE_PT: f32 = 14.0;

/// 作家・制作年と解説文のフォントサイズ（pt）
pub(crate) const BODY_SIZE_PT: f32 = 11.0;

/// 作家と制作年の区切り
pub(crate) const ATTRIBUTION_SEPARATOR: &str = " — ";

/// 作品名が空の場合の既定ラベル
pub(crate) const DEFAULT_FALLBACK_TITLE: &str = "Untitled";

/// レコードレンダラー
///
/// 失敗モードはなく、どのようなレコードでも少なくとも作品名ブロックと区切りを出力します。
#[derive(Debug, Clone)]
pub(crate) struct RecordRenderer {
    fallback_title: String,
}

impl Default for RecordRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_FALLBACK_TITLE)
    }
}

impl RecordRenderer {
    pub fn new(fallback_title: impl Into<String>) -> Self {
        Self {
            fallback_title: fallback_title.into(),
        }
    }

    /// レコードをブロック列に変換
    ///
    /// # 出力されるブロック（順序どおり）
    ///
    /// 1. 作品名: 太字・14pt。空の場合は既定ラベル
    /// 2. 作家・制作年: 斜体・11pt
    /// 3. 解説文: 11pt。空でない場合のみ
    /// 4. 空段落 + 水平線 + 空段落
    pub fn render(&self, record: &Record) -> Vec<StyledBlock> {
        let mut blocks = Vec::with_capacity(6);

        let title = if record.title().is_empty() {
            self.fallback_title.clone()
        } else {
            record.title().to_string()
        };
        blocks.push(StyledBlock::Heading {
            text: title,
            style: TextStyle::plain(TITLE_SIZE_PT).bold(),
        });

        blocks.push(StyledBlock::Body {
            text: compose_attribution(record.artist(), record.creation_date()),
            style: TextStyle::plain(BODY_SIZE_PT).italic(),
        });

        if !record.description().is_empty() {
            blocks.push(StyledBlock::Body {
                text: record.description().to_string(),
                style: TextStyle::plain(BODY_SIZE_PT),
            });
        }

        blocks.push(StyledBlock::Spacer);
        blocks.push(StyledBlock::Rule);
        blocks.push(StyledBlock::Spacer);

        blocks
    }
}

/// 作家と制作年を区切り記号で連結
///
/// 連結結果の両端から空白とエムダッシュを取り除くため、片方が空の場合に
/// 区切り記号が残ることはありません。フィールド内部のエムダッシュはそのまま残ります。
pub(crate) fn compose_attribution(artist: &str, creation_date: &str) -> String {
    format!("{}{}{}", artist, ATTRIBUTION_SEPARATOR, creation_date)
        .trim_matches(|c| c == ' ' || c == '—')
        .to_string()
}
