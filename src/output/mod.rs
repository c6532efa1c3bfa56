//! Output Module
//!
//! 組み立て済みドキュメントのシリアライズと、呼び出し側に渡す成果物の型を提供するモジュール。

mod docx;

pub(crate) use docx::DocxSerializer;

/// DOCXのMIMEタイプ
pub const DOCX_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// 生成結果
///
/// DOCXのバイト列と、ダウンロード時に提案するファイル名の組です。
/// 一度生成された後は変更されません。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputArtifact {
    bytes: Vec<u8>,
    file_name: String,
}

impl OutputArtifact {
    pub(crate) fn new(bytes: Vec<u8>, file_name: String) -> Self {
        Self { bytes, file_name }
    }

    /// DOCXのバイト列
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// 提案するファイル名（`{base}.docx`）
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// バイト列のMIMEタイプ
    pub fn mime_type(&self) -> &'static str {
        DOCX_MIME_TYPE
    }

    /// バイト列の所有権を取り出す
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}
