//! Security Module
//!
//! 入力サイズの上限と、ユーザーが指定した出力ファイル名の検証を提供します。

use crate::error::CartelError;

/// 出力ファイルの拡張子
pub(crate) const DOCX_EXTENSION: &str = "docx";

/// セキュリティ設定
///
/// ファイル処理時のセキュリティ制限を定義します。
#[derive(Debug, Clone)]
pub(crate) struct SecurityConfig {
    /// 入力ファイルの最大サイズ（バイト）
    /// デフォルト: 200MB（アップロード上限に合わせる）
    pub max_input_file_size: u64,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_input_file_size: 209_715_200, // 200MB
        }
    }
}

impl SecurityConfig {
    /// 入力サイズが上限以内かを検証
    ///
    /// 読み込みは上限+1バイトで打ち切られるため、`bytes_read`は実際のサイズより小さい場合があります。
    pub fn check_input_size(&self, bytes_read: usize) -> Result<(), CartelError> {
        if bytes_read as u64 > self.max_input_file_size {
            return Err(CartelError::Load(format!(
                "Input file size exceeds maximum of {} bytes",
                self.max_input_file_size
            )));
        }
        Ok(())
    }
}

/// ファイル名に使用できない文字かどうか
fn is_forbidden_char(c: char) -> bool {
    matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|') || c.is_control()
}

/// 出力ファイル名の検証と正規化
///
/// パストラバーサルや、主要なOSでファイル名に使えない文字を含む名前を防ぐため、
/// ベース名をトリムし、禁止文字を`_`に置き換えて`{base}.docx`を返します。
/// ベース名がすでに`.docx`で終わっている場合は拡張子を重ねません。
///
/// # 引数
///
/// * `base` - ユーザーが指定したベース名（拡張子なし）
///
/// # 戻り値
///
/// * `Ok(String)` - 拡張子付きのファイル名
/// * `Err(CartelError::Validation)` - トリム後に空になる場合
pub(crate) fn output_file_name(base: &str) -> Result<String, CartelError> {
    let trimmed = base.trim();
    if trimmed.is_empty() {
        return Err(CartelError::Validation(
            "an output file name is required; enter a name for the Word document".to_string(),
        ));
    }

    let mut name: String = trimmed
        .chars()
        .map(|c| if is_forbidden_char(c) { '_' } else { c })
        .collect();

    let suffix = format!(".{}", DOCX_EXTENSION);
    let has_extension = name.len() > suffix.len()
        && name
            .get(name.len() - suffix.len()..)
            .is_some_and(|tail| tail.eq_ignore_ascii_case(&suffix));
    if !has_extension {
        name.push_str(&suffix);
    }

    Ok(name)
}
