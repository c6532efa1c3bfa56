//! Schema Validator Module
//!
//! 読み込んだテーブルが空でないこと、必須列がすべて揃っていることを検証します。

use log::warn;

use crate::error::CartelError;
use crate::types::Table;

/// スキーマバリデーター
#[derive(Debug)]
pub(crate) struct SchemaValidator<'a> {
    required: &'a [&'a str],
}

impl<'a> SchemaValidator<'a> {
    pub fn new(required: &'a [&'a str]) -> Self {
        Self { required }
    }

    /// テーブルを検証する
    ///
    /// 空であるかを先に判定し、データ行がある場合のみ列の検証を行います。
    ///
    /// # 戻り値
    ///
    /// * `Ok(Table)` - 検証済みのテーブル（変更なし）
    /// * `Err(CartelError::EmptyInput)` - データ行が0件の場合
    /// * `Err(CartelError::Schema)` - 必須列が欠けている場合。欠けている列をすべて含む
    pub fn validate(&self, table: Table) -> Result<Table, CartelError> {
        if table.is_empty() {
            warn!("spreadsheet has a header but no data rows");
            return Err(CartelError::EmptyInput);
        }

        let missing: Vec<String> = self
            .required
            .iter()
            .filter(|name| !table.has_column(name))
            .map(|name| name.to_string())
            .collect();

        if !missing.is_empty() {
            warn!("missing required columns: {}", missing.join(", "));
            return Err(CartelError::Schema { missing });
        }

        Ok(table)
    }
}
