//! Builder Module
//!
//! Fluent Builder APIを提供し、`CartelGenerator`インスタンスを段階的に構築する。

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::io::Read;

use crate::api::{ColumnNames, PageSize, SheetSelector};
use crate::document::{Document, DocumentAssembler};
use crate::error::CartelError;
use crate::formatter::FieldSanitizer;
use crate::output::{DocxSerializer, OutputArtifact};
use crate::parser::TableLoader;
use crate::render::{RecordRenderer, DEFAULT_FALLBACK_TITLE};
use crate::schema::SchemaValidator;
use crate::security::output_file_name;
use crate::types::{Record, Table};

/// ドキュメントのタイトルと出力ファイル名の既定値
pub const DEFAULT_TITLE: &str = "Cartels - Expo A";

/// 余白の既定値（cm）
pub const DEFAULT_MARGIN_CM: f64 = 2.0;

/// 余白の最小値（cm）
pub const MIN_MARGIN_CM: f64 = 1.5;

/// 余白の最大値（cm）
pub const MAX_MARGIN_CM: f64 = 3.0;

/// 生成処理の設定
///
/// すべての項目に既定値があり、JSONでは必要な項目だけを指定できます。
///
/// # 使用例
///
/// ```rust
/// use cartelgen::{RenderConfig, CartelGeneratorBuilder};
///
/// # fn main() -> Result<(), cartelgen::CartelError> {
/// let config = RenderConfig::from_json(r#"{ "file_name": "Expo B", "margin_cm": 2.5 }"#)?;
/// let generator = CartelGeneratorBuilder::from_config(config).build()?;
/// assert_eq!(generator.config().title, "Cartels - Expo A");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// 出力ファイルのベース名（拡張子なし）
    pub file_name: String,

    /// 上下左右の余白（cm）
    pub margin_cm: f64,

    /// ドキュメントのタイトル（メタデータとメイン見出し）
    pub title: String,

    /// 作品名が空の場合のラベル
    pub fallback_title: String,

    /// 必須列のヘッダー名
    pub columns: ColumnNames,

    /// 読み込むシート
    pub sheet: SheetSelector,

    /// 用紙サイズ
    pub page_size: PageSize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            file_name: DEFAULT_TITLE.to_string(),
            margin_cm: DEFAULT_MARGIN_CM,
            title: DEFAULT_TITLE.to_string(),
            fallback_title: DEFAULT_FALLBACK_TITLE.to_string(),
            columns: ColumnNames::default(),
            sheet: SheetSelector::First,
            page_size: PageSize::A4,
        }
    }
}

impl RenderConfig {
    /// JSONから設定を読み込む
    ///
    /// 省略された項目には既定値が使われます。
    ///
    /// # 戻り値
    ///
    /// * `Ok(RenderConfig)` - 解析に成功した場合
    /// * `Err(CartelError::Validation)` - JSONが不正な場合
    pub fn from_json(json: &str) -> Result<Self, CartelError> {
        serde_json::from_str(json)
            .map_err(|e| CartelError::Validation(format!("invalid configuration JSON: {}", e)))
    }
}

/// Fluent Builder APIを提供する構造体
///
/// すべての設定項目にデフォルト値が設定されており、必要な設定のみをオーバーライドできます。
///
/// # 使用例
///
/// ```rust,no_run
/// use cartelgen::{CartelGeneratorBuilder, ColumnNames};
///
/// # fn main() -> Result<(), cartelgen::CartelError> {
/// let generator = CartelGeneratorBuilder::new()
///     .with_file_name("Cartels - Expo B")
///     .with_margin_cm(2.5)
///     .with_columns(ColumnNames::french())
///     .with_fallback_title("Sans titre")
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct CartelGeneratorBuilder {
    /// 内部設定（構築中）
    config: RenderConfig,
}

impl CartelGeneratorBuilder {
    /// デフォルト設定を持つビルダーインスタンスを生成する
    ///
    /// # デフォルト設定
    ///
    /// - ファイル名・タイトル: `Cartels - Expo A`
    /// - 余白: 2.0cm
    /// - 作品名の既定ラベル: `Untitled`
    /// - 必須列: `Title`, `Artist`, `Creation Date`, `Description`
    /// - シート: 最初のシート
    /// - 用紙サイズ: A4
    pub fn new() -> Self {
        Self::default()
    }

    /// 既存の設定からビルダーを生成する
    pub fn from_config(config: RenderConfig) -> Self {
        Self { config }
    }

    /// 出力ファイルのベース名を指定する（拡張子なし）
    ///
    /// 空白のみの名前は生成時に`CartelError::Validation`になります。
    pub fn with_file_name(mut self, name: impl Into<String>) -> Self {
        self.config.file_name = name.into();
        self
    }

    /// 上下左右の余白をcmで指定する
    ///
    /// # 制約
    ///
    /// * 1.5cm以上3.0cm以下でなければならない
    /// * 制約違反の場合、`build()`時に`CartelError::Validation`を返す
    pub fn with_margin_cm(mut self, margin_cm: f64) -> Self {
        self.config.margin_cm = margin_cm;
        self
    }

    /// ドキュメントのタイトル（メタデータとメイン見出し）を指定する
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.config.title = title.into();
        self
    }

    /// 作品名が空の場合のラベルを指定する
    pub fn with_fallback_title(mut self, label: impl Into<String>) -> Self {
        self.config.fallback_title = label.into();
        self
    }

    /// 必須列のヘッダー名を指定する
    pub fn with_columns(mut self, columns: ColumnNames) -> Self {
        self.config.columns = columns;
        self
    }

    /// 読み込むシートを指定する
    pub fn with_sheet_selector(mut self, selector: SheetSelector) -> Self {
        self.config.sheet = selector;
        self
    }

    /// 用紙サイズを指定する
    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.config.page_size = page_size;
        self
    }

    /// 設定を検証し、`CartelGenerator`インスタンスを生成する
    ///
    /// # 戻り値
    ///
    /// * `Ok(CartelGenerator)`: 設定が有効な場合
    /// * `Err(CartelError::Validation)`: 余白が範囲外、または数値でない場合
    pub fn build(self) -> Result<CartelGenerator, CartelError> {
        let margin = self.config.margin_cm;
        if !margin.is_finite() || !(MIN_MARGIN_CM..=MAX_MARGIN_CM).contains(&margin) {
            return Err(CartelError::Validation(format!(
                "margin must be between {} and {} cm (got {})",
                MIN_MARGIN_CM, MAX_MARGIN_CM, margin
            )));
        }

        Ok(CartelGenerator::new(self.config))
    }
}

/// 生成処理のファサード
///
/// スプレッドシートからDOCXを生成するためのメインエントリーポイントです。
/// 構築後は変更されず、状態を持たないため、複数のリクエストで再利用できます。
///
/// # 使用例
///
/// ```rust,no_run
/// use cartelgen::CartelGeneratorBuilder;
/// use std::fs::File;
///
/// # fn main() -> Result<(), cartelgen::CartelError> {
/// let generator = CartelGeneratorBuilder::new().build()?;
/// let artifact = generator.generate(File::open("oeuvres.xlsx")?)?;
/// std::fs::write(artifact.file_name(), artifact.bytes())?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct CartelGenerator {
    config: RenderConfig,
    loader: TableLoader,
    sanitizer: FieldSanitizer,
    assembler: DocumentAssembler,
    serializer: DocxSerializer,
}

impl CartelGenerator {
    pub(crate) fn new(config: RenderConfig) -> Self {
        let assembler = DocumentAssembler::new(
            config.title.clone(),
            config.margin_cm,
            config.page_size,
            RecordRenderer::new(config.fallback_title.clone()),
        );
        Self {
            loader: TableLoader::new(),
            sanitizer: FieldSanitizer::new(),
            assembler,
            serializer: DocxSerializer,
            config,
        }
    }

    /// 生成に使用する設定
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// スプレッドシートを読み込み、空でないことと必須列を検証する
    ///
    /// プレビュー表示などのために、生成前のテーブルを取得できます。
    ///
    /// # 戻り値
    ///
    /// * `Ok(Table)` - 検証済みのテーブル
    /// * `Err(CartelError::Load)` / `Err(CartelError::Io)` - 読み込みに失敗した場合
    /// * `Err(CartelError::EmptyInput)` - データ行が0件の場合
    /// * `Err(CartelError::Schema)` - 必須列が欠けている場合
    pub fn load_table<R: Read>(&self, input: R) -> Result<Table, CartelError> {
        let table = self.loader.load(input, &self.config.sheet)?;
        let required = self.config.columns.required();
        SchemaValidator::new(&required).validate(table)
    }

    /// テーブルの各行を正規化済みレコードに変換する（入力順）
    pub fn records(&self, table: &Table) -> Vec<Record> {
        table
            .rows()
            .map(|row| self.sanitizer.record_from_row(&row, &self.config.columns))
            .collect()
    }

    /// レコード列からドキュメントを組み立てる
    pub fn assemble(&self, records: &[Record]) -> Document {
        self.assembler.assemble(records)
    }

    /// スプレッドシートからDOCXを生成する
    ///
    /// # 処理フロー
    ///
    /// 1. スプレッドシートの読み込み
    /// 2. 空テーブル・必須列の検証
    /// 3. 出力ファイル名の検証
    /// 4. 各行の正規化とドキュメントの組み立て
    /// 5. DOCXへのシリアライズ
    ///
    /// いずれかの段階でエラーが発生した場合、以降の処理は行わず、
    /// 部分的な成果物も返しません。
    pub fn generate<R: Read>(&self, input: R) -> Result<OutputArtifact, CartelError> {
        let table = self.load_table(input)?;
        let file_name = self.resolve_file_name()?;

        let records = self.records(&table);
        debug!("sanitized {} records", records.len());

        self.render(&records, file_name)
    }

    /// 正規化済みのレコードから直接DOCXを生成する
    ///
    /// # 戻り値
    ///
    /// * `Ok(OutputArtifact)` - 生成に成功した場合
    /// * `Err(CartelError::EmptyInput)` - レコードが0件の場合
    /// * `Err(CartelError::Validation)` - 出力ファイル名が空白のみの場合
    pub fn generate_from_records(&self, records: &[Record]) -> Result<OutputArtifact, CartelError> {
        if records.is_empty() {
            warn!("no records to render");
            return Err(CartelError::EmptyInput);
        }
        let file_name = self.resolve_file_name()?;
        self.render(records, file_name)
    }

    fn resolve_file_name(&self) -> Result<String, CartelError> {
        output_file_name(&self.config.file_name).map_err(|e| {
            warn!("rejected output file name '{}'", self.config.file_name);
            e
        })
    }

    fn render(&self, records: &[Record], file_name: String) -> Result<OutputArtifact, CartelError> {
        let document = self.assemble(records);
        let artifact = self.serializer.serialize(&document, file_name)?;
        info!(
            "generated '{}' with {} cartels ({} bytes)",
            artifact.file_name(),
            records.len(),
            artifact.bytes().len()
        );
        Ok(artifact)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::StyledBlock;

    #[test]
    fn test_builder_defaults() {
        let builder = CartelGeneratorBuilder::new();
        assert_eq!(builder.config.file_name, "Cartels - Expo A");
        assert_eq!(builder.config.title, "Cartels - Expo A");
        assert_eq!(builder.config.margin_cm, 2.0);
        assert_eq!(builder.config.fallback_title, "Untitled");
        assert_eq!(builder.config.columns, ColumnNames::default());
        assert_eq!(builder.config.sheet, SheetSelector::First);
        assert_eq!(builder.config.page_size, PageSize::A4);
    }

    #[test]
    fn test_builder_method_chaining() {
        let builder = CartelGeneratorBuilder::new()
            .with_file_name("Expo B")
            .with_margin_cm(3.0)
            .with_title("Cartels - Expo B")
            .with_fallback_title("Sans titre")
            .with_columns(ColumnNames::french())
            .with_sheet_selector(SheetSelector::Index(1))
            .with_page_size(PageSize::Letter);

        assert_eq!(builder.config.file_name, "Expo B");
        assert_eq!(builder.config.margin_cm, 3.0);
        assert_eq!(builder.config.title, "Cartels - Expo B");
        assert_eq!(builder.config.fallback_title, "Sans titre");
        assert_eq!(builder.config.columns, ColumnNames::french());
        assert_eq!(builder.config.sheet, SheetSelector::Index(1));
        assert_eq!(builder.config.page_size, PageSize::Letter);
    }

    #[test]
    fn test_build_margin_bounds() {
        for margin in [1.5, 2.0, 2.5, 3.0] {
            assert!(CartelGeneratorBuilder::new()
                .with_margin_cm(margin)
                .build()
                .is_ok());
        }
        for margin in [1.0, 3.5, -2.0, f64::NAN, f64::INFINITY] {
            match CartelGeneratorBuilder::new().with_margin_cm(margin).build() {
                Err(CartelError::Validation(msg)) => assert!(msg.contains("margin")),
                _ => panic!("Expected Validation error for margin {}", margin),
            }
        }
    }

    #[test]
    fn test_config_from_json_partial() {
        let config =
            RenderConfig::from_json(r#"{ "file_name": "Expo C", "page_size": "letter" }"#).unwrap();
        assert_eq!(config.file_name, "Expo C");
        assert_eq!(config.page_size, PageSize::Letter);
        assert_eq!(config.margin_cm, DEFAULT_MARGIN_CM);
        assert_eq!(config.columns, ColumnNames::default());
    }

    #[test]
    fn test_config_from_json_columns() {
        let config = RenderConfig::from_json(
            r#"{ "columns": { "title": "Œuvre" }, "sheet": { "name": "Expo" } }"#,
        )
        .unwrap();
        assert_eq!(config.columns.title, "Œuvre");
        assert_eq!(config.columns.artist, "Artist");
        assert_eq!(config.sheet, SheetSelector::Name("Expo".to_string()));
    }

    #[test]
    fn test_config_from_invalid_json() {
        assert!(matches!(
            RenderConfig::from_json("{ margin_cm: }"),
            Err(CartelError::Validation(_))
        ));
    }

    #[test]
    fn test_generate_from_records_blank_file_name() {
        let generator = CartelGeneratorBuilder::new()
            .with_file_name("   ")
            .build()
            .unwrap();
        let result = generator.generate_from_records(&[Record::new("T", "A", "D", "")]);
        assert!(matches!(result, Err(CartelError::Validation(_))));
    }

    #[test]
    fn test_generate_from_records_empty() {
        let generator = CartelGeneratorBuilder::new().build().unwrap();
        assert!(matches!(
            generator.generate_from_records(&[]),
            Err(CartelError::EmptyInput)
        ));
    }

    #[test]
    fn test_generate_from_records() {
        let generator = CartelGeneratorBuilder::new()
            .with_file_name("Expo D")
            .build()
            .unwrap();
        let artifact = generator
            .generate_from_records(&[Record::new("T", "A", "D", "")])
            .unwrap();
        assert_eq!(artifact.file_name(), "Expo D.docx");
        assert_eq!(&artifact.bytes()[0..2], b"PK");
    }

    #[test]
    fn test_assemble_uses_config() {
        let generator = CartelGeneratorBuilder::new()
            .with_title("Salle 3")
            .with_fallback_title("Sans titre")
            .with_margin_cm(1.5)
            .build()
            .unwrap();
        let document = generator.assemble(&[Record::default()]);
        assert_eq!(document.title(), "Salle 3");
        assert_eq!(document.margin_cm(), 1.5);
        assert_eq!(document.blocks()[0].text(), Some("Salle 3"));
        assert_eq!(document.blocks()[2].text(), Some("Sans titre"));
        assert!(document.blocks().contains(&StyledBlock::Rule));
    }

    #[test]
    fn test_generate_with_invalid_input() {
        let generator = CartelGeneratorBuilder::new().build().unwrap();
        let result = generator.generate(std::io::Cursor::new(Vec::<u8>::new()));
        assert!(matches!(result, Err(CartelError::Load(_))));
    }

    #[test]
    fn test_generator_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CartelGenerator>();
    }
}
