//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーの自動変換とメッセージフォーマットを実現する。

use thiserror::Error;

/// cartelgenクレート全体で使用するエラー型
///
/// スプレッドシートの読み込みから DOCX の書き出しまで、パイプラインの各段階で
/// 発生するエラーを統一的に扱います。いずれのエラーも発生した時点で処理を中断し、
/// 部分的なドキュメントは返しません。
///
/// # エラーの種類
///
/// - `Io`: 入力ストリームの読み込みに失敗した
/// - `Load`: 入力がスプレッドシートとして解析できない
/// - `EmptyInput`: ヘッダー行はあるがデータ行が0件
/// - `Schema`: 必須列が欠けている（欠けている列をすべて列挙）
/// - `Validation`: 出力ファイル名や余白などの設定が不正
/// - `Serialization`: DOCX の書き出し中の内部エラー
///
/// # 使用例
///
/// ```rust,no_run
/// use cartelgen::{CartelError, CartelGeneratorBuilder};
/// use std::fs::File;
///
/// # fn main() -> Result<(), CartelError> {
/// let generator = CartelGeneratorBuilder::new().build()?;
/// match generator.generate(File::open("oeuvres.xlsx")?) {
///     Err(CartelError::Schema { missing }) => {
///         eprintln!("missing columns: {}", missing.join(", "));
///     }
///     Err(e) => eprintln!("{}", e),
///     Ok(artifact) => println!("{} bytes", artifact.bytes().len()),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Error, Debug)]
pub enum CartelError {
    /// I/O操作中に発生したエラー
    ///
    /// `#[from]`属性により、`std::io::Error`から自動的に変換されます。
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// スプレッドシートの解析に失敗したエラー
    ///
    /// コンテナ形式が不正、ヘッダー行が存在しない、シートが見つからない、
    /// 入力サイズが上限を超えている、などが原因となります。
    #[error("Failed to read spreadsheet: {0}")]
    Load(String),

    /// データ行が1件もないエラー
    #[error("The spreadsheet is empty: no data rows below the header")]
    EmptyInput,

    /// 必須列が欠けているエラー
    ///
    /// 最初の1列だけでなく、欠けている列をすべて必須列の順序で保持します。
    #[error("Missing columns: {}", .missing.join(", "))]
    Schema {
        /// 欠けている列名
        missing: Vec<String>,
    },

    /// 設定の検証に失敗したエラー
    ///
    /// 出力ファイル名が空白のみ、余白が範囲外、設定JSONが不正な場合などに発生します。
    #[error("Invalid configuration: {0}")]
    Validation(String),

    /// DOCX の書き出し中に発生した内部エラー
    #[error("Failed to write document: {0}")]
    Serialization(String),
}
