//! Parser Module
//!
//! calamineを使用したスプレッドシート解析の実装。
//! アップロードされたペイロードを行指向のテーブルに変換します。

mod workbook;

pub(crate) use workbook::TableLoader;
