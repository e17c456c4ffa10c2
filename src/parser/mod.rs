//! Parser Module
//!
//! calamineを使用したスプレッドシート解析の実装。
//! 選択したシートを読み込み、`Dataset`に変換します。

mod workbook;

pub(crate) use workbook::WorkbookParser;
