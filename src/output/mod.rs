//! Output Format Module
//!
//! Strategy Patternによる出力フォーマットの抽象化を提供するモジュール。

mod docx;
mod formatters;

use chrono::{DateTime, Utc};
use std::io::Write;

use crate::error::NodalError;
use crate::types::ResultRecord;

pub use docx::DocxFormatter;
pub use formatters::*;

/// 文書の見出し（固定値）
pub const DEFAULT_TITLE: &str = "Banks Email (Nodal)";

/// 文書生成時のオプション
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DocumentOptions {
    /// 見出しの文字列
    pub title: String,

    /// パッケージのメタデータに埋め込む作成日時
    ///
    /// Noneの場合は生成時の現在時刻を使用します。
    pub timestamp: Option<DateTime<Utc>>,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            timestamp: None,
        }
    }
}

/// 出力フォーマッター（Strategy Pattern）
///
/// 各出力フォーマット（DOCX, テキスト, JSON）をenumとして表現します。
#[derive(Debug, Clone, Copy)]
pub(crate) enum OutputFormatter {
    Docx,
    Text,
    Json,
}

impl OutputFormatter {
    /// 出力フォーマットからフォーマッターを生成
    pub fn from_format(format: crate::api::OutputFormat) -> Self {
        match format {
            crate::api::OutputFormat::Docx => OutputFormatter::Docx,
            crate::api::OutputFormat::Text => OutputFormatter::Text,
            crate::api::OutputFormat::Json => OutputFormatter::Json,
        }
    }

    /// 結果レコードを指定されたフォーマットで出力する
    ///
    /// # 引数
    ///
    /// * `records` - 出力する結果レコード（この順序で出力される）
    /// * `options` - 見出しとタイムスタンプ
    /// * `writer` - 出力先のライター
    pub fn render<W: Write>(
        &self,
        records: &[ResultRecord],
        options: &DocumentOptions,
        writer: &mut W,
    ) -> Result<(), NodalError> {
        match self {
            OutputFormatter::Docx => DocxFormatter.render(records, options, writer),
            OutputFormatter::Text => TextFormatter.render(records, options, writer),
            OutputFormatter::Json => JsonFormatter.render(records, options, writer),
        }
    }
}

/// 結果レコードをDOCX形式のバイト列に変換する
///
/// 見出し「Banks Email (Nodal)」の後に、レコードごとに4行のブロックと
/// 空段落を1つ出力します。
///
/// ```rust
/// use bank_nodal::{render, ResultRecord};
///
/// let bytes = render(&[ResultRecord::not_found("XYZ Bank")]).unwrap();
/// assert_eq!(&bytes[..2], b"PK");
/// ```
pub fn render(records: &[ResultRecord]) -> Result<Vec<u8>, NodalError> {
    let mut buffer = Vec::new();
    OutputFormatter::Docx.render(records, &DocumentOptions::default(), &mut buffer)?;
    Ok(buffer)
}
