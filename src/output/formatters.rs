//! Output Formatters Implementation
//!
//! テキストおよびJSON形式の出力を提供するモジュール。

use std::io::Write;

use super::DocumentOptions;
use crate::error::NodalError;
use crate::types::ResultRecord;

/// プレーンテキスト形式のフォーマッター
///
/// DOCXと同じ構造（見出し、4行ブロック、空行）をテキストで出力します。
pub struct TextFormatter;

impl TextFormatter {
    pub(crate) fn render<W: Write>(
        &self,
        records: &[ResultRecord],
        options: &DocumentOptions,
        writer: &mut W,
    ) -> Result<(), NodalError> {
        writeln!(writer, "# {}", options.title)?;
        writeln!(writer)?;

        for record in records {
            for (label, value) in record.labeled_fields() {
                writeln!(writer, "{}: {}", label, value)?;
            }
            writeln!(writer)?;
        }

        writer.flush()?;
        Ok(())
    }
}

/// JSON形式のフォーマッター
///
/// 結果レコードの配列を整形して出力します。見出しは含みません。
pub struct JsonFormatter;

impl JsonFormatter {
    pub(crate) fn render<W: Write>(
        &self,
        records: &[ResultRecord],
        _options: &DocumentOptions,
        writer: &mut W,
    ) -> Result<(), NodalError> {
        serde_json::to_writer_pretty(&mut *writer, records)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}
