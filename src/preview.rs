//! Dataset Preview Module
//!
//! データセットの先頭行をMarkdownテーブルとして出力するモジュール。
//! 読み込んだデータセットを生成前に目視確認するために使用します。

use std::io::Write;
use unicode_width::UnicodeWidthStr;

use crate::dataset::Dataset;
use crate::error::NodalError;

/// プレビューのデフォルト行数
pub const DEFAULT_PREVIEW_ROWS: usize = 5;

/// データセットの先頭`rows`行をMarkdownテーブルとして出力する
///
/// ヘッダー行、区切り行、データ行の順に出力します。列幅は表示幅
/// （全角文字は2）で揃えます。ヘッダーがない場合は何も出力しません。
///
/// # 出力例
///
/// ```markdown
/// | Bank Name | Customer Email |
/// |-----------|----------------|
/// | ABC Bank  | cs@abc.com     |
/// ```
pub fn render_preview<W: Write>(
    dataset: &Dataset,
    rows: usize,
    writer: &mut W,
) -> Result<(), NodalError> {
    let cols = dataset.headers().len();
    if cols == 0 {
        return Ok(());
    }

    // 1. 表示用の文字列に変換
    let mut table: Vec<Vec<String>> = Vec::with_capacity(rows + 1);
    table.push(dataset.headers().iter().map(|h| escape_cell(h)).collect());
    for row in dataset.head(rows) {
        table.push(
            (0..cols)
                .map(|col| escape_cell(row.get(col).map(|v| v.display()).unwrap_or("")))
                .collect(),
        );
    }

    // 2. 列幅の計算（最小幅は3文字）
    let mut widths = vec![3; cols];
    for row in &table {
        for (col_idx, content) in row.iter().enumerate() {
            widths[col_idx] = widths[col_idx].max(content.width());
        }
    }

    // 3. 各行の出力
    for (row_idx, row) in table.iter().enumerate() {
        write!(writer, "|")?;
        for (content, &width) in row.iter().zip(&widths) {
            let padding = width.saturating_sub(content.width());
            write!(writer, " {}{} |", content, " ".repeat(padding))?;
        }
        writeln!(writer)?;

        if row_idx == 0 {
            let separator: String = widths
                .iter()
                .map(|&w| format!("{}|", "-".repeat(w + 2)))
                .collect();
            writeln!(writer, "|{}", separator)?;
        }
    }

    writer.flush()?;
    Ok(())
}

/// セル内容をテーブル用にエスケープ（前後の空白を除去し、`|`と改行を置換）
fn escape_cell(content: &str) -> String {
    content
        .trim()
        .replace('|', "\\|")
        .replace("\r\n", " ")
        .replace(['\n', '\r'], " ")
}
