//! Public API Types
//!
//! 公開APIで使用する列挙型を定義するモジュール。

/// シート選択方式
///
/// データセットとして読み込むシートを指定します。
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SheetSelector {
    /// インデックス指定（0始まり、デフォルトは最初のシート）
    ///
    /// 例: `SheetSelector::Index(0)`
    Index(usize),

    /// シート名指定
    ///
    /// 例: `SheetSelector::Name("Sheet1".to_string())`
    Name(String),
}

impl Default for SheetSelector {
    fn default() -> Self {
        SheetSelector::Index(0)
    }
}

/// 出力フォーマット
///
/// 照合結果を出力する際の形式を指定します。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum OutputFormat {
    /// Word文書（.docx）形式（デフォルト）
    ///
    /// 見出し1つと、銀行ごとの4行ブロック（各ブロックの後に空段落）を出力します。
    #[default]
    Docx,

    /// プレーンテキスト形式
    ///
    /// # 出力例
    ///
    /// ```text
    /// # Banks Email (Nodal)
    ///
    /// Bank Name: ABC Bank
    /// Customer Email: cs@abc.com
    /// Nodal Email:
    /// Grievance Email: grv@abc.com
    ///
    /// ```
    Text,

    /// JSON形式
    ///
    /// 結果レコードの配列を出力します。キーは列名です。
    Json,
}

impl OutputFormat {
    /// ダウンロード時の固定ファイル名
    pub fn file_name(&self) -> &'static str {
        match self {
            OutputFormat::Docx => "Banks_Email_Nodal.docx",
            OutputFormat::Text => "Banks_Email_Nodal.txt",
            OutputFormat::Json => "Banks_Email_Nodal.json",
        }
    }

    /// 出力のMIMEタイプ
    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            OutputFormat::Text => "text/plain; charset=utf-8",
            OutputFormat::Json => "application/json",
        }
    }
}
