//! Dataset Module
//!
//! スプレッドシートから読み込んだ銀行連絡先テーブルを保持するモジュール。
//! 1行目をヘッダー行として扱い、以降の行をデータ行として保持します。

use crate::error::NodalError;
use crate::types::CellValue;

/// 銀行連絡先のデータセット
///
/// 列の存在は読み込み時には検証しません。必須列の検証は照合処理の
/// 開始時に1回だけ行われます。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Dataset {
    headers: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl Dataset {
    /// ヘッダーと行からデータセットを生成
    pub fn new(headers: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Self { headers, rows }
    }

    /// ヘッダー行（列名のリスト）
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// すべてのデータ行
    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    /// データ行数
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 先頭`n`行を取得（プレビュー用）
    pub fn head(&self, n: usize) -> &[Vec<CellValue>] {
        &self.rows[..n.min(self.rows.len())]
    }

    /// 列名から列インデックスを取得
    ///
    /// 同名の列が複数ある場合は最初の列を返します。
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// 必須列のインデックスを取得
    ///
    /// # 戻り値
    ///
    /// * `Ok(usize)` - 列が存在する場合
    /// * `Err(NodalError::MissingColumn)` - 列が存在しない場合
    pub fn require_column(&self, name: &str) -> Result<usize, NodalError> {
        self.column_index(name)
            .ok_or_else(|| NodalError::MissingColumn {
                column: name.to_string(),
            })
    }

    /// セル値を取得
    ///
    /// 行の長さが列数に満たない場合、欠けているセルはNullとして扱います。
    pub fn cell(&self, row: usize, col: usize) -> &CellValue {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&CellValue::Null)
    }
}
