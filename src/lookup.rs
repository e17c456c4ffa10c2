//! Record Lookup Module
//!
//! 要求された銀行名をデータセットと照合し、結果レコードを生成するモジュール。
//!
//! 照合ルール:
//! - 大文字小文字を区別しない完全一致のみ（部分一致・あいまい一致なし）
//! - 同名の行が複数ある場合はデータセット順で最初の行を採用
//! - 一致しない場合は空のメールアドレスを持つレコード（エラーではない）

use tracing::debug;

use crate::dataset::Dataset;
use crate::error::NodalError;
use crate::types::{ResultRecord, REQUIRED_COLUMNS};

/// 必須列のインデックス
struct ColumnIndices {
    bank_name: usize,
    customer_email: usize,
    nodal_email: usize,
    grievance_email: usize,
}

impl ColumnIndices {
    fn resolve(dataset: &Dataset) -> Result<Self, NodalError> {
        let mut indices = [0usize; 4];
        for (slot, column) in indices.iter_mut().zip(REQUIRED_COLUMNS) {
            *slot = dataset.require_column(column)?;
        }
        let [bank_name, customer_email, nodal_email, grievance_email] = indices;
        Ok(Self {
            bank_name,
            customer_email,
            nodal_email,
            grievance_email,
        })
    }
}

/// 銀行名のリストをデータセットと照合する
///
/// # 引数
///
/// * `dataset` - 銀行連絡先のデータセット
/// * `names` - 要求された銀行名（順序と重複はそのまま保持される）
///
/// # 戻り値
///
/// * `Ok(Vec<ResultRecord>)` - `names`と同じ長さ・同じ順序の結果レコード
/// * `Err(NodalError::MissingColumn)` - 必須列がデータセットにない場合
///
/// # 使用例
///
/// ```rust
/// use bank_nodal::{lookup, CellValue, Dataset};
///
/// let dataset = Dataset::new(
///     vec![
///         "Bank Name".to_string(),
///         "Customer Email".to_string(),
///         "Nodal Email".to_string(),
///         "Grievance Email".to_string(),
///     ],
///     vec![vec![
///         CellValue::Text("ABC Bank".to_string()),
///         CellValue::Text("cs@abc.com".to_string()),
///         CellValue::Null,
///         CellValue::Text("grv@abc.com".to_string()),
///     ]],
/// );
///
/// let records = lookup(&dataset, &["abc bank", "XYZ Bank"]).unwrap();
/// assert_eq!(records[0].bank_name, "abc bank");
/// assert_eq!(records[0].customer_email, "cs@abc.com");
/// assert!(records[1].is_empty());
/// ```
pub fn lookup<S: AsRef<str>>(
    dataset: &Dataset,
    names: &[S],
) -> Result<Vec<ResultRecord>, NodalError> {
    let columns = ColumnIndices::resolve(dataset)?;

    // 行ごとの小文字化は1回だけ行う
    let keys: Vec<Option<String>> = (0..dataset.len())
        .map(|row| {
            dataset
                .cell(row, columns.bank_name)
                .as_text()
                .map(str::to_lowercase)
        })
        .collect();

    let records: Vec<ResultRecord> = names
        .iter()
        .map(|name| {
            let name = name.as_ref();
            let needle = name.to_lowercase();
            match keys.iter().position(|key| key.as_deref() == Some(&needle)) {
                Some(row) => ResultRecord {
                    bank_name: name.to_string(),
                    customer_email: dataset
                        .cell(row, columns.customer_email)
                        .display()
                        .to_string(),
                    nodal_email: dataset.cell(row, columns.nodal_email).display().to_string(),
                    grievance_email: dataset
                        .cell(row, columns.grievance_email)
                        .display()
                        .to_string(),
                },
                None => ResultRecord::not_found(name),
            }
        })
        .collect();

    debug!(
        requested = records.len(),
        matched = records.iter().filter(|r| !r.is_empty()).count(),
        "lookup finished"
    );

    Ok(records)
}

/// カンマ区切りの入力を銀行名のリストに分割する
///
/// 各要素の前後の空白は除去されます。除去後に空になった要素も
/// 空文字列の検索語として残ります（一致しないレコードになる）。
/// 空文字列の入力のみ空のリストを返します。空白だけの入力は
/// 空文字列ひとつの検索語になります。
///
/// ```rust
/// use bank_nodal::parse_names;
///
/// assert_eq!(parse_names("ABC Bank, XYZ Bank"), vec!["ABC Bank", "XYZ Bank"]);
/// assert_eq!(parse_names("a, ,b"), vec!["a", "", "b"]);
/// assert_eq!(parse_names("  "), vec![""]);
/// assert!(parse_names("").is_empty());
/// ```
pub fn parse_names(input: &str) -> Vec<String> {
    if input.is_empty() {
        return Vec::new();
    }
    input.split(',').map(|name| name.trim().to_string()).collect()
}
