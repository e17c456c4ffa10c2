//! Types Module
//!
//! クレート全体で使用する共通データ型を定義するモジュール。

use serde::Serialize;

/// 銀行名の列
pub const BANK_NAME: &str = "Bank Name";
/// カスタマーサービスのメールアドレス列
pub const CUSTOMER_EMAIL: &str = "Customer Email";
/// ノーダルオフィサーのメールアドレス列
pub const NODAL_EMAIL: &str = "Nodal Email";
/// 苦情処理担当のメールアドレス列
pub const GRIEVANCE_EMAIL: &str = "Grievance Email";

/// データセットに必須の列（照合時に検証）
pub(crate) const REQUIRED_COLUMNS: [&str; 4] =
    [BANK_NAME, CUSTOMER_EMAIL, NODAL_EMAIL, GRIEVANCE_EMAIL];

/// データセットのセル値
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue {
    /// 文字列セル
    Text(String),

    /// 文字列以外の値（数値、論理値、日付）を文字列化したもの
    ///
    /// 銀行名の照合には使用されません。
    Other(String),

    /// 空セルまたはエラーセル
    Null,
}

impl CellValue {
    /// 値がNullかどうかを判定
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// 照合に使用できる文字列を取得（文字列セルのみ）
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// 表示用の文字列を取得（Nullは空文字列）
    pub fn display(&self) -> &str {
        match self {
            CellValue::Text(s) | CellValue::Other(s) => s,
            CellValue::Null => "",
        }
    }
}

/// 照合結果のレコード
///
/// 要求された銀行名ごとに1件生成されます。`bank_name`は利用者が入力した
/// 文字列そのもので、データセット側の表記には正規化されません。
/// 一致しなかった場合、3つのメールアドレスはすべて空文字列になります。
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ResultRecord {
    #[serde(rename = "Bank Name")]
    pub bank_name: String,

    #[serde(rename = "Customer Email")]
    pub customer_email: String,

    #[serde(rename = "Nodal Email")]
    pub nodal_email: String,

    #[serde(rename = "Grievance Email")]
    pub grievance_email: String,
}

impl ResultRecord {
    /// 一致しなかった銀行名のレコードを生成
    pub fn not_found(bank_name: impl Into<String>) -> Self {
        Self {
            bank_name: bank_name.into(),
            ..Self::default()
        }
    }

    /// 3つのメールアドレスがすべて空かどうか
    pub fn is_empty(&self) -> bool {
        self.customer_email.is_empty()
            && self.nodal_email.is_empty()
            && self.grievance_email.is_empty()
    }

    /// 文書に出力する(ラベル, 値)の組を出力順で返す
    pub fn labeled_fields(&self) -> [(&'static str, &str); 4] {
        [
            (BANK_NAME, &self.bank_name),
            (CUSTOMER_EMAIL, &self.customer_email),
            (NODAL_EMAIL, &self.nodal_email),
            (GRIEVANCE_EMAIL, &self.grievance_email),
        ]
    }
}
