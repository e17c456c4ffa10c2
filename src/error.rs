//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーの自動変換とメッセージフォーマットを実現する。

use thiserror::Error;

/// bank-nodalクレート全体で使用するエラー型
///
/// データセットの読み込み、照合、文書生成の各段階で発生する
/// すべてのエラーを統一的に扱うために使用されます。
///
/// # エラーの種類
///
/// - `DatasetUnavailable`: データセットのファイルが存在しない
/// - `Parse`: スプレッドシートの解析に失敗した（calamine由来）
/// - `MissingColumn`: 必須列がヘッダー行に存在しない
/// - `Config`: 設定の検証に失敗した
/// - `SecurityViolation`: 入力サイズ制限に違反した
///
/// 銀行名が見つからないことはエラーではありません。空のメールアドレスを持つ
/// 結果レコードとして表現されます。
#[derive(Error, Debug)]
pub enum NodalError {
    /// I/O操作中に発生したエラー
    ///
    /// `#[from]`属性により、`std::io::Error`から自動的に変換されます。
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// データセットのファイルが見つからない
    ///
    /// 照合処理の前にリクエストを中断します。利用者が正しいパスを
    /// 指定し直すことで回復できます。
    #[error("Dataset not found: '{path}'. Please check the file path.")]
    DatasetUnavailable {
        /// 指定されたデータセットのパス
        path: String,
    },

    /// スプレッドシートの解析中に発生したエラー
    ///
    /// ファイル形式が不正、破損したファイルなどが原因となります。
    #[error("Failed to parse spreadsheet: {0}")]
    Parse(#[from] calamine::Error),

    /// 必須列がデータセットに存在しない
    ///
    /// リクエスト全体にとって致命的なエラーです（銀行名ごとではありません）。
    #[error("Required column '{column}' is missing from the dataset")]
    MissingColumn {
        /// 見つからなかった列名
        column: String,
    },

    /// ZIPアーカイブの書き込みエラー
    ///
    /// DOCXコンテナ（ZIPアーカイブ）の生成中に発生したエラーです。
    #[error("ZIP archive error: {0}")]
    Zip(String),

    /// XMLの書き込みエラー
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// JSONのシリアライズエラー
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// 設定の検証に失敗したエラー
    ///
    /// `GeneratorBuilder::build()`時の検証、またはシート選択の失敗で発生します。
    #[error("Configuration error: {0}")]
    Config(String),

    /// セキュリティ制限に違反したエラー
    ///
    /// 入力ファイルサイズの上限を超えた場合などに発生します。
    #[error("Security violation: {0}")]
    SecurityViolation(String),
}

impl From<zip::result::ZipError> for NodalError {
    fn from(e: zip::result::ZipError) -> Self {
        NodalError::Zip(e.to_string())
    }
}
