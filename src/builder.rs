//! Builder Module
//!
//! Fluent Builder APIを提供し、`Generator`インスタンスを段階的に構築する。

use chrono::{DateTime, Utc};
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;
use tracing::info;

use crate::api::{OutputFormat, SheetSelector};
use crate::dataset::Dataset;
use crate::error::NodalError;
use crate::lookup::lookup;
use crate::output::{DocumentOptions, OutputFormatter, DEFAULT_TITLE};
use crate::parser::WorkbookParser;
use crate::security::SecurityConfig;

/// 生成処理の設定を保持する内部構造体
#[derive(Debug, Clone)]
pub(crate) struct GeneratorConfig {
    /// シート選択方式
    pub sheet_selector: SheetSelector,

    /// 出力フォーマット
    pub output_format: OutputFormat,

    /// 文書の見出し
    pub title: String,

    /// パッケージのメタデータに埋め込む日時（Noneの場合は現在時刻）
    pub timestamp: Option<DateTime<Utc>>,

    /// 入力サイズの制限
    pub security: SecurityConfig,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            sheet_selector: SheetSelector::default(),
            output_format: OutputFormat::default(),
            title: DEFAULT_TITLE.to_string(),
            timestamp: None,
            security: SecurityConfig::default(),
        }
    }
}

/// Fluent Builder APIを提供する構造体
///
/// すべての設定項目にデフォルト値が設定されており、必要な設定のみを
/// オーバーライドできます。
///
/// # 使用例
///
/// ```rust,no_run
/// use bank_nodal::{GeneratorBuilder, OutputFormat, SheetSelector};
///
/// # fn main() -> Result<(), bank_nodal::NodalError> {
/// let generator = GeneratorBuilder::new()
///     .with_sheet_selector(SheetSelector::Name("Banks".to_string()))
///     .with_output_format(OutputFormat::Docx)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct GeneratorBuilder {
    config: GeneratorConfig,
}

impl GeneratorBuilder {
    /// デフォルト設定を持つビルダーインスタンスを生成する
    ///
    /// # デフォルト設定
    ///
    /// - シート選択: 最初のシート
    /// - 出力フォーマット: DOCX
    /// - 見出し: `Banks Email (Nodal)`
    /// - タイムスタンプ: 生成時の現在時刻
    /// - 入力サイズ上限: 100MB
    pub fn new() -> Self {
        Self::default()
    }

    /// データセットとして読み込むシートを選択する
    pub fn with_sheet_selector(mut self, selector: SheetSelector) -> Self {
        self.config.sheet_selector = selector;
        self
    }

    /// 出力フォーマットを指定する
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.config.output_format = format;
        self
    }

    /// 文書の見出しを変更する
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.config.title = title.into();
        self
    }

    /// パッケージのメタデータに埋め込む日時を固定する
    ///
    /// 同じ入力から常にバイト単位で同一のDOCXを生成したい場合に使用します。
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.config.timestamp = Some(timestamp);
        self
    }

    /// 入力ファイルの最大サイズ（バイト）を指定する
    pub fn with_max_input_size(mut self, bytes: u64) -> Self {
        self.config.security = SecurityConfig::with_max_input_file_size(bytes);
        self
    }

    /// 設定を検証し、`Generator`インスタンスを生成する
    ///
    /// # 発生し得るエラー
    ///
    /// * `NodalError::Config(String)`: 設定の検証に失敗した場合
    ///   * 見出しが空文字列
    ///   * 入力サイズ上限が0
    pub fn build(self) -> Result<Generator, NodalError> {
        if self.config.title.trim().is_empty() {
            return Err(NodalError::Config(
                "Document title must not be empty".to_string(),
            ));
        }

        if self.config.security.max_input_file_size == 0 {
            return Err(NodalError::Config(
                "Maximum input size must be greater than zero".to_string(),
            ));
        }

        Ok(Generator {
            config: self.config,
        })
    }
}

/// 照合と文書生成のファサード
///
/// 1回のリクエストは「データセット読み込み → 照合 → 出力」で完結し、
/// リクエスト間で状態を保持しません。
///
/// # 使用例
///
/// ```rust,no_run
/// use bank_nodal::{parse_names, GeneratorBuilder};
/// use std::fs::File;
///
/// # fn main() -> Result<(), bank_nodal::NodalError> {
/// let generator = GeneratorBuilder::new().build()?;
/// let input = File::open("Bank Nodal Officer Email I.D.xlsx")?;
/// let names = parse_names("ABC Bank, XYZ Bank");
/// let document = generator.submit(input, &names)?;
/// std::fs::write(generator.file_name(), document)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    /// スプレッドシートからデータセットを読み込む
    ///
    /// # 戻り値
    ///
    /// * `Ok(Dataset)` - 読み込みに成功した場合
    /// * `Err(NodalError::Parse)` - スプレッドシートとして解析できない場合
    /// * `Err(NodalError::Config)` - 指定したシートが存在しない場合
    pub fn load_dataset<R: Read>(&self, input: R) -> Result<Dataset, NodalError> {
        let mut parser = WorkbookParser::open(input, &self.config.security)?;
        let sheet_name = parser.select_sheet(&self.config.sheet_selector)?;
        let dataset = parser.read_dataset(&sheet_name)?;

        info!(
            sheet = %sheet_name,
            rows = dataset.len(),
            "dataset loaded"
        );
        Ok(dataset)
    }

    /// パスからデータセットを読み込む
    ///
    /// ファイルが存在しない場合は`NodalError::DatasetUnavailable`を返します。
    pub fn load_dataset_from_path<P: AsRef<Path>>(&self, path: P) -> Result<Dataset, NodalError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => NodalError::DatasetUnavailable {
                path: path.display().to_string(),
            },
            _ => NodalError::Io(e),
        })?;
        self.load_dataset(file)
    }

    /// 読み込み済みのデータセットに対して照合と出力を行う
    ///
    /// # 戻り値
    ///
    /// * `Ok(Vec<u8>)` - 設定された形式の文書バイト列
    /// * `Err(NodalError::MissingColumn)` - 必須列がない場合
    pub fn generate<S: AsRef<str>>(
        &self,
        dataset: &Dataset,
        names: &[S],
    ) -> Result<Vec<u8>, NodalError> {
        let records = lookup(dataset, names)?;

        let options = DocumentOptions {
            title: self.config.title.clone(),
            timestamp: self.config.timestamp,
        };
        let formatter = OutputFormatter::from_format(self.config.output_format);

        let mut output = Vec::new();
        formatter.render(&records, &options, &mut output)?;

        info!(
            records = records.len(),
            bytes = output.len(),
            format = ?self.config.output_format,
            "document generated"
        );
        Ok(output)
    }

    /// データセットの読み込みから文書生成までを1回で行う
    ///
    /// `submit(dataset, names) -> document bytes | error`
    pub fn submit<R: Read, S: AsRef<str>>(
        &self,
        input: R,
        names: &[S],
    ) -> Result<Vec<u8>, NodalError> {
        let dataset = self.load_dataset(input)?;
        self.generate(&dataset, names)
    }

    /// 設定された出力形式の固定ファイル名
    pub fn file_name(&self) -> &'static str {
        self.config.output_format.file_name()
    }

    /// 設定された出力形式のMIMEタイプ
    pub fn mime_type(&self) -> &'static str {
        self.config.output_format.mime_type()
    }
}

/// デフォルト設定で`Generator::submit`を実行する
pub fn submit<R: Read, S: AsRef<str>>(input: R, names: &[S]) -> Result<Vec<u8>, NodalError> {
    GeneratorBuilder::new().build()?.submit(input, names)
}
