//! bank-nodal - Bank nodal officer email lookup and Word document export
//!
//! このクレートは、銀行の連絡先（カスタマーサービス、ノーダルオフィサー、
//! 苦情処理担当）のメールアドレスをスプレッドシートから検索し、
//! 結果をWord文書（.docx）として出力する機能を提供します。
//!
//! 処理は一方向です: データセット + 銀行名リスト → 結果レコード → 文書バイト列
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::fs::File;
//! use bank_nodal::{parse_names, GeneratorBuilder};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let generator = GeneratorBuilder::new().build()?;
//!
//!     // データセットを読み込む
//!     let input = File::open("Bank Nodal Officer Email I.D.xlsx")?;
//!
//!     // カンマ区切りの銀行名を照合してDOCXを生成
//!     let names = parse_names("State Bank of India, HDFC Bank");
//!     let document = generator.submit(input, &names)?;
//!
//!     std::fs::write(generator.file_name(), document)?;
//!     Ok(())
//! }
//! ```
//!
//! # Lookup and Render Separately
//!
//! ```rust,no_run
//! use bank_nodal::{lookup, render, GeneratorBuilder};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let generator = GeneratorBuilder::new().build()?;
//!     let dataset = generator.load_dataset_from_path("Bank Nodal Officer Email I.D.xlsx")?;
//!
//!     let records = lookup(&dataset, &["abc bank", "XYZ Bank"])?;
//!     for record in &records {
//!         println!("{}: {}", record.bank_name, record.nodal_email);
//!     }
//!
//!     let docx = render(&records)?;
//!     std::fs::write("Banks_Email_Nodal.docx", docx)?;
//!     Ok(())
//! }
//! ```

mod api;
mod builder;
mod dataset;
mod error;
mod lookup;
mod output;
mod parser;
mod preview;
mod security;
mod types;

// 公開API
pub use api::{OutputFormat, SheetSelector};
pub use builder::{submit, Generator, GeneratorBuilder};
pub use dataset::Dataset;
pub use error::NodalError;
pub use lookup::{lookup, parse_names};
pub use output::{render, DEFAULT_TITLE};
pub use preview::{render_preview, DEFAULT_PREVIEW_ROWS};
pub use types::{
    CellValue, ResultRecord, BANK_NAME, CUSTOMER_EMAIL, GRIEVANCE_EMAIL, NODAL_EMAIL,
};
