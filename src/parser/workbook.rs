//! Workbook Parser
//!
//! calamineのラッパーとして、ワークブックを開いてシートを`Dataset`に変換します。

use calamine::{open_workbook_auto_from_rs, Data, Reader, Sheets};
use chrono::{Duration, NaiveDate};
use std::io::{Cursor, Read};
use tracing::debug;

use crate::api::SheetSelector;
use crate::dataset::Dataset;
use crate::error::NodalError;
use crate::security::SecurityConfig;
use crate::types::CellValue;

/// ワークブックパーサー
///
/// 入力全体をメモリに読み込み、calamineの自動判定で開きます
/// （xlsx / xlsm / xlsb / xls / ods）。
pub(crate) struct WorkbookParser {
    workbook: Sheets<Cursor<Vec<u8>>>,
}

impl WorkbookParser {
    /// ワークブックを開く
    ///
    /// # 引数
    ///
    /// * `reader` - スプレッドシートを読み込むためのリーダー
    /// * `security` - 入力サイズの制限
    ///
    /// # 戻り値
    ///
    /// * `Ok(WorkbookParser)` - 読み込みに成功した場合
    /// * `Err(NodalError::SecurityViolation)` - 入力サイズが上限を超えた場合
    /// * `Err(NodalError::Parse)` - スプレッドシートとして解析できない場合
    pub fn open<R: Read>(mut reader: R, security: &SecurityConfig) -> Result<Self, NodalError> {
        let mut buffer = Vec::new();
        let bytes_read = reader.read_to_end(&mut buffer)?;
        security.check_input_size(bytes_read as u64)?;

        debug!(bytes = bytes_read, "opening workbook");
        let workbook = open_workbook_auto_from_rs(Cursor::new(buffer))?;

        Ok(Self { workbook })
    }

    /// すべてのシート名を取得
    pub fn get_sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names()
    }

    /// シート選択方式に基づいてシート名を決定
    ///
    /// # 戻り値
    ///
    /// * `Ok(String)` - 選択されたシート名
    /// * `Err(NodalError::Config)` - シートが見つからない、またはインデックスが範囲外の場合
    pub fn select_sheet(&self, selector: &SheetSelector) -> Result<String, NodalError> {
        let all_sheet_names = self.get_sheet_names();

        match selector {
            SheetSelector::Index(index) => all_sheet_names.get(*index).cloned().ok_or_else(|| {
                NodalError::Config(format!(
                    "Sheet index {} is out of range (total: {})",
                    index,
                    all_sheet_names.len()
                ))
            }),
            SheetSelector::Name(name) => {
                if !all_sheet_names.contains(name) {
                    return Err(NodalError::Config(format!("Sheet '{}' not found", name)));
                }
                Ok(name.clone())
            }
        }
    }

    /// シートを読み込み、1行目をヘッダーとする`Dataset`を生成
    ///
    /// 空のシートはヘッダーも行も持たないデータセットになります。
    pub fn read_dataset(&mut self, sheet_name: &str) -> Result<Dataset, NodalError> {
        let range = self.workbook.worksheet_range(sheet_name)?;

        let mut rows = range.rows();
        let headers: Vec<String> = match rows.next() {
            Some(header_row) => header_row
                .iter()
                .map(|cell| convert_cell(cell).display().to_string())
                .collect(),
            None => return Ok(Dataset::default()),
        };

        let data: Vec<Vec<CellValue>> = rows
            .map(|row| row.iter().map(convert_cell).collect())
            .collect();

        debug!(
            sheet = sheet_name,
            columns = headers.len(),
            rows = data.len(),
            "sheet parsed"
        );

        Ok(Dataset::new(headers, data))
    }
}

/// calamineのセル値を`CellValue`に変換
///
/// 空セルとエラーセル（`#N/A`など）はNullになります。
fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::String(s) if s.is_empty() => CellValue::Null,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Int(i) => CellValue::Other(i.to_string()),
        Data::Float(f) => CellValue::Other(f.to_string()),
        Data::Bool(b) => CellValue::Other(if *b { "True" } else { "False" }.to_string()),
        Data::DateTime(dt) => CellValue::Other(format_excel_serial(dt.as_f64())),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Other(s.clone()),
        Data::Error(_) | Data::Empty => CellValue::Null,
    }
}

/// Excelのシリアル値（1900年エポック）を`YYYY-MM-DD HH:MM:SS`形式に変換
fn format_excel_serial(serial: f64) -> String {
    // 1900年のうるう年バグを吸収するため、1899-12-30を起点とする
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30).and_then(|d| d.and_hms_opt(0, 0, 0));
    let millis = (serial * 86_400_000.0).round() as i64;

    epoch
        .and_then(|e| e.checked_add_signed(Duration::milliseconds(millis)))
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| serial.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_cell_text_and_null() {
        assert_eq!(
            convert_cell(&Data::String("cs@abc.com".to_string())),
            CellValue::Text("cs@abc.com".to_string())
        );
        assert_eq!(convert_cell(&Data::String(String::new())), CellValue::Null);
        assert_eq!(convert_cell(&Data::Empty), CellValue::Null);
        assert_eq!(
            convert_cell(&Data::Error(calamine::CellErrorType::NA)),
            CellValue::Null
        );
    }

    #[test]
    fn test_convert_cell_keeps_whitespace() {
        assert_eq!(
            convert_cell(&Data::String("  cs@abc.com ".to_string())),
            CellValue::Text("  cs@abc.com ".to_string())
        );
    }

    #[test]
    fn test_convert_cell_non_text() {
        assert_eq!(
            convert_cell(&Data::Float(12345.0)),
            CellValue::Other("12345".to_string())
        );
        assert_eq!(convert_cell(&Data::Int(7)), CellValue::Other("7".to_string()));
        assert_eq!(
            convert_cell(&Data::Bool(true)),
            CellValue::Other("True".to_string())
        );
    }

    #[test]
    fn test_format_excel_serial() {
        assert_eq!(format_excel_serial(45292.0), "2024-01-01 00:00:00");
        assert_eq!(format_excel_serial(45292.5), "2024-01-01 12:00:00");
    }

    #[test]
    fn test_open_invalid_input() {
        let result = WorkbookParser::open(
            Cursor::new(b"not a spreadsheet".to_vec()),
            &SecurityConfig::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_open_rejects_oversized_input() {
        let result = WorkbookParser::open(
            Cursor::new(vec![0u8; 64]),
            &SecurityConfig::with_max_input_file_size(32),
        );
        assert!(matches!(result, Err(NodalError::SecurityViolation(_))));
    }
}
