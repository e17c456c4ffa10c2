//! Property Tests for lookup and rendering
//!
//! Checks the length/order guarantees of `lookup` and the block structure of
//! the rendered document over generated datasets and name lists.

use bank_nodal::{lookup, CellValue, Dataset, GeneratorBuilder, OutputFormat, ResultRecord};
use proptest::prelude::*;

fn headers() -> Vec<String> {
    ["Bank Name", "Customer Email", "Nodal Email", "Grievance Email"]
        .iter()
        .map(|h| h.to_string())
        .collect()
}

fn cell() -> impl Strategy<Value = CellValue> {
    prop_oneof![
        "[a-z]{1,8}@[a-z]{1,6}\\.com".prop_map(CellValue::Text),
        Just(CellValue::Null),
    ]
}

fn row() -> impl Strategy<Value = Vec<CellValue>> {
    (
        "[A-Za-z]{1,6}( [A-Za-z]{1,6})?",
        cell(),
        cell(),
        cell(),
    )
        .prop_map(|(name, customer, nodal, grievance)| {
            vec![CellValue::Text(name), customer, nodal, grievance]
        })
}

fn dataset() -> impl Strategy<Value = Dataset> {
    prop::collection::vec(row(), 0..12).prop_map(|rows| Dataset::new(headers(), rows))
}

/// 参照実装: 最初に一致した行を線形に探す
fn expected_record(dataset: &Dataset, name: &str) -> ResultRecord {
    let needle = name.to_lowercase();
    dataset
        .rows()
        .iter()
        .find(|row| {
            row[0]
                .as_text()
                .map(|s| s.to_lowercase() == needle)
                .unwrap_or(false)
        })
        .map(|row| ResultRecord {
            bank_name: name.to_string(),
            customer_email: row[1].display().to_string(),
            nodal_email: row[2].display().to_string(),
            grievance_email: row[3].display().to_string(),
        })
        .unwrap_or_else(|| ResultRecord::not_found(name))
}

proptest! {
    #[test]
    fn lookup_preserves_length_and_order(
        dataset in dataset(),
        names in prop::collection::vec("[A-Za-z ]{0,10}", 0..8),
    ) {
        let records = lookup(&dataset, &names).unwrap();
        prop_assert_eq!(records.len(), names.len());
        for (record, name) in records.iter().zip(&names) {
            prop_assert_eq!(&record.bank_name, name);
        }
    }

    #[test]
    fn lookup_matches_first_row_case_insensitively(
        dataset in dataset(),
        picks in prop::collection::vec(any::<prop::sample::Index>(), 1..6),
        upper in any::<bool>(),
    ) {
        prop_assume!(!dataset.is_empty());

        // データセット内の銀行名を大文字/小文字に変えて照合
        let names: Vec<String> = picks
            .iter()
            .map(|idx| {
                let name = dataset.rows()[idx.index(dataset.len())][0].display().to_string();
                if upper { name.to_uppercase() } else { name.to_lowercase() }
            })
            .collect();

        let records = lookup(&dataset, &names).unwrap();
        for (record, name) in records.iter().zip(&names) {
            prop_assert_eq!(record, &expected_record(&dataset, name));
        }
    }

    #[test]
    fn unmatched_names_have_empty_emails(
        dataset in dataset(),
        names in prop::collection::vec("[0-9]{1,6}", 1..5),
    ) {
        // 銀行名は英字のみなので数字の名前は一致しない
        let records = lookup(&dataset, &names).unwrap();
        for record in &records {
            prop_assert!(record.is_empty());
        }
    }

    #[test]
    fn text_render_emits_one_block_per_record(
        dataset in dataset(),
        names in prop::collection::vec("[A-Za-z]{1,8}", 0..6),
    ) {
        let generator = GeneratorBuilder::new()
            .with_output_format(OutputFormat::Text)
            .build()
            .unwrap();
        let output = String::from_utf8(generator.generate(&dataset, &names).unwrap()).unwrap();

        let bank_lines: Vec<&str> = output
            .lines()
            .filter(|line| line.starts_with("Bank Name: "))
            .collect();
        prop_assert_eq!(bank_lines.len(), names.len());
        for (line, name) in bank_lines.iter().zip(&names) {
            prop_assert_eq!(*line, format!("Bank Name: {}", name));
        }
        // 見出し + 空行 + レコードごとに5行
        prop_assert_eq!(output.lines().count(), 2 + names.len() * 5);
    }
}
