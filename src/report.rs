use std::path::Path;

use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use serde_json::Value;
use tabled::{settings::Style, Table, Tabled};

use crate::{
    checker::{display_value, FetchOutcome},
    constants::OUTPUT_HEADERS,
};

fn write_value(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: Option<&Value>,
) -> Result<(), XlsxError> {
    match value {
        None | Some(Value::Null) => {}
        Some(Value::Bool(b)) => {
            worksheet.write_boolean(row, col, *b)?;
        }
        Some(Value::Number(n)) => match n.as_f64() {
            Some(n) => {
                worksheet.write_number(row, col, n)?;
            }
            None => {
                worksheet.write_string(row, col, n.to_string())?;
            }
        },
        Some(Value::String(s)) => {
            worksheet.write_string(row, col, s)?;
        }
        Some(value) => {
            worksheet.write_string(row, col, value.to_string())?;
        }
    }

    Ok(())
}

/// Writes one `Wallet | Balance | Claim` row per outcome under a bold header.
pub fn save_balances_to_excel(
    outcomes: &[FetchOutcome],
    path: impl AsRef<Path>,
) -> eyre::Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    let header = Format::new().set_bold();

    for (col, title) in (0u16..).zip(OUTPUT_HEADERS) {
        worksheet.write_string_with_format(0, col, title, &header)?;
    }

    for (row, outcome) in (1u32..).zip(outcomes) {
        worksheet.write_string(row, 0, &outcome.address)?;
        write_value(worksheet, row, 1, outcome.balance.as_ref())?;
        write_value(worksheet, row, 2, outcome.claim.as_ref())?;
    }

    worksheet.set_column_width(0, 46)?;
    workbook.save(path.as_ref())?;

    Ok(())
}

#[derive(Tabled, Debug)]
struct Entry {
    #[tabled(rename = "Wallet")]
    address: String,
    #[tabled(rename = "Balance")]
    balance: String,
    #[tabled(rename = "Claim")]
    claim: String,
}

pub fn print_summary(outcomes: &[FetchOutcome]) {
    if outcomes.is_empty() {
        return;
    }

    let entries = outcomes.iter().map(|outcome| Entry {
        address: outcome.address.clone(),
        balance: display_value(outcome.balance.as_ref()),
        claim: display_value(outcome.claim.as_ref()),
    });

    let mut table = Table::new(entries);
    let table = table.with(Style::modern_rounded());

    println!("{table}");
}

#[cfg(test)]
mod tests {
    use calamine::{open_workbook_auto, Data, Reader};
    use serde_json::json;

    use super::*;

    #[test]
    fn writes_header_and_typed_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.xlsx");

        let outcomes = vec![
            FetchOutcome {
                address: "0xAAA".to_owned(),
                balance: Some(json!(5)),
                claim: Some(json!(true)),
            },
            FetchOutcome {
                address: "0xBBB".to_owned(),
                balance: Some(json!("1000.25")),
                claim: None,
            },
            FetchOutcome {
                address: "0xCCC".to_owned(),
                balance: Some(json!(0.5)),
                claim: Some(json!({"round": 1})),
            },
        ];

        save_balances_to_excel(&outcomes, &path).unwrap();

        let mut workbook = open_workbook_auto(&path).unwrap();
        let range = workbook.worksheet_range_at(0).unwrap().unwrap();
        let rows: Vec<Vec<Data>> = range.rows().map(|row| row.to_vec()).collect();

        assert_eq!(rows.len(), 4);
        assert!(rows.iter().all(|row| row.len() == 3));
        assert_eq!(
            rows[0],
            vec![
                Data::String("Wallet".to_owned()),
                Data::String("Balance".to_owned()),
                Data::String("Claim".to_owned()),
            ]
        );
        assert_eq!(rows[1][0], Data::String("0xAAA".to_owned()));
        assert_eq!(rows[1][1], Data::Float(5.0));
        assert_eq!(rows[1][2], Data::Bool(true));
        assert_eq!(rows[2][1], Data::String("1000.25".to_owned()));
        assert_eq!(rows[2][2], Data::Empty);
        assert_eq!(rows[3][1], Data::Float(0.5));
        assert_eq!(rows[3][2], Data::String(r#"{"round":1}"#.to_owned()));
    }

    #[test]
    fn empty_result_still_writes_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.xlsx");

        save_balances_to_excel(&[], &path).unwrap();

        let mut workbook = open_workbook_auto(&path).unwrap();
        let range = workbook.worksheet_range_at(0).unwrap().unwrap();

        assert_eq!(range.height(), 1);
        assert_eq!(range.width(), 3);
    }

    #[test]
    fn unwritable_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.xlsx");

        assert!(save_balances_to_excel(&[], path).is_err());
    }
}
