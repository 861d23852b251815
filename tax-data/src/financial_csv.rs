//! Financial-data rows from CSV.
//!
//! The header names the columns; any subset of the `FinancialData` field
//! names may appear, in any order, plus an optional `assessment_year`.
//! Empty cells keep the field's default.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use rust_decimal::Decimal;
use tax_core::{FinancialData, FinancialDataInput};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FinancialCsvError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown column '{0}'")]
    UnknownColumn(String),

    #[error("Row {row}: invalid amount '{value}' in column '{column}'")]
    InvalidAmount {
        row: usize,
        column: String,
        value: String,
    },
}

impl From<csv::Error> for FinancialCsvError {
    fn from(err: csv::Error) -> Self {
        FinancialCsvError::CsvParse(err.to_string())
    }
}

/// One row: clamped financial data and the year it applies to, if given.
#[derive(Debug, Clone, PartialEq)]
pub struct FinancialRecord {
    pub assessment_year: Option<String>,
    pub data: FinancialData,
}

const ASSESSMENT_YEAR_COLUMN: &str = "assessment_year";

fn field_mut<'a>(
    input: &'a mut FinancialDataInput,
    column: &str,
) -> Option<&'a mut Decimal> {
    let field = match column {
        "basic_salary" => &mut input.basic_salary,
        "hra" => &mut input.hra,
        "special_allowance" => &mut input.special_allowance,
        "other_allowances" => &mut input.other_allowances,
        "bonus" => &mut input.bonus,
        "interest_income" => &mut input.interest_income,
        "rental_income" => &mut input.rental_income,
        "capital_gains" => &mut input.capital_gains,
        "other_income" => &mut input.other_income,
        "section_80c" => &mut input.section_80c,
        "section_80d" => &mut input.section_80d,
        "section_80g" => &mut input.section_80g,
        "section_24" => &mut input.section_24,
        "section_80ccd1b" => &mut input.section_80ccd1b,
        "section_80e" => &mut input.section_80e,
        "section_80tta" => &mut input.section_80tta,
        "standard_deduction" => &mut input.standard_deduction,
        "professional_tax" => &mut input.professional_tax,
        "tds_deducted" => &mut input.tds_deducted,
        "advance_tax" => &mut input.advance_tax,
        _ => return None,
    };
    Some(field)
}

/// Parse financial records from a CSV reader.
pub fn load_from_reader<R: Read>(reader: R) -> Result<Vec<FinancialRecord>, FinancialCsvError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(|h| h.to_ascii_lowercase())
        .collect();

    let mut scratch = FinancialDataInput::default();
    if let Some(unknown) = headers
        .iter()
        .find(|h| h.as_str() != ASSESSMENT_YEAR_COLUMN && field_mut(&mut scratch, h).is_none())
    {
        return Err(FinancialCsvError::UnknownColumn(unknown.clone()));
    }

    let mut records = Vec::new();
    for (index, result) in csv_reader.records().enumerate() {
        let row = result?;
        // Header is line 1.
        let line = index + 2;

        let mut input = FinancialDataInput::default();
        let mut assessment_year = None;

        for (column, value) in headers.iter().zip(row.iter()) {
            if value.is_empty() {
                continue;
            }
            if column == ASSESSMENT_YEAR_COLUMN {
                assessment_year = Some(value.to_string());
                continue;
            }

            let amount = value
                .replace(',', "")
                .parse::<Decimal>()
                .map_err(|_| FinancialCsvError::InvalidAmount {
                    row: line,
                    column: column.clone(),
                    value: value.to_string(),
                })?;
            if let Some(field) = field_mut(&mut input, column) {
                *field = amount;
            }
        }

        records.push(FinancialRecord {
            assessment_year,
            data: input.into(),
        });
    }

    Ok(records)
}

/// Parse financial records from a CSV file.
pub fn load_from_file(path: &Path) -> Result<Vec<FinancialRecord>, FinancialCsvError> {
    let file = File::open(path)?;
    load_from_reader(file)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_load_subset_of_columns() {
        let csv = "basic_salary,hra,section_80c\n600000,240000,150000";

        let records = load_from_reader(csv.as_bytes()).expect("Failed to load CSV");

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].assessment_year, None);
        assert_eq!(records[0].data.basic_salary(), dec!(600000));
        assert_eq!(records[0].data.hra(), dec!(240000));
        assert_eq!(records[0].data.section_80c(), dec!(150000));
        assert_eq!(records[0].data.standard_deduction(), dec!(50000));
    }

    #[test]
    fn test_empty_cells_keep_defaults() {
        let csv = "assessment_year,basic_salary,standard_deduction\n,500000,";

        let records = load_from_reader(csv.as_bytes()).expect("Failed to load CSV");

        assert_eq!(records[0].assessment_year, None);
        assert_eq!(records[0].data.standard_deduction(), dec!(50000));
    }

    #[test]
    fn test_assessment_year_column() {
        let csv = "assessment_year,basic_salary\n2023-24,500000\n2024-25,700000";

        let records = load_from_reader(csv.as_bytes()).expect("Failed to load CSV");

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].assessment_year.as_deref(), Some("2023-24"));
        assert_eq!(records[1].data.basic_salary(), dec!(700000));
    }

    #[test]
    fn test_values_are_clamped() {
        let csv = "section_80c,section_80d,basic_salary\n250000,40000,-100";

        let records = load_from_reader(csv.as_bytes()).expect("Failed to load CSV");

        assert_eq!(records[0].data.section_80c(), dec!(150000));
        assert_eq!(records[0].data.section_80d(), dec!(25000));
        assert_eq!(records[0].data.basic_salary(), Decimal::ZERO);
    }

    #[test]
    fn test_quoted_amounts_with_commas() {
        let csv = "basic_salary\n\"6,00,000\"";

        let records = load_from_reader(csv.as_bytes()).expect("Failed to load CSV");

        assert_eq!(records[0].data.basic_salary(), dec!(600000));
    }

    #[test]
    fn test_unknown_column_is_rejected() {
        let csv = "basic_salary,yacht_income\n1,2";

        let result = load_from_reader(csv.as_bytes());

        assert!(matches!(result, Err(FinancialCsvError::UnknownColumn(c)) if c == "yacht_income"));
    }

    #[test]
    fn test_invalid_amount_reports_row_and_column() {
        let csv = "basic_salary,hra\n100,200\n300,lots";

        let err = load_from_reader(csv.as_bytes()).unwrap_err();

        assert_eq!(err.to_string(), "Row 3: invalid amount 'lots' in column 'hra'");
    }
}
