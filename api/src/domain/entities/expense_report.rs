//! Expense report domain entity
//!
//! A fundraiser owner's breakdown of how raised funds were spent,
//! submitted as comma-delimited text with a header row.

use std::str::FromStr;

use csv::{ReaderBuilder, StringRecord, Trim};
use rust_decimal::Decimal;

use crate::error::ReportError;

/// Columns an expense report header is expected to carry
pub const EXPECTED_COLUMNS: [&str; 6] = [
    "name",
    "total_received",
    "relief_work",
    "admin_expenses",
    "fundraising",
    "salaries",
];

/// Columns summed into the total spent.
/// `total_received` is deliberately not among them.
pub const EXPENSE_COLUMNS: [&str; 4] = ["relief_work", "admin_expenses", "fundraising", "salaries"];

/// One parsed report row
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseRow {
    pub relief_work: Decimal,
    pub admin_expenses: Decimal,
    pub fundraising: Decimal,
    pub salaries: Decimal,
}

impl ExpenseRow {
    /// Sum of the row's expense fields, `None` on overflow
    pub fn total(&self) -> Option<Decimal> {
        self.relief_work
            .checked_add(self.admin_expenses)?
            .checked_add(self.fundraising)?
            .checked_add(self.salaries)
    }
}

/// A parsed expense report
#[derive(Debug, Clone, Default)]
pub struct ExpenseReport {
    pub rows: Vec<ExpenseRow>,
    /// Expense fields that were present but not numeric, counted as zero
    pub invalid_fields: usize,
}

impl ExpenseReport {
    /// Parse report bytes.
    ///
    /// Missing or non-numeric expense fields count as zero for that field only.
    /// Structural failures (e.g. invalid UTF-8) make the whole report unreadable.
    pub fn parse(contents: &[u8]) -> Result<Self, ReportError> {
        let mut reader = reader_for(contents);
        let headers = reader.headers()?.clone();
        let positions = EXPENSE_COLUMNS.map(|column| column_position(&headers, column));

        let mut report = ExpenseReport::default();
        for record in reader.records() {
            let record = record?;
            let amounts = positions.map(|position| {
                match position.and_then(|i| record.get(i)) {
                    Some(raw) => parse_amount(raw).unwrap_or_else(|| {
                        report.invalid_fields += 1;
                        Decimal::ZERO
                    }),
                    None => Decimal::ZERO,
                }
            });

            report.rows.push(ExpenseRow {
                relief_work: amounts[0],
                admin_expenses: amounts[1],
                fundraising: amounts[2],
                salaries: amounts[3],
            });
        }

        Ok(report)
    }

    /// Sum of the expense columns across all rows.
    ///
    /// `None` when the sum does not fit in a `Decimal`.
    pub fn total_spent(&self) -> Option<Decimal> {
        self.rows
            .iter()
            .try_fold(Decimal::ZERO, |sum, row| sum.checked_add(row.total()?))
    }
}

/// Expected header columns absent from the report's header row
pub fn missing_columns(contents: &[u8]) -> Result<Vec<&'static str>, ReportError> {
    let mut reader = reader_for(contents);
    let headers = reader.headers()?.clone();

    Ok(EXPECTED_COLUMNS
        .into_iter()
        .filter(|column| column_position(&headers, column).is_none())
        .collect())
}

fn reader_for(contents: &[u8]) -> csv::Reader<&[u8]> {
    ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(contents)
}

fn column_position(headers: &StringRecord, column: &str) -> Option<usize> {
    headers
        .iter()
        .position(|header| header.trim().eq_ignore_ascii_case(column))
}

/// Empty fields are zero; anything else must be a decimal
fn parse_amount(raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Some(Decimal::ZERO);
    }
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}
