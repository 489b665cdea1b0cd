//! # Sheet Column Layout
//!
//! The header row and every data row are generated from the same
//! `SheetSchema`, so a column can never be declared in the header without
//! also being written (or the other way around).

use crate::submission::Submission;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One column of the sheet and where its value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    FullName,
    Phone,
    LoanAmount,
    City,
    OtherCity,
    Message,
    SubmittedAt,
}

impl Column {
    pub const ALL: [Column; 7] = [
        Column::FullName,
        Column::Phone,
        Column::LoanAmount,
        Column::City,
        Column::OtherCity,
        Column::Message,
        Column::SubmittedAt,
    ];

    /// Label written into the header row
    pub fn header(self) -> &'static str {
        match self {
            Column::FullName => "Full Name",
            Column::Phone => "Phone Number",
            Column::LoanAmount => "Total Loan Amount",
            Column::City => "City",
            Column::OtherCity => "Other City",
            Column::Message => "Message",
            Column::SubmittedAt => "Submitted At",
        }
    }

    /// Name used in `SHEET_COLUMNS`
    pub fn key(self) -> &'static str {
        match self {
            Column::FullName => "full_name",
            Column::Phone => "phone",
            Column::LoanAmount => "loan_amount",
            Column::City => "city",
            Column::OtherCity => "other_city",
            Column::Message => "message",
            Column::SubmittedAt => "submitted_at",
        }
    }

    fn value<'a>(self, submission: &'a Submission, submitted_at: &'a str) -> &'a str {
        match self {
            Column::FullName => &submission.full_name,
            Column::Phone => &submission.phone,
            Column::LoanAmount => &submission.loan_amount,
            Column::City => &submission.city,
            Column::OtherCity => &submission.other_city,
            Column::Message => &submission.message,
            Column::SubmittedAt => submitted_at,
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Column {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Column::ALL
            .into_iter()
            .find(|c| c.key().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| SchemaError::UnknownColumn(wanted.to_string()))
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SchemaError {
    #[error("a sheet needs at least one column")]
    Empty,
    #[error("unknown column `{0}`")]
    UnknownColumn(String),
    #[error("column `{0}` is listed more than once")]
    Duplicate(Column),
}

/// Ordered list of columns written to the sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetSchema {
    columns: Vec<Column>,
}

impl Default for SheetSchema {
    /// The five columns a submission actually carries.
    fn default() -> Self {
        SheetSchema {
            columns: vec![
                Column::FullName,
                Column::Phone,
                Column::LoanAmount,
                Column::Message,
                Column::SubmittedAt,
            ],
        }
    }
}

impl SheetSchema {
    pub fn new(columns: Vec<Column>) -> Result<Self, SchemaError> {
        if columns.is_empty() {
            return Err(SchemaError::Empty);
        }
        for (i, column) in columns.iter().enumerate() {
            if columns[..i].contains(column) {
                return Err(SchemaError::Duplicate(*column));
            }
        }
        Ok(SheetSchema { columns })
    }

    /// Six-column layout with the city fields and no message column.
    pub fn legacy() -> Self {
        SheetSchema {
            columns: vec![
                Column::FullName,
                Column::Phone,
                Column::LoanAmount,
                Column::City,
                Column::OtherCity,
                Column::SubmittedAt,
            ],
        }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn header_row(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.header().to_string()).collect()
    }

    /// Range covering the header row, e.g. `Sheet1!A1:E1`
    pub fn header_range(&self, sheet_name: &str) -> String {
        format!("{}!A1:{}1", quote_sheet_name(sheet_name), self.last_column_letter())
    }

    /// Range the Sheets API appends below, e.g. `Sheet1!A:E`
    pub fn append_range(&self, sheet_name: &str) -> String {
        format!("{}!A:{}", quote_sheet_name(sheet_name), self.last_column_letter())
    }

    pub fn row_for(&self, submission: &Submission, submitted_at: &str) -> Vec<String> {
        self.columns
            .iter()
            .map(|c| c.value(submission, submitted_at).to_string())
            .collect()
    }

    fn last_column_letter(&self) -> String {
        column_letter(self.columns.len() - 1)
    }
}

impl FromStr for SheetSchema {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "default" => Ok(SheetSchema::default()),
            "legacy" => Ok(SheetSchema::legacy()),
            list => SheetSchema::new(
                list.split(',')
                    .filter(|part| !part.trim().is_empty())
                    .map(str::parse)
                    .collect::<Result<_, _>>()?,
            ),
        }
    }
}

/// Sheet name as it must appear in A1 notation. Names other than plain
/// identifiers are wrapped in single quotes with inner quotes doubled.
pub fn quote_sheet_name(name: &str) -> String {
    let plain = name.chars().next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if plain {
        name.to_string()
    } else {
        format!("'{}'", name.replace('\'', "''"))
    }
}

/// Zero-based column index to A1 letters: 0 -> A, 25 -> Z, 26 -> AA.
pub fn column_letter(index: usize) -> String {
    let mut n = index + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}
