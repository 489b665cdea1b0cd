//! # Form Submissions
//!
//! Inbound form payloads and their validation. Fields may arrive as strings,
//! numbers or booleans; each one is turned into trimmed text. Zero and
//! `false` read as empty, the same as a blank string.

use crate::error::{AppError, AppResult};
use serde::Deserialize;

/// Raw value of one form field.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(serde_json::Number),
    Flag(bool),
    Other(serde_json::Value),
}

impl FieldValue {
    pub fn is_falsy(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::Number(n) => n.as_f64() == Some(0.0),
            FieldValue::Flag(b) => !b,
            FieldValue::Other(v) => v.is_null(),
        }
    }

    pub fn to_text(&self) -> String {
        if self.is_falsy() {
            return String::new();
        }
        match self {
            FieldValue::Text(s) => s.trim().to_string(),
            FieldValue::Number(n) => n.to_string(),
            FieldValue::Flag(b) => b.to_string(),
            FieldValue::Other(v) => v.to_string().trim().to_string(),
        }
    }
}

/// Unvalidated submission, exactly as the client sent it.
///
/// ## Example JSON
/// ```json
/// {
///   "fullName": "Jane Doe",
///   "phone": "5551234567",
///   "loanAmount": 10000,
///   "message": "Call after 5pm"
/// }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSubmission {
    pub full_name: Option<FieldValue>,
    pub phone: Option<FieldValue>,
    pub loan_amount: Option<FieldValue>,
    pub message: Option<FieldValue>,
    pub city: Option<FieldValue>,
    pub other_city: Option<FieldValue>,
}

/// Submission with every field reduced to trimmed text and the required
/// fields known to be non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Submission {
    pub full_name: String,
    pub phone: String,
    pub loan_amount: String,
    pub message: String,
    pub city: String,
    pub other_city: String,
}

fn text(field: Option<&FieldValue>) -> String {
    field.map(FieldValue::to_text).unwrap_or_default()
}

impl FormSubmission {
    /// Check the required fields and coerce everything to text.
    ///
    /// Fails with `AppError::Validation` naming every missing required field.
    pub fn validate(&self) -> AppResult<Submission> {
        let submission = Submission {
            full_name: text(self.full_name.as_ref()),
            phone: text(self.phone.as_ref()),
            loan_amount: text(self.loan_amount.as_ref()),
            message: text(self.message.as_ref()),
            city: text(self.city.as_ref()),
            other_city: text(self.other_city.as_ref()),
        };

        let missing: Vec<&'static str> = [
            ("fullName", &submission.full_name),
            ("phone", &submission.phone),
            ("loanAmount", &submission.loan_amount),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect();

        if !missing.is_empty() {
            return Err(AppError::Validation { missing });
        }

        Ok(submission)
    }
}
