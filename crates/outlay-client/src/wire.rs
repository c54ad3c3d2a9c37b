// SPDX-FileCopyrightText: 2026 Outlay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Raw backend payload shapes and their normalization.
//!
//! The backend is loose about types: monetary fields arrive as decimal
//! strings or numbers depending on the serializer, `created_by` can be a
//! nested user object, a bare id, or a plain string, and the employee
//! name field has two spellings. Everything is straightened out here so
//! the rest of the workspace only sees `outlay_core` types.

use chrono::{DateTime, NaiveDateTime, Utc};
use outlay_core::money;
use outlay_core::types::{
    AppUser, Category, Employee, EmployeeExpenses, EmployeeRef, Expense, ExpenseStatus, Payment,
};
use outlay_core::OutlayError;
use reqwest::StatusCode;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Token field spellings accepted from login and refresh responses,
/// checked in order.
const TOKEN_KEYS: [&str; 4] = ["access", "accessToken", "key", "token"];

/// Pulls an access token out of a login or refresh response body.
pub(crate) fn extract_access_token(body: &Value) -> Option<String> {
    for key in TOKEN_KEYS {
        if let Some(token) = body.get(key).and_then(Value::as_str)
            && !token.is_empty()
        {
            return Some(token.to_owned());
        }
    }
    None
}

/// Builds the `Api` error for a non-success response.
pub(crate) fn api_error(status: StatusCode, body: &str) -> OutlayError {
    OutlayError::Api {
        status: status.as_u16(),
        message: extract_error_message(status, body),
    }
}

/// Finds the human-readable message in an error body.
///
/// Checks `detail`, then `error`, then `message`; values may be strings
/// or lists of strings (password validation errors). Falls back to the
/// raw body, then to the status line.
pub(crate) fn extract_error_message(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        for key in ["detail", "error", "message"] {
            if let Some(found) = value.get(key) {
                return render_message(found);
            }
        }
    }
    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.to_owned();
    }
    status
        .canonical_reason()
        .unwrap_or("request failed")
        .to_owned()
}

/// Pulls the display text out of a `{"message": ...}` response.
pub(crate) fn extract_message(body: &Value) -> String {
    body.get("message")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned()
}

fn render_message(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join("; "),
        other => other.to_string(),
    }
}

/// Deserializes a monetary field that may be a decimal string or a
/// bare number. Malformed values become 0.0 (with a warning) so sums
/// stay finite.
fn amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(raw) => money::parse_amount(&raw),
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::Null => 0.0,
        other => money::parse_amount(&other.to_string()),
    })
}

/// Deserializes a timestamp that may or may not carry a timezone
/// offset. Naive timestamps are taken as UTC.
fn datetime<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_datetime(&raw).ok_or_else(|| serde::de::Error::custom(format!("bad timestamp `{raw}`")))
}

fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Deserializes the `created_by` / `updated_by` field, which arrives as
/// `{"id": n, "username": "..."}`, a plain string, a bare id, or null,
/// depending on the endpoint. Only a username survives normalization.
fn actor<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Object(map)) => map
            .get("username")
            .and_then(Value::as_str)
            .map(str::to_owned),
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        _ => None,
    })
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub(crate) struct PaymentMiniDto {
    pub id: i64,
    #[serde(deserialize_with = "amount")]
    pub amount: f64,
    #[serde(deserialize_with = "datetime")]
    pub paid_at: DateTime<Utc>,
    #[serde(default, deserialize_with = "actor")]
    pub created_by: Option<String>,
}

impl PaymentMiniDto {
    /// Normalize a payment listed without its parent reference.
    pub(crate) fn normalize(self) -> Payment {
        self.normalize_for(None)
    }

    fn normalize_for(self, expense_id: Option<i64>) -> Payment {
        Payment {
            id: self.id,
            expense_id,
            amount: self.amount,
            paid_at: self.paid_at,
            created_by: self.created_by,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct PaymentDto {
    pub id: i64,
    pub expense: i64,
    #[serde(deserialize_with = "amount")]
    pub amount: f64,
    #[serde(deserialize_with = "datetime")]
    pub paid_at: DateTime<Utc>,
    #[serde(default, deserialize_with = "actor")]
    pub created_by: Option<String>,
}

impl PaymentDto {
    pub(crate) fn normalize(self) -> Payment {
        Payment {
            id: self.id,
            expense_id: Some(self.expense),
            amount: self.amount,
            paid_at: self.paid_at,
            created_by: self.created_by,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ExpenseDto {
    pub id: i64,
    pub employee: i64,
    pub category: i64,
    #[serde(deserialize_with = "amount")]
    pub amount_requested: f64,
    #[serde(default, deserialize_with = "amount")]
    pub amount_paid: f64,
    #[serde(default, deserialize_with = "amount")]
    pub remaining_amount: f64,
    pub status: ExpenseStatus,
    #[serde(default)]
    pub payments: Vec<PaymentMiniDto>,
    #[serde(default, deserialize_with = "actor")]
    pub created_by: Option<String>,
    #[serde(default, deserialize_with = "actor")]
    pub updated_by: Option<String>,
    #[serde(deserialize_with = "datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(deserialize_with = "datetime")]
    pub updated_at: DateTime<Utc>,
}

impl ExpenseDto {
    pub(crate) fn normalize(self) -> Expense {
        let expense_id = self.id;
        Expense {
            id: self.id,
            employee_id: self.employee,
            category_id: self.category,
            amount_requested: self.amount_requested,
            amount_paid: self.amount_paid,
            remaining_amount: self.remaining_amount,
            status: self.status,
            payments: self
                .payments
                .into_iter()
                .map(|p| p.normalize_for(Some(expense_id)))
                .collect(),
            created_by: self.created_by,
            updated_by: self.updated_by,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// `POST payments/` echoes the updated parent expense alongside a
/// display message.
#[derive(Debug, Deserialize)]
pub(crate) struct PaymentReceiptDto {
    #[serde(default)]
    pub message: String,
    pub expense: ExpenseDto,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EmployeeDto {
    pub employee_id: i64,
    /// Canonical spelling on the wire.
    pub full_name: Option<String>,
    /// Legacy spelling some responses used.
    pub name: Option<String>,
    pub department: String,
    pub designation: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "actor")]
    pub created_by: Option<String>,
    #[serde(default)]
    pub expenses: Vec<ExpenseDto>,
    #[serde(default, deserialize_with = "amount")]
    pub total_remaining_amount: f64,
}

impl EmployeeDto {
    pub(crate) fn normalize(self) -> Employee {
        Employee {
            employee_id: self.employee_id,
            name: self.full_name.or(self.name).unwrap_or_default(),
            department: self.department,
            designation: self.designation,
            is_active: self.is_active,
            created_by: self.created_by,
            expenses: self.expenses.into_iter().map(ExpenseDto::normalize).collect(),
            total_remaining_amount: self.total_remaining_amount,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct EmployeeRefDto {
    pub employee_id: i64,
    pub full_name: Option<String>,
    pub name: Option<String>,
    pub department: String,
    pub designation: String,
}

impl EmployeeRefDto {
    pub(crate) fn normalize(self) -> EmployeeRef {
        EmployeeRef {
            employee_id: self.employee_id,
            name: self.full_name.or(self.name).unwrap_or_default(),
            department: self.department,
            designation: self.designation,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct EmployeeExpensesDto {
    pub employee: EmployeeRefDto,
    #[serde(default)]
    pub expenses: Vec<ExpenseDto>,
}

impl EmployeeExpensesDto {
    pub(crate) fn normalize(self) -> EmployeeExpenses {
        EmployeeExpenses {
            employee: self.employee.normalize(),
            expenses: self.expenses.into_iter().map(ExpenseDto::normalize).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct CategoryDto {
    pub id: i64,
    pub name: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl CategoryDto {
    pub(crate) fn normalize(self) -> Category {
        Category {
            id: self.id,
            name: self.name,
            is_active: self.is_active,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct AppUserDto {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: String,
    /// The creation echo omits this; a just-created account is active.
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "actor")]
    pub created_by: Option<String>,
}

impl AppUserDto {
    pub(crate) fn normalize(self) -> AppUser {
        AppUser {
            id: self.id,
            username: self.username,
            email: self.email,
            is_active: self.is_active,
            created_by: self.created_by,
        }
    }
}
