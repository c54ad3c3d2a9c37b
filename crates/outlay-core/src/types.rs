// SPDX-FileCopyrightText: 2026 Outlay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Canonical domain types shared across the workspace.
//!
//! These are the normalized shapes the rest of Outlay works with. Raw
//! wire payloads (string-encoded amounts, alternate field spellings)
//! are converted into these types at the client boundary and nowhere
//! else.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Payout state of an expense.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum ExpenseStatus {
    Unpaid,
    Partial,
    Paid,
}

/// Identity of the signed-in account, as returned by the login endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub is_staff: bool,
}

/// An expense raised for an employee, with its embedded payout history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub employee_id: i64,
    pub category_id: i64,
    pub amount_requested: f64,
    pub amount_paid: f64,
    pub remaining_amount: f64,
    pub status: ExpenseStatus,
    #[serde(default)]
    pub payments: Vec<Payment>,
    pub created_by: Option<String>,
    pub updated_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A single payout applied to an expense.
///
/// `expense_id` is `None` when the wire response omitted the parent
/// reference (payments listed per employee); payments embedded in an
/// expense get it patched from the parent during normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: i64,
    pub expense_id: Option<i64>,
    pub amount: f64,
    pub paid_at: DateTime<Utc>,
    pub created_by: Option<String>,
}

/// An employee who can have expenses raised against them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub employee_id: i64,
    pub name: String,
    pub department: String,
    pub designation: String,
    pub is_active: bool,
    pub created_by: Option<String>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    pub total_remaining_amount: f64,
}

/// Identifying summary of an employee, used by per-employee views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRef {
    pub employee_id: i64,
    pub name: String,
    pub department: String,
    pub designation: String,
}

/// An employee's expense history, newest expense first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeExpenses {
    pub employee: EmployeeRef,
    pub expenses: Vec<Expense>,
}

/// An expense category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub is_active: bool,
}

/// A dashboard account visible to staff administrators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppUser {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub is_active: bool,
    pub created_by: Option<String>,
}
