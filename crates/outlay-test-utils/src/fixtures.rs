// SPDX-FileCopyrightText: 2026 Outlay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Canonical entity fixtures.
//!
//! Builders and constructors producing already-normalized
//! `outlay_core` entities with sensible defaults, so tests only spell
//! out the fields they care about.

use chrono::{DateTime, NaiveDate, Utc};
use outlay_core::types::{AppUser, Category, Employee, Expense, ExpenseStatus, Payment};

fn default_timestamp() -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(2026, 1, 15)
        .and_then(|d| d.and_hms_opt(9, 0, 0))
        .map(|n| n.and_utc())
        .unwrap_or(DateTime::UNIX_EPOCH)
}

fn noon(date: NaiveDate) -> DateTime<Utc> {
    date.and_hms_opt(12, 0, 0)
        .map(|n| n.and_utc())
        .unwrap_or(DateTime::UNIX_EPOCH)
}

/// Builder for [`Expense`] fixtures.
///
/// Starts as a fresh unpaid expense for employee 1 in category 1;
/// [`amounts`](Self::amounts) keeps the derived fields consistent the
/// way the server would serialize them.
#[derive(Debug, Clone)]
pub struct ExpenseFixture {
    inner: Expense,
}

impl ExpenseFixture {
    pub fn new(id: i64) -> Self {
        Self {
            inner: Expense {
                id,
                employee_id: 1,
                category_id: 1,
                amount_requested: 100.0,
                amount_paid: 0.0,
                remaining_amount: 100.0,
                status: ExpenseStatus::Unpaid,
                payments: Vec::new(),
                created_by: Some("admin".into()),
                updated_by: None,
                created_at: default_timestamp(),
                updated_at: default_timestamp(),
            },
        }
    }

    /// Sets both amounts and recomputes remaining and status to match.
    pub fn amounts(mut self, requested: f64, paid: f64) -> Self {
        self.inner.amount_requested = requested;
        self.inner.amount_paid = paid;
        self.inner.remaining_amount = requested - paid;
        self.inner.status = if paid <= 0.0 {
            ExpenseStatus::Unpaid
        } else if paid < requested {
            ExpenseStatus::Partial
        } else {
            ExpenseStatus::Paid
        };
        self
    }

    pub fn employee(mut self, employee_id: i64) -> Self {
        self.inner.employee_id = employee_id;
        self
    }

    pub fn category(mut self, category_id: i64) -> Self {
        self.inner.category_id = category_id;
        self
    }

    /// Dates the expense at noon UTC on the given day.
    pub fn created_on(mut self, date: NaiveDate) -> Self {
        self.inner.created_at = noon(date);
        self.inner.updated_at = self.inner.created_at;
        self
    }

    pub fn with_payment(mut self, payment: Payment) -> Self {
        self.inner.payments.push(payment);
        self
    }

    pub fn build(self) -> Expense {
        self.inner
    }
}

/// A payment linked to an expense, dated at noon UTC.
pub fn payment(id: i64, expense_id: i64, amount: f64, paid_on: NaiveDate) -> Payment {
    Payment {
        id,
        expense_id: Some(expense_id),
        amount,
        paid_at: noon(paid_on),
        created_by: Some("admin".into()),
    }
}

/// An active employee with no expense history.
pub fn employee(employee_id: i64, name: &str) -> Employee {
    Employee {
        employee_id,
        name: name.into(),
        department: "Operations".into(),
        designation: "Associate".into(),
        is_active: true,
        created_by: Some("admin".into()),
        expenses: Vec::new(),
        total_remaining_amount: 0.0,
    }
}

/// An active category.
pub fn category(id: i64, name: &str) -> Category {
    Category {
        id,
        name: name.into(),
        is_active: true,
    }
}

/// An active dashboard account.
pub fn app_user(id: i64, username: &str) -> AppUser {
    AppUser {
        id,
        username: username.into(),
        email: format!("{username}@example.com"),
        is_active: true,
        created_by: Some("admin".into()),
    }
}
