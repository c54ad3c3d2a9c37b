// SPDX-FileCopyrightText: 2026 Outlay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-employee expense distribution.

use outlay_core::types::{Employee, Expense};

/// Amount field a distribution folds over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountField {
    Requested,
    /// Requested minus paid.
    Remaining,
}

/// One employee's slice of the distribution.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityShare {
    pub employee_id: i64,
    pub name: String,
    pub total: f64,
}

/// Sums the chosen amount field across each employee's linked
/// expenses.
///
/// Every employee appears in the result, zero-expense employees
/// included; dropping zero rows is a presentation decision left to the
/// caller.
pub fn employee_distribution(
    employees: &[Employee],
    expenses: &[Expense],
    field: AmountField,
) -> Vec<EntityShare> {
    employees
        .iter()
        .map(|employee| EntityShare {
            employee_id: employee.employee_id,
            name: employee.name.clone(),
            total: expenses
                .iter()
                .filter(|e| e.employee_id == employee.employee_id)
                .map(|e| match field {
                    AmountField::Requested => e.amount_requested,
                    AmountField::Remaining => e.amount_requested - e.amount_paid,
                })
                .sum(),
        })
        .collect()
}
