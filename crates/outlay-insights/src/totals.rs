// SPDX-FileCopyrightText: 2026 Outlay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collection-level monetary totals.

use outlay_core::types::Expense;

/// The dashboard's headline numbers for one expense collection.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CollectionTotals {
    pub requested: f64,
    pub paid: f64,
    /// Requested minus paid.
    pub outstanding: f64,
}

/// Folds a collection into its requested, paid, and outstanding sums.
pub fn collection_totals(expenses: &[Expense]) -> CollectionTotals {
    let requested: f64 = expenses.iter().map(|e| e.amount_requested).sum();
    let paid: f64 = expenses.iter().map(|e| e.amount_paid).sum();
    CollectionTotals {
        requested,
        paid,
        outstanding: requested - paid,
    }
}
