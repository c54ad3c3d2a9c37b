// SPDX-FileCopyrightText: 2026 Outlay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Expense resource endpoints.

use outlay_core::error::Result;
use outlay_core::money;
use outlay_core::types::Expense;

use crate::client::{ApiClient, RequestSpec};
use crate::wire::ExpenseDto;

/// Payload for creating or fully replacing an expense. The backend
/// treats updates as whole-record writes, so both operations share it.
#[derive(Debug, Clone)]
pub struct ExpenseDraft {
    pub employee_id: i64,
    pub category_id: i64,
    pub amount_requested: f64,
}

impl ExpenseDraft {
    /// Amounts go over the wire as decimal strings, matching what the
    /// backend serializes back.
    fn body(&self) -> serde_json::Value {
        serde_json::json!({
            "employee": self.employee_id,
            "category": self.category_id,
            "amount_requested": money::format_amount(self.amount_requested),
        })
    }
}

impl ApiClient {
    /// Fetches every expense with its embedded payment history.
    pub async fn fetch_expenses(&self) -> Result<Vec<Expense>> {
        let dtos: Vec<ExpenseDto> = self.fetch_json(&RequestSpec::get("expenses/")).await?;
        Ok(dtos.into_iter().map(ExpenseDto::normalize).collect())
    }

    pub async fn fetch_expense(&self, id: i64) -> Result<Expense> {
        let dto: ExpenseDto = self
            .fetch_json(&RequestSpec::get(format!("expenses/{id}/")))
            .await?;
        Ok(dto.normalize())
    }

    /// Creates an expense and returns the server's version of it.
    pub async fn create_expense(&self, draft: &ExpenseDraft) -> Result<Expense> {
        let dto: ExpenseDto = self
            .fetch_json(&RequestSpec::post("expenses/", draft.body()))
            .await?;
        Ok(dto.normalize())
    }

    /// Replaces an expense. The backend rejects updates to expenses
    /// that are already fully paid.
    pub async fn update_expense(&self, id: i64, draft: &ExpenseDraft) -> Result<Expense> {
        let dto: ExpenseDto = self
            .fetch_json(&RequestSpec::put(format!("expenses/{id}/"), draft.body()))
            .await?;
        Ok(dto.normalize())
    }

    pub async fn delete_expense(&self, id: i64) -> Result<()> {
        self.fetch_empty(&RequestSpec::delete(format!("expenses/{id}/")))
            .await
    }
}
