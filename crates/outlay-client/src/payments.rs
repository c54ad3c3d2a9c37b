// SPDX-FileCopyrightText: 2026 Outlay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Payment resource endpoints.
//!
//! A payment always belongs to an expense; recording one moves money on
//! the parent server-side. The create call therefore answers with a
//! [`PaymentReceipt`] carrying the updated parent, which callers may use
//! or ignore in favor of a fresh expense fetch.

use outlay_core::error::Result;
use outlay_core::money;
use outlay_core::types::{Expense, Payment};

use crate::client::{ApiClient, RequestSpec};
use crate::wire::{PaymentDto, PaymentReceiptDto};

/// Outcome of recording a payment.
#[derive(Debug, Clone)]
pub struct PaymentReceipt {
    pub message: String,
    /// The parent expense as the server saw it after applying the
    /// payment (amounts and status already moved).
    pub expense: Expense,
}

impl ApiClient {
    /// Fetches all payments, newest first.
    pub async fn fetch_payments(&self) -> Result<Vec<Payment>> {
        let dtos: Vec<PaymentDto> = self.fetch_json(&RequestSpec::get("payments/")).await?;
        Ok(dtos.into_iter().map(PaymentDto::normalize).collect())
    }

    pub async fn fetch_payment(&self, id: i64) -> Result<Payment> {
        let dto: PaymentDto = self
            .fetch_json(&RequestSpec::get(format!("payments/{id}/")))
            .await?;
        Ok(dto.normalize())
    }

    /// Records a payment against an expense. The backend rejects
    /// amounts above the expense's remaining balance.
    pub async fn record_payment(&self, expense_id: i64, amount: f64) -> Result<PaymentReceipt> {
        let body = serde_json::json!({
            "expense": expense_id,
            "amount": money::format_amount(amount),
        });
        let dto: PaymentReceiptDto = self
            .fetch_json(&RequestSpec::post("payments/", body))
            .await?;
        Ok(PaymentReceipt {
            message: dto.message,
            expense: dto.expense.normalize(),
        })
    }

    /// Deletes a payment. Rejected server-side once the parent expense
    /// is fully paid.
    pub async fn delete_payment(&self, id: i64) -> Result<()> {
        self.fetch_empty(&RequestSpec::delete(format!("payments/{id}/")))
            .await
    }
}
