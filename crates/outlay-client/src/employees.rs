// SPDX-FileCopyrightText: 2026 Outlay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Employee resource endpoints.
//!
//! Employee listings embed each employee's expenses (with payments) and
//! an outstanding-balance rollup, so a single fetch carries everything
//! the per-employee views need. Deleting an employee is a soft
//! deactivation; deactivated employees drop out of the listing.

use outlay_core::error::Result;
use outlay_core::types::{Employee, EmployeeExpenses, Payment};
use serde::Serialize;

use crate::client::{ApiClient, RequestSpec};
use crate::wire::{EmployeeDto, EmployeeExpensesDto, PaymentMiniDto};

/// Payload for creating or fully replacing an employee record.
#[derive(Debug, Clone, Serialize)]
pub struct EmployeeDraft {
    pub full_name: String,
    pub department: String,
    pub designation: String,
}

impl ApiClient {
    /// Fetches all active employees with embedded expense histories.
    pub async fn fetch_employees(&self) -> Result<Vec<Employee>> {
        let dtos: Vec<EmployeeDto> = self.fetch_json(&RequestSpec::get("employees/")).await?;
        Ok(dtos.into_iter().map(EmployeeDto::normalize).collect())
    }

    pub async fn fetch_employee(&self, id: i64) -> Result<Employee> {
        let dto: EmployeeDto = self
            .fetch_json(&RequestSpec::get(format!("employees/{id}/")))
            .await?;
        Ok(dto.normalize())
    }

    pub async fn create_employee(&self, draft: &EmployeeDraft) -> Result<Employee> {
        let dto: EmployeeDto = self
            .fetch_json(&RequestSpec::post("employees/", body_of(draft)?))
            .await?;
        Ok(dto.normalize())
    }

    pub async fn update_employee(&self, id: i64, draft: &EmployeeDraft) -> Result<Employee> {
        let dto: EmployeeDto = self
            .fetch_json(&RequestSpec::put(format!("employees/{id}/"), body_of(draft)?))
            .await?;
        Ok(dto.normalize())
    }

    /// Soft-deactivates an employee (the record survives server-side).
    pub async fn deactivate_employee(&self, id: i64) -> Result<()> {
        self.fetch_empty(&RequestSpec::delete(format!("employees/{id}/")))
            .await
    }

    /// Expense history for one employee, newest first, wrapped with a
    /// header describing the employee.
    pub async fn fetch_employee_expenses(&self, id: i64) -> Result<EmployeeExpenses> {
        let dto: EmployeeExpensesDto = self
            .fetch_json(&RequestSpec::get(format!("employees/{id}/expenses/")))
            .await?;
        Ok(dto.normalize())
    }

    /// Payment history for one employee, oldest first. These rows carry
    /// no parent expense reference on the wire.
    pub async fn fetch_employee_payments(&self, id: i64) -> Result<Vec<Payment>> {
        let dtos: Vec<PaymentMiniDto> = self
            .fetch_json(&RequestSpec::get(format!("employees/{id}/payments/")))
            .await?;
        Ok(dtos.into_iter().map(PaymentMiniDto::normalize).collect())
    }
}

fn body_of(draft: &EmployeeDraft) -> Result<serde_json::Value> {
    serde_json::to_value(draft).map_err(|e| {
        outlay_core::OutlayError::Internal(format!("could not serialize employee payload: {e}"))
    })
}
