// SPDX-FileCopyrightText: 2026 Outlay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock expense backend.
//!
//! Wraps a wiremock server with mounts for the routes tests use most,
//! plus renderers that turn fixture entities back into the backend's
//! wire shapes (decimal-string amounts, bare foreign-key ids, embedded
//! payment rows without parent references).

use outlay_core::money;
use outlay_core::types::{AppUser, Category, Employee, Expense, Payment};
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A wiremock server posing as the expense backend.
pub struct MockBackend {
    server: MockServer,
}

impl MockBackend {
    /// Boots a server with no routes mounted.
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// The underlying server, for custom mounts and `.expect(n)`
    /// call-count proofs.
    pub fn server(&self) -> &MockServer {
        &self.server
    }

    /// Accepts any login with the given token pair, answering as a
    /// staff account.
    pub async fn accept_login(&self, access: &str, refresh: &str) {
        Mock::given(method("POST"))
            .and(path("/login/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access": access,
                "refresh": refresh,
                "user": {
                    "id": 1,
                    "username": "admin",
                    "email": "admin@example.com",
                    "is_staff": true
                }
            })))
            .mount(&self.server)
            .await;
    }

    /// Accepts a best-effort logout.
    pub async fn accept_logout(&self) {
        Mock::given(method("POST"))
            .and(path("/logout/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": "Logout successful"
            })))
            .mount(&self.server)
            .await;
    }

    /// Mounts a GET route answering 200 with `body`.
    pub async fn get_ok(&self, route: &str, body: Value) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Mounts a POST route answering `status` with `body`.
    pub async fn post_json(&self, route: &str, status: u16, body: Value) {
        Mock::given(method("POST"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.server)
            .await;
    }
}

/// Renders an expense the way the backend serializes it, embedded
/// payment rows included.
pub fn wire_expense(expense: &Expense) -> Value {
    json!({
        "id": expense.id,
        "employee": expense.employee_id,
        "category": expense.category_id,
        "amount_requested": money::format_amount(expense.amount_requested),
        "amount_paid": money::format_amount(expense.amount_paid),
        "remaining_amount": money::format_amount(expense.remaining_amount),
        "status": expense.status.to_string(),
        "payments": expense
            .payments
            .iter()
            .map(wire_payment_row)
            .collect::<Vec<_>>(),
        "created_by": expense.created_by,
        "updated_by": expense.updated_by,
        "created_at": expense.created_at.to_rfc3339(),
        "updated_at": expense.updated_at.to_rfc3339(),
    })
}

/// Renders a top-level payment, parent reference included.
pub fn wire_payment(payment: &Payment) -> Value {
    let mut body = wire_payment_row(payment);
    if let Some(map) = body.as_object_mut() {
        map.insert("expense".into(), json!(payment.expense_id));
    }
    body
}

/// Renders a payment as it appears embedded in an expense or in an
/// employee's history, without a parent reference.
pub fn wire_payment_row(payment: &Payment) -> Value {
    json!({
        "id": payment.id,
        "amount": money::format_amount(payment.amount),
        "paid_at": payment.paid_at.to_rfc3339(),
        "created_by": payment.created_by,
    })
}

pub fn wire_employee(employee: &Employee) -> Value {
    json!({
        "employee_id": employee.employee_id,
        "full_name": employee.name,
        "department": employee.department,
        "designation": employee.designation,
        "is_active": employee.is_active,
        "created_by": employee.created_by,
        "expenses": employee.expenses.iter().map(wire_expense).collect::<Vec<_>>(),
        "total_remaining_amount": money::format_amount(employee.total_remaining_amount),
    })
}

pub fn wire_category(category: &Category) -> Value {
    json!({
        "id": category.id,
        "name": category.name,
        "is_active": category.is_active,
    })
}

pub fn wire_user(user: &AppUser) -> Value {
    json!({
        "id": user.id,
        "username": user.username,
        "email": user.email,
        "is_active": user.is_active,
        "created_by": user.created_by,
    })
}
