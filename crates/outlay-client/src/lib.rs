// SPDX-FileCopyrightText: 2026 Outlay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Authenticated HTTP client for the expense backend.
//!
//! This crate implements [`ApiClient`], the single door to the backend:
//! login and the recovery flow, the five resource families (expenses,
//! payments, employees, categories, staff accounts), and report
//! downloads. Authentication is transparent — the client attaches the
//! session's bearer token at dispatch time, refreshes it once on a 401
//! (coalescing concurrent refreshes into one call), and tears the
//! session down when the refresh credential itself is rejected.

pub mod auth;
pub mod categories;
pub mod client;
pub mod employees;
pub mod expenses;
pub mod payments;
pub mod reports;
pub mod users;

mod wire;

pub use auth::OtpVerification;
pub use client::ApiClient;
pub use employees::EmployeeDraft;
pub use expenses::ExpenseDraft;
pub use payments::PaymentReceipt;
pub use reports::{ReportDownload, ReportFormat};
pub use users::UserUpdate;
