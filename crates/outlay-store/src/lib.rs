// SPDX-FileCopyrightText: 2026 Outlay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cached resource collections with phased async operations.
//!
//! Each store owns one server-backed collection and runs every
//! operation through pending, fulfilled, and rejected phases. Sequence
//! numbers issued at dispatch keep overlapping operations honest: a
//! response that resolves after a newer one has already reconciled the
//! collection is discarded instead of applied. Callers read cloned
//! snapshots; nothing mutates store state from outside.

pub mod categories;
mod collection;
pub mod employees;
pub mod expenses;
pub mod payments;
pub mod users;

pub use categories::CategoryStore;
pub use collection::CollectionSnapshot;
pub use employees::EmployeeStore;
pub use expenses::ExpenseStore;
pub use payments::PaymentStore;
pub use users::UserStore;
