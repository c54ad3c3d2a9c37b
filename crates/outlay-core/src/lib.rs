// SPDX-FileCopyrightText: 2026 Outlay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Outlay expense dashboard client.
//!
//! This crate provides the shared error taxonomy, the canonical domain
//! types, and decimal-amount handling used throughout the Outlay
//! workspace. Everything above it (session, client, stores, insights)
//! speaks in these types.

pub mod error;
pub mod money;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::{OutlayError, Result};
pub use types::{
    AppUser, Category, Employee, EmployeeExpenses, EmployeeRef, Expense, ExpenseStatus, Payment,
    UserIdentity,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outlay_error_has_all_variants() {
        // Verify all 6 error variants exist and can be constructed.
        let _config = OutlayError::Config("test".into());
        let _transport = OutlayError::Transport {
            message: "test".into(),
            source: None,
        };
        let _api = OutlayError::Api {
            status: 400,
            message: "test".into(),
        };
        let _expired = OutlayError::SessionExpired("test".into());
        let _storage = OutlayError::Storage {
            message: "test".into(),
            source: Some(Box::new(std::io::Error::other("test"))),
        };
        let _internal = OutlayError::Internal("test".into());
    }

    #[test]
    fn expense_status_has_three_variants() {
        use std::str::FromStr;

        let variants = [
            ExpenseStatus::Unpaid,
            ExpenseStatus::Partial,
            ExpenseStatus::Paid,
        ];

        assert_eq!(variants.len(), 3, "ExpenseStatus must have exactly 3 variants");

        // Verify Display and FromStr round-trip for all variants.
        for variant in &variants {
            let s = variant.to_string();
            let parsed = ExpenseStatus::from_str(&s).expect("should parse back");
            assert_eq!(*variant, parsed);
        }
    }

    #[test]
    fn domain_types_are_cloneable() {
        let category = Category {
            id: 1,
            name: "Travel".into(),
            is_active: true,
        };
        let category2 = category.clone();
        assert_eq!(category, category2);

        let identity = UserIdentity {
            id: 1,
            username: "admin".into(),
            email: "admin@example.com".into(),
            is_staff: true,
        };
        let identity2 = identity.clone();
        assert_eq!(identity, identity2);
    }
}
