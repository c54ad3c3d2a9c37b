// SPDX-FileCopyrightText: 2026 Outlay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pure derived-state computations over fetched collections.
//!
//! Folds raw expense records into payout classifications, trailing
//! month aggregates, per-employee distributions, and headline totals.
//! Everything here is referentially transparent; callers recompute on
//! each state change instead of caching results.
//!
//! Amounts arrive already parsed from the wire's decimal strings
//! (`outlay_core::money`), so these folds never see `NaN`.

pub mod distribution;
pub mod monthly;
pub mod status;
pub mod totals;

pub use distribution::{AmountField, EntityShare, employee_distribution};
pub use monthly::{MonthBucket, monthly_requested};
pub use status::classify;
pub use totals::{CollectionTotals, collection_totals};
