// SPDX-FileCopyrightText: 2026 Outlay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Payout-state classification.

use outlay_core::types::ExpenseStatus;

/// Classifies a payout state from its amounts.
///
/// Zero paid is always UNPAID, and anything at or above the requested
/// amount is PAID, overpayment included.
pub fn classify(requested: f64, paid: f64) -> ExpenseStatus {
    if paid <= 0.0 {
        ExpenseStatus::Unpaid
    } else if paid < requested {
        ExpenseStatus::Partial
    } else {
        ExpenseStatus::Paid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn bands_split_at_zero_and_at_requested() {
        assert_eq!(classify(500.0, 0.0), ExpenseStatus::Unpaid);
        assert_eq!(classify(500.0, 0.01), ExpenseStatus::Partial);
        assert_eq!(classify(500.0, 499.99), ExpenseStatus::Partial);
        assert_eq!(classify(500.0, 500.0), ExpenseStatus::Paid);
    }

    #[test]
    fn overpayment_is_paid_not_an_error() {
        assert_eq!(classify(500.0, 650.0), ExpenseStatus::Paid);
    }

    proptest! {
        #[test]
        fn paid_at_or_above_requested_is_paid(requested in 0.01f64..1e9, extra in 0.0f64..1e9) {
            prop_assert_eq!(classify(requested, requested + extra), ExpenseStatus::Paid);
        }

        #[test]
        fn paid_strictly_between_is_partial(requested in 1.0f64..1e9, fraction in 0.001f64..0.999) {
            let paid = requested * fraction;
            prop_assume!(paid > 0.0 && paid < requested);
            prop_assert_eq!(classify(requested, paid), ExpenseStatus::Partial);
        }

        #[test]
        fn zero_paid_is_always_unpaid(requested in 0.0f64..1e9) {
            prop_assert_eq!(classify(requested, 0.0), ExpenseStatus::Unpaid);
        }
    }
}
