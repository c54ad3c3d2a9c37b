// SPDX-FileCopyrightText: 2026 Outlay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trailing-month aggregation.

use chrono::{Datelike, NaiveDate};
use outlay_core::types::Expense;

/// One calendar month's requested total.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthBucket {
    pub year: i32,
    /// 1-based calendar month.
    pub month: u32,
    pub total: f64,
}

impl MonthBucket {
    /// Year-month key in the `YYYY-MM` form month filters use.
    pub fn key(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

/// Sums requested amounts into the trailing `window` calendar months
/// ending at `reference`'s month, oldest bucket first.
///
/// Months without expenses stay in the result at zero; expenses dated
/// outside the window are ignored. An empty collection therefore still
/// yields `window` buckets.
pub fn monthly_requested(
    expenses: &[Expense],
    reference: NaiveDate,
    window: u32,
) -> Vec<MonthBucket> {
    let mut buckets: Vec<MonthBucket> = (0..window)
        .rev()
        .map(|back| {
            let (year, month) = months_back(reference.year(), reference.month(), back);
            MonthBucket {
                year,
                month,
                total: 0.0,
            }
        })
        .collect();

    for expense in expenses {
        let date = expense.created_at.date_naive();
        if let Some(bucket) = buckets
            .iter_mut()
            .find(|b| b.year == date.year() && b.month == date.month())
        {
            bucket.total += expense.amount_requested;
        }
    }
    buckets
}

/// Steps `back` months from the given year-month, carrying across
/// year boundaries.
fn months_back(year: i32, month: u32, back: u32) -> (i32, u32) {
    let index = year * 12 + month as i32 - 1 - back as i32;
    (index.div_euclid(12), (index.rem_euclid(12) + 1) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use outlay_test_utils::fixtures::ExpenseFixture;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn empty_collection_still_yields_the_full_window() {
        let buckets = monthly_requested(&[], date(2026, 8, 15), 6);

        assert_eq!(buckets.len(), 6);
        assert!(buckets.iter().all(|b| b.total == 0.0));
        assert_eq!(buckets[0].key(), "2026-03");
        assert_eq!(buckets[5].key(), "2026-08");
    }

    #[test]
    fn same_month_amounts_fold_into_one_bucket() {
        let expenses = vec![
            ExpenseFixture::new(1)
                .amounts(1200.50, 0.0)
                .created_on(date(2026, 7, 2))
                .build(),
            ExpenseFixture::new(2)
                .amounts(799.50, 0.0)
                .created_on(date(2026, 7, 28))
                .build(),
        ];

        let buckets = monthly_requested(&expenses, date(2026, 8, 15), 6);
        let july = buckets.iter().find(|b| b.key() == "2026-07").unwrap();
        assert!((july.total - 2000.0).abs() < 1e-9);
        assert!(
            buckets.iter().filter(|b| b.total > 0.0).count() == 1,
            "only july should carry a total"
        );
    }

    #[test]
    fn window_carries_across_a_year_boundary() {
        let expenses = vec![
            ExpenseFixture::new(1)
                .amounts(300.0, 0.0)
                .created_on(date(2025, 12, 10))
                .build(),
        ];

        let buckets = monthly_requested(&expenses, date(2026, 1, 31), 3);
        let keys: Vec<String> = buckets.iter().map(MonthBucket::key).collect();
        assert_eq!(keys, ["2025-11", "2025-12", "2026-01"]);
        assert!((buckets[1].total - 300.0).abs() < 1e-9);
    }

    #[test]
    fn expenses_outside_the_window_are_ignored() {
        let expenses = vec![
            ExpenseFixture::new(1)
                .amounts(300.0, 0.0)
                .created_on(date(2025, 9, 1))
                .build(),
            ExpenseFixture::new(2)
                .amounts(400.0, 0.0)
                .created_on(date(2026, 9, 1))
                .build(),
        ];

        let buckets = monthly_requested(&expenses, date(2026, 8, 15), 6);
        assert!(
            buckets.iter().all(|b| b.total == 0.0),
            "both a too-old and a future-dated expense must be skipped"
        );
    }
}
