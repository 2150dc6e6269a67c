//! Property-Based Test Generators
//!
//! Proptest strategies for generating rental test data that keeps domain
//! invariants.

use chrono::{Duration, NaiveDate};
use core_kernel::RentalPeriod;
use proptest::prelude::*;

/// Strategy for five-digit US postal codes
pub fn postal_code_strategy() -> impl Strategy<Value = String> {
    "[0-9]{5}"
}

/// Strategy for valid rental periods within 2020-2029, up to a year long
pub fn rental_period_strategy() -> impl Strategy<Value = RentalPeriod> {
    (0i64..3650, 0i64..366).prop_map(|(start_offset, length)| {
        let base = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let start = base + Duration::days(start_offset);
        RentalPeriod::new(start, start + Duration::days(length)).unwrap()
    })
}

/// Strategy for list sizes used in pagination tests
pub fn item_count_strategy() -> impl Strategy<Value = usize> {
    0usize..500
}
