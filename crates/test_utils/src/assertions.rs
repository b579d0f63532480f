//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for query results that give
//! more meaningful error messages than standard assertions.

use core_kernel::CustomNumber;
use std::fmt::Debug;

/// Asserts that `actual` holds exactly the `expected` items, in any order
///
/// Duplicates count: `[a, a]` does not match `[a]`.
///
/// # Panics
///
/// Panics listing the missing and unexpected items
pub fn assert_contains_exactly_in_any_order<T: PartialEq + Debug>(actual: &[T], expected: &[T]) {
    let mut remaining: Vec<&T> = actual.iter().collect();
    let mut missing = Vec::new();

    for item in expected {
        match remaining.iter().position(|candidate| *candidate == item) {
            Some(index) => {
                remaining.swap_remove(index);
            }
            None => missing.push(item),
        }
    }

    assert!(
        missing.is_empty() && remaining.is_empty(),
        "Results differ: missing={:?}, unexpected={:?}",
        missing,
        remaining
    );
}

/// Asserts the value renders exactly as `expected`, scale included
pub fn assert_custom_number_eq(actual: &CustomNumber, expected: &str) {
    assert_eq!(
        actual.to_string(),
        expected,
        "CustomNumber rendered as {}, expected {}",
        actual,
        expected
    );
}
