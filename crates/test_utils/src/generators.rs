//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random test data
//! that maintains domain invariants.

use core_kernel::{CustomNumber, EntryId};
use domain_entry::Entry;
use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

/// Strategy for amounts with up to four decimal places
pub fn custom_number_strategy() -> impl Strategy<Value = CustomNumber> {
    (-1_000_000_000i64..1_000_000_000i64, 0u32..=4u32)
        .prop_map(|(mantissa, scale)| CustomNumber::new(Decimal::new(mantissa, scale)))
}

/// Strategy for short lowercase category names
pub fn category_strategy() -> impl Strategy<Value = String> {
    "[a-z]{1,8}"
}

pub fn entry_id_strategy() -> impl Strategy<Value = EntryId> {
    any::<u128>().prop_map(|n| EntryId::from_uuid(Uuid::from_u128(n)))
}

pub fn entry_strategy() -> impl Strategy<Value = Entry> {
    (entry_id_strategy(), category_strategy(), custom_number_strategy())
        .prop_map(|(id, category, amount)| Entry::new(id, category, amount))
}

/// Entries with pairwise distinct identifiers
pub fn entries_strategy(max: usize) -> impl Strategy<Value = Vec<Entry>> {
    prop::collection::btree_map(entry_id_strategy(), (category_strategy(), custom_number_strategy()), 0..max)
        .prop_map(|entries| {
            entries
                .into_iter()
                .map(|(id, (category, amount))| Entry::new(id, category, amount))
                .collect()
        })
}
