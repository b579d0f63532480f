//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible defaults.
//! These builders allow tests to specify only the relevant fields while using
//! defaults for everything else.

use core_kernel::{CustomNumber, EntryId};
use domain_entry::Entry;
use rust_decimal_macros::dec;

/// Builder for constructing test entries
pub struct TestEntryBuilder {
    id: EntryId,
    category: String,
    amount: CustomNumber,
}

impl Default for TestEntryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEntryBuilder {
    /// Creates a new builder with a random id, category "aaa" and amount 1
    pub fn new() -> Self {
        Self {
            id: EntryId::new(),
            category: "aaa".to_string(),
            amount: CustomNumber::new(dec!(1)),
        }
    }

    pub fn with_id(mut self, id: EntryId) -> Self {
        self.id = id;
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_amount(mut self, amount: CustomNumber) -> Self {
        self.amount = amount;
        self
    }

    pub fn build(self) -> Entry {
        Entry::new(self.id, self.category, self.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let entry = TestEntryBuilder::new().build();
        assert_eq!(entry.category(), "aaa");
        assert_eq!(entry.amount(), CustomNumber::new(dec!(1)));
    }

    #[test]
    fn test_builder_overrides() {
        let entry = TestEntryBuilder::new()
            .with_category("zzz")
            .with_amount(CustomNumber::new(dec!(2.50)))
            .build();
        assert_eq!(entry.category(), "zzz");
        assert_eq!(entry.amount().to_string(), "2.50");
    }
}
