//! Pre-built Test Fixtures
//!
//! The reference data set: two entries in category "aaa" (111, 222) and two
//! in "zzz" (444, 555), with fixed identifiers so results are predictable.

use core_kernel::{CustomNumber, EntryId};
use domain_entry::{CategoryTotal, Entry};
use uuid::Uuid;

/// Fixture for entry identifiers
pub struct IdFixtures;

impl IdFixtures {
    pub fn aaa_111() -> EntryId {
        EntryId::from_uuid(Uuid::from_u128(1))
    }

    pub fn aaa_222() -> EntryId {
        EntryId::from_uuid(Uuid::from_u128(2))
    }

    pub fn zzz_444() -> EntryId {
        EntryId::from_uuid(Uuid::from_u128(4))
    }

    pub fn zzz_555() -> EntryId {
        EntryId::from_uuid(Uuid::from_u128(5))
    }

    /// An identifier no fixture uses
    pub fn missing() -> EntryId {
        EntryId::from_uuid(Uuid::from_u128(99))
    }
}

/// Fixture for entries and the results expected from them
pub struct EntryFixtures;

impl EntryFixtures {
    /// All four reference entries
    pub fn all() -> Vec<Entry> {
        vec![
            entry(IdFixtures::aaa_111(), "aaa", "111"),
            entry(IdFixtures::aaa_222(), "aaa", "222"),
            entry(IdFixtures::zzz_444(), "zzz", "444"),
            entry(IdFixtures::zzz_555(), "zzz", "555"),
        ]
    }

    /// One projection per entry
    pub fn category_amounts() -> Vec<CategoryTotal> {
        Self::all()
            .into_iter()
            .map(|e| CategoryTotal::new(e.category(), e.amount()))
            .collect()
    }

    /// Sum of every amount
    pub fn grand_total() -> CustomNumber {
        number("1332.0")
    }

    /// Sums per category
    pub fn category_totals() -> Vec<CategoryTotal> {
        vec![
            CategoryTotal::new("aaa", number("333.0")),
            CategoryTotal::new("zzz", number("999.0")),
        ]
    }
}

fn entry(id: EntryId, category: &str, amount: &str) -> Entry {
    Entry::new(id, category, number(amount))
}

/// Parses a fixture amount
///
/// # Panics
///
/// Panics if `value` is not a decimal literal
pub fn number(value: &str) -> CustomNumber {
    CustomNumber::parse(value).expect("fixture amounts are valid decimals")
}
