//! Entry entity and projections

use core_kernel::{CustomNumber, EntryId};
use serde::{Deserialize, Serialize};

/// A stored entry: an amount booked under a category
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entry {
    id: EntryId,
    category: String,
    amount: CustomNumber,
}

impl Entry {
    pub fn new(id: EntryId, category: impl Into<String>, amount: CustomNumber) -> Self {
        Self {
            id,
            category: category.into(),
            amount,
        }
    }

    pub fn id(&self) -> EntryId {
        self.id
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn amount(&self) -> CustomNumber {
        self.amount
    }
}

/// A category paired with an amount, either per entry or summed per category
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: CustomNumber,
}

impl CategoryTotal {
    pub fn new(category: impl Into<String>, amount: CustomNumber) -> Self {
        Self {
            category: category.into(),
            amount,
        }
    }
}
