//! Strongly-typed identifiers for stored entities
//!
//! A newtype around a UUID keeps entry identifiers from being mixed up with
//! any other UUID flowing through the query layer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

const ENTRY_PREFIX: &str = "ENT-";

/// Identifier of a stored entry
///
/// Displays as `ENT-<uuid>`; serializes and is stored as the bare UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(Uuid);

impl EntryId {
    /// Creates a new random identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", ENTRY_PREFIX, self.0)
    }
}

/// Accepts both the displayed `ENT-<uuid>` form and the bare stored UUID
impl FromStr for EntryId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let uuid = s.strip_prefix(ENTRY_PREFIX).unwrap_or(s);
        Ok(Self(Uuid::parse_str(uuid)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_id_display() {
        let id = EntryId::new();
        assert!(id.to_string().starts_with("ENT-"));
    }

    #[test]
    fn test_parse_without_prefix() {
        let id: EntryId = "00000000-0000-0000-0000-000000000001".parse().unwrap();
        assert_eq!(id.as_uuid().as_u128(), 1);
    }
}
