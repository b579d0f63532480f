//! Attribute codecs for entry columns
//!
//! SQLite has no decimal or UUID column type, so both are stored as text and
//! converted here when an attribute is read or bound.

use core_kernel::{CustomNumber, EntryId};
use query_dsl::{QueryError, RawValue, TypeDescriptor, ValueCodec};
use std::str::FromStr;

/// Declared type of custom-number attributes
pub const CUSTOM_NUMBER: TypeDescriptor = TypeDescriptor::custom("CustomNumber");

/// Declared type of entry identifiers
pub const ENTRY_ID: TypeDescriptor = TypeDescriptor::custom("EntryId");

/// Stores a `CustomNumber` as its decimal text
#[derive(Debug, Default, Clone, Copy)]
pub struct CustomNumberCodec;

impl ValueCodec<CustomNumber> for CustomNumberCodec {
    fn encode(&self, value: &CustomNumber) -> RawValue {
        RawValue::Text(value.to_string())
    }

    fn decode(&self, raw: RawValue) -> Result<CustomNumber, QueryError> {
        match raw {
            RawValue::Text(text) => {
                CustomNumber::parse(&text).map_err(|e| QueryError::conversion(e.to_string()))
            }
            RawValue::Decimal(value) => Ok(CustomNumber::new(value)),
            other => Err(QueryError::type_mismatch("Text", &other)),
        }
    }
}

/// Stores an `EntryId` as its bare hyphenated UUID
#[derive(Debug, Default, Clone, Copy)]
pub struct EntryIdCodec;

impl ValueCodec<EntryId> for EntryIdCodec {
    fn encode(&self, value: &EntryId) -> RawValue {
        RawValue::Text(value.as_uuid().to_string())
    }

    fn decode(&self, raw: RawValue) -> Result<EntryId, QueryError> {
        match raw {
            RawValue::Text(text) => {
                EntryId::from_str(&text).map_err(|e| QueryError::conversion(e.to_string()))
            }
            other => Err(QueryError::type_mismatch("Text", &other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_custom_number_codec_round_trip() {
        let value = CustomNumber::parse("444").unwrap();
        let raw = CustomNumberCodec.encode(&value);
        assert_eq!(raw, RawValue::from("444"));
        assert_eq!(CustomNumberCodec.decode(raw).unwrap(), value);
    }

    #[test]
    fn test_custom_number_codec_accepts_decimal() {
        let decoded = CustomNumberCodec.decode(RawValue::Decimal(dec!(1.5))).unwrap();
        assert_eq!(decoded, CustomNumber::new(dec!(1.5)));
    }

    #[test]
    fn test_custom_number_codec_rejects_bad_text() {
        let err = CustomNumberCodec.decode(RawValue::from("abc")).unwrap_err();
        assert!(matches!(err, QueryError::Conversion(_)));
    }

    #[test]
    fn test_entry_id_codec_stores_bare_uuid() {
        let id: EntryId = "00000000-0000-0000-0000-000000000002".parse().unwrap();
        assert_eq!(
            EntryIdCodec.encode(&id),
            RawValue::from("00000000-0000-0000-0000-000000000002")
        );
    }

    #[test]
    fn test_entry_id_codec_rejects_integer() {
        let err = EntryIdCodec.decode(RawValue::Integer(2)).unwrap_err();
        assert!(err.is_type_mismatch());
    }
}
