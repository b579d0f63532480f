//! Row decoding
//!
//! SQLite columns are dynamically typed, so each value is read by the storage
//! class it actually has at runtime, not by a declared column type. The
//! result is what native coercion starts from.

use query_dsl::RawValue;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, TypeInfo, ValueRef};

use crate::error::DatabaseError;

/// Decodes every column of a row, in select order
pub fn decode_row(row: &SqliteRow) -> Result<Vec<RawValue>, DatabaseError> {
    (0..row.len()).map(|index| decode_column(row, index)).collect()
}

fn decode_column(row: &SqliteRow, index: usize) -> Result<RawValue, DatabaseError> {
    let value = row.try_get_raw(index)?;
    if value.is_null() {
        return Ok(RawValue::Null);
    }
    let storage_class = value.type_info().name().to_owned();

    let raw = match storage_class.as_str() {
        "INTEGER" | "BOOLEAN" => RawValue::Integer(row.try_get_unchecked::<i64, _>(index)?),
        "REAL" => RawValue::Real(row.try_get_unchecked::<f64, _>(index)?),
        "TEXT" | "NUMERIC" | "DATE" | "TIME" | "DATETIME" => {
            RawValue::Text(row.try_get_unchecked::<String, _>(index)?)
        }
        other => {
            return Err(DatabaseError::SerializationError(format!(
                "column {} has unsupported storage class {}",
                index, other
            )))
        }
    };
    Ok(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{create_pool, DatabaseConfig};

    #[tokio::test]
    async fn test_decodes_runtime_storage_classes() {
        let pool = create_pool(DatabaseConfig::in_memory()).await.unwrap();
        let row = sqlx::query("SELECT 1, 2.5, 'x', NULL")
            .fetch_one(&pool)
            .await
            .unwrap();

        assert_eq!(
            decode_row(&row).unwrap(),
            vec![
                RawValue::Integer(1),
                RawValue::Real(2.5),
                RawValue::from("x"),
                RawValue::Null,
            ]
        );
    }

    #[tokio::test]
    async fn test_blob_is_rejected() {
        let pool = create_pool(DatabaseConfig::in_memory()).await.unwrap();
        let row = sqlx::query("SELECT x'00'").fetch_one(&pool).await.unwrap();

        let err = decode_row(&row).unwrap_err();
        assert!(matches!(err, DatabaseError::SerializationError(_)));
    }
}
