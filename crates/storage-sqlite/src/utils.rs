//! Helpers shared by the SQLite repositories.

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::errors::StorageError;

/// Largest number of ids bound into a single `IN (...)` clause.
///
/// SQLite limits the parameters of one statement (999 on older builds), so
/// long id lists are queried in chunks of this size.
pub const SQLITE_MAX_PARAMS_CHUNK: usize = 500;

/// Splits `items` into slices small enough for one `IN (...)` query.
pub fn chunk_for_sqlite<T>(items: &[T]) -> impl Iterator<Item = &[T]> {
    items.chunks(SQLITE_MAX_PARAMS_CHUNK)
}

/// Parses a decimal stored as text. Money and effort are stored as text so
/// no precision is lost to SQLite's floating point.
pub fn parse_decimal(value: &str, field_name: &str) -> Result<Decimal, StorageError> {
    Decimal::from_str(value.trim()).map_err(|e| {
        StorageError::InvalidValue(format!("{field_name} '{value}' is not a decimal: {e}"))
    })
}

pub fn parse_optional_decimal(
    value: Option<&str>,
    field_name: &str,
) -> Result<Option<Decimal>, StorageError> {
    value.map(|v| parse_decimal(v, field_name)).transpose()
}

/// Parses an enum stored by its display name.
pub fn parse_enum<T: FromStr>(value: &str, field_name: &str) -> Result<T, StorageError> {
    T::from_str(value)
        .map_err(|_| StorageError::InvalidValue(format!("{field_name} '{value}' is not known")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use procat_core::projects::ChargingPolicy;

    #[test]
    fn test_chunk_for_sqlite_over_limit() {
        let items: Vec<i32> = (0..1200).collect();
        let chunks: Vec<_> = chunk_for_sqlite(&items).collect();
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].len(), SQLITE_MAX_PARAMS_CHUNK);
        assert_eq!(chunks[2].len(), 200);
    }

    #[test]
    fn test_chunk_for_sqlite_empty() {
        let items: Vec<i32> = vec![];
        assert_eq!(chunk_for_sqlite(&items).count(), 0);
    }

    #[test]
    fn test_parse_decimal_keeps_precision() {
        assert_eq!(
            parse_decimal("468.75", "amount").unwrap().to_string(),
            "468.75"
        );
        assert!(parse_decimal("abc", "amount").is_err());
        assert_eq!(parse_optional_decimal(None, "amount").unwrap(), None);
    }

    #[test]
    fn test_parse_enum_uses_display_names() {
        let policy: ChargingPolicy = parse_enum("Pro-rata", "charging").unwrap();
        assert_eq!(policy, ChargingPolicy::ProRata);
        assert!(parse_enum::<ChargingPolicy>("Weekly", "charging").is_err());
    }
}
