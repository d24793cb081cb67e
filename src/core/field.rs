//! Field value types used by filtering, searching and ordering

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::fmt;

/// A polymorphic field value read out of an entity through its registry
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Integer(i64),
    Decimal(Decimal),
    String(String),
    DateTime(DateTime<Utc>),
    Null,
}

impl FieldValue {
    fn rank(&self) -> u8 {
        match self {
            FieldValue::Null => 0,
            FieldValue::Integer(_) => 1,
            FieldValue::Decimal(_) => 2,
            FieldValue::String(_) => 3,
            FieldValue::DateTime(_) => 4,
        }
    }

    /// Total order over field values.
    ///
    /// Null sorts before everything else. Values of the same kind use their
    /// natural order; mixed kinds fall back to a fixed kind rank so the order
    /// stays total.
    pub fn total_cmp(&self, other: &FieldValue) -> Ordering {
        match (self, other) {
            (FieldValue::Integer(a), FieldValue::Integer(b)) => a.cmp(b),
            (FieldValue::Decimal(a), FieldValue::Decimal(b)) => a.cmp(b),
            (FieldValue::String(a), FieldValue::String(b)) => a.cmp(b),
            (FieldValue::DateTime(a), FieldValue::DateTime(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }

    /// Equality against a raw request literal.
    ///
    /// Numeric kinds compare numerically after parsing, so `10.5` matches a
    /// stored `10.50`. A literal that does not parse for the field's kind
    /// matches nothing.
    pub fn matches_literal(&self, literal: &str) -> bool {
        match self {
            FieldValue::Integer(i) => literal.parse::<i64>().is_ok_and(|v| v == *i),
            FieldValue::Decimal(d) => literal.parse::<Decimal>().is_ok_and(|v| v == *d),
            FieldValue::String(s) => s == literal,
            FieldValue::DateTime(dt) => {
                if let Ok(parsed) = DateTime::parse_from_rfc3339(literal) {
                    return parsed.with_timezone(&Utc) == *dt;
                }
                NaiveDate::parse_from_str(literal, "%Y-%m-%d")
                    .is_ok_and(|date| date == dt.date_naive())
            }
            FieldValue::Null => false,
        }
    }

    /// Case-insensitive substring test; `needle` must already be lowercase.
    pub fn contains_folded(&self, needle: &str) -> bool {
        match self {
            FieldValue::String(s) => s.to_lowercase().contains(needle),
            FieldValue::Null => false,
            other => other.to_string().to_lowercase().contains(needle),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Integer(i) => write!(f, "{}", i),
            FieldValue::Decimal(d) => write!(f, "{}", d),
            FieldValue::String(s) => write!(f, "{}", s),
            FieldValue::DateTime(dt) => write!(f, "{}", dt.to_rfc3339()),
            FieldValue::Null => write!(f, "null"),
        }
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Integer(i64::from(value))
    }
}

impl From<Decimal> for FieldValue {
    fn from(value: Decimal) -> Self {
        FieldValue::Decimal(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        FieldValue::DateTime(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_none_becomes_null() {
        assert_eq!(FieldValue::from(None::<i64>), FieldValue::Null);
        assert_eq!(FieldValue::from(Some(3_i32)), FieldValue::Integer(3));
    }

    #[test]
    fn test_null_sorts_first() {
        let null = FieldValue::Null;
        assert_eq!(null.total_cmp(&FieldValue::Integer(-5)), Ordering::Less);
        assert_eq!(FieldValue::from("a").total_cmp(&null), Ordering::Greater);
        assert_eq!(null.total_cmp(&FieldValue::Null), Ordering::Equal);
    }

    #[test]
    fn test_same_kind_natural_order() {
        assert_eq!(
            FieldValue::from(2_i64).total_cmp(&FieldValue::from(10_i64)),
            Ordering::Less
        );
        let ten_fifty = FieldValue::from(Decimal::new(1050, 2));
        let ten_five = FieldValue::from(Decimal::new(105, 1));
        assert_eq!(ten_fifty.total_cmp(&ten_five), Ordering::Equal);
        assert_eq!(
            FieldValue::from("beta").total_cmp(&FieldValue::from("alpha")),
            Ordering::Greater
        );
    }

    #[test]
    fn test_matches_literal_numeric() {
        assert!(FieldValue::Integer(30).matches_literal("30"));
        assert!(!FieldValue::Integer(30).matches_literal("abc"));
        assert!(FieldValue::Decimal(Decimal::new(1050, 2)).matches_literal("10.5"));
        assert!(!FieldValue::Decimal(Decimal::new(1050, 2)).matches_literal("10.51"));
    }

    #[test]
    fn test_matches_literal_string_is_exact() {
        let value = FieldValue::from("Spa");
        assert!(value.matches_literal("Spa"));
        assert!(!value.matches_literal("spa"));
    }

    #[test]
    fn test_matches_literal_datetime() {
        let dt = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let value = FieldValue::from(dt);
        assert!(value.matches_literal("2024-03-01"));
        assert!(value.matches_literal("2024-03-01T12:00:00Z"));
        assert!(!value.matches_literal("2024-03-02"));
        assert!(!FieldValue::Null.matches_literal("null"));
    }

    #[test]
    fn test_contains_folded() {
        let value = FieldValue::from("Weekend SPA Retreat");
        assert!(value.contains_folded("spa"));
        assert!(!value.contains_folded("yoga"));
        assert!(FieldValue::Integer(1234).contains_folded("23"));
        assert!(!FieldValue::Null.contains_folded(""));
    }
}
