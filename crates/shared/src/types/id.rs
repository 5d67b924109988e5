//! Typed IDs for type-safe entity references.
//!
//! Using typed IDs prevents accidentally passing a `BudgetId` where an `ExpenseId` is expected.
//! Identifiers are assigned by the store (auto-increment) and never minted by the application.

use serde::{Deserialize, Serialize};

/// Macro to generate typed ID wrappers around store-assigned integer keys.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// Wraps a raw store key.
            #[must_use]
            pub const fn from_raw(raw: i64) -> Self {
                Self(raw)
            }

            /// Returns the inner store key.
            #[must_use]
            pub const fn into_inner(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.trim().parse()?))
            }
        }
    };
}

typed_id!(ExpenseId, "Unique identifier for an expense.");
typed_id!(BudgetId, "Unique identifier for a weekly budget.");

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    #[test]
    fn test_typed_id_round_trip() {
        let id = ExpenseId::from_raw(42);
        assert_eq!(id.into_inner(), 42);
        assert_eq!(ExpenseId::from(42), id);
    }

    #[test]
    fn test_typed_id_display() {
        assert_eq!(BudgetId::from_raw(7).to_string(), "7");
    }

    #[rstest]
    #[case("1", 1)]
    #[case(" 15 ", 15)]
    #[case("-3", -3)]
    fn test_typed_id_from_str(#[case] raw: &str, #[case] expected: i64) {
        assert_eq!(ExpenseId::from_str(raw).unwrap().into_inner(), expected);
    }

    #[rstest]
    #[case("abc")]
    #[case("")]
    #[case("1.5")]
    fn test_typed_id_from_str_error(#[case] raw: &str) {
        assert!(ExpenseId::from_str(raw).is_err());
    }

    #[test]
    fn test_typed_id_serializes_transparently() {
        let json = serde_json::to_string(&ExpenseId::from_raw(9)).unwrap();
        assert_eq!(json, "9");
    }
}
