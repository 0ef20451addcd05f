//! Field filters for store queries
//!
//! A query is a conjunction of single-field filters, the same vocabulary the
//! invoicing procedures need: `>=` / `<` for the purchase-date windows and
//! `==` for the product-code lookup.
//!
//! Values are compared chronologically when both sides parse as RFC 3339
//! timestamps, numerically when both are JSON numbers, and lexically for
//! other strings. Mixed or non-comparable types never match.

use chrono::{DateTime, Utc};
use serde_json::Value;
use std::cmp::Ordering;

use crate::core::document::Fields;

/// Comparison operator of a [`Filter`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterOp {
    /// Field equals the value.
    Eq,
    /// Field is greater than or equal to the value.
    Gte,
    /// Field is strictly less than the value.
    Lt,
}

/// A single-field query filter.
#[derive(Clone, Debug)]
pub struct Filter {
    pub field: String,
    pub op: FilterOp,
    pub value: Value,
}

impl Filter {
    pub fn new(field: impl Into<String>, op: FilterOp, value: Value) -> Self {
        Self {
            field: field.into(),
            op,
            value,
        }
    }

    pub fn eq(field: impl Into<String>, value: Value) -> Self {
        Self::new(field, FilterOp::Eq, value)
    }

    pub fn gte(field: impl Into<String>, value: Value) -> Self {
        Self::new(field, FilterOp::Gte, value)
    }

    pub fn lt(field: impl Into<String>, value: Value) -> Self {
        Self::new(field, FilterOp::Lt, value)
    }

    /// Whether a document's field map satisfies this filter.
    ///
    /// A missing field never matches.
    pub fn matches(&self, fields: &Fields) -> bool {
        let Some(actual) = fields.get(&self.field) else {
            return false;
        };
        match compare_values(actual, &self.value) {
            Some(ordering) => match self.op {
                FilterOp::Eq => ordering == Ordering::Equal,
                FilterOp::Gte => ordering != Ordering::Less,
                FilterOp::Lt => ordering == Ordering::Less,
            },
            None => false,
        }
    }
}

/// Whether a document's field map satisfies every filter in the slice.
pub fn matches_all(fields: &Fields, filters: &[Filter]) -> bool {
    filters.iter().all(|filter| filter.matches(fields))
}

/// Compare two JSON values for filtering purposes.
///
/// RFC 3339 string pairs compare as instants, so `00:00:00Z` and
/// `00:00:00.000Z` order correctly regardless of their textual form.
fn compare_values(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::String(a), Value::String(b)) => {
            match (parse_timestamp(a), parse_timestamp(b)) {
                (Some(ta), Some(tb)) => Some(ta.cmp(&tb)),
                _ => Some(a.cmp(b)),
            }
        }
        (Value::Number(a), Value::Number(b)) => {
            let (a, b) = (a.as_f64()?, b.as_f64()?);
            a.partial_cmp(&b)
        }
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> Fields {
        match json!({ "dataCompra": value }) {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_eq_on_strings() {
        let mut f = Fields::new();
        f.insert("codProduto".to_string(), json!("P001"));
        assert!(Filter::eq("codProduto", json!("P001")).matches(&f));
        assert!(!Filter::eq("codProduto", json!("P002")).matches(&f));
    }

    #[test]
    fn test_missing_field_never_matches() {
        let f = fields(json!("2025-01-15T00:00:00Z"));
        assert!(!Filter::eq("nomeCliente", json!("x")).matches(&f));
    }

    #[test]
    fn test_timestamp_window() {
        let f = fields(json!("2025-01-15T00:00:00Z"));
        let start = json!("2025-01-01T00:00:00Z");
        let end = json!("2025-02-01T00:00:00Z");
        assert!(matches_all(
            &f,
            &[
                Filter::gte("dataCompra", start.clone()),
                Filter::lt("dataCompra", end.clone()),
            ],
        ));

        let feb = fields(json!("2025-02-15T00:00:00Z"));
        assert!(!matches_all(
            &feb,
            &[Filter::gte("dataCompra", start), Filter::lt("dataCompra", end)],
        ));
    }

    #[test]
    fn test_timestamps_compare_as_instants_not_text() {
        // Textually "00.500Z" sorts before "00Z", chronologically it is later.
        let f = fields(json!("2025-01-01T00:00:00.500Z"));
        assert!(Filter::gte("dataCompra", json!("2025-01-01T00:00:00Z")).matches(&f));
    }

    #[test]
    fn test_numbers_compare_numerically() {
        let mut f = Fields::new();
        f.insert("a".to_string(), json!(10));
        assert!(Filter::gte("a", json!(2)).matches(&f));
        assert!(Filter::lt("a", json!(10.5)).matches(&f));
    }

    #[test]
    fn test_mixed_types_never_match() {
        let mut f = Fields::new();
        f.insert("a".to_string(), json!(10));
        assert!(!Filter::eq("a", json!("10")).matches(&f));
    }
}
