//! Translation of sparse caller filters into typed predicates.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::query::fields::{Bound, ColumnType, FieldDef, FieldRegistry, FilterKind, FilterTarget};
use crate::query::{QueryError, QueryResult};

/// Sparse set of optional constraints supplied by the caller.
///
/// Keys are API field names (optionally with a range suffix such as
/// `amountMin`). A key mapped to `None` never narrows the result.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterSpec {
    entries: BTreeMap<String, Option<Value>>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style variant of [`FilterSpec::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, Some(value.into()));
        self
    }

    /// Sets the constraint for `key`; JSON `null` is stored as absent.
    pub fn insert(&mut self, key: impl Into<String>, value: Option<Value>) {
        let value = value.filter(|value| !value.is_null());
        self.entries.insert(key.into(), value);
    }

    /// Builds a filter from decoded query-string pairs.
    ///
    /// Repeated keys collect into an array, empty values leave the key
    /// unconstrained.
    pub fn from_query_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let mut entries: BTreeMap<String, Option<Value>> = BTreeMap::new();
        for (key, value) in pairs {
            let slot = entries.entry(key.into()).or_insert(None);
            let value = value.as_ref().trim();
            if value.is_empty() {
                continue;
            }
            let value = Value::String(value.to_string());
            *slot = match slot.take() {
                None => Some(value),
                Some(Value::Array(mut values)) => {
                    values.push(value);
                    Some(Value::Array(values))
                }
                Some(previous) => Some(Value::Array(vec![previous, value])),
            };
        }
        Self { entries }
    }

    /// Returns `true` when no key carries a constraint.
    pub fn is_unconstrained(&self) -> bool {
        self.entries.values().all(Option::is_none)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&Value>)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_ref()))
    }
}

/// Value bound into a parameterized statement.
#[derive(Clone, Debug, PartialEq, PartialOrd)]
pub enum SqlValue {
    Text(String),
    Integer(i64),
    Timestamp(NaiveDateTime),
}

/// Comparison applied to a single column.
#[derive(Clone, Debug, PartialEq)]
pub enum Condition {
    Eq(SqlValue),
    Gte(SqlValue),
    Lte(SqlValue),
    Between(SqlValue, SqlValue),
    In(Vec<SqlValue>),
}

/// A single column/operator/value constraint.
#[derive(Clone, Debug, PartialEq)]
pub struct Predicate {
    pub column: &'static str,
    pub condition: Condition,
}

/// Converts a filter into the predicates the rows must jointly satisfy.
///
/// Every key is resolved first, so an unknown key fails even when its value
/// is absent. Each constrained key then yields exactly one predicate; an
/// unconstrained filter yields none and therefore matches every row.
pub fn build_predicates(registry: &FieldRegistry, spec: &FilterSpec) -> QueryResult<Vec<Predicate>> {
    let mut predicates = Vec::new();

    for (key, value) in spec.iter() {
        let target = registry
            .resolve_filter(key)
            .ok_or_else(|| QueryError::UnknownFilterField(key.to_string()))?;

        let Some(value) = value else {
            continue;
        };

        predicates.push(Predicate {
            column: target.field.column,
            condition: condition(&target, value)?,
        });
    }

    Ok(predicates)
}

fn condition(target: &FilterTarget<'_>, value: &Value) -> QueryResult<Condition> {
    let field = target.field;
    match (target.kind, target.bound) {
        (FilterKind::Range, Bound::Lower) => Ok(Condition::Gte(coerce(field, value)?)),
        (FilterKind::Range, Bound::Upper) => Ok(Condition::Lte(coerce(field, value)?)),
        (FilterKind::Range, Bound::Exact) => match value {
            Value::Object(bounds) => range_condition(field, bounds),
            _ => Ok(Condition::Eq(coerce(field, value)?)),
        },
        (FilterKind::Set, _) => match value {
            Value::Array(items) if items.is_empty() => Err(QueryError::invalid_value(
                field,
                "expected at least one value",
            )),
            Value::Array(items) => items
                .iter()
                .map(|item| coerce(field, item))
                .collect::<QueryResult<Vec<_>>>()
                .map(Condition::In),
            _ => Ok(Condition::Eq(coerce(field, value)?)),
        },
        (FilterKind::Equality, _) => Ok(Condition::Eq(coerce(field, value)?)),
    }
}

fn range_condition(field: &FieldDef, bounds: &Map<String, Value>) -> QueryResult<Condition> {
    let mut lower = None;
    let mut upper = None;

    for (key, value) in bounds {
        let slot = match key.to_ascii_lowercase().as_str() {
            "min" | "from" => &mut lower,
            "max" | "to" => &mut upper,
            _ => {
                return Err(QueryError::invalid_value(
                    field,
                    format!("unexpected range bound `{key}`"),
                ));
            }
        };
        if !value.is_null() {
            *slot = Some(coerce(field, value)?);
        }
    }

    match (lower, upper) {
        (Some(lower), Some(upper)) => Ok(Condition::Between(lower, upper)),
        (Some(lower), None) => Ok(Condition::Gte(lower)),
        (None, Some(upper)) => Ok(Condition::Lte(upper)),
        (None, None) => Err(QueryError::invalid_value(
            field,
            "expected a `min` or `max` bound",
        )),
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Coerces a JSON scalar into the column's bind type.
fn coerce(field: &FieldDef, value: &Value) -> QueryResult<SqlValue> {
    let mismatch = |expected: &str| {
        QueryError::invalid_value(
            field,
            format!("expected {expected}, got {}", describe(value)),
        )
    };

    match (field.column_type, value) {
        (ColumnType::Text, Value::String(text)) => text_value(field, text),
        (ColumnType::Text, _) => Err(mismatch("a string")),

        (ColumnType::Integer, Value::Number(number)) => number
            .as_i64()
            .map(SqlValue::Integer)
            .ok_or_else(|| mismatch("an integer")),
        (ColumnType::Integer, Value::String(text)) => text
            .trim()
            .parse::<i64>()
            .map(SqlValue::Integer)
            .map_err(|_| QueryError::invalid_value(field, format!("`{text}` is not an integer"))),
        (ColumnType::Integer, _) => Err(mismatch("an integer")),

        (ColumnType::Timestamp, Value::String(text)) => parse_timestamp(text)
            .map(SqlValue::Timestamp)
            .ok_or_else(|| QueryError::invalid_value(field, format!("`{text}` is not a timestamp"))),
        (ColumnType::Timestamp, _) => Err(mismatch("a timestamp string")),

        (ColumnType::Uuid, Value::String(text)) => Uuid::parse_str(text.trim())
            .map(|uuid| SqlValue::Text(uuid.hyphenated().to_string()))
            .map_err(|_| QueryError::invalid_value(field, format!("`{text}` is not a UUID"))),
        (ColumnType::Uuid, _) => Err(mismatch("a UUID string")),
    }
}

fn text_value(field: &FieldDef, text: &str) -> QueryResult<SqlValue> {
    let Some(allowed) = field.values else {
        if field.upper_case {
            return Ok(SqlValue::Text(text.trim().to_ascii_uppercase()));
        }
        return Ok(SqlValue::Text(text.to_string()));
    };

    allowed
        .iter()
        .find(|candidate| candidate.eq_ignore_ascii_case(text.trim()))
        .map(|canonical| SqlValue::Text((*canonical).to_string()))
        .ok_or_else(|| {
            QueryError::invalid_value(
                field,
                format!("`{text}` is not one of {}", allowed.join(", ")),
            )
        })
}

/// Accepts RFC 3339, ISO-8601 without offset, SQL-style and plain dates.
fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.naive_utc());
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    const STATUSES: &[&str] = &["ACTIVE", "BLOCKED"];

    static FIELDS: FieldRegistry = FieldRegistry::new(
        "payments",
        "id",
        &[
            FieldDef::new("id", "id", ColumnType::Integer).filter(FilterKind::Range),
            FieldDef::new("status", "status", ColumnType::Text)
                .filter(FilterKind::Set)
                .one_of(STATUSES),
            FieldDef::new("merchant", "merchant", ColumnType::Text).filter(FilterKind::Equality),
            FieldDef::new("amount", "amount", ColumnType::Integer).filter(FilterKind::Range),
            FieldDef::new("createdAt", "created_at", ColumnType::Timestamp)
                .filter(FilterKind::Range),
            FieldDef::new("reference", "reference", ColumnType::Uuid)
                .filter(FilterKind::Equality),
            FieldDef::new("currency", "currency", ColumnType::Text)
                .filter(FilterKind::Set)
                .upper_case(),
        ],
    );

    fn midnight(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn empty_spec_emits_no_predicates() {
        assert!(build_predicates(&FIELDS, &FilterSpec::new()).unwrap().is_empty());
    }

    #[test]
    fn absent_values_emit_nothing() {
        let mut spec = FilterSpec::new();
        spec.insert("merchant", None);
        spec.insert("amountMin", Some(Value::Null));
        assert!(spec.is_unconstrained());
        assert!(build_predicates(&FIELDS, &spec).unwrap().is_empty());
    }

    #[test]
    fn each_constrained_key_emits_one_predicate() {
        let spec = FilterSpec::new()
            .with("merchant", "ACME")
            .with("amountMin", 100)
            .with("amountMax", "500");
        let predicates = build_predicates(&FIELDS, &spec).unwrap();
        assert_eq!(
            predicates,
            vec![
                Predicate {
                    column: "amount",
                    condition: Condition::Lte(SqlValue::Integer(500)),
                },
                Predicate {
                    column: "amount",
                    condition: Condition::Gte(SqlValue::Integer(100)),
                },
                Predicate {
                    column: "merchant",
                    condition: Condition::Eq(SqlValue::Text("ACME".into())),
                },
            ]
        );
    }

    #[test]
    fn one_sided_range_objects_emit_a_single_comparison() {
        let spec = FilterSpec::new().with("amount", json!({ "min": 100 }));
        let predicates = build_predicates(&FIELDS, &spec).unwrap();
        assert_eq!(predicates[0].condition, Condition::Gte(SqlValue::Integer(100)));

        let spec = FilterSpec::new().with("createdAt", json!({ "to": "2024-02-01" }));
        let predicates = build_predicates(&FIELDS, &spec).unwrap();
        assert_eq!(
            predicates[0].condition,
            Condition::Lte(SqlValue::Timestamp(midnight(2024, 2, 1)))
        );
    }

    #[test]
    fn two_sided_range_object_becomes_between() {
        let spec = FilterSpec::new().with("amount", json!({ "min": 1, "max": 9 }));
        let predicates = build_predicates(&FIELDS, &spec).unwrap();
        assert_eq!(
            predicates[0].condition,
            Condition::Between(SqlValue::Integer(1), SqlValue::Integer(9))
        );
    }

    #[test]
    fn empty_range_object_is_rejected() {
        let spec = FilterSpec::new().with("amount", json!({}));
        let err = build_predicates(&FIELDS, &spec).unwrap_err();
        assert!(matches!(err, QueryError::InvalidFilterValue { ref field, .. } if field == "amount"));
    }

    #[test]
    fn set_fields_accept_scalars_and_lists() {
        let spec = FilterSpec::new().with("status", "active");
        let predicates = build_predicates(&FIELDS, &spec).unwrap();
        assert_eq!(predicates[0].condition, Condition::Eq(SqlValue::Text("ACTIVE".into())));

        let spec = FilterSpec::new().with("status", json!(["ACTIVE", "blocked"]));
        let predicates = build_predicates(&FIELDS, &spec).unwrap();
        assert_eq!(
            predicates[0].condition,
            Condition::In(vec![
                SqlValue::Text("ACTIVE".into()),
                SqlValue::Text("BLOCKED".into()),
            ])
        );
    }

    #[test]
    fn empty_set_is_rejected() {
        let spec = FilterSpec::new().with("status", json!([]));
        assert!(matches!(
            build_predicates(&FIELDS, &spec),
            Err(QueryError::InvalidFilterValue { .. })
        ));
    }

    #[test]
    fn values_outside_the_allow_list_are_rejected() {
        let spec = FilterSpec::new().with("status", "DELETED");
        assert!(matches!(
            build_predicates(&FIELDS, &spec),
            Err(QueryError::InvalidFilterValue { .. })
        ));
    }

    #[test]
    fn unknown_keys_fail_even_without_a_value() {
        let mut spec = FilterSpec::new();
        spec.insert("bogusField", None);
        let err = build_predicates(&FIELDS, &spec).unwrap_err();
        assert!(matches!(err, QueryError::UnknownFilterField(ref key) if key == "bogusField"));
        assert!(err.is_client_error());
    }

    #[test]
    fn type_mismatches_are_rejected() {
        for spec in [
            FilterSpec::new().with("amountMin", "lots"),
            FilterSpec::new().with("amount", 1.5),
            FilterSpec::new().with("merchant", 42),
            FilterSpec::new().with("merchant", json!(["a", "b"])),
            FilterSpec::new().with("createdAtFrom", "yesterday"),
            FilterSpec::new().with("reference", "not-a-uuid"),
        ] {
            assert!(
                matches!(
                    build_predicates(&FIELDS, &spec),
                    Err(QueryError::InvalidFilterValue { .. })
                ),
                "{spec:?} should be rejected"
            );
        }
    }

    #[test]
    fn scalars_are_coerced_per_column_type() {
        let spec = FilterSpec::new()
            .with("reference", "67E55044-10B1-426F-9247-BB680E5FE0C8")
            .with("currency", json!([" eur", "Usd"]))
            .with("createdAtFrom", "2024-01-02T03:04:05+02:00");
        let predicates = build_predicates(&FIELDS, &spec).unwrap();
        let conditions: Vec<_> = predicates.into_iter().map(|p| p.condition).collect();
        assert_eq!(
            conditions,
            vec![
                Condition::Gte(SqlValue::Timestamp(
                    NaiveDate::from_ymd_opt(2024, 1, 2)
                        .unwrap()
                        .and_hms_opt(1, 4, 5)
                        .unwrap()
                )),
                Condition::In(vec![
                    SqlValue::Text("EUR".into()),
                    SqlValue::Text("USD".into()),
                ]),
                Condition::Eq(SqlValue::Text(
                    "67e55044-10b1-426f-9247-bb680e5fe0c8".into()
                )),
            ]
        );
    }

    #[test]
    fn query_pairs_collect_repeated_keys_and_skip_blanks() {
        let spec = FilterSpec::from_query_pairs([
            ("status", "ACTIVE"),
            ("status", "BLOCKED"),
            ("merchant", " "),
        ]);
        let entries: Vec<_> = spec.iter().collect();
        assert_eq!(
            entries,
            vec![
                ("merchant", None),
                ("status", Some(&json!(["ACTIVE", "BLOCKED"]))),
            ]
        );
    }

    #[test]
    fn deserializes_from_json_objects() {
        let spec: FilterSpec =
            serde_json::from_value(json!({ "status": "ACTIVE", "merchant": null })).unwrap();
        let predicates = build_predicates(&FIELDS, &spec).unwrap();
        assert_eq!(predicates.len(), 1);
        assert_eq!(predicates[0].column, "status");
    }
}
