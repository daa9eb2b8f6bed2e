//! In-memory document collection.
//!
//! Executes rendered predicate documents against JSON records with the
//! document store's matching rules:
//!
//! - a missing field reads as null for `$eq`, `$ne`, `$in` and `$nin`
//! - `$gt`/`$gte`/`$lt`/`$lte` only match values in the same type bracket
//!   (numbers together, strings together, object ids together); `$gte: null`
//!   and `$lte: null` match null fields
//! - `$not` is the logical negation of its operator document
//! - `$ne` is `!$eq`, `$nin` is `!$in`
//!
//! Records keep their insertion order.

use std::{cmp::Ordering, str::FromStr};

use rust_decimal::Decimal;
use serde_json::{Map, Value as Json};
use tracing::{debug, warn};

use crate::{
    error::StoreError, object_id::ObjectId, parser::json_kind, predicate::Predicate, value::Scalar,
};

#[derive(Debug, Clone, Default)]
pub struct MemoryCollection {
    name: String,
    records: Vec<Json>,
}

impl MemoryCollection {
    pub fn new(name: impl Into<String>) -> Self {
        MemoryCollection {
            name: name.into(),
            records: Vec::new(),
        }
    }

    pub fn with_records(name: impl Into<String>, records: Vec<Json>) -> Self {
        MemoryCollection {
            name: name.into(),
            records,
        }
    }

    pub fn insert(&mut self, record: Json) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Run a compiled predicate and return the matching records.
    pub fn execute(&self, predicate: &Predicate) -> Result<Vec<Json>, StoreError> {
        self.find(&predicate.to_document())
    }

    /// Run a raw predicate document and return the matching records.
    pub fn find(&self, filter: &Json) -> Result<Vec<Json>, StoreError> {
        let mut found = Vec::new();
        for (index, record) in self.records.iter().enumerate() {
            let Some(fields) = record.as_object() else {
                warn!(
                    collection = %self.name,
                    index,
                    kind = json_kind(record),
                    "skipping non-object record"
                );
                continue;
            };
            if matches(fields, filter)? {
                found.push(record.clone());
            }
        }
        debug!(
            collection = %self.name,
            matched = found.len(),
            total = self.records.len(),
            "executed filter"
        );
        Ok(found)
    }
}

/// Whether `record` satisfies the predicate document `filter`.
pub fn matches(record: &Map<String, Json>, filter: &Json) -> Result<bool, StoreError> {
    let filter = filter.as_object().ok_or_else(|| {
        StoreError::Malformed(format!("filter must be an object, got {}", json_kind(filter)))
    })?;

    for (key, condition) in filter {
        let holds = match key.as_str() {
            "$and" => {
                let mut all = true;
                for sub in sub_filters(key, condition)? {
                    if !matches(record, sub)? {
                        all = false;
                        break;
                    }
                }
                all
            }
            "$or" => any_matches(record, sub_filters(key, condition)?)?,
            "$nor" => !any_matches(record, sub_filters(key, condition)?)?,
            op if op.starts_with('$') => return Err(StoreError::UnknownOperator(op.to_string())),
            path => {
                let value = lookup(record, path).map_or(Ok(Some(Scalar::Null)), decode)?;
                match_condition(&value, condition)?
            }
        };
        if !holds {
            return Ok(false);
        }
    }
    Ok(true)
}

fn any_matches(record: &Map<String, Json>, filters: &[Json]) -> Result<bool, StoreError> {
    for sub in filters {
        if matches(record, sub)? {
            return Ok(true);
        }
    }
    Ok(false)
}

fn sub_filters<'a>(key: &str, condition: &'a Json) -> Result<&'a [Json], StoreError> {
    condition
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| StoreError::Malformed(format!("{} expects a list", key)))
}

/// Resolve a dotted path through embedded documents.
fn lookup<'a>(record: &'a Map<String, Json>, path: &str) -> Option<&'a Json> {
    let mut segments = path.split('.');
    let mut current = record.get(segments.next()?)?;
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

/// Decode a JSON value into a scalar. Arrays and plain embedded documents
/// decode to `None`: they equal nothing and order against nothing.
fn decode(value: &Json) -> Result<Option<Scalar>, StoreError> {
    Ok(match value {
        Json::Null => Some(Scalar::Null),
        Json::Bool(b) => Some(Scalar::Boolean(*b)),
        Json::Number(n) => match n.as_i64() {
            Some(i) => Some(Scalar::Int(i)),
            None => {
                let text = n.to_string();
                let d = Decimal::from_str(&text)
                    .or_else(|_| Decimal::from_scientific(&text))
                    .map_err(|_| StoreError::Malformed(format!("number {} out of range", text)))?;
                Some(Scalar::Decimal(d))
            }
        },
        Json::String(s) => Some(Scalar::String(s.clone())),
        Json::Object(map) if map.len() == 1 => {
            if let Some(Json::String(hex)) = map.get("$oid") {
                let id = ObjectId::parse_str(hex)
                    .map_err(|e| StoreError::Malformed(e.to_string()))?;
                Some(Scalar::ObjectId(id))
            } else if let Some(Json::String(text)) = map.get("$numberDecimal") {
                let d = Decimal::from_str(text)
                    .map_err(|_| StoreError::Malformed(format!("bad decimal '{}'", text)))?;
                Some(Scalar::Decimal(d))
            } else {
                None
            }
        }
        Json::Object(_) | Json::Array(_) => None,
    })
}

fn decode_operand(operand: &Json) -> Result<Scalar, StoreError> {
    decode(operand)?
        .ok_or_else(|| StoreError::Malformed(format!("unsupported operand {}", operand)))
}

/// `{"$oid": ..}` and `{"$numberDecimal": ..}` are values, not operator documents.
fn is_operator_document(condition: &Json) -> bool {
    condition.as_object().is_some_and(|map| {
        let wrapped_value =
            map.len() == 1 && (map.contains_key("$oid") || map.contains_key("$numberDecimal"));
        !map.is_empty() && !wrapped_value && map.keys().all(|k| k.starts_with('$'))
    })
}

fn match_condition(value: &Option<Scalar>, condition: &Json) -> Result<bool, StoreError> {
    if !is_operator_document(condition) {
        // implicit $eq
        return Ok(equals(value, &decode_operand(condition)?));
    }

    let Some(ops) = condition.as_object() else {
        return Ok(false);
    };
    for (op, operand) in ops {
        if !match_operator(value, op, operand)? {
            return Ok(false);
        }
    }
    Ok(true)
}

fn match_operator(value: &Option<Scalar>, op: &str, operand: &Json) -> Result<bool, StoreError> {
    Ok(match op {
        "$eq" => equals(value, &decode_operand(operand)?),
        "$ne" => !equals(value, &decode_operand(operand)?),
        "$gt" => ordered(value, &decode_operand(operand)?, |o| o == Ordering::Greater),
        "$gte" => ordered(value, &decode_operand(operand)?, |o| o != Ordering::Less),
        "$lt" => ordered(value, &decode_operand(operand)?, |o| o == Ordering::Less),
        "$lte" => ordered(value, &decode_operand(operand)?, |o| o != Ordering::Greater),
        "$in" => member(value, operand)?,
        "$nin" => !member(value, operand)?,
        "$not" => {
            if !is_operator_document(operand) {
                return Err(StoreError::Malformed("$not expects an operator document".into()));
            }
            !match_condition(value, operand)?
        }
        other => return Err(StoreError::UnknownOperator(other.to_string())),
    })
}

fn equals(value: &Option<Scalar>, operand: &Scalar) -> bool {
    value.as_ref().is_some_and(|v| v.loosely_equals(operand))
}

fn ordered(value: &Option<Scalar>, operand: &Scalar, test: impl Fn(Ordering) -> bool) -> bool {
    match value {
        // $gte/$lte: null are satisfied by null fields
        Some(Scalar::Null) if operand.is_null() => test(Ordering::Equal),
        Some(v) => v.compare(operand).is_some_and(test),
        None => false,
    }
}

fn member(value: &Option<Scalar>, operand: &Json) -> Result<bool, StoreError> {
    let items = operand
        .as_array()
        .ok_or_else(|| StoreError::Malformed("$in/$nin expect a list".into()))?;
    for item in items {
        if equals(value, &decode_operand(item)?) {
            return Ok(true);
        }
    }
    Ok(false)
}
