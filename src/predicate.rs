//! Backend predicate model.
//!
//! A [`Predicate`] is the compiled form of a where-clause. It renders to the
//! document store's native query document with [`Predicate::to_document`]:
//!
//! | Predicate | Document |
//! |---|---|
//! | `All` | `{}` |
//! | `None` | `{"$nor": [{}]}` |
//! | `Field { path, op }` | `{"<path>": <op>}` |
//! | `And(ps)` / `Or(ps)` | `{"$and": [...]}` / `{"$or": [...]}` |
//!
//! Values render as Extended JSON: object ids as `{"$oid": "<hex>"}`,
//! decimals as `{"$numberDecimal": "<text>"}`.

use std::fmt;

use serde_json::{Map, Value as Json, json};

use crate::{ast::Comparison, value::Scalar};

/// A condition on a single field path.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldOp {
    Eq(Scalar),
    Ne(Scalar),
    Compare(Comparison, Scalar),
    In(Vec<Scalar>),
    Nin(Vec<Scalar>),
    /// Logical negation of the wrapped condition. A record whose field is
    /// null or missing fails every ordering comparison, so it satisfies
    /// `Not(Compare(..))`.
    Not(Box<FieldOp>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Matches every record
    All,
    /// Matches no record
    None,
    Field { path: String, op: FieldOp },
    And(Vec<Predicate>),
    Or(Vec<Predicate>),
}

impl Predicate {
    pub fn field(path: impl Into<String>, op: FieldOp) -> Self {
        Predicate::Field {
            path: path.into(),
            op,
        }
    }

    /// Conjunction of `parts`, folding away `All` and short-circuiting on `None`.
    pub fn and(parts: Vec<Predicate>) -> Self {
        let mut kept = Vec::with_capacity(parts.len());
        for part in parts {
            match part {
                Predicate::All => {}
                Predicate::None => return Predicate::None,
                Predicate::And(inner) => kept.extend(inner),
                other => kept.push(other),
            }
        }
        match kept.len() {
            0 => Predicate::All,
            1 => kept.remove(0),
            _ => Predicate::And(kept),
        }
    }

    /// Disjunction of `parts`, folding away `None` and short-circuiting on `All`.
    pub fn or(parts: Vec<Predicate>) -> Self {
        let mut kept = Vec::with_capacity(parts.len());
        for part in parts {
            match part {
                Predicate::None => {}
                Predicate::All => return Predicate::All,
                Predicate::Or(inner) => kept.extend(inner),
                other => kept.push(other),
            }
        }
        match kept.len() {
            0 => Predicate::None,
            1 => kept.remove(0),
            _ => Predicate::Or(kept),
        }
    }

    pub fn to_document(&self) -> Json {
        match self {
            Predicate::All => Json::Object(Map::new()),
            Predicate::None => json!({ "$nor": [{}] }),
            Predicate::Field { path, op } => {
                let mut doc = Map::new();
                doc.insert(path.clone(), op.to_document());
                Json::Object(doc)
            }
            Predicate::And(parts) => {
                json!({ "$and": parts.iter().map(Predicate::to_document).collect::<Vec<_>>() })
            }
            Predicate::Or(parts) => {
                json!({ "$or": parts.iter().map(Predicate::to_document).collect::<Vec<_>>() })
            }
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_document())
    }
}

impl FieldOp {
    pub fn to_document(&self) -> Json {
        match self {
            FieldOp::Eq(v) => json!({ "$eq": scalar_to_json(v) }),
            FieldOp::Ne(v) => json!({ "$ne": scalar_to_json(v) }),
            FieldOp::Compare(cmp, v) => {
                let mut doc = Map::new();
                doc.insert(comparison_key(*cmp).to_string(), scalar_to_json(v));
                Json::Object(doc)
            }
            FieldOp::In(values) => json!({ "$in": scalar_list(values) }),
            FieldOp::Nin(values) => json!({ "$nin": scalar_list(values) }),
            FieldOp::Not(inner) => json!({ "$not": inner.to_document() }),
        }
    }
}

fn scalar_list(values: &[Scalar]) -> Vec<Json> {
    values.iter().map(scalar_to_json).collect()
}

pub(crate) fn comparison_key(cmp: Comparison) -> &'static str {
    match cmp {
        Comparison::Gt => "$gt",
        Comparison::Gte => "$gte",
        Comparison::Lt => "$lt",
        Comparison::Lte => "$lte",
    }
}

/// Render a scalar as Extended JSON.
pub fn scalar_to_json(value: &Scalar) -> Json {
    match value {
        Scalar::Null => Json::Null,
        Scalar::Boolean(b) => Json::Bool(*b),
        Scalar::Int(n) => Json::from(*n),
        Scalar::Decimal(d) => json!({ "$numberDecimal": d.to_string() }),
        Scalar::String(s) => Json::String(s.clone()),
        Scalar::ObjectId(id) => json!({ "$oid": id.to_hex() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object_id::ObjectId;

    fn oid(hex: &str) -> Scalar {
        Scalar::ObjectId(ObjectId::parse_str(hex).unwrap())
    }

    #[test]
    fn renders_negated_comparison_as_not_wrapper() {
        let p = Predicate::field(
            "objectId",
            FieldOp::Not(Box::new(FieldOp::Compare(
                Comparison::Gt,
                oid("6124e80f3f5fc839830c1f69"),
            ))),
        );
        assert_eq!(
            p.to_document(),
            json!({ "objectId": { "$not": { "$gt": { "$oid": "6124e80f3f5fc839830c1f69" } } } })
        );
    }

    #[test]
    fn renders_constants() {
        assert_eq!(Predicate::All.to_document(), json!({}));
        assert_eq!(Predicate::None.to_document(), json!({ "$nor": [{}] }));
    }

    #[test]
    fn and_folds_identities() {
        let leaf = Predicate::field("a", FieldOp::Eq(Scalar::Int(1)));
        assert_eq!(Predicate::and(vec![]), Predicate::All);
        assert_eq!(Predicate::and(vec![Predicate::All, leaf.clone()]), leaf);
        assert_eq!(Predicate::and(vec![leaf.clone(), Predicate::None]), Predicate::None);
        assert_eq!(
            Predicate::and(vec![leaf.clone(), Predicate::And(vec![leaf.clone(), leaf.clone()])]),
            Predicate::And(vec![leaf.clone(), leaf.clone(), leaf])
        );
    }

    #[test]
    fn or_folds_identities() {
        let leaf = Predicate::field("a", FieldOp::Eq(Scalar::Null));
        assert_eq!(Predicate::or(vec![]), Predicate::None);
        assert_eq!(Predicate::or(vec![Predicate::None, leaf.clone()]), leaf);
        assert_eq!(Predicate::or(vec![leaf, Predicate::All]), Predicate::All);
    }

    #[test]
    fn decimals_render_as_number_decimal() {
        let d = Scalar::Decimal(rust_decimal::Decimal::new(125, 2));
        assert_eq!(scalar_to_json(&d), json!({ "$numberDecimal": "1.25" }));
    }
}
