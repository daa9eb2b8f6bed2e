//! Literal coercion.
//!
//! Converts client literals into domain-typed [`Scalar`]s. Each field type
//! contributes one [`Domain`] implementation; [`coerce`] picks the right one
//! from the field descriptor, so the compiler never matches on field types
//! itself.

use rust_decimal::prelude::ToPrimitive;

use crate::{
    object_id::ObjectId,
    schema::{FieldDescriptor, FieldType},
    value::{Literal, Scalar},
};

/// A literal that could not be coerced, with the reason.
///
/// For list literals `literal` is the offending element, not the whole list.
#[derive(Debug, Clone, PartialEq)]
pub struct CoercionFailure {
    pub literal: Literal,
    pub reason: String,
}

impl CoercionFailure {
    fn new(literal: &Literal, reason: impl Into<String>) -> Self {
        CoercionFailure {
            literal: literal.clone(),
            reason: reason.into(),
        }
    }
}

/// Capabilities a field type provides to the compiler.
pub trait Domain {
    type Value: Into<Scalar>;

    /// Convert a non-null, non-list literal. Returns the reason on failure.
    fn coerce(literal: &Literal) -> Result<Self::Value, String>;
}

pub struct ObjectIdDomain;
pub struct StringDomain;
pub struct IntDomain;
pub struct DecimalDomain;
pub struct BooleanDomain;

impl Domain for ObjectIdDomain {
    type Value = ObjectId;

    fn coerce(literal: &Literal) -> Result<ObjectId, String> {
        match literal {
            Literal::String(s) => ObjectId::parse_str(s).map_err(|e| e.to_string()),
            other => Err(format!("expected an object id string, got {}", other.kind())),
        }
    }
}

impl Domain for StringDomain {
    type Value = String;

    fn coerce(literal: &Literal) -> Result<String, String> {
        match literal {
            Literal::String(s) => Ok(s.clone()),
            other => Err(format!("expected a string, got {}", other.kind())),
        }
    }
}

impl Domain for IntDomain {
    type Value = i64;

    fn coerce(literal: &Literal) -> Result<i64, String> {
        match literal {
            Literal::Number(n) if n.is_integer() => n
                .to_i64()
                .ok_or_else(|| format!("{} does not fit in a 64-bit integer", n)),
            Literal::Number(n) => Err(format!("{} is not an integer", n)),
            other => Err(format!("expected an integer, got {}", other.kind())),
        }
    }
}

impl Domain for DecimalDomain {
    type Value = rust_decimal::Decimal;

    fn coerce(literal: &Literal) -> Result<rust_decimal::Decimal, String> {
        match literal {
            Literal::Number(n) => Ok(*n),
            other => Err(format!("expected a number, got {}", other.kind())),
        }
    }
}

impl Domain for BooleanDomain {
    type Value = bool;

    fn coerce(literal: &Literal) -> Result<bool, String> {
        match literal {
            Literal::Boolean(b) => Ok(*b),
            other => Err(format!("expected a boolean, got {}", other.kind())),
        }
    }
}

fn coerce_with<D: Domain>(literal: &Literal) -> Result<Scalar, CoercionFailure> {
    match literal {
        Literal::Null => Ok(Scalar::Null),
        Literal::List(_) => Err(CoercionFailure::new(
            literal,
            "a list is only accepted by membership operators",
        )),
        _ => D::coerce(literal)
            .map(Into::into)
            .map_err(|reason| CoercionFailure::new(literal, reason)),
    }
}

/// Coerce a single literal against a field.
///
/// `null` coerces to [`Scalar::Null`] for every field; whether a null can
/// match anything is decided by the operator, not here.
pub fn coerce(literal: &Literal, field: &FieldDescriptor) -> Result<Scalar, CoercionFailure> {
    match field.field_type {
        FieldType::ObjectId => coerce_with::<ObjectIdDomain>(literal),
        FieldType::String => coerce_with::<StringDomain>(literal),
        FieldType::Int => coerce_with::<IntDomain>(literal),
        FieldType::Decimal => coerce_with::<DecimalDomain>(literal),
        FieldType::Boolean => coerce_with::<BooleanDomain>(literal),
    }
}

/// Coerce a list literal element-wise. Fails on the first bad element and
/// never returns a partially coerced list.
pub fn coerce_list(
    literal: &Literal,
    field: &FieldDescriptor,
) -> Result<Vec<Scalar>, CoercionFailure> {
    match literal {
        Literal::List(items) => items.iter().map(|item| coerce(item, field)).collect(),
        other => Err(CoercionFailure::new(
            other,
            format!("expected a list, got {}", other.kind()),
        )),
    }
}
