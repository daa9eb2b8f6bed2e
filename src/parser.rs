//! Reads GraphQL-style JSON where-clauses into a [`FilterTree`].
//!
//! ```text
//! { "objectId": { "gte": "6124e80f3f5fc839830c1f69", "nlt": null },
//!   "or": [ { "count": { "eq": 1 } }, { "count": { "in": [2, null] } } ] }
//! ```
//!
//! Field names are checked against the schema and operator names against the
//! catalog. Literal types are not checked here; that is coercion's job.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::{Map, Value as Json};

use crate::{
    ast::{Arity, FieldFilter, FilterNode, FilterTree, Operator},
    error::ParseError,
    schema::Schema,
    value::Literal,
};

pub struct WhereParser<'s> {
    schema: &'s Schema,
}

impl<'s> WhereParser<'s> {
    pub fn new(schema: &'s Schema) -> Self {
        WhereParser { schema }
    }

    pub fn parse(&self, input: &Json) -> Result<FilterTree, ParseError> {
        let object = input
            .as_object()
            .ok_or_else(|| ParseError::NotAnObject(json_kind(input)))?;
        Ok(FilterTree {
            nodes: self.parse_object(object)?,
        })
    }

    fn parse_object(&self, object: &Map<String, Json>) -> Result<Vec<FilterNode>, ParseError> {
        let mut nodes = Vec::with_capacity(object.len());
        for (key, value) in object {
            let node = match key.as_str() {
                "and" => FilterNode::And(self.parse_combinator("and", value)?),
                "or" => FilterNode::Or(self.parse_combinator("or", value)?),
                field => self.parse_field(field, value)?,
            };
            nodes.push(node);
        }
        Ok(nodes)
    }

    fn parse_combinator(
        &self,
        combinator: &'static str,
        value: &Json,
    ) -> Result<Vec<FilterNode>, ParseError> {
        let items = value.as_array().ok_or(ParseError::InvalidCombinator {
            combinator,
            found: json_kind(value),
        })?;

        items
            .iter()
            .map(|item| -> Result<FilterNode, ParseError> {
                let object = item.as_object().ok_or(ParseError::InvalidCombinator {
                    combinator,
                    found: json_kind(item),
                })?;
                let mut nodes = self.parse_object(object)?;
                Ok(if nodes.len() == 1 {
                    nodes.remove(0)
                } else {
                    FilterNode::And(nodes)
                })
            })
            .collect()
    }

    fn parse_field(&self, field: &str, value: &Json) -> Result<FilterNode, ParseError> {
        if self.schema.field(field).is_none() {
            return Err(ParseError::UnknownField(field.to_string()));
        }

        let conditions = value.as_object().ok_or_else(|| ParseError::InvalidConditions {
            field: field.to_string(),
            found: json_kind(value),
        })?;

        let mut filter = FieldFilter::new(field);
        for (name, literal) in conditions {
            let operator =
                Operator::from_str(name).map_err(|operator| ParseError::UnknownOperator {
                    field: field.to_string(),
                    operator,
                })?;
            let literal = parse_operand(field, operator, literal)?;
            filter = filter.with(operator, literal);
        }
        Ok(FilterNode::Field(filter))
    }
}

fn parse_operand(field: &str, operator: Operator, value: &Json) -> Result<Literal, ParseError> {
    match (operator.arity(), value) {
        (Arity::List, Json::Array(items)) => items
            .iter()
            .map(|item| parse_scalar(field, operator, item))
            .collect::<Result<Vec<_>, _>>()
            .map(Literal::List),
        (Arity::List, _) => Err(ParseError::ExpectedList {
            field: field.to_string(),
            operator,
        }),
        (Arity::Value, Json::Array(_)) => Err(ParseError::UnexpectedList {
            field: field.to_string(),
            operator,
        }),
        (Arity::Value, scalar) => parse_scalar(field, operator, scalar),
    }
}

fn parse_scalar(field: &str, operator: Operator, value: &Json) -> Result<Literal, ParseError> {
    let unsupported = || ParseError::UnsupportedLiteral {
        field: field.to_string(),
        operator,
        value: value.to_string(),
    };

    match value {
        Json::Null => Ok(Literal::Null),
        Json::Bool(b) => Ok(Literal::Boolean(*b)),
        Json::String(s) => Ok(Literal::String(s.clone())),
        Json::Number(n) => {
            let text = n.to_string();
            Decimal::from_str(&text)
                .or_else(|_| Decimal::from_scientific(&text))
                .map(Literal::Number)
                .map_err(|_| unsupported())
        }
        Json::Array(_) | Json::Object(_) => Err(unsupported()),
    }
}

pub(crate) fn json_kind(value: &Json) -> &'static str {
    match value {
        Json::Null => "null",
        Json::Bool(_) => "boolean",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "array",
        Json::Object(_) => "object",
    }
}

/// Parse a JSON where-clause against `schema`.
pub fn parse_where(input: &Json, schema: &Schema) -> Result<FilterTree, ParseError> {
    WhereParser::new(schema).parse(input)
}
