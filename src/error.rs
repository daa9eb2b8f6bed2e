use thiserror::Error;

use crate::{ast::Operator, schema::FieldType, value::Literal};

/// Errors that abort a compilation. No partial predicate is ever produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompileError {
    /// A literal could not be converted into the field's domain type
    #[error("cannot use {literal} with '{operator}' on field '{field}': {reason}")]
    Coercion {
        field: String,
        operator: Operator,
        literal: Literal,
        reason: String,
    },

    /// The operator is not defined for the field's type
    #[error("operator '{operator}' is not supported on {field_type} field '{field}'")]
    UnsupportedOperator {
        field: String,
        operator: Operator,
        field_type: FieldType,
    },

    /// The filter references a field the schema does not declare
    #[error("unknown field '{0}'")]
    UnknownField(String),
}

/// Errors reading a JSON where-clause into a filter tree.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("where-clause must be an object, got {0}")]
    NotAnObject(&'static str),

    #[error("unknown field '{0}'")]
    UnknownField(String),

    #[error("unknown operator '{operator}' on field '{field}'")]
    UnknownOperator { field: String, operator: String },

    #[error("conditions for field '{field}' must be an object, got {found}")]
    InvalidConditions { field: String, found: &'static str },

    #[error("'{combinator}' expects a list of where-clauses, got {found}")]
    InvalidCombinator {
        combinator: &'static str,
        found: &'static str,
    },

    #[error("operator '{operator}' on field '{field}' expects a list")]
    ExpectedList { field: String, operator: Operator },

    #[error("operator '{operator}' on field '{field}' does not take a list")]
    UnexpectedList { field: String, operator: Operator },

    #[error("unsupported literal {value} for '{operator}' on field '{field}'")]
    UnsupportedLiteral {
        field: String,
        operator: Operator,
        value: String,
    },
}

/// Errors raised by the in-memory collection while executing a predicate document.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error("unknown query operator '{0}'")]
    UnknownOperator(String),

    #[error("malformed predicate document: {0}")]
    Malformed(String),
}
