use tracing::{debug, trace};

use crate::{
    ast::{Comparison, Condition, FieldFilter, FilterNode, FilterTree, Operator},
    coercion::{CoercionFailure, coerce, coerce_list},
    error::CompileError,
    predicate::{FieldOp, Predicate},
    schema::{FieldDescriptor, Schema},
    value::Scalar,
};

/// Compiles filter trees into backend predicates.
///
/// The compiler only borrows the schema and keeps no state between calls, so
/// one instance may be shared between threads. Compiling the same tree twice
/// yields equal predicates.
#[derive(Debug, Clone, Copy)]
pub struct Compiler<'s> {
    schema: &'s Schema,
}

impl<'s> Compiler<'s> {
    pub fn new(schema: &'s Schema) -> Self {
        Compiler { schema }
    }

    /// Compiles a complete where-clause.
    ///
    /// Top-level nodes are combined by conjunction. The first coercion or
    /// operator error aborts the whole compilation.
    ///
    /// # Examples
    ///
    /// ```
    /// use docsieve::{Compiler, FieldDescriptor, FieldType, FilterTree, Literal, Operator, Schema};
    /// use serde_json::json;
    ///
    /// let schema = Schema::new("foos")
    ///     .with_field(FieldDescriptor::new("objectId", FieldType::ObjectId));
    /// let tree = FilterTree::single("objectId", Operator::Ngt, Literal::Null);
    ///
    /// let predicate = Compiler::new(&schema).compile(&tree).unwrap();
    /// // ngt against null holds for every record
    /// assert_eq!(predicate.to_document(), json!({}));
    /// ```
    pub fn compile(&self, tree: &FilterTree) -> Result<Predicate, CompileError> {
        let parts = tree
            .nodes
            .iter()
            .map(|node| self.compile_node(node))
            .collect::<Result<Vec<_>, _>>()?;

        let predicate = Predicate::and(parts);
        trace!(
            collection = %self.schema.collection,
            predicate = %predicate,
            "compiled where-clause"
        );
        Ok(predicate)
    }

    fn compile_node(&self, node: &FilterNode) -> Result<Predicate, CompileError> {
        match node {
            FilterNode::Field(filter) => self.compile_field(filter),
            FilterNode::And(children) => Ok(Predicate::and(self.compile_all(children)?)),
            FilterNode::Or(children) => Ok(Predicate::or(self.compile_all(children)?)),
        }
    }

    fn compile_all(&self, nodes: &[FilterNode]) -> Result<Vec<Predicate>, CompileError> {
        nodes.iter().map(|node| self.compile_node(node)).collect()
    }

    fn compile_field(&self, filter: &FieldFilter) -> Result<Predicate, CompileError> {
        let field = self
            .schema
            .field(&filter.field)
            .ok_or_else(|| CompileError::UnknownField(filter.field.clone()))?;

        let parts = filter
            .conditions
            .iter()
            .map(|condition| self.compile_condition(field, condition))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Predicate::and(parts))
    }

    fn compile_condition(
        &self,
        field: &FieldDescriptor,
        condition: &Condition,
    ) -> Result<Predicate, CompileError> {
        let operator = condition.operator;
        if !operator.applies_to(field.field_type) {
            return Err(CompileError::UnsupportedOperator {
                field: field.name.clone(),
                operator,
                field_type: field.field_type,
            });
        }

        debug!(field = %field.name, %operator, literal = %condition.literal, "compiling condition");

        let coercion_error = |failure: CoercionFailure| CompileError::Coercion {
            field: field.name.clone(),
            operator,
            literal: failure.literal,
            reason: failure.reason,
        };

        let path = field.name.as_str();
        let value = || coerce(&condition.literal, field).map_err(&coercion_error);
        let values = || coerce_list(&condition.literal, field).map_err(&coercion_error);

        let predicate = match operator {
            Operator::Eq => Predicate::field(path, FieldOp::Eq(value()?)),
            Operator::Neq => Predicate::field(path, FieldOp::Ne(value()?)),
            Operator::Gt => compile_ordering(path, Comparison::Gt, false, value()?),
            Operator::Gte => compile_ordering(path, Comparison::Gte, false, value()?),
            Operator::Lt => compile_ordering(path, Comparison::Lt, false, value()?),
            Operator::Lte => compile_ordering(path, Comparison::Lte, false, value()?),
            Operator::Ngt => compile_ordering(path, Comparison::Gt, true, value()?),
            Operator::Ngte => compile_ordering(path, Comparison::Gte, true, value()?),
            Operator::Nlt => compile_ordering(path, Comparison::Lt, true, value()?),
            Operator::Nlte => compile_ordering(path, Comparison::Lte, true, value()?),
            Operator::In => compile_in(path, values()?),
            Operator::Nin => compile_nin(path, values()?),
        };

        Ok(predicate)
    }
}

/// Ordering against null is never true, so the positive operators compile
/// to `None` and their negations to `All` without reaching the backend.
/// Negations are emitted as `$not` around the positive comparison, never as
/// the opposite comparison, so null-valued fields satisfy them.
fn compile_ordering(path: &str, comparison: Comparison, negated: bool, value: Scalar) -> Predicate {
    match (value, negated) {
        (Scalar::Null, false) => Predicate::None,
        (Scalar::Null, true) => Predicate::All,
        (value, false) => Predicate::field(path, FieldOp::Compare(comparison, value)),
        (value, true) => Predicate::field(
            path,
            FieldOp::Not(Box::new(FieldOp::Compare(comparison, value))),
        ),
    }
}

fn split_nulls(values: Vec<Scalar>) -> (bool, Vec<Scalar>) {
    let (nulls, non_null): (Vec<Scalar>, Vec<Scalar>) =
        values.into_iter().partition(Scalar::is_null);
    (!nulls.is_empty(), non_null)
}

/// `in` matches the non-null members, or a null field when null is listed.
fn compile_in(path: &str, values: Vec<Scalar>) -> Predicate {
    let (has_null, non_null) = split_nulls(values);
    let mut parts = Vec::with_capacity(2);
    if !non_null.is_empty() {
        parts.push(Predicate::field(path, FieldOp::In(non_null)));
    }
    if has_null {
        parts.push(Predicate::field(path, FieldOp::Eq(Scalar::Null)));
    }
    Predicate::or(parts)
}

/// `nin` rejects the non-null members, and also null fields when null is listed.
fn compile_nin(path: &str, values: Vec<Scalar>) -> Predicate {
    let (has_null, non_null) = split_nulls(values);
    let mut parts = Vec::with_capacity(2);
    if !non_null.is_empty() {
        parts.push(Predicate::field(path, FieldOp::Nin(non_null)));
    }
    if has_null {
        parts.push(Predicate::field(path, FieldOp::Ne(Scalar::Null)));
    }
    Predicate::and(parts)
}

/// Compile `tree` against `schema`.
pub fn compile(tree: &FilterTree, schema: &Schema) -> Result<Predicate, CompileError> {
    Compiler::new(schema).compile(tree)
}
