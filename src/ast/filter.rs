use crate::{ast::Operator, value::Literal};

/// One `(operator, literal)` pair under a field.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub operator: Operator,
    pub literal: Literal,
}

/// All conditions on a single field. Conditions are combined by conjunction,
/// so `{gte: a, lte: b}` expresses a closed range.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldFilter {
    pub field: String,
    pub conditions: Vec<Condition>,
}

impl FieldFilter {
    pub fn new(field: impl Into<String>) -> Self {
        FieldFilter {
            field: field.into(),
            conditions: Vec::new(),
        }
    }

    pub fn with(mut self, operator: Operator, literal: Literal) -> Self {
        self.conditions.push(Condition { operator, literal });
        self
    }
}

/// A node of the where-clause.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterNode {
    /// Conditions on one field
    Field(FieldFilter),

    /// Every child must match (`and: [...]`). Empty matches everything.
    And(Vec<FilterNode>),

    /// At least one child must match (`or: [...]`). Empty matches nothing.
    Or(Vec<FilterNode>),
}

/// A parsed, schema-checked where-clause.
///
/// The top level is an implicit conjunction of its nodes, in the order the
/// client wrote them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterTree {
    pub nodes: Vec<FilterNode>,
}

impl FilterTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for a tree with a single `field: {operator: literal}` entry.
    pub fn single(field: impl Into<String>, operator: Operator, literal: Literal) -> Self {
        FilterTree::new().field(FieldFilter::new(field).with(operator, literal))
    }

    pub fn field(mut self, filter: FieldFilter) -> Self {
        self.nodes.push(FilterNode::Field(filter));
        self
    }

    pub fn node(mut self, node: FilterNode) -> Self {
        self.nodes.push(node);
        self
    }
}
