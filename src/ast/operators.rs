use std::{fmt, str::FromStr};

use crate::schema::FieldType;

/// Filter operators.
///
/// The set is closed: every operator a where-clause can name is listed here
/// together with its family, arity and null policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    // Equality
    /// Equal (`eq`)
    Eq,
    /// Not equal (`neq`)
    Neq,

    // Ordering
    /// Greater than (`gt`)
    Gt,
    /// Greater than or equal (`gte`)
    Gte,
    /// Less than (`lt`)
    Lt,
    /// Less than or equal (`lte`)
    Lte,

    // Negated ordering
    /// Not greater than (`ngt`)
    Ngt,
    /// Not greater than or equal (`ngte`)
    Ngte,
    /// Not less than (`nlt`)
    Nlt,
    /// Not less than or equal (`nlte`)
    Nlte,

    // Membership
    /// Member of set (`in`)
    In,
    /// Not a member of set (`nin`)
    Nin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorFamily {
    Equality,
    Ordering,
    NegatedOrdering,
    Membership,
}

/// Shape of the literal an operator takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Value,
    List,
}

/// What a null literal means for an operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullPolicy {
    /// Null is an ordinary comparable value (`eq`, `neq`).
    Comparable,
    /// A null operand matches no record.
    MatchesNone,
    /// A null operand matches every record.
    MatchesAll,
    /// Null may appear as a set element and stands for null-valued fields.
    SetElement,
}

/// The ordering comparison a comparison operator is built on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Gt,
    Gte,
    Lt,
    Lte,
}

impl Operator {
    pub const ALL: [Operator; 12] = [
        Operator::Eq,
        Operator::Neq,
        Operator::Gt,
        Operator::Gte,
        Operator::Lt,
        Operator::Lte,
        Operator::Ngt,
        Operator::Ngte,
        Operator::Nlt,
        Operator::Nlte,
        Operator::In,
        Operator::Nin,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Operator::Eq => "eq",
            Operator::Neq => "neq",
            Operator::Gt => "gt",
            Operator::Gte => "gte",
            Operator::Lt => "lt",
            Operator::Lte => "lte",
            Operator::Ngt => "ngt",
            Operator::Ngte => "ngte",
            Operator::Nlt => "nlt",
            Operator::Nlte => "nlte",
            Operator::In => "in",
            Operator::Nin => "nin",
        }
    }

    pub fn family(self) -> OperatorFamily {
        use Operator::*;
        match self {
            Eq | Neq => OperatorFamily::Equality,
            Gt | Gte | Lt | Lte => OperatorFamily::Ordering,
            Ngt | Ngte | Nlt | Nlte => OperatorFamily::NegatedOrdering,
            In | Nin => OperatorFamily::Membership,
        }
    }

    pub fn arity(self) -> Arity {
        match self.family() {
            OperatorFamily::Membership => Arity::List,
            _ => Arity::Value,
        }
    }

    pub fn null_policy(self) -> NullPolicy {
        match self.family() {
            OperatorFamily::Equality => NullPolicy::Comparable,
            OperatorFamily::Ordering => NullPolicy::MatchesNone,
            OperatorFamily::NegatedOrdering => NullPolicy::MatchesAll,
            OperatorFamily::Membership => NullPolicy::SetElement,
        }
    }

    /// The positive comparison behind an ordering or negated-ordering operator.
    pub fn comparison(self) -> Option<Comparison> {
        use Operator::*;
        match self {
            Gt | Ngt => Some(Comparison::Gt),
            Gte | Ngte => Some(Comparison::Gte),
            Lt | Nlt => Some(Comparison::Lt),
            Lte | Nlte => Some(Comparison::Lte),
            _ => None,
        }
    }

    /// The operator that matches exactly the complementary record set.
    pub fn negated(self) -> Operator {
        use Operator::*;
        match self {
            Eq => Neq,
            Neq => Eq,
            Gt => Ngt,
            Gte => Ngte,
            Lt => Nlt,
            Lte => Nlte,
            Ngt => Gt,
            Ngte => Gte,
            Nlt => Lt,
            Nlte => Lte,
            In => Nin,
            Nin => In,
        }
    }

    /// Whether the operator is defined for fields of the given type.
    pub fn applies_to(self, field_type: FieldType) -> bool {
        match self.family() {
            OperatorFamily::Ordering | OperatorFamily::NegatedOrdering => {
                field_type.is_ordered()
            }
            OperatorFamily::Equality | OperatorFamily::Membership => true,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operator::ALL
            .into_iter()
            .find(|op| op.name() == s)
            .ok_or_else(|| s.to_string())
    }
}
