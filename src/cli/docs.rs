//! Operator reference for the docsieve CLI

use std::fmt::Write;

use crate::ast::{Arity, NullPolicy, Operator};

fn null_behavior(policy: NullPolicy, operator: Operator) -> &'static str {
    match (policy, operator) {
        (NullPolicy::Comparable, Operator::Eq) => "matches null fields",
        (NullPolicy::Comparable, _) => "matches non-null fields",
        (NullPolicy::MatchesNone, _) => "matches nothing",
        (NullPolicy::MatchesAll, _) => "matches everything",
        (NullPolicy::SetElement, Operator::In) => "null element matches null fields",
        (NullPolicy::SetElement, _) => "null element excludes null fields",
    }
}

/// Render the operator catalog as a plain-text table
pub fn get_operator_reference() -> String {
    let mut out = String::from("DOCSIEVE OPERATORS\n\n");
    let _ = writeln!(out, "  {:<6} {:<8} {}", "name", "operand", "null literal");
    for op in Operator::ALL {
        let operand = match op.arity() {
            Arity::Value => "value",
            Arity::List => "list",
        };
        let _ = writeln!(
            out,
            "  {:<6} {:<8} {}",
            op.name(),
            operand,
            null_behavior(op.null_policy(), op)
        );
    }
    out.push_str(
        "\nNegated orderings (ngt, ngte, nlt, nlte) are the logical negation of the\n\
         positive comparison: records with a null field always satisfy them.\n",
    );
    out
}
