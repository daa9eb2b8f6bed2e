use std::{cmp::Ordering, fmt};

use rust_decimal::Decimal;

use crate::object_id::ObjectId;

/// A literal as written by the client in a where-clause.
///
/// Literals are untyped: the same string may become an [`ObjectId`] or plain
/// text depending on the field it is compared against. Coercion into a
/// [`Scalar`] happens in [`crate::coercion`].
///
/// # Examples
///
/// ```
/// use docsieve::Literal;
///
/// let null = Literal::Null;
/// let id = Literal::String("6124e80f3f5fc839830c1f69".to_string());
/// let set = Literal::List(vec![id.clone(), null.clone()]);
/// assert!(set.is_list());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// `null`
    Null,

    /// `true` / `false`
    Boolean(bool),

    /// Any numeric literal, kept exact
    Number(Decimal),

    /// Quoted string
    String(String),

    /// Sequence of literals, used by membership operators
    List(Vec<Literal>),
}

impl Literal {
    pub fn is_list(&self) -> bool {
        matches!(self, Literal::List(_))
    }

    /// Name of the literal's kind, for error reporting
    pub fn kind(&self) -> &'static str {
        match self {
            Literal::Null => "null",
            Literal::Boolean(_) => "boolean",
            Literal::Number(_) => "number",
            Literal::String(_) => "string",
            Literal::List(_) => "list",
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Null => write!(f, "null"),
            Literal::Boolean(b) => write!(f, "{}", b),
            Literal::Number(n) => write!(f, "{}", n),
            Literal::String(s) => write!(f, "{:?}", s),
            Literal::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
        }
    }
}

/// A domain-typed value: the result of coercing a [`Literal`] against a field.
///
/// `Null` stands for "the field is null or absent". Stored record values are
/// decoded into the same type by the in-memory store, so comparisons on both
/// sides of a predicate go through [`Scalar::compare`].
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Boolean(bool),
    Int(i64),
    Decimal(Decimal),
    String(String),
    ObjectId(ObjectId),
}

impl Scalar {
    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }

    /// Compare two values of the same type bracket.
    ///
    /// Returns `None` when the values are not comparable: different brackets,
    /// or either side null. Ints and decimals share the numeric bracket.
    pub fn compare(&self, other: &Scalar) -> Option<Ordering> {
        use Scalar::*;
        match (self, other) {
            (Boolean(a), Boolean(b)) => Some(a.cmp(b)),
            (Int(a), Int(b)) => Some(a.cmp(b)),
            (Decimal(a), Decimal(b)) => Some(a.cmp(b)),
            (Int(a), Decimal(b)) => Some(rust_decimal::Decimal::from(*a).cmp(b)),
            (Decimal(a), Int(b)) => Some(a.cmp(&rust_decimal::Decimal::from(*b))),
            (String(a), String(b)) => Some(a.cmp(b)),
            (ObjectId(a), ObjectId(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    /// Equality as the document store sees it: null equals null, numbers
    /// compare across int/decimal, everything else needs the same type.
    pub fn loosely_equals(&self, other: &Scalar) -> bool {
        match (self, other) {
            (Scalar::Null, Scalar::Null) => true,
            _ => self.compare(other) == Some(Ordering::Equal),
        }
    }
}

impl From<ObjectId> for Scalar {
    fn from(id: ObjectId) -> Self {
        Scalar::ObjectId(id)
    }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Scalar::Int(n)
    }
}

impl From<Decimal> for Scalar {
    fn from(d: Decimal) -> Self {
        Scalar::Decimal(d)
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::String(s)
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Boolean(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_is_not_ordered() {
        assert_eq!(Scalar::Null.compare(&Scalar::Int(1)), None);
        assert_eq!(Scalar::Null.compare(&Scalar::Null), None);
        assert!(Scalar::Null.loosely_equals(&Scalar::Null));
    }

    #[test]
    fn numbers_share_a_bracket() {
        let two = Scalar::Int(2);
        let two_and_a_half = Scalar::Decimal(Decimal::new(25, 1));
        assert_eq!(two.compare(&two_and_a_half), Some(Ordering::Less));
        assert!(Scalar::Int(3).loosely_equals(&Scalar::Decimal(Decimal::new(30, 1))));
    }

    #[test]
    fn mixed_brackets_never_compare() {
        assert_eq!(Scalar::Int(1).compare(&Scalar::String("1".into())), None);
        assert!(!Scalar::Boolean(true).loosely_equals(&Scalar::Int(1)));
    }

    #[test]
    fn literal_display() {
        let lit = Literal::List(vec![Literal::Null, Literal::String("a".into())]);
        assert_eq!(lit.to_string(), "[null, \"a\"]");
    }
}
