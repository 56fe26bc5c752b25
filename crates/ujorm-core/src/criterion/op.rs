use super::BinaryOperator;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Comparison and matching operators of a value criterion.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Operator {
    Eq,
    NotEq,
    Gt,
    Ge,
    Lt,
    Le,
    In,
    NotIn,

    /// Full match of a regular expression
    Regexp,
    NotRegexp,

    EqualsCaseInsensitive,
    Starts,
    StartsCaseInsensitive,
    Ends,
    EndsCaseInsensitive,
    Contains,
    ContainsCaseInsensitive,

    /// Dialect specific operator, translated by a query layer only
    User,

    /// A constant result, the operands are ignored
    #[serde(rename = "XFIXED")]
    XFixed,

    /// A native SQL condition, never evaluated in memory
    #[serde(rename = "XSQL")]
    XSql,
}

impl Operator {
    /// Always `false`; combinators are [`BinaryOperator`]s.
    pub fn is_binary(self) -> bool {
        false
    }

    pub fn name(self) -> &'static str {
        use Operator::*;

        match self {
            Eq => "EQ",
            NotEq => "NOT_EQ",
            Gt => "GT",
            Ge => "GE",
            Lt => "LT",
            Le => "LE",
            In => "IN",
            NotIn => "NOT_IN",
            Regexp => "REGEXP",
            NotRegexp => "NOT_REGEXP",
            EqualsCaseInsensitive => "EQUALS_CASE_INSENSITIVE",
            Starts => "STARTS",
            StartsCaseInsensitive => "STARTS_CASE_INSENSITIVE",
            Ends => "ENDS",
            EndsCaseInsensitive => "ENDS_CASE_INSENSITIVE",
            Contains => "CONTAINS",
            ContainsCaseInsensitive => "CONTAINS_CASE_INSENSITIVE",
            User => "USER",
            XFixed => "XFIXED",
            XSql => "XSQL",
        }
    }

    /// Returns `true` for the string matching family, which requires string
    /// operands.
    pub fn is_char_sequence(self) -> bool {
        use Operator::*;

        matches!(
            self,
            EqualsCaseInsensitive
                | Starts
                | StartsCaseInsensitive
                | Ends
                | EndsCaseInsensitive
                | Contains
                | ContainsCaseInsensitive
        )
    }

    pub fn is_case_insensitive(self) -> bool {
        use Operator::*;

        matches!(
            self,
            EqualsCaseInsensitive
                | StartsCaseInsensitive
                | EndsCaseInsensitive
                | ContainsCaseInsensitive
        )
    }

    pub fn is_ordering(self) -> bool {
        matches!(self, Self::Gt | Self::Ge | Self::Lt | Self::Le)
    }

    /// Returns `true` for XFIXED and XSQL.
    pub fn is_constant(self) -> bool {
        matches!(self, Self::XFixed | Self::XSql)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Debug for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Either kind of operator, as reported by [`super::Node::operator`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum AnyOperator {
    Value(Operator),
    Binary(BinaryOperator),
}

impl AnyOperator {
    pub fn is_binary(self) -> bool {
        matches!(self, Self::Binary(_))
    }

    pub fn as_value(self) -> Option<Operator> {
        match self {
            Self::Value(op) => Some(op),
            Self::Binary(_) => None,
        }
    }

    pub fn as_binary(self) -> Option<BinaryOperator> {
        match self {
            Self::Binary(op) => Some(op),
            Self::Value(_) => None,
        }
    }
}

impl From<Operator> for AnyOperator {
    fn from(value: Operator) -> Self {
        Self::Value(value)
    }
}

impl From<BinaryOperator> for AnyOperator {
    fn from(value: BinaryOperator) -> Self {
        Self::Binary(value)
    }
}

impl fmt::Display for AnyOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(op) => fmt::Display::fmt(op, f),
            Self::Binary(op) => fmt::Display::fmt(op, f),
        }
    }
}
