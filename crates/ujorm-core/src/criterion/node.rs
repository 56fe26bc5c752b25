use super::{
    print::{raw_sql, PrintOperand},
    AnyOperator, BinaryCriterion, BinaryOperator, Operand, Operator, ValueCriterion,
};
use crate::{
    meta::{Domain, Entity, KeyRef},
    Result,
};
use std::fmt;

/// A node of a criterion tree.
///
/// Query layers translate a tree by matching on the node kind, or through
/// [`Node::operator`], [`Node::left_node`] and [`Node::right_node`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Node {
    Value(ValueCriterion),
    Binary(BinaryCriterion),
}

/// One side of a node.
#[derive(Debug, Clone, Copy)]
pub enum Side<'a> {
    /// The key of a value criterion
    Key(&'a KeyRef),

    /// The right-hand side of a value criterion
    Operand(&'a Operand),

    /// A child of a binary criterion
    Criterion(&'a Node),

    /// The missing key of a keyless constant
    Empty,
}

impl Node {
    pub fn operator(&self) -> AnyOperator {
        match self {
            Self::Value(node) => node.operator().into(),
            Self::Binary(node) => node.operator().into(),
        }
    }

    pub fn is_binary(&self) -> bool {
        matches!(self, Self::Binary(_))
    }

    pub fn as_value(&self) -> Option<&ValueCriterion> {
        match self {
            Self::Value(node) => Some(node),
            Self::Binary(_) => None,
        }
    }

    pub fn as_binary(&self) -> Option<&BinaryCriterion> {
        match self {
            Self::Binary(node) => Some(node),
            Self::Value(_) => None,
        }
    }

    pub fn left_node(&self) -> Side<'_> {
        match self {
            Self::Value(node) => node.key().map_or(Side::Empty, Side::Key),
            Self::Binary(node) => Side::Criterion(node.left()),
        }
    }

    pub fn right_node(&self) -> Side<'_> {
        match self {
            Self::Value(node) => Side::Operand(node.operand()),
            Self::Binary(node) => Side::Criterion(node.right()),
        }
    }

    /// The fixed result of an XFIXED leaf.
    pub fn constant_value(&self) -> Option<bool> {
        self.as_value().and_then(ValueCriterion::constant_value)
    }

    /// The most specific domain the criterion constrains.
    pub fn domain(&self) -> Domain {
        match self {
            Self::Value(node) => node.domain(),
            Self::Binary(node) => node.domain(),
        }
    }

    pub(crate) fn eval(&self, entity: &dyn Entity) -> Result<bool> {
        match self {
            Self::Value(node) => node.eval(entity),
            Self::Binary(node) => node.eval(entity),
        }
    }
}

impl From<ValueCriterion> for Node {
    fn from(value: ValueCriterion) -> Self {
        Self::Value(value)
    }
}

impl From<BinaryCriterion> for Node {
    fn from(value: BinaryCriterion) -> Self {
        Self::Binary(value)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(node) => fmt::Display::fmt(node, f),
            Self::Binary(node) => fmt::Display::fmt(node, f),
        }
    }
}

impl fmt::Display for ValueCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.operator(), self.key()) {
            (Operator::XSql, _) => write!(f, "({})", raw_sql(self.operand())),
            (Operator::XFixed, _) | (_, None) => write!(f, "({})", PrintOperand(self.operand())),
            (operator, Some(key)) => {
                write!(f, "({key} {operator} {})", PrintOperand(self.operand()))
            }
        }
    }
}

/// AND chains print without parentheses; NOT prints its operand only.
impl fmt::Display for BinaryCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.operator() {
            BinaryOperator::And => write!(f, "{} AND {}", self.left(), self.right()),
            BinaryOperator::Not => write!(f, "NOT {}", self.left()),
            operator => write!(f, "({} {operator} {})", self.left(), self.right()),
        }
    }
}
