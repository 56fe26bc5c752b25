use serde::{Deserialize, Serialize};
use std::fmt;

/// Combinators joining two criteria.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BinaryOperator {
    And,
    Or,
    Xor,
    Nand,
    Nor,

    /// Negation of the left operand; the right operand is not evaluated
    Not,

    /// Equality of two boolean results
    Eq,
}

impl BinaryOperator {
    /// Always `true`.
    pub fn is_binary(self) -> bool {
        true
    }

    pub fn is_and(self) -> bool {
        matches!(self, Self::And)
    }

    pub fn is_or(self) -> bool {
        matches!(self, Self::Or)
    }

    pub fn is_not(self) -> bool {
        matches!(self, Self::Not)
    }

    pub fn name(self) -> &'static str {
        use BinaryOperator::*;

        match self {
            And => "AND",
            Or => "OR",
            Xor => "XOR",
            Nand => "NAND",
            Nor => "NOR",
            Not => "NOT",
            Eq => "EQ",
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Debug for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
