use super::{Domain, Value};
use std::fmt;

/// The declared type of a key's value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    /// Boolean value
    Bool,

    /// Signed 32-bit integer
    I32,

    /// Signed 64-bit integer
    I64,

    /// 64-bit floating point number
    F64,

    /// String type
    String,

    /// A list of a single type
    List(Box<Type>),

    /// A related entity of the given domain
    Entity(Domain),

    /// Any value; no static information is available
    Any,
}

impl Type {
    pub fn list(ty: impl Into<Self>) -> Self {
        Self::List(Box::new(ty.into()))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Self::String)
    }

    /// Returns `true` for types usable with the string matching operators.
    pub fn is_char_sequence(&self) -> bool {
        self.is_string()
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    /// Returns the related domain of an entity type.
    pub fn as_entity(&self) -> Option<&Domain> {
        match self {
            Self::Entity(domain) => Some(domain),
            _ => None,
        }
    }

    /// Returns `true` when a value of type `other` can be stored where this
    /// type is expected.
    pub fn is_assignable_from(&self, other: &Type) -> bool {
        match (self, other) {
            (Self::Any, _) => true,
            (Self::Entity(lhs), Self::Entity(rhs)) => lhs.is_assignable_from(rhs),
            (Self::List(lhs), Self::List(rhs)) => lhs.is_assignable_from(rhs),
            _ => self == other,
        }
    }

    /// Converts a numeric value to this type's numeric kind. Integers widen
    /// to `I64` and `F64`; an `I64` narrows to `I32` only when it fits. A
    /// list is coerced item by item, against the item type for list types
    /// and against this type otherwise (the operand of IN). Anything else is
    /// returned unchanged.
    pub fn coerce(&self, value: Value) -> Value {
        match (self, value) {
            (Self::I64, Value::I32(v)) => Value::I64(i64::from(v)),
            (Self::I32, Value::I64(v)) => match i32::try_from(v) {
                Ok(v) => Value::I32(v),
                Err(_) => Value::I64(v),
            },
            (Self::F64, Value::I32(v)) => Value::F64(f64::from(v)),
            (Self::F64, Value::I64(v)) => Value::F64(v as f64),
            (Self::List(item), Value::List(items)) => {
                Value::List(items.into_iter().map(|v| item.coerce(v)).collect())
            }
            (Self::I32 | Self::I64 | Self::F64, Value::List(items)) => {
                Value::List(items.into_iter().map(|v| self.coerce(v)).collect())
            }
            (_, value) => value,
        }
    }

    /// Returns `true` if the value may be stored under this type. Null fits
    /// every type.
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (_, Value::Null) | (Self::Any, _) => true,
            (Self::Bool, Value::Bool(_)) => true,
            (Self::I32, Value::I32(_)) => true,
            (Self::I64, Value::I64(_)) => true,
            (Self::F64, Value::F64(_)) => true,
            (Self::String, Value::String(_)) => true,
            (Self::List(item), Value::List(items)) => items.iter().all(|v| item.accepts(v)),
            (Self::Entity(domain), Value::Entity(entity)) => {
                domain.is_assignable_from(entity.domain())
            }
            _ => false,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => f.write_str("Bool"),
            Self::I32 => f.write_str("I32"),
            Self::I64 => f.write_str("I64"),
            Self::F64 => f.write_str("F64"),
            Self::String => f.write_str("String"),
            Self::List(item) => write!(f, "List<{item}>"),
            Self::Entity(domain) => f.write_str(domain.name()),
            Self::Any => f.write_str("Any"),
        }
    }
}
