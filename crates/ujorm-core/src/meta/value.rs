use super::EntityRef;
use std::{cmp::Ordering, fmt, hash};

/// A dynamically typed attribute value.
#[derive(Debug, Default, Clone)]
pub enum Value {
    /// Boolean value
    Bool(bool),

    /// Signed 32-bit integer
    I32(i32),

    /// Signed 64-bit integer
    I64(i64),

    /// 64-bit floating point number
    F64(f64),

    /// String value
    String(String),

    /// A list of values, the operand of IN and NOT IN
    List(Vec<Value>),

    /// A related entity
    Entity(EntityRef),

    /// Null value
    #[default]
    Null,
}

impl Value {
    pub const fn null() -> Self {
        Self::Null
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    pub fn list_from_vec(items: Vec<Self>) -> Self {
        Self::List(items)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_entity(&self) -> Option<&EntityRef> {
        match self {
            Self::Entity(entity) => Some(entity),
            _ => None,
        }
    }

    /// Name of the variant, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "Bool",
            Self::I32(_) => "I32",
            Self::I64(_) => "I64",
            Self::F64(_) => "F64",
            Self::String(_) => "String",
            Self::List(_) => "List",
            Self::Entity(_) => "Entity",
            Self::Null => "Null",
        }
    }

    /// Compares two values of a comparable kind.
    ///
    /// Numbers compare numerically across kinds and floats use total
    /// ordering. Returns `None` when either side is null or the kinds are
    /// incompatible.
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        use Value::*;

        match (self, other) {
            (Bool(a), Bool(b)) => Some(a.cmp(b)),
            (I32(a), I32(b)) => Some(a.cmp(b)),
            (I64(a), I64(b)) => Some(a.cmp(b)),
            (I32(a), I64(b)) => Some(i64::from(*a).cmp(b)),
            (I64(a), I32(b)) => Some(a.cmp(&i64::from(*b))),
            (F64(a), F64(b)) => Some(a.total_cmp(b)),
            (F64(a), I32(b)) => Some(a.total_cmp(&f64::from(*b))),
            (I32(a), F64(b)) => Some(f64::from(*a).total_cmp(b)),
            (F64(a), I64(b)) => Some(a.total_cmp(&(*b as f64))),
            (I64(a), F64(b)) => Some((*a as f64).total_cmp(b)),
            (String(a), String(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }
}

/// Integers are equal across widths; floats never equal integers.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        use Value::*;

        match (self, other) {
            (Bool(a), Bool(b)) => a == b,
            (I32(a), I32(b)) => a == b,
            (I64(a), I64(b)) => a == b,
            (I32(a), I64(b)) | (I64(b), I32(a)) => i64::from(*a) == *b,
            (F64(a), F64(b)) => a.to_bits() == b.to_bits(),
            (String(a), String(b)) => a == b,
            (List(a), List(b)) => a == b,
            (Entity(a), Entity(b)) => a.ptr_eq(b),
            (Null, Null) => true,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl hash::Hash for Value {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        // Both integer widths hash alike, as they compare equal.
        match self {
            Self::I32(_) => core::mem::discriminant(&Self::I64(0)).hash(state),
            _ => core::mem::discriminant(self).hash(state),
        }

        match self {
            Self::Bool(v) => v.hash(state),
            Self::I32(v) => i64::from(*v).hash(state),
            Self::I64(v) => v.hash(state),
            Self::F64(v) => v.to_bits().hash(state),
            Self::String(v) => v.hash(state),
            Self::List(items) => items.hash(state),
            Self::Entity(entity) => entity.addr().hash(state),
            Self::Null => {}
        }
    }
}

/// The generic value encoder: text without quoting.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => fmt::Display::fmt(v, f),
            Self::I32(v) => fmt::Display::fmt(v, f),
            Self::I64(v) => fmt::Display::fmt(v, f),
            Self::F64(v) => fmt::Display::fmt(v, f),
            Self::String(v) => f.write_str(v),
            Self::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    fmt::Display::fmt(item, f)?;
                }
                Ok(())
            }
            Self::Entity(entity) => write!(f, "{}", entity.domain().simple_name()),
            Self::Null => f.write_str("null"),
        }
    }
}

impl AsRef<Self> for Value {
    fn as_ref(&self) -> &Self {
        self
    }
}
