use crate::meta::{KeyRef, Value};
use std::{fmt, hash, sync::Arc};

/// The right-hand side of a value criterion.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Operand {
    /// A literal value
    Value(Value),

    /// Another key, read from the same entity at evaluation time
    Key(KeyRef),

    /// A supplier invoked at evaluation time
    Lazy(LazyValue),

    /// A native SQL template with its parameter
    Template(TemplateValue),
}

/// A value computed on demand. Two lazy values are equal only when they
/// share the same supplier.
#[derive(Clone)]
pub struct LazyValue {
    supplier: Arc<dyn Fn() -> Value + Send + Sync>,
}

/// A native SQL template, `{0}` marking the place of the value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TemplateValue {
    template: String,
    value: Value,
}

impl Operand {
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_key(&self) -> Option<&KeyRef> {
        match self {
            Self::Key(key) => Some(key),
            _ => None,
        }
    }

    pub fn is_key(&self) -> bool {
        matches!(self, Self::Key(_))
    }

    pub fn is_lazy(&self) -> bool {
        matches!(self, Self::Lazy(_))
    }
}

impl LazyValue {
    pub fn new(supplier: impl Fn() -> Value + Send + Sync + 'static) -> LazyValue {
        LazyValue {
            supplier: Arc::new(supplier),
        }
    }

    pub fn get(&self) -> Value {
        (self.supplier)()
    }

    fn addr(&self) -> *const () {
        Arc::as_ptr(&self.supplier) as *const ()
    }
}

impl PartialEq for LazyValue {
    fn eq(&self, other: &Self) -> bool {
        self.addr() == other.addr()
    }
}

impl Eq for LazyValue {}

impl hash::Hash for LazyValue {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.addr().hash(state);
    }
}

impl fmt::Debug for LazyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LazyValue({:p})", self.addr())
    }
}

impl TemplateValue {
    pub fn new(template: impl Into<String>, value: impl Into<Value>) -> TemplateValue {
        TemplateValue {
            template: template.into(),
            value: value.into(),
        }
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}

impl fmt::Display for TemplateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.template)
    }
}

impl From<Value> for Operand {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<KeyRef> for Operand {
    fn from(value: KeyRef) -> Self {
        Self::Key(value)
    }
}

impl From<&KeyRef> for Operand {
    fn from(value: &KeyRef) -> Self {
        Self::Key(value.clone())
    }
}

impl From<LazyValue> for Operand {
    fn from(value: LazyValue) -> Self {
        Self::Lazy(value)
    }
}

impl From<TemplateValue> for Operand {
    fn from(value: TemplateValue) -> Self {
        Self::Template(value)
    }
}
