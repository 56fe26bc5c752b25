use super::{key_ref::DirectKey, AsEntity, Domain, KeyRef, Type, Validator, Value};
use crate::{Error, Result};
use std::{fmt, marker::PhantomData, ops::Deref, sync::Arc};

/// Rust types that can be stored under a typed [`Key`].
pub trait KeyValue {
    /// The declared type of keys holding this value.
    fn ty() -> Type;
}

/// A typed key of domain `E` holding values of type `V`.
///
/// `Key` is a thin wrapper over [`KeyRef`] and dereferences to it, so every
/// untyped operation is available as well. The type parameters only guide
/// the typed accessors and criterion factories.
pub struct Key<E: ?Sized, V> {
    raw: KeyRef,
    _p: PhantomData<fn(&E) -> V>,
}

/// Builds a direct [`Key`] with optional default value, validator and sort
/// direction.
pub struct KeyBuilder<E: ?Sized, V> {
    domain: Domain,
    index: i32,
    name: String,
    ty: Type,
    default: Value,
    validator: Option<Arc<dyn Validator>>,
    ascending: bool,
    _p: PhantomData<fn(&E) -> V>,
}

impl<E: ?Sized, V: KeyValue> Key<E, V> {
    /// Creates a direct key typed after `V`.
    pub fn new(domain: &Domain, index: i32, name: &str) -> Key<E, V> {
        Key::builder(domain, index, name).build()
    }

    pub fn builder(domain: &Domain, index: i32, name: &str) -> KeyBuilder<E, V> {
        KeyBuilder {
            domain: domain.clone(),
            index,
            name: name.to_string(),
            ty: V::ty(),
            default: Value::Null,
            validator: None,
            ascending: true,
            _p: PhantomData,
        }
    }
}

impl<E: ?Sized, V> Key<E, V> {
    /// Creates a key referencing an entity of the `target` domain.
    pub fn relation(domain: &Domain, index: i32, name: &str, target: &Domain) -> Key<E, V> {
        Key::from_raw(KeyRef::new(
            domain,
            index,
            name,
            Type::Entity(target.clone()),
        ))
    }

    /// Wraps an untyped key. The caller is responsible for the key's value
    /// type matching `V`.
    pub fn from_raw(raw: KeyRef) -> Key<E, V> {
        Key {
            raw,
            _p: PhantomData,
        }
    }

    pub fn raw(&self) -> &KeyRef {
        &self.raw
    }

    pub fn into_raw(self) -> KeyRef {
        self.raw
    }

    /// Reads a typed value, `None` when the value is null.
    pub fn get(&self, entity: &E) -> Result<Option<V>>
    where
        E: AsEntity,
        V: TryFrom<Value, Error = Error>,
    {
        match self.raw.get_value(entity.as_entity()) {
            Value::Null => Ok(None),
            value => V::try_from(value).map(Some),
        }
    }

    /// Writes a typed value; `None` stores null.
    pub fn set(&self, entity: &mut E, value: impl Into<Option<V>>) -> Result<()>
    where
        E: AsEntity,
        Value: From<V>,
    {
        let value = value.into().map_or(Value::Null, Value::from);
        self.raw.set_value(entity.as_entity_mut(), value)
    }

    /// Chains a key of the related domain after this one.
    pub fn join<F: ?Sized, W>(&self, next: &Key<F, W>) -> Result<Key<E, W>> {
        self.raw.join(&next.raw).map(Key::from_raw)
    }

    /// Reinterprets the key for another domain type, typically a sub-domain.
    pub fn cast<T: ?Sized>(&self) -> Key<T, V> {
        Key::from_raw(self.raw.clone())
    }

    pub fn descending(&self) -> Key<E, V> {
        Key::from_raw(self.raw.descending())
    }

    pub fn alias(&self, alias: &str) -> Key<E, V> {
        Key::from_raw(self.raw.alias(alias))
    }
}

impl<E: ?Sized, V> KeyBuilder<E, V> {
    /// Overrides the declared type derived from `V`.
    pub fn ty(mut self, ty: Type) -> Self {
        self.ty = ty;
        self
    }

    /// Value returned by reads when the stored value is null.
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = value.into();
        self
    }

    pub fn validator(mut self, validator: impl Validator + 'static) -> Self {
        self.validator = Some(Arc::new(validator));
        self
    }

    pub fn descending(mut self) -> Self {
        self.ascending = false;
        self
    }

    pub fn build(self) -> Key<E, V> {
        Key::from_raw(KeyRef::from_direct(
            DirectKey {
                name: self.name.into(),
                index: self.index,
                ty: self.ty,
                domain: self.domain,
                default: self.default,
                validator: self.validator,
            },
            self.ascending,
        ))
    }
}

impl<E: ?Sized, V> Clone for Key<E, V> {
    fn clone(&self) -> Self {
        Key::from_raw(self.raw.clone())
    }
}

impl<E: ?Sized, V> Deref for Key<E, V> {
    type Target = KeyRef;

    fn deref(&self) -> &KeyRef {
        &self.raw
    }
}

impl<E: ?Sized, V> From<Key<E, V>> for KeyRef {
    fn from(key: Key<E, V>) -> KeyRef {
        key.raw
    }
}

impl<E: ?Sized, V> From<&Key<E, V>> for KeyRef {
    fn from(key: &Key<E, V>) -> KeyRef {
        key.raw.clone()
    }
}

impl<E: ?Sized, V> PartialEq for Key<E, V> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<E: ?Sized, V> Eq for Key<E, V> {}

impl<E: ?Sized, V> fmt::Display for Key<E, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.raw, f)
    }
}

impl<E: ?Sized, V> fmt::Debug for Key<E, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.raw, f)
    }
}
