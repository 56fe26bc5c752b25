use super::{Domain, Entity, EntityRef, Type, Validator, Value};
use crate::{Error, Result};
use std::{fmt, hash, sync::Arc};

/// An untyped, cheaply cloneable key.
///
/// A key is either direct, naming one attribute of a domain, or composite,
/// chaining direct keys through related entities (`boss.name`). Keys are
/// immutable; methods such as [`KeyRef::descending`] return new keys.
#[derive(Clone)]
pub struct KeyRef {
    inner: Arc<KeyInner>,
}

struct KeyInner {
    kind: KeyKind,
    ascending: bool,
}

enum KeyKind {
    Direct(DirectKey),
    Composite(CompositeKey),
}

#[derive(Clone)]
pub(crate) struct DirectKey {
    pub(crate) name: Box<str>,
    pub(crate) index: i32,
    pub(crate) ty: Type,
    pub(crate) domain: Domain,
    pub(crate) default: Value,
    pub(crate) validator: Option<Arc<dyn Validator>>,
}

struct CompositeKey {
    /// Direct keys, in navigation order. Never empty.
    hops: Vec<KeyRef>,

    /// Optional alias per hop, used to tell apart repeated joins.
    aliases: Vec<Option<Box<str>>>,

    full_name: Box<str>,
}

impl KeyRef {
    /// Creates a direct key without default value or validator.
    pub fn new(domain: &Domain, index: i32, name: impl Into<String>, ty: Type) -> KeyRef {
        KeyRef::from_direct(
            DirectKey {
                name: name.into().into(),
                index,
                ty,
                domain: domain.clone(),
                default: Value::Null,
                validator: None,
            },
            true,
        )
    }

    pub(crate) fn from_direct(key: DirectKey, ascending: bool) -> KeyRef {
        KeyRef {
            inner: Arc::new(KeyInner {
                kind: KeyKind::Direct(key),
                ascending,
            }),
        }
    }

    fn composite(hops: Vec<KeyRef>, aliases: Vec<Option<Box<str>>>, ascending: bool) -> KeyRef {
        debug_assert!(!hops.is_empty());
        debug_assert_eq!(hops.len(), aliases.len());

        let full_name = hops
            .iter()
            .map(|hop| hop.name())
            .collect::<Vec<_>>()
            .join(".");

        KeyRef {
            inner: Arc::new(KeyInner {
                kind: KeyKind::Composite(CompositeKey {
                    hops,
                    aliases,
                    full_name: full_name.into(),
                }),
                ascending,
            }),
        }
    }

    fn direct(&self) -> Option<&DirectKey> {
        match &self.inner.kind {
            KeyKind::Direct(key) => Some(key),
            KeyKind::Composite(_) => None,
        }
    }

    /// The attribute name; the dotted path for composite keys.
    pub fn name(&self) -> &str {
        match &self.inner.kind {
            KeyKind::Direct(key) => &key.name,
            KeyKind::Composite(key) => &key.full_name,
        }
    }

    /// The qualified name, `Domain.name`.
    pub fn full_name(&self) -> String {
        format!("{}.{}", self.domain().simple_name(), self.name())
    }

    /// Position of the key in its domain's key list, `-1` for composites.
    pub fn index(&self) -> i32 {
        self.direct().map_or(-1, |key| key.index)
    }

    /// The declared value type; the last hop's type for composites.
    pub fn ty(&self) -> &Type {
        match &self.inner.kind {
            KeyKind::Direct(key) => &key.ty,
            KeyKind::Composite(key) => key.last().ty(),
        }
    }

    /// The declared domain; the first hop's domain for composites.
    pub fn domain(&self) -> &Domain {
        match &self.inner.kind {
            KeyKind::Direct(key) => &key.domain,
            KeyKind::Composite(key) => key.hops[0].domain(),
        }
    }

    pub fn default_value(&self) -> &Value {
        match &self.inner.kind {
            KeyKind::Direct(key) => &key.default,
            KeyKind::Composite(key) => key.last().default_value(),
        }
    }

    pub fn validator(&self) -> Option<&dyn Validator> {
        match &self.inner.kind {
            KeyKind::Direct(key) => key.validator.as_deref(),
            KeyKind::Composite(key) => key.last().validator(),
        }
    }

    pub fn is_direct(&self) -> bool {
        matches!(self.inner.kind, KeyKind::Direct(_))
    }

    pub fn is_composite(&self) -> bool {
        matches!(self.inner.kind, KeyKind::Composite(_))
    }

    /// The direct keys this key navigates, a single element for direct keys.
    pub fn hops(&self) -> &[KeyRef] {
        match &self.inner.kind {
            KeyKind::Direct(_) => std::slice::from_ref(self),
            KeyKind::Composite(key) => &key.hops,
        }
    }

    pub fn first(&self) -> &KeyRef {
        &self.hops()[0]
    }

    pub fn last(&self) -> &KeyRef {
        let hops = self.hops();
        &hops[hops.len() - 1]
    }

    /// Alias of the hop at `position`, if any.
    pub fn alias_at(&self, position: usize) -> Option<&str> {
        match &self.inner.kind {
            KeyKind::Direct(_) => None,
            KeyKind::Composite(key) => key.aliases.get(position)?.as_deref(),
        }
    }

    /// Aliases of all hops, `None` where a hop has no alias.
    pub fn aliases(&self) -> Vec<Option<&str>> {
        (0..self.hops().len()).map(|i| self.alias_at(i)).collect()
    }

    fn owned_aliases(&self) -> Vec<Option<Box<str>>> {
        match &self.inner.kind {
            KeyKind::Direct(_) => vec![None],
            KeyKind::Composite(key) => key.aliases.clone(),
        }
    }

    pub fn is_ascending(&self) -> bool {
        self.inner.ascending
    }

    /// Returns a descending copy of this key.
    pub fn descending(&self) -> KeyRef {
        self.descending_if(true)
    }

    /// Returns a copy of this key sorted descending when `descending` is set
    /// and ascending otherwise.
    pub fn descending_if(&self, descending: bool) -> KeyRef {
        let ascending = !descending;
        if ascending == self.is_ascending() {
            return self.clone();
        }

        match &self.inner.kind {
            KeyKind::Direct(key) => KeyRef::from_direct(key.clone(), ascending),
            KeyKind::Composite(key) => {
                KeyRef::composite(key.hops.clone(), key.aliases.clone(), ascending)
            }
        }
    }

    /// Returns a composite key with `alias` attached to the last hop.
    pub fn alias(&self, alias: impl Into<String>) -> KeyRef {
        let mut aliases = self.owned_aliases();
        let last = aliases.len() - 1;
        aliases[last] = Some(alias.into().into());
        KeyRef::composite(self.hops().to_vec(), aliases, self.is_ascending())
    }

    /// Chains `next` after this key.
    ///
    /// Each hop except the last must be entity-typed, and the following
    /// hop must be declared on that entity's domain or one of its
    /// ancestors.
    pub fn join(&self, next: &KeyRef) -> Result<KeyRef> {
        let Some(target) = self.ty().as_entity() else {
            return Err(Error::invalid_argument(format!(
                "key `{}` of type {} is not a relation and cannot be joined with `{}`",
                self.name(),
                self.ty(),
                next.name()
            )));
        };

        if !next.domain().is_assignable_from(target) {
            return Err(Error::invalid_argument(format!(
                "key `{}` is declared on {}, which is not a supertype of {}",
                next.name(),
                next.domain(),
                target
            )));
        }

        let mut hops = self.hops().to_vec();
        hops.extend_from_slice(next.hops());

        let mut aliases = self.owned_aliases();
        aliases.extend(next.owned_aliases());

        Ok(KeyRef::composite(hops, aliases, next.is_ascending()))
    }

    /// Returns `true` if this key's value type is assignable to `ty`.
    pub fn is_type_of(&self, ty: &Type) -> bool {
        ty.is_assignable_from(self.ty())
    }

    /// Returns `true` if this key is declared on `domain` or one of its
    /// ancestors.
    pub fn is_domain_of(&self, domain: &Domain) -> bool {
        self.domain().is_assignable_from(domain)
    }

    /// Reads the value of this key. Direct keys substitute the default value
    /// for null; composite keys return null as soon as a hop is null.
    pub fn get_value(&self, entity: &dyn Entity) -> Value {
        match &self.inner.kind {
            KeyKind::Direct(key) => {
                let value = entity.read_value(self);
                if value.is_null() {
                    key.default.clone()
                } else {
                    value
                }
            }
            KeyKind::Composite(key) => key.read(entity),
        }
    }

    /// Writes the value of this key after checking its type and validator.
    ///
    /// Composite writes copy each nested entity on the way down and store the
    /// modified copies back, so entities shared elsewhere are not affected.
    pub fn set_value(&self, entity: &mut dyn Entity, value: Value) -> Result<()> {
        match &self.inner.kind {
            KeyKind::Direct(key) => {
                let value = key.ty.coerce(value);
                if !key.ty.accepts(&value) {
                    return Err(Error::invalid_argument(format!(
                        "key `{}` expects {}, got {}",
                        key.name,
                        key.ty,
                        value.kind_name()
                    )));
                }

                if let Some(validator) = &key.validator {
                    validator.validate(self, &value)?;
                }

                entity.write_value(self, value)
            }
            KeyKind::Composite(key) => write_path(&key.hops, entity, value),
        }
    }

    /// Returns `true` if the entity's value of this key equals `value`.
    pub fn equals_value(&self, entity: &dyn Entity, value: &Value) -> bool {
        self.get_value(entity) == *value
    }

    /// Returns `true` if the entity holds the key's default value.
    pub fn is_default(&self, entity: &dyn Entity) -> bool {
        self.equals_value(entity, self.default_value())
    }

    /// Copies this key's value from one entity to another.
    pub fn copy(&self, from: &dyn Entity, to: &mut dyn Entity) -> Result<()> {
        self.set_value(to, self.get_value(from))
    }
}

impl CompositeKey {
    fn last(&self) -> &KeyRef {
        &self.hops[self.hops.len() - 1]
    }

    fn read(&self, entity: &dyn Entity) -> Value {
        let Some((last, path)) = self.hops.split_last() else {
            return Value::Null;
        };

        let mut current: Option<EntityRef> = None;

        for hop in path {
            let value = match &current {
                Some(nested) => hop.get_value(&**nested),
                None => hop.get_value(entity),
            };

            match value {
                Value::Entity(nested) => current = Some(nested),
                _ => return Value::Null,
            }
        }

        match &current {
            Some(nested) => last.get_value(&**nested),
            None => last.get_value(entity),
        }
    }
}

fn write_path(hops: &[KeyRef], entity: &mut dyn Entity, value: Value) -> Result<()> {
    match hops {
        [] => Err(Error::invalid_argument("empty key path")),
        [last] => last.set_value(entity, value),
        [first, rest @ ..] => {
            let Value::Entity(nested) = first.get_value(entity) else {
                return Err(Error::invalid_argument(format!(
                    "relation `{}` is not set on {}",
                    first.name(),
                    entity.domain()
                )));
            };

            let mut nested = nested.clone_entity();
            write_path(rest, nested.as_mut(), value)?;
            first.set_value(entity, Value::Entity(EntityRef::from(nested)))
        }
    }
}

/// Keys are equal when their names and declared types match. Neither the sort
/// direction nor aliases participate.
impl PartialEq for KeyRef {
    fn eq(&self, other: &Self) -> bool {
        if Arc::ptr_eq(&self.inner, &other.inner) {
            return true;
        }

        self.name() == other.name() && self.ty() == other.ty()
    }
}

impl Eq for KeyRef {}

impl hash::Hash for KeyRef {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.name().hash(state);
        self.ty().hash(state);
    }
}

impl fmt::Display for KeyRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Debug for KeyRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyRef({}: {}", self.full_name(), self.ty())?;
        if !self.is_ascending() {
            f.write_str(" DESC")?;
        }
        f.write_str(")")
    }
}
