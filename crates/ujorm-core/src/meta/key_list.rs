use super::{Domain, KeyRef};
use crate::{Error, Result};
use indexmap::IndexMap;
use std::{fmt, sync::Arc};

/// The ordered keys of one domain, including keys inherited from ancestors.
///
/// The position of every key equals its index, so entities may use the index
/// to address their storage.
#[derive(Clone)]
pub struct KeyList {
    inner: Arc<KeyListInner>,
}

struct KeyListInner {
    domain: Domain,
    keys: IndexMap<Box<str>, KeyRef>,
}

impl KeyList {
    pub fn new(domain: &Domain, keys: impl IntoIterator<Item = KeyRef>) -> Result<KeyList> {
        let mut map = IndexMap::new();

        for key in keys {
            if !key.is_direct() {
                return Err(Error::invalid_argument(format!(
                    "composite key `{key}` cannot be listed in {domain}"
                )));
            }

            if !key.domain().is_assignable_from(domain) {
                return Err(Error::invalid_argument(format!(
                    "key `{key}` of {} does not belong to {domain}",
                    key.domain()
                )));
            }

            let position = map.len();
            if usize::try_from(key.index()).ok() != Some(position) {
                return Err(Error::invalid_argument(format!(
                    "key `{key}` has index {}, expected {position}",
                    key.index()
                )));
            }

            if map.contains_key(key.name()) {
                return Err(Error::invalid_argument(format!(
                    "duplicate key `{key}` in {domain}"
                )));
            }

            map.insert(key.name().into(), key);
        }

        Ok(KeyList {
            inner: Arc::new(KeyListInner {
                domain: domain.clone(),
                keys: map,
            }),
        })
    }

    pub fn domain(&self) -> &Domain {
        &self.inner.domain
    }

    pub fn len(&self) -> usize {
        self.inner.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.keys.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&KeyRef> {
        self.inner.keys.get_index(index).map(|(_, key)| key)
    }

    /// Finds a direct key by name.
    pub fn find(&self, name: &str) -> Option<&KeyRef> {
        self.inner.keys.get(name)
    }

    pub fn first(&self) -> Option<&KeyRef> {
        self.get(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &KeyRef> {
        self.inner.keys.values()
    }
}

impl<'a> IntoIterator for &'a KeyList {
    type Item = &'a KeyRef;
    type IntoIter = indexmap::map::Values<'a, Box<str>, KeyRef>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.keys.values()
    }
}

impl fmt::Debug for KeyList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyList")
            .field("domain", &self.inner.domain)
            .field("keys", &self.inner.keys.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meta::Type;

    #[test]
    fn rejects_out_of_order_index() {
        let domain = Domain::new("Item");
        let err = KeyList::new(
            &domain,
            [
                KeyRef::new(&domain, 0, "id", Type::I64),
                KeyRef::new(&domain, 2, "name", Type::String),
            ],
        )
        .unwrap_err();

        assert!(err.is_invalid_argument());
        assert_eq!(
            err.to_string(),
            "invalid argument: key `name` has index 2, expected 1"
        );
    }

    #[test]
    fn rejects_foreign_key() {
        let domain = Domain::new("Item");
        let other = Domain::new("Order");
        let err = KeyList::new(&domain, [KeyRef::new(&other, 0, "id", Type::I64)]).unwrap_err();

        assert!(err.is_invalid_argument());
    }

    #[test]
    fn inherits_parent_keys() {
        let parent = Domain::new("Item");
        let child = Domain::with_parent("Book", &parent);
        let keys = KeyList::new(
            &child,
            [
                KeyRef::new(&parent, 0, "id", Type::I64),
                KeyRef::new(&child, 1, "isbn", Type::String),
            ],
        )
        .unwrap();

        assert_eq!(keys.len(), 2);
        assert_eq!(keys.find("isbn").unwrap().index(), 1);
        assert_eq!(keys.first().unwrap().name(), "id");
        assert!(keys.find("missing").is_none());
    }
}
