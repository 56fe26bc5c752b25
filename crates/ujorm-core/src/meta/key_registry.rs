use super::{KeyList, KeyRef};
use crate::{Error, Result};
use indexmap::IndexMap;

/// Key lists indexed by domain name.
///
/// The registry resolves keys by name, which is how decoded criteria get
/// their keys back.
#[derive(Debug, Clone, Default)]
pub struct KeyRegistry {
    lists: IndexMap<Box<str>, KeyList>,
}

impl KeyRegistry {
    pub fn new() -> KeyRegistry {
        KeyRegistry::default()
    }

    /// Registers the key list of a domain, replacing any previous one.
    pub fn register(&mut self, keys: KeyList) -> &mut Self {
        self.lists.insert(keys.domain().name().into(), keys);
        self
    }

    pub fn key_list(&self, domain: &str) -> Option<&KeyList> {
        self.lists.get(domain)
    }

    /// Resolves a direct or dotted key name relative to a domain.
    ///
    /// Each segment is looked up in the key list of the current domain; a
    /// relation moves the lookup to its target domain.
    pub fn resolve(&self, domain: &str, name: &str) -> Result<KeyRef> {
        let mut current = domain.to_string();
        let mut key: Option<KeyRef> = None;

        for segment in name.split('.') {
            let hop = self
                .key_list(&current)
                .and_then(|keys| keys.find(segment))
                .ok_or_else(|| Error::key_not_found(domain, name))?
                .clone();

            key = Some(match key {
                Some(prefix) => prefix.join(&hop)?,
                None => hop,
            });

            if let Some(target) = key.as_ref().and_then(|key| key.ty().as_entity()) {
                current = target.name().to_string();
            }
        }

        key.ok_or_else(|| Error::key_not_found(domain, name))
    }
}
