use super::{Domain, Entity, KeyList, KeyRef, Value};
use crate::{Error, Result};

/// A general purpose entity storing one value slot per key of a key list.
#[derive(Debug, Clone)]
pub struct ArrayEntity {
    keys: KeyList,
    values: Vec<Value>,
}

impl ArrayEntity {
    pub fn new(keys: &KeyList) -> ArrayEntity {
        ArrayEntity {
            keys: keys.clone(),
            values: vec![Value::Null; keys.len()],
        }
    }

    /// Stores a value and returns the entity, for building fixtures.
    pub fn with(mut self, key: &KeyRef, value: impl Into<Value>) -> Result<ArrayEntity> {
        key.set_value(&mut self, value.into())?;
        Ok(self)
    }

    fn slot(&self, key: &KeyRef) -> Option<usize> {
        let index = usize::try_from(key.index()).ok()?;
        match self.keys.get(index) {
            Some(listed) if listed == key => Some(index),
            _ => None,
        }
    }
}

impl Entity for ArrayEntity {
    fn domain(&self) -> &Domain {
        self.keys.domain()
    }

    fn keys(&self) -> &KeyList {
        &self.keys
    }

    fn read_value(&self, key: &KeyRef) -> Value {
        self.slot(key)
            .map(|index| self.values[index].clone())
            .unwrap_or_default()
    }

    fn write_value(&mut self, key: &KeyRef, value: Value) -> Result<()> {
        let Some(index) = self.slot(key) else {
            return Err(Error::invalid_argument(format!(
                "key `{key}` does not belong to {}",
                self.domain()
            )));
        };

        self.values[index] = value;
        Ok(())
    }
}
