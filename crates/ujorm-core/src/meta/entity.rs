use super::{Domain, KeyList, KeyRef, Value};
use crate::Result;
use std::{any::Any, fmt, sync::Arc};

/// An object whose attributes are addressed through keys.
///
/// `read_value` and `write_value` form the raw access protocol. They only
/// ever receive direct keys; composite keys are resolved hop by hop in
/// [`KeyRef::get_value`] and [`KeyRef::set_value`]. Implementations usually
/// dispatch on [`KeyRef::index`].
pub trait Entity: EntityClone + AsAny + Send + Sync + fmt::Debug {
    /// The domain this entity belongs to.
    fn domain(&self) -> &Domain;

    /// All keys of the entity, ordered by index.
    fn keys(&self) -> &KeyList;

    /// Reads the raw value of a direct key. Unset attributes return
    /// [`Value::Null`].
    fn read_value(&self, key: &KeyRef) -> Value;

    /// Writes the raw value of a direct key.
    fn write_value(&mut self, key: &KeyRef, value: Value) -> Result<()>;
}

/// Object safe cloning for entities, implemented for every `Clone` entity.
pub trait EntityClone {
    fn clone_entity(&self) -> Box<dyn Entity>;
}

impl<T: Entity + Clone> EntityClone for T {
    fn clone_entity(&self) -> Box<dyn Entity> {
        Box::new(self.clone())
    }
}

#[doc(hidden)]
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Converts a reference into the `dyn Entity` form used by evaluation.
pub trait AsEntity {
    fn as_entity(&self) -> &dyn Entity;

    fn as_entity_mut(&mut self) -> &mut dyn Entity;
}

impl<T: Entity> AsEntity for T {
    fn as_entity(&self) -> &dyn Entity {
        self
    }

    fn as_entity_mut(&mut self) -> &mut dyn Entity {
        self
    }
}

impl AsEntity for dyn Entity {
    fn as_entity(&self) -> &dyn Entity {
        self
    }

    fn as_entity_mut(&mut self) -> &mut dyn Entity {
        self
    }
}

/// A shared reference to an entity, stored inside [`Value::Entity`].
#[derive(Clone)]
pub struct EntityRef {
    inner: Arc<dyn Entity>,
}

impl EntityRef {
    pub fn new(entity: impl Entity) -> EntityRef {
        EntityRef {
            inner: Arc::new(entity),
        }
    }

    pub fn ptr_eq(&self, other: &EntityRef) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Address of the shared entity, used for identity hashing.
    pub(crate) fn addr(&self) -> usize {
        Arc::as_ptr(&self.inner) as *const () as usize
    }

    /// Downcasts to a concrete entity type.
    pub fn downcast_ref<T: Entity>(&self) -> Option<&T> {
        (*self.inner).as_any().downcast_ref::<T>()
    }
}

impl core::ops::Deref for EntityRef {
    type Target = dyn Entity;

    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}

impl From<Box<dyn Entity>> for EntityRef {
    fn from(entity: Box<dyn Entity>) -> EntityRef {
        EntityRef {
            inner: Arc::from(entity),
        }
    }
}

impl fmt::Debug for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.inner, f)
    }
}
