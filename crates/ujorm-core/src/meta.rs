//! The key metamodel: domains, typed keys and the entity access protocol.

mod array_entity;
pub use array_entity::ArrayEntity;

mod comparator;
pub use comparator::EntityComparator;

mod domain;
pub use domain::Domain;

mod entity;
pub use entity::{AsAny, AsEntity, Entity, EntityClone, EntityRef};

mod key;
pub use key::{Key, KeyBuilder, KeyValue};

mod key_list;
pub use key_list::KeyList;

mod key_ref;
pub use key_ref::KeyRef;

mod key_registry;
pub use key_registry::KeyRegistry;

mod num;

mod ty;
pub use ty::Type;

mod validator;
pub use validator::{Length, Required, Validator};

mod value;
pub use value::Value;
