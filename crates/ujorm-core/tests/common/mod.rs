#![allow(dead_code)]

use std::sync::LazyLock;
use ujorm_core::{
    meta::{ArrayEntity, Domain, Entity, EntityRef, Key, KeyList, KeyRef, Value},
    Error, Result,
};

pub static PERSON: LazyLock<Domain> = LazyLock::new(|| Domain::new("Person"));
pub static USER: LazyLock<Domain> = LazyLock::new(|| Domain::with_parent("User", &PERSON));

pub static NAME: LazyLock<Key<Person, String>> = LazyLock::new(|| Key::new(&PERSON, 0, "name"));
pub static CASH: LazyLock<Key<Person, f64>> = LazyLock::new(|| Key::new(&PERSON, 1, "cash"));
pub static BOSS: LazyLock<Key<Person, EntityRef>> =
    LazyLock::new(|| Key::relation(&PERSON, 2, "boss", &PERSON));
pub static LOGIN: LazyLock<Key<User, String>> = LazyLock::new(|| Key::new(&USER, 3, "login"));

pub static PERSON_KEYS: LazyLock<KeyList> = LazyLock::new(|| {
    KeyList::new(
        &PERSON,
        [NAME.raw().clone(), CASH.raw().clone(), BOSS.raw().clone()],
    )
    .unwrap()
});

pub static USER_KEYS: LazyLock<KeyList> = LazyLock::new(|| {
    KeyList::new(
        &USER,
        [
            NAME.raw().clone(),
            CASH.raw().clone(),
            BOSS.raw().clone(),
            LOGIN.raw().clone(),
        ],
    )
    .unwrap()
});

pub static ITEM: LazyLock<Domain> = LazyLock::new(|| Domain::new("Item"));

pub static ID: LazyLock<Key<ArrayEntity, i64>> = LazyLock::new(|| Key::new(&ITEM, 0, "id"));
pub static QTY: LazyLock<Key<ArrayEntity, i32>> = LazyLock::new(|| Key::new(&ITEM, 1, "qty"));
pub static PRICE: LazyLock<Key<ArrayEntity, f64>> =
    LazyLock::new(|| Key::new(&ITEM, 2, "price"));

pub static ITEM_KEYS: LazyLock<KeyList> = LazyLock::new(|| {
    KeyList::new(
        &ITEM,
        [ID.raw().clone(), QTY.raw().clone(), PRICE.raw().clone()],
    )
    .unwrap()
});

#[derive(Debug, Clone, Default)]
pub struct Person {
    pub name: Option<String>,
    pub cash: Option<f64>,
    pub boss: Option<EntityRef>,
}

#[derive(Debug, Clone, Default)]
pub struct User {
    pub person: Person,
    pub login: Option<String>,
}

pub fn item(id: i64, qty: i32, price: f64) -> ArrayEntity {
    ArrayEntity::new(&ITEM_KEYS)
        .with(&ID, id)
        .and_then(|item| item.with(&QTY, qty))
        .and_then(|item| item.with(&PRICE, price))
        .unwrap()
}

/// Routes `log` output to the test harness; `RUST_LOG=trace` shows folding.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn person(name: &str, cash: f64) -> Person {
    Person {
        name: Some(name.to_string()),
        cash: Some(cash),
        boss: None,
    }
}

pub fn with_cash(cash: Option<f64>) -> Person {
    Person {
        name: None,
        cash,
        boss: None,
    }
}

pub fn user(name: &str, login: &str) -> User {
    User {
        person: person(name, 0.0),
        login: Some(login.to_string()),
    }
}

fn opt<T: TryFrom<Value, Error = Error>>(value: Value) -> Result<Option<T>> {
    match value {
        Value::Null => Ok(None),
        value => T::try_from(value).map(Some),
    }
}

impl Entity for Person {
    fn domain(&self) -> &Domain {
        &PERSON
    }

    fn keys(&self) -> &KeyList {
        &PERSON_KEYS
    }

    fn read_value(&self, key: &KeyRef) -> Value {
        match key.index() {
            0 => Value::from(self.name.clone()),
            1 => Value::from(self.cash),
            2 => Value::from(self.boss.clone()),
            _ => Value::Null,
        }
    }

    fn write_value(&mut self, key: &KeyRef, value: Value) -> Result<()> {
        match key.index() {
            0 => self.name = opt(value)?,
            1 => self.cash = opt(value)?,
            2 => self.boss = opt(value)?,
            _ => return Err(Error::invalid_argument(format!("unknown key `{key}`"))),
        }
        Ok(())
    }
}

impl Entity for User {
    fn domain(&self) -> &Domain {
        &USER
    }

    fn keys(&self) -> &KeyList {
        &USER_KEYS
    }

    fn read_value(&self, key: &KeyRef) -> Value {
        match key.index() {
            3 => Value::from(self.login.clone()),
            _ => self.person.read_value(key),
        }
    }

    fn write_value(&mut self, key: &KeyRef, value: Value) -> Result<()> {
        match key.index() {
            3 => self.login = opt(value)?,
            _ => self.person.write_value(key, value)?,
        }
        Ok(())
    }
}
