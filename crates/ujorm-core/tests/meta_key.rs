mod common;

use common::*;
use pretty_assertions::assert_eq;
use ujorm_core::meta::{
    ArrayEntity, Domain, EntityComparator, EntityRef, Key, KeyList, KeyRef, KeyRegistry, Length,
    Required, Type, Value,
};

fn registry() -> KeyRegistry {
    let mut registry = KeyRegistry::new();
    registry
        .register(PERSON_KEYS.clone())
        .register(USER_KEYS.clone());
    registry
}

// ---------------------------------------------------------------------------
// Direct keys
// ---------------------------------------------------------------------------

#[test]
fn typed_get_and_set() {
    let mut p = Person::default();
    assert_eq!(NAME.get(&p).unwrap(), None);

    NAME.set(&mut p, "Pavel".to_string()).unwrap();
    CASH.set(&mut p, 12.5f64).unwrap();

    assert_eq!(NAME.get(&p).unwrap(), Some("Pavel".to_string()));
    assert_eq!(CASH.get(&p).unwrap(), Some(12.5));

    NAME.set(&mut p, None).unwrap();
    assert_eq!(NAME.get(&p).unwrap(), None);

    CASH.set(&mut p, Some(3.0)).unwrap();
    assert_eq!(CASH.get(&p).unwrap(), Some(3.0));
    CASH.set(&mut p, None).unwrap();
    assert_eq!(p.cash, None);
}

#[test]
fn key_metadata() {
    assert_eq!(NAME.name(), "name");
    assert_eq!(NAME.full_name(), "Person.name");
    assert_eq!(NAME.index(), 0);
    assert_eq!(*NAME.ty(), Type::String);
    assert_eq!(*NAME.domain(), *PERSON);
    assert!(NAME.is_direct());
    assert!(NAME.is_ascending());
    assert!(NAME.is_type_of(&Type::String));
    assert!(!NAME.is_type_of(&Type::F64));
    assert!(NAME.is_domain_of(&USER));
    assert!(NAME.is_domain_of(&PERSON));
    assert!(LOGIN.is_domain_of(&USER));
    assert!(!LOGIN.is_domain_of(&PERSON));
}

#[test]
fn default_value_replaces_null() {
    let domain = Domain::new("Account");
    let limit: Key<ArrayEntity, i64> = Key::builder(&domain, 0, "limit")
        .default_value(100i64)
        .build();
    let keys = KeyList::new(&domain, [limit.raw().clone()]).unwrap();
    let mut account = ArrayEntity::new(&keys);

    assert_eq!(limit.get(&account).unwrap(), Some(100));
    assert!(limit.is_default(&account));

    limit.set(&mut account, 5i64).unwrap();
    assert_eq!(limit.get(&account).unwrap(), Some(5));
    assert!(!limit.is_default(&account));
}

#[test]
fn set_rejects_wrong_type() {
    let mut p = Person::default();
    let err = NAME.raw().set_value(&mut p, Value::I64(1)).unwrap_err();

    assert!(err.is_invalid_argument());
    assert_eq!(
        err.to_string(),
        "invalid argument: key `name` expects String, got I64"
    );
}

#[test]
fn descending_keeps_identity() {
    let desc = NAME.descending();

    assert!(!desc.is_ascending());
    assert_eq!(desc, *NAME);
    assert!(!desc.descending().is_ascending());
    assert!(NAME.raw().descending_if(false).is_ascending());
}

#[test]
fn copy_between_entities() {
    let from = person("Pavel", 1.0);
    let mut to = Person::default();

    NAME.copy(&from, &mut to).unwrap();
    assert_eq!(to.name.as_deref(), Some("Pavel"));
    assert!(NAME.equals_value(&to, &Value::from("Pavel")));
}

// ---------------------------------------------------------------------------
// Validators
// ---------------------------------------------------------------------------

#[test]
fn required_validator() {
    let domain = Domain::new("Contact");
    let email: Key<ArrayEntity, String> = Key::builder(&domain, 0, "email")
        .validator(Required)
        .build();
    let keys = KeyList::new(&domain, [email.raw().clone()]).unwrap();
    let mut contact = ArrayEntity::new(&keys);

    let err = email.set(&mut contact, None).unwrap_err();
    assert!(err.is_validation());
    assert_eq!(
        err.to_string(),
        "validation failed for `email`: value is required"
    );

    email.set(&mut contact, "a@b.cz".to_string()).unwrap();
}

#[test]
fn length_validator() {
    let domain = Domain::new("Contact");
    let code: Key<ArrayEntity, String> = Key::builder(&domain, 0, "code")
        .validator(Length::between(2, 4))
        .build();
    let keys = KeyList::new(&domain, [code.raw().clone()]).unwrap();
    let mut contact = ArrayEntity::new(&keys);

    let err = code.set(&mut contact, "abcde".to_string()).unwrap_err();
    assert!(err.is_validation());
    assert_eq!(
        err.to_string(),
        "validation failed for `code`: value length 5 is too long (maximum: 4)"
    );

    code.set(&mut contact, "abc".to_string()).unwrap();
    code.set(&mut contact, None).unwrap();
}

// ---------------------------------------------------------------------------
// Composite keys
// ---------------------------------------------------------------------------

#[test]
fn composite_key_reads_through_relation() {
    let boss_name = BOSS.join(&NAME).unwrap();

    assert!(boss_name.is_composite());
    assert_eq!(boss_name.name(), "boss.name");
    assert_eq!(boss_name.full_name(), "Person.boss.name");
    assert_eq!(boss_name.index(), -1);
    assert_eq!(*boss_name.ty(), Type::String);
    assert_eq!(*boss_name.domain(), *PERSON);
    assert_eq!(boss_name.first(), BOSS.raw());
    assert_eq!(boss_name.last(), NAME.raw());

    let mut p = person("Lucy", 1.0);
    assert_eq!(boss_name.get(&p).unwrap(), None);

    p.boss = Some(EntityRef::new(person("Pavel", 2.0)));
    assert_eq!(boss_name.get(&p).unwrap(), Some("Pavel".to_string()));
}

#[test]
fn composite_key_writes_copy() {
    let boss_name = BOSS.join(&NAME).unwrap();
    let boss = EntityRef::new(person("Pavel", 2.0));

    let mut p = person("Lucy", 1.0);
    p.boss = Some(boss.clone());

    boss_name.set(&mut p, "George".to_string()).unwrap();

    assert_eq!(boss_name.get(&p).unwrap(), Some("George".to_string()));
    assert_eq!(
        NAME.raw().get_value(&*boss),
        Value::from("Pavel"),
        "the shared boss must not change"
    );
}

#[test]
fn composite_key_write_requires_relation() {
    let boss_name = BOSS.join(&NAME).unwrap();
    let mut p = person("Lucy", 1.0);

    let err = boss_name.set(&mut p, "George".to_string()).unwrap_err();
    assert!(err.is_invalid_argument());
}

#[test]
fn join_requires_relation() {
    let err = NAME.join(&CASH).unwrap_err();

    assert!(err.is_invalid_argument());
    assert_eq!(
        err.to_string(),
        "invalid argument: key `name` of type String is not a relation and cannot be joined with `cash`"
    );
}

#[test]
fn join_rejects_key_of_sub_domain() {
    assert!(BOSS.join(&LOGIN).unwrap_err().is_invalid_argument());
}

#[test]
fn alias_is_kept_on_composite() {
    let aliased = BOSS.alias("b").join(&NAME).unwrap();

    assert_eq!(aliased.aliases(), vec![Some("b"), None]);
    assert_eq!(aliased.alias_at(0), Some("b"));
    assert_eq!(*aliased, *BOSS.join(&NAME).unwrap());
}

// ---------------------------------------------------------------------------
// Key lists and the registry
// ---------------------------------------------------------------------------

#[test]
fn key_list_lookup() {
    assert_eq!(USER_KEYS.len(), 4);
    assert_eq!(USER_KEYS.find("login"), Some(LOGIN.raw()));
    assert_eq!(USER_KEYS.get(1), Some(CASH.raw()));
    assert_eq!(
        USER_KEYS.iter().map(KeyRef::name).collect::<Vec<_>>(),
        ["name", "cash", "boss", "login"]
    );
}

#[test]
fn registry_resolves_direct_and_composite() {
    let registry = registry();

    assert_eq!(registry.resolve("User", "login").unwrap(), *LOGIN.raw());

    let resolved = registry.resolve("Person", "boss.boss.name").unwrap();
    assert_eq!(resolved.name(), "boss.boss.name");
    assert_eq!(resolved.hops().len(), 3);
}

#[test]
fn registry_reports_missing_key() {
    let err = registry().resolve("Person", "boss.nick").unwrap_err();

    assert!(err.is_key_not_found());
    assert_eq!(err.to_string(), "key not found: Person.boss.nick");
}

// ---------------------------------------------------------------------------
// Comparator
// ---------------------------------------------------------------------------

#[test]
fn comparator_sorts_by_keys_nulls_last() {
    let mut people = vec![
        person("Lucy", 5.0),
        with_cash(None),
        person("Adam", 5.0),
        person("Eve", 1.0),
    ];

    let comparator = EntityComparator::new([CASH.descending().into_raw(), NAME.raw().clone()]);
    comparator.sort(&mut people);

    let names: Vec<_> = people.iter().map(|p| p.name.clone()).collect();
    assert_eq!(
        names,
        [
            Some("Adam".to_string()),
            Some("Lucy".to_string()),
            Some("Eve".to_string()),
            None,
        ]
    );
    assert_eq!(comparator.to_string(), "cash[DESC], name[ASC]");
}

// ---------------------------------------------------------------------------
// Array entity
// ---------------------------------------------------------------------------

#[test]
fn array_entity_stores_by_index() {
    let domain = Domain::new("Row");
    let id = KeyRef::new(&domain, 0, "id", Type::I64);
    let label = KeyRef::new(&domain, 1, "label", Type::String);
    let keys = KeyList::new(&domain, [id.clone(), label.clone()]).unwrap();

    let row = ArrayEntity::new(&keys)
        .with(&id, 7i64)
        .unwrap()
        .with(&label, "seven")
        .unwrap();

    assert_eq!(id.get_value(&row), Value::I64(7));
    assert_eq!(label.get_value(&row), Value::from("seven"));

    let foreign = KeyRef::new(&domain, 1, "other", Type::String);
    assert_eq!(foreign.get_value(&row), Value::Null);
    assert!(ArrayEntity::new(&keys)
        .with(&foreign, "x")
        .unwrap_err()
        .is_invalid_argument());
}
