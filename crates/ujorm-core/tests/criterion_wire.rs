mod common;

use common::*;
use pretty_assertions::assert_eq;
use ujorm_core::{
    criterion::{Operator, WireCriterion},
    meta::{EntityRef, KeyRegistry},
    Criterion,
};

fn registry() -> KeyRegistry {
    let mut registry = KeyRegistry::new();
    registry
        .register(PERSON_KEYS.clone())
        .register(USER_KEYS.clone())
        .register(ITEM_KEYS.clone());
    registry
}

fn round_trip<E: ?Sized>(crn: &Criterion<E>) -> Criterion<E> {
    init_logging();
    let bytes = crn.encode().unwrap();
    Criterion::decode(&bytes, &registry()).unwrap()
}

// ---------------------------------------------------------------------------
// Round trips
// ---------------------------------------------------------------------------

#[test]
fn value_leaf_round_trip() {
    let crn = CASH.where_ge(10.5);
    let decoded = round_trip(&crn);

    assert_eq!(decoded, crn);
    assert!(!decoded.ptr_eq(&crn));
    assert_eq!(decoded.to_string(), "(cash GE 10.5)");
}

#[test]
fn key_to_key_round_trip() {
    let crn = NAME.cast::<User>().where_key(Operator::Eq, &LOGIN).unwrap();
    let decoded = round_trip(&crn);

    assert_eq!(decoded, crn);

    for (name, login) in [("Pavel", "Pavel"), ("Pavel", "pavel")] {
        let entity = user(name, login);
        assert_eq!(
            decoded.evaluate(&entity).unwrap(),
            crn.evaluate(&entity).unwrap()
        );
    }
}

#[test]
fn key_ring_holds_both_keys() {
    let crn = NAME.cast::<User>().where_key(Operator::Eq, &LOGIN).unwrap();

    let WireCriterion::Value {
        key_value,
        ring,
        value,
        ..
    } = crn.to_wire().unwrap()
    else {
        panic!("expected a value node");
    };

    assert!(key_value);
    assert_eq!(ring.map(|ring| ring.len()), Some(2));
    assert!(value.is_none());
}

#[test]
fn binary_tree_round_trip() {
    let crn = NAME
        .where_in(["Pavel", "Lucy"])
        .or(CASH.where_lt(3.0).not())
        .and(NAME.where_(Operator::Regexp, "P.*").unwrap());
    let decoded = round_trip(&crn);

    assert_eq!(decoded, crn);
    assert_eq!(decoded.to_string(), crn.to_string());

    for entity in [person("Pavel", 1.0), person("Lucy", 5.0), person("Pete", 9.0)] {
        assert_eq!(
            decoded.evaluate(&entity).unwrap(),
            crn.evaluate(&entity).unwrap()
        );
    }
}

#[test]
fn integer_literal_round_trip() {
    let crn = ID.where_in([5, 6]).and(PRICE.where_gt(10));
    let decoded = round_trip(&crn);

    assert_eq!(decoded, crn);
    assert!(decoded.evaluate(&item(5, 1, 15.0)).unwrap());
}

#[test]
fn composite_and_descending_keys_round_trip() {
    let path = BOSS.join(&NAME).unwrap().descending();
    let crn = path.where_eq("Lucy");
    let decoded = round_trip(&crn);

    assert_eq!(decoded, crn);
    let key = decoded.as_value().and_then(|node| node.key()).unwrap();
    assert!(key.is_composite());
    assert!(!key.is_ascending());
}

#[test]
fn constants_round_trip() {
    let keyless = Criterion::<Person>::from_bool(false);
    assert_eq!(round_trip(&keyless).constant_value(), Some(false));

    let keyed = CASH.for_all();
    let decoded = round_trip(&keyed);
    assert_eq!(decoded, keyed);
    assert_eq!(decoded.constant_value(), Some(true));
}

#[test]
fn native_sql_template_round_trip() {
    let crn = Criterion::for_sql_template(&*CASH, "cash > {0}", 10).unwrap();
    let decoded = round_trip(&crn);

    assert_eq!(decoded, crn);
    assert_eq!(decoded.to_string(), "(cash > {0})");
}

// ---------------------------------------------------------------------------
// Failures
// ---------------------------------------------------------------------------

#[test]
fn lazy_values_are_not_serialized() {
    let crn = Criterion::where_lazy(&*CASH, Operator::Gt, || 1.0).unwrap();
    assert!(crn.encode().unwrap_err().is_serialization_failure());
}

#[test]
fn entity_values_are_not_serialized() {
    let crn = BOSS.where_eq(EntityRef::new(person("Pavel", 1.0)));
    assert!(crn.encode().unwrap_err().is_serialization_failure());
}

#[test]
fn non_finite_floats_are_not_serialized() {
    for value in [f64::NAN, f64::INFINITY] {
        let err = PRICE.where_gt(value).encode().unwrap_err();
        assert!(err.is_serialization_failure());
    }
}

#[test]
fn unknown_keys_fail_to_decode() {
    let bytes = NAME.where_eq("Pavel").encode().unwrap();
    let err = Criterion::<Person>::decode(&bytes, &KeyRegistry::new()).unwrap_err();

    assert!(err.is_key_not_found());
    assert_eq!(err.to_string(), "key not found: Person.name");
}

#[test]
fn malformed_input_fails_to_decode() {
    let err = Criterion::<Person>::decode(b"{\"kind\": 1}", &registry()).unwrap_err();
    assert!(err.is_serialization_failure());
}

#[test]
fn key_ring_size_must_match_the_operand() {
    let json = br#"{"kind":"value","operator":"EQ","key_value":true,"ring":{"domains":["Person"],"keys":[{"domain":0,"name":"name"}]}}"#;
    let err = Criterion::<Person>::decode(json, &registry()).unwrap_err();

    assert!(err.is_serialization_failure());
    assert_eq!(
        err.to_string(),
        "serialization failure: the key ring holds 1 keys, expected 2"
    );
}

#[test]
fn decoding_validates_leaves() {
    let json = br#"{"kind":"value","operator":"IN","ring":{"domains":["Person"],"keys":[{"domain":0,"name":"name"}]},"value":{"string":"Pavel"}}"#;
    let err = Criterion::<Person>::decode(json, &registry()).unwrap_err();

    assert!(err.is_invalid_argument());
}
