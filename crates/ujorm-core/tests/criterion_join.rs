mod common;

use common::*;
use ujorm_core::{criterion::BinaryOperator, Criterion};

fn x() -> Criterion<Person> {
    init_logging();
    NAME.where_eq("Pavel")
}

fn t() -> Criterion<Person> {
    Criterion::from_bool(true)
}

fn f() -> Criterion<Person> {
    Criterion::from_bool(false)
}

// ---------------------------------------------------------------------------
// Constant on the right
// ---------------------------------------------------------------------------

#[test]
fn or_true_is_true() {
    let constant = t();
    let crn = x().or(constant.clone());
    assert!(crn.ptr_eq(&constant));
}

#[test]
fn or_false_is_left() {
    let left = x();
    let crn = left.clone().or(f());
    assert!(crn.ptr_eq(&left));
}

#[test]
fn and_true_is_left() {
    let left = x();
    let crn = left.clone().and(t());
    assert!(crn.ptr_eq(&left));
}

#[test]
fn and_false_is_false() {
    let constant = f();
    let crn = x().and(constant.clone());
    assert!(crn.ptr_eq(&constant));
    assert_eq!(crn, f());
}

// ---------------------------------------------------------------------------
// Constant on the left
// ---------------------------------------------------------------------------

#[test]
fn true_or_x_is_true() {
    let constant = t();
    assert!(constant.clone().or(x()).ptr_eq(&constant));
}

#[test]
fn false_or_x_is_x() {
    let right = x();
    assert!(f().or(right.clone()).ptr_eq(&right));
}

#[test]
fn true_and_x_is_x() {
    let right = x();
    assert!(t().and(right.clone()).ptr_eq(&right));
}

#[test]
fn false_and_x_is_false() {
    let constant = f();
    assert!(constant.clone().and(x()).ptr_eq(&constant));
}

// ---------------------------------------------------------------------------
// Keyed constants and other operators
// ---------------------------------------------------------------------------

#[test]
fn keyed_constants_fold_too() {
    let left = x();
    assert!(left.clone().and(CASH.for_all()).ptr_eq(&left));

    let none = CASH.for_none();
    assert!(left.and(none.clone()).ptr_eq(&none));
}

#[test]
fn xor_with_constant_is_not_folded() {
    let crn = x().join(BinaryOperator::Xor, t());

    assert!(crn.is_binary());
    assert!(crn.evaluate(&person("Lucy", 1.0)).unwrap());
    assert!(!crn.evaluate(&person("Pavel", 1.0)).unwrap());
}

#[test]
fn from_bool_shares_singletons() {
    assert!(t().ptr_eq(&t()));
    assert!(f().ptr_eq(&f()));
    assert_ne!(t(), f());
}

#[test]
fn constants_ignore_the_entity() {
    let p = Person::default();

    assert!(t().evaluate(&p).unwrap());
    assert!(!f().evaluate(&p).unwrap());
    assert!(CASH.for_all().evaluate(&p).unwrap());
    assert!(!CASH.for_none().evaluate(&p).unwrap());
    assert_eq!(CASH.for_all().constant_value(), Some(true));
}
