use super::{Criterion, Operator};
use crate::{
    meta::{Key, Value},
    Result,
};

/// Criterion shortcuts on keys, `NAME.where_eq("Pavel")`.
impl<E: ?Sized, V> Key<E, V> {
    pub fn where_eq(&self, value: impl Into<Value>) -> Criterion<E> {
        Criterion::where_eq(self, value)
    }

    pub fn where_neq(&self, value: impl Into<Value>) -> Criterion<E> {
        self.where_ordered(Operator::NotEq, value)
    }

    pub fn where_gt(&self, value: impl Into<Value>) -> Criterion<E> {
        self.where_ordered(Operator::Gt, value)
    }

    pub fn where_ge(&self, value: impl Into<Value>) -> Criterion<E> {
        self.where_ordered(Operator::Ge, value)
    }

    pub fn where_lt(&self, value: impl Into<Value>) -> Criterion<E> {
        self.where_ordered(Operator::Lt, value)
    }

    pub fn where_le(&self, value: impl Into<Value>) -> Criterion<E> {
        self.where_ordered(Operator::Le, value)
    }

    fn where_ordered(&self, operator: Operator, value: impl Into<Value>) -> Criterion<E> {
        Criterion::leaf(Some(self.raw().clone()), operator, value.into())
    }

    pub fn where_in<T>(&self, values: impl IntoIterator<Item = T>) -> Criterion<E>
    where
        Value: From<T>,
    {
        Criterion::where_in(self, values)
    }

    pub fn where_not_in<T>(&self, values: impl IntoIterator<Item = T>) -> Criterion<E>
    where
        Value: From<T>,
    {
        Criterion::where_not_in(self, values)
    }

    pub fn where_null(&self) -> Criterion<E> {
        Criterion::where_null(self)
    }

    pub fn where_not_null(&self) -> Criterion<E> {
        Criterion::where_not_null(self)
    }

    /// Not null and, for string keys, not empty.
    pub fn where_filled(&self) -> Criterion<E> {
        let ret = self.where_not_null();
        if self.ty().is_char_sequence() {
            ret.and(self.where_neq(""))
        } else {
            ret
        }
    }

    /// Null or, for string keys, empty.
    pub fn where_not_filled(&self) -> Criterion<E> {
        let ret = self.where_null();
        if self.ty().is_char_sequence() {
            ret.or(self.where_eq(""))
        } else {
            ret
        }
    }

    pub fn where_(&self, operator: Operator, value: impl Into<Value>) -> Result<Criterion<E>> {
        Criterion::where_(self, operator, value)
    }

    pub fn where_key(&self, operator: Operator, other: &Key<E, V>) -> Result<Criterion<E>> {
        Criterion::where_key(self, operator, other)
    }

    pub fn for_all(&self) -> Criterion<E> {
        Criterion::for_all(self)
    }

    pub fn for_none(&self) -> Criterion<E> {
        Criterion::for_none(self)
    }

    pub fn for_sql(&self, sql: &str) -> Result<Criterion<E>> {
        Criterion::for_sql(self, sql)
    }
}
