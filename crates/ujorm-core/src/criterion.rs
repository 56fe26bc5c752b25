//! Criterion trees: immutable predicates over entities.
//!
//! A tree is made of [`ValueCriterion`] leaves, each binding a key to an
//! operator and a right-hand [`Operand`], joined by [`BinaryCriterion`]
//! nodes. Trees are shared through [`Criterion`], a typed handle over
//! `Arc<Node>`.

mod binary_criterion;
pub use binary_criterion::BinaryCriterion;

mod filter;

mod node;
pub use node::{Node, Side};

mod op;
pub use op::{AnyOperator, Operator};

mod op_binary;
pub use op_binary::BinaryOperator;

mod operand;
pub use operand::{LazyValue, Operand, TemplateValue};

mod print;

mod provider;

mod validate;

mod value_criterion;
pub use value_criterion::ValueCriterion;

mod wire;
pub use wire::{KeyRing, WireCriterion, WireValue};

use crate::{
    meta::{AsEntity, Entity, Key, KeyRef, Value},
    Result,
};
use std::{
    fmt, hash,
    marker::PhantomData,
    ops::Deref,
    sync::{Arc, LazyLock},
};

static TRUE: LazyLock<Arc<Node>> = LazyLock::new(|| constant_node(None, true));
static FALSE: LazyLock<Arc<Node>> = LazyLock::new(|| constant_node(None, false));

fn constant_node(key: Option<KeyRef>, value: bool) -> Arc<Node> {
    Arc::new(Node::Value(ValueCriterion::trusted(
        key,
        Operator::XFixed,
        Operand::Value(Value::Bool(value)),
    )))
}

/// A predicate over entities of type `E`.
///
/// The type parameter only guides which keys may be used; it has no runtime
/// representation and [`Criterion::cast`] changes it freely. Joining returns
/// new criteria and never modifies existing ones.
pub struct Criterion<E: ?Sized = dyn Entity> {
    node: Arc<Node>,
    _p: PhantomData<fn(&E)>,
}

impl<E: ?Sized> Criterion<E> {
    pub fn from_node(node: impl Into<Arc<Node>>) -> Criterion<E> {
        Criterion {
            node: node.into(),
            _p: PhantomData,
        }
    }

    fn leaf(key: Option<KeyRef>, operator: Operator, operand: impl Into<Operand>) -> Criterion<E> {
        Criterion::from_node(Node::Value(ValueCriterion::trusted(
            key,
            operator,
            operand.into(),
        )))
    }

    /// Creates a validated value criterion, see [`ValueCriterion::new`].
    pub fn where_<V>(
        key: &Key<E, V>,
        operator: Operator,
        value: impl Into<Value>,
    ) -> Result<Criterion<E>> {
        let node = ValueCriterion::new(Some(key.raw().clone()), Some(operator), value.into())?;
        Ok(Criterion::from_node(Node::Value(node)))
    }

    /// Equality never fails validation, so no `Result` is needed.
    pub fn where_eq<V>(key: &Key<E, V>, value: impl Into<Value>) -> Criterion<E> {
        Criterion::leaf(Some(key.raw().clone()), Operator::Eq, value.into())
    }

    /// Compares two keys of the same entity.
    pub fn where_key<V>(
        key: &Key<E, V>,
        operator: Operator,
        other: &Key<E, V>,
    ) -> Result<Criterion<E>> {
        let node = ValueCriterion::new(Some(key.raw().clone()), Some(operator), other.raw())?;
        Ok(Criterion::from_node(Node::Value(node)))
    }

    /// Compares with a value supplied at evaluation time.
    pub fn where_lazy<V>(
        key: &Key<E, V>,
        operator: Operator,
        supplier: impl Fn() -> V + Send + Sync + 'static,
    ) -> Result<Criterion<E>>
    where
        Value: From<V>,
    {
        let lazy = LazyValue::new(move || Value::from(supplier()));
        let node = ValueCriterion::new(Some(key.raw().clone()), Some(operator), lazy)?;
        Ok(Criterion::from_node(Node::Value(node)))
    }

    /// Membership in `values`; an empty input yields the constant FALSE.
    pub fn where_in<V, T>(key: &Key<E, V>, values: impl IntoIterator<Item = T>) -> Criterion<E>
    where
        Value: From<T>,
    {
        Criterion::membership(key.raw(), Operator::In, values.into_iter().map(Value::from))
    }

    /// Non-membership in `values`; an empty input yields the constant TRUE.
    pub fn where_not_in<V, T>(key: &Key<E, V>, values: impl IntoIterator<Item = T>) -> Criterion<E>
    where
        Value: From<T>,
    {
        Criterion::membership(key.raw(), Operator::NotIn, values.into_iter().map(Value::from))
    }

    /// Membership in the values of `related_key` read from `related`.
    pub fn where_in_related<'a, V, R>(
        key: &Key<E, V>,
        related: impl IntoIterator<Item = &'a R>,
        related_key: &Key<R, V>,
    ) -> Criterion<E>
    where
        R: AsEntity + ?Sized + 'a,
    {
        let values = related
            .into_iter()
            .map(|entity| related_key.get_value(entity.as_entity()));
        Criterion::membership(key.raw(), Operator::In, values)
    }

    pub fn where_not_in_related<'a, V, R>(
        key: &Key<E, V>,
        related: impl IntoIterator<Item = &'a R>,
        related_key: &Key<R, V>,
    ) -> Criterion<E>
    where
        R: AsEntity + ?Sized + 'a,
    {
        let values = related
            .into_iter()
            .map(|entity| related_key.get_value(entity.as_entity()));
        Criterion::membership(key.raw(), Operator::NotIn, values)
    }

    fn membership(
        key: &KeyRef,
        operator: Operator,
        values: impl Iterator<Item = Value>,
    ) -> Criterion<E> {
        let values: Vec<Value> = values.collect();

        if values.is_empty() {
            let result = operator == Operator::NotIn;
            log::trace!("empty {operator} list for `{key}` folded to {result}");
            return Criterion::constant_raw(key, result);
        }

        Criterion::leaf(Some(key.clone()), operator, Value::List(values))
    }

    pub fn where_null<V>(key: &Key<E, V>) -> Criterion<E> {
        Criterion::leaf(Some(key.raw().clone()), Operator::Eq, Value::Null)
    }

    pub fn where_not_null<V>(key: &Key<E, V>) -> Criterion<E> {
        Criterion::leaf(Some(key.raw().clone()), Operator::NotEq, Value::Null)
    }

    /// A constant criterion. The key only gives a query layer the table to
    /// select from; evaluation ignores it.
    pub fn constant<V>(key: &Key<E, V>, value: bool) -> Criterion<E> {
        Criterion::constant_raw(key.raw(), value)
    }

    fn constant_raw(key: &KeyRef, value: bool) -> Criterion<E> {
        Criterion::from_node(constant_node(Some(key.clone()), value))
    }

    /// A criterion satisfied by every entity.
    pub fn for_all<V>(key: &Key<E, V>) -> Criterion<E> {
        Criterion::constant(key, true)
    }

    /// A criterion satisfied by no entity.
    pub fn for_none<V>(key: &Key<E, V>) -> Criterion<E> {
        Criterion::constant(key, false)
    }

    /// The shared keyless TRUE or FALSE criterion.
    pub fn from_bool(value: bool) -> Criterion<E> {
        let node = if value { &TRUE } else { &FALSE };
        Criterion::from_node(Arc::clone(node))
    }

    /// A native SQL condition. Such criteria cannot be evaluated.
    pub fn for_sql<V>(key: &Key<E, V>, sql: &str) -> Result<Criterion<E>> {
        Criterion::for_sql_unchecked(key.raw(), sql)
    }

    /// A native SQL template, `{0}` standing for `value`.
    pub fn for_sql_template<V>(
        key: &Key<E, V>,
        template: &str,
        value: impl Into<Value>,
    ) -> Result<Criterion<E>> {
        let operand = TemplateValue::new(template, value);
        let node = ValueCriterion::new(Some(key.raw().clone()), Some(Operator::XSql), operand)?;
        Ok(Criterion::from_node(Node::Value(node)))
    }

    /// A native SQL condition over a key of any domain.
    pub fn for_sql_unchecked(key: &KeyRef, sql: &str) -> Result<Criterion<E>> {
        let node = ValueCriterion::new(Some(key.clone()), Some(Operator::XSql), Value::from(sql))?;
        Ok(Criterion::from_node(Node::Value(node)))
    }

    #[deprecated(note = "use `Criterion::where_`")]
    pub fn new_instance<V>(
        key: &Key<E, V>,
        operator: Operator,
        value: impl Into<Value>,
    ) -> Result<Criterion<E>> {
        Criterion::where_(key, operator, value)
    }

    #[deprecated(note = "use `Criterion::where_key`")]
    pub fn new_instance_key<V>(
        key: &Key<E, V>,
        operator: Operator,
        other: &Key<E, V>,
    ) -> Result<Criterion<E>> {
        Criterion::where_key(key, operator, other)
    }

    /// Joins two criteria.
    ///
    /// A constant operand of AND or OR is folded away: `X OR TRUE` is the
    /// TRUE operand itself and `X AND TRUE` is `X`, in either order.
    pub fn join(self, operator: BinaryOperator, other: Criterion<E>) -> Criterion<E> {
        if matches!(operator, BinaryOperator::And | BinaryOperator::Or) {
            let keep_constant = |value: bool| value == operator.is_or();

            if let Some(value) = other.constant_value() {
                log::trace!("folded {operator} with constant {value} on the right");
                return if keep_constant(value) { other } else { self };
            }

            if let Some(value) = self.constant_value() {
                log::trace!("folded {operator} with constant {value} on the left");
                return if keep_constant(value) { self } else { other };
            }
        }

        Criterion::from_node(Node::Binary(BinaryCriterion::new(
            self.node,
            operator,
            other.node,
        )))
    }

    pub fn and(self, other: Criterion<E>) -> Criterion<E> {
        self.join(BinaryOperator::And, other)
    }

    pub fn or(self, other: Criterion<E>) -> Criterion<E> {
        self.join(BinaryOperator::Or, other)
    }

    /// Negates the criterion. Both operands of the NOT node refer to `self`.
    pub fn not(self) -> Criterion<E> {
        let other = self.clone();
        self.join(BinaryOperator::Not, other)
    }

    /// Evaluates the criterion against one entity.
    pub fn evaluate(&self, entity: &E) -> Result<bool>
    where
        E: AsEntity,
    {
        self.node.eval(entity.as_entity())
    }

    /// Changes the entity type without touching the tree.
    pub fn cast<T: ?Sized>(self) -> Criterion<T> {
        Criterion::from_node(self.node)
    }

    /// Returns `true` if both handles share the same tree.
    pub fn ptr_eq(&self, other: &Criterion<E>) -> bool {
        Arc::ptr_eq(&self.node, &other.node)
    }

    pub fn node(&self) -> &Arc<Node> {
        &self.node
    }

    pub fn into_node(self) -> Arc<Node> {
        self.node
    }

    /// Renders the criterion prefixed with its domain, `Person(name EQ "Pavel")`.
    pub fn to_string_full(&self) -> String {
        format!("{}{}", self.domain().simple_name(), self.node)
    }
}

impl<E: ?Sized> Clone for Criterion<E> {
    fn clone(&self) -> Self {
        Criterion::from_node(self.node.clone())
    }
}

impl<E: ?Sized> Deref for Criterion<E> {
    type Target = Node;

    fn deref(&self) -> &Node {
        &self.node
    }
}

impl<E: ?Sized> PartialEq for Criterion<E> {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node
    }
}

impl<E: ?Sized> Eq for Criterion<E> {}

impl<E: ?Sized> hash::Hash for Criterion<E> {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.node.hash(state);
    }
}

impl<E: ?Sized> From<Criterion<E>> for Arc<Node> {
    fn from(value: Criterion<E>) -> Self {
        value.node
    }
}

impl<E: ?Sized> fmt::Display for Criterion<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.node, f)
    }
}

impl<E: ?Sized> fmt::Debug for Criterion<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.node, f)
    }
}
