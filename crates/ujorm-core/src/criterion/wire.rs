use super::{
    BinaryCriterion, BinaryOperator, Criterion, Node, Operand, Operator, TemplateValue,
    ValueCriterion,
};
use crate::{
    meta::{KeyRef, KeyRegistry, Value},
    Error, Result,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// The serialized form of a criterion tree.
///
/// A value node stores its keys in a [`KeyRing`]. When the right-hand side is
/// another key, the ring holds both keys and no value is stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WireCriterion {
    Value {
        operator: Operator,

        #[serde(default)]
        key_value: bool,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        ring: Option<KeyRing>,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<WireValue>,
    },
    Binary {
        operator: BinaryOperator,
        left: Box<WireCriterion>,
        right: Box<WireCriterion>,
    },
}

/// Keys of one value node, referencing their domains by position so a
/// domain shared by both keys is written once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyRing {
    domains: Vec<String>,
    keys: Vec<RingKey>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct RingKey {
    domain: usize,
    name: String,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    descending: bool,
}

/// The serialized form of a right-hand value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WireValue {
    Null,
    Bool(bool),
    I32(i32),
    I64(i64),
    F64(f64),
    String(String),
    List(Vec<WireValue>),
    Template {
        template: String,
        value: Box<WireValue>,
    },
}

impl<E: ?Sized> Criterion<E> {
    /// Encodes the tree as JSON bytes.
    pub fn encode(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(&self.to_wire()?)?)
    }

    /// Decodes JSON bytes, resolving keys through `registry`. Every leaf is
    /// validated again.
    pub fn decode(bytes: &[u8], registry: &KeyRegistry) -> Result<Criterion<E>> {
        let wire: WireCriterion = serde_json::from_slice(bytes).map_err(|err| {
            Error::from(err).context(Error::serialization_failure("malformed criterion"))
        })?;
        Criterion::from_wire(&wire, registry)
    }

    pub fn to_wire(&self) -> Result<WireCriterion> {
        WireCriterion::from_node(self.node())
    }

    pub fn from_wire(wire: &WireCriterion, registry: &KeyRegistry) -> Result<Criterion<E>> {
        Ok(Criterion::from_node(wire.to_node(registry)?))
    }
}

impl WireCriterion {
    fn from_node(node: &Node) -> Result<WireCriterion> {
        match node {
            Node::Value(node) => {
                let (key_value, keys, value) = match node.operand() {
                    Operand::Key(other) => (true, vec![node.key(), Some(other)], None),
                    operand => (false, vec![node.key()], Some(WireValue::from_operand(operand)?)),
                };

                let keys: Vec<&KeyRef> = keys.into_iter().flatten().collect();
                let ring = KeyRing::new(&keys);
                let ring = (!ring.is_empty()).then_some(ring);

                Ok(WireCriterion::Value {
                    operator: node.operator(),
                    key_value,
                    ring,
                    value,
                })
            }
            Node::Binary(node) => Ok(WireCriterion::Binary {
                operator: node.operator(),
                left: Box::new(WireCriterion::from_node(node.left())?),
                right: Box::new(WireCriterion::from_node(node.right())?),
            }),
        }
    }

    fn to_node(&self, registry: &KeyRegistry) -> Result<Arc<Node>> {
        match self {
            WireCriterion::Value {
                operator,
                key_value,
                ring,
                value,
            } => {
                let expected = if *key_value { 2 } else { 1 };
                let keys = match ring {
                    Some(ring) if ring.len() == expected => ring.resolve(registry)?,
                    Some(ring) => {
                        return Err(Error::serialization_failure(format!(
                            "the key ring holds {} keys, expected {expected}",
                            ring.len()
                        )))
                    }
                    None => vec![],
                };
                let mut keys = keys.into_iter();
                let key = keys.next();

                let operand = if *key_value {
                    let other = keys.next().ok_or_else(|| {
                        Error::serialization_failure("the key ring lacks the right-hand key")
                    })?;
                    Operand::Key(other)
                } else {
                    value
                        .clone()
                        .unwrap_or(WireValue::Null)
                        .into_operand()
                };

                let node = ValueCriterion::new(key, Some(*operator), operand)?;
                Ok(Arc::new(Node::Value(node)))
            }
            WireCriterion::Binary {
                operator,
                left,
                right,
            } => Ok(Arc::new(Node::Binary(BinaryCriterion::new(
                left.to_node(registry)?,
                *operator,
                right.to_node(registry)?,
            )))),
        }
    }
}

impl KeyRing {
    pub fn new(keys: &[&KeyRef]) -> KeyRing {
        let mut domains: Vec<String> = vec![];
        let mut ring = vec![];

        for key in keys {
            let name = key.domain().name();
            let domain = match domains.iter().position(|domain| domain == name) {
                Some(position) => position,
                None => {
                    domains.push(name.to_string());
                    domains.len() - 1
                }
            };

            ring.push(RingKey {
                domain,
                name: key.name().to_string(),
                descending: !key.is_ascending(),
            });
        }

        KeyRing {
            domains,
            keys: ring,
        }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Looks up every key of the ring, in order.
    pub fn resolve(&self, registry: &KeyRegistry) -> Result<Vec<KeyRef>> {
        self.keys
            .iter()
            .map(|key| {
                let domain = self.domains.get(key.domain).ok_or_else(|| {
                    Error::serialization_failure(format!(
                        "key `{}` references missing domain #{}",
                        key.name, key.domain
                    ))
                })?;

                log::debug!("resolving key `{}` of {domain}", key.name);
                let resolved = registry.resolve(domain, &key.name)?;
                Ok(resolved.descending_if(key.descending))
            })
            .collect()
    }
}

impl WireValue {
    fn from_operand(operand: &Operand) -> Result<WireValue> {
        match operand {
            Operand::Value(value) => WireValue::from_value(value),
            Operand::Template(template) => Ok(WireValue::Template {
                template: template.template().to_string(),
                value: Box::new(WireValue::from_value(template.value())?),
            }),
            Operand::Lazy(_) => Err(Error::serialization_failure(
                "a lazy value cannot be serialized",
            )),
            Operand::Key(key) => Err(Error::serialization_failure(format!(
                "key `{key}` belongs to the key ring"
            ))),
        }
    }

    fn from_value(value: &Value) -> Result<WireValue> {
        Ok(match value {
            Value::Null => WireValue::Null,
            Value::Bool(v) => WireValue::Bool(*v),
            Value::I32(v) => WireValue::I32(*v),
            Value::I64(v) => WireValue::I64(*v),
            Value::F64(v) if v.is_finite() => WireValue::F64(*v),
            Value::F64(v) => {
                return Err(Error::serialization_failure(format!(
                    "the float {v} has no JSON form"
                )))
            }
            Value::String(v) => WireValue::String(v.clone()),
            Value::List(items) => WireValue::List(
                items
                    .iter()
                    .map(WireValue::from_value)
                    .collect::<Result<_>>()?,
            ),
            Value::Entity(entity) => {
                return Err(Error::serialization_failure(format!(
                    "an entity of {} cannot be serialized",
                    entity.domain()
                )))
            }
        })
    }

    fn into_operand(self) -> Operand {
        match self {
            WireValue::Template { template, value } => {
                Operand::Template(TemplateValue::new(template, value.into_value()))
            }
            value => Operand::Value(value.into_value()),
        }
    }

    fn into_value(self) -> Value {
        match self {
            WireValue::Null => Value::Null,
            WireValue::Bool(v) => Value::Bool(v),
            WireValue::I32(v) => Value::I32(v),
            WireValue::I64(v) => Value::I64(v),
            WireValue::F64(v) => Value::F64(v),
            WireValue::String(v) => Value::String(v),
            WireValue::List(items) => {
                Value::List(items.into_iter().map(WireValue::into_value).collect())
            }
            // A template nested in a list has no meaning; keep its value.
            WireValue::Template { value, .. } => value.into_value(),
        }
    }
}
