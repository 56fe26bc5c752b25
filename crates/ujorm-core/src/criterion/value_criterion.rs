use super::{Operand, Operator};
use crate::{
    meta::{Domain, Entity, KeyRef, Value},
    Error, Result,
};
use regex::Regex;
use std::{cmp::Ordering, hash};

/// A leaf criterion: one key, one operator and one right-hand operand.
#[derive(Debug, Clone)]
pub struct ValueCriterion {
    /// `None` only for the constant criteria
    key: Option<KeyRef>,
    operator: Operator,
    operand: Operand,

    /// Compiled form of a literal REGEXP pattern
    pattern: Option<Regex>,
}

impl ValueCriterion {
    /// Creates a validated leaf criterion. A missing operator means EQ.
    pub fn new(
        key: Option<KeyRef>,
        operator: Option<Operator>,
        operand: impl Into<Operand>,
    ) -> Result<ValueCriterion> {
        let operator = operator.unwrap_or(Operator::Eq);
        let mut operand = operand.into();
        let mut pattern = None;

        if key.is_none() && operator != Operator::XFixed {
            return Err(Error::invalid_argument(format!(
                "the operator {operator} requires a key"
            )));
        }

        match operator {
            Operator::XFixed => {
                if !matches!(operand, Operand::Value(Value::Bool(_))) {
                    return Err(Error::invalid_argument(
                        "Value must be a boolean for the operator XFIXED",
                    ));
                }
            }
            op if op.is_char_sequence() => {
                if let Some(key) = &key {
                    check_char_sequence_key(key)?;
                }
                check_char_sequence_operand(&operand)?;
            }
            Operator::In | Operator::NotIn => {
                if !matches!(operand, Operand::Value(Value::List(_))) {
                    return Err(Error::invalid_argument("Value must be an Array type only"));
                }
            }
            Operator::XSql => {
                operand = normalize_sql(operand)?;
            }
            Operator::Regexp | Operator::NotRegexp => {
                if let Operand::Value(Value::String(source)) = &operand {
                    pattern = Some(compile(source)?);
                }
            }
            _ => {}
        }

        Ok(ValueCriterion {
            operand: coerce_operand(key.as_ref(), operator, operand),
            key,
            operator,
            pattern,
        })
    }

    /// Creates a leaf without validation, for combinations known to be valid.
    pub(crate) fn trusted(key: Option<KeyRef>, operator: Operator, operand: Operand) -> Self {
        ValueCriterion {
            operand: coerce_operand(key.as_ref(), operator, operand),
            key,
            operator,
            pattern: None,
        }
    }

    pub fn key(&self) -> Option<&KeyRef> {
        self.key.as_ref()
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn operand(&self) -> &Operand {
        &self.operand
    }

    /// The fixed result of an XFIXED criterion.
    pub fn constant_value(&self) -> Option<bool> {
        match (self.operator, &self.operand) {
            (Operator::XFixed, Operand::Value(Value::Bool(value))) => Some(*value),
            _ => None,
        }
    }

    /// Returns `true` for XFIXED and XSQL.
    pub fn is_constant(&self) -> bool {
        self.operator.is_constant()
    }

    pub fn is_case_insensitive(&self) -> bool {
        self.operator.is_case_insensitive()
    }

    /// The declared domain of the key, the base domain for keyless constants.
    pub fn domain(&self) -> Domain {
        self.key
            .as_ref()
            .map_or_else(Domain::base, |key| key.domain().clone())
    }

    pub(crate) fn eval(&self, entity: &dyn Entity) -> Result<bool> {
        use Operator::*;

        if self.operator == XSql {
            return Err(Error::unsupported_operation(format!(
                "The operator XSQL can't be evaluated ({})",
                super::print::raw_sql(&self.operand)
            )));
        }

        if self.operator == XFixed {
            return self.constant_value().ok_or_else(|| {
                Error::expression_evaluation_failed("XFIXED criterion without a boolean value")
            });
        }

        let Some(key) = &self.key else {
            return Err(Error::illegal_operator(self.operator));
        };

        let operand = key.ty().coerce(match &self.operand {
            Operand::Value(value) => value.clone(),
            Operand::Key(other) => other.get_value(entity),
            Operand::Lazy(lazy) => lazy.get(),
            Operand::Template(template) => template.value().clone(),
        });

        match self.operator {
            Eq => Ok(key.equals_value(entity, &operand)),
            NotEq => Ok(!key.equals_value(entity, &operand)),
            Regexp | NotRegexp => {
                let matched = self.matches(&key.get_value(entity), &operand)?;
                Ok(matched == (self.operator == Regexp))
            }
            op if op.is_char_sequence() => Ok(match_text(op, &key.get_value(entity), &operand)),
            In | NotIn => {
                let Value::List(items) = &operand else {
                    return Err(Error::expression_evaluation_failed(format!(
                        "the operator {} requires a list, got {}",
                        self.operator,
                        operand.kind_name()
                    )));
                };

                let found = items.iter().any(|item| key.equals_value(entity, item));
                Ok(found == (self.operator == In))
            }
            Gt | Ge | Lt | Le => {
                if operand.is_null() {
                    return Ok(false);
                }

                let value = key.get_value(entity);
                if value.is_null() {
                    return Ok(false);
                }

                let Some(ordering) = value.compare(&operand) else {
                    return Err(Error::expression_evaluation_failed(format!(
                        "values of {} and {} are not comparable",
                        value.kind_name(),
                        operand.kind_name()
                    )));
                };

                Ok(match self.operator {
                    Gt => ordering == Ordering::Greater,
                    Ge => ordering != Ordering::Less,
                    Lt => ordering == Ordering::Less,
                    _ => ordering != Ordering::Greater,
                })
            }
            op => Err(Error::illegal_operator(op)),
        }
    }

    fn matches(&self, value: &Value, operand: &Value) -> Result<bool> {
        if value.is_null() {
            return Ok(false);
        }

        let text = value.to_string();
        match &self.pattern {
            Some(pattern) => Ok(pattern.is_match(&text)),
            None => Ok(compile(&operand.to_string())?.is_match(&text)),
        }
    }
}

fn match_text(operator: Operator, value: &Value, operand: &Value) -> bool {
    use Operator::*;

    if value == operand {
        return true;
    }
    if value.is_null() || operand.is_null() {
        return false;
    }

    let (mut lhs, mut rhs) = (value.to_string(), operand.to_string());
    if operator.is_case_insensitive() {
        lhs = lhs.to_uppercase();
        rhs = rhs.to_uppercase();
    }

    match operator {
        EqualsCaseInsensitive => lhs == rhs,
        Starts | StartsCaseInsensitive => lhs.starts_with(&rhs),
        Ends | EndsCaseInsensitive => lhs.ends_with(&rhs),
        _ => lhs.contains(&rhs),
    }
}

/// Brings a literal number to the numeric kind of the key, so `5` matches
/// an `i64` key.
fn coerce_operand(key: Option<&KeyRef>, operator: Operator, operand: Operand) -> Operand {
    match (key, operand) {
        (Some(key), Operand::Value(value)) if !operator.is_constant() => {
            Operand::Value(key.ty().coerce(value))
        }
        (_, operand) => operand,
    }
}

/// Anchored so that only a full match succeeds.
fn compile(source: &str) -> Result<Regex> {
    Regex::new(&format!("^(?:{source})$")).map_err(|err| {
        Error::from(err).context(Error::invalid_argument(format!(
            "invalid regular expression `{source}`"
        )))
    })
}

fn check_char_sequence_key(key: &KeyRef) -> Result<()> {
    if key.ty().is_char_sequence() {
        Ok(())
    } else {
        Err(Error::invalid_argument(
            "Key type must be String or CharSequence",
        ))
    }
}

fn check_char_sequence_operand(operand: &Operand) -> Result<()> {
    match operand {
        Operand::Value(Value::String(_)) | Operand::Lazy(_) => Ok(()),
        Operand::Key(key) => check_char_sequence_key(key),
        _ => Err(Error::invalid_argument(
            "Key type must be String or CharSequence",
        )),
    }
}

/// Trims a native condition and rejects a blank one.
fn normalize_sql(operand: Operand) -> Result<Operand> {
    match operand {
        Operand::Value(Value::String(sql)) if !sql.trim().is_empty() => {
            Ok(Operand::Value(Value::String(sql.trim().to_string())))
        }
        Operand::Template(template) if !template.template().trim().is_empty() => {
            Ok(Operand::Template(template))
        }
        _ => Err(Error::invalid_argument("Value must not be empty")),
    }
}

impl PartialEq for ValueCriterion {
    fn eq(&self, other: &Self) -> bool {
        self.operator == other.operator && self.key == other.key && self.operand == other.operand
    }
}

impl Eq for ValueCriterion {}

impl hash::Hash for ValueCriterion {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.operator.hash(state);
        self.key.hash(state);
        self.operand.hash(state);
    }
}
