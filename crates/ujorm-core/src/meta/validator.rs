use super::{KeyRef, Value};
use crate::{Error, Result};
use std::fmt;

/// Checks values before they are written through a key.
pub trait Validator: Send + Sync + fmt::Debug {
    fn validate(&self, key: &KeyRef, value: &Value) -> Result<()>;
}

/// Rejects null.
#[derive(Debug, Clone, Copy, Default)]
pub struct Required;

impl Validator for Required {
    fn validate(&self, key: &KeyRef, value: &Value) -> Result<()> {
        if value.is_null() {
            return Err(Error::validation_required(key.name()));
        }
        Ok(())
    }
}

/// Limits the character count of string values. Null passes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Length {
    pub min: Option<usize>,
    pub max: Option<usize>,
}

impl Length {
    pub fn max(max: usize) -> Length {
        Length {
            min: None,
            max: Some(max),
        }
    }

    pub fn between(min: usize, max: usize) -> Length {
        Length {
            min: Some(min),
            max: Some(max),
        }
    }
}

impl Validator for Length {
    fn validate(&self, key: &KeyRef, value: &Value) -> Result<()> {
        let Some(text) = value.as_str() else {
            return Ok(());
        };

        let len = text.chars().count();
        let too_short = self.min.is_some_and(|min| len < min);
        let too_long = self.max.is_some_and(|max| len > max);

        if too_short || too_long {
            return Err(Error::validation_length(key.name(), len, self.min, self.max));
        }
        Ok(())
    }
}
