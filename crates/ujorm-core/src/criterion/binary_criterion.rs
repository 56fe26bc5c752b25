use super::{BinaryOperator, Node};
use crate::{
    meta::{Domain, Entity},
    Result,
};
use std::{hash, sync::Arc, sync::OnceLock};

/// Two criteria joined by a [`BinaryOperator`].
#[derive(Debug, Clone)]
pub struct BinaryCriterion {
    left: Arc<Node>,
    operator: BinaryOperator,
    right: Arc<Node>,

    /// Resolved on first use
    domain: OnceLock<Domain>,
}

impl BinaryCriterion {
    pub(crate) fn new(left: Arc<Node>, operator: BinaryOperator, right: Arc<Node>) -> Self {
        BinaryCriterion {
            left,
            operator,
            right,
            domain: OnceLock::new(),
        }
    }

    pub fn left(&self) -> &Arc<Node> {
        &self.left
    }

    pub fn right(&self) -> &Arc<Node> {
        &self.right
    }

    pub fn operator(&self) -> BinaryOperator {
        self.operator
    }

    /// The more specific domain of the two children. The right child wins
    /// unless the left child's domain is a subtype of it.
    pub fn domain(&self) -> Domain {
        self.domain
            .get_or_init(|| {
                let lhs = self.left.domain();
                let rhs = self.right.domain();

                if rhs.is_assignable_from(&lhs) {
                    lhs
                } else {
                    rhs
                }
            })
            .clone()
    }

    pub(crate) fn eval(&self, entity: &dyn Entity) -> Result<bool> {
        use BinaryOperator::*;

        Ok(match self.operator {
            And => self.left.eval(entity)? && self.right.eval(entity)?,
            Or => self.left.eval(entity)? || self.right.eval(entity)?,
            Xor => self.left.eval(entity)? != self.right.eval(entity)?,
            Nand => !(self.left.eval(entity)? && self.right.eval(entity)?),
            Nor => !(self.left.eval(entity)? || self.right.eval(entity)?),
            Eq => self.left.eval(entity)? == self.right.eval(entity)?,
            Not => !self.left.eval(entity)?,
        })
    }
}

impl PartialEq for BinaryCriterion {
    fn eq(&self, other: &Self) -> bool {
        self.operator == other.operator && self.left == other.left && self.right == other.right
    }
}

impl Eq for BinaryCriterion {}

impl hash::Hash for BinaryCriterion {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.operator.hash(state);
        self.left.hash(state);
        self.right.hash(state);
    }
}
