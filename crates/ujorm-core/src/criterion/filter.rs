use super::Criterion;
use crate::{meta::AsEntity, Result};

impl<E: ?Sized + AsEntity> Criterion<E> {
    /// Returns the first entity satisfying the criterion.
    pub fn find_first<'a>(&self, items: impl IntoIterator<Item = &'a E>) -> Result<Option<&'a E>>
    where
        E: 'a,
    {
        match self.constant_value() {
            Some(false) => return Ok(None),
            Some(true) => return Ok(items.into_iter().next()),
            None => {}
        }

        for item in items {
            if self.evaluate(item)? {
                return Ok(Some(item));
            }
        }
        Ok(None)
    }

    /// Returns all entities satisfying the criterion, in input order.
    pub fn find_all<'a>(&self, items: impl IntoIterator<Item = &'a E>) -> Result<Vec<&'a E>>
    where
        E: 'a,
    {
        match self.constant_value() {
            Some(false) => {
                log::trace!("constant FALSE filter skipped the input");
                return Ok(vec![]);
            }
            Some(true) => return Ok(items.into_iter().collect()),
            None => {}
        }

        let mut ret = vec![];
        for item in items {
            if self.evaluate(item)? {
                ret.push(item);
            }
        }
        Ok(ret)
    }
}

impl<E: AsEntity> Criterion<E> {
    /// Keeps the entities satisfying the criterion. Constant criteria return
    /// without evaluating any entity.
    pub fn select(&self, mut items: Vec<E>) -> Result<Vec<E>> {
        match self.constant_value() {
            Some(false) => {
                log::trace!("constant FALSE filter dropped {} entities", items.len());
                items.clear();
                return Ok(items);
            }
            Some(true) => return Ok(items),
            None => {}
        }

        let mut ret = Vec::with_capacity(items.len());
        for item in items {
            if self.evaluate(&item)? {
                ret.push(item);
            }
        }
        Ok(ret)
    }
}
