use super::{AsEntity, Entity, KeyRef};
use std::{cmp::Ordering, fmt};

/// Orders entities by a list of keys.
///
/// Keys are compared in turn until one differs. Nulls sort last regardless
/// of direction; a descending key reverses the order of non-null values.
#[derive(Debug, Clone)]
pub struct EntityComparator {
    keys: Vec<KeyRef>,
}

impl EntityComparator {
    pub fn new(keys: impl IntoIterator<Item = KeyRef>) -> EntityComparator {
        EntityComparator {
            keys: keys.into_iter().collect(),
        }
    }

    pub fn keys(&self) -> &[KeyRef] {
        &self.keys
    }

    pub fn compare(&self, lhs: &dyn Entity, rhs: &dyn Entity) -> Ordering {
        for key in &self.keys {
            let lhs = key.get_value(lhs);
            let rhs = key.get_value(rhs);

            if lhs == rhs {
                continue;
            }

            let ordering = match (lhs.is_null(), rhs.is_null()) {
                (true, _) => return Ordering::Greater,
                (_, true) => return Ordering::Less,
                _ => lhs.compare(&rhs).unwrap_or(Ordering::Equal),
            };

            let ordering = if key.is_ascending() {
                ordering
            } else {
                ordering.reverse()
            };

            if ordering != Ordering::Equal {
                return ordering;
            }
        }

        Ordering::Equal
    }

    /// Sorts entities in place; the sort is stable.
    pub fn sort<E: AsEntity>(&self, items: &mut [E]) {
        items.sort_by(|lhs, rhs| self.compare(lhs.as_entity(), rhs.as_entity()));
    }
}

impl fmt::Display for EntityComparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, key) in self.keys.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            let direction = if key.is_ascending() { "ASC" } else { "DESC" };
            write!(f, "{key}[{direction}]")?;
        }
        Ok(())
    }
}
