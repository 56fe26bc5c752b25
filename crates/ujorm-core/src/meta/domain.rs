use std::{fmt, hash, sync::Arc, sync::LazyLock};

static BASE: LazyLock<Domain> = LazyLock::new(|| Domain {
    inner: Arc::new(DomainInner {
        name: "Entity".into(),
        parent: None,
    }),
});

/// Identifies an entity type and its place in the type hierarchy.
///
/// Domains form a single-inheritance tree rooted at [`Domain::base`]. A
/// criterion reports the most specific domain it constrains, which is
/// resolved through [`Domain::is_assignable_from`].
#[derive(Clone)]
pub struct Domain {
    inner: Arc<DomainInner>,
}

struct DomainInner {
    name: Box<str>,
    parent: Option<Domain>,
}

impl Domain {
    /// Creates a top level domain whose parent is the base domain.
    pub fn new(name: impl Into<String>) -> Domain {
        Domain::with_parent(name, &BASE)
    }

    /// Creates a sub-domain of `parent`.
    pub fn with_parent(name: impl Into<String>, parent: &Domain) -> Domain {
        Domain {
            inner: Arc::new(DomainInner {
                name: name.into().into(),
                parent: Some(parent.clone()),
            }),
        }
    }

    /// The root of every domain hierarchy.
    pub fn base() -> Domain {
        BASE.clone()
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// The name without any module or package qualification.
    pub fn simple_name(&self) -> &str {
        let name = self.name();
        let tail = name.rsplit("::").next().unwrap_or(name);
        tail.rsplit('.').next().unwrap_or(tail)
    }

    pub fn parent(&self) -> Option<&Domain> {
        self.inner.parent.as_ref()
    }

    pub fn is_base(&self) -> bool {
        self.parent().is_none()
    }

    /// Iterates this domain followed by its ancestors up to the base.
    pub fn ancestors(&self) -> impl Iterator<Item = &Domain> {
        let mut next = Some(self);
        core::iter::from_fn(move || {
            let current = next?;
            next = current.parent();
            Some(current)
        })
    }

    /// Returns `true` if `other` is this domain or one of its descendants.
    pub fn is_assignable_from(&self, other: &Domain) -> bool {
        other.ancestors().any(|domain| domain == self)
    }
}

impl PartialEq for Domain {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner) || self.inner.name == other.inner.name
    }
}

impl Eq for Domain {}

impl hash::Hash for Domain {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.inner.name.hash(state);
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Debug for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Domain({})", self.name())
    }
}
