use super::Error;

/// Error when a key cannot be resolved by name, typically while decoding a
/// serialized criterion against a key registry.
#[derive(Debug)]
pub(super) struct KeyNotFoundError {
    domain: Box<str>,
    name: Box<str>,
}

impl std::error::Error for KeyNotFoundError {}

impl core::fmt::Display for KeyNotFoundError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "key not found: {}.{}", self.domain, self.name)
    }
}

impl Error {
    /// Creates a key not found error.
    pub fn key_not_found(domain: impl Into<String>, name: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::KeyNotFound(KeyNotFoundError {
            domain: domain.into().into(),
            name: name.into().into(),
        }))
    }

    /// Returns `true` if this error is a key not found error.
    pub fn is_key_not_found(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::KeyNotFound(_))
    }
}
