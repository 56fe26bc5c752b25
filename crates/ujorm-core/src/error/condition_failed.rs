use super::Error;

/// Error raised by `Criterion::validate` when the entity does not satisfy
/// the criterion.
#[derive(Debug)]
pub(super) struct ConditionFailedError {
    message: Box<str>,
}

impl std::error::Error for ConditionFailedError {}

impl core::fmt::Display for ConditionFailedError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "condition failed: {}", self.message)
    }
}

impl Error {
    /// Creates a condition failed error carrying a rendered message.
    pub fn condition_failed(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::ConditionFailed(ConditionFailedError {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is a condition failed error.
    pub fn is_condition_failed(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::ConditionFailed(_))
    }
}
