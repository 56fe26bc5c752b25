use super::Error;

/// Error when a criterion or key is built from an illegal combination of
/// arguments.
///
/// This occurs when:
/// - A string operator is applied to a key that is not string-typed
/// - IN / NOT_IN receives something other than a list
/// - A native SQL condition is empty
/// - A constant criterion is given a non-boolean value
/// - A composite key chains keys whose types do not line up
///
/// These errors are raised at construction time, never during evaluation.
#[derive(Debug)]
pub(super) struct InvalidArgument {
    message: Box<str>,
}

impl std::error::Error for InvalidArgument {}

impl core::fmt::Display for InvalidArgument {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid argument: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidArgument(InvalidArgument {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid argument error.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidArgument(_))
    }
}
