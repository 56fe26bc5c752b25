mod adhoc;
mod condition_failed;
mod expression_evaluation_failed;
mod invalid_argument;
mod key_not_found;
mod serialization_failure;
mod type_conversion;
mod unsupported_operation;
mod validation;

use adhoc::AdhocError;
use condition_failed::ConditionFailedError;
use expression_evaluation_failed::ExpressionEvaluationFailed;
use invalid_argument::InvalidArgument;
use key_not_found::KeyNotFoundError;
use serialization_failure::SerializationFailure;
use std::sync::Arc;
use type_conversion::TypeConversionError;
use unsupported_operation::UnsupportedOperation;
use validation::ValidationError;

/// Returns early with an ad-hoc error built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::Error::from_args(format_args!($($arg)*)))
    };
}

/// Creates an ad-hoc error from a format string.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        $crate::Error::from_args(format_args!($($arg)*))
    };
}

/// An error raised while building, evaluating or transporting criteria.
#[derive(Clone)]
pub struct Error {
    inner: Option<Arc<ErrorInner>>,
}

#[derive(Debug)]
struct ErrorInner {
    kind: ErrorKind,
    cause: Option<Error>,
}

impl Error {
    /// Adds context to this error.
    ///
    /// Context is displayed in reverse order: the most recently added context is shown first,
    /// followed by earlier context, ending with the root cause.
    #[inline(always)]
    pub fn context(self, consequent: impl IntoError) -> Error {
        self.context_impl(consequent.into_error())
    }

    #[inline(never)]
    #[cold]
    fn context_impl(self, consequent: Error) -> Error {
        let mut err = consequent;
        if err.inner.is_none() {
            err = Error::from(ErrorKind::Unknown);
        }
        let inner = err.inner.as_mut().expect("error inner is always set here");
        assert!(
            inner.cause.is_none(),
            "consequent error must not already have a cause"
        );
        Arc::get_mut(inner)
            .expect("freshly created consequent error is not shared")
            .cause = Some(self);
        err
    }

    fn chain(&self) -> impl Iterator<Item = &Error> {
        let mut err = self;
        core::iter::once(err).chain(core::iter::from_fn(move || {
            err = err.inner.as_ref().and_then(|inner| inner.cause.as_ref())?;
            Some(err)
        }))
    }

    fn kind(&self) -> &ErrorKind {
        self.inner
            .as_ref()
            .map(|inner| &inner.kind)
            .unwrap_or(&ErrorKind::Unknown)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.kind() {
            ErrorKind::Anyhow(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let mut it = self.chain().peekable();
        while let Some(err) = it.next() {
            core::fmt::Display::fmt(err.kind(), f)?;
            if it.peek().is_some() {
                f.write_str(": ")?;
            }
        }
        Ok(())
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if !f.alternate() {
            core::fmt::Display::fmt(self, f)
        } else {
            let Some(ref inner) = self.inner else {
                return f.debug_struct("Error").field("kind", &"None").finish();
            };
            f.debug_struct("Error")
                .field("kind", &inner.kind)
                .field("cause", &inner.cause)
                .finish()
        }
    }
}

#[derive(Debug)]
enum ErrorKind {
    Anyhow(anyhow::Error),
    Adhoc(AdhocError),
    InvalidArgument(InvalidArgument),
    UnsupportedOperation(UnsupportedOperation),
    ExpressionEvaluationFailed(ExpressionEvaluationFailed),
    ConditionFailed(ConditionFailedError),
    Validation(ValidationError),
    TypeConversion(TypeConversionError),
    KeyNotFound(KeyNotFoundError),
    SerializationFailure(SerializationFailure),
    Unknown,
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ErrorKind::*;

        match self {
            Anyhow(err) => core::fmt::Display::fmt(err, f),
            Adhoc(err) => core::fmt::Display::fmt(err, f),
            InvalidArgument(err) => core::fmt::Display::fmt(err, f),
            UnsupportedOperation(err) => core::fmt::Display::fmt(err, f),
            ExpressionEvaluationFailed(err) => core::fmt::Display::fmt(err, f),
            ConditionFailed(err) => core::fmt::Display::fmt(err, f),
            Validation(err) => core::fmt::Display::fmt(err, f),
            TypeConversion(err) => core::fmt::Display::fmt(err, f),
            KeyNotFound(err) => core::fmt::Display::fmt(err, f),
            SerializationFailure(err) => core::fmt::Display::fmt(err, f),
            Unknown => f.write_str("unknown ujorm error"),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            inner: Some(Arc::new(ErrorInner { kind, cause: None })),
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Error {
        Error::from(ErrorKind::Anyhow(err))
    }
}

impl From<regex::Error> for Error {
    fn from(err: regex::Error) -> Error {
        Error::from(anyhow::Error::from(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Error {
        Error::from(anyhow::Error::from(err))
    }
}

/// Trait for types that can be converted into an Error.
pub trait IntoError {
    /// Converts this type into an Error.
    fn into_error(self) -> Error;
}

impl IntoError for Error {
    #[inline(always)]
    fn into_error(self) -> Error {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meta::Value;

    #[test]
    fn error_size() {
        // Ensure Error stays at one word (size of pointer/Arc)
        let expected_size = core::mem::size_of::<usize>();
        assert_eq!(expected_size, core::mem::size_of::<Error>());
    }

    #[test]
    fn error_from_args() {
        let err = Error::from_args(format_args!("test error: {}", 42));
        assert_eq!(err.to_string(), "test error: 42");
    }

    #[test]
    fn error_chain_display() {
        let root = Error::from_args(format_args!("root cause"));
        let mid = Error::from_args(format_args!("middle context"));
        let top = Error::from_args(format_args!("top context"));

        let chained = root.context(mid).context(top);
        assert_eq!(
            chained.to_string(),
            "top context: middle context: root cause"
        );
    }

    #[test]
    fn anyhow_bridge() {
        let anyhow_err = anyhow::anyhow!("something failed");
        let our_err: Error = anyhow_err.into();
        assert_eq!(our_err.to_string(), "something failed");
    }

    #[test]
    fn regex_bridge() {
        let regex_err = regex::Regex::new("(").unwrap_err();
        let our_err: Error = regex_err.into();
        assert!(our_err.to_string().contains("unclosed group"));
    }

    #[test]
    fn invalid_argument_error() {
        let err = Error::invalid_argument("Value must be an Array type only");
        assert!(err.is_invalid_argument());
        assert_eq!(
            err.to_string(),
            "invalid argument: Value must be an Array type only"
        );
    }

    #[test]
    fn unsupported_operation_error() {
        let err = Error::unsupported_operation("The operator XSQL can't be evaluated (a = 1)");
        assert!(err.is_unsupported_operation());
        assert!(!err.is_invalid_argument());
        assert_eq!(
            err.to_string(),
            "unsupported operation: The operator XSQL can't be evaluated (a = 1)"
        );
    }

    #[test]
    fn illegal_operator_error() {
        let err = Error::illegal_operator("USER");
        assert!(err.is_expression_evaluation_failed());
        assert_eq!(
            err.to_string(),
            "expression evaluation failed: Illegal operator: USER"
        );
    }

    #[test]
    fn condition_failed_with_context() {
        let err = Error::condition_failed("Invalid condition (name EQ \"Lucy\")")
            .context(err!("checking person"));
        assert!(err.to_string().starts_with("checking person: condition failed"));
    }

    #[test]
    fn type_conversion_error() {
        let err = Error::type_conversion(Value::I64(42), "String");
        assert!(err.is_type_conversion());
        assert_eq!(err.to_string(), "cannot convert I64 to String");
    }

    #[test]
    fn validation_length_too_short() {
        let err = Error::validation_length("name", 3, Some(5), Some(10));
        assert_eq!(
            err.to_string(),
            "validation failed for `name`: value length 3 is too short (minimum: 5)"
        );
    }

    #[test]
    fn validation_length_exact_mismatch() {
        let err = Error::validation_length("code", 3, Some(5), Some(5));
        assert_eq!(
            err.to_string(),
            "validation failed for `code`: value length 3 does not match required length 5"
        );
    }

    #[test]
    fn validation_required() {
        let err = Error::validation_required("name");
        assert!(err.is_validation());
        assert_eq!(
            err.to_string(),
            "validation failed for `name`: value is required"
        );
    }

    #[test]
    fn key_not_found_error() {
        let err = Error::key_not_found("Person", "boss.nick");
        assert!(err.is_key_not_found());
        assert_eq!(err.to_string(), "key not found: Person.boss.nick");
    }

    #[test]
    fn serialization_failure_error() {
        let err = Error::serialization_failure("lazy values cannot be serialized");
        assert!(err.is_serialization_failure());
        assert_eq!(
            err.to_string(),
            "serialization failure: lazy values cannot be serialized"
        );
    }
}
