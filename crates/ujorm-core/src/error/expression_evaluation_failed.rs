use super::Error;

/// Error when criterion evaluation fails.
///
/// This occurs when:
/// - An operator reaches no evaluation branch (USER, or a future addition)
/// - Ordering operators compare values of incompatible kinds
/// - A regular expression taken from the entity does not compile
///
/// These are runtime evaluation failures, not construction errors.
#[derive(Debug)]
pub(super) struct ExpressionEvaluationFailed {
    message: Box<str>,
}

impl std::error::Error for ExpressionEvaluationFailed {}

impl core::fmt::Display for ExpressionEvaluationFailed {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "expression evaluation failed: {}", self.message)
    }
}

impl Error {
    /// Creates an expression evaluation failed error.
    pub fn expression_evaluation_failed(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::ExpressionEvaluationFailed(
            ExpressionEvaluationFailed {
                message: message.into().into(),
            },
        ))
    }

    /// Creates the error raised when an operator has no evaluation branch.
    pub fn illegal_operator(operator: impl core::fmt::Display) -> Error {
        Error::expression_evaluation_failed(format!("Illegal operator: {operator}"))
    }

    /// Returns `true` if this error is an expression evaluation failure.
    pub fn is_expression_evaluation_failed(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::ExpressionEvaluationFailed(_))
    }
}
