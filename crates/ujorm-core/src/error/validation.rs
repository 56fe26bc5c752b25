use super::Error;

/// Error when a value written through a key fails the key's validator.
#[derive(Debug)]
pub(super) struct ValidationError {
    key: Box<str>,
    kind: ValidationErrorKind,
}

#[derive(Debug)]
enum ValidationErrorKind {
    /// A null value was written to a required key
    Required,

    /// String length constraint violation
    Length {
        value_len: usize,
        min: Option<usize>,
        max: Option<usize>,
    },
}

impl std::error::Error for ValidationError {}

impl core::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "validation failed for `{}`: ", self.key)?;

        match self.kind {
            ValidationErrorKind::Required => f.write_str("value is required"),
            ValidationErrorKind::Length {
                value_len,
                min,
                max,
            } => {
                // If min and max are the same, show exact length requirement
                if let (Some(min), Some(max)) = (min, max) {
                    if min == max {
                        return write!(
                            f,
                            "value length {value_len} does not match required length {min}"
                        );
                    }
                }

                match (min, max) {
                    (Some(min), _) if value_len < min => {
                        write!(f, "value length {value_len} is too short (minimum: {min})")
                    }
                    (_, Some(max)) if value_len > max => {
                        write!(f, "value length {value_len} is too long (maximum: {max})")
                    }
                    _ => f.write_str("length constraint violation"),
                }
            }
        }
    }
}

impl Error {
    /// Creates a validation error for a null value written to a required key.
    pub fn validation_required(key: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::Validation(ValidationError {
            key: key.into().into(),
            kind: ValidationErrorKind::Required,
        }))
    }

    /// Creates a validation error for a string length violation.
    pub fn validation_length(
        key: impl Into<String>,
        value_len: usize,
        min: Option<usize>,
        max: Option<usize>,
    ) -> Error {
        Error::from(super::ErrorKind::Validation(ValidationError {
            key: key.into().into(),
            kind: ValidationErrorKind::Length {
                value_len,
                min,
                max,
            },
        }))
    }

    /// Returns `true` if this error is a validation error.
    pub fn is_validation(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::Validation(_))
    }
}
