/// Returned by a generated `validate()` method when a check fails.
///
/// Carries the message of the first failing check only; checks after it are
/// never evaluated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    /// Create an error carrying `message`.
    ///
    /// Generated code calls this with the fixed message of the failing check.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The human-readable failure message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Top-level error type returned by [`Validator`](crate::Validator).
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The message violated one of its `validate.rules` constraints.
    ///
    /// Request handlers map this onto the transport's "invalid argument"
    /// status.
    #[error("invalid argument: {source}")]
    InvalidArgument {
        /// Full protobuf name of the rejected message.
        type_name: &'static str,
        /// The failing check.
        #[source]
        source: ValidationError,
    },
}

impl Error {
    /// The underlying validation failure.
    #[must_use]
    pub fn validation_error(&self) -> &ValidationError {
        match self {
            Self::InvalidArgument { source, .. } => source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Error, ValidationError};
    use pretty_assertions::assert_eq;

    #[test]
    fn validation_error_displays_message_verbatim() {
        let err = ValidationError::new("field title must be at least 5 characters");
        assert_eq!(err.to_string(), "field title must be at least 5 characters");
        assert_eq!(err.message(), "field title must be at least 5 characters");
    }

    #[test]
    fn invalid_argument_keeps_source_and_type_name() {
        let err = Error::InvalidArgument {
            type_name: "notes.v1.CreateNoteRequest",
            source: ValidationError::new("field title must be at most 255 characters"),
        };
        assert_eq!(
            err.to_string(),
            "invalid argument: field title must be at most 255 characters"
        );
        assert_eq!(
            err.validation_error().message(),
            "field title must be at most 255 characters"
        );
        let Error::InvalidArgument { type_name, .. } = err;
        assert_eq!(type_name, "notes.v1.CreateNoteRequest");
    }
}
