use crate::Validate;
use crate::config::{ValidationConfig, ValidatorOption};
use crate::error::Error;

/// Validates messages through their generated [`Validate`] impls.
///
/// Construct one at service start and hand it by reference to whatever
/// needs it (typically a request interceptor). There is no process-wide
/// instance.
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    /// Create a new `Validator` that validates every message type.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: ValidationConfig::default(),
        }
    }

    /// Create a new `Validator` with the given options.
    #[must_use]
    pub fn with_options(options: &[ValidatorOption]) -> Self {
        Self {
            config: ValidationConfig::from_options(options),
        }
    }

    /// Validate a message against its `validate.rules` constraints.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] carrying the first failing check.
    pub fn validate<M: Validate>(&self, msg: &M) -> Result<(), Error> {
        if !self.config.filter.should_validate(M::TYPE_NAME) {
            tracing::trace!(type_name = M::TYPE_NAME, "validation skipped by filter");
            return Ok(());
        }

        msg.validate().map_err(|source| {
            tracing::debug!(type_name = M::TYPE_NAME, error = %source, "message rejected");
            Error::InvalidArgument {
                type_name: M::TYPE_NAME,
                source,
            }
        })
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}
