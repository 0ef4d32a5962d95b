//! Runtime support for code generated by `protoc-gen-notes-validate`.
//!
//! The plugin emits one [`Validate`] impl per protobuf message. Generated
//! checks run in a fixed order and return the first failure as a
//! [`ValidationError`]:
//!
//! ```rust,ignore
//! use notes_validate::Validate;
//!
//! let request = CreateNoteRequest { title: "Ab".into(), ..Default::default() };
//! let err = request.validate().unwrap_err();
//! assert_eq!(err.message(), "field title must be at least 5 characters");
//! ```
//!
//! Request handlers usually go through a [`Validator`], constructed once at
//! start-up and passed by reference, which maps failures onto
//! [`Error::InvalidArgument`]:
//!
//! ```rust,ignore
//! let validator = notes_validate::Validator::new();
//! validator.validate(&request)?;
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod pattern;
mod validator;

/// Re-export of the `regex` crate used by generated pattern checks.
pub use regex;

pub use config::{Filter, ValidatorOption};
pub use error::{Error, ValidationError};
pub use pattern::compile_pattern;
pub use validator::Validator;

/// Implemented by generated code for every message of a schema file.
pub trait Validate {
    /// Fully-qualified protobuf name of the message (`package.Message`).
    const TYPE_NAME: &'static str;

    /// Check the message against its `validate.rules` constraints.
    ///
    /// # Errors
    ///
    /// Returns the first failing check; messages without annotated fields
    /// always return `Ok(())`.
    fn validate(&self) -> Result<(), ValidationError>;
}
