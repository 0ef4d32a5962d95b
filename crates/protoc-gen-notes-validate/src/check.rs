//! Check builder: turns one [`FieldRule`] into the ordered list of checks
//! the generated `validate` method runs for that field.

use std::fmt;

use proc_macro2::TokenStream;
use quote::ToTokens;

use crate::error::RenderError;
use crate::model::{FieldRule, SupportPaths};
use crate::render::{self, FieldAccess, Support};

/// One kind of generated check. Declaration order is emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CheckKind {
    MinLen,
    MaxLen,
    Pattern,
    Email,
    MinItems,
    MaxItems,
}

impl CheckKind {
    /// Every kind, in emission order.
    pub const ALL: [Self; 6] = [
        Self::MinLen,
        Self::MaxLen,
        Self::Pattern,
        Self::Email,
        Self::MinItems,
        Self::MaxItems,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MinLen => "minLen",
            Self::MaxLen => "maxLen",
            Self::Pattern => "pattern",
            Self::Email => "email",
            Self::MinItems => "minItems",
            Self::MaxItems => "maxItems",
        }
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A generated check: its kind, the failure message it returns, and the
/// rendered snippet. Immutable once built.
#[derive(Debug, Clone)]
pub struct ValidationCheck {
    kind: CheckKind,
    field: String,
    receiver: String,
    message: String,
    escaped_pattern: Option<String>,
    snippet: TokenStream,
}

impl ValidationCheck {
    #[must_use]
    pub fn kind(&self) -> CheckKind {
        self.kind
    }

    /// Schema name of the checked field.
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Name the generated method binds `self` to.
    #[must_use]
    pub fn receiver(&self) -> &str {
        &self.receiver
    }

    /// The message the check fails with.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// For pattern checks, the pattern as a Rust string literal.
    #[must_use]
    pub fn escaped_pattern(&self) -> Option<&str> {
        self.escaped_pattern.as_deref()
    }

    #[must_use]
    pub fn snippet(&self) -> &TokenStream {
        &self.snippet
    }
}

impl ToTokens for ValidationCheck {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        self.snippet.to_tokens(tokens);
    }
}

/// Failure message for a check of `kind` on field `field`.
#[must_use]
pub fn failure_message(kind: CheckKind, field: &str, bound: u64) -> String {
    match kind {
        CheckKind::MinLen => format!("field {field} must be at least {bound} characters"),
        CheckKind::MaxLen => format!("field {field} must be at most {bound} characters"),
        CheckKind::Pattern => format!("field {field} does not match required pattern"),
        CheckKind::Email => format!("field {field} must be a valid email address"),
        CheckKind::MinItems => format!("field {field} must have at least {bound} items"),
        CheckKind::MaxItems => format!("field {field} must have at most {bound} items"),
    }
}

/// Rust string literal that evaluates to exactly `pattern`.
#[must_use]
pub fn pattern_literal(pattern: &str) -> String {
    pattern_token(pattern).to_token_stream().to_string()
}

fn pattern_token(pattern: &str) -> syn::LitStr {
    syn::LitStr::new(pattern, proc_macro2::Span::call_site())
}

/// Build the checks for one field, in emission order.
///
/// # Errors
///
/// Fails when the receiver, field identifier or support paths are not valid
/// Rust, or when a `pattern` rule is not a valid regular expression.
pub fn build_checks(
    rule: &FieldRule,
    receiver: &str,
    support: &SupportPaths,
) -> Result<Vec<ValidationCheck>, RenderError> {
    let support = Support::parse(support)?;
    build_with(rule, receiver, &support)
}

pub(crate) fn build_with(
    rule: &FieldRule,
    receiver: &str,
    support: &Support,
) -> Result<Vec<ValidationCheck>, RenderError> {
    let access = FieldAccess::new(receiver, rule)?;
    let mut checks = Vec::new();

    for kind in CheckKind::ALL {
        let (message, snippet, escaped_pattern) = match kind {
            CheckKind::Pattern => {
                let Some(pattern) = &rule.pattern else { continue };
                regex::Regex::new(pattern).map_err(|source| RenderError::InvalidPattern {
                    field: rule.name.clone(),
                    pattern: pattern.clone(),
                    source,
                })?;
                let message = failure_message(kind, &rule.name, 0);
                let literal = pattern_token(pattern);
                let snippet = render::pattern_check(&access, &literal, &message, support);
                (message, snippet, Some(literal.to_token_stream().to_string()))
            }
            CheckKind::Email => {
                if !rule.email {
                    continue;
                }
                let message = failure_message(kind, &rule.name, 0);
                let snippet = render::email_check(&access, &message, support);
                (message, snippet, None)
            }
            CheckKind::MinLen | CheckKind::MaxLen | CheckKind::MinItems | CheckKind::MaxItems => {
                let Some(bound) = bound(rule, kind) else { continue };
                let message = failure_message(kind, &rule.name, bound);
                let snippet = render::bound_check(kind, &access, bound, &message, support);
                (message, snippet, None)
            }
        };

        checks.push(ValidationCheck {
            kind,
            field: rule.name.clone(),
            receiver: receiver.to_string(),
            message,
            escaped_pattern,
            snippet,
        });
    }

    Ok(checks)
}

fn bound(rule: &FieldRule, kind: CheckKind) -> Option<u64> {
    match kind {
        CheckKind::MinLen => rule.min_len,
        CheckKind::MaxLen => rule.max_len,
        CheckKind::MinItems => rule.min_items,
        CheckKind::MaxItems => rule.max_items,
        CheckKind::Pattern | CheckKind::Email => None,
    }
}
