//! Templates for the generated source: one per check kind, one for the
//! `Validate` impl of a message, one for the email helper and one for the
//! file as a whole.
//!
//! Templates are `quote!` expansions over parsed identifiers and paths, so a
//! model that does not name valid Rust fails here instead of producing a
//! file that does not compile.

use proc_macro2::{Literal, TokenStream};
use quote::quote;

use crate::check::{self, CheckKind};
use crate::error::RenderError;
use crate::model::{FieldRule, FileModel, MessageModel, SupportPaths};

/// Pattern every `email` check matches against.
pub const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$";

/// Support paths parsed into tokens.
pub(crate) struct Support {
    validate_trait: syn::Path,
    error_type: syn::Path,
    error_fn: syn::Path,
    pattern_fn: syn::Path,
}

impl Support {
    pub(crate) fn parse(paths: &SupportPaths) -> Result<Self, RenderError> {
        Ok(Self {
            validate_trait: parse_path(&paths.validate_trait())?,
            error_type: parse_path(&paths.error_type())?,
            error_fn: parse_path(&paths.error_fn)?,
            pattern_fn: parse_path(&paths.pattern_fn)?,
        })
    }
}

/// How a check reaches the value it tests.
pub(crate) struct FieldAccess {
    receiver: syn::Ident,
    field: syn::Ident,
    presence: Presence,
}

enum Presence {
    Always,
    Optional,
    /// Member of a real `oneof`, matched through its enum variant.
    Oneof(syn::Path),
}

impl FieldAccess {
    pub(crate) fn new(receiver: &str, rule: &FieldRule) -> Result<Self, RenderError> {
        let (field, presence) = match &rule.oneof {
            Some(member) => (
                parse_ident(&member.field)?,
                Presence::Oneof(parse_path(&member.variant)?),
            ),
            None if rule.optional => (parse_ident(&rule.ident)?, Presence::Optional),
            None => (parse_ident(&rule.ident)?, Presence::Always),
        };

        Ok(Self {
            receiver: parse_ident(receiver)?,
            field,
            presence,
        })
    }

    fn subject(&self) -> TokenStream {
        match self.presence {
            Presence::Always => {
                let Self {
                    receiver, field, ..
                } = self;
                quote!(#receiver.#field)
            }
            Presence::Optional | Presence::Oneof(_) => quote!(value),
        }
    }

    /// Wrap `body` so it runs only when the field holds a value.
    fn guard(&self, body: TokenStream) -> TokenStream {
        let Self {
            receiver, field, ..
        } = self;
        match &self.presence {
            Presence::Always => body,
            Presence::Optional => quote! {
                if let ::core::option::Option::Some(value) = &#receiver.#field {
                    #body
                }
            },
            Presence::Oneof(variant) => quote! {
                if let ::core::option::Option::Some(#variant(value)) = &#receiver.#field {
                    #body
                }
            },
        }
    }
}

fn fail_if(condition: &TokenStream, message: &str, support: &Support) -> TokenStream {
    let error_fn = &support.error_fn;
    quote! {
        if #condition {
            return ::core::result::Result::Err(#error_fn(#message));
        }
    }
}

/// `minLen`, `maxLen`, `minItems` and `maxItems` checks.
pub(crate) fn bound_check(
    kind: CheckKind,
    access: &FieldAccess,
    bound: u64,
    message: &str,
    support: &Support,
) -> TokenStream {
    let subject = access.subject();
    let bound = Literal::u64_suffixed(bound);
    let condition = match kind {
        CheckKind::MinLen => quote!((#subject.chars().count() as u64) < #bound),
        CheckKind::MaxLen => quote!((#subject.chars().count() as u64) > #bound),
        CheckKind::MinItems => quote!((#subject.len() as u64) < #bound),
        CheckKind::MaxItems => quote!((#subject.len() as u64) > #bound),
        CheckKind::Pattern | CheckKind::Email => unreachable!("{kind} has no bound"),
    };
    access.guard(fail_if(&condition, message, support))
}

pub(crate) fn pattern_check(
    access: &FieldAccess,
    pattern: &syn::LitStr,
    message: &str,
    support: &Support,
) -> TokenStream {
    let subject = access.subject();
    let pattern_fn = &support.pattern_fn;
    let condition = quote!(!#pattern_fn(#pattern)?.is_match(#subject.as_str()));
    access.guard(fail_if(&condition, message, support))
}

pub(crate) fn email_check(access: &FieldAccess, message: &str, support: &Support) -> TokenStream {
    let subject = access.subject();
    let condition = quote!(!is_valid_email(#subject.as_str())?);
    access.guard(fail_if(&condition, message, support))
}

/// The `Validate` impl for one message.
///
/// # Errors
///
/// See [`check::build_checks`]; also fails when the message path is not a
/// valid Rust path.
pub fn validate_impl(
    message: &MessageModel,
    support: &SupportPaths,
) -> Result<TokenStream, RenderError> {
    message_impl(message, &Support::parse(support)?)
}

fn message_impl(message: &MessageModel, support: &Support) -> Result<TokenStream, RenderError> {
    let path = parse_path(&message.path)?;
    let full_name = &message.full_name;

    let mut checks = Vec::new();
    for field in &message.fields {
        checks.extend(check::build_with(field, &message.receiver, support)?);
    }

    let binding = if checks.is_empty() {
        TokenStream::new()
    } else {
        let receiver = parse_ident(&message.receiver)?;
        quote!(let #receiver = self;)
    };

    let Support {
        validate_trait,
        error_type,
        ..
    } = support;
    Ok(quote! {
        impl #validate_trait for #path {
            const TYPE_NAME: &'static str = #full_name;

            fn validate(&self) -> ::core::result::Result<(), #error_type> {
                #binding
                #(#checks)*
                ::core::result::Result::Ok(())
            }
        }
    })
}

/// The per-file email helper called by `email` checks.
///
/// # Errors
///
/// Fails when the support paths are not valid Rust paths.
pub fn email_helper(support: &SupportPaths) -> Result<TokenStream, RenderError> {
    Ok(helper(&Support::parse(support)?))
}

fn helper(support: &Support) -> TokenStream {
    let Support {
        error_type,
        pattern_fn,
        ..
    } = support;
    quote! {
        fn is_valid_email(value: &str) -> ::core::result::Result<bool, #error_type> {
            ::core::result::Result::Ok(#pattern_fn(#EMAIL_PATTERN)?.is_match(value))
        }
    }
}

/// The whole generated file, minus its header comment.
///
/// Items sit in an anonymous `const` block so several generated files can
/// be included into one module without their helpers colliding.
///
/// # Errors
///
/// Fails on the first message that cannot be rendered.
pub fn file(model: &FileModel) -> Result<TokenStream, RenderError> {
    let support = Support::parse(&model.support)?;

    let impls = model
        .messages
        .iter()
        .map(|message| message_impl(message, &support))
        .collect::<Result<Vec<_>, _>>()?;
    let helper = model.needs_email_helper.then(|| helper(&support));

    Ok(quote! {
        #[allow(unused_comparisons, clippy::absurd_extreme_comparisons)]
        const _: () = {
            #(#impls)*
            #helper
        };
    })
}

fn parse_ident(ident: &str) -> Result<syn::Ident, RenderError> {
    syn::parse_str(ident).map_err(|_| RenderError::InvalidIdent {
        ident: ident.to_string(),
    })
}

fn parse_path(path: &str) -> Result<syn::Path, RenderError> {
    syn::parse_str(path).map_err(|_| RenderError::InvalidPath {
        path: path.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FieldKind;
    use pretty_assertions::assert_eq;

    fn squash(s: &str) -> String {
        s.chars().filter(|c| !c.is_whitespace()).collect()
    }

    fn message(name: &str, fields: Vec<FieldRule>) -> MessageModel {
        MessageModel {
            name: name.to_string(),
            path: name.to_string(),
            full_name: format!("notes.v1.{name}"),
            package: "notes.v1".to_string(),
            fields,
            receiver: crate::naming::receiver_name(name),
        }
    }

    fn file_model(messages: Vec<MessageModel>, needs_email_helper: bool) -> FileModel {
        FileModel {
            package: "notes.v1".to_string(),
            source_path: "notes/v1/notes.proto".to_string(),
            messages,
            needs_email_helper,
            support: SupportPaths::default(),
        }
    }

    #[test]
    fn message_without_checks_only_returns_ok() {
        let tokens = validate_impl(&message("Empty", vec![]), &SupportPaths::default()).unwrap();
        assert_eq!(
            squash(&tokens.to_string()),
            squash(
                "impl ::notes_validate::Validate for Empty {
                    const TYPE_NAME: &'static str = \"notes.v1.Empty\";
                    fn validate(&self) -> ::core::result::Result<(), ::notes_validate::ValidationError> {
                        ::core::result::Result::Ok(())
                    }
                }"
            )
        );
    }

    #[test]
    fn receiver_is_bound_once_when_checks_exist() {
        let mut title = FieldRule::new("title", "title", FieldKind::String);
        title.min_len = Some(5);
        title.max_len = Some(100);

        let tokens = validate_impl(
            &message("CreateNoteRequest", vec![title]),
            &SupportPaths::default(),
        )
        .unwrap();
        let text = squash(&tokens.to_string());
        assert_eq!(text.matches("letc=self;").count(), 1, "{text}");
        assert!(text.contains("(c.title.chars().count()asu64)<5u64"), "{text}");
        assert!(text.ends_with("::core::result::Result::Ok(())}}"), "{text}");
    }

    #[test]
    fn nested_message_path_is_used_for_impl() {
        let mut model = message("Entry", vec![]);
        model.path = "labels::Entry".to_string();

        let tokens = validate_impl(&model, &SupportPaths::default()).unwrap();
        assert!(
            squash(&tokens.to_string()).starts_with("impl::notes_validate::Validateforlabels::Entry{")
        );
    }

    #[test]
    fn email_helper_is_emitted_once_per_file() {
        let mut email = FieldRule::new("email", "email", FieldKind::String);
        email.email = true;
        let model = file_model(
            vec![
                message("User", vec![email.clone()]),
                message("Account", vec![email]),
            ],
            true,
        );

        let text = file(&model).unwrap().to_string();
        assert_eq!(text.matches("fn is_valid_email").count(), 1);
        assert_eq!(squash(&text).matches("!is_valid_email(u.email.as_str())?").count(), 1);
        assert_eq!(squash(&text).matches("!is_valid_email(a.email.as_str())?").count(), 1);
    }

    #[test]
    fn email_helper_omitted_without_email_rules() {
        let model = file_model(vec![message("Empty", vec![])], false);
        let text = file(&model).unwrap().to_string();
        assert!(!text.contains("is_valid_email"));
    }

    #[test]
    fn email_helper_uses_fixed_pattern() {
        let text = squash(&email_helper(&SupportPaths::default()).unwrap().to_string());
        let expected = squash(&format!(
            "::notes_validate::compile_pattern({})?.is_match(value)",
            check::pattern_literal(EMAIL_PATTERN)
        ));
        assert!(text.contains(&expected), "{text}");
    }

    #[test]
    fn invalid_runtime_path_is_a_render_error() {
        let err = email_helper(&SupportPaths::for_runtime("not a path")).unwrap_err();
        assert!(matches!(err, RenderError::InvalidPath { .. }));
    }

    #[test]
    fn invalid_message_path_is_a_render_error() {
        let mut model = message("Broken", vec![]);
        model.path = "1Broken".to_string();

        let err = validate_impl(&model, &SupportPaths::default()).unwrap_err();
        assert!(matches!(err, RenderError::InvalidPath { .. }));
    }
}
