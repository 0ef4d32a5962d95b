//! Extractor: reads `validate.rules` annotations off a file's descriptors
//! and builds its [`FileModel`].

use notes_validate_types::{
    FieldRules, FieldRulesExt, RepeatedRules, StringRules, field_rules, string_rules,
};
use prost_reflect::{Cardinality, FieldDescriptor, FileDescriptor, Kind, MessageDescriptor};

use crate::model::{FieldKind, FieldRule, FileModel, MessageModel, OneofMember, SupportPaths};
use crate::naming::{receiver_name, to_snake, to_upper_camel};

/// Whether the file declares anything a `Validate` impl can be generated
/// for. Files without messages produce no output.
#[must_use]
pub fn has_messages(file: &FileDescriptor) -> bool {
    file.messages().any(|message| !message.is_map_entry())
}

/// Build the rule model for every message of `file`.
///
/// Top-level messages come in declaration order, each followed by its
/// nested messages (depth first). Map entry messages are skipped.
#[must_use]
pub fn file_model(file: &FileDescriptor, support: SupportPaths) -> FileModel {
    let mut messages = Vec::new();
    for message in file.messages() {
        collect(&message, "", &mut messages);
    }

    let needs_email_helper = messages
        .iter()
        .flat_map(|message| &message.fields)
        .any(|field| field.email);

    FileModel {
        package: file.package_name().to_string(),
        source_path: file.name().to_string(),
        messages,
        needs_email_helper,
        support,
    }
}

fn collect(message: &MessageDescriptor, module: &str, out: &mut Vec<MessageModel>) {
    if message.is_map_entry() {
        return;
    }

    out.push(message_model(message, module));

    let nested_module = format!("{module}{}::", to_snake(message.name()));
    for child in message.child_messages() {
        collect(&child, &nested_module, out);
    }
}

/// Model for a single message; `module` is the prost module path of its
/// parent (empty for top-level messages, otherwise ending in `::`).
#[must_use]
pub fn message_model(message: &MessageDescriptor, module: &str) -> MessageModel {
    let name = to_upper_camel(message.name());
    let fields = message
        .fields()
        .filter_map(|field| field_rule(&field))
        .collect();

    MessageModel {
        path: format!("{module}{name}"),
        receiver: receiver_name(&name),
        full_name: message.full_name().to_string(),
        package: message.parent_file().package_name().to_string(),
        fields,
        name,
    }
}

/// The retained rule for one field, or `None` when the field has no
/// applicable constraint.
#[must_use]
pub fn field_rule(field: &FieldDescriptor) -> Option<FieldRule> {
    let rules = match field.validation_rules() {
        Ok(Some(rules)) => rules,
        Ok(None) => return None,
        Err(err) => {
            tracing::warn!(
                field = field.full_name(),
                error = %err,
                "ignoring unreadable validate.rules"
            );
            return None;
        }
    };

    let mut rule = FieldRule::new(
        field.name(),
        to_snake(field.name()),
        field_kind(&field.kind()),
    );
    rule.repeated = field.is_list();
    rule.optional = is_optional(field);
    rule.oneof = oneof_member(field);
    apply(&mut rule, field, &rules);

    (!rule.is_empty()).then_some(rule)
}

fn apply(rule: &mut FieldRule, field: &FieldDescriptor, rules: &FieldRules) {
    match &rules.r#type {
        Some(field_rules::Type::String(string)) => {
            if rule.kind == FieldKind::String && !field.is_list() {
                apply_string(rule, string);
            } else {
                tracing::debug!(
                    field = field.full_name(),
                    "string rules on a field that is not a singular string; skipped"
                );
            }
        }
        Some(field_rules::Type::Repeated(repeated)) => {
            if field.is_list() {
                apply_repeated(rule, repeated);
            } else {
                tracing::debug!(
                    field = field.full_name(),
                    "repeated rules on a field that is not a list; skipped"
                );
            }
        }
        Some(
            field_rules::Type::Int32(_)
            | field_rules::Type::Int64(_)
            | field_rules::Type::Uint32(_)
            | field_rules::Type::Uint64(_),
        ) => {
            tracing::debug!(field = field.full_name(), "numeric range rules generate no checks");
        }
        Some(field_rules::Type::Bool(_)) | None => {}
    }
}

fn apply_string(rule: &mut FieldRule, rules: &StringRules) {
    rule.min_len = rules.min_len;
    rule.max_len = rules.max_len;
    rule.pattern = rules.pattern.clone().filter(|pattern| !pattern.is_empty());
    rule.email = matches!(rules.well_known, Some(string_rules::WellKnown::Email(true)));
}

fn apply_repeated(rule: &mut FieldRule, rules: &RepeatedRules) {
    rule.min_items = rules.min_items;
    rule.max_items = rules.max_items;
}

fn field_kind(kind: &Kind) -> FieldKind {
    match kind {
        Kind::String => FieldKind::String,
        Kind::Bytes => FieldKind::Bytes,
        Kind::Bool => FieldKind::Bool,
        Kind::Double | Kind::Float => FieldKind::Float,
        Kind::Int32
        | Kind::Int64
        | Kind::Uint32
        | Kind::Uint64
        | Kind::Sint32
        | Kind::Sint64
        | Kind::Fixed32
        | Kind::Fixed64
        | Kind::Sfixed32
        | Kind::Sfixed64 => FieldKind::Integer,
        Kind::Enum(_) => FieldKind::Enum,
        Kind::Message(_) => FieldKind::Message,
    }
}

fn in_real_oneof(field: &FieldDescriptor) -> bool {
    field
        .containing_oneof()
        .is_some_and(|oneof| !oneof.is_synthetic())
}

fn oneof_member(field: &FieldDescriptor) -> Option<OneofMember> {
    let oneof = field
        .containing_oneof()
        .filter(|oneof| !oneof.is_synthetic())?;
    let message = field.parent_message();

    let mut modules = vec![to_snake(message.name())];
    let mut parent = message.parent_message();
    while let Some(outer) = parent {
        modules.push(to_snake(outer.name()));
        parent = outer.parent_message();
    }
    modules.reverse();

    Some(OneofMember {
        field: to_snake(oneof.name()),
        variant: format!(
            "{}::{}::{}",
            modules.join("::"),
            to_upper_camel(oneof.name()),
            to_upper_camel(field.name())
        ),
    })
}

/// prost generates `Option<_>` for scalar fields with explicit presence
/// (`optional` in proto3, `optional` in proto2).
fn is_optional(field: &FieldDescriptor) -> bool {
    field.cardinality() == Cardinality::Optional
        && field.supports_presence()
        && !in_real_oneof(field)
        && !matches!(field.kind(), Kind::Message(_))
}

#[cfg(test)]
mod tests {
    use super::*;
    use notes_validate_types::DESCRIPTOR_POOL;
    use pretty_assertions::assert_eq;

    #[test]
    fn rule_messages_have_no_annotations() {
        let file = DESCRIPTOR_POOL
            .get_file_by_name("validate/validate.proto")
            .unwrap();
        let model = file_model(&file, SupportPaths::default());

        assert_eq!(model.package, "validate");
        assert!(model.messages.iter().all(|message| message.fields.is_empty()));
        assert!(!model.needs_email_helper);
    }

    #[test]
    fn message_paths_follow_prost_modules() {
        let message = DESCRIPTOR_POOL
            .get_message_by_name("validate.StringRules")
            .unwrap();
        let model = message_model(&message, "outer::");

        assert_eq!(model.name, "StringRules");
        assert_eq!(model.path, "outer::StringRules");
        assert_eq!(model.full_name, "validate.StringRules");
        assert_eq!(model.receiver, "s");
    }

    #[test]
    fn proto2_optional_scalars_are_optional() {
        let message = DESCRIPTOR_POOL
            .get_message_by_name("validate.StringRules")
            .unwrap();

        let min_len = message.get_field_by_name("min_len").unwrap();
        assert!(is_optional(&min_len));
        assert_eq!(field_kind(&min_len.kind()), FieldKind::Integer);

        let email = message.get_field_by_name("email").unwrap();
        assert!(in_real_oneof(&email));
        assert!(!is_optional(&email));
        assert_eq!(
            oneof_member(&email),
            Some(OneofMember {
                field: "well_known".to_string(),
                variant: "string_rules::WellKnown::Email".to_string(),
            })
        );
        assert_eq!(oneof_member(&min_len), None);

        let not_in = message.get_field_by_name("not_in").unwrap();
        assert!(!is_optional(&not_in));
    }

    #[test]
    fn every_file_of_the_rule_schema_has_messages() {
        let file = DESCRIPTOR_POOL
            .get_file_by_name("validate/validate.proto")
            .unwrap();
        assert!(has_messages(&file));
    }
}
