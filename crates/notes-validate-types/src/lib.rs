//! Generated Rust types for the `validate.rules` annotation schema
//! (protoc-gen-validate wire format), built with `prost` and `prost-reflect`.
//!
//! This crate provides:
//!
//! - The rule messages from `validate/validate.proto`
//!   (e.g. [`FieldRules`], [`StringRules`], [`RepeatedRules`]).
//! - A shared [`DESCRIPTOR_POOL`] holding the compiled schema.
//! - [`FieldRulesExt`], a typed accessor that reads the `validate.rules`
//!   extension off a [`FieldDescriptor`] from *any* descriptor pool.
//!
//! The schema is a wire-compatible subset of the upstream file: rule groups
//! and fields it does not declare are skipped while decoding.

#![warn(missing_docs)]

#[allow(
    missing_docs,
    clippy::doc_markdown,
    clippy::must_use_candidate,
    clippy::struct_excessive_bools
)]
mod proto;

use anyhow::anyhow;
use prost_reflect::{DescriptorPool, FieldDescriptor};
use std::sync::LazyLock;

pub use proto::*;

/// Full name of the field option extension carrying [`FieldRules`].
pub const RULES_EXTENSION: &str = "validate.rules";

/// Descriptor pool for `validate/validate.proto` and its imports.
pub static DESCRIPTOR_POOL: LazyLock<DescriptorPool> = LazyLock::new(|| {
    DescriptorPool::decode(
        include_bytes!(concat!(env!("OUT_DIR"), "/file_descriptor_set.bin")).as_ref(),
    )
    .unwrap_or_else(|_| DescriptorPool::new())
});

/// Extension trait for extracting `validate.rules` from a field descriptor.
pub trait FieldRulesExt {
    /// Returns the [`FieldRules`] attached to this field, if any.
    ///
    /// The extension is resolved in the field's own pool, so descriptors
    /// compiled against the upstream `validate.proto` are understood as long
    /// as that file is part of the pool.
    ///
    /// # Errors
    ///
    /// Returns an error if the extension value is not a message or cannot be
    /// transcoded to `FieldRules`.
    fn validation_rules(&self) -> anyhow::Result<Option<FieldRules>>;
}

impl FieldRulesExt for FieldDescriptor {
    fn validation_rules(&self) -> anyhow::Result<Option<FieldRules>> {
        let Some(extension) = self.parent_pool().get_extension_by_name(RULES_EXTENSION) else {
            return Ok(None);
        };
        let options = self.options();
        if !options.has_extension(&extension) {
            return Ok(None);
        }
        match options.get_extension(&extension).as_message() {
            Some(rules) => Ok(Some(rules.transcode_to::<FieldRules>()?)),
            None => Err(anyhow!(
                "`{RULES_EXTENSION}` on {} is not a message",
                self.full_name()
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use prost::Message;
    use prost_reflect::ReflectMessage;

    #[test]
    fn descriptor_pool_declares_rules_extension() {
        let extension = DESCRIPTOR_POOL
            .get_extension_by_name(RULES_EXTENSION)
            .expect("validate.rules extension exists");
        assert_eq!(extension.number(), 1071);
        assert_eq!(
            extension.containing_message().full_name(),
            "google.protobuf.FieldOptions"
        );
    }

    #[test]
    fn unannotated_fields_have_no_rules() {
        let descriptor = StringRules::default().descriptor();
        for field in descriptor.fields() {
            assert!(
                field
                    .validation_rules()
                    .expect("plain field options decode")
                    .is_none(),
                "{} should carry no rules",
                field.full_name()
            );
        }
    }

    #[test]
    fn explicit_zero_survives_wire_round_trip() {
        let rules = FieldRules {
            r#type: Some(field_rules::Type::String(StringRules {
                min_len: Some(0),
                ..Default::default()
            })),
            ..Default::default()
        };
        let decoded = FieldRules::decode(rules.encode_to_vec().as_slice()).expect("decodes");
        let Some(field_rules::Type::String(string)) = decoded.r#type else {
            panic!("expected string rules");
        };
        assert_eq!(string.min_len, Some(0));
        assert_eq!(string.max_len, None);
    }
}
