//! prost types for `proto/test/v1/test.proto`, together with the `Validate`
//! impls `protoc-gen-notes-validate` generated for them at build time.

#[allow(clippy::doc_markdown, clippy::derive_partial_eq_without_eq)]
pub mod test_v1 {
    include!(concat!(env!("OUT_DIR"), "/test.v1.rs"));
    include!(concat!(env!("OUT_DIR"), "/test/v1/test.validate.rs"));
}

/// Schema path of the fixture file, as protoc names it.
pub const TEST_PROTO: &str = "test/v1/test.proto";

/// Encoded `FileDescriptorSet` for the fixture file and its imports.
pub const DESCRIPTOR_SET: &[u8] =
    include_bytes!(concat!(env!("OUT_DIR"), "/test_descriptor_set.bin"));

/// The generated source included into [`test_v1`].
pub const GENERATED_SOURCE: &str =
    include_str!(concat!(env!("OUT_DIR"), "/test/v1/test.validate.rs"));
