//! `protoc` plugin that turns `validate.rules` field annotations into
//! `notes_validate::Validate` impls for `prost`-generated messages.
//!
//! Generation runs in five steps:
//!
//! 1. [`request`] decodes the `CodeGeneratorRequest` into a descriptor pool.
//! 2. [`extract`] reads each file's annotations into a [`model::FileModel`].
//! 3. [`check`] expands every field rule into an ordered list of checks.
//! 4. [`render`] instantiates the impl, check and helper templates.
//! 5. [`emit`] formats the result and names the output file.
//!
//! The same pipeline is available to build scripts through
//! [`generate_from_descriptor_set`], which takes the descriptor set written
//! by `prost_build::Config::file_descriptor_set_path`.

pub mod check;
pub mod config;
pub mod emit;
pub mod error;
pub mod extract;
mod generator;
pub mod logging;
pub mod model;
pub mod naming;
pub mod render;
pub mod request;

pub use config::PluginOptions;
pub use emit::GeneratedFile;
pub use error::{Error, RenderError};
pub use generator::{generate, generate_file};
pub use request::PluginRequest;

use prost_types::compiler::CodeGeneratorResponse;

/// Run the plugin on an encoded `CodeGeneratorRequest`.
///
/// Never fails: errors are reported in the response's `error` field, as
/// the plugin protocol expects.
#[must_use]
pub fn generate_from_bytes(request: &[u8]) -> CodeGeneratorResponse {
    let result = request::decode_request(request).and_then(|request| generate(&request));
    if let Err(err) = &result {
        tracing::error!(error = %err, "code generation failed");
    }
    request::build_response(result)
}

/// Generate output for `files` out of an encoded `FileDescriptorSet` that
/// also contains their imports.
///
/// # Errors
///
/// See [`generate`]; also fails when the descriptor set cannot be loaded.
pub fn generate_from_descriptor_set(
    descriptor_set: &[u8],
    files: &[&str],
    options: &PluginOptions,
) -> Result<Vec<GeneratedFile>, Error> {
    let request = PluginRequest {
        files_to_generate: files.iter().map(ToString::to_string).collect(),
        options: options.clone(),
        pool: request::pool_from_descriptor_set(descriptor_set)?,
    };
    generate(&request)
}
