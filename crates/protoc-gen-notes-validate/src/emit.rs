//! Emitter: formats rendered tokens and names the output file.

use proc_macro2::TokenStream;

use crate::model::FileModel;

/// Suffix replacing `.proto` in output file names.
pub const OUTPUT_SUFFIX: &str = ".validate.rs";

/// Name of the plugin binary, as it appears in generated headers.
pub const GENERATOR_NAME: &str = "protoc-gen-notes-validate";

/// One output file of a generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Path relative to the output directory, e.g. `notes/v1/notes.validate.rs`.
    pub name: String,
    pub content: String,
    /// Set when the rendered code did not parse and was emitted unformatted.
    pub format_error: Option<String>,
}

/// Output path for a schema file: the same directory and stem, with
/// [`OUTPUT_SUFFIX`].
#[must_use]
pub fn output_name(source_path: &str) -> String {
    let stem = source_path.strip_suffix(".proto").unwrap_or(source_path);
    format!("{stem}{OUTPUT_SUFFIX}")
}

fn header(model: &FileModel) -> String {
    format!(
        "// @generated by {GENERATOR_NAME}. DO NOT EDIT.\n// source: {}\n// package: {}\n\n",
        model.source_path, model.package
    )
}

/// Format `tokens` as the output for `model`.
///
/// Tokens that do not parse as a Rust file are emitted as-is, with the
/// parse error recorded in [`GeneratedFile::format_error`].
#[must_use]
pub fn emit(model: &FileModel, tokens: &TokenStream) -> GeneratedFile {
    let (body, format_error) = match syn::parse2::<syn::File>(tokens.clone()) {
        Ok(file) => (prettyplease::unparse(&file), None),
        Err(err) => {
            tracing::warn!(
                file = %model.source_path,
                error = %err,
                "generated code does not parse; emitting it unformatted"
            );
            (format!("{tokens}\n"), Some(err.to_string()))
        }
    };

    GeneratedFile {
        name: output_name(&model.source_path),
        content: header(model) + &body,
        format_error,
    }
}
