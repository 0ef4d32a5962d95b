use proc_macro2::TokenStream;
use prost_reflect::FileDescriptor;

use crate::config::PluginOptions;
use crate::emit::{self, GeneratedFile};
use crate::error::Error;
use crate::extract;
use crate::model::FileModel;
use crate::render;
use crate::request::PluginRequest;

/// Generate output for every file the request asks for, in request order.
///
/// # Errors
///
/// Stops at the first file that is missing from the request or cannot be
/// rendered; no partial output is returned.
pub fn generate(request: &PluginRequest) -> Result<Vec<GeneratedFile>, Error> {
    let mut files = Vec::with_capacity(request.files_to_generate.len());

    for name in &request.files_to_generate {
        let file = request
            .pool
            .get_file_by_name(name)
            .ok_or_else(|| Error::MissingFile(name.clone()))?;

        if let Some(generated) = generate_file(&file, &request.options)? {
            files.push(generated);
        }
    }

    Ok(files)
}

/// Generate the output for a single schema file, or `None` when the file
/// declares no messages.
///
/// # Errors
///
/// Returns [`Error::Render`] when the templates cannot be instantiated, and
/// [`Error::Unformatted`] when the output does not parse and
/// [`PluginOptions::strict_format`] is set.
pub fn generate_file(
    file: &FileDescriptor,
    options: &PluginOptions,
) -> Result<Option<GeneratedFile>, Error> {
    let span = tracing::debug_span!("generate_file", file = file.name());
    let _enter = span.enter();

    if !extract::has_messages(file) {
        tracing::debug!("no messages; nothing to generate");
        return Ok(None);
    }

    let model = extract::file_model(file, options.support_paths());
    tracing::debug!(
        messages = model.messages.len(),
        rules = model.messages.iter().map(|m| m.fields.len()).sum::<usize>(),
        "extracted rules"
    );

    let tokens = render::file(&model).map_err(|source| Error::Render {
        file: file.name().to_string(),
        source,
    })?;
    finish(&model, &tokens, options).map(Some)
}

/// Emit `tokens`, applying the formatting policy of `options`.
fn finish(
    model: &FileModel,
    tokens: &TokenStream,
    options: &PluginOptions,
) -> Result<GeneratedFile, Error> {
    let generated = emit::emit(model, tokens);

    if let Some(reason) = &generated.format_error {
        if options.strict_format {
            return Err(Error::Unformatted {
                file: model.source_path.clone(),
                reason: reason.clone(),
            });
        }
        tracing::error!(%reason, "emitting unformatted output");
    }

    Ok(generated)
}
