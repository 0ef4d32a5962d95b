/// Errors that abort code generation.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The plugin request is not a valid `CodeGeneratorRequest`.
    #[error("failed to decode CodeGeneratorRequest: {0}")]
    Decode(#[from] prost::DecodeError),

    /// The descriptor set could not be framed into files.
    #[error("malformed descriptor set: {0}")]
    MalformedDescriptorSet(String),

    /// The descriptors do not form a consistent pool.
    #[error("invalid descriptor set: {0}")]
    Descriptor(#[from] prost_reflect::DescriptorError),

    /// A descriptor uses `syntax = "editions"`, which cannot be loaded.
    #[error("{file}: editions syntax is not supported")]
    UnsupportedEditions {
        /// Schema file path.
        file: String,
    },

    /// The plugin parameter string is invalid.
    #[error("invalid plugin parameter: {0}")]
    Config(String),

    /// A file listed in `file_to_generate` is missing from the descriptors.
    #[error("file to generate not found in request: {0}")]
    MissingFile(String),

    /// Rendering failed; nothing is emitted for the file.
    #[error("{file}: {source}")]
    Render {
        /// Schema file path.
        file: String,
        /// What the renderer could not produce.
        #[source]
        source: RenderError,
    },

    /// Generated code did not parse and `strict_format` is set.
    #[error("{file}: generated code could not be formatted: {reason}")]
    Unformatted {
        /// Schema file path.
        file: String,
        /// Parser error from the formatter.
        reason: String,
    },
}

/// Reasons a template cannot be instantiated for a given model.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum RenderError {
    /// A name in the model is not a Rust identifier.
    #[error("`{ident}` is not a valid Rust identifier")]
    InvalidIdent {
        /// The offending name.
        ident: String,
    },

    /// A type or support path in the model is not a Rust path.
    #[error("`{path}` is not a valid Rust path")]
    InvalidPath {
        /// The offending path.
        path: String,
    },

    /// A `pattern` rule is not a valid regular expression; the generated
    /// check could never pass.
    #[error("field {field}: invalid pattern {pattern:?}: {source}")]
    InvalidPattern {
        /// Schema field name.
        field: String,
        /// The pattern as written in the schema.
        pattern: String,
        /// Regex compilation error.
        #[source]
        source: regex::Error,
    },
}
