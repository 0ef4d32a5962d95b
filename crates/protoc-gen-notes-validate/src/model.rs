//! Rule model: the validation constraints of one schema file, as extracted
//! from its descriptors. Plain data; built once per generated file.

/// Root of the runtime crate generated code links against.
pub const DEFAULT_RUNTIME_CRATE: &str = "::notes_validate";

/// Declared kind of a protobuf field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Bytes,
    Bool,
    Integer,
    Float,
    Enum,
    Message,
}

/// The constraints of one field. Unset constraints are `None` / `false`;
/// `Some(0)` is a real constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRule {
    /// Field name as declared in the schema; used in failure messages.
    pub name: String,
    /// Rust field identifier on the prost struct (raw-escaped if needed).
    pub ident: String,
    pub kind: FieldKind,
    pub repeated: bool,
    /// The struct field is an `Option<_>`; checks run only when it is set.
    pub optional: bool,
    /// Set for members of a real `oneof`; checks run only when this member
    /// is the one set.
    pub oneof: Option<OneofMember>,

    pub min_len: Option<u64>,
    pub max_len: Option<u64>,
    pub pattern: Option<String>,
    pub email: bool,

    pub min_items: Option<u64>,
    pub max_items: Option<u64>,
}

impl FieldRule {
    /// A rule for a singular field with no constraints yet.
    pub fn new(name: impl Into<String>, ident: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            ident: ident.into(),
            kind,
            repeated: false,
            optional: false,
            oneof: None,
            min_len: None,
            max_len: None,
            pattern: None,
            email: false,
            min_items: None,
            max_items: None,
        }
    }

    /// True when no constraint is set; such rules are never retained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min_len.is_none()
            && self.max_len.is_none()
            && self.pattern.is_none()
            && !self.email
            && self.min_items.is_none()
            && self.max_items.is_none()
    }
}

/// How prost exposes a `oneof` member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OneofMember {
    /// Struct field holding the oneof, e.g. `choice`.
    pub field: String,
    /// Enum variant relative to the package module, e.g.
    /// `create_note_request::Choice::Text`.
    pub variant: String,
}

/// A schema message that gets a `Validate` impl.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageModel {
    /// Rust type name, e.g. `CreateNoteRequest`.
    pub name: String,
    /// Type path relative to the package module, e.g. `outer::Inner`.
    pub path: String,
    /// Protobuf full name, e.g. `notes.v1.CreateNoteRequest`.
    pub full_name: String,
    pub package: String,
    /// Retained rules in field declaration order.
    pub fields: Vec<FieldRule>,
    /// Name the method body binds `self` to.
    pub receiver: String,
}

/// Fully-qualified paths of the runtime items generated code calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportPaths {
    /// Root of the runtime crate; `Validate` and `ValidationError` live here.
    pub runtime: String,
    /// Builds the error returned by a failing check from its message.
    pub error_fn: String,
    /// Compiles a regular expression, returning the runtime error type.
    pub pattern_fn: String,
}

impl SupportPaths {
    /// Support paths rooted at `runtime` (e.g. `::notes_validate`).
    #[must_use]
    pub fn for_runtime(runtime: &str) -> Self {
        Self {
            runtime: runtime.to_string(),
            error_fn: format!("{runtime}::ValidationError::new"),
            pattern_fn: format!("{runtime}::compile_pattern"),
        }
    }

    #[must_use]
    pub fn validate_trait(&self) -> String {
        format!("{}::Validate", self.runtime)
    }

    #[must_use]
    pub fn error_type(&self) -> String {
        format!("{}::ValidationError", self.runtime)
    }
}

impl Default for SupportPaths {
    fn default() -> Self {
        Self::for_runtime(DEFAULT_RUNTIME_CRATE)
    }
}

/// Everything needed to generate the output for one schema file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileModel {
    pub package: String,
    /// Schema path as protoc names it, e.g. `notes/v1/notes.proto`.
    pub source_path: String,
    /// Messages in declaration order; nested messages follow their parent.
    pub messages: Vec<MessageModel>,
    /// Some field in the file carries an `email` rule.
    pub needs_email_helper: bool,
    pub support: SupportPaths,
}
