//! Rust identifiers for protobuf names, matching what `prost-build` emits,
//! so generated impls line up with the structs they extend.

use heck::{ToSnakeCase, ToUpperCamelCase};

/// Letter never used as a receiver; messages starting with it get
/// [`FALLBACK_RECEIVER`].
pub const RESERVED_RECEIVER: char = 'p';

/// Receiver used when the natural one is reserved or unusable.
pub const FALLBACK_RECEIVER: char = 'm';

/// Field or module name as `prost-build` spells it.
#[must_use]
pub fn to_snake(s: &str) -> String {
    let mut ident = s.to_snake_case();
    match ident.as_str() {
        "as" | "break" | "const" | "continue" | "else" | "enum" | "false" | "fn" | "for" | "if"
        | "impl" | "in" | "let" | "loop" | "match" | "mod" | "move" | "mut" | "pub" | "ref"
        | "return" | "static" | "struct" | "trait" | "true" | "type" | "unsafe" | "use"
        | "where" | "while" | "dyn" | "abstract" | "become" | "box" | "do" | "final" | "macro"
        | "override" | "priv" | "typeof" | "unsized" | "virtual" | "yield" | "async"
        | "await" | "try" | "gen" => ident.insert_str(0, "r#"),
        // Not allowed as raw identifiers.
        "_" | "super" | "self" | "crate" | "extern" => ident.push('_'),
        _ => {}
    }
    ident
}

/// Message type name as `prost-build` spells it.
#[must_use]
pub fn to_upper_camel(s: &str) -> String {
    let mut ident = s.to_upper_camel_case();
    if ident == "Self" {
        ident.push('_');
    }
    ident
}

/// Short receiver name for a generated method body: the first letter of the
/// type name, lowercased.
#[must_use]
pub fn receiver_name(type_name: &str) -> String {
    let receiver = match type_name.chars().next() {
        Some(first) if first.is_ascii_alphabetic() => first.to_ascii_lowercase(),
        _ => FALLBACK_RECEIVER,
    };
    if receiver == RESERVED_RECEIVER {
        FALLBACK_RECEIVER.to_string()
    } else {
        receiver.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn receiver_is_first_letter_lowercased() {
        assert_eq!(receiver_name("CreateNoteRequest"), "c");
        assert_eq!(receiver_name("User"), "u");
        assert_eq!(receiver_name("Message"), "m");
    }

    #[test]
    fn reserved_or_missing_receiver_falls_back() {
        assert_eq!(receiver_name("Product"), "m");
        assert_eq!(receiver_name(""), "m");
        assert_eq!(receiver_name("_Hidden"), "m");
    }

    #[test]
    fn field_names_follow_prost() {
        assert_eq!(to_snake("pattern_field"), "pattern_field");
        assert_eq!(to_snake("createdAt"), "created_at");
        assert_eq!(to_snake("type"), "r#type");
        assert_eq!(to_snake("self"), "self_");
    }

    #[test]
    fn type_names_follow_prost() {
        assert_eq!(to_upper_camel("TestMessage"), "TestMessage");
        assert_eq!(to_upper_camel("note_event"), "NoteEvent");
        assert_eq!(to_upper_camel("HTTPRequest"), "HttpRequest");
        assert_eq!(to_upper_camel("Self"), "Self_");
    }
}
