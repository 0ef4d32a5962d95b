use std::collections::HashMap;
use std::sync::{LazyLock, PoisonError, RwLock};

use regex::Regex;

use crate::error::ValidationError;

/// Compiled patterns keyed by source text; generated checks call
/// [`compile_pattern`] on every validation.
static PATTERNS: LazyLock<RwLock<HashMap<String, Regex>>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));

/// Compile `pattern`, reusing a previous compilation of the same text.
///
/// This is the regular-expression support function referenced by generated
/// `pattern` and `email` checks.
///
/// # Errors
///
/// Returns a [`ValidationError`] if `pattern` is not a valid regular
/// expression.
pub fn compile_pattern(pattern: &str) -> Result<Regex, ValidationError> {
    {
        let cache = PATTERNS.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(re) = cache.get(pattern) {
            return Ok(re.clone());
        }
    }

    let re = Regex::new(pattern)
        .map_err(|e| ValidationError::new(format!("invalid pattern {pattern:?}: {e}")))?;
    PATTERNS
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .insert(pattern.to_string(), re.clone());
    Ok(re)
}

#[cfg(test)]
mod tests {
    use super::compile_pattern;

    #[test]
    fn compiled_pattern_matches_like_regex() {
        let re = compile_pattern("^[A-Z][a-z]+$").expect("valid pattern");
        assert!(re.is_match("Hello"));
        assert!(!re.is_match("hello"));

        let again = compile_pattern("^[A-Z][a-z]+$").expect("cached pattern");
        assert_eq!(again.as_str(), re.as_str());
    }

    #[test]
    fn invalid_pattern_is_a_validation_error() {
        let err = compile_pattern("([a-z]").expect_err("unbalanced group");
        assert!(err.message().starts_with("invalid pattern \"([a-z]\""));
    }
}
