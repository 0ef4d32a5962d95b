use std::collections::HashSet;
use std::sync::Arc;

/// Options for configuring the `Validator` at construction time.
#[non_exhaustive]
pub enum ValidatorOption {
    /// Decide per message type whether it is validated.
    Filter(Arc<dyn Filter>),

    /// Skip validation for these fully-qualified message names
    /// (e.g. `"notes.v1.ListNotesRequest"`).
    SkipTypes(Vec<String>),
}

/// Controls which message types are validated.
pub trait Filter: Send + Sync {
    /// Returns true if messages named `type_name` should be validated.
    fn should_validate(&self, type_name: &str) -> bool;
}

/// A filter that always validates everything.
pub(crate) struct NopFilter;

impl Filter for NopFilter {
    fn should_validate(&self, _type_name: &str) -> bool {
        true
    }
}

/// Rejects the listed type names, then defers to the wrapped filter.
pub(crate) struct SkipFilter {
    skipped: HashSet<String>,
    inner: Arc<dyn Filter>,
}

impl Filter for SkipFilter {
    fn should_validate(&self, type_name: &str) -> bool {
        !self.skipped.contains(type_name) && self.inner.should_validate(type_name)
    }
}

/// Configuration held by a `Validator`.
pub(crate) struct ValidationConfig {
    pub filter: Arc<dyn Filter>,
}

impl ValidationConfig {
    pub(crate) fn from_options(options: &[ValidatorOption]) -> Self {
        let mut filter: Arc<dyn Filter> = Arc::new(NopFilter);
        let mut skipped = HashSet::new();

        for opt in options {
            match opt {
                ValidatorOption::Filter(f) => filter = Arc::clone(f),
                ValidatorOption::SkipTypes(names) => skipped.extend(names.iter().cloned()),
            }
        }

        if !skipped.is_empty() {
            filter = Arc::new(SkipFilter {
                skipped,
                inner: filter,
            });
        }

        Self { filter }
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            filter: Arc::new(NopFilter),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct DenyAll;

    impl Filter for DenyAll {
        fn should_validate(&self, _type_name: &str) -> bool {
            false
        }
    }

    #[test]
    fn default_config_validates_everything() {
        let cfg = ValidationConfig::default();
        assert!(cfg.filter.should_validate("notes.v1.CreateNoteRequest"));
    }

    #[test]
    fn skip_types_compose_with_custom_filter() {
        let cfg = ValidationConfig::from_options(&[ValidatorOption::SkipTypes(vec![
            "notes.v1.ListNotesRequest".to_string(),
        ])]);
        assert!(!cfg.filter.should_validate("notes.v1.ListNotesRequest"));
        assert!(cfg.filter.should_validate("notes.v1.CreateNoteRequest"));

        let cfg = ValidationConfig::from_options(&[
            ValidatorOption::SkipTypes(vec!["notes.v1.ListNotesRequest".to_string()]),
            ValidatorOption::Filter(Arc::new(DenyAll)),
        ]);
        assert!(!cfg.filter.should_validate("notes.v1.CreateNoteRequest"));
    }
}
