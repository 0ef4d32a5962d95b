use crate::error::Error;
use crate::model::{DEFAULT_RUNTIME_CRATE, SupportPaths};

/// Options passed to the plugin through the protoc parameter string, e.g.
/// `--notes-validate_opt=runtime_crate=crate::validation,strict_format=true`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginOptions {
    /// Path of the runtime crate generated code refers to.
    pub runtime_crate: String,
    /// Fail generation instead of emitting unformatted code.
    pub strict_format: bool,
}

impl Default for PluginOptions {
    fn default() -> Self {
        Self {
            runtime_crate: DEFAULT_RUNTIME_CRATE.to_string(),
            strict_format: false,
        }
    }
}

impl PluginOptions {
    /// Parse a comma-separated `key=value` parameter string. A bare key is
    /// shorthand for `key=true`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for unknown keys or invalid values.
    pub fn from_parameter(parameter: &str) -> Result<Self, Error> {
        let mut options = Self::default();

        for entry in parameter.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (key, value) = entry
                .split_once('=')
                .map_or((entry, "true"), |(key, value)| (key.trim(), value.trim()));

            match key {
                "runtime_crate" => {
                    if syn::parse_str::<syn::Path>(value).is_err() {
                        return Err(Error::Config(format!(
                            "runtime_crate must be a Rust path, got {value:?}"
                        )));
                    }
                    options.runtime_crate = value.to_string();
                }
                "strict_format" => {
                    options.strict_format = value.parse().map_err(|_| {
                        Error::Config(format!("strict_format must be true or false, got {value:?}"))
                    })?;
                }
                // Output is always placed next to the source path.
                "paths" if value == "source_relative" => {}
                _ => return Err(Error::Config(format!("unknown option {entry:?}"))),
            }
        }

        Ok(options)
    }

    /// Support paths generated code links against.
    #[must_use]
    pub fn support_paths(&self) -> SupportPaths {
        SupportPaths::for_runtime(&self.runtime_crate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_parameter_gives_defaults() {
        assert_eq!(PluginOptions::from_parameter("").unwrap(), PluginOptions::default());
        assert_eq!(
            PluginOptions::from_parameter(" , ").unwrap(),
            PluginOptions::default()
        );
    }

    #[test]
    fn parses_known_options() {
        let options =
            PluginOptions::from_parameter("runtime_crate=crate::validation, strict_format=true")
                .unwrap();
        assert_eq!(options.runtime_crate, "crate::validation");
        assert!(options.strict_format);
        assert_eq!(
            options.support_paths().error_fn,
            "crate::validation::ValidationError::new"
        );
    }

    #[test]
    fn bare_flag_means_true() {
        assert!(PluginOptions::from_parameter("strict_format").unwrap().strict_format);
    }

    #[test]
    fn source_relative_paths_are_accepted() {
        assert_eq!(
            PluginOptions::from_parameter("paths=source_relative").unwrap(),
            PluginOptions::default()
        );
    }

    #[test]
    fn rejects_unknown_or_invalid_options() {
        for parameter in [
            "paths=import",
            "colour=blue",
            "strict_format=maybe",
            "runtime_crate=not a path",
        ] {
            let err = PluginOptions::from_parameter(parameter).unwrap_err();
            assert!(matches!(err, Error::Config(_)), "{parameter}: {err}");
        }
    }
}
