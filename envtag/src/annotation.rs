//! Parsing of `#[conf("...")]` tag strings.
//!
//! A tag looks like `"VAR_NAME[,default=<literal>][,format=<layout>]"`.
//! The engine parses it anew on every populate call.

/// Tag value that marks a field as skipped.
pub const SKIP_TAG: &str = "-";

/// Returns `true` when the tag means "leave this field alone".
pub fn is_skip(tag: &str) -> bool {
    tag.is_empty() || tag == SKIP_TAG
}

/// Parsed form of one field's tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldAnnotation {
    /// Environment variable to read, whitespace trimmed.
    pub variable_name: String,

    /// Literal substituted when the variable is unset or empty.
    pub default: Option<String>,

    /// Layout for timestamp fields; empty otherwise.
    pub format: String,

    /// Field was declared as `Option<T>`.
    pub optional: bool,

    /// Registry key for the fetcher, with `Option` stripped.
    pub type_name: &'static str,
}

impl FieldAnnotation {
    /// Parse a non-skip tag.
    ///
    /// Options are split at their first `=`, so `default=a=b` yields the
    /// default `a=b`. Unknown keys and tokens without `=` are ignored.
    pub fn parse(tag: &str, type_name: &'static str, optional: bool) -> Self {
        let mut tokens = tag.split(',');
        let variable_name = tokens.next().unwrap_or_default().trim().to_string();

        let mut default = None;
        let mut format = String::new();

        for token in tokens {
            let Some((key, value)) = token.split_once('=') else {
                continue;
            };
            match key.trim() {
                "default" => default = Some(value.to_string()),
                "format" => format = value.to_string(),
                _ => {}
            }
        }

        Self {
            variable_name,
            default,
            format,
            optional,
            type_name,
        }
    }

    /// Prepend a struct-level prefix to the variable name.
    pub fn with_prefix(mut self, prefix: &str) -> Self {
        if !prefix.is_empty() {
            self.variable_name.insert_str(0, prefix);
        }
        self
    }

    /// Whether the tag carried a `default=` option, even an empty one.
    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }
}
