//! Error types for populating records from environment variables

use crate::fetch::TypeTag;
use crate::value::Value;
use crate::Populate;

/// Errors that can occur while populating a record.
///
/// The first failing field aborts the whole call. Fields handled before it
/// keep whatever was written to them.
#[derive(Debug, thiserror::Error)]
pub enum PopulateError {
    /// The field's declared type has no registered fetcher.
    ///
    /// Raised before anything is read for that field.
    #[error("Field '{field}' has type '{type_name}' which has no registered fetcher")]
    UnsupportedType {
        /// Name of the offending field
        field: &'static str,
        /// Type name the registry was asked for (with `Option` stripped)
        type_name: String,
    },

    /// The environment value (or the default) could not be converted.
    #[error("Failed to parse environment variable '{name}' as {kind}: {message}")]
    Parse {
        /// Name of the environment variable being parsed
        name: String,
        /// Conversion that was attempted
        kind: TypeTag,
        /// Raw value after default substitution
        value: String,
        /// Error message from the underlying parser
        message: String,
    },

    /// The environment variable is set but is not valid Unicode.
    #[error("Environment variable '{name}' is not valid unicode")]
    NotUnicode {
        /// Name of the environment variable
        name: String,
    },

    /// A generated setter was handed a value it cannot store.
    #[error("Field '{field}' cannot be assigned a {kind} value")]
    Assign {
        /// Name of the field being assigned
        field: &'static str,
        /// Kind of the value that was rejected
        kind: TypeTag,
    },
}

impl PopulateError {
    /// Create a parse error (used by the fetchers)
    #[doc(hidden)]
    pub fn parse_error(
        name: impl Into<String>,
        kind: TypeTag,
        value: impl Into<String>,
        message: impl std::fmt::Display,
    ) -> Self {
        Self::Parse {
            name: name.into(),
            kind,
            value: value.into(),
            message: message.to_string(),
        }
    }

    /// Create an assignment error (used by macro-generated code)
    #[doc(hidden)]
    pub fn assign_error<T: Populate>(index: usize, value: &Value) -> Self {
        Self::Assign {
            field: T::fields().get(index).map_or("<unknown>", |slot| slot.name),
            kind: value.type_tag(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_message() {
        let err = PopulateError::parse_error("PORT", TypeTag::Integer, "eighty", "invalid digit");
        assert_eq!(
            err.to_string(),
            "Failed to parse environment variable 'PORT' as integer: invalid digit"
        );
    }

    #[test]
    fn test_unsupported_type_message() {
        let err = PopulateError::UnsupportedType {
            field: "dummy",
            type_name: "Dummy".to_string(),
        };
        assert!(err.to_string().contains("'Dummy'"));
        assert!(err.to_string().contains("'dummy'"));
    }
}
