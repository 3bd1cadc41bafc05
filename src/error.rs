//! Error taxonomy for the ingestion and synthesis pipeline.
//!
//! Every variant is a deterministic structural error: none of them are retried,
//! and any of them aborts the run before output is written.

use thiserror::Error;

/// Errors raised while parsing translation files, registering locales, or
/// synthesizing the generated artifact.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum L10nError {
    /// Input file is not valid structured data, or has the wrong shape.
    #[error("failed to parse translations for locale '{locale}': {message}")]
    Parse { locale: String, message: String },

    /// A variable declared a type outside `string`, `int`, `float`.
    #[error(
        "invalid type '{type_name}' for variable '{variable}' of key '{key}' in locale '{locale}', allowed types: string, int, float"
    )]
    InvalidType {
        locale: String,
        key: String,
        variable: String,
        type_name: String,
    },

    /// A default value does not match its declared variable type.
    #[error(
        "default value of variable '{variable}' of key '{key}' in locale '{locale}' is {found}, expected {expected}"
    )]
    TypeMismatch {
        locale: String,
        key: String,
        variable: String,
        expected: String,
        found: String,
    },

    /// A key or variable name cannot be used as an accessor or parameter name.
    #[error("'{name}' in locale '{locale}' is not a valid identifier")]
    InvalidIdentifier { locale: String, name: String },

    /// Two discovered files resolved to the same locale code.
    #[error("locale '{0}' is registered more than once")]
    DuplicateLocale(String),

    /// The configured default locale was never registered.
    #[error("default locale '{0}' was not found among the discovered translation files")]
    DefaultLocaleNotFound(String),

    /// Lookup of an unregistered locale code.
    #[error("locale '{0}' is not registered")]
    LocaleNotFound(String),
}

impl L10nError {
    pub(crate) fn parse(locale: &str, message: impl Into<String>) -> Self {
        Self::Parse {
            locale: locale.to_string(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_mismatch_names_key_and_locale() {
        let err = L10nError::TypeMismatch {
            locale: "ru".to_string(),
            key: "bye".to_string(),
            variable: "value".to_string(),
            expected: "string".to_string(),
            found: "an integer".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("'bye'"));
        assert!(message.contains("'ru'"));
        assert!(message.contains("expected string"));
    }

    #[test]
    fn test_duplicate_locale_message() {
        let err = L10nError::DuplicateLocale("en".to_string());
        assert_eq!(err.to_string(), "locale 'en' is registered more than once");
    }
}
