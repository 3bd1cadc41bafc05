//! Translation file parser.
//!
//! A locale file is a flat JSON object. Plain keys map to template strings;
//! keys starting with [`METADATA_MARKER`] carry a metadata object for the key
//! named by the rest of the string:
//!
//! ```json
//! {
//!     "bye": "Bye {value}",
//!     "#bye": {
//!         "description": "Saying goodbye to someone",
//!         "example": "Bye World",
//!         "variables": {
//!             "value": { "type": "string", "defaultValue": "World" }
//!         }
//!     }
//! }
//! ```

use crate::error::L10nError;
use crate::l10n::model::{DefaultValue, Metadata, TranslationEntry, VarType, Variable};
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::OnceLock;
use tracing::{debug, warn};

/// Prefix marking a key as metadata for another key.
pub const METADATA_MARKER: char = '#';

static IDENTIFIER_REGEX: OnceLock<Regex> = OnceLock::new();

/// Whether `name` can be used verbatim as an accessor or parameter name.
pub fn is_identifier(name: &str) -> bool {
    let regex =
        IDENTIFIER_REGEX.get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());
    regex.is_match(name)
}

/// Parser for the contents of one locale file.
pub struct TranslationParser;

impl TranslationParser {
    /// Parse raw file contents into entries in declaration order.
    ///
    /// `locale` is only used to make diagnostics point at the right file.
    pub fn parse(locale: &str, raw: &str) -> Result<Vec<TranslationEntry>, L10nError> {
        let value: Value =
            serde_json::from_str(raw).map_err(|e| L10nError::parse(locale, e.to_string()))?;
        Self::parse_value(locale, &value)
    }

    /// Parse an already decoded JSON document.
    pub fn parse_value(locale: &str, value: &Value) -> Result<Vec<TranslationEntry>, L10nError> {
        let object = value
            .as_object()
            .ok_or_else(|| L10nError::parse(locale, "top-level value must be an object"))?;

        let mut entries = Vec::new();

        for (key, value) in object {
            if let Some(target) = key.strip_prefix(METADATA_MARKER) {
                if !object.contains_key(target) {
                    warn!(
                        "Locale '{}': metadata key '{}' has no matching translation, ignoring",
                        locale, key
                    );
                }
                continue;
            }

            if !is_identifier(key) {
                return Err(L10nError::InvalidIdentifier {
                    locale: locale.to_string(),
                    name: key.clone(),
                });
            }

            let text = value.as_str().ok_or_else(|| {
                L10nError::parse(locale, format!("value of '{}' must be a string", key))
            })?;

            let metadata = match object.get(&format!("{}{}", METADATA_MARKER, key)) {
                Some(raw_meta) => Some(parse_metadata(locale, key, raw_meta)?),
                None => None,
            };

            entries.push(TranslationEntry {
                key: key.clone(),
                text: text.to_string(),
                metadata,
            });
        }

        debug!("Locale '{}': parsed {} entries", locale, entries.len());
        Ok(entries)
    }
}

fn parse_metadata(locale: &str, key: &str, raw: &Value) -> Result<Metadata, L10nError> {
    let object = raw.as_object().ok_or_else(|| {
        L10nError::parse(locale, format!("metadata for '{}' must be an object", key))
    })?;

    let description = optional_string(locale, key, object, "description")?;
    let example = optional_string(locale, key, object, "example")?;

    let variables = match object.get("variables") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Object(declared)) => declared
            .iter()
            .map(|(name, decl)| parse_variable(locale, key, name, decl))
            .collect::<Result<Vec<_>, _>>()?,
        Some(_) => {
            return Err(L10nError::parse(
                locale,
                format!("variables of '{}' must be an object", key),
            ))
        }
    };

    Ok(Metadata {
        description,
        example,
        variables,
    })
}

fn optional_string(
    locale: &str,
    key: &str,
    object: &Map<String, Value>,
    field: &str,
) -> Result<Option<String>, L10nError> {
    match object.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => {
            let message = format!("{} of '{}' must be a string", field, key);
            Err(L10nError::parse(locale, message))
        }
    }
}

fn parse_variable(
    locale: &str,
    key: &str,
    name: &str,
    decl: &Value,
) -> Result<Variable, L10nError> {
    if !is_identifier(name) {
        return Err(L10nError::InvalidIdentifier {
            locale: locale.to_string(),
            name: name.to_string(),
        });
    }

    let decl = decl.as_object().ok_or_else(|| {
        L10nError::parse(locale, format!("variable '{}' of '{}' must be an object", name, key))
    })?;

    let type_name = match decl.get("type") {
        Some(Value::String(t)) => t.as_str(),
        Some(other) => {
            return Err(L10nError::InvalidType {
                locale: locale.to_string(),
                key: key.to_string(),
                variable: name.to_string(),
                type_name: other.to_string(),
            })
        }
        None => {
            return Err(L10nError::parse(
                locale,
                format!("variable '{}' of '{}' has no type", name, key),
            ))
        }
    };

    let var_type = VarType::from_name(type_name).ok_or_else(|| L10nError::InvalidType {
        locale: locale.to_string(),
        key: key.to_string(),
        variable: name.to_string(),
        type_name: type_name.to_string(),
    })?;

    let default = match decl.get("defaultValue") {
        None => None,
        Some(value) => Some(resolve_default(locale, key, name, var_type, value)?),
    };

    Ok(Variable {
        name: name.to_string(),
        var_type,
        default,
    })
}

fn resolve_default(
    locale: &str,
    key: &str,
    name: &str,
    var_type: VarType,
    value: &Value,
) -> Result<DefaultValue, L10nError> {
    if !var_type.accepts(value) {
        return Err(L10nError::TypeMismatch {
            locale: locale.to_string(),
            key: key.to_string(),
            variable: name.to_string(),
            expected: var_type.name().to_string(),
            found: describe_kind(value).to_string(),
        });
    }

    let resolved = match var_type {
        VarType::String => value.as_str().map(|s| DefaultValue::String(s.to_string())),
        VarType::Int => value.as_i64().map(DefaultValue::Int),
        VarType::Float => value.as_f64().map(DefaultValue::Float),
    };

    resolved.ok_or_else(|| {
        let message =
            format!("default value of '{}' in '{}' is out of range: {}", name, key, value);
        L10nError::parse(locale, message)
    })
}

fn describe_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(n) if n.is_f64() => "a float",
        Value::Number(_) => "an integer",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EN: &str = r##"{
        "helloWorld": "Hello World",
        "bye": "Bye {value}",
        "#bye": {
            "description": "Saying goodbye to someone",
            "example": "Bye World",
            "variables": {
                "value": { "defaultValue": "World", "type": "string" }
            }
        },
        "numberOfUsers": "Number of users: {number}",
        "#numberOfUsers": {
            "variables": {
                "number": { "defaultValue": 0, "type": "int" }
            }
        }
    }"##;

    // ==================== Happy Path Tests ====================

    #[test]
    fn test_parse_preserves_declaration_order() {
        let entries = TranslationParser::parse("en", EN).unwrap();
        let keys: Vec<&str> = entries.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["helloWorld", "bye", "numberOfUsers"]);
    }

    #[test]
    fn test_parse_metadata_is_attached() {
        let entries = TranslationParser::parse("en", EN).unwrap();
        let bye = &entries[1];
        let metadata = bye.metadata.as_ref().expect("bye has metadata");

        assert_eq!(bye.text, "Bye {value}");
        assert_eq!(metadata.description.as_deref(), Some("Saying goodbye to someone"));
        assert_eq!(metadata.example.as_deref(), Some("Bye World"));
        assert_eq!(
            metadata.variables,
            vec![Variable {
                name: "value".into(),
                var_type: VarType::String,
                default: Some(DefaultValue::String("World".into())),
            }]
        );
    }

    #[test]
    fn test_parse_entry_without_metadata() {
        let entries = TranslationParser::parse("en", EN).unwrap();
        assert!(entries[0].metadata.is_none());
    }

    #[test]
    fn test_parse_int_and_float_defaults() {
        let raw = r##"{
            "price": "{amount} x {count}",
            "#price": {
                "variables": {
                    "amount": { "type": "float", "defaultValue": 9.5 },
                    "count": { "type": "int", "defaultValue": 3 }
                }
            }
        }"##;
        let entries = TranslationParser::parse("en", raw).unwrap();
        let vars = entries[0].variables();
        assert_eq!(vars[0].default, Some(DefaultValue::Float(9.5)));
        assert_eq!(vars[1].default, Some(DefaultValue::Int(3)));
    }

    #[test]
    fn test_parse_variable_without_default() {
        let raw = r##"{"hi": "Hi {name}", "#hi": {"variables": {"name": {"type": "string"}}}}"##;
        let entries = TranslationParser::parse("en", raw).unwrap();
        assert!(entries[0].variables()[0].is_required());
    }

    #[test]
    fn test_orphan_metadata_key_is_ignored() {
        let raw = r##"{"hi": "Hi", "#missing": {"description": "nothing"}}"##;
        let entries = TranslationParser::parse("en", raw).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].key, "hi");
    }

    // ==================== Failure Tests ====================

    #[test]
    fn test_invalid_json_is_parse_error() {
        let err = TranslationParser::parse("en", "{not json").unwrap_err();
        assert!(matches!(err, L10nError::Parse { .. }));
    }

    #[test]
    fn test_top_level_array_is_parse_error() {
        let err = TranslationParser::parse("en", "[]").unwrap_err();
        assert!(matches!(err, L10nError::Parse { .. }));
    }

    #[test]
    fn test_non_string_translation_is_parse_error() {
        let err = TranslationParser::parse("en", r#"{"count": 5}"#).unwrap_err();
        assert!(matches!(err, L10nError::Parse { .. }));
    }

    #[test]
    fn test_unknown_type_is_invalid_type() {
        let raw = r##"{"hi": "Hi {x}", "#hi": {"variables": {"x": {"type": "bool"}}}}"##;
        let err = TranslationParser::parse("en", raw).unwrap_err();
        assert_eq!(
            err,
            L10nError::InvalidType {
                locale: "en".into(),
                key: "hi".into(),
                variable: "x".into(),
                type_name: "bool".into(),
            }
        );
    }

    #[test]
    fn test_default_type_mismatch_names_key_and_locale() {
        let raw = r##"{"hi": "Hi {x}", "#hi": {"variables": {"x": {"type": "string", "defaultValue": 1}}}}"##;
        let err = TranslationParser::parse("ru", raw).unwrap_err();
        match err {
            L10nError::TypeMismatch { locale, key, .. } => {
                assert_eq!(locale, "ru");
                assert_eq!(key, "hi");
            }
            other => panic!("expected TypeMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_integral_default_for_float_is_mismatch() {
        let raw = r##"{"hi": "{x}", "#hi": {"variables": {"x": {"type": "float", "defaultValue": 2}}}}"##;
        let err = TranslationParser::parse("en", raw).unwrap_err();
        assert!(matches!(err, L10nError::TypeMismatch { .. }));
    }

    #[test]
    fn test_missing_type_is_parse_error() {
        let raw = r##"{"hi": "{x}", "#hi": {"variables": {"x": {"defaultValue": "a"}}}}"##;
        let err = TranslationParser::parse("en", raw).unwrap_err();
        assert!(matches!(err, L10nError::Parse { .. }));
    }

    #[test]
    fn test_invalid_key_identifier() {
        let err = TranslationParser::parse("en", r#"{"hello world": "Hi"}"#).unwrap_err();
        assert!(matches!(err, L10nError::InvalidIdentifier { .. }));
    }

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("helloWorld"));
        assert!(is_identifier("_x1"));
        assert!(!is_identifier("1x"));
        assert!(!is_identifier("a-b"));
        assert!(!is_identifier(""));
    }
}
