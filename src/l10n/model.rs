//! Data model for parsed translation files.

use serde_json::Value;
use std::fmt;

/// The closed set of variable kinds a translation placeholder may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VarType {
    String,
    Int,
    Float,
}

impl VarType {
    /// Resolve a declared type name (`"string"`, `"int"`, `"float"`).
    pub fn from_name(name: &str) -> Option<VarType> {
        match name {
            "string" => Some(VarType::String),
            "int" => Some(VarType::Int),
            "float" => Some(VarType::Float),
            _ => None,
        }
    }

    /// The name used in translation files.
    pub fn name(&self) -> &'static str {
        match self {
            VarType::String => "string",
            VarType::Int => "int",
            VarType::Float => "float",
        }
    }

    /// Whether a decoded JSON value is an instance of this kind.
    ///
    /// Matching is strict: an integral literal is not a float, a fractional
    /// literal is not an int, and booleans are never numbers.
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (VarType::String, Value::String(_)) => true,
            (VarType::Int, Value::Number(n)) => n.is_i64() || n.is_u64(),
            (VarType::Float, Value::Number(n)) => n.is_f64(),
            _ => false,
        }
    }
}

impl fmt::Display for VarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A typed default value for a variable.
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    String(String),
    Int(i64),
    Float(f64),
}

impl fmt::Display for DefaultValue {
    /// Source-like rendering used in doc listings. Floats always keep a
    /// fractional part so `2.0` does not read as an int.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultValue::String(s) => f.write_str(s),
            DefaultValue::Int(i) => write!(f, "{}", i),
            DefaultValue::Float(v) => f.write_str(&float_literal(*v)),
        }
    }
}

/// Shortest round-trip rendering of a float that still reads as a float.
pub fn float_literal(value: f64) -> String {
    let rendered = format!("{}", value);
    if rendered.contains(['.', 'e', 'E']) || !value.is_finite() {
        rendered
    } else {
        format!("{}.0", rendered)
    }
}

/// A variable declared in a translation's metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub name: String,
    pub var_type: VarType,
    pub default: Option<DefaultValue>,
}

impl Variable {
    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }
}

/// Optional documentation and typing attached to an entry via a metadata key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata {
    pub description: Option<String>,
    pub example: Option<String>,
    /// Variables in source declaration order.
    pub variables: Vec<Variable>,
}

impl Metadata {
    /// Variables in parameter order: required ones first, then defaulted ones,
    /// each group keeping its declaration order.
    pub fn parameter_order(&self) -> Vec<&Variable> {
        let (required, defaulted): (Vec<&Variable>, Vec<&Variable>) =
            self.variables.iter().partition(|v| v.is_required());
        required.into_iter().chain(defaulted).collect()
    }
}

/// A single key and its template text within one locale.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationEntry {
    pub key: String,
    pub text: String,
    pub metadata: Option<Metadata>,
}

impl TranslationEntry {
    /// Declared variables in source order (empty when there is no metadata).
    pub fn variables(&self) -> &[Variable] {
        self.metadata
            .as_ref()
            .map(|m| m.variables.as_slice())
            .unwrap_or(&[])
    }

    pub fn has_variables(&self) -> bool {
        !self.variables().is_empty()
    }
}

/// All entries of one locale, in source declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct LocaleTranslations {
    pub locale_code: String,
    pub entries: Vec<TranslationEntry>,
}

impl LocaleTranslations {
    pub fn entry(&self, key: &str) -> Option<&TranslationEntry> {
        self.entries.iter().find(|e| e.key == key)
    }
}
