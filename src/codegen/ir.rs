//! Intermediate representation of the generated artifact.
//!
//! The synthesizer builds a [`Module`]; a [`Target`](super::Target) writer
//! serializes it. Nothing here knows about any concrete output syntax.

use crate::codegen::template::Template;
use crate::l10n::{DefaultValue, VarType};

/// The whole generated file.
#[derive(Debug, Clone, PartialEq)]
pub struct Module {
    pub contract: Contract,
    pub implementations: Vec<Implementation>,
    pub facade: Facade,
}

/// Abstract accessor surface shared by every locale implementation.
#[derive(Debug, Clone, PartialEq)]
pub struct Contract {
    pub name: String,
    pub accessors: Vec<AbstractAccessor>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AbstractAccessor {
    pub signature: Signature,
    pub doc: AccessorDoc,
}

/// Name and calling shape of an accessor.
#[derive(Debug, Clone, PartialEq)]
pub struct Signature {
    pub name: String,
    pub shape: Shape,
}

/// No-argument property, or a method with ordered parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Property,
    /// Required parameters precede defaulted ones.
    Method(Vec<Param>),
}

impl Shape {
    pub fn params(&self) -> &[Param] {
        match self {
            Shape::Property => &[],
            Shape::Method(params) => params,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub var_type: VarType,
    pub default: Option<DefaultValue>,
}

/// Documentation for an abstract accessor.
#[derive(Debug, Clone, PartialEq)]
pub struct AccessorDoc {
    /// Either the declared description or a generated placeholder.
    pub description: String,
    pub example: Option<String>,
    /// Variables in source declaration order.
    pub variables: Vec<Param>,
}

/// One concrete class per locale.
#[derive(Debug, Clone, PartialEq)]
pub struct Implementation {
    pub name: String,
    pub locale_code: String,
    pub accessors: Vec<ConcreteAccessor>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConcreteAccessor {
    pub signature: Signature,
    pub body: Template,
    /// Locale the text was taken from when this locale lacks the key.
    pub fallback_from: Option<String>,
}

/// Top-level type resolving the active locale to an implementation.
#[derive(Debug, Clone, PartialEq)]
pub struct Facade {
    pub name: String,
    pub contract_name: String,
    pub default_locale: String,
    /// Locale code and implementation name, in discovery order.
    pub locales: Vec<(String, String)>,
}
