//! Output targets: serializers from the IR to a concrete source language.

use crate::codegen::ir::Module;
use crate::codegen::python::PythonTarget;
use crate::codegen::typescript::TypeScriptTarget;
use serde::Deserialize;
use std::fmt;

/// First line of every generated file.
pub const GENERATED_NOTICE: &str = "NOTE: THIS IS AN AUTO-GENERATED FILE, DO NOT EDIT IT.";

/// Serializes a synthesized [`Module`] into source text.
pub trait Target {
    /// Display name used in logs.
    fn name(&self) -> &'static str;

    /// Whether `name` cannot be declared in the given role.
    fn is_reserved(&self, name: &str, role: NameRole) -> bool;

    /// Render the complete file: notice, support declarations, contract,
    /// implementations and facade, in that order.
    fn render(&self, module: &Module) -> String;
}

/// Position a generated name is declared in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameRole {
    Type,
    Accessor,
    Parameter,
}

/// Selectable output language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    #[default]
    Python,
    #[serde(alias = "ts")]
    #[value(name = "typescript", alias = "ts")]
    TypeScript,
}

impl TargetKind {
    pub fn target(&self) -> Box<dyn Target> {
        match self {
            TargetKind::Python => Box::new(PythonTarget),
            TargetKind::TypeScript => Box::new(TypeScriptTarget),
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.target().name())
    }
}
