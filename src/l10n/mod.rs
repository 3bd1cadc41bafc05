//! Ingestion side of the pipeline: data model, file parser and locale registry.
//!
//! # Architecture
//!
//! - `model`: translation entries, metadata and typed variables
//! - `parser`: turns one locale file into an ordered list of entries
//! - `registry`: insertion-ordered collection of parsed locales

mod model;
mod parser;
mod registry;

pub use model::{
    float_literal, DefaultValue, LocaleTranslations, Metadata, TranslationEntry, VarType, Variable,
};
pub use parser::{is_identifier, TranslationParser, METADATA_MARKER};
pub use registry::LocaleRegistry;
