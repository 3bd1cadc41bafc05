//! Synthesis side of the pipeline.
//!
//! # Architecture
//!
//! - `synthesizer`: registry + default locale → intermediate representation
//! - `ir`: target-neutral declarations, accessors and typed parameters
//! - `template`: translation text split into literals and interpolations
//! - `target`: the `Target` trait and the selectable output languages
//! - `python` / `typescript`: concrete writers
//!
//! # Example
//!
//! ```rust,ignore
//! use l10n_gen::codegen::{CodeSynthesizer, TargetKind};
//!
//! let synth = CodeSynthesizer::new("AppLocalization");
//! let text = synth.generate(&registry, "en", TargetKind::Python.target().as_ref())?;
//! ```

pub mod ir;
mod python;
mod synthesizer;
mod target;
pub mod template;
mod typescript;
mod writer;

pub use python::PythonTarget;
pub use synthesizer::CodeSynthesizer;
pub use target::{NameRole, Target, TargetKind, GENERATED_NOTICE};
pub use typescript::TypeScriptTarget;
