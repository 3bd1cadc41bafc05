//! Generator of typed localization accessors.
//!
//! Per-locale translation files are parsed into a [`l10n::LocaleRegistry`],
//! then [`codegen::CodeSynthesizer`] emits a base contract, one
//! implementation per locale (falling back to the default locale for missing
//! keys) and a facade resolving the active locale.

pub mod codegen;
pub mod config;
pub mod discovery;
pub mod error;
pub mod l10n;
pub mod output;
pub mod pipeline;

pub use error::L10nError;
