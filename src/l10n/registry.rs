//! Locale registry: insertion-ordered collection of parsed locales.
//!
//! Populated once during ingestion, then read by the synthesizer. Iteration
//! order is registration order, which the pipeline makes equal to the sorted
//! discovery order of translation files.

use crate::error::L10nError;
use crate::l10n::model::{LocaleTranslations, TranslationEntry};
use indexmap::IndexMap;
use tracing::debug;

/// Ordered mapping of locale code to its translations.
#[derive(Debug, Clone, Default)]
pub struct LocaleRegistry {
    locales: IndexMap<String, LocaleTranslations>,
}

impl LocaleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a locale at the end of discovery order.
    ///
    /// # Errors
    /// `DuplicateLocale` if the code is already registered.
    pub fn register(
        &mut self,
        locale_code: &str,
        entries: Vec<TranslationEntry>,
    ) -> Result<(), L10nError> {
        if self.contains(locale_code) {
            return Err(L10nError::DuplicateLocale(locale_code.to_string()));
        }

        debug!(
            "Registering locale '{}' with {} entries",
            locale_code,
            entries.len()
        );
        self.locales.insert(
            locale_code.to_string(),
            LocaleTranslations {
                locale_code: locale_code.to_string(),
                entries,
            },
        );
        Ok(())
    }

    /// Look up a locale by code.
    ///
    /// # Errors
    /// `LocaleNotFound` if the code was never registered.
    pub fn get(&self, locale_code: &str) -> Result<&LocaleTranslations, L10nError> {
        self.locales
            .get(locale_code)
            .ok_or_else(|| L10nError::LocaleNotFound(locale_code.to_string()))
    }

    pub fn contains(&self, locale_code: &str) -> bool {
        self.locales.contains_key(locale_code)
    }

    /// All locales in discovery order.
    pub fn all(&self) -> impl Iterator<Item = &LocaleTranslations> + '_ {
        self.locales.values()
    }

    /// Registered locale codes in discovery order.
    pub fn codes(&self) -> impl Iterator<Item = &str> + '_ {
        self.locales.keys().map(String::as_str)
    }

    pub fn size(&self) -> usize {
        self.locales.len()
    }
}
