//! Code synthesizer: builds the generated module from a populated registry.
//!
//! Synthesis never mutates the registry and is deterministic for a given
//! registry and default locale.

use crate::codegen::ir::{
    AbstractAccessor, AccessorDoc, ConcreteAccessor, Contract, Facade, Implementation, Module,
    Param, Shape, Signature,
};
use crate::codegen::target::{NameRole, Target};
use crate::codegen::template::Template;
use crate::error::L10nError;
use crate::l10n::{LocaleRegistry, LocaleTranslations, TranslationEntry, METADATA_MARKER};
use std::collections::HashMap;
use tracing::{debug, info};

/// Builds the base contract, per-locale implementations and facade.
#[derive(Debug, Clone)]
pub struct CodeSynthesizer {
    class_name: String,
}

impl CodeSynthesizer {
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
        }
    }

    /// Name of the abstract base type.
    pub fn contract_name(&self) -> String {
        format!("Base{}", self.class_name)
    }

    /// Name of the implementation type for `locale_code`.
    ///
    /// The code is capitalized (first character upper, rest lower) and any
    /// character outside `[A-Za-z0-9_]` becomes `_`.
    pub fn implementation_name(&self, locale_code: &str) -> String {
        let mut name = self.class_name.clone();
        for (i, c) in locale_code.chars().enumerate() {
            let c = if i == 0 {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            };
            name.push(if c.is_ascii_alphanumeric() || c == '_' {
                c
            } else {
                '_'
            });
        }
        name
    }

    /// Render the full artifact for `target`.
    ///
    /// # Errors
    /// `DefaultLocaleNotFound` if `default_locale` was never registered,
    /// `InvalidIdentifier` if a name is reserved in the target language.
    pub fn generate(
        &self,
        registry: &LocaleRegistry,
        default_locale: &str,
        target: &dyn Target,
    ) -> Result<String, L10nError> {
        let module = self.synthesize(registry, default_locale)?;
        check_reserved_names(&module, target)?;
        info!(
            "Rendering {} locales as {}",
            module.implementations.len(),
            target.name()
        );
        Ok(target.render(&module))
    }

    /// Build the intermediate representation.
    pub fn synthesize(
        &self,
        registry: &LocaleRegistry,
        default_locale: &str,
    ) -> Result<Module, L10nError> {
        let defaults = registry
            .get(default_locale)
            .map_err(|_| L10nError::DefaultLocaleNotFound(default_locale.to_string()))?;

        let contract = self.build_contract(defaults);
        let implementations = registry
            .all()
            .map(|locale| self.build_implementation(defaults, locale))
            .collect();
        let facade = self.build_facade(registry, default_locale);

        Ok(Module {
            contract,
            implementations,
            facade,
        })
    }

    fn build_contract(&self, defaults: &LocaleTranslations) -> Contract {
        let accessors = defaults
            .entries
            .iter()
            .map(|entry| AbstractAccessor {
                signature: signature(entry),
                doc: accessor_doc(entry),
            })
            .collect();

        Contract {
            name: self.contract_name(),
            accessors,
        }
    }

    fn build_implementation(
        &self,
        defaults: &LocaleTranslations,
        locale: &LocaleTranslations,
    ) -> Implementation {
        let own: HashMap<&str, &TranslationEntry> = locale
            .entries
            .iter()
            .map(|e| (e.key.as_str(), e))
            .collect();

        let mut fallbacks = 0;
        let accessors = defaults
            .entries
            .iter()
            .map(|default_entry| {
                let (effective, fallback_from) = match own.get(default_entry.key.as_str()) {
                    Some(entry) => (*entry, None),
                    None => {
                        fallbacks += 1;
                        (default_entry, Some(defaults.locale_code.clone()))
                    }
                };
                // Text without its own variable metadata takes the default's variables
                let typed = if effective.has_variables() {
                    effective
                } else {
                    default_entry
                };
                ConcreteAccessor {
                    signature: signature(typed),
                    body: Template::compile(
                        &effective.text,
                        typed.variables().iter().map(|v| v.name.as_str()),
                    ),
                    fallback_from,
                }
            })
            .collect();

        if fallbacks > 0 {
            debug!(
                "Locale '{}': {} keys fall back to '{}'",
                locale.locale_code, fallbacks, defaults.locale_code
            );
        }

        Implementation {
            name: self.implementation_name(&locale.locale_code),
            locale_code: locale.locale_code.clone(),
            accessors,
        }
    }

    fn build_facade(&self, registry: &LocaleRegistry, default_locale: &str) -> Facade {
        Facade {
            name: self.class_name.clone(),
            contract_name: self.contract_name(),
            default_locale: default_locale.to_string(),
            locales: registry
                .codes()
                .map(|code| (code.to_string(), self.implementation_name(code)))
                .collect(),
        }
    }
}

/// Reject names the target language cannot declare.
fn check_reserved_names(module: &Module, target: &dyn Target) -> Result<(), L10nError> {
    let reject = |locale: &str, name: &str| L10nError::InvalidIdentifier {
        locale: locale.to_string(),
        name: name.to_string(),
    };
    let default_locale = module.facade.default_locale.as_str();

    for name in [module.facade.name.as_str(), module.contract.name.as_str()] {
        if target.is_reserved(name, NameRole::Type) {
            return Err(reject(default_locale, name));
        }
    }

    let contract = module
        .contract
        .accessors
        .iter()
        .map(|a| (default_locale, &a.signature));
    let implementations = module.implementations.iter().flat_map(|i| {
        i.accessors
            .iter()
            .map(move |a| (i.locale_code.as_str(), &a.signature))
    });

    for (locale, signature) in contract.chain(implementations) {
        if target.is_reserved(&signature.name, NameRole::Accessor) {
            return Err(reject(locale, &signature.name));
        }
        for param in signature.shape.params() {
            if target.is_reserved(&param.name, NameRole::Parameter) {
                return Err(reject(locale, &param.name));
            }
        }
    }
    Ok(())
}

fn signature(entry: &TranslationEntry) -> Signature {
    let shape = match &entry.metadata {
        Some(metadata) if !metadata.variables.is_empty() => Shape::Method(
            metadata
                .parameter_order()
                .into_iter()
                .map(|v| Param {
                    name: v.name.clone(),
                    var_type: v.var_type,
                    default: v.default.clone(),
                })
                .collect(),
        ),
        _ => Shape::Property,
    };

    Signature {
        name: entry.key.clone(),
        shape,
    }
}

fn accessor_doc(entry: &TranslationEntry) -> AccessorDoc {
    let metadata = entry.metadata.as_ref();

    AccessorDoc {
        description: metadata
            .and_then(|m| m.description.clone())
            .unwrap_or_else(|| {
                format!(
                    "No description provided for {}{}.",
                    METADATA_MARKER, entry.key
                )
            }),
        example: metadata.and_then(|m| m.example.clone()),
        variables: entry
            .variables()
            .iter()
            .map(|v| Param {
                name: v.name.clone(),
                var_type: v.var_type,
                default: v.default.clone(),
            })
            .collect(),
    }
}
