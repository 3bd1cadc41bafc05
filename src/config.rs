use crate::codegen::TargetKind;
use crate::discovery;
use crate::l10n::is_identifier;
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Generator configuration, loaded from a YAML file:
///
/// ```yaml
/// pathToTranslates: translates/
/// pathToOut: app_localization.py
/// defaultTranslateFile: l10n_en.json
/// className: AppLocalization
/// target: python
/// ```
///
/// Relative paths are resolved against the directory holding the config file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory containing `l10n_<code>.json` files
    pub path_to_translates: PathBuf,

    /// Generated file path
    pub path_to_out: PathBuf,

    /// File name whose locale code is the default locale
    pub default_translate_file: String,

    /// Base name of the generated type hierarchy
    pub class_name: String,

    /// Output language
    #[serde(default)]
    pub target: TargetKind,
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config = Self::from_yaml(&raw)
            .with_context(|| format!("Invalid config file {}", path.display()))?;

        if let Some(base) = path.parent() {
            config.path_to_translates = base.join(&config.path_to_translates);
            config.path_to_out = base.join(&config.path_to_out);
        }

        Ok(config)
    }

    pub fn from_yaml(raw: &str) -> Result<Self> {
        let config: Config = serde_yml::from_str(raw).context("Failed to parse YAML")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !is_identifier(&self.class_name) {
            bail!("className '{}' is not a valid identifier", self.class_name);
        }
        if discovery::locale_code_from_file_name(&self.default_translate_file).is_none() {
            bail!(
                "defaultTranslateFile '{}' must be named {}<code>{}",
                self.default_translate_file,
                discovery::FILE_PREFIX,
                discovery::FILE_SUFFIX
            );
        }
        Ok(())
    }

    /// Locale code of the default translation file.
    pub fn default_locale(&self) -> &str {
        // Checked by validate()
        discovery::locale_code_from_file_name(&self.default_translate_file).unwrap_or_default()
    }
}
