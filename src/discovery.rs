//! Translation file discovery.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const FILE_PREFIX: &str = "l10n_";
pub const FILE_SUFFIX: &str = ".json";

/// A discovered locale file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationFile {
    pub locale_code: String,
    pub path: PathBuf,
}

/// Extract the locale code from `l10n_<code>.json`.
pub fn locale_code_from_file_name(name: &str) -> Option<&str> {
    name.strip_prefix(FILE_PREFIX)
        .and_then(|rest| rest.strip_suffix(FILE_SUFFIX))
        .filter(|code| !code.is_empty())
}

/// List translation files directly inside `dir`, sorted by file name.
pub fn discover(dir: &Path) -> Result<Vec<TranslationFile>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read translations directory {}", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to list {}", dir.display()))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        match locale_code_from_file_name(name) {
            Some(code) => files.push(TranslationFile {
                locale_code: code.to_string(),
                path: path.clone(),
            }),
            None => debug!("Skipping {}", path.display()),
        }
    }

    files.sort_by(|a, b| a.path.file_name().cmp(&b.path.file_name()));
    Ok(files)
}
