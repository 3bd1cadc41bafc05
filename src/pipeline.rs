//! End-to-end run: config → discovery → ingestion → synthesis → output.
//!
//! Ingestion is all-or-nothing and completes before synthesis starts. Output
//! is only touched after the whole artifact has been rendered.

use crate::codegen::{CodeSynthesizer, TargetKind};
use crate::config::Config;
use crate::discovery::{self, TranslationFile};
use crate::l10n::{LocaleRegistry, TranslationParser};
use crate::output;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Per-invocation overrides.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Overrides the configured target
    pub target: Option<TargetKind>,

    /// Render and compare with the file on disk instead of writing
    pub check: bool,
}

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub locales: Vec<String>,
    pub default_locale: String,
    pub output: PathBuf,
    /// Whether the file on disk matches the rendered text (after the run)
    pub up_to_date: bool,
}

/// Parse every file and register it, failing on the first error.
pub fn ingest(files: &[TranslationFile]) -> Result<LocaleRegistry> {
    let mut registry = LocaleRegistry::new();
    for file in files {
        let raw = std::fs::read_to_string(&file.path)
            .with_context(|| format!("Failed to read {}", file.path.display()))?;
        let entries = TranslationParser::parse(&file.locale_code, &raw)?;
        registry.register(&file.locale_code, entries)?;
    }
    debug!("Registered {} locales", registry.size());
    Ok(registry)
}

/// Produce the generated text for `config` without writing anything.
pub fn render(config: &Config, target: TargetKind) -> Result<(LocaleRegistry, String)> {
    let files = discovery::discover(&config.path_to_translates)?;
    info!(
        "Discovered {} translation files in {}",
        files.len(),
        config.path_to_translates.display()
    );

    let registry = ingest(&files)?;
    let text = CodeSynthesizer::new(&config.class_name).generate(
        &registry,
        config.default_locale(),
        target.target().as_ref(),
    )?;
    Ok((registry, text))
}

/// Run the generator for the config file at `config_path`.
pub fn run(config_path: &Path, options: &RunOptions) -> Result<Report> {
    let config = Config::from_file(config_path)?;
    let target = options.target.unwrap_or(config.target);

    let (registry, text) = render(&config, target)?;
    let mut up_to_date = output::is_up_to_date(&config.path_to_out, &text);

    if options.check {
        info!(
            "{} is {}",
            config.path_to_out.display(),
            if up_to_date { "up to date" } else { "stale" }
        );
    } else if up_to_date {
        info!("{} is already up to date", config.path_to_out.display());
    } else {
        output::write_atomic(&config.path_to_out, &text)?;
        up_to_date = true;
        info!("Generated {}", config.path_to_out.display());
    }

    Ok(Report {
        locales: registry.codes().map(str::to_string).collect(),
        default_locale: config.default_locale().to_string(),
        output: config.path_to_out.clone(),
        up_to_date,
    })
}
