use anyhow::{bail, Result};
use clap::Parser;
use l10n_gen::codegen::TargetKind;
use l10n_gen::pipeline::{self, RunOptions};
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Parser)]
#[command(
    name = "l10n-gen",
    version,
    about = "Generate typed localization accessors from l10n_<code>.json files"
)]
struct CliArgs {
    /// Path to the YAML configuration file
    #[arg(long, env = "L10N_CONFIG", value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
    config: PathBuf,

    /// Override the output language from the config
    #[arg(long, value_enum)]
    target: Option<TargetKind>,

    /// Do not write; exit with an error if the output is stale
    #[arg(long)]
    check: bool,
}

fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("l10n_gen=info".parse()?),
        )
        .init();

    let args = CliArgs::parse();
    let options = RunOptions {
        target: args.target,
        check: args.check,
    };

    let report = pipeline::run(&args.config, &options)?;
    info!(
        "Locales: {} (default: {})",
        report.locales.join(", "),
        report.default_locale
    );

    if options.check && !report.up_to_date {
        bail!(
            "{} is out of date, rerun without --check",
            report.output.display()
        );
    }

    Ok(())
}
