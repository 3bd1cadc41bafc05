//! Output persistence.

use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

/// Write `contents` to `path` atomically.
///
/// The text goes to a temporary file next to the destination which is then
/// renamed over it, so a failed run never leaves a truncated artifact.
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;

    let mut file = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;
    file.write_all(contents.as_bytes())
        .context("Failed to write generated output")?;
    file.persist(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    debug!("Wrote {} bytes to {}", contents.len(), path.display());
    Ok(())
}

/// Whether `path` already holds exactly `contents`.
pub fn is_up_to_date(path: &Path, contents: &str) -> bool {
    std::fs::read_to_string(path)
        .map(|existing| existing == contents)
        .unwrap_or(false)
}
