//! Test file discovery

use crate::exceptions::{GauntletError, Result};
use glob::{Pattern, glob};
use log::debug;
use std::path::{Path, PathBuf};

/// Find test files directly inside `dir`
///
/// A file qualifies when it is a regular file whose name ends with `suffix`
/// and does not start with `excluded_prefix`. Results are sorted by path.
pub fn discover_test_files(dir: &Path, suffix: &str, excluded_prefix: &str) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(GauntletError::Config(format!(
            "test directory {} does not exist",
            dir.display()
        )));
    }

    let glob_pattern = format!(
        "{}/*{}",
        Pattern::escape(&dir.to_string_lossy()),
        Pattern::escape(suffix)
    );
    debug!("📁 Enumerating files matching: {glob_pattern}");

    let mut files = Vec::new();
    for entry in glob(&glob_pattern)
        .map_err(|e| GauntletError::Config(format!("Glob error: {e}")))?
    {
        let path = entry.map_err(|e| GauntletError::Io(e.into()))?;
        let excluded = path
            .file_name()
            .map(|name| name.to_string_lossy().starts_with(excluded_prefix))
            .unwrap_or(true);

        if excluded || !path.is_file() {
            debug!("⏭️ Skipping {}", path.display());
            continue;
        }
        files.push(path);
    }

    files.sort();
    Ok(files)
}
