//! Utility functions for gauntlet

use log::info;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Interpret an optional environment value as a boolean
/// Accepts: "1", "true", "on", "yes", "t" (case insensitive)
pub fn is_truthy(value: Option<&str>) -> bool {
    match value {
        Some(val) => {
            let val_lower = val.to_lowercase();
            matches!(val_lower.as_str(), "1" | "true" | "on" | "yes" | "t")
        }
        None => false,
    }
}

/// The current user's home directory, from `HOME` (or `USERPROFILE` on Windows)
pub fn home_dir() -> Option<PathBuf> {
    if let Some(home) = env::var_os("HOME") {
        return Some(PathBuf::from(home));
    }

    #[cfg(target_os = "windows")]
    {
        if let Some(profile) = env::var_os("USERPROFILE") {
            return Some(PathBuf::from(profile));
        }
    }

    None
}

/// Expand a leading `~` against `home`; other paths are returned unchanged
pub fn expand_home(path: &str, home: &Path) -> PathBuf {
    if path == "~" {
        return home.to_path_buf();
    }
    match path.strip_prefix("~/") {
        Some(rest) => home.join(rest),
        None => PathBuf::from(path),
    }
}

/// Remove a directory tree or file if it exists
///
/// Returns whether anything was deleted.
pub fn delete_if_exists(path: &Path) -> io::Result<bool> {
    let metadata = match fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(e),
    };

    if metadata.is_dir() {
        fs::remove_dir_all(path)?;
    } else {
        fs::remove_file(path)?;
    }
    info!("🗑️ Deleted {}", path.display());
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_is_truthy() {
        assert!(is_truthy(Some("1")));
        assert!(is_truthy(Some("TRUE")));
        assert!(is_truthy(Some("yes")));
        assert!(!is_truthy(Some("0")));
        assert!(!is_truthy(Some("")));
        assert!(!is_truthy(None));
    }

    #[test]
    fn test_expand_home() {
        let home = Path::new("/home/ci");
        assert_eq!(
            expand_home("~/.ivy2/cache/io.delta", home),
            PathBuf::from("/home/ci/.ivy2/cache/io.delta")
        );
        assert_eq!(expand_home("~", home), PathBuf::from("/home/ci"));
        assert_eq!(expand_home("/opt/cache", home), PathBuf::from("/opt/cache"));
        assert_eq!(expand_home("dist", home), PathBuf::from("dist"));
    }

    #[test]
    fn test_delete_if_exists() {
        let temp_dir = TempDir::new().unwrap();
        let cache = temp_dir.path().join("cache/io/delta");
        fs::create_dir_all(&cache).unwrap();
        fs::write(cache.join("delta-core.jar"), b"jar").unwrap();

        assert!(delete_if_exists(&temp_dir.path().join("cache")).unwrap());
        assert!(!temp_dir.path().join("cache").exists());

        // Second call is a no-op
        assert!(!delete_if_exists(&temp_dir.path().join("cache")).unwrap());
    }

    #[test]
    fn test_delete_if_exists_removes_files() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("stale.whl");
        fs::write(&file, b"wheel").unwrap();

        assert!(delete_if_exists(&file).unwrap());
        assert!(!file.exists());
    }
}
