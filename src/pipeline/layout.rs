//! Repository layout used by the Python pipeline
//!
//! Relative paths resolve against the repository root; absolute paths are
//! used unchanged. Cache directories may start with `~/`.

use crate::exceptions::{GauntletError, Result};
use crate::utils::expand_home;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Paths, tool names and package names for the Python pipeline
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PythonLayout {
    /// Build tool wrapper script
    pub build_tool: String,
    /// Style check wrapper script
    pub lint_script: String,
    pub test_dir: String,
    /// Passed to the submit command as `--driver-class-path`
    pub extra_class_path: String,
    pub version_file: String,
    pub dist_dir: String,
    pub smoke_test: String,
    /// Coordinate prefix of the locally published package, without version
    pub package_prefix: String,
    /// Distribution name as it appears in the wheel file name
    pub wheel_distribution: String,
    pub uninstall_packages: Vec<String>,
    pub helper_packages: Vec<String>,
    /// Local artifact caches cleared before publishing
    pub cache_dirs: Vec<String>,
    pub test_suffix: String,
    pub excluded_prefix: String,
    pub submit_command: String,
    pub pip: String,
    pub python: String,
}

impl Default for PythonLayout {
    fn default() -> Self {
        Self {
            build_tool: "build/sbt".to_string(),
            lint_script: "dev/lint-python".to_string(),
            test_dir: "python/delta/tests".to_string(),
            extra_class_path: "python/delta/testing".to_string(),
            version_file: "version.sbt".to_string(),
            dist_dir: "dist".to_string(),
            smoke_test: "examples/python/using_with_pip.py".to_string(),
            package_prefix: "io.delta:delta-core_2.12".to_string(),
            wheel_distribution: "delta_spark".to_string(),
            uninstall_packages: vec!["delta-spark".to_string(), "pyspark".to_string()],
            helper_packages: vec![
                "wheel".to_string(),
                "twine".to_string(),
                "setuptools".to_string(),
            ],
            cache_dirs: vec![
                "~/.ivy2/cache/io.delta".to_string(),
                "~/.m2/repository/io/delta".to_string(),
            ],
            test_suffix: ".py".to_string(),
            excluded_prefix: "_".to_string(),
            submit_command: "spark-submit".to_string(),
            pip: "pip3".to_string(),
            python: "python3".to_string(),
        }
    }
}

impl PythonLayout {
    /// Load a layout from a JSON file; missing fields keep their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        let layout: Self = serde_json::from_str(&data)?;
        layout.validate()?;
        Ok(layout)
    }

    fn validate(&self) -> Result<()> {
        let required = [
            ("build_tool", &self.build_tool),
            ("test_dir", &self.test_dir),
            ("version_file", &self.version_file),
            ("test_suffix", &self.test_suffix),
            ("submit_command", &self.submit_command),
            ("pip", &self.pip),
            ("python", &self.python),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(GauntletError::Config(format!("layout field '{field}' is empty")));
            }
        }
        Ok(())
    }

    /// Resolve a layout path against the repository root
    pub fn path(&self, root: &Path, relative: &str) -> PathBuf {
        root.join(relative)
    }

    /// Cache directories with `~` expanded
    pub fn cache_paths(&self, home: Option<&Path>) -> Result<Vec<PathBuf>> {
        self.cache_dirs
            .iter()
            .map(|dir| {
                if dir.starts_with('~') {
                    let home = home.ok_or_else(|| {
                        GauntletError::Config(format!(
                            "cannot expand '{dir}': home directory is unknown"
                        ))
                    })?;
                    Ok(expand_home(dir, home))
                } else {
                    Ok(PathBuf::from(dir))
                }
            })
            .collect()
    }
}
