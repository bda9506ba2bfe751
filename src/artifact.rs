//! Artifact version handling
//!
//! The build declares its version on the first line of a file such as
//! `version.sbt`, e.g. `version := "1.2.3-SNAPSHOT"`. The quoted token is
//! used to address the locally published package and the built wheel.

use crate::exceptions::{GauntletError, Result};
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Version string of the artifact under test
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactVersion(String);

impl ArtifactVersion {
    /// Extract the first double-quoted token from a declaration line
    pub fn parse_line(line: &str) -> Option<Self> {
        let mut parts = line.split('"');
        parts.next()?;
        let version = parts.next()?;
        // An opening quote with no closing quote is not a declaration
        parts.next()?;
        if version.is_empty() {
            return None;
        }
        Some(Self(version.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Version usable inside file names: `1.1.0-SNAPSHOT` -> `1.1.0_SNAPSHOT`
    pub fn filename_safe(&self) -> String {
        self.0.replace('-', "_")
    }

    /// Package coordinate `<prefix>:<version>`
    pub fn coordinate(&self, prefix: &str) -> String {
        format!("{prefix}:{}", self.0)
    }

    /// Pure-python wheel file name for a distribution
    pub fn wheel_file_name(&self, distribution: &str) -> String {
        format!("{distribution}-{}-py3-none-any.whl", self.filename_safe())
    }
}

impl fmt::Display for ArtifactVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Read the version from the first line of a version declaration file
pub fn read_version(path: &Path) -> Result<ArtifactVersion> {
    let file = File::open(path)?;
    let mut first_line = String::new();
    BufReader::new(file).read_line(&mut first_line)?;

    ArtifactVersion::parse_line(&first_line).ok_or_else(|| {
        GauntletError::VersionParse(format!(
            "no quoted version on the first line of {}",
            path.display()
        ))
    })
}
