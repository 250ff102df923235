//! Configuration for the statistics collectors.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Administrative columns skipped by default: identifiers and pixel
/// dimensions carry no categorical information.
pub const DEFAULT_EXCLUDED_COLUMNS: &[&str] = &[
    "screen_id",
    "study_name",
    "plate_name",
    "plate_id",
    "well_id",
    "sample",
    "pixel_size_x",
    "pixel_size_y",
];

/// Collector configuration: which columns to exclude from the statistics.
///
/// Exclusion entries that are absent from a table are silently ignored, so
/// one configuration can be reused across tables with differing schemas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectConfig {
    /// Column names skipped by the collectors.
    #[serde(default)]
    pub excluded_columns: Vec<String>,
}

impl CollectConfig {
    /// Configuration with the default administrative exclusions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration with no exclusions.
    pub fn none() -> Self {
        Self {
            excluded_columns: Vec::new(),
        }
    }

    /// Configuration with an explicit exclusion list.
    pub fn with_excluded<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            excluded_columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    /// Load a configuration from a YAML file.
    pub fn from_yaml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let config = serde_yaml::from_reader(BufReader::new(file))?;
        Ok(config)
    }

    /// Add exclusions on top of the current list, skipping duplicates.
    pub fn extend_excluded<I, S>(&mut self, columns: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for column in columns {
            let column = column.into();
            if !self.is_excluded(&column) {
                self.excluded_columns.push(column);
            }
        }
    }

    /// Check whether a column is excluded from statistics.
    pub fn is_excluded(&self, column: &str) -> bool {
        self.excluded_columns.iter().any(|c| c == column)
    }
}

impl Default for CollectConfig {
    fn default() -> Self {
        Self::with_excluded(DEFAULT_EXCLUDED_COLUMNS.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_excludes_administrative_columns() {
        let config = CollectConfig::new();
        assert!(config.is_excluded("screen_id"));
        assert!(config.is_excluded("pixel_size_y"));
        assert!(!config.is_excluded("organism"));
    }

    #[test]
    fn test_from_yaml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "excluded_columns:").unwrap();
        writeln!(file, "  - screen_id").unwrap();
        writeln!(file, "  - Organism Part").unwrap();
        file.flush().unwrap();

        let config = CollectConfig::from_yaml(file.path()).unwrap();
        assert!(config.is_excluded("screen_id"));
        assert!(config.is_excluded("Organism Part"));
        assert!(!config.is_excluded("cell_line"));
    }

    #[test]
    fn test_extend_excluded_merges_without_duplicates() {
        let mut config = CollectConfig::with_excluded(["screen_id"]);
        config.extend_excluded(["screen_id", "well_id"]);

        assert_eq!(config.excluded_columns, vec!["screen_id", "well_id"]);
        assert!(config.is_excluded("well_id"));
    }

    #[test]
    fn test_none_excludes_nothing() {
        let config = CollectConfig::none();
        assert!(!config.is_excluded("screen_id"));
    }
}
