//! Loading a directory of raw extracts into named tables.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use polars::prelude::DataFrame;
use tracing::{debug, info, warn};

use crate::discovery::{list_csv_files, logical_table_name};
use crate::error::{IngestError, Result};
use crate::reader::read_csv_table;

/// Extract files read when no explicit list is configured.
pub const DEFAULT_SOURCE_FILES: &[&str] = &[
    "PATIENTS.csv",
    "ADMISSIONS.csv",
    "LABEVENTS.csv",
    "PRESCRIPTIONS.csv",
];

/// An expected extract that was not present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedSource {
    pub file_name: String,
    pub path: PathBuf,
}

/// Tables read by one [`SourceLoader::load`] call.
#[derive(Debug, Default)]
pub struct LoadedSources {
    /// Parsed tables keyed by logical name (`patients`, `admissions`, ...).
    pub tables: BTreeMap<String, DataFrame>,
    pub skipped: Vec<SkippedSource>,
}

impl LoadedSources {
    pub fn get(&self, name: &str) -> Option<&DataFrame> {
        self.tables.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    /// Total rows across all loaded tables.
    pub fn total_rows(&self) -> usize {
        self.tables.values().map(DataFrame::height).sum()
    }
}

/// Reads the expected extract files from one raw directory.
#[derive(Debug, Clone)]
pub struct SourceLoader {
    dir: PathBuf,
    expected: Vec<String>,
}

impl SourceLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            expected: DEFAULT_SOURCE_FILES
                .iter()
                .map(|name| (*name).to_string())
                .collect(),
        }
    }

    pub fn with_expected<I, S>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.expected = files.into_iter().map(Into::into).collect();
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Load every expected file that exists.
    ///
    /// Missing files are logged and reported in [`LoadedSources::skipped`].
    /// A missing directory or an unreadable file is an error.
    pub fn load(&self) -> Result<LoadedSources> {
        let present = list_csv_files(&self.dir)?;
        let mut loaded = LoadedSources::default();

        for file_name in &self.expected {
            let found = present.iter().find(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.eq_ignore_ascii_case(file_name))
            });

            let Some(path) = found else {
                let path = self.dir.join(file_name);
                warn!(path = %path.display(), "source extract missing, skipping");
                loaded.skipped.push(SkippedSource {
                    file_name: file_name.clone(),
                    path,
                });
                continue;
            };

            let Some(name) = logical_table_name(path) else {
                return Err(IngestError::CsvParse {
                    path: path.clone(),
                    message: "file name is not valid UTF-8".to_string(),
                });
            };

            let df = read_csv_table(path)?;
            info!(
                table = %name,
                rows = df.height(),
                columns = df.width(),
                "loaded source extract"
            );
            loaded.tables.insert(name, df);
        }

        for path in &present {
            let expected = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| {
                    self.expected
                        .iter()
                        .any(|file| file.eq_ignore_ascii_case(name))
                });
            if !expected {
                debug!(path = %path.display(), "ignoring unexpected extract");
            }
        }

        Ok(loaded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_expected_files() {
        let loader = SourceLoader::new("data/raw");
        assert_eq!(loader.expected.len(), 4);
        assert_eq!(loader.dir(), Path::new("data/raw"));
    }
}
