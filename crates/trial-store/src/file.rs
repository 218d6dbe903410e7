use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use trial_model::TableName;

use crate::error::{Result, StoreError};
use crate::store::CanonicalStore;

/// One CSV file per table under a directory.
///
/// Writes go to `<table>.csv.tmp`, are synced, then renamed over
/// `<table>.csv`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn table_path(&self, table: TableName) -> PathBuf {
        self.dir.join(format!("{}.csv", table.as_str()))
    }
}

impl CanonicalStore for FileStore {
    fn write_table(&mut self, table: TableName, bytes: Vec<u8>) -> Result<()> {
        let path = self.table_path(table);
        let temp_path = path.with_extension("csv.tmp");

        fs::create_dir_all(&self.dir).map_err(|e| StoreError::Io {
            operation: "create directory",
            path: self.dir.clone(),
            source: e,
        })?;

        let mut file = File::create(&temp_path).map_err(|e| StoreError::Io {
            operation: "create",
            path: temp_path.clone(),
            source: e,
        })?;
        file.write_all(&bytes).map_err(|e| StoreError::Io {
            operation: "write",
            path: temp_path.clone(),
            source: e,
        })?;
        file.sync_all().map_err(|e| StoreError::Io {
            operation: "sync",
            path: temp_path.clone(),
            source: e,
        })?;
        drop(file);

        fs::rename(&temp_path, &path).map_err(|e| StoreError::AtomicWriteFailed {
            temp_path: temp_path.clone(),
            target_path: path.clone(),
            source: e,
        })?;

        tracing::info!(table = %table, path = %path.display(), "replaced canonical table");
        Ok(())
    }

    fn read_table(&self, table: TableName) -> Result<Vec<u8>> {
        let path = self.table_path(table);
        fs::read(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StoreError::NotFound { table }
            } else {
                StoreError::Io {
                    operation: "read",
                    path,
                    source: e,
                }
            }
        })
    }

    fn contains(&self, table: TableName) -> bool {
        self.table_path(table).is_file()
    }
}
