use std::collections::BTreeMap;

use trial_model::TableName;

use crate::error::{Result, StoreError};
use crate::store::CanonicalStore;

/// In-process store; each save swaps the whole table entry.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: BTreeMap<TableName, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tables(&self) -> impl Iterator<Item = TableName> + '_ {
        self.tables.keys().copied()
    }
}

impl CanonicalStore for MemoryStore {
    fn write_table(&mut self, table: TableName, bytes: Vec<u8>) -> Result<()> {
        self.tables.insert(table, bytes);
        Ok(())
    }

    fn read_table(&self, table: TableName) -> Result<Vec<u8>> {
        self.tables
            .get(&table)
            .cloned()
            .ok_or(StoreError::NotFound { table })
    }

    fn contains(&self, table: TableName) -> bool {
        self.tables.contains_key(&table)
    }
}
