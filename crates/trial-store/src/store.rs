use trial_model::{AdverseEvent, CanonicalRecord, CanonicalTables, Subject, TableName};

use crate::codec::{decode_rows, encode_rows};
use crate::error::Result;

/// Rows of one canonical table, as returned by a load by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableContents {
    Demographics(Vec<Subject>),
    AdverseEvents(Vec<AdverseEvent>),
}

impl TableContents {
    pub fn table(&self) -> TableName {
        match self {
            TableContents::Demographics(_) => TableName::Demographics,
            TableContents::AdverseEvents(_) => TableName::AdverseEvents,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            TableContents::Demographics(rows) => rows.len(),
            TableContents::AdverseEvents(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Table-oriented persistence with load and replace semantics.
///
/// Implementors provide the raw byte operations. `write_table` must replace
/// the whole table so that a concurrent reader sees either the old or the new
/// contents; `read_table` fails with [`crate::StoreError::NotFound`] for a
/// table that was never written.
pub trait CanonicalStore {
    fn write_table(&mut self, table: TableName, bytes: Vec<u8>) -> Result<()>;

    fn read_table(&self, table: TableName) -> Result<Vec<u8>>;

    fn contains(&self, table: TableName) -> bool;

    /// Replace the table that `R` belongs to with `rows`.
    fn save<R: CanonicalRecord>(&mut self, rows: &[R]) -> Result<()>
    where
        Self: Sized,
    {
        let bytes = encode_rows(rows)?;
        tracing::debug!(table = %R::TABLE, rows = rows.len(), bytes = bytes.len(), "saving table");
        self.write_table(R::TABLE, bytes)
    }

    fn load<R: CanonicalRecord>(&self) -> Result<Vec<R>>
    where
        Self: Sized,
    {
        decode_rows(&self.read_table(R::TABLE)?)
    }

    /// Load a table by its name, rejecting names outside the canonical set.
    fn load_by_name(&self, name: &str) -> Result<TableContents>
    where
        Self: Sized,
    {
        let contents = match name.parse::<TableName>()? {
            TableName::Demographics => TableContents::Demographics(self.load()?),
            TableName::AdverseEvents => TableContents::AdverseEvents(self.load()?),
        };
        Ok(contents)
    }

    /// Save both canonical tables, demographics first.
    fn save_tables(&mut self, tables: &CanonicalTables) -> Result<()>
    where
        Self: Sized,
    {
        self.save(&tables.subjects)?;
        self.save(&tables.adverse_events)
    }

    fn load_tables(&self) -> Result<CanonicalTables>
    where
        Self: Sized,
    {
        Ok(CanonicalTables {
            subjects: self.load()?,
            adverse_events: self.load()?,
        })
    }
}
