//! Canonical table store.
//!
//! Tables are addressed by [`trial_model::TableName`] and always written
//! whole: a save replaces the previous contents of that table, and readers
//! never observe a partially written table. Rows are stored as CSV with the
//! canonical column order as header.

mod codec;
mod error;
mod file;
mod memory;
mod source;
mod store;

pub use codec::{decode_rows, encode_rows};
pub use error::{Result, StoreError};
pub use file::FileStore;
pub use memory::MemoryStore;
pub use source::{DataSource, open_tables};
pub use store::{CanonicalStore, TableContents};
