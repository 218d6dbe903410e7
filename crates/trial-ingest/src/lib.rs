//! Source extract ingestion.
//!
//! Reads the raw per-table extracts (one CSV file per source table) from a
//! directory into Polars `DataFrame`s keyed by logical table name. Missing
//! files are skipped with a warning; no row-level validation happens here.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use trial_ingest::SourceLoader;
//!
//! let loaded = SourceLoader::new(Path::new("data/raw")).load()?;
//! let patients = loaded.get("patients");
//! for skipped in &loaded.skipped {
//!     println!("missing {}", skipped.file_name);
//! }
//! ```

mod discovery;
mod error;
mod loader;
mod reader;

pub use discovery::{list_csv_files, logical_table_name};
pub use error::{IngestError, Result};
pub use loader::{DEFAULT_SOURCE_FILES, LoadedSources, SkippedSource, SourceLoader};
pub use reader::{read_csv_headers, read_csv_table};
