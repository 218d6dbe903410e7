//! Export of mapped submission domains.
//!
//! Each domain is written to `<output_dir>/<domain>.csv` (for example
//! `dm.csv`) through a temp file that is renamed over the target, so an
//! existing export is either fully replaced or left untouched. Tables are
//! checked with [`trial_map::verify_complete`] before anything is written.

mod common;
mod csv_writer;
mod error;
mod report;

pub use common::ensure_parent_dir;
pub use csv_writer::{domain_csv_bytes, export_domain, export_domains};
pub use error::{OutputError, Result};
pub use report::{REPORT_FILE_NAME, write_validation_report};
