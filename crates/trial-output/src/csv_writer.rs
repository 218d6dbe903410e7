//! Delimited export of domain tables.

use std::path::{Path, PathBuf};

use tracing::info;
use trial_map::verify_complete;
use trial_model::DomainTable;

use crate::common::write_atomic;
use crate::error::{OutputError, Result};

/// CSV text of `table`: header in mapping column order, then one line per row.
pub fn domain_csv_bytes(table: &DomainTable) -> Result<Vec<u8>> {
    let csv_error = |source| OutputError::Csv {
        domain: table.domain,
        source,
    };
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&table.columns).map_err(csv_error)?;
    for row in &table.rows {
        writer
            .write_record(table.ordered_values(row))
            .map_err(csv_error)?;
    }
    writer.into_inner().map_err(|e| OutputError::Csv {
        domain: table.domain,
        source: e.into_error().into(),
    })
}

/// Verify `table` and write it to `output_dir/<domain>.csv`.
///
/// An incomplete table fails with [`OutputError::Map`] before the file is
/// touched.
pub fn export_domain(table: &DomainTable, output_dir: &Path) -> Result<PathBuf> {
    verify_complete(table)?;
    write_domain(table, output_dir)
}

/// Verify every table, then write them all.
///
/// No file is written unless every table is complete.
pub fn export_domains(tables: &[DomainTable], output_dir: &Path) -> Result<Vec<PathBuf>> {
    for table in tables {
        verify_complete(table)?;
    }
    tables
        .iter()
        .map(|table| write_domain(table, output_dir))
        .collect()
}

fn write_domain(table: &DomainTable, output_dir: &Path) -> Result<PathBuf> {
    let path = output_dir.join(table.domain.file_name());
    let bytes = domain_csv_bytes(table)?;
    write_atomic(&path, &bytes)?;
    info!(
        domain = %table.domain,
        rows = table.len(),
        path = %path.display(),
        "exported domain"
    );
    Ok(path)
}
