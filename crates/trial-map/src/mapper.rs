use tracing::debug;
use trial_model::{
    AdverseEvent, CanonicalTables, DomainCode, DomainRow, DomainTable, Subject, TableName,
    TableRow,
};

use crate::error::{MapError, Result};
use crate::mapping::{DomainMapping, SequenceState, map_value};
use crate::standard::{ae_mapping, dm_mapping};

/// Maps canonical tables into the DM and AE domains.
///
/// Holds only the mappings, so mapping the same input twice yields the same
/// tables.
#[derive(Debug, Clone)]
pub struct DomainMapper {
    dm: DomainMapping,
    ae: DomainMapping,
}

impl DomainMapper {
    /// Standard mappings for `study_id`.
    pub fn new(study_id: &str) -> Self {
        Self {
            dm: dm_mapping(study_id),
            ae: ae_mapping(study_id),
        }
    }

    /// Custom mappings, validated against their source tables.
    ///
    /// `dm` must map demographics into DM and `ae` adverse events into AE.
    pub fn with_mappings(dm: DomainMapping, ae: DomainMapping) -> Result<Self> {
        check_slot(&dm, DomainCode::Dm, TableName::Demographics)?;
        check_slot(&ae, DomainCode::Ae, TableName::AdverseEvents)?;
        dm.validate()?;
        ae.validate()?;
        Ok(Self { dm, ae })
    }

    pub fn map_subjects(&self, subjects: &[Subject]) -> DomainTable {
        let rows: Vec<&dyn TableRow> = subjects.iter().map(|s| s as &dyn TableRow).collect();
        map_rows(&self.dm, &rows)
    }

    pub fn map_events(&self, events: &[AdverseEvent]) -> DomainTable {
        let rows: Vec<&dyn TableRow> = events.iter().map(|e| e as &dyn TableRow).collect();
        map_rows(&self.ae, &rows)
    }

    /// DM then AE.
    pub fn map_all(&self, tables: &CanonicalTables) -> Vec<DomainTable> {
        vec![
            self.map_subjects(&tables.subjects),
            self.map_events(&tables.adverse_events),
        ]
    }
}

fn check_slot(mapping: &DomainMapping, domain: DomainCode, table: TableName) -> Result<()> {
    if mapping.domain != domain {
        return Err(MapError::WrongDomain {
            expected: domain,
            found: mapping.domain,
        });
    }
    if mapping.source_table != table {
        return Err(MapError::WrongSourceTable {
            domain,
            expected: table,
            found: mapping.source_table,
        });
    }
    Ok(())
}

/// Apply `mapping` to every row, in input order.
pub(crate) fn map_rows(mapping: &DomainMapping, rows: &[&dyn TableRow]) -> DomainTable {
    let mut table = DomainTable::new(
        mapping.domain,
        mapping.columns(),
        mapping.required_columns(),
    );
    let mut sequences = SequenceState::default();
    for row in rows {
        let mut mapped = DomainRow::default();
        for field in &mapping.fields {
            let value = map_value(&field.source, *row, &mapping.study_id, &mut sequences);
            mapped.set(field.target.clone(), value);
        }
        table.push_row(mapped);
    }
    debug!(domain = %mapping.domain, rows = table.len(), "mapped domain");
    table
}
