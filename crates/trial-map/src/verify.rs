use trial_model::{CellValue, DomainTable};

use crate::error::{MapError, Result};

/// Every required column must be in the schema and non-missing in every row.
///
/// Reports the first gap found, scanning the schema first and then rows in
/// order.
pub fn verify_complete(table: &DomainTable) -> Result<()> {
    for field in &table.required {
        if !table.columns.contains(field) {
            return Err(MapError::MappingIncomplete {
                domain: table.domain,
                row: None,
                field: field.clone(),
            });
        }
    }

    for (index, row) in table.rows.iter().enumerate() {
        for field in &table.required {
            let missing = row.get(field).is_none_or(CellValue::is_missing);
            if missing {
                return Err(MapError::MappingIncomplete {
                    domain: table.domain,
                    row: Some(index),
                    field: field.clone(),
                });
            }
        }
    }
    Ok(())
}
