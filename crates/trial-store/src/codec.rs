//! CSV encoding of canonical records.
//!
//! Encoding is deterministic: the same rows always produce the same bytes,
//! and an empty table still carries its header.

use csv::{ReaderBuilder, WriterBuilder};
use trial_model::CanonicalRecord;

use crate::error::{Result, StoreError};

pub fn encode_rows<R: CanonicalRecord>(rows: &[R]) -> Result<Vec<u8>> {
    let table = R::TABLE;
    let csv_error = |source| StoreError::Csv { table, source };

    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(table.columns()).map_err(csv_error)?;
    for row in rows {
        writer.serialize(row).map_err(csv_error)?;
    }
    writer.into_inner().map_err(|e| StoreError::Csv {
        table,
        source: e.into_error().into(),
    })
}

pub fn decode_rows<R: CanonicalRecord>(bytes: &[u8]) -> Result<Vec<R>> {
    let table = R::TABLE;
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(bytes);

    let headers = reader
        .headers()
        .map_err(|source| StoreError::Csv { table, source })?;
    if !headers.iter().eq(table.columns().iter().copied()) {
        return Err(StoreError::HeaderMismatch {
            table,
            expected: table.columns().join(", "),
            found: headers.iter().collect::<Vec<_>>().join(", "),
        });
    }

    reader
        .deserialize()
        .collect::<std::result::Result<Vec<R>, _>>()
        .map_err(|source| StoreError::Csv { table, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use trial_model::{Gender, Subject, TreatmentArm};

    fn subject() -> Subject {
        Subject {
            subject_id: 10006,
            age: 70,
            gender: Gender::F,
            enrollment_date: NaiveDate::from_ymd_opt(2023, 4, 2).unwrap(),
            site_id: 4,
            treatment_arm: TreatmentArm::Active,
        }
    }

    #[test]
    fn encodes_header_and_rows() {
        let bytes = encode_rows(&[subject()]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(
            text,
            "subject_id,age,gender,enrollment_date,site_id,treatment_arm\n\
             10006,70,F,2023-04-02,4,Active\n"
        );
    }

    #[test]
    fn empty_table_keeps_header() {
        let bytes = encode_rows::<Subject>(&[]).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "subject_id,age,gender,enrollment_date,site_id,treatment_arm\n"
        );
        assert!(decode_rows::<Subject>(b"subject_id,age,gender,enrollment_date,site_id,treatment_arm\n")
            .unwrap()
            .is_empty());
    }

    #[test]
    fn rejects_foreign_header() {
        let err = decode_rows::<Subject>(b"subject_id,dob\n1,2050-01-01\n").unwrap_err();
        assert!(matches!(err, StoreError::HeaderMismatch { .. }));
    }
}
