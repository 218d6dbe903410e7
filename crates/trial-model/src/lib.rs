pub mod canonical;
pub mod domain;
pub mod error;
pub mod event;
pub mod finding;
pub mod processing;
pub mod subject;
pub mod table;

pub use canonical::CanonicalTables;
pub use domain::{CellValue, DomainCode, DomainRow, DomainTable};
pub use error::{ModelError, Result};
pub use event::{AdverseEvent, AeSeverity, Relatedness};
pub use finding::{FindingSeverity, ValidationFinding, ValidationReport};
pub use processing::{RunSummary, StageName, StageOutcome, StageStatus};
pub use subject::{Gender, Subject, TreatmentArm};
pub use table::{CanonicalRecord, FieldValue, TableName, TableRow};
