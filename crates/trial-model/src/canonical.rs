use std::collections::BTreeSet;

use crate::event::AdverseEvent;
use crate::subject::Subject;

/// Both canonical tables produced by one transform run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CanonicalTables {
    pub subjects: Vec<Subject>,
    pub adverse_events: Vec<AdverseEvent>,
}

impl CanonicalTables {
    pub fn subject_ids(&self) -> BTreeSet<i64> {
        self.subjects.iter().map(|s| s.subject_id).collect()
    }

    /// Events whose subject is not present in `subjects`.
    pub fn orphan_events(&self) -> Vec<&AdverseEvent> {
        let ids = self.subject_ids();
        self.adverse_events
            .iter()
            .filter(|event| !ids.contains(&event.subject_id))
            .collect()
    }

    pub fn events_for(&self, subject_id: i64) -> impl Iterator<Item = &AdverseEvent> {
        self.adverse_events
            .iter()
            .filter(move |event| event.subject_id == subject_id)
    }
}
