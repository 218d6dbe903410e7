use serde::{Deserialize, Serialize};
use tracing::info;
use trial_model::CanonicalTables;
use trial_transform::{TransformConfig, seeded_rng, synthesize};

use crate::error::Result;
use crate::store::CanonicalStore;

/// Where readers of canonical tables get their data.
///
/// Chosen explicitly by the caller; a failed store read is never replaced by
/// generated data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DataSource {
    /// Tables previously saved to the store.
    #[default]
    Persisted,
    /// Freshly generated tables.
    Synthetic { subjects: usize, seed: Option<u64> },
}

/// Canonical tables from `source`.
///
/// `Persisted` propagates [`crate::StoreError::NotFound`] when a table was
/// never written.
pub fn open_tables<S: CanonicalStore>(
    source: DataSource,
    store: &S,
    config: &TransformConfig,
) -> Result<CanonicalTables> {
    match source {
        DataSource::Persisted => store.load_tables(),
        DataSource::Synthetic { subjects, seed } => {
            info!(subjects, seed = ?seed, "using synthetic canonical tables");
            let mut rng = seeded_rng(seed);
            Ok(synthesize(subjects, config, &mut rng)?)
        }
    }
}
