//! TOML rule files.
//!
//! ```toml
//! [[rule]]
//! id = "age_adult_us"
//! table = "demographics"
//! severity = "Warning"
//! message = "{count} subjects younger than 21"
//! check = { kind = "int_range", column = "age", min = 21 }
//! ```

use std::path::Path;

use serde::Deserialize;

use super::registry::Rule;
use crate::error::{Result, ValidateError};

#[derive(Debug, Deserialize)]
struct RuleFile {
    #[serde(default)]
    rule: Vec<Rule>,
}

/// Read the rules declared in a TOML file, in file order.
pub fn load_rules(path: &Path) -> Result<Vec<Rule>> {
    let text = std::fs::read_to_string(path).map_err(|e| ValidateError::RuleFileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let file: RuleFile = toml::from_str(&text).map_err(|e| ValidateError::RuleFileParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    tracing::debug!(path = %path.display(), rules = file.rule.len(), "loaded rule file");
    Ok(file.rule)
}
