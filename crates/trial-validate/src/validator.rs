use tracing::{debug, info};
use trial_model::{CanonicalTables, ValidationFinding, ValidationReport};
use trial_store::CanonicalStore;

use crate::error::Result;
use crate::rules::{Rule, RuleRegistry};

/// Evaluates every registered rule against the canonical tables.
#[derive(Debug, Clone)]
pub struct Validator {
    registry: RuleRegistry,
}

impl Validator {
    pub fn new(registry: RuleRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Load both canonical tables from `store` and evaluate all rules.
    ///
    /// A table that was never written is an error; rule violations are
    /// returned as findings.
    pub fn run_all<S: CanonicalStore>(&self, store: &S) -> Result<ValidationReport> {
        let tables = store.load_tables()?;
        Ok(self.evaluate(&tables))
    }

    /// Findings for `tables`, in rule registration order.
    pub fn evaluate(&self, tables: &CanonicalTables) -> ValidationReport {
        let findings: Vec<_> = self
            .registry
            .iter()
            .filter_map(|rule| evaluate_rule(rule, tables))
            .collect();
        info!(
            rules = self.registry.len(),
            findings = findings.len(),
            "validation complete"
        );
        ValidationReport::new(findings)
    }
}

fn evaluate_rule(rule: &Rule, tables: &CanonicalTables) -> Option<ValidationFinding> {
    let violations = rule.check.count_violations(rule.table, tables);
    debug!(rule = %rule.id, table = %rule.table, violations, "evaluated rule");
    if violations == 0 {
        return None;
    }
    Some(ValidationFinding {
        table: rule.table,
        rule: rule.id.clone(),
        violation_count: violations,
        severity: rule.severity,
        message: rule.render(violations),
    })
}
