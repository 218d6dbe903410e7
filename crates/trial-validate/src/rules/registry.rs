//! Rule registry in registration order.

use serde::{Deserialize, Serialize};
use trial_model::{FindingSeverity, TableName};

use crate::checks::Check;
use crate::error::{Result, ValidateError};

/// One declarative validation rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub id: String,
    pub table: TableName,
    pub check: Check,
    pub severity: FindingSeverity,
    /// Template with `{count}`, `{table}` and `{column}` placeholders.
    pub message: String,
}

impl Rule {
    pub fn new(
        id: impl Into<String>,
        table: TableName,
        check: Check,
        severity: FindingSeverity,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            table,
            check,
            severity,
            message: message.into(),
        }
    }

    pub fn render(&self, count: u64) -> String {
        render_message(&self.message, count, self.table, self.check.column())
    }
}

/// Fill the placeholders of a rule message.
pub fn render_message(template: &str, count: u64, table: TableName, column: &str) -> String {
    template
        .replace("{count}", &count.to_string())
        .replace("{table}", table.as_str())
        .replace("{column}", column)
}

/// Rules in the order they were registered.
#[derive(Debug, Clone, Default)]
pub struct RuleRegistry {
    rules: Vec<Rule>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding `rules`, validated as if registered one by one.
    pub fn from_rules(rules: impl IntoIterator<Item = Rule>) -> Result<Self> {
        let mut registry = Self::new();
        for rule in rules {
            registry.register(rule)?;
        }
        Ok(registry)
    }

    /// Append a rule.
    ///
    /// Fails when the id is taken or when the check reads a column that is
    /// not part of the addressed table.
    pub fn register(&mut self, rule: Rule) -> Result<()> {
        if self.get(&rule.id).is_some() {
            return Err(ValidateError::DuplicateRule { rule: rule.id });
        }
        for (table, column) in rule.check.referenced_columns(rule.table) {
            if !table.has_column(column) {
                return Err(ValidateError::UnknownColumn {
                    rule: rule.id.clone(),
                    table,
                    column: column.to_string(),
                });
            }
        }
        self.rules.push(rule);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.id == id)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }
}
