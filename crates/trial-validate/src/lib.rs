//! Protocol rule validation of canonical tables.
//!
//! A [`Rule`] pairs a table with a declarative [`Check`], a severity and a
//! message template. The [`RuleRegistry`] keeps rules in registration order
//! and the [`Validator`] evaluates all of them, producing one
//! [`trial_model::ValidationFinding`] per violated rule. Data problems are
//! findings; only a missing table is an error.

mod checks;
mod error;
mod rules;
mod validator;

pub use checks::Check;
pub use error::{Result, ValidateError};
pub use rules::{Rule, RuleRegistry, default_rules, load_rules, render_message};
pub use validator::Validator;
