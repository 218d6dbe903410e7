//! Rule definitions, the default protocol rule set, and TOML rule files.

mod defaults;
mod loader;
mod registry;

pub use defaults::default_rules;
pub use loader::load_rules;
pub use registry::{Rule, RuleRegistry, render_message};
