//! Canonical table construction.
//!
//! [`SchemaTransformer`] joins the raw `patients` and `admissions` extracts
//! into [`trial_model::Subject`] rows, derives the trial fields (age,
//! enrollment date, site, arm) and synthesizes adverse events for every
//! subject. [`synthesize`] builds the same tables without any raw input.
//!
//! Every random draw goes through a caller-supplied generator; pass
//! [`seeded_rng`] with a fixed seed for reproducible tables.

mod age;
mod config;
mod error;
mod events;
mod join;
mod random;
mod synthetic;
mod transformer;

pub use age::{AGE_MAX, AGE_MIN, clamp_age, derive_age};
pub use config::{MAX_AE_MEAN, TransformConfig};
pub use error::{Result, TransformError};
pub use events::{EventGenerator, RELATEDNESS_WEIGHTS, SEVERITY_WEIGHTS};
pub use random::seeded_rng;
pub use synthetic::synthesize;
pub use transformer::{SchemaTransformer, TransformStats};
