//! Library half of the `trial` binary: configuration, logging setup and
//! pipeline orchestration, kept here so integration tests can drive a run.

pub mod config;
pub mod logging;
pub mod pipeline;
