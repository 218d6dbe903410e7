//! Shared utilities for the trial data pipeline crates.
//!
//! Raw source extracts are loaded as Polars `DataFrame`s whose column types are
//! inferred from the file. These helpers turn individual cells into the plain
//! Rust values the transformer works with, and resolve source column names
//! without caring about their case.

mod cells;
mod lookup;

pub use cells::{
    cell_to_i64, cell_to_string, cell_to_string_non_empty, format_numeric, leading_year,
    parse_i64,
};
pub use lookup::ColumnLookup;
