//! Submission domain mapping.
//!
//! A [`DomainMapping`] is a fixed list of target fields, each filled from a
//! [`FieldSource`]: a constant, a copied or reformatted canonical column, a
//! composite subject key, or a per-subject sequence number. Mapping is a pure
//! function of the canonical rows; [`verify_complete`] checks the result
//! before anything is exported.

mod error;
mod mapper;
mod mapping;
mod standard;
mod verify;

pub use error::{MapError, Result};
pub use mapper::DomainMapper;
pub use mapping::{DomainMapping, FieldMapping, FieldSource};
pub use standard::{ae_mapping, dm_mapping};
pub use verify::verify_complete;
