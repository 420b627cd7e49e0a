//! Error types shared by the catalog operations.

pub mod types;

pub use types::{CatalogError, ErrorResponse};
