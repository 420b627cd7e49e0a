//! Services module
//!
//! Contains the catalog operations and the write policy they share.

pub mod catalog;
pub mod import;
pub mod seed_data;
pub mod writer;

pub use catalog::{get_all, get_by_name, seed, upsert, FRAGRANCE_NAME_PARAM};
pub use writer::{apply_listings, WriteFailure};
