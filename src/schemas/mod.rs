//! Wire-format schemas
//!
//! Request bodies accepted by the write operations and the scraped input
//! consumed by the import tool.

pub mod fragrance;
pub mod shopping;

pub use fragrance::{StoreListing, UpsertPayload};
pub use shopping::ShoppingResult;
