//! Storage seam for the price catalog.
//!
//! Operations receive a `&dyn PriceStore` so the DynamoDB repository can be
//! swapped for the in-memory store in tests and local development.

use async_trait::async_trait;

use crate::db::models::PriceListing;

/// Errors raised by a price store.
///
/// The message is the backend's own, surfaced verbatim in error envelopes.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    #[error("{0}")]
    DynamoDb(String),
}

/// Key-value table of price listings addressed by `(fragrance_name, store_name)`.
#[async_trait]
pub trait PriceStore: Send + Sync {
    /// All rows whose partition key equals `fragrance_name`, in backend order.
    async fn query(&self, fragrance_name: &str) -> Result<Vec<PriceListing>, StoreError>;

    /// Every row in the table.
    async fn scan(&self) -> Result<Vec<PriceListing>, StoreError>;

    /// Insert the row, or replace the row with the same primary key.
    async fn put(&self, listing: &PriceListing) -> Result<(), StoreError>;

    /// Whether the backend is reachable.
    async fn health_check(&self) -> bool {
        true
    }
}
