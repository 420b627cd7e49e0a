//! In-memory price store.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::db::models::PriceListing;
use crate::db::store::{PriceStore, StoreError};

/// In-memory storage backend for tests and local development.
///
/// Rows are kept in key order. Data is not persisted and will be lost
/// when the store is dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPriceStore {
    rows: Arc<RwLock<BTreeMap<(String, String), PriceListing>>>,
}

impl InMemoryPriceStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows currently held.
    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    /// Whether the store holds no rows.
    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

#[async_trait]
impl PriceStore for InMemoryPriceStore {
    async fn query(&self, fragrance_name: &str) -> Result<Vec<PriceListing>, StoreError> {
        let rows = self.rows.read().await;
        Ok(rows
            .values()
            .filter(|row| row.fragrance_name == fragrance_name)
            .cloned()
            .collect())
    }

    async fn scan(&self) -> Result<Vec<PriceListing>, StoreError> {
        let rows = self.rows.read().await;
        Ok(rows.values().cloned().collect())
    }

    async fn put(&self, listing: &PriceListing) -> Result<(), StoreError> {
        let mut rows = self.rows.write().await;
        rows.insert(
            (listing.fragrance_name.clone(), listing.store_name.clone()),
            listing.clone(),
        );
        Ok(())
    }
}

/// Store wrapper that fails a chosen call, for exercising error paths.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct FaultyStore {
    pub inner: InMemoryPriceStore,
    /// 1-based index of the put that fails; later puts are still attempted if called
    pub fail_put_at: Option<usize>,
    pub fail_reads: bool,
    pub calls: std::sync::atomic::AtomicUsize,
    pub puts: std::sync::atomic::AtomicUsize,
}

#[cfg(test)]
impl FaultyStore {
    pub fn failing_put_at(n: usize) -> Self {
        Self {
            fail_put_at: Some(n),
            ..Self::default()
        }
    }

    pub fn failing_reads() -> Self {
        Self {
            fail_reads: true,
            ..Self::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(test)]
#[async_trait]
impl PriceStore for FaultyStore {
    async fn query(&self, fragrance_name: &str) -> Result<Vec<PriceListing>, StoreError> {
        self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        if self.fail_reads {
            return Err(StoreError::DynamoDb("Requested resource not found".to_string()));
        }
        self.inner.query(fragrance_name).await
    }

    async fn scan(&self) -> Result<Vec<PriceListing>, StoreError> {
        self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        if self.fail_reads {
            return Err(StoreError::DynamoDb("Requested resource not found".to_string()));
        }
        self.inner.scan().await
    }

    async fn put(&self, listing: &PriceListing) -> Result<(), StoreError> {
        self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        let n = self.puts.fetch_add(1, std::sync::atomic::Ordering::SeqCst) + 1;
        if self.fail_put_at == Some(n) {
            return Err(StoreError::DynamoDb(
                "Throughput exceeds the current capacity of your table".to_string(),
            ));
        }
        self.inner.put(listing).await
    }
}
