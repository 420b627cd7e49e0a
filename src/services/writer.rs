//! Sequential multi-row writes.
//!
//! Rows are written one at a time in order. The first failure stops the
//! batch; rows written before it stay written. There is no rollback and no
//! isolation from concurrent writers to the same keys.

use crate::db::{PriceListing, PriceStore, StoreError};
use crate::error::CatalogError;

/// A batch that stopped part way.
#[derive(Debug, thiserror::Error)]
#[error("write {failed_at} of {total} failed after {committed} committed: {source}")]
pub struct WriteFailure {
    /// Rows written before the failure.
    pub committed: usize,
    /// 1-based position of the failed row.
    pub failed_at: usize,
    pub total: usize,
    #[source]
    pub source: StoreError,
}

impl From<WriteFailure> for CatalogError {
    fn from(failure: WriteFailure) -> Self {
        CatalogError::Storage(failure.source)
    }
}

/// Upsert `listings` in order, aborting on the first failed write.
///
/// Returns the number of rows written.
pub async fn apply_listings(
    store: &dyn PriceStore,
    listings: &[PriceListing],
) -> Result<usize, WriteFailure> {
    for (index, listing) in listings.iter().enumerate() {
        if let Err(source) = store.put(listing).await {
            let failure = WriteFailure {
                committed: index,
                failed_at: index + 1,
                total: listings.len(),
                source,
            };
            tracing::error!(
                fragrance_name = %listing.fragrance_name,
                store_name = %listing.store_name,
                committed = failure.committed,
                total = failure.total,
                error = %failure.source,
                "Aborting listing batch"
            );
            return Err(failure);
        }
    }

    Ok(listings.len())
}
