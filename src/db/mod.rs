//! Database module
//!
//! Contains the price store seam, its DynamoDB and in-memory backends,
//! and the row model.

pub mod dynamodb;
pub mod memory;
pub mod models;
pub mod repositories;
pub mod store;

use std::sync::Arc;

use crate::config::{create_dynamodb_client, Settings, StorageBackend};

pub use dynamodb::DynamoDbClient;
pub use memory::InMemoryPriceStore;
pub use models::PriceListing;
pub use repositories::PriceListingRepository;
pub use store::{PriceStore, StoreError};

/// Build the price store selected by `settings.storage_backend`.
///
/// Called once per process; the returned handle is shared by every request.
pub async fn create_price_store(settings: Arc<Settings>) -> Arc<dyn PriceStore> {
    match settings.storage_backend {
        StorageBackend::DynamoDb => {
            tracing::debug!(
                region = %settings.aws_region,
                dynamodb_endpoint = ?settings.dynamodb_endpoint_url,
                table = %settings.fragrance_table,
                "Creating DynamoDB client"
            );
            let sdk_client = create_dynamodb_client(&settings).await;
            let client = Arc::new(DynamoDbClient::new(settings, sdk_client));
            Arc::new(PriceListingRepository::new(client))
        }
        StorageBackend::Memory => {
            tracing::info!("Using in-memory price store");
            Arc::new(InMemoryPriceStore::new())
        }
    }
}
