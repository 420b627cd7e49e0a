//! Price listing repository
//!
//! DynamoDB-backed `PriceStore` over the fragrance prices table.

use async_trait::async_trait;
use aws_sdk_dynamodb::error::{ProvideErrorMetadata, SdkError};
use aws_sdk_dynamodb::types::AttributeValue;
use std::collections::HashMap;
use std::sync::Arc;

use crate::db::models::{PriceListing, FRAGRANCE_NAME_KEY};
use crate::db::store::{PriceStore, StoreError};
use crate::db::DynamoDbClient;

type Item = HashMap<String, AttributeValue>;

/// Repository for price listing operations
#[derive(Clone)]
pub struct PriceListingRepository {
    client: Arc<DynamoDbClient>,
}

impl PriceListingRepository {
    /// Create a new price listing repository
    pub fn new(client: Arc<DynamoDbClient>) -> Self {
        Self { client }
    }

    fn parse_items(items: Option<Vec<Item>>) -> Vec<PriceListing> {
        let items = items.unwrap_or_default();
        let listings: Vec<PriceListing> = items.iter().filter_map(PriceListing::from_dynamodb).collect();
        if listings.len() < items.len() {
            tracing::warn!(
                skipped = items.len() - listings.len(),
                "Skipped items without key attributes"
            );
        }
        listings
    }
}

/// A continuation key is only meaningful when it names at least one attribute.
fn next_page(last_evaluated_key: Option<Item>) -> Option<Item> {
    last_evaluated_key.filter(|key| !key.is_empty())
}

/// The service's own message when DynamoDB answered, otherwise the error chain.
fn dynamodb_error<E, R>(err: SdkError<E, R>) -> StoreError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug + 'static,
{
    let message = match err.as_service_error().and_then(|service| service.message()) {
        Some(message) => message.to_string(),
        None => error_chain(&err),
    };
    StoreError::DynamoDb(message)
}

fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[async_trait]
impl PriceStore for PriceListingRepository {
    async fn query(&self, fragrance_name: &str) -> Result<Vec<PriceListing>, StoreError> {
        let mut listings = Vec::new();
        let mut start_key = None;

        loop {
            let output = self
                .client
                .client()
                .query()
                .table_name(self.client.fragrance_table())
                .key_condition_expression("#pk = :fragrance_name")
                .expression_attribute_names("#pk", FRAGRANCE_NAME_KEY)
                .expression_attribute_values(
                    ":fragrance_name",
                    AttributeValue::S(fragrance_name.to_string()),
                )
                .set_exclusive_start_key(start_key)
                .send()
                .await
                .map_err(dynamodb_error)?;

            listings.extend(Self::parse_items(output.items));

            start_key = next_page(output.last_evaluated_key);
            if start_key.is_none() {
                break;
            }
            tracing::debug!(fragrance_name = %fragrance_name, rows = listings.len(), "Query continues on next page");
        }

        Ok(listings)
    }

    async fn scan(&self) -> Result<Vec<PriceListing>, StoreError> {
        let table = self.client.fragrance_table();
        let all_pages = self.client.scan_all_pages();
        tracing::info!(table = %table, all_pages, "Scanning price listings");

        let mut listings = Vec::new();
        let mut start_key = None;
        let mut pages = 0usize;

        loop {
            let output = self
                .client
                .client()
                .scan()
                .table_name(table)
                .set_exclusive_start_key(start_key)
                .send()
                .await
                .map_err(dynamodb_error)?;
            pages += 1;

            listings.extend(Self::parse_items(output.items));

            start_key = next_page(output.last_evaluated_key);
            match start_key {
                Some(_) if all_pages => continue,
                Some(_) => {
                    tracing::warn!(table = %table, rows = listings.len(), "Scan truncated to first page");
                    break;
                }
                None => break,
            }
        }

        tracing::debug!(table = %table, pages, rows = listings.len(), "Scan finished");
        Ok(listings)
    }

    async fn put(&self, listing: &PriceListing) -> Result<(), StoreError> {
        self.client
            .client()
            .put_item()
            .table_name(self.client.fragrance_table())
            .set_item(Some(listing.to_dynamodb()))
            .send()
            .await
            .map_err(dynamodb_error)?;

        tracing::debug!(
            fragrance_name = %listing.fragrance_name,
            store_name = %listing.store_name,
            "Put price listing"
        );

        Ok(())
    }

    async fn health_check(&self) -> bool {
        self.client.health_check().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use aws_sdk_dynamodb::operation::put_item::{PutItemError, PutItemOutput};
    use aws_sdk_dynamodb::operation::query::QueryOutput;
    use aws_sdk_dynamodb::operation::scan::ScanOutput;
    use aws_sdk_dynamodb::types::error::ResourceNotFoundException;
    use aws_smithy_mocks::{mock, mock_client};

    fn listing(store: &str) -> PriceListing {
        PriceListing {
            fragrance_name: "Dior_Sauvage".to_string(),
            store_name: store.to_string(),
            site_link: format!("https://{}.example", store.to_lowercase()),
            product_name: "Dior Sauvage Eau de Toilette".to_string(),
            bottle_size: "3.4 oz".to_string(),
            price: "$100.00".to_string(),
        }
    }

    fn repository(client: aws_sdk_dynamodb::Client, scan_all_pages: bool) -> PriceListingRepository {
        let settings = Settings {
            scan_all_pages,
            ..Settings::default()
        };
        PriceListingRepository::new(Arc::new(DynamoDbClient::new(Arc::new(settings), client)))
    }

    #[tokio::test]
    async fn test_query_binds_partition_key() {
        let query_rule = mock!(aws_sdk_dynamodb::Client::query)
            .match_requests(|req| {
                req.table_name() == Some("FragrancePrices")
                    && req
                        .expression_attribute_values()
                        .and_then(|values| values.get(":fragrance_name"))
                        .and_then(|v| v.as_s().ok())
                        .map(String::as_str)
                        == Some("Dior_Sauvage")
            })
            .then_output(|| {
                QueryOutput::builder()
                    .items(listing("Amazon").to_dynamodb())
                    .items(listing("Walmart").to_dynamodb())
                    .build()
            });
        let client = mock_client!(aws_sdk_dynamodb, [&query_rule]);

        let rows = repository(client, true).query("Dior_Sauvage").await.unwrap();

        assert_eq!(query_rule.num_calls(), 1);
        assert_eq!(rows, vec![listing("Amazon"), listing("Walmart")]);
    }

    #[tokio::test]
    async fn test_scan_follows_continuation_keys() {
        let first_page = mock!(aws_sdk_dynamodb::Client::scan)
            .match_requests(|req| req.exclusive_start_key().is_none())
            .then_output(|| {
                let mut last_key = HashMap::new();
                last_key.insert(
                    "fragrance_name".to_string(),
                    AttributeValue::S("Dior_Sauvage".to_string()),
                );
                ScanOutput::builder()
                    .items(listing("Amazon").to_dynamodb())
                    .set_last_evaluated_key(Some(last_key))
                    .build()
            });
        let second_page = mock!(aws_sdk_dynamodb::Client::scan)
            .match_requests(|req| req.exclusive_start_key().is_some())
            .then_output(|| {
                ScanOutput::builder()
                    .items(listing("Sephora").to_dynamodb())
                    .build()
            });
        let client = mock_client!(aws_sdk_dynamodb, [&first_page, &second_page]);

        let rows = repository(client, true).scan().await.unwrap();

        assert_eq!(rows, vec![listing("Amazon"), listing("Sephora")]);
        assert_eq!(first_page.num_calls(), 1);
        assert_eq!(second_page.num_calls(), 1);
    }

    #[tokio::test]
    async fn test_scan_first_page_only() {
        let first_page = mock!(aws_sdk_dynamodb::Client::scan)
            .match_requests(|req| req.exclusive_start_key().is_none())
            .then_output(|| {
                let mut last_key = HashMap::new();
                last_key.insert(
                    "fragrance_name".to_string(),
                    AttributeValue::S("Dior_Sauvage".to_string()),
                );
                ScanOutput::builder()
                    .items(listing("Amazon").to_dynamodb())
                    .set_last_evaluated_key(Some(last_key))
                    .build()
            });
        let client = mock_client!(aws_sdk_dynamodb, [&first_page]);

        let rows = repository(client, false).scan().await.unwrap();

        assert_eq!(rows, vec![listing("Amazon")]);
        assert_eq!(first_page.num_calls(), 1);
    }

    #[tokio::test]
    async fn test_put_writes_full_item() {
        let put_rule = mock!(aws_sdk_dynamodb::Client::put_item)
            .match_requests(|req| {
                req.table_name() == Some("FragrancePrices")
                    && req.item().map(|item| item.len()) == Some(6)
                    && req
                        .item()
                        .and_then(|item| item.get("store_name"))
                        .and_then(|v| v.as_s().ok())
                        .map(String::as_str)
                        == Some("Walmart")
            })
            .then_output(|| PutItemOutput::builder().build());
        let client = mock_client!(aws_sdk_dynamodb, [&put_rule]);

        repository(client, true).put(&listing("Walmart")).await.unwrap();

        assert_eq!(put_rule.num_calls(), 1);
    }

    #[tokio::test]
    async fn test_put_surfaces_service_error_message() {
        let put_rule = mock!(aws_sdk_dynamodb::Client::put_item).then_error(|| {
            PutItemError::ResourceNotFoundException(
                ResourceNotFoundException::builder()
                    .message("Requested resource not found")
                    .build(),
            )
        });
        let client = mock_client!(aws_sdk_dynamodb, [&put_rule]);

        let err = repository(client, true).put(&listing("Walmart")).await.unwrap_err();

        assert_eq!(err.to_string(), "Requested resource not found");
    }

    #[tokio::test]
    async fn test_error_without_message_uses_error_chain() {
        let put_rule = mock!(aws_sdk_dynamodb::Client::put_item).then_error(|| {
            PutItemError::ResourceNotFoundException(ResourceNotFoundException::builder().build())
        });
        let client = mock_client!(aws_sdk_dynamodb, [&put_rule]);

        let err = repository(client, true).put(&listing("Walmart")).await.unwrap_err();
        let message = err.to_string();

        assert!(message.starts_with("service error"));
        assert!(message.contains("ResourceNotFoundException"));
        assert!(!message.contains("Response {"));
    }

    #[tokio::test]
    async fn test_query_follows_continuation_keys() {
        let first_page = mock!(aws_sdk_dynamodb::Client::query)
            .match_requests(|req| req.exclusive_start_key().is_none())
            .then_output(|| {
                let mut last_key = HashMap::new();
                last_key.insert(
                    "fragrance_name".to_string(),
                    AttributeValue::S("Dior_Sauvage".to_string()),
                );
                last_key.insert(
                    "store_name".to_string(),
                    AttributeValue::S("Amazon".to_string()),
                );
                QueryOutput::builder()
                    .items(listing("Amazon").to_dynamodb())
                    .set_last_evaluated_key(Some(last_key))
                    .build()
            });
        let second_page = mock!(aws_sdk_dynamodb::Client::query)
            .match_requests(|req| {
                req.exclusive_start_key()
                    .and_then(|key| key.get("store_name"))
                    .and_then(|v| v.as_s().ok())
                    .map(String::as_str)
                    == Some("Amazon")
            })
            .then_output(|| {
                QueryOutput::builder()
                    .items(listing("Walmart").to_dynamodb())
                    .build()
            });
        let client = mock_client!(aws_sdk_dynamodb, [&first_page, &second_page]);

        let rows = repository(client, false).query("Dior_Sauvage").await.unwrap();

        assert_eq!(rows, vec![listing("Amazon"), listing("Walmart")]);
        assert_eq!(first_page.num_calls(), 1);
        assert_eq!(second_page.num_calls(), 1);
    }

    #[test]
    fn test_next_page_ignores_empty_key() {
        assert!(next_page(None).is_none());
        assert!(next_page(Some(HashMap::new())).is_none());
    }
}
