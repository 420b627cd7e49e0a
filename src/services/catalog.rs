//! Price catalog operations.
//!
//! Each operation takes the shared store and already-extracted input and
//! always produces a response; failures become JSON error envelopes.

use axum::http::StatusCode;

use crate::api::response::ApiResponse;
use crate::db::{PriceListing, PriceStore};
use crate::error::CatalogError;
use crate::schemas::UpsertPayload;
use crate::services::seed_data::seed_listings;
use crate::services::writer::apply_listings;

/// Query parameter naming the fragrance to look up.
pub const FRAGRANCE_NAME_PARAM: &str = "fragrance_name";

pub const GET_BY_NAME_FAILED: &str = "Could not retrieve data";
pub const GET_ALL_FAILED: &str = "Internal Server Error";
pub const SEED_FAILED: &str = "Failed to insert data";
pub const UPSERT_FAILED: &str = "Failed to add or update data";

pub const SEED_SUCCEEDED: &str = "Fragrance data inserted successfully!";
pub const UPSERT_SUCCEEDED: &str = "Fragrance data added or updated successfully!";

/// Every listing for one fragrance.
///
/// A missing or empty name is rejected before the store is touched.
pub async fn get_by_name(store: &dyn PriceStore, fragrance_name: Option<&str>) -> ApiResponse {
    match fetch_by_name(store, fragrance_name).await {
        Ok(listings) => ApiResponse::json(StatusCode::OK, &listings),
        Err(err) => {
            log_failure(&err, "get_by_name");
            ApiResponse::error(&err, GET_BY_NAME_FAILED)
        }
    }
}

async fn fetch_by_name(
    store: &dyn PriceStore,
    fragrance_name: Option<&str>,
) -> Result<Vec<PriceListing>, CatalogError> {
    let fragrance_name = fragrance_name
        .filter(|name| !name.is_empty())
        .ok_or_else(|| CatalogError::Validation("Fragrance name is required".to_string()))?;

    let listings = store.query(fragrance_name).await?;
    tracing::info!(fragrance_name = %fragrance_name, rows = listings.len(), "Fetched fragrance listings");
    Ok(listings)
}

/// Every listing in the table.
pub async fn get_all(store: &dyn PriceStore) -> ApiResponse {
    match store.scan().await {
        Ok(listings) => {
            tracing::info!(rows = listings.len(), "Fetched all fragrance listings");
            ApiResponse::json(StatusCode::OK, &listings)
        }
        Err(err) => {
            let err = CatalogError::from(err);
            log_failure(&err, "get_all");
            ApiResponse::error(&err, GET_ALL_FAILED)
        }
    }
}

/// Write the sample `Dior_Sauvage` listings.
pub async fn seed(store: &dyn PriceStore) -> ApiResponse {
    let listings = seed_listings();
    match apply_listings(store, &listings).await {
        Ok(written) => {
            tracing::info!(rows = written, "Seeded fragrance listings");
            ApiResponse::message(SEED_SUCCEEDED)
        }
        Err(failure) => {
            let err = CatalogError::from(failure);
            log_failure(&err, "seed");
            ApiResponse::error(&err, SEED_FAILED)
        }
    }
}

/// Insert or overwrite the listings in a raw request body.
///
/// Parse failures and write failures share one error envelope.
pub async fn upsert(store: &dyn PriceStore, body: &[u8]) -> ApiResponse {
    match apply_upsert(store, body).await {
        Ok(()) => ApiResponse::message(UPSERT_SUCCEEDED),
        Err(err) => {
            log_failure(&err, "upsert");
            ApiResponse::error(&err, UPSERT_FAILED)
        }
    }
}

async fn apply_upsert(store: &dyn PriceStore, body: &[u8]) -> Result<(), CatalogError> {
    let payload = UpsertPayload::from_slice(body)?;
    if !payload.ignored_keys.is_empty() {
        tracing::warn!(
            fragrance_name = %payload.fragrance_name,
            ignored = ?payload.ignored_keys,
            "Request body names more than one fragrance; only the first is written"
        );
    }

    let fragrance_name = payload.fragrance_name.clone();
    let written = apply_listings(store, &payload.into_listings()).await?;
    tracing::info!(fragrance_name = %fragrance_name, rows = written, "Upserted fragrance listings");
    Ok(())
}

fn log_failure(err: &CatalogError, operation: &str) {
    match err {
        CatalogError::Validation(msg) => {
            tracing::warn!(operation, reason = %msg, "Rejected request")
        }
        other => tracing::error!(operation, error = %other, "Operation failed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory::FaultyStore;
    use crate::db::InMemoryPriceStore;
    use crate::services::seed_data::SEED_FRAGRANCE;
    use serde_json::{json, Value};

    const CHANEL: &str = r#"{"Chanel_No5": [{"store_name": "Sephora", "site_link": "https://x", "product_name": "Chanel No. 5 EDP", "price": "$135.00"}]}"#;

    fn two_fragrances() -> &'static str {
        r#"{"Tom_Ford_Oud": [
            {"store_name": "Neiman Marcus", "site_link": "https://nm", "product_name": "Oud Wood EDP", "bottle_size": "1.7 oz", "price": "$280.00"},
            {"store_name": "Nordstrom", "site_link": "https://nd", "product_name": "Oud Wood", "bottle_size": "3.4 oz", "price": "$395.00"}
        ]}"#
    }

    async fn rows(store: &InMemoryPriceStore) -> Vec<PriceListing> {
        store.scan().await.unwrap()
    }

    #[tokio::test]
    async fn test_get_by_name_requires_name() {
        let store = FaultyStore::default();
        for name in [None, Some("")] {
            let response = get_by_name(&store, name).await;
            assert_eq!(response.status, StatusCode::BAD_REQUEST);
            assert_eq!(response.body_json().unwrap(), json!({"error": "Fragrance name is required"}));
        }
        assert_eq!(store.call_count(), 0);
    }

    #[tokio::test]
    async fn test_get_by_name_returns_only_matching_rows() {
        let store = InMemoryPriceStore::new();
        seed(&store).await;
        upsert(&store, CHANEL.as_bytes()).await;

        let response = get_by_name(&store, Some("Chanel_No5")).await;
        assert_eq!(response.status, StatusCode::OK);
        let body = response.body_json().unwrap();
        assert_eq!(
            body,
            json!([{
                "fragrance_name": "Chanel_No5",
                "store_name": "Sephora",
                "site_link": "https://x",
                "product_name": "Chanel No. 5 EDP",
                "bottle_size": "N/A",
                "price": "$135.00"
            }])
        );

        let response = get_by_name(&store, Some(SEED_FRAGRANCE)).await;
        let body = response.body_json().unwrap();
        let names: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|row| row["fragrance_name"].as_str().unwrap())
            .collect();
        assert_eq!(names.len(), 7);
        assert!(names.iter().all(|n| *n == SEED_FRAGRANCE));
    }

    #[tokio::test]
    async fn test_get_by_name_unknown_is_empty_array() {
        let store = InMemoryPriceStore::new();
        seed(&store).await;

        let response = get_by_name(&store, Some("Creed_Aventus")).await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body, "[]");
    }

    #[tokio::test]
    async fn test_get_by_name_storage_failure() {
        let store = FaultyStore::failing_reads();
        let response = get_by_name(&store, Some(SEED_FRAGRANCE)).await;
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.body_json().unwrap(),
            json!({"error": "Could not retrieve data", "details": "Requested resource not found"})
        );
    }

    #[tokio::test]
    async fn test_get_all_returns_every_row() {
        let store = InMemoryPriceStore::new();
        assert_eq!(get_all(&store).await.body, "[]");

        seed(&store).await;
        upsert(&store, CHANEL.as_bytes()).await;
        upsert(&store, two_fragrances().as_bytes()).await;

        let response = get_all(&store).await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body_json().unwrap().as_array().unwrap().len(), 10);
    }

    #[tokio::test]
    async fn test_get_all_storage_failure() {
        let store = FaultyStore::failing_reads();
        let response = get_all(&store).await;
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        let body = response.body_json().unwrap();
        assert_eq!(body["error"], "Internal Server Error");
        assert_eq!(body["details"], "Requested resource not found");
    }

    #[tokio::test]
    async fn test_seed_twice_leaves_seven_rows() {
        let store = InMemoryPriceStore::new();

        for _ in 0..2 {
            let response = seed(&store).await;
            assert_eq!(response.status, StatusCode::OK);
            assert_eq!(
                response.body_json().unwrap(),
                json!({"message": "Fragrance data inserted successfully!"})
            );
        }

        assert_eq!(store.query(SEED_FRAGRANCE).await.unwrap().len(), 7);
        assert_eq!(store.len().await, 7);
    }

    #[tokio::test]
    async fn test_seed_failure_keeps_earlier_rows() {
        let store = FaultyStore::failing_put_at(4);

        let response = seed(&store).await;

        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        let body = response.body_json().unwrap();
        assert_eq!(body["error"], "Failed to insert data");
        assert_eq!(body["details"], "Throughput exceeds the current capacity of your table");

        let stores: Vec<String> = store.inner.scan().await.unwrap().into_iter().map(|r| r.store_name).collect();
        assert_eq!(stores.len(), 3);
        for name in ["Amazon", "FragranceNet.com", "Perfumania"] {
            assert!(stores.iter().any(|s| s == name));
        }
        assert_eq!(store.call_count(), 4);
    }

    #[tokio::test]
    async fn test_upsert_example_payload() {
        let store = InMemoryPriceStore::new();

        let response = upsert(&store, CHANEL.as_bytes()).await;

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(
            response.body_json().unwrap(),
            json!({"message": "Fragrance data added or updated successfully!"})
        );
        let all = rows(&store).await;
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].key(), ("Chanel_No5", "Sephora"));
        assert_eq!(all[0].bottle_size, "N/A");
    }

    #[tokio::test]
    async fn test_upsert_is_idempotent() {
        let store = InMemoryPriceStore::new();
        upsert(&store, two_fragrances().as_bytes()).await;
        let once = rows(&store).await;

        upsert(&store, two_fragrances().as_bytes()).await;
        assert_eq!(rows(&store).await, once);
        assert_eq!(once.len(), 2);
    }

    #[tokio::test]
    async fn test_upsert_overwrites_whole_row() {
        let store = InMemoryPriceStore::new();
        upsert(&store, two_fragrances().as_bytes()).await;

        let update = r#"{"Tom_Ford_Oud": [{"store_name": "Nordstrom", "site_link": "https://nd/new", "product_name": "Oud Wood", "price": "$350.00"}]}"#;
        upsert(&store, update.as_bytes()).await;

        let nordstrom = store
            .query("Tom_Ford_Oud")
            .await
            .unwrap()
            .into_iter()
            .find(|r| r.store_name == "Nordstrom")
            .unwrap();
        assert_eq!(nordstrom.price, "$350.00");
        assert_eq!(nordstrom.site_link, "https://nd/new");
        // no merge with the previous 3.4 oz size
        assert_eq!(nordstrom.bottle_size, "N/A");
    }

    #[tokio::test]
    async fn test_upsert_malformed_body() {
        let store = FaultyStore::default();

        for body in ["", "{not json", "{}"] {
            let response = upsert(&store, body.as_bytes()).await;
            assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
            let json: Value = response.body_json().unwrap();
            assert_eq!(json["error"], "Failed to add or update data");
            assert!(json["details"].is_string());
        }
        assert_eq!(store.call_count(), 0);
    }

    #[tokio::test]
    async fn test_upsert_failure_on_nth_write() {
        let store = FaultyStore::failing_put_at(2);

        let response = upsert(&store, two_fragrances().as_bytes()).await;

        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.body_json().unwrap()["error"], "Failed to add or update data");
        let written = store.inner.scan().await.unwrap();
        assert_eq!(written.len(), 1);
        assert_eq!(written[0].store_name, "Neiman Marcus");
    }
}
