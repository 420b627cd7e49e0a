//! Turn scraped shopping results into an upsert payload.
//!
//! A result is kept when its title contains at least half of the query's
//! words (case-insensitive substring match). The first result per store
//! wins, since search results arrive best match first.

use std::collections::HashSet;

use crate::schemas::{ShoppingResult, StoreListing, UpsertPayload};

/// Placeholder for text fields the search result did not carry.
pub const NOT_AVAILABLE: &str = "Not Available";

/// Placeholder for a missing link.
pub const MISSING_LINK: &str = "N/A";

/// Whether `title` mentions enough of `query` to be the same product.
pub fn is_relevant_title(title: &str, query: &str) -> bool {
    let title = title.to_lowercase();
    let query = query.to_lowercase();
    let keywords: Vec<&str> = query.split_whitespace().collect();
    let matches = keywords.iter().filter(|word| title.contains(*word)).count();

    matches * 2 >= keywords.len()
}

/// Relevant results as store listings, one per store.
pub fn to_store_listings(results: &[ShoppingResult], query: &str) -> Vec<StoreListing> {
    let mut seen = HashSet::new();
    let mut listings = Vec::new();

    for result in results {
        let Some(title) = result.title.as_deref() else {
            continue;
        };
        if !is_relevant_title(title, query) {
            tracing::debug!(title = %title, "Dropping irrelevant result");
            continue;
        }

        let store_name = result
            .source
            .clone()
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());
        if !seen.insert(store_name.clone()) {
            tracing::debug!(store_name = %store_name, title = %title, "Dropping duplicate store");
            continue;
        }

        listings.push(StoreListing {
            store_name,
            site_link: result.link.clone().unwrap_or_else(|| MISSING_LINK.to_string()),
            product_name: title.to_string(),
            bottle_size: None,
            price: result.price.clone().unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        });
    }

    listings
}

/// Build the payload for `fragrance_name` from scraped `results`.
pub fn build_payload(fragrance_name: &str, results: &[ShoppingResult], query: &str) -> UpsertPayload {
    let stores = to_store_listings(results, query);
    tracing::info!(
        fragrance_name = %fragrance_name,
        query = %query,
        results = results.len(),
        kept = stores.len(),
        "Built import payload"
    );
    UpsertPayload::new(fragrance_name, stores)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(title: &str, source: &str, price: Option<&str>) -> ShoppingResult {
        ShoppingResult {
            title: Some(title.to_string()),
            price: price.map(str::to_string),
            link: Some(format!("https://{}.example", source.to_lowercase())),
            source: Some(source.to_string()),
        }
    }

    #[test]
    fn test_relevance_needs_half_the_words() {
        let query = "Polo Blue Ralph Lauren";
        assert!(is_relevant_title("Ralph Lauren Polo Blue EDT 4.2 oz", query));
        assert!(is_relevant_title("POLO BLUE gift set", query));
        assert!(is_relevant_title("Polo Red by Ralph", query));
        assert!(!is_relevant_title("Acqua di Gio", query));
        assert!(is_relevant_title("anything", ""));
    }

    #[test]
    fn test_odd_keyword_count_rounds_up() {
        // 1 of 3 words is below half
        assert!(!is_relevant_title("Sauvage", "dior sauvage elixir"));
        assert!(is_relevant_title("Dior Sauvage", "dior sauvage elixir"));
    }

    #[test]
    fn test_to_store_listings_maps_and_dedupes() {
        let results = vec![
            result("Dior Sauvage Eau de Toilette 3.4 oz", "Sephora", Some("$112.00")),
            result("Dior Sauvage EDT travel spray", "Sephora", Some("$35.00")),
            result("Bleu de Chanel", "Macy's", Some("$150.00")),
            result("Sauvage by Christian Dior", "Walmart", None),
            ShoppingResult::default(),
        ];

        let listings = to_store_listings(&results, "Dior Sauvage");

        assert_eq!(listings.len(), 2);
        assert_eq!(listings[0].store_name, "Sephora");
        assert_eq!(listings[0].price, "$112.00");
        assert_eq!(listings[1].store_name, "Walmart");
        assert_eq!(listings[1].price, "Not Available");
        assert_eq!(listings[1].bottle_size, None);
    }

    #[test]
    fn test_build_payload_round_trips_through_upsert_body() {
        let results = vec![result("Versace Eros Flame EDP", "Macy's", Some("$72.99"))];
        let payload = build_payload("Versace_Eros_Flame", &results, "Eros Flame Versace");

        let body = serde_json::to_vec(&payload).unwrap();
        let parsed = UpsertPayload::from_slice(&body).unwrap();
        assert_eq!(parsed, payload);

        let rows = parsed.into_listings();
        assert_eq!(rows[0].key(), ("Versace_Eros_Flame", "Macy's"));
        assert_eq!(rows[0].bottle_size, "N/A");
    }
}
