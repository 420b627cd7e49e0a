//! Scraped shopping search results.
//!
//! The scraper writes one JSON array per fragrance query. Every field is
//! optional there, and `rating`/`reviews` may be numbers or placeholder
//! strings, so only the fields used for import are typed.

use serde::Deserialize;

/// One shopping search hit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ShoppingResult {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}
