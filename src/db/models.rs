//! DynamoDB data models
//!
//! This module defines the price listing row and its mapping to DynamoDB items.

use aws_sdk_dynamodb::types::AttributeValue;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::schemas::StoreListing;

/// Partition key attribute
pub const FRAGRANCE_NAME_KEY: &str = "fragrance_name";

/// Sort key attribute
pub const STORE_NAME_KEY: &str = "store_name";

/// Stored when a listing arrives without a bottle size
pub const UNKNOWN_BOTTLE_SIZE: &str = "N/A";

/// One retailer's listing for a fragrance.
///
/// Stored in the fragrance prices table with `fragrance_name` as partition key
/// and `store_name` as sort key. A write with an existing key pair replaces
/// the whole row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceListing {
    /// Product line identifier, e.g. `Dior_Sauvage` (partition key)
    pub fragrance_name: String,

    /// Retailer name (sort key)
    pub store_name: String,

    /// URL of the retailer's listing
    pub site_link: String,

    /// Retailer's display name for the product
    pub product_name: String,

    /// Free-text size, `N/A` when unknown
    pub bottle_size: String,

    /// Price exactly as the retailer shows it; never parsed
    pub price: String,
}

impl PriceListing {
    /// Build a row from a store entry of an upsert payload.
    ///
    /// A missing or empty `bottle_size` becomes `N/A`.
    pub fn from_store(fragrance_name: &str, store: StoreListing) -> Self {
        let bottle_size = store
            .bottle_size
            .filter(|size| !size.is_empty())
            .unwrap_or_else(|| UNKNOWN_BOTTLE_SIZE.to_string());

        Self {
            fragrance_name: fragrance_name.to_string(),
            store_name: store.store_name,
            site_link: store.site_link,
            product_name: store.product_name,
            bottle_size,
            price: store.price,
        }
    }

    /// Convert to DynamoDB item
    pub fn to_dynamodb(&self) -> HashMap<String, AttributeValue> {
        let mut item = HashMap::new();
        item.insert(
            FRAGRANCE_NAME_KEY.to_string(),
            AttributeValue::S(self.fragrance_name.clone()),
        );
        item.insert(
            STORE_NAME_KEY.to_string(),
            AttributeValue::S(self.store_name.clone()),
        );
        item.insert("site_link".to_string(), AttributeValue::S(self.site_link.clone()));
        item.insert(
            "product_name".to_string(),
            AttributeValue::S(self.product_name.clone()),
        );
        item.insert(
            "bottle_size".to_string(),
            AttributeValue::S(self.bottle_size.clone()),
        );
        item.insert("price".to_string(), AttributeValue::S(self.price.clone()));
        item
    }

    /// Parse from DynamoDB item
    ///
    /// Returns None when either key attribute is missing.
    pub fn from_dynamodb(item: &HashMap<String, AttributeValue>) -> Option<Self> {
        Some(Self {
            fragrance_name: get_string(item, FRAGRANCE_NAME_KEY)?,
            store_name: get_string(item, STORE_NAME_KEY)?,
            site_link: get_string(item, "site_link").unwrap_or_default(),
            product_name: get_string(item, "product_name").unwrap_or_default(),
            bottle_size: get_string(item, "bottle_size")
                .unwrap_or_else(|| UNKNOWN_BOTTLE_SIZE.to_string()),
            price: get_string(item, "price").unwrap_or_default(),
        })
    }

    /// Primary key of the row
    pub fn key(&self) -> (&str, &str) {
        (&self.fragrance_name, &self.store_name)
    }
}

fn get_string(item: &HashMap<String, AttributeValue>, key: &str) -> Option<String> {
    item.get(key).and_then(|v| v.as_s().ok()).map(|s| s.to_string())
}
