//! Request body shapes for fragrance price writes.
//!
//! An upsert body is a JSON object keyed by the fragrance name:
//!
//! ```json
//! { "Chanel_No5": [ { "store_name": "Sephora", "site_link": "https://...",
//!                     "product_name": "Chanel No. 5 EDP", "price": "$135.00" } ] }
//! ```

use serde::de::{self, Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::db::models::PriceListing;

/// One retailer entry inside an upsert body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreListing {
    pub store_name: String,
    pub site_link: String,
    pub product_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottle_size: Option<String>,
    pub price: String,
}

/// Parsed upsert body.
///
/// Only the first top-level key is used. Any further keys are recorded in
/// `ignored_keys` and their values are not validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpsertPayload {
    pub fragrance_name: String,
    pub stores: Vec<StoreListing>,
    pub ignored_keys: Vec<String>,
}

impl UpsertPayload {
    pub fn new(fragrance_name: impl Into<String>, stores: Vec<StoreListing>) -> Self {
        Self {
            fragrance_name: fragrance_name.into(),
            stores,
            ignored_keys: Vec::new(),
        }
    }

    /// Parse a raw request body.
    pub fn from_slice(body: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(body)
    }

    /// Rows to write, in payload order.
    pub fn into_listings(self) -> Vec<PriceListing> {
        let fragrance_name = self.fragrance_name;
        self.stores
            .into_iter()
            .map(|store| PriceListing::from_store(&fragrance_name, store))
            .collect()
    }
}

impl Serialize for UpsertPayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.fragrance_name, &self.stores)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for UpsertPayload {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PayloadVisitor;

        impl<'de> Visitor<'de> for PayloadVisitor {
            type Value = UpsertPayload;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object mapping a fragrance name to a list of store listings")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let (fragrance_name, stores) = map
                    .next_entry::<String, Vec<StoreListing>>()?
                    .ok_or_else(|| de::Error::custom("request body names no fragrance"))?;

                let mut ignored_keys = Vec::new();
                while let Some((key, IgnoredAny)) = map.next_entry::<String, IgnoredAny>()? {
                    ignored_keys.push(key);
                }

                Ok(UpsertPayload {
                    fragrance_name,
                    stores,
                    ignored_keys,
                })
            }
        }

        deserializer.deserialize_map(PayloadVisitor)
    }
}
