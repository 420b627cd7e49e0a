//! Repository pattern implementations
//!
//! Data access objects for DynamoDB tables.

pub mod price_listing;

pub use price_listing::PriceListingRepository;
