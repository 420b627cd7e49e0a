//! Fragrance price catalog
//!
//! Read and write access to a DynamoDB table of retail price listings,
//! served as serverless functions or through a local development server.

// Public modules
pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod lambda;
pub mod logging;
pub mod middleware;
pub mod schemas;
pub mod server;
pub mod services;

// Re-export commonly used types
pub use config::Settings;
pub use error::CatalogError;
pub use server::App;
