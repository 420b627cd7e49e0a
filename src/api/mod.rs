//! API endpoint handlers module
//!
//! Contains the HTTP endpoint handlers and the response type shared with
//! the serverless entry points.

pub mod fragrances;
pub mod health;
pub mod response;

pub use response::ApiResponse;
