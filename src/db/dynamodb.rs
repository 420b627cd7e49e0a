//! DynamoDB client wrapper
//!
//! This module provides a wrapper around the AWS DynamoDB SDK client
//! carrying the table settings the repositories need.

use aws_sdk_dynamodb::Client as DynamoDbSdkClient;
use crate::config::Settings;
use std::sync::Arc;

/// DynamoDB client wrapper for database operations.
#[derive(Clone)]
pub struct DynamoDbClient {
    /// Application settings
    settings: Arc<Settings>,

    /// AWS DynamoDB SDK client
    client: DynamoDbSdkClient,
}

impl DynamoDbClient {
    /// Create a new DynamoDB client.
    ///
    /// # Arguments
    /// * `settings` - Application settings containing DynamoDB configuration
    /// * `client` - AWS DynamoDB SDK client
    pub fn new(settings: Arc<Settings>, client: DynamoDbSdkClient) -> Self {
        Self { settings, client }
    }

    /// Get a reference to the underlying AWS SDK client
    pub fn client(&self) -> &DynamoDbSdkClient {
        &self.client
    }

    /// Get the fragrance prices table name
    pub fn fragrance_table(&self) -> &str {
        &self.settings.fragrance_table
    }

    /// Whether scans follow continuation keys past the first page
    pub fn scan_all_pages(&self) -> bool {
        self.settings.scan_all_pages
    }

    /// Check if the DynamoDB connection is healthy
    ///
    /// Describes the fragrance table, which also verifies that it exists.
    pub async fn health_check(&self) -> bool {
        match self
            .client
            .describe_table()
            .table_name(self.fragrance_table())
            .send()
            .await
        {
            Ok(_) => {
                tracing::debug!("DynamoDB health check passed");
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, table = %self.fragrance_table(), "DynamoDB health check failed");
                false
            }
        }
    }
}
