//! CLI tool to create the fragrance price table
//!
//! Usage:
//!   cargo run --bin setup_table
//!
//! For local development with DynamoDB Local:
//!   DYNAMODB_ENDPOINT_URL=http://localhost:8001 cargo run --bin setup_table

use anyhow::Result;
use aws_sdk_dynamodb::types::{
    AttributeDefinition, BillingMode, KeySchemaElement, KeyType, ScalarAttributeType,
};
use clap::Parser;
use fragrance_prices::config::{AwsConfigBuilder, Settings};
use fragrance_prices::db::models::{FRAGRANCE_NAME_KEY, STORE_NAME_KEY};

/// Create the fragrance price table
#[derive(Parser, Debug)]
#[command(name = "setup_table")]
#[command(about = "Create the DynamoDB table holding fragrance price listings")]
struct Args {
    /// DynamoDB endpoint URL (for local development)
    #[arg(long)]
    endpoint_url: Option<String>,

    /// Table name (overrides FRAGRANCE_TABLE env var)
    #[arg(long)]
    table: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings = Settings::load()?;
    if let Some(url) = args.endpoint_url {
        settings.dynamodb_endpoint_url = Some(url);
    }
    if let Some(table) = args.table {
        settings.fragrance_table = table;
    }

    if let Some(ref url) = settings.dynamodb_endpoint_url {
        println!("Using DynamoDB endpoint: {}", url);
    }

    let client = AwsConfigBuilder::new(&settings).build_dynamodb_client().await;

    println!("\n🚀 Setting up DynamoDB table...\n");

    let table_name = &settings.fragrance_table;
    match create_price_table(&client, table_name).await {
        Ok(true) => println!("✅ Created table: {}", table_name),
        Ok(false) => println!("⏭️  Table already exists: {}", table_name),
        Err(e) => {
            println!("❌ Failed to create table {}: {}", table_name, e);
            return Err(e);
        }
    }

    Ok(())
}

/// Returns `false` when the table already exists.
async fn create_price_table(client: &aws_sdk_dynamodb::Client, table_name: &str) -> Result<bool> {
    let tables = client.list_tables().send().await?;
    if tables.table_names().iter().any(|name| name == table_name) {
        return Ok(false);
    }

    client
        .create_table()
        .table_name(table_name)
        .attribute_definitions(
            AttributeDefinition::builder()
                .attribute_name(FRAGRANCE_NAME_KEY)
                .attribute_type(ScalarAttributeType::S)
                .build()?,
        )
        .attribute_definitions(
            AttributeDefinition::builder()
                .attribute_name(STORE_NAME_KEY)
                .attribute_type(ScalarAttributeType::S)
                .build()?,
        )
        .key_schema(
            KeySchemaElement::builder()
                .attribute_name(FRAGRANCE_NAME_KEY)
                .key_type(KeyType::Hash)
                .build()?,
        )
        .key_schema(
            KeySchemaElement::builder()
                .attribute_name(STORE_NAME_KEY)
                .key_type(KeyType::Range)
                .build()?,
        )
        .billing_mode(BillingMode::PayPerRequest)
        .send()
        .await?;

    Ok(true)
}
