//! CLI tool to turn scraped shopping results into fragrance listings
//!
//! Usage:
//!   cargo run --bin import_listings -- --input dior_sauvage.json --fragrance-name Dior_Sauvage
//!
//! Writes the upsert payload to stdout (or `--output`). With `--apply` the
//! listings are also written to the configured table.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use fragrance_prices::config::Settings;
use fragrance_prices::db::create_price_store;
use fragrance_prices::logging::init_tracing;
use fragrance_prices::schemas::{ShoppingResult, UpsertPayload};
use fragrance_prices::services::apply_listings;
use fragrance_prices::services::import::build_payload;

/// Import scraped shopping results as fragrance price listings
#[derive(Parser, Debug)]
#[command(name = "import_listings")]
#[command(about = "Turn scraped shopping results into fragrance price listings")]
struct Args {
    /// JSON file holding an array of shopping results
    #[arg(short, long)]
    input: PathBuf,

    /// Partition key to file the listings under
    #[arg(short, long)]
    fragrance_name: String,

    /// Search query the results came from (defaults to the input file stem)
    #[arg(short, long)]
    query: Option<String>,

    /// Write the payload here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write the listings to the table
    #[arg(long)]
    apply: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let settings = Settings::load()?;
    init_tracing(&settings.log_level);

    let query = args
        .query
        .clone()
        .unwrap_or_else(|| default_query(&args.input));
    let payload = load_payload(&args.input, &args.fragrance_name, &query)?;

    let json = serde_json::to_string_pretty(&payload)?;
    match &args.output {
        Some(path) => {
            std::fs::write(path, &json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Wrote {} listings to {}", payload.stores.len(), path.display());
        }
        None => println!("{}", json),
    }

    if args.apply {
        let store = create_price_store(Arc::new(settings)).await;
        let written = apply_listings(store.as_ref(), &payload.into_listings()).await?;
        println!("✅ Wrote {} listings for {}", written, args.fragrance_name);
    }

    Ok(())
}

/// File stem with separators turned into spaces: `dior_sauvage.json` -> `dior sauvage`.
fn default_query(input: &Path) -> String {
    input
        .file_stem()
        .map(|stem| stem.to_string_lossy().replace(['_', '-'], " "))
        .unwrap_or_default()
}

fn load_payload(input: &Path, fragrance_name: &str, query: &str) -> Result<UpsertPayload> {
    let raw = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let results: Vec<ShoppingResult> = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a JSON array of shopping results", input.display()))?;

    Ok(build_payload(fragrance_name, &results, query))
}
