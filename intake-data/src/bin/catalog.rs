use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use intake_core::matching::search;
use intake_data::CatalogLoader;

/// Check a found-items catalog file and optionally try a query against it.
///
/// The CSV file should have the following columns:
/// - id: unique integer
/// - photo_ref: photo URL (optional)
/// - description: free text
/// - location: station name (e.g. Пушкинская)
/// - date: YYYY-MM-DD
#[derive(Parser, Debug)]
#[command(name = "intake-catalog")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the catalog CSV file
    #[arg(short, long)]
    file: PathBuf,

    /// Query to run against the catalog after it loads
    #[arg(short, long)]
    query: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!("Loading catalog from: {}", args.file.display());

    let records = CatalogLoader::load_file(&args.file)
        .with_context(|| format!("Failed to load catalog: {}", args.file.display()))?;

    println!("Catalog is valid: {} records.", records.len());

    if let Some(query) = &args.query {
        let hits = search(query, &records);
        println!("Query {:?} matched {} record(s):", query, hits.len());
        for record in hits {
            println!(
                "  #{} {} ({}, {})",
                record.id, record.description, record.location, record.date
            );
        }
    }

    Ok(())
}
